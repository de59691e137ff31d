// reconcile.rs
//
// Copyright 2026 Jordan Petridis <jpetridis@gnome.org>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decide what to do with a feed item.

use chrono::prelude::*;
use chrono::Duration;

use crate::dbqueries;
use crate::errors::DataError;
use crate::feed_item::FeedItem;
use crate::models::{Episode, Podcast};

/// How long after creation an episode with an unhealthy media url
/// keeps getting re-probed on every walk.
pub const MEDIA_REFRESH_WINDOW_DAYS: i64 = 2;

/// What the walker should do with one feed item.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileAction {
    /// No episode matches the enclosure, insert one.
    Create(i32, FeedItem),
    /// The episode exists but its media url wants re-probing.
    Refresh(i32),
    /// Nothing to do for this item.
    NoOp,
}

/// Match a feed item against the persisted episodes of `podcast`.
///
/// First match wins: items without an enclosure are skipped, unknown
/// enclosures create, `force_update` refreshes anything it finds, and
/// recently created episodes whose media url did not land on healthy
/// https get another probe. Everything else is left alone.
pub fn reconcile(
    podcast: &Podcast,
    item: &FeedItem,
    force_update: bool,
) -> Result<ReconcileAction, DataError> {
    let Some(enclosure_url) = item.enclosure_url() else {
        debug!("Feed item carries no enclosure: {:?}", item.title());
        return Ok(ReconcileAction::NoOp);
    };

    if !dbqueries::episode_exists(podcast.id(), enclosure_url)? {
        return Ok(ReconcileAction::Create(podcast.id(), item.clone()));
    }

    let episode = dbqueries::get_episode(podcast.id(), enclosure_url)?;
    if force_update || needs_repair(&episode) {
        return Ok(ReconcileAction::Refresh(episode.id()));
    }

    Ok(ReconcileAction::NoOp)
}

fn needs_repair(episode: &Episode) -> bool {
    let unhealthy = !episode.https() || !episode.reachable();
    let age = Utc::now().naive_utc() - episode.created_at();

    unhealthy && age < Duration::days(MEDIA_REFRESH_WINDOW_DAYS)
}
