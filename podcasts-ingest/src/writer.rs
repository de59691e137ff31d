// writer.rs
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

//! Persist episodes out of resolved feed items.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::dbqueries;
use crate::errors::DataError;
use crate::feed_item::FeedItem;
use crate::media_url::{self, HeadProbe, MediaUrlResolution};
use crate::models::{Episode, NewEpisode, Save};
use crate::parser;

/// Resolve the item's enclosure and insert an episode for it.
///
/// If the resolved url already belongs to an episode of this podcast
/// the call converges into an update of that row instead. The same
/// applies when a concurrent insert wins the race to the unique
/// `(podcast_id, media_url)` pair.
pub async fn create_episode(
    probe: &dyn HeadProbe,
    podcast_id: i32,
    item: &FeedItem,
) -> Result<Episode, DataError> {
    let enclosure_url = item
        .enclosure_url()
        .ok_or_else(|| DataError::ParseEpisodeError {
            reason: String::from("No enclosure url specified for the item."),
            podcast_id,
        })?;

    let resolution = media_url::resolve(probe, enclosure_url).await;

    // The reconciler matched on the raw enclosure url, but resolution
    // may have moved it onto https and onto an existing row.
    if dbqueries::episode_exists(podcast_id, resolution.url())? {
        let episode = dbqueries::get_episode(podcast_id, resolution.url())?;
        return apply_update(episode, item, &resolution);
    }

    match NewEpisode::new(item, podcast_id, &resolution)?.to_episode() {
        Ok(episode) => Ok(episode),
        Err(DataError::DieselResultError(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _,
        ))) => {
            // Lost the insert race, converge on the winner.
            let episode = dbqueries::get_episode(podcast_id, resolution.url())?;
            apply_update(episode, item, &resolution)
        }
        Err(err) => Err(err),
    }
}

/// Re-resolve the item's enclosure and fold its fields into `episode`.
pub async fn update_episode(
    probe: &dyn HeadProbe,
    episode: Episode,
    item: &FeedItem,
) -> Result<Episode, DataError> {
    let enclosure_url = item
        .enclosure_url()
        .ok_or_else(|| DataError::ParseEpisodeError {
            reason: String::from("No enclosure url specified for the item."),
            podcast_id: episode.podcast_id(),
        })?;

    let resolution = media_url::resolve(probe, enclosure_url).await;
    apply_update(episode, item, &resolution)
}

/// Probe the episode's own media url again and persist the outcome if
/// anything about it changed.
pub async fn refresh_media_url(
    probe: &dyn HeadProbe,
    mut episode: Episode,
) -> Result<Episode, DataError> {
    let resolution = media_url::resolve(probe, episode.media_url()).await;

    if resolution.url() == episode.media_url()
        && resolution.https() == episode.https()
        && resolution.reachable() == episode.reachable()
    {
        return Ok(episode);
    }

    episode.set_media_url(resolution.url().to_owned());
    episode.set_https(resolution.https());
    episode.set_reachable(resolution.reachable());

    info!("Refreshing media url of {:?}", episode.title());
    episode.save()
}

fn apply_update(
    mut episode: Episode,
    item: &FeedItem,
    resolution: &MediaUrlResolution,
) -> Result<Episode, DataError> {
    let old = episode.clone();

    // The live feed is the source of truth for the content fields.
    episode.set_title(item.title().map(|s| s.to_owned()));
    episode.set_body(item.body().map(|s| s.to_owned()));

    // The first date that parses sticks, whenever it shows up.
    if episode.published_at().is_none() {
        if let Some(date) = item.publish_date_raw().and_then(parser::parse_publish_date) {
            episode.set_published_at(Some(date));
        }
    }

    // The media fields only move together with the url itself. Flag
    // churn on a settled url is the refresher's business.
    if resolution.url() != episode.media_url() {
        episode.set_media_url(resolution.url().to_owned());
        episode.set_https(resolution.https());
        episode.set_reachable(resolution.reachable());
    }

    if episode != old {
        info!("Updating {:?}", episode.title());
        episode = episode.save()?;
    }

    Ok(episode)
}
