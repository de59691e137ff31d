// episode.rs
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

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SaveChangesDsl;

use crate::database::connection;
use crate::errors::DataError;
use crate::models::{Podcast, Save};
use crate::schema::episodes;

#[derive(Queryable, Identifiable, AsChangeset, Associations, PartialEq)]
#[diesel(table_name = episodes)]
#[diesel(treat_none_as_null = true)]
#[diesel(belongs_to(Podcast, foreign_key = podcast_id))]
#[derive(Debug, Clone)]
/// Diesel Model of the episodes table.
pub struct Episode {
    id: i32,
    podcast_id: i32,
    title: Option<String>,
    subtitle: Option<String>,
    summary: Option<String>,
    body: Option<String>,
    website_url: Option<String>,
    guid: Option<String>,
    media_url: String,
    https: bool,
    reachable: bool,
    published_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
}

impl Save<Episode> for Episode {
    type Error = DataError;

    /// Helper method to easily save/"sync" current state of self to the
    /// Database.
    fn save(&self) -> Result<Episode, Self::Error> {
        let db = connection();
        let mut con = db.get()?;

        self.save_changes::<Episode>(&mut con).map_err(From::from)
    }
}

impl Episode {
    /// Get the episode `id` column.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// `Podcast` table foreign key.
    pub fn podcast_id(&self) -> i32 {
        self.podcast_id
    }

    /// Get the value of the `title` field.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the `title` field value.
    pub fn set_title(&mut self, value: Option<String>) {
        self.title = value;
    }

    /// Get the itunes `subtitle` of the episode.
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Get the itunes `summary` of the episode.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Get the sanitized `body` html.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Set the `body` field value.
    pub fn set_body(&mut self, value: Option<String>) {
        self.body = value;
    }

    /// Get the episode's website link.
    pub fn website_url(&self) -> Option<&str> {
        self.website_url.as_deref()
    }

    /// Get the Episode's `guid`.
    pub fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }

    /// Get the `media_url`.
    ///
    /// Represents the url the media file is played/downloaded from.
    /// Together with `podcast_id` it identifies an episode.
    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    /// Set the `media_url` field value.
    pub fn set_media_url(&mut self, value: String) {
        self.media_url = value;
    }

    /// Whether `media_url` carries the https scheme.
    pub fn https(&self) -> bool {
        self.https
    }

    /// Set the `https` flag.
    pub fn set_https(&mut self, value: bool) {
        self.https = value;
    }

    /// Whether the last `HEAD` probe of `media_url` got a successful
    /// status back.
    pub fn reachable(&self) -> bool {
        self.reachable
    }

    /// Set the `reachable` flag.
    pub fn set_reachable(&mut self, value: bool) {
        self.reachable = value;
    }

    /// Get the `published_at` value.
    ///
    /// Parsed from the feed item publish date. None when the feed
    /// never carried a parseable date.
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        self.published_at
    }

    /// Set the `published_at` value.
    pub fn set_published_at(&mut self, value: Option<NaiveDateTime>) {
        self.published_at = value;
    }

    /// Get the `created_at` value.
    ///
    /// The moment the row was first written, not the publish date.
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}
