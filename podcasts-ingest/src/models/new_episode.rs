// new_episode.rs
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

use chrono::prelude::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::database::connection;
use crate::dbqueries;
use crate::errors::DataError;
use crate::feed_item::FeedItem;
use crate::media_url::MediaUrlResolution;
use crate::models::{Episode, Insert};
use crate::parser;
use crate::schema::episodes;

#[derive(Insertable)]
#[diesel(table_name = episodes)]
#[derive(Debug, Clone, Builder, PartialEq)]
#[builder(derive(Debug))]
#[builder(setter(into))]
pub(crate) struct NewEpisode {
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

impl Insert<()> for NewEpisode {
    type Error = DataError;

    fn insert(&self) -> Result<(), DataError> {
        use crate::schema::episodes::dsl::*;
        let db = connection();
        let mut con = db.get()?;

        info!("Inserting {:?}", self.title);
        diesel::insert_into(episodes)
            .values(self)
            .execute(&mut con)
            .map_err(From::from)
            .map(|_| ())
    }
}

impl PartialEq<Episode> for NewEpisode {
    fn eq(&self, other: &Episode) -> bool {
        (self.podcast_id() == other.podcast_id())
            && (self.title() == other.title())
            && (self.subtitle == other.subtitle().map(|s| s.to_owned()))
            && (self.summary == other.summary().map(|s| s.to_owned()))
            && (self.body == other.body().map(|s| s.to_owned()))
            && (self.website_url == other.website_url().map(|s| s.to_owned()))
            && (self.guid() == other.guid())
            && (self.media_url() == other.media_url())
            && (self.https == other.https())
            && (self.reachable == other.reachable())
            && (self.published_at == other.published_at())
            && (self.created_at == other.created_at())
    }
}

impl NewEpisode {
    /// Combine a normalized `FeedItem` with a `MediaUrlResolution`
    /// into an insertable episode row.
    pub(crate) fn new(
        item: &FeedItem,
        podcast_id: i32,
        resolution: &MediaUrlResolution,
    ) -> Result<Self, DataError> {
        let published_at = item.publish_date_raw().and_then(parser::parse_publish_date);

        NewEpisodeBuilder::default()
            .podcast_id(podcast_id)
            .title(item.title().map(|s| s.to_owned()))
            .subtitle(item.subtitle().map(|s| s.to_owned()))
            .summary(item.summary().map(|s| s.to_owned()))
            .body(item.body().map(|s| s.to_owned()))
            .website_url(item.link().map(|s| s.to_owned()))
            .guid(item.guid().map(|s| s.to_owned()))
            .media_url(resolution.url())
            .https(resolution.https())
            .reachable(resolution.reachable())
            .published_at(published_at)
            .created_at(Utc::now().naive_utc())
            .build()
            .map_err(|err| DataError::BuilderError(format!("{err}")))
    }

    pub(crate) fn to_episode(&self) -> Result<Episode, DataError> {
        self.insert()?;
        dbqueries::get_episode(self.podcast_id, &self.media_url)
    }
}

// Ignore the following getters. They are used in unit tests mainly.
impl NewEpisode {
    pub(crate) fn podcast_id(&self) -> i32 {
        self.podcast_id
    }

    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }

    pub(crate) fn media_url(&self) -> &str {
        &self.media_url
    }

    pub(crate) fn published_at(&self) -> Option<NaiveDateTime> {
        self.published_at
    }

    pub(crate) fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}
