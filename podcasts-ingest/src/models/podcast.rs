// podcast.rs
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

use diesel::prelude::*;
use rss::Channel;
use url::Url;

use crate::errors::DataError;
use crate::feed::{Feed, FeedBuilder};
use crate::models::NewPodcast;
use crate::schema::podcasts;

#[derive(Queryable, Identifiable, PartialEq)]
#[diesel(table_name = podcasts)]
#[derive(Debug, Clone)]
/// Diesel Model of the podcasts table.
///
/// Ingestion reads podcasts, it never mutates them.
pub struct Podcast {
    id: i32,
    title: String,
    feed_url: String,
}

impl Podcast {
    /// Get the podcast `id` column.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Get the value of the `title` field.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The location of the xml feed the episodes come from.
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Construct a new `Podcast` with the given feed url and index it.
    ///
    /// This only indexes the `Podcast` row, episodes are ingested by
    /// the walker on a later pass.
    pub fn from_url(title: &str, feed_url: &str) -> Result<Podcast, DataError> {
        let url = Url::parse(feed_url)?;

        NewPodcast::new(title, &url).to_podcast()
    }

    /// `Feed` constructor.
    ///
    /// Fetches the latest xml feed and parses it.
    ///
    /// Consumes `self` and returns the corresponding `Feed` object.
    pub async fn into_feed(self, client: &reqwest::Client) -> Result<Feed, DataError> {
        let id = self.id();

        let res = client.get(self.feed_url()).send().await?;
        let code = res.status();
        if !code.is_success() {
            return Err(DataError::HttpStatusGeneral {
                url: self.feed_url,
                status_code: code,
                context: "Failed to fetch the feed".into(),
            });
        }

        let bytes = res.bytes().await?;
        // Channel does its own string decoding based on what is
        // specified in <?xml encoding="..."?>, pass it the raw bytes.
        let channel = Channel::read_from(&bytes[..])?;

        FeedBuilder::default()
            .channel(channel)
            .podcast_id(id)
            .build()
            .map_err(|err| DataError::BuilderError(format!("{err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    use crate::database::reset_db;
    use crate::dbqueries;

    #[test]
    fn test_from_url() -> Result<()> {
        let _db = reset_db()?;

        let url = "https://openaudio.example/feed.xml";
        let pd = Podcast::from_url("Open Audio Weekly", url)?;
        assert_eq!(pd.title(), "Open Audio Weekly");
        assert_eq!(pd.feed_url(), url);

        // Indexing the same url twice must not create a second row.
        let pd2 = Podcast::from_url("Open Audio Weekly", url)?;
        assert_eq!(pd, pd2);
        assert_eq!(dbqueries::get_podcasts()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_from_url_invalid() -> Result<()> {
        let _db = reset_db()?;

        assert!(Podcast::from_url("Broken", "not a url").is_err());
        assert_eq!(dbqueries::get_podcasts()?.len(), 0);
        Ok(())
    }
}
