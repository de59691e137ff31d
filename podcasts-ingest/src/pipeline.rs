// pipeline.rs
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

//! Fetch, parse and walk feeds end to end.

use crate::errors::DataError;
use crate::jobs::JobQueue;
use crate::media_url::client_builder;
use crate::Podcast;

/// The pipeline to be run for ingesting a `Podcast` feed.
///
/// Podcast -> GET Request -> Check Status -> Parse `xml/Rss` ->
/// Convert `rss::Channel` into `Feed` -> Walk the items -> Queue
/// episode jobs.
///
/// Feeds are fetched and walked concurrently with each other, the
/// items within one feed sequentially. A feed failing to fetch or
/// parse contributes nothing but a log line. Returns the total count
/// of create decisions across all feeds.
pub async fn pipeline<P>(
    podcasts: P,
    queue: &dyn JobQueue,
    limit: usize,
    force_update: bool,
) -> Result<usize, DataError>
where
    P: IntoIterator<Item = Podcast>,
{
    let client = client_builder().build()?;

    let handles: Vec<_> = podcasts
        .into_iter()
        .map(|podcast| async {
            match podcast.into_feed(&client).await {
                Ok(feed) => match feed.index(queue, limit, force_update) {
                    Ok(count) => count,
                    Err(err) => {
                        error!("Error while walking the feed items: {}", err);
                        0
                    }
                },
                Err(err) => {
                    error!("Error while fetching the latest xml feed: {}", err);
                    0
                }
            }
        })
        .collect();

    let counts = futures::future::join_all(handles).await;
    Ok(counts.into_iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    use crate::database::reset_db;
    use crate::jobs::ChannelQueue;

    #[test]
    fn test_pipeline_with_no_podcasts() -> Result<()> {
        let _db = reset_db()?;
        let rt = tokio::runtime::Runtime::new()?;
        let (queue, receiver) = ChannelQueue::new();

        let count = rt.block_on(pipeline(Vec::new(), &queue, 100, false))?;
        assert_eq!(count, 0);
        assert!(receiver.is_empty());
        Ok(())
    }

    #[test]
    #[ignore = "fetches a live feed over the network"]
    fn test_pipeline() -> Result<()> {
        let _db = reset_db()?;
        let url = "https://web.archive.org/web/20180120083840if_/https://feeds.feedburner.\
                   com/InterceptedWithJeremyScahill";
        let pd = Podcast::from_url("Intercepted", url)?;

        let rt = tokio::runtime::Runtime::new()?;
        let (queue, receiver) = ChannelQueue::new();

        let count = rt.block_on(pipeline(vec![pd], &queue, 10, false))?;
        assert_eq!(count, 10);
        assert_eq!(receiver.len(), 10);
        Ok(())
    }
}
