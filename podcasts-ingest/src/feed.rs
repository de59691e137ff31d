// feed.rs
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

//! Walk feeds and queue the episode work they imply.

use crate::dbqueries;
use crate::errors::DataError;
use crate::feed_item::FeedItem;
use crate::jobs::{Job, JobQueue};
use crate::models::Podcast;
use crate::reconcile::{reconcile, ReconcileAction};

/// Wrapper struct that holds a `Podcast` id along with the
/// `rss::Channel` fetched from its feed url.
#[derive(Debug, Clone, Builder, PartialEq)]
#[builder(derive(Debug))]
#[builder(setter(into))]
pub struct Feed {
    /// The `rss::Channel` parsed from the `Podcast` feed url.
    channel: rss::Channel,
    /// The `Podcast` id the `rss::Channel` belongs to.
    podcast_id: i32,
}

impl Feed {
    /// Walk the channel items and queue the work they imply.
    ///
    /// Returns the number of episodes the walk decided to create.
    pub fn index(
        self,
        queue: &dyn JobQueue,
        limit: usize,
        force_update: bool,
    ) -> Result<usize, DataError> {
        let podcast = dbqueries::get_podcast_from_id(self.podcast_id)?;

        Ok(walk(
            &podcast,
            self.channel.items(),
            limit,
            force_update,
            queue,
        ))
    }
}

/// Reconcile up to `limit` feed items against the episodes of
/// `podcast` and enqueue the resulting jobs.
///
/// One broken item never aborts the rest of the walk. Reconcile and
/// enqueue failures get logged and the walk moves on, so the count of
/// create decisions is reported even when a queue went away under us.
pub fn walk(
    podcast: &Podcast,
    items: &[rss::Item],
    limit: usize,
    force_update: bool,
    queue: &dyn JobQueue,
) -> usize {
    let mut new_count = 0;

    for item in items.iter().take(limit) {
        let feed_item = FeedItem::from(item);

        match reconcile(podcast, &feed_item, force_update) {
            Ok(ReconcileAction::Create(podcast_id, feed_item)) => {
                new_count += 1;
                if let Err(err) = queue.enqueue(Job::CreateEpisode(podcast_id, feed_item)) {
                    error!("Failed to enqueue a create job: {}", err);
                }
            }
            Ok(ReconcileAction::Refresh(episode_id)) => {
                if let Err(err) = queue.enqueue(Job::RefreshMediaUrl(episode_id)) {
                    error!("Failed to enqueue a refresh job: {}", err);
                }
            }
            Ok(ReconcileAction::NoOp) => (),
            Err(err) => error!("Failed to reconcile a feed item: {}", err),
        }
    }

    new_count
}

#[cfg(test)]
pub(crate) fn get_feed(file_path: &str, podcast_id: i32) -> Feed {
    use std::fs;
    use std::io::BufReader;

    let file = fs::File::open(file_path).unwrap();
    let channel = rss::Channel::read_from(BufReader::new(file)).unwrap();

    FeedBuilder::default()
        .channel(channel)
        .podcast_id(podcast_id)
        .build()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    use reqwest::StatusCode;
    use tokio::runtime::Runtime;

    use crate::database::reset_db;
    use crate::jobs::ChannelQueue;
    use crate::media_url::StaticProbe;

    const FEED: &str = "tests/feeds/2026-07-30-OpenAudioWeekly.xml";

    fn demo_podcast() -> Result<Podcast, DataError> {
        Podcast::from_url("Open Audio Weekly", "https://openaudio.example/feed.xml")
    }

    #[test]
    fn test_walk_counts_create_decisions() -> Result<()> {
        let _db = reset_db()?;
        let pd = demo_podcast()?;
        let feed = get_feed(FEED, pd.id());
        let (queue, receiver) = ChannelQueue::new();

        // Five items in the fixture, one of them without an enclosure.
        let count = feed.index(&queue, 100, false)?;
        assert_eq!(count, 4);
        assert_eq!(receiver.len(), 4);
        assert!(receiver
            .try_iter()
            .all(|job| matches!(job, Job::CreateEpisode(..))));
        Ok(())
    }

    #[test]
    fn test_walk_respects_limit() -> Result<()> {
        let _db = reset_db()?;
        let pd = demo_podcast()?;
        let feed = get_feed(FEED, pd.id());
        let (queue, receiver) = ChannelQueue::new();

        let count = feed.index(&queue, 2, false)?;
        assert_eq!(count, 2);
        assert_eq!(receiver.len(), 2);
        Ok(())
    }

    #[test]
    fn test_walk_second_pass_creates_no_duplicates() -> Result<()> {
        let _db = reset_db()?;
        let rt = Runtime::new()?;
        let probe = StaticProbe::new(Some(StatusCode::OK), None);
        let pd = demo_podcast()?;
        let (queue, receiver) = ChannelQueue::new();

        let count = get_feed(FEED, pd.id()).index(&queue, 100, false)?;
        assert_eq!(count, 4);
        for job in receiver.try_iter() {
            rt.block_on(job.run(&probe))?;
        }
        assert_eq!(dbqueries::get_pd_episodes_count(&pd)?, 4);

        // The https enclosures settled onto their own urls and walk
        // right past. The http enclosure keeps missing the lookup,
        // because its row got stored under the https variant, so it
        // decides Create again and converges in the writer.
        let count = get_feed(FEED, pd.id()).index(&queue, 100, false)?;
        assert_eq!(count, 1);
        for job in receiver.try_iter() {
            rt.block_on(job.run(&probe))?;
        }
        assert_eq!(dbqueries::get_pd_episodes_count(&pd)?, 4);
        Ok(())
    }

    #[test]
    fn test_walk_then_list_newest_first() -> Result<()> {
        let _db = reset_db()?;
        let rt = Runtime::new()?;
        let probe = StaticProbe::new(Some(StatusCode::OK), None);
        let pd = demo_podcast()?;
        let (queue, receiver) = ChannelQueue::new();

        get_feed(FEED, pd.id()).index(&queue, 100, false)?;
        for job in receiver.try_iter() {
            rt.block_on(job.run(&probe))?;
        }

        // Newest first; the episode whose date never parsed keeps a
        // NULL publish date and sorts last.
        let episodes = dbqueries::get_pd_episodes(&pd)?;
        let guids: Vec<_> = episodes.iter().map(|ep| ep.guid()).collect();
        assert_eq!(
            guids,
            [Some("OAW-001"), Some("OAW-002"), Some("OAW-005"), Some("OAW-004")]
        );
        Ok(())
    }

    #[test]
    fn test_walk_force_update_refreshes_known_episodes() -> Result<()> {
        let _db = reset_db()?;
        let rt = Runtime::new()?;
        let probe = StaticProbe::new(Some(StatusCode::OK), None);
        let pd = demo_podcast()?;
        let (queue, receiver) = ChannelQueue::new();

        get_feed(FEED, pd.id()).index(&queue, 100, false)?;
        for job in receiver.try_iter() {
            rt.block_on(job.run(&probe))?;
        }

        // Create-or-not is decided before force_update gets a say, so
        // the http enclosure still counts as new. The settled ones all
        // get a refresh.
        let count = get_feed(FEED, pd.id()).index(&queue, 100, true)?;
        assert_eq!(count, 1);

        let jobs: Vec<_> = receiver.try_iter().collect();
        assert_eq!(jobs.len(), 4);
        assert_eq!(
            jobs.iter()
                .filter(|job| matches!(job, Job::RefreshMediaUrl(_)))
                .count(),
            3
        );
        assert_eq!(
            jobs.iter()
                .filter(|job| matches!(job, Job::CreateEpisode(..)))
                .count(),
            1
        );
        Ok(())
    }

    #[test]
    fn test_walk_survives_a_dead_queue() -> Result<()> {
        let _db = reset_db()?;
        let pd = demo_podcast()?;
        let feed = get_feed(FEED, pd.id());
        let (queue, receiver) = ChannelQueue::new();
        drop(receiver);

        // Enqueueing fails item after item, the walk still finishes
        // and still reports its decisions.
        let count = feed.index(&queue, 100, false)?;
        assert_eq!(count, 4);
        Ok(())
    }

    #[test]
    fn test_walk_survives_reconcile_failures() -> Result<()> {
        use diesel::RunQueryDsl;

        let _db = reset_db()?;
        let pd = demo_podcast()?;
        let feed = get_feed(FEED, pd.id());
        let (queue, receiver) = ChannelQueue::new();

        // Lose the episodes table out from under the walk. Every
        // lookup now errors and every item takes the failure path.
        let db = crate::database::connection();
        let mut con = db.get()?;
        diesel::sql_query("DROP TABLE episodes").execute(&mut con)?;

        let count = feed.index(&queue, 100, false)?;
        assert_eq!(count, 0);
        assert!(receiver.is_empty());
        Ok(())
    }

    #[test]
    fn test_index_unknown_podcast() -> Result<()> {
        let _db = reset_db()?;
        let feed = get_feed(FEED, 711);
        let (queue, _receiver) = ChannelQueue::new();

        assert!(feed.index(&queue, 100, false).is_err());
        Ok(())
    }
}
