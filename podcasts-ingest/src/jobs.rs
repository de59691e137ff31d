// jobs.rs
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

//! Deferred episode work, handed off through a queue.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::dbqueries;
use crate::errors::DataError;
use crate::feed_item::FeedItem;
use crate::media_url::HeadProbe;
use crate::models::Episode;
use crate::writer;

/// A unit of episode work produced by the reconciler.
///
/// Jobs are safe to re-run. A `CreateEpisode` whose row appeared in
/// the meantime converges into an update, and a `RefreshMediaUrl`
/// that finds nothing changed writes nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// Resolve the enclosure of a feed item and write a row for it,
    /// keyed by the podcast id.
    CreateEpisode(i32, FeedItem),
    /// Re-resolve the stored media url of the episode with this id.
    RefreshMediaUrl(i32),
}

impl Job {
    /// Execute the job against the datastore.
    pub async fn run(&self, probe: &dyn HeadProbe) -> Result<Episode, DataError> {
        match self {
            Job::CreateEpisode(podcast_id, item) => {
                writer::create_episode(probe, *podcast_id, item).await
            }
            Job::RefreshMediaUrl(episode_id) => {
                let episode = dbqueries::get_episode_from_id(*episode_id)?;
                writer::refresh_media_url(probe, episode).await
            }
        }
    }
}

/// Where the walker drops the jobs it decides on.
pub trait JobQueue: Send + Sync {
    /// Hand a job off for later execution.
    fn enqueue(&self, job: Job) -> Result<(), DataError>;
}

/// `JobQueue` over an unbounded crossbeam channel.
#[derive(Debug, Clone)]
pub struct ChannelQueue {
    sender: Sender<Job>,
}

impl ChannelQueue {
    /// Create a queue along with the receiving end of its channel.
    pub fn new() -> (ChannelQueue, Receiver<Job>) {
        let (sender, receiver) = unbounded();
        (ChannelQueue { sender }, receiver)
    }
}

impl JobQueue for ChannelQueue {
    fn enqueue(&self, job: Job) -> Result<(), DataError> {
        debug!("Enqueuing {:?}", job);
        self.sender
            .send(job)
            .map_err(|_| DataError::QueueDisconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    use reqwest::StatusCode;
    use tokio::runtime::Runtime;

    use crate::database::reset_db;
    use crate::feed_item::FeedItemBuilder;
    use crate::media_url::StaticProbe;

    const URL: &str = "http://cdn.openaudio.example/oaw/014.mp3";
    const HTTPS_URL: &str = "https://cdn.openaudio.example/oaw/014.mp3";

    fn demo_item() -> FeedItem {
        FeedItemBuilder::default()
            .title(Some(String::from("Equinox Marks the Spot")))
            .enclosure_url(Some(String::from(URL)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_enqueue() -> Result<()> {
        let (queue, receiver) = ChannelQueue::new();

        queue.enqueue(Job::CreateEpisode(42, demo_item()))?;
        queue.enqueue(Job::RefreshMediaUrl(7))?;

        assert_eq!(receiver.recv()?, Job::CreateEpisode(42, demo_item()));
        assert_eq!(receiver.recv()?, Job::RefreshMediaUrl(7));
        assert!(receiver.is_empty());
        Ok(())
    }

    #[test]
    fn test_enqueue_into_dropped_receiver() {
        let (queue, receiver) = ChannelQueue::new();
        drop(receiver);

        let res = queue.enqueue(Job::RefreshMediaUrl(7));
        assert!(matches!(res, Err(DataError::QueueDisconnected)));
    }

    #[test]
    fn test_run_create_twice_converges() -> Result<()> {
        let _db = reset_db()?;
        let rt = Runtime::new()?;
        let probe = StaticProbe::new(Some(StatusCode::OK), None);

        let job = Job::CreateEpisode(42, demo_item());
        let first = rt.block_on(job.run(&probe))?;
        let second = rt.block_on(job.run(&probe))?;

        assert_eq!(first, second);
        assert_eq!(dbqueries::get_episodes()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_run_refresh() -> Result<()> {
        let _db = reset_db()?;
        let rt = Runtime::new()?;
        let probe = StaticProbe::new(Some(StatusCode::OK), None);

        let ep = rt.block_on(Job::CreateEpisode(42, demo_item()).run(&probe))?;
        let refreshed = rt.block_on(Job::RefreshMediaUrl(ep.id()).run(&probe))?;

        assert_eq!(refreshed.media_url(), HTTPS_URL);
        assert!(refreshed.https());
        assert!(refreshed.reachable());
        Ok(())
    }

    #[test]
    fn test_run_refresh_missing_episode() -> Result<()> {
        let _db = reset_db()?;
        let rt = Runtime::new()?;
        let probe = StaticProbe::new(Some(StatusCode::OK), None);

        let res = rt.block_on(Job::RefreshMediaUrl(1).run(&probe));
        assert!(res.is_err());
        Ok(())
    }
}
