#![recursion_limit = "1024"]
#![warn(nonstandard_style, unused)]
#![warn(missing_debug_implementations, missing_docs, trivial_casts, trivial_numeric_casts)]

//! Podcast episode ingestion.
//!
//! Walks parsed RSS feeds, reconciles every item against the `episodes`
//! table and repairs each episode's media url, preferring https over
//! http when the host answers on both.

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate diesel;
#[macro_use]
extern crate log;

mod database;
#[allow(missing_docs)]
pub mod dbqueries;
#[allow(missing_docs)]
pub mod errors;
mod feed;
mod feed_item;
mod jobs;
mod media_url;
pub(crate) mod models;
mod parser;
pub mod pipeline;
mod reconcile;
mod schema;
mod writer;

pub use crate::feed::{walk, Feed, FeedBuilder};
pub use crate::feed_item::{FeedItem, FeedItemBuilder};
pub use crate::jobs::{ChannelQueue, Job, JobQueue};
pub use crate::media_url::{
    resolve, HeadProbe, HttpHeadProbe, MediaUrlResolution, DEFAULT_PROBE_TIMEOUT,
};
pub use crate::models::Save;
pub use crate::models::{Episode, Podcast};
pub use crate::reconcile::{reconcile, ReconcileAction, MEDIA_REFRESH_WINDOW_DAYS};
pub use crate::writer::{create_episode, refresh_media_url, update_episode};

/// The user-agent used for feed requests and media probes.
pub const USER_AGENT: &str = "podcasts-ingest/0.1";

/// [XDG Base Directory](https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html) Paths.
#[allow(missing_debug_implementations)]
pub mod xdg_dirs {
    use std::path::PathBuf;
    use std::sync::LazyLock;

    pub(crate) static INGEST_XDG: LazyLock<xdg::BaseDirectories> =
        LazyLock::new(|| xdg::BaseDirectories::with_prefix("podcasts-ingest").unwrap());

    /// XDG_DATA Directory `PathBuf`.
    pub static INGEST_DATA: LazyLock<PathBuf> = LazyLock::new(|| {
        INGEST_XDG
            .create_data_directory(INGEST_XDG.get_data_home())
            .unwrap()
    });
}
