// errors.rs
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

use diesel::r2d2;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum DataError {
    #[error("SQL Query failed: {0}")]
    DieselResultError(#[from] diesel::result::Error),
    #[error("Database Migration error")]
    DieselMigrationError,
    #[error("R2D2 Pool error: {0}")]
    R2D2PoolError(#[from] r2d2::PoolError),
    #[error("Reqwest Error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Failed to parse a url: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("RSS Error: {0}")]
    RssError(#[from] rss::Error),
    #[error("Builder error: {0}")]
    BuilderError(String),
    #[error("Request to {url} returned {status_code}. Context: {context}")]
    HttpStatusGeneral {
        url: String,
        status_code: reqwest::StatusCode,
        context: String,
    },
    #[error("Error occurred while parsing an Episode. Reason: {reason}")]
    ParseEpisodeError { reason: String, podcast_id: i32 },
    #[error("Job queue disconnected")]
    QueueDisconnected,
}

/// Failure modes of a `HEAD` probe.
///
/// Every variant is a network-class failure. Probes never surface
/// http error statuses as errors, those come back as a `StatusCode`.
#[derive(ThisError, Debug)]
pub enum ProbeError {
    #[error("Failed to parse a url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Request timed out")]
    Timeout,
    #[error("Connection failed: {0}")]
    Connection(reqwest::Error),
    #[error("Reqwest Error: {0}")]
    Request(reqwest::Error),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout
        } else if err.is_connect() {
            ProbeError::Connection(err)
        } else {
            ProbeError::Request(err)
        }
    }
}
