// media_url.rs
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

//! Probe media urls, preferring the https variant.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use url::Url;

use crate::errors::ProbeError;

/// How long a single `HEAD` probe gets before we give up on it.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// The outcome of probing a media url.
///
/// The `url` is always usable. In the worst case it is the http
/// variant of the input with both flags lowered.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaUrlResolution {
    url: String,
    https: bool,
    reachable: bool,
}

impl MediaUrlResolution {
    pub(crate) fn new(url: String, https: bool, reachable: bool) -> Self {
        MediaUrlResolution {
            url,
            https,
            reachable,
        }
    }

    /// The chosen url, byte-identical to the variant that was probed.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the resolved url carries the `https` scheme.
    pub fn https(&self) -> bool {
        self.https
    }

    /// Whether the endpoint answered the probe with a success status.
    pub fn reachable(&self) -> bool {
        self.reachable
    }
}

/// Issues a `HEAD` request and reports the response status.
///
/// The resolver only ever looks at status codes, so anything able to
/// produce one can stand in for the network.
pub trait HeadProbe: Send + Sync {
    /// `HEAD` the given url and return the response status.
    fn head<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<StatusCode, ProbeError>>;
}

pub(crate) fn client_builder() -> reqwest::ClientBuilder {
    let policy = Policy::custom(|attempt| {
        info!("Redirect Attempt URL: {:?}", attempt.url());
        if attempt.previous().len() > 20 {
            attempt.error("too many redirects")
        } else if Some(attempt.url()) == attempt.previous().last() {
            // avoid redirect loops
            attempt.stop()
        } else {
            attempt.follow()
        }
    });

    reqwest::Client::builder()
        .redirect(policy)
        .referer(false)
        .user_agent(crate::USER_AGENT)
}

/// `HeadProbe` over a real `reqwest` client.
#[derive(Debug)]
pub struct HttpHeadProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpHeadProbe {
    /// Construct a client with the crate's redirect policy and the
    /// given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = client_builder().build()?;
        Ok(HttpHeadProbe { client, timeout })
    }
}

impl HeadProbe for HttpHeadProbe {
    fn head<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<StatusCode, ProbeError>> {
        Box::pin(async move {
            // Reject malformed urls here so they classify like any
            // other network failure.
            Url::parse(url)?;

            let res = self.client.head(url).timeout(self.timeout).send().await?;
            Ok(res.status())
        })
    }
}

/// Probe `url` and decide which variant of it to persist.
///
/// The https variant goes first and any response at all settles the
/// matter, success status or not. Only a network-class failure
/// (refused connection, TLS, DNS, malformed url) falls back to the
/// plain http variant. When both probes fail the http variant comes
/// back with both flags lowered so the caller still has a url to
/// store.
pub async fn resolve(probe: &dyn HeadProbe, url: &str) -> MediaUrlResolution {
    let https_variant = force_scheme(url, "https");
    match probe.head(&https_variant).await {
        Ok(status) => return MediaUrlResolution::new(https_variant, true, status.is_success()),
        Err(err) => debug!("HEAD {} failed: {}", https_variant, err),
    }

    let http_variant = force_scheme(url, "http");
    match probe.head(&http_variant).await {
        Ok(status) => MediaUrlResolution::new(http_variant, false, status.is_success()),
        Err(err) => {
            debug!("HEAD {} failed: {}", http_variant, err);
            MediaUrlResolution::new(http_variant, false, false)
        }
    }
}

// Swaps the scheme prefix verbatim and leaves the rest of the url
// untouched, percent-encoded segments included. Anything that does
// not look like an http(s) url passes through as-is and gets rejected
// by the probe instead.
fn force_scheme(url: &str, scheme: &str) -> String {
    match url.split_once("://") {
        Some((prefix, rest))
            if prefix.eq_ignore_ascii_case("http") || prefix.eq_ignore_ascii_case("https") =>
        {
            format!("{scheme}://{rest}")
        }
        _ => url.to_owned(),
    }
}

#[cfg(test)]
pub(crate) struct StaticProbe {
    https: Option<StatusCode>,
    http: Option<StatusCode>,
}

#[cfg(test)]
impl StaticProbe {
    /// Canned probe outcomes, dispatched on the url scheme. `None`
    /// plays the part of a network failure.
    pub(crate) fn new(https: Option<StatusCode>, http: Option<StatusCode>) -> StaticProbe {
        StaticProbe { https, http }
    }
}

#[cfg(test)]
impl HeadProbe for StaticProbe {
    fn head<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<StatusCode, ProbeError>> {
        let outcome = if url.starts_with("https://") {
            self.https
        } else {
            self.http
        };
        Box::pin(async move { outcome.ok_or(ProbeError::Timeout) })
    }
}
