// feed_item.rs
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

//! Normalize `rss::Item`s into a canonical shape.

/// A feed entry reduced to the fields ingestion cares about.
///
/// Every field is optional. Feeds misbehave constantly and a partial
/// item should degrade to `None`s, not abort the walk of the rest of
/// the channel. An item without an `enclosure_url` carries no media
/// and is skippable.
#[derive(Debug, Clone, Default, Builder, PartialEq)]
#[builder(default)]
#[builder(derive(Debug))]
#[builder(setter(into))]
pub struct FeedItem {
    title: Option<String>,
    subtitle: Option<String>,
    summary: Option<String>,
    body: Option<String>,
    link: Option<String>,
    guid: Option<String>,
    publish_date_raw: Option<String>,
    enclosure_url: Option<String>,
}

fn none_if_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn sanitize_html(text: &str) -> String {
    ammonia::Builder::new()
        // Remove `rel` attributes from `<a>` tags
        .link_rel(None)
        .clean(text.trim())
        .to_string()
}

impl From<&rss::Item> for FeedItem {
    fn from(item: &rss::Item) -> Self {
        let itunes = item.itunes_ext();

        let title = item.title().and_then(none_if_empty);
        let subtitle = itunes.and_then(|ext| ext.subtitle()).and_then(none_if_empty);
        let summary = itunes
            .and_then(|ext| ext.summary())
            .or_else(|| item.description())
            .and_then(none_if_empty);

        // Body in priority order: full content, summary, subtitle.
        let body = item
            .content()
            .and_then(none_if_empty)
            .or_else(|| summary.clone())
            .or_else(|| subtitle.clone())
            .map(|text| sanitize_html(&text));

        let link = item.link().and_then(none_if_empty);
        let guid = item.guid().map(|g| g.value()).and_then(none_if_empty);
        let publish_date_raw = item.pub_date().and_then(none_if_empty);
        let enclosure_url = item.enclosure().map(|enc| enc.url()).and_then(none_if_empty);

        FeedItem {
            title,
            subtitle,
            summary,
            body,
            link,
            guid,
            publish_date_raw,
            enclosure_url,
        }
    }
}

impl FeedItem {
    /// Get the value of the `title` field.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Get the value of the `subtitle` field.
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Get the value of the `summary` field.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Get the sanitized `body` html.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Get the value of the `link` field.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Get the value of the `guid` field.
    pub fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }

    /// The publication date exactly as the feed carried it.
    pub fn publish_date_raw(&self) -> Option<&str> {
        self.publish_date_raw.as_deref()
    }

    /// The url of the enclosed media content, if any.
    pub fn enclosure_url(&self) -> Option<&str> {
        self.enclosure_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rss::extension::itunes::ITunesItemExtensionBuilder;
    use rss::{EnclosureBuilder, GuidBuilder, Item};

    fn demo_rss_item() -> Item {
        let itunes = ITunesItemExtensionBuilder::default()
            .subtitle(Some("Season finale.".into()))
            .summary(Some("We wrap up the season.".into()))
            .build();

        let enclosure = EnclosureBuilder::default()
            .url("http://cdn.openaudio.example/oaw/014.mp3".to_string())
            .build();

        let guid = GuidBuilder::default().value("OAW-014".to_string()).build();

        let mut item = Item::default();
        item.set_title("  Equinox Marks the Spot ".to_string());
        item.set_content("<p>We wrap up the season.</p>".to_string());
        item.set_link("https://openaudio.example/episodes/14".to_string());
        item.set_pub_date("Tue, 14 Jul 2026 09:00:00 +0000".to_string());
        item.set_itunes_ext(itunes);
        item.set_enclosure(enclosure);
        item.set_guid(guid);
        item
    }

    #[test]
    fn test_from_rss_item() {
        let item = FeedItem::from(&demo_rss_item());

        let expected = FeedItemBuilder::default()
            .title(Some(String::from("Equinox Marks the Spot")))
            .subtitle(Some(String::from("Season finale.")))
            .summary(Some(String::from("We wrap up the season.")))
            .body(Some(String::from("<p>We wrap up the season.</p>")))
            .link(Some(String::from("https://openaudio.example/episodes/14")))
            .guid(Some(String::from("OAW-014")))
            .publish_date_raw(Some(String::from("Tue, 14 Jul 2026 09:00:00 +0000")))
            .enclosure_url(Some(String::from(
                "http://cdn.openaudio.example/oaw/014.mp3",
            )))
            .build()
            .unwrap();

        assert_eq!(item, expected);
    }

    #[test]
    fn test_empty_item_is_all_none() {
        let item = FeedItem::from(&Item::default());
        assert_eq!(item, FeedItem::default());
        assert_eq!(item.enclosure_url(), None);
    }

    #[test]
    fn test_whitespace_degrades_to_none() {
        let mut raw = Item::default();
        raw.set_title("   ".to_string());
        raw.set_link("\n".to_string());

        let item = FeedItem::from(&raw);
        assert_eq!(item.title(), None);
        assert_eq!(item.link(), None);
    }

    #[test]
    fn test_body_priority() {
        // No content:encoded, the itunes summary is next in line.
        let itunes = ITunesItemExtensionBuilder::default()
            .subtitle(Some("A subtitle.".into()))
            .summary(Some("A summary.".into()))
            .build();
        let mut raw = Item::default();
        raw.set_itunes_ext(itunes);

        let item = FeedItem::from(&raw);
        assert_eq!(item.body(), Some("A summary."));

        // No summary either, fall through to the subtitle.
        let itunes = ITunesItemExtensionBuilder::default()
            .subtitle(Some("A subtitle.".into()))
            .build();
        let mut raw = Item::default();
        raw.set_itunes_ext(itunes);

        let item = FeedItem::from(&raw);
        assert_eq!(item.body(), Some("A subtitle."));

        // Nothing at all.
        let item = FeedItem::from(&Item::default());
        assert_eq!(item.body(), None);
    }

    #[test]
    fn test_description_feeds_summary() {
        let mut raw = Item::default();
        raw.set_description("Plain old description.".to_string());

        let item = FeedItem::from(&raw);
        assert_eq!(item.summary(), Some("Plain old description."));
        assert_eq!(item.body(), Some("Plain old description."));
    }

    #[test]
    fn test_body_is_sanitized() {
        let mut raw = Item::default();
        raw.set_content(
            "<p>Show notes<script>alert(1)</script> \
             <a href=\"https://openaudio.example\" rel=\"nofollow\">here</a>.</p>"
                .to_string(),
        );

        let item = FeedItem::from(&raw);
        let body = item.body().unwrap();
        assert!(!body.contains("script"));
        assert!(!body.contains("rel="));
        assert!(body.contains("<a href=\"https://openaudio.example\">here</a>"));
    }
}
