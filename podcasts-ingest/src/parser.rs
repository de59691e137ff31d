use chrono::NaiveDateTime;
use rfc822_sanitizer::parse_from_rfc2822_with_fallback as parse_rfc822;

/// Parse an rfc2822 `pubDate` into a naive UTC timestamp.
///
/// Feeds get the format wrong in endlessly creative ways, so the
/// sanitizer retries with common mistakes (wrong weekday, padded
/// fields) fixed up. Anything still unparseable maps to `None`.
pub(crate) fn parse_publish_date(raw: &str) -> Option<NaiveDateTime> {
    parse_rfc822(raw.trim()).ok().map(|date| date.naive_utc())
}
