use anyhow::Result;
use chrono::SecondsFormat;
use feed_rs::parser;

use crate::contribution::{Contribution, ContributionKind};

/// Outcome of parsing one feed document.
///
/// `skipped` counts entries dropped for lacking a link or a timestamp;
/// callers log it so a quietly degrading feed is visible.
#[derive(Debug)]
pub struct ParsedFeed {
    pub contributions: Vec<Contribution>,
    pub skipped: usize,
}

/// Parses an RSS or Atom document and maps each entry to a contribution.
///
/// Per entry: `url` from the first link, `date` from `published` falling
/// back to `updated` (reformatted to ISO-8601 UTC with milliseconds),
/// `title` from the entry title. `description` duplicates the title for
/// videos; for blog posts it is the entry body (RSS `<description>`,
/// content element as fallback).
///
/// Entries without a link or without any timestamp are skipped rather
/// than submitted half-formed.
pub fn parse_feed(bytes: &[u8], kind: ContributionKind) -> Result<ParsedFeed> {
    let feed = parser::parse(bytes)?;

    let mut contributions = Vec::with_capacity(feed.entries.len());
    let mut skipped = 0;

    for entry in feed.entries {
        let Some(url) = entry.links.first().map(|l| l.href.clone()) else {
            skipped += 1;
            continue;
        };
        let Some(published) = entry.published.or(entry.updated) else {
            skipped += 1;
            continue;
        };

        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let description = match kind {
            ContributionKind::VideoPodcast => title.clone(),
            ContributionKind::Blogpost => entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default(),
        };

        contributions.push(Contribution {
            kind,
            date: published.to_rfc3339_opts(SecondsFormat::Millis, true),
            title,
            description,
            url,
        });
    }

    Ok(ParsedFeed {
        contributions,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BLOG_RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <title>Blog</title>
    <link>https://blog.example</link>
    <description>A blog</description>
    <item>
        <title>First post</title>
        <link>https://blog.example/first-post</link>
        <pubDate>Tue, 02 Jan 2024 03:04:05 GMT</pubDate>
        <description>Body of the first post</description>
    </item>
    <item>
        <title>Second post</title>
        <link>https://blog.example/second-post</link>
        <pubDate>Wed, 03 Jan 2024 10:00:00 GMT</pubDate>
        <description>Body of the second post</description>
    </item>
</channel></rss>"#;

    const VIDEO_ATOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
    <title>Channel uploads</title>
    <id>channel</id>
    <entry>
        <id>video-1</id>
        <title>A new video</title>
        <link rel="alternate" href="https://videos.example/watch?v=1"/>
        <published>2024-02-01T12:00:00+00:00</published>
        <updated>2024-02-01T12:30:00+00:00</updated>
    </entry>
</feed>"#;

    #[test]
    fn test_one_contribution_per_entry_with_given_kind() {
        let parsed = parse_feed(BLOG_RSS.as_bytes(), ContributionKind::Blogpost).unwrap();

        assert_eq!(parsed.contributions.len(), 2);
        assert_eq!(parsed.skipped, 0);
        for record in &parsed.contributions {
            assert_eq!(record.kind, ContributionKind::Blogpost);
        }
    }

    #[test]
    fn test_blog_entry_mapping() {
        let parsed = parse_feed(BLOG_RSS.as_bytes(), ContributionKind::Blogpost).unwrap();
        let first = &parsed.contributions[0];

        assert_eq!(first.title, "First post");
        assert_eq!(first.url, "https://blog.example/first-post");
        assert_eq!(first.description, "Body of the first post");
        assert_eq!(first.date, "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_video_description_duplicates_title() {
        let parsed = parse_feed(VIDEO_ATOM.as_bytes(), ContributionKind::VideoPodcast).unwrap();

        assert_eq!(parsed.contributions.len(), 1);
        let video = &parsed.contributions[0];
        assert_eq!(video.title, "A new video");
        assert_eq!(video.description, video.title);
        assert_eq!(video.url, "https://videos.example/watch?v=1");
        assert_eq!(video.date, "2024-02-01T12:00:00.000Z");
    }

    #[test]
    fn test_entry_without_link_is_skipped() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <item>
        <title>No link here</title>
        <pubDate>Tue, 02 Jan 2024 03:04:05 GMT</pubDate>
    </item>
    <item>
        <title>Linked</title>
        <link>https://blog.example/linked</link>
        <pubDate>Tue, 02 Jan 2024 03:04:05 GMT</pubDate>
    </item>
</channel></rss>"#;

        let parsed = parse_feed(rss.as_bytes(), ContributionKind::Blogpost).unwrap();
        assert_eq!(parsed.contributions.len(), 1);
        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.contributions[0].url, "https://blog.example/linked");
    }

    #[test]
    fn test_entry_without_date_is_skipped() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <item>
        <title>Undated</title>
        <link>https://blog.example/undated</link>
    </item>
</channel></rss>"#;

        let parsed = parse_feed(rss.as_bytes(), ContributionKind::Blogpost).unwrap();
        assert!(parsed.contributions.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_missing_description_becomes_empty_string() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <item>
        <title>Bare</title>
        <link>https://blog.example/bare</link>
        <pubDate>Tue, 02 Jan 2024 03:04:05 GMT</pubDate>
    </item>
</channel></rss>"#;

        let parsed = parse_feed(rss.as_bytes(), ContributionKind::Blogpost).unwrap();
        assert_eq!(parsed.contributions[0].description, "");
    }

    #[test]
    fn test_empty_feed_yields_no_contributions() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel></channel></rss>"#;

        let parsed = parse_feed(rss.as_bytes(), ContributionKind::Blogpost).unwrap();
        assert!(parsed.contributions.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_invalid_xml_is_an_error() {
        assert!(parse_feed(b"<not valid xml", ContributionKind::Blogpost).is_err());
    }
}
