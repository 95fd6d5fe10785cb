use serde::{Deserialize, Serialize};

/// The kind of content a contribution tracks.
///
/// Serialized in SCREAMING_SNAKE_CASE (`BLOGPOST`, `VIDEO_PODCAST`) to
/// match the enum the remote schema defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionKind {
    Blogpost,
    VideoPodcast,
}

/// A normalized piece of published content, in the shape the Stars API
/// stores it (`ContributionInput` on the wire).
///
/// `url` is the identity of a contribution: the dedup step compares it
/// with exact, case-sensitive string equality and assumes feed URLs are
/// stable and never reused for different content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    #[serde(rename = "type")]
    pub kind: ContributionKind,
    /// Publication timestamp, ISO-8601 UTC with millisecond precision
    /// (`2024-01-02T03:04:05.000Z`).
    pub date: String,
    pub title: String,
    /// For videos this duplicates the title (the feed has no separate
    /// body); for blog posts it is the entry body.
    pub description: String,
    pub url: String,
}
