//! contribsync — one-shot sync of published content into the Stars API.
//!
//! The pipeline is strictly linear: fetch the blog feed, fetch the video
//! feed, read the URLs the remote already tracks, diff by URL, and submit
//! whatever is new in a single batch mutation. No state is kept between
//! runs; the remote API is the sole source of truth for "already known"
//! content.

pub mod config;
pub mod contribution;
pub mod diff;
pub mod feed;
pub mod stars;
pub mod sync;

pub use config::Config;
pub use contribution::{Contribution, ContributionKind};
pub use sync::SyncReport;
