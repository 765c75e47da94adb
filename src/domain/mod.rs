//! Domain logic - pure business rules independent of forge and git operations

pub mod counts;
pub mod emoji;
pub mod pull_request;
pub mod tag;
pub mod version;

pub use counts::ReleaseCounts;
pub use emoji::{ClassifiedTitle, EmojiCategoryMap};
pub use pull_request::{Author, PullRequest, ReleaseMarker};
pub use tag::{LatestRelease, Tag, TagCommit};
pub use version::{next_release_version, ReleaseType, Version};
