//! Pre-release script hook
//!
//! A caller-supplied script runs inside the fresh clone after the changelog
//! is merged and before the release commit, so it can bump version files or
//! regenerate artifacts that belong in the release.

pub mod context;
pub mod executor;

pub use context::HookContext;
pub use executor::HookExecutor;
