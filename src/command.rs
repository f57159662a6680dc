//! Command execution for the release-publisher CLI.
//!
//! Each module turns parsed CLI arguments into a library request and runs
//! the matching publishing operation.

/// Output helpers shared by the listing commands.
pub mod common;

/// Markdown changelog release notes.
pub mod changelog;

/// Documentation and asset uploads to WebDocu.
pub mod docs;

/// Idempotent pull request creation and repository lookup.
pub mod pull_request;

/// GitHub release publishing and listing.
pub mod release;
