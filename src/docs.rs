//! Documentation publishing to a WebDocu documentation host.
//!
//! A documentation directory is zipped and uploaded for a version, optionally
//! together with a markdown changelog. Binary assets for the same version are
//! uploaded afterwards, directly to blob storage when the host grants a
//! signed upload link and through the host otherwise.

/// Request settings and host endpoint constants.
pub mod config;

/// HTTP clients for the docs host and blob storage.
pub mod host;

/// Package and asset publishing workflow.
pub mod publisher;

/// Ordered asset upload strategies.
pub mod strategy;
