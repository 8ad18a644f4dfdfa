//! Core library for the `rushq` FTPRush automation toolkit.
//!
//! The heart of the crate is the [`queue`] module, a byte-exact codec for
//! the client's proprietary transfer-queue file format. The [`sites`]
//! module reads the set of configured site names from the client's site
//! directory, and [`script`] defines the boundary the automation layer
//! hands pre-encoded script commands to.
pub mod queue;
pub mod script;
pub mod sites;
