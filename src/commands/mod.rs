//! Command implementations
//!
//! Each command is an `impl Repository` block in its own file:
//!
//! - `porcelain`: the local workflow (init, add, commit, rm, checkout,
//!   branch, log, status, reset, merge)
//! - `remote`: the mirror protocol over a second on-disk repository
//!   (add-remote, rm-remote, push, fetch, pull)

pub mod porcelain;
pub mod remote;
