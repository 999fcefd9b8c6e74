//! Report renderers for scan results.
//!
//! - [`terminal`] — summary plus a dependency table; respects `--verbose` / `--quiet`.
//! - JSON output is the serialized [`Report`](crate::models::Report), written from `main`.

pub mod terminal;
