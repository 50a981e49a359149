#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Best-effort normalization of loosely-typed upstream field values.
//!
//! The upstream data store hands back the same logical field in wildly
//! different shapes depending on how it was populated: attachment object
//! arrays, lookup/rollup wrapper arrays, JSON-encoded strings, comma- or
//! semicolon-joined strings, and bare scalars. This crate flattens any of
//! those into one of two canonical forms: an ordered de-duplicated list of
//! clean URLs ([`collect_photo_urls`]) or a comma-joined string of unique
//! text tokens ([`normalize_text_list`], [`normalize_lookup`]).
//!
//! Every function here is total. Unrecognized shapes degrade to
//! "contributes nothing" rather than erroring, which keeps the per-record
//! pipeline above infallible by construction.

pub mod attachment;
pub mod flatten;
pub mod text;
pub mod url;

pub use attachment::pick_attachment_url;
pub use flatten::collect_photo_urls;
pub use text::{normalize_lookup, normalize_text_list};
pub use url::normalize_url;
