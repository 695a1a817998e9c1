//! Bookmark YouTube videos into named categories.
//!
//! The whole collection is one JSON document kept under a single key of a
//! [`storage::KeyValueStore`]; [`store::CategoryStore`] provides the
//! read-modify-write operations over it.

pub mod config;
pub mod storage;
pub mod store;
pub mod util;
