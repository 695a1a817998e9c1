//! The category store: named categories of bookmarked video ids.
//!
//! All categories live in one JSON document under one storage key. Every
//! read deserializes the whole document and every mutation serializes and
//! overwrites it. There is no locking: two writers racing on the same key
//! resolve as last-write-wins.
//!
//! # Name matching
//!
//! Lookups (`find_category`, `videos_for_category`, `delete_category`,
//! `delete_video` and the duplicate check in `add_video`) compare names
//! exactly. Only the append step of `add_video` matches case-insensitively.
//! Since `add_category` lowercases, callers should pass lowercase names.

mod categories;
mod confirm;
mod document;
mod types;
mod videos;

pub use confirm::{AssumeYes, Confirm};
pub use document::{CategoryStore, CATEGORIES_KEY};
pub use types::{AddVideoError, Category, StoreError};
