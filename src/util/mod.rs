//! Utility functions for common operations.
//!
//! - **Video ids**: pulling the id out of `youtube.com/watch` and `youtu.be` URLs
//! - **Text processing**: stripping terminal control sequences from labels
//!
//! # Examples
//!
//! ```
//! use tubeshelf::util::{extract_video_id, strip_control_chars};
//!
//! assert_eq!(extract_video_id("https://youtu.be/xyz789"), Some("xyz789"));
//! assert_eq!(strip_control_chars("\x1b[31mmusic\x1b[0m"), "music");
//! ```

mod text;
mod video_id;

pub use text::strip_control_chars;
pub use video_id::{extract_video_id, SHORT_LINK_PREFIX, WATCH_MARKER};
