/// Query marker of a `youtube.com/watch` URL.
pub const WATCH_MARKER: &str = "watch?v=";

/// Prefix of a short share link.
pub const SHORT_LINK_PREFIX: &str = "https://youtu.be/";

/// Extract the video id from a YouTube URL.
///
/// Two passes, first match wins:
///
/// 1. A URL containing `watch?v=`: the id runs from the marker to the first
///    `&` (so `&ab_channel=...` and any other trailing parameter are dropped)
///    or `#`, or to the end of the string.
/// 2. A URL starting with `https://youtu.be/`: the id runs from the prefix to
///    the first `?` or `#`.
///
/// Returns `None` for anything else, and when the selected slice is empty.
///
/// # Examples
///
/// ```
/// use tubeshelf::util::extract_video_id;
///
/// assert_eq!(
///     extract_video_id("https://www.youtube.com/watch?v=abc123&ab_channel=Foo"),
///     Some("abc123")
/// );
/// assert_eq!(extract_video_id("https://youtu.be/xyz789"), Some("xyz789"));
/// assert_eq!(extract_video_id("https://example.com"), None);
/// ```
pub fn extract_video_id(url: &str) -> Option<&str> {
    let url = url.trim();

    if let Some(start) = url.find(WATCH_MARKER) {
        let rest = &url[start + WATCH_MARKER.len()..];
        return non_empty(take_until(rest, &['&', '#']));
    }

    url.strip_prefix(SHORT_LINK_PREFIX)
        .and_then(|rest| non_empty(take_until(rest, &['?', '#'])))
}

fn take_until<'a>(s: &'a str, stops: &[char]) -> &'a str {
    s.find(stops).map_or(s, |end| &s[..end])
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
