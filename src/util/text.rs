use std::borrow::Cow;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Strip control characters and ANSI escape sequences from a single-line label.
///
/// Category names end up printed straight to the terminal by the CLI, so
/// anything that could move the cursor, recolor output or retitle the window is
/// removed:
///
/// - every C0 control char (including tab and newline) and DEL
/// - CSI sequences `ESC [ ... final` where the final byte is `@`..=`~`
/// - OSC sequences `ESC ] ...` up to BEL or `ESC \`
/// - a bare ESC
///
/// Returns `Cow::Borrowed` when there is nothing to strip.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c.is_ascii_control()) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ESC {
            if !c.is_ascii_control() {
                out.push(c);
            }
            continue;
        }

        match chars.peek() {
            Some('[') => {
                chars.next();
                for param in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&param) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(body) = chars.next() {
                    if body == BEL {
                        break;
                    }
                    if body == ESC && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    Cow::Owned(out)
}
