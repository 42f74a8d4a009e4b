//! Terminal output sanitization
//!
//! Record data is a hand-maintained file and session values come from disk, so
//! every field printed by the CLI goes through [`sanitize_for_terminal`] first.
//! An owner name containing escape sequences must not be able to clear the
//! screen, move the cursor or retitle the terminal.

/// Remove ANSI CSI/OSC escape sequences and control characters.
///
/// Tabs and newlines survive; everything else in the C0/C1 control ranges is dropped.
///
/// # Examples
///
/// ```
/// use scan_move::utils::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31m王先生\x1b[0m"), "王先生");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.peek() {
                // CSI: ESC [ params final-letter
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                // OSC: ESC ] ... terminated by BEL or ESC \
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' {
            continue;
        }
        result.push(ch);
    }

    result
}
