//! Width helpers shared by the row model and the renderer.
//! Widths are code-point counts; ANSI escape sequences never count.

pub const ELLIPSIS: &str = "...";
const ESC: char = '\x1b';
const RESET: &str = "\x1b[0m";

/// Compute visible length of a string, ignoring ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == ESC {
            skip_escape(&mut chars, None);
            continue;
        }
        len += 1;
    }
    len
}

/// Cut `s` to `max_width` printable characters. Overlong text keeps
/// `max_width - 3` characters followed by `...`; escapes are copied through
/// and any open styling is reset after the cut.
pub fn truncate_display(s: &str, max_width: usize) -> String {
    if display_len(s) <= max_width {
        return s.to_string();
    }
    let keep = max_width.saturating_sub(ELLIPSIS.len());
    let mut out = String::with_capacity(s.len());
    let mut kept = 0;
    let mut styled = false;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == ESC {
            out.push(ch);
            skip_escape(&mut chars, Some(&mut out));
            styled = true;
            continue;
        }
        if kept == keep {
            break;
        }
        out.push(ch);
        kept += 1;
    }
    out.push_str(&ELLIPSIS[..max_width.min(ELLIPSIS.len())]);
    if styled {
        out.push_str(RESET);
    }
    out
}

/// Right-pad to `min_width` visible characters.
pub fn pad_display(s: &str, min_width: usize) -> String {
    let mut out = s.to_string();
    out.push_str(&" ".repeat(min_width.saturating_sub(display_len(s))));
    out
}

/// Consume a CSI/SGR sequence after its ESC, optionally copying it.
fn skip_escape(chars: &mut std::str::Chars<'_>, mut copy: Option<&mut String>) {
    let mut first = true;
    for next in chars.by_ref() {
        if let Some(out) = copy.as_deref_mut() {
            out.push(next);
        }
        if first {
            first = false;
            if next == '[' {
                continue;
            }
            return;
        }
        if next.is_ascii_alphabetic() || next == '~' {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_len_ignores_escapes() {
        assert_eq!(display_len("plain"), 5);
        assert_eq!(display_len("\x1b[1;38;5;15mbold\x1b[0m"), 4);
        assert_eq!(display_len("héllo"), 5);
    }

    #[test]
    fn test_truncate_display_plain() {
        assert_eq!(truncate_display("short", 10), "short");
        assert_eq!(truncate_display("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_display("this is too long", 10), "this is...");
    }

    #[test]
    fn test_truncate_display_skips_color_codes() {
        let colored = "\x1b[31mabcdefghij\x1b[0m";
        let cut = truncate_display(colored, 6);
        assert_eq!(display_len(&cut), 6);
        assert!(cut.starts_with("\x1b[31mabc..."));
        assert!(cut.ends_with(RESET));
        assert_eq!(truncate_display(colored, 10), colored);
    }

    #[test]
    fn test_truncate_display_tiny_widths() {
        assert_eq!(truncate_display("abcdef", 2), "..");
        assert_eq!(truncate_display("abcdef", 0), "");
    }

    #[test]
    fn test_pad_display() {
        assert_eq!(pad_display("ab", 4), "ab  ");
        assert_eq!(pad_display("abcdef", 4), "abcdef");
        assert_eq!(display_len(&pad_display("\x1b[1mab\x1b[0m", 5)), 5);
    }
}
