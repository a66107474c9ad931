//! Raw keystroke decoding. Pure over the bytes of one read.

const ENTER: u8 = 10;
const DELETE: u8 = 127;
const TAB: u8 = 9;
const CTRL_C: u8 = 3;
const ESC: u8 = 27;
const CSI: u8 = b'[';
const ARROW_UP: u8 = b'A';
const ARROW_DOWN: u8 = b'B';
const SHIFT_TAB: u8 = b'Z';
const MIN_PRINTABLE: u8 = 32;
const MAX_PRINTABLE: u8 = 126;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Confirm,
    Cancel,
    Backspace,
    Character(char),
    /// Selection index grows: one rank further from the best match.
    MoveUp,
    /// Selection index shrinks toward the best match, stopping at 0.
    MoveDown,
    Unknown,
}

/// Decode the bytes returned by a single read of up to three bytes. An
/// empty read means end of input and cancels the session.
pub fn decode_key(bytes: &[u8]) -> KeyEvent {
    match bytes {
        [] => KeyEvent::Cancel,
        [ENTER] => KeyEvent::Confirm,
        [CTRL_C] => KeyEvent::Cancel,
        [DELETE] => KeyEvent::Backspace,
        [TAB] => KeyEvent::MoveDown,
        [b @ MIN_PRINTABLE..=MAX_PRINTABLE] => KeyEvent::Character(*b as char),
        [ESC, CSI, ARROW_DOWN | SHIFT_TAB] => KeyEvent::MoveUp,
        [ESC, CSI, ARROW_UP] => KeyEvent::MoveDown,
        _ => KeyEvent::Unknown,
    }
}

/// Decode one read into keys. A read that is not an escape sequence is
/// taken byte by byte, so several keystrokes arriving together are kept.
pub fn decode_keys(bytes: &[u8]) -> Vec<KeyEvent> {
    match bytes {
        [] | [ESC, ..] => vec![decode_key(bytes)],
        _ => bytes.iter().map(|b| decode_key(std::slice::from_ref(b))).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bytes() {
        assert_eq!(decode_key(&[10]), KeyEvent::Confirm);
        assert_eq!(decode_key(&[127]), KeyEvent::Backspace);
        assert_eq!(decode_key(&[9]), KeyEvent::MoveDown);
        assert_eq!(decode_key(&[3]), KeyEvent::Cancel);
        assert_eq!(decode_key(b"a"), KeyEvent::Character('a'));
        assert_eq!(decode_key(b" "), KeyEvent::Character(' '));
        assert_eq!(decode_key(b"~"), KeyEvent::Character('~'));
    }

    #[test]
    fn test_escape_sequences() {
        assert_eq!(decode_key(&[27, 91, 66]), KeyEvent::MoveUp);
        assert_eq!(decode_key(&[27, 91, 90]), KeyEvent::MoveUp);
        assert_eq!(decode_key(&[27, 91, 65]), KeyEvent::MoveDown);
    }

    #[test]
    fn test_partial_and_foreign_sequences_are_unknown() {
        assert_eq!(decode_key(&[27]), KeyEvent::Unknown);
        assert_eq!(decode_key(&[27, 91]), KeyEvent::Unknown);
        assert_eq!(decode_key(&[27, 91, 67]), KeyEvent::Unknown);
        assert_eq!(decode_key(&[31]), KeyEvent::Unknown);
        assert_eq!(decode_key(&[200]), KeyEvent::Unknown);
        assert_eq!(decode_key(b"ab"), KeyEvent::Unknown);
    }

    #[test]
    fn test_empty_read_cancels() {
        assert_eq!(decode_key(&[]), KeyEvent::Cancel);
    }

    #[test]
    fn test_batched_bytes_decode_each_key() {
        assert_eq!(
            decode_keys(b"ab"),
            vec![KeyEvent::Character('a'), KeyEvent::Character('b')]
        );
        assert_eq!(
            decode_keys(&[b'x', 127, 10]),
            vec![KeyEvent::Character('x'), KeyEvent::Backspace, KeyEvent::Confirm]
        );
        assert_eq!(decode_keys(&[27, 91, 66]), vec![KeyEvent::MoveUp]);
        assert_eq!(decode_keys(&[27, 98]), vec![KeyEvent::Unknown]);
        assert_eq!(decode_keys(&[]), vec![KeyEvent::Cancel]);
    }
}
