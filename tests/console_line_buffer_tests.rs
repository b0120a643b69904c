//! Line buffer tests

use acm_console::console::line_buffer::{LineBuffer, LineFault};

fn typed<const N: usize>(s: &str) -> LineBuffer<N> {
    let mut buf = LineBuffer::new();
    for b in s.bytes() {
        assert!(buf.insert(b));
    }
    buf
}

#[test]
fn test_line_buffer_insert() {
    let buf: LineBuffer<64> = typed("help");

    assert_eq!(buf.as_str(), "help");
    assert_eq!(buf.len(), 4);
    assert_eq!(buf.cursor(), 4);
    assert!(buf.at_end());
}

#[test]
fn test_line_buffer_backspace() {
    let mut buf: LineBuffer<64> = typed("help");

    assert!(buf.backspace());
    assert!(buf.backspace());

    assert_eq!(buf.as_str(), "he");
}

#[test]
fn test_line_buffer_backspace_at_start() {
    let mut buf: LineBuffer<64> = LineBuffer::new();
    assert!(!buf.backspace());

    let mut buf: LineBuffer<64> = typed("ab");
    buf.move_left();
    buf.move_left();
    assert!(!buf.backspace());
    assert_eq!(buf.as_str(), "ab");
}

#[test]
fn test_line_buffer_insert_mid_line() {
    let mut buf: LineBuffer<64> = typed("hlp");

    assert!(buf.move_left());
    assert!(buf.move_left());
    assert!(buf.insert(b'e'));

    assert_eq!(buf.as_str(), "help");
    assert_eq!(buf.cursor(), 2);
    assert_eq!(buf.tail(buf.cursor()), "lp");
    assert_eq!(buf.at_cursor(), Some(b'l'));
}

#[test]
fn test_line_buffer_backspace_mid_line() {
    let mut buf: LineBuffer<64> = typed("heelp");

    buf.move_left();
    buf.move_left();
    assert!(buf.backspace());

    assert_eq!(buf.as_str(), "help");
    assert_eq!(buf.cursor(), 2);
}

#[test]
fn test_line_buffer_cursor_bounds() {
    let mut buf: LineBuffer<64> = typed("ab");

    assert!(!buf.move_right());
    assert!(buf.move_left());
    assert!(buf.move_left());
    assert!(!buf.move_left());
    assert_eq!(buf.cursor(), 0);

    buf.move_end();
    assert_eq!(buf.cursor(), 2);
    assert_eq!(buf.at_cursor(), None);
}

#[test]
fn test_line_buffer_clear() {
    let mut buf: LineBuffer<64> = typed("test");
    buf.invalidate();
    buf.clear();

    assert!(buf.is_empty());
    assert!(!buf.is_invalid());
    assert_eq!(buf.as_str(), "");
}

#[test]
fn test_line_buffer_overflow_marks_invalid() {
    let mut buf: LineBuffer<8> = LineBuffer::new();
    assert_eq!(LineBuffer::<8>::max_len(), 7);

    for _ in 0..7 {
        assert!(buf.insert(b'x'));
    }
    assert!(!buf.is_invalid());

    // The 8th character would leave no room for the terminator
    assert!(!buf.insert(b'y'));
    assert!(buf.is_invalid());
    assert_eq!(buf.as_str(), "xxxxxxx");
}

#[test]
fn test_line_buffer_records_fault_kind() {
    let mut buf: LineBuffer<4> = typed("abc");
    assert_eq!(buf.fault(), None);

    assert!(!buf.insert(b'd'));
    assert_eq!(buf.fault(), Some(LineFault::Overflow));

    // Noise after an overflow does not hide it
    buf.invalidate();
    assert_eq!(buf.fault(), Some(LineFault::Overflow));

    // A full line corrupted by noise is not an overflow
    let mut buf: LineBuffer<4> = typed("abc");
    buf.invalidate();
    assert_eq!(buf.fault(), Some(LineFault::Corrupt));

    buf.clear();
    assert_eq!(buf.fault(), None);
}

#[test]
fn test_line_buffer_invalid_refuses_edits() {
    let mut buf: LineBuffer<4> = typed("abc");
    assert!(!buf.insert(b'd'));

    assert!(!buf.insert(b'e'));
    assert!(!buf.backspace());
    assert_eq!(buf.as_str(), "abc");
}

#[test]
fn test_line_buffer_set() {
    let mut buf: LineBuffer<64> = LineBuffer::new();

    buf.set("echo 5");
    assert_eq!(buf.as_str(), "echo 5");
    assert_eq!(buf.cursor(), 6);

    let mut small: LineBuffer<4> = LineBuffer::new();
    small.set("toolong");
    assert_eq!(small.as_str(), "too");
}
