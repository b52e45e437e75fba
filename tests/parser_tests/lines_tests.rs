//! Tests for the Line Scanner
//!
//! These tests verify:
//! - 1-based numbering
//! - Terminator handling (LF, CRLF, missing final newline)
//! - Line classification helpers

use cfgstore::lines::{Line, LineScanner};

// =============================================================================
// Helper Functions
// =============================================================================

fn scan(text: &str) -> Vec<Line> {
    LineScanner::new(text.as_bytes())
        .collect::<std::io::Result<Vec<_>>>()
        .unwrap()
}

// =============================================================================
// Scanning Tests
// =============================================================================

#[test]
fn test_empty_input_has_no_lines() {
    assert!(scan("").is_empty());
}

#[test]
fn test_lines_are_numbered_from_one() {
    let lines = scan("a\nb\nc\n");

    let numbers: Vec<usize> = lines.iter().map(|l| l.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_raw_keeps_terminator_text_strips_it() {
    let lines = scan("one\r\ntwo\n");

    assert_eq!(lines[0].raw(), b"one\r\n".as_slice());
    assert_eq!(lines[0].text(), "one");
    assert_eq!(lines[1].raw(), b"two\n".as_slice());
    assert_eq!(lines[1].text(), "two");
}

#[test]
fn test_invalid_utf8_is_kept_raw_and_replaced_in_text() {
    let lines: Vec<Line> = LineScanner::new(&b"# caf\xe9\r\nk = v\n"[..])
        .collect::<std::io::Result<Vec<_>>>()
        .unwrap();

    assert_eq!(lines[0].raw(), b"# caf\xe9\r\n".as_slice());
    assert_eq!(lines[0].text(), "# caf\u{fffd}");
    assert!(lines[0].is_comment());
    assert_eq!(lines[1].text(), "k = v");
}

#[test]
fn test_last_line_without_newline() {
    let lines = scan("first\nlast");

    assert_eq!(lines.len(), 2);
    assert!(lines[0].has_terminator());
    assert!(!lines[1].has_terminator());
    assert_eq!(lines[1].text(), "last");
}

#[test]
fn test_lines_read_tracks_progress() {
    let mut scanner = LineScanner::new("a\nb\n".as_bytes());
    assert_eq!(scanner.lines_read(), 0);

    scanner.next();
    assert_eq!(scanner.lines_read(), 1);

    scanner.next();
    scanner.next();
    assert_eq!(scanner.lines_read(), 2);
}

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn test_blank_and_empty() {
    assert!(Line::new(1, "\n").is_empty());
    assert!(Line::new(1, "\n").is_blank());
    assert!(!Line::new(1, "   \n").is_empty());
    assert!(Line::new(1, "   \t\n").is_blank());
    assert!(!Line::new(1, " x \n").is_blank());
}

#[test]
fn test_comment_detection() {
    assert!(Line::new(1, "# note\n").is_comment());
    assert!(Line::new(1, "    # indented\n").is_comment());
    assert!(!Line::new(1, "key = a#b\n").is_comment());
    assert!(!Line::new(1, "# note\n").is_significant());
}

#[test]
fn test_header_name_is_trimmed_and_folded() {
    assert_eq!(Line::new(1, "[Section]\n").header_name().as_deref(), Some("section"));
    assert_eq!(Line::new(1, "  [ My Sec ]  \r\n").header_name().as_deref(), Some("my sec"));
    assert_eq!(Line::new(1, "[]\n").header_name().as_deref(), Some(""));
}

#[test]
fn test_malformed_headers_have_no_name() {
    assert_eq!(Line::new(1, "[open\n").header_name(), None);
    assert_eq!(Line::new(1, "[a] trailing\n").header_name(), None);
    assert_eq!(Line::new(1, "[a]b]\n").header_name(), None);
    assert_eq!(Line::new(1, "key = [x]\n").header_name(), None);
    assert!(Line::new(1, "[open\n").is_header());
}
