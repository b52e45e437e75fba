//! Tests for full-file parsing
//!
//! These tests verify:
//! - Sections, keys, multi-value and continuation lines
//! - Case folding of names
//! - Comment and blank line handling
//! - Escapes kept raw in the parsed map
//! - Syntax errors with the right line numbers

use std::fs;
use std::path::Path;

use cfgstore::parser::{load_file, parse_reader};
use cfgstore::{CfgError, Result, Sections};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn parse(text: &str) -> Result<Sections> {
    parse_reader(text.as_bytes(), Path::new("test.cfg"))
}

fn values(sections: &Sections, section: &str, key: &str) -> Vec<String> {
    sections[section][key].clone()
}

fn syntax_line(text: &str) -> usize {
    match parse(text) {
        Err(CfgError::Syntax { line, .. }) => line,
        other => panic!("expected syntax error, got {:?}", other),
    }
}

const EXAMPLE: &str = "\
# Example config file.
[section]
key = value
key2 = value1, value2
key3 = value1,
       value2,
       value3

[section2]
key = value1,
      value2,
      value3
";

// =============================================================================
// Basic Parsing Tests
// =============================================================================

#[test]
fn test_parse_example_file() {
    let sections = parse(EXAMPLE).unwrap();

    assert_eq!(sections.len(), 2);
    assert_eq!(values(&sections, "section", "key"), vec!["value"]);
    assert_eq!(values(&sections, "section", "key2"), vec!["value1", "value2"]);
    assert_eq!(values(&sections, "section", "key3"), vec!["value1", "value2", "value3"]);
    assert_eq!(values(&sections, "section2", "key"), vec!["value1", "value2", "value3"]);
}

#[test]
fn test_parse_empty_input() {
    assert!(parse("").unwrap().is_empty());
}

#[test]
fn test_names_are_case_folded() {
    let sections = parse("[SeCtion]\nMyKey = Value\n").unwrap();

    assert_eq!(values(&sections, "section", "mykey"), vec!["Value"]);
}

#[test]
fn test_values_are_trimmed() {
    let sections = parse("[s]\n  k   =    spaced value   ,  b  \n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["spaced value", "b"]);
}

#[test]
fn test_continuation_collapses_to_one_list() {
    let sections = parse("[s]\nkey3 = a,\n       b,\n       c\n").unwrap();

    assert_eq!(values(&sections, "s", "key3"), vec!["a", "b", "c"]);
}

#[test]
fn test_trailing_whitespace_after_comma_still_continues() {
    let sections = parse("[s]\nk = a,   \n  b\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["a", "b"]);
}

#[test]
fn test_empty_value() {
    let sections = parse("[s]\nk =\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec![""]);
}

#[test]
fn test_whitespace_line_closes_run_with_empty_value() {
    let sections = parse("[s]\nk = a,\n      \nj = b\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["a", ""]);
    assert_eq!(values(&sections, "s", "j"), vec!["b"]);
}

#[test]
fn test_duplicate_key_last_wins() {
    let sections = parse("[s]\nk = 1\nk = 2\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["2"]);
}

#[test]
fn test_repeated_header_starts_section_over() {
    let sections = parse("[s]\na = 1\n[t]\nb = 2\n[S]\nc = 3\n").unwrap();

    assert_eq!(sections["s"].len(), 1);
    assert!(sections["s"].contains_key("c"));
    assert!(sections["t"].contains_key("b"));
}

#[test]
fn test_crlf_line_endings() {
    let sections = parse("[s]\r\nk = v\r\nm = a,\r\n    b\r\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["v"]);
    assert_eq!(values(&sections, "s", "m"), vec!["a", "b"]);
}

// =============================================================================
// Comment and Blank Line Tests
// =============================================================================

#[test]
fn test_comment_only_section_has_no_keys() {
    let sections = parse("[sec]\n# foo\n").unwrap();

    assert!(sections.contains_key("sec"));
    assert!(sections["sec"].is_empty());
}

#[test]
fn test_comment_inside_continuation_is_skipped() {
    let sections = parse("[s]\nk = a,\n  # note\n  b\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["a", "b"]);
}

#[test]
fn test_blank_lines_are_skipped() {
    let sections = parse("\n\n[s]\n\n   \nk = v\n\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["v"]);
}

#[test]
fn test_whitespace_only_lines_outside_a_key_are_skipped() {
    let sections = parse("   \n[s]\n \t \nk = v\n\t\nj = w\n  \n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["v"]);
    assert_eq!(values(&sections, "s", "j"), vec!["w"]);
    assert_eq!(sections["s"].len(), 2);
}

#[test]
fn test_non_utf8_comment_is_ignored() {
    let sections = parse_reader(&b"# caf\xe9\n[s]\nk = v\n"[..], Path::new("test.cfg")).unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["v"]);
}

#[test]
fn test_hash_inside_value_is_literal() {
    let sections = parse("[s]\nk = a#b\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["a#b"]);
}

// =============================================================================
// Escape Tests
// =============================================================================

#[test]
fn test_escapes_are_kept_raw() {
    let sections = parse("[s]\nk = a\\,b, c\\[d\\]\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["a\\,b", "c\\[d\\]"]);
}

#[test]
fn test_escaped_trailing_comma_does_not_continue() {
    let sections = parse("[s]\nk = a\\,\nj = b\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["a\\,"]);
    assert_eq!(values(&sections, "s", "j"), vec!["b"]);
}

#[test]
fn test_escaped_backslash_before_comma() {
    let sections = parse("[s]\nk = a\\\\,\n  b\n").unwrap();

    assert_eq!(values(&sections, "s", "k"), vec!["a\\\\", "b"]);
}

// =============================================================================
// Syntax Error Tests
// =============================================================================

#[test]
fn test_key_without_section_is_error() {
    assert_eq!(syntax_line("key = value\n"), 1);
}

#[test]
fn test_double_equals_is_error_on_that_line() {
    assert_eq!(syntax_line("[s]\n\nk = = v\n"), 3);
}

#[test]
fn test_unterminated_header_is_error() {
    assert_eq!(syntax_line("[s]\na = 1\n[broken\n"), 3);
}

#[test]
fn test_stray_text_is_error() {
    assert_eq!(syntax_line("[s]\nstray\n"), 2);
}

#[test]
fn test_comma_without_key_is_error() {
    assert_eq!(syntax_line("[s]\n, x\n"), 2);
}

#[test]
fn test_trailing_escape_is_error() {
    assert_eq!(syntax_line("[s]\nk = a\\\n"), 2);
}

#[test]
fn test_dangling_comma_at_eof_reports_last_line() {
    assert_eq!(syntax_line("[s]\nk = a,\n\n# trailing comment\n"), 2);
}

#[test]
fn test_header_inside_open_key_reports_last_line() {
    assert_eq!(syntax_line("[s]\nk = a,\n\n[t]\n"), 2);
}

#[test]
fn test_new_key_inside_open_key_is_error() {
    assert_eq!(syntax_line("[s]\nk = a,\nj = b\n"), 3);
}

#[test]
fn test_bracket_inside_value_is_error() {
    assert_eq!(syntax_line("[s]\nk = a[b]\n"), 2);
}

// =============================================================================
// File Loading Tests
// =============================================================================

#[test]
fn test_load_file_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("app.cfg");
    fs::write(&path, EXAMPLE).unwrap();

    let sections = load_file(&path).unwrap();

    assert_eq!(values(&sections, "section", "key2"), vec!["value1", "value2"]);
}

#[test]
fn test_syntax_error_names_the_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.cfg");
    fs::write(&path, "[s]\nk = = v\n").unwrap();

    let err = load_file(&path).unwrap_err();

    match &err {
        CfgError::Syntax { file, line } => {
            assert_eq!(file, &path);
            assert_eq!(*line, 2);
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
    assert_eq!(err.line(), Some(2));
    assert!(err.to_string().contains("bad.cfg"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();

    let err = load_file(&temp.path().join("missing.cfg")).unwrap_err();

    assert!(matches!(err, CfgError::Io(_)));
}
