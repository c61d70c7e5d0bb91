#![forbid(unsafe_code)]

//! Text snapshots for widget tests.
//!
//! Captures a `Buffer` as plain text, compares it against an inline
//! expectation or a stored `.snap` file, and prints a line diff on mismatch.
//!
//! # Quick Start
//!
//! ```
//! use izui_harness::{assert_buffer_text, buffer_to_text};
//! use izui_render::buffer::Buffer;
//! use izui_render::cell::Cell;
//!
//! let mut buf = Buffer::new(4, 1);
//! buf.set(0, 0, Cell::from_char('O'));
//! buf.set(1, 0, Cell::from_char('K'));
//! assert_eq!(buffer_to_text(&buf), "OK  ");
//! assert_buffer_text!(&buf, "OK");
//! ```
//!
//! Run tests with `BLESS=1` to create or update snapshot files under
//! `tests/snapshots/` relative to the crate's `CARGO_MANIFEST_DIR`.

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use izui_render::buffer::Buffer;

pub use izui_core::geometry::Rect;
pub use izui_render::buffer;
pub use izui_render::cell;

// ============================================================================
// Buffer → Text Conversion
// ============================================================================

/// Convert a `Buffer` to a plain text string.
///
/// Each row becomes one line. Empty cells become spaces. Continuation cells
/// are skipped so wide characters occupy their natural display width.
pub fn buffer_to_text(buf: &Buffer) -> String {
    let capacity = (buf.width() as usize + 1) * buf.height() as usize;
    let mut out = String::with_capacity(capacity);

    for y in 0..buf.height() {
        if y > 0 {
            out.push('\n');
        }
        push_row(&mut out, buf, y);
    }
    out
}

/// Text of a single row, trailing spaces included. Out-of-range rows are empty.
pub fn row_text(buf: &Buffer, y: u16) -> String {
    let mut out = String::with_capacity(buf.width() as usize);
    if y < buf.height() {
        push_row(&mut out, buf, y);
    }
    out
}

fn push_row(out: &mut String, buf: &Buffer, y: u16) {
    for cell in buf.row_cells(y) {
        if cell.is_continuation() {
            continue;
        }
        match cell.content.as_char() {
            Some(c) if !cell.is_empty() => out.push(c),
            _ => out.push(' '),
        }
    }
}

/// First `(x, y)` cell position where `needle` appears, in display columns.
pub fn find_text(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
    if needle.is_empty() {
        return None;
    }
    for y in 0..buf.height() {
        let mut columns = Vec::with_capacity(buf.width() as usize);
        let mut line = String::with_capacity(buf.width() as usize);
        for (x, cell) in buf.row_cells(y).iter().enumerate() {
            if cell.is_continuation() {
                continue;
            }
            columns.push(x as u16);
            line.push(cell.content.as_char().filter(|_| !cell.is_empty()).unwrap_or(' '));
        }
        if let Some(byte) = line.find(needle) {
            let char_index = line[..byte].chars().count();
            return Some((columns[char_index], y));
        }
    }
    None
}

/// Whether `needle` appears anywhere in the buffer.
pub fn contains_text(buf: &Buffer, needle: &str) -> bool {
    find_text(buf, needle).is_some()
}

// ============================================================================
// Comparison
// ============================================================================

/// How strictly captured text is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Byte-exact string comparison.
    Exact,
    /// Trim trailing whitespace on each line before comparing.
    TrimTrailing,
}

fn normalize(text: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Exact => text.to_string(),
        MatchMode::TrimTrailing => text
            .lines()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
            .trim_end_matches('\n')
            .to_string(),
    }
}

/// Line diff between two texts. Empty when they are equal.
///
/// Unchanged lines start with a space, expected-only lines with `-`, and
/// actual-only lines with `+`.
pub fn diff_text(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let max_lines = expected_lines.len().max(actual_lines.len());
    let mut out = String::new();
    let mut has_diff = false;

    for i in 0..max_lines {
        let exp = expected_lines.get(i).copied();
        let act = actual_lines.get(i).copied();

        // Writing into a String cannot fail.
        let _ = match (exp, act) {
            (Some(e), Some(a)) if e == a => writeln!(out, " {e}"),
            (Some(e), Some(a)) => {
                has_diff = true;
                writeln!(out, "-{e}").and_then(|()| writeln!(out, "+{a}"))
            }
            (Some(e), None) => {
                has_diff = true;
                writeln!(out, "-{e}")
            }
            (None, Some(a)) => {
                has_diff = true;
                writeln!(out, "+{a}")
            }
            (None, None) => Ok(()),
        };
    }

    if has_diff { out } else { String::new() }
}

/// Assert that `buf` renders as `expected`, ignoring trailing whitespace.
///
/// # Panics
///
/// Panics with a line diff when the texts differ.
#[track_caller]
pub fn assert_text_eq(buf: &Buffer, expected: &str) {
    let actual = normalize(&buffer_to_text(buf), MatchMode::TrimTrailing);
    let expected = normalize(expected, MatchMode::TrimTrailing);
    if actual != expected {
        panic!(
            "buffer text mismatch\n{}",
            diff_text(&expected, &actual)
        );
    }
}

/// Assert a buffer's text against an inline expectation.
///
/// ```
/// # use izui_harness::assert_buffer_text;
/// # use izui_render::buffer::Buffer;
/// let buf = Buffer::new(3, 2);
/// assert_buffer_text!(&buf, "");
/// ```
#[macro_export]
macro_rules! assert_buffer_text {
    ($buf:expr, $expected:expr) => {
        $crate::assert_text_eq($buf, $expected)
    };
}

// ============================================================================
// Snapshot Files
// ============================================================================

fn snapshot_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir
        .join("tests")
        .join("snapshots")
        .join(format!("{name}.snap"))
}

fn is_bless() -> bool {
    std::env::var("BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Compare `buf` against `tests/snapshots/{name}.snap` under `base_dir`.
///
/// With `BLESS=1` the snapshot is written instead.
///
/// # Panics
///
/// Panics when the snapshot is missing (and not blessing), when the stored
/// text differs, or when the snapshot file cannot be written.
#[track_caller]
pub fn assert_buffer_snapshot(name: &str, buf: &Buffer, base_dir: &str, mode: MatchMode) {
    let path = snapshot_path(Path::new(base_dir), name);
    let actual = buffer_to_text(buf);

    if is_bless() {
        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                panic!("failed to create snapshot directory {}: {err}", parent.display());
            }
        }
        if let Err(err) = std::fs::write(&path, &actual) {
            panic!("failed to write snapshot {}: {err}", path.display());
        }
        return;
    }

    match std::fs::read_to_string(&path) {
        Ok(stored) => {
            let expected = normalize(&stored, mode);
            let got = normalize(&actual, mode);
            if expected != got {
                panic!(
                    "Snapshot mismatch for '{name}' ({})\nSet BLESS=1 to update.\n\n{}",
                    path.display(),
                    diff_text(&expected, &got)
                );
            }
        }
        Err(_) => panic!(
            "No snapshot found for '{name}' at {}\nRun with BLESS=1 to create it.",
            path.display()
        ),
    }
}

/// Snapshot a buffer against `tests/snapshots/{name}.snap` in the calling crate.
#[macro_export]
macro_rules! assert_snapshot {
    ($name:expr, $buf:expr) => {
        $crate::assert_buffer_snapshot(
            $name,
            $buf,
            env!("CARGO_MANIFEST_DIR"),
            $crate::MatchMode::TrimTrailing,
        )
    };
    ($name:expr, $buf:expr, $mode:expr) => {
        $crate::assert_buffer_snapshot($name, $buf, env!("CARGO_MANIFEST_DIR"), $mode)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use izui_render::cell::Cell;

    fn buf_with(text: &str, width: u16) -> Buffer {
        let mut buf = Buffer::new(width, 1);
        for (i, c) in text.chars().enumerate() {
            buf.set(i as u16, 0, Cell::from_char(c));
        }
        buf
    }

    #[test]
    fn buffer_to_text_empty() {
        let buf = Buffer::new(3, 2);
        assert_eq!(buffer_to_text(&buf), "   \n   ");
    }

    #[test]
    fn buffer_to_text_wide_chars() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('中'));
        buf.set(2, 0, Cell::from_char('x'));
        assert_eq!(buffer_to_text(&buf), "中x ");
    }

    #[test]
    fn row_text_out_of_range_is_empty() {
        let buf = buf_with("abc", 3);
        assert_eq!(row_text(&buf, 0), "abc");
        assert_eq!(row_text(&buf, 5), "");
    }

    #[test]
    fn find_text_reports_display_column() {
        let mut buf = Buffer::new(8, 2);
        buf.set(0, 1, Cell::from_char('中'));
        buf.set(2, 1, Cell::from_char('o'));
        buf.set(3, 1, Cell::from_char('k'));
        assert_eq!(find_text(&buf, "ok"), Some((2, 1)));
        assert!(!contains_text(&buf, "nope"));
        assert_eq!(find_text(&buf, ""), None);
    }

    #[test]
    fn diff_text_identical() {
        assert!(diff_text("a\nb", "a\nb").is_empty());
    }

    #[test]
    fn diff_text_marks_changes() {
        let diff = diff_text("a\nb\nc", "a\nx");
        assert!(diff.contains(" a"));
        assert!(diff.contains("-b"));
        assert!(diff.contains("+x"));
        assert!(diff.contains("-c"));
    }

    #[test]
    fn normalize_modes() {
        let text = "  hello   world  \n  foo   bar  ";
        assert_eq!(normalize(text, MatchMode::Exact), text);
        assert_eq!(
            normalize(text, MatchMode::TrimTrailing),
            "  hello   world\n  foo   bar"
        );
    }

    #[test]
    fn assert_text_ignores_trailing_space() {
        let buf = buf_with("OK", 5);
        assert_buffer_text!(&buf, "OK");
    }

    #[test]
    #[should_panic(expected = "buffer text mismatch")]
    fn assert_text_mismatch_panics() {
        let buf = buf_with("OK", 5);
        assert_buffer_text!(&buf, "NO");
    }

    #[test]
    fn snapshot_path_construction() {
        let p = snapshot_path(Path::new("/crates/my-crate"), "widget_test");
        assert_eq!(
            p,
            PathBuf::from("/crates/my-crate/tests/snapshots/widget_test.snap")
        );
    }

    #[test]
    fn snapshot_match_succeeds() {
        let dir = std::env::temp_dir().join("izui_harness_test_match");
        let _ = std::fs::remove_dir_all(&dir);

        let buf = buf_with("OK", 5);
        let path = snapshot_path(&dir, "match_test");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "OK").unwrap();

        assert_buffer_snapshot(
            "match_test",
            &buf,
            dir.to_str().unwrap(),
            MatchMode::TrimTrailing,
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    #[should_panic(expected = "Snapshot mismatch")]
    fn snapshot_mismatch_panics() {
        let dir = std::env::temp_dir().join("izui_harness_test_mismatch");
        let _ = std::fs::remove_dir_all(&dir);

        let buf = buf_with("X", 3);
        let path = snapshot_path(&dir, "mismatch_test");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "Y  ").unwrap();

        assert_buffer_snapshot("mismatch_test", &buf, dir.to_str().unwrap(), MatchMode::Exact);
    }

    #[test]
    #[should_panic(expected = "No snapshot found")]
    fn missing_snapshot_panics() {
        let dir = std::env::temp_dir().join("izui_harness_test_missing");
        let _ = std::fs::remove_dir_all(&dir);

        let buf = Buffer::new(3, 1);
        assert_buffer_snapshot("nonexistent", &buf, dir.to_str().unwrap(), MatchMode::Exact);
    }
}
