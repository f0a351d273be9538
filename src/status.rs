//! Parsing `git status --porcelain` and labelling the result.
//!
//! Pure functions: text in, [`FileStatus`] records and styled labels out.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::types::{ChangeKind, FileStatus, Staging};

/// Separator git puts between the source and target of a rename.
const RENAME_ARROW: &str = " -> ";

// ============================================================================
// PARSING
// ============================================================================

/// Parse porcelain v1 output into records sorted by path.
///
/// Blank and malformed lines are skipped.
pub fn parse_porcelain(output: &str) -> Vec<FileStatus> {
    let mut files: Vec<FileStatus> = output.lines().filter_map(parse_line).collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

/// Parse a single `XY path` line.
pub fn parse_line(line: &str) -> Option<FileStatus> {
    let mut chars = line.chars();
    let x = chars.next()?;
    let y = chars.next()?;
    let rest = line.get(3..).filter(|rest| !rest.is_empty())?;

    let staging = if x == ' ' || x == '?' {
        Staging::Unstaged
    } else {
        Staging::Staged
    };
    let column = match staging {
        Staging::Staged => x,
        Staging::Unstaged => y,
    };

    let has_source = [x, y].iter().any(|&code| matches!(code, 'R' | 'C'));
    let (original_path, path) = match rest.split_once(RENAME_ARROW).filter(|_| has_source) {
        Some((from, to)) => (Some(unquote(from)), unquote(to)),
        None => (None, unquote(rest)),
    };

    Some(FileStatus {
        path,
        original_path,
        code: format!("{}{}", x, y),
        staging,
        change: ChangeKind::from_code(column),
    })
}

/// Undo git's C-style quoting of unusual paths.
///
/// Unquoted input is returned as-is. Octal escapes are decoded as raw
/// bytes, so quoted UTF-8 names come back intact.
fn unquote(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        return raw.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut iter = inner.bytes().peekable();
    while let Some(byte) = iter.next() {
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }
        match iter.next() {
            Some(b'n') => bytes.push(b'\n'),
            Some(b't') => bytes.push(b'\t'),
            Some(digit @ b'0'..=b'7') => {
                let mut value = u32::from(digit - b'0');
                for _ in 0..2 {
                    match iter.peek() {
                        Some(&next @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(next - b'0');
                            iter.next();
                        }
                        _ => break,
                    }
                }
                bytes.push(u8::try_from(value).unwrap_or(b'?'));
            }
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

// ============================================================================
// LABELS
// ============================================================================

/// Color for a change kind.
pub fn change_color(change: Option<ChangeKind>) -> Color {
    match change {
        Some(ChangeKind::Renamed | ChangeKind::Copied | ChangeKind::Modified) => Color::Blue,
        Some(ChangeKind::Ignored) => Color::Magenta,
        Some(ChangeKind::Conflict) => Color::Yellow,
        Some(ChangeKind::Untracked | ChangeKind::Added | ChangeKind::Deleted) | None => Color::Red,
    }
}

/// `[XY] path (kind)`, with the code green while the file is checked.
pub fn status_label(file: &FileStatus, checked: bool) -> Line<'static> {
    let kind_color = change_color(file.change);
    let code_color = if checked { Color::Green } else { kind_color };

    Line::from(vec![
        Span::styled(format!("[{}]", file.code), Style::new().fg(code_color)),
        Span::raw(format!(" {} ", file.path)),
        Span::styled(
            format!("({})", file.describe()),
            Style::new().fg(kind_color),
        ),
    ])
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn staged_modification_uses_index_column() {
        let file = parse_line("M  src/lib.rs").unwrap();
        assert_eq!(file.path, "src/lib.rs");
        assert_eq!(file.code, "M ");
        assert_eq!(file.staging, Staging::Staged);
        assert_eq!(file.change, Some(ChangeKind::Modified));
    }

    #[test]
    fn worktree_change_uses_worktree_column() {
        let file = parse_line(" D gone.txt").unwrap();
        assert_eq!(file.staging, Staging::Unstaged);
        assert_eq!(file.change, Some(ChangeKind::Deleted));
    }

    #[test]
    fn untracked_file() {
        let file = parse_line("?? notes.md").unwrap();
        assert_eq!(file.staging, Staging::Unstaged);
        assert_eq!(file.change, Some(ChangeKind::Untracked));
        assert!(!file.is_staged());
    }

    #[test]
    fn staged_add_with_worktree_edits_counts_as_staged() {
        let file = parse_line("AM new.rs").unwrap();
        assert!(file.is_staged());
        assert_eq!(file.change, Some(ChangeKind::Added));
    }

    #[test]
    fn rename_keeps_both_paths() {
        let file = parse_line("R  old name.txt -> new name.txt").unwrap();
        assert_eq!(file.path, "new name.txt");
        assert_eq!(file.original_path.as_deref(), Some("old name.txt"));
        assert_eq!(file.change, Some(ChangeKind::Renamed));
    }

    #[test]
    fn arrow_in_untracked_name_is_not_a_rename() {
        let file = parse_line("?? a -> b").unwrap();
        assert_eq!(file.path, "a -> b");
        assert_eq!(file.original_path, None);

        let file = parse_line(" M x -> y.txt").unwrap();
        assert_eq!(file.path, "x -> y.txt");
    }

    #[test]
    fn copy_keeps_source_path() {
        let file = parse_line("C  base.rs -> copy.rs").unwrap();
        assert_eq!(file.path, "copy.rs");
        assert_eq!(file.original_path.as_deref(), Some("base.rs"));
    }

    #[test]
    fn quoted_paths_are_unquoted() {
        let file = parse_line(r#"?? "with \"quotes\".txt""#).unwrap();
        assert_eq!(file.path, r#"with "quotes".txt"#);

        let file = parse_line(r#"?? "caf\303\251.txt""#).unwrap();
        assert_eq!(file.path, "café.txt");
    }

    #[test]
    fn short_and_blank_lines_are_skipped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("M ").is_none());
        assert!(parse_line("M  ").is_none());
    }

    #[test]
    fn porcelain_output_is_sorted_by_path() {
        let output = "?? zeta.txt\n M alpha.rs\n\nA  mid.rs\n";
        let files = parse_porcelain(output);
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["alpha.rs", "mid.rs", "zeta.txt"]);
    }

    #[test]
    fn label_text_and_colors() {
        let file = parse_line(" M src/main.rs").unwrap();

        let unchecked = status_label(&file, false);
        assert_eq!(text(&unchecked), "[ M] src/main.rs (modified)");
        assert_eq!(unchecked.spans[0].style.fg, Some(Color::Blue));

        let checked = status_label(&file, true);
        assert_eq!(checked.spans[0].style.fg, Some(Color::Green));
        assert_eq!(checked.spans[2].style.fg, Some(Color::Blue));
    }

    #[test]
    fn conflict_is_yellow() {
        let file = parse_line("UU merge.rs").unwrap();
        assert_eq!(change_color(file.change), Color::Yellow);
    }
}
