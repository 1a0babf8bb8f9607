//! Output formatting for CLI display
//!
//! Matches are printed grouped by file: a header with the file path, then
//! one line per submatch prefixed with its alias handle.

use colored::Colorize;
use std::path::{Component, MAIN_SEPARATOR, Path};

/// Format a path relative to `cwd`, with a `./` prefix when it lies below it
///
/// Paths outside `cwd`, or reaching out of it through `..`, are shown as given.
#[must_use]
pub fn format_path(path: &Path, cwd: &Path) -> String {
    match path.strip_prefix(cwd) {
        Ok(rel_path) if is_local(rel_path) => {
            format!(".{MAIN_SEPARATOR}{}", rel_path.display())
        }
        _ => path.display().to_string(),
    }
}

fn is_local(rel_path: &Path) -> bool {
    !rel_path.as_os_str().is_empty()
        && rel_path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

/// The header printed when results move on to a new file
#[must_use]
pub fn file_header(path: &Path, cwd: &Path) -> String {
    format_path(path, cwd).magenta().to_string()
}

/// Highlight the byte range `start..end` of `text`
///
/// Ranges that fall outside `text` or split a UTF-8 character leave the
/// text unhighlighted.
#[must_use]
pub fn highlight_range(text: &str, start: usize, end: usize) -> String {
    let parts = text
        .get(..start)
        .zip(text.get(start..end))
        .zip(text.get(end..));

    match parts {
        Some(((before, matched), after)) => format!("{before}{}{after}", matched.red()),
        None => text.to_string(),
    }
}

/// One result line: `[handle] line:column:text`, column 1-based
#[must_use]
pub fn match_line(handle: u32, text: &str, line: u64, start: u64, end: u64) -> String {
    let start_idx = usize::try_from(start).unwrap_or(usize::MAX);
    let end_idx = usize::try_from(end).unwrap_or(usize::MAX);
    let content = highlight_range(text, start_idx, end_idx);

    format!(
        "{}{}{} {}:{}:{}",
        "[".blue(),
        handle.to_string().red(),
        "]".blue(),
        line.to_string().green(),
        start.saturating_add(1).to_string().cyan(),
        content.trim_end_matches(['\n', '\r']),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_path_below_cwd() {
        let formatted = format_path(
            Path::new("/home/u/proj/src/main.rs"),
            Path::new("/home/u/proj"),
        );
        assert_eq!(formatted, format!(".{MAIN_SEPARATOR}src/main.rs"));
    }

    #[test]
    fn test_format_path_outside_cwd() {
        let formatted = format_path(Path::new("/etc/hosts"), Path::new("/home/u/proj"));
        assert_eq!(formatted, "/etc/hosts");
    }

    #[test]
    fn test_format_path_escaping_cwd() {
        let formatted = format_path(
            Path::new("/home/u/proj/../x.rs"),
            Path::new("/home/u/proj"),
        );
        assert_eq!(formatted, "/home/u/proj/../x.rs");
    }

    #[test]
    fn test_highlight_range_plain() {
        plain();
        assert_eq!(highlight_range("let x = 1;", 4, 5), "let x = 1;");
    }

    #[test]
    fn test_highlight_range_out_of_bounds() {
        assert_eq!(highlight_range("short", 2, 40), "short");
        assert_eq!(highlight_range("", 0, 0), "");
    }

    #[test]
    fn test_highlight_range_splitting_a_character() {
        // 'é' is two bytes; offset 1 lands inside it
        assert_eq!(highlight_range("é!", 1, 3), "é!");
    }

    #[test]
    fn test_match_line_plain() {
        plain();
        let line = match_line(3, "fn main() {\n", 12, 3, 7);
        assert_eq!(line, "[3] 12:4:fn main() {");
    }
}
