//! `git status --porcelain` (v1) parsing.
//!
//! Each status line is `XY PATH` or `XY ORIG -> PATH`, where `X` is the index
//! column and `Y` the worktree column. One line can produce two entries: a
//! staged one when `X` is set and a working one when `Y` is set.
//!
//! ```text
//! MM src/lib.rs        → staged M, working M
//! A  README.md         → staged A
//!  D old.rs            → working D
//! R  a.rs -> b.rs      → staged R, path b.rs
//! ?? notes.txt         → working ?
//! !! target/           → ignored
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::error::StatusError;

static STATUS_LINE: OnceLock<Regex> = OnceLock::new();

fn status_line() -> &'static Regex {
    STATUS_LINE.get_or_init(|| {
        Regex::new(r"^([ MTADRCU?!])([ MTADRCU?!]) (.+)$").expect("status line pattern compiles")
    })
}

/// One changed file as shown in a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Current path, relative to the repository root.
    pub path: String,
    /// Source path of a rename or copy.
    pub old_path: Option<String>,
    /// Porcelain status letter (`M`, `A`, `D`, `R`, `?`, ...).
    pub status: char,
    /// Whether the change is in the index.
    pub staged: bool,
}

impl FileEntry {
    #[must_use]
    pub fn new(path: impl Into<String>, status: char, staged: bool) -> Self {
        Self {
            path: path.into(),
            old_path: None,
            status,
            staged,
        }
    }

    /// Last path component.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Directory part of the path, without the trailing slash.
    #[must_use]
    pub fn parent_dir(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(dir, _)| dir)
    }
}

/// Parse porcelain v1 output. Working entries keep input order, as do staged
/// ones; the result lists all working entries first.
///
/// # Errors
///
/// [`StatusError::Malformed`] for the first line that is not a status line.
pub fn parse_porcelain(text: &str) -> Result<Vec<FileEntry>, StatusError> {
    let mut working = Vec::new();
    let mut staged = Vec::new();

    for (n, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let caps = status_line()
            .captures(line)
            .ok_or_else(|| StatusError::Malformed {
                line: n + 1,
                text: line.to_string(),
            })?;
        let x = caps[1].chars().next().unwrap_or(' ');
        let y = caps[2].chars().next().unwrap_or(' ');
        let (old_path, path) = split_rename(&caps[3], x, y);

        match (x, y) {
            ('!', '!') => continue,
            ('?', '?') => {
                working.push(FileEntry::new(path, '?', false));
                continue;
            }
            ('?' | '!', _) | (_, '?' | '!') => {
                return Err(StatusError::Malformed {
                    line: n + 1,
                    text: line.to_string(),
                });
            }
            _ => {}
        }

        if x != ' ' {
            staged.push(FileEntry {
                path: path.clone(),
                old_path: old_path.clone(),
                status: x,
                staged: true,
            });
        }
        if y != ' ' {
            working.push(FileEntry {
                path,
                old_path,
                status: y,
                staged: false,
            });
        }
    }

    log::debug!(
        "status: {} working, {} staged",
        working.len(),
        staged.len()
    );
    working.extend(staged);
    Ok(working)
}

fn split_rename(field: &str, x: char, y: char) -> (Option<String>, String) {
    if matches!(x, 'R' | 'C') || matches!(y, 'R' | 'C') {
        if let Some((old, new)) = field.split_once(" -> ") {
            return (Some(unquote(old)), unquote(new));
        }
    }
    (None, unquote(field))
}

/// Strip the double quotes git puts around paths with unusual characters.
fn unquote(path: &str) -> String {
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .map_or_else(|| path.to_string(), |p| p.replace("\\\"", "\"").replace("\\\\", "\\"))
}
