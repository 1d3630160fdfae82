//! Parser for `git status --porcelain=v1 -z`

use crate::error::{Error, Result};
use crate::types::{ChangeKind, FileRef};

/// Parse NUL-separated porcelain v1 output into file references
///
/// Each record is `XY <path>`; renames and copies are followed by an extra
/// record holding the source path.
pub fn parse_porcelain(output: &str) -> Result<Vec<FileRef>> {
    let mut files = Vec::new();
    let mut records = output.split('\0').filter(|r| !r.is_empty());

    while let Some(record) = records.next() {
        if record.len() < 4 || !record.is_char_boundary(3) {
            return Err(Error::Parse(format!("malformed status record: {record:?}")));
        }
        let (code, path) = record.split_at(3);
        let mut chars = code.chars();
        let index = chars.next().unwrap_or(' ');
        let worktree = chars.next().unwrap_or(' ');

        let kind = change_kind(index, worktree);
        let mut file = FileRef::new(path, kind);

        if matches!(kind, ChangeKind::Renamed | ChangeKind::Copied) {
            let original = records
                .next()
                .ok_or_else(|| Error::Parse(format!("missing source path for {path}")))?;
            file.original_path = Some(original.to_string());
        }

        files.push(file);
    }

    Ok(files)
}

/// Collapse the two status columns into one change kind
///
/// The index column wins when set; otherwise the worktree column is used.
fn change_kind(index: char, worktree: char) -> ChangeKind {
    if index == '?' || worktree == '?' {
        return ChangeKind::Untracked;
    }
    let code = if index == ' ' { worktree } else { index };
    match code {
        'A' => ChangeKind::Added,
        'D' => ChangeKind::Deleted,
        'R' => ChangeKind::Renamed,
        'C' => ChangeKind::Copied,
        _ => ChangeKind::Modified,
    }
}
