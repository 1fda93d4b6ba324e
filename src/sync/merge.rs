//! Reconciling the local document with a freshly fetched remote.
//!
//! The policy is deliberately small:
//! - todos are matched by id only
//! - for ids on both sides the remote version wins, field for field
//! - todos that exist only locally are appended after the remote's lines,
//!   in their local order, never interleaved into the remote's structure
//!
//! Everything here is a pure function of the two line sequences.

use std::collections::HashSet;

use crate::markdown::{trailing_insert_index, ParsedFile, ParsedLine};
use crate::model::TodoItem;

/// What a sync cycle should do with the local document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing local is missing remotely: adopt the remote document.
    RemoteWins,
    /// Remote document plus the local-only todos at the end.
    Merged {
        file: ParsedFile,
        appended: Vec<TodoItem>,
    },
}

/// Local todos whose id does not appear in the remote document.
#[must_use]
pub fn local_only<'a>(local: &'a ParsedFile, remote: &ParsedFile) -> Vec<&'a TodoItem> {
    let remote_ids: HashSet<&str> = remote.todos().map(|t| t.id.as_str()).collect();
    local
        .todos()
        .filter(|t| !remote_ids.contains(t.id.as_str()))
        .collect()
}

/// Decide how to reconcile `local` against `remote`.
#[must_use]
pub fn reconcile(local: &ParsedFile, remote: &ParsedFile) -> Reconciliation {
    let appended: Vec<TodoItem> = local_only(local, remote).into_iter().cloned().collect();
    if appended.is_empty() {
        return Reconciliation::RemoteWins;
    }

    let mut lines = remote.lines().to_vec();
    let at = trailing_insert_index(&lines);
    lines.splice(at..at, appended.iter().cloned().map(ParsedLine::Todo));

    Reconciliation::Merged {
        file: ParsedFile::from_lines(lines),
        appended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parse;

    const A: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa";
    const B: &str = "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb";
    const C: &str = "cccccccc-cccc-4ccc-8ccc-cccccccccccc";

    fn line(name: &str, id: &str, done: bool) -> String {
        format!("- [{}] {name} (id: {id})", if done { 'x' } else { '_' })
    }

    #[test]
    fn test_remote_superset_remote_wins() {
        let local = parse(&line("A local edit", A, true));
        let remote = parse(&[line("A", A, false), line("B", B, false)].join("\n"));
        assert_eq!(reconcile(&local, &remote), Reconciliation::RemoteWins);
    }

    #[test]
    fn test_local_only_appended_after_remote() {
        let local = parse(&[line("A", A, false), line("C", C, false)].join("\n"));
        let remote = parse(&["# List".to_string(), line("A", A, true)].join("\n"));

        let Reconciliation::Merged { file, appended } = reconcile(&local, &remote) else {
            panic!("expected merge");
        };
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].id, C);
        assert_eq!(
            file.to_content(),
            ["# List".to_string(), line("A", A, true), line("C", C, false)].join("\n")
        );
    }

    #[test]
    fn test_shared_ids_take_remote_fields() {
        let local = parse(&[line("A renamed", A, true), line("C", C, false)].join("\n"));
        let remote = parse(&line("A", A, false));

        let Reconciliation::Merged { file, .. } = reconcile(&local, &remote) else {
            panic!("expected merge");
        };
        let a = file.find(A).unwrap();
        assert_eq!(a.name, "A");
        assert!(!a.done);
    }

    #[test]
    fn test_local_only_keep_local_order() {
        let local = parse(&[line("C", C, false), line("B", B, false)].join("\n"));
        let remote = parse("");

        let Reconciliation::Merged { file, .. } = reconcile(&local, &remote) else {
            panic!("expected merge");
        };
        let ids: Vec<_> = file.todos().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![C, B]);
        // The empty remote's single empty line becomes the trailing newline.
        assert_eq!(file.to_content(), format!("{}\n{}\n", line("C", C, false), line("B", B, false)));
    }

    #[test]
    fn test_remote_trailing_newline_preserved() {
        let local = parse(&line("C", C, false));
        let remote = parse(&format!("{}\n", line("A", A, false)));

        let Reconciliation::Merged { file, .. } = reconcile(&local, &remote) else {
            panic!("expected merge");
        };
        assert_eq!(
            file.to_content(),
            format!("{}\n{}\n", line("A", A, false), line("C", C, false))
        );
    }

    #[test]
    fn test_raw_local_lines_are_not_carried() {
        let local = parse("# Local heading\nnotes");
        let remote = parse(&line("A", A, false));
        assert_eq!(reconcile(&local, &remote), Reconciliation::RemoteWins);
    }
}
