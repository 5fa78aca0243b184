use std::collections::HashSet;

use crate::detector;
use crate::models::CommentRecord;

/// One `(old, new)` replacement inside a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPair<'a> {
    pub old_text: &'a str,
    pub new_text: &'a str,
}

/// Keep the records of `new_side` whose normalized text never appears on `old_side`.
pub fn only_new(old_side: &[CommentRecord], new_side: Vec<CommentRecord>) -> Vec<CommentRecord> {
    if old_side.is_empty() {
        return new_side;
    }

    let seen: HashSet<String> = old_side.iter().map(CommentRecord::normalized_text).collect();
    new_side
        .into_iter()
        .filter(|c| !seen.contains(&c.normalized_text()))
        .collect()
}

/// Comments introduced by replacing `old_text` with `new_text`.
///
/// Both sides are extracted independently, so a comment that only moved
/// (or changed case/indentation) is not reported.
pub fn new_comments_for_edit(old_text: &str, new_text: &str, file_path: &str, include_docstrings: bool) -> Vec<CommentRecord> {
    let old_side = detector::detect(old_text, file_path, include_docstrings);
    let new_side = detector::detect(new_text, file_path, include_docstrings);
    only_new(&old_side, new_side)
}

/// Run the isolator per sub-edit and concatenate in sub-edit order.
/// Sub-edits whose new text is empty are skipped.
pub fn new_comments_for_batch(edits: &[EditPair<'_>], file_path: &str, include_docstrings: bool) -> Vec<CommentRecord> {
    edits
        .iter()
        .filter(|e| !e.new_text.is_empty())
        .flat_map(|e| new_comments_for_edit(e.old_text, e.new_text, file_path, include_docstrings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommentKind;

    #[test]
    fn comment_absent_from_old_side_is_new() {
        let got = new_comments_for_edit("x", "# given\ny", "t.py", true);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].text, "# given");
    }

    #[test]
    fn same_normalized_text_is_not_new() {
        let old = "x = 1\n# Keep This\n";
        let new = "y = 2\n\n\n    # keep this   \nz = 3\n";
        let got = new_comments_for_edit(old, new, "t.py", true);
        assert!(got.is_empty(), "{got:?}");
    }

    #[test]
    fn only_changed_comment_is_reported() {
        let old = "# one\nx = 1\n";
        let new = "# one\n# two\nx = 1\n";
        let got = new_comments_for_edit(old, new, "t.py", true);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].text, "# two");
        assert_eq!(got[0].line, 2);
    }

    #[test]
    fn empty_old_side_short_circuits() {
        let a = CommentRecord::new("# a", 1, "t.py", CommentKind::Line);
        let got = only_new(&[], vec![a.clone()]);
        assert_eq!(got, vec![a]);
    }

    #[test]
    fn batch_concatenates_in_order_and_skips_empty() {
        let edits = [
            EditPair { old_text: "a = 1", new_text: "# first\na = 2" },
            EditPair { old_text: "b = 1", new_text: "" },
            EditPair { old_text: "# kept\nc = 1", new_text: "# kept\n# second\nc = 2" },
        ];
        let got = new_comments_for_batch(&edits, "t.py", true);
        let texts: Vec<&str> = got.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["# first", "# second"]);
    }
}
