use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Line,
    Block,
    Docstring,
}

impl CommentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentKind::Line => "line",
            CommentKind::Block => "block",
            CommentKind::Docstring => "docstring",
        }
    }
}

/// One comment or docstring found in a source snapshot.
///
/// Records are built once by the detector and never edited afterwards;
/// filters only decide whether a record is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    /// Exact source slice, delimiters included.
    pub text: String,

    /// 1-indexed line of the first character.
    pub line: usize,

    pub file_path: String,
    pub kind: CommentKind,
    pub is_docstring: bool,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl CommentRecord {
    pub fn new(text: impl Into<String>, line: usize, file_path: impl Into<String>, kind: CommentKind) -> Self {
        Self {
            text: text.into(),
            line: line.max(1),
            file_path: file_path.into(),
            kind,
            is_docstring: kind == CommentKind::Docstring,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Trimmed, lowercased text. Used as the identity of a comment when
    /// comparing the two sides of an edit.
    pub fn normalized_text(&self) -> String {
        normalize_text(&self.text)
    }
}

pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_text_strips_whitespace_and_lowercases() {
        let c = CommentRecord::new("  # Hello World  \n", 1, "a.py", CommentKind::Line);
        assert_eq!(c.normalized_text(), "# hello world");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_text("\t// MiXeD Case ");
        assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn docstring_kind_sets_flag() {
        let d = CommentRecord::new("\"\"\"doc\"\"\"", 1, "a.py", CommentKind::Docstring);
        assert!(d.is_docstring);
        let l = CommentRecord::new("# x", 1, "a.py", CommentKind::Line);
        assert!(!l.is_docstring);
    }

    #[test]
    fn line_is_clamped_to_one() {
        let c = CommentRecord::new("# x", 0, "a.py", CommentKind::Line);
        assert_eq!(c.line, 1);
    }

    #[test]
    fn metadata_is_carried() {
        let c = CommentRecord::new("# x", 3, "a.py", CommentKind::Line).with_metadata("node_kind", "comment");
        assert_eq!(c.metadata.get("node_kind").map(String::as_str), Some("comment"));
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["metadata"]["node_kind"], "comment");
    }
}
