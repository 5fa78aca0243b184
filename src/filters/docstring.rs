use super::CommentFilter;
use crate::models::CommentRecord;

/// Blanket docstring suppression. Not part of the default chain; enabled by the
/// `suppress_docstrings` policy for projects that treat docstrings as always acceptable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocstringFilter;

impl CommentFilter for DocstringFilter {
    fn name(&self) -> &'static str {
        "docstring"
    }

    fn should_skip(&self, comment: &CommentRecord) -> bool {
        comment.is_docstring || comment.text.trim().starts_with("/**")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommentKind;

    #[test]
    fn python_docstring_and_jsdoc_are_skipped() {
        let py = CommentRecord::new("\"\"\"Doc.\"\"\"", 1, "a.py", CommentKind::Docstring);
        let js = CommentRecord::new("/** JSDoc */", 1, "a.js", CommentKind::Block);
        assert!(DocstringFilter.should_skip(&py));
        assert!(DocstringFilter.should_skip(&js));
    }

    #[test]
    fn ordinary_comment_is_kept() {
        let c = CommentRecord::new("// plain", 1, "a.js", CommentKind::Line);
        assert!(!DocstringFilter.should_skip(&c));
    }
}
