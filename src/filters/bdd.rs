use super::{strip_first_marker, CommentFilter};
use crate::models::CommentRecord;

/// Bare test-structure markers. Only exact matches are suppressed.
pub const BDD_KEYWORDS: &[&str] = &["given", "when", "then", "arrange", "act", "assert", "when & then", "when&then"];

const MARKERS: &[&str] = &["#", "//", "--"];

/// Drops `# given` / `// when & then` / `-- arrange` style comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct BddFilter;

impl CommentFilter for BddFilter {
    fn name(&self) -> &'static str {
        "bdd"
    }

    fn should_skip(&self, comment: &CommentRecord) -> bool {
        let lowered = comment.text.trim().to_lowercase();
        let rest = strip_first_marker(&lowered, MARKERS);
        BDD_KEYWORDS.contains(&rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommentKind;

    fn skip(text: &str) -> bool {
        BddFilter.should_skip(&CommentRecord::new(text, 1, "t.py", CommentKind::Line))
    }

    #[test]
    fn bare_keywords_are_skipped() {
        assert!(skip("# given"));
        assert!(skip("// when & then"));
        assert!(skip("// when&then"));
        assert!(skip("-- arrange"));
        assert!(skip("#   THEN   "));
        assert!(skip("// Act"));
    }

    #[test]
    fn keyword_with_trailing_words_is_kept() {
        assert!(!skip("# given the input"));
        assert!(!skip("# This is a regular comment"));
        assert!(!skip("/* given */"));
    }

    #[test]
    fn is_a_pure_function_of_text() {
        let c = CommentRecord::new("# then", 9, "x.py", CommentKind::Line);
        assert_eq!(BddFilter.should_skip(&c), BddFilter.should_skip(&c));
    }
}
