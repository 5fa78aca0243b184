//! Suppression heuristics applied to detected comments.
//!
//! Each filter is a pure predicate over one record. The chain drops a record
//! as soon as any filter claims it; survivors are what gets reported.

pub mod agent_memo;
pub mod bdd;
pub mod directive;
pub mod docstring;
pub mod shebang;

pub use agent_memo::AgentMemoFilter;
pub use bdd::BddFilter;
pub use directive::DirectiveFilter;
pub use docstring::DocstringFilter;
pub use shebang::ShebangFilter;

use crate::models::CommentRecord;

pub trait CommentFilter: Send + Sync {
    fn name(&self) -> &'static str;
    fn should_skip(&self, comment: &CommentRecord) -> bool;
}

/// Strip the first of `markers` that prefixes `text`, then trim.
/// `text` is expected to be trimmed already.
pub(crate) fn strip_first_marker<'a>(text: &'a str, markers: &[&str]) -> &'a str {
    for m in markers {
        if let Some(rest) = text.strip_prefix(*m) {
            return rest.trim();
        }
    }
    text
}

pub struct FilterChain {
    filters: Vec<Box<dyn CommentFilter>>,
}

impl Default for FilterChain {
    /// Structural keywords, then directives, then shebangs.
    fn default() -> Self {
        Self {
            filters: vec![Box::new(BddFilter), Box::new(DirectiveFilter), Box::new(ShebangFilter)],
        }
    }
}

impl FilterChain {
    pub fn empty() -> Self {
        Self { filters: vec![] }
    }

    pub fn push(mut self, filter: impl CommentFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Default chain, plus blanket docstring suppression when `suppress_docstrings` is set.
    pub fn for_policy(suppress_docstrings: bool) -> Self {
        let chain = Self::default();
        if suppress_docstrings {
            chain.push(DocstringFilter)
        } else {
            chain
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Name of the first filter that drops `comment`, if any.
    pub fn skipped_by(&self, comment: &CommentRecord) -> Option<&'static str> {
        self.filters.iter().find(|f| f.should_skip(comment)).map(|f| f.name())
    }

    pub fn should_skip(&self, comment: &CommentRecord) -> bool {
        self.skipped_by(comment).is_some()
    }

    pub fn apply(&self, comments: Vec<CommentRecord>) -> Vec<CommentRecord> {
        comments.into_iter().filter(|c| !self.should_skip(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommentKind;

    fn line(text: &str) -> CommentRecord {
        CommentRecord::new(text, 1, "t.py", CommentKind::Line)
    }

    #[test]
    fn default_order() {
        assert_eq!(FilterChain::default().names(), vec!["bdd", "directive", "shebang"]);
        assert_eq!(FilterChain::for_policy(true).names(), vec!["bdd", "directive", "shebang", "docstring"]);
    }

    #[test]
    fn first_claiming_filter_is_reported() {
        let chain = FilterChain::default();
        assert_eq!(chain.skipped_by(&line("# given")), Some("bdd"));
        assert_eq!(chain.skipped_by(&line("# noqa")), Some("directive"));
        assert_eq!(chain.skipped_by(&line("#!/bin/sh")), Some("shebang"));
        assert_eq!(chain.skipped_by(&line("# compute totals")), None);
    }

    #[test]
    fn apply_keeps_survivors_in_order() {
        let chain = FilterChain::default();
        let kept = chain.apply(vec![line("# a"), line("# then"), line("# b"), line("# type: ignore")]);
        let texts: Vec<&str> = kept.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["# a", "# b"]);
    }

    #[test]
    fn docstrings_survive_unless_policy_says_otherwise() {
        let doc = CommentRecord::new("\"\"\"Doc.\"\"\"", 1, "t.py", CommentKind::Docstring);
        assert!(!FilterChain::default().should_skip(&doc));
        assert!(FilterChain::for_policy(true).should_skip(&doc));
    }

    #[test]
    fn reordering_independent_filters_keeps_the_same_set() {
        let reversed = FilterChain::empty().push(ShebangFilter).push(DirectiveFilter).push(BddFilter);
        let forward = FilterChain::default();
        for text in ["# given", "# noqa: E501", "#! /usr/bin/env python", "# hello", "// @ts-ignore"] {
            let c = line(text);
            assert_eq!(forward.should_skip(&c), reversed.should_skip(&c), "{text}");
        }
    }

    #[test]
    fn strip_first_marker_only_strips_once() {
        assert_eq!(strip_first_marker("## x", &["#", "//"]), "# x");
        assert_eq!(strip_first_marker("// y", &["#", "//"]), "y");
        assert_eq!(strip_first_marker("z", &["#"]), "z");
    }
}
