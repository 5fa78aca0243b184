use super::CommentFilter;
use crate::models::CommentRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShebangFilter;

impl CommentFilter for ShebangFilter {
    fn name(&self) -> &'static str {
        "shebang"
    }

    fn should_skip(&self, comment: &CommentRecord) -> bool {
        comment.text.trim().starts_with("#!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommentKind;

    fn skip(text: &str) -> bool {
        ShebangFilter.should_skip(&CommentRecord::new(text, 1, "script", CommentKind::Line))
    }

    #[test]
    fn shebangs() {
        assert!(skip("#!/usr/bin/env python"));
        assert!(skip("#! /usr/bin/env python"));
        assert!(skip("#!/bin/bash"));
    }

    #[test]
    fn plain_hash_comment_is_kept() {
        assert!(!skip("# Regular comment"));
        assert!(!skip("# !important"));
    }
}
