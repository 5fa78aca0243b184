use super::{strip_first_marker, CommentFilter};
use crate::models::CommentRecord;

/// Linter / type-checker pragmas. Matched as prefixes of the marker-stripped text.
pub const DIRECTIVE_PREFIXES: &[&str] = &[
    "type:",
    "noqa",
    "pyright:",
    "ruff:",
    "mypy:",
    "pylint:",
    "flake8:",
    "pyre:",
    "pytype:",
    "eslint-disable",
    "eslint-ignore",
    "prettier-ignore",
    "ts-ignore",
    "ts-expect-error",
    "clippy:",
    "allow",
    "deny",
    "warn",
    "forbid",
];

const MARKERS: &[&str] = &["#", "//", "/*", "--"];

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveFilter;

impl CommentFilter for DirectiveFilter {
    fn name(&self) -> &'static str {
        "directive"
    }

    fn should_skip(&self, comment: &CommentRecord) -> bool {
        let lowered = comment.text.trim().to_lowercase();
        let mut rest = strip_first_marker(&lowered, MARKERS);
        // `@ts-ignore`, `@ts-expect-error`
        if let Some(r) = rest.strip_prefix('@') {
            rest = r.trim();
        }
        DIRECTIVE_PREFIXES.iter().any(|p| rest.starts_with(p))
    }
}
