use crate::classifier::classify_span;
use crate::language::{self, Language};
use crate::models::{CommentKind, CommentRecord};
use crate::syntax::{self, QuerySlot, RawSpan};

fn to_record(span: RawSpan, file_path: &str, kind: CommentKind) -> CommentRecord {
    CommentRecord::new(span.text, span.start_line, file_path, kind).with_metadata("node_kind", span.node_kind)
}

/// Extract comments (and, when asked, docstrings) from `content`, which is
/// treated as source text of whatever language `file_path` resolves to.
///
/// Order: comment-query results in match order, then docstring-query results.
/// A span matched by both queries appears twice.
/// Unsupported paths and unparseable sources yield an empty list.
pub fn detect(content: &str, file_path: &str, include_docstrings: bool) -> Vec<CommentRecord> {
    let Some(lang) = language::resolve(file_path) else {
        return vec![];
    };
    detect_in_language(lang, content, file_path, include_docstrings)
}

pub fn detect_in_language(lang: Language, content: &str, file_path: &str, include_docstrings: bool) -> Vec<CommentRecord> {
    let Some(tree) = syntax::parse(lang, content) else {
        return vec![];
    };

    let mut out: Vec<CommentRecord> = Vec::new();
    for span in syntax::query_spans(lang, &tree, content, QuerySlot::Comment) {
        let kind = classify_span(&span);
        if kind == CommentKind::Docstring && !include_docstrings {
            continue;
        }
        out.push(to_record(span, file_path, kind));
    }

    if include_docstrings {
        out.extend(
            syntax::query_spans(lang, &tree, content, QuerySlot::Docstring)
                .into_iter()
                .map(|span| to_record(span, file_path, CommentKind::Docstring)),
        );
    }

    out
}
