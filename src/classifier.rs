use crate::models::CommentKind;
use crate::syntax::RawSpan;

/// Node kinds that already tell line from block, so text sniffing is skipped.
const LINE_NODE_KINDS: &[&str] = &["line_comment"];
const BLOCK_NODE_KINDS: &[&str] = &["block_comment", "multiline_comment"];

const DOCSTRING_PREFIXES: &[&str] = &["\"\"\"", "'''"];
const LINE_PREFIXES: &[&str] = &["//", "#"];
const BLOCK_PREFIXES: &[&str] = &["/*", "<!--", "--"];

/// Classify a span from the generic comment query. First match wins:
/// grammar node kind, then triple quotes, then line markers, then block markers.
/// Anything else is treated as a line comment.
pub fn classify(text: &str, node_kind: &str) -> CommentKind {
    if LINE_NODE_KINDS.contains(&node_kind) {
        return CommentKind::Line;
    }
    if BLOCK_NODE_KINDS.contains(&node_kind) {
        return CommentKind::Block;
    }

    let t = text.trim();
    if DOCSTRING_PREFIXES.iter().any(|p| t.starts_with(p)) {
        return CommentKind::Docstring;
    }
    if LINE_PREFIXES.iter().any(|p| t.starts_with(p)) {
        return CommentKind::Line;
    }
    if BLOCK_PREFIXES.iter().any(|p| t.starts_with(p)) {
        return CommentKind::Block;
    }
    CommentKind::Line
}

pub fn classify_span(span: &RawSpan) -> CommentKind {
    classify(&span.text, &span.node_kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_wins_over_text() {
        assert_eq!(classify("/* looks like a block */", "line_comment"), CommentKind::Line);
        assert_eq!(classify("// looks like a line", "block_comment"), CommentKind::Block);
        assert_eq!(classify("/* kotlin */", "multiline_comment"), CommentKind::Block);
    }

    #[test]
    fn triple_quotes_are_docstrings() {
        assert_eq!(classify("\"\"\"Module doc.\"\"\"", "string"), CommentKind::Docstring);
        assert_eq!(classify("  '''single'''", "comment"), CommentKind::Docstring);
    }

    #[test]
    fn text_prefixes() {
        assert_eq!(classify("// x", "comment"), CommentKind::Line);
        assert_eq!(classify("# x", "comment"), CommentKind::Line);
        assert_eq!(classify("/* x */", "comment"), CommentKind::Block);
        assert_eq!(classify("<!-- x -->", "comment"), CommentKind::Block);
        assert_eq!(classify("-- x", "comment"), CommentKind::Block);
    }

    #[test]
    fn unknown_shape_defaults_to_line() {
        assert_eq!(classify("(* ocaml *)", "comment"), CommentKind::Line);
        assert_eq!(classify("; lisp", "comment"), CommentKind::Line);
    }
}
