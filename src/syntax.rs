//! Thin layer over tree-sitter: parse a snapshot, run a comment/docstring query,
//! hand back plain spans.
//!
//! Every failure here (grammar missing, parse aborted, query does not compile,
//! span is not valid UTF-8) degrades to "nothing found". Callers never see an error.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tree_sitter::{Parser, Query, QueryCursor, StreamingIterator, Tree};

use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuerySlot {
    Comment,
    Docstring,
}

/// One captured node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan {
    pub text: String,
    /// 1-indexed.
    pub start_line: usize,
    pub node_kind: String,
}

type QueryCache = Mutex<HashMap<(Language, QuerySlot), Option<Arc<Query>>>>;

fn query_cache() -> &'static QueryCache {
    static CACHE: OnceLock<QueryCache> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn compile_query(grammar: &tree_sitter::Language, pattern: &str) -> Result<Query> {
    Query::new(grammar, pattern).context("Failed to compile tree-sitter query")
}

/// Compiled query for `(lang, slot)`, built on first use and shared read-only afterwards.
///
/// Comment patterns are tried in preference order and the first one the grammar
/// accepts wins. A slot where nothing compiles is remembered as absent so it is not retried.
pub fn cached_query(lang: Language, slot: QuerySlot) -> Option<Arc<Query>> {
    let patterns: &[&str] = match slot {
        QuerySlot::Comment => lang.comment_queries(),
        QuerySlot::Docstring => lang.entry().docstring_query.as_slice(),
    };

    // A poisoned lock only means another thread panicked mid-insert; the map is still usable.
    let mut cache = query_cache().lock().unwrap_or_else(|p| p.into_inner());
    if let Some(hit) = cache.get(&(lang, slot)) {
        return hit.clone();
    }

    let compiled = lang.grammar().and_then(|grammar| {
        patterns.iter().find_map(|pattern| match compile_query(&grammar, pattern) {
            Ok(q) => Some(Arc::new(q)),
            Err(e) => {
                debug_log!("[comment-checker] {} {:?} query: {e:#}", lang.name(), slot);
                None
            }
        })
    });
    cache.insert((lang, slot), compiled.clone());
    compiled
}

/// Compile every query for every compiled-in grammar up front.
/// Returns how many queries are usable.
pub fn warm_up() -> usize {
    let mut ready = 0;
    for lang in Language::all().filter(|l| l.is_compiled_in()) {
        for slot in [QuerySlot::Comment, QuerySlot::Docstring] {
            if cached_query(lang, slot).is_some() {
                ready += 1;
            }
        }
    }
    ready
}

pub fn parse(lang: Language, source: &str) -> Option<Tree> {
    let grammar = lang.grammar()?;
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&grammar) {
        debug_log!("[comment-checker] set_language({}) failed: {e}", lang.name());
        return None;
    }
    let tree = parser.parse(source, None);
    if tree.is_none() {
        debug_log!("[comment-checker] {} parse returned no tree", lang.name());
    }
    tree
}

/// Run `query` over `tree` and collect every capture in match order.
pub fn run_query(tree: &Tree, source: &str, query: &Query) -> Vec<RawSpan> {
    let bytes = source.as_bytes();
    let mut cursor = QueryCursor::new();
    let mut out: Vec<RawSpan> = Vec::new();

    let mut matches = cursor.matches(query, tree.root_node(), bytes);
    while let Some(m) = matches.next() {
        for cap in m.captures {
            let node = cap.node;
            let Ok(text) = node.utf8_text(bytes) else { continue };
            if text.is_empty() {
                continue;
            }
            out.push(RawSpan {
                text: text.to_string(),
                start_line: node.start_position().row + 1,
                node_kind: node.kind().to_string(),
            });
        }
    }

    out
}

/// Run the cached query for `slot`; empty when the language has no such query.
pub fn query_spans(lang: Language, tree: &Tree, source: &str, slot: QuerySlot) -> Vec<RawSpan> {
    match cached_query(lang, slot) {
        Some(query) => run_query(tree, source, &query),
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_comment_spans_carry_line_and_kind() {
        let src = "x = 1\n# hello\ny = 2\n";
        let tree = parse(Language::Python, src).unwrap();
        let spans = query_spans(Language::Python, &tree, src, QuerySlot::Comment);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "# hello");
        assert_eq!(spans[0].start_line, 2);
        assert_eq!(spans[0].node_kind, "comment");
    }

    #[test]
    fn rust_uses_dedicated_node_kinds() {
        let src = "// a\nfn main() {}\n/* b */\n";
        let tree = parse(Language::Rust, src).unwrap();
        let spans = query_spans(Language::Rust, &tree, src, QuerySlot::Comment);
        let kinds: Vec<&str> = spans.iter().map(|s| s.node_kind.as_str()).collect();
        assert_eq!(kinds, vec!["line_comment", "block_comment"]);
    }

    #[test]
    fn missing_docstring_query_yields_nothing() {
        let src = "/// doc\nfn main() {}\n";
        let tree = parse(Language::Rust, src).unwrap();
        assert!(cached_query(Language::Rust, QuerySlot::Docstring).is_none());
        assert!(query_spans(Language::Rust, &tree, src, QuerySlot::Docstring).is_empty());
    }

    #[test]
    fn queries_are_shared_after_first_compile() {
        let a = cached_query(Language::Python, QuerySlot::Comment).unwrap();
        let b = cached_query(Language::Python, QuerySlot::Comment).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn warm_up_compiles_core_languages() {
        // python, javascript, typescript, tsx: comment + docstring; rust: comment only
        assert!(warm_up() >= 9);
    }

    #[test]
    fn first_compiling_pattern_wins() {
        // Python has no `line_comment` node, so only the generic pattern compiles.
        let grammar = Language::Python.grammar().unwrap();
        let candidates = ["(line_comment) @comment", "(comment) @comment"];
        let picked = candidates.iter().position(|p| compile_query(&grammar, p).is_ok());
        assert_eq!(picked, Some(1));
    }

    #[cfg(feature = "lang-kotlin")]
    #[test]
    fn kotlin_block_comment_is_captured() {
        let src = "/* x */
val a = 1
// y
";
        let tree = parse(Language::Kotlin, src).unwrap();
        let spans = query_spans(Language::Kotlin, &tree, src, QuerySlot::Comment);
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["/* x */", "// y"]);
    }

    #[test]
    fn malformed_source_still_parses() {
        let src = "def broken(:\n    # still a comment\n";
        let tree = parse(Language::Python, src).unwrap();
        let spans = query_spans(Language::Python, &tree, src, QuerySlot::Comment);
        assert!(spans.iter().any(|s| s.text == "# still a comment"));
    }
}
