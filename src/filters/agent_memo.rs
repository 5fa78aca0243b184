//! Narrative "what I just changed" comments.
//!
//! This is a tag, not a drop: matching comments stay in the report and
//! additionally trigger the escalated memo warning. It only ever sees
//! records that already survived the filter chain.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::CommentRecord;

/// Leading markers removed (in sequence, each at most once) before matching.
const MARKERS: &[&str] = &["#", "//", "/*", "--", "*"];

fn memo_regexes() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        [
            // English: change narration anchored at the start of the comment body.
            r"(?i)^[\s#/*-]*changed?\s+(from|to)\b",
            r"(?i)^[\s#/*-]*modified?\s+(from|to)?\b",
            r"(?i)^[\s#/*-]*updated?\s+(from|to)?\b",
            r"(?i)^[\s#/*-]*refactor(ed|ing)?\b",
            r"(?i)^[\s#/*-]*moved?\s+(from|to)\b",
            r"(?i)^[\s#/*-]*renamed?\s+(from|to)?\b",
            r"(?i)^[\s#/*-]*replaced?\b",
            r"(?i)^[\s#/*-]*removed?\b",
            r"(?i)^[\s#/*-]*deleted?\b",
            r"(?i)^[\s#/*-]*added?\b",
            r"(?i)^[\s#/*-]*implemented?\b",
            r"(?i)^[\s#/*-]*this\s+(implements?|adds?|removes?|changes?|fixes?)\b",
            r"(?i)^[\s#/*-]*here\s+we\b",
            r"(?i)^[\s#/*-]*now\s+(we|this|it)\b",
            r"(?i)^[\s#/*-]*previously\b",
            r"(?i)^[\s#/*-]*before\s+this\b",
            r"(?i)^[\s#/*-]*after\s+this\b",
            r"(?i)^[\s#/*-]*was\s+changed\b",
            r"(?i)^[\s#/*-]*implementation\s+(of|note)\b",
            r"(?i)^[\s#/*-]*note:\s*\w",
            r"(?i)^[\s#/*-]*[a-z]+\s*->\s*[a-z]+",
            r"(?i)^[\s#/*-]*converted?\s+(from|to)\b",
            r"(?i)^[\s#/*-]*migrated?\s+(from|to)?\b",
            r"(?i)^[\s#/*-]*switched?\s+(from|to)\b",
            // Korean: topic markers and past-tense change verbs, anywhere in the body.
            r"여기(서|에서)\s*",
            r"(으로|로)\s*(바뀜|변경|변환)",
            r"구현(임|함|했|된|됨)",
            r"추가(함|했|된|됨)",
            r"삭제(함|했|된|됨)",
            r"수정(함|했|된|됨)",
            r"변경(함|했|된|됨)",
            r"리팩(터|토)링",
            r"이전(에는|엔)",
            r"기존(에는|엔|의)",
            r"에서\s+\S+\s*(으로|로)\b",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

fn strip_markers(text: &str) -> &str {
    let mut rest = text.trim();
    for m in MARKERS {
        if let Some(r) = rest.strip_prefix(*m) {
            rest = r.trim();
        }
    }
    rest
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AgentMemoFilter;

impl AgentMemoFilter {
    pub fn is_agent_memo(&self, comment: &CommentRecord) -> bool {
        is_memo_text(&comment.text)
    }

    /// Records in `comments` tagged as agent memos, in input order.
    pub fn tagged<'a>(&self, comments: &'a [CommentRecord]) -> Vec<&'a CommentRecord> {
        comments.iter().filter(|c| self.is_agent_memo(c)).collect()
    }
}

pub fn is_memo_text(text: &str) -> bool {
    let body = strip_markers(text);
    memo_regexes().iter().any(|re| re.is_match(body))
}
