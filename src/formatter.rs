use anyhow::Result;
use std::collections::HashMap;
use std::fmt::Write as _;

use crate::filters::AgentMemoFilter;
use crate::models::CommentRecord;
use crate::xml_builder::build_comments_xml;

/// Placeholder substituted with the rendered `<comments>` blocks in a custom prompt.
pub const COMMENTS_PLACEHOLDER: &str = "{{comments}}";

pub const HEADER: &str = "COMMENT/DOCSTRING DETECTED - IMMEDIATE ACTION REQUIRED";
pub const MEMO_HEADER: &str = "AGENT MEMO COMMENT DETECTED - CODE SMELL ALERT";

const MEMO_SECTION: &str = "\
AGENT MEMO COMMENTS ARE A CODE SMELL

Some of the comments below narrate WHAT you changed or HOW you got there
instead of describing what the code does now. They read like notes an agent
leaves for itself.

Typical shapes:
  - \"Changed from X to Y\", \"Modified to ...\", \"Updated from ...\"
  - \"Added ...\", \"Removed ...\", \"Refactored ...\"
  - \"This implements ...\", \"Here we ...\", \"Now this ...\"
  - \"Note: ...\", \"Implementation of ...\", \"old -> new\"
  - Korean: \"여기서 변경됨\", \"구현함\", \"추가함\", \"수정됨\"

Why they hurt:
  1. They go stale the moment the next edit lands.
  2. Version control already records what changed; the comment duplicates it badly.
  3. If the code needs a changelog to be understood, the code is not clear yet.

Do this:
  -> Delete every memo comment listed here.
  -> If something still needs explaining, make names and structure carry it.
  -> Put the \"what changed and why\" in the commit message.

";

const GUIDELINES: &str = "\
Your latest edit introduced comments or docstrings, which triggered this check.
Act on it now, following the rules below in priority order.

Do not ignore this message, even if it repeats. Every occurrence needs an
explanation or an action.

PRIORITY-ORDERED GUIDELINES:

1. The comment/docstring existed before this edit
\t-> Tell the user it is pre-existing and continue.

2. The comment is new but is a structural test marker (given / when / then, arrange / act / assert)
\t-> Tell the user it is a test-structure marker and continue.
\t-> Applies to comments only, never to docstrings.

3. The comment/docstring is new and genuinely necessary
\t-> Tell the user why it is necessary and continue.
\t-> Necessary comments: non-obvious algorithms, security constraints, performance tricks, regexes, math.
\t-> Necessary docstrings: public API contracts, complex module or type interfaces.
\t-> Most docstrings on self-explanatory code are not necessary.

4. The comment/docstring is new and unnecessary
\t-> Apologize to the user and remove it.
\t-> Make the code clear enough to stand without it.

This applies to every future edit as well, not only this one: add comments deliberately and rarely.

Detected comments/docstrings:
";

/// Group by file, keeping first-seen file order and per-file detection order.
pub fn group_by_file(comments: &[CommentRecord]) -> Vec<(String, Vec<CommentRecord>)> {
    let mut order: Vec<(String, Vec<CommentRecord>)> = Vec::new();
    let mut idx: HashMap<&str, usize> = HashMap::new();

    for c in comments {
        match idx.get(c.file_path.as_str()) {
            Some(&i) => order[i].1.push(c.clone()),
            None => {
                idx.insert(c.file_path.as_str(), order.len());
                order.push((c.file_path.clone(), vec![c.clone()]));
            }
        }
    }

    order
}

/// All per-file `<comments>` blocks, each followed by a newline.
pub fn render_comment_blocks(comments: &[CommentRecord]) -> Result<String> {
    let mut out = String::new();
    for (path, group) in group_by_file(comments) {
        out.push_str(&build_comments_xml(&group, &path)?);
        out.push('\n');
    }
    Ok(out)
}

/// Render the block report for surviving comments.
///
/// Empty input means "nothing to report" and yields an empty string.
/// With `custom_prompt`, the prompt replaces the whole template and only
/// `{{comments}}` is substituted.
pub fn format_hook_message(comments: &[CommentRecord], custom_prompt: Option<&str>) -> Result<String> {
    if comments.is_empty() {
        return Ok(String::new());
    }

    let blocks = render_comment_blocks(comments)?;

    if let Some(prompt) = custom_prompt.filter(|p| !p.trim().is_empty()) {
        return Ok(prompt.replace(COMMENTS_PLACEHOLDER, &blocks));
    }

    let memos = AgentMemoFilter.tagged(comments);

    let mut sb = String::new();
    if memos.is_empty() {
        sb.push_str(HEADER);
        sb.push_str("\n\n");
    } else {
        sb.push_str(MEMO_HEADER);
        sb.push_str("\n\n");
        sb.push_str(MEMO_SECTION);
        sb.push_str("Detected agent memo comments:\n");
        for memo in &memos {
            writeln!(sb, "  - Line {}: {}", memo.line, memo.text.trim())?;
        }
        sb.push_str("\n---\n\n");
    }

    sb.push_str(GUIDELINES);
    sb.push_str(&blocks);
    Ok(sb)
}
