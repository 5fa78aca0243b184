//! End-to-end pipeline for one edit: pick the text to inspect, extract comments,
//! keep the new ones, filter, render.
//!
//! Every failure mode ends in `Outcome::Skip` or `Outcome::Pass`. Only surviving
//! comments produce `Outcome::Block`.

use crate::config::Config;
use crate::detector;
use crate::diff;
use crate::filters::FilterChain;
use crate::formatter::format_hook_message;
use crate::input::{HookInput, ToolKind};
use crate::language;
use crate::models::CommentRecord;

pub const EXIT_PASS: i32 = 0;
pub const EXIT_BLOCK: i32 = 2;

pub const LOG_PREFIX: &str = "[comment-checker]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoInput,
    InvalidInput,
    NoFilePath,
    NonCodeFile,
    NoContent,
    RenderFailed,
}

impl SkipReason {
    pub fn message(self) -> &'static str {
        match self {
            SkipReason::NoInput => "No input provided",
            SkipReason::InvalidInput => "Invalid input format",
            SkipReason::NoFilePath => "No file path provided",
            SkipReason::NonCodeFile => "Non-code file",
            SkipReason::NoContent => "No content to check",
            SkipReason::RenderFailed => "Failed to render report",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skip(SkipReason),
    Pass,
    Block {
        message: String,
        comments: Vec<CommentRecord>,
    },
}

impl Outcome {
    pub fn is_block(&self) -> bool {
        matches!(self, Outcome::Block { .. })
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_block() {
            EXIT_BLOCK
        } else {
            EXIT_PASS
        }
    }

    /// Text for stderr: a one-line status, or the full report when blocking.
    pub fn render(&self) -> String {
        match self {
            Outcome::Skip(reason) => format!("{LOG_PREFIX} Skipping: {}\n", reason.message()),
            Outcome::Pass => format!("{LOG_PREFIX} Success: No problematic comments/docstrings found\n"),
            Outcome::Block { message, .. } => message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    pub include_docstrings: bool,
    pub suppress_docstrings: bool,
    pub custom_prompt: Option<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for CheckOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            include_docstrings: cfg.include_docstrings,
            suppress_docstrings: cfg.suppress_docstrings,
            custom_prompt: cfg.custom_prompt.clone(),
        }
    }
}

/// Decode the raw hook record, classifying empty and malformed input.
pub fn parse_hook_input(raw: &str) -> Result<HookInput, SkipReason> {
    if raw.trim().is_empty() {
        return Err(SkipReason::NoInput);
    }
    HookInput::from_json(raw).map_err(|e| {
        debug_log!("{LOG_PREFIX} invalid hook input: {e}");
        SkipReason::InvalidInput
    })
}

/// Same as [`parse_hook_input`] for raw bytes. Bytes that are not UTF-8 are
/// malformed input, not missing input.
pub fn parse_hook_bytes(raw: &[u8]) -> Result<HookInput, SkipReason> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(SkipReason::NoInput);
    }
    let text = std::str::from_utf8(raw).map_err(|e| {
        debug_log!("{LOG_PREFIX} hook input is not UTF-8: {e}");
        SkipReason::InvalidInput
    })?;
    parse_hook_input(text)
}

pub struct Checker {
    options: CheckOptions,
    chain: FilterChain,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(CheckOptions::default())
    }
}

impl Checker {
    pub fn new(options: CheckOptions) -> Self {
        let chain = FilterChain::for_policy(options.suppress_docstrings);
        Self { options, chain }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    pub fn check_raw(&self, raw: &str) -> Outcome {
        match parse_hook_input(raw) {
            Ok(input) => self.check_input(&input),
            Err(reason) => Outcome::Skip(reason),
        }
    }

    pub fn check_input(&self, input: &HookInput) -> Outcome {
        let file_path = input.tool_input.file_path.as_str();
        if file_path.is_empty() {
            return Outcome::Skip(SkipReason::NoFilePath);
        }
        if !language::is_supported(file_path) {
            return Outcome::Skip(SkipReason::NonCodeFile);
        }

        let include = self.options.include_docstrings;
        let comments = match input.tool() {
            ToolKind::Edit => {
                let ti = &input.tool_input;
                if ti.new_string.is_empty() {
                    return Outcome::Skip(SkipReason::NoContent);
                }
                diff::new_comments_for_edit(&ti.old_string, &ti.new_string, file_path, include)
            }
            ToolKind::MultiEdit => {
                if input.tool_input.edits.is_empty() {
                    return Outcome::Skip(SkipReason::NoContent);
                }
                diff::new_comments_for_batch(&input.edit_pairs(), file_path, include)
            }
            ToolKind::Write | ToolKind::Unknown => {
                let content = input.snapshot();
                if content.is_empty() {
                    return Outcome::Skip(SkipReason::NoContent);
                }
                detector::detect(content, file_path, include)
            }
        };

        self.finish(comments)
    }

    /// Check a full snapshot of `file_path`, as a whole-file write would.
    pub fn check_content(&self, content: &str, file_path: &str) -> Outcome {
        if file_path.is_empty() {
            return Outcome::Skip(SkipReason::NoFilePath);
        }
        if !language::is_supported(file_path) {
            return Outcome::Skip(SkipReason::NonCodeFile);
        }
        if content.is_empty() {
            return Outcome::Skip(SkipReason::NoContent);
        }
        self.finish(detector::detect(content, file_path, self.options.include_docstrings))
    }

    fn finish(&self, comments: Vec<CommentRecord>) -> Outcome {
        if comments.is_empty() {
            return Outcome::Pass;
        }

        let survivors = self.chain.apply(comments);
        if survivors.is_empty() {
            return Outcome::Pass;
        }

        match format_hook_message(&survivors, self.options.custom_prompt.as_deref()) {
            Ok(message) if !message.is_empty() => Outcome::Block {
                message,
                comments: survivors,
            },
            Ok(_) => Outcome::Pass,
            Err(e) => {
                debug_log!("{LOG_PREFIX} report rendering failed: {e:#}");
                Outcome::Skip(SkipReason::RenderFailed)
            }
        }
    }
}
