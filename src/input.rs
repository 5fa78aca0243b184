use serde::Deserialize;
use std::path::Path;

use crate::diff::EditPair;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EditInput {
    pub old_string: String,
    pub new_string: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolInput {
    pub file_path: String,
    pub content: String,
    pub old_string: String,
    pub new_string: String,
    pub edits: Vec<EditInput>,
}

/// The JSON record a coding agent's hook runner sends on stdin.
/// Unknown fields are ignored; missing ones default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HookInput {
    pub session_id: String,
    pub tool_name: String,
    pub transcript_path: String,
    pub cwd: String,
    pub hook_event_name: String,
    pub tool_input: ToolInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Whole-file write.
    Write,
    /// One in-place `(old, new)` replacement.
    Edit,
    /// Several independent replacements in one file.
    MultiEdit,
    Unknown,
}

impl ToolKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Write" => ToolKind::Write,
            "Edit" => ToolKind::Edit,
            "MultiEdit" => ToolKind::MultiEdit,
            _ => ToolKind::Unknown,
        }
    }
}

impl HookInput {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn tool(&self) -> ToolKind {
        ToolKind::from_name(&self.tool_name)
    }

    /// Full snapshot to check for write-style tools: `content` for `Write`,
    /// otherwise `content` if present, else `new_string`.
    pub fn snapshot(&self) -> &str {
        let ti = &self.tool_input;
        match self.tool() {
            ToolKind::Write => ti.content.as_str(),
            _ if !ti.content.is_empty() => ti.content.as_str(),
            _ => ti.new_string.as_str(),
        }
    }

    pub fn edit_pairs(&self) -> Vec<EditPair<'_>> {
        self.tool_input
            .edits
            .iter()
            .map(|e| EditPair {
                old_text: &e.old_string,
                new_text: &e.new_string,
            })
            .collect()
    }
}

/// Read a file as text. Invalid UTF-8 is decoded as Latin-1 (every byte maps to
/// the code point of the same value). Unreadable or missing files read as empty.
pub fn read_file(path: &Path) -> String {
    let Ok(bytes) = std::fs::read(path) else {
        return String::new();
    };
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_write_input() {
        let raw = r#"{"session_id":"s","tool_name":"Write","cwd":"/tmp","tool_input":{"file_path":"a.py","content":"print(1)"},"tool_response":{"ok":true}}"#;
        let input = HookInput::from_json(raw).unwrap();
        assert_eq!(input.tool(), ToolKind::Write);
        assert_eq!(input.tool_input.file_path, "a.py");
        assert_eq!(input.snapshot(), "print(1)");
        assert_eq!(input.cwd, "/tmp");
    }

    #[test]
    fn parses_multi_edit_input() {
        let raw = r#"{"tool_name":"MultiEdit","tool_input":{"file_path":"a.py","edits":[{"old_string":"a","new_string":"b"},{"new_string":"c"}]}}"#;
        let input = HookInput::from_json(raw).unwrap();
        assert_eq!(input.tool(), ToolKind::MultiEdit);
        let pairs = input.edit_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].old_text, "");
        assert_eq!(pairs[1].new_text, "c");
    }

    #[test]
    fn unknown_tool_prefers_content_then_new_string() {
        let with_content = HookInput::from_json(r#"{"tool_name":"Patch","tool_input":{"content":"A","new_string":"B"}}"#).unwrap();
        assert_eq!(with_content.tool(), ToolKind::Unknown);
        assert_eq!(with_content.snapshot(), "A");

        let without = HookInput::from_json(r#"{"tool_name":"Patch","tool_input":{"new_string":"B"}}"#).unwrap();
        assert_eq!(without.snapshot(), "B");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(HookInput::from_json("{not json").is_err());
    }

    #[test]
    fn read_file_utf8() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("a.py");
        std::fs::write(&p, "# héllo\n").unwrap();
        assert_eq!(read_file(&p), "# héllo\n");
    }

    #[test]
    fn read_file_latin1_fallback() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("a.py");
        // "# caf\xe9" in ISO-8859-1
        std::fs::write(&p, [b'#', b' ', b'c', b'a', b'f', 0xE9]).unwrap();
        assert_eq!(read_file(&p), "# café");
    }

    #[test]
    fn read_file_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_file(&tmp.path().join("nope.py")), "");
    }
}
