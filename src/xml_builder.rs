use anyhow::Result;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use crate::models::CommentRecord;

fn write_raw<W: std::io::Write>(writer: &mut Writer<W>, raw: &str) -> Result<()> {
    writer.write_event(Event::Text(BytesText::from_escaped(raw)))?;
    Ok(())
}

/// Render one file's `<comments>` block:
///
/// ```text
/// <comments file="src/app.py">
/// 	<comment line-number="3"># the text</comment>
/// </comments>
/// ```
///
/// Comment bodies keep their exact text; only `<`, `>` and `&` are escaped.
/// Returns an empty string when `comments` is empty.
pub fn build_comments_xml(comments: &[CommentRecord], file_path: &str) -> Result<String> {
    if comments.is_empty() {
        return Ok(String::new());
    }

    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut root = BytesStart::new("comments");
    root.push_attribute(("file", file_path));
    writer.write_event(Event::Start(root))?;
    write_raw(&mut writer, "\n")?;

    for comment in comments {
        write_raw(&mut writer, "\t")?;

        let line = comment.line.to_string();
        let mut el = BytesStart::new("comment");
        el.push_attribute(("line-number", line.as_str()));
        writer.write_event(Event::Start(el))?;
        writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(&comment.text))))?;
        writer.write_event(Event::End(BytesEnd::new("comment")))?;

        write_raw(&mut writer, "\n")?;
    }

    writer.write_event(Event::End(BytesEnd::new("comments")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}
