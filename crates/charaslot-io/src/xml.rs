//! XML text form of synthesized element trees
//!
//! Only the two fixed document shapes are supported. Rendering is
//! pretty-printed with two-space indentation. Reading understands the title
//! table shape and rejects any element it does not know.

use crate::encoding::TextEncoding;
use crate::{Error, Result};
use charaslot_core::{Element, Node, TitleEntry, TitleTable};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use std::fmt;

const INDENT: &str = "  ";

const ROOT: &[u8] = b"xmsbt";
const ENTRY: &[u8] = b"entry";
const TITLE: &[u8] = b"title";
const LABEL: &[u8] = b"label";

/// Render a document with its prolog
pub fn render_document(root: &Element, encoding: TextEncoding) -> String {
    let mut output = format!(
        "<?xml version=\"1.0\" encoding=\"{}\"?>\n",
        encoding.label()
    );
    render_element(&mut output, root, 0);
    output
}

fn render_element(output: &mut String, element: &Element, depth: usize) {
    let pad = INDENT.repeat(depth);
    output.push_str(&pad);
    output.push('<');
    output.push_str(&element.name);
    for (key, value) in &element.attributes {
        output.push_str(&format!(" {}=\"{}\"", key, escape(value)));
    }

    let text_only = element.children.iter().all(|n| matches!(n, Node::Text(_)));
    let text = element.text();
    if text_only && text.is_empty() {
        output.push_str("/>");
        return;
    }
    output.push('>');

    if text_only {
        output.push_str(&escape(&text));
    } else {
        for child in &element.children {
            output.push('\n');
            match child {
                Node::Element(e) => render_element(output, e, depth + 1),
                Node::Text(t) => {
                    output.push_str(&INDENT.repeat(depth + 1));
                    output.push_str(&escape(t));
                }
            }
        }
        output.push('\n');
        output.push_str(&pad);
    }

    output.push_str(&format!("</{}>", element.name));
}

/// Escape text or attribute content
pub fn escape(text: &str) -> String {
    quick_xml::escape::escape(text).into_owned()
}

/// Parse the text of a persisted title table.
///
/// Comments, processing instructions and whitespace between elements are
/// skipped. Attributes other than `label` are ignored. Anything else that
/// is not `xmsbt > entry > title` fails with [`Error::Malformed`].
pub fn parse_title_table(text: &str) -> Result<TitleTable> {
    let mut reader = Reader::from_str(text);
    let mut entries = Vec::new();
    let mut seen_root = false;

    loop {
        match next(&mut reader)? {
            Event::Start(e) if e.name().as_ref() == ROOT && !seen_root => {
                seen_root = true;
                read_entries(&mut reader, &mut entries)?;
            }
            Event::Empty(e) if e.name().as_ref() == ROOT && !seen_root => seen_root = true,
            Event::Start(e) | Event::Empty(e) => {
                return Err(malformed(&reader, format_args!("unexpected <{}>", name(&e))))
            }
            Event::Text(t) => require_blank(&reader, &t)?,
            Event::CData(_) => return Err(malformed(&reader, "unexpected CDATA")),
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(Error::Malformed("missing <xmsbt> root".to_string()));
    }
    Ok(TitleTable::from_entries(entries))
}

fn read_entries(reader: &mut Reader<&[u8]>, entries: &mut Vec<TitleEntry>) -> Result<()> {
    loop {
        match next(reader)? {
            Event::Start(e) if e.name().as_ref() == ENTRY => {
                let label = label_of(reader, &e)?;
                let title = read_entry(reader)?;
                entries.push(TitleEntry::new(label, title));
            }
            Event::Empty(e) if e.name().as_ref() == ENTRY => {
                let label = label_of(reader, &e)?;
                entries.push(TitleEntry::new(label, String::new()));
            }
            Event::Start(e) | Event::Empty(e) => {
                return Err(malformed(reader, format_args!("unexpected <{}> in <xmsbt>", name(&e))))
            }
            Event::End(_) => return Ok(()),
            Event::Text(t) => require_blank(reader, &t)?,
            Event::CData(_) => return Err(malformed(reader, "unexpected CDATA in <xmsbt>")),
            Event::Eof => return Err(malformed(reader, "unclosed <xmsbt>")),
            _ => {}
        }
    }
}

fn read_entry(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut title = None;
    loop {
        match next(reader)? {
            Event::Start(e) if e.name().as_ref() == TITLE && title.is_none() => {
                title = Some(read_text(reader)?);
            }
            Event::Empty(e) if e.name().as_ref() == TITLE && title.is_none() => {
                title = Some(String::new());
            }
            Event::Start(e) | Event::Empty(e) => {
                return Err(malformed(reader, format_args!("unexpected <{}> in <entry>", name(&e))))
            }
            Event::End(_) => return Ok(title.unwrap_or_default()),
            Event::Text(t) => require_blank(reader, &t)?,
            Event::CData(_) => return Err(malformed(reader, "unexpected CDATA in <entry>")),
            Event::Eof => return Err(malformed(reader, "unclosed <entry>")),
            _ => {}
        }
    }
}

fn read_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut text = String::new();
    loop {
        match next(reader)? {
            Event::Text(t) => {
                let unescaped = t.unescape().map_err(|e| malformed(reader, e))?;
                text.push_str(&unescaped);
            }
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Start(e) | Event::Empty(e) => {
                return Err(malformed(reader, format_args!("unexpected <{}> in <title>", name(&e))))
            }
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(malformed(reader, "unclosed <title>")),
            _ => {}
        }
    }
}

fn label_of(reader: &Reader<&[u8]>, element: &BytesStart) -> Result<String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| malformed(reader, e))?;
        if attr.key.as_ref() == LABEL {
            let value = attr.unescape_value().map_err(|e| malformed(reader, e))?;
            return Ok(value.into_owned());
        }
    }
    Err(malformed(reader, "<entry> without a label"))
}

fn require_blank(reader: &Reader<&[u8]>, text: &BytesText) -> Result<()> {
    if text.iter().all(u8::is_ascii_whitespace) {
        Ok(())
    } else {
        Err(malformed(reader, "unexpected text"))
    }
}

fn next<'i>(reader: &mut Reader<&'i [u8]>) -> Result<Event<'i>> {
    let event = reader.read_event();
    event.map_err(|e| {
        Error::Malformed(format!("{} at byte {}", e, reader.error_position()))
    })
}

fn malformed(reader: &Reader<&[u8]>, what: impl fmt::Display) -> Error {
    Error::Malformed(format!("{} at byte {}", what, reader.buffer_position()))
}

fn name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use charaslot_core::synth;

    #[test]
    fn test_render_title_document() {
        let titles = TitleTable::from_entries([
            TitleEntry::new("ui_chr1_01_mario", "Mario"),
            TitleEntry::new("ui_chr2_01_mario", "MARIO"),
        ]);
        let text = render_document(&synth::title_tree(&titles), TextEncoding::Utf16Le);

        let expected = "<?xml version=\"1.0\" encoding=\"utf-16\"?>\n\
<xmsbt>\n\
\x20 <entry label=\"ui_chr1_01_mario\">\n\
\x20   <title>Mario</title>\n\
\x20 </entry>\n\
\x20 <entry label=\"ui_chr2_01_mario\">\n\
\x20   <title>MARIO</title>\n\
\x20 </entry>\n\
</xmsbt>";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_elements() {
        let titles = TitleTable::from_entries([TitleEntry::new("a", "")]);
        let text = render_document(&synth::title_tree(&titles), TextEncoding::Utf8);
        assert!(text.contains("<title/>"));

        let text = render_document(&synth::title_tree(&TitleTable::new()), TextEncoding::Utf8);
        assert!(text.ends_with("<xmsbt/>"));
    }

    #[test]
    fn test_escape() {
        let raw = r#"Tom & "Jerry" <'s>"#;
        assert_eq!(escape(raw), "Tom &amp; &quot;Jerry&quot; &lt;&apos;s&gt;");
    }

    #[test]
    fn test_parse_title_table() {
        let text = r#"<?xml version="1.0" encoding="utf-16"?>
<xmsbt>
  <entry label="ui_chr1_02_link">
    <title>Hero &amp; Legend</title>
  </entry>
  <entry label="ui_chr2_02_link">
    <title/>
  </entry>
</xmsbt>"#;

        let table = parse_title_table(text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("ui_chr1_02_link"), Some("Hero & Legend"));
        assert_eq!(table.get("ui_chr2_02_link"), Some(""));
    }

    #[test]
    fn test_parse_rendered_table() {
        let titles = TitleTable::from_entries([
            TitleEntry::new("ui_chr1_05_peach", "<Princess>"),
            TitleEntry::new("ui_chr2_05_peach", "<PRINCESS>"),
        ]);
        let text = render_document(&synth::title_tree(&titles), TextEncoding::Utf16Le);
        assert_eq!(parse_title_table(&text).unwrap(), titles);
    }

    #[test]
    fn test_parse_requires_root() {
        assert!(matches!(
            parse_title_table("<other/>"),
            Err(Error::Malformed(_))
        ));
        assert!(matches!(parse_title_table(""), Err(Error::Malformed(_))));
        assert!(parse_title_table("<xmsbt/>").unwrap().is_empty());
    }

    #[test]
    fn test_parse_hand_edited_table() {
        let text = r#"<?xml version="1.0" encoding="utf-16"?>
<xmsbt>
  <!-- <entry label="ui_chr1_03_mario"><title>Old</title></entry> -->
  <entry label='ui_chr1_02_luigi'>
    <title>Green</title>
  </entry>
  <entry label="ui_chr2_02_luigi" extra="1">
    <title lang="en">GREEN</title>
  </entry>
  <entry label="ui_chr1_04_link"/>
  <entry label="ui_chr1_05_kirby"><title><![CDATA[<Pink>]]></title></entry>
</xmsbt>"#;

        let table = parse_title_table(text).unwrap();
        let labels: Vec<&str> = table.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["ui_chr1_02_luigi", "ui_chr2_02_luigi", "ui_chr1_04_link", "ui_chr1_05_kirby"]
        );
        assert_eq!(table.get("ui_chr2_02_luigi"), Some("GREEN"));
        assert_eq!(table.get("ui_chr1_04_link"), Some(""));
        assert_eq!(table.get("ui_chr1_05_kirby"), Some("<Pink>"));
    }

    #[test]
    fn test_parse_keeps_title_whitespace() {
        let table =
            parse_title_table(r#"<xmsbt><entry label="a"><title> A  b </title></entry></xmsbt>"#)
                .unwrap();
        assert_eq!(table.get("a"), Some(" A  b "));
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        let cases = [
            r#"<xmsbt><item label="a"/></xmsbt>"#,
            r#"<xmsbt><entry><title>x</title></entry></xmsbt>"#,
            r#"<xmsbt><entry label="a"><name>x</name></entry></xmsbt>"#,
            r#"<xmsbt><entry label="a"><title>x</title><title>y</title></entry></xmsbt>"#,
            r#"<xmsbt><entry label="a"><title><b>x</b></title></entry></xmsbt>"#,
            r#"<xmsbt>loose text</xmsbt>"#,
            r#"<xmsbt><entry label="a"><title>x</entry></xmsbt>"#,
            r#"<xmsbt><entry label="a"><title>x</title></entry>"#,
            r#"<xmsbt/><xmsbt/>"#,
        ];
        for text in cases {
            assert!(
                matches!(parse_title_table(text), Err(Error::Malformed(_))),
                "accepted {text}"
            );
        }
    }
}
