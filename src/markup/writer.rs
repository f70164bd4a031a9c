use std::io::{self, Write};

use crate::markup::document::{Document, Element, ElementId};

/// Layout of the XML text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// One element per line, two-space indentation.
    #[default]
    Pretty,
    /// No whitespace between elements.
    Compact,
}

impl Document {
    /// Write the document as UTF-8 XML.
    pub fn write_xml<W: Write>(&self, mut w: W, format: Format) -> io::Result<()> {
        w.write_all(b"<?xml version=\"1.0\" encoding=\"utf-8\"?>\n")?;
        self.write_element(&mut w, ElementId(0), 0, format)?;
        w.write_all(b"\n")?;
        w.flush()
    }

    /// Render the document to a string.
    pub fn to_xml_string(&self, format: Format) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_xml(&mut buf, format);
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn write_element<W: Write>(
        &self,
        w: &mut W,
        id: ElementId,
        depth: usize,
        format: Format,
    ) -> io::Result<()> {
        let Some(el) = self.element(id) else {
            return Ok(());
        };
        if format == Format::Pretty {
            indent(w, depth)?;
        }
        write!(w, "<{}", el.name())?;
        write_attrs(w, el)?;

        match (el.text(), el.children().is_empty()) {
            (None, true) => w.write_all(b"/>")?,
            (text, true) => {
                write!(w, ">{}</{}>", escape_text(text.unwrap_or("")), el.name())?;
            }
            (text, false) => {
                w.write_all(b">")?;
                if let Some(text) = text {
                    w.write_all(escape_text(text).as_bytes())?;
                }
                for &child in el.children() {
                    if format == Format::Pretty {
                        w.write_all(b"\n")?;
                    }
                    self.write_element(w, child, depth + 1, format)?;
                }
                if format == Format::Pretty {
                    w.write_all(b"\n")?;
                    indent(w, depth)?;
                }
                write!(w, "</{}>", el.name())?;
            }
        }
        Ok(())
    }
}

fn write_attrs<W: Write>(w: &mut W, el: &Element) -> io::Result<()> {
    for (k, v) in el.attrs() {
        write!(w, " {k}=\"{}\"", escape_attr(v))?;
    }
    Ok(())
}

fn indent<W: Write>(w: &mut W, depth: usize) -> io::Result<()> {
    for _ in 0..depth {
        w.write_all(b"  ")?;
    }
    Ok(())
}

/// Escape `&`, `<` and `>` for text content. Characters XML 1.0 forbids are dropped.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().filter(|&c| is_xml_char(c)) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape markup and quote characters for attribute values. Characters XML 1.0 forbids
/// are dropped.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().filter(|&c| is_xml_char(c)) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
    out
}

// Char production of XML 1.0; `char` already excludes surrogates.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
#[path = "../../tests/unit/markup/writer.rs"]
mod tests;
