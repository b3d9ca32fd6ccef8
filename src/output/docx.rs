//! DOCX output
//!
//! Writes a minimal WordprocessingML package: one heading in the `Title` style
//! followed by one paragraph per rendered line.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::tree::Inventory;

use super::config::DocumentConfig;
use super::format::ReportWriter;
use super::render::render_lines;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:rPr><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:spacing w:after="240"/></w:pPr><w:rPr><w:b/><w:sz w:val="52"/></w:rPr></w:style></w:styles>"#;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Writes rendered lines as paragraphs of a Word document.
#[derive(Debug, Default, Clone)]
pub struct DocxWriter {
    config: DocumentConfig,
}

impl DocxWriter {
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }

    /// Write the complete package to `out`, returning it once finished.
    pub fn write_to<W: Write + Seek>(&self, inventory: &Inventory, out: W) -> Result<W> {
        let body = self.document_xml(inventory)?;

        let options = SimpleFileOptions::default();
        let mut zip = ZipWriter::new(out);
        for (name, content) in [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS.as_bytes()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
            ("word/styles.xml", STYLES.as_bytes()),
            ("word/document.xml", body.as_slice()),
        ] {
            zip.start_file(name, options)?;
            zip.write_all(content)?;
        }
        Ok(zip.finish()?)
    }

    /// Build `word/document.xml`: the heading, then one paragraph per line.
    fn document_xml(&self, inventory: &Inventory) -> Result<Vec<u8>> {
        let mut xml = Writer::new(Vec::new());
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        xml.write_event(Event::Start(
            BytesStart::new("w:document").with_attributes([("xmlns:w", WORDML_NS)]),
        ))?;
        xml.write_event(Event::Start(BytesStart::new("w:body")))?;

        write_paragraph(&mut xml, &self.config.heading, Some("Title"))?;
        for line in render_lines(inventory, &self.config.render) {
            write_paragraph(&mut xml, &line, None)?;
        }

        xml.write_event(Event::Empty(BytesStart::new("w:sectPr")))?;
        xml.write_event(Event::End(BytesEnd::new("w:body")))?;
        xml.write_event(Event::End(BytesEnd::new("w:document")))?;
        Ok(xml.into_inner())
    }
}

impl ReportWriter for DocxWriter {
    fn save(&self, inventory: &Inventory, target: &Path) -> Result<()> {
        let file = File::create(target)?;
        let mut out = self.write_to(inventory, BufWriter::new(file))?;
        out.flush()?;
        Ok(())
    }
}

fn write_paragraph<W: Write>(xml: &mut Writer<W>, text: &str, style: Option<&str>) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:p")))?;
    if let Some(style) = style {
        xml.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        xml.write_event(Event::Empty(
            BytesStart::new("w:pStyle").with_attributes([("w:val", style)]),
        ))?;
        xml.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }
    xml.write_event(Event::Start(BytesStart::new("w:r")))?;
    xml.write_event(Event::Start(
        BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
    ))?;
    let text = xml_chars(text);
    xml.write_event(Event::Text(BytesText::new(&text)))?;
    xml.write_event(Event::End(BytesEnd::new("w:t")))?;
    xml.write_event(Event::End(BytesEnd::new("w:r")))?;
    xml.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

/// Drop characters outside the XML 1.0 `Char` production. Escaping itself is
/// left to `BytesText`.
fn xml_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| match c {
            '\t' | '\n' | '\r' => true,
            '\u{FFFE}' | '\u{FFFF}' => false,
            c => c >= ' ',
        })
        .collect()
}
