//! DOCX paragraph extraction
//!
//! A .docx file is a zip archive; the body text lives in
//! `word/document.xml` as `<w:p>` paragraphs made of `<w:t>` runs.

use crate::ExtractError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use tracing::debug;

const DOCUMENT_XML: &str = "word/document.xml";

/// Text of every non-empty paragraph, in document order
pub fn extract_paragraphs(docx_bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let xml = read_document_xml(docx_bytes)?;
    let paragraphs = paragraphs_from_xml(&xml)?;
    debug!(paragraphs = paragraphs.len(), "docx paragraphs extracted");
    Ok(paragraphs)
}

/// Extract the whole document as one newline-joined string
pub fn extract_text(docx_bytes: &[u8]) -> Result<String, ExtractError> {
    Ok(extract_paragraphs(docx_bytes)?.join("\n"))
}

fn read_document_xml(docx_bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx_bytes))
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut entry = archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| ExtractError::Docx(format!("{DOCUMENT_XML}: {e}")))?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => push_paragraph(&mut paragraphs, &mut current),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                // <w:p/> is an empty paragraph
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t.unescape().map_err(|e| ExtractError::Xml(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::Xml(format!(
                    "at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }

    Ok(paragraphs)
}

fn push_paragraph(paragraphs: &mut Vec<String>, current: &mut String) {
    if !current.trim().is_empty() {
        paragraphs.push(std::mem::take(current));
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn make_docx(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer
                .start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    #[test]
    fn test_paragraphs_joined_from_runs() {
        let xml = document(
            "<w:p><w:r><w:t>LOG OF BORING </w:t></w:r><w:r><w:t>GEO-001</w:t></w:r></w:p>\
             <w:p><w:r><w:t xml:space=\"preserve\">Auger refusal at 6.5 ft</w:t></w:r></w:p>",
        );
        let bytes = make_docx(&[("word/document.xml", xml.as_str())]);

        assert_eq!(
            extract_paragraphs(&bytes).unwrap(),
            vec!["LOG OF BORING GEO-001", "Auger refusal at 6.5 ft"]
        );
        assert_eq!(
            extract_text(&bytes).unwrap(),
            "LOG OF BORING GEO-001\nAuger refusal at 6.5 ft"
        );
    }

    #[test]
    fn test_empty_paragraphs_are_dropped() {
        let xml = document(
            "<w:p/><w:p><w:r><w:t>  </w:t></w:r></w:p><w:p><w:r><w:t>CL</w:t></w:r></w:p>",
        );
        let bytes = make_docx(&[("word/document.xml", xml.as_str())]);
        assert_eq!(extract_paragraphs(&bytes).unwrap(), vec!["CL"]);
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let xml = document(
            "<w:p><w:r><w:t>GEO-101</w:t><w:tab/><w:t>2.5 ft</w:t><w:br/>\
             <w:t>depth &lt; 5 ft</w:t></w:r></w:p>",
        );
        let bytes = make_docx(&[("word/document.xml", xml.as_str())]);
        assert_eq!(
            extract_paragraphs(&bytes).unwrap(),
            vec!["GEO-101\t2.5 ft\ndepth < 5 ft"]
        );
    }

    #[test]
    fn test_non_text_elements_are_ignored() {
        let xml = document(
            "<w:p><w:pPr><w:pStyle w:val=\"Heading1\"/></w:pPr>\
             <w:r><w:instrText>PAGE</w:instrText><w:t>SUBSURFACE CONDITIONS</w:t></w:r></w:p>",
        );
        let bytes = make_docx(&[("word/document.xml", xml.as_str())]);
        assert_eq!(extract_paragraphs(&bytes).unwrap(), vec!["SUBSURFACE CONDITIONS"]);
    }

    #[test]
    fn test_missing_document_part() {
        let bytes = make_docx(&[("word/styles.xml", "<w:styles/>")]);
        let err = extract_paragraphs(&bytes).unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)), "{err}");
    }

    #[test]
    fn test_not_a_zip() {
        let err = extract_paragraphs(b"plain text pretending to be docx").unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
    }

    #[test]
    fn test_malformed_xml() {
        let bytes = make_docx(&[("word/document.xml", "<w:document><w:p></w:r></w:document>")]);
        let err = extract_paragraphs(&bytes).unwrap_err();
        assert!(matches!(err, ExtractError::Xml(_)), "{err}");
    }
}
