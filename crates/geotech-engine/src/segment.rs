//! Boring and CPT log segmentation
//!
//! Logs are located purely by header text ("LOG OF BORING GEO-001",
//! "CPT SOUNDING LOG GEO-101", ...). A section's body runs from the end of
//! its header to the next header of either kind, or to a document-end
//! marker such as an appendix heading, whichever comes first.

use crate::patterns::{normalize_id, SECTION_ID};
use geotech_types::Section;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub(crate) static ref BORING_HEADER: Regex = Regex::new(&format!(
        r"(?i)\blog\s+of\s+boring\s*(?:no\.?|#|:)?\s*{}",
        SECTION_ID
    ))
    .unwrap();

    pub(crate) static ref CPT_HEADER: Regex = Regex::new(&format!(
        r"(?i)\b(?:log\s+of\s+cpt(?:\s+sounding)?|cpt\s+sounding(?:\s+log)?|cone\s+penetration\s+test(?:\s+(?:sounding|log))?|cpt\s+log)\s*(?:no\.?|#|:)?\s*{}",
        SECTION_ID
    ))
    .unwrap();

    /// Line-leading "APPENDIX C" or "END OF REPORT"
    static ref END_MARKER: Regex =
        Regex::new(r"(?im)^[ \t]*(?:appendix\s+[a-z0-9]+\b|end\s+of\s+report\b)").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Boring,
    Cpt,
}

#[derive(Debug, Clone)]
struct Header {
    kind: SectionKind,
    id: String,
    start: usize,
    end: usize,
}

/// Boring log sections in document order
pub fn boring_sections(text: &str) -> Vec<Section<'_>> {
    sections(text, SectionKind::Boring)
}

/// CPT sounding sections in document order
pub fn cpt_sections(text: &str) -> Vec<Section<'_>> {
    sections(text, SectionKind::Cpt)
}

pub fn sections(text: &str, kind: SectionKind) -> Vec<Section<'_>> {
    let headers = headers(text);
    let end_markers: Vec<usize> = END_MARKER.find_iter(text).map(|m| m.start()).collect();

    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.kind == kind)
        .map(|(i, header)| {
            let next_header = headers[i + 1..]
                .iter()
                .map(|next| next.start)
                .find(|&start| start >= header.end);
            let next_end = end_markers
                .iter()
                .copied()
                .find(|&start| start >= header.end);

            let stop = [next_header, next_end]
                .into_iter()
                .flatten()
                .min()
                .unwrap_or(text.len());

            Section {
                id: header.id.clone(),
                body: &text[header.end..stop],
            }
        })
        .collect()
}

/// Start offset of the first log header of either kind at or after `from`
pub(crate) fn next_header_start(text: &str, from: usize) -> Option<usize> {
    let rest = text.get(from..)?;
    [BORING_HEADER.find(rest), CPT_HEADER.find(rest)]
        .into_iter()
        .flatten()
        .map(|m| from + m.start())
        .min()
}

fn headers(text: &str) -> Vec<Header> {
    let mut headers: Vec<Header> = [
        (SectionKind::Boring, &*BORING_HEADER),
        (SectionKind::Cpt, &*CPT_HEADER),
    ]
    .into_iter()
    .flat_map(|(kind, pattern)| {
        pattern.captures_iter(text).filter_map(move |caps| {
            let whole = caps.get(0)?;
            let id = caps.get(1)?;
            Some(Header {
                kind,
                id: normalize_id(id.as_str()),
                start: whole.start(),
                end: whole.end(),
            })
        })
    })
    .collect();

    headers.sort_by_key(|header| header.start);
    headers
}
