//! Shallow-refusal counting
//!
//! Each capability is an ordered list of strategies; the first one that
//! returns a summary wins.
//!
//! - Sectioned: one refusal depth per boring/CPT log section. Yields nothing
//!   when the segmenter found no sections.
//! - Narrative: totals stated in the report body ("soil borings were
//!   completed at 6 locations") combined with document-wide depth scans.
//!
//! Depth maps keep the first depth found for each identifier.

use crate::extractors::numeric::{all_depths, first_depth, parse_count, parse_depth, percent};
use crate::patterns::{normalize_id, DEPTH_FEET, REFUSAL_CONTEXT, SECTION_ID};
use crate::segment::{self, next_header_start};
use geotech_types::{BoringLabelEstimate, RefusalStrategy, RefusalSummary, Section};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Upper bound on the size of a CPT refusal-depth table block
const CPT_TABLE_MAX_CHARS: usize = 4000;

lazy_static! {
    /// Refusal context followed by a depth inside one sentence
    static ref REFUSAL_DEPTH: Regex = Regex::new(&format!(
        r"(?i)(?:{})[^.\n]{{0,120}}?{}",
        REFUSAL_CONTEXT, DEPTH_FEET
    ))
    .unwrap();

    static ref BORINGS_COMPLETED_AT: Regex = Regex::new(
        r"(?i)soil\s+borings?\s+were\s+completed\s+at\s+(\d+)\s+locations?"
    )
    .unwrap();

    static ref TOTAL_BORINGS_COMPLETED: Regex = Regex::new(
        r"(?i)a\s+total\s+of\s+(\d+)\s+soil\s+borings?\s+were\s+completed"
    )
    .unwrap();

    /// Identifier, refusal context, then depth on the same line
    static ref ID_REFUSAL_DEPTH: Regex = Regex::new(&format!(
        r"(?i){}[^\n]{{0,160}}?(?:{})[^\n]{{0,60}}?{}",
        SECTION_ID, REFUSAL_CONTEXT, DEPTH_FEET
    ))
    .unwrap();

    static ref CPT_SOUNDINGS_PERFORMED_AT: Regex = Regex::new(
        r"(?i)cpt\s+soundings?\s+were\s+performed\s+at\s+(\d+)\s+locations?"
    )
    .unwrap();

    static ref CPT_TABLE_TITLE: Regex =
        Regex::new(r"(?i)cpt\s+sounding\s+shallow\s+refusal\s+depths?").unwrap();

    /// Numbered all-caps heading line ("5.0 FOUNDATION RECOMMENDATIONS") or
    /// a line-leading appendix heading
    static ref MAJOR_SECTION: Regex = Regex::new(
        r"(?m)^[ \t]*(?:\d+(?:\.\d+)*\.?[ \t]+[A-Z]{2}[A-Z \t&/,-]*\r?$|(?i:appendix)\b)"
    )
    .unwrap();

    /// Identifier followed by the first number on the same line
    static ref ID_DEPTH_PAIR: Regex =
        Regex::new(&format!(r"(?i){}[^\d\n]{{0,40}}(\d+(?:\.\d+)?)", SECTION_ID)).unwrap();

    /// "B-14", "boring B-26A", "b 3"
    static ref BORING_LABEL: Regex =
        Regex::new(r"(?i)\b(?:boring\s+)?b-?\s*(\d+[a-z]?)\b").unwrap();
}

type RefusalStrategyFn = fn(&str, f64) -> Option<RefusalSummary>;

const BORING_STRATEGIES: &[(&str, RefusalStrategyFn)] = &[
    ("sectioned", sectioned_borings),
    ("narrative", narrative_borings),
];

const CPT_STRATEGIES: &[(&str, RefusalStrategyFn)] = &[
    ("sectioned", sectioned_cpt),
    ("narrative", narrative_cpt),
];

/// Shallow-refusal summary for soil borings. Always produces a summary.
pub fn count_boring_refusals(text: &str, threshold_ft: f64) -> RefusalSummary {
    run_strategies("boring", BORING_STRATEGIES, text, threshold_ft)
        .unwrap_or_else(|| empty_summary(RefusalStrategy::Narrative))
}

/// Shallow-refusal summary for CPT soundings, or `None` when the report has
/// no CPT logs, no CPT narrative total and no CPT refusal table.
pub fn count_cpt_refusals(text: &str, threshold_ft: f64) -> Option<RefusalSummary> {
    run_strategies("cpt", CPT_STRATEGIES, text, threshold_ft)
        .filter(|summary| summary.has_data())
}

fn run_strategies(
    target: &str,
    strategies: &[(&str, RefusalStrategyFn)],
    text: &str,
    threshold_ft: f64,
) -> Option<RefusalSummary> {
    strategies.iter().find_map(|(name, strategy)| {
        let summary = strategy(text, threshold_ft)?;
        debug!(
            target_kind = target,
            strategy = name,
            total = summary.total_sections,
            shallow = summary.shallow_count,
            "refusals counted"
        );
        Some(summary)
    })
}

/// Count refusals section by section.
///
/// Sections without a refusal depth still count toward the total. A log
/// whose header repeats (continued on a later page) is one section.
pub fn summarize_sections(sections: &[Section<'_>], threshold_ft: f64) -> RefusalSummary {
    let mut ids: BTreeSet<&str> = BTreeSet::new();
    let mut depth_map: BTreeMap<String, f64> = BTreeMap::new();

    for section in sections {
        ids.insert(section.id.as_str());
        if depth_map.contains_key(&section.id) {
            continue;
        }
        if let Some(depth) = first_depth(&REFUSAL_DEPTH, section.body, 1) {
            depth_map.insert(section.id.clone(), depth);
        }
    }

    let total = ids.len() as u32;
    let shallow = shallow_count(&depth_map, threshold_ft);

    RefusalSummary {
        strategy: RefusalStrategy::Sectioned,
        total_sections: total,
        shallow_count: shallow,
        percent: percent(shallow, total, 1),
        depth_map,
    }
}

fn sectioned_borings(text: &str, threshold_ft: f64) -> Option<RefusalSummary> {
    let sections = segment::boring_sections(text);
    if sections.is_empty() {
        return None;
    }
    Some(summarize_sections(&sections, threshold_ft))
}

fn sectioned_cpt(text: &str, threshold_ft: f64) -> Option<RefusalSummary> {
    let sections = segment::cpt_sections(text);
    if sections.is_empty() {
        return None;
    }
    Some(summarize_sections(&sections, threshold_ft))
}

fn narrative_borings(text: &str, threshold_ft: f64) -> Option<RefusalSummary> {
    let total = narrative_boring_total(text);
    let depth_map = first_depth_per_id(&ID_REFUSAL_DEPTH, text);
    Some(narrative_summary(total, depth_map, threshold_ft))
}

fn narrative_cpt(text: &str, threshold_ft: f64) -> Option<RefusalSummary> {
    let total = CPT_SOUNDINGS_PERFORMED_AT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_count(m.as_str()))
        .unwrap_or(0);

    let depth_map = CPT_TABLE_TITLE
        .find_iter(text)
        .map(|title| first_depth_per_id(&ID_DEPTH_PAIR, cpt_table_block(text, title.end())))
        .find(|depths| !depths.is_empty())
        .unwrap_or_default();

    Some(narrative_summary(total, depth_map, threshold_ft))
}

/// Sum every "soil borings were completed at N locations" plus the first
/// "a total of N soil borings were completed" that is not the same sentence
fn narrative_boring_total(text: &str) -> u32 {
    let mut spans = Vec::new();
    let mut total: u32 = 0;

    for caps in BORINGS_COMPLETED_AT.captures_iter(text) {
        let (Some(whole), Some(count)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if let Some(count) = parse_count(count.as_str()) {
            total = total.saturating_add(count);
            spans.push(whole.range());
        }
    }

    let stated_total = TOTAL_BORINGS_COMPLETED
        .captures_iter(text)
        .find_map(|caps| {
            let whole = caps.get(0)?;
            let overlaps = spans
                .iter()
                .any(|span| span.start < whole.end() && whole.start() < span.end);
            if overlaps {
                return None;
            }
            parse_count(caps.get(1)?.as_str())
        });

    total.saturating_add(stated_total.unwrap_or(0))
}

/// The text following a CPT refusal table title, up to the next major
/// section heading, log header, or size cap
fn cpt_table_block(text: &str, start: usize) -> &str {
    let mut stop = floor_char_boundary(text, start.saturating_add(CPT_TABLE_MAX_CHARS));

    if let Some(m) = MAJOR_SECTION.find_at(text, start) {
        stop = stop.min(m.start());
    }
    if let Some(header) = next_header_start(text, start) {
        stop = stop.min(header);
    }

    &text[start..stop]
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn first_depth_per_id(pattern: &Regex, text: &str) -> BTreeMap<String, f64> {
    let mut depth_map = BTreeMap::new();
    for caps in pattern.captures_iter(text) {
        let (Some(id), Some(depth)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let Some(depth) = parse_depth(depth.as_str()) else {
            continue;
        };
        depth_map.entry(normalize_id(id.as_str())).or_insert(depth);
    }
    depth_map
}

/// Fallback totals are not tied to the depth map; percent stays 0.0 when
/// no total was stated even if depths were found
fn narrative_summary(
    total: u32,
    depth_map: BTreeMap<String, f64>,
    threshold_ft: f64,
) -> RefusalSummary {
    let shallow = shallow_count(&depth_map, threshold_ft);
    RefusalSummary {
        strategy: RefusalStrategy::Narrative,
        total_sections: total,
        shallow_count: shallow,
        percent: percent(shallow, total, 1),
        depth_map,
    }
}

fn shallow_count(depth_map: &BTreeMap<String, f64>, threshold_ft: f64) -> u32 {
    depth_map
        .values()
        .filter(|depth| **depth < threshold_ft)
        .count() as u32
}

fn empty_summary(strategy: RefusalStrategy) -> RefusalSummary {
    RefusalSummary {
        strategy,
        total_sections: 0,
        shallow_count: 0,
        percent: 0.0,
        depth_map: BTreeMap::new(),
    }
}

/// Document-wide cross-check: every refusal-context depth in the text
/// against the number of distinct "B-<n>" boring labels
pub fn boring_label_estimate(text: &str, threshold_ft: f64) -> BoringLabelEstimate {
    let labels: BTreeSet<String> = BORING_LABEL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect();

    let shallow = all_depths(&REFUSAL_DEPTH, text, 1)
        .into_iter()
        .filter(|depth| *depth < threshold_ft)
        .count() as u32;
    let label_count = labels.len() as u32;

    BoringLabelEstimate {
        label_count,
        shallow_count: shallow,
        percent: percent(shallow, label_count, 1),
    }
}
