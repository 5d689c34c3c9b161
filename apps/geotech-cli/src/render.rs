//! Human-readable report rendering

use geotech_types::{AnalysisReport, FrequencyTable, RefusalSummary};
use std::fmt::{self, Write};

pub struct TextOptions {
    pub refusal_threshold_ft: f64,
    pub show_depths: bool,
}

pub fn render_text(
    report: &AnalysisReport,
    options: &TextOptions,
) -> Result<String, fmt::Error> {
    let threshold = feet(options.refusal_threshold_ft);
    let mut out = String::new();

    writeln!(out, "Geotechnical Report Analysis: {}", report.source)?;
    writeln!(out)?;
    writeln!(out, "Porous/Well-Draining Soils? → {}", report.drainage)?;
    writeln!(
        out,
        "Shallow Refusals (< {threshold} ft)? → {}",
        refusal_line(&report.boring_refusals, "borings")
    )?;
    if let Some(cpt) = &report.cpt_refusals {
        writeln!(
            out,
            "Shallow CPT Refusals (< {threshold} ft)? → {}",
            refusal_line(cpt, "soundings")
        )?;
    }
    writeln!(out, "Groundwater Shallower Than 5 ft? → {}", report.groundwater)?;

    writeln!(out)?;
    writeln!(out, "Most Common USCS Soils in Report")?;
    if report.uscs.is_empty() {
        writeln!(out, "No USCS codes detected in extracted text.")?;
    } else {
        out.push_str(&uscs_table(&report.uscs)?);
    }

    if options.show_depths {
        depth_listing(&mut out, "Boring refusal depths", &report.boring_refusals)?;
        if let Some(cpt) = &report.cpt_refusals {
            depth_listing(&mut out, "CPT refusal depths", cpt)?;
        }

        let estimate = &report.boring_label_estimate;
        writeln!(out)?;
        writeln!(
            out,
            "Document-wide estimate: {} shallow of {} boring labels ({:.1}%)",
            estimate.shallow_count, estimate.label_count, estimate.percent
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", report.advisory)?;
    Ok(out)
}

fn refusal_line(summary: &RefusalSummary, noun: &str) -> String {
    format!(
        "{} of {} {noun} ({:.1}%)",
        summary.shallow_count, summary.total_sections, summary.percent
    )
}

fn uscs_table(table: &FrequencyTable) -> Result<String, fmt::Error> {
    let name_width = table
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Soil".len());

    let mut out = String::new();
    writeln!(
        out,
        "{:<6} {:<name_width$} {:>5} {:>8}",
        "USCS", "Soil", "Count", "Percent"
    )?;
    for row in table.iter() {
        writeln!(
            out,
            "{:<6} {:<name_width$} {:>5} {:>7.2}%",
            row.code.symbol(),
            row.name,
            row.count,
            row.percent
        )?;
    }
    Ok(out)
}

fn depth_listing(out: &mut String, title: &str, summary: &RefusalSummary) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{title} ({}):", summary.strategy)?;
    if summary.depth_map.is_empty() {
        writeln!(out, "  none found")?;
    }
    for (id, depth) in &summary.depth_map {
        writeln!(out, "  {id:<10} {depth} ft")?;
    }
    Ok(())
}

/// "8" for whole feet, "7.5" otherwise
fn feet(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotech_engine::GeotechEngine;
    use pretty_assertions::assert_eq;

    const REPORT: &str = "\
LOG OF BORING GEO-001
Lean clay (CL). Auger refusal at 5 ft.
LOG OF BORING GEO-002
Fat clay (CH). Refusal at 10 ft.
Groundwater was encountered at 3 ft.
";

    fn options(show_depths: bool) -> TextOptions {
        TextOptions {
            refusal_threshold_ft: 8.0,
            show_depths,
        }
    }

    #[test]
    fn test_summary_lines() {
        let report = GeotechEngine::new().analyze("site.pdf", REPORT);
        let text = render_text(&report, &options(false)).unwrap();

        assert!(text.starts_with("Geotechnical Report Analysis: site.pdf\n"));
        assert!(text.contains("Porous/Well-Draining Soils? → Overall NOT well-draining"));
        assert!(text.contains("Shallow Refusals (< 8 ft)? → 1 of 2 borings (50.0%)\n"));
        assert!(text.contains("Groundwater Shallower Than 5 ft? → Yes\n"));
        assert!(!text.contains("CPT"));
        assert!(!text.contains("Boring refusal depths"));
        assert!(text.trim_end().ends_with("verify with boring logs/appendices."));
    }

    #[test]
    fn test_uscs_table_rows() {
        let report = GeotechEngine::new().analyze_text(REPORT);
        let text = render_text(&report, &options(false)).unwrap();

        let rows: Vec<&str> = text
            .lines()
            .skip_while(|line| !line.starts_with("USCS"))
            .skip(1)
            .take(2)
            .collect();
        assert!(rows[0].starts_with("CL "), "{}", rows[0]);
        assert!(rows[0].ends_with(" 50.00%"), "{}", rows[0]);
        assert!(rows[1].starts_with("CH "), "{}", rows[1]);
    }

    #[test]
    fn test_no_codes_message() {
        let report = GeotechEngine::new().analyze_text("Site grades slope to the east.");
        let text = render_text(&report, &options(false)).unwrap();
        assert!(text.contains("No USCS codes detected in extracted text.\n"));
        assert!(text.contains("→ Unclear – needs review"));
    }

    #[test]
    fn test_depth_listing() {
        let report = GeotechEngine::new().analyze_text(REPORT);
        let text = render_text(&report, &options(true)).unwrap();

        assert!(text.contains(
            "Boring refusal depths (sectioned):\n  GEO-001    5 ft\n  GEO-002    10 ft\n"
        ));
        assert!(text.contains("Document-wide estimate: "));
    }

    #[test]
    fn test_cpt_line_and_fractional_threshold() {
        let text = "CPT SOUNDING LOG GEO-101\nRefusal at 3.1 ft.\n";
        let report = GeotechEngine::new().analyze_text(text);
        let rendered = render_text(
            &report,
            &TextOptions {
                refusal_threshold_ft: 7.5,
                show_depths: false,
            },
        )
        .unwrap();
        assert!(rendered
            .contains("Shallow CPT Refusals (< 7.5 ft)? → 1 of 1 soundings (100.0%)"));
    }

    #[test]
    fn test_feet_formatting() {
        assert_eq!(feet(8.0), "8");
        assert_eq!(feet(7.5), "7.5");
    }
}
