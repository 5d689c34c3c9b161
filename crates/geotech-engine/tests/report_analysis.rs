//! End-to-end analysis of report excerpts shaped like real site-investigation
//! reports: narrative sections followed by appendix log pages.

use geotech_engine::{drainage, AnalysisConfig, GeotechEngine};
use geotech_types::{GroundwaterVerdict, RefusalStrategy, UscsCode};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

const LOGGED_REPORT: &str = "\
GEOTECHNICAL ENGINEERING REPORT
Proposed Solar Array - Harnett County, North Carolina

1.0 PROJECT INFORMATION
Soil borings were completed at 3 locations and CPT soundings were performed at 2 locations.

2.0 SUBSURFACE CONDITIONS
Soils consist of sandy lean clay (CL) and clayey sand (SC) over partially weathered rock.
Silty sand (SM) was encountered locally. Groundwater was not encountered during drilling;
however, the county soil survey reports a water table at approx 3 ft in low areas.

APPENDIX B
LOG OF BORING GEO-001
0-3 ft  CL  Sandy lean clay, stiff
3-6 ft  SC  Clayey sand, medium dense
Auger refusal at 6.5 ft on partially weathered rock.

LOG OF BORING GEO-002
0-4 ft  CL  Sandy lean clay
4-15 ft SM  Silty sand
Boring terminated at 15 ft.

LOG OF BORING GEO-003
0-2 ft  CL  Lean clay
PWR encountered at 2.5 ft, auger refusal at 4 ft.

CPT SOUNDING LOG GEO-101
Cone tip refusal at 12.3 ft.

CPT SOUNDING LOG GEO-102
Refusal at 3.1 ft.

APPENDIX C
Laboratory test results: CL, CL, SC.
";

const NARRATIVE_REPORT: &str = "\
3.0 FIELD EXPLORATION
Soil borings were completed at 6 locations across the site. Borings GEO-001 through GEO-006
were advanced with hollow-stem augers.
GEO-002 encountered auger refusal at 5 ft on weathered rock.
At GEO-004 refusal was met at 7.5 feet.
GEO-005 was advanced to 20 ft; refusal was not encountered.
CPT soundings were performed at 4 locations.

Table 2. CPT Sounding Shallow Refusal Depths
GEO-101     2.5 ft
GEO-103     6.0 ft

4.0 GROUNDWATER
Groundwater was measured at 9 ft below grade in GEO-003.

5.0 CONCLUSIONS
Well-draining sand and gravel were not observed; soils are described as silty clay.
";

#[test]
fn test_logged_report() {
    let report = GeotechEngine::new().analyze("harnett.pdf", LOGGED_REPORT);

    // CL x6, SC x3, SM x2
    let counts: Vec<(UscsCode, usize)> = report.uscs.iter().map(|r| (r.code, r.count)).collect();
    assert_eq!(
        counts,
        vec![(UscsCode::CL, 6), (UscsCode::SC, 3), (UscsCode::SM, 2)]
    );
    assert_eq!(report.drainage.label, drainage::NOT_WELL_DRAINING);

    // "not encountered" wins over the soil-survey water table
    assert_eq!(report.groundwater, GroundwaterVerdict::No);

    let borings = &report.boring_refusals;
    assert_eq!(borings.strategy, RefusalStrategy::Sectioned);
    assert_eq!(borings.total_sections, 3);
    assert_eq!(borings.shallow_count, 2);
    assert_eq!(borings.percent, 66.7);
    assert_eq!(
        borings.depth_map,
        BTreeMap::from([("GEO-001".to_string(), 6.5), ("GEO-003".to_string(), 2.5)])
    );

    let cpt = report.cpt_refusals.as_ref().expect("CPT logs present");
    assert_eq!(cpt.strategy, RefusalStrategy::Sectioned);
    assert_eq!(cpt.total_sections, 2);
    assert_eq!(cpt.shallow_count, 1);
    assert_eq!(cpt.percent, 50.0);
}

#[test]
fn test_narrative_report_falls_back() {
    let report = GeotechEngine::new().analyze("narrative.docx", NARRATIVE_REPORT);

    assert!(report.uscs.is_empty());
    assert_eq!(report.drainage.label, drainage::KEYWORD_NOT_WELL_DRAINING);
    assert_eq!(report.groundwater, GroundwaterVerdict::No);

    let borings = &report.boring_refusals;
    assert_eq!(borings.strategy, RefusalStrategy::Narrative);
    assert_eq!(borings.total_sections, 6);
    assert_eq!(borings.shallow_count, 2);
    assert_eq!(borings.percent, 33.3);
    assert_eq!(
        borings.depth_map,
        BTreeMap::from([("GEO-002".to_string(), 5.0), ("GEO-004".to_string(), 7.5)])
    );

    let cpt = report.cpt_refusals.as_ref().expect("CPT table present");
    assert_eq!(cpt.strategy, RefusalStrategy::Narrative);
    assert_eq!(cpt.total_sections, 4);
    assert_eq!(cpt.shallow_count, 2);
    assert_eq!(cpt.percent, 50.0);
}

#[test]
fn test_config_threshold_changes_shallow_counts() {
    let config = AnalysisConfig::from_str("refusal_threshold_ft = 5.0").unwrap();
    let report = GeotechEngine::with_config(config).analyze_text(LOGGED_REPORT);
    assert_eq!(report.boring_refusals.shallow_count, 1);
    assert_eq!(report.cpt_refusals.unwrap().shallow_count, 1);
}

#[test]
fn test_report_serializes_to_json() {
    let report = GeotechEngine::new().analyze("harnett.pdf", LOGGED_REPORT);
    let json = report.to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["source"], "harnett.pdf");
    assert_eq!(value["groundwater"], "No");
    assert_eq!(value["boring_refusals"]["strategy"], "sectioned");
    assert_eq!(value["boring_refusals"]["depth_map"]["GEO-001"], 6.5);
    assert_eq!(value["uscs"][0]["code"], "CL");
    assert_eq!(value["drainage"]["basis"]["kind"], "frequency_mix");
}

#[test]
fn test_repeat_analysis_is_identical() {
    let engine = GeotechEngine::new();
    assert_eq!(
        engine.analyze_text(NARRATIVE_REPORT),
        engine.analyze_text(NARRATIVE_REPORT)
    );
}
