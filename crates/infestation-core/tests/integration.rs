//! Integration tests for both extraction paths through `StatisticSource`.
//!
//! Uses a MockExtractor that returns pre-built table rows without invoking
//! tabula, so these tests run without a Java runtime.

use infestation_core::config::ExtractionConfig;
use infestation_core::error::InfestationError;
use infestation_core::extract_table;
use infestation_core::extraction::TableExtractor;
use infestation_core::ocr::Document;
use infestation_core::period::ReportPeriod;
use infestation_core::StatisticSource;
use serde_json::{json, Value};

struct MockExtractor {
    rows: Vec<Vec<String>>,
}

impl TableExtractor for MockExtractor {
    fn extract_rows(&self, _pdf_bytes: &[u8]) -> Result<Vec<Vec<String>>, InfestationError> {
        Ok(self.rows.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

fn vertices(l: f64, t: f64, r: f64, b: f64) -> Value {
    json!({ "normalizedVertices": [
        { "x": l, "y": t }, { "x": r, "y": t }, { "x": r, "y": b }, { "x": l, "y": b }
    ]})
}

/// One word per entry, laid out left to right on a single baseline.
fn line_words(texts: &[&str], top: f64) -> Vec<Value> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let left = 0.05 + i as f64 * 0.08;
            let right = left + 0.07;
            let char_width = 0.07 / text.chars().count() as f64;
            let symbols: Vec<Value> = text
                .chars()
                .enumerate()
                .map(|(j, c)| {
                    let l = left + j as f64 * char_width;
                    json!({
                        "text": c.to_string(),
                        "confidence": 0.98,
                        "boundingBox": vertices(l, top, l + char_width, top + 0.01)
                    })
                })
                .collect();
            json!({
                "boundingBox": vertices(left, top, right, top + 0.01),
                "confidence": 0.98,
                "symbols": symbols
            })
        })
        .collect()
}

fn ocr_response(lines: &[(&[&str], f64)]) -> String {
    let words: Vec<Value> = lines
        .iter()
        .flat_map(|(texts, top)| line_words(texts, *top))
        .collect();
    json!({
        "responses": [{
            "responses": [{
                "context": { "pageNumber": 1 },
                "fullTextAnnotation": {
                    "text": "",
                    "pages": [{
                        "width": 1000, "height": 1400, "confidence": 0.98,
                        "blocks": [{
                            "blockType": "TEXT",
                            "confidence": 0.98,
                            "paragraphs": [{ "confidence": 0.98, "words": words }]
                        }]
                    }]
                }
            }]
        }]
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// OCR geometry path
// ---------------------------------------------------------------------------
#[test]
fn ocr_document_to_records() {
    let json = ocr_response(&[
        (&["Meldunek", "nr", "1/2018"], 0.05),
        (&["Odra", "zachorowania", "12", "-", "0,5", "3"], 0.2),
        (&["Ospa", "wietrzna", "razem", "30", "\u{2013}", "1", "2"], 0.3),
    ]);
    let doc = Document::from_json("01.01.2018-31.01.2018.json", &json).unwrap();
    let period = ReportPeriod::from_file_name("01.01.2018-31.01.2018.json".as_ref()).unwrap();

    let extraction = doc
        .extract_statistics(&period, &ExtractionConfig::default())
        .unwrap();

    assert!(extraction.failures.is_empty());
    assert_eq!(extraction.records.len(), 2);

    let odra = &extraction.records[0];
    assert_eq!(odra.name, "Odra zachorowania");
    assert_eq!(odra.values, [12.0, 0.0, 0.5, 3.0]);
    assert!((odra.per_30_days_rate - 12.0).abs() < 1e-9);
    assert_eq!(odra.page, Some(1));
    assert_eq!(odra.source, "01.01.2018-31.01.2018.json");

    let ospa = &extraction.records[1];
    assert_eq!(ospa.name, "Ospa wietrzna razem");
    assert_eq!(ospa.values, [30.0, 0.0, 1.0, 2.0]);
}

#[test]
fn ocr_bad_line_is_reported_not_fatal() {
    let json = ocr_response(&[
        (&["Odra", "zachorowania", "12", "-", "0,5", "3"], 0.2),
        (&["Ospa", "wietrzna", "1", "2", "3", "4"], 0.3),
    ]);
    let doc = Document::from_json("report.json", &json).unwrap();
    // Zero-length period cannot be rescaled
    let period: ReportPeriod = "31.01.2018-31.01.2018".parse().unwrap();

    let extraction = doc
        .extract_statistics(&period, &ExtractionConfig::default())
        .unwrap();
    assert!(extraction.records.is_empty());
    assert_eq!(extraction.failures.len(), 2);
}

#[test]
fn ocr_response_without_files_is_error() {
    let err = Document::from_json("x.json", r#"{"responses": []}"#).unwrap_err();
    assert!(matches!(err, InfestationError::DocumentStructure(_)));
}

// ---------------------------------------------------------------------------
// Table-text path
// ---------------------------------------------------------------------------
#[test]
fn table_dump_to_records() {
    let extractor = MockExtractor {
        rows: rows(&[
            &["", "1.10-15.10.2018", "", "1.10-15.10.2017"],
            &["Jednostka chorobowa", "liczba", "zapadalność"],
            &["", "", ""],
            &["1", "Cholera", "- -", "1 0,00"],
            &["2 Dur brzuszny", "14 0,05 28 0,10"],
            &["u dzieci", "7 0,10", "- -"],
        ]),
    };
    let config = ExtractionConfig::default();
    let doc = extract_table(&[], &extractor, "INF_18_10B.pdf", &config).unwrap();
    assert_eq!(doc.source_name(), "INF_18_10B.pdf");

    let period: ReportPeriod = "01.10.2018-15.10.2018".parse().unwrap();
    let extraction = doc.extract_statistics(&period, &config).unwrap();

    assert!(extraction.failures.is_empty());
    assert_eq!(extraction.records.len(), 3);

    let cholera = &extraction.records[0];
    assert_eq!(cholera.name, "Cholera");
    assert_eq!(cholera.values, [0.0, 0.0, 1.0, 0.0]);
    assert_eq!(cholera.page, None);

    let dur = &extraction.records[1];
    assert_eq!(dur.name, "Dur brzuszny");
    assert_eq!(dur.values, [14.0, 0.05, 28.0, 0.1]);
    // 14 cases over 14 days
    assert!((dur.per_30_days_rate - 30.0).abs() < 1e-9);

    let children = &extraction.records[2];
    assert_eq!(children.name, "u dzieci");
    assert!((children.per_30_days_rate - 15.0).abs() < 1e-9);
}

#[test]
fn table_dump_without_labels_is_error() {
    let extractor = MockExtractor {
        rows: rows(&[&["Tabela 1"], &[], &[]]),
    };
    let err = extract_table(&[], &extractor, "x.pdf", &ExtractionConfig::default()).unwrap_err();
    assert!(matches!(err, InfestationError::DocumentStructure(_)));
}

#[test]
fn table_unrepairable_row_is_reported() {
    let extractor = MockExtractor {
        rows: rows(&[
            &["2018", "2017"],
            &[],
            &[],
            &["1 Cholera", "- -", "1 0,00"],
            &["Tabela 2", "ciąg dalszy"],
        ]),
    };
    let config = ExtractionConfig::default();
    let doc = extract_table(&[], &extractor, "x.pdf", &config).unwrap();
    let period: ReportPeriod = "01.10.2018-15.10.2018".parse().unwrap();
    let extraction = doc.extract_statistics(&period, &config).unwrap();

    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.failures.len(), 1);
    assert_eq!(extraction.failures[0].row, 4);
}

#[test]
fn table_failures_share_dump_positions() {
    let extractor = MockExtractor {
        rows: rows(&[
            &["2018", "2017"],
            &[],
            &[],
            &["Tabela 2", "ciąg dalszy"],
            &["1 Cholera", "- -", "1 0,00"],
        ]),
    };
    let config = ExtractionConfig::default();
    let doc = extract_table(&[], &extractor, "x.pdf", &config).unwrap();
    // Zero-length period fails the rate of every parsed row
    let period: ReportPeriod = "15.10.2018-15.10.2018".parse().unwrap();
    let extraction = doc.extract_statistics(&period, &config).unwrap();

    assert!(extraction.records.is_empty());
    let rows: Vec<usize> = extraction.failures.iter().map(|f| f.row).collect();
    assert_eq!(rows, vec![3, 4]);
}
