//! Row repair for the plain-text table dump.
//!
//! The table extractor loses structure in two ways: a long disease name wraps
//! into extra cells, and the whitespace between numeric columns is dropped or
//! duplicated. Rows are repaired into `[index + name, this year, last year]`
//! before any number is parsed.

use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::error::InfestationError;
use crate::model::{DiseaseRow, RowFailure, VALUE_COLUMNS};
use crate::parsing::values::{is_placeholder, parse_value};

/// Cells in a repaired row: name, this-year values, last-year values.
pub const NORMALIZED_ROW_LENGTH: usize = 3;

/// Substitute written in place of a placeholder before values are split.
const PLACEHOLDER_VALUE: &str = "0.0";

/// Drop cells that are blank after trimming.
pub fn stripped(row: &[String]) -> Vec<String> {
    row.iter()
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.trim().to_string())
        .collect()
}

/// True if the first whitespace-separated token of `cell` is a row number.
pub fn starts_with_index(cell: &str) -> bool {
    cell.split_whitespace()
        .next()
        .is_some_and(|t| t.chars().all(|c| c.is_ascii_digit()))
}

fn starts_alphabetic(cell: &str) -> bool {
    cell.chars().next().is_some_and(char::is_alphabetic)
}

/// A token that continues the previous one rather than starting a new value:
/// a three-digit thousands group, or a six-character decimal.
fn is_glued_continuation(token: &str) -> bool {
    let len = token.chars().count();
    (len == 3 && token.chars().all(|c| c.is_ascii_digit()))
        || (len == 6 && token.contains(['.', ',']))
}

/// Re-join value tokens with single spaces, except before a token that
/// continues the previous number.
pub fn reformat_weird_spacing(values: &str) -> String {
    let tokens: Vec<&str> = values.split_whitespace().collect();
    let mut parsed = String::with_capacity(values.len());

    for (i, token) in tokens.iter().enumerate() {
        parsed.push_str(token);
        if let Some(next) = tokens.get(i + 1) {
            if !is_glued_continuation(next) {
                parsed.push(' ');
            }
        }
    }

    parsed
}

/// Join name cells that wrapped past the first cell of an indexed row.
///
/// Cells following the first one are appended to the name while they start
/// with a letter; the first cell that doesn't starts the value block. Rows
/// without a leading index pass through unchanged.
pub fn join_wrapped_name(cells: &[String]) -> Result<Vec<String>, InfestationError> {
    let Some((first, rest)) = cells.split_first() else {
        return Ok(Vec::new());
    };

    if !starts_with_index(first) {
        return Ok(cells.to_vec());
    }

    let mut name = first.clone();
    for (i, cell) in rest.iter().enumerate() {
        if starts_alphabetic(cell) {
            name.push(' ');
            name.push_str(cell);
        } else {
            let mut repaired = Vec::with_capacity(rest.len() - i + 1);
            repaired.push(name);
            repaired.extend(rest[i..].iter().cloned());
            return Ok(repaired);
        }
    }

    Err(InfestationError::mismatch(
        first.as_str(),
        NORMALIZED_ROW_LENGTH,
        cells,
    ))
}

/// Repair a stripped row into `[index + name, this year, last year]`.
///
/// A row whose values all landed in one cell is split after its second value.
pub fn repair_row(cells: &[String]) -> Result<Vec<String>, InfestationError> {
    let mut row = join_wrapped_name(cells)?;

    if row.len() == 2 {
        let respaced = reformat_weird_spacing(&row[1]);
        let tokens: Vec<&str> = respaced.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(InfestationError::mismatch(
                row[0].as_str(),
                NORMALIZED_ROW_LENGTH,
                &row,
            ));
        }
        let (this_year, last_year) = tokens.split_at(2);
        let this_year = this_year.join(" ");
        let last_year = last_year.join(" ");
        row.truncate(1);
        row.push(this_year);
        row.push(last_year);
    }

    if row.len() != NORMALIZED_ROW_LENGTH {
        return Err(InfestationError::mismatch(
            row.first().map(String::as_str).unwrap_or_default(),
            NORMALIZED_ROW_LENGTH,
            &row,
        ));
    }

    Ok(row)
}

/// Replace placeholder tokens with `0.0` and decimal commas with points.
pub fn substitute_placeholders(cell: &str) -> String {
    cell.split_whitespace()
        .map(|t| {
            if is_placeholder(t) {
                PLACEHOLDER_VALUE.to_string()
            } else {
                t.replace(',', ".")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The two values of one period's cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuePair {
    pub count: String,
    pub rate: String,
    /// Split by the fixed-width last resort rather than by whitespace.
    pub fallback: bool,
}

/// Split one period's cell into its two values.
///
/// If re-spacing does not leave exactly two tokens, the last `width`
/// characters are taken as the second value. That last resort is wrong for
/// unusually wide numbers, so pairs split this way are flagged.
pub fn split_pair(cell: &str, width: usize) -> Result<ValuePair, InfestationError> {
    let tokens: Vec<&str> = cell.split_whitespace().collect();
    if let [count, rate] = tokens.as_slice() {
        return Ok(ValuePair {
            count: count.to_string(),
            rate: rate.to_string(),
            fallback: false,
        });
    }

    let parsed = reformat_weird_spacing(cell);
    let tokens: Vec<&str> = parsed.split_whitespace().collect();
    if let [count, rate] = tokens.as_slice() {
        return Ok(ValuePair {
            count: count.to_string(),
            rate: rate.to_string(),
            fallback: false,
        });
    }

    let chars: Vec<char> = parsed.chars().collect();
    if chars.len() <= width {
        return Err(InfestationError::StructuralMismatch {
            row: cell.to_string(),
            expected: 2,
            found: tokens.len(),
            text: format!("'{cell}' is too short to split into two values"),
        });
    }

    let (count, rate) = chars.split_at(chars.len() - width);
    Ok(ValuePair {
        count: count.iter().collect::<String>().trim().to_string(),
        rate: rate.iter().collect::<String>().trim().to_string(),
        fallback: true,
    })
}

/// Parse both period cells into the four value columns.
///
/// Returns the values and whether any cell needed the fallback split.
pub fn parse_values(
    cells: &[String],
    width: usize,
) -> Result<([f64; VALUE_COLUMNS], bool), InfestationError> {
    let mut values = [0.0; VALUE_COLUMNS];
    let mut needs_review = false;
    let mut slots = values.iter_mut();

    for cell in cells {
        let pair = split_pair(&substitute_placeholders(cell), width)?;
        needs_review |= pair.fallback;
        for raw in [&pair.count, &pair.rate] {
            let slot = slots.next().ok_or_else(|| InfestationError::StructuralMismatch {
                row: cells.join(" | "),
                expected: VALUE_COLUMNS,
                found: cells.len() * 2,
                text: format!("{cells:?}"),
            })?;
            *slot = parse_value(raw)?;
        }
    }

    if slots.next().is_some() {
        return Err(InfestationError::StructuralMismatch {
            row: cells.join(" | "),
            expected: VALUE_COLUMNS,
            found: cells.len() * 2,
            text: format!("{cells:?}"),
        });
    }

    Ok((values, needs_review))
}

/// Split the leading `index name` cell.
fn split_index(cell: &str) -> Option<(u32, String)> {
    let (index, name) = cell.trim().split_once(char::is_whitespace)?;
    Some((index.parse().ok()?, name.trim().to_string()))
}

/// Parsed rows of a table dump plus the rows that failed.
#[derive(Debug, Clone, Default)]
pub struct TableExtraction {
    pub rows: Vec<DiseaseRow>,
    pub failures: Vec<RowFailure>,
}

/// A table-text dump: period labels plus the data rows after the preamble.
#[derive(Debug, Clone)]
pub struct TableDocument {
    pub source: String,
    pub this_year: String,
    pub last_year: String,
    /// Stripped data rows with their position in the dump.
    rows: Vec<(usize, Vec<String>)>,
}

impl TableDocument {
    /// The first row must carry exactly the two period labels.
    pub fn from_rows(
        source: &str,
        rows: Vec<Vec<String>>,
        config: &ExtractionConfig,
    ) -> Result<TableDocument, InfestationError> {
        let labels = rows.first().map(|r| stripped(r)).unwrap_or_default();
        let [this_year, last_year]: [String; 2] = labels.try_into().map_err(|labels: Vec<String>| {
            InfestationError::DocumentStructure(format!(
                "{source}: expected two period labels in the first row, found {labels:?}"
            ))
        })?;

        let rows = rows
            .iter()
            .enumerate()
            .skip(config.table_preamble_rows)
            .map(|(i, r)| (i, stripped(r)))
            .filter(|(_, r)| !r.is_empty())
            .collect();

        Ok(TableDocument {
            source: source.to_string(),
            this_year,
            last_year,
            rows,
        })
    }

    /// Repair and parse every data row. Failing rows are collected, not fatal.
    pub fn parse(&self, config: &ExtractionConfig) -> TableExtraction {
        let mut extraction = TableExtraction::default();
        let mut last_index = None;

        for (position, cells) in &self.rows {
            match self.parse_row(*position, cells, &mut last_index, config) {
                Ok(row) => {
                    debug!(row = position, index = row.index, label = row.label(), "parsed table row");
                    if row.needs_review {
                        warn!(
                            row = position,
                            label = row.label(),
                            "values split by fixed width, review before trusting"
                        );
                    }
                    extraction.rows.push(row);
                }
                Err(e) => {
                    warn!(row = position, error = %e, "skipping table row");
                    extraction.failures.push(RowFailure {
                        page: None,
                        row: *position,
                        text: cells.join(" | "),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            source = %self.source,
            rows = extraction.rows.len(),
            failures = extraction.failures.len(),
            "parsed table text"
        );
        extraction
    }

    /// An indexed row becomes the parent of the continuation rows after it as
    /// soon as its index is read, even if its values fail to parse.
    fn parse_row(
        &self,
        position: usize,
        cells: &[String],
        last_index: &mut Option<u32>,
        config: &ExtractionConfig,
    ) -> Result<DiseaseRow, InfestationError> {
        let row = repair_row(cells)?;
        let (head, values) = row.split_at(1);

        // Rows without a leading number continue the previous indexed row
        let (index, name) = if starts_with_index(&head[0]) {
            let (index, name) = split_index(&head[0]).ok_or_else(|| {
                InfestationError::mismatch(head[0].as_str(), NORMALIZED_ROW_LENGTH, &row)
            })?;
            *last_index = Some(index);
            (index, name)
        } else {
            let index = last_index.ok_or_else(|| InfestationError::StructuralMismatch {
                row: head[0].clone(),
                expected: NORMALIZED_ROW_LENGTH,
                found: row.len(),
                text: "continuation row before any indexed row".into(),
            })?;
            (index, head[0].clone())
        };

        let (values, needs_review) = parse_values(values, config.fallback_split_width)?;

        let top_level = name.chars().next().is_some_and(char::is_uppercase);
        let (name, subcategory) = if top_level {
            (Some(name), config.total_marker.clone())
        } else {
            (None, name)
        };

        Ok(DiseaseRow {
            position,
            index,
            name,
            subcategory,
            values,
            this_year: self.this_year.clone(),
            last_year: self.last_year.clone(),
            needs_review,
        })
    }
}
