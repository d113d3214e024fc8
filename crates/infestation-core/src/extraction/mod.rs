pub mod tabula;

use std::io::Read;

use crate::error::InfestationError;

/// Trait for backends that dump a PDF's tables as rows of text cells.
pub trait TableExtractor: Send + Sync {
    /// Extract every table row of the PDF, all pages concatenated.
    fn extract_rows(&self, pdf_bytes: &[u8]) -> Result<Vec<Vec<String>>, InfestationError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Read a comma-delimited table dump. Rows may differ in width.
pub fn read_table_csv<R: Read>(reader: R) -> Result<Vec<Vec<String>>, InfestationError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_table_csv_flexible_rows() {
        let dump = "\"1.10-15.10.2018\",\"1.10-15.10.2017\"\n\
                    a,b,c\n\
                    \"1 Cholera\",\"12 3,4 5 6,7\"\n";
        let rows = read_table_csv(dump.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["1.10-15.10.2018", "1.10-15.10.2017"]);
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[2], vec!["1 Cholera", "12 3,4 5 6,7"]);
    }

    #[test]
    fn test_read_table_csv_empty() {
        assert!(read_table_csv("".as_bytes()).unwrap().is_empty());
    }
}
