use std::io::{Read, Write};
use std::path::Path;

use crate::error::{PipelineError, Result};

/// A header row plus string cells, as read from a CSV file.
///
/// Rows shorter than the header are padded with empty cells so every row
/// can be indexed by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CommentTable {
    /// Build a table from headers and rows, padding short rows.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Table`] if a row has more cells than headers.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, mut row)| {
                if row.len() > width {
                    return Err(PipelineError::Table(format!(
                        "row {} has {} cells but the header has {}",
                        i + 1,
                        row.len(),
                        width
                    )));
                }
                row.resize(width, String::new());
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { headers, rows })
    }

    /// Read a CSV file with a header row.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            PipelineError::Table(format!("Failed to open '{}': {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }

    /// Read CSV with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        let rows = reader
            .records()
            .map(|record| Ok(record?.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>>>()?;

        Self::new(headers, rows)
    }

    /// Write the table as CSV.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| {
            PipelineError::Table(format!("Failed to create '{}': {}", path.display(), e))
        })?;
        self.to_writer(file)
    }

    /// Write the table as CSV to any writer.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows, each as wide as the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[index].as_str())
    }

    /// Append a column, one value per row.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Table`] if `values` does not have one entry per row.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<String>) -> Result<()> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(PipelineError::Table(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        self.headers.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_quoted_cells_and_pads_short_rows() {
        let csv = "id,comment\n1,\"Great, really 😍\"\n2\n";
        let table = CommentTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.headers(), &["id", "comment"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][1], "Great, really 😍");
        assert_eq!(table.rows()[1], vec!["2".to_string(), String::new()]);
    }

    #[test]
    fn strips_byte_order_mark_from_first_header() {
        let csv = "\u{feff}comment\nhola\n";
        let table = CommentTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.column_index("comment"), Some(0));
    }

    #[test]
    fn rejects_rows_wider_than_header() {
        let csv = "a\n1,2\n";
        assert!(matches!(
            CommentTable::from_reader(csv.as_bytes()),
            Err(PipelineError::Table(_))
        ));
    }

    #[test]
    fn push_column_then_write() {
        let mut table =
            CommentTable::new(vec!["text".into()], vec![vec!["a".into()], vec!["b".into()]])
                .unwrap();
        table
            .push_column("sentiment", vec!["positive".into(), "negative".into()])
            .unwrap();

        let mut out = Vec::new();
        table.to_writer(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "text,sentiment\na,positive\nb,negative\n"
        );
    }

    #[test]
    fn push_column_checks_length() {
        let mut table = CommentTable::new(vec!["text".into()], vec![vec!["a".into()]]).unwrap();
        assert!(table.push_column("x", vec![]).is_err());
        assert_eq!(table.headers().len(), 1);
    }
}
