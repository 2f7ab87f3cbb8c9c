use crate::sheet::cell::{CellValue, ColumnKind};
use encoding_rs::Encoding;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Failed to read sheet: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Missing expected column: {0}")]
    MissingColumn(String),
}

/// Vollständig geladene, typisierte Tabelle
#[derive(Debug, Clone)]
pub struct Sheet {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Lade CSV-Datei mit dem angegebenen Encoding-Label (z.B. "ISO-8859-1")
    pub fn from_path(path: &Path, encoding: &str) -> Result<Self, SheetError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, encoding)
    }

    pub fn from_bytes(bytes: &[u8], encoding: &str) -> Result<Self, SheetError> {
        let encoding = Encoding::for_label(encoding.trim().as_bytes())
            .ok_or_else(|| SheetError::UnknownEncoding(encoding.to_string()))?;
        let (text, _) = encoding.decode_without_bom_handling(bytes);

        // Kurze Zeilen werden mit leeren Zellen aufgefüllt
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut raw_rows = Vec::new();
        for record in reader.records() {
            raw_rows.push(record?);
        }

        let kinds: Vec<ColumnKind> = (0..columns.len())
            .map(|col| ColumnKind::infer(raw_rows.iter().map(|row| row.get(col).unwrap_or(""))))
            .collect();

        let rows = raw_rows
            .iter()
            .map(|row| {
                kinds
                    .iter()
                    .enumerate()
                    .map(|(col, kind)| kind.coerce(row.get(col).unwrap_or("")))
                    .collect()
            })
            .collect();

        let index = columns
            .iter()
            .enumerate()
            .map(|(col, name)| (name.clone(), col))
            .collect();

        Ok(Self { columns, index, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fails on the first column the sheet does not carry.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), SheetError> {
        match names.iter().find(|name| !self.index.contains_key(**name)) {
            Some(name) => Err(SheetError::MissingColumn(name.to_string())),
            None => Ok(()),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = SheetRow<'_>> {
        self.rows.iter().map(move |cells| SheetRow { sheet: self, cells })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SheetRow<'a> {
    sheet: &'a Sheet,
    cells: &'a [CellValue],
}

impl<'a> SheetRow<'a> {
    pub fn get(&self, column: &str) -> Result<&'a CellValue, SheetError> {
        self.sheet
            .index
            .get(column)
            .and_then(|col| self.cells.get(*col))
            .ok_or_else(|| SheetError::MissingColumn(column.to_string()))
    }
}
