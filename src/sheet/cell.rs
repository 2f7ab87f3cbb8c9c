use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Markers the tabular reader treats as a missing value
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Typisierter Zellwert nach Preprocessing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
}

impl CellValue {
    /// Missing values are stored as the integer 0
    pub const MISSING: CellValue = CellValue::Integer(0);

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self, expected: &str) -> bool {
        self.as_text() == Some(expected)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Integer(value) => write!(f, "{}", value),
            CellValue::Decimal(value) => write!(f, "{}", value),
        }
    }
}

/// Spaltentyp, abgeleitet aus allen nicht-leeren Zellen einer Spalte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Decimal,
    Text,
}

impl ColumnKind {
    /// A column is integral if every present cell parses as i64, decimal if
    /// every present cell parses as a decimal, text otherwise.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut kind = ColumnKind::Integer;

        for raw in cells {
            if is_missing(raw) {
                continue;
            }
            let trimmed = raw.trim();
            if kind == ColumnKind::Integer && trimmed.parse::<i64>().is_ok() {
                continue;
            }
            if parse_decimal(trimmed).is_some() {
                kind = ColumnKind::Decimal;
                continue;
            }
            return ColumnKind::Text;
        }

        kind
    }

    /// Konvertiere eine Rohzelle in den Spaltentyp
    pub fn coerce(self, raw: &str) -> CellValue {
        if is_missing(raw) {
            return CellValue::MISSING;
        }

        let trimmed = raw.trim();
        match self {
            ColumnKind::Integer => trimmed
                .parse::<i64>()
                .map(CellValue::Integer)
                .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
            ColumnKind::Decimal => parse_decimal(trimmed)
                .map(CellValue::Decimal)
                .unwrap_or_else(|| CellValue::Text(raw.to_string())),
            ColumnKind::Text => CellValue::Text(raw.to_string()),
        }
    }
}

pub fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

/// Parses from the decimal string form, so `1.3` stays exactly `1.3`.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .map(|value| value.normalize())
}
