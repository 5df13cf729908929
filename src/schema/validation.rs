use std::collections::HashMap;

/// Resolved positions of the columns a reader needs, checked once at ingestion.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    /// Position of a column that was part of the validated set.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }
}

/// Validates that a header row carries every required column.
///
/// Header cells are compared after trimming surrounding whitespace. Optional
/// columns are resolved when present and silently ignored otherwise. All
/// missing required columns are reported together.
pub fn validate_headers(
    table: &str,
    headers: &csv::StringRecord,
    required: &[&'static str],
    optional: &[&'static str],
) -> Result<ColumnIndex, SchemaError> {
    let mut positions = HashMap::new();
    let mut missing = Vec::new();

    for &name in required {
        match headers.iter().position(|h| h.trim() == name) {
            Some(pos) => {
                positions.insert(name, pos);
            }
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(SchemaError {
            table: table.to_string(),
            missing,
        });
    }

    for &name in optional {
        if let Some(pos) = headers.iter().position(|h| h.trim() == name) {
            positions.insert(name, pos);
        }
    }

    Ok(ColumnIndex { positions })
}

/// A required column is absent from an input table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{table} is missing required column(s): {}", .missing.join(", "))]
pub struct SchemaError {
    /// Logical name of the table that failed validation
    pub table: String,
    /// Every required column that was not found
    pub missing: Vec<String>,
}
