// Tabular query result domain model

/// Column-oriented result of a broker query: ordered column names, the
/// engine's loosely-typed column metadata, and row-aligned scalar values.
/// Immutable once produced; the cache hands out clones.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub column_types: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl Table {
    pub fn new(
        columns: Vec<String>,
        column_types: Vec<String>,
        rows: Vec<Vec<serde_json::Value>>,
    ) -> Self {
        Self {
            columns,
            column_types,
            rows,
        }
    }

    /// Empty result with no schema (broker omits the result table entirely
    /// for some degenerate queries).
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            column_types: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
