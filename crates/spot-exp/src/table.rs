use serde::{Deserialize, Serialize};
use spot_core::SpotError;

/// One output column of a [`ResultTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Header label, e.g. `power_rho0.5`.
    pub label: String,
    /// Secondary parameter value the column was computed for.
    pub parameter: f64,
    /// One value per axis row; NaN marks a recorded failure.
    pub values: Vec<f64>,
}

/// Cell that failed while the sweep ran under [`spot_core::FailurePolicy::RecordNan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellFailure {
    /// Row index on the primary axis.
    pub row: usize,
    /// Column index in secondary-value order.
    pub column: usize,
    /// Primary axis value of the cell.
    pub axis_value: f64,
    /// Secondary value of the cell.
    pub parameter: f64,
    /// Error raised by the solver.
    pub error: SpotError,
}

/// Rectangular sweep output: the primary axis followed by one column per
/// secondary value, both in the order they were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Header label of the axis column.
    pub axis_label: String,
    /// Primary axis values.
    pub axis: Vec<f64>,
    /// Output columns.
    pub columns: Vec<Column>,
    /// Cells recorded as NaN, empty unless failures were tolerated.
    #[serde(default)]
    pub failures: Vec<CellFailure>,
}

impl ResultTable {
    /// Number of rows (axis points).
    pub fn row_count(&self) -> usize {
        self.axis.len()
    }

    /// Number of output columns, excluding the axis column.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Tab-separated header line: the axis label then each column label.
    pub fn header(&self) -> String {
        let mut header = self.axis_label.clone();
        for column in &self.columns {
            header.push('\t');
            header.push_str(&column.label);
        }
        header
    }

    /// Column lookup by label.
    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.label == label)
    }

    /// Row-major numeric rows, axis value first.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.axis
            .iter()
            .enumerate()
            .map(|(row, axis_value)| {
                let mut values = Vec::with_capacity(self.columns.len() + 1);
                values.push(*axis_value);
                values.extend(self.columns.iter().map(|column| column.values[row]));
                values
            })
            .collect()
    }
}
