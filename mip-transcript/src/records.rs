use serde::Deserialize;
use serde::Serialize;

/// The direction of optimisation of the recorded instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub name: String,
    #[serde(default)]
    pub objective: f64,
    #[serde(default)]
    pub integer: bool,
}

/// The sense of a row, written with the usual single-letter codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowSense {
    #[serde(rename = "L")]
    LessEqual,
    #[serde(rename = "G")]
    GreaterEqual,
    #[serde(rename = "E")]
    Equal,
    #[serde(rename = "R")]
    Range,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    pub name: String,
    pub sense: RowSense,
    /// The right-hand side. Unused for range rows.
    #[serde(default)]
    pub rhs: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    /// The non-zero `[column, coefficient]` pairs.
    pub coefficients: Vec<(usize, f64)>,
}

/// What the solver reported after one solve call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    #[serde(default)]
    pub proven_infeasible: bool,
    #[serde(default)]
    pub proven_optimal: bool,
    #[serde(default)]
    pub abandoned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<f64>,
    /// The best solution found, indexed by column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Vec<f64>>,
}

/// The resource limits under which the integer solve was recorded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub max_nodes: i32,
    pub time_limit: f64,
}
