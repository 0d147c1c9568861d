use clap::ValueEnum;
use fnv::FnvHashSet;
use thiserror::Error;

use crate::engine::SolverEngine;

/// The direction of optimisation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ObjectiveSense {
    #[default]
    Minimize,
    Maximize,
}

/// The relational operator of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowSense {
    LessEqual,
    GreaterEqual,
    Equal,
    /// `lower <= lhs <= upper`
    Range,
}

/// A variable of the model. Its index is its position in [`Model::columns`].
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub objective: f64,
    pub is_integer: bool,
}

impl Column {
    pub fn continuous(name: impl Into<String>, objective: f64) -> Column {
        Column {
            name: name.into(),
            objective,
            is_integer: false,
        }
    }

    pub fn integer(name: impl Into<String>, objective: f64) -> Column {
        Column {
            name: name.into(),
            objective,
            is_integer: true,
        }
    }
}

/// A linear constraint of the model. Its index is its position in [`Model::rows`].
///
/// `lower` and `upper` are only meaningful for [`RowSense::Range`]. For the other senses they
/// mirror the right-hand side on the bounded side and are infinite on the other.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub name: String,
    pub sense: RowSense,
    pub rhs: f64,
    pub lower: f64,
    pub upper: f64,
    /// The non-zero `(column index, coefficient)` pairs of the row.
    pub coefficients: Vec<(usize, f64)>,
}

impl Row {
    pub fn less_equal(name: impl Into<String>, coefficients: Vec<(usize, f64)>, rhs: f64) -> Row {
        Row {
            name: name.into(),
            sense: RowSense::LessEqual,
            rhs,
            lower: f64::NEG_INFINITY,
            upper: rhs,
            coefficients,
        }
    }

    pub fn greater_equal(
        name: impl Into<String>,
        coefficients: Vec<(usize, f64)>,
        rhs: f64,
    ) -> Row {
        Row {
            name: name.into(),
            sense: RowSense::GreaterEqual,
            rhs,
            lower: rhs,
            upper: f64::INFINITY,
            coefficients,
        }
    }

    pub fn equal(name: impl Into<String>, coefficients: Vec<(usize, f64)>, rhs: f64) -> Row {
        Row {
            name: name.into(),
            sense: RowSense::Equal,
            rhs,
            lower: rhs,
            upper: rhs,
            coefficients,
        }
    }

    pub fn range(
        name: impl Into<String>,
        coefficients: Vec<(usize, f64)>,
        lower: f64,
        upper: f64,
    ) -> Row {
        Row {
            name: name.into(),
            sense: RowSense::Range,
            rhs: upper,
            lower,
            upper,
            coefficients,
        }
    }

    /// The left-hand side of the row under the given solution.
    pub fn activity(&self, solution: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .map(|&(column, coefficient)| coefficient * solution[column])
            .sum()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("row '{row}' references column {column}, but the model has {num_columns} columns")]
    UnknownColumn {
        row: String,
        column: usize,
        num_columns: usize,
    },
    #[error("row '{row}' references column {column} more than once")]
    DuplicateColumn { row: String, column: usize },
}

/// The metadata of a problem instance, as needed to recompute objective values and constraint
/// activities from a solution vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    sense: ObjectiveSense,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Model {
    /// Create a model, checking that every row only references existing columns and mentions
    /// each of them at most once.
    pub fn new(
        sense: ObjectiveSense,
        columns: Vec<Column>,
        rows: Vec<Row>,
    ) -> Result<Model, ModelError> {
        let num_columns = columns.len();

        for row in &rows {
            let mut seen = FnvHashSet::default();

            for &(column, _) in &row.coefficients {
                if column >= num_columns {
                    return Err(ModelError::UnknownColumn {
                        row: row.name.clone(),
                        column,
                        num_columns,
                    });
                }

                if !seen.insert(column) {
                    return Err(ModelError::DuplicateColumn {
                        row: row.name.clone(),
                        column,
                    });
                }
            }
        }

        Ok(Model {
            sense,
            columns,
            rows,
        })
    }

    /// Read the model metadata of the instance loaded in `engine`.
    pub fn from_engine<Engine: SolverEngine + ?Sized>(
        engine: &Engine,
    ) -> Result<Model, ModelError> {
        let columns = (0..engine.num_cols()).map(|j| engine.column(j)).collect();
        let rows = (0..engine.num_rows()).map(|i| engine.row(i)).collect();

        Model::new(engine.objective_sense(), columns, rows)
    }

    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// `sum(objective[j] * solution[j])` over all columns.
    pub fn objective_value(&self, solution: &[f64]) -> f64 {
        self.columns
            .iter()
            .zip(solution)
            .map(|(column, value)| column.objective * value)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_column_is_rejected() {
        let result = Model::new(
            ObjectiveSense::Minimize,
            vec![Column::continuous("x", 1.0)],
            vec![Row::less_equal("c", vec![(0, 1.0), (1, 1.0)], 4.0)],
        );

        assert_eq!(
            result,
            Err(ModelError::UnknownColumn {
                row: "c".to_owned(),
                column: 1,
                num_columns: 1
            })
        );
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let result = Model::new(
            ObjectiveSense::Minimize,
            vec![Column::continuous("x", 1.0)],
            vec![Row::equal("c", vec![(0, 1.0), (0, 2.0)], 4.0)],
        );

        assert_eq!(
            result,
            Err(ModelError::DuplicateColumn {
                row: "c".to_owned(),
                column: 0
            })
        );
    }

    #[test]
    fn activity_and_objective() {
        let model = Model::new(
            ObjectiveSense::Maximize,
            vec![Column::integer("x", 3.0), Column::continuous("y", -1.0)],
            vec![Row::range("r", vec![(1, 2.0), (0, 1.0)], 1.0, 8.0)],
        )
        .expect("valid model");

        let solution = [2.0, 1.5];

        assert_eq!(model.objective_value(&solution), 4.5);
        assert_eq!(model.rows()[0].activity(&solution), 5.0);
        assert_eq!(model.rows()[0].rhs, 8.0);
    }
}
