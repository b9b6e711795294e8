use std::fmt;

use crate::data::model::Table;

use super::{trunc_dollars, MetricError};

// ---------------------------------------------------------------------------
// Degree levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degree {
    Associate,
    Bachelors,
    Masters,
}

impl Degree {
    pub fn label(self) -> &'static str {
        match self {
            Self::Associate => "Associate's",
            Self::Bachelors => "Bachelor's",
            Self::Masters => "Master's",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Salary statistics
// ---------------------------------------------------------------------------

/// Starting-salary statistics for one degree level.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryStats {
    pub degree: Degree,
    /// Mean starting salary per field of study, in table order, untruncated.
    pub by_field: Vec<(String, f64)>,
    /// Mean of the per-field means, whole dollars.
    pub mean: i64,
    /// Lowest per-field mean, whole dollars.
    pub min: i64,
    /// Highest per-field mean, whole dollars.
    pub max: i64,
}

/// All three degree levels together.
#[derive(Debug, Clone, PartialEq)]
pub struct SalarySummary {
    pub associate: SalaryStats,
    pub undergraduate: SalaryStats,
    pub graduate: SalaryStats,
}

/// Compute [`SalaryStats`] for a single salary table.
pub fn stats(table: &Table, degree: Degree) -> Result<SalaryStats, MetricError> {
    let by_field = table.column_means()?;

    // Table::new guarantees at least one column, so the folds are non-empty.
    let sum: f64 = by_field.iter().map(|(_, m)| m).sum();
    let mean = trunc_dollars(sum / by_field.len() as f64);
    let min = trunc_dollars(by_field.iter().map(|(_, m)| *m).fold(f64::INFINITY, f64::min));
    let max = trunc_dollars(
        by_field
            .iter()
            .map(|(_, m)| *m)
            .fold(f64::NEG_INFINITY, f64::max),
    );

    Ok(SalaryStats {
        degree,
        by_field,
        mean,
        min,
        max,
    })
}

/// Salary statistics for the associate, bachelor's and master's tables.
pub fn summarize(
    associate: &Table,
    undergraduate: &Table,
    graduate: &Table,
) -> Result<SalarySummary, MetricError> {
    Ok(SalarySummary {
        associate: stats(associate, Degree::Associate)?,
        undergraduate: stats(undergraduate, Degree::Bachelors)?,
        graduate: stats(graduate, Degree::Masters)?,
    })
}

/// Relative master's premium per field of study:
/// `(master's mean − bachelor's mean) / bachelor's mean`.
///
/// The two tables must list the same fields; a zero bachelor's mean for a
/// field is a defined error, not an infinite ratio.
pub fn masters_premium(
    undergraduate: &SalaryStats,
    graduate: &SalaryStats,
) -> Result<Vec<(String, f64)>, MetricError> {
    let field_list = |stats: &SalaryStats| {
        stats
            .by_field
            .iter()
            .map(|(f, _)| f.clone())
            .collect::<Vec<_>>()
            .join(", ")
    };

    if graduate.by_field.len() != undergraduate.by_field.len() {
        return Err(MetricError::FieldMismatch {
            left: field_list(undergraduate),
            right: field_list(graduate),
        });
    }

    graduate
        .by_field
        .iter()
        .map(|(field, grad_mean)| {
            let Some((_, ug_mean)) = undergraduate.by_field.iter().find(|(f, _)| f == field)
            else {
                return Err(MetricError::FieldMismatch {
                    left: field_list(undergraduate),
                    right: field_list(graduate),
                });
            };
            if *ug_mean == 0.0 {
                return Err(MetricError::ZeroBaseline {
                    field: field.clone(),
                });
            }
            Ok((field.clone(), (grad_mean - ug_mean) / ug_mean))
        })
        .collect()
}
