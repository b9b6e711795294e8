/// Metric pipeline: derived statistics over the loaded tables.
///
/// Every computation is a pure function of its inputs; nothing is cached
/// between invocations.  Dependency order:
///
/// ```text
///  tuition ─┬─► fees ─────┬─► costs ─┬─► years to even
///  financial┘             │          └─► five-year comparison
///  salaries ──► summary ──┴─► master's premium
/// ```
pub mod category;
pub mod cost;
pub mod fees;
pub mod salary;

use thiserror::Error;

use crate::data::model::TableError;
use crate::data::Datasets;

use category::Category;
use cost::{CostReport, FiveYearComparison};
use fees::FeeReport;
use salary::SalarySummary;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures of the metric pipeline.  All are fatal to the current
/// computation; there is no retry or partial result.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("category sets do not match: [{left}] vs [{right}]")]
    CategoryMismatch { left: String, right: String },

    #[error("categories appear on both sides of a concatenation: {overlap}")]
    CategoryOverlap { overlap: String },

    #[error("salary tables disagree on fields of study: [{left}] vs [{right}]")]
    FieldMismatch { left: String, right: String },

    #[error("mean {degree} salary is zero, break-even years are undefined")]
    ZeroSalary { degree: &'static str },

    #[error("mean bachelor's salary for field '{field}' is zero, premium is undefined")]
    ZeroBaseline { field: String },
}

/// Truncate a dollar amount toward zero.
///
/// Applied after every aggregation step, so later stages combine the
/// already-truncated values rather than re-deriving from the raw means.
pub fn trunc_dollars(value: f64) -> i64 {
    value as i64
}

// ---------------------------------------------------------------------------
// Report – the full derived-metric set
// ---------------------------------------------------------------------------

/// Every derived statistic, computed in one pass over freshly loaded tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub fees: FeeReport,
    pub salaries: SalarySummary,
    /// Relative master's premium per field of study.
    pub masters_premium: Vec<(String, f64)>,
    pub costs: CostReport,
    /// Break-even years per category, undergraduate then graduate.
    pub years_to_even: Vec<(Category, f64)>,
    pub five_year: FiveYearComparison,
}

impl Report {
    /// Run the whole pipeline in dependency order.
    pub fn compute(data: &Datasets) -> Result<Self, MetricError> {
        let fees = fees::fee_with_aid(&data.tuition, &data.financial)?;
        let salaries = salary::summarize(
            &data.salary_associate,
            &data.salary_undergraduate,
            &data.salary_graduate,
        )?;
        let masters_premium =
            salary::masters_premium(&salaries.undergraduate, &salaries.graduate)?;
        let costs = cost::degree_costs(&fees, &salaries)?;
        let years_to_even = cost::years_to_even(&costs, &salaries)?;
        let five_year = cost::five_year_comparison(&costs, &salaries)?;

        log::debug!(
            "Computed report: fee with aid {:?}, break-even {:?}",
            fees.fee_with_aid,
            years_to_even
        );

        Ok(Report {
            fees,
            salaries,
            masters_premium,
            costs,
            years_to_even,
            five_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, Table};

    /// Synthetic in-memory datasets; no filesystem involved.
    fn datasets() -> Datasets {
        let tuition = Table::new(
            "tuition",
            vec![
                Column::new("Year", vec![2015.0, 2016.0]),
                Column::new("Undergrad Public", vec![7500.0, 8500.0]),
                Column::new("Undergrad Private", vec![31_000.0, 33_000.0]),
                Column::new("Graduate Public", vec![11_000.0, 12_000.0]),
                Column::new("Graduate Private", vec![40_000.0, 42_000.0]),
                Column::new("Room and Board", vec![2800.0, 3200.0]),
            ],
        )
        .unwrap();

        let financial = Table::new(
            "financial",
            vec![
                Column::new("Year", vec![2015.0, 2016.0]),
                Column::new("Undergrad Loan", vec![4800.0, 5200.0]),
                Column::new("Undergrad Aid", vec![1900.0, 2100.0]),
                Column::new("Graduate Loan", vec![5800.0, 6200.0]),
                Column::new("Graduate Aid", vec![1400.0, 1600.0]),
            ],
        )
        .unwrap();

        let salary = |name: &str, base: f64| {
            Table::new(
                name,
                vec![
                    Column::new("Engineering", vec![base + 5000.0]),
                    Column::new("Nursing", vec![base - 5000.0]),
                ],
            )
            .unwrap()
        };

        Datasets {
            tuition,
            financial,
            salary_associate: salary("salary_associate", 35_000.0),
            salary_undergraduate: salary("salary_undergraduate", 61_000.0),
            salary_graduate: salary("salary_graduate", 70_000.0),
        }
    }

    #[test]
    fn report_runs_the_whole_chain() {
        let report = Report::compute(&datasets()).unwrap();

        // tuition mean 8000 + room & board mean 3000
        assert_eq!(
            report.fees.total_fee.get(Category::UndergradPublic),
            Some(11_000)
        );
        // 11000 - 2000 undergraduate aid
        assert_eq!(
            report.fees.fee_with_aid.get(Category::UndergradPublic),
            Some(9000)
        );
        // 4 × 9000 + 2 × 35000
        assert_eq!(
            report.costs.undergrad_total.get(Category::UndergradPublic),
            Some(106_000)
        );
        assert_eq!(report.years_to_even.len(), 4);
        assert_eq!(report.masters_premium.len(), 2);
        assert_eq!(report.five_year.tuition.len(), 4);
    }

    #[test]
    fn report_is_idempotent() {
        let data = datasets();
        let a = Report::compute(&data).unwrap();
        let b = Report::compute(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn years_to_even_is_non_negative_here() {
        let report = Report::compute(&datasets()).unwrap();
        assert!(report.years_to_even.iter().all(|(_, y)| *y >= 0.0));
    }
}
