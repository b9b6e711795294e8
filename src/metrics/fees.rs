use crate::data::model::Table;

use super::category::{Category, DollarSeries};
use super::{trunc_dollars, MetricError};

// Column labels in the financial dataset.
pub const UNDERGRAD_LOAN: &str = "Undergrad Loan";
pub const UNDERGRAD_AID: &str = "Undergrad Aid";
pub const GRADUATE_LOAN: &str = "Graduate Loan";
pub const GRADUATE_AID: &str = "Graduate Aid";

/// Column label in the tuition dataset.
pub const ROOM_AND_BOARD: &str = "Room and Board";

// ---------------------------------------------------------------------------
// Fee-with-aid
// ---------------------------------------------------------------------------

/// Averaged fees per category, before and after financial aid.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeReport {
    /// Mean tuition per category, without room & board.
    pub tuition_avg: DollarSeries,
    /// Mean tuition plus mean room & board per category.
    pub total_fee: DollarSeries,
    /// Total fee minus the degree level's mean aid.
    pub fee_with_aid: DollarSeries,
    pub undergrad_aid_avg: f64,
    pub graduate_aid_avg: f64,
    pub undergrad_loan_avg: f64,
    pub graduate_loan_avg: f64,
}

/// Compute averaged fees with financial aid from the tuition and financial
/// tables.
///
/// Undergraduate categories subtract the mean undergraduate aid, graduate
/// categories the mean graduate aid.  Each per-category value is truncated
/// to whole dollars before downstream stages consume it.
pub fn fee_with_aid(tuition: &Table, financial: &Table) -> Result<FeeReport, MetricError> {
    let room_board_avg = tuition.column_mean(ROOM_AND_BOARD)?;

    let mut tuition_avg = Vec::with_capacity(Category::ALL.len());
    let mut total_fee = Vec::with_capacity(Category::ALL.len());
    for cat in Category::ALL {
        let mean = tuition.column_mean(cat.column_label())?;
        tuition_avg.push((cat, trunc_dollars(mean)));
        total_fee.push((cat, trunc_dollars(mean + room_board_avg)));
    }
    let tuition_avg = DollarSeries::new(tuition_avg);
    let total_fee = DollarSeries::new(total_fee);

    let undergrad_loan_avg = financial.column_mean(UNDERGRAD_LOAN)?;
    let undergrad_aid_avg = financial.column_mean(UNDERGRAD_AID)?;
    let graduate_loan_avg = financial.column_mean(GRADUATE_LOAN)?;
    let graduate_aid_avg = financial.column_mean(GRADUATE_AID)?;

    let fee_with_aid = DollarSeries::new(total_fee.iter().map(|(cat, fee)| {
        let aid = if cat.is_undergraduate() {
            undergrad_aid_avg
        } else {
            graduate_aid_avg
        };
        (cat, trunc_dollars(fee as f64 - aid))
    }));

    Ok(FeeReport {
        tuition_avg,
        total_fee,
        fee_with_aid,
        undergrad_aid_avg,
        graduate_aid_avg,
        undergrad_loan_avg,
        graduate_loan_avg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn tuition_table() -> Table {
        Table::new(
            "tuition",
            vec![
                Column::new("Undergrad Public", vec![8000.0]),
                Column::new("Undergrad Private", vec![8000.0]),
                Column::new("Graduate Public", vec![8000.0]),
                Column::new("Graduate Private", vec![8000.0]),
                Column::new("Room and Board", vec![3000.0]),
            ],
        )
        .unwrap()
    }

    fn financial_table(ug_aid: f64, grad_aid: f64) -> Table {
        Table::new(
            "financial",
            vec![
                Column::new("Undergrad Loan", vec![5000.0]),
                Column::new("Undergrad Aid", vec![ug_aid]),
                Column::new("Graduate Loan", vec![6000.0]),
                Column::new("Graduate Aid", vec![grad_aid]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn total_fee_adds_room_and_board() {
        let report = fee_with_aid(&tuition_table(), &financial_table(2000.0, 1500.0)).unwrap();
        for cat in Category::ALL {
            assert_eq!(report.total_fee.get(cat), Some(11_000));
        }
    }

    #[test]
    fn aid_is_subtracted_per_degree_level() {
        let report = fee_with_aid(&tuition_table(), &financial_table(2000.0, 1500.0)).unwrap();
        assert_eq!(report.fee_with_aid.get(Category::UndergradPublic), Some(9000));
        assert_eq!(report.fee_with_aid.get(Category::UndergradPrivate), Some(9000));
        assert_eq!(report.fee_with_aid.get(Category::GraduatePublic), Some(9500));
        assert_eq!(report.fee_with_aid.get(Category::GraduatePrivate), Some(9500));
        assert_eq!(report.undergrad_aid_avg, 2000.0);
        assert_eq!(report.graduate_aid_avg, 1500.0);
    }

    #[test]
    fn fee_with_aid_equals_truncated_difference() {
        // Fractional means: the identity holds against the truncated values.
        let tuition = Table::new(
            "tuition",
            vec![
                Column::new("Undergrad Public", vec![8000.0, 8001.0]),
                Column::new("Undergrad Private", vec![30_000.0, 30_001.0]),
                Column::new("Graduate Public", vec![11_000.0, 11_001.0]),
                Column::new("Graduate Private", vec![40_000.0, 40_001.0]),
                Column::new("Room and Board", vec![3000.0, 3001.0]),
            ],
        )
        .unwrap();
        let report = fee_with_aid(&tuition, &financial_table(2000.5, 1500.5)).unwrap();

        for (cat, value) in report.fee_with_aid.iter() {
            let aid = if cat.is_undergraduate() { 2000.5 } else { 1500.5 };
            let total = report.total_fee.get(cat).unwrap();
            assert_eq!(value, trunc_dollars(total as f64 - aid));
        }
        // Truncation happens per step: total fee 8000.5 + 3000.5 → 11001,
        // then 11001 - 2000.5 → 9000 (not 9000.5 rounded).
        assert_eq!(report.total_fee.get(Category::UndergradPublic), Some(11_001));
        assert_eq!(report.fee_with_aid.get(Category::UndergradPublic), Some(9000));
    }

    #[test]
    fn missing_category_column_fails() {
        let tuition = Table::new(
            "tuition",
            vec![
                Column::new("Undergrad Public", vec![8000.0]),
                Column::new("Room and Board", vec![3000.0]),
            ],
        )
        .unwrap();
        let err = fee_with_aid(&tuition, &financial_table(2000.0, 1500.0)).unwrap_err();
        assert!(err.to_string().contains("Undergrad Private"));
    }

    #[test]
    fn missing_aid_column_fails() {
        let financial = Table::new(
            "financial",
            vec![Column::new("Undergrad Loan", vec![5000.0])],
        )
        .unwrap();
        assert!(fee_with_aid(&tuition_table(), &financial).is_err());
    }
}
