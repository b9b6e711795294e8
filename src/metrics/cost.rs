use super::category::{Category, DollarSeries};
use super::fees::FeeReport;
use super::salary::{Degree, SalarySummary};
use super::MetricError;

/// Years of study assumed for a bachelor's degree.
pub const UNDERGRAD_YEARS: i64 = 4;
/// Years of study assumed for a master's degree, on top of a bachelor's.
pub const GRADUATE_YEARS: i64 = 2;
/// Years of forgone earnings counted as opportunity cost.
pub const OPPORTUNITY_YEARS: i64 = 2;
/// Horizon of the salary-vs-tuition comparison.
pub const SALARY_HORIZON_YEARS: i64 = 5;

// ---------------------------------------------------------------------------
// Total cost with opportunity cost
// ---------------------------------------------------------------------------

/// Tuition and opportunity-cost totals per category.
///
/// Opportunity cost approximates forgone earnings during the years in
/// school: two years of the next-lower degree's mean salary.
#[derive(Debug, Clone, PartialEq)]
pub struct CostReport {
    /// Four years of aid-adjusted fees, undergraduate categories.
    pub undergrad_tuition: DollarSeries,
    /// `undergrad_tuition` plus two years of associate-level mean salary.
    pub undergrad_total: DollarSeries,
    /// Two years of aid-adjusted fees, graduate categories.
    pub graduate_tuition: DollarSeries,
    /// `graduate_tuition` plus the matching undergraduate total
    /// (public on public, private on private).
    pub graduate_with_undergrad: DollarSeries,
    /// `graduate_with_undergrad` plus two years of bachelor's mean salary.
    pub graduate_total: DollarSeries,
}

/// Chain the fee and salary results into degree-cost totals.
pub fn degree_costs(
    fees: &FeeReport,
    salaries: &SalarySummary,
) -> Result<CostReport, MetricError> {
    let undergrad_tuition = fees
        .fee_with_aid
        .select(&Category::UNDERGRAD)?
        .scale(UNDERGRAD_YEARS);
    let undergrad_total = undergrad_tuition.offset(OPPORTUNITY_YEARS * salaries.associate.mean);

    let graduate_tuition = fees
        .fee_with_aid
        .select(&Category::GRADUATE)?
        .scale(GRADUATE_YEARS);
    let graduate_with_undergrad = graduate_tuition.add_undergrad_base(&undergrad_total)?;
    let graduate_total =
        graduate_with_undergrad.offset(OPPORTUNITY_YEARS * salaries.undergraduate.mean);

    Ok(CostReport {
        undergrad_tuition,
        undergrad_total,
        graduate_tuition,
        graduate_with_undergrad,
        graduate_total,
    })
}

// ---------------------------------------------------------------------------
// Years to break even
// ---------------------------------------------------------------------------

/// Per category, the years of post-graduation salary needed to offset the
/// total cost: undergraduate totals over the bachelor's mean, graduate
/// totals over the master's mean.
///
/// A zero mean salary is reported as [`MetricError::ZeroSalary`] instead of
/// producing an infinite ratio.
pub fn years_to_even(
    costs: &CostReport,
    salaries: &SalarySummary,
) -> Result<Vec<(Category, f64)>, MetricError> {
    let ratios = |series: &DollarSeries, mean: i64, degree: Degree| {
        if mean == 0 {
            return Err(MetricError::ZeroSalary {
                degree: degree.label(),
            });
        }
        Ok(series
            .iter()
            .map(|(cat, total)| (cat, total as f64 / mean as f64))
            .collect::<Vec<_>>())
    };

    let mut years = ratios(
        &costs.undergrad_total,
        salaries.undergraduate.mean,
        Degree::Bachelors,
    )?;
    years.extend(ratios(
        &costs.graduate_total,
        salaries.graduate.mean,
        Degree::Masters,
    )?);
    Ok(years)
}

// ---------------------------------------------------------------------------
// Five-year salary vs. tuition
// ---------------------------------------------------------------------------

/// Side-by-side comparison of the degree's tuition cost (no opportunity
/// cost) and five years of the matching level's mean starting salary.
#[derive(Debug, Clone, PartialEq)]
pub struct FiveYearComparison {
    /// Aid-adjusted tuition over the years of the degree, all categories.
    pub tuition: DollarSeries,
    /// Five years of mean salary at the category's degree level.
    pub five_year_salary: DollarSeries,
}

pub fn five_year_comparison(
    costs: &CostReport,
    salaries: &SalarySummary,
) -> Result<FiveYearComparison, MetricError> {
    let tuition = costs.undergrad_tuition.concat(&costs.graduate_tuition)?;

    let five_year_salary = DollarSeries::new(tuition.categories().map(|cat| {
        let mean = if cat.is_undergraduate() {
            salaries.undergraduate.mean
        } else {
            salaries.graduate.mean
        };
        (cat, SALARY_HORIZON_YEARS * mean)
    }));

    Ok(FiveYearComparison {
        tuition,
        five_year_salary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::salary::SalaryStats;

    fn fee_report(ug_fee: i64, grad_fee: i64) -> FeeReport {
        let tuition_avg = DollarSeries::new(Category::ALL.map(|c| (c, 8000)));
        let total_fee = DollarSeries::new(Category::ALL.map(|c| (c, 11_000)));
        let fee_with_aid = DollarSeries::new(Category::ALL.map(|c| {
            (c, if c.is_undergraduate() { ug_fee } else { grad_fee })
        }));
        FeeReport {
            tuition_avg,
            total_fee,
            fee_with_aid,
            undergrad_aid_avg: 2000.0,
            graduate_aid_avg: 1500.0,
            undergrad_loan_avg: 5000.0,
            graduate_loan_avg: 6000.0,
        }
    }

    fn salary_stats(degree: Degree, mean: i64) -> SalaryStats {
        SalaryStats {
            degree,
            by_field: vec![("Engineering".into(), mean as f64)],
            mean,
            min: mean - 5000,
            max: mean + 5000,
        }
    }

    fn salary_summary(assoc: i64, ug: i64, grad: i64) -> SalarySummary {
        SalarySummary {
            associate: salary_stats(Degree::Associate, assoc),
            undergraduate: salary_stats(Degree::Bachelors, ug),
            graduate: salary_stats(Degree::Masters, grad),
        }
    }

    #[test]
    fn undergrad_total_adds_opportunity_cost() {
        let costs = degree_costs(&fee_report(9000, 9500), &salary_summary(35_000, 61_000, 70_000))
            .unwrap();
        // 4 × 9000 + 2 × 35000
        assert_eq!(costs.undergrad_tuition.get(Category::UndergradPublic), Some(36_000));
        assert_eq!(costs.undergrad_total.get(Category::UndergradPublic), Some(106_000));
        assert_eq!(costs.undergrad_total.get(Category::UndergradPrivate), Some(106_000));
    }

    #[test]
    fn graduate_total_chains_undergrad_total() {
        let costs = degree_costs(&fee_report(9000, 9500), &salary_summary(35_000, 61_000, 70_000))
            .unwrap();
        // 2 × 9500, plus the 106000 undergraduate total, plus 2 × 61000
        assert_eq!(costs.graduate_tuition.get(Category::GraduatePublic), Some(19_000));
        assert_eq!(
            costs.graduate_with_undergrad.get(Category::GraduatePublic),
            Some(125_000)
        );
        assert_eq!(costs.graduate_total.get(Category::GraduatePublic), Some(247_000));
    }

    #[test]
    fn years_to_even_covers_all_four_categories() {
        let costs = degree_costs(&fee_report(9000, 9500), &salary_summary(35_000, 53_000, 70_000))
            .unwrap();
        let years = years_to_even(&costs, &salary_summary(35_000, 53_000, 70_000)).unwrap();
        assert_eq!(years.len(), 4);

        let (cat, value) = years[0];
        assert_eq!(cat, Category::UndergradPublic);
        assert!((value - 106_000.0 / 53_000.0).abs() < 1e-12);
        assert!(years.iter().all(|(_, y)| *y >= 0.0));
    }

    #[test]
    fn zero_salary_is_a_defined_error() {
        let costs = degree_costs(&fee_report(9000, 9500), &salary_summary(35_000, 61_000, 70_000))
            .unwrap();
        let err = years_to_even(&costs, &salary_summary(35_000, 0, 70_000)).unwrap_err();
        assert!(matches!(err, MetricError::ZeroSalary { degree: "Bachelor's" }));
    }

    #[test]
    fn five_year_comparison_pairs_tuition_and_salary() {
        let salaries = salary_summary(35_000, 61_000, 70_000);
        let costs = degree_costs(&fee_report(9000, 9500), &salaries).unwrap();
        let cmp = five_year_comparison(&costs, &salaries).unwrap();

        assert_eq!(cmp.tuition.get(Category::UndergradPublic), Some(36_000));
        assert_eq!(cmp.tuition.get(Category::GraduatePrivate), Some(19_000));
        assert_eq!(cmp.five_year_salary.get(Category::UndergradPublic), Some(305_000));
        assert_eq!(cmp.five_year_salary.get(Category::GraduatePublic), Some(350_000));
    }
}
