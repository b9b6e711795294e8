use std::ops::RangeInclusive;

use eframe::egui::{Align2, Color32, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoint,
    PlotPoints, PlotUi, Text,
};

use crate::color;
use crate::data::model::Table;
use crate::metrics::category::DollarSeries;
use crate::metrics::Report;
use crate::state::AppState;

/// Index column treated as the x axis in the per-year datasets.
const YEAR: &str = "Year";

// ---------------------------------------------------------------------------
// Chart catalogue
// ---------------------------------------------------------------------------

/// Every chart the app can render, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    TuitionByYear,
    AverageTuition,
    FinancialTrends,
    CostWithAid,
    SalaryByField,
    SalaryRange,
    UndergradTotal,
    GraduateTotal,
    YearsToEven,
    FiveYearSalary,
}

impl ChartKind {
    pub const ALL: [Self; 10] = [
        Self::TuitionByYear,
        Self::AverageTuition,
        Self::FinancialTrends,
        Self::CostWithAid,
        Self::SalaryByField,
        Self::SalaryRange,
        Self::UndergradTotal,
        Self::GraduateTotal,
        Self::YearsToEven,
        Self::FiveYearSalary,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::TuitionByYear => "Tuition and Fees",
            Self::AverageTuition => "Averaged Tuition Cost with Room & Board",
            Self::FinancialTrends => "Financial Aids and Loans",
            Self::CostWithAid => "Averaged Cost with Financial Aids",
            Self::SalaryByField => "Averaged Starting Salary",
            Self::SalaryRange => "Range of Starting Salary",
            Self::UndergradTotal => "Total Cost of Bachelor's with Opportunity Cost",
            Self::GraduateTotal => "Total Cost of Master's with Opportunity Cost",
            Self::YearsToEven => "Years to Even Tuition & Opportunity Cost",
            Self::FiveYearSalary => "Salary over 5 Years vs. Tuition & Fees",
        }
    }
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the selected chart in the central panel.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    let (Some(datasets), Some(report)) = (&state.datasets, &state.report) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset folder to view charts  (File → Open…)");
        });
        return;
    };

    ui.heading(state.selected_chart.title());

    match state.selected_chart {
        ChartKind::TuitionByYear => tuition_by_year(ui, &datasets.tuition),
        ChartKind::AverageTuition => average_tuition(ui, report),
        ChartKind::FinancialTrends => financial_trends(ui, &datasets.financial),
        ChartKind::CostWithAid => cost_with_aid(ui, report),
        ChartKind::SalaryByField => salary_by_field(ui, report),
        ChartKind::SalaryRange => salary_range(ui, report),
        ChartKind::UndergradTotal => undergrad_total(ui, report),
        ChartKind::GraduateTotal => graduate_total(ui, report),
        ChartKind::YearsToEven => years_to_even(ui, report),
        ChartKind::FiveYearSalary => five_year_salary(ui, report),
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn dollars(v: f64) -> String {
    format!("${}", v as i64)
}

/// Year values for the x axis; falls back to the row index when the dataset
/// has no explicit year column.
fn year_axis(table: &Table) -> Vec<f64> {
    table
        .column(YEAR)
        .map(|c| c.values.clone())
        .unwrap_or_else(|_| (0..table.n_rows()).map(|i| i as f64).collect())
}

/// One horizontal bar per row index.
fn index_bars(values: &[f64], width: f64) -> Vec<Bar> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Bar::new(i as f64, v).width(width))
        .collect()
}

/// Axis formatter mapping integer grid marks to the given labels.
fn axis_labels(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }
}

/// Write a text label to the right of each horizontal bar.
fn bar_labels(plot_ui: &mut PlotUi, anchors: &[f64], labels: &[String], pad: f64) {
    for (i, (&x, label)) in anchors.iter().zip(labels).enumerate() {
        plot_ui.text(
            Text::new(PlotPoint::new(x + pad, i as f64), label.clone())
                .anchor(Align2::LEFT_CENTER)
                .color(Color32::DARK_GRAY),
        );
    }
}

fn series_values(series: &DollarSeries) -> Vec<f64> {
    series.iter().map(|(_, v)| v as f64).collect()
}

fn series_labels(series: &DollarSeries) -> Vec<String> {
    series.categories().map(|c| c.column_label().to_string()).collect()
}

fn short_series_labels(series: &DollarSeries) -> Vec<String> {
    series.categories().map(|c| c.short_label().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

/// Grouped bars per year for every tuition series (categories + room & board).
fn tuition_by_year(ui: &mut Ui, tuition: &Table) {
    let years = year_axis(tuition);
    let series: Vec<_> = tuition.columns.iter().filter(|c| c.name != YEAR).collect();
    let colors = color::series_colors(series.len());

    let group_width = 0.8;
    let bar_width = group_width / series.len().max(1) as f64;

    Plot::new("tuition_by_year")
        .legend(Legend::default())
        .x_axis_label("Years")
        .y_axis_label("Dollars ($)")
        .show(ui, |plot_ui| {
            for (s_idx, col) in series.iter().enumerate() {
                let offset = (s_idx as f64 + 0.5) * bar_width - group_width / 2.0;
                let bars: Vec<Bar> = years
                    .iter()
                    .zip(&col.values)
                    .map(|(&year, &v)| Bar::new(year + offset, v).width(bar_width))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&col.name).color(colors[s_idx]));
            }
        });
}

/// Horizontal bars: tuition + room & board, with the tuition-only average
/// drawn on top.
fn average_tuition(ui: &mut Ui, report: &Report) {
    let total = series_values(&report.fees.total_fee);
    let tuition_only = series_values(&report.fees.tuition_avg);
    let labels = series_labels(&report.fees.total_fee);
    let value_texts: Vec<String> = total.iter().map(|&v| dollars(v)).collect();
    let max = total.iter().cloned().fold(0.0, f64::max);

    Plot::new("average_tuition")
        .legend(Legend::default())
        .x_axis_label("Dollars ($)")
        .y_axis_formatter(axis_labels(labels))
        .include_x(0.0)
        .include_x(max * 1.25)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(index_bars(&total, 0.6))
                    .horizontal()
                    .name("Room & Board")
                    .color(color::ACCENT),
            );
            plot_ui.bar_chart(
                BarChart::new(index_bars(&tuition_only, 0.6))
                    .horizontal()
                    .name("Tuition & Fees")
                    .color(color::PRIMARY),
            );
            bar_labels(plot_ui, &total, &value_texts, max * 0.02);
        });
}

/// Loan and aid averages per year, as lines.
fn financial_trends(ui: &mut Ui, financial: &Table) {
    let years = year_axis(financial);
    let series: Vec<_> = financial.columns.iter().filter(|c| c.name != YEAR).collect();
    let colors = color::series_colors(series.len());

    Plot::new("financial_trends")
        .legend(Legend::default())
        .x_axis_label("Years")
        .y_axis_label("Dollars ($)")
        .show(ui, |plot_ui| {
            for (s_idx, col) in series.iter().enumerate() {
                let points: PlotPoints = years
                    .iter()
                    .zip(&col.values)
                    .map(|(&x, &y)| [x, y])
                    .collect();
                plot_ui.line(Line::new(points).name(&col.name).color(colors[s_idx]).width(2.0));
            }
        });
}

/// Horizontal bars: total fee behind (muted), fee with aid in front.
fn cost_with_aid(ui: &mut Ui, report: &Report) {
    let total = series_values(&report.fees.total_fee);
    let with_aid = series_values(&report.fees.fee_with_aid);
    let labels = series_labels(&report.fees.total_fee);
    let value_texts: Vec<String> = with_aid.iter().map(|&v| dollars(v)).collect();
    let max = total.iter().cloned().fold(0.0, f64::max);

    Plot::new("cost_with_aid")
        .legend(Legend::default())
        .x_axis_label("Dollars ($)")
        .y_axis_formatter(axis_labels(labels))
        .include_x(0.0)
        .include_x(max * 1.25)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(index_bars(&total, 0.6))
                    .horizontal()
                    .name("Difference")
                    .color(color::MUTED.gamma_multiply(0.5)),
            );
            plot_ui.bar_chart(
                BarChart::new(index_bars(&with_aid, 0.6))
                    .horizontal()
                    .name("With Financial Aids")
                    .color(color::PRIMARY),
            );
            bar_labels(plot_ui, &total, &value_texts, max * 0.02);
        });
}

/// Master's vs. bachelor's vs. associate mean salary per field of study,
/// with the master's premium written next to the bars.
fn salary_by_field(ui: &mut Ui, report: &Report) {
    let grad = &report.salaries.graduate;
    let ug = &report.salaries.undergraduate;
    let assoc = &report.salaries.associate;

    let fields: Vec<String> = grad.by_field.iter().map(|(f, _)| f.clone()).collect();
    let lookup = |stats: &crate::metrics::salary::SalaryStats, field: &str| {
        stats
            .by_field
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| *m)
            .unwrap_or(0.0)
    };

    let grad_means: Vec<f64> = fields.iter().map(|f| lookup(grad, f)).collect();
    let ug_means: Vec<f64> = fields.iter().map(|f| lookup(ug, f)).collect();
    let assoc_means: Vec<f64> = fields.iter().map(|f| lookup(assoc, f)).collect();
    let max = grad_means.iter().cloned().fold(0.0, f64::max);

    // Premium labels line up with the graduate bars by construction.
    let premium_texts: Vec<String> = report
        .masters_premium
        .iter()
        .map(|(_, p)| format!("+{:.1}%", p * 100.0))
        .collect();

    Plot::new("salary_by_field")
        .legend(Legend::default())
        .x_axis_label("Dollars ($)")
        .y_axis_formatter(axis_labels(fields))
        .include_x(0.0)
        .include_x(max * 1.25)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(index_bars(&grad_means, 0.7))
                    .horizontal()
                    .name("Master's")
                    .color(color::ACCENT),
            );
            plot_ui.bar_chart(
                BarChart::new(index_bars(&ug_means, 0.7))
                    .horizontal()
                    .name("Bachelor's")
                    .color(color::PRIMARY),
            );
            plot_ui.bar_chart(
                BarChart::new(index_bars(&assoc_means, 0.7))
                    .horizontal()
                    .name("Associate's")
                    .color(color::TERTIARY),
            );
            bar_labels(plot_ui, &grad_means, &premium_texts, max * 0.01);
        });
}

/// Min / mean / max starting salary per degree level.
fn salary_range(ui: &mut Ui, report: &Report) {
    let stats = [
        &report.salaries.associate,
        &report.salaries.undergraduate,
        &report.salaries.graduate,
    ];
    let labels: Vec<String> = stats.iter().map(|s| s.degree.label().to_string()).collect();
    let colors = color::series_colors(stats.len());

    let boxes: Vec<BoxElem> = stats
        .iter()
        .enumerate()
        .map(|(i, s)| {
            // Box spans min..max with the median line at the mean; the
            // summary has no quartiles to show.
            let spread = BoxSpread::new(
                s.min as f64,
                s.min as f64,
                s.mean as f64,
                s.max as f64,
                s.max as f64,
            );
            BoxElem::new(i as f64, spread)
                .name(s.degree.label())
                .fill(colors[i].gamma_multiply(0.35))
                .stroke(Stroke::new(1.5, colors[i]))
        })
        .collect();

    Plot::new("salary_range")
        .x_axis_formatter(axis_labels(labels))
        .y_axis_label("Dollars ($)")
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}

/// Bachelor's total cost: tuition with the opportunity cost stacked behind.
fn undergrad_total(ui: &mut Ui, report: &Report) {
    let total = series_values(&report.costs.undergrad_total);
    let tuition = series_values(&report.costs.undergrad_tuition);
    let labels = short_series_labels(&report.costs.undergrad_total);
    let value_texts: Vec<String> = total.iter().map(|&v| dollars(v)).collect();
    let max = total.iter().cloned().fold(0.0, f64::max);

    Plot::new("undergrad_total")
        .legend(Legend::default())
        .x_axis_label("Dollars ($)")
        .y_axis_formatter(axis_labels(labels))
        .include_x(0.0)
        .include_x(max * 1.3)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(index_bars(&total, 0.5))
                    .horizontal()
                    .name("Opportunity Cost")
                    .color(color::ACCENT),
            );
            plot_ui.bar_chart(
                BarChart::new(index_bars(&tuition, 0.5))
                    .horizontal()
                    .name("Tuition & Fee")
                    .color(color::PRIMARY),
            );
            bar_labels(plot_ui, &total, &value_texts, max * 0.02);
        });
}

/// Master's total cost: full total, tuition + bachelor's, and the
/// bachelor's total alone (public on public, private on private).
fn graduate_total(ui: &mut Ui, report: &Report) {
    let total = series_values(&report.costs.graduate_total);
    let with_ug = series_values(&report.costs.graduate_with_undergrad);
    let labels = short_series_labels(&report.costs.graduate_total);

    // Undergraduate totals re-keyed onto the graduate rows.
    let ug_base: Vec<f64> = report
        .costs
        .graduate_total
        .categories()
        .map(|c| {
            report
                .costs
                .undergrad_total
                .get(c.undergrad_counterpart())
                .unwrap_or(0) as f64
        })
        .collect();

    let value_texts: Vec<String> = total.iter().map(|&v| dollars(v)).collect();
    let max = total.iter().cloned().fold(0.0, f64::max);

    Plot::new("graduate_total")
        .legend(Legend::default())
        .x_axis_label("Dollars ($)")
        .y_axis_formatter(axis_labels(labels))
        .include_x(0.0)
        .include_x(max * 1.3)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(index_bars(&total, 0.5))
                    .horizontal()
                    .name("Opportunity Cost")
                    .color(color::ACCENT),
            );
            plot_ui.bar_chart(
                BarChart::new(index_bars(&with_ug, 0.5))
                    .horizontal()
                    .name("Tuition & Fee")
                    .color(color::PRIMARY),
            );
            plot_ui.bar_chart(
                BarChart::new(index_bars(&ug_base, 0.5))
                    .horizontal()
                    .name("Bachelor's")
                    .color(color::MUTED),
            );
            bar_labels(plot_ui, &total, &value_texts, max * 0.02);
        });
}

/// Break-even years per category.
fn years_to_even(ui: &mut Ui, report: &Report) {
    let values: Vec<f64> = report.years_to_even.iter().map(|(_, y)| *y).collect();
    let labels: Vec<String> = report
        .years_to_even
        .iter()
        .map(|(c, _)| c.column_label().to_string())
        .collect();
    let colors = color::series_colors(values.len());
    let value_texts: Vec<String> = values.iter().map(|y| format!("{y:.1} Years")).collect();
    let max = values.iter().cloned().fold(0.0, f64::max);

    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, &y)| Bar::new(i as f64, y).width(0.6).fill(colors[i]))
        .collect();

    Plot::new("years_to_even")
        .x_axis_label("Years")
        .y_axis_formatter(axis_labels(labels))
        .include_x(0.0)
        .include_x(max * 1.3)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
            bar_labels(plot_ui, &values, &value_texts, max * 0.02);
        });
}

/// Degree-years tuition next to five years of mean salary, per category.
fn five_year_salary(ui: &mut Ui, report: &Report) {
    let tuition = series_values(&report.five_year.tuition);
    let salary = series_values(&report.five_year.five_year_salary);
    let labels = series_labels(&report.five_year.tuition);
    let max = salary
        .iter()
        .chain(tuition.iter())
        .cloned()
        .fold(0.0, f64::max);

    let paired = |values: &[f64], offset: f64| -> Vec<Bar> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Bar::new(i as f64 + offset, v).width(0.35))
            .collect()
    };

    Plot::new("five_year_salary")
        .legend(Legend::default())
        .x_axis_label("Dollars ($)")
        .y_axis_formatter(axis_labels(labels))
        .include_x(0.0)
        .include_x(max * 1.15)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(paired(&tuition, -0.2))
                    .horizontal()
                    .name("Tuition & Fee")
                    .color(color::PRIMARY),
            );
            plot_ui.bar_chart(
                BarChart::new(paired(&salary, 0.2))
                    .horizontal()
                    .name("Salary over 5 Years")
                    .color(color::ACCENT),
            );
        });
}
