use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::state::AppState;
use crate::ui::plot::ChartKind;

// ---------------------------------------------------------------------------
// Left side panel – chart selector
// ---------------------------------------------------------------------------

/// Render the left chart-selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Charts");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for kind in ChartKind::ALL {
                if ui
                    .selectable_label(state.selected_chart == kind, kind.title())
                    .clicked()
                {
                    state.selected_chart = kind;
                }
            }

            ui.separator();
            ui.strong("Datasets");
            match &state.datasets {
                Some(ds) => {
                    for table in [
                        &ds.tuition,
                        &ds.financial,
                        &ds.salary_associate,
                        &ds.salary_undergraduate,
                        &ds.salary_graduate,
                    ] {
                        ui.label(format!(
                            "{} — {} rows × {} cols",
                            table.name,
                            table.n_rows(),
                            table.n_cols()
                        ));
                    }
                }
                None => {
                    ui.label("No datasets loaded.");
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open dataset config…").clicked() {
                open_config_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.show_values, "Show values")
            .clicked()
        {
            state.show_values = !state.show_values;
        }

        ui.separator();

        if let Some(ds) = &state.datasets {
            ui.label(format!(
                "{} tuition years · {} fields of study",
                ds.tuition.n_rows(),
                ds.salary_undergraduate.n_cols()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Values panel – the numbers behind the selected chart
// ---------------------------------------------------------------------------

/// Render the values table for the selected chart.
pub fn values_panel(ui: &mut Ui, state: &AppState) {
    let rows = value_rows(state);
    if rows.is_empty() {
        ui.label("No values to show.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(TableColumn::auto().at_least(220.0))
        .column(TableColumn::remainder())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Series");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for (name, value) in rows {
                body.row(16.0, |mut row| {
                    row.col(|ui| {
                        ui.label(name);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
        });
}

fn value_rows(state: &AppState) -> Vec<(String, String)> {
    let (Some(datasets), Some(report)) = (&state.datasets, &state.report) else {
        return Vec::new();
    };

    let dollars = |v: i64| format!("${v}");

    match state.selected_chart {
        ChartKind::TuitionByYear => datasets
            .tuition
            .columns
            .iter()
            .filter(|c| c.name != "Year")
            .filter_map(|c| Some((format!("{} (mean)", c.name), dollars(c.mean()? as i64))))
            .collect(),
        ChartKind::AverageTuition => report
            .fees
            .total_fee
            .iter()
            .map(|(cat, total)| {
                let tuition = report.fees.tuition_avg.get(cat).unwrap_or(0);
                (
                    cat.column_label().to_string(),
                    format!("{} total, {} tuition only", dollars(total), dollars(tuition)),
                )
            })
            .collect(),
        ChartKind::FinancialTrends => datasets
            .financial
            .columns
            .iter()
            .filter(|c| c.name != "Year")
            .filter_map(|c| Some((format!("{} (mean)", c.name), dollars(c.mean()? as i64))))
            .collect(),
        ChartKind::CostWithAid => report
            .fees
            .fee_with_aid
            .iter()
            .map(|(cat, with_aid)| {
                let total = report.fees.total_fee.get(cat).unwrap_or(0);
                (
                    cat.column_label().to_string(),
                    format!("{} of {} after aid", dollars(with_aid), dollars(total)),
                )
            })
            .collect(),
        ChartKind::SalaryByField => report
            .salaries
            .graduate
            .by_field
            .iter()
            .zip(&report.masters_premium)
            .map(|((field, grad_mean), (_, premium))| {
                (
                    field.clone(),
                    format!(
                        "Master's ${:.0}, premium +{:.1}%",
                        grad_mean,
                        premium * 100.0
                    ),
                )
            })
            .collect(),
        ChartKind::SalaryRange => [
            &report.salaries.associate,
            &report.salaries.undergraduate,
            &report.salaries.graduate,
        ]
        .iter()
        .map(|s| {
            (
                s.degree.label().to_string(),
                format!(
                    "min {}, mean {}, max {}",
                    dollars(s.min),
                    dollars(s.mean),
                    dollars(s.max)
                ),
            )
        })
        .collect(),
        ChartKind::UndergradTotal => report
            .costs
            .undergrad_total
            .iter()
            .map(|(cat, total)| {
                let tuition = report.costs.undergrad_tuition.get(cat).unwrap_or(0);
                (
                    cat.column_label().to_string(),
                    format!("{} total, {} tuition", dollars(total), dollars(tuition)),
                )
            })
            .collect(),
        ChartKind::GraduateTotal => report
            .costs
            .graduate_total
            .iter()
            .map(|(cat, total)| {
                let with_ug = report.costs.graduate_with_undergrad.get(cat).unwrap_or(0);
                (
                    cat.column_label().to_string(),
                    format!(
                        "{} total, {} before opportunity cost",
                        dollars(total),
                        dollars(with_ug)
                    ),
                )
            })
            .collect(),
        ChartKind::YearsToEven => report
            .years_to_even
            .iter()
            .map(|(cat, years)| (cat.column_label().to_string(), format!("{years:.1} years")))
            .collect(),
        ChartKind::FiveYearSalary => report
            .five_year
            .tuition
            .iter()
            .map(|(cat, tuition)| {
                let salary = report.five_year.five_year_salary.get(cat).unwrap_or(0);
                (
                    cat.column_label().to_string(),
                    format!("{} tuition vs {} salary", dollars(tuition), dollars(salary)),
                )
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open dataset folder")
        .pick_folder();

    if let Some(path) = folder {
        state.load_path(&path);
    }
}

pub fn open_config_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset config")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
