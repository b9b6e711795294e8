/// Data layer: core types, loading, and the loaded dataset bundle.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  named numeric columns, aligned by row
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Datasets  │  tuition, financial, three salary tables
///   └──────────┘
/// ```
pub mod loader;
pub mod model;

use anyhow::{Context, Result};

use crate::config::DatasetPaths;
use model::Table;

// ---------------------------------------------------------------------------
// Datasets – the five loaded tables
// ---------------------------------------------------------------------------

/// Every table the metric pipeline consumes, loaded in one shot.
#[derive(Debug, Clone)]
pub struct Datasets {
    /// Per-year tuition for each institution/degree category + room & board.
    pub tuition: Table,
    /// Per-year loan and aid averages per degree level.
    pub financial: Table,
    /// Starting salaries by field of study, associate's degree.
    pub salary_associate: Table,
    /// Starting salaries by field of study, bachelor's degree.
    pub salary_undergraduate: Table,
    /// Starting salaries by field of study, master's degree.
    pub salary_graduate: Table,
}

impl Datasets {
    /// Load all five datasets from the configured locations.
    ///
    /// Fails on the first unreadable file; there is no partial result.
    pub fn load(paths: &DatasetPaths) -> Result<Self> {
        let load = |path: &std::path::Path, name: &str| {
            loader::load_table(path, name)
                .with_context(|| format!("loading {name} from {}", path.display()))
        };

        let datasets = Datasets {
            tuition: load(&paths.tuition, "tuition")?,
            financial: load(&paths.financial, "financial")?,
            salary_associate: load(&paths.salary_associate, "salary_associate")?,
            salary_undergraduate: load(&paths.salary_undergraduate, "salary_undergraduate")?,
            salary_graduate: load(&paths.salary_graduate, "salary_graduate")?,
        };

        log::info!(
            "Loaded datasets: tuition columns {:?}, financial {}×{}, salaries {}/{}/{} rows",
            datasets.tuition.column_names().collect::<Vec<_>>(),
            datasets.financial.n_rows(),
            datasets.financial.n_cols(),
            datasets.salary_associate.n_rows(),
            datasets.salary_undergraduate.n_rows(),
            datasets.salary_graduate.n_rows(),
        );

        Ok(datasets)
    }
}
