use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DatasetPaths – where the five datasets live
// ---------------------------------------------------------------------------

/// Extensions the loader understands, in lookup order.
const EXTENSIONS: [&str; 4] = ["parquet", "pq", "csv", "json"];

/// File stems expected inside a dataset directory.
const STEMS: [&str; 5] = [
    "tuition",
    "financial",
    "salary_associate",
    "salary_undergraduate",
    "salary_graduate",
];

/// Locations of the five input datasets, injected at the pipeline's entry
/// point.  Nothing below the configuration layer touches default paths.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetPaths {
    pub tuition: PathBuf,
    pub financial: PathBuf,
    pub salary_associate: PathBuf,
    pub salary_undergraduate: PathBuf,
    pub salary_graduate: PathBuf,
}

impl DatasetPaths {
    /// Resolve the datasets inside `dir` by filename convention:
    /// `<stem>.<ext>` with `<ext>` one of parquet / pq / csv / json.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let find = |stem: &str| -> Result<PathBuf> {
            for ext in EXTENSIONS {
                let candidate = dir.join(format!("{stem}.{ext}"));
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
            bail!(
                "no {stem}.{{parquet,pq,csv,json}} in {}",
                dir.display()
            );
        };

        Ok(DatasetPaths {
            tuition: find(STEMS[0])?,
            financial: find(STEMS[1])?,
            salary_associate: find(STEMS[2])?,
            salary_undergraduate: find(STEMS[3])?,
            salary_graduate: find(STEMS[4])?,
        })
    }

    /// Read a JSON config file mapping dataset names to paths:
    ///
    /// ```json
    /// {
    ///   "tuition": "data/tuition.parquet",
    ///   "financial": "data/financial.parquet",
    ///   "salary_associate": "data/salary_associate.csv",
    ///   "salary_undergraduate": "data/salary_undergraduate.csv",
    ///   "salary_graduate": "data/salary_graduate.csv"
    /// }
    /// ```
    ///
    /// Relative paths are resolved against the config file's directory.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut paths: DatasetPaths =
            serde_json::from_str(&text).context("parsing dataset config")?;

        if let Some(base) = path.parent() {
            for p in [
                &mut paths.tuition,
                &mut paths.financial,
                &mut paths.salary_associate,
                &mut paths.salary_undergraduate,
                &mut paths.salary_graduate,
            ] {
                if p.is_relative() {
                    let absolute = base.join(p.as_path());
                    *p = absolute;
                }
            }
        }
        Ok(paths)
    }

    /// Resolve from either a directory or a JSON config file.
    pub fn resolve(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_config_file(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn from_dir_resolves_by_convention() {
        let dir = tempfile::tempdir().unwrap();
        for stem in STEMS {
            fs::write(dir.path().join(format!("{stem}.csv")), "a\n1\n").unwrap();
        }
        // parquet wins over csv when both exist
        fs::write(dir.path().join("tuition.parquet"), b"").unwrap();

        let paths = DatasetPaths::from_dir(dir.path()).unwrap();
        assert!(paths.tuition.ends_with("tuition.parquet"));
        assert!(paths.financial.ends_with("financial.csv"));
    }

    #[test]
    fn from_dir_reports_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tuition.csv"), "a\n1\n").unwrap();

        let err = DatasetPaths::from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("financial"));
    }

    #[test]
    fn config_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("datasets.json");
        fs::write(
            &config,
            r#"{
                "tuition": "tuition.csv",
                "financial": "financial.csv",
                "salary_associate": "salary_associate.csv",
                "salary_undergraduate": "salary_undergraduate.csv",
                "salary_graduate": "/abs/salary_graduate.csv"
            }"#,
        )
        .unwrap();

        let paths = DatasetPaths::from_config_file(&config).unwrap();
        assert_eq!(paths.tuition, dir.path().join("tuition.csv"));
        assert_eq!(paths.salary_graduate, PathBuf::from("/abs/salary_graduate.csv"));
    }
}
