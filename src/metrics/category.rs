use std::collections::BTreeMap;
use std::fmt;

use super::MetricError;

// ---------------------------------------------------------------------------
// Category – institution type × degree level
// ---------------------------------------------------------------------------

/// One of the four institution/degree combinations the datasets are keyed by.
///
/// Replaces positional slicing ("first two columns are undergraduate") with
/// explicit labels, so combining series from different tables can be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    UndergradPublic,
    UndergradPrivate,
    GraduatePublic,
    GraduatePrivate,
}

impl Category {
    pub const ALL: [Self; 4] = [
        Self::UndergradPublic,
        Self::UndergradPrivate,
        Self::GraduatePublic,
        Self::GraduatePrivate,
    ];

    pub const UNDERGRAD: [Self; 2] = [Self::UndergradPublic, Self::UndergradPrivate];
    pub const GRADUATE: [Self; 2] = [Self::GraduatePublic, Self::GraduatePrivate];

    /// Column label used in the tuition dataset.
    pub fn column_label(self) -> &'static str {
        match self {
            Self::UndergradPublic => "Undergrad Public",
            Self::UndergradPrivate => "Undergrad Private",
            Self::GraduatePublic => "Graduate Public",
            Self::GraduatePrivate => "Graduate Private",
        }
    }

    /// Short label for chart axes ("Public" / "Private").
    pub fn short_label(self) -> &'static str {
        match self {
            Self::UndergradPublic | Self::GraduatePublic => "Public",
            Self::UndergradPrivate | Self::GraduatePrivate => "Private",
        }
    }

    pub fn is_undergraduate(self) -> bool {
        matches!(self, Self::UndergradPublic | Self::UndergradPrivate)
    }

    /// The undergraduate category a graduate path builds on: public adds
    /// public, private adds private.  Identity for undergraduate categories.
    pub fn undergrad_counterpart(self) -> Self {
        match self {
            Self::GraduatePublic => Self::UndergradPublic,
            Self::GraduatePrivate => Self::UndergradPrivate,
            other => other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_label())
    }
}

// ---------------------------------------------------------------------------
// DollarSeries – per-category integer dollar amounts
// ---------------------------------------------------------------------------

/// A derived monetary metric: whole dollars per category.
///
/// Values are truncated toward zero at each aggregation step before being
/// combined further, matching the source data pipeline.  Combination
/// operations validate that the category sets line up instead of summing
/// misaligned entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DollarSeries {
    entries: BTreeMap<Category, i64>,
}

impl DollarSeries {
    pub fn new(entries: impl IntoIterator<Item = (Category, i64)>) -> Self {
        DollarSeries {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, category: Category) -> Option<i64> {
        self.entries.get(&category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, i64)> + '_ {
        self.entries.iter().map(|(&c, &v)| (c, v))
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Multiply every entry by a whole number (e.g. years of study).
    pub fn scale(&self, factor: i64) -> Self {
        DollarSeries {
            entries: self.entries.iter().map(|(&c, &v)| (c, v * factor)).collect(),
        }
    }

    /// Add a scalar dollar amount to every entry.
    pub fn offset(&self, amount: i64) -> Self {
        DollarSeries {
            entries: self
                .entries
                .iter()
                .map(|(&c, &v)| (c, v + amount))
                .collect(),
        }
    }

    /// Restrict the series to the given categories, failing when one is
    /// absent rather than returning a silently smaller series.
    pub fn select(&self, categories: &[Category]) -> Result<Self, MetricError> {
        let mut entries = BTreeMap::new();
        for &cat in categories {
            let Some(value) = self.get(cat) else {
                return Err(MetricError::CategoryMismatch {
                    left: label_list(self.categories()),
                    right: label_list(categories.iter().copied()),
                });
            };
            entries.insert(cat, value);
        }
        Ok(DollarSeries { entries })
    }

    /// Elementwise sum of two series over the same category set.
    pub fn try_add(&self, other: &Self) -> Result<Self, MetricError> {
        if !self.same_categories(other) {
            return Err(self.mismatch(other));
        }
        Ok(DollarSeries {
            entries: self
                .entries
                .iter()
                .map(|(&c, &v)| (c, v + other.entries[&c]))
                .collect(),
        })
    }

    /// For each graduate entry, add the entry of its undergraduate
    /// counterpart from `base` (public to public, private to private).
    pub fn add_undergrad_base(&self, base: &Self) -> Result<Self, MetricError> {
        let mut entries = BTreeMap::new();
        for (&cat, &value) in &self.entries {
            if cat.is_undergraduate() {
                return Err(self.mismatch(base));
            }
            let counterpart = cat.undergrad_counterpart();
            let Some(addend) = base.get(counterpart) else {
                return Err(self.mismatch(base));
            };
            entries.insert(cat, value + addend);
        }
        Ok(DollarSeries { entries })
    }

    /// Union of two series over disjoint category sets.
    pub fn concat(&self, other: &Self) -> Result<Self, MetricError> {
        let overlap: Vec<Category> = self
            .categories()
            .filter(|c| other.entries.contains_key(c))
            .collect();
        if !overlap.is_empty() {
            return Err(MetricError::CategoryOverlap {
                overlap: label_list(overlap.into_iter()),
            });
        }
        let mut entries = self.entries.clone();
        entries.extend(other.iter());
        Ok(DollarSeries { entries })
    }

    fn same_categories(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.categories().eq(other.categories())
    }

    fn mismatch(&self, other: &Self) -> MetricError {
        MetricError::CategoryMismatch {
            left: label_list(self.categories()),
            right: label_list(other.categories()),
        }
    }
}

fn label_list(categories: impl Iterator<Item = Category>) -> String {
    categories
        .map(|c| c.column_label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undergrad(public: i64, private: i64) -> DollarSeries {
        DollarSeries::new([
            (Category::UndergradPublic, public),
            (Category::UndergradPrivate, private),
        ])
    }

    fn graduate(public: i64, private: i64) -> DollarSeries {
        DollarSeries::new([
            (Category::GraduatePublic, public),
            (Category::GraduatePrivate, private),
        ])
    }

    #[test]
    fn counterpart_maps_by_institution_type() {
        assert_eq!(
            Category::GraduatePublic.undergrad_counterpart(),
            Category::UndergradPublic
        );
        assert_eq!(
            Category::GraduatePrivate.undergrad_counterpart(),
            Category::UndergradPrivate
        );
    }

    #[test]
    fn scale_and_offset() {
        let s = undergrad(9000, 30_000).scale(4).offset(70_000);
        assert_eq!(s.get(Category::UndergradPublic), Some(106_000));
        assert_eq!(s.get(Category::UndergradPrivate), Some(190_000));
    }

    #[test]
    fn try_add_requires_matching_categories() {
        let err = undergrad(1, 2).try_add(&graduate(3, 4)).unwrap_err();
        assert!(matches!(err, MetricError::CategoryMismatch { .. }));

        let sum = undergrad(1, 2).try_add(&undergrad(10, 20)).unwrap();
        assert_eq!(sum.get(Category::UndergradPrivate), Some(22));
    }

    #[test]
    fn add_undergrad_base_aligns_public_to_public() {
        let total = graduate(100, 200)
            .add_undergrad_base(&undergrad(1000, 2000))
            .unwrap();
        assert_eq!(total.get(Category::GraduatePublic), Some(1100));
        assert_eq!(total.get(Category::GraduatePrivate), Some(2200));
    }

    #[test]
    fn add_undergrad_base_rejects_missing_counterpart() {
        let base = DollarSeries::new([(Category::UndergradPublic, 1000)]);
        let err = graduate(100, 200).add_undergrad_base(&base).unwrap_err();
        assert!(matches!(err, MetricError::CategoryMismatch { .. }));
    }

    #[test]
    fn concat_rejects_overlap() {
        let all = undergrad(1, 2).concat(&graduate(3, 4)).unwrap();
        assert_eq!(all.len(), 4);

        let err = all.concat(&graduate(5, 6)).unwrap_err();
        assert!(matches!(err, MetricError::CategoryOverlap { .. }));
    }
}
