//! Female/male catalog and matrix construction from pairwise records.
//!
//! A record relates two prospective matings, each written as
//! `"<male>_<female>"`, with the coancestry between their offspring.
//! The catalog collects the sorted, de-duplicated female and male labels
//! seen in the records and fixes the pair index `f * nm + m`.

use std::collections::{BTreeSet, HashMap};

use rand::Rng;

use crate::error::{Error, Result};
use crate::matrix::{RelatednessMatrix, JITTER_AMPLITUDE};

/// Coancestry between the offspring of two prospective matings.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRecord {
    /// First mating, `"<male>_<female>"`.
    pub first: String,
    /// Second mating, `"<male>_<female>"`.
    pub second: String,
    /// Coancestry coefficient.
    pub coefficient: f64,
}

impl PairRecord {
    /// Record relating `first` and `second` with `coefficient`.
    pub fn new(first: impl Into<String>, second: impl Into<String>, coefficient: f64) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            coefficient,
        }
    }
}

/// Splits `"<male>_<female>"` at the first underscore.
pub fn split_pair_label(label: &str) -> Result<(&str, &str)> {
    match label.split_once('_') {
        Some((male, female)) if !male.is_empty() && !female.is_empty() => Ok((male, female)),
        _ => Err(Error::MalformedLabel(label.to_string())),
    }
}

/// Sorted female and male labels with their pair-index mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCatalog {
    females: Vec<String>,
    males: Vec<String>,
    female_index: HashMap<String, usize>,
    male_index: HashMap<String, usize>,
}

impl PairCatalog {
    /// Catalog over explicit label lists. Labels are sorted and
    /// de-duplicated.
    pub fn new<F, M>(females: F, males: M) -> Result<Self>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let females: Vec<String> = females
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let males: Vec<String> = males
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if females.is_empty() || males.is_empty() {
            return Err(Error::EmptyDimensions {
                females: females.len(),
                males: males.len(),
            });
        }

        let female_index = index_of(&females);
        let male_index = index_of(&males);
        Ok(Self {
            females,
            males,
            female_index,
            male_index,
        })
    }

    /// Catalog of every female and male named in `records`.
    pub fn from_records(records: &[PairRecord]) -> Result<Self> {
        let mut females = BTreeSet::new();
        let mut males = BTreeSet::new();
        for record in records {
            for label in [&record.first, &record.second] {
                let (male, female) = split_pair_label(label)?;
                males.insert(male.to_string());
                females.insert(female.to_string());
            }
        }
        Self::new(females, males)
    }

    /// Sorted female labels; position is the female ordinal.
    pub fn females(&self) -> &[String] {
        &self.females
    }

    /// Sorted male labels; position is the male ordinal.
    pub fn males(&self) -> &[String] {
        &self.males
    }

    /// Pair index of a `"<male>_<female>"` label.
    pub fn pair_index(&self, label: &str) -> Result<usize> {
        let (male, female) = split_pair_label(label)?;
        match (self.female_index.get(female), self.male_index.get(male)) {
            (Some(&f), Some(&m)) => Ok(f * self.males.len() + m),
            _ => Err(Error::UnknownLabel(label.to_string())),
        }
    }

    /// `"<male>_<female>"` label of female `female` mated with `male`.
    pub fn pair_label(&self, female: usize, male: usize) -> Option<String> {
        let f = self.females.get(female)?;
        let m = self.males.get(male)?;
        Some(format!("{m}_{f}"))
    }

    /// `(male label, female label)` for every female in `assignment`.
    pub fn describe(&self, assignment: &[usize]) -> Result<Vec<(&str, &str)>> {
        crate::cost::validate_assignment(self.females.len(), self.males.len(), assignment)?;
        Ok(assignment
            .iter()
            .enumerate()
            .map(|(f, &m)| (self.males[m].as_str(), self.females[f].as_str()))
            .collect())
    }
}

fn index_of(labels: &[String]) -> HashMap<String, usize> {
    labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.clone(), i))
        .collect()
}

/// Builds the relatedness matrix and catalog from `records`.
///
/// Each record is written symmetrically; later records overwrite earlier
/// ones for the same pair. Uniform jitter in `[0, JITTER_AMPLITUDE)` is
/// then added to every entry.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_mating::catalog::{build_matrix, PairRecord};
///
/// let records = vec![
///     PairRecord::new("M1_F1", "M1_F2", 0.25),
///     PairRecord::new("M2_F1", "M2_F2", 0.25),
///     PairRecord::new("M1_F1", "M2_F2", 0.0625),
/// ];
/// let (c, catalog) = build_matrix(&records, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert_eq!(catalog.females(), ["F1", "F2"]);
/// assert_eq!(catalog.males(), ["M1", "M2"]);
/// assert_eq!(c.dim(), 4);
/// assert!(c.get(0, 2) >= 0.25);
/// ```
pub fn build_matrix<R: Rng>(
    records: &[PairRecord],
    rng: &mut R,
) -> Result<(RelatednessMatrix, PairCatalog)> {
    let catalog = PairCatalog::from_records(records)?;
    let mut matrix = RelatednessMatrix::zeros(catalog.females().len(), catalog.males().len())?;

    for record in records {
        let i = catalog.pair_index(&record.first)?;
        let j = catalog.pair_index(&record.second)?;
        matrix.set_symmetric(i, j, record.coefficient)?;
    }

    matrix.apply_jitter(rng, JITTER_AMPLITUDE);
    tracing::debug!(
        females = catalog.females().len(),
        males = catalog.males().len(),
        records = records.len(),
        "relatedness matrix built"
    );
    Ok((matrix, catalog))
}
