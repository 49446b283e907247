//! The two outputs of a cross and the fold that builds them.

use crate::alleles::{BaseColor, Sex};
use crate::genotype::{Diploid, LocusGenotype};
use crate::loci::{Expression, Locus};
use crate::phenotype::Category;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Allowed drift of the total probability away from 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Unit of aggregation: every outcome with the same key is summed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PhenotypeKey {
    pub color: BaseColor,
    pub code: &'static str,
    pub description: String,
    pub sex: Sex,
}

impl PhenotypeKey {
    pub fn new(color: BaseColor, category: Category, sex: Sex) -> Self {
        Self {
            color,
            code: category.code,
            description: category.description,
            sex,
        }
    }

    /// `(base, code, description, sex)`, with the base line and sex as lowercase English names.
    pub fn labels(&self) -> (&'static str, &'static str, &str, &'static str) {
        (self.color.name(), self.code, &self.description, self.sex.name())
    }
}

impl fmt::Display for PhenotypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.description)
    }
}

/// Probability mass per genotype, per locus, within one category. Not normalised.
pub type GenotypeBuckets = BTreeMap<Locus, BTreeMap<LocusGenotype, f64>>;

/// Outcome of a cross.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrossResult {
    /// Probability of each phenotype category; sums to 1.
    pub phenotypes: BTreeMap<PhenotypeKey, f64>,
    /// Genotype mass per category; each locus sums to the category's probability.
    pub genotypes: BTreeMap<PhenotypeKey, GenotypeBuckets>,
}

impl CrossResult {
    pub fn total(&self) -> f64 {
        self.phenotypes.values().sum()
    }

    pub fn probability(&self, key: &PhenotypeKey) -> f64 {
        self.phenotypes.get(key).copied().unwrap_or(0.0)
    }

    /// Categories by decreasing probability, ties broken by key.
    pub fn ranked(&self) -> Vec<(&PhenotypeKey, f64)> {
        let mut v: Vec<(&PhenotypeKey, f64)> =
            self.phenotypes.iter().map(|(k, p)| (k, *p)).collect();
        v.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        v
    }

    /// Distribution of genotypes at `locus` given the category.
    pub fn conditional(&self, key: &PhenotypeKey, locus: Locus) -> BTreeMap<LocusGenotype, f64> {
        let total = self.probability(key);
        match self.genotypes.get(key).and_then(|b| b.get(&locus)) {
            Some(bucket) if total > 0.0 => bucket.iter().map(|(g, w)| (*g, w / total)).collect(),
            _ => BTreeMap::new(),
        }
    }

    /// Most likely genotype at `locus` given the category, with its conditional probability.
    pub fn most_probable(&self, key: &PhenotypeKey, locus: Locus) -> Option<(LocusGenotype, f64)> {
        self.conditional(key, locus)
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Probability of being `N/m` at `locus` given the category.
    ///
    /// `None` where carrying makes no sense: dominant and dose loci, and the Z-linked loci of a
    /// female, who has a single copy.
    pub fn carrier_probability(&self, key: &PhenotypeKey, locus: Locus) -> Option<f64> {
        if !is_carrier_locus(locus, key.sex) {
            return None;
        }
        let carrier = LocusGenotype::Diploid(Diploid::Carrier);
        Some(
            self.conditional(key, locus)
                .get(&carrier)
                .copied()
                .unwrap_or(0.0),
        )
    }

    /// Total probability of offspring of one sex.
    pub fn sex_ratio(&self, sex: Sex) -> f64 {
        self.phenotypes
            .iter()
            .filter(|(k, _)| k.sex == sex)
            .map(|(_, p)| p)
            .sum()
    }
}

/// Loci where a heterozygote hides a recessive allele.
pub fn is_carrier_locus(locus: Locus, sex: Sex) -> bool {
    match locus {
        Locus::Base => false,
        Locus::Autosomal(l) => l.expression() == Expression::Recessive,
        Locus::SexLinked(_) => sex == Sex::Male,
    }
}

/// Accumulates outcomes into a `CrossResult`. Used as the state of a fold.
///
/// Categories are registered once with `category` and outcomes refer to them by index, so a key
/// is cloned per category rather than per outcome.
#[derive(Debug, Default)]
pub struct CrossAccumulator {
    keys: Vec<PhenotypeKey>,
    index: HashMap<PhenotypeKey, usize>,
    mass: Vec<f64>,
    buckets: Vec<GenotypeBuckets>,
    outcomes: usize,
}

impl CrossAccumulator {
    /// Index of the category `key`, registering it on first use.
    pub fn category(&mut self, key: PhenotypeKey) -> usize {
        if let Some(&i) = self.index.get(&key) {
            return i;
        }
        let i = self.keys.len();
        self.index.insert(key.clone(), i);
        self.keys.push(key);
        self.mass.push(0.0);
        self.buckets.push(GenotypeBuckets::new());
        i
    }

    /// Adds one outcome of probability `p` to a registered category.
    ///
    /// # Panics
    ///
    /// Panics if `category` was not returned by `category`.
    pub fn add<I>(mut self, category: usize, genotypes: I, p: f64) -> Self
    where
        I: IntoIterator<Item = (Locus, LocusGenotype)>,
    {
        let buckets = &mut self.buckets[category];
        for (locus, g) in genotypes {
            *buckets.entry(locus).or_default().entry(g).or_insert(0.0) += p;
        }
        self.mass[category] += p;
        self.outcomes += 1;
        self
    }

    pub fn outcomes(&self) -> usize {
        self.outcomes
    }

    pub fn categories(&self) -> usize {
        self.keys.len()
    }

    pub fn finish(self) -> CrossResult {
        let mut result = CrossResult::default();
        for ((key, p), buckets) in self.keys.into_iter().zip(self.mass).zip(self.buckets) {
            result.genotypes.insert(key.clone(), buckets);
            result.phenotypes.insert(key, p);
        }
        result
    }
}
