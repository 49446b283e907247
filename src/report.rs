//! Per-category summaries of a cross, as shown to a breeder.

use crate::distribution::{CrossResult, PhenotypeKey};
use crate::genotype::LocusGenotype;
use crate::loci::Locus;
use serde::Serialize;
use std::fmt;

/// Most probable genotype at one locus within a category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocusReport {
    pub locus: Locus,
    pub genotype: LocusGenotype,
    /// Conditional probability of `genotype` given the category.
    pub probability: f64,
    /// Probability of carrying a hidden recessive, where that makes sense.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryReport {
    #[serde(flatten)]
    pub key: PhenotypeKey,
    pub probability: f64,
    pub loci: Vec<LocusReport>,
}

impl CategoryReport {
    /// Summary of `key`, or `None` if the category does not occur in `result`.
    pub fn new(result: &CrossResult, key: &PhenotypeKey) -> Option<Self> {
        let probability = *result.phenotypes.get(key)?;
        let loci = Locus::all()
            .filter_map(|locus| {
                let (genotype, p) = result.most_probable(key, locus)?;
                Some(LocusReport {
                    locus,
                    genotype,
                    probability: p,
                    carrier: result.carrier_probability(key, locus),
                })
            })
            .collect();
        Some(Self {
            key: key.clone(),
            probability,
            loci,
        })
    }
}

impl fmt::Display for CategoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>7.3}%  {}", 100.0 * self.probability, self.key)?;
        for l in &self.loci {
            write!(
                f,
                "          {:<12} {:<4} {:>7.3}%",
                l.locus.name(),
                l.genotype.to_string(),
                100.0 * l.probability
            )?;
            match l.carrier {
                Some(c) if c > 0.0 => writeln!(f, "  carrier {:.3}%", 100.0 * c)?,
                _ => writeln!(f)?,
            }
        }
        Ok(())
    }
}

/// One report per category, most probable first.
pub fn reports(result: &CrossResult) -> Vec<CategoryReport> {
    result
        .ranked()
        .into_iter()
        .filter_map(|(key, _)| CategoryReport::new(result, key))
        .collect()
}
