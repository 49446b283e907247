//! Gamete generation at a single locus.
//!
//! Loci segregate independently, so a parent's gametes are described locus by locus as a list of
//! `(allele, probability)` pairs summing to 1. The one exception is the dam's Z chromosome: she
//! has a single copy, so one draw decides whether a chick receives her Z (with every Z-linked
//! allele on it) or her W.

use crate::alleles::{Allele, SexChromosome};
use crate::genotype::{BasePair, Diploid};

/// Gametes of a diploid locus. Homozygotes give one gamete with probability 1, heterozygotes
/// give each allele with probability 0.5, listed in allele order whatever the order of the pair.
pub fn gametes_pair<A>(a: A, b: A) -> Vec<(A, f64)>
where
    A: Copy + Ord,
{
    if a == b {
        vec![(a, 1.0)]
    } else {
        vec![(a.min(b), 0.5), (a.max(b), 0.5)]
    }
}

/// Gamete of a ZW female at one Z-linked locus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SexLinkedGamete {
    pub chromosome: SexChromosome,
    /// The Z-linked allele, `None` on a W.
    pub allele: Option<Allele>,
}

/// The fixed 50/50 split of a female's Z-linked locus between her Z and her W.
pub fn hemizygous_gametes(allele: Allele) -> [(SexLinkedGamete, f64); 2] {
    [
        (
            SexLinkedGamete {
                chromosome: SexChromosome::Z,
                allele: Some(allele),
            },
            0.5,
        ),
        (
            SexLinkedGamete {
                chromosome: SexChromosome::W,
                allele: None,
            },
            0.5,
        ),
    ]
}

/// Sex chromosome passed on by the dam.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamGamete {
    /// Her Z, carrying one allele per sex-linked locus.
    Z([Allele; 2]),
    W,
}

impl DamGamete {
    pub fn chromosome(&self) -> SexChromosome {
        match self {
            DamGamete::Z(_) => SexChromosome::Z,
            DamGamete::W => SexChromosome::W,
        }
    }
}

/// Gametes of the dam's whole Z chromosome.
///
/// Every Z-linked locus shares the same Z/W draw, so the split of the first locus is lifted to
/// the chromosome and the offspring's sex is decided once.
pub fn dam_gametes(z: [Allele; 2]) -> Vec<(DamGamete, f64)> {
    hemizygous_gametes(z[0])
        .into_iter()
        .map(|(g, p)| match g.chromosome {
            SexChromosome::Z => (DamGamete::Z(z), p),
            SexChromosome::W => (DamGamete::W, p),
        })
        .collect()
}

/// Genotypes that can be split into gametes.
pub trait Segregate {
    type Allele;

    fn gametes(&self) -> Vec<(Self::Allele, f64)>;
}

impl Segregate for BasePair {
    type Allele = crate::alleles::BaseAllele;

    fn gametes(&self) -> Vec<(Self::Allele, f64)> {
        let (a, b) = self.alleles();
        gametes_pair(a, b)
    }
}

impl Segregate for Diploid {
    type Allele = Allele;

    fn gametes(&self) -> Vec<(Self::Allele, f64)> {
        let (a, b) = self.alleles();
        gametes_pair(a, b)
    }
}
