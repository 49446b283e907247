//! Exact enumeration of a single cross.
//!
//! Every locus segregates independently, so the offspring distribution is the product of one
//! small distribution per stage:
//!
//! 1. the base-line locus (at most 4 allele combinations),
//! 2. the autosomal loci, widened one locus at a time into states holding every genotype resolved
//!    so far,
//! 3. the sex chromosomes: one draw of the dam's Z or W fixes the chick's sex, crossed with the
//!    sire's gametes at each Z-linked locus.
//!
//! Each combination is classified and folded into a `CrossAccumulator`.

use crate::alleles::{Allele, Sex};
use crate::distribution::{CrossAccumulator, CrossResult, PhenotypeKey, PROBABILITY_TOLERANCE};
use crate::error::{GeneticsError, Result};
use crate::gametes::{dam_gametes, DamGamete, Segregate};
use crate::genotype::{BasePair, Diploid, GenotypeRecord, SexLinked};
use crate::loci::{AutosomalLocus, Locus};
use crate::phenotype::{classify, Phenotype};
use itertools::iproduct;
use log::{debug, trace};
use std::collections::{BTreeMap, HashMap};

/// Offspring genotypes at the base-line locus.
pub fn base_outcomes(sire: BasePair, dam: BasePair) -> Vec<(BasePair, f64)> {
    merge(
        iproduct!(sire.gametes(), dam.gametes())
            .map(|((a, pa), (b, pb))| (BasePair::new(a, b), pa * pb)),
    )
}

/// Offspring genotypes at one diploid locus.
pub fn diploid_outcomes(sire: Diploid, dam: Diploid) -> Vec<(Diploid, f64)> {
    merge(
        iproduct!(sire.gametes(), dam.gametes())
            .map(|((a, pa), (b, pb))| (Diploid::from_alleles(a, b), pa * pb)),
    )
}

/// Sums the mass of equal genotypes, keeping them in order.
fn merge<G, I>(outcomes: I) -> Vec<(G, f64)>
where
    G: Ord,
    I: Iterator<Item = (G, f64)>,
{
    outcomes
        .fold(BTreeMap::new(), |mut m, (g, p)| {
            *m.entry(g).or_insert(0.0) += p;
            m
        })
        .into_iter()
        .collect()
}

/// Joint distribution of the autosomal genotypes, in `AutosomalLocus::ALL` order.
pub fn autosomal_states(
    male: &GenotypeRecord,
    female: &GenotypeRecord,
) -> Vec<([Diploid; 8], f64)> {
    AutosomalLocus::ALL
        .into_iter()
        .fold(vec![([Diploid::Normal; 8], 1.0)], |states, locus| {
            let outcomes = diploid_outcomes(male.autosomal(locus), female.autosomal(locus));
            iproduct!(states.iter(), outcomes.iter())
                .map(|((gs, p), (g, pg))| {
                    let mut gs = *gs;
                    gs[locus.index()] = *g;
                    (gs, p * pg)
                })
                .collect()
        })
}

/// Sex and Z-linked genotypes of one chick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SexLinkedOutcome {
    pub sex: Sex,
    pub genotypes: [SexLinked; 2],
    pub p: f64,
}

/// Crosses the sire's Z-linked genotypes with the dam's Z chromosome.
///
/// The dam's Z/W draw happens once per chick: a son gets her Z with both of its alleles, a
/// daughter gets her W and only the sire's alleles.
pub fn sex_linked_outcomes(sire: [Diploid; 2], dam: [Allele; 2]) -> Vec<SexLinkedOutcome> {
    iproduct!(dam_gametes(dam), sire[0].gametes(), sire[1].gametes())
        .map(|((gamete, pd), (c, pc), (f, pf))| {
            let genotypes = match gamete {
                DamGamete::Z(z) => [
                    SexLinked::Zz(Diploid::from_alleles(c, z[0])),
                    SexLinked::Zz(Diploid::from_alleles(f, z[1])),
                ],
                DamGamete::W => [SexLinked::Zw(c), SexLinked::Zw(f)],
            };
            SexLinkedOutcome {
                sex: gamete.chromosome().offspring_sex(),
                genotypes,
                p: pd * pc * pf,
            }
        })
        .collect()
}

/// Crosses a sire with a dam.
///
/// Returns the probability of every phenotype category and, per category, the genotype mass at
/// every locus. Fails only if the parents are given in the wrong roles.
///
/// # Panics
///
/// Panics if the enumerated probabilities do not sum to 1 within `PROBABILITY_TOLERANCE`.
pub fn cross(male: &GenotypeRecord, female: &GenotypeRecord) -> Result<CrossResult> {
    let sire_z = male.zz_genotypes().ok_or(GeneticsError::ParentSex {
        expected: Sex::Male,
        found: male.sex(),
    })?;
    let dam_z = female.z_chromosome().ok_or(GeneticsError::ParentSex {
        expected: Sex::Female,
        found: female.sex(),
    })?;

    let bases = base_outcomes(male.base(), female.base());
    let autosomal = autosomal_states(male, female);
    let sex_linked = sex_linked_outcomes(sire_z, dam_z);
    debug!(
        "crossing {} base x {} autosomal x {} sex-linked outcomes",
        bases.len(),
        autosomal.len(),
        sex_linked.len()
    );

    let (acc, _) = iproduct!(bases.iter(), autosomal.iter(), sex_linked.iter()).fold(
        (CrossAccumulator::default(), HashMap::<Phenotype, usize>::new()),
        |(mut acc, mut categories), ((base, pb), (auto, pa), sl)| {
            let chick = GenotypeRecord::offspring(sl.sex, *base, *auto, sl.genotypes);
            let phenotype = Phenotype::from(&chick);
            let category = *categories.entry(phenotype).or_insert_with(|| {
                acc.category(PhenotypeKey::new(
                    phenotype.color,
                    classify(&phenotype),
                    phenotype.sex,
                ))
            });
            let genotypes = Locus::all().map(|locus| (locus, chick.genotype(locus)));
            (acc.add(category, genotypes, pb * pa * sl.p), categories)
        },
    );
    let outcomes = acc.outcomes();
    let result = acc.finish();

    let total = result.total();
    assert!(
        (total - 1.0).abs() <= PROBABILITY_TOLERANCE,
        "cross probabilities sum to {}",
        total
    );
    debug!(
        "{} outcomes folded into {} categories",
        outcomes,
        result.phenotypes.len()
    );
    for (key, p) in result.ranked() {
        trace!("{:.6} {}", p, key);
    }
    Ok(result)
}

/// Validates two genotype records given as `(locus name, genotype)` entries and crosses them.
pub fn cross_records<I, J, K, V>(male: I, female: J) -> Result<CrossResult>
where
    I: IntoIterator<Item = (K, V)>,
    J: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let male = GenotypeRecord::from_record(Sex::Male, male)?;
    let female = GenotypeRecord::from_record(Sex::Female, female)?;
    cross(&male, &female)
}
