//! Per-locus genotypes and the genotype record of a bird.
//!
//! Genotypes are small closed enums rather than strings, so `N/m` and `m/N` are the same value.
//! Strings only appear at the boundary: `GenotypeRecord::from_record` parses and validates every
//! locus of a record before a cross can start, and `Display` renders the canonical form used in
//! reports.

use crate::alleles::{Allele, BaseAllele, BaseColor, Dominance, Sex};
use crate::error::{GeneticsError, Result};
use crate::loci::{AutosomalLocus, Expression, Locus, SexLinkedLocus};
use rand::Rng;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Unordered genotype at the base-line locus, stored most dominant allele first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BasePair {
    upper: BaseAllele,
    lower: BaseAllele,
}

impl BasePair {
    pub fn new(a: BaseAllele, b: BaseAllele) -> Self {
        Self {
            upper: a.max(b),
            lower: a.min(b),
        }
    }

    pub fn alleles(&self) -> (BaseAllele, BaseAllele) {
        (self.upper, self.lower)
    }

    /// Expressed colour line. Strict dominance, no blending.
    pub fn color(&self) -> BaseColor {
        BaseAllele::expressed(self.upper, self.lower).color()
    }

    fn parse(s: &str) -> Result<Self> {
        let (a, b) = split_pair(Locus::Base, s)?;
        let allele = |x: &str| {
            BaseAllele::from_symbol(x).ok_or_else(|| {
                GeneticsError::validation(Locus::Base, s, "base-line alleles must be G, T or B")
            })
        };
        Ok(Self::new(allele(a)?, allele(b)?))
    }
}

impl fmt::Display for BasePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.upper, self.lower)
    }
}

/// Genotype at a diploid `N`/`m` locus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Diploid {
    /// `N/N`
    Normal,
    /// `N/m`
    Carrier,
    /// `m/m`
    Mutant,
}

impl Diploid {
    pub const ALL: [Diploid; 3] = [Diploid::Normal, Diploid::Carrier, Diploid::Mutant];

    pub fn from_alleles(a: Allele, b: Allele) -> Self {
        match (a, b) {
            (Allele::N, Allele::N) => Diploid::Normal,
            (Allele::M, Allele::M) => Diploid::Mutant,
            _ => Diploid::Carrier,
        }
    }

    pub fn alleles(self) -> (Allele, Allele) {
        match self {
            Diploid::Normal => (Allele::N, Allele::N),
            Diploid::Carrier => (Allele::N, Allele::M),
            Diploid::Mutant => (Allele::M, Allele::M),
        }
    }

    /// Number of mutant copies.
    pub fn dose(self) -> u8 {
        match self {
            Diploid::Normal => 0,
            Diploid::Carrier => 1,
            Diploid::Mutant => 2,
        }
    }

    pub fn expresses_recessive(self) -> bool {
        self == Diploid::Mutant
    }

    pub fn expresses_dominant(self) -> bool {
        self != Diploid::Normal
    }

    fn parse(locus: Locus, s: &str) -> Result<Self> {
        let (a, b) = split_pair(locus, s)?;
        Ok(Self::from_alleles(
            parse_allele(locus, s, a)?,
            parse_allele(locus, s, b)?,
        ))
    }
}

impl fmt::Display for Diploid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.alleles();
        write!(f, "{}/{}", a, b)
    }
}

/// Genotype at a Z-linked locus: two copies in a ZZ male, one in a ZW female.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SexLinked {
    Zz(Diploid),
    Zw(Allele),
}

impl SexLinked {
    pub fn sex(self) -> Sex {
        match self {
            SexLinked::Zz(_) => Sex::Male,
            SexLinked::Zw(_) => Sex::Female,
        }
    }

    /// Recessive expression: a female shows her single copy, a male needs both copies mutant.
    pub fn expressed(self) -> bool {
        match self {
            SexLinked::Zz(g) => g.expresses_recessive(),
            SexLinked::Zw(a) => a.is_mutant(),
        }
    }

    fn parse(locus: Locus, sex: Sex, s: &str) -> Result<Self> {
        match (sex, s.contains('/')) {
            (Sex::Male, true) => Ok(SexLinked::Zz(Diploid::parse(locus, s)?)),
            (Sex::Male, false) => Err(GeneticsError::validation(
                locus,
                s,
                "males carry two Z-linked alleles",
            )),
            (Sex::Female, false) => Ok(SexLinked::Zw(parse_allele(locus, s, s.trim())?)),
            (Sex::Female, true) => Err(GeneticsError::validation(
                locus,
                s,
                "females carry a single Z-linked allele",
            )),
        }
    }
}

impl fmt::Display for SexLinked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SexLinked::Zz(g) => g.fmt(f),
            SexLinked::Zw(a) => a.fmt(f),
        }
    }
}

impl From<SexLinked> for LocusGenotype {
    fn from(g: SexLinked) -> Self {
        match g {
            SexLinked::Zz(d) => LocusGenotype::Diploid(d),
            SexLinked::Zw(a) => LocusGenotype::Hemizygous(a),
        }
    }
}

/// Any genotype that can appear in a genotype bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocusGenotype {
    Base(BasePair),
    Diploid(Diploid),
    Hemizygous(Allele),
}

impl fmt::Display for LocusGenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocusGenotype::Base(g) => g.fmt(f),
            LocusGenotype::Diploid(g) => g.fmt(f),
            LocusGenotype::Hemizygous(a) => a.fmt(f),
        }
    }
}

impl Serialize for LocusGenotype {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn split_pair(locus: Locus, s: &str) -> Result<(&str, &str)> {
    let mut parts = s.split('/').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok((a, b)),
        _ => Err(GeneticsError::validation(
            locus,
            s,
            "expected two alleles separated by '/'",
        )),
    }
}

fn parse_allele(locus: Locus, s: &str, symbol: &str) -> Result<Allele> {
    Allele::from_symbol(symbol)
        .ok_or_else(|| GeneticsError::validation(locus, s, "alleles must be N or m"))
}

/// A bird's genotype at every locus: a validated parent, or one resolved offspring of a cross.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenotypeRecord {
    sex: Sex,
    base: BasePair,
    autosomal: [Diploid; 8],
    sex_linked: [SexLinked; 2],
}

impl GenotypeRecord {
    pub fn new(
        sex: Sex,
        base: BasePair,
        autosomal: [Diploid; 8],
        sex_linked: [SexLinked; 2],
    ) -> Result<Self> {
        for (locus, g) in SexLinkedLocus::ALL.iter().zip(sex_linked.iter()) {
            if g.sex() != sex {
                return Err(GeneticsError::validation(
                    Locus::SexLinked(*locus),
                    &g.to_string(),
                    format!("genotype does not fit a {}", sex),
                ));
            }
        }
        Ok(Self {
            sex,
            base,
            autosomal,
            sex_linked,
        })
    }

    /// An offspring assembled by the cross enumerator.
    ///
    /// # Panics
    ///
    /// Panics if the Z-linked genotypes disagree with `sex`; a single dam gamete decides both.
    pub(crate) fn offspring(
        sex: Sex,
        base: BasePair,
        autosomal: [Diploid; 8],
        sex_linked: [SexLinked; 2],
    ) -> Self {
        assert!(
            sex_linked.iter().all(|g| g.sex() == sex),
            "sex-linked genotypes {:?} disagree with offspring sex {}",
            sex_linked,
            sex
        );
        Self {
            sex,
            base,
            autosomal,
            sex_linked,
        }
    }

    /// Wild type at every locus except the base line.
    pub fn wild_type(sex: Sex, base: BasePair) -> Self {
        let sex_linked = match sex {
            Sex::Male => SexLinked::Zz(Diploid::Normal),
            Sex::Female => SexLinked::Zw(Allele::N),
        };
        Self {
            sex,
            base,
            autosomal: [Diploid::Normal; 8],
            sex_linked: [sex_linked; 2],
        }
    }

    /// Reads a record of `(locus name, genotype)` entries.
    ///
    /// All 11 loci must be present and every value must belong to the alphabet of its locus;
    /// the first problem found is returned.
    pub fn from_record<I, K, V>(sex: Sex, record: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut values: HashMap<Locus, String> = HashMap::new();
        for (k, v) in record {
            let locus: Locus = k.as_ref().parse()?;
            values.insert(locus, v.as_ref().to_owned());
        }
        let value = |locus: Locus| {
            values
                .get(&locus)
                .map(String::as_str)
                .ok_or(GeneticsError::MissingLocus(locus))
        };

        let base = BasePair::parse(value(Locus::Base)?)?;
        let mut autosomal = [Diploid::Normal; 8];
        for locus in AutosomalLocus::ALL {
            let l = Locus::Autosomal(locus);
            autosomal[locus.index()] = Diploid::parse(l, value(l)?)?;
        }
        let mut sex_linked = [SexLinked::Zz(Diploid::Normal); 2];
        for (i, locus) in SexLinkedLocus::ALL.into_iter().enumerate() {
            let l = Locus::SexLinked(locus);
            sex_linked[i] = SexLinked::parse(l, sex, value(l)?)?;
        }
        Ok(Self {
            sex,
            base,
            autosomal,
            sex_linked,
        })
    }

    /// A uniformly random legal genotype record.
    pub fn random<R>(rng: &mut R, sex: Sex) -> Self
    where
        R: Rng + ?Sized,
    {
        let base = BasePair::new(
            BaseAllele::ALL[rng.gen_range(0..3)],
            BaseAllele::ALL[rng.gen_range(0..3)],
        );
        let autosomal = [(); 8].map(|_| Diploid::ALL[rng.gen_range(0..3)]);
        let sex_linked = [(); 2].map(|_| match sex {
            Sex::Male => SexLinked::Zz(Diploid::ALL[rng.gen_range(0..3)]),
            Sex::Female => SexLinked::Zw(Allele::from(rng.gen::<bool>())),
        });
        Self {
            sex,
            base,
            autosomal,
            sex_linked,
        }
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn base(&self) -> BasePair {
        self.base
    }

    pub fn autosomal(&self, locus: AutosomalLocus) -> Diploid {
        self.autosomal[locus.index()]
    }

    pub fn sex_linked(&self, locus: SexLinkedLocus) -> SexLinked {
        self.sex_linked[locus as usize]
    }

    pub fn with_autosomal(mut self, locus: AutosomalLocus, g: Diploid) -> Self {
        self.autosomal[locus.index()] = g;
        self
    }

    /// Replaces a Z-linked genotype. The genotype must match the parent's sex.
    pub fn with_sex_linked(mut self, locus: SexLinkedLocus, g: SexLinked) -> Result<Self> {
        if g.sex() != self.sex {
            return Err(GeneticsError::validation(
                Locus::SexLinked(locus),
                &g.to_string(),
                format!("genotype does not fit a {}", self.sex),
            ));
        }
        self.sex_linked[locus as usize] = g;
        Ok(self)
    }

    /// A male's two Z-linked genotypes, in `SexLinkedLocus::ALL` order. `None` for a female.
    pub fn zz_genotypes(&self) -> Option<[Diploid; 2]> {
        match self.sex_linked {
            [SexLinked::Zz(c), SexLinked::Zz(f)] => Some([c, f]),
            _ => None,
        }
    }

    /// A female's single Z chromosome, one allele per sex-linked locus. `None` for a male.
    pub fn z_chromosome(&self) -> Option<[Allele; 2]> {
        match self.sex_linked {
            [SexLinked::Zw(c), SexLinked::Zw(f)] => Some([c, f]),
            _ => None,
        }
    }

    /// Phenotypic level of an autosomal locus: 0 or 1 for recessive and dominant loci, the
    /// mutant dose for dose loci.
    pub fn expression_level(&self, locus: AutosomalLocus) -> u8 {
        let g = self.autosomal(locus);
        match locus.expression() {
            Expression::Recessive => g.expresses_recessive() as u8,
            Expression::Dominant => g.expresses_dominant() as u8,
            Expression::Dose => g.dose(),
        }
    }

    /// Genotype at `locus` in bucket form.
    pub fn genotype(&self, locus: Locus) -> LocusGenotype {
        match locus {
            Locus::Base => LocusGenotype::Base(self.base),
            Locus::Autosomal(l) => LocusGenotype::Diploid(self.autosomal(l)),
            Locus::SexLinked(l) => self.sex_linked(l).into(),
        }
    }
}
