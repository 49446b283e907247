//! Allele alphabets and the sex-determination system.
//!
//! The base-line locus carries one of three alleles ordered by dominance, every other locus
//! carries either the wild-type `N` or the mutant `m`. Sex follows the ZZ/ZW scheme: males are
//! ZZ, females are ZW.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strict dominance between two alleles of the same locus.
pub trait Dominance: Sized + Copy {
    /// True if `x` is at least as dominant as `y`.
    fn dom(x: &Self, y: &Self) -> bool;

    /// The allele expressed by the pair `(x, y)`.
    fn expressed(x: Self, y: Self) -> Self {
        if Self::dom(&x, &y) {
            x
        } else {
            y
        }
    }
}

/// Alleles of the base-line locus.
///
/// Declared from least to most dominant so that the derived `Ord` is the dominance order
/// `B < T < G`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BaseAllele {
    B,
    T,
    G,
}

impl BaseAllele {
    pub const ALL: [BaseAllele; 3] = [BaseAllele::G, BaseAllele::T, BaseAllele::B];

    /// Reads a single allele symbol, ignoring case.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "G" | "g" => Some(BaseAllele::G),
            "T" | "t" => Some(BaseAllele::T),
            "B" | "b" => Some(BaseAllele::B),
            _ => None,
        }
    }

    pub fn color(self) -> BaseColor {
        match self {
            BaseAllele::G => BaseColor::Green,
            BaseAllele::T => BaseColor::Turquoise,
            BaseAllele::B => BaseColor::Blue,
        }
    }
}

impl Dominance for BaseAllele {
    fn dom(x: &Self, y: &Self) -> bool {
        x >= y
    }
}

impl fmt::Display for BaseAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BaseAllele::G => "G",
            BaseAllele::T => "T",
            BaseAllele::B => "B",
        };
        f.write_str(s)
    }
}

/// The expressed colour line of a bird.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseColor {
    Green,
    Turquoise,
    Blue,
}

impl BaseColor {
    pub fn name(self) -> &'static str {
        match self {
            BaseColor::Green => "green",
            BaseColor::Turquoise => "turquoise",
            BaseColor::Blue => "blue",
        }
    }
}

impl fmt::Display for BaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Alleles of the two-state loci: wild type `N` and mutant `m`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Allele {
    N,
    M,
}

impl Allele {
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "N" => Some(Allele::N),
            "m" => Some(Allele::M),
            _ => None,
        }
    }

    pub fn is_mutant(self) -> bool {
        self == Allele::M
    }
}

impl From<bool> for Allele {
    fn from(mutant: bool) -> Self {
        match mutant {
            true => Allele::M,
            false => Allele::N,
        }
    }
}

impl From<Allele> for bool {
    fn from(allele: Allele) -> bool {
        allele.is_mutant()
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allele::N => f.write_str("N"),
            Allele::M => f.write_str("m"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn name(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sex chromosomes. A gamete carrying `W` makes a daughter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SexChromosome {
    Z,
    W,
}

impl SexChromosome {
    /// Sex of the chick receiving this chromosome from its dam (the sire always gives a Z).
    pub fn offspring_sex(self) -> Sex {
        match self {
            SexChromosome::Z => Sex::Male,
            SexChromosome::W => Sex::Female,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_dominance_test() {
        macro_rules! f {
            ($x:expr, $y:expr, $z:expr) => {
                assert_eq!(BaseAllele::expressed($x, $y), $z);
                assert_eq!(BaseAllele::expressed($y, $x), $z);
            };
        }
        f!(BaseAllele::G, BaseAllele::G, BaseAllele::G);
        f!(BaseAllele::G, BaseAllele::T, BaseAllele::G);
        f!(BaseAllele::G, BaseAllele::B, BaseAllele::G);
        f!(BaseAllele::T, BaseAllele::T, BaseAllele::T);
        f!(BaseAllele::T, BaseAllele::B, BaseAllele::T);
        f!(BaseAllele::B, BaseAllele::B, BaseAllele::B);
    }

    #[test]
    fn symbols_test() {
        assert_eq!(BaseAllele::from_symbol("g"), Some(BaseAllele::G));
        assert_eq!(BaseAllele::from_symbol("X"), None);
        assert_eq!(Allele::from_symbol("m"), Some(Allele::M));
        assert_eq!(Allele::from_symbol("M"), None);
        assert_eq!(Allele::from(true).to_string(), "m");
        assert!(!bool::from(Allele::N));
    }

    #[test]
    fn sex_chromosome_test() {
        assert_eq!(SexChromosome::Z.offspring_sex(), Sex::Male);
        assert_eq!(SexChromosome::W.offspring_sex(), Sex::Female);
    }
}
