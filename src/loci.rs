//! The fixed set of loci followed by the calculator.
//!
//! Loci are named by the identifiers breeders enter in genotype records; those names are also
//! the keys of the genotype buckets returned by a cross.

use crate::error::{GeneticsError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How a diploid autosomal locus shows in the phenotype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expression {
    /// Expressed by `m/m` only.
    Recessive,
    /// Expressed by any `m`.
    Dominant,
    /// Number of `m` copies, 0 to 2.
    Dose,
}

/// Diploid autosomal loci, in enumeration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AutosomalLocus {
    Gray,
    American,
    Marbling1,
    Marbling2,
    Ino,
    HarlequinDominant,
    HarlequinRecessive,
    DarkFactor,
}

impl AutosomalLocus {
    pub const ALL: [AutosomalLocus; 8] = [
        AutosomalLocus::Gray,
        AutosomalLocus::American,
        AutosomalLocus::Marbling1,
        AutosomalLocus::Marbling2,
        AutosomalLocus::Ino,
        AutosomalLocus::HarlequinDominant,
        AutosomalLocus::HarlequinRecessive,
        AutosomalLocus::DarkFactor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AutosomalLocus::Gray => "Cinza",
            AutosomalLocus::American => "Americano",
            AutosomalLocus::Marbling1 => "Marm1",
            AutosomalLocus::Marbling2 => "Marm2",
            AutosomalLocus::Ino => "Ino",
            AutosomalLocus::HarlequinDominant => "ArleqDom",
            AutosomalLocus::HarlequinRecessive => "ArleqRec",
            AutosomalLocus::DarkFactor => "FatorEscuro",
        }
    }

    pub fn expression(self) -> Expression {
        match self {
            AutosomalLocus::HarlequinDominant => Expression::Dominant,
            AutosomalLocus::DarkFactor => Expression::Dose,
            _ => Expression::Recessive,
        }
    }

    /// Position of the locus in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Loci on the Z chromosome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SexLinkedLocus {
    Cinnamon,
    Fawn,
}

impl SexLinkedLocus {
    pub const ALL: [SexLinkedLocus; 2] = [SexLinkedLocus::Cinnamon, SexLinkedLocus::Fawn];

    pub fn name(self) -> &'static str {
        match self {
            SexLinkedLocus::Cinnamon => "Canela",
            SexLinkedLocus::Fawn => "Fulvo",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Locus {
    Base,
    Autosomal(AutosomalLocus),
    SexLinked(SexLinkedLocus),
}

impl Locus {
    pub const BASE_NAME: &'static str = "LinhaBase";

    /// All 11 loci: base line first, then the autosomal loci, then the sex-linked loci.
    pub fn all() -> impl Iterator<Item = Locus> {
        std::iter::once(Locus::Base)
            .chain(AutosomalLocus::ALL.into_iter().map(Locus::Autosomal))
            .chain(SexLinkedLocus::ALL.into_iter().map(Locus::SexLinked))
    }

    pub fn name(self) -> &'static str {
        match self {
            Locus::Base => Self::BASE_NAME,
            Locus::Autosomal(l) => l.name(),
            Locus::SexLinked(l) => l.name(),
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Locus {
    type Err = GeneticsError;

    fn from_str(s: &str) -> Result<Self> {
        Locus::all()
            .find(|locus| locus.name() == s.trim())
            .ok_or_else(|| GeneticsError::UnknownLocus(s.to_owned()))
    }
}

impl Serialize for Locus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
