//! Phenotype naming after the OBJO breed standard for *Forpus coelestis*.
//!
//! A resolved phenotype is a set of flags. Naming is an ordered table of rules, first match wins:
//! ino overrides everything, harlequin comes next, then a bird showing a single trait group gets
//! that group's code and anything else falls back to "other combinations" for its colour line.

use crate::alleles::{BaseColor, Sex};
use crate::genotype::GenotypeRecord;
use crate::loci::{AutosomalLocus, SexLinkedLocus};
use std::fmt;

/// Everything the naming rules look at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Phenotype {
    pub sex: Sex,
    pub color: BaseColor,
    pub gray: bool,
    /// Dark factor dose, 0 to 2.
    pub dark_factor: u8,
    pub cinnamon: bool,
    pub fawn: bool,
    pub american: bool,
    pub marbling1: bool,
    pub marbling2: bool,
    /// Either harlequin locus expressed.
    pub harlequin: bool,
    pub ino: bool,
}

/// The trait groups that can single out a taxonomy code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraitGroup {
    Gray,
    DarkFactor(u8),
    Cinnamon,
    Marbling1,
    Marbling2,
    American,
    Fawn,
}

impl Phenotype {
    /// A wild-type bird of the given colour line.
    pub fn wild_type(sex: Sex, color: BaseColor) -> Self {
        Self {
            sex,
            color,
            gray: false,
            dark_factor: 0,
            cinnamon: false,
            fawn: false,
            american: false,
            marbling1: false,
            marbling2: false,
            harlequin: false,
            ino: false,
        }
    }

    pub fn trait_groups(&self) -> Vec<TraitGroup> {
        [
            (self.gray, TraitGroup::Gray),
            (self.dark_factor > 0, TraitGroup::DarkFactor(self.dark_factor)),
            (self.cinnamon, TraitGroup::Cinnamon),
            (self.marbling1, TraitGroup::Marbling1),
            (self.marbling2, TraitGroup::Marbling2),
            (self.american, TraitGroup::American),
            (self.fawn, TraitGroup::Fawn),
        ]
        .into_iter()
        .filter_map(|(on, group)| on.then_some(group))
        .collect()
    }

    /// Traits that move a harlequin into "harlequin other combinations". Gray and dark factor
    /// do not count.
    pub fn has_harlequin_extras(&self) -> bool {
        self.cinnamon || self.fawn || self.american || self.marbling1 || self.marbling2
    }

    /// Full description of the flags, in the standard's word order.
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("Coelestis {}", self.color)];
        if self.gray {
            parts.push("gray".to_owned());
        }
        match self.dark_factor {
            0 => {}
            1 => parts.push("1 dark factor".to_owned()),
            n => parts.push(format!("{} dark factors", n)),
        }
        if self.cinnamon && self.ino {
            parts.push("isabel".to_owned());
        } else if self.cinnamon {
            parts.push("cinnamon".to_owned());
        }
        if self.marbling1 {
            parts.push("marbled type 1 (pastel)".to_owned());
        }
        if self.marbling2 {
            parts.push("marbled type 2 (mottled pastel)".to_owned());
        }
        if self.american {
            parts.push("american".to_owned());
        }
        if self.fawn {
            parts.push("fawn".to_owned());
        }
        parts.push(self.sex.to_string());
        parts.join(" ")
    }
}

impl From<&GenotypeRecord> for Phenotype {
    fn from(x: &GenotypeRecord) -> Self {
        let on = |locus: AutosomalLocus| x.expression_level(locus) > 0;
        Self {
            sex: x.sex(),
            color: x.base().color(),
            gray: on(AutosomalLocus::Gray),
            dark_factor: x.expression_level(AutosomalLocus::DarkFactor),
            cinnamon: x.sex_linked(SexLinkedLocus::Cinnamon).expressed(),
            fawn: x.sex_linked(SexLinkedLocus::Fawn).expressed(),
            american: on(AutosomalLocus::American),
            marbling1: on(AutosomalLocus::Marbling1),
            marbling2: on(AutosomalLocus::Marbling2),
            harlequin: on(AutosomalLocus::HarlequinDominant)
                || on(AutosomalLocus::HarlequinRecessive),
            ino: on(AutosomalLocus::Ino),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pattern {
    Ino,
    HarlequinWithExtras,
    Harlequin,
    /// Exactly this trait group and no other; `None` is the wild type.
    Exactly(Option<TraitGroup>),
    Any,
}

impl Pattern {
    fn matches(&self, p: &Phenotype) -> bool {
        match self {
            Pattern::Ino => p.ino,
            Pattern::HarlequinWithExtras => p.harlequin && p.has_harlequin_extras(),
            Pattern::Harlequin => p.harlequin,
            Pattern::Exactly(None) => p.trait_groups().is_empty(),
            Pattern::Exactly(Some(group)) => p.trait_groups() == [*group],
            Pattern::Any => true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Naming {
    Ino,
    Harlequin,
    HarlequinOthers,
    Composed,
}

/// One row of the table: codes are `[female, male]` per colour line.
struct Rule {
    pattern: Pattern,
    naming: Naming,
    green: [&'static str; 2],
    blue: [&'static str; 2],
    turquoise: [&'static str; 2],
}

impl Rule {
    fn code(&self, color: BaseColor, sex: Sex) -> &'static str {
        let codes = match color {
            BaseColor::Green => &self.green,
            BaseColor::Blue => &self.blue,
            BaseColor::Turquoise => &self.turquoise,
        };
        match sex {
            Sex::Female => codes[0],
            Sex::Male => codes[1],
        }
    }
}

macro_rules! rule {
    ($pattern:expr, $naming:expr, [$gf:literal, $gm:literal], [$bf:literal, $bm:literal], [$tf:literal, $tm:literal]) => {
        Rule {
            pattern: $pattern,
            naming: $naming,
            green: [concat!("PS 05.01.", $gf), concat!("PS 05.01.", $gm)],
            blue: [concat!("PS 05.02.", $bf), concat!("PS 05.02.", $bm)],
            turquoise: [concat!("PS 05.03.", $tf), concat!("PS 05.03.", $tm)],
        }
    };
}

#[rustfmt::skip]
static RULES: [Rule; 13] = [
    rule!(Pattern::Ino,                                          Naming::Ino,             ["25", "26"], ["25", "25"], ["23", "24"]),
    rule!(Pattern::HarlequinWithExtras,                          Naming::HarlequinOthers, ["23", "24"], ["23", "24"], ["21", "22"]),
    rule!(Pattern::Harlequin,                                    Naming::Harlequin,       ["21", "22"], ["21", "22"], ["19", "20"]),
    rule!(Pattern::Exactly(None),                                Naming::Composed,        ["01", "02"], ["01", "02"], ["01", "02"]),
    rule!(Pattern::Exactly(Some(TraitGroup::Gray)),              Naming::Composed,        ["03", "04"], ["03", "04"], ["03", "04"]),
    rule!(Pattern::Exactly(Some(TraitGroup::DarkFactor(1))),     Naming::Composed,        ["05", "06"], ["05", "06"], ["05", "06"]),
    rule!(Pattern::Exactly(Some(TraitGroup::DarkFactor(2))),     Naming::Composed,        ["07", "08"], ["07", "08"], ["07", "08"]),
    rule!(Pattern::Exactly(Some(TraitGroup::Cinnamon)),          Naming::Composed,        ["09", "10"], ["09", "10"], ["09", "10"]),
    rule!(Pattern::Exactly(Some(TraitGroup::Marbling1)),         Naming::Composed,        ["13", "14"], ["13", "14"], ["11", "12"]),
    rule!(Pattern::Exactly(Some(TraitGroup::Marbling2)),         Naming::Composed,        ["15", "16"], ["15", "16"], ["13", "14"]),
    rule!(Pattern::Exactly(Some(TraitGroup::American)),          Naming::Composed,        ["17", "18"], ["17", "18"], ["15", "16"]),
    rule!(Pattern::Exactly(Some(TraitGroup::Fawn)),              Naming::Composed,        ["19", "20"], ["19", "20"], ["17", "18"]),
    rule!(Pattern::Any,                                          Naming::Composed,        ["50", "51"], ["50", "51"], ["50", "51"]),
];

/// Taxonomy code and description of a phenotype.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category {
    pub code: &'static str,
    pub description: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.description)
    }
}

/// Names a phenotype. Total: the last rule matches everything.
pub fn classify(p: &Phenotype) -> Category {
    let rule = RULES
        .iter()
        .find(|rule| rule.pattern.matches(p))
        .unwrap_or(&RULES[RULES.len() - 1]);
    let description = match rule.naming {
        Naming::Ino => {
            let name = match p.color {
                BaseColor::Green => "lutino",
                BaseColor::Blue => "albino",
                BaseColor::Turquoise => "cremino",
            };
            format!("Coelestis {} {}", name, p.sex)
        }
        Naming::Harlequin => format!("Coelestis {} harlequin {}", p.color, p.sex),
        Naming::HarlequinOthers => {
            format!("Coelestis {} harlequin other combinations {}", p.color, p.sex)
        }
        Naming::Composed => p.describe(),
    };
    Category {
        code: rule.code(p.color, p.sex),
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: [BaseColor; 3] = [BaseColor::Green, BaseColor::Turquoise, BaseColor::Blue];
    const SEXES: [Sex; 2] = [Sex::Male, Sex::Female];

    fn wt(sex: Sex, color: BaseColor) -> Phenotype {
        Phenotype::wild_type(sex, color)
    }

    #[test]
    fn wild_type_test() {
        macro_rules! f {
            ($sex:expr, $color:expr, $code:expr, $desc:expr) => {
                assert_eq!(
                    classify(&wt($sex, $color)),
                    Category {
                        code: $code,
                        description: $desc.to_owned()
                    }
                )
            };
        }
        f!(Sex::Female, BaseColor::Green, "PS 05.01.01", "Coelestis green female");
        f!(Sex::Male, BaseColor::Green, "PS 05.01.02", "Coelestis green male");
        f!(Sex::Male, BaseColor::Blue, "PS 05.02.02", "Coelestis blue male");
        f!(Sex::Female, BaseColor::Turquoise, "PS 05.03.01", "Coelestis turquoise female");
    }

    #[test]
    fn single_trait_test() {
        macro_rules! f {
            ($p:expr, $code:expr, $desc:expr) => {
                let c = classify(&$p);
                assert_eq!(c.code, $code);
                assert_eq!(c.description, $desc);
            };
        }
        let g = wt(Sex::Male, BaseColor::Green);
        let t = wt(Sex::Female, BaseColor::Turquoise);
        f!(Phenotype { gray: true, ..g }, "PS 05.01.04", "Coelestis green gray male");
        f!(Phenotype { dark_factor: 1, ..g }, "PS 05.01.06", "Coelestis green 1 dark factor male");
        f!(Phenotype { dark_factor: 2, ..g }, "PS 05.01.08", "Coelestis green 2 dark factors male");
        f!(Phenotype { cinnamon: true, ..g }, "PS 05.01.10", "Coelestis green cinnamon male");
        f!(Phenotype { marbling1: true, ..g }, "PS 05.01.14", "Coelestis green marbled type 1 (pastel) male");
        f!(Phenotype { fawn: true, ..g }, "PS 05.01.20", "Coelestis green fawn male");
        f!(Phenotype { marbling1: true, ..t }, "PS 05.03.11", "Coelestis turquoise marbled type 1 (pastel) female");
        f!(Phenotype { marbling2: true, ..t }, "PS 05.03.13", "Coelestis turquoise marbled type 2 (mottled pastel) female");
        f!(Phenotype { american: true, ..t }, "PS 05.03.15", "Coelestis turquoise american female");
        f!(Phenotype { fawn: true, ..t }, "PS 05.03.17", "Coelestis turquoise fawn female");
    }

    #[test]
    fn taxonomy_table_test() {
        macro_rules! f {
            ({$($field:ident: $val:expr),*}, $green:expr, $blue:expr, $turquoise:expr) => {
                for (color, codes) in [
                    (BaseColor::Green, $green),
                    (BaseColor::Blue, $blue),
                    (BaseColor::Turquoise, $turquoise),
                ] {
                    for (sex, code) in [(Sex::Female, codes[0]), (Sex::Male, codes[1])] {
                        let p = Phenotype { $($field: $val,)* ..wt(sex, color) };
                        assert_eq!(classify(&p).code, code, "{:?}", p);
                    }
                }
            };
        }
        f!({}, ["PS 05.01.01", "PS 05.01.02"], ["PS 05.02.01", "PS 05.02.02"], ["PS 05.03.01", "PS 05.03.02"]);
        f!({gray: true}, ["PS 05.01.03", "PS 05.01.04"], ["PS 05.02.03", "PS 05.02.04"], ["PS 05.03.03", "PS 05.03.04"]);
        f!({dark_factor: 1}, ["PS 05.01.05", "PS 05.01.06"], ["PS 05.02.05", "PS 05.02.06"], ["PS 05.03.05", "PS 05.03.06"]);
        f!({dark_factor: 2}, ["PS 05.01.07", "PS 05.01.08"], ["PS 05.02.07", "PS 05.02.08"], ["PS 05.03.07", "PS 05.03.08"]);
        f!({cinnamon: true}, ["PS 05.01.09", "PS 05.01.10"], ["PS 05.02.09", "PS 05.02.10"], ["PS 05.03.09", "PS 05.03.10"]);
        f!({marbling1: true}, ["PS 05.01.13", "PS 05.01.14"], ["PS 05.02.13", "PS 05.02.14"], ["PS 05.03.11", "PS 05.03.12"]);
        f!({marbling2: true}, ["PS 05.01.15", "PS 05.01.16"], ["PS 05.02.15", "PS 05.02.16"], ["PS 05.03.13", "PS 05.03.14"]);
        f!({american: true}, ["PS 05.01.17", "PS 05.01.18"], ["PS 05.02.17", "PS 05.02.18"], ["PS 05.03.15", "PS 05.03.16"]);
        f!({fawn: true}, ["PS 05.01.19", "PS 05.01.20"], ["PS 05.02.19", "PS 05.02.20"], ["PS 05.03.17", "PS 05.03.18"]);
        f!({harlequin: true}, ["PS 05.01.21", "PS 05.01.22"], ["PS 05.02.21", "PS 05.02.22"], ["PS 05.03.19", "PS 05.03.20"]);
        f!({harlequin: true, marbling2: true}, ["PS 05.01.23", "PS 05.01.24"], ["PS 05.02.23", "PS 05.02.24"], ["PS 05.03.21", "PS 05.03.22"]);
        f!({ino: true}, ["PS 05.01.25", "PS 05.01.26"], ["PS 05.02.25", "PS 05.02.25"], ["PS 05.03.23", "PS 05.03.24"]);
        f!({gray: true, fawn: true}, ["PS 05.01.50", "PS 05.01.51"], ["PS 05.02.50", "PS 05.02.51"], ["PS 05.03.50", "PS 05.03.51"]);
    }

    #[test]
    fn other_combinations_test() {
        let p = Phenotype {
            gray: true,
            dark_factor: 1,
            ..wt(Sex::Female, BaseColor::Blue)
        };
        let c = classify(&p);
        assert_eq!(c.code, "PS 05.02.50");
        assert_eq!(c.description, "Coelestis blue gray 1 dark factor female");

        let p = Phenotype {
            cinnamon: true,
            fawn: true,
            american: true,
            ..wt(Sex::Male, BaseColor::Turquoise)
        };
        let c = classify(&p);
        assert_eq!(c.code, "PS 05.03.51");
        assert_eq!(c.description, "Coelestis turquoise cinnamon american fawn male");
    }

    #[test]
    fn ino_overrides_test() {
        macro_rules! f {
            ($sex:expr, $color:expr, $code:expr, $desc:expr) => {
                let p = Phenotype {
                    ino: true,
                    harlequin: true,
                    gray: true,
                    cinnamon: true,
                    dark_factor: 2,
                    ..wt($sex, $color)
                };
                assert_eq!(classify(&p).code, $code);
                assert_eq!(classify(&p).description, $desc);
            };
        }
        f!(Sex::Female, BaseColor::Green, "PS 05.01.25", "Coelestis lutino female");
        f!(Sex::Male, BaseColor::Green, "PS 05.01.26", "Coelestis lutino male");
        f!(Sex::Female, BaseColor::Blue, "PS 05.02.25", "Coelestis albino female");
        f!(Sex::Male, BaseColor::Blue, "PS 05.02.25", "Coelestis albino male");
        f!(Sex::Female, BaseColor::Turquoise, "PS 05.03.23", "Coelestis cremino female");
        f!(Sex::Male, BaseColor::Turquoise, "PS 05.03.24", "Coelestis cremino male");
    }

    #[test]
    fn harlequin_test() {
        let h = Phenotype {
            harlequin: true,
            gray: true,
            dark_factor: 1,
            ..wt(Sex::Female, BaseColor::Green)
        };
        assert_eq!(classify(&h).code, "PS 05.01.21");
        assert_eq!(classify(&h).description, "Coelestis green harlequin female");

        let t = Phenotype {
            harlequin: true,
            ..wt(Sex::Male, BaseColor::Turquoise)
        };
        assert_eq!(classify(&t).code, "PS 05.03.20");

        for extra in [
            Phenotype { cinnamon: true, ..h },
            Phenotype { fawn: true, ..h },
            Phenotype { american: true, ..h },
            Phenotype { marbling1: true, ..h },
            Phenotype { marbling2: true, ..h },
        ] {
            let c = classify(&extra);
            assert_eq!(c.code, "PS 05.01.23");
            assert_eq!(c.description, "Coelestis green harlequin other combinations female");
        }
        let b = Phenotype {
            harlequin: true,
            fawn: true,
            ..wt(Sex::Male, BaseColor::Blue)
        };
        assert_eq!(classify(&b).code, "PS 05.02.24");
    }

    #[test]
    fn isabel_description_test() {
        let p = Phenotype {
            cinnamon: true,
            ino: true,
            ..wt(Sex::Male, BaseColor::Green)
        };
        assert_eq!(p.describe(), "Coelestis green isabel male");
        assert_eq!(classify(&p).description, "Coelestis lutino male");
    }

    #[test]
    fn from_genotype_record_test() {
        use crate::alleles::{Allele, BaseAllele};
        use crate::genotype::{BasePair, Diploid, SexLinked};

        let x = GenotypeRecord::wild_type(Sex::Female, BasePair::new(BaseAllele::T, BaseAllele::B))
            .with_autosomal(AutosomalLocus::DarkFactor, Diploid::Carrier)
            .with_autosomal(AutosomalLocus::Gray, Diploid::Carrier)
            .with_autosomal(AutosomalLocus::HarlequinDominant, Diploid::Carrier)
            .with_sex_linked(SexLinkedLocus::Fawn, SexLinked::Zw(Allele::M))
            .unwrap();
        let p = Phenotype::from(&x);
        assert_eq!(
            p,
            Phenotype {
                dark_factor: 1,
                fawn: true,
                harlequin: true,
                ..wt(Sex::Female, BaseColor::Turquoise)
            }
        );
        assert_eq!(classify(&p).code, "PS 05.03.21");

        let y = GenotypeRecord::wild_type(Sex::Male, BasePair::new(BaseAllele::G, BaseAllele::B))
            .with_autosomal(AutosomalLocus::HarlequinRecessive, Diploid::Carrier)
            .with_sex_linked(SexLinkedLocus::Cinnamon, SexLinked::Zz(Diploid::Carrier))
            .unwrap();
        assert_eq!(Phenotype::from(&y), wt(Sex::Male, BaseColor::Green));

        let z = y.with_autosomal(AutosomalLocus::HarlequinRecessive, Diploid::Mutant);
        let p = Phenotype::from(&z);
        assert!(p.harlequin);
        assert_eq!(classify(&p).code, "PS 05.01.22");
    }

    #[test]
    fn classify_is_total_test() {
        for sex in SEXES {
            for color in COLORS {
                for bits in 0u16..(1 << 9) {
                    for dark_factor in 0..3 {
                        let bit = |i: u16| bits & (1 << i) != 0;
                        let p = Phenotype {
                            sex,
                            color,
                            gray: bit(0),
                            dark_factor,
                            cinnamon: bit(1),
                            fawn: bit(2),
                            american: bit(3),
                            marbling1: bit(4),
                            marbling2: bit(5),
                            harlequin: bit(6) || bit(7),
                            ino: bit(8),
                        };
                        let c = classify(&p);
                        let prefix = match color {
                            BaseColor::Green => "PS 05.01.",
                            BaseColor::Blue => "PS 05.02.",
                            BaseColor::Turquoise => "PS 05.03.",
                        };
                        assert!(c.code.starts_with(prefix), "{:?} -> {}", p, c);
                        assert!(c.description.ends_with(sex.name()));
                        let single = p.trait_groups().len() == 1;
                        if !p.ino && !p.harlequin && p.trait_groups().len() > 1 {
                            assert!(c.code.ends_with(".50") || c.code.ends_with(".51"));
                        }
                        if !p.ino && !p.harlequin && single {
                            assert!(!c.code.ends_with(".50") && !c.code.ends_with(".51"));
                        }
                    }
                }
            }
        }
    }
}
