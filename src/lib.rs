//! Cross-probability calculator for Forpus coelestis (Pacific parrotlet) colour mutations.
//!
//! Given the genotype records of a sire and a dam, a cross enumerates every offspring outcome
//! exactly and reports the probability of each phenotype category together with the genotype
//! distribution behind it. Typical use is as follows:
//! ```
//! use coelestis::alleles::{BaseAllele, Sex};
//! use coelestis::cross::cross;
//! use coelestis::genotype::{BasePair, Diploid, GenotypeRecord};
//! use coelestis::loci::AutosomalLocus;
//!
//! let sire = GenotypeRecord::wild_type(Sex::Male, BasePair::new(BaseAllele::G, BaseAllele::B))
//!     .with_autosomal(AutosomalLocus::Ino, Diploid::Carrier);
//! let dam = GenotypeRecord::wild_type(Sex::Female, BasePair::new(BaseAllele::B, BaseAllele::B));
//!
//! let result = cross(&sire, &dam).unwrap();
//! for (key, p) in result.ranked() {
//!     println!("{:.4} {}", p, key);
//! }
//! ```

pub mod alleles;
pub mod cross;
pub mod distribution;
pub mod error;
pub mod gametes;
pub mod genotype;
pub mod loci;
pub mod phenotype;
pub mod report;

#[cfg(feature = "python")]
mod python;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn coelestis(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::cross_python, m)?)?;
    Ok(())
}
