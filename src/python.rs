use crate::cross::cross_records;
use crate::distribution::PhenotypeKey;
use crate::error::GeneticsError;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::{BTreeMap, HashMap};

type Key = (&'static str, &'static str, String, &'static str);

impl From<GeneticsError> for PyErr {
    fn from(e: GeneticsError) -> Self {
        PyValueError::new_err(e.to_string())
    }
}

fn key(k: &PhenotypeKey) -> Key {
    let (base, code, description, sex) = k.labels();
    (base, code, description.to_owned(), sex)
}

/// Crosses `male` with `female`, both given as `{locus name: genotype}` dicts.
///
/// Returns `(dist, buckets)`: the probability of each `(base, code, description, sex)`
/// category, and per category the genotype mass at every locus.
///
/// Key values are English: base lines and sexes are lowercase English names (`green`,
/// `turquoise`, `blue`, `male`, `female`, where the breed standard says `Verde`, `Turquesa`,
/// `Azul`, `Macho`, `Fêmea`) and descriptions are English. Taxonomy codes, locus names and
/// genotype strings are unchanged.
#[pyo3::pyfunction]
#[pyo3(name = "cross")]
pub fn cross_python(
    male: HashMap<String, String>,
    female: HashMap<String, String>,
) -> PyResult<(
    BTreeMap<Key, f64>,
    BTreeMap<Key, BTreeMap<&'static str, BTreeMap<String, f64>>>,
)> {
    let res = cross_records(male, female)?;
    let dist = res.phenotypes.iter().map(|(k, p)| (key(k), *p)).collect();
    let buckets = res
        .genotypes
        .iter()
        .map(|(k, loci)| {
            let loci = loci
                .iter()
                .map(|(locus, bucket)| {
                    let bucket = bucket.iter().map(|(g, p)| (g.to_string(), *p)).collect();
                    (locus.name(), bucket)
                })
                .collect();
            (key(k), loci)
        })
        .collect();
    Ok((dist, buckets))
}
