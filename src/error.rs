use crate::alleles::Sex;
use crate::loci::Locus;

/// Errors raised while reading a parent's genotype record.
///
/// Every variant is produced before any enumeration starts; once a cross is running it cannot
/// fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneticsError {
    #[error("invalid genotype {value:?} at locus {locus}: {reason}")]
    Validation {
        locus: Locus,
        value: String,
        reason: String,
    },

    #[error("genotype record is missing locus {0}")]
    MissingLocus(Locus),

    #[error("unknown locus name: {0:?}")]
    UnknownLocus(String),

    #[error("expected a {expected} parent, got a {found}")]
    ParentSex { expected: Sex, found: Sex },
}

impl GeneticsError {
    pub fn validation(locus: Locus, value: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            locus,
            value: value.to_owned(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeneticsError>;
