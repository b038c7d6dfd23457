//! Error types for structure preparation.
//!
//! Filtering, fragmentation and featurization failures each have a
//! dedicated variant; reader and configuration errors are wrapped
//! unmodified.

use super::toolkit::Capability;
use thiserror::Error;

/// Errors raised while filtering, fragmenting, or featurizing molecules.
#[derive(Debug, Error)]
pub enum Error {
    /// The selected toolkit cannot perform the requested operation.
    ///
    /// The fragment enumerator absorbs this and falls back to a single
    /// unfragmented split; other callers see it only when they invoke a
    /// toolkit primitive directly.
    #[error("chemistry toolkit does not support {0}")]
    ToolkitUnavailable(Capability),

    /// Solvent removal would leave no atoms.
    #[error("molecule contains only water: no atoms remain after solvent removal")]
    NoNonWaterAtoms,

    /// A fragment has no attachment (atomic number 0) atom.
    #[error("fragment has no dummy attachment atom (atomic number 0)")]
    MissingDummyAtom,

    /// A minimum distance was requested against zero reference points.
    #[error("cannot compute a minimum distance against an empty reference set")]
    EmptyReferenceSet,

    /// A bond index does not exist in the molecule.
    #[error("bond index {index} is out of range (molecule has {bond_count} bonds)")]
    InvalidBond {
        /// Requested bond index.
        index: usize,
        /// Number of bonds in the molecule.
        bond_count: usize,
    },

    /// Reading the structure file failed.
    #[error("failed to read structure: {0}")]
    Read(#[from] crate::io::Error),

    /// Failed to parse the preparation settings TOML.
    #[error("failed to parse preparation settings: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// Creates an [`InvalidBond`](Error::InvalidBond) error.
    pub fn invalid_bond(index: usize, bond_count: usize) -> Self {
        Self::InvalidBond { index, bond_count }
    }
}
