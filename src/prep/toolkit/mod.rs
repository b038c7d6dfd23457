//! Chemistry toolkit abstraction.
//!
//! The filter and fragment enumerator only touch molecular graphs through
//! the [`Toolkit`] trait. Two implementations exist:
//!
//! - [`GraphToolkit`]: native bond-graph implementation supporting every
//!   [`Capability`].
//! - [`DegradedToolkit`]: supports nothing; every primitive reports
//!   [`Error::ToolkitUnavailable`]. Callers fall back to residue-name
//!   filtering and unfragmented passthrough.
//!
//! The implementation is chosen once via [`select_toolkit`] and passed
//! explicitly to every operation that needs it.

mod composition;
mod degraded;
mod graph;

pub use composition::{WATER_COMPOSITION, hill_formula};
pub use degraded::DegradedToolkit;
pub use graph::GraphToolkit;

use super::error::Error;
use crate::model::molecule::Molecule;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// An operation a [`Toolkit`] may or may not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Splitting a molecule into its disconnected components.
    ComponentDecomposition,
    /// Computing a canonical composition string.
    CanonicalForm,
    /// Cutting a bond and capping both ends with dummy atoms.
    BondFragmentation,
    /// Disjoint union of two molecules.
    Concatenation,
    /// Charge normalization before hydrogen removal.
    Sanitization,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::ComponentDecomposition,
        Capability::CanonicalForm,
        Capability::BondFragmentation,
        Capability::Concatenation,
        Capability::Sanitization,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::ComponentDecomposition => write!(f, "connected-component decomposition"),
            Capability::CanonicalForm => write!(f, "canonical composition"),
            Capability::BondFragmentation => write!(f, "bond fragmentation"),
            Capability::Concatenation => write!(f, "molecule concatenation"),
            Capability::Sanitization => write!(f, "charge sanitization"),
        }
    }
}

/// Molecular-graph primitives used by filtering and fragmentation.
pub trait Toolkit: Send + Sync {
    /// Short identifier for logs and reports.
    fn name(&self) -> &'static str;

    fn supports(&self, capability: Capability) -> bool;

    fn supports_all(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().all(|&c| self.supports(c))
    }

    /// Disconnected components, ordered by their lowest atom index. Atom
    /// order inside each component follows the input.
    fn connected_components(&self, molecule: &Molecule) -> Result<Vec<Molecule>, Error>;

    /// Canonical composition used to recognize water.
    fn canonical_composition(&self, molecule: &Molecule) -> Result<String, Error>;

    /// Removes bond `bond` and caps each former end with a dummy atom.
    fn fragment_on_bond(&self, molecule: &Molecule, bond: usize) -> Result<Molecule, Error>;

    /// Disjoint union: atoms of `first`, then atoms of `second` with their
    /// indices offset by `first.atom_count()`.
    fn combine(&self, first: &Molecule, second: &Molecule) -> Result<Molecule, Error>;
}

/// Which [`Toolkit`] implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolkitKind {
    #[default]
    Graph,
    Degraded,
}

impl fmt::Display for ToolkitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolkitKind::Graph => write!(f, "graph"),
            ToolkitKind::Degraded => write!(f, "degraded"),
        }
    }
}

/// Builds the toolkit for `kind` and logs the capabilities it reports.
pub fn select_toolkit(kind: ToolkitKind) -> Box<dyn Toolkit> {
    let toolkit: Box<dyn Toolkit> = match kind {
        ToolkitKind::Graph => Box::new(GraphToolkit),
        ToolkitKind::Degraded => Box::new(DegradedToolkit),
    };

    let available: Vec<String> = Capability::ALL
        .iter()
        .filter(|&&c| toolkit.supports(c))
        .map(|c| c.to_string())
        .collect();
    debug!(toolkit = toolkit.name(), capabilities = ?available, "selected chemistry toolkit");

    toolkit
}
