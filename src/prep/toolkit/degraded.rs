use super::{Capability, Toolkit};
use crate::model::molecule::Molecule;
use crate::prep::error::Error;

/// Toolkit stand-in for environments without molecular-graph support.
///
/// Reports no capabilities, so callers take their fallback paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegradedToolkit;

impl Toolkit for DegradedToolkit {
    fn name(&self) -> &'static str {
        "degraded"
    }

    fn supports(&self, _capability: Capability) -> bool {
        false
    }

    fn connected_components(&self, _molecule: &Molecule) -> Result<Vec<Molecule>, Error> {
        Err(Error::ToolkitUnavailable(Capability::ComponentDecomposition))
    }

    fn canonical_composition(&self, _molecule: &Molecule) -> Result<String, Error> {
        Err(Error::ToolkitUnavailable(Capability::CanonicalForm))
    }

    fn fragment_on_bond(&self, _molecule: &Molecule, _bond: usize) -> Result<Molecule, Error> {
        Err(Error::ToolkitUnavailable(Capability::BondFragmentation))
    }

    fn combine(&self, _first: &Molecule, _second: &Molecule) -> Result<Molecule, Error> {
        Err(Error::ToolkitUnavailable(Capability::Concatenation))
    }
}
