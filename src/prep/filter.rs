use super::error::Error;
use super::toolkit::{Capability, Toolkit, WATER_COMPOSITION};
use crate::model::molecule::Molecule;
use tracing::{debug, warn};

/// Residue names recognized as solvent by the fallback filter.
pub const DEFAULT_WATER_RESIDUES: [&str; 5] = ["WAT", "HOH", "TIP", "TIP3", "OH2"];

const COMPOSITION_PATH: [Capability; 3] = [
    Capability::ComponentDecomposition,
    Capability::CanonicalForm,
    Capability::Concatenation,
];

/// Removes water molecules.
///
/// With a capable toolkit every connected component whose composition is
/// `H2O` is dropped and the survivors are concatenated in component order.
/// Otherwise atoms are dropped by residue name using `water_residues`.
///
/// # Errors
///
/// Returns [`Error::NoNonWaterAtoms`] when nothing would remain.
pub fn remove_water<S: AsRef<str>>(
    toolkit: &dyn Toolkit,
    molecule: &Molecule,
    water_residues: &[S],
) -> Result<Molecule, Error> {
    if toolkit.supports_all(&COMPOSITION_PATH) {
        remove_water_by_composition(toolkit, molecule)
    } else {
        warn!(
            toolkit = toolkit.name(),
            "toolkit cannot identify water by composition; filtering by residue name"
        );
        remove_water_by_residue(molecule, water_residues)
    }
}

fn remove_water_by_composition(
    toolkit: &dyn Toolkit,
    molecule: &Molecule,
) -> Result<Molecule, Error> {
    let mut kept: Option<Molecule> = None;
    let mut dropped = 0usize;

    for component in toolkit.connected_components(molecule)? {
        if toolkit.canonical_composition(&component)? == WATER_COMPOSITION {
            dropped += 1;
            continue;
        }
        kept = Some(match kept {
            Some(acc) => toolkit.combine(&acc, &component)?,
            None => component,
        });
    }

    debug!(waters = dropped, "removed water components");
    kept.ok_or(Error::NoNonWaterAtoms)
}

fn remove_water_by_residue<S: AsRef<str>>(
    molecule: &Molecule,
    water_residues: &[S],
) -> Result<Molecule, Error> {
    if !molecule.has_bio_metadata() {
        debug!("no residue annotations; residue-name water filter is a no-op");
    }

    let is_water = |atom: usize| {
        molecule.residue_name(atom).is_some_and(|name| {
            water_residues
                .iter()
                .any(|w| w.as_ref().eq_ignore_ascii_case(name.trim()))
        })
    };

    let filtered = molecule.retain_atoms(|i, _| !is_water(i));
    debug!(
        removed = molecule.atom_count() - filtered.atom_count(),
        "removed water atoms by residue name"
    );

    if filtered.is_empty() {
        return Err(Error::NoNonWaterAtoms);
    }
    Ok(filtered)
}

/// Removes explicit hydrogens and their bonds.
///
/// When the toolkit can sanitize, every formal charge is reset to zero
/// first. Residue annotations follow the compacted atom order.
pub fn remove_hydrogens(toolkit: &dyn Toolkit, molecule: &Molecule) -> Molecule {
    let mut stripped = molecule.retain_atoms(|_, atom| !atom.element.is_hydrogen());

    if toolkit.supports(Capability::Sanitization) {
        for atom in &mut stripped.atoms {
            atom.formal_charge = 0;
        }
    }

    debug!(
        removed = molecule.atom_count() - stripped.atom_count(),
        "removed hydrogens"
    );
    stripped
}
