//! Point-cloud featurization.
//!
//! Converts molecules into coordinates paired with a semantic layer label
//! for downstream voxelization. Layers are
//!
//! | layer | atoms |
//! |-------|-------|
//! | [`LAYER_CARBON`] | carbon |
//! | [`LAYER_NITROGEN`] | nitrogen |
//! | [`LAYER_OXYGEN`] | oxygen |
//! | [`LAYER_SULFUR_OR_LIGAND_OTHER`] | sulfur, or any other heavy atom when sulfur is not singled out |
//! | [`LAYER_PROTEIN_OTHER`] | any other heavy atom when sulfur is singled out |
//!
//! Hydrogens are excluded.

use super::error::Error;
use crate::model::molecule::Molecule;
use serde::Serialize;
use tracing::warn;

/// Atomic numbers conventionally passed as `atom_types`.
pub const DEFAULT_ATOM_TYPES: [u8; 4] = [6, 7, 8, 16];

pub const LAYER_CARBON: u8 = 0;
pub const LAYER_NITROGEN: u8 = 1;
pub const LAYER_OXYGEN: u8 = 2;
pub const LAYER_SULFUR_OR_LIGAND_OTHER: u8 = 3;
pub const LAYER_PROTEIN_OTHER: u8 = 4;

/// Layer for an atom with the given atomic number, or `None` if excluded.
pub fn layer_for(atomic_number: u8, note_sulfur: bool) -> Option<u8> {
    match atomic_number {
        1 => None,
        6 => Some(LAYER_CARBON),
        7 => Some(LAYER_NITROGEN),
        8 => Some(LAYER_OXYGEN),
        _ if !note_sulfur => Some(LAYER_SULFUR_OR_LIGAND_OTHER),
        16 => Some(LAYER_SULFUR_OR_LIGAND_OTHER),
        _ => Some(LAYER_PROTEIN_OTHER),
    }
}

/// Index-aligned coordinates and layer labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointCloud {
    pub coords: Vec<[f64; 3]>,
    pub layers: Vec<u8>,
}

impl PointCloud {
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of points on each of the five layers.
    pub fn layer_counts(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for &layer in &self.layers {
            counts[usize::from(layer)] += 1;
        }
        counts
    }
}

/// Featurizes `molecule` as a [`PointCloud`].
///
/// `atom_types` is accepted for interface compatibility and does not affect
/// layer assignment; pass `None` for [`DEFAULT_ATOM_TYPES`]. Excluded atoms
/// are dropped; the remaining points keep atom order.
///
/// # Examples
///
/// ```
/// use frag_forge::{Atom, Element, Molecule, mol_to_points};
///
/// let mol = Molecule {
///     atoms: vec![
///         Atom::new(Element::C, [0.0, 0.0, 0.0]),
///         Atom::new(Element::H, [1.0, 0.0, 0.0]),
///         Atom::new(Element::Fe, [2.0, 0.0, 0.0]),
///     ],
///     ..Default::default()
/// };
///
/// assert_eq!(mol_to_points(&mol, None, true).layers, vec![0, 4]);
/// assert_eq!(mol_to_points(&mol, None, false).layers, vec![0, 3]);
/// ```
pub fn mol_to_points(
    molecule: &Molecule,
    _atom_types: Option<&[u8]>,
    note_sulfur: bool,
) -> PointCloud {
    let mut cloud = PointCloud::default();
    for atom in &molecule.atoms {
        if let Some(layer) = layer_for(atom.atomic_number(), note_sulfur) {
            cloud.coords.push(atom.position);
            cloud.layers.push(layer);
        }
    }
    cloud
}

/// Position of the fragment's dummy (attachment) atom.
///
/// If a fragment carries several dummies the first one is used.
pub fn get_connection_point(fragment: &Molecule) -> Result<[f64; 3], Error> {
    let mut dummies = fragment.atoms.iter().filter(|a| a.element.is_dummy());
    let first = dummies.next().ok_or(Error::MissingDummyAtom)?;

    let extra = dummies.count();
    if extra > 0 {
        warn!(
            dummies = extra + 1,
            "fragment has several dummy atoms; using the first"
        );
    }
    Ok(first.position)
}

/// `[x, y, z, atomic_number]` for every atom, unfiltered.
pub fn mol_array(molecule: &Molecule) -> Vec<[f64; 4]> {
    molecule
        .atoms
        .iter()
        .map(|a| {
            let [x, y, z] = a.position;
            [x, y, z, f64::from(a.atomic_number())]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::types::Element;

    fn mol(elements: &[Element]) -> Molecule {
        Molecule {
            atoms: elements
                .iter()
                .enumerate()
                .map(|(k, &e)| Atom::new(e, [k as f64, 0.5 * k as f64, -(k as f64)]))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn layer_rules() {
        assert_eq!(layer_for(1, true), None);
        assert_eq!(layer_for(1, false), None);
        assert_eq!(layer_for(6, false), Some(0));
        assert_eq!(layer_for(7, true), Some(1));
        assert_eq!(layer_for(8, true), Some(2));
        assert_eq!(layer_for(16, true), Some(3));
        assert_eq!(layer_for(16, false), Some(3));
        assert_eq!(layer_for(26, true), Some(4));
        assert_eq!(layer_for(26, false), Some(3));
        // Dummies are "other" atoms.
        assert_eq!(layer_for(0, true), Some(4));
    }

    #[test]
    fn cnosh_with_sulfur_noted() {
        let m = mol(&[Element::C, Element::N, Element::O, Element::S, Element::H]);
        let cloud = mol_to_points(&m, None, true);
        assert_eq!(cloud.layers, vec![0, 1, 2, 3]);
        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud.coords[3], m.atoms[3].position);
        assert_eq!(cloud.layer_counts(), [1, 1, 1, 1, 0]);
    }

    #[test]
    fn atom_types_do_not_change_layers() {
        let m = mol(&[Element::C, Element::Cl, Element::S]);
        let default = mol_to_points(&m, None, true);
        let custom = mol_to_points(&m, Some(&[6]), true);
        assert_eq!(default, custom);
        assert_eq!(default.layers, vec![0, 4, 3]);
    }

    #[test]
    fn hydrogen_only_molecule_is_empty() {
        let cloud = mol_to_points(&mol(&[Element::H, Element::H]), None, false);
        assert!(cloud.is_empty());
        assert!(cloud.layers.is_empty());
    }

    #[test]
    fn connection_point_is_first_dummy() {
        let mut m = mol(&[Element::C, Element::Du, Element::O, Element::Du]);
        assert_eq!(get_connection_point(&m).unwrap(), m.atoms[1].position);

        m.atoms[1].element = Element::C;
        assert_eq!(get_connection_point(&m).unwrap(), m.atoms[3].position);
    }

    #[test]
    fn missing_dummy_is_an_error() {
        let m = mol(&[Element::C, Element::O]);
        assert!(matches!(
            get_connection_point(&m),
            Err(Error::MissingDummyAtom)
        ));
    }

    #[test]
    fn mol_array_reproduces_atom_set() {
        let m = mol(&[Element::C, Element::H, Element::Du, Element::S]);
        let rows = mol_array(&m);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3], [3.0, 1.5, -3.0, 16.0]);

        let heavy: Vec<u8> = rows
            .iter()
            .map(|r| r[3] as u8)
            .filter(|&z| z > 1)
            .collect();
        let expected: Vec<u8> = m
            .atoms
            .iter()
            .filter(|a| a.element.is_heavy())
            .map(|a| a.atomic_number())
            .collect();
        assert_eq!(heavy, expected);
    }

    #[test]
    fn point_cloud_serializes_as_two_arrays() {
        let cloud = mol_to_points(&mol(&[Element::O]), None, true);
        let json = serde_json::to_value(&cloud).unwrap();
        assert_eq!(json["layers"], serde_json::json!([2]));
        assert_eq!(json["coords"], serde_json::json!([[0.0, 0.0, 0.0]]));
    }
}
