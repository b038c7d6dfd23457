use super::atom::Atom;
use super::metadata::BioMetadata;
use super::types::BondOrder;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize, order: BondOrder) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2, order }
        } else {
            Self { i: idx2, j: idx1, order }
        }
    }

    #[inline]
    pub fn contains(&self, atom: usize) -> bool {
        self.i == atom || self.j == atom
    }

    /// The atom on the other end of the bond, if `atom` is one of its ends.
    #[inline]
    pub fn partner(&self, atom: usize) -> Option<usize> {
        if self.i == atom {
            Some(self.j)
        } else if self.j == atom {
            Some(self.i)
        } else {
            None
        }
    }
}

/// A set of atoms with 3D coordinates, their bonds, and optional residue
/// annotations.
///
/// Atom indices are zero-based and stay valid for the lifetime of the value.
/// Every operation that adds or removes atoms returns a new `Molecule`.
/// When present, `bio_metadata.atom_info` is index-aligned with `atoms`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub bio_metadata: Option<BioMetadata>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    #[inline]
    pub fn has_bio_metadata(&self) -> bool {
        self.bio_metadata.is_some()
    }

    pub fn heavy_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.element.is_heavy()).count()
    }

    pub fn dummy_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.element.is_dummy()).count()
    }

    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    pub fn atomic_numbers(&self) -> Vec<u8> {
        self.atoms.iter().map(Atom::atomic_number).collect()
    }

    pub fn residue_name(&self, atom: usize) -> Option<&str> {
        self.bio_metadata.as_ref()?.residue_name(atom)
    }

    /// Neighbor lists indexed by atom.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut neighbors = vec![Vec::new(); self.atoms.len()];
        for bond in &self.bonds {
            neighbors[bond.i].push(bond.j);
            neighbors[bond.j].push(bond.i);
        }
        neighbors
    }

    /// Builds the sub-molecule spanned by `indices` (ascending, unique).
    ///
    /// Atoms keep their relative order; bonds with both ends inside the
    /// selection are kept in their original order and renumbered.
    pub fn extract(&self, indices: &[usize]) -> Molecule {
        let mut remap = vec![usize::MAX; self.atoms.len()];
        for (new_idx, &old_idx) in indices.iter().enumerate() {
            remap[old_idx] = new_idx;
        }

        let atoms = indices.iter().map(|&i| self.atoms[i].clone()).collect();

        let bonds = self
            .bonds
            .iter()
            .filter(|b| remap[b.i] != usize::MAX && remap[b.j] != usize::MAX)
            .map(|b| Bond::new(remap[b.i], remap[b.j], b.order))
            .collect();

        let bio_metadata = self.bio_metadata.as_ref().map(|meta| BioMetadata {
            atom_info: indices
                .iter()
                .filter_map(|&i| meta.atom_info.get(i).cloned())
                .collect(),
        });

        Molecule {
            atoms,
            bonds,
            bio_metadata,
        }
    }

    /// Keeps the atoms for which `keep(index, atom)` returns `true`.
    pub fn retain_atoms<F>(&self, mut keep: F) -> Molecule
    where
        F: FnMut(usize, &Atom) -> bool,
    {
        let indices: Vec<usize> = self
            .atoms
            .iter()
            .enumerate()
            .filter(|(i, a)| keep(*i, a))
            .map(|(i, _)| i)
            .collect();
        self.extract(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::metadata::AtomResidueInfo;
    use crate::model::types::Element;

    fn ethanol_with_h() -> Molecule {
        Molecule {
            atoms: vec![
                Atom::new(Element::C, [0.0, 0.0, 0.0]),
                Atom::new(Element::C, [1.5, 0.0, 0.0]),
                Atom::new(Element::O, [2.0, 1.2, 0.0]),
                Atom::new(Element::H, [2.9, 1.2, 0.0]),
            ],
            bonds: vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(1, 2, BondOrder::Single),
                Bond::new(3, 2, BondOrder::Single),
            ],
            bio_metadata: Some(BioMetadata {
                atom_info: vec![
                    AtomResidueInfo::new("C1", "EOH", 1, 'A'),
                    AtomResidueInfo::new("C2", "EOH", 1, 'A'),
                    AtomResidueInfo::new("O", "EOH", 1, 'A'),
                    AtomResidueInfo::new("HO", "EOH", 1, 'A'),
                ],
            }),
        }
    }

    #[test]
    fn bond_new_normalizes_index_order() {
        let b = Bond::new(5, 2, BondOrder::Double);
        assert_eq!((b.i, b.j), (2, 5));
        assert_eq!(b.partner(2), Some(5));
        assert_eq!(b.partner(5), Some(2));
        assert_eq!(b.partner(3), None);
        assert!(b.contains(5));
    }

    #[test]
    fn counts_heavy_and_dummy_atoms() {
        let mut mol = ethanol_with_h();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.heavy_atom_count(), 3);
        assert_eq!(mol.dummy_atom_count(), 0);

        mol.atoms.push(Atom::dummy([0.0, 0.0, 1.0]));
        assert_eq!(mol.heavy_atom_count(), 3);
        assert_eq!(mol.dummy_atom_count(), 1);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let adj = ethanol_with_h().adjacency();
        assert_eq!(adj[0], vec![1]);
        assert_eq!(adj[1], vec![0, 2]);
        assert_eq!(adj[2], vec![1, 3]);
        assert_eq!(adj[3], vec![2]);
    }

    #[test]
    fn retain_atoms_remaps_bonds_and_metadata() {
        let mol = ethanol_with_h();
        let stripped = mol.retain_atoms(|_, a| a.element != Element::H);

        assert_eq!(stripped.atom_count(), 3);
        assert_eq!(
            stripped.bonds,
            vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(1, 2, BondOrder::Single)
            ]
        );
        let meta = stripped.bio_metadata.as_ref().expect("metadata kept");
        assert_eq!(meta.atom_info.len(), 3);
        assert_eq!(meta.atom_info[2].atom_name, "O");
    }

    #[test]
    fn extract_keeps_relative_order() {
        let mol = ethanol_with_h();
        let sub = mol.extract(&[1, 3]);
        assert_eq!(sub.atomic_numbers(), vec![6, 1]);
        assert!(sub.bonds.is_empty());
        assert_eq!(sub.residue_name(1), Some("EOH"));
    }
}
