use super::composition::hill_formula;
use super::{Capability, Toolkit};
use crate::model::atom::Atom;
use crate::model::metadata::BioMetadata;
use crate::model::molecule::{Bond, Molecule};
use crate::prep::error::Error;
use std::collections::VecDeque;

/// Native toolkit operating directly on the bond graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphToolkit;

impl Toolkit for GraphToolkit {
    fn name(&self) -> &'static str {
        "graph"
    }

    fn supports(&self, _capability: Capability) -> bool {
        true
    }

    fn connected_components(&self, molecule: &Molecule) -> Result<Vec<Molecule>, Error> {
        let n = molecule.atom_count();
        let adjacency = molecule.adjacency();
        let mut visited = vec![false; n];
        let mut components = Vec::new();

        for seed in 0..n {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            let mut members = vec![seed];
            let mut queue = VecDeque::from([seed]);

            while let Some(current) = queue.pop_front() {
                for &next in &adjacency[current] {
                    if !visited[next] {
                        visited[next] = true;
                        members.push(next);
                        queue.push_back(next);
                    }
                }
            }

            members.sort_unstable();
            components.push(molecule.extract(&members));
        }

        Ok(components)
    }

    fn canonical_composition(&self, molecule: &Molecule) -> Result<String, Error> {
        Ok(hill_formula(molecule))
    }

    fn fragment_on_bond(&self, molecule: &Molecule, bond: usize) -> Result<Molecule, Error> {
        let cut = molecule
            .bonds
            .get(bond)
            .ok_or_else(|| Error::invalid_bond(bond, molecule.bond_count()))?
            .clone();

        let mut result = molecule.clone();
        result.bonds.remove(bond);

        // Each end is capped by a dummy sitting where its old partner was.
        for (attached, partner) in [(cut.i, cut.j), (cut.j, cut.i)] {
            let dummy_index = result.atoms.len();
            result
                .atoms
                .push(Atom::dummy(molecule.atoms[partner].position));
            result
                .bonds
                .push(Bond::new(attached, dummy_index, cut.order));

            if let Some(meta) = result.bio_metadata.as_mut() {
                if let Some(mut info) = meta.atom_info.get(attached).cloned() {
                    info.atom_name = "*".to_string();
                    meta.atom_info.push(info);
                }
            }
        }

        Ok(result)
    }

    fn combine(&self, first: &Molecule, second: &Molecule) -> Result<Molecule, Error> {
        let offset = first.atom_count();

        let mut atoms = Vec::with_capacity(offset + second.atom_count());
        atoms.extend(first.atoms.iter().cloned());
        atoms.extend(second.atoms.iter().cloned());

        let mut bonds = Vec::with_capacity(first.bond_count() + second.bond_count());
        bonds.extend(first.bonds.iter().cloned());
        bonds.extend(
            second
                .bonds
                .iter()
                .map(|b| Bond::new(b.i + offset, b.j + offset, b.order)),
        );

        let bio_metadata = match (&first.bio_metadata, &second.bio_metadata) {
            (Some(a), Some(b)) => Some(BioMetadata {
                atom_info: a.atom_info.iter().chain(&b.atom_info).cloned().collect(),
            }),
            _ => None,
        };

        Ok(Molecule {
            atoms,
            bonds,
            bio_metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::metadata::AtomResidueInfo;
    use crate::model::types::{BondOrder, Element};

    fn chain(elements: &[Element]) -> Molecule {
        let atoms = elements
            .iter()
            .enumerate()
            .map(|(k, &e)| Atom::new(e, [1.5 * k as f64, 0.0, 0.0]))
            .collect();
        let bonds = (1..elements.len())
            .map(|k| Bond::new(k - 1, k, BondOrder::Single))
            .collect();
        Molecule {
            atoms,
            bonds,
            bio_metadata: None,
        }
    }

    #[test]
    fn components_are_ordered_by_lowest_atom_index() {
        // Atoms 0 and 2 bonded, 1 isolated, 3-4 bonded.
        let mol = Molecule {
            atoms: vec![
                Atom::new(Element::C, [0.0; 3]),
                Atom::new(Element::O, [5.0, 0.0, 0.0]),
                Atom::new(Element::N, [1.4, 0.0, 0.0]),
                Atom::new(Element::S, [9.0, 0.0, 0.0]),
                Atom::new(Element::C, [10.8, 0.0, 0.0]),
            ],
            bonds: vec![
                Bond::new(0, 2, BondOrder::Single),
                Bond::new(3, 4, BondOrder::Single),
            ],
            bio_metadata: None,
        };

        let parts = GraphToolkit.connected_components(&mol).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].atomic_numbers(), vec![6, 7]);
        assert_eq!(parts[0].bonds, vec![Bond::new(0, 1, BondOrder::Single)]);
        assert_eq!(parts[1].atomic_numbers(), vec![8]);
        assert_eq!(parts[2].atomic_numbers(), vec![16, 6]);
    }

    #[test]
    fn empty_molecule_has_no_components() {
        let parts = GraphToolkit.connected_components(&Molecule::new()).unwrap();
        assert!(parts.is_empty());
    }

    #[test]
    fn fragment_on_bond_caps_both_ends_with_dummies() {
        let mol = chain(&[Element::C, Element::C, Element::O]);
        let cut = GraphToolkit.fragment_on_bond(&mol, 1).unwrap();

        assert_eq!(cut.atom_count(), 5);
        assert_eq!(cut.dummy_atom_count(), 2);
        // Dummy on C1 sits at the O position, dummy on O at the C1 position.
        assert_eq!(cut.atoms[3].position, mol.atoms[2].position);
        assert_eq!(cut.atoms[4].position, mol.atoms[1].position);
        assert!(cut.bonds.contains(&Bond::new(1, 3, BondOrder::Single)));
        assert!(cut.bonds.contains(&Bond::new(2, 4, BondOrder::Single)));
        assert!(!cut.bonds.contains(&Bond::new(1, 2, BondOrder::Single)));

        let parts = GraphToolkit.connected_components(&cut).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].atomic_numbers(), vec![6, 6, 0]);
        assert_eq!(parts[1].atomic_numbers(), vec![8, 0]);
    }

    #[test]
    fn fragment_on_bond_leaves_input_untouched() {
        let mol = chain(&[Element::C, Element::N]);
        let before = mol.clone();
        let _ = GraphToolkit.fragment_on_bond(&mol, 0).unwrap();
        assert_eq!(mol, before);
    }

    #[test]
    fn fragment_on_bond_extends_metadata() {
        let mut mol = chain(&[Element::C, Element::N]);
        mol.bio_metadata = Some(BioMetadata {
            atom_info: vec![
                AtomResidueInfo::new("C1", "LIG", 1, 'A'),
                AtomResidueInfo::new("N1", "LIG", 1, 'A'),
            ],
        });
        let cut = GraphToolkit.fragment_on_bond(&mol, 0).unwrap();
        let info = &cut.bio_metadata.unwrap().atom_info;
        assert_eq!(info.len(), 4);
        assert_eq!(info[2].atom_name, "*");
        assert_eq!(info[2].residue_name, "LIG");
    }

    #[test]
    fn fragment_on_missing_bond_is_an_error() {
        let mol = chain(&[Element::C, Element::N]);
        let err = GraphToolkit.fragment_on_bond(&mol, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidBond {
                index: 3,
                bond_count: 1
            }
        ));
    }

    #[test]
    fn ring_bond_cut_stays_connected() {
        let mut ring = chain(&[Element::C, Element::C, Element::C]);
        ring.bonds.push(Bond::new(0, 2, BondOrder::Single));
        let cut = GraphToolkit.fragment_on_bond(&ring, 0).unwrap();
        assert_eq!(GraphToolkit.connected_components(&cut).unwrap().len(), 1);
    }

    #[test]
    fn combine_offsets_second_molecule() {
        let a = chain(&[Element::C, Element::O]);
        let b = chain(&[Element::N, Element::S]);
        let merged = GraphToolkit.combine(&a, &b).unwrap();

        assert_eq!(merged.atomic_numbers(), vec![6, 8, 7, 16]);
        assert_eq!(
            merged.bonds,
            vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(2, 3, BondOrder::Single)
            ]
        );
        assert!(merged.bio_metadata.is_none());
    }

    #[test]
    fn composition_uses_hill_formula() {
        let water = Molecule {
            atoms: vec![Atom::new(Element::O, [0.0; 3])],
            ..Default::default()
        };
        assert_eq!(GraphToolkit.canonical_composition(&water).unwrap(), "H2O");
    }
}
