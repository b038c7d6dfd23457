//! Enumeration of single-bond (parent, fragment) splits.
//!
//! Every bond of every connected component ("ligand") is cut in turn. The
//! cut must separate the ligand into exactly two pieces; the larger piece
//! becomes the parent, the smaller the fragment. Other components of the
//! input are re-attached to each parent so that multi-ligand inputs keep
//! their context.

use super::config::FragmentOptions;
use super::error::Error;
use super::toolkit::{Capability, Toolkit};
use crate::model::molecule::Molecule;
use crate::model::types::BondOrder;
use tracing::{debug, warn};

const FRAGMENTATION_PATH: [Capability; 3] = [
    Capability::ComponentDecomposition,
    Capability::BondFragmentation,
    Capability::Concatenation,
];

/// One way of cutting a molecule.
///
/// `fragment` is `None` only for the passthrough split returned when
/// fragmentation could not be performed. A present fragment always has at
/// least one heavy atom and exactly one dummy atom, and its parent has at
/// least as many heavy atoms as the fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSplit {
    pub parent: Molecule,
    pub fragment: Option<Molecule>,
}

impl FragmentSplit {
    /// The "fragmentation not performed" sentinel.
    pub fn unfragmented(molecule: &Molecule) -> Self {
        Self {
            parent: molecule.clone(),
            fragment: None,
        }
    }

    #[inline]
    pub fn is_fragmented(&self) -> bool {
        self.fragment.is_some()
    }
}

/// Enumerates every valid split of `molecule`.
///
/// Splits are produced in ligand order, then bond order. Duplicates
/// arising from symmetric molecules are kept.
///
/// When the toolkit cannot fragment, the result is a single
/// [`FragmentSplit::unfragmented`] entry instead of an error. An empty
/// vector means fragmentation ran and found nothing acceptable.
///
/// # Errors
///
/// Toolkit failures other than [`Error::ToolkitUnavailable`] are
/// propagated.
///
/// # Examples
///
/// ```
/// use frag_forge::{Atom, Bond, BondOrder, Element, FragmentOptions, Molecule};
/// use frag_forge::{GraphToolkit, generate_fragments};
///
/// let mol = Molecule {
///     atoms: vec![
///         Atom::new(Element::C, [0.0, 0.0, 0.0]),
///         Atom::new(Element::C, [1.5, 0.0, 0.0]),
///         Atom::new(Element::O, [2.0, 1.2, 0.0]),
///     ],
///     bonds: vec![
///         Bond::new(0, 1, BondOrder::Single),
///         Bond::new(1, 2, BondOrder::Single),
///     ],
///     bio_metadata: None,
/// };
///
/// let splits = generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();
/// assert_eq!(splits.len(), 2);
/// assert!(splits.iter().all(|s| s.is_fragmented()));
/// ```
pub fn generate_fragments(
    toolkit: &dyn Toolkit,
    molecule: &Molecule,
    options: &FragmentOptions,
) -> Result<Vec<FragmentSplit>, Error> {
    if !toolkit.supports_all(&FRAGMENTATION_PATH) {
        warn!(
            toolkit = toolkit.name(),
            "toolkit cannot fragment; returning the molecule unfragmented"
        );
        return Ok(vec![FragmentSplit::unfragmented(molecule)]);
    }

    match enumerate(toolkit, molecule, options) {
        Err(Error::ToolkitUnavailable(capability)) => {
            warn!(%capability, "fragmentation aborted; returning the molecule unfragmented");
            Ok(vec![FragmentSplit::unfragmented(molecule)])
        }
        result => result,
    }
}

fn enumerate(
    toolkit: &dyn Toolkit,
    molecule: &Molecule,
    options: &FragmentOptions,
) -> Result<Vec<FragmentSplit>, Error> {
    let ligands = toolkit.connected_components(molecule)?;
    let mut splits = Vec::new();

    for (li, ligand) in ligands.iter().enumerate() {
        let bystanders: Vec<&Molecule> = ligands
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != li)
            .map(|(_, m)| m)
            .collect();

        for (bi, bond) in ligand.bonds.iter().enumerate() {
            if options.only_single_bonds && bond.order != BondOrder::Single {
                continue;
            }

            let cut = toolkit.fragment_on_bond(ligand, bi)?;
            let pieces: Result<[Molecule; 2], _> = toolkit.connected_components(&cut)?.try_into();
            let Ok([first, second]) = pieces else {
                // Ring bond: the ligand stays in one piece.
                continue;
            };

            let (mut parent, fragment) = if first.atom_count() >= second.atom_count() {
                (first, second)
            } else {
                (second, first)
            };

            let heavy = fragment.heavy_atom_count();
            // Explicit hydrogens can make the atom-count winner the lighter side.
            if heavy == 0 || parent.heavy_atom_count() < heavy {
                continue;
            }
            if options.max_heavy_atoms > 0 && heavy > options.max_heavy_atoms {
                continue;
            }

            for other in &bystanders {
                parent = toolkit.combine(&parent, other)?;
            }

            splits.push(FragmentSplit {
                parent,
                fragment: Some(fragment),
            });
        }
    }

    debug!(
        ligands = ligands.len(),
        splits = splits.len(),
        "enumerated fragment splits"
    );
    Ok(splits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::molecule::Bond;
    use crate::model::types::Element;
    use crate::prep::toolkit::{DegradedToolkit, GraphToolkit};

    fn chain(elements: &[Element], origin: [f64; 3]) -> Molecule {
        let atoms = elements
            .iter()
            .enumerate()
            .map(|(k, &e)| Atom::new(e, [origin[0] + 1.5 * k as f64, origin[1], origin[2]]))
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

    fn ccno() -> Molecule {
        chain(
            &[Element::C, Element::C, Element::C, Element::N, Element::O],
            [0.0; 3],
        )
    }

    fn assert_valid(split: &FragmentSplit) {
        let fragment = split.fragment.as_ref().expect("fragment present");
        assert!(fragment.heavy_atom_count() >= 1);
        assert_eq!(fragment.dummy_atom_count(), 1);
        assert!(split.parent.heavy_atom_count() >= fragment.heavy_atom_count());
        assert!(split.parent.atom_count() >= fragment.atom_count());
    }

    #[test]
    fn linear_chain_yields_one_split_per_bond() {
        let splits =
            generate_fragments(&GraphToolkit, &ccno(), &FragmentOptions::default()).unwrap();
        assert_eq!(splits.len(), 4);
        for split in &splits {
            assert_valid(split);
            assert!(split.parent.atom_count() >= 3);
            assert_eq!(split.parent.dummy_atom_count(), 1);
        }

        let fragment_heavy: Vec<usize> = splits
            .iter()
            .map(|s| s.fragment.as_ref().unwrap().heavy_atom_count())
            .collect();
        assert_eq!(fragment_heavy, vec![1, 2, 2, 1]);
    }

    #[test]
    fn max_heavy_atoms_caps_fragment_size() {
        let opts = FragmentOptions {
            max_heavy_atoms: 1,
            ..Default::default()
        };
        let splits = generate_fragments(&GraphToolkit, &ccno(), &opts).unwrap();
        assert_eq!(splits.len(), 2);
        for split in &splits {
            assert_eq!(split.fragment.as_ref().unwrap().heavy_atom_count(), 1);
        }
    }

    #[test]
    fn only_single_bonds_skips_multiple_bonds() {
        let mut mol = chain(&[Element::C, Element::C, Element::O], [0.0; 3]);
        mol.bonds[1].order = BondOrder::Double;

        let single_only =
            generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();
        assert_eq!(single_only.len(), 1);

        let all_bonds = FragmentOptions {
            only_single_bonds: false,
            ..Default::default()
        };
        let splits = generate_fragments(&GraphToolkit, &mol, &all_bonds).unwrap();
        assert_eq!(splits.len(), 2);
        // The dummy inherits the order of the bond it replaced.
        let fragment = splits[1].fragment.as_ref().unwrap();
        assert_eq!(fragment.bonds[0].order, BondOrder::Double);
    }

    #[test]
    fn ring_bonds_produce_no_split() {
        // Cyclopropane with a methyl: only the exocyclic bond separates.
        let mut mol = chain(&[Element::C, Element::C, Element::C, Element::C], [0.0; 3]);
        mol.bonds.push(Bond::new(1, 3, BondOrder::Single));
        let splits =
            generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();
        assert_eq!(splits.len(), 1);
        assert_valid(&splits[0]);
        assert_eq!(splits[0].fragment.as_ref().unwrap().heavy_atom_count(), 1);
    }

    #[test]
    fn hydrogen_only_fragments_are_rejected() {
        let mol = chain(&[Element::C, Element::O, Element::H], [0.0; 3]);
        let splits =
            generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();
        assert_eq!(splits.len(), 1);
        assert_eq!(
            splits[0].fragment.as_ref().unwrap().atomic_numbers(),
            vec![6, 0]
        );
    }

    #[test]
    fn hydrogen_only_parents_are_rejected() {
        // Both sides of H-C carry two atoms, so the H side wins the size tie.
        let mol = chain(&[Element::H, Element::C], [0.0; 3]);
        let splits =
            generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();
        assert!(splits.is_empty());
    }

    #[test]
    fn parents_never_have_fewer_heavy_atoms_than_fragments() {
        // Methyl (C + 3 H) on N-O: the C-N cut leaves CH3 as the larger piece
        // by atom count but the smaller one by heavy atoms.
        let mut atoms = vec![Atom::new(Element::C, [0.0, 0.0, 0.0])];
        for k in 0..3 {
            atoms.push(Atom::new(Element::H, [-0.6, 0.9 * k as f64 - 0.9, 0.3]));
        }
        atoms.push(Atom::new(Element::N, [1.47, 0.0, 0.0]));
        atoms.push(Atom::new(Element::O, [2.0, 1.3, 0.0]));
        let mol = Molecule {
            atoms,
            bonds: vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(0, 2, BondOrder::Single),
                Bond::new(0, 3, BondOrder::Single),
                Bond::new(0, 4, BondOrder::Single),
                Bond::new(4, 5, BondOrder::Single),
            ],
            bio_metadata: None,
        };

        let splits =
            generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();
        assert_eq!(splits.len(), 1);
        assert_valid(&splits[0]);
        assert_eq!(splits[0].fragment.as_ref().unwrap().atomic_numbers(), vec![8, 0]);
    }

    #[test]
    fn bystanders_are_attached_to_every_parent() {
        let ligand = chain(&[Element::C, Element::C, Element::O], [0.0; 3]);
        let ion = chain(&[Element::S], [20.0, 0.0, 0.0]);
        let mol = GraphToolkit.combine(&ligand, &ion).unwrap();

        let splits =
            generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();
        assert_eq!(splits.len(), 2);
        for split in &splits {
            assert_valid(split);
            assert_eq!(*split.parent.atomic_numbers().last().unwrap(), 16);
            assert!(!split.fragment.as_ref().unwrap().atomic_numbers().contains(&16));
        }
    }

    #[test]
    fn every_ligand_is_fragmented() {
        let a = chain(&[Element::C, Element::N], [0.0; 3]);
        let b = chain(&[Element::C, Element::C, Element::O], [20.0, 0.0, 0.0]);
        let mol = GraphToolkit.combine(&a, &b).unwrap();

        let splits =
            generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();
        // One cut in the first ligand, two in the second.
        assert_eq!(splits.len(), 3);
        // First split: C-N cut with the whole second ligand as bystander.
        assert_eq!(splits[0].parent.atom_count(), 2 + 3);
        assert_eq!(splits[1].parent.atom_count(), 3 + 2);
    }

    #[test]
    fn isolated_atoms_yield_no_splits() {
        let mol = chain(&[Element::C], [0.0; 3]);
        let splits =
            generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();
        assert!(splits.is_empty());
    }

    #[test]
    fn degraded_toolkit_passes_molecule_through() {
        let mol = ccno();
        let splits =
            generate_fragments(&DegradedToolkit, &mol, &FragmentOptions::default()).unwrap();
        assert_eq!(splits, vec![FragmentSplit::unfragmented(&mol)]);
        assert!(!splits[0].is_fragmented());
    }

    #[test]
    fn input_is_not_mutated() {
        let mol = ccno();
        let before = mol.clone();
        let _ = generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();
        assert_eq!(mol, before);
    }
}
