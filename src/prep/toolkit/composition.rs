use crate::model::molecule::Molecule;
use std::collections::BTreeMap;

/// Hill formula of an isolated water molecule.
pub const WATER_COMPOSITION: &str = "H2O";

/// Default valence for the isoelectronic atomic number (`z - charge`).
fn default_valence(isoelectronic_z: i16) -> Option<u8> {
    match isoelectronic_z {
        1 => Some(1),
        5 => Some(3),
        6 => Some(4),
        7 => Some(3),
        8 => Some(2),
        9 => Some(1),
        15 => Some(3),
        16 => Some(2),
        17 => Some(1),
        35 => Some(1),
        53 => Some(1),
        _ => None,
    }
}

/// Hydrogens needed to fill each atom's default valence.
///
/// Hydrogens and dummy atoms never carry implicit hydrogens, nor do elements
/// without a default valence.
pub fn implicit_hydrogens(molecule: &Molecule) -> Vec<u32> {
    let mut bond_sum = vec![0.0_f64; molecule.atom_count()];
    for bond in &molecule.bonds {
        bond_sum[bond.i] += bond.order.value();
        bond_sum[bond.j] += bond.order.value();
    }

    molecule
        .atoms
        .iter()
        .zip(&bond_sum)
        .map(|(atom, &sum)| {
            if !atom.element.is_heavy() {
                return 0;
            }
            let iso_z = i16::from(atom.atomic_number()) - i16::from(atom.formal_charge);
            match default_valence(iso_z) {
                Some(valence) => (i64::from(valence) - sum.round() as i64).max(0) as u32,
                None => 0,
            }
        })
        .collect()
}

/// Hill-system formula with implicit hydrogens and a net-charge suffix.
///
/// Carbon comes first and hydrogen second when carbon is present; every
/// other element, and hydrogen in carbon-free molecules, is listed
/// alphabetically. Dummy atoms are not counted.
pub fn hill_formula(molecule: &Molecule) -> String {
    let mut counts: BTreeMap<&'static str, u32> = BTreeMap::new();
    let mut hydrogens = 0u32;
    let mut net_charge = 0i32;

    for (atom, implicit) in molecule.atoms.iter().zip(implicit_hydrogens(molecule)) {
        net_charge += i32::from(atom.formal_charge);
        hydrogens += implicit;
        if atom.element.is_dummy() {
            continue;
        }
        if atom.element.is_hydrogen() {
            hydrogens += 1;
        } else {
            *counts.entry(atom.element.symbol()).or_insert(0) += 1;
        }
    }

    let mut formula = String::new();
    let mut push = |symbol: &str, count: u32| {
        if count == 0 {
            return;
        }
        formula.push_str(symbol);
        if count > 1 {
            formula.push_str(&count.to_string());
        }
    };

    if let Some(carbons) = counts.remove("C") {
        push("C", carbons);
        push("H", hydrogens);
        for (symbol, count) in &counts {
            push(symbol, *count);
        }
    } else {
        counts.insert("H", hydrogens);
        for (symbol, count) in &counts {
            push(symbol, *count);
        }
    }

    match net_charge {
        0 => {}
        1 => formula.push('+'),
        -1 => formula.push('-'),
        n if n > 0 => formula.push_str(&format!("+{n}")),
        n => formula.push_str(&format!("-{}", -n)),
    }

    formula
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::molecule::Bond;
    use crate::model::types::{BondOrder, Element};

    fn single(i: usize, j: usize) -> Bond {
        Bond::new(i, j, BondOrder::Single)
    }

    #[test]
    fn bare_oxygen_is_water() {
        let mol = Molecule {
            atoms: vec![Atom::new(Element::O, [0.0; 3])],
            ..Default::default()
        };
        assert_eq!(hill_formula(&mol), WATER_COMPOSITION);
    }

    #[test]
    fn explicit_water_hydrogens_are_counted_once() {
        let mol = Molecule {
            atoms: vec![
                Atom::new(Element::O, [0.0; 3]),
                Atom::new(Element::H, [0.96, 0.0, 0.0]),
                Atom::new(Element::H, [-0.24, 0.93, 0.0]),
            ],
            bonds: vec![single(0, 1), single(0, 2)],
            bio_metadata: None,
        };
        assert_eq!(hill_formula(&mol), "H2O");
    }

    #[test]
    fn hydroxide_and_hydronium_are_not_water() {
        let hydroxide = Molecule {
            atoms: vec![Atom::new(Element::O, [0.0; 3]).with_charge(-1)],
            ..Default::default()
        };
        let hydronium = Molecule {
            atoms: vec![Atom::new(Element::O, [0.0; 3]).with_charge(1)],
            ..Default::default()
        };
        assert_eq!(hill_formula(&hydroxide), "HO-");
        assert_eq!(hill_formula(&hydronium), "H3O+");
    }

    #[test]
    fn carbon_first_then_hydrogen_then_alphabetical() {
        // Ethanol heavy atoms only: C-C-O.
        let mol = Molecule {
            atoms: vec![
                Atom::new(Element::C, [0.0; 3]),
                Atom::new(Element::C, [1.5, 0.0, 0.0]),
                Atom::new(Element::O, [2.0, 1.2, 0.0]),
            ],
            bonds: vec![single(0, 1), single(1, 2)],
            bio_metadata: None,
        };
        assert_eq!(hill_formula(&mol), "C2H6O");
    }

    #[test]
    fn double_bonds_reduce_implicit_hydrogens() {
        // Formaldehyde C=O.
        let mol = Molecule {
            atoms: vec![
                Atom::new(Element::C, [0.0; 3]),
                Atom::new(Element::O, [1.2, 0.0, 0.0]),
            ],
            bonds: vec![Bond::new(0, 1, BondOrder::Double)],
            bio_metadata: None,
        };
        assert_eq!(implicit_hydrogens(&mol), vec![2, 0]);
        assert_eq!(hill_formula(&mol), "CH2O");
    }

    #[test]
    fn dummy_atoms_are_ignored() {
        let mol = Molecule {
            atoms: vec![
                Atom::new(Element::O, [0.0; 3]),
                Atom::dummy([1.4, 0.0, 0.0]),
            ],
            bonds: vec![single(0, 1)],
            bio_metadata: None,
        };
        assert_eq!(hill_formula(&mol), "HO");
    }

    #[test]
    fn elements_without_default_valence_get_no_hydrogens() {
        let mol = Molecule {
            atoms: vec![Atom::new(Element::Na, [0.0; 3]).with_charge(1)],
            ..Default::default()
        };
        assert_eq!(hill_formula(&mol), "Na+");
    }
}
