use crate::model::{
    atom::Atom,
    metadata::{AtomResidueInfo, BioMetadata},
    molecule::{Bond, Molecule},
    types::{BondOrder, Element},
};
use bio_forge as bf;
use std::collections::HashSet;
use std::str::FromStr;

/// Default slack (Å) added to the covalent radii sum when deriving hetero
/// residue templates from coordinates.
pub const DEFAULT_BOND_TOLERANCE: f64 = 0.4;

/// Pairs closer than this are overlapping atoms, not bonds.
const MIN_BOND_DISTANCE: f64 = 0.4;

const DISULFIDE_CUTOFF: f64 = 2.2;

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("cannot determine the element of atom '{atom}' in residue '{residue}'")]
    UnsupportedElement { atom: String, residue: String },
}

/// Interprets an element token from a structure file.
///
/// Accepts any capitalization (`CL`, `cl`, `Cl`) and maps the common
/// placeholder spellings (`*`, `R`, `R#`, `Du`, `A`, `Q`) to the dummy atom.
pub fn guess_element_symbol(token: &str) -> Option<Element> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return None;
    }

    if matches!(trimmed, "*" | "R" | "R#" | "Du" | "DU" | "A" | "Q") {
        return Some(Element::Du);
    }

    let mut chars = trimmed.chars();
    let first = chars.next()?.to_ascii_uppercase();
    let rest: String = chars.map(|c| c.to_ascii_lowercase()).collect();
    Element::from_str(&format!("{first}{rest}")).ok()
}

/// Recovers the element from a trimmed PDB atom name.
///
/// Leading digits (`1HB`) are skipped. Standard residues only contain
/// one-letter elements, so `HG1` in a serine is hydrogen and `CA` is carbon;
/// elsewhere a two-letter symbol (`FE`, `CA`, `HG`) wins when it exists.
pub fn element_from_atom_name(name: &str, standard_residue: bool) -> Option<Element> {
    let letters: Vec<char> = name
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let first = *letters.first()?;

    if !standard_residue {
        if let Some(&second) = letters.get(1) {
            if let Some(element) = guess_element_symbol(&format!("{first}{second}")) {
                if !element.is_dummy() {
                    return Some(element);
                }
            }
        }
    }

    guess_element_symbol(&first.to_string()).filter(|e| !e.is_dummy())
}

/// Chooses the element of a bio-forge atom.
///
/// In standard residues a name starting with `H` is always hydrogen, which
/// overrides two-letter misreadings such as Hg for `HG1`. Otherwise the
/// parsed element is used, and the atom name only fills in when bio-forge
/// could not tell.
pub fn resolve_element(
    parsed: bf::Element,
    name: &str,
    standard_residue: bool,
) -> Option<Element> {
    let first_letter = name.trim().chars().find(|c| c.is_ascii_alphabetic());
    if standard_residue && matches!(first_letter, Some('H' | 'h')) {
        return Some(Element::H);
    }

    if !matches!(parsed, bf::Element::Unknown) {
        if let Ok(element) = Element::from_str(parsed.symbol()) {
            return Some(element);
        }
    }

    element_from_atom_name(name, standard_residue)
}

fn is_standard(residue: &bf::Residue) -> bool {
    residue.category == bf::ResidueCategory::Standard
}

/// Builds a template for a residue bio-forge has no template for, bonding
/// atom pairs within the covalent-radius sum plus `tolerance`.
pub fn derive_hetero_template(
    residue: &bf::Residue,
    tolerance: f64,
) -> Result<bf::Template, ConversionError> {
    let atoms: Vec<(&str, Element, [f64; 3])> = residue
        .iter_atoms()
        .map(|atom| {
            let element = resolve_element(atom.element, &atom.name, false).ok_or_else(|| {
                ConversionError::UnsupportedElement {
                    atom: atom.name.to_string(),
                    residue: residue.name.to_string(),
                }
            })?;
            Ok((atom.name.as_str(), element, [atom.pos.x, atom.pos.y, atom.pos.z]))
        })
        .collect::<Result<_, ConversionError>>()?;

    let mut bonds = Vec::new();
    for (i, (name_i, elem_i, pos_i)) in atoms.iter().enumerate() {
        for (name_j, elem_j, pos_j) in &atoms[i + 1..] {
            if elem_i.is_hydrogen() && elem_j.is_hydrogen() {
                continue;
            }
            let dist_sq: f64 = (0..3).map(|k| (pos_i[k] - pos_j[k]).powi(2)).sum();
            let cutoff = elem_i.covalent_radius() + elem_j.covalent_radius() + tolerance;
            if dist_sq > MIN_BOND_DISTANCE * MIN_BOND_DISTANCE && dist_sq <= cutoff * cutoff {
                bonds.push((name_i.to_string(), name_j.to_string(), bf::BondOrder::Single));
            }
        }
    }

    let names = atoms.iter().map(|(name, _, _)| name.to_string()).collect();
    Ok(bf::Template::new(residue.name.as_str(), names, bonds))
}

/// Runs bio-forge topology building over `structure`.
///
/// Non-standard residues get a geometry-derived template per residue name.
/// `templates` are registered afterwards so that supplied templates replace
/// derived ones of the same name.
pub fn build_topology(
    structure: bf::Structure,
    templates: &[bf::Template],
    tolerance: f64,
) -> Result<bf::Topology, super::Error> {
    let mut builder = bf::ops::TopologyBuilder::new().disulfide_cutoff(DISULFIDE_CUTOFF);

    let mut derived: HashSet<&str> = HashSet::new();
    for chain in structure.iter_chains() {
        for residue in chain.iter_residues() {
            if is_standard(residue) || !derived.insert(residue.name.as_str()) {
                continue;
            }
            builder = builder.add_hetero_template(derive_hetero_template(residue, tolerance)?);
        }
    }

    for template in templates {
        builder = builder.add_hetero_template(template.clone());
    }

    Ok(builder.build(structure)?)
}

/// Flattens a bio-forge topology into a [`Molecule`] with residue
/// annotations, atoms in chain/residue order.
pub fn from_bio_topology(topology: &bf::Topology) -> Result<Molecule, ConversionError> {
    let structure = topology.structure();
    let atom_count = structure.atom_count();

    let mut atoms = Vec::with_capacity(atom_count);
    let mut metadata = BioMetadata::with_capacity(atom_count);

    for (chain, residue, bio_atom) in structure.iter_atoms_with_context() {
        let standard = is_standard(residue);
        let element = resolve_element(bio_atom.element, &bio_atom.name, standard).ok_or_else(
            || ConversionError::UnsupportedElement {
                atom: bio_atom.name.to_string(),
                residue: residue.name.to_string(),
            },
        )?;
        atoms.push(Atom::new(
            element,
            [bio_atom.pos.x, bio_atom.pos.y, bio_atom.pos.z],
        ));

        metadata.atom_info.push(
            AtomResidueInfo::new(
                bio_atom.name.clone(),
                residue.name.clone(),
                residue.id,
                chain.id.chars().next().unwrap_or(' '),
            )
            .insertion_code(residue.insertion_code)
            .hetero(!standard),
        );
    }

    let bonds = topology
        .bonds()
        .iter()
        .map(|b| Bond::new(b.a1_idx, b.a2_idx, bond_order_from_bf(b.order)))
        .collect();

    Ok(Molecule {
        atoms,
        bonds,
        bio_metadata: Some(metadata),
    })
}

fn bond_order_from_bf(order: bf::BondOrder) -> BondOrder {
    match order {
        bf::BondOrder::Single => BondOrder::Single,
        bf::BondOrder::Double => BondOrder::Double,
        bf::BondOrder::Triple => BondOrder::Triple,
        bf::BondOrder::Aromatic => BondOrder::Aromatic,
    }
}

pub fn bond_order_from_ctfile(value: i32) -> Option<BondOrder> {
    match value {
        1 => Some(BondOrder::Single),
        2 => Some(BondOrder::Double),
        3 => Some(BondOrder::Triple),
        4 => Some(BondOrder::Aromatic),
        _ => None,
    }
}

pub fn bond_order_to_ctfile(order: BondOrder) -> i32 {
    match order {
        BondOrder::Single => 1,
        BondOrder::Double => 2,
        BondOrder::Triple => 3,
        BondOrder::Aromatic => 4,
    }
}

/// Decodes the atom-block charge code of a V2000 CTfile.
pub fn charge_from_ctfile(code: i32) -> Option<i8> {
    match code {
        0 | 4 => Some(0),
        1 => Some(3),
        2 => Some(2),
        3 => Some(1),
        5 => Some(-1),
        6 => Some(-2),
        7 => Some(-3),
        _ => None,
    }
}
