//! Reading ligands (SDF) and receptors (PDB), and writing SDF records.
//!
//! Readers produce a [`Molecule`] with zero-based atom indices. PDB input goes
//! through bio-forge: its parser builds the residue hierarchy and its topology
//! builder bonds standard residues from templates, so receptors keep residue
//! annotations in [`Molecule::bio_metadata`]. SDF input carries its own bond
//! table and formal charges.

use crate::model::molecule::Molecule;
use std::fmt;
use std::io::{BufRead, Write};

pub mod error;
mod util;

mod pdb {
    pub mod reader;
}

mod sdf {
    pub mod reader;
    pub mod writer;
}

pub use bio_forge::Template;
pub use error::Error;
pub use util::{ConversionError, DEFAULT_BOND_TOLERANCE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdb,
    Sdf,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pdb => write!(f, "PDB"),
            Format::Sdf => write!(f, "SDF"),
        }
    }
}

/// Builder-style reader for a single structure.
///
/// The PDB-only options (templates, tolerance, hydrogen removal) are
/// ignored for SDF input.
///
/// ```
/// use frag_forge::io::{Format, StructureReader};
/// use std::io::Cursor;
///
/// let pdb = "\
/// HETATM    1  O   HOH A   1       0.000   0.000   0.000  1.00  0.00           O
/// END
/// ";
/// let molecule = StructureReader::new(Cursor::new(pdb), Format::Pdb)
///     .read()
///     .unwrap();
/// assert_eq!(molecule.atom_count(), 1);
/// assert_eq!(molecule.residue_name(0), Some("HOH"));
/// ```
pub struct StructureReader<R> {
    reader: R,
    format: Format,
    hetero_templates: Vec<Template>,
    bond_tolerance: f64,
    remove_hydrogens: bool,
}

impl<R: BufRead> StructureReader<R> {
    pub fn new(reader: R, format: Format) -> Self {
        Self {
            reader,
            format,
            hetero_templates: Vec::new(),
            bond_tolerance: DEFAULT_BOND_TOLERANCE,
            remove_hydrogens: false,
        }
    }

    /// Templates for hetero residues; these take precedence over templates
    /// derived from coordinates.
    pub fn hetero_templates(mut self, templates: Vec<Template>) -> Self {
        self.hetero_templates = templates;
        self
    }

    /// Slack (Å) added to covalent radii sums when deriving bonds for hetero
    /// residues without a template.
    pub fn bond_tolerance(mut self, tolerance: f64) -> Self {
        self.bond_tolerance = tolerance;
        self
    }

    /// Strips hydrogens before the topology is built.
    pub fn remove_hydrogens(mut self, remove: bool) -> Self {
        self.remove_hydrogens = remove;
        self
    }

    pub fn read(self) -> Result<Molecule, Error> {
        match self.format {
            Format::Pdb => pdb::reader::read(self),
            Format::Sdf => sdf::reader::read(self.reader),
        }
    }
}

/// Reads a hetero residue template from a MOL2 file.
pub fn read_hetero_template<R: BufRead>(reader: R) -> Result<Template, Error> {
    Ok(bio_forge::io::read_mol2_template(reader)?)
}

/// Writes `molecule` as one V2000 record terminated by `$$$$`.
///
/// Fails with [`Error::Write`] when the molecule has more atoms or bonds
/// than the three-digit counts line can hold.
pub fn write_sdf<W: Write>(writer: W, molecule: &Molecule, title: &str) -> Result<(), Error> {
    sdf::writer::write(writer, molecule, title)
}
