//! File-level entry points: read, strip solvent and hydrogens, and (for
//! ligands) enumerate fragments.

use super::config::PrepConfig;
use super::error::Error;
use super::filter::{remove_hydrogens, remove_water};
use super::fragment::{FragmentSplit, generate_fragments};
use super::toolkit::Toolkit;
use crate::io::{self, Format, StructureReader, Template};
use crate::model::molecule::Molecule;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads a receptor from a PDB file with water and hydrogens removed.
///
/// Hetero residues use the MOL2 templates named in
/// [`PrepConfig::hetero_templates`]; those without one are bonded from
/// their coordinates.
pub fn load_receptor(
    path: impl AsRef<Path>,
    toolkit: &dyn Toolkit,
    config: &PrepConfig,
) -> Result<Molecule, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(io::Error::from)?;
    let receptor = read_receptor(BufReader::new(file), toolkit, config)?;
    info!(
        path = %path.display(),
        atoms = receptor.atom_count(),
        "loaded receptor"
    );
    Ok(receptor)
}

/// Loads the first ligand of an SDF file and enumerates its fragments.
///
/// The returned molecule is the cleaned ligand the splits were cut from.
pub fn load_ligand(
    path: impl AsRef<Path>,
    toolkit: &dyn Toolkit,
    config: &PrepConfig,
) -> Result<(Molecule, Vec<FragmentSplit>), Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(io::Error::from)?;
    let (ligand, splits) = read_ligand(BufReader::new(file), toolkit, config)?;
    info!(
        path = %path.display(),
        atoms = ligand.atom_count(),
        splits = splits.len(),
        "loaded ligand"
    );
    Ok((ligand, splits))
}

/// [`load_receptor`] over an already-open PDB stream.
pub fn read_receptor<R: BufRead>(
    reader: R,
    toolkit: &dyn Toolkit,
    config: &PrepConfig,
) -> Result<Molecule, Error> {
    let templates = load_templates(&config.hetero_templates)?;
    let raw = StructureReader::new(reader, Format::Pdb)
        .hetero_templates(templates)
        .bond_tolerance(config.bond_tolerance)
        .remove_hydrogens(true)
        .read()?;
    clean(raw, toolkit, config)
}

/// [`load_ligand`] over an already-open SDF stream.
pub fn read_ligand<R: BufRead>(
    reader: R,
    toolkit: &dyn Toolkit,
    config: &PrepConfig,
) -> Result<(Molecule, Vec<FragmentSplit>), Error> {
    let raw = StructureReader::new(reader, Format::Sdf).read()?;
    let ligand = clean(raw, toolkit, config)?;
    let splits = generate_fragments(toolkit, &ligand, &config.fragments)?;
    Ok((ligand, splits))
}

fn load_templates(paths: &[PathBuf]) -> Result<Vec<Template>, Error> {
    paths
        .iter()
        .map(|path| {
            let file = File::open(path).map_err(io::Error::from)?;
            let template = io::read_hetero_template(BufReader::new(file))?;
            debug!(path = %path.display(), "loaded hetero template");
            Ok(template)
        })
        .collect()
}

fn clean(raw: Molecule, toolkit: &dyn Toolkit, config: &PrepConfig) -> Result<Molecule, Error> {
    let dry = remove_water(toolkit, &raw, &config.water_residues)?;
    Ok(remove_hydrogens(toolkit, &dry))
}
