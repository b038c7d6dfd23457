use crate::io::{StructureReader, error::Error, util};
use crate::model::molecule::Molecule;
use bio_forge as bf;
use std::io::BufRead;

pub fn read<R: BufRead>(builder: StructureReader<R>) -> Result<Molecule, Error> {
    let bio_context = bf::io::IoContext::new_default();
    let mut bio_struct = bf::io::read_pdb_structure(builder.reader, &bio_context)?;

    if builder.remove_hydrogens {
        let clean_config = bf::ops::CleanConfig {
            remove_hydrogens: true,
            ..Default::default()
        };
        bf::ops::clean_structure(&mut bio_struct, &clean_config)?;
    }

    let bf_topo = util::build_topology(
        bio_struct,
        &builder.hetero_templates,
        builder.bond_tolerance,
    )?;
    Ok(util::from_bio_topology(&bf_topo)?)
}
