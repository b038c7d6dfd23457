use std::io::Write;

use anyhow::{Context, Result, bail};

use frag_forge::io::Format;
use frag_forge::{
    Molecule, PrepConfig, Toolkit, load_ligand, load_receptor, mol_to_points, select_toolkit,
};

use crate::cli::PointsArgs;
use crate::config::build_prep_config;
use crate::display::{Progress, print_layer_summary, print_structure_info};
use crate::io::{create_output, infer_structure_format};

const TOTAL_STEPS: usize = 3;

pub fn run_points(args: PointsArgs, interactive: bool) -> Result<()> {
    let Some(format) = infer_structure_format(&args.input) else {
        bail!(
            "Cannot infer structure format from extension of '{}'",
            args.input.display()
        );
    };

    let config = build_prep_config(&args.common)?;
    let toolkit = select_toolkit(config.toolkit);
    let note_sulfur = args
        .note_sulfur_override()
        .unwrap_or_else(|| default_note_sulfur(&config, format));

    let mut progress = Progress::new(interactive, TOTAL_STEPS);

    progress.step("Reading structure");
    let molecule = read_structure(&args, format, toolkit.as_ref(), &config)?;
    progress.done(
        "Reading structure",
        &[
            format!("Parse {format} file"),
            "Remove water and hydrogens".to_string(),
        ],
    );

    if interactive {
        print_structure_info(&format!("{format} Structure"), &molecule);
    }

    progress.step("Assigning layers");
    let cloud = mol_to_points(&molecule, None, note_sulfur);
    let sulfur = if note_sulfur {
        "sulfur on its own layer"
    } else {
        "sulfur shares the other-atom layer"
    };
    progress.done(
        "Assigning layers",
        &[format!("{} points", cloud.len()), sulfur.to_string()],
    );

    if interactive {
        print_layer_summary(&cloud);
    }

    progress.step("Writing point cloud");
    let mut out = create_output(args.output.as_deref())?;
    serde_json::to_writer_pretty(&mut out, &cloud).context("Failed to serialize point cloud")?;
    writeln!(out).context("Failed to write output")?;
    out.flush().context("Failed to flush output")?;
    progress.done("Writing point cloud", &["JSON { coords, layers }"]);

    progress.finish("Points done");

    Ok(())
}

/// Receptors single out sulfur by default; ligands do not.
fn default_note_sulfur(config: &PrepConfig, format: Format) -> bool {
    match format {
        Format::Pdb => config.note_sulfur_receptor,
        Format::Sdf => config.note_sulfur_ligand,
    }
}

fn read_structure(
    args: &PointsArgs,
    format: Format,
    toolkit: &dyn Toolkit,
    config: &PrepConfig,
) -> Result<Molecule> {
    let path = &args.input;
    let molecule = match format {
        Format::Pdb => load_receptor(path, toolkit, config),
        Format::Sdf => load_ligand(path, toolkit, config).map(|(ligand, _)| ligand),
    }
    .with_context(|| format!("Failed to prepare {}", path.display()))?;
    Ok(molecule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sulfur_default_follows_structure_role() {
        let config = PrepConfig::default();
        assert!(default_note_sulfur(&config, Format::Pdb));
        assert!(!default_note_sulfur(&config, Format::Sdf));

        let flipped = PrepConfig {
            note_sulfur_receptor: false,
            note_sulfur_ligand: true,
            ..Default::default()
        };
        assert!(!default_note_sulfur(&flipped, Format::Pdb));
        assert!(default_note_sulfur(&flipped, Format::Sdf));
    }
}
