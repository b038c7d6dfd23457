use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use frag_forge::io::{Format, write_sdf};
use frag_forge::{
    FragmentSplit, frag_dist_to_receptor_raw, get_connection_point, load_ligand, load_receptor,
    select_toolkit,
};

use crate::cli::FragmentsArgs;
use crate::config::{apply_fragment_args, build_prep_config};
use crate::display::{Progress, print_splits, print_structure_info};
use crate::io::{create_output, infer_structure_format};
use crate::util::text::point;

pub fn run_fragments(args: FragmentsArgs, interactive: bool) -> Result<()> {
    require_format(&args.ligand, Format::Sdf, "Ligand")?;
    if let Some(receptor) = &args.receptor {
        require_format(receptor, Format::Pdb, "Receptor")?;
    }

    let mut config = build_prep_config(&args.common)?;
    apply_fragment_args(&mut config, &args);
    let toolkit = select_toolkit(config.toolkit);

    let total_steps = if args.receptor.is_some() { 3 } else { 2 };
    let mut progress = Progress::new(interactive, total_steps);

    progress.step("Enumerating fragments");
    let (ligand, splits) = load_ligand(&args.ligand, toolkit.as_ref(), &config)
        .with_context(|| format!("Failed to prepare ligand {}", args.ligand.display()))?;
    progress.done("Enumerating fragments", &enumeration_substeps(&config, &splits));

    if interactive {
        print_structure_info("Ligand", &ligand);
    }

    let distances = match &args.receptor {
        Some(path) => {
            progress.step("Measuring attachment distances");
            let receptor = load_receptor(path, toolkit.as_ref(), &config)
                .with_context(|| format!("Failed to prepare receptor {}", path.display()))?;
            let coords = receptor.positions();
            let distances = splits
                .iter()
                .map(|s| {
                    s.fragment
                        .as_ref()
                        .map(|f| frag_dist_to_receptor_raw(&coords, f))
                        .transpose()
                })
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to measure attachment distances")?;
            progress.done(
                "Measuring attachment distances",
                &[format!("Receptor: {} heavy atoms", receptor.heavy_atom_count())],
            );
            Some(distances)
        }
        None => None,
    };

    if interactive {
        print_splits(&splits, distances.as_deref());
    }

    progress.step("Writing splits");
    let mut out = create_output(args.output.as_deref())?;
    write_splits(&mut out, &splits)?;
    out.flush().context("Failed to flush output")?;
    let target = args
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    progress.done("Writing splits", &[format!("SDF → {target}")]);

    progress.finish("Fragments done");

    Ok(())
}

fn require_format(path: &Path, expected: Format, role: &str) -> Result<()> {
    match infer_structure_format(path) {
        Some(format) if format == expected => Ok(()),
        _ => bail!(
            "{role} file '{}' must have a {expected} extension",
            path.display()
        ),
    }
}

fn enumeration_substeps(config: &frag_forge::PrepConfig, splits: &[FragmentSplit]) -> Vec<String> {
    let mut steps = vec![format!("Toolkit: {}", config.toolkit)];

    let bonds = if config.fragments.only_single_bonds {
        "single bonds"
    } else {
        "all bonds"
    };
    let limit = match config.fragments.max_heavy_atoms {
        0 => "no size limit".to_string(),
        n => format!("≤ {n} heavy atoms"),
    };
    steps.push(format!("Cut {bonds}, {limit}"));

    if splits.iter().any(FragmentSplit::is_fragmented) {
        steps.push(format!("{} splits", splits.len()));
    } else if splits.is_empty() {
        steps.push("No acceptable splits".to_string());
    } else {
        steps.push("Fragmentation unavailable; ligand passed through".to_string());
    }
    steps
}

/// Parent then fragment for each split, titled by split number.
fn write_splits<W: Write>(out: &mut W, splits: &[FragmentSplit]) -> Result<()> {
    for (k, split) in splits.iter().enumerate() {
        let n = k + 1;
        write_sdf(&mut *out, &split.parent, &format!("split {n} parent"))
            .with_context(|| format!("Failed to write parent of split {n}"))?;

        if let Some(fragment) = &split.fragment {
            let conn = get_connection_point(fragment)?;
            let title = format!("split {n} fragment {}", point(conn));
            write_sdf(&mut *out, fragment, &title)
                .with_context(|| format!("Failed to write fragment of split {n}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use frag_forge::{Atom, Bond, BondOrder, Element, FragmentOptions, GraphToolkit, Molecule};
    use frag_forge::generate_fragments;

    #[test]
    fn splits_are_written_parent_then_fragment() {
        let mol = Molecule {
            atoms: vec![
                Atom::new(Element::C, [0.0, 0.0, 0.0]),
                Atom::new(Element::C, [1.5, 0.0, 0.0]),
                Atom::new(Element::N, [2.0, 1.4, 0.0]),
            ],
            bonds: vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(1, 2, BondOrder::Single),
            ],
            bio_metadata: None,
        };
        let splits = generate_fragments(&GraphToolkit, &mol, &FragmentOptions::default()).unwrap();

        let mut buf = Vec::new();
        write_splits(&mut buf, &splits).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.matches("$$$$").count(), 4);
        assert!(text.starts_with("split 1 parent"));
        assert!(text.contains("split 2 fragment (1.500, 0.000, 0.000)"));
    }

    #[test]
    fn receptor_must_be_pdb() {
        let err = require_format(Path::new("rec.sdf"), Format::Pdb, "Receptor").unwrap_err();
        assert!(err.to_string().contains("PDB extension"));
        assert!(require_format(Path::new("lig.sdf"), Format::Sdf, "Ligand").is_ok());
    }
}
