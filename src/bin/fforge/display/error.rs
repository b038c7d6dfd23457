use std::io::{self, ErrorKind, Write};

use anyhow::Error;
use frag_forge::PrepError;
use frag_forge::io::{Error as IoError, Format};

use crate::util::text::wrap;

const WIDTH: usize = 64;

pub fn print_error(err: &Error) {
    let _ = render(&mut io::stderr().lock(), err);
}

/// The error, each cause beneath it, then any hints for the failure kind.
fn render<W: Write>(out: &mut W, err: &Error) -> io::Result<()> {
    writeln!(out)?;
    rule(out, "✗ Error")?;
    for (depth, cause) in err.chain().enumerate() {
        let lead = if depth == 0 { "" } else { "caused by: " };
        paragraph(out, lead, &cause.to_string())?;
    }

    let hints = hints(err);
    if !hints.is_empty() {
        rule(out, "Hints")?;
        for hint in &hints {
            paragraph(out, "• ", hint)?;
        }
    }

    rule(out, "")?;
    writeln!(out)
}

fn rule<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    if title.is_empty() {
        return writeln!(out, "  {}", "─".repeat(WIDTH));
    }
    let fill = WIDTH.saturating_sub(title.chars().count() + 4);
    writeln!(out, "  ── {title} {}", "─".repeat(fill))
}

fn paragraph<W: Write>(out: &mut W, lead: &str, text: &str) -> io::Result<()> {
    let lead_width = lead.chars().count();
    let indent = " ".repeat(lead_width);
    for (k, line) in wrap(text, WIDTH - lead_width).iter().enumerate() {
        let prefix = if k == 0 { lead } else { indent.as_str() };
        writeln!(out, "  {prefix}{line}")?;
    }
    Ok(())
}

fn hints(err: &Error) -> Vec<String> {
    let mut hints = Vec::new();

    if let Some(prep) = err.chain().find_map(|e| e.downcast_ref::<PrepError>()) {
        hints.extend(prep_hints(prep));
    }
    if let Some(io_err) = err.chain().find_map(|e| e.downcast_ref::<IoError>()) {
        hints.extend(io_hints(io_err));
    }
    if !hints.is_empty() {
        return hints;
    }

    if let Some(source) = err.chain().find_map(|e| e.downcast_ref::<io::Error>()) {
        hints.push(std_io_hint(source.kind()).to_string());
    } else if err.chain().any(|e| e.to_string().contains("extension")) {
        hints.push("Receptors are read from .pdb/.ent, ligands from .sdf/.mol".to_string());
    }
    hints
}

fn prep_hints(err: &PrepError) -> Vec<String> {
    match err {
        PrepError::ToolkitUnavailable(capability) => vec![
            format!("The selected toolkit cannot perform {capability}"),
            "Drop --degraded or set toolkit = \"graph\" in the settings file".to_string(),
        ],
        PrepError::NoNonWaterAtoms => vec![
            "Every atom in the input was classified as water".to_string(),
            "With --degraded, review water_residues in the settings file".to_string(),
        ],
        PrepError::EmptyReferenceSet => {
            vec!["The receptor has no atoms left after cleaning".to_string()]
        }
        PrepError::MissingDummyAtom | PrepError::InvalidBond { .. } => {
            vec!["This looks like a bug; please report it with the input files".to_string()]
        }
        PrepError::Config(_) => vec![
            "Known keys: toolkit, water_residues, bond_tolerance, hetero_templates, \
             note_sulfur_receptor, note_sulfur_ligand, [fragments]"
                .to_string(),
        ],
        PrepError::Read(_) => Vec::new(),
    }
}

fn io_hints(err: &IoError) -> Vec<String> {
    match err {
        IoError::Io { source } => vec![std_io_hint(source.kind()).to_string()],
        IoError::Parse { format, line, .. } => {
            let layout = match format {
                Format::Pdb => "PDB records use fixed columns; check ATOM/HETATM alignment",
                Format::Sdf => "Only V2000 SDF records are supported",
            };
            vec![
                format!("Inspect the {format} input near line {line}"),
                layout.to_string(),
            ]
        }
        IoError::Write { .. } => {
            vec!["V2000 counts stop at 999; split the structure before export".to_string()]
        }
        IoError::BioForgeIo(_) => {
            vec!["The PDB reader rejected the file; check its ATOM/HETATM records".to_string()]
        }
        IoError::BioForgeTopology(_) => vec![
            "A residue could not be bonded from its template".to_string(),
            "Pass a MOL2 template with --template, or list it under hetero_templates"
                .to_string(),
        ],
        IoError::Conversion(_) => {
            vec!["Check the element column of the offending atom".to_string()]
        }
    }
}

fn std_io_hint(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NotFound => "Check the path spelling and that the file exists",
        ErrorKind::PermissionDenied => "Check file permissions with `ls -la`",
        ErrorKind::BrokenPipe => "The output consumer exited early (e.g. `head`)",
        _ => "Check the file path, permissions, and disk space",
    }
}
