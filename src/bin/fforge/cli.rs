use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fforge",
    about = "Ligand fragment enumeration and point-cloud featurization",
    version,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Enumerate (parent, fragment) splits of a ligand (SDF)
    #[command(visible_alias = "f")]
    Fragments(FragmentsArgs),

    /// Convert a receptor (PDB) or ligand (SDF) into a layered point cloud
    #[command(visible_alias = "p")]
    Points(PointsArgs),
}

impl Command {
    pub fn quiet(&self) -> bool {
        match self {
            Command::Fragments(args) => args.common.quiet,
            Command::Points(args) => args.common.quiet,
        }
    }
}

/// Options shared by all commands.
#[derive(Args)]
pub struct CommonOptions {
    /// Preparation settings (TOML); command-line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// MOL2 template for a receptor hetero residue (repeatable)
    #[arg(long = "template", value_name = "MOL2")]
    pub templates: Vec<PathBuf>,

    /// Use the degraded toolkit (residue-name water filter, no fragmentation)
    #[arg(long)]
    pub degraded: bool,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct FragmentsArgs {
    /// Ligand structure (SDF, first record is used)
    #[arg(value_name = "LIGAND")]
    pub ligand: PathBuf,

    /// Receptor structure (PDB) for attachment-point distances
    #[arg(short, long, value_name = "PDB")]
    pub receptor: Option<PathBuf>,

    /// Largest fragment to keep, in heavy atoms (0 = unbounded)
    #[arg(long, value_name = "N")]
    pub max_heavy_atoms: Option<usize>,

    /// Also cut double, triple and aromatic bonds
    #[arg(long)]
    pub all_bonds: bool,

    /// Write every split as SDF records (parent, then fragment)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Args)]
pub struct PointsArgs {
    /// Input structure (PDB receptor or SDF ligand)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Put sulfur on its own layer, other heavy atoms on the last layer
    #[arg(long, overrides_with = "no_note_sulfur")]
    pub note_sulfur: bool,

    /// Share one layer between sulfur and other heavy atoms
    #[arg(long, overrides_with = "note_sulfur")]
    pub no_note_sulfur: bool,

    /// Write the point cloud as JSON (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonOptions,
}

impl PointsArgs {
    /// Explicit sulfur-layer choice, if either flag was given.
    pub fn note_sulfur_override(&self) -> Option<bool> {
        match (self.note_sulfur, self.no_note_sulfur) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
