//! Configuration for structure preparation.
//!
//! - [`PrepConfig`]: Toolkit choice, solvent names, receptor topology
//!   inputs and featurization switches
//! - [`FragmentOptions`]: Size and bond-type limits for fragment enumeration
//!
//! Every field has a default, so a TOML document only needs the keys it
//! changes.

use super::error::Error;
use super::filter::DEFAULT_WATER_RESIDUES;
use super::toolkit::ToolkitKind;
use crate::io::DEFAULT_BOND_TOLERANCE;
use serde::Deserialize;
use std::path::PathBuf;

/// Limits applied while enumerating (parent, fragment) splits.
///
/// # Examples
///
/// ```
/// use frag_forge::FragmentOptions;
///
/// let opts = FragmentOptions {
///     max_heavy_atoms: 10,
///     ..Default::default()
/// };
/// assert!(opts.only_single_bonds);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FragmentOptions {
    /// Largest fragment, in heavy atoms, to keep. `0` means unbounded.
    pub max_heavy_atoms: usize,

    /// Only cut single bonds.
    pub only_single_bonds: bool,
}

impl Default for FragmentOptions {
    fn default() -> Self {
        Self {
            max_heavy_atoms: 0,
            only_single_bonds: true,
        }
    }
}

/// Settings shared by the loaders and featurizer.
///
/// # Examples
///
/// ```
/// use frag_forge::{PrepConfig, ToolkitKind};
///
/// let config = PrepConfig::from_toml_str(
///     r#"
///     toolkit = "degraded"
///     water_residues = ["HOH", "SOL"]
///
///     [fragments]
///     max_heavy_atoms = 8
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.toolkit, ToolkitKind::Degraded);
/// assert_eq!(config.fragments.max_heavy_atoms, 8);
/// assert!(config.fragments.only_single_bonds);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrepConfig {
    /// Chemistry toolkit implementation.
    pub toolkit: ToolkitKind,

    /// Fragment enumeration limits used by the ligand loader.
    pub fragments: FragmentOptions,

    /// Residue names treated as solvent when the toolkit cannot identify
    /// water by composition.
    pub water_residues: Vec<String>,

    /// MOL2 templates for receptor hetero residues (cofactors, ligands).
    pub hetero_templates: Vec<PathBuf>,

    /// Extra distance (Å) over the covalent-radius sum when bonding hetero
    /// residues that have no template.
    pub bond_tolerance: f64,

    /// Split sulfur from other heavy atoms when featurizing receptors.
    pub note_sulfur_receptor: bool,

    /// Split sulfur from other heavy atoms when featurizing ligands.
    pub note_sulfur_ligand: bool,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            toolkit: ToolkitKind::Graph,
            fragments: FragmentOptions::default(),
            water_residues: DEFAULT_WATER_RESIDUES.iter().map(|s| s.to_string()).collect(),
            hetero_templates: Vec::new(),
            bond_tolerance: DEFAULT_BOND_TOLERANCE,
            note_sulfur_receptor: true,
            note_sulfur_ligand: false,
        }
    }
}

impl PrepConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }

    /// Water residue names as borrowed strings.
    pub fn water_residue_names(&self) -> Vec<&str> {
        self.water_residues.iter().map(String::as_str).collect()
    }
}
