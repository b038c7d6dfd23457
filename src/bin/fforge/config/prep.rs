use std::fs;

use anyhow::{Context, Result};

use frag_forge::{PrepConfig, ToolkitKind};

use crate::cli::{CommonOptions, FragmentsArgs};

/// Settings file (if any) with the shared command-line overrides applied.
pub fn build_prep_config(common: &CommonOptions) -> Result<PrepConfig> {
    let mut config = match &common.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
            PrepConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid settings file: {}", path.display()))?
        }
        None => PrepConfig::default(),
    };

    if common.degraded {
        config.toolkit = ToolkitKind::Degraded;
    }
    config.hetero_templates.extend(common.templates.iter().cloned());

    Ok(config)
}

/// Applies the fragment-specific flags on top of `config`.
pub fn apply_fragment_args(config: &mut PrepConfig, args: &FragmentsArgs) {
    if let Some(max) = args.max_heavy_atoms {
        config.fragments.max_heavy_atoms = max;
    }
    if args.all_bonds {
        config.fragments.only_single_bonds = false;
    }
}
