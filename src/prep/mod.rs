mod config;
mod distance;
mod error;
mod featurize;
mod filter;
mod fragment;
mod loader;
mod toolkit;

pub use config::{FragmentOptions, PrepConfig};
pub use distance::{frag_dist_to_receptor, frag_dist_to_receptor_raw};
pub use error::Error;
pub use featurize::{
    DEFAULT_ATOM_TYPES, LAYER_CARBON, LAYER_NITROGEN, LAYER_OXYGEN, LAYER_PROTEIN_OTHER,
    LAYER_SULFUR_OR_LIGAND_OTHER, PointCloud, get_connection_point, layer_for, mol_array,
    mol_to_points,
};
pub use filter::{DEFAULT_WATER_RESIDUES, remove_hydrogens, remove_water};
pub use fragment::{FragmentSplit, generate_fragments};
pub use loader::{load_ligand, load_receptor, read_ligand, read_receptor};
pub use toolkit::{
    Capability, DegradedToolkit, GraphToolkit, Toolkit, ToolkitKind, WATER_COMPOSITION,
    hill_formula, select_toolkit,
};
