//! A pure Rust library for preparing ligand/receptor structures for fragment-prediction models.
//! It cuts ligands into (parent, fragment) pairs at single bonds, converts molecules into
//! layered point clouds ready for voxelization, and measures how far each fragment's attachment
//! site lies from the receptor.
//!
//! # Features
//!
//! - **Fragment enumeration**: Every bond of every ligand component is cut in turn; the
//!   larger side becomes the parent, other components are re-attached as bystanders
//! - **Solvent and hydrogen stripping**: Water removal by composition, with a residue-name
//!   fallback when the chemistry toolkit is degraded
//! - **Point-cloud featurization**: Coordinates paired with a C/N/O/S/other layer label
//! - **Attachment distances**: Minimum distance from a fragment's dummy atom to the receptor
//! - **Structure I/O**: PDB receptors through bio-forge templates, SDF (V2000) ligands, SDF
//!   export of splits
//!
//! # Quick Start
//!
//! ```
//! use frag_forge::{Atom, Bond, BondOrder, Element, Molecule};
//! use frag_forge::{FragmentOptions, GraphToolkit, PrepError};
//! use frag_forge::{frag_dist_to_receptor_raw, generate_fragments, mol_to_points};
//!
//! // Propylamine heavy atoms: C-C-C-N
//! let ligand = Molecule {
//!     atoms: vec![
//!         Atom::new(Element::C, [0.000, 0.000, 0.000]),
//!         Atom::new(Element::C, [1.530, 0.000, 0.000]),
//!         Atom::new(Element::C, [2.040, 1.440, 0.000]),
//!         Atom::new(Element::N, [3.510, 1.440, 0.000]),
//!     ],
//!     bonds: vec![
//!         Bond::new(0, 1, BondOrder::Single),
//!         Bond::new(1, 2, BondOrder::Single),
//!         Bond::new(2, 3, BondOrder::Single),
//!     ],
//!     bio_metadata: None,
//! };
//!
//! let splits = generate_fragments(&GraphToolkit, &ligand, &FragmentOptions::default())?;
//! assert_eq!(splits.len(), 3);
//!
//! // The C-N cut leaves an amine fragment: N plus its dummy atom.
//! let fragment = splits[2].fragment.as_ref().unwrap();
//! assert_eq!(fragment.atomic_numbers(), vec![7, 0]);
//!
//! // The dummy sits where the cut partner (atom 2) was.
//! let d = frag_dist_to_receptor_raw(&[[2.040, 1.440, 5.000]], fragment)?;
//! assert!((d - 5.0).abs() < 1e-9);
//!
//! // Layers: C, C, C, *, for the parent (dummy counts as "other")
//! let cloud = mol_to_points(&splits[2].parent, None, false);
//! assert_eq!(cloud.layers, vec![0, 0, 0, 3]);
//! # Ok::<(), PrepError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: PDB/SDF reading and SDF writing
//! - [`load_receptor`] / [`load_ligand`]: File-level preparation entry points
//! - [`PrepConfig`]: Toolkit choice, solvent names, and featurization switches
//!
//! # Data Types
//!
//! - [`Molecule`]: Atoms, bonds, and optional residue annotations
//! - [`Atom`]: Element, Cartesian coordinates, and formal charge
//! - [`Bond`]: Bond between two atoms with bond order
//! - [`Element`]: Chemical element (dummy `*`, then H through Og)
//! - [`FragmentSplit`]: A parent with an optional fragment
//! - [`PointCloud`]: Coordinates with layer labels
//!
//! ## Chemistry Toolkit
//!
//! - [`Toolkit`]: Graph primitives with capability probing
//! - [`GraphToolkit`]: Native implementation of every primitive
//! - [`DegradedToolkit`]: No capabilities; forces fallback paths
//! - [`select_toolkit`]: Builds a toolkit from a [`ToolkitKind`]

mod model;
mod prep;

pub mod io;

pub use model::atom::Atom;
pub use model::metadata::{AtomResidueInfo, BioMetadata};
pub use model::molecule::{Bond, Molecule};
pub use model::types::{BondOrder, Element, ParseElementError};

pub use prep::{
    Capability, DEFAULT_ATOM_TYPES, DEFAULT_WATER_RESIDUES, DegradedToolkit, FragmentOptions,
    FragmentSplit, GraphToolkit, LAYER_CARBON, LAYER_NITROGEN, LAYER_OXYGEN,
    LAYER_PROTEIN_OTHER, LAYER_SULFUR_OR_LIGAND_OTHER, PointCloud, PrepConfig, Toolkit,
    ToolkitKind, WATER_COMPOSITION, frag_dist_to_receptor, frag_dist_to_receptor_raw,
    generate_fragments, get_connection_point, hill_formula, layer_for, load_ligand,
    load_receptor, mol_array, mol_to_points, read_ligand, read_receptor, remove_hydrogens,
    remove_water, select_toolkit,
};

pub use prep::Error as PrepError;
