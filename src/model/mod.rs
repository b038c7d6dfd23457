//! Core data structures for ligands, receptors, and their fragments.
//!
//! - [`atom`] – Atom with element, Cartesian coordinates, and formal charge.
//! - [`types`] – Periodic table elements (plus the dummy atom) and bond orders.
//! - [`molecule`] – Atoms, bonds, and optional residue annotations.
//! - [`metadata`] – Residue names and chain IDs read from PDB files.

pub mod atom;
pub mod metadata;
pub mod molecule;
pub mod types;
