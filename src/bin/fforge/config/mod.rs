mod prep;

pub use prep::{apply_fragment_args, build_prep_config};
