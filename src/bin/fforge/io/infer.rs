use std::path::Path;

use frag_forge::io::Format;

/// Structure format from a file extension (case-insensitive).
pub fn structure_input(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "pdb" | "ent" => Some(Format::Pdb),
        "sdf" | "mol" => Some(Format::Sdf),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_known_extensions() {
        assert_eq!(structure_input(Path::new("a/rec.pdb")), Some(Format::Pdb));
        assert_eq!(structure_input(Path::new("REC.ENT")), Some(Format::Pdb));
        assert_eq!(structure_input(Path::new("lig.SDF")), Some(Format::Sdf));
        assert_eq!(structure_input(Path::new("lig.mol")), Some(Format::Sdf));
    }

    #[test]
    fn rejects_unknown_or_missing_extensions() {
        assert_eq!(structure_input(Path::new("lig.mol2")), None);
        assert_eq!(structure_input(Path::new("receptor")), None);
    }
}
