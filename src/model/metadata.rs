/// Per-atom residue annotation carried over from PDB input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomResidueInfo {
    pub atom_name: String,
    pub residue_name: String,
    pub residue_id: i32,
    pub chain_id: char,
    pub insertion_code: char,
    pub is_hetero: bool,
}

impl AtomResidueInfo {
    pub fn new(
        atom_name: impl Into<String>,
        residue_name: impl Into<String>,
        residue_id: i32,
        chain_id: char,
    ) -> Self {
        Self {
            atom_name: atom_name.into(),
            residue_name: residue_name.into(),
            residue_id,
            chain_id,
            insertion_code: ' ',
            is_hetero: false,
        }
    }

    pub fn insertion_code(mut self, code: Option<char>) -> Self {
        self.insertion_code = code.unwrap_or(' ');
        self
    }

    pub fn hetero(mut self, is_hetero: bool) -> Self {
        self.is_hetero = is_hetero;
        self
    }

    /// Residue key `(chain, residue number, insertion code)`.
    #[inline]
    pub fn residue_key(&self) -> (char, i32, char) {
        (self.chain_id, self.residue_id, self.insertion_code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BioMetadata {
    pub atom_info: Vec<AtomResidueInfo>,
}

impl BioMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            atom_info: Vec::with_capacity(capacity),
        }
    }

    pub fn residue_name(&self, atom: usize) -> Option<&str> {
        self.atom_info.get(atom).map(|info| info.residue_name.as_str())
    }
}
