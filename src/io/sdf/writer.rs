use crate::io::{Format, error::Error, util};
use crate::model::molecule::Molecule;
use std::io::Write;

/// Formal charges per `M  CHG` line allowed by the CTfile format.
const CHG_ENTRIES_PER_LINE: usize = 8;

/// Largest count that fits the three-column fields of the V2000 counts line.
const V2000_MAX_COUNT: usize = 999;

pub fn write<W: Write>(mut writer: W, molecule: &Molecule, title: &str) -> Result<(), Error> {
    if molecule.atom_count() > V2000_MAX_COUNT || molecule.bond_count() > V2000_MAX_COUNT {
        return Err(Error::write(
            Format::Sdf,
            format!(
                "V2000 holds at most {V2000_MAX_COUNT} atoms and bonds (got {} atoms, {} bonds)",
                molecule.atom_count(),
                molecule.bond_count()
            ),
        ));
    }

    writeln!(writer, "{}", title.lines().next().unwrap_or(""))?;
    writeln!(writer, "frag-forge")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
        molecule.atom_count(),
        molecule.bond_count()
    )?;

    for atom in &molecule.atoms {
        writeln!(
            writer,
            "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0",
            atom.position[0],
            atom.position[1],
            atom.position[2],
            atom.element.symbol()
        )?;
    }

    for bond in &molecule.bonds {
        writeln!(
            writer,
            "{:>3}{:>3}{:>3}  0  0  0  0",
            bond.i + 1,
            bond.j + 1,
            util::bond_order_to_ctfile(bond.order)
        )?;
    }

    let charged: Vec<(usize, i8)> = molecule
        .atoms
        .iter()
        .enumerate()
        .filter(|(_, a)| a.formal_charge != 0)
        .map(|(i, a)| (i + 1, a.formal_charge))
        .collect();
    for chunk in charged.chunks(CHG_ENTRIES_PER_LINE) {
        write!(writer, "M  CHG{:>3}", chunk.len())?;
        for (idx, charge) in chunk {
            write!(writer, " {idx:>3} {charge:>3}")?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "M  END")?;
    writeln!(writer, "$$$$")?;
    Ok(())
}
