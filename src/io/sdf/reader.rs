use crate::io::{Format, error::Error, util};
use crate::model::{
    atom::Atom,
    molecule::{Bond, Molecule},
};
use std::io::BufRead;

/// Reads the first record of a V2000 SDF/MOL file.
///
/// Formal charges come from the atom block charge column unless the
/// properties block carries `M  CHG` lines, which then replace them.
pub fn read<R: BufRead>(reader: R) -> Result<Molecule, Error> {
    let lines = collect_first_block(reader)?;
    if lines.len() < 4 {
        return Err(Error::parse(
            Format::Sdf,
            1,
            "SDF block must contain at least a header and counts line",
        ));
    }

    let counts_line_no = lines[3].0;
    let counts_line = &lines[3].1;
    if counts_line.contains("V3000") {
        return Err(Error::parse(
            Format::Sdf,
            counts_line_no,
            "V3000 is not supported",
        ));
    }

    let (atom_count, bond_count) = parse_counts(counts_line, counts_line_no)?;
    let atom_start = 4;
    let bond_start = atom_start + atom_count;
    let props_start = bond_start + bond_count;

    if lines.len() < props_start {
        return Err(Error::parse(
            Format::Sdf,
            lines.last().map(|(ln, _)| *ln).unwrap_or(counts_line_no),
            "SDF block ended before atoms/bonds were fully specified",
        ));
    }

    let mut atoms = parse_atoms(&lines[atom_start..bond_start])?;
    let bonds = parse_bonds(&lines[bond_start..props_start], atom_count)?;
    apply_charge_properties(&lines[props_start..], &mut atoms)?;

    Ok(Molecule {
        atoms,
        bonds,
        bio_metadata: None,
    })
}

fn collect_first_block<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>, Error> {
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let content = line.map_err(|e| Error::Io { source: e })?;
        let ln = i + 1;
        if content.trim() == "$$$$" && !lines.is_empty() {
            break;
        }
        lines.push((ln, content));
    }
    Ok(lines)
}

/// Fixed-width slice, clamped to the line length.
fn column(raw: &str, start: usize, end: usize) -> &str {
    let end = end.min(raw.len());
    raw.get(start.min(end)..end).unwrap_or("")
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), Error> {
    let atoms = column(line, 0, 3)
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::parse(Format::Sdf, line_no, "invalid atom count"))?;
    let bonds = column(line, 3, 6)
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::parse(Format::Sdf, line_no, "invalid bond count"))?;
    Ok((atoms, bonds))
}

fn parse_atoms(lines: &[(usize, String)]) -> Result<Vec<Atom>, Error> {
    let mut atoms = Vec::with_capacity(lines.len());
    for (ln, raw) in lines {
        if !raw.is_ascii() {
            return Err(Error::parse(Format::Sdf, *ln, "non-ASCII characters in atom line"));
        }
        let padded = format!("{raw:<40}");
        let x = padded[0..10]
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid x coordinate in atom line"))?;
        let y = padded[10..20]
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid y coordinate in atom line"))?;
        let z = padded[20..30]
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid z coordinate in atom line"))?;
        let element_token = padded[31..34].trim();
        let element = util::guess_element_symbol(element_token)
            .ok_or_else(|| Error::parse(Format::Sdf, *ln, "unable to infer element symbol"))?;

        let charge_code = match padded[36..39].trim() {
            "" => 0,
            code => code
                .parse::<i32>()
                .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid charge code in atom line"))?,
        };
        let charge = util::charge_from_ctfile(charge_code)
            .ok_or_else(|| Error::parse(Format::Sdf, *ln, "unsupported charge code in atom line"))?;

        atoms.push(Atom::new(element, [x, y, z]).with_charge(charge));
    }
    Ok(atoms)
}

fn parse_bonds(lines: &[(usize, String)], atom_count: usize) -> Result<Vec<Bond>, Error> {
    let mut bonds = Vec::with_capacity(lines.len());
    for (ln, raw) in lines {
        let a1 = column(raw, 0, 3)
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid first atom index"))?;
        let a2 = column(raw, 3, 6)
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid second atom index"))?;
        let order_val = column(raw, 6, 9)
            .trim()
            .parse::<i32>()
            .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid bond order value"))?;

        let order = util::bond_order_from_ctfile(order_val)
            .ok_or_else(|| Error::parse(Format::Sdf, *ln, "unsupported bond order in bond line"))?;

        if a1 == 0 || a2 == 0 || a1 > atom_count || a2 > atom_count {
            return Err(Error::parse(
                Format::Sdf,
                *ln,
                "bond references atom outside declared range",
            ));
        }

        bonds.push(Bond::new(a1 - 1, a2 - 1, order));
    }
    Ok(bonds)
}

fn apply_charge_properties(lines: &[(usize, String)], atoms: &mut [Atom]) -> Result<(), Error> {
    let mut reset = false;
    for (ln, raw) in lines {
        if raw.starts_with("M  END") {
            break;
        }
        if !raw.starts_with("M  CHG") {
            continue;
        }
        if !reset {
            atoms.iter_mut().for_each(|a| a.formal_charge = 0);
            reset = true;
        }

        let tokens: Vec<&str> = raw[6..].split_whitespace().collect();
        let declared = tokens
            .first()
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or_else(|| Error::parse(Format::Sdf, *ln, "invalid M  CHG entry count"))?;
        if tokens.len() < 1 + 2 * declared {
            return Err(Error::parse(Format::Sdf, *ln, "M  CHG line is shorter than declared"));
        }

        for pair in tokens[1..1 + 2 * declared].chunks(2) {
            let idx = pair[0]
                .parse::<usize>()
                .ok()
                .filter(|&i| i >= 1 && i <= atoms.len())
                .ok_or_else(|| Error::parse(Format::Sdf, *ln, "M  CHG references unknown atom"))?;
            let charge = pair[1]
                .parse::<i8>()
                .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid charge in M  CHG"))?;
            atoms[idx - 1].formal_charge = charge;
        }
    }
    Ok(())
}
