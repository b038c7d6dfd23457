use std::collections::BTreeMap;
use std::io::{self, Write};

use frag_forge::{FragmentSplit, Molecule, PointCloud};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_SPLIT_ROWS: usize = 25;

const LAYER_NAMES: [&str; 5] = ["C", "N", "O", "S / other", "other"];

pub fn print_structure_info(title: &str, molecule: &Molecule) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut elements: BTreeMap<&str, usize> = BTreeMap::new();
    for atom in &molecule.atoms {
        *elements.entry(atom.element.symbol()).or_insert(0) += 1;
    }
    let composition = elements
        .iter()
        .map(|(symbol, count)| format!("{symbol}{count}"))
        .collect::<Vec<_>>()
        .join(" ");

    let rows = vec![
        ("Atoms", format!("{}", molecule.atom_count())),
        ("Heavy Atoms", format!("{}", molecule.heavy_atom_count())),
        ("Bonds", format!("{}", molecule.bond_count())),
        ("Elements", composition),
    ];

    print_kv_table(&mut out, title, &rows);
}

/// One row per split; `distances` is index-aligned with `splits` when a
/// receptor was given.
pub fn print_splits(splits: &[FragmentSplit], distances: Option<&[Option<f64>]>) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let idx_w = 5usize;
    let parent_w = 8usize;
    let frag_w = 8usize;
    let sep_overhead = 10;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(idx_w + parent_w + frag_w + sep_overhead);

    let _ = writeln!(out, "{}┌─ Fragment Splits ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{i}┬{p}┬{f}┬{d}┐",
        INDENT,
        i = "─".repeat(idx_w + 2),
        p = "─".repeat(parent_w + 2),
        f = "─".repeat(frag_w + 2),
        d = "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:>idx_w$} │ {:>parent_w$} │ {:>frag_w$} │ {:>dist_w$} │",
        INDENT, "#", "Parent", "Fragment", "Dist (Å)",
    );
    let _ = writeln!(
        out,
        "{}├{i}┼{p}┼{f}┼{d}┤",
        INDENT,
        i = "─".repeat(idx_w + 2),
        p = "─".repeat(parent_w + 2),
        f = "─".repeat(frag_w + 2),
        d = "─".repeat(dist_w + 2)
    );

    for (k, split) in splits.iter().enumerate().take(MAX_SPLIT_ROWS) {
        let fragment = split
            .fragment
            .as_ref()
            .map(|f| f.heavy_atom_count().to_string())
            .unwrap_or_else(|| "—".to_string());
        let dist = distances
            .and_then(|d| d.get(k).copied().flatten())
            .map(|d| format!("{d:.2}"))
            .unwrap_or_else(|| "—".to_string());
        let _ = writeln!(
            out,
            "{}│ {:>idx_w$} │ {:>parent_w$} │ {:>frag_w$} │ {:>dist_w$} │",
            INDENT,
            k + 1,
            split.parent.heavy_atom_count(),
            fragment,
            truncate(&dist, dist_w),
        );
    }

    if splits.len() > MAX_SPLIT_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:>idx_w$} │ {:>parent_w$} │ {:>frag_w$} │ {:>dist_w$} │",
            INDENT,
            "...",
            "...",
            "...",
            format!("({} more)", splits.len() - MAX_SPLIT_ROWS),
        );
    }

    let _ = writeln!(
        out,
        "{}└{i}┴{p}┴{f}┴{d}┘",
        INDENT,
        i = "─".repeat(idx_w + 2),
        p = "─".repeat(parent_w + 2),
        f = "─".repeat(frag_w + 2),
        d = "─".repeat(dist_w + 2)
    );
}

pub fn print_layer_summary(cloud: &PointCloud) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let total = cloud.len();
    let counts = cloud.layer_counts();

    let name_w = 10usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(out, "{}┌─ Layer Distribution ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{n}┬{c}┬{d}┐",
        INDENT,
        n = "─".repeat(name_w + 2),
        c = "─".repeat(count_w + 2),
        d = "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        INDENT, "Layer", "Points", "Distribution",
    );
    let _ = writeln!(
        out,
        "{}├{n}┼{c}┼{d}┤",
        INDENT,
        n = "─".repeat(name_w + 2),
        c = "─".repeat(count_w + 2),
        d = "─".repeat(dist_w + 2)
    );

    for (layer, count) in counts.iter().enumerate() {
        let pct = if total == 0 {
            0.0
        } else {
            (*count as f64 / total as f64) * 100.0
        };
        let label = format!("{layer} {}", LAYER_NAMES[layer]);
        let dist_cell = format!("{}  {:>5.1}%", make_bar(pct, max_bar_width), pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            truncate(&label, name_w),
            count,
            dist_cell,
        );
    }

    let _ = writeln!(
        out,
        "{}└{n}┴{c}┴{d}┘",
        INDENT,
        n = "─".repeat(name_w + 2),
        c = "─".repeat(count_w + 2),
        d = "─".repeat(dist_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Metric", "Value",
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
