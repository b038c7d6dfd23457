use super::error::Error;
use super::featurize::get_connection_point;
use crate::model::molecule::Molecule;

/// Minimum Euclidean distance (Å) from the fragment's connection point to
/// any of `coords`.
///
/// # Errors
///
/// [`Error::EmptyReferenceSet`] if `coords` is empty, or
/// [`Error::MissingDummyAtom`] if the fragment has no attachment atom.
pub fn frag_dist_to_receptor_raw(coords: &[[f64; 3]], fragment: &Molecule) -> Result<f64, Error> {
    if coords.is_empty() {
        return Err(Error::EmptyReferenceSet);
    }
    let conn = get_connection_point(fragment)?;

    let min_sq = coords
        .iter()
        .map(|p| {
            let dx = p[0] - conn[0];
            let dy = p[1] - conn[1];
            let dz = p[2] - conn[2];
            dx * dx + dy * dy + dz * dz
        })
        .fold(f64::INFINITY, f64::min);

    Ok(min_sq.sqrt())
}

/// [`frag_dist_to_receptor_raw`] against every atom of `receptor`.
pub fn frag_dist_to_receptor(receptor: &Molecule, fragment: &Molecule) -> Result<f64, Error> {
    frag_dist_to_receptor_raw(&receptor.positions(), fragment)
}
