//! Jet-level kinematic selection.

use jc_core::{Error, JetCuts, Result};

/// Per-jet selection mask from the open-interval pt and eta windows.
///
/// `mask[j]` is true iff jet `j` satisfies
/// `min_jet_pt < pt < max_jet_pt` and `min_jet_eta < eta < max_jet_eta`.
pub fn selection_mask(jet_pt: &[f64], jet_eta: &[f64], cuts: &JetCuts) -> Result<Vec<bool>> {
    if jet_pt.len() != jet_eta.len() {
        return Err(Error::Validation(format!(
            "jet_pt has {} entries but jet_eta has {}",
            jet_pt.len(),
            jet_eta.len()
        )));
    }
    Ok(jet_pt
        .iter()
        .zip(jet_eta.iter())
        .map(|(&pt, &eta)| cuts.keep_jet(pt, eta))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_test_is_open_interval() {
        let cuts = JetCuts::default();
        let pt = vec![110.0, 100.0, 120.0, 119.9, 100.1];
        let eta = vec![0.0, 0.0, 0.0, -2.0, 2.0];
        let mask = selection_mask(&pt, &eta, &cuts).unwrap();
        // pt boundaries excluded; eta boundaries excluded.
        assert_eq!(mask, vec![true, false, false, false, false]);
    }

    #[test]
    fn both_conditions_required() {
        let cuts = JetCuts::default();
        let mask = selection_mask(&[110.0, 90.0, 110.0], &[3.0, 0.0, 0.0], &cuts).unwrap();
        assert_eq!(mask, vec![false, false, true]);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let cuts = JetCuts::default();
        assert!(selection_mask(&[110.0], &[0.0, 1.0], &cuts).is_err());
    }

    #[test]
    fn empty_input_gives_empty_mask() {
        let cuts = JetCuts::default();
        assert!(selection_mask(&[], &[], &cuts).unwrap().is_empty());
    }
}
