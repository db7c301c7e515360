//! Jagged (variable-length) columns: flat values + per-entry offsets.

use jc_core::{Error, Result};

/// A jagged column: one variable-length list of values per entry.
///
/// `offsets` has length `n_entries + 1`; entry `i` owns
/// `flat[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct JaggedCol {
    flat: Vec<f64>,
    offsets: Vec<usize>,
}

impl JaggedCol {
    /// Build from flat values and offsets, checking the offset invariants.
    pub fn new(flat: Vec<f64>, offsets: Vec<usize>) -> Result<Self> {
        if offsets.is_empty() {
            return Err(Error::Validation("jagged column needs at least one offset".into()));
        }
        if offsets[0] != 0 {
            return Err(Error::Validation(format!(
                "jagged offsets must start at 0, got {}",
                offsets[0]
            )));
        }
        if offsets.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::Validation("jagged offsets must be non-decreasing".into()));
        }
        if *offsets.last().unwrap() != flat.len() {
            return Err(Error::Validation(format!(
                "jagged offsets end at {} but flat has {} values",
                offsets.last().unwrap(),
                flat.len()
            )));
        }
        Ok(Self { flat, offsets })
    }

    /// Build from nested per-entry vectors.
    pub fn from_nested(entries: &[Vec<f64>]) -> Self {
        let mut offsets = Vec::with_capacity(entries.len() + 1);
        offsets.push(0);
        let mut flat = Vec::with_capacity(entries.iter().map(Vec::len).sum());
        for e in entries {
            flat.extend_from_slice(e);
            offsets.push(flat.len());
        }
        Self { flat, offsets }
    }

    /// An empty column with zero entries.
    pub fn empty() -> Self {
        Self { flat: Vec::new(), offsets: vec![0] }
    }

    /// Number of entries.
    pub fn n_entries(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of values in entry `row`.
    pub fn entry_len(&self, row: usize) -> usize {
        self.offsets[row + 1] - self.offsets[row]
    }

    /// Values of entry `row`.
    pub fn entry(&self, row: usize) -> &[f64] {
        &self.flat[self.offsets[row]..self.offsets[row + 1]]
    }

    /// Iterator over all entries in order.
    pub fn entries(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.offsets.windows(2).map(move |w| &self.flat[w[0]..w[1]])
    }

    /// Maximum entry length across the column (0 if there are no entries).
    pub fn max_entry_len(&self) -> usize {
        self.offsets.windows(2).map(|w| w[1] - w[0]).max().unwrap_or(0)
    }

    /// All values across all entries.
    pub fn flat(&self) -> &[f64] {
        &self.flat
    }

    /// Entry boundaries (`n_entries + 1` values).
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// True when the per-entry lengths of `self` and `other` agree.
    pub fn same_shape(&self, other: &JaggedCol) -> bool {
        self.offsets == other.offsets
    }
}
