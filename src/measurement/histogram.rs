// src/measurement/histogram.rs
use crate::core::Bitstring;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Occurrence counts of measured bitstrings over all shots of one run.
///
/// Entries iterate in ascending bitstring order. Counts always sum to
/// `total()`, the number of shots taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    width: usize,
    shots: usize,
    counts: BTreeMap<Bitstring, usize>,
}

impl Histogram {
    /// Creates an empty histogram for `width`-bit outcomes. (Internal visibility)
    pub(crate) fn new(width: usize) -> Self {
        Self {
            width,
            shots: 0,
            counts: BTreeMap::new(),
        }
    }

    /// Records `count` more occurrences of `bitstring`. (Internal visibility)
    pub(crate) fn record(&mut self, bitstring: Bitstring, count: usize) {
        if count == 0 {
            return;
        }
        *self.counts.entry(bitstring).or_insert(0) += count;
        self.shots += count;
    }

    /// Width of the recorded bitstrings.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Occurrences of `bitstring`; zero if it never appeared.
    pub fn count(&self, bitstring: &Bitstring) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots, equal to the sum of all counts.
    pub fn total(&self) -> usize {
        self.shots
    }

    /// Fraction of shots that produced `bitstring`.
    pub fn frequency(&self, bitstring: &Bitstring) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(bitstring) as f64 / self.shots as f64
    }

    /// Number of distinct bitstrings observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Observed bitstrings with their counts, ascending by bitstring.
    pub fn iter(&self) -> impl Iterator<Item = (Bitstring, usize)> + '_ {
        self.counts.iter().map(|(b, &n)| (*b, n))
    }

    /// The bitstring with the highest count.
    ///
    /// Ties go to the lexicographically smallest bitstring. Returns `None`
    /// only for an empty histogram.
    pub fn most_frequent(&self) -> Option<(Bitstring, usize)> {
        self.iter().fold(None, |best, (bitstring, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((bitstring, count)),
        })
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Histogram ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            return writeln!(f, "  (empty)");
        }
        for (bitstring, count) in self.iter() {
            writeln!(f, "  {}: {}", bitstring, count)?;
        }
        Ok(())
    }
}
