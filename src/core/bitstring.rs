// src/core/bitstring.rs

use super::error::SimError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A computational-basis label for an n-qubit register.
///
/// Bit `k` of `value` is the state of qubit `k`. The text form lists the
/// highest qubit first, so qubit 0 is the rightmost character: the basis
/// state with qubit 1 set and qubit 0 clear prints as `"10"`.
///
/// Ordering is by width, then value, which for equal widths is the same as
/// comparing the text forms lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bitstring {
    width: usize,
    value: usize,
}

impl Bitstring {
    /// Creates a bitstring of `width` bits holding `value`.
    ///
    /// Bits of `value` above `width` are dropped.
    pub fn new(value: usize, width: usize) -> Self {
        let mask = 1usize
            .checked_shl(width as u32)
            .map_or(usize::MAX, |bit| bit - 1);
        Self {
            width,
            value: value & mask,
        }
    }

    /// The basis-state index this bitstring labels.
    pub fn value(&self) -> usize {
        self.value
    }

    /// Number of qubits covered.
    pub fn width(&self) -> usize {
        self.width
    }

    /// State of a single qubit in this basis label.
    pub fn bit(&self, qubit: usize) -> bool {
        qubit < self.width && (self.value >> qubit) & 1 == 1
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.value, width = self.width)
    }
}

impl FromStr for Bitstring {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() >= usize::BITS as usize {
            return Err(SimError::InvalidBitstring(s.to_string()));
        }
        let value = s.chars().try_fold(0usize, |acc, c| match c {
            '0' => Ok(acc << 1),
            '1' => Ok((acc << 1) | 1),
            _ => Err(SimError::InvalidBitstring(s.to_string())),
        })?;
        Ok(Self::new(value, s.len()))
    }
}

impl Serialize for Bitstring {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
