//! Core types shared across Stripekit components

use serde::{Deserialize, Serialize};

/// Geometry of one coding group
///
/// Describes how many source units and redundancy units participate in a
/// single encode/decode operation. Passed by value into every coder
/// creation call; coders keep their own copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoderOptions {
    /// Number of data units in the group (k)
    pub data_units: usize,
    /// Number of parity units in the group (m)
    pub parity_units: usize,
}

impl CoderOptions {
    /// Create a new coding group geometry
    #[must_use]
    pub const fn new(data_units: usize, parity_units: usize) -> Self {
        Self {
            data_units,
            parity_units,
        }
    }

    /// Total units in the group (k + m)
    #[must_use]
    pub const fn total_units(&self) -> usize {
        self.data_units + self.parity_units
    }

    /// Maximum number of erased units the group can tolerate
    #[must_use]
    pub const fn allowed_erasures(&self) -> usize {
        self.parity_units
    }

    /// Storage efficiency: fraction of raw capacity holding data
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.data_units as f64 / self.total_units() as f64
    }

    /// Reed-Solomon 6+3 (HDFS-style default)
    pub const RS_6_3: Self = Self::new(6, 3);

    /// Reed-Solomon 10+4
    pub const RS_10_4: Self = Self::new(10, 4);

    /// Flat XOR 2+1
    pub const XOR_2_1: Self = Self::new(2, 1);
}

impl Default for CoderOptions {
    fn default() -> Self {
        Self::RS_6_3
    }
}

impl std::fmt::Display for CoderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}", self.data_units, self.parity_units)
    }
}
