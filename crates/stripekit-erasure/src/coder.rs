//! Block-group erasure coder
//!
//! Sits above the raw coders: takes one full stripe of cells and produces
//! the parity cells for the group. Unlike raw coders, block-group coders
//! are not pluggable through configuration.

use crate::CodecResult;
use crate::rawcoder::{RawErasureCoder, RawErasureEncoder, RsRawEncoder};
use bytes::Bytes;
use stripekit_common::CoderOptions;

/// Encoder for a full block group
pub trait ErasureCoder: Send + Sync {
    /// The geometry this coder was created with
    fn options(&self) -> CoderOptions;

    /// Number of data units in the block group (k)
    fn data_units(&self) -> usize {
        self.options().data_units
    }

    /// Number of parity units in the block group (m)
    fn parity_units(&self) -> usize {
        self.options().parity_units
    }

    /// Encode one block group
    ///
    /// `cells` holds `data_units` equal-sized cells; returns the
    /// `parity_units` parity cells.
    fn encode_block_group(&self, cells: &[Bytes]) -> CodecResult<Vec<Bytes>>;
}

/// Reed-Solomon block-group encoder, composed from the built-in RS raw
/// encoder
pub struct RsBlockGroupEncoder {
    raw: RsRawEncoder,
}

impl RsBlockGroupEncoder {
    /// Create a new block-group encoder for the given geometry
    pub fn new(opts: CoderOptions) -> CodecResult<Self> {
        Ok(Self {
            raw: RsRawEncoder::new(opts)?,
        })
    }
}

impl ErasureCoder for RsBlockGroupEncoder {
    fn options(&self) -> CoderOptions {
        self.raw.options()
    }

    fn encode_block_group(&self, cells: &[Bytes]) -> CodecResult<Vec<Bytes>> {
        let refs: Vec<&[u8]> = cells.iter().map(|c| c.as_ref()).collect();
        let parity = self.raw.encode(&refs)?;
        Ok(parity.into_iter().map(Bytes::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_group_geometry() {
        let coder = RsBlockGroupEncoder::new(CoderOptions::new(6, 3)).unwrap();
        assert_eq!(coder.data_units(), 6);
        assert_eq!(coder.parity_units(), 3);
    }

    #[test]
    fn test_matches_raw_rs_encoder() {
        let opts = CoderOptions::new(4, 2);
        let coder = RsBlockGroupEncoder::new(opts).unwrap();

        let cells: Vec<Bytes> = (0..4u8).map(|i| Bytes::from(vec![i; 64])).collect();
        let parity = coder.encode_block_group(&cells).unwrap();

        let refs: Vec<&[u8]> = cells.iter().map(|c| c.as_ref()).collect();
        let raw_parity = RsRawEncoder::new(opts).unwrap().encode(&refs).unwrap();

        assert_eq!(parity.len(), 2);
        for (cell, raw) in parity.iter().zip(raw_parity.iter()) {
            assert_eq!(cell.as_ref(), raw.as_slice());
        }
    }
}
