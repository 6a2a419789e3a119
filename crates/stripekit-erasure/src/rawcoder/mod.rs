//! Raw erasure coder abstraction
//!
//! A raw coder works on a single coding group: `data_units` source units
//! plus `parity_units` redundancy units, all the same size. It carries no
//! striping or placement logic; higher layers feed it one group at a time.
//!
//! # Families
//!
//! - `rs`: Reed-Solomon over GF(2^16) using `reed-solomon-simd`
//! - `xor`: flat XOR, single-erasure recovery only
//!
//! Alternative implementations plug in through [`RawErasureCoderFactory`]
//! and the [`registry`](crate::registry) module.

pub mod rs;
pub mod xor;

use crate::CodecResult;
use stripekit_common::CoderOptions;

/// Common surface of raw encoders and decoders
pub trait RawErasureCoder: Send + Sync {
    /// The geometry this coder was created with
    fn options(&self) -> CoderOptions;

    /// Number of data units in the coding group (k)
    fn data_units(&self) -> usize {
        self.options().data_units
    }

    /// Number of parity units in the coding group (m)
    fn parity_units(&self) -> usize {
        self.options().parity_units
    }

    /// Total units in the coding group (k + m)
    fn total_units(&self) -> usize {
        self.options().total_units()
    }

    /// Implementation name for identification
    fn name(&self) -> &str;
}

/// Unit-level encoder for one coding group
pub trait RawErasureEncoder: RawErasureCoder + std::fmt::Debug {
    /// Encode one coding group
    ///
    /// `inputs` holds `data_units` unit slices of equal size. Returns the
    /// `parity_units` parity buffers, each the same size as the inputs.
    fn encode(&self, inputs: &[&[u8]]) -> CodecResult<Vec<Vec<u8>>>;
}

/// Unit-level decoder for one coding group
pub trait RawErasureDecoder: RawErasureCoder {
    /// Reconstruct erased units
    ///
    /// `units` holds all `total_units` slots in group order (data units
    /// first, then parity), `None` for unavailable units. Returns the
    /// reconstructed buffers in `erased_indexes` order.
    fn decode(
        &self,
        units: &[Option<&[u8]>],
        erased_indexes: &[usize],
    ) -> CodecResult<Vec<Vec<u8>>>;
}

/// Factory producing raw coders for one codec family
///
/// Implement this to substitute an alternative coder (for example a
/// hardware-accelerated one) for a built-in default. Factories are
/// instantiated fresh per resolution call and discarded after producing
/// one coder; they should be cheap to construct.
pub trait RawErasureCoderFactory: Send + Sync {
    /// Create an encoder for the given geometry
    fn create_encoder(&self, opts: CoderOptions) -> CodecResult<Box<dyn RawErasureEncoder>>;

    /// Create a decoder for the given geometry
    fn create_decoder(&self, opts: CoderOptions) -> CodecResult<Box<dyn RawErasureDecoder>>;
}

// Re-exports
pub use rs::{RsRawCoderFactory, RsRawDecoder, RsRawEncoder};
pub use xor::{XorRawCoderFactory, XorRawDecoder, XorRawEncoder};
