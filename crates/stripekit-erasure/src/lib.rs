//! Stripekit Erasure - pluggable raw erasure coders
//!
//! This crate resolves a codec family (Reed-Solomon or XOR) and a role
//! (encoder or decoder) to a concrete raw coder. Built-in defaults cover
//! both families; alternative implementations register a
//! [`RawErasureCoderFactory`] by name and are selected through a
//! configuration entry, without touching call sites.
//!
//! # Layers
//!
//! - **rawcoder**: unit-level coder traits plus the built-in `rs` and
//!   `xor` implementations
//! - **registry**: the name-to-factory table overrides register in
//! - **codec**: the resolver, the public entry point
//! - **coder**: the block-group encoder built on top of raw coders
//!
//! # Example
//!
//! ```
//! use stripekit_erasure::prelude::*;
//!
//! // No configuration: the built-in Reed-Solomon coder.
//! let opts = CoderOptions::new(4, 2);
//! let encoder = create_rs_raw_encoder(None, opts).unwrap();
//!
//! let units: Vec<Vec<u8>> = (0..4).map(|i| vec![i as u8; 64]).collect();
//! let refs: Vec<&[u8]> = units.iter().map(|u| u.as_slice()).collect();
//! let parity = encoder.encode(&refs).unwrap();
//! assert_eq!(parity.len(), 2);
//!
//! // Recover an erased unit.
//! let decoder = create_rs_raw_decoder(None, opts).unwrap();
//! let mut group: Vec<Option<&[u8]>> = refs
//!     .iter()
//!     .copied()
//!     .map(Some)
//!     .chain(parity.iter().map(|p| Some(p.as_slice())))
//!     .collect();
//! group[2] = None;
//! let recovered = decoder.decode(&group, &[2]).unwrap();
//! assert_eq!(recovered[0], units[2]);
//! ```

pub mod codec;
pub mod coder;
pub mod rawcoder;
pub mod registry;

// Re-exports from codec
pub use codec::{
    CodecError, CodecResult, create_block_group_encoder, create_rs_raw_decoder,
    create_rs_raw_encoder, create_xor_raw_decoder, create_xor_raw_encoder,
};

// Re-exports for convenience
pub use coder::{ErasureCoder, RsBlockGroupEncoder};
pub use rawcoder::{
    RawErasureCoder, RawErasureCoderFactory, RawErasureDecoder, RawErasureEncoder,
    RsRawCoderFactory, RsRawDecoder, RsRawEncoder, XorRawCoderFactory, XorRawDecoder,
    XorRawEncoder,
};
pub use registry::{
    FactoryConstructor, FactoryError, register_builtin_factories, register_factory,
};

/// Prelude for common imports
pub mod prelude {
    pub use super::{
        CodecError, CodecResult, ErasureCoder, RawErasureCoder, RawErasureCoderFactory,
        RawErasureDecoder, RawErasureEncoder, create_block_group_encoder, create_rs_raw_decoder,
        create_rs_raw_encoder, create_xor_raw_decoder, create_xor_raw_encoder, register_factory,
    };
    pub use stripekit_common::{CodecConfig, CoderOptions};
}
