//! Coder resolution
//!
//! Maps a codec family (Reed-Solomon or XOR) and a role (encoder or
//! decoder) to a concrete raw coder. A configuration entry may name a
//! registered factory to override the built-in default for a family. An
//! absent configuration, an unset key, or a name with no registry entry
//! all fall back to the built-in default silently; a registered
//! constructor that fails is a fatal configuration error and surfaces to
//! the caller.

use crate::coder::{ErasureCoder, RsBlockGroupEncoder};
use crate::rawcoder::{
    RawErasureCoderFactory, RawErasureDecoder, RawErasureEncoder, RsRawDecoder, RsRawEncoder,
    XorRawDecoder, XorRawEncoder,
};
use crate::registry;
use stripekit_common::{
    CodecConfig, CoderOptions, Error as CommonError, RS_RAWCODER_FACTORY_KEY,
    XOR_RAWCODER_FACTORY_KEY,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors specific to erasure coding operations
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid coder options: {0}")]
    InvalidCoderOptions(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to construct raw coder factory {name:?}")]
    FactoryConstruction {
        name: String,
        #[source]
        source: registry::FactoryError,
    },

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("decoding failed: {0}")]
    DecodingFailed(String),

    #[error("insufficient units: have {available}, need {required}")]
    InsufficientUnits { available: usize, required: usize },

    #[error("unit size mismatch")]
    UnitSizeMismatch,
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

impl From<CodecError> for CommonError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::FactoryConstruction { .. } => Self::Configuration(e.to_string()),
            _ => Self::ErasureCoding(e.to_string()),
        }
    }
}

/// Create a Reed-Solomon raw encoder, honoring a configured factory
/// override
pub fn create_rs_raw_encoder(
    conf: Option<&CodecConfig>,
    opts: CoderOptions,
) -> CodecResult<Box<dyn RawErasureEncoder>> {
    match resolve_factory(conf, RS_RAWCODER_FACTORY_KEY)? {
        Some(factory) => factory.create_encoder(opts),
        None => Ok(Box::new(RsRawEncoder::new(opts)?)),
    }
}

/// Create a Reed-Solomon raw decoder, honoring a configured factory
/// override
pub fn create_rs_raw_decoder(
    conf: Option<&CodecConfig>,
    opts: CoderOptions,
) -> CodecResult<Box<dyn RawErasureDecoder>> {
    match resolve_factory(conf, RS_RAWCODER_FACTORY_KEY)? {
        Some(factory) => factory.create_decoder(opts),
        None => Ok(Box::new(RsRawDecoder::new(opts)?)),
    }
}

/// Create an XOR raw encoder, honoring a configured factory override
pub fn create_xor_raw_encoder(
    conf: Option<&CodecConfig>,
    opts: CoderOptions,
) -> CodecResult<Box<dyn RawErasureEncoder>> {
    match resolve_factory(conf, XOR_RAWCODER_FACTORY_KEY)? {
        Some(factory) => factory.create_encoder(opts),
        None => Ok(Box::new(XorRawEncoder::new(opts)?)),
    }
}

/// Create an XOR raw decoder, honoring a configured factory override
pub fn create_xor_raw_decoder(
    conf: Option<&CodecConfig>,
    opts: CoderOptions,
) -> CodecResult<Box<dyn RawErasureDecoder>> {
    match resolve_factory(conf, XOR_RAWCODER_FACTORY_KEY)? {
        Some(factory) => factory.create_decoder(opts),
        None => Ok(Box::new(XorRawDecoder::new(opts)?)),
    }
}

/// Create an encoder for a full block group
///
/// Always the built-in Reed-Solomon block-group encoder: block-group
/// coders are not pluggable, and factory overrides configured for raw
/// coders never reach this path.
pub fn create_block_group_encoder(
    _conf: Option<&CodecConfig>,
    opts: CoderOptions,
) -> CodecResult<Box<dyn ErasureCoder>> {
    Ok(Box::new(RsBlockGroupEncoder::new(opts)?))
}

/// Resolve the factory override configured under `factory_key`
///
/// `Ok(Some(_))` carries a freshly constructed factory. `Ok(None)` means
/// no usable override (missing configuration, unset key, or a name with
/// no registry entry) and the caller builds the built-in default. Only a
/// registered constructor that fails turns into an error.
fn resolve_factory(
    conf: Option<&CodecConfig>,
    factory_key: &str,
) -> CodecResult<Option<Box<dyn RawErasureCoderFactory>>> {
    let Some(conf) = conf else {
        return Ok(None);
    };
    let Some(name) = conf.factory_name(factory_key) else {
        return Ok(None);
    };
    let Some(constructor) = registry::lookup_factory(name) else {
        warn!(
            name,
            key = factory_key,
            "configured raw coder factory not registered, using built-in default"
        );
        return Ok(None);
    };

    let factory = constructor().map_err(|source| CodecError::FactoryConstruction {
        name: name.to_string(),
        source,
    })?;
    debug!(name, key = factory_key, "using configured raw coder factory");
    Ok(Some(factory))
}
