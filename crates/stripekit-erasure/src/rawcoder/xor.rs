//! Flat XOR raw coders
//!
//! The built-in default for the XOR codec family. One parity unit holds
//! the XOR of all data units, so exactly one erased unit can be
//! recovered. Geometries with more than one parity unit are accepted for
//! interface compatibility; the extra parity slots are zero-filled and do
//! not add protection.

use super::{RawErasureCoder, RawErasureCoderFactory, RawErasureDecoder, RawErasureEncoder};
use crate::{CodecError, CodecResult};
use stripekit_common::CoderOptions;

fn validate_options(opts: CoderOptions) -> CodecResult<()> {
    if opts.data_units == 0 {
        return Err(CodecError::InvalidCoderOptions(
            "data_units must be > 0".into(),
        ));
    }
    if opts.parity_units == 0 {
        return Err(CodecError::InvalidCoderOptions(
            "parity_units must be > 0".into(),
        ));
    }
    Ok(())
}

/// XOR all slices together
fn xor_slices<'a>(slices: impl Iterator<Item = &'a [u8]>, unit_size: usize) -> Vec<u8> {
    let mut result = vec![0u8; unit_size];
    for slice in slices {
        for (byte, out) in slice.iter().zip(result.iter_mut()) {
            *out ^= byte;
        }
    }
    result
}

/// XOR raw encoder
#[derive(Debug)]
pub struct XorRawEncoder {
    opts: CoderOptions,
}

impl XorRawEncoder {
    /// Create a new encoder for the given geometry
    pub fn new(opts: CoderOptions) -> CodecResult<Self> {
        validate_options(opts)?;
        Ok(Self { opts })
    }
}

impl RawErasureCoder for XorRawEncoder {
    fn options(&self) -> CoderOptions {
        self.opts
    }

    fn name(&self) -> &str {
        "xor"
    }
}

impl RawErasureEncoder for XorRawEncoder {
    fn encode(&self, inputs: &[&[u8]]) -> CodecResult<Vec<Vec<u8>>> {
        let k = self.opts.data_units;
        if inputs.len() != k {
            return Err(CodecError::InvalidInput(format!(
                "expected {} data units, got {}",
                k,
                inputs.len()
            )));
        }

        let unit_size = inputs[0].len();
        if inputs.iter().any(|u| u.len() != unit_size) {
            return Err(CodecError::UnitSizeMismatch);
        }

        let mut parity = vec![vec![0u8; unit_size]; self.opts.parity_units];
        parity[0] = xor_slices(inputs.iter().copied(), unit_size);
        Ok(parity)
    }
}

/// XOR raw decoder
pub struct XorRawDecoder {
    opts: CoderOptions,
}

impl XorRawDecoder {
    /// Create a new decoder for the given geometry
    pub fn new(opts: CoderOptions) -> CodecResult<Self> {
        validate_options(opts)?;
        Ok(Self { opts })
    }
}

impl RawErasureCoder for XorRawDecoder {
    fn options(&self) -> CoderOptions {
        self.opts
    }

    fn name(&self) -> &str {
        "xor"
    }
}

impl RawErasureDecoder for XorRawDecoder {
    fn decode(
        &self,
        units: &[Option<&[u8]>],
        erased_indexes: &[usize],
    ) -> CodecResult<Vec<Vec<u8>>> {
        let k = self.opts.data_units;
        let total = self.opts.total_units();

        if units.len() != total {
            return Err(CodecError::InvalidInput(format!(
                "expected {total} units, got {}",
                units.len()
            )));
        }
        if let Some(&bad) = erased_indexes.iter().find(|&&i| i >= total) {
            return Err(CodecError::InvalidInput(format!(
                "erased index {bad} out of range for {total} units"
            )));
        }
        if erased_indexes.is_empty() {
            return Ok(Vec::new());
        }
        if erased_indexes.len() > 1 {
            return Err(CodecError::DecodingFailed(format!(
                "xor can recover a single erased unit, asked for {}",
                erased_indexes.len()
            )));
        }

        let erased = erased_indexes[0];
        if let Some(unit) = units[erased] {
            return Ok(vec![unit.to_vec()]);
        }

        let unit_size = units
            .iter()
            .copied()
            .find_map(|u| u.map(<[u8]>::len))
            .unwrap_or_default();
        if units.iter().flatten().any(|u| u.len() != unit_size) {
            return Err(CodecError::UnitSizeMismatch);
        }

        // Secondary parity slots are zero-filled by the encoder.
        if erased > k {
            return Ok(vec![vec![0u8; unit_size]]);
        }

        // Recovery needs every data unit plus the first parity unit,
        // except the erased one.
        let participating = 0..=k;
        let missing = participating
            .clone()
            .filter(|&i| i != erased && units[i].is_none())
            .count();
        if missing > 0 {
            return Err(CodecError::InsufficientUnits {
                available: k - missing,
                required: k,
            });
        }

        let present = participating.filter(|&i| i != erased).filter_map(|i| units[i]);
        Ok(vec![xor_slices(present, unit_size)])
    }
}

/// Factory for the built-in XOR raw coders
pub struct XorRawCoderFactory;

impl RawErasureCoderFactory for XorRawCoderFactory {
    fn create_encoder(&self, opts: CoderOptions) -> CodecResult<Box<dyn RawErasureEncoder>> {
        Ok(Box::new(XorRawEncoder::new(opts)?))
    }

    fn create_decoder(&self, opts: CoderOptions) -> CodecResult<Box<dyn RawErasureDecoder>> {
        Ok(Box::new(XorRawDecoder::new(opts)?))
    }
}
