//! Reed-Solomon raw coders built on reed-solomon-simd
//!
//! The built-in default for the Reed-Solomon codec family. Uses the
//! `reed-solomon-simd` crate, which picks SIMD instructions automatically
//! where available (SSE, AVX, NEON). Unit sizes must be even, a
//! requirement of the underlying GF(2^16) implementation.

use super::{RawErasureCoder, RawErasureCoderFactory, RawErasureDecoder, RawErasureEncoder};
use crate::{CodecError, CodecResult};
use reed_solomon_simd::{ReedSolomonDecoder, ReedSolomonEncoder};
use stripekit_common::CoderOptions;

/// GF(2^16) limit on total units per coding group
const MAX_TOTAL_UNITS: usize = 65_535;

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
    if opts.total_units() > MAX_TOTAL_UNITS {
        return Err(CodecError::InvalidCoderOptions(format!(
            "total units must be <= {MAX_TOTAL_UNITS}"
        )));
    }
    Ok(())
}

fn check_equal_sizes(units: &[&[u8]], unit_size: usize) -> CodecResult<()> {
    if units.iter().any(|u| u.len() != unit_size) {
        return Err(CodecError::UnitSizeMismatch);
    }
    Ok(())
}

fn encode_parity(
    opts: CoderOptions,
    inputs: &[&[u8]],
    unit_size: usize,
) -> CodecResult<Vec<Vec<u8>>> {
    let mut encoder = ReedSolomonEncoder::new(opts.data_units, opts.parity_units, unit_size)
        .map_err(|e| CodecError::InvalidCoderOptions(e.to_string()))?;

    for unit in inputs {
        encoder
            .add_original_shard(unit)
            .map_err(|e| CodecError::EncodingFailed(e.to_string()))?;
    }

    let result = encoder
        .encode()
        .map_err(|e| CodecError::EncodingFailed(e.to_string()))?;

    Ok(result.recovery_iter().map(<[u8]>::to_vec).collect())
}

/// Reed-Solomon raw encoder
#[derive(Debug)]
pub struct RsRawEncoder {
    opts: CoderOptions,
}

impl RsRawEncoder {
    /// Create a new encoder for the given geometry
    pub fn new(opts: CoderOptions) -> CodecResult<Self> {
        validate_options(opts)?;
        Ok(Self { opts })
    }
}

impl RawErasureCoder for RsRawEncoder {
    fn options(&self) -> CoderOptions {
        self.opts
    }

    fn name(&self) -> &str {
        "rs"
    }
}

impl RawErasureEncoder for RsRawEncoder {
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
        check_equal_sizes(inputs, unit_size)?;

        encode_parity(self.opts, inputs, unit_size)
    }
}

/// Reed-Solomon raw decoder
pub struct RsRawDecoder {
    opts: CoderOptions,
}

impl RsRawDecoder {
    /// Create a new decoder for the given geometry
    pub fn new(opts: CoderOptions) -> CodecResult<Self> {
        validate_options(opts)?;
        Ok(Self { opts })
    }
}

impl RawErasureCoder for RsRawDecoder {
    fn options(&self) -> CoderOptions {
        self.opts
    }

    fn name(&self) -> &str {
        "rs"
    }
}

impl RawErasureDecoder for RsRawDecoder {
    fn decode(
        &self,
        units: &[Option<&[u8]>],
        erased_indexes: &[usize],
    ) -> CodecResult<Vec<Vec<u8>>> {
        let k = self.opts.data_units;
        let m = self.opts.parity_units;

        if units.len() != k + m {
            return Err(CodecError::InvalidInput(format!(
                "expected {} units, got {}",
                k + m,
                units.len()
            )));
        }
        if let Some(&bad) = erased_indexes.iter().find(|&&i| i >= k + m) {
            return Err(CodecError::InvalidInput(format!(
                "erased index {bad} out of range for {} units",
                k + m
            )));
        }
        if erased_indexes.is_empty() {
            return Ok(Vec::new());
        }

        let available = units.iter().filter(|u| u.is_some()).count();
        if available < k {
            return Err(CodecError::InsufficientUnits {
                available,
                required: k,
            });
        }

        let unit_size = units
            .iter()
            .copied()
            .find_map(|u| u.map(<[u8]>::len))
            .unwrap_or_default();
        if units.iter().flatten().any(|u| u.len() != unit_size) {
            return Err(CodecError::UnitSizeMismatch);
        }

        // Restore missing data units first; erased parity is reproduced by
        // re-encoding afterwards.
        let missing_data: Vec<usize> = (0..k).filter(|&i| units[i].is_none()).collect();
        let mut restored: Vec<Option<Vec<u8>>> = vec![None; k];

        if !missing_data.is_empty() {
            let mut decoder = ReedSolomonDecoder::new(k, m, unit_size)
                .map_err(|e| CodecError::InvalidCoderOptions(e.to_string()))?;

            for (i, unit) in units.iter().enumerate().take(k) {
                if let Some(data) = unit {
                    decoder
                        .add_original_shard(i, data)
                        .map_err(|e| CodecError::DecodingFailed(e.to_string()))?;
                }
            }
            for i in 0..m {
                if let Some(data) = units[k + i] {
                    decoder
                        .add_recovery_shard(i, data)
                        .map_err(|e| CodecError::DecodingFailed(e.to_string()))?;
                }
            }

            let result = decoder
                .decode()
                .map_err(|e| CodecError::DecodingFailed(e.to_string()))?;

            for &i in &missing_data {
                let unit = result.restored_original(i).ok_or_else(|| {
                    CodecError::DecodingFailed(format!("failed to restore data unit {i}"))
                })?;
                restored[i] = Some(unit.to_vec());
            }
        }

        let parity = if erased_indexes.iter().any(|&i| i >= k) {
            let data_refs: Vec<&[u8]> = (0..k)
                .map(|i| {
                    units[i]
                        .or_else(|| restored[i].as_deref())
                        .ok_or_else(|| {
                            CodecError::DecodingFailed(format!("data unit {i} unavailable"))
                        })
                })
                .collect::<CodecResult<_>>()?;
            Some(encode_parity(self.opts, &data_refs, unit_size)?)
        } else {
            None
        };

        erased_indexes
            .iter()
            .map(|&idx| {
                if let Some(unit) = units[idx] {
                    // Caller listed a unit that is actually present;
                    // return it unchanged.
                    Ok(unit.to_vec())
                } else if idx < k {
                    restored[idx].clone().ok_or_else(|| {
                        CodecError::DecodingFailed(format!("data unit {idx} not restored"))
                    })
                } else {
                    parity
                        .as_ref()
                        .map(|p| p[idx - k].clone())
                        .ok_or_else(|| {
                            CodecError::DecodingFailed(format!("parity unit {idx} not restored"))
                        })
                }
            })
            .collect()
    }
}

/// Factory for the built-in Reed-Solomon raw coders
pub struct RsRawCoderFactory;

impl RawErasureCoderFactory for RsRawCoderFactory {
    fn create_encoder(&self, opts: CoderOptions) -> CodecResult<Box<dyn RawErasureEncoder>> {
        Ok(Box::new(RsRawEncoder::new(opts)?))
    }

    fn create_decoder(&self, opts: CoderOptions) -> CodecResult<Box<dyn RawErasureDecoder>> {
        Ok(Box::new(RsRawDecoder::new(opts)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const UNIT_SIZE: usize = 64;

    fn random_units(count: usize) -> Vec<Vec<u8>> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| {
                let mut unit = vec![0u8; UNIT_SIZE];
                rng.fill(&mut unit[..]);
                unit
            })
            .collect()
    }

    fn as_refs(units: &[Vec<u8>]) -> Vec<&[u8]> {
        units.iter().map(Vec::as_slice).collect()
    }

    #[test]
    fn test_invalid_options() {
        assert!(matches!(
            RsRawEncoder::new(CoderOptions::new(0, 2)),
            Err(CodecError::InvalidCoderOptions(_))
        ));
        assert!(matches!(
            RsRawDecoder::new(CoderOptions::new(4, 0)),
            Err(CodecError::InvalidCoderOptions(_))
        ));
    }

    #[test]
    fn test_encode_geometry() {
        let opts = CoderOptions::new(4, 2);
        let encoder = RsRawEncoder::new(opts).unwrap();
        assert_eq!(encoder.data_units(), 4);
        assert_eq!(encoder.parity_units(), 2);
        assert_eq!(encoder.name(), "rs");

        let data = random_units(4);
        let parity = encoder.encode(&as_refs(&data)).unwrap();
        assert_eq!(parity.len(), 2);
        assert!(parity.iter().all(|p| p.len() == UNIT_SIZE));
    }

    #[test]
    fn test_round_trip_with_data_erasures() {
        let opts = CoderOptions::new(6, 3);
        let encoder = RsRawEncoder::new(opts).unwrap();
        let decoder = RsRawDecoder::new(opts).unwrap();

        let data = random_units(6);
        let parity = encoder.encode(&as_refs(&data)).unwrap();

        let mut units: Vec<Option<&[u8]>> = data
            .iter()
            .chain(parity.iter())
            .map(|u| Some(u.as_slice()))
            .collect();
        units[0] = None;
        units[3] = None;
        units[5] = None;

        let recovered = decoder.decode(&units, &[0, 3, 5]).unwrap();
        assert_eq!(recovered[0], data[0]);
        assert_eq!(recovered[1], data[3]);
        assert_eq!(recovered[2], data[5]);
    }

    #[test]
    fn test_recovers_erased_parity() {
        let opts = CoderOptions::new(4, 2);
        let encoder = RsRawEncoder::new(opts).unwrap();
        let decoder = RsRawDecoder::new(opts).unwrap();

        let data = random_units(4);
        let parity = encoder.encode(&as_refs(&data)).unwrap();

        let mut units: Vec<Option<&[u8]>> = data
            .iter()
            .chain(parity.iter())
            .map(|u| Some(u.as_slice()))
            .collect();
        units[1] = None; // data unit
        units[5] = None; // parity unit

        let recovered = decoder.decode(&units, &[1, 5]).unwrap();
        assert_eq!(recovered[0], data[1]);
        assert_eq!(recovered[1], parity[1]);
    }

    #[test]
    fn test_too_many_erasures() {
        let opts = CoderOptions::new(4, 2);
        let encoder = RsRawEncoder::new(opts).unwrap();
        let decoder = RsRawDecoder::new(opts).unwrap();

        let data = random_units(4);
        let parity = encoder.encode(&as_refs(&data)).unwrap();

        let mut units: Vec<Option<&[u8]>> = data
            .iter()
            .chain(parity.iter())
            .map(|u| Some(u.as_slice()))
            .collect();
        units[0] = None;
        units[1] = None;
        units[2] = None;

        let result = decoder.decode(&units, &[0, 1, 2]);
        assert!(matches!(
            result,
            Err(CodecError::InsufficientUnits {
                available: 3,
                required: 4
            })
        ));
    }

    #[test]
    fn test_unit_size_mismatch() {
        let opts = CoderOptions::new(2, 1);
        let encoder = RsRawEncoder::new(opts).unwrap();
        let a = vec![0u8; 64];
        let b = vec![0u8; 32];
        let result = encoder.encode(&[a.as_slice(), b.as_slice()]);
        assert!(matches!(result, Err(CodecError::UnitSizeMismatch)));
    }

    #[test]
    fn test_factory_matches_builtin() {
        let opts = CoderOptions::new(4, 2);
        let encoder = RsRawCoderFactory.create_encoder(opts).unwrap();
        let decoder = RsRawCoderFactory.create_decoder(opts).unwrap();
        assert_eq!(encoder.options(), opts);
        assert_eq!(decoder.options(), opts);

        let data = random_units(4);
        let via_factory = encoder.encode(&as_refs(&data)).unwrap();
        let direct = RsRawEncoder::new(opts)
            .unwrap()
            .encode(&as_refs(&data))
            .unwrap();
        assert_eq!(via_factory, direct);
    }
}
