// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2023-2025 Matter Labs

//! utility functions.

use crate::error::EvidenceError;

/// Pad a byte slice to a fixed-size array by appending zeros. If the input is longer
/// than the target size, returns an error.
///
/// # Examples
/// ```rust
/// # use mock_evidence::{util::pad, EvidenceError};
/// let padded: [u8; 5] = pad("payload", &[1, 2, 3])?;
/// assert_eq!(padded, [1, 2, 3, 0, 0]);
///
/// assert!(matches!(
///     pad::<2>("payload", &[1, 2, 3]),
///     Err(EvidenceError::InvalidLength { expected: 2, actual: 3, .. })
/// ));
/// # Ok::<(), EvidenceError>(())
/// ```
pub fn pad<const T: usize>(field: &'static str, input: &[u8]) -> Result<[u8; T], EvidenceError> {
    if input.len() > T {
        return Err(EvidenceError::InvalidLength {
            field,
            expected: T,
            actual: input.len(),
        });
    }
    let mut output = [0u8; T];
    output[..input.len()].copy_from_slice(input);
    Ok(output)
}

/// Decode a hex string into a fixed-size big-endian value.
///
/// A leading run of `0` and `x` characters is dropped, so `0x`-prefixed input and
/// input with fewer significant digits than `2 * T` are accepted. The remaining digits are
/// left-padded with zeros.
///
/// # Examples
/// ```rust
/// # use mock_evidence::util::decode_hex_padded;
/// let value: [u8; 4] = decode_hex_padded("mrenclave", "0xabc")?;
/// assert_eq!(value, [0, 0, 0x0a, 0xbc]);
/// # Ok::<(), mock_evidence::EvidenceError>(())
/// ```
pub fn decode_hex_padded<const T: usize>(
    field: &'static str,
    input: &str,
) -> Result<[u8; T], EvidenceError> {
    let digits = input.trim_start_matches(['0', 'x']);

    if digits.len() > 2 * T {
        return Err(EvidenceError::InvalidLength {
            field,
            expected: T,
            actual: digits.len().div_ceil(2),
        });
    }

    let padded = format!("{digits:0>width$}", width = 2 * T);
    let mut output = [0u8; T];
    hex::decode_to_slice(padded, &mut output)
        .map_err(|source| EvidenceError::Hex { field, source })?;
    Ok(output)
}
