// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Solidity contract ABI encoding of `bytes` tuples, as produced by
//! `abi.encode(bytes, bytes, ...)` and consumed by `abi.decode(data, (bytes, bytes, ...))`.

use thiserror::Error;

/// Size of an ABI word
pub const WORD_SIZE: usize = 32;

/// ABI decoding error
#[derive(Error, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum AbiError {
    #[error("data too short: need {needed} bytes at offset {offset}, have {len}")]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },
    #[error("value at offset {0} does not fit into usize")]
    Overflow(usize),
    #[error("non-zero padding after value at offset {0}")]
    Padding(usize),
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

fn push_word(out: &mut Vec<u8>, value: usize) {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    out.extend_from_slice(&word);
}

fn read_word(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let word = offset
        .checked_add(WORD_SIZE)
        .and_then(|end| data.get(offset..end))
        .ok_or(AbiError::Truncated {
            offset,
            needed: WORD_SIZE,
            len: data.len(),
        })?;

    let (high, low) = word.split_at(WORD_SIZE - 8);
    if high.iter().any(|&b| b != 0) {
        return Err(AbiError::Overflow(offset));
    }
    let mut value = [0u8; 8];
    value.copy_from_slice(low);
    usize::try_from(u64::from_be_bytes(value)).map_err(|_| AbiError::Overflow(offset))
}

/// Encode a tuple of dynamic `bytes` values.
///
/// The head holds one offset word per value, relative to the start of the encoding.
/// Each value in the tail is a length word followed by the data, zero-padded to
/// a multiple of [`WORD_SIZE`].
///
/// ```rust
/// # use mock_evidence::abi::encode_bytes;
/// let encoded = encode_bytes(&[[0xca, 0xfe].as_slice()]);
/// assert_eq!(
///     hex::encode(encoded),
///     concat!(
///         "0000000000000000000000000000000000000000000000000000000000000020",
///         "0000000000000000000000000000000000000000000000000000000000000002",
///         "cafe000000000000000000000000000000000000000000000000000000000000",
///     )
/// );
/// ```
pub fn encode_bytes(values: &[&[u8]]) -> Vec<u8> {
    let head_len = values.len() * WORD_SIZE;
    let tail_len: usize = values
        .iter()
        .map(|value| WORD_SIZE + padded_len(value.len()))
        .sum();

    let mut head = Vec::with_capacity(head_len + tail_len);
    let mut tail = Vec::with_capacity(tail_len);

    for value in values {
        push_word(&mut head, head_len + tail.len());
        push_word(&mut tail, value.len());
        tail.extend_from_slice(value);
        tail.resize(tail.len() + padded_len(value.len()) - value.len(), 0);
    }

    head.extend_from_slice(&tail);
    head
}

/// Decode a tuple of `count` dynamic `bytes` values produced by [`encode_bytes`].
pub fn decode_bytes(data: &[u8], count: usize) -> Result<Vec<Vec<u8>>, AbiError> {
    (0..count)
        .map(|index| {
            let offset = read_word(data, index * WORD_SIZE)?;
            let len = read_word(data, offset)?;
            let start = offset + WORD_SIZE;
            let padded = padded_len(len);

            let chunk = start
                .checked_add(padded)
                .and_then(|end| data.get(start..end))
                .ok_or(AbiError::Truncated {
                    offset: start,
                    needed: padded,
                    len: data.len(),
                })?;

            let (value, padding) = chunk.split_at(len);
            if padding.iter().any(|&b| b != 0) {
                return Err(AbiError::Padding(start));
            }
            Ok(value.to_vec())
        })
        .collect()
}
