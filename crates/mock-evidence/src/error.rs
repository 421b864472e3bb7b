// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Evidence error type

use crate::abi::AbiError;
use std::io;
use thiserror::Error;

/// Errors while building, signing or encoding mock evidence
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum EvidenceError {
    #[error("{field}: invalid length - expected {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("payload too long - at most {max} bytes allowed, got {actual}")]
    PayloadTooLong { max: usize, actual: usize },
    #[error("{field}: invalid hex")]
    Hex {
        field: &'static str,
        source: hex::FromHexError,
    },
    #[error("invalid private key")]
    Key(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("signature error")]
    Signature(#[from] rsa::Error),
    #[error("signature verification failed")]
    Verification(#[from] signature::Error),
    #[error("decoding quote body")]
    Base64(#[from] base64::DecodeError),
    #[error("serializing evidence")]
    Json(#[from] serde_json::Error),
    #[error("ABI encoding")]
    Abi(#[from] AbiError),
    #[error("I/O Error: {context}")]
    Io { context: String, source: io::Error },
    #[error("quote body inconsistent: {0} not found at its offset")]
    Inconsistent(&'static str),
}

/// Usability trait for easy EvidenceError annotation
pub trait EvidenceContext {
    /// The Ok Type
    type Ok;
    /// The Context
    fn context<I: Into<String>>(self, msg: I) -> Result<Self::Ok, EvidenceError>;
}

impl<T> EvidenceContext for Result<T, io::Error> {
    type Ok = T;

    fn context<I: Into<String>>(self, msg: I) -> Result<T, EvidenceError> {
        self.map_err(|e| EvidenceError::Io {
            context: msg.into(),
            source: e,
        })
    }
}
