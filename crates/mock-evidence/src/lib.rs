// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Mock Intel SGX attestation evidence, signed and ABI encoded for on-chain verifier tests.

#![deny(missing_docs)]
#![deny(clippy::all)]

pub mod abi;
pub mod config;
pub mod error;
pub mod evidence;
pub mod fixture;
pub mod log;
pub mod quote;
pub mod sign;
pub mod util;

pub use error::EvidenceError;
pub use evidence::{Evidence, EvidenceTemplate};
pub use fixture::Fixture;
pub use sign::RS256PrivateKey;
