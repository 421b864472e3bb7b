// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Intel SGX EPID quote body, as reported in `isvEnclaveQuoteBody` of an attestation report.
//!
//! Only the measurements and the report data are set, all other fields stay zero.

use crate::{error::EvidenceError, util::pad};
use bytemuck::{Pod, Zeroable};
use std::mem;
use tracing::trace;

/// Length of a measurement (`MRENCLAVE`, `MRSIGNER`)
pub const MEASUREMENT_LENGTH: usize = 32;
/// Length of the enclave report data
pub const REPORT_DATA_LENGTH: usize = 64;
/// Length of the quote body without the signature
pub const QUOTE_BODY_LENGTH: usize = 432;
/// Offset of `MRENCLAVE` in the quote body
pub const MRENCLAVE_OFFSET: usize = 112;
/// Offset of `MRSIGNER` in the quote body
pub const MRSIGNER_OFFSET: usize = 176;
/// Offset of the report data in the quote body
pub const REPORT_DATA_OFFSET: usize = 368;

/// The quote body of an EPID quote.
///
/// See the Intel® SGX Attestation Service API, section "Quote Body".
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
#[repr(C)]
pub struct QuoteBody {
    version: [u8; 2],
    sign_type: [u8; 2],
    epid_group_id: [u8; 4],
    qe_svn: [u8; 2],
    pce_svn: [u8; 2],
    xeid: [u8; 4],
    basename: [u8; 32],
    /// The report body
    pub report_body: ReportBody,
}

/// The enclave report body.
///
/// [Intel® 64 and IA-32 Architectures Software Developer's Manual Volume 3 (3A, 3B, 3C & 3D): System Programming Guide](https://www.intel.com/content/www/us/en/architecture-and-technology/64-ia-32-architectures-software-developer-vol-3d-part-4-manual.html)
///
/// Table 38-21. Layout of REPORT
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
#[repr(C)]
pub struct ReportBody {
    /// The security version number of the enclave.
    pub cpusvn: [u8; 16],
    /// The Misc section of the StateSaveArea of the enclave
    pub miscselect: [u8; 4],
    reserved1: [u8; 28],
    /// The allowed Features of the enclave.
    pub features: [u8; 8],
    /// The allowed XCr0Flags of the enclave.
    pub xfrm: [u8; 8],
    /// The measurement of the enclave
    pub mrenclave: [u8; MEASUREMENT_LENGTH],
    reserved2: [u8; 32],
    /// The hash of the public key, that signed the enclave
    pub mrsigner: [u8; MEASUREMENT_LENGTH],
    reserved3: [u8; 96],
    /// ISV assigned Product ID of the enclave.
    pub isv_prodid: [u8; 2],
    /// ISV assigned SVN (security version number) of the enclave.
    pub isv_svn: [u8; 2],
    reserved4: [u8; 60],
    /// The enclave report data, injected when requesting the quote, that is used for attestation.
    pub reportdata: [u8; REPORT_DATA_LENGTH],
}

impl QuoteBody {
    /// Creates a zeroed quote body carrying only the given measurements and report data
    pub fn new(
        mrenclave: [u8; MEASUREMENT_LENGTH],
        mrsigner: [u8; MEASUREMENT_LENGTH],
        reportdata: [u8; REPORT_DATA_LENGTH],
    ) -> Self {
        let mut this = Self::zeroed();
        this.report_body.mrenclave = mrenclave;
        this.report_body.mrsigner = mrsigner;
        this.report_body.reportdata = reportdata;
        this
    }

    /// Views a quote body in a byte slice of exactly [`QUOTE_BODY_LENGTH`] bytes
    pub fn try_from_bytes(bytes: &[u8]) -> Result<&Self, EvidenceError> {
        if bytes.len() != mem::size_of::<Self>() {
            return Err(EvidenceError::InvalidLength {
                field: "quote body",
                expected: mem::size_of::<Self>(),
                actual: bytes.len(),
            });
        }
        bytemuck::try_from_bytes(bytes).map_err(|_| EvidenceError::InvalidLength {
            field: "quote body",
            expected: mem::size_of::<Self>(),
            actual: bytes.len(),
        })
    }

    /// The raw bytes of the quote body
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// The measurement of the enclave
    pub fn mrenclave(&self) -> &[u8; MEASUREMENT_LENGTH] {
        &self.report_body.mrenclave
    }

    /// The hash of the enclave signer's public key
    pub fn mrsigner(&self) -> &[u8; MEASUREMENT_LENGTH] {
        &self.report_body.mrsigner
    }

    /// The report data
    pub fn report_data(&self) -> &[u8; REPORT_DATA_LENGTH] {
        &self.report_body.reportdata
    }
}

fn measurement(
    field: &'static str,
    value: &[u8],
) -> Result<[u8; MEASUREMENT_LENGTH], EvidenceError> {
    value.try_into().map_err(|_| EvidenceError::InvalidLength {
        field,
        expected: MEASUREMENT_LENGTH,
        actual: value.len(),
    })
}

/// Build the quote body bytes for the given `mrenclave`, `mrsigner` and `payload`.
///
/// The measurements must be exactly [`MEASUREMENT_LENGTH`] bytes, the payload at most
/// [`REPORT_DATA_LENGTH`] bytes. A shorter payload is padded with zeros.
///
/// ```rust
/// # use mock_evidence::quote::*;
/// let body = build_quote_body(&[1; 32], &[2; 32], b"hello")?;
/// assert_eq!(body.len(), QUOTE_BODY_LENGTH);
/// assert_eq!(&body[REPORT_DATA_OFFSET..REPORT_DATA_OFFSET + 5], b"hello");
/// # Ok::<(), mock_evidence::EvidenceError>(())
/// ```
pub fn build_quote_body(
    mrenclave: &[u8],
    mrsigner: &[u8],
    payload: &[u8],
) -> Result<[u8; QUOTE_BODY_LENGTH], EvidenceError> {
    let mrenclave = measurement("mrenclave", mrenclave)?;
    let mrsigner = measurement("mrsigner", mrsigner)?;

    if payload.len() > REPORT_DATA_LENGTH {
        return Err(EvidenceError::PayloadTooLong {
            max: REPORT_DATA_LENGTH,
            actual: payload.len(),
        });
    }
    let reportdata = pad::<REPORT_DATA_LENGTH>("payload", payload)?;

    let body: [u8; QUOTE_BODY_LENGTH] =
        bytemuck::cast(QuoteBody::new(mrenclave, mrsigner, reportdata));

    if body[MRENCLAVE_OFFSET..MRENCLAVE_OFFSET + MEASUREMENT_LENGTH] != mrenclave {
        return Err(EvidenceError::Inconsistent("mrenclave"));
    }
    if body[MRSIGNER_OFFSET..MRSIGNER_OFFSET + MEASUREMENT_LENGTH] != mrsigner {
        return Err(EvidenceError::Inconsistent("mrsigner"));
    }
    if body[REPORT_DATA_OFFSET..REPORT_DATA_OFFSET + payload.len()] != *payload {
        return Err(EvidenceError::Inconsistent("payload"));
    }

    trace!(
        mrenclave = %hex::encode(mrenclave),
        mrsigner = %hex::encode(mrsigner),
        "built quote body"
    );

    Ok(body)
}
