// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Mock Intel Attestation Service (IAS) attestation verification report.

use crate::{error::EvidenceError, quote::build_quote_body};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_with::{formats::CommaSeparator, serde_as, PickFirst, StringWithSeparator};
use tracing::debug;

/// Static fields of the mock evidence, i.e. everything but the quote body.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceTemplate {
    /// Report id
    pub id: String,
    /// Report timestamp, as IAS formats it (UTC, no zone suffix)
    pub timestamp: String,
    /// API version of the report
    pub version: u32,
    /// Base64 encoded EPID pseudonym
    pub epid_pseudonym: String,
    /// Advisory URL
    pub advisory_url: String,
    /// Advisory IDs applying to the platform, a list or a comma separated string
    #[serde_as(as = "PickFirst<(_, StringWithSeparator::<CommaSeparator, String>)>")]
    pub advisory_ids: Vec<String>,
    /// Quote status, e.g. `OK` or `GROUP_OUT_OF_DATE`
    pub quote_status: String,
}

impl Default for EvidenceTemplate {
    fn default() -> Self {
        Self {
            id: "142090828149453720542199954221331392599".into(),
            timestamp: "2023-02-15T01:24:57.989456".into(),
            version: 4,
            epid_pseudonym: concat!(
                "EbrM6X6YCH3brjPXT23gVh/I2EG5sVfHYh+S54fb0rrAqVRTiRTOSfLsWSVTZc8wrazGG7oooGoMU7Gj5T",
                "EhsvsDIV4aYpvkSk/E3Tsb7CaGd+Iy1cEhLO4GPwdmwt/PXNQQ3htLdy3aNb7iQMrNbiFcdkVdV/tepd",
                "ezMsSB8Go="
            )
            .into(),
            advisory_url: "https://security-center.intel.com".into(),
            advisory_ids: vec!["INTEL-SA-00334".into(), "INTEL-SA-00615".into()],
            quote_status: "OK".into(),
        }
    }
}

/// The attestation verification report.
///
/// Field order is significant: it defines both the signed JSON and the order of the
/// ABI encoded values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    /// Report id
    pub id: String,
    /// Report timestamp
    pub timestamp: String,
    /// API version of the report
    pub version: u32,
    /// Base64 encoded EPID pseudonym
    pub epid_pseudonym: String,
    /// Advisory URL
    #[serde(rename = "advisoryURL")]
    pub advisory_url: String,
    /// Advisory IDs
    #[serde(rename = "advisoryIDs")]
    pub advisory_ids: Vec<String>,
    /// Quote status
    pub isv_enclave_quote_status: String,
    /// Base64 encoded quote body
    pub isv_enclave_quote_body: String,
}

impl Evidence {
    /// Number of fields of the report
    pub const FIELD_COUNT: usize = 8;

    /// Build mock evidence for a quote body carrying `mrenclave`, `mrsigner` and `payload`.
    pub fn mock(
        template: &EvidenceTemplate,
        mrenclave: &[u8],
        mrsigner: &[u8],
        payload: &[u8],
    ) -> Result<Self, EvidenceError> {
        let quote_body = build_quote_body(mrenclave, mrsigner, payload)?;

        debug!(id = %template.id, "mocking evidence");

        Ok(Self {
            id: template.id.clone(),
            timestamp: template.timestamp.clone(),
            version: template.version,
            epid_pseudonym: template.epid_pseudonym.clone(),
            advisory_url: template.advisory_url.clone(),
            advisory_ids: template.advisory_ids.clone(),
            isv_enclave_quote_status: template.quote_status.clone(),
            isv_enclave_quote_body: STANDARD.encode(quote_body),
        })
    }

    /// The decoded quote body
    pub fn quote_body(&self) -> Result<Vec<u8>, EvidenceError> {
        Ok(STANDARD.decode(&self.isv_enclave_quote_body)?)
    }

    /// The compact JSON serialization of the report, the message to sign.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, EvidenceError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// The report fields as byte strings, in field order.
    ///
    /// Strings are taken verbatim, all other values as compact JSON.
    pub fn field_values(&self) -> Result<Vec<Vec<u8>>, EvidenceError> {
        Ok(vec![
            self.id.as_bytes().to_vec(),
            self.timestamp.as_bytes().to_vec(),
            serde_json::to_vec(&self.version)?,
            self.epid_pseudonym.as_bytes().to_vec(),
            self.advisory_url.as_bytes().to_vec(),
            serde_json::to_vec(&self.advisory_ids)?,
            self.isv_enclave_quote_status.as_bytes().to_vec(),
            self.isv_enclave_quote_body.as_bytes().to_vec(),
        ])
    }
}
