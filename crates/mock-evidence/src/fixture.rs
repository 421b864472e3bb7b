// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Signed and ABI encoded mock evidence, ready to be passed to a contract via FFI.

use crate::{
    abi::{decode_bytes, encode_bytes},
    error::EvidenceError,
    evidence::{Evidence, EvidenceTemplate},
    quote::QuoteBody,
    sign::{verify_signature, RS256PrivateKey},
};
use rsa::RsaPublicKey;
use tracing::{debug, info};

/// Mock evidence together with its signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// The evidence
    pub evidence: Evidence,
    /// Signature over [`Evidence::signing_bytes`]
    pub signature: Vec<u8>,
    /// The ABI encoded [`Evidence::field_values`]
    pub values: Vec<u8>,
}

impl Fixture {
    /// Mock evidence for `mrenclave`, `mrsigner` and `payload`, and sign it with `key`.
    pub fn generate(
        template: &EvidenceTemplate,
        mrenclave: &[u8],
        mrsigner: &[u8],
        payload: &[u8],
        key: &RS256PrivateKey,
    ) -> Result<Self, EvidenceError> {
        let evidence = Evidence::mock(template, mrenclave, mrsigner, payload)?;

        let message = evidence.signing_bytes()?;
        debug!(len = message.len(), "signing evidence");
        let signature = key.sign(&message)?;

        let values = evidence.field_values()?;
        let values = encode_bytes(&values.iter().map(Vec::as_slice).collect::<Vec<_>>());

        info!(
            signature_len = signature.len(),
            values_len = values.len(),
            "generated fixture"
        );

        Ok(Self {
            evidence,
            signature,
            values,
        })
    }

    /// ABI encoding of the `(bytes signature, bytes values)` tuple
    pub fn encode(&self) -> Vec<u8> {
        encode_bytes(&[self.signature.as_slice(), self.values.as_slice()])
    }

    /// Hex encoding of [`Fixture::encode`], without `0x` prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    /// Decode an encoded fixture and check it against `public_key`.
    ///
    /// The field values must reconstruct the signed JSON, and the embedded quote body
    /// must carry the expected measurements and payload.
    pub fn check(
        encoded: &[u8],
        public_key: &RsaPublicKey,
        mrenclave: &[u8],
        mrsigner: &[u8],
        payload: &[u8],
    ) -> Result<Evidence, EvidenceError> {
        let [signature, values]: [Vec<u8>; 2] = decode_bytes(encoded, 2)?
            .try_into()
            .map_err(|_| EvidenceError::Inconsistent("fixture"))?;

        let fields = decode_bytes(&values, Evidence::FIELD_COUNT)?;
        let evidence = evidence_from_fields(fields)?;

        verify_signature(public_key, &evidence.signing_bytes()?, &signature)?;

        let quote_body = evidence.quote_body()?;
        let quote = QuoteBody::try_from_bytes(&quote_body)?;
        if quote.mrenclave().as_slice() != mrenclave {
            return Err(EvidenceError::Inconsistent("mrenclave"));
        }
        if quote.mrsigner().as_slice() != mrsigner {
            return Err(EvidenceError::Inconsistent("mrsigner"));
        }
        let report_data = quote.report_data();
        let consistent = report_data.get(..payload.len()) == Some(payload)
            && report_data[payload.len()..].iter().all(|&b| b == 0);
        if !consistent {
            return Err(EvidenceError::Inconsistent("payload"));
        }

        debug!("fixture checked");
        Ok(evidence)
    }
}

fn evidence_from_fields(fields: Vec<Vec<u8>>) -> Result<Evidence, EvidenceError> {
    let fields: [Vec<u8>; Evidence::FIELD_COUNT] = fields
        .try_into()
        .map_err(|_| EvidenceError::Inconsistent("evidence fields"))?;
    let [id, timestamp, version, epid_pseudonym, advisory_url, advisory_ids, status, body] = fields;

    let string = |field: &'static str, bytes: Vec<u8>| {
        String::from_utf8(bytes).map_err(|_| EvidenceError::Inconsistent(field))
    };

    Ok(Evidence {
        id: string("id", id)?,
        timestamp: string("timestamp", timestamp)?,
        version: serde_json::from_slice(&version)?,
        epid_pseudonym: string("epidPseudonym", epid_pseudonym)?,
        advisory_url: string("advisoryURL", advisory_url)?,
        advisory_ids: serde_json::from_slice(&advisory_ids)?,
        isv_enclave_quote_status: string("isvEnclaveQuoteStatus", status)?,
        isv_enclave_quote_body: string("isvEnclaveQuoteBody", body)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = include_str!("../tests/data/test-key.pem");

    #[test]
    fn generate_and_check() {
        let key = RS256PrivateKey::from_pem(TEST_KEY).unwrap();
        let fixture = Fixture::generate(
            &EvidenceTemplate::default(),
            &[0xaa; 32],
            &[0xbb; 32],
            b"report data",
            &key,
        )
        .unwrap();

        let encoded = fixture.encode();
        let evidence =
            Fixture::check(&encoded, &key.public_key(), &[0xaa; 32], &[0xbb; 32], b"report data")
                .unwrap();
        assert_eq!(evidence, fixture.evidence);
        assert_eq!(fixture.to_hex(), hex::encode(&encoded));
    }

    #[test]
    fn check_detects_wrong_measurement() {
        let key = RS256PrivateKey::from_pem(TEST_KEY).unwrap();
        let fixture = Fixture::generate(
            &EvidenceTemplate::default(),
            &[0xaa; 32],
            &[0xbb; 32],
            &[],
            &key,
        )
        .unwrap();

        assert!(matches!(
            Fixture::check(&fixture.encode(), &key.public_key(), &[0xab; 32], &[0xbb; 32], &[]),
            Err(EvidenceError::Inconsistent("mrenclave"))
        ));
    }

    #[test]
    fn check_detects_wrong_payload() {
        let key = RS256PrivateKey::from_pem(TEST_KEY).unwrap();
        let fixture = Fixture::generate(
            &EvidenceTemplate::default(),
            &[0xaa; 32],
            &[0xbb; 32],
            b"report data",
            &key,
        )
        .unwrap();
        let encoded = fixture.encode();

        // a prefix of the report data is not the payload
        assert!(matches!(
            Fixture::check(&encoded, &key.public_key(), &[0xaa; 32], &[0xbb; 32], &[]),
            Err(EvidenceError::Inconsistent("payload"))
        ));
        assert!(matches!(
            Fixture::check(&encoded, &key.public_key(), &[0xaa; 32], &[0xbb; 32], b"report"),
            Err(EvidenceError::Inconsistent("payload"))
        ));
        assert!(matches!(
            Fixture::check(&encoded, &key.public_key(), &[0xaa; 32], &[0xbb; 32], &[0x11; 65]),
            Err(EvidenceError::Inconsistent("payload"))
        ));
    }

    #[test]
    fn check_detects_tampered_values() {
        let key = RS256PrivateKey::from_pem(TEST_KEY).unwrap();
        let mut fixture = Fixture::generate(
            &EvidenceTemplate::default(),
            &[0xaa; 32],
            &[0xbb; 32],
            &[],
            &key,
        )
        .unwrap();

        fixture.evidence.isv_enclave_quote_status = "GROUP_REVOKED".into();
        let values = fixture.evidence.field_values().unwrap();
        fixture.values = encode_bytes(&values.iter().map(Vec::as_slice).collect::<Vec<_>>());

        assert!(matches!(
            Fixture::check(&fixture.encode(), &key.public_key(), &[0xaa; 32], &[0xbb; 32], &[]),
            Err(EvidenceError::Verification(_))
        ));
    }
}
