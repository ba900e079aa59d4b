//! Canonical certificate encoding and hashing

use carbon_types::Certificate;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Compact JSON with fields in declaration order.
pub fn canonical_json(certificate: &Certificate) -> Result<String> {
    Ok(serde_json::to_string(certificate)?)
}

/// Hex SHA-256 of the canonical encoding.
pub fn certificate_hash(certificate: &Certificate) -> Result<String> {
    let encoded = canonical_json(certificate)?;
    let mut hasher = Sha256::new();
    hasher.update(encoded.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_types::CertificateId;
    use chrono::{TimeZone, Utc};

    fn certificate() -> Certificate {
        Certificate {
            certificate_id: CertificateId::new(2025, 1),
            facility_id: "PLANT-1".into(),
            carbon_credits: 5.0,
            emission_reduction_tons: 5.0,
            total_emissions_tons: 45.0,
            baseline_emissions_tons: 50.0,
            generated_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn hash_is_deterministic_hex() {
        let a = certificate_hash(&certificate()).unwrap();
        let b = certificate_hash(&certificate()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn any_field_change_changes_hash() {
        let original = certificate_hash(&certificate()).unwrap();

        let mut altered = certificate();
        altered.carbon_credits = 5.01;
        assert_ne!(original, certificate_hash(&altered).unwrap());

        let mut altered = certificate();
        altered.facility_id = "PLANT-2".into();
        assert_ne!(original, certificate_hash(&altered).unwrap());
    }
}
