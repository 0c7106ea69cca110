//! DID syntax check.
//!
//! Accepted form: `<prefix><method-specific-id>`, with the id built from
//! ASCII letters, digits and `. _ : % -`, not ending in `:`.

use super::errors::IdentityError;

pub fn validate_did(did: &str, prefix: &str) -> Result<(), IdentityError> {
    let invalid = |reason: &str| IdentityError::InvalidDid {
        did: did.to_string(),
        reason: reason.to_string(),
    };

    let specific = did
        .strip_prefix(prefix)
        .ok_or_else(|| invalid(&format!("must start with {prefix:?}")))?;
    if specific.is_empty() {
        return Err(invalid("method-specific identifier is empty"));
    }
    if specific.ends_with(':') {
        return Err(invalid("must not end with ':'"));
    }
    if let Some(c) = specific
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '%' | '-')))
    {
        return Err(invalid(&format!("character {c:?} is not allowed")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_dids() {
        for did in ["did:abc", "did:example:123456", "did:ic:9f86d081884c7d65", "did:a.b_c-d%20"] {
            assert!(validate_did(did, "did:").is_ok(), "{did}");
        }
    }

    #[test]
    fn test_rejects_malformed_dids() {
        for did in ["", "abc", "did:", "did:abc:", "did:a b", "did:ñ", "DID:abc", "did:a\u{0000}"] {
            assert!(
                matches!(validate_did(did, "did:"), Err(IdentityError::InvalidDid { .. })),
                "{did:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_custom_prefix() {
        assert!(validate_did("did:ic:1", "did:ic:").is_ok());
        assert!(validate_did("did:web:1", "did:ic:").is_err());
    }
}
