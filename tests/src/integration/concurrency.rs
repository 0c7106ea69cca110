//! # Concurrency
//!
//! Invocations that overlap on the same ledger state. The registry takes no
//! locks; the ledger rejects the later commit and the caller retries the
//! whole invocation.
//!
//! 1. Two default-issuer claims from the same snapshot: one commits, one conflicts
//! 2. Two creations of the same DID: one commits, the retry sees `AlreadyExists`
//! 3. Many racing claims on worker threads still leave one default

#[cfg(test)]
mod tests {
    use id_02_identity_registry::prelude::*;
    use id_02_identity_registry::test_utils::{RegistryHarness, TestInvocation};
    use std::sync::Arc;

    /// Rerun `f` in fresh transactions until it does not hit a commit conflict.
    fn submit_with_retry<T, F>(harness: &RegistryHarness, f: F) -> Result<T, IdentityError>
    where
        F: Fn(&mut TestInvocation<'_>) -> Result<T, IdentityError>,
    {
        loop {
            match harness.run(&f) {
                Err(err) if err.is_retryable() => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn test_concurrent_default_claims_conflict() {
        let harness = RegistryHarness::new();
        let genesis = harness.create_issuer("Genesis", true);
        let cert_a = harness.certificate("Issuer A");
        let cert_b = harness.certificate("Issuer B");

        let mut tx_a = harness.ledger.begin();
        let mut tx_b = harness.ledger.begin();
        let a = harness
            .service
            .invoke(&mut tx_a, &harness.admin)
            .create_issuer(IssuerCreateRequest::new(cert_a).as_default(true))
            .unwrap();
        harness
            .service
            .invoke(&mut tx_b, &harness.admin)
            .create_issuer(IssuerCreateRequest::new(cert_b.clone()).as_default(true))
            .unwrap();

        tx_a.commit().unwrap();
        let err = IdentityError::from(tx_b.commit().unwrap_err());
        assert!(err.is_retryable());
        assert_eq!(harness.default_index(), vec![a.id.clone()]);

        let b = submit_with_retry(&harness, |api| {
            api.create_issuer(IssuerCreateRequest::new(cert_b.clone()).as_default(true))
        })
        .unwrap();
        assert_eq!(harness.default_index(), vec![b.id]);

        let issuers = harness.run(|api| api.get_issuers()).unwrap();
        assert_eq!(issuers.iter().filter(|i| i.is_default).count(), 1);
        assert!(issuers.iter().any(|i| i.id == genesis.id && !i.is_default));
    }

    #[test]
    fn test_concurrent_did_registration_conflicts() {
        let harness = RegistryHarness::new();
        harness.create_issuer("Root CA", true);
        let cert_a = harness.certificate("holder A");
        let cert_b = harness.certificate("holder B");

        let mut tx_a = harness.ledger.begin();
        let mut tx_b = harness.ledger.begin();
        let winner = harness
            .service
            .invoke(&mut tx_a, &harness.admin)
            .create_participant(ParticipantCreateRequest::new("did:race", cert_a))
            .unwrap();
        harness
            .service
            .invoke(&mut tx_b, &harness.admin)
            .create_participant(ParticipantCreateRequest::new("did:race", cert_b.clone()))
            .unwrap();

        tx_a.commit().unwrap();
        assert!(tx_b.commit().is_err());

        let retry = submit_with_retry(&harness, |api| {
            api.create_participant(ParticipantCreateRequest::new("did:race", cert_b.clone()))
        });
        assert!(matches!(retry, Err(IdentityError::AlreadyExists { .. })));
        assert_eq!(harness.run(|api| api.resolve_did("did:race")).unwrap(), winner.id);
    }

    #[test]
    fn test_read_only_invocations_do_not_conflict() {
        let harness = RegistryHarness::new();
        harness.create_issuer("Root CA", true);

        let reader = harness.ledger.begin();
        let mut writer = harness.ledger.begin();
        let cert = harness.certificate("Issuer B");
        harness
            .service
            .invoke(&mut writer, &harness.admin)
            .create_issuer(IssuerCreateRequest::new(cert))
            .unwrap();
        writer.commit().unwrap();

        // Nothing was read, so an empty commit goes through.
        reader.commit().unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_default_claims_leave_one_default() {
        let harness = Arc::new(RegistryHarness::new());
        harness.create_issuer("Genesis", true);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let harness = Arc::clone(&harness);
                let cert = harness.certificate(&format!("Issuer {i}"));
                tokio::task::spawn_blocking(move || {
                    submit_with_retry(&harness, |api| {
                        api.create_issuer(IssuerCreateRequest::new(cert.clone()).as_default(i % 2 == 0))
                    })
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(harness.default_index().len(), 1);
        let issuers = harness.run(|api| api.get_issuers()).unwrap();
        assert_eq!(issuers.len(), 9);
        let defaults: Vec<_> = issuers.iter().filter(|i| i.is_default).map(|i| i.id.clone()).collect();
        assert_eq!(defaults, harness.default_index());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_registrations_of_one_did() {
        let harness = Arc::new(RegistryHarness::new());
        harness.create_issuer("Root CA", true);

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let harness = Arc::clone(&harness);
                let cert = harness.certificate(&format!("holder {i}"));
                tokio::task::spawn_blocking(move || {
                    submit_with_retry(&harness, |api| {
                        api.create_participant(ParticipantCreateRequest::new("did:shared", cert.clone()))
                    })
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert!(matches!(err, IdentityError::AlreadyExists { .. })),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(harness.run(|api| api.get_participants()).unwrap().len(), 1);
    }
}
