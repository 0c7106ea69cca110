//! # Integration Test Flows
//!
//! A participant's whole life on one ledger, driven through the public API
//! traits exactly as a contract host would drive them.
//!
//! ## Flow Tested:
//!
//! 1. **InitLedger**: access list for the contract's own functions
//! 2. **Issuer → Role → Participant**: onboarding under the default issuer
//! 3. **CheckFunctionAccess**: allowed, denied, then denied after disarm
//! 4. **DeleteParticipant**: tombstone, history, DID reuse
//!
//! Logging is installed once here; every registry call below emits through it.

#[cfg(test)]
mod tests {
    use anyhow::Context;
    use id_02_identity_registry::prelude::*;
    use id_02_identity_registry::test_utils::{RegistryHarness, ADMIN_ORG};
    use id_02_identity_registry::{transactions, StaticCaller};
    use identity_telemetry::{init_logging, TelemetryConfig};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn access(did: &str, function: &str) -> FunctionAccessRequest {
        FunctionAccessRequest {
            did: did.to_string(),
            function: function.to_string(),
        }
    }

    // =============================================================================
    // PARTICIPANT LIFECYCLE
    // =============================================================================

    #[test]
    fn test_participant_lifecycle() -> anyhow::Result<()> {
        let harness = RegistryHarness::new();

        let contract = harness.run(|api| api.init_ledger())?;
        assert_eq!(contract.function_set.len(), transactions().len());

        let issuer = harness.create_issuer("Root CA", true);
        let default = harness.run(|api| api.get_default_issuer())?;
        assert_eq!(default.id, issuer.id);

        let reader = harness.create_role("reader", &["GetParticipant", "org.identity:GetRole"]);
        let alice = harness.create_participant("did:alice", &[reader.id.as_str()]);
        assert_eq!(alice.issuer_id, issuer.id);

        harness
            .run(|api| api.check_function_access(access("did:alice", "GetParticipant")))
            .context("reader may call GetParticipant")?;
        harness
            .run(|api| api.check_function_access(access("did:alice", "GetRole")))
            .context("qualified grant covers the bare name")?;
        let denied = harness.run(|api| api.check_function_access(access("did:alice", "DeleteRole")));
        assert!(matches!(denied, Err(IdentityError::Unauthorized { .. })));

        let disarmed = harness.run(|api| api.disarm_participant("did:alice"))?;
        assert!(!disarmed.active);
        let denied = harness.run(|api| api.check_function_access(access("did:alice", "GetParticipant")));
        assert!(matches!(denied, Err(IdentityError::Unauthorized { .. })));

        let tombstone = harness.run(|api| {
            api.delete_participant(ParticipantDeleteRequest {
                did: "did:alice".into(),
                caller_did: "did:alice".into(),
            })
        })?;
        assert_eq!(tombstone.deleting_caller_id, alice.id);
        assert_eq!(tombstone.owner_org_id, ADMIN_ORG);
        assert!(!harness.run(|api| api.participant_exists("did:alice"))?);

        let history = harness.run(|api| api.get_participant_history("did:alice"))?;
        assert_eq!(history.len(), 3);
        assert!(history[0].record.active);
        assert!(!history[1].record.active);
        assert!(history[2].is_delete);
        assert_eq!(history[2].record.did, "did:alice");

        let again = harness.create_participant("did:alice", &[]);
        assert_ne!(again.id, alice.id);
        assert_eq!(harness.run(|api| api.resolve_did("did:alice"))?, again.id);
        assert_eq!(harness.run(|api| api.get_tombstones("did:alice"))?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_member_caller_reads_but_cannot_administer() -> anyhow::Result<()> {
        let harness = RegistryHarness::new();
        harness.create_issuer("Root CA", true);
        harness.create_participant("did:alice", &[]);
        let member = StaticCaller::member(ADMIN_ORG);

        let public = harness.run_as(&member, |api| api.get_participant("did:alice"))?;
        assert_eq!(public.did, "did:alice");

        let record = harness.run_as(&member, |api| api.get_participant_record("did:alice"));
        assert!(matches!(record, Err(IdentityError::Unauthorized { .. })));

        let disarm = harness.run_as(&member, |api| api.disarm_participant("did:alice"));
        assert!(matches!(disarm, Err(IdentityError::Unauthorized { .. })));
        assert!(harness.run(|api| api.get_participant_record("did:alice"))?.active);
        Ok(())
    }

    #[test]
    fn test_failed_invocation_leaves_no_trace() {
        let harness = RegistryHarness::new();
        harness.create_issuer("Root CA", true);
        let height = harness.ledger.height();

        let cert = harness.certificate("holder");
        let result = harness.run(|api| {
            api.create_participant(
                ParticipantCreateRequest::new("did:alice", cert).with_roles(["missing-role"]),
            )
        });

        assert!(matches!(result, Err(IdentityError::NotFound { .. })));
        assert_eq!(harness.ledger.height(), height);
        assert!(!harness.run(|api| api.participant_exists("did:alice")).unwrap());
    }

    // =============================================================================
    // LOGGING
    // =============================================================================

    #[test]
    fn test_logging_installs_once() {
        let config = TelemetryConfig::default().with_log_level("id_02_identity_registry=debug,warn");
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_err());

        let harness = RegistryHarness::new();
        harness.create_issuer("Root CA", true);
        assert_eq!(harness.default_index().len(), 1);
    }
}
