//! # Registry Scenarios
//!
//! Properties of the registry observed through committed ledger state only.
//!
//! 1. Composite keys round-trip and keep the prefix property
//! 2. Exactly one default issuer once any issuer exists
//! 3. DID uniqueness and resolution
//! 4. Deletion leaves a tombstone naming the deleting caller
//! 5. Pagination walks 5 records in pages of 2

#[cfg(test)]
mod tests {
    use id_01_ledger_index::{
        create_composite_key, split_composite_key, split_composite_key_expecting, LedgerStore,
    };
    use id_02_identity_registry::prelude::*;
    use id_02_identity_registry::test_utils::RegistryHarness;
    use id_02_identity_registry::{IndexTag, Tombstone};

    // =============================================================================
    // KEY CODEC
    // =============================================================================

    #[test]
    fn test_key_round_trip_for_every_tag() {
        let tags = [
            "did.participant",
            "did.role",
            "did.access",
            "did.issuer",
            IndexTag::ParticipantByDid.tag(),
            IndexTag::IssuerByDefault.tag(),
            IndexTag::ParticipantDeleted.tag(),
        ];
        let attribute_lists: [&[&str]; 4] = [
            &[],
            &["did:abc"],
            &["did:abc", "5f0c8e58-1d2b-4c4a-9a57-3d1c1a4f2b10"],
            &["", "ñandú", "a b c"],
        ];
        for tag in tags {
            for attrs in attribute_lists {
                let key = create_composite_key(tag, attrs).unwrap();
                let (decoded_tag, decoded) = split_composite_key(&key).unwrap();
                assert_eq!(decoded_tag, tag);
                assert_eq!(decoded, attrs);
                assert_eq!(
                    split_composite_key_expecting(&key, attrs.len()).unwrap(),
                    attrs
                );
            }
        }
    }

    #[test]
    fn test_prefix_property() {
        let tag = IndexTag::ParticipantByDid.tag();
        for (a, b) in [("did:abc", "1"), ("did:x", "did:y"), ("", "z")] {
            let short = create_composite_key(tag, &[a]).unwrap();
            let long = create_composite_key(tag, &[a, b]).unwrap();
            assert!(long.starts_with(&short));
        }
        let abc = create_composite_key(tag, &["did:abc"]).unwrap();
        let abcd = create_composite_key(tag, &["did:abcd", "1"]).unwrap();
        assert!(!abcd.starts_with(&abc));
    }

    // =============================================================================
    // DEFAULT ISSUER
    // =============================================================================

    #[test]
    fn test_issuer_abc_scenario() {
        let harness = RegistryHarness::new();

        let a = harness.create_issuer("Issuer A", true);
        assert_eq!(harness.default_index(), vec![a.id.clone()]);

        let b = harness.create_issuer("Issuer B", true);
        assert_eq!(harness.default_index(), vec![b.id.clone()]);
        let stored_a = harness.run(|api| api.get_issuer(&a.id)).unwrap();
        assert!(!stored_a.is_default);

        harness.create_issuer("Issuer C", false);
        assert_eq!(harness.default_index(), vec![b.id]);
    }

    #[test]
    fn test_default_singleton_over_mixed_sequence() {
        let harness = RegistryHarness::new();
        assert!(harness.default_index().is_empty());

        let flags = [false, false, true, false, true, true, false];
        for (i, wants_default) in flags.into_iter().enumerate() {
            harness.create_issuer(&format!("Issuer {i}"), wants_default);
            assert_eq!(harness.default_index().len(), 1, "after issuer {i}");

            let defaults: Vec<_> = harness
                .run(|api| api.get_issuers())
                .unwrap()
                .into_iter()
                .filter(|issuer| issuer.is_default)
                .map(|issuer| issuer.id)
                .collect();
            assert_eq!(defaults, harness.default_index());
        }
    }

    // =============================================================================
    // PARTICIPANTS
    // =============================================================================

    #[test]
    fn test_did_uniqueness() {
        let harness = RegistryHarness::new();
        harness.create_issuer("Root CA", true);
        let first = harness.create_participant("did:abc", &[]);

        let cert = harness.certificate("second holder");
        let err = harness
            .run(|api| api.create_participant(ParticipantCreateRequest::new("did:abc", cert)))
            .unwrap_err();
        assert!(matches!(err, IdentityError::AlreadyExists { .. }));

        assert_eq!(harness.run(|api| api.resolve_did("did:abc")).unwrap(), first.id);
        assert_eq!(
            harness.index_attributes(IndexTag::ParticipantByDid, &["did:abc"]),
            vec![vec!["did:abc".to_string(), first.id.clone()]]
        );
        let record = harness.run(|api| api.get_participant_record("did:abc")).unwrap();
        assert_eq!(record, first);
    }

    #[test]
    fn test_delete_leaves_tombstone() {
        let harness = RegistryHarness::new();
        harness.create_issuer("Root CA", true);
        let target = harness.create_participant("did:abc", &[]);
        let operator = harness.create_participant("did:operator", &[]);

        harness
            .run(|api| {
                api.delete_participant(ParticipantDeleteRequest {
                    did: "did:abc".into(),
                    caller_did: "did:operator".into(),
                })
            })
            .unwrap();

        let err = harness.run(|api| api.resolve_did("did:abc")).unwrap_err();
        assert!(matches!(err, IdentityError::NotFound { .. }));

        let tombstones = harness.index_attributes(IndexTag::ParticipantDeleted, &["did:abc"]);
        assert_eq!(tombstones, vec![vec!["did:abc".to_string(), target.id.clone()]]);

        let key = create_composite_key(
            IndexTag::ParticipantDeleted.tag(),
            &["did:abc", target.id.as_str()],
        )
        .unwrap();
        let stored = harness.ledger.begin().get(&key).unwrap().unwrap();
        let tombstone: Tombstone = serde_json::from_slice(&stored).unwrap();
        assert_eq!(tombstone.deleting_caller_id, operator.id);
    }

    // =============================================================================
    // PAGINATION
    // =============================================================================

    #[test]
    fn test_pagination_five_by_two() {
        let harness = RegistryHarness::new();
        for i in 0..5 {
            harness.create_role(&format!("role {i}"), &["GetRole"]);
        }
        let query = serde_json::json!({"selector": {"docType": "did.role"}});

        let first = harness
            .run(|api| api.query_assets_page(query.clone(), PageRequest::first(2)))
            .unwrap();
        assert_eq!(first.records.len(), 2);
        assert!(!first.bookmark.is_empty());

        let second = harness
            .run(|api| api.query_assets_page(query.clone(), PageRequest::after(2, first.bookmark.clone())))
            .unwrap();
        assert_eq!(second.records.len(), 2);
        assert_ne!(second.records[0], first.records[0]);

        let last = harness
            .run(|api| api.query_assets_page(query.clone(), PageRequest::after(2, second.bookmark.clone())))
            .unwrap();
        assert_eq!(last.records.len(), 1);
        assert!(last.bookmark.is_empty());
    }
}
