use crate::adapters::{SequentialIdGenerator, StaticCaller, StaticCertificateParser};
use crate::domain::config::RegistryConfig;
use crate::domain::entities::{Issuer, Participant, Role};
use crate::domain::errors::IdentityError;
use crate::domain::requests::{IssuerCreateRequest, ParticipantCreateRequest, RoleCreateRequest};
use crate::domain::value_objects::IndexTag;
use crate::ports::inbound::{IssuerApi, ParticipantApi, RoleApi};
use crate::ports::outbound::ParsedCertificate;
use crate::service::{IdentityDependencies, IdentityService, Invocation};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use id_01_ledger_index::{
    create_composite_key, CompositeKey, InMemoryLedger, LedgerTransaction, SteppingTimeSource,
};
use std::collections::BTreeMap;

/// Timestamp of the first transaction a harness ledger stamps
/// (2023-11-14T22:13:20Z). Each later transaction is one second after.
pub const GENESIS_SECONDS: i64 = 1_700_000_000;

pub const ADMIN_ORG: &str = "Org1MSP";

fn at(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A base64 PEM blob and the fields a parser would extract from it, valid
/// 2020-01-01 to 2030-01-01.
pub fn certificate(common_name: &str) -> (String, ParsedCertificate) {
    certificate_valid_between(common_name, at(2020), at(2030))
}

/// Like `certificate`, but expired at the end of 2021.
pub fn expired_certificate(common_name: &str) -> (String, ParsedCertificate) {
    certificate_valid_between(common_name, at(2020), at(2022))
}

pub fn certificate_valid_between(
    common_name: &str,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
) -> (String, ParsedCertificate) {
    let pem = format!(
        "-----BEGIN CERTIFICATE-----\n{}\n-----END CERTIFICATE-----\n",
        STANDARD.encode(format!("{common_name}|{not_before}|{not_after}"))
    );
    let parsed = ParsedCertificate {
        common_name: common_name.to_string(),
        organization: vec!["Acme".to_string()],
        country: vec!["CU".to_string()],
        province: vec!["La Habana".to_string()],
        locality: vec!["Plaza".to_string()],
        organizational_unit: vec!["client".to_string()],
        not_before,
        not_after,
        attributes: BTreeMap::from([
            ("dni".to_string(), "90010112345".to_string()),
            ("position".to_string(), "Engineer".to_string()),
            ("hf.EnrollmentID".to_string(), common_name.to_lowercase()),
        ]),
    };
    (STANDARD.encode(pem), parsed)
}

pub type TestService = IdentityService<StaticCertificateParser, SequentialIdGenerator>;

pub type TestInvocation<'a> =
    Invocation<'a, LedgerTransaction, StaticCaller, StaticCertificateParser, SequentialIdGenerator>;

/// In-memory ledger, deterministic clock and IDs, and an admin caller.
pub struct RegistryHarness {
    pub ledger: InMemoryLedger,
    pub service: TestService,
    pub parser: StaticCertificateParser,
    pub admin: StaticCaller,
}

impl Default for RegistryHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryHarness {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let parser = StaticCertificateParser::new();
        let admin = StaticCaller::admin(ADMIN_ORG, &config);
        let service = IdentityService::with_dependencies(
            IdentityDependencies {
                certificates: parser.clone(),
                ids: SequentialIdGenerator::new("id-"),
            },
            config,
        );
        Self {
            ledger: InMemoryLedger::with_time_source(SteppingTimeSource::new(GENESIS_SECONDS, 1)),
            service,
            parser,
            admin,
        }
    }

    /// A fresh certificate registered with the harness parser.
    pub fn certificate(&self, common_name: &str) -> String {
        let (pem, parsed) = certificate(common_name);
        self.parser.insert(pem.clone(), parsed);
        pem
    }

    pub fn expired_certificate(&self, common_name: &str) -> String {
        let (pem, parsed) = expired_certificate(common_name);
        self.parser.insert(pem.clone(), parsed);
        pem
    }

    /// Run `f` in one committed transaction on behalf of `caller`.
    pub fn run_as<T, F>(&self, caller: &StaticCaller, f: F) -> Result<T, IdentityError>
    where
        F: FnOnce(&mut TestInvocation<'_>) -> Result<T, IdentityError>,
    {
        self.ledger.submit(|tx| {
            let mut invocation = self.service.invoke(tx, caller);
            f(&mut invocation)
        })
    }

    pub fn run<T, F>(&self, f: F) -> Result<T, IdentityError>
    where
        F: FnOnce(&mut TestInvocation<'_>) -> Result<T, IdentityError>,
    {
        self.run_as(&self.admin, f)
    }

    pub fn create_issuer(&self, name: &str, is_default: bool) -> Issuer {
        let cert = self.certificate(name);
        self.run(|api| {
            api.create_issuer(IssuerCreateRequest::new(cert).with_name(name).as_default(is_default))
        })
        .unwrap()
    }

    pub fn create_role(&self, name: &str, functions: &[&str]) -> Role {
        let request = RoleCreateRequest {
            name: name.to_string(),
            description: String::new(),
            functions: functions.iter().map(|f| f.to_string()).collect(),
        };
        self.run(|api| api.create_role(request)).unwrap()
    }

    /// Participant under the default issuer.
    pub fn create_participant(&self, did: &str, role_ids: &[&str]) -> Participant {
        let cert = self.certificate(did);
        self.run(|api| {
            api.create_participant(
                ParticipantCreateRequest::new(did, cert).with_roles(role_ids.iter().copied()),
            )
        })
        .unwrap()
    }

    /// Issuer IDs currently committed under the default-issuer index.
    pub fn default_index(&self) -> Vec<String> {
        self.index_attributes(IndexTag::IssuerByDefault, &[])
            .into_iter()
            .map(|mut attrs| attrs.remove(0))
            .collect()
    }

    /// Committed attribute lists under `(tag, leading)`.
    pub fn index_attributes(&self, tag: IndexTag, leading: &[&str]) -> Vec<Vec<String>> {
        let prefix = create_composite_key(tag.tag(), leading).unwrap();
        self.ledger
            .committed_keys(&prefix)
            .iter()
            .map(|key| CompositeKey::parse(key).unwrap().into_attributes())
            .collect()
    }
}
