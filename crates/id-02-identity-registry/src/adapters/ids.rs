//! Internal ID generators.

use crate::ports::outbound::IdGenerator;
use std::sync::atomic::{AtomicU64, Ordering};

/// Random UUIDv4 IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// `{prefix}{n}` with `n` counting up from 1. Deterministic, for tests and
/// replays.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuids_are_distinct() {
        let ids = UuidGenerator;
        let a = ids.generate();
        assert_ne!(a, ids.generate());
        assert_eq!(uuid::Uuid::parse_str(&a).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIdGenerator::new("p-");
        assert_eq!(ids.generate(), "p-1");
        assert_eq!(ids.generate(), "p-2");
    }
}
