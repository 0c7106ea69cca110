use super::transaction::{LedgerTransaction, ReadSet};
use crate::adapters::time::SystemTimeSource;
use crate::domain::config::LedgerConfig;
use crate::domain::entities::{HistoryEntry, TxTimestamp};
use crate::domain::errors::LedgerError;
use crate::ports::outbound::TimeSource;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Keys written by one committed transaction.
#[derive(Debug)]
struct CommitRecord {
    height: u64,
    keys: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct LedgerState {
    entries: BTreeMap<String, Vec<u8>>,
    history: HashMap<String, Vec<HistoryEntry>>,
    /// Commits newer than the oldest open snapshot. Older ones can no longer
    /// conflict with anything and are pruned.
    commits: Vec<CommitRecord>,
    /// Snapshot height of every open transaction, with a count per height.
    open_snapshots: BTreeMap<u64, usize>,
    /// Number of committed write transactions.
    height: u64,
    next_tx: u64,
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    pub tx_id: String,
    /// Ledger height after the commit. Unchanged for read-only transactions.
    pub height: u64,
    pub writes: usize,
}

/// Shared handle to an in-memory ledger. Cloning is cheap and every clone
/// sees the same state.
#[derive(Clone)]
pub struct InMemoryLedger {
    state: Arc<RwLock<LedgerState>>,
    time_source: Arc<dyn TimeSource>,
    config: LedgerConfig,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("InMemoryLedger")
            .field("height", &state.height)
            .field("keys", &state.entries.len())
            .finish()
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::with_time_source(SystemTimeSource)
    }

    pub fn with_time_source(time_source: impl TimeSource + 'static) -> Self {
        Self {
            state: Arc::new(RwLock::new(LedgerState::default())),
            time_source: Arc::new(time_source),
            config: LedgerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Open a transaction against the current committed state.
    pub fn begin(&self) -> LedgerTransaction {
        let (tx_number, snapshot_height) = {
            let mut guard = self.state.write();
            let state = &mut *guard;
            state.next_tx += 1;
            *state.open_snapshots.entry(state.height).or_default() += 1;
            (state.next_tx, state.height)
        };
        let tx_id = format!("{}{:08}", self.config.tx_id_prefix, tx_number);
        LedgerTransaction::new(self.clone(), tx_id, self.time_source.now(), snapshot_height)
    }

    /// Run `invocation` in a fresh transaction. Commits when it returns `Ok`,
    /// discards every buffered write when it returns `Err`.
    pub fn submit<T, E, F>(&self, invocation: F) -> Result<T, E>
    where
        F: FnOnce(&mut LedgerTransaction) -> Result<T, E>,
        E: From<LedgerError>,
    {
        let mut tx = self.begin();
        let output = invocation(&mut tx)?;
        tx.commit()?;
        Ok(output)
    }

    /// Number of committed write transactions.
    pub fn height(&self) -> u64 {
        self.state.read().height
    }

    /// Committed value of `key`, bypassing transactions.
    pub fn committed(&self, key: &str) -> Option<Vec<u8>> {
        self.state.read().entries.get(key).cloned()
    }

    /// Committed keys starting with `prefix`, bypassing transactions.
    pub fn committed_keys(&self, prefix: &str) -> Vec<String> {
        self.state
            .read()
            .entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub(super) fn read_committed(&self, key: &str) -> Option<Vec<u8>> {
        self.committed(key)
    }

    /// Committed entries with keys in `[start, ..)` that begin with `prefix`.
    pub(super) fn committed_range(&self, start: &str, prefix: &str) -> BTreeMap<String, Vec<u8>> {
        self.state
            .read()
            .entries
            .range(start.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub(super) fn committed_history(&self, key: &str) -> Vec<HistoryEntry> {
        self.state
            .read()
            .history
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Forget one open transaction at `snapshot_height` and drop the commit
    /// records no open transaction can conflict with anymore.
    pub(super) fn release_snapshot(&self, snapshot_height: u64) {
        let mut guard = self.state.write();
        let state = &mut *guard;
        if let Some(count) = state.open_snapshots.get_mut(&snapshot_height) {
            *count -= 1;
            if *count == 0 {
                state.open_snapshots.remove(&snapshot_height);
            }
        }
        let floor = state
            .open_snapshots
            .keys()
            .next()
            .copied()
            .unwrap_or(state.height);
        state.commits.retain(|record| record.height > floor);
    }

    /// Commit records still kept for conflict detection.
    pub(super) fn retained_commits(&self) -> usize {
        self.state.read().commits.len()
    }

    /// Validate the read set against everything committed since
    /// `snapshot_height`, then apply `writes` atomically.
    pub(super) fn apply(
        &self,
        tx_id: String,
        timestamp: TxTimestamp,
        snapshot_height: u64,
        reads: &ReadSet,
        writes: BTreeMap<String, Option<Vec<u8>>>,
    ) -> Result<CommitReceipt, LedgerError> {
        let mut state = self.state.write();

        for record in state.commits.iter().filter(|c| c.height > snapshot_height) {
            if let Some(key) = record.keys.iter().find(|k| reads.covers(k)) {
                #[cfg(feature = "tracing-log")]
                tracing::warn!(tx_id = %tx_id, key = ?key, "[id-01] commit rejected: read set is stale");
                return Err(LedgerError::ConflictOnCommit { key: key.clone() });
            }
        }

        if writes.is_empty() {
            return Ok(CommitReceipt {
                tx_id,
                height: state.height,
                writes: 0,
            });
        }

        state.height += 1;
        let height = state.height;
        let write_count = writes.len();
        let mut keys = BTreeSet::new();

        for (key, value) in writes {
            let entry = match value {
                Some(value) => {
                    state.entries.insert(key.clone(), value.clone());
                    Some(HistoryEntry {
                        tx_id: tx_id.clone(),
                        timestamp,
                        value,
                        is_delete: false,
                    })
                }
                None => state.entries.remove(&key).map(|_| HistoryEntry {
                    tx_id: tx_id.clone(),
                    timestamp,
                    value: Vec::new(),
                    is_delete: true,
                }),
            };
            if let Some(entry) = entry {
                state.history.entry(key.clone()).or_default().push(entry);
            }
            keys.insert(key);
        }
        state.commits.push(CommitRecord { height, keys });

        #[cfg(feature = "tracing-log")]
        tracing::debug!(tx_id = %tx_id, height, writes = write_count, "[id-01] transaction committed");

        Ok(CommitReceipt {
            tx_id,
            height,
            writes: write_count,
        })
    }
}
