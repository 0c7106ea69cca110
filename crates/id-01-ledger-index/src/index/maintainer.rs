use crate::domain::composite_key::{create_composite_key, CompositeKey};
use crate::domain::entities::KeyValue;
use crate::domain::errors::LedgerError;
use crate::ports::outbound::LedgerStore;

/// Value stored under every index key.
pub const INDEX_VALUE: &[u8] = &[0x00];

/// Create the index entry `(tag, attributes)`.
///
/// Idempotent: writing an existing entry again stores the same bytes under
/// the same key. Returns the encoded key.
pub fn create_index<L, S>(ledger: &mut L, tag: &str, attributes: &[S]) -> Result<String, LedgerError>
where
    L: LedgerStore + ?Sized,
    S: AsRef<str>,
{
    let key = create_composite_key(tag, attributes)?;
    ledger.put(&key, INDEX_VALUE.to_vec())?;

    #[cfg(feature = "tracing-log")]
    tracing::debug!(tag, key = ?key, "[id-01] index entry written");

    Ok(key)
}

/// Remove the index entry `(tag, attributes)`. Returns whether an entry was
/// there to remove.
///
/// With `strict = true` the entry must exist: its absence means a caller's
/// earlier existence check was wrong, and that is reported as `NotFound`.
/// With `strict = false` a missing entry is logged and ignored.
///
/// ## Errors
///
/// - `NotFound`: `strict` and the entry does not exist
/// - `MalformedInput`: the key cannot be encoded
pub fn delete_index<L, S>(
    ledger: &mut L,
    tag: &str,
    attributes: &[S],
    strict: bool,
) -> Result<bool, LedgerError>
where
    L: LedgerStore + ?Sized,
    S: AsRef<str>,
{
    let key = create_composite_key(tag, attributes)?;
    if ledger.get(&key)?.is_none() {
        if strict {
            return Err(LedgerError::not_found(key));
        }

        #[cfg(feature = "tracing-log")]
        tracing::warn!(tag, key = ?key, "[id-01] best-effort index removal found nothing");

        return Ok(false);
    }

    ledger.delete(&key)?;

    #[cfg(feature = "tracing-log")]
    tracing::debug!(tag, key = ?key, strict, "[id-01] index entry removed");

    Ok(true)
}

/// Every entry whose key starts with `(tag, leading)`, in key order.
pub fn scan_partial_composite_key<L, S>(
    ledger: &L,
    tag: &str,
    leading: &[S],
) -> Result<Vec<KeyValue>, LedgerError>
where
    L: LedgerStore + ?Sized,
    S: AsRef<str>,
{
    let prefix = create_composite_key(tag, leading)?;
    ledger.scan_prefix(&prefix)
}

/// Decoded keys of every index entry under `(tag, leading)`, in key order.
pub fn scan_index<L, S>(ledger: &L, tag: &str, leading: &[S]) -> Result<Vec<CompositeKey>, LedgerError>
where
    L: LedgerStore + ?Sized,
    S: AsRef<str>,
{
    scan_partial_composite_key(ledger, tag, leading)?
        .into_iter()
        .map(|entry| CompositeKey::parse(&entry.key))
        .collect()
}
