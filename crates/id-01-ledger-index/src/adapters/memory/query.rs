//! Selector subset understood by the in-memory ledger.
//!
//! ```json
//! {"selector": {"docType": "did.participant", "attrs.country": {"$in": ["CU", "ES"]}}}
//! ```
//!
//! Field names may use dotted paths. A plain value means equality; an object
//! whose keys all start with `$` is a list of operators (`$eq`, `$ne`, `$in`,
//! `$exists`). Values that are not JSON objects never match.

use crate::domain::errors::LedgerError;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Eq(Value),
    Ne(Value),
    In(Vec<Value>),
    Exists(bool),
}

impl Condition {
    fn holds(&self, actual: Option<&Value>) -> bool {
        match self {
            Condition::Eq(expected) => actual == Some(expected),
            Condition::Ne(expected) => actual != Some(expected),
            Condition::In(options) => actual.is_some_and(|v| options.contains(v)),
            Condition::Exists(wanted) => actual.is_some() == *wanted,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Selector {
    clauses: Vec<(Vec<String>, Condition)>,
}

impl Selector {
    pub(super) fn parse(query: &str) -> Result<Self, LedgerError> {
        let document: Value = serde_json::from_str(query)
            .map_err(|e| LedgerError::malformed(format!("query is not JSON: {e}")))?;
        let fields = document
            .get("selector")
            .and_then(Value::as_object)
            .ok_or_else(|| LedgerError::malformed("query must contain a \"selector\" object"))?;

        let mut clauses = Vec::new();
        for (field, condition) in fields {
            let path: Vec<String> = field.split('.').map(str::to_string).collect();
            match condition {
                Value::Object(ops) if !ops.is_empty() && ops.keys().all(|k| k.starts_with('$')) => {
                    for (op, argument) in ops {
                        clauses.push((path.clone(), parse_operator(field, op, argument)?));
                    }
                }
                Value::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => {
                    return Err(LedgerError::malformed(format!(
                        "field {field:?} mixes operators and values"
                    )));
                }
                other => clauses.push((path, Condition::Eq(other.clone()))),
            }
        }
        Ok(Self { clauses })
    }

    pub(super) fn matches(&self, document: &Value) -> bool {
        document.is_object()
            && self
                .clauses
                .iter()
                .all(|(path, condition)| condition.holds(lookup(document, path)))
    }

    pub(super) fn matches_bytes(&self, value: &[u8]) -> bool {
        serde_json::from_slice::<Value>(value).is_ok_and(|document| self.matches(&document))
    }
}

fn parse_operator(field: &str, op: &str, argument: &Value) -> Result<Condition, LedgerError> {
    match op {
        "$eq" => Ok(Condition::Eq(argument.clone())),
        "$ne" => Ok(Condition::Ne(argument.clone())),
        "$in" => argument
            .as_array()
            .map(|options| Condition::In(options.clone()))
            .ok_or_else(|| LedgerError::malformed(format!("$in on {field:?} needs an array"))),
        "$exists" => argument
            .as_bool()
            .map(Condition::Exists)
            .ok_or_else(|| LedgerError::malformed(format!("$exists on {field:?} needs a bool"))),
        other => Err(LedgerError::malformed(format!(
            "unsupported operator {other} on {field:?}"
        ))),
    }
}

fn lookup<'a>(document: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter()
        .try_fold(document, |current, segment| current.get(segment.as_str()))
}
