//! # Composite Key Codec
//!
//! Maps `(object type, [attribute...])` to a single storage key and back.
//!
//! ## Layout
//!
//! ```text
//! \0 <object type> \0 <attr 1> \0 <attr 2> \0 ... <attr n> \0
//! ```
//!
//! The leading `\0` keeps composite keys out of the range of plain keys. Every
//! component is terminated by `\0`, so `(tag, [a])` is a byte prefix of
//! `(tag, [a, b])` but *not* of `(tag, [ab])`: a scan for `did:abc` never
//! picks up `did:abcd`.
//!
//! The codec does not record arity. Callers that know how many attributes a
//! tag carries use [`split_composite_key_expecting`].

use super::errors::LedgerError;

/// Marks the start of the composite-key namespace.
pub const COMPOSITE_KEY_NAMESPACE: char = '\u{0000}';

/// Terminates the object type and every attribute.
pub const COMPONENT_SEPARATOR: char = '\u{0000}';

/// Reserved; never allowed inside a component.
const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// A decoded composite key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeKey {
    object_type: String,
    attributes: Vec<String>,
}

impl CompositeKey {
    /// Build a key, validating the object type and every attribute.
    pub fn new<S: AsRef<str>>(object_type: &str, attributes: &[S]) -> Result<Self, LedgerError> {
        validate_object_type(object_type)?;
        for attribute in attributes {
            validate_component(attribute.as_ref())?;
        }
        Ok(Self {
            object_type: object_type.to_string(),
            attributes: attributes.iter().map(|a| a.as_ref().to_string()).collect(),
        })
    }

    /// Decode a storage key.
    pub fn parse(key: &str) -> Result<Self, LedgerError> {
        let (object_type, attributes) = split_composite_key(key)?;
        Ok(Self {
            object_type,
            attributes,
        })
    }

    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Attribute at `position`, or `InvalidKeyFormat` if the key is shorter.
    pub fn attribute(&self, position: usize) -> Result<&str, LedgerError> {
        self.attributes
            .get(position)
            .map(String::as_str)
            .ok_or_else(|| LedgerError::InvalidKeyFormat {
                key: self.encode(),
                expected: position + 1,
                actual: self.attributes.len(),
            })
    }

    pub fn into_attributes(self) -> Vec<String> {
        self.attributes
    }

    /// Encode into the storage layout.
    pub fn encode(&self) -> String {
        let capacity = 2
            + self.object_type.len()
            + self.attributes.iter().map(|a| a.len() + 1).sum::<usize>();
        let mut key = String::with_capacity(capacity);
        key.push(COMPOSITE_KEY_NAMESPACE);
        key.push_str(&self.object_type);
        key.push(COMPONENT_SEPARATOR);
        for attribute in &self.attributes {
            key.push_str(attribute);
            key.push(COMPONENT_SEPARATOR);
        }
        key
    }
}

/// Encode `(object_type, attributes)` as a storage key.
///
/// With a partial attribute list the result is the scan prefix for every key
/// that starts with those attributes.
///
/// ## Errors
///
/// - `MalformedInput`: empty object type, or a component containing `\0` or `U+10FFFF`
pub fn create_composite_key<S: AsRef<str>>(
    object_type: &str,
    attributes: &[S],
) -> Result<String, LedgerError> {
    CompositeKey::new(object_type, attributes).map(|key| key.encode())
}

/// Decode a storage key into its object type and attributes.
///
/// ## Errors
///
/// - `MalformedInput`: the key is not in the composite-key namespace or is not terminated
pub fn split_composite_key(key: &str) -> Result<(String, Vec<String>), LedgerError> {
    let body = key
        .strip_prefix(COMPOSITE_KEY_NAMESPACE)
        .ok_or_else(|| LedgerError::malformed(format!("{key:?} is not a composite key")))?;
    let body = body
        .strip_suffix(COMPONENT_SEPARATOR)
        .ok_or_else(|| LedgerError::malformed(format!("composite key {key:?} is not terminated")))?;

    let mut components = body.split(COMPONENT_SEPARATOR);
    let object_type = components
        .next()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| LedgerError::malformed(format!("composite key {key:?} has no object type")))?
        .to_string();
    let attributes = components.map(str::to_string).collect();
    Ok((object_type, attributes))
}

/// Decode a storage key whose tag is known to carry exactly `expected`
/// attributes.
///
/// ## Errors
///
/// - `InvalidKeyFormat`: the key decodes to a different attribute count
/// - `MalformedInput`: see [`split_composite_key`]
pub fn split_composite_key_expecting(
    key: &str,
    expected: usize,
) -> Result<Vec<String>, LedgerError> {
    let (_, attributes) = split_composite_key(key)?;
    if attributes.len() != expected {
        return Err(LedgerError::InvalidKeyFormat {
            key: key.to_string(),
            expected,
            actual: attributes.len(),
        });
    }
    Ok(attributes)
}

fn validate_object_type(object_type: &str) -> Result<(), LedgerError> {
    if object_type.is_empty() {
        return Err(LedgerError::malformed("object type must not be empty"));
    }
    validate_component(object_type)
}

fn validate_component(component: &str) -> Result<(), LedgerError> {
    if let Some(bad) = component
        .chars()
        .find(|c| *c == COMPONENT_SEPARATOR || *c == MAX_UNICODE_RUNE)
    {
        return Err(LedgerError::malformed(format!(
            "component {component:?} contains reserved character U+{:04X}",
            bad as u32
        )));
    }
    Ok(())
}
