//! Reference label decoding
//!
//! Definition keys are base64-encoded names, optionally followed by an
//! `@<suffix>` (for example a version tag). A `$ref` points at a key through
//! the `#/definitions/` prefix. This module turns either form back into the
//! human-readable name shown on the node.

use crate::{Error, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

/// Prefix of a local definition reference
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Identities starting with this marker denote the document root and are never decoded
pub const ROOT_MARKER: &str = "#/root";

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// How definition keys are encoded in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefEncoding {
    /// Keys are base64-encoded names
    #[default]
    Base64,
    /// Keys are already readable and are shown as-is
    Plain,
}

/// Strip the `#/definitions/` prefix from a `$ref` value.
///
/// Raw keys without the prefix are returned unchanged.
pub fn resolve_ref_key(reference: &str) -> &str {
    reference
        .strip_prefix(DEFINITIONS_PREFIX)
        .unwrap_or(reference)
}

pub fn is_root_marker(key: &str) -> bool {
    key.starts_with(ROOT_MARKER)
}

/// Turn a definition key or `$ref` string into a display label.
///
/// ```
/// use schemagraph_core::label::{node_label_from_ref, RefEncoding};
///
/// // "Rm9v" is base64 for "Foo"
/// assert_eq!(node_label_from_ref("#/definitions/Rm9v@v2", RefEncoding::Base64).unwrap(), "Foo@v2");
/// assert_eq!(node_label_from_ref("#/root/x", RefEncoding::Base64).unwrap(), "#/root/x");
/// ```
pub fn node_label_from_ref(key: &str, encoding: RefEncoding) -> Result<String> {
    if is_root_marker(key) {
        return Ok(key.to_string());
    }

    let stripped = resolve_ref_key(key);
    let (base, suffix) = match stripped.split_once('@') {
        Some((base, suffix)) => (base, Some(suffix)),
        None => (stripped, None),
    };

    let name = match encoding {
        RefEncoding::Plain => base.to_string(),
        RefEncoding::Base64 => decode_base64(key, base)?,
    };

    Ok(match suffix {
        Some(suffix) => format!("{}@{}", name, suffix),
        None => name,
    })
}

fn decode_base64(key: &str, base: &str) -> Result<String> {
    let bytes = LENIENT
        .decode(base)
        .map_err(|e| Error::MalformedReference {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

    String::from_utf8(bytes).map_err(|e| Error::MalformedReference {
        key: key.to_string(),
        reason: format!("decoded name is not UTF-8: {}", e),
    })
}
