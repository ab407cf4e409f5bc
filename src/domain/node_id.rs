//! Node identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// A stable, opaque identifier for a content node.
///
/// Backed by a ULID: 26 Crockford Base32 characters, globally unique and
/// totally ordered. The ordering is used only to break ties between siblings
/// that share an `order` value.
///
/// # Examples
///
/// ```
/// use syllabus::domain::NodeId;
///
/// let low = NodeId::from_u128(1);
/// let high: NodeId = "01HQ3K5M7NXJK4QZPW8V2R6T9Y".parse().unwrap();
/// assert!(low < high);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Ulid);

impl NodeId {
    /// Generates a fresh id for a node that was given none.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Deterministic id for fixtures; ordering follows `value`.
    pub fn from_u128(value: u128) -> Self {
        Self(Ulid(value))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId(\"{}\")", self.0)
    }
}

/// Returned by [`NodeId::from_str`] for text that is not a ULID.
#[derive(Debug, Clone)]
pub struct ParseNodeIdError {
    value: String,
    reason: String,
}

impl fmt::Display for ParseNodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid node ID '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseNodeIdError {}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s.trim())
            .map(NodeId)
            .map_err(|e| ParseNodeIdError {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Serialize for NodeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn generated_id_is_26_chars() {
        let text = NodeId::new().to_string();
        assert_eq!(text.len(), 26);
        assert!(text.parse::<NodeId>().is_ok());
    }

    #[test]
    fn parse_ignores_surrounding_whitespace() {
        let id: NodeId = "  01HQ3K5M7NXJK4QZPW8V2R6T9Y\n".parse().unwrap();
        assert_eq!(id.to_string(), "01HQ3K5M7NXJK4QZPW8V2R6T9Y");
    }

    #[test]
    fn parse_round_trips_display() {
        let s = "01HQ3K5M7NXJK4QZPW8V2R6T9Y";
        let id: NodeId = s.parse().expect("should parse valid ULID");
        assert_eq!(id.to_string(), s);
    }

    #[test]
    fn parse_rejects_crockford_excluded_letters() {
        let result: Result<NodeId, _> = "IIIIIIIIIIIIIIIIIIIIIIIIII".parse();
        assert!(result.is_err());
    }

    #[test]
    fn from_u128_orders_numerically() {
        assert!(NodeId::from_u128(1) < NodeId::from_u128(2));
        assert!(NodeId::from_u128(1).to_string() < NodeId::from_u128(2).to_string());
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<NodeId> = (0..100).map(|_| NodeId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn debug_shows_ulid_text() {
        assert_eq!(
            format!("{:?}", NodeId::from_u128(0)),
            "NodeId(\"00000000000000000000000000\")"
        );
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = "physics".parse::<NodeId>().unwrap_err();
        assert!(err.to_string().starts_with("invalid node ID 'physics'"));
    }

    #[test]
    fn serde_uses_plain_string() {
        let id: NodeId = "01HQ3K5M7NXJK4QZPW8V2R6T9Y".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"01HQ3K5M7NXJK4QZPW8V2R6T9Y\"");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
