//! The polymorphic TagFmt value tree.
//!
//! A [`Value`] is the untyped, self-describing shape every TagFmt byte
//! stream decodes into before a higher layer (the model marshaller)
//! interprets it against an expected schema. See the module docs in
//! [`crate`] for the wire grammar.

/// One TagFmt map entry list, in insertion order.
///
/// Kept as a `Vec` of pairs rather than a `HashMap` because TagFmt map
/// order is part of the wire format (and, for the entities this codec
/// carries, part of the object model's own ordering guarantees).
pub type Pairs = Vec<(Value, Value)>;

/// A decoded (or to-be-encoded) TagFmt value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `N`
    Null,
    /// `I` + 4-byte big-endian signed integer.
    Integer(i32),
    /// `S`/`s` chunks. Stored already reassembled into one Rust `String`.
    String(String),
    /// `V` ... `z`.
    ///
    /// `length_hint` records an optional `l`-prefixed length header seen
    /// on the wire (or to be written); it is informational only, the
    /// authoritative count is `items.len()`.
    List {
        length_hint: Option<i32>,
        items: Vec<Value>,
    },
    /// `M` ... `z`.
    ///
    /// `type_tag` is the class tag (e.g. `org.glite.authz.xacml.ctx.Attribute`)
    /// when present. Every entity map this codec carries has one; see
    /// `DESIGN.md` for why untyped maps are not supported generically.
    Map { type_tag: Option<String>, entries: Pairs },
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn integer(v: i32) -> Self {
        Value::Integer(v)
    }

    pub fn string(v: impl Into<String>) -> Self {
        Value::String(v.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List {
            length_hint: None,
            items,
        }
    }

    pub fn typed_map(type_tag: impl Into<String>, entries: Pairs) -> Self {
        Value::Map {
            type_tag: Some(type_tag.into()),
            entries,
        }
    }

    /// The class tag of a typed map, if this is a map with one.
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Value::Map { type_tag, .. } => type_tag.as_deref(),
            _ => None,
        }
    }

    /// Look up a map entry by string key. Returns `None` both when this
    /// isn't a map and when the key is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map { entries, .. } => entries.iter().find_map(|(k, v)| match k {
                Value::String(s) if s == key => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List { items, .. } => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_finds_entry_by_key_and_ignores_non_maps() {
        let map = Value::typed_map(
            "org.glite.authz.xacml.ctx.Attribute",
            vec![(Value::string("id"), Value::string("role"))],
        );
        assert_eq!(map.get("id").and_then(Value::as_str), Some("role"));
        assert!(map.get("missing").is_none());
        assert!(Value::string("not a map").get("id").is_none());
    }

    #[test]
    fn accessors_return_none_for_mismatched_variants() {
        assert_eq!(Value::Null.as_str(), None);
        assert_eq!(Value::string("x").as_integer(), None);
        assert_eq!(Value::integer(1).as_list(), None);
        assert!(Value::integer(0).type_tag().is_none());
    }

    #[test]
    fn is_null_only_true_for_null() {
        assert!(Value::null().is_null());
        assert!(!Value::integer(0).is_null());
    }
}
