use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Catalog identifier for a product.
///
/// Listing APIs hand these out either as numbers or as opaque strings; both
/// decode into the same textual form so cards can be keyed uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Integer(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawProductId::deserialize(deserializer)? {
            RawProductId::Integer(value) => Self::from(value),
            RawProductId::Text(value) => Self(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ProductId;

    #[test]
    fn decodes_numeric_and_string_ids() {
        let numeric: ProductId = serde_json::from_str("42").expect("numeric id");
        let text: ProductId = serde_json::from_str("\"sku-7\"").expect("string id");
        assert_eq!(numeric, ProductId::new("42"));
        assert_eq!(text.as_str(), "sku-7");
    }

    #[test]
    fn serializes_as_plain_string() {
        let encoded = serde_json::to_string(&ProductId::from(9_i64)).expect("encode");
        assert_eq!(encoded, "\"9\"");
    }
}
