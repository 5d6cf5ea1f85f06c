use std::fmt;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Query filter in the JSON form accepted by `queries[]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    values: Vec<Value>,
}

impl Query {
    /// Exact equality. Values are sent as-is (no case folding or trimming).
    pub fn equal<V: Into<Value>>(
        attribute: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            method: "equal",
            attribute: Some(attribute.into()),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn limit(limit: u32) -> Self {
        Self {
            method: "limit",
            attribute: None,
            values: vec![Value::from(limit)],
        }
    }

    pub fn method(&self) -> &str {
        self.method
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Id helpers.
pub struct Id;

impl Id {
    /// Fresh time-ordered id: 32 lowercase hex chars, valid as a document or
    /// user id.
    pub fn unique() -> String {
        Uuid::now_v7().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_query_json() {
        let q = Query::equal("email", ["A@x.com"]);
        assert_eq!(
            q.to_string(),
            r#"{"method":"equal","attribute":"email","values":["A@x.com"]}"#
        );
    }

    #[test]
    fn test_limit_query_has_no_attribute() {
        assert_eq!(Query::limit(1).to_string(), r#"{"method":"limit","values":[1]}"#);
    }

    #[test]
    fn test_unique_ids() {
        let a = Id::unique();
        let b = Id::unique();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
