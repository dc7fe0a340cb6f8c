use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque continuation token handed out by the server.
///
/// The client never looks inside it; it is echoed back verbatim as the
/// `cursor` query parameter of the next request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Cursor {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One batch of items as returned by `GET /api/scans`.
///
/// `next` is `None` once the server has no further pages. An empty-string
/// token is treated the same as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default, deserialize_with = "non_empty_cursor")]
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next: Option<Cursor>) -> Self {
        Self { items, next }
    }

    /// A terminal page with no continuation token.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

fn non_empty_cursor<'de, D>(deserializer: D) -> Result<Option<Cursor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(Cursor))
}
