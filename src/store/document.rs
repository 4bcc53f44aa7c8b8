use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Opaque document identifier
pub type Key = String;

/// Opaque version token assigned by the store on every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cas(u64);

impl Cas {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A retrieved document: its value plus the store's version token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEnvelope {
    pub value: Value,
    pub cas: Cas,
}

impl DocumentEnvelope {
    pub fn new(
        value: Value,
        cas: Cas,
    ) -> Self {
        Self { value, cas }
    }

    /// Deserializes the document value into a caller type
    ///
    /// # Example
    /// ```ignore
    /// let user: User = envelope.decode()?;
    /// ```
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.value)
    }
}

/// Per-key answer of a fetch
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Found(DocumentEnvelope),
    NotFound,
}

impl KeyOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, KeyOutcome::Found(_))
    }

    pub fn into_document(self) -> Option<DocumentEnvelope> {
        match self {
            KeyOutcome::Found(doc) => Some(doc),
            KeyOutcome::NotFound => None,
        }
    }
}

impl From<Option<DocumentEnvelope>> for KeyOutcome {
    fn from(doc: Option<DocumentEnvelope>) -> Self {
        match doc {
            Some(doc) => KeyOutcome::Found(doc),
            None => KeyOutcome::NotFound,
        }
    }
}
