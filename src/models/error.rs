//! Error taxonomy: field validation, missing records, and record store failures.

use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Which kind of record an error refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Player,
    Game,
    Objective,
    Comment,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Player => write!(f, "Player"),
            RecordKind::Game => write!(f, "Match"),
            RecordKind::Objective => write!(f, "Objective"),
            RecordKind::Comment => write!(f, "Comment"),
        }
    }
}

/// Per-field validation messages, keyed by the field's wire name.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error with a single field message.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(value)` when no field failed.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Failure reported by the record store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// No record with this id.
    NotFound { kind: RecordKind, id: Uuid },
    /// The store could not be reached or is unusable.
    Unavailable(String),
    /// The store refused the request.
    Rejected(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound { kind, id } => write!(f, "{} {} not found", kind, id),
            StoreError::Unavailable(reason) => write!(f, "Record store unavailable: {}", reason),
            StoreError::Rejected(reason) => write!(f, "Record store rejected the request: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors surfaced by match log operations. None of them is fatal; each can be retried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchLogError {
    /// Input failed local validation; the store was not called.
    Validation(ValidationErrors),
    /// A referenced record does not exist.
    NotFound { kind: RecordKind, id: Uuid },
    /// No player profile exists to act for.
    NoCurrentPlayer,
    /// The record store failed; local state was left at its last confirmed value.
    Store(StoreError),
    /// Writing an export failed.
    Export(String),
}

impl std::fmt::Display for MatchLogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchLogError::Validation(errors) => write!(f, "Invalid input ({})", errors),
            MatchLogError::NotFound { kind, .. } => write!(f, "{} not found", kind),
            MatchLogError::NoCurrentPlayer => write!(f, "Create a player profile first"),
            MatchLogError::Store(e) => write!(f, "{}", e),
            MatchLogError::Export(reason) => write!(f, "Export failed: {}", reason),
        }
    }
}

impl std::error::Error for MatchLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchLogError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for MatchLogError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { kind, id } => MatchLogError::NotFound { kind, id },
            other => MatchLogError::Store(other),
        }
    }
}

impl From<ValidationErrors> for MatchLogError {
    fn from(e: ValidationErrors) -> Self {
        MatchLogError::Validation(e)
    }
}
