//! Trait and types for looking up an attendee's elected representatives.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::normalize::CleanZipcode;

/// Shown in a letter when representatives could not be looked up.
pub const FIND_REPRESENTATIVES_FALLBACK: &str = "You can find your representatives by visiting www.commoncause.org/take-action/find-elected-officials";

/// A single elected official as returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representative {
    pub name: String,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

impl Representative {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            party: None,
            urls: Vec::new(),
        }
    }
}

/// Outcome of a representative lookup for one zipcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Legislators {
    Found(Vec<Representative>),
    LookupFailed,
}

impl Legislators {
    pub fn is_found(&self) -> bool {
        matches!(self, Legislators::Found(_))
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Legislators::Found(reps) => reps.iter().map(|r| r.name.as_str()).collect(),
            Legislators::LookupFailed => Vec::new(),
        }
    }
}

impl fmt::Display for Legislators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Legislators::Found(_) => f.write_str(&self.names().join(", ")),
            Legislators::LookupFailed => f.write_str(FIND_REPRESENTATIVES_FALLBACK),
        }
    }
}

/// Abstraction over a representative lookup provider (e.g., Google Civic Information).
#[async_trait::async_trait]
pub trait RepresentativeLookup: Send + Sync {
    /// Returns the national legislators for `zipcode`.
    async fn legislators(&self, zipcode: &CleanZipcode) -> Result<Vec<Representative>>;
}

#[async_trait::async_trait]
impl<T: RepresentativeLookup + ?Sized> RepresentativeLookup for Box<T> {
    async fn legislators(&self, zipcode: &CleanZipcode) -> Result<Vec<Representative>> {
        (**self).legislators(zipcode).await
    }
}

/// Runs `lookup`, converting any failure into [`Legislators::LookupFailed`].
pub async fn legislators_by_zipcode<L>(lookup: &L, zipcode: &CleanZipcode) -> Legislators
where
    L: RepresentativeLookup + ?Sized,
{
    match lookup.legislators(zipcode).await {
        Ok(reps) => Legislators::Found(reps),
        Err(e) => {
            warn!(zipcode = %zipcode, error = %e, "Representative lookup failed");
            Legislators::LookupFailed
        }
    }
}

/// A lookup that always fails; used when no API key is configured.
pub struct OfflineLookup;

#[async_trait::async_trait]
impl RepresentativeLookup for OfflineLookup {
    async fn legislators(&self, _zipcode: &CleanZipcode) -> Result<Vec<Representative>> {
        Err(anyhow::anyhow!("no civic information API key configured"))
    }
}
