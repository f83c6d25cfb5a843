//! Company lookup by tax id (ИНН).

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::Result;

/// Best provider match for one tax id. Fields are opaque pass-through strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Party {
    /// Provider-assigned canonical tax id.
    pub inn: String,
    /// Full legal name including the organizational form.
    pub name: Option<String>,
    /// Registered address.
    pub address: Option<String>,
}

/// Outcome of a single successful provider round trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Party),
    /// No suggestions for the queried id (the id is echoed as given).
    NotFound(String),
}

impl LookupOutcome {
    /// Display name used for ordering; `None` for not-found and for parties
    /// the provider returned without a name.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            LookupOutcome::Found(p) => p.name.as_deref(),
            LookupOutcome::NotFound(_) => None,
        }
    }
}

/// Order outcomes by display name. Missing names sort first; ties keep their
/// original order when used with a stable sort.
pub fn by_display_name(a: &LookupOutcome, b: &LookupOutcome) -> Ordering {
    a.display_name().cmp(&b.display_name())
}

/// Port for the external suggestion provider.
///
/// One call is exactly one network round trip: no caching, no retries.
#[async_trait]
pub trait PartyLookup: Send + Sync {
    async fn find_party(&self, inn: &str) -> Result<LookupOutcome>;
}
