//! Common traits for airlinks.
//!
//! The resolver depends on the remote store only through [`RecordStore`], so
//! tests can substitute an in-memory double for the HTTP client.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Fields, Record};

// ═══════════════════════════════════════════════════════════════════════════════
// REMOTE RECORD STORE
// ═══════════════════════════════════════════════════════════════════════════════

/// Authenticated read access to the lists and links resources.
///
/// Every non-2xx response, network failure or unparseable body surfaces as
/// `AirlinksError::Transport`. Implementations never retry.
///
/// Both reads take a [`RecordStore::Scope`] captured once per resolution, so a
/// list and its links are always read from the same base and tables even if
/// the store is reconfigured in between.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Connection details pinned for one resolution.
    type Scope: Send + Sync;

    /// Captures the current connection details.
    ///
    /// Fails with `Config` when the store is not usable as configured.
    fn scope(&self) -> Result<Self::Scope>;

    /// Reads one record of the lists resource.
    ///
    /// Fails with `NotFound` when the response carries no fields. The returned
    /// identifier falls back to `list_id` when the body omits it.
    async fn fetch_list(&self, scope: &Self::Scope, list_id: &str) -> Result<Record>;

    /// Reads the link records whose own identifier is one of `record_ids`.
    ///
    /// Returns field maps only. Fails with `EmptyResult` when nothing matches.
    /// `list_name` is used for diagnostics.
    async fn query_links(
        &self,
        scope: &Self::Scope,
        record_ids: &[String],
        list_name: &str,
    ) -> Result<Vec<Fields>>;
}
