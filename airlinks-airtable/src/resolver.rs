//! List resolution and link query/transform.
//!
//! Resolution runs in two remote steps: the list record is read to learn its
//! name and declared link identifiers, then the links table is queried for
//! exactly those records.

use tracing::{debug, info, instrument};

use airlinks_core::error::{AirlinksError, Result};
use airlinks_core::traits::RecordStore;
use airlinks_core::types::{Link, List};
use airlinks_core::validate::is_valid_record_id;

/// Resolves a list record identifier to a [`List`].
///
/// Malformed identifiers fail with `InvalidIdentifier` before the store is
/// touched. A list that declares no links fails with `EmptyList`.
#[instrument(skip(store, scope))]
pub async fn resolve_list<S>(store: &S, scope: &S::Scope, list_id: &str) -> Result<List>
where
    S: RecordStore + ?Sized,
{
    if !is_valid_record_id(list_id) {
        return Err(AirlinksError::InvalidIdentifier(list_id.to_string()));
    }

    let record = store.fetch_list(scope, list_id).await?;
    let list = List::from_fields(record.id, &record.fields);

    if list.is_empty() {
        debug!(list_id, name = %list.name, "List declares no links");
        return Err(AirlinksError::EmptyList(list.name));
    }

    debug!(list_id, name = %list.name, links = list.links.len(), "Resolved list");
    Ok(list)
}

/// Queries and transforms the links a resolved list declares.
///
/// Fails with `NoLinksFound` when none of the declared identifiers resolve
/// to a record.
#[instrument(skip(store, scope, list), fields(list = %list.name))]
pub async fn resolve_links<S>(store: &S, scope: &S::Scope, list: &List) -> Result<Vec<Link>>
where
    S: RecordStore + ?Sized,
{
    if list.is_empty() {
        return Err(AirlinksError::EmptyList(list.name.clone()));
    }

    let records = match store.query_links(scope, &list.links, &list.name).await {
        Ok(records) => records,
        Err(AirlinksError::EmptyResult(_)) => Vec::new(),
        Err(e) => return Err(e),
    };

    if records.is_empty() {
        return Err(AirlinksError::NoLinksFound(list.name.clone()));
    }

    let links: Vec<Link> = records
        .iter()
        .map(|fields| Link::from_fields(fields, &list.name))
        .collect();

    info!(list = %list.name, count = links.len(), "Resolved links");
    Ok(links)
}
