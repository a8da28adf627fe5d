//! In-memory `RecordStore` double with call counters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use airlinks_core::error::{AirlinksError, Result};
use airlinks_core::traits::RecordStore;
use airlinks_core::types::{Fields, Record};

#[derive(Default)]
pub(crate) struct MockStore {
    lists: HashMap<String, Fields>,
    links: HashMap<String, Fields>,
    latency: Option<Duration>,
    pub fetch_calls: AtomicUsize,
    pub query_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, id: &str, fields: Value) -> Self {
        self.lists.insert(id.to_string(), as_fields(fields));
        self
    }

    pub fn with_link(mut self, id: &str, fields: Value) -> Self {
        self.links.insert(id.to_string(), as_fields(fields));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn as_fields(value: Value) -> Fields {
    value.as_object().cloned().unwrap_or_default()
}

#[async_trait]
impl RecordStore for MockStore {
    type Scope = ();

    fn scope(&self) -> Result<()> {
        Ok(())
    }

    async fn fetch_list(&self, _scope: &(), list_id: &str) -> Result<Record> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        self.lists
            .get(list_id)
            .map(|fields| Record {
                id: list_id.to_string(),
                fields: fields.clone(),
            })
            .ok_or_else(|| AirlinksError::NotFound(list_id.to_string()))
    }

    async fn query_links(
        &self,
        _scope: &(),
        record_ids: &[String],
        _list_name: &str,
    ) -> Result<Vec<Fields>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        let mut matched: Vec<(&String, &Fields)> = self
            .links
            .iter()
            .filter(|(id, _)| record_ids.contains(id))
            .collect();
        matched.sort_by(|a, b| a.0.cmp(b.0));

        if matched.is_empty() {
            return Err(AirlinksError::EmptyResult("tblLINKSLINKS".into()));
        }
        Ok(matched.into_iter().map(|(_, f)| f.clone()).collect())
    }
}
