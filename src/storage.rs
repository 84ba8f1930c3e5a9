use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use crate::error::StoreError;
use crate::models::MovieRecord;

/// Single-item write capability of the movies table.
///
/// Writes are upserts: putting a record whose `id` already exists replaces it.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn put(&self, table_name: &str, record: &MovieRecord) -> Result<(), StoreError>;
}

/// DynamoDB attribute map for a record: `year` as `N`, `title` and `id` as `S`.
pub fn to_item(record: &MovieRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert("year".to_string(), AttributeValue::N(record.year.clone()));
    item.insert("title".to_string(), AttributeValue::S(record.title.clone()));
    item.insert("id".to_string(), AttributeValue::S(record.id.clone()));
    item
}

pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn from_env() -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&aws_config))
    }
}

#[async_trait]
impl MovieStore for DynamoDbStore {
    async fn put(&self, table_name: &str, record: &MovieRecord) -> Result<(), StoreError> {
        debug!(table_name = %table_name, item_id = %record.id, "Putting item");

        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(to_item(record)))
            .send()
            .await
            .map_err(|e| StoreError::DynamoDb(e.into()))?;

        Ok(())
    }
}

/// In-process table keyed by `(table_name, id)`.
#[derive(Default)]
pub struct MemoryStore {
    items: DashMap<(String, String), MovieRecord>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table_name: &str, id: &str) -> Option<MovieRecord> {
        self.items
            .get(&(table_name.to_string(), id.to_string()))
            .map(|entry| entry.value().clone())
    }

    pub fn records(&self, table_name: &str) -> Vec<MovieRecord> {
        self.items
            .iter()
            .filter(|entry| entry.key().0 == table_name)
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Number of `put` calls served, overwrites included.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn put(&self, table_name: &str, record: &MovieRecord) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.items
            .insert((table_name.to_string(), record.id.clone()), record.clone());
        Ok(())
    }
}
