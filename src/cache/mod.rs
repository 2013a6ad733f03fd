//! Result cache
//!
//! Canonical input hashing plus a fixed-capacity FIFO cache: a key ring
//! tracks insertion order and the map holds the results. Eviction is
//! oldest-inserted first, never recency-based.

use serde_json::json;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};

use crate::market::MarketConditions;
use crate::types::{AttributeSet, Configuration, QuantificationResult, Service};

/// Canonical SHA-256 hash of everything that feeds a calculation. The
/// attribute map is a BTreeMap so key order is already sorted.
pub fn input_hash(
    service: &Service,
    attributes: &AttributeSet,
    configuration: &Configuration,
    market: &MarketConditions,
) -> String {
    let canonical = json!({
        "service": service.id,
        "attributes": attributes,
        "configuration": configuration,
        "market": market,
    });
    // Struct field order is stable, so the serialization is canonical
    let bytes = serde_json::to_vec(&canonical).unwrap_or_default();
    let digest = Sha256::digest(&bytes);
    hex::encode(digest)
}

/// Utilization snapshot for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheUtilization {
    pub entries: usize,
    pub capacity: usize,
    pub fraction: f64,
}

/// Fixed-capacity FIFO memoization of calculation results
#[derive(Debug)]
pub struct ResultCache {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, QuantificationResult>,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &str) -> Option<&QuantificationResult> {
        self.entries.get(key)
    }

    /// Insert a result. Re-inserting an existing key replaces the value but
    /// keeps its original ring slot (insertion-ordered, not LRU).
    pub fn put(&mut self, key: String, result: QuantificationResult) {
        if self.entries.insert(key.clone(), result).is_some() {
            return;
        }
        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key);
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn utilization(&self) -> CacheUtilization {
        CacheUtilization {
            entries: self.entries.len(),
            capacity: self.capacity,
            fraction: self.entries.len() as f64 / self.capacity as f64,
        }
    }
}
