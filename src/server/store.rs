use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::kernel::form::{RoastIntensity, SubmissionRecord};

/// A generated roast as the service hands it out and keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoastResponse {
    pub id: Uuid,
    pub roast: String,
    pub intensity: RoastIntensity,
    pub user_data: SubmissionRecord,
    pub created_at: DateTime<Utc>,
    /// Seconds spent generating.
    pub processing_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityCount {
    #[serde(rename = "_id")]
    pub intensity: RoastIntensity,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoastStats {
    pub total_roasts: u64,
    pub intensity_distribution: Vec<IntensityCount>,
    pub api_status: String,
}

/// Default number of roasts kept for lookup.
pub const DEFAULT_MAX_STORED: usize = 10_000;

#[derive(Debug, Default)]
struct Archive {
    roasts: HashMap<Uuid, RoastResponse>,
    // Insertion order, oldest at the front
    order: VecDeque<Uuid>,
    total: u64,
    counts: HashMap<RoastIntensity, u64>,
}

/// In-memory roast archive. Gone on restart.
///
/// Keeps at most `capacity` roasts for lookup, evicting the oldest first.
/// Stats count every roast ever stored, evicted or not.
#[derive(Debug)]
pub struct RoastStore {
    archive: RwLock<Archive>,
    capacity: usize,
}

impl Default for RoastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoastStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_STORED)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            archive: RwLock::new(Archive::default()),
            capacity: capacity.max(1),
        }
    }

    pub async fn insert(&self, roast: RoastResponse) {
        let mut archive = self.archive.write().await;
        archive.total += 1;
        *archive.counts.entry(roast.intensity).or_insert(0) += 1;

        let id = roast.id;
        if archive.roasts.insert(id, roast).is_none() {
            archive.order.push_back(id);
        }
        while archive.order.len() > self.capacity {
            if let Some(oldest) = archive.order.pop_front() {
                archive.roasts.remove(&oldest);
                debug!("Evicted roast {} from the archive", oldest);
            }
        }
    }

    pub async fn get(&self, id: &Uuid) -> Option<RoastResponse> {
        self.archive.read().await.roasts.get(id).cloned()
    }

    /// Totals plus per-intensity counts, busiest first.
    pub async fn stats(&self) -> RoastStats {
        let archive = self.archive.read().await;

        let mut intensity_distribution: Vec<IntensityCount> = archive
            .counts
            .iter()
            .map(|(intensity, count)| IntensityCount {
                intensity: *intensity,
                count: *count,
            })
            .collect();
        // Ties broken by intensity so the order is stable
        intensity_distribution.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.intensity.as_str().cmp(b.intensity.as_str()))
        });

        RoastStats {
            total_roasts: archive.total,
            intensity_distribution,
            api_status: "operational".to_string(),
        }
    }
}
