//! Herd statistics for the dashboard summary cards.

use serde::{Deserialize, Serialize};

use crate::models::{CattleRecord, HealthStatus};

/// Summary counts over a farmer's herd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerdStats {
    pub total: usize,
    pub healthy: usize,
    /// Every animal not marked healthy
    pub needs_attention: usize,
    /// Mean L/day over records with a parseable figure; `None` if there are none
    pub average_milk_production: Option<f64>,
}

impl HerdStats {
    /// Compute statistics for a list of records.
    pub fn from_records(records: &[CattleRecord]) -> Self {
        let total = records.len();
        let healthy = records
            .iter()
            .filter(|r| r.health_status == HealthStatus::Healthy)
            .count();

        let figures: Vec<f64> = records
            .iter()
            .filter_map(|r| r.milk_production_litres().valid())
            .collect();
        let average_milk_production = if figures.is_empty() {
            None
        } else {
            Some(figures.iter().sum::<f64>() / figures.len() as f64)
        };

        Self {
            total,
            healthy,
            needs_attention: total - healthy,
            average_milk_production,
        }
    }
}
