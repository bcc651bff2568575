//! Point tables: per-name intrinsic values loaded from JSON.
//!
//! A routine that prefers some targets over others expresses that preference
//! as a point table. Positive points pull the ranking toward a candidate,
//! negative points ban it outright.

use std::collections::HashMap;

use serde::Deserialize;

use runtime::ValueFn;

/// Candidate values keyed by name (username for players).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct PointTable {
    points: HashMap<String, f64>,
}

impl PointTable {
    /// Parse a table from a JSON object of `{"name": points}` pairs.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn set(&mut self, name: impl Into<String>, points: f64) {
        self.points.insert(name.into(), points);
    }

    /// Points for a name; unlisted names are worth nothing.
    pub fn get(&self, name: &str) -> f64 {
        self.points.get(name).copied().unwrap_or(0.0)
    }

    /// Wrap the table as a value function for the find operations.
    pub fn into_value_fn(self) -> ValueFn {
        Box::new(move |name| self.get(name))
    }
}
