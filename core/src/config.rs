use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Default hit-test radius for vertices created without an explicit one.
pub const DEFAULT_VERTEX_RADIUS: f64 = 15.0;

/// Default weight for edges created by [`Graph::connect`](crate::Graph::connect).
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Upper bound accepted for `vertex_radius`.
pub const MAX_VERTEX_RADIUS: f64 = 10_000.0;

/// How vertex labels are validated on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Any string is accepted.
    #[default]
    FreeForm,
    /// Labels must parse as an integer (e.g. "12", "-3").
    Integer,
}

impl LabelPolicy {
    pub fn check(self, label: &str) -> Result<()> {
        match self {
            LabelPolicy::FreeForm => Ok(()),
            LabelPolicy::Integer => label.parse::<i64>().map(|_| ()).map_err(|_| {
                GraphError::InvalidLabel {
                    label: label.to_string(),
                    reason: "label must be a whole number (no decimal point)".to_string(),
                }
            }),
        }
    }
}

/// Construction-time settings for a [`Graph`](crate::Graph).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub directed: bool,
    pub default_weight: f64,
    pub vertex_radius: f64,
    pub label_policy: LabelPolicy,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            default_weight: DEFAULT_EDGE_WEIGHT,
            vertex_radius: DEFAULT_VERTEX_RADIUS,
            label_policy: LabelPolicy::FreeForm,
        }
    }
}

impl GraphConfig {
    /// Reject values the graph cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.default_weight.is_finite() || self.default_weight < 0.0 {
            return Err(GraphError::InvalidConfig {
                field: "default_weight",
                reason: format!("must be finite and non-negative, got {}", self.default_weight),
            });
        }
        if !(self.vertex_radius > 0.0 && self.vertex_radius <= MAX_VERTEX_RADIUS) {
            return Err(GraphError::InvalidConfig {
                field: "vertex_radius",
                reason: format!(
                    "must be in (0, {}], got {}",
                    MAX_VERTEX_RADIUS, self.vertex_radius
                ),
            });
        }
        Ok(())
    }
}
