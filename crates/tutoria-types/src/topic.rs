//! Topic context projection.
//!
//! The minimal read-only view of a learning topic needed to ground a model
//! request. The full topic corpus (examples, code catalog) stays outside
//! this subsystem.

use serde::{Deserialize, Serialize};

/// Read-only projection of a learning topic.
///
/// Provided by the content corpus; never mutated here. `key_points` maps to
/// the external `keyPoints` field and no field beyond these may be assumed
/// present on the source record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicContext {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}
