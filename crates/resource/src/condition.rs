//! Status conditions as stored in `status.conditions`.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;
use xfn_core::fieldpath::integer_from;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub r#type: String,
    #[serde(default)]
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_integer")]
    pub observed_generation: Option<i64>,
}

impl Condition {
    /// A condition stamped with the current time, to the second.
    pub fn new(r#type: impl Into<String>, status: ConditionStatus, reason: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            status,
            last_transition_time: Some(Utc::now().trunc_subsecs(0)),
            reason: reason.into(),
            message: None,
            observed_generation: None,
        }
    }

    /// The placeholder returned when a resource has no condition of a type.
    pub fn unknown(r#type: impl Into<String>) -> Self {
        Self { r#type: r#type.into(), ..Self::default() }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_observed_generation(mut self, generation: i64) -> Self {
        self.observed_generation = Some(generation);
        self
    }

    /// Equal in everything but the transition time.
    pub fn equal(&self, other: &Condition) -> bool {
        self.r#type == other.r#type
            && self.status == other.status
            && self.reason == other.reason
            && self.message == other.message
            && self.observed_generation == other.observed_generation
    }
}

/// Upsert `updates` into `existing` by type. Untouched entries keep their
/// position, new types are appended, and a condition equal to the stored one
/// leaves the stored one (and its transition time) alone.
pub fn merge_conditions(existing: &mut Vec<Condition>, updates: impl IntoIterator<Item = Condition>) {
    for c in updates {
        match existing.iter_mut().find(|e| e.r#type == c.r#type) {
            Some(e) if e.equal(&c) => {}
            Some(e) => *e = c,
            None => existing.push(c),
        }
    }
}

// Documents built from protobuf structs carry every number as a float.
pub(crate) fn lenient_integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let n: Option<Number> = Option::deserialize(d)?;
    Ok(n.as_ref().and_then(integer_from))
}
