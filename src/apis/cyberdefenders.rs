use crate::error::{RefreshError, Result};
use crate::types::LabRecord;
use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::debug;

/// The `lab` object inside a CyberDefenders page's context data.
/// Only the fields we publish are modelled; everything else is ignored.
#[derive(Debug, Deserialize)]
struct LabPayload {
    #[serde(default)]
    rating: Option<Number>,
    // Voted on by players, see LabRecord::player_difficulty
    #[serde(default)]
    difficulty: Option<Number>,
    #[serde(default)]
    is_retired: Option<bool>,
    #[serde(default)]
    tactics: Option<Vec<Titled>>,
    #[serde(default)]
    categories: Option<Vec<Titled>>,
}

#[derive(Debug, Deserialize)]
struct Titled {
    title: String,
}

fn titles(items: Option<Vec<Titled>>) -> Vec<String> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(|item| item.title)
        .collect()
}

/// Flatten a decoded context document into a `LabRecord`.
///
/// Fails with `MissingLab` when there is no `lab` object, and with `LabShape` when
/// the object is there but a field has the wrong type or a tactic/category has no title.
pub fn map_lab_record(document: &Value) -> Result<LabRecord> {
    let lab = document
        .get("lab")
        .filter(|lab| lab.is_object())
        .ok_or(RefreshError::MissingLab)?;

    let payload = LabPayload::deserialize(lab).map_err(RefreshError::LabShape)?;
    debug!(
        "lab payload: rating={:?} difficulty={:?} retired={:?}",
        payload.rating, payload.difficulty, payload.is_retired
    );

    Ok(LabRecord {
        rating: payload.rating,
        player_difficulty: payload.difficulty,
        is_retired: payload.is_retired.unwrap_or(false),
        tactics: titles(payload.tactics),
        categories: titles(payload.categories),
    })
}
