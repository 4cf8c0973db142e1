use crate::apis::Platform;
use crate::error::RefreshError;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One lab to refresh, as declared in the catalog file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    pub name: String,
    pub platform: Platform,
    pub slug: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, platform: Platform, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform,
            slug: slug.into(),
        }
    }

    pub fn url(&self) -> String {
        self.platform.lab_url(&self.slug)
    }
}

/// Flattened metadata for a single lab.
///
/// `player_difficulty` is the difficulty players voted for on the platform, not an
/// authored difficulty level. Absent numbers are omitted from the output so that a
/// missing rating can never be confused with a real zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_difficulty: Option<Number>,
    pub is_retired: bool,
    pub tactics: Vec<String>,
    pub categories: Vec<String>,
}

/// Result of running one catalog entry through fetch, extract and map
#[derive(Debug)]
pub struct EntryOutcome {
    pub name: String,
    pub result: Result<LabRecord, RefreshError>,
}

impl EntryOutcome {
    pub fn updated(name: impl Into<String>, record: LabRecord) -> Self {
        Self {
            name: name.into(),
            result: Ok(record),
        }
    }

    pub fn skipped(name: impl Into<String>, error: RefreshError) -> Self {
        Self {
            name: name.into(),
            result: Err(error),
        }
    }

    pub fn is_updated(&self) -> bool {
        self.result.is_ok()
    }
}

/// The output document: lab name to record, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabsMetadata {
    entries: Vec<(String, LabRecord)>,
}

impl LabsMetadata {
    /// Folds per-entry outcomes into the output mapping. Skipped entries leave no key behind.
    pub fn collect<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a EntryOutcome>,
    {
        let entries = outcomes
            .into_iter()
            .filter_map(|outcome| match &outcome.result {
                Ok(record) => Some((outcome.name.clone(), record.clone())),
                Err(_) => None,
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&LabRecord> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, record)| record)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for LabsMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(name, record)| (name, record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(rating: Option<f64>) -> LabRecord {
        LabRecord {
            rating: rating.and_then(Number::from_f64),
            player_difficulty: None,
            is_retired: false,
            tactics: vec![],
            categories: vec![],
        }
    }

    #[test]
    fn test_absent_numbers_are_omitted() {
        let value = serde_json::to_value(record(None)).unwrap();
        assert_eq!(
            value,
            json!({"is_retired": false, "tactics": [], "categories": []})
        );
        assert!(value.get("rating").is_none());
    }

    #[test]
    fn test_collect_keeps_order_and_drops_skips() {
        let outcomes = vec![
            EntryOutcome::updated("Zeta", record(Some(4.0))),
            EntryOutcome::skipped("Alpha", RefreshError::MissingLab),
            EntryOutcome::updated("Beta", record(None)),
        ];

        let metadata = LabsMetadata::collect(&outcomes);

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.names().collect::<Vec<_>>(), vec!["Zeta", "Beta"]);
        assert!(metadata.get("Alpha").is_none());

        let rendered = serde_json::to_string(&metadata).unwrap();
        assert!(rendered.find("\"Zeta\"").unwrap() < rendered.find("\"Beta\"").unwrap());
    }

    #[test]
    fn test_empty_metadata_serializes_to_empty_object() {
        let metadata = LabsMetadata::collect(&Vec::<EntryOutcome>::new());
        assert!(metadata.is_empty());
        assert_eq!(serde_json::to_string_pretty(&metadata).unwrap(), "{}");
    }
}
