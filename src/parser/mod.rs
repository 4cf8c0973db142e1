use crate::error::{RefreshError, Result};
use scraper::{Html, Selector};
use tracing::{debug, warn};

// Parses HTML pages that embed their state as JSON under
// <script id="..." type="application/json">.
pub fn extract_embedded_json(html: &str, script_id: &str) -> Result<serde_json::Value> {
    debug!("extract_embedded_json: start html_len={} script_id={}", html.len(), script_id);
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!(
        "script[type=\"application/json\"][id=\"{}\"]",
        script_id.replace('\\', "\\\\").replace('"', "\\\"")
    ))
    .map_err(|e| RefreshError::InvalidSelector(format!("{script_id}: {e}")))?;

    let elements: Vec<_> = document.select(&selector).collect();
    let element = match elements.as_slice() {
        [element] => element,
        [] => {
            return Err(RefreshError::ScriptNotFound {
                script_id: script_id.to_string(),
            })
        }
        many => {
            return Err(RefreshError::AmbiguousScript {
                script_id: script_id.to_string(),
                count: many.len(),
            })
        }
    };

    let json_text = element.text().collect::<String>();
    serde_json::from_str(&json_text).map_err(|e| {
        warn!("Failed to parse JSON from {}: {}", script_id, e);
        RefreshError::EmbeddedJson(e)
    })
}
