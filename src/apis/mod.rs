pub mod cyberdefenders;

use crate::constants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Training platforms a catalog entry can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    CyberDefenders,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::CyberDefenders => constants::CYBERDEFENDERS_PLATFORM,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Platform::CyberDefenders => constants::CYBERDEFENDERS_BASE_URL,
        }
    }

    /// Page URL for a lab slug, e.g. `https://cyberdefenders.org/blueteam-ctf-challenges/yara-trap/`
    pub fn lab_url(&self, slug: &str) -> String {
        format!("{}/{}/", self.base_url(), slug)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_url_keeps_trailing_slash() {
        assert_eq!(
            Platform::CyberDefenders.lab_url("spooler-apt28"),
            "https://cyberdefenders.org/blueteam-ctf-challenges/spooler-apt28/"
        );
    }

    #[test]
    fn test_platform_identifier_round_trips_through_serde() {
        let platform: Platform = serde_json::from_str("\"cyberdefenders\"").unwrap();
        assert_eq!(platform, Platform::CyberDefenders);
        assert_eq!(platform.to_string(), "cyberdefenders");
        assert!(serde_json::from_str::<Platform>("\"hackthebox\"").is_err());
    }
}
