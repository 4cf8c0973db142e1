//! Defaults shared by the CLI, the catalog loader and the refresher.
//! Every value here can be overridden from the catalog's `[fetch]` table or the command line.

// Platform identifiers (used in the catalog file)
pub const CYBERDEFENDERS_PLATFORM: &str = "cyberdefenders";

pub const CYBERDEFENDERS_BASE_URL: &str = "https://cyberdefenders.org/blueteam-ctf-challenges";

/// Id of the `application/json` script element carrying the page's context data
pub const DEFAULT_SCRIPT_ID: &str = "contextData";

pub const DEFAULT_CATALOG_PATH: &str = "config/labs.toml";
pub const DEFAULT_OUTPUT_PATH: &str = "data/labs_metadata.json";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_DELAY_SECONDS: u64 = 2;

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE_PREFIX: &str = "labs_metadata.log";
