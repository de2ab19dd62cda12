pub const DEFAULT_CONFIG_FILE: &str = "hashscope.toml";
pub const DEFAULT_API_KEY_FILE: &str = "api_key.txt";
pub const DEFAULT_HASH_LIST: &str = "hashes.xlsx";
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";
pub const DEFAULT_TEMPLATE_NAME: &str = "hash_report_template.md";
pub const DEFAULT_RESPONSES_DIR: &str = "responses";
pub const DEFAULT_REPORTS_DIR: &str = "reports";
pub const DEFAULT_API_URL: &str = "https://www.virustotal.com/api/v3";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Header VirusTotal expects the API key in.
pub const API_KEY_HEADER: &str = "x-apikey";
