//! CSV export downloads and `Content-Disposition` filename handling.

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_EXPORT_FILENAME: &str = "export.csv";

static FILENAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"filename="?([^";]+)"?"#).expect("invalid filename regex"));

/// Binary body of an export response.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Extracts the filename from a `Content-Disposition` header, falling back to `export.csv`.
pub fn filename_from_disposition(header: Option<&str>) -> String {
    header
        .and_then(|value| FILENAME_REGEX.captures(value))
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string())
}
