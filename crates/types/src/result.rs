use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Fonts retrieved and zipped successfully";
pub const FAILURE_MESSAGE: &str = "Errors occurred during font retrieval";

/// The outcome of one `generate` run, serialised with the field names
/// external callers expect.
///
/// `downloadable` is true exactly when `download_url` is non-empty, and
/// `ok` is true exactly when `error_notes` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    #[serde(rename = "status")]
    pub ok: bool,
    pub message: String,
    #[serde(rename = "url")]
    pub source_url: String,
    pub downloadable: bool,
    pub download_url: String,
    #[serde(rename = "success")]
    pub success_notes: Vec<String>,
    #[serde(rename = "errors")]
    pub error_notes: Vec<String>,
}

impl PipelineResult {
    pub fn new(
        source_url: impl Into<String>,
        success_notes: Vec<String>,
        error_notes: Vec<String>,
        download_url: Option<String>,
    ) -> Self {
        let ok = error_notes.is_empty();
        let download_url = download_url.unwrap_or_default();
        Self {
            ok,
            message: if ok { SUCCESS_MESSAGE } else { FAILURE_MESSAGE }.to_string(),
            source_url: source_url.into(),
            downloadable: !download_url.is_empty(),
            download_url,
            success_notes,
            error_notes,
        }
    }
}

/// Returned instead of an archive stream when a download cannot be served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadFailure {
    pub status: bool,
    pub message: String,
    pub url: String,
    pub filename: String,
    pub zip_path: String,
}

impl DownloadFailure {
    pub fn new(
        message: impl Into<String>,
        url: impl Into<String>,
        filename: impl Into<String>,
        zip_path: impl Into<String>,
    ) -> Self {
        Self {
            status: false,
            message: message.into(),
            url: url.into(),
            filename: filename.into(),
            zip_path: zip_path.into(),
        }
    }
}
