//! OCR adapter backed by the external `tesseract` binary.
//!
//! The engine writes the uploaded image to a temp file, runs
//! `tesseract <image> stdout`, and returns whatever text comes back
//! (possibly empty). Callers report failures but keep going; OCR is a
//! best-effort companion to vision analysis, never a gating step.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tiergate_core::ImageAttachment;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::error::OcrError;

/// Name of the OCR binary looked up on PATH.
const TESSERACT_BIN: &str = "tesseract";

/// Default OCR timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// OCR engine wrapping the external `tesseract` CLI.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    timeout: Duration,
}

impl Default for OcrEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine {
    /// Creates an engine with the default timeout.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the OCR timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the resolved binary path, if installed.
    pub fn binary_path(&self) -> Option<PathBuf> {
        which::which(TESSERACT_BIN).ok()
    }

    /// Returns true if the OCR binary is available on PATH.
    pub fn is_available(&self) -> bool {
        self.binary_path().is_some()
    }

    /// Extracts text from an image.
    ///
    /// Returns the raw OCR output, which may legitimately be empty for
    /// images without text.
    #[instrument(skip(self, image), fields(bytes = image.data.len()))]
    pub async fn extract_text(&self, image: &ImageAttachment) -> Result<String, OcrError> {
        let binary = self.binary_path().ok_or(OcrError::NotInstalled)?;

        // Tesseract infers the format from content, but a recognizable
        // extension avoids warnings from some builds.
        let suffix = match image.media_type.as_str() {
            "image/jpeg" => ".jpg",
            "image/webp" => ".webp",
            "image/gif" => ".gif",
            _ => ".png",
        };

        let temp = tempfile::Builder::new()
            .prefix("tiergate-ocr-")
            .suffix(suffix)
            .tempfile()?;
        tokio::fs::write(temp.path(), &image.data).await?;

        debug!(binary = %binary.display(), path = %temp.path().display(), "Running OCR");

        let child = Command::new(&binary)
            .arg(temp.path())
            .arg("stdout")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| OcrError::Timeout(self.timeout))??;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(code, "OCR process failed");
            return Err(OcrError::Failed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
