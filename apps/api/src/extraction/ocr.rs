use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::ExtractionError;

/// Optical character recognition over a scanned PDF.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, pdf_bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Shells out to `pdftoppm` to rasterise pages, then to `tesseract` per page.
/// The whole pass is bounded by `timeout`.
pub struct TesseractCli {
    tesseract_path: String,
    pdftoppm_path: String,
    timeout: Duration,
}

impl TesseractCli {
    pub fn new(tesseract_path: String, pdftoppm_path: String, timeout: Duration) -> Self {
        Self {
            tesseract_path,
            pdftoppm_path,
            timeout,
        }
    }

    async fn run(&self, pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
        let workdir = tempfile::tempdir().map_err(|e| ExtractionError::Ocr(e.to_string()))?;
        let pdf_path = workdir.path().join("input.pdf");
        tokio::fs::write(&pdf_path, pdf_bytes)
            .await
            .map_err(|e| ExtractionError::Ocr(e.to_string()))?;

        let prefix = workdir.path().join("page");
        let mut rasterise = Command::new(&self.pdftoppm_path);
        rasterise
            .arg("-r")
            .arg("300")
            .arg("-png")
            .arg(&pdf_path)
            .arg(&prefix);
        run_command(rasterise, &self.pdftoppm_path).await?;

        let pages = page_images(workdir.path()).await?;
        debug!("OCR rasterised {} page(s)", pages.len());

        let mut text = String::new();
        for page in pages {
            let mut recognise = Command::new(&self.tesseract_path);
            recognise.arg(&page).arg("stdout");
            let output = run_command(recognise, &self.tesseract_path).await?;
            text.push_str(&String::from_utf8_lossy(&output));
            text.push('\n');
        }

        Ok(text)
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
        tokio::time::timeout(self.timeout, self.run(pdf_bytes))
            .await
            .map_err(|_| {
                ExtractionError::Ocr(format!("timed out after {}s", self.timeout.as_secs()))
            })?
    }
}

async fn run_command(mut command: Command, program: &str) -> Result<Vec<u8>, ExtractionError> {
    let output = command
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| ExtractionError::Ocr(format!("failed to run {program}: {e}")))?;

    if !output.status.success() {
        return Err(ExtractionError::Ocr(format!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(output.stdout)
}

/// Page images produced by `pdftoppm`, in page order.
async fn page_images(dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ExtractionError::Ocr(e.to_string()))?;

    let mut pages = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ExtractionError::Ocr(e.to_string()))?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "png") {
            pages.push(path);
        }
    }

    // pdftoppm zero-pads page numbers, so lexical order is page order.
    pages.sort();
    Ok(pages)
}
