use super::ExtractionError;

/// Reads the embedded text layer of a PDF.
pub trait PdfTextLayer: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// `pdf-extract` backed text layer reader.
pub struct PdfExtractLayer;

impl PdfTextLayer for PdfExtractLayer {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_an_error() {
        let result = PdfExtractLayer.extract(b"definitely not a pdf");
        assert!(matches!(result, Err(ExtractionError::Pdf(_))));
    }
}
