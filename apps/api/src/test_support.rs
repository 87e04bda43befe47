//! Fakes shared by unit tests: a scripted chat model, PDF/OCR engines and
//! an `AppState` wired to the in-memory store.

use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::extraction::{ExtractionError, OcrEngine, PdfTextLayer, TextExtractor};
use crate::llm_client::{ChatModel, LlmError};
use crate::state::AppState;
use crate::store::memory::MemoryStore;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: Option<String>,
    pub prompt: String,
}

enum Script {
    Replies(Mutex<VecDeque<String>>),
    Empty,
    Failing,
}

/// Replays canned replies in order, then a generic reply once they run out.
pub struct FakeChatModel {
    script: Script,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeChatModel {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Script::Replies(Mutex::new(replies.into_iter().map(Into::into).collect())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A model that returns no content.
    pub fn empty() -> Self {
        Self {
            script: Script::Empty,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A model whose every call fails.
    pub fn failing() -> Self {
        Self {
            script: Script::Failing,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for FakeChatModel {
    async fn complete(
        &self,
        system: Option<&str>,
        prompt: &str,
    ) -> Result<Option<String>, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.map(str::to_string),
            prompt: prompt.to_string(),
        });

        match &self.script {
            Script::Replies(replies) => Ok(Some(
                replies
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| "Scripted reply.".to_string()),
            )),
            Script::Empty => Ok(None),
            Script::Failing => Err(LlmError::Api {
                status: 401,
                message: "invalid api key".to_string(),
            }),
        }
    }
}

/// Returns a fixed text layer for every PDF.
pub struct FakePdfLayer {
    text: String,
}

impl FakePdfLayer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl PdfTextLayer for FakePdfLayer {
    fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(self.text.clone())
    }
}

/// Returns fixed OCR output and counts invocations.
pub struct FakeOcr {
    text: String,
    calls: AtomicUsize,
}

impl FakeOcr {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrEngine for FakeOcr {
    async fn recognize(&self, _pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

/// Builds a minimal `.docx` whose body holds one paragraph per entry.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub llm: Arc<FakeChatModel>,
}

/// `AppState` backed by the in-memory store, the given model and a PDF layer
/// that always has enough text to skip OCR.
pub fn test_app(llm: FakeChatModel) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let llm = Arc::new(llm);
    let extractor = TextExtractor::new(
        Arc::new(FakePdfLayer::new(
            "Experience: five years building Rust services. Skills: Rust, SQL, Tokio.",
        )),
        Arc::new(FakeOcr::new("")),
    );

    let state = AppState {
        store: store.clone(),
        llm: llm.clone(),
        extractor: Arc::new(extractor),
        uploads: None,
    };

    TestApp { state, store, llm }
}
