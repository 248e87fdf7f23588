//! Document loading session.
//!
//! A [`Session`] owns one file load from open to completion: it spawns the
//! parse task, tracks progress, runs the validation gate, and feeds batches
//! into the pager. Dropping the session aborts the parse task, so a load can
//! be cancelled mid-flight without leaking the producer.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{ParseError, TreelineError, TreelineResult};
use crate::pager::Pager;
use crate::stream::{spawn_file_parser, LineBatch};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Not yet known whether the input is a displayable JSON document.
    Validating,
    /// The document view is live; more batches may still be arriving.
    Active,
    /// The input was rejected; no document view is shown.
    Failed,
}

pub struct Session {
    path: PathBuf,
    file_name: String,
    file_size: u64,
    rx: mpsc::Receiver<LineBatch>,
    parser: JoinHandle<()>,
    status: SessionStatus,
    progress: f64,
    error: Option<ParseError>,
}

impl Session {
    /// Open a file and start parsing it in the background.
    pub async fn open(path: impl AsRef<Path>) -> TreelineResult<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(TreelineError::Io)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let (rx, parser) = spawn_file_parser(path.clone());
        info!(path = %path.display(), size = metadata.len(), "session opened");
        Ok(Self {
            path,
            file_name,
            file_size: metadata.len(),
            rx,
            parser,
            status: SessionStatus::Validating,
            progress: 0.0,
            error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Fraction of the file parsed so far.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_loading(&self) -> bool {
        self.progress < 1.0 && self.status != SessionStatus::Failed
    }

    /// The terminal parse error, if the stream ended with one.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Receive the next batch from the parse task. `None` means the stream
    /// is finished and no further batch will ever arrive.
    pub async fn next_batch(&mut self) -> Option<LineBatch> {
        self.rx.recv().await
    }

    /// Fold one batch into the session and the pager.
    ///
    /// The validation gate runs here: a batch carrying more than one line
    /// proves the input is a real document, as does reaching end-of-file
    /// without a structural error. An error at byte zero rejects the file
    /// outright; a later error keeps the partial document and appends a
    /// terminal error line to it.
    pub fn apply_batch(&mut self, mut batch: LineBatch, pager: &mut Pager) {
        self.progress = batch.stats.progress(self.file_size);
        let at_eof = batch.stats.processed_bytes >= self.file_size;
        let error = batch.error.take();

        if self.status == SessionStatus::Validating {
            if let Some(e) = &error {
                if e.is_invalid_file() {
                    warn!(path = %self.path.display(), "rejected invalid file");
                    self.status = SessionStatus::Failed;
                    self.error = Some(e.clone());
                    return;
                }
            }
            if batch.lines.len() > 1 || (at_eof && error.is_none()) {
                debug!(lines = batch.lines.len(), "document validated");
                self.status = SessionStatus::Active;
            }
        }

        if let Some(e) = error {
            // the batch already carries the terminal error line; here the
            // error only changes session state
            warn!(error = %e, "parse stream ended with error");
            self.error = Some(e);
            // a batch after an error can still validate a small document
            if self.status == SessionStatus::Validating {
                self.status = SessionStatus::Active;
            }
        }

        if at_eof {
            // nothing left to pull; release the producer so the final
            // truncation-detecting batch arrives without waiting on scroll
            batch.ack.ack();
        }
        pager.append_lines(batch.lines, batch.ack, batch.stats, self.file_size);
        if self.error.is_some() {
            pager.seal();
        }
    }

    /// The parse stream closed without a final batch. Fix the document
    /// length and resolve a still-pending validation from what arrived.
    pub fn on_stream_closed(&mut self, pager: &mut Pager) {
        pager.seal();
        if self.status == SessionStatus::Validating {
            self.status = if pager.total_lines() > 0 {
                SessionStatus::Active
            } else {
                SessionStatus::Failed
            };
        }
        self.progress = 1.0;
    }

    /// Consume batches until validation resolves. Returns the rejection
    /// error when the input is not a displayable document.
    pub async fn wait_until_valid(&mut self, pager: &mut Pager) -> Result<(), ParseError> {
        while self.status == SessionStatus::Validating {
            match self.next_batch().await {
                Some(batch) => self.apply_batch(batch, pager),
                None => self.on_stream_closed(pager),
            }
        }
        match self.status {
            SessionStatus::Failed => Err(self
                .error
                .clone()
                .unwrap_or_else(ParseError::invalid_file)),
            _ => Ok(()),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.parser.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::Pager;
    use crate::render::RenderedLine;
    use ratatui::text::Line;
    use std::io::Write;

    fn pager() -> Pager {
        Pager::with_sentinel_seed(
            Box::new(|_, _| RenderedLine {
                rows: vec![Line::raw("")],
            }),
            1,
        )
    }

    fn temp_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[tokio::test]
    async fn test_valid_document_activates() {
        let file = temp_json(r#"{"name": "zig", "tags": ["fast", "small"]}"#);
        let mut session = Session::open(file.path()).await.expect("open");
        let mut pager = pager();
        session
            .wait_until_valid(&mut pager)
            .await
            .expect("should validate");
        assert_eq!(session.status(), SessionStatus::Active);
        assert!(pager.total_lines() > 1);
    }

    #[tokio::test]
    async fn test_garbage_is_rejected_without_a_view() {
        let file = temp_json("not json");
        let mut session = Session::open(file.path()).await.expect("open");
        let mut pager = pager();
        let err = session
            .wait_until_valid(&mut pager)
            .await
            .expect_err("should reject");
        assert!(err.is_invalid_file());
        assert_eq!(session.status(), SessionStatus::Failed);
        assert_eq!(pager.total_lines(), 0);
    }

    #[tokio::test]
    async fn test_single_value_document_validates_at_eof() {
        let file = temp_json("42");
        let mut session = Session::open(file.path()).await.expect("open");
        let mut pager = pager();
        session
            .wait_until_valid(&mut pager)
            .await
            .expect("a lone scalar is still a document");
        assert_eq!(pager.total_lines(), 1);
    }

    #[tokio::test]
    async fn test_truncated_document_keeps_partial_lines() {
        let file = temp_json(r#"{"a": 1, "b": [1, 2"#);
        let mut session = Session::open(file.path()).await.expect("open");
        let mut pager = pager();
        session
            .wait_until_valid(&mut pager)
            .await
            .expect("partial results stay viewable");

        while let Some(batch) = session.next_batch().await {
            session.apply_batch(batch, &mut pager);
        }
        session.on_stream_closed(&mut pager);

        assert!(session.error().is_some(), "truncation must surface");
        assert!(pager.total_lines() > 1);
        assert!(pager.last_page_index().is_some());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let result = Session::open("/nonexistent/treeline-missing.json").await;
        assert!(matches!(result, Err(TreelineError::Io(_))));
    }

    #[tokio::test]
    async fn test_progress_reaches_one() {
        let file = temp_json(r#"[1, 2, 3]"#);
        let mut session = Session::open(file.path()).await.expect("open");
        let mut pager = pager();
        session.wait_until_valid(&mut pager).await.expect("valid");
        while let Some(batch) = session.next_batch().await {
            session.apply_batch(batch, &mut pager);
        }
        session.on_stream_closed(&mut pager);
        assert_eq!(session.progress(), 1.0);
        assert!(!session.is_loading());
    }
}
