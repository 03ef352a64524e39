//! The export chain: capture → encode → paginate → emit.
//!
//! Steps run strictly in order on the calling thread. Between steps the
//! chain checks its deadline and cancel token; either one aborts the job
//! before anything is written. The document is written to a temp file next
//! to its destination and renamed into place only when complete.

use super::encode::{self, EncodedImage};
use super::pagination::{self, Layout, PageSize};
use super::pdf;
use super::surface::{CaptureError, CaptureRequest, CaptureSurface, ExclusionGuard};
use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Shown to the user for any failed export.
pub const USER_NOTICE: &str = "Error generating PDF. Please try again.";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("an export is already running")]
    AlreadyRunning,
    #[error("capture failed: {0}")]
    Capture(#[from] CaptureError),
    #[error("encoding failed: {0}")]
    Encode(std::io::Error),
    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to move document into place: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("export cancelled")]
    Cancelled,
    #[error("export timed out after {0:?}")]
    TimedOut(Duration),
}

impl ExportError {
    pub fn user_notice(&self) -> &'static str {
        USER_NOTICE
    }
}

#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Idle,
    Capturing,
    Rendering,
    Done,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportJob {
    pub status: JobStatus,
    pub page_count: Option<usize>,
}

impl ExportJob {
    fn advance(&mut self, status: JobStatus) {
        debug!("export job {:?} → {:?}", self.status, status);
        self.status = status;
    }
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub selector: String,
    pub width_px: u32,
    pub scale: f64,
    pub page: PageSize,
    pub filename: String,
    pub timeout: Duration,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            selector: "#resume-document".to_string(),
            width_px: pagination::TARGET_WIDTH_PX,
            scale: 2.0,
            page: PageSize::A4_PORTRAIT,
            filename: "Resume.pdf".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl ExportSettings {
    pub fn capture_request(&self) -> CaptureRequest {
        CaptureRequest {
            selector: self.selector.clone(),
            width_px: self.width_px,
            scale: self.scale,
        }
    }
}

/// What a finished export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub page_count: usize,
    pub pixels: (u32, u32),
    pub bytes: usize,
    /// SHA-256 of the document, hex.
    pub sha256: String,
}

/// Holds the in-flight flag; clears it on drop.
pub struct InFlight<'p> {
    flag: &'p AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

pub struct ExportPipeline {
    settings: ExportSettings,
    in_flight: AtomicBool,
}

impl ExportPipeline {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Claim the pipeline, or fail if another job holds it.
    pub fn try_begin(&self) -> Result<InFlight<'_>, ExportError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ExportError::AlreadyRunning)?;
        Ok(InFlight {
            flag: &self.in_flight,
        })
    }

    /// Run one export into `dest_dir`, tracking progress in `job`.
    pub fn run<S: CaptureSurface + ?Sized>(
        &self,
        surface: &mut S,
        dest_dir: &Path,
        job: &mut ExportJob,
        cancel: &CancelToken,
    ) -> Result<ExportReport, ExportError> {
        let _claim = self.try_begin()?;
        let deadline = Instant::now() + self.settings.timeout;

        let result = self.run_steps(surface, dest_dir, job, cancel, deadline);
        match &result {
            Ok(report) => {
                job.page_count = Some(report.page_count);
                job.advance(JobStatus::Done);
                info!(
                    "exported {} ({} page(s))",
                    report.path.display(),
                    report.page_count
                );
            }
            Err(e) => {
                job.advance(JobStatus::Failed);
                warn!("export failed: {e}");
            }
        }
        result
    }

    fn run_steps<S: CaptureSurface + ?Sized>(
        &self,
        surface: &mut S,
        dest_dir: &Path,
        job: &mut ExportJob,
        cancel: &CancelToken,
        deadline: Instant,
    ) -> Result<ExportReport, ExportError> {
        let checkpoint = || -> Result<(), ExportError> {
            if cancel.is_cancelled() {
                return Err(ExportError::Cancelled);
            }
            if Instant::now() >= deadline {
                return Err(ExportError::TimedOut(self.settings.timeout));
            }
            Ok(())
        };

        checkpoint()?;
        job.advance(JobStatus::Capturing);
        let bitmap = {
            let mut guard = ExclusionGuard::hide(surface)?;
            guard.capture(&self.settings.capture_request())?
        };
        checkpoint()?;

        job.advance(JobStatus::Rendering);
        let image = encode::encode(&bitmap).map_err(ExportError::Encode)?;
        drop(bitmap);
        checkpoint()?;

        let layout = pagination::paginate(image.pixels(), self.settings.page);
        job.page_count = Some(layout.page_count());
        let bytes = render(&image, &layout)?;
        checkpoint()?;

        let path = emit(dest_dir, &self.settings.filename, &bytes)?;
        Ok(ExportReport {
            path,
            page_count: layout.page_count(),
            pixels: image.pixels(),
            bytes: bytes.len(),
            sha256: format!("{:x}", Sha256::digest(&bytes)),
        })
    }
}

fn render(image: &EncodedImage, layout: &Layout) -> Result<Vec<u8>, ExportError> {
    let mut doc = pdf::build_document(image, layout)?;
    let mut bytes = Vec::new();
    pdf::write_document(&mut doc, &mut bytes)?;
    Ok(bytes)
}

/// Write `bytes` to `dest_dir/filename` atomically.
fn emit(dest_dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dest_dir)?;
    let path = dest_dir.join(filename);
    let mut tmp = tempfile::NamedTempFile::new_in(dest_dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(&path)?;
    Ok(path)
}
