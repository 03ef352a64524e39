//! Résumé export: rasterize the résumé block and emit it as a multi-page
//! A4 PDF.
//!
//! | Step | Module |
//! |------|--------|
//! | Capture | [`surface`] ([`ImageSurface`]; `ChromeSurface` with the `chrome` feature) |
//! | Encode | [`encode`] |
//! | Paginate | [`pagination`] |
//! | Emit | [`pdf`], driven by [`pipeline`] |

#[cfg(feature = "chrome")]
pub mod chrome;
pub mod encode;
pub mod pagination;
pub mod pdf;
pub mod pipeline;
pub mod surface;

#[cfg(feature = "chrome")]
pub use chrome::ChromeSurface;
pub use pagination::{Layout, PageSize, paginate};
pub use pipeline::{
    CancelToken, ExportError, ExportJob, ExportPipeline, ExportReport, ExportSettings, JobStatus,
    USER_NOTICE,
};
pub use surface::{CaptureError, CaptureRequest, CaptureSurface, ExclusionGuard, ImageSurface};
