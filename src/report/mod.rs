//! Consultation report: content tree, PDF rendering and persistence.
//!
//! `compose_report` decides *what* goes into the report; `render_pdf` lays it
//! out with `printpdf`; a [`ReportSink`] stores the bytes.

pub mod document;
pub mod pdf;
pub mod sink;

pub use document::*;
pub use pdf::*;
pub use sink::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF rendering error: {0}")]
    Render(String),

    #[error("Cannot write report {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No free report filename for {0}")]
    NameExhausted(String),
}
