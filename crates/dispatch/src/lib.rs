//! Result dispatch module for TextSnap
//!
//! The collaborators a finished capture is handed to: PNG encoding, the
//! OCR upload endpoint, the clipboard and the notification message box.

pub mod encode;
pub mod notify;
pub mod ocr;

#[cfg(windows)]
pub mod clipboard;

pub use ocr::OcrClient;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("OCR request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OCR backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("OCR response had no `ocr_result` field")]
    MissingField,

    #[error("clipboard unavailable: {0}")]
    Clipboard(&'static str),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
