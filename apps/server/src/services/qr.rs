//! # QR Code Generator
//!
//! Renders an item identifier as a PNG under the static directory and
//! hands back the public URL it is served from.
//!
//! ```text
//! GET /inventory/qr/X1
//!         │
//!         ▼
//!  validate_code_id("X1")      rejects "", ".", "..", "/", "\", NUL
//!         │
//!         ▼
//!  encode "X1" ──► 10px modules + quiet zone ──► {static_dir}/X1.png
//!         │
//!         ▼
//!  "{public_prefix}/X1.png"
//! ```
//!
//! The file on disk is named after the raw id; the returned URL carries the
//! id percent-encoded as one path segment (`kit #3` -> `kit%20%233.png`).
//! Rendering and the file write run on the blocking pool. Regenerating a
//! code overwrites the previous file.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Luma};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use qrcode::QrCode;
use tracing::debug;

use opsdesk_core::validation::validate_code_id;
use opsdesk_core::CoreError;

/// Pixel size of one QR module.
const MODULE_PX: u32 = 10;

/// Bytes escaped when an id is placed in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// QR generation failures.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    /// The identifier cannot be used as a file name.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The payload does not fit in a QR symbol.
    #[error("Failed to encode QR code: {0}")]
    Encode(String),

    /// The PNG could not be written.
    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// The blocking render task did not finish.
    #[error("QR render task failed: {0}")]
    Internal(String),
}

/// Writes QR PNGs into one directory.
#[derive(Debug, Clone)]
pub struct QrGenerator {
    static_dir: PathBuf,
    public_prefix: String,
}

impl QrGenerator {
    /// Creates a generator writing into `static_dir`, addressed under `public_prefix`.
    pub fn new(static_dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        QrGenerator {
            static_dir: static_dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// Directory the images are written to.
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// URL prefix the directory is mounted under.
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// URL an image is served from, with the id percent-encoded.
    pub fn public_url(&self, item_id: &str) -> String {
        format!(
            "{}/{}.png",
            self.public_prefix,
            utf8_percent_encode(item_id, PATH_SEGMENT)
        )
    }

    /// Renders `item_id` and returns its public URL.
    ///
    /// The id does not have to exist in inventory.
    pub async fn generate(&self, item_id: &str) -> Result<String, QrError> {
        validate_code_id(item_id)?;

        let path = self.static_dir.join(format!("{item_id}.png"));
        let payload = item_id.to_string();
        let target = path.clone();

        tokio::task::spawn_blocking(move || render_png(&payload, &target))
            .await
            .map_err(|e| QrError::Internal(e.to_string()))??;

        debug!(item_id = %item_id, path = %path.display(), "QR code written");
        Ok(self.public_url(item_id))
    }
}

fn render_png(payload: &str, path: &Path) -> Result<(), QrError> {
    let code = QrCode::new(payload.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;

    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PX, MODULE_PX)
        .quiet_zone(true)
        .build();

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| QrError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
