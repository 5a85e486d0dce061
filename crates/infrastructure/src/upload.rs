//! Presigned image upload
//!
//! Sighting images never pass through the service API: the client
//! asks for a presigned slot, PUTs the bytes straight to storage, and
//! then registers the object key. This module does the middle step.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use url::Url;

use fieldfare_application::ports::{HttpTransport, TransportBody, TransportError, TransportRequest};
use fieldfare_domain::{Headers, HttpMethod};

/// Uploads are larger than API calls; give them more room.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors that can occur while uploading to a presigned URL.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The storage endpoint rejected the upload.
    #[error("upload failed with status {status}")]
    Status {
        /// HTTP status returned by the storage endpoint.
        status: u16,
    },

    /// The transport failed before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The presigned URL is not a valid URL.
    #[error("invalid presigned URL: {0}")]
    InvalidUrl(String),

    /// The file to upload could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// PUTs image bytes to presigned storage URLs.
#[derive(Clone)]
pub struct PresignedUploader {
    transport: Arc<dyn HttpTransport>,
}

impl PresignedUploader {
    /// Creates an uploader over the shared transport.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// PUTs raw bytes to a presigned URL with the given content type.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Status` for any non-2xx response.
    pub async fn upload(
        &self,
        presigned_url: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<(), UploadError> {
        let url =
            Url::parse(presigned_url).map_err(|e| UploadError::InvalidUrl(e.to_string()))?;

        debug!(url = %url, content_type, bytes = data.len(), "uploading to presigned URL");

        let request = TransportRequest::new(HttpMethod::Put, url, Headers::new(), UPLOAD_TIMEOUT)
            .with_body(TransportBody::Bytes {
                content_type: content_type.to_string(),
                data,
            });

        let response = self.transport.execute(request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(UploadError::Status {
                status: response.status,
            })
        }
    }

    /// Reads a file, guesses its content type from the extension, and
    /// uploads it. Returns the content type used so the caller can
    /// register the image with the same value.
    ///
    /// # Errors
    ///
    /// Returns I/O errors for unreadable files, plus everything
    /// [`PresignedUploader::upload`] returns.
    pub async fn upload_file(
        &self,
        presigned_url: &str,
        path: &Path,
    ) -> Result<String, UploadError> {
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .map_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string(), str::to_string);
        let data = tokio::fs::read(path).await?;
        self.upload(presigned_url, &content_type, data).await?;
        Ok(content_type)
    }
}
