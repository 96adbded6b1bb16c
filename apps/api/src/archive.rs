//! Optional S3 / MinIO archival of uploaded resume files.

use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::config::ArchiveConfig;
use crate::errors::AppError;

#[derive(Clone)]
pub struct ResumeArchive {
    s3: aws_sdk_s3::Client,
    bucket: String,
    endpoint: String,
}

impl ResumeArchive {
    /// Builds an S3 client for MinIO (local) or AWS (production).
    pub async fn connect(config: &ArchiveConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "prep-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        Self {
            s3: aws_sdk_s3::Client::new(&s3_config),
            bucket: config.bucket.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Uploads the original file and returns its URL.
    pub async fn store(
        &self,
        uid: &str,
        file_name: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<String, AppError> {
        let key = object_key(uid, file_name, Uuid::new_v4());

        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Archive(format!("Resume upload failed: {e}")))?;

        info!("Archived resume for {uid} at s3://{}/{key}", self.bucket);
        Ok(format!("{}/{}/{key}", self.endpoint, self.bucket))
    }
}

/// `resumes/<uid>/<id>-<file name>` with anything outside `[A-Za-z0-9._-]` replaced.
pub fn object_key(uid: &str, file_name: &str, id: Uuid) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    };
    format!("resumes/{}/{id}-{}", clean(uid), clean(file_name))
}
