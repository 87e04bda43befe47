use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::config::S3Config;
use crate::errors::AppError;
use crate::extraction::DocumentKind;

/// Stores original resume uploads in S3 / MinIO.
#[derive(Clone)]
pub struct UploadStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    endpoint: String,
}

impl UploadStore {
    /// Constructs an S3 client configured for MinIO (local) or AWS (production).
    pub async fn from_config(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "mentra-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        // Path-style addressing keeps MinIO URLs of the form endpoint/bucket/key.
        let client_config = aws_sdk_s3::config::Builder::from(&s3_config)
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(client_config),
            bucket: config.bucket.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Uploads the file and returns its URL.
    pub async fn put_resume(&self, kind: DocumentKind, bytes: Bytes) -> Result<String, AppError> {
        let key = resume_key(Uuid::new_v4(), kind);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(kind.content_type())
            .send()
            .await
            .map_err(|e| AppError::S3(format!("Upload of {key} failed: {e}")))?;

        info!("Uploaded resume to s3://{}/{}", self.bucket, key);
        Ok(format!("{}/{}/{}", self.endpoint, self.bucket, key))
    }
}

fn resume_key(id: Uuid, kind: DocumentKind) -> String {
    format!("resumes/{id}.{}", kind.extension())
}
