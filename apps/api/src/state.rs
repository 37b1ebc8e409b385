use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::jobs::source::JobSource;
use crate::llm::TextCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Text-completion capability used by every agent stage.
    /// Swapped for a stub in tests.
    pub llm: Arc<dyn TextCompletion>,
    /// Pluggable Scout backend. Default: MockJobSource.
    pub job_source: Arc<dyn JobSource>,
    pub config: Config,
}
