//! Assembler: the final pipeline stage. Renders the application's artifacts
//! as plain-text documents, uploads them to object storage, and returns the
//! retrievable URLs.

use aws_sdk_s3::primitives::ByteStream;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::ApplicationRow;

/// URLs of the assembled application package.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactUrls {
    pub resume_url: String,
    pub cover_letter_url: String,
    pub message_url: String,
}

/// Uploads the tailored resume, cover letter, and LinkedIn message for one
/// application. Requires all three artifacts to exist: Assembler runs after
/// Tailor and Scribe.
pub async fn assemble_package(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    endpoint: &str,
    application: &ApplicationRow,
) -> Result<ArtifactUrls, AppError> {
    let resume = application.tailored_resume.as_deref().ok_or_else(|| {
        AppError::Validation("Application has no tailored resume yet: run the Tailor stage".into())
    })?;
    let cover_letter = application.cover_letter.as_deref().ok_or_else(|| {
        AppError::Validation("Application has no cover letter yet: run the Scribe stage".into())
    })?;
    let message = application.linkedin_message.as_deref().ok_or_else(|| {
        AppError::Validation("Application has no LinkedIn message yet: run the Scribe stage".into())
    })?;

    let resume_url = upload_artifact(
        s3,
        bucket,
        endpoint,
        application.id,
        "resume.md",
        "text/markdown",
        resume,
    )
    .await?;
    let cover_letter_url = upload_artifact(
        s3,
        bucket,
        endpoint,
        application.id,
        "cover_letter.txt",
        "text/plain",
        cover_letter,
    )
    .await?;
    let message_url = upload_artifact(
        s3,
        bucket,
        endpoint,
        application.id,
        "linkedin_message.txt",
        "text/plain",
        message,
    )
    .await?;

    info!("Assembled package for application {}", application.id);

    Ok(ArtifactUrls {
        resume_url,
        cover_letter_url,
        message_url,
    })
}

async fn upload_artifact(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    endpoint: &str,
    application_id: Uuid,
    file_name: &str,
    content_type: &str,
    content: &str,
) -> Result<String, AppError> {
    let key = artifact_key(application_id, file_name);
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(content.as_bytes().to_vec()))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Upload of {key} failed: {e}")))?;

    info!("Uploaded s3://{bucket}/{key}");
    Ok(artifact_url(endpoint, bucket, &key))
}

fn artifact_key(application_id: Uuid, file_name: &str) -> String {
    format!("applications/{application_id}/{file_name}")
}

fn artifact_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_key_is_namespaced_by_application() {
        let id = Uuid::new_v4();
        let key = artifact_key(id, "resume.md");
        assert_eq!(key, format!("applications/{id}/resume.md"));
    }

    #[test]
    fn test_artifact_url_handles_trailing_slash() {
        let url = artifact_url("http://localhost:9000/", "careerswarm", "applications/x/resume.md");
        assert_eq!(
            url,
            "http://localhost:9000/careerswarm/applications/x/resume.md"
        );
    }
}
