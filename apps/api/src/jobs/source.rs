//! Job source: pluggable, trait-based posting lookup behind the Scout stage.
//!
//! Default: `MockJobSource` (static in-memory dataset, deterministic, fully
//! testable). A real scraper or job-board API implements the same trait and
//! is swapped in `AppState` without touching the pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Scout never returns more postings than this per query.
pub const MAX_SCOUT_RESULTS: usize = 15;

/// Search parameters for a scouting run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobQuery {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A raw posting as returned by a job source, before JD extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutedJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub source_url: Option<String>,
}

/// The job source capability. Carried in `AppState` as `Arc<dyn JobSource>`.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(&self, query: &JobQuery) -> Result<Vec<ScoutedJob>, AppError>;
}

/// Static in-memory job source used until a real scraper lands.
pub struct MockJobSource;

#[async_trait]
impl JobSource for MockJobSource {
    async fn search(&self, query: &JobQuery) -> Result<Vec<ScoutedJob>, AppError> {
        Ok(filter_postings(mock_postings(), query))
    }
}

/// Case-insensitive keyword/location filter over a posting list, capped at
/// `MAX_SCOUT_RESULTS`. Empty keyword lists match everything.
fn filter_postings(postings: Vec<ScoutedJob>, query: &JobQuery) -> Vec<ScoutedJob> {
    let keywords: Vec<String> = query.keywords.iter().map(|k| k.to_lowercase()).collect();
    let location = query.location.as_ref().map(|l| l.to_lowercase());

    postings
        .into_iter()
        .filter(|p| {
            let haystack = format!("{} {} {}", p.title, p.company, p.description).to_lowercase();
            let keyword_hit =
                keywords.is_empty() || keywords.iter().any(|k| haystack.contains(k.as_str()));
            let location_hit = location
                .as_ref()
                .map(|l| p.location.to_lowercase().contains(l.as_str()))
                .unwrap_or(true);
            keyword_hit && location_hit
        })
        .take(MAX_SCOUT_RESULTS)
        .collect()
}

fn mock_postings() -> Vec<ScoutedJob> {
    let raw: &[(&str, &str, &str, &str, Option<i32>, Option<i32>)] = &[
        (
            "Senior Backend Engineer",
            "Streamline Analytics",
            "Remote",
            "Build and scale event ingestion services in Rust and Go. Required: 5+ years backend, \
             PostgreSQL, Kafka. Preferred: Kubernetes, gRPC.",
            Some(165_000),
            Some(205_000),
        ),
        (
            "Staff Software Engineer, Platform",
            "Northbeam Health",
            "New York, NY",
            "Own the platform powering clinical data pipelines. Required: distributed systems, \
             AWS, Terraform. Preferred: healthcare data, HIPAA.",
            Some(190_000),
            Some(240_000),
        ),
        (
            "Product Manager, Growth",
            "Lanternfish Labs",
            "San Francisco, CA",
            "Drive activation and retention experiments end to end. Required: 3+ years PM, SQL, \
             experimentation. Preferred: PLG experience.",
            Some(150_000),
            Some(185_000),
        ),
        (
            "Data Engineer",
            "Harborview Logistics",
            "Chicago, IL",
            "Design warehouse models and streaming pipelines. Required: Python, dbt, Airflow, \
             Snowflake. Preferred: Spark, Kafka.",
            Some(135_000),
            Some(170_000),
        ),
        (
            "Engineering Manager, Payments",
            "Copperline Financial",
            "Remote",
            "Lead a team of 7 building payment rails. Required: people management, \
             payments domain, API design. Preferred: Rust.",
            Some(200_000),
            Some(245_000),
        ),
        (
            "Machine Learning Engineer",
            "Quillwork AI",
            "Seattle, WA",
            "Ship retrieval and ranking models to production. Required: PyTorch, Python, \
             feature engineering. Preferred: LLM fine-tuning.",
            Some(175_000),
            Some(220_000),
        ),
        (
            "Frontend Engineer",
            "Pinecone Collective",
            "Austin, TX",
            "Build accessible dashboards in React and TypeScript. Required: React, TypeScript, \
             testing. Preferred: design systems.",
            Some(130_000),
            Some(160_000),
        ),
        (
            "Site Reliability Engineer",
            "Bluegrass Cloud",
            "Remote",
            "Keep a multi-region Kubernetes fleet healthy. Required: Kubernetes, Prometheus, \
             incident response. Preferred: Go.",
            Some(155_000),
            Some(195_000),
        ),
        (
            "DevOps Engineer",
            "Saltmarsh Systems",
            "Denver, CO",
            "Automate CI/CD and infrastructure as code. Required: Terraform, GitHub Actions, \
             AWS. Preferred: Docker, bash.",
            Some(140_000),
            Some(175_000),
        ),
        (
            "Full Stack Engineer",
            "Wrenhouse",
            "Remote",
            "Own features from Postgres schema to React UI. Required: TypeScript, Node.js, \
             PostgreSQL. Preferred: Rust, GraphQL.",
            Some(145_000),
            Some(180_000),
        ),
        (
            "Security Engineer",
            "Kestrel Defense",
            "Washington, DC",
            "Harden services and run threat models. Required: AppSec, cloud security, \
             Python. Preferred: Rust, eBPF.",
            Some(160_000),
            Some(200_000),
        ),
        (
            "Technical Program Manager",
            "Ironvale Robotics",
            "Boston, MA",
            "Coordinate firmware and cloud releases across 4 teams. Required: TPM experience, \
             risk tracking. Preferred: robotics.",
            Some(150_000),
            Some(185_000),
        ),
        (
            "Backend Engineer, Search",
            "Mosslight",
            "Remote",
            "Improve relevance and latency of product search. Required: Elasticsearch, Java or \
             Rust, profiling. Preferred: vector search.",
            Some(150_000),
            Some(190_000),
        ),
        (
            "Analytics Engineer",
            "Fernbrook Media",
            "Los Angeles, CA",
            "Model subscription metrics for editorial teams. Required: SQL, dbt, stakeholder \
             reporting. Preferred: Python.",
            Some(120_000),
            Some(150_000),
        ),
        (
            "Principal Engineer, Infrastructure",
            "Graywater Shipping",
            "Remote",
            "Set technical direction for a 40-engineer platform org. Required: distributed \
             systems at scale, mentorship. Preferred: Rust, Kafka.",
            Some(220_000),
            Some(280_000),
        ),
        (
            "Junior Software Engineer",
            "Thistledown Apps",
            "Portland, OR",
            "Ship mobile-backend features with mentorship. Required: one language well, \
             curiosity. Preferred: Swift or Kotlin.",
            Some(95_000),
            Some(120_000),
        ),
    ];

    raw.iter()
        .map(
            |(title, company, location, description, salary_min, salary_max)| ScoutedJob {
                title: title.to_string(),
                company: company.to_string(),
                location: location.to_string(),
                description: description.to_string(),
                salary_min: *salary_min,
                salary_max: *salary_max,
                source_url: None,
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_query_returns_at_most_cap() {
        let results = MockJobSource.search(&JobQuery::default()).await.unwrap();
        assert!(!results.is_empty());
        assert!(results.len() <= MAX_SCOUT_RESULTS);
    }

    #[tokio::test]
    async fn test_keyword_filter_matches_description() {
        let query = JobQuery {
            keywords: vec!["kubernetes".to_string()],
            location: None,
        };
        let results = MockJobSource.search(&query).await.unwrap();
        assert!(!results.is_empty());
        for job in &results {
            let haystack =
                format!("{} {} {}", job.title, job.company, job.description).to_lowercase();
            assert!(haystack.contains("kubernetes"), "{} did not match", job.title);
        }
    }

    #[tokio::test]
    async fn test_location_filter() {
        let query = JobQuery {
            keywords: vec![],
            location: Some("Remote".to_string()),
        };
        let results = MockJobSource.search(&query).await.unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(|j| j.location.to_lowercase().contains("remote")));
    }

    #[tokio::test]
    async fn test_keyword_is_case_insensitive() {
        let upper = JobQuery {
            keywords: vec!["RUST".to_string()],
            location: None,
        };
        let lower = JobQuery {
            keywords: vec!["rust".to_string()],
            location: None,
        };
        let a = MockJobSource.search(&upper).await.unwrap();
        let b = MockJobSource.search(&lower).await.unwrap();
        assert_eq!(a.len(), b.len());
        assert!(!a.is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_keyword_returns_empty() {
        let query = JobQuery {
            keywords: vec!["blacksmithing".to_string()],
            location: None,
        };
        let results = MockJobSource.search(&query).await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_dataset_exceeds_cap_so_truncation_matters() {
        assert!(mock_postings().len() > MAX_SCOUT_RESULTS);
    }
}
