//! Async client for the scheduling service's HTTP API.
//!
//! One thin method per endpoint; every failure is converted to
//! `PipecalError::Fetch` at this boundary so nothing upstream has to
//! know about reqwest.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use url::Url;

use pipecal_core::error::{PipecalError, PipecalResult};
use pipecal_core::navigate::ViewMode;
use pipecal_core::normalize::{DayBucket, RawEvent, flatten_buckets};
use pipecal_core::stage::{PipelineStage, interview_stages};

use crate::draft::EventDraft;

pub struct ScheduleApi {
    http: reqwest::Client,
    base: Url,
}

impl ScheduleApi {
    /// Create a client for the service at `base` (e.g.
    /// `http://localhost:8000/api`).
    pub fn new(base: &str) -> PipecalResult<Self> {
        // A trailing slash makes Url::join treat the last segment as a
        // directory instead of replacing it.
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&normalized)
            .map_err(|e| PipecalError::Config(format!("Invalid API base '{base}': {e}")))?;
        Ok(ScheduleApi {
            http: reqwest::Client::new(),
            base,
        })
    }

    fn endpoint(&self, path: &str) -> PipecalResult<Url> {
        self.base
            .join(path)
            .map_err(|e| PipecalError::Fetch(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> PipecalResult<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| PipecalError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| PipecalError::Fetch(e.to_string()))?;
        response
            .json::<T>()
            .await
            .map_err(|e| PipecalError::Fetch(e.to_string()))
    }

    /// Fetch the raw events for one visible window.
    ///
    /// The endpoint buckets events by day; the buckets are flattened
    /// here since normalization re-derives each event's date anyway.
    pub async fn fetch_events(
        &self,
        view: ViewMode,
        start: NaiveDate,
        job_id: &str,
    ) -> PipecalResult<Vec<RawEvent>> {
        let url = self.endpoint("interviews/calendar")?;
        let start = start.to_string();
        let buckets: Vec<DayBucket> = self
            .get_json(
                url,
                &[("view", view.as_str()), ("start", &start), ("job_id", job_id)],
            )
            .await?;
        Ok(flatten_buckets(buckets))
    }

    /// Fetch the pipeline stages for a job, already filtered to the
    /// interview stages (after the shortlist checkpoint, no archives).
    pub async fn fetch_stages(&self, job_id: &str) -> PipecalResult<Vec<PipelineStage>> {
        let url = self.endpoint("pipeline/stages")?;
        let stages: Vec<PipelineStage> = self.get_json(url, &[("job_id", job_id)]).await?;
        Ok(interview_stages(stages))
    }

    /// Create an interview event. The draft is passed through as-is.
    pub async fn create_event(&self, draft: &EventDraft) -> PipecalResult<RawEvent> {
        let url = self.endpoint("interviews")?;
        let response = self
            .http
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| PipecalError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| PipecalError::Fetch(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| PipecalError::Fetch(e.to_string()))
    }

    /// Update an existing interview event.
    pub async fn update_event(&self, id: &str, draft: &EventDraft) -> PipecalResult<RawEvent> {
        let url = self.endpoint(&format!("interviews/{id}"))?;
        let response = self
            .http
            .patch(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| PipecalError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| PipecalError::Fetch(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| PipecalError::Fetch(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_stages_applies_the_upstream_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pipeline/stages"))
            .and(query_param("job_id", "job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "s1", "name": "First Round", "slug": "first-round", "sort_order": 1 },
                { "id": "s2", "name": "Shortlisted", "slug": "shortlisted", "sort_order": 2 },
                { "id": "s3", "name": "HR Round", "slug": "hr-round", "sort_order": 3 },
                { "id": "s4", "name": "Archives", "slug": "archives", "sort_order": 9 }
            ])))
            .mount(&server)
            .await;

        let api = ScheduleApi::new(&server.uri()).unwrap();
        let stages = api.fetch_stages("job-1").await.unwrap();
        let slugs: Vec<_> = stages.into_iter().map(|stage| stage.slug).collect();
        assert_eq!(slugs, vec!["hr-round"]);
    }

    #[tokio::test]
    async fn create_event_posts_the_draft_as_is() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/interviews"))
            .and(body_partial_json(json!({
                "application": "app-1",
                "title": "Final round",
                "timezone": "UTC"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "evt-9" })))
            .mount(&server)
            .await;

        let api = ScheduleApi::new(&server.uri()).unwrap();
        let draft = EventDraft::new("app-1", "Final round", "2024-03-01T11:30", "2024-03-01T12:30");
        let created = api.create_event(&draft).await.unwrap();
        assert_eq!(created.id, "evt-9");
    }

    #[tokio::test]
    async fn base_url_without_trailing_slash_still_joins() {
        let api = ScheduleApi::new("http://localhost:8000/api").unwrap();
        let url = api.endpoint("interviews/calendar").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/interviews/calendar");
    }
}
