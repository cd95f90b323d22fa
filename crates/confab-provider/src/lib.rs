//! Transcript provider client.
//!
//! Talks GraphQL to the hosted transcription service, parses the loose
//! payload into the typed [`Transcript`] model at the boundary, and rejects
//! malformed shapes before any extractor runs. The original integration had
//! no timeout and no retry; here every request carries a timeout and
//! transport failures are retried once — auth failures, missing
//! transcripts, and API errors never retry.

mod payload;

use std::time::Duration;

use confab_core::{Transcript, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use payload::parse_transcript;

/// Default GraphQL endpoint of the transcription provider.
pub const DEFAULT_ENDPOINT: &str = "https://api.fireflies.ai/graphql";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause before the single transport-level retry.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Meeting list entry: enough to drive skip logic and error reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingHead {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A fetch failure for one meeting. Isolated per item by the orchestrator:
/// recorded and skipped, never batch-fatal.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("provider transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider rejected credentials (HTTP {0})")]
    Auth(u16),
    #[error("provider returned HTTP {0}")]
    Status(u16),
    #[error("provider returned GraphQL errors: {0}")]
    Api(String),
    #[error("transcript {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Read interface to the transcript provider. The orchestrator only sees
/// this trait; tests drive it with an in-memory source.
#[async_trait::async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn list_meetings(&self, limit: usize) -> Result<Vec<MeetingHead>, FetchError>;
    async fn fetch_transcript(&self, id: &str) -> Result<Transcript, FetchError>;
}

const LIST_QUERY: &str = r#"
query ListTranscripts($limit: Int) {
  transcripts(limit: $limit) {
    id
    title
    date
  }
}
"#;

const TRANSCRIPT_QUERY: &str = r#"
query GetTranscript($id: String!) {
  transcript(id: $id) {
    title
    id
    transcript_url
    audio_url
    video_url
    duration
    date
    participants
    host_email
    organizer_email
    meeting_attendees {
      displayName
      email
      name
    }
    analytics {
      sentiments {
        negative_pct
        neutral_pct
        positive_pct
      }
      speakers {
        speaker_id
        name
        email
        duration
        duration_pct
        word_count
        words_per_minute
        longest_monologue
        monologues_count
        filler_words
        questions
        interruptions
        talk_listen_ratio
      }
      questions {
        count
      }
      tasks {
        count
      }
      silence_duration
    }
    sentences {
      index
      text
      start_time
      end_time
      speaker_id
      speaker_name
      ai_filters {
        sentiment
        task
        pricing
        metric
        question
        date_and_time
      }
    }
    summary {
      action_items
      keywords
      outline
      overview
      notes
      shorthand_bullet
    }
    topics {
      text
      start_time
      end_time
    }
    soundbites {
      id
      title
      start_time
      end_time
      video_url
    }
  }
}
"#;

/// GraphQL client against the transcription provider.
pub struct ProviderClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ProviderClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Point the client at a non-default endpoint (tests, staging).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn graphql(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, FetchError> {
        match self.graphql_once(query, &variables).await {
            Err(FetchError::Transport(err)) => {
                tracing::warn!(error = %err, "provider request failed, retrying once");
                tokio::time::sleep(RETRY_BACKOFF).await;
                self.graphql_once(query, &variables).await
            }
            other => other,
        }
    }

    async fn graphql_once(
        &self,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<serde_json::Value, FetchError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Auth(status.as_u16()));
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
            if !errors.is_empty() {
                return Err(FetchError::Api(
                    serde_json::Value::Array(errors.clone()).to_string(),
                ));
            }
        }
        Ok(body.get("data").cloned().unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait::async_trait]
impl TranscriptSource for ProviderClient {
    async fn list_meetings(&self, limit: usize) -> Result<Vec<MeetingHead>, FetchError> {
        let data = self
            .graphql(LIST_QUERY, serde_json::json!({ "limit": limit }))
            .await?;
        payload::parse_meeting_list(data).map_err(FetchError::from)
    }

    async fn fetch_transcript(&self, id: &str) -> Result<Transcript, FetchError> {
        let data = self
            .graphql(TRANSCRIPT_QUERY, serde_json::json!({ "id": id }))
            .await?;
        let raw = data.get("transcript").cloned().unwrap_or(serde_json::Value::Null);
        if raw.is_null() {
            return Err(FetchError::NotFound(id.to_string()));
        }
        let transcript = parse_transcript(raw)?;
        transcript.validate()?;
        Ok(transcript)
    }
}
