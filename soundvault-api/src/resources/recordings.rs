//! Recordings (hard-deleted)

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::validation::Validator;
use super::{DeleteMode, Resource, ResourceSpec};
use crate::error::ApiError;
use crate::query::{FilterSpec, SqlArg};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recording {
    pub id: String,
    pub title: String,
    pub artist_id: Option<String>,
    pub album: Option<String>,
    pub duration: Option<i64>,
    pub recorded_date: Option<NaiveDate>,
    pub genre: Option<String>,
    pub bpm: Option<i64>,
    pub key_signature: Option<String>,
    pub producer: Option<String>,
    pub studio: Option<String>,
    pub status: String,
    pub file_url: Option<String>,
    pub cover_url: Option<String>,
    #[sqlx(json)]
    pub metadata: Map<String, Value>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub artist_name: Option<String>,
    pub artist_stage_name: Option<String>,
    pub total_revenue: f64,
}

fn default_status() -> String {
    "recording".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordingInput {
    #[serde(default)]
    pub title: String,
    pub artist_id: Option<String>,
    pub album: Option<String>,
    /// Seconds
    pub duration: Option<i64>,
    pub recorded_date: Option<NaiveDate>,
    pub genre: Option<String>,
    pub bpm: Option<i64>,
    pub key_signature: Option<String>,
    pub producer: Option<String>,
    pub studio: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub file_url: Option<String>,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

pub struct Recordings;

impl Resource for Recordings {
    type Record = Recording;
    type Input = RecordingInput;

    const SPEC: ResourceSpec = ResourceSpec {
        entity: "Recording",
        table: "recordings",
        alias: "r",
        select: r#"
            SELECT r.*,
                a.name AS artist_name,
                a.stage_name AS artist_stage_name,
                (SELECT CAST(COALESCE(SUM(roy.revenue), 0) AS REAL)
                    FROM royalties roy WHERE roy.recording_id = r.id) AS total_revenue
            FROM recordings r
            LEFT JOIN artists a ON a.id = r.artist_id"#,
        count_from: "recordings r",
        active: None,
        // rowid breaks ties between rows created within the same second
        order_by: "r.created_at DESC, r.rowid DESC",
        filters: &[
            FilterSpec::fuzzy("search", &["r.title", "r.album"]),
            FilterSpec::exact("genre", "r.genre"),
            FilterSpec::exact("status", "r.status"),
            FilterSpec::exact("artist_id", "r.artist_id"),
        ],
        columns: &[
            "title",
            "artist_id",
            "album",
            "duration",
            "recorded_date",
            "genre",
            "bpm",
            "key_signature",
            "producer",
            "studio",
            "status",
            "file_url",
            "cover_url",
            "metadata",
        ],
        delete: DeleteMode::Hard,
    };

    fn validate(input: &RecordingInput) -> Result<(), ApiError> {
        Validator::new()
            .required("title", &input.title)
            .max_len("album", input.album.as_deref())
            .non_negative("duration", input.duration)
            .range("bpm", input.bpm, 1, 400)
            .max_len("genre", input.genre.as_deref())
            .max_len("key_signature", input.key_signature.as_deref())
            .required("status", &input.status)
            .finish()
    }

    fn column_values(input: &RecordingInput) -> Result<Vec<SqlArg>, serde_json::Error> {
        Ok(vec![
            input.title.trim().into(),
            input.artist_id.clone().filter(|id| !id.is_empty()).into(),
            input.album.clone().into(),
            input.duration.into(),
            input.recorded_date.into(),
            input.genre.clone().into(),
            input.bpm.into(),
            input.key_signature.clone().into(),
            input.producer.clone().into(),
            input.studio.clone().into(),
            input.status.trim().into(),
            input.file_url.clone().into(),
            input.cover_url.clone().into(),
            serde_json::to_string(&input.metadata)?.into(),
        ])
    }
}
