//! Releases (hard-deleted)

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::Validator;
use super::{DeleteMode, Resource, ResourceSpec};
use crate::error::ApiError;
use crate::query::{FilterSpec, SqlArg};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Release {
    pub id: String,
    pub title: String,
    pub artist_id: Option<String>,
    pub label_id: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub release_date: Option<NaiveDate>,
    pub total_duration: Option<i64>,
    pub track_count: Option<i64>,
    pub cover_url: Option<String>,
    #[sqlx(json)]
    pub genres: Vec<String>,
    #[sqlx(json)]
    pub platforms: Vec<String>,
    pub status: String,
    pub upc: Option<String>,
    pub catalog_number: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub artist_name: Option<String>,
    pub artist_stage_name: Option<String>,
    pub label_name: Option<String>,
}

fn default_status() -> String {
    "draft".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseInput {
    #[serde(default)]
    pub title: String,
    pub artist_id: Option<String>,
    pub label_id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: String,
    pub release_date: Option<NaiveDate>,
    pub total_duration: Option<i64>,
    pub track_count: Option<i64>,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub upc: Option<String>,
    pub catalog_number: Option<String>,
    pub description: Option<String>,
}

pub struct Releases;

impl Resource for Releases {
    type Record = Release;
    type Input = ReleaseInput;

    const SPEC: ResourceSpec = ResourceSpec {
        entity: "Release",
        table: "releases",
        alias: "r",
        select: r#"
            SELECT r.*,
                a.name AS artist_name,
                a.stage_name AS artist_stage_name,
                l.name AS label_name
            FROM releases r
            LEFT JOIN artists a ON a.id = r.artist_id
            LEFT JOIN labels l ON l.id = r.label_id"#,
        count_from: "releases r",
        active: None,
        order_by: "r.release_date DESC, r.rowid DESC",
        filters: &[
            FilterSpec::fuzzy("search", &["r.title", "r.description"]),
            FilterSpec::exact("type", "r.type"),
            FilterSpec::exact("status", "r.status"),
            FilterSpec::exact("artist_id", "r.artist_id"),
            FilterSpec::exact("label_id", "r.label_id"),
        ],
        columns: &[
            "title",
            "artist_id",
            "label_id",
            "type",
            "release_date",
            "total_duration",
            "track_count",
            "cover_url",
            "genres",
            "platforms",
            "status",
            "upc",
            "catalog_number",
            "description",
        ],
        delete: DeleteMode::Hard,
    };

    fn validate(input: &ReleaseInput) -> Result<(), ApiError> {
        Validator::new()
            .required("title", &input.title)
            .required("type", &input.kind)
            .non_negative("total_duration", input.total_duration)
            .non_negative("track_count", input.track_count)
            .max_len("upc", input.upc.as_deref())
            .max_len("catalog_number", input.catalog_number.as_deref())
            .required("status", &input.status)
            .finish()
    }

    fn column_values(input: &ReleaseInput) -> Result<Vec<SqlArg>, serde_json::Error> {
        Ok(vec![
            input.title.trim().into(),
            input.artist_id.clone().filter(|id| !id.is_empty()).into(),
            input.label_id.clone().filter(|id| !id.is_empty()).into(),
            input.kind.trim().into(),
            input.release_date.into(),
            input.total_duration.into(),
            input.track_count.into(),
            input.cover_url.clone().into(),
            serde_json::to_string(&input.genres)?.into(),
            serde_json::to_string(&input.platforms)?.into(),
            input.status.trim().into(),
            input.upc.clone().into(),
            input.catalog_number.clone().into(),
            input.description.clone().into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_and_title_required() {
        let input: ReleaseInput = serde_json::from_str(r#"{}"#).unwrap();
        let err = Releases::validate(&input).unwrap_err();
        assert_eq!(err.to_string(), "title is required; type is required");
    }

    #[test]
    fn test_negative_track_count_rejected() {
        let input: ReleaseInput =
            serde_json::from_str(r#"{"title":"Dawn","type":"album","track_count":-2}"#).unwrap();
        assert!(Releases::validate(&input).is_err());
    }

    #[test]
    fn test_platforms_serialized() {
        let input: ReleaseInput = serde_json::from_str(
            r#"{"title":"Dawn","type":"album","release_date":"2024-06-01","platforms":["Spotify"]}"#,
        )
        .unwrap();
        let values = Releases::column_values(&input).unwrap();
        assert_eq!(values[4], SqlArg::Text("2024-06-01".into()));
        assert_eq!(values[9], SqlArg::Text(r#"["Spotify"]"#.into()));
        assert_eq!(values[10], SqlArg::Text("draft".into()));
    }
}
