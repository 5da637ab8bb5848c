//! Labels (soft-deleted through `status = 'inactive'`)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::Validator;
use super::{DeleteMode, Resource, ResourceSpec};
use crate::error::ApiError;
use crate::query::{FilterSpec, SqlArg};

pub const LABEL_STATUSES: &[&str] = &["active", "inactive"];

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Label {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub publisher_id: Option<String>,
    pub location: Option<String>,
    pub founded_year: Option<i64>,
    pub logo_url: Option<String>,
    #[sqlx(json)]
    pub genres: Vec<String>,
    pub status: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub publisher_name: Option<String>,
    pub release_count: i64,
    pub artist_count: i64,
}

fn default_status() -> String {
    "active".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    pub publisher_id: Option<String>,
    pub location: Option<String>,
    pub founded_year: Option<i64>,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub description: Option<String>,
}

pub struct Labels;

impl Resource for Labels {
    type Record = Label;
    type Input = LabelInput;

    const SPEC: ResourceSpec = ResourceSpec {
        entity: "Label",
        table: "labels",
        alias: "l",
        select: r#"
            SELECT l.*,
                (SELECT p.name FROM publishers p WHERE p.id = l.publisher_id) AS publisher_name,
                (SELECT COUNT(*) FROM releases rel WHERE rel.label_id = l.id) AS release_count,
                (SELECT COUNT(DISTINCT rel.artist_id) FROM releases rel
                    WHERE rel.label_id = l.id) AS artist_count
            FROM labels l"#,
        count_from: "labels l",
        active: Some("status = 'active'"),
        order_by: "l.name ASC",
        filters: &[
            FilterSpec::fuzzy("search", &["l.name", "l.location"]),
            FilterSpec::exact("type", "l.type"),
            FilterSpec::exact("publisher_id", "l.publisher_id"),
        ],
        columns: &[
            "name",
            "type",
            "publisher_id",
            "location",
            "founded_year",
            "logo_url",
            "genres",
            "status",
            "description",
        ],
        delete: DeleteMode::Soft("status = 'inactive'"),
    };

    fn validate(input: &LabelInput) -> Result<(), ApiError> {
        Validator::new()
            .required("name", &input.name)
            .required("type", &input.kind)
            .max_len("location", input.location.as_deref())
            .range("founded_year", input.founded_year, 1800, 2100)
            .one_of("status", &input.status, LABEL_STATUSES)
            .finish()
    }

    fn column_values(input: &LabelInput) -> Result<Vec<SqlArg>, serde_json::Error> {
        Ok(vec![
            input.name.trim().into(),
            input.kind.trim().into(),
            input.publisher_id.clone().filter(|id| !id.is_empty()).into(),
            input.location.clone().into(),
            input.founded_year.into(),
            input.logo_url.clone().into(),
            serde_json::to_string(&input.genres)?.into(),
            input.status.as_str().into(),
            input.description.clone().into(),
        ])
    }
}
