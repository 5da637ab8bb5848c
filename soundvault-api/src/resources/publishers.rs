//! Publishers (soft-deleted through `is_active`)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::Validator;
use super::{DeleteMode, Resource, ResourceSpec};
use crate::error::ApiError;
use crate::query::{FilterSpec, SqlArg};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Publisher {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub founded_year: Option<i64>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub label_count: i64,
    pub artist_count: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublisherInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub founded_year: Option<i64>,
    pub description: Option<String>,
}

pub struct Publishers;

impl Resource for Publishers {
    type Record = Publisher;
    type Input = PublisherInput;

    const SPEC: ResourceSpec = ResourceSpec {
        entity: "Publisher",
        table: "publishers",
        alias: "p",
        select: r#"
            SELECT p.*,
                (SELECT COUNT(*) FROM labels l
                    WHERE l.publisher_id = p.id AND l.status = 'active') AS label_count,
                (SELECT COUNT(DISTINCT rel.artist_id) FROM releases rel
                    JOIN labels l ON l.id = rel.label_id
                    WHERE l.publisher_id = p.id) AS artist_count,
                (SELECT CAST(COALESCE(SUM(roy.revenue), 0) AS REAL)
                    FROM royalties roy WHERE roy.publisher_id = p.id) AS total_revenue
            FROM publishers p"#,
        count_from: "publishers p",
        active: Some("is_active = 1"),
        order_by: "p.name ASC",
        filters: &[
            FilterSpec::fuzzy("search", &["p.name", "p.location"]),
            FilterSpec::exact("type", "p.type"),
        ],
        columns: &[
            "name",
            "type",
            "location",
            "email",
            "phone",
            "website",
            "logo_url",
            "founded_year",
            "description",
        ],
        delete: DeleteMode::Soft("is_active = 0"),
    };

    fn validate(input: &PublisherInput) -> Result<(), ApiError> {
        Validator::new()
            .required("name", &input.name)
            .required("type", &input.kind)
            .max_len("location", input.location.as_deref())
            .email("email", input.email.as_deref())
            .max_len("phone", input.phone.as_deref())
            .max_len("website", input.website.as_deref())
            .range("founded_year", input.founded_year, 1800, 2100)
            .finish()
    }

    fn column_values(input: &PublisherInput) -> Result<Vec<SqlArg>, serde_json::Error> {
        Ok(vec![
            input.name.trim().into(),
            input.kind.trim().into(),
            input.location.clone().into(),
            input.email.clone().into(),
            input.phone.clone().into(),
            input.website.clone().into(),
            input.logo_url.clone().into(),
            input.founded_year.into(),
            input.description.clone().into(),
        ])
    }
}
