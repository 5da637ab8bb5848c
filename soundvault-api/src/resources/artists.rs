//! Artists (soft-deleted through `is_active`)

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::validation::Validator;
use super::{DeleteMode, Resource, ResourceSpec};
use crate::error::ApiError;
use crate::query::{FilterSpec, SqlArg};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub stage_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
    #[sqlx(json)]
    pub genres: Vec<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    #[sqlx(json)]
    pub social_media: Map<String, Value>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub song_count: i64,
    pub release_count: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistInput {
    #[serde(default)]
    pub name: String,
    pub stage_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub social_media: Map<String, Value>,
}

pub struct Artists;

impl Resource for Artists {
    type Record = Artist;
    type Input = ArtistInput;

    const SPEC: ResourceSpec = ResourceSpec {
        entity: "Artist",
        table: "artists",
        alias: "a",
        select: r#"
            SELECT a.*,
                (SELECT COUNT(*) FROM recordings r WHERE r.artist_id = a.id) AS song_count,
                (SELECT COUNT(*) FROM releases rel WHERE rel.artist_id = a.id) AS release_count,
                (SELECT CAST(COALESCE(SUM(roy.revenue), 0) AS REAL)
                    FROM royalties roy WHERE roy.artist_id = a.id) AS total_revenue
            FROM artists a"#,
        count_from: "artists a",
        active: Some("is_active = 1"),
        order_by: "a.name ASC",
        filters: &[
            FilterSpec::fuzzy("search", &["a.name", "a.stage_name"]),
            FilterSpec::json_contains("genre", "a.genres"),
        ],
        columns: &[
            "name",
            "stage_name",
            "email",
            "phone",
            "birth_date",
            "nationality",
            "genres",
            "bio",
            "image_url",
            "social_media",
        ],
        delete: DeleteMode::Soft("is_active = 0"),
    };

    fn validate(input: &ArtistInput) -> Result<(), ApiError> {
        Validator::new()
            .required("name", &input.name)
            .max_len("stage_name", input.stage_name.as_deref())
            .email("email", input.email.as_deref())
            .max_len("phone", input.phone.as_deref())
            .max_len("nationality", input.nationality.as_deref())
            .finish()
    }

    fn column_values(input: &ArtistInput) -> Result<Vec<SqlArg>, serde_json::Error> {
        Ok(vec![
            input.name.trim().into(),
            input.stage_name.clone().into(),
            input.email.clone().into(),
            input.phone.clone().into(),
            input.birth_date.into(),
            input.nationality.clone().into(),
            serde_json::to_string(&input.genres)?.into(),
            input.bio.clone().into(),
            input.image_url.clone().into(),
            serde_json::to_string(&input.social_media)?.into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_name_rejected() {
        let input: ArtistInput = serde_json::from_str(r#"{"genres":["Pop"]}"#).unwrap();
        assert!(Artists::validate(&input).is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let input: ArtistInput =
            serde_json::from_str(r#"{"name":"Luna","email":"luna.example.com"}"#).unwrap();
        assert!(Artists::validate(&input).is_err());
    }

    #[test]
    fn test_json_columns_serialized() {
        let input: ArtistInput = serde_json::from_str(
            r#"{"name":" Luna ","genres":["Pop","Electronic"],"social_media":{"instagram":"@luna"}}"#,
        )
        .unwrap();
        Artists::validate(&input).unwrap();

        let values = Artists::column_values(&input).unwrap();
        assert_eq!(values[0], SqlArg::Text("Luna".into()));
        assert_eq!(values[6], SqlArg::Text(r#"["Pop","Electronic"]"#.into()));
        assert_eq!(values[9], SqlArg::Text(r#"{"instagram":"@luna"}"#.into()));
    }

    #[test]
    fn test_malformed_date_fails_decoding() {
        let result = serde_json::from_str::<ArtistInput>(r#"{"name":"Luna","birth_date":"15/03/1995"}"#);
        assert!(result.is_err());
    }
}
