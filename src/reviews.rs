//! Review submission and listing.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};
use serde::Deserialize;

use crate::catalog::MovieCatalog;
use crate::entity::review::{self, ActiveModel as ReviewActiveModel, Entity as Review};
use crate::error::{AppResult, ValidationError};

/// The review form exactly as posted. Absent fields are treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub moviename: String,
    #[serde(default)]
    pub actorname: String,
    #[serde(default)]
    pub comment: String,
}

/// A review that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub first_name: String,
    pub last_name: String,
    pub movie_name: String,
    pub actor_name: String,
    pub comment: String,
}

impl ReviewForm {
    /// All five fields must be non-empty and the movie must be in `catalog`.
    pub fn validate(self, catalog: &MovieCatalog) -> Result<NewReview, ValidationError> {
        let fields = [
            &self.firstname,
            &self.lastname,
            &self.moviename,
            &self.actorname,
            &self.comment,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ValidationError::MissingField);
        }
        if !catalog.contains(&self.moviename) {
            return Err(ValidationError::InvalidMovie);
        }

        Ok(NewReview {
            first_name: self.firstname,
            last_name: self.lastname,
            movie_name: self.moviename,
            actor_name: self.actorname,
            comment: self.comment,
        })
    }
}

/// Access to the `movies` table, where reviews are kept.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    /// Creates a repository over the shared pool.
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Validates and appends one review row.
    pub async fn submit(&self, form: ReviewForm, catalog: &MovieCatalog) -> AppResult<review::Model> {
        let review = form.validate(catalog)?;
        let row = ReviewActiveModel {
            id: NotSet,
            first_name: Set(review.first_name),
            last_name: Set(review.last_name),
            movie_name: Set(review.movie_name),
            actor_name: Set(review.actor_name),
            comment: Set(review.comment),
        };
        Ok(row.insert(&self.conn).await?)
    }

    /// Every review, oldest first.
    pub async fn all(&self) -> AppResult<Vec<review::Model>> {
        Ok(Review::find()
            .order_by_asc(review::Column::Id)
            .all(&self.conn)
            .await?)
    }
}
