//! Issue repository.

use std::str::FromStr;

use chrono::Utc;
use meridian_core::issue::{Issue, IssueCategory, IssueUpdate};
use meridian_shared::types::{IssueId, SubsidiaryId};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

use crate::entities::issues;

/// Error types for issue operations.
#[derive(Debug, thiserror::Error)]
pub enum IssueRepoError {
    /// Issue not found.
    #[error("Issue not found: {0}")]
    NotFound(IssueId),

    /// Stored row does not map to a valid issue.
    #[error("Invalid issue record: {0}")]
    InvalidRecord(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Issue repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct IssueRepository {
    db: DatabaseConnection,
}

impl IssueRepository {
    /// Creates a new issue repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all issues, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub async fn list(&self) -> Result<Vec<Issue>, IssueRepoError> {
        let rows = issues::Entity::find()
            .order_by_desc(issues::Column::CreatedAt)
            .all(&self.db)
            .await?;
        rows.into_iter().map(issue_from_model).collect()
    }

    /// Finds an issue by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub async fn find_by_id(&self, id: IssueId) -> Result<Option<Issue>, IssueRepoError> {
        issues::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(issue_from_model)
            .transpose()
    }

    /// Inserts a new issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, issue: &Issue) -> Result<Issue, IssueRepoError> {
        let row = issues::ActiveModel {
            id: Set(issue.id.into_inner()),
            title: Set(issue.title.clone()),
            category: Set(issue.category.as_str().to_string()),
            entity_id: Set(issue.entity_id.into_inner()),
            description: Set(issue.description.clone()),
            response: Set(issue.response.clone()),
            status: Set(issue.status.into()),
            created_by: Set(issue.created_by.clone()),
            created_at: Set(issue.created_at.into()),
            updated_at: Set(issue.updated_at.into()),
            completed_at: Set(issue.completed_at.map(Into::into)),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(issue_id = %row.id, category = %row.category, "Issue created");
        issue_from_model(row)
    }

    /// Applies a partial update and returns the stored issue.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the issue does not exist.
    pub async fn update(&self, id: IssueId, update: IssueUpdate) -> Result<Issue, IssueRepoError> {
        let model = issues::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(IssueRepoError::NotFound(id))?;

        let mut issue = issue_from_model(model.clone())?;
        issue.apply(update, Utc::now());

        let mut active = model.into_active_model();
        active.title = Set(issue.title.clone());
        active.category = Set(issue.category.as_str().to_string());
        active.description = Set(issue.description.clone());
        active.response = Set(issue.response.clone());
        active.status = Set(issue.status.into());
        active.updated_at = Set(issue.updated_at.into());
        active.completed_at = Set(issue.completed_at.map(Into::into));

        let row = active.update(&self.db).await?;
        tracing::debug!(issue_id = %row.id, status = ?row.status, "Issue updated");
        issue_from_model(row)
    }

    /// Deletes an issue.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the issue does not exist.
    pub async fn delete(&self, id: IssueId) -> Result<(), IssueRepoError> {
        let result = issues::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(IssueRepoError::NotFound(id));
        }
        tracing::info!(issue_id = %id, "Issue deleted");
        Ok(())
    }
}

fn issue_from_model(model: issues::Model) -> Result<Issue, IssueRepoError> {
    let category = IssueCategory::from_str(&model.category)
        .map_err(|e| IssueRepoError::InvalidRecord(format!("issue {}: {e}", model.id)))?;

    Ok(Issue {
        id: IssueId::from_uuid(model.id),
        title: model.title,
        category,
        entity_id: SubsidiaryId::from_uuid(model.entity_id),
        description: model.description,
        response: model.response,
        status: model.status.into(),
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        completed_at: model.completed_at.map(|at| at.with_timezone(&Utc)),
    })
}
