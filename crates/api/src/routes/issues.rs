//! Issue tracking routes.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use meridian_core::ai::{IssueSuggestion, build_prompt, parse_response};
use meridian_core::export::{issue_export_filename, issue_sheet};
use meridian_core::issue::{
    CategoryCount, EntityCount, Issue, IssueCategory, IssueDraft, IssueFilters, IssueSort,
    IssueStats, IssueStatus, IssueUpdate, category_counts, entity_counts, filter_and_sort,
};
use meridian_db::{IssueRepository, SubsidiaryRepository};
use meridian_shared::AppError;
use meridian_shared::types::{IssueId, SubsidiaryId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::download::xlsx_attachment;
use crate::{ApiError, ApiResult, AppState};

/// Creates the issue routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/issues", get(list_issues).post(create_issue))
        .route("/issues/export", get(export_issues))
        .route("/issues/parse", post(parse_issue))
        .route(
            "/issues/{id}",
            get(get_issue).patch(update_issue).delete(delete_issue),
        )
        .route("/issues/{id}/complete", post(complete_issue))
}

/// List and export query. Set-valued filters are comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct IssueListQuery {
    /// Free text over title, category and subsidiary name.
    pub search: Option<String>,
    /// Category names, e.g. `Tax,Lease`.
    pub categories: Option<String>,
    /// Subsidiary IDs.
    pub entities: Option<String>,
    /// Statuses, `확인 중` and/or `완료`.
    pub statuses: Option<String>,
    /// `created_desc` (default), `created_asc`, `entity` or `category`.
    pub sort: Option<String>,
}

impl IssueListQuery {
    /// Parses the query into filters and a sort order.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown value.
    pub fn parse(&self) -> ApiResult<(IssueFilters, IssueSort)> {
        let filters = IssueFilters {
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            categories: split_list(self.categories.as_deref(), IssueCategory::from_str)?,
            entities: split_list(self.entities.as_deref(), |s| {
                Uuid::parse_str(s)
                    .map(SubsidiaryId::from_uuid)
                    .map_err(|_| AppError::Validation(format!("Invalid subsidiary id: {s}")))
            })?,
            statuses: split_list(self.statuses.as_deref(), IssueStatus::from_str)?,
        };
        let sort = self
            .sort
            .as_deref()
            .map(IssueSort::from_str)
            .transpose()?
            .unwrap_or_default();
        Ok((filters, sort))
    }
}

fn split_list<T, E>(raw: Option<&str>, parse: impl Fn(&str) -> Result<T, E>) -> ApiResult<Vec<T>>
where
    ApiError: From<E>,
{
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse(part).map_err(ApiError::from))
        .collect()
}

/// Response for the issue list.
#[derive(Debug, Serialize)]
pub struct IssueListResponse {
    /// Filtered and sorted issues.
    pub issues: Vec<Issue>,
    /// Statistics over all issues.
    pub stats: IssueStats,
    /// Issue count per category.
    pub category_counts: Vec<CategoryCount>,
    /// Issue count per subsidiary.
    pub entity_counts: Vec<EntityCount>,
}

/// Request body for creating an issue.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIssueRequest {
    /// Title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Category.
    pub category: IssueCategory,
    /// Owning subsidiary.
    pub entity_id: Uuid,
    /// Description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Optional response.
    pub response: Option<String>,
    /// Initial status.
    pub status: Option<IssueStatus>,
    /// Author.
    #[validate(length(min = 1, max = 100))]
    pub created_by: String,
}

impl From<CreateIssueRequest> for IssueDraft {
    fn from(req: CreateIssueRequest) -> Self {
        Self {
            title: req.title,
            category: req.category,
            entity_id: SubsidiaryId::from_uuid(req.entity_id),
            description: req.description,
            response: req.response,
            status: req.status,
            created_by: req.created_by,
        }
    }
}

/// Request body for updating an issue. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateIssueRequest {
    /// New title.
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    /// New category.
    pub category: Option<IssueCategory>,
    /// New description.
    #[validate(length(min = 1))]
    pub description: Option<String>,
    /// New response; blank clears it.
    pub response: Option<String>,
    /// New status.
    pub status: Option<IssueStatus>,
}

impl From<UpdateIssueRequest> for IssueUpdate {
    fn from(req: UpdateIssueRequest) -> Self {
        Self {
            title: req.title,
            category: req.category,
            description: req.description,
            response: req.response,
            status: req.status,
        }
    }
}

/// Request body for AI-assisted drafting.
#[derive(Debug, Deserialize, Validate)]
pub struct ParseIssueRequest {
    /// Free-text description of the issue.
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
}

fn validation(err: &validator::ValidationErrors) -> ApiError {
    AppError::Validation(err.to_string()).into()
}

/// GET `/issues` - Filtered list with statistics.
async fn list_issues(
    State(state): State<AppState>,
    Query(query): Query<IssueListQuery>,
) -> ApiResult<Json<IssueListResponse>> {
    let (filters, sort) = query.parse()?;
    let (issues, subsidiaries) = load_issues_and_subsidiaries(&state).await?;

    Ok(Json(IssueListResponse {
        stats: IssueStats::compute(&issues),
        category_counts: category_counts(&issues),
        entity_counts: entity_counts(&issues, &subsidiaries),
        issues: filter_and_sort(&issues, &subsidiaries, &filters, sort),
    }))
}

/// GET `/issues/export` - Filtered list as an XLSX download.
async fn export_issues(
    State(state): State<AppState>,
    Query(query): Query<IssueListQuery>,
) -> ApiResult<Response> {
    let (filters, sort) = query.parse()?;
    let (issues, subsidiaries) = load_issues_and_subsidiaries(&state).await?;
    let selected = filter_and_sort(&issues, &subsidiaries, &filters, sort);

    let sheet = issue_sheet(&selected, &subsidiaries, state.export.tz)?;
    xlsx_attachment(&sheet, &issue_export_filename(Utc::now(), state.export.tz))
}

async fn load_issues_and_subsidiaries(
    state: &AppState,
) -> ApiResult<(Vec<Issue>, Vec<meridian_core::subsidiary::Subsidiary>)> {
    let issues = IssueRepository::new((*state.db).clone());
    let subsidiaries = SubsidiaryRepository::new((*state.db).clone());
    futures::try_join!(
        async { issues.list().await.map_err(ApiError::from) },
        async { subsidiaries.list().await.map_err(ApiError::from) },
    )
}

/// POST `/issues` - Create an issue.
async fn create_issue(
    State(state): State<AppState>,
    Json(payload): Json<CreateIssueRequest>,
) -> ApiResult<impl IntoResponse> {
    payload.validate().map_err(|e| validation(&e))?;
    let draft = IssueDraft::from(payload);
    draft.validate()?;

    let subsidiaries = SubsidiaryRepository::new((*state.db).clone());
    if subsidiaries.find_by_id(draft.entity_id).await?.is_none() {
        return Err(AppError::Validation(format!("Unknown subsidiary: {}", draft.entity_id)).into());
    }

    let issue = Issue::from_draft(IssueId::new(), draft, Utc::now());
    let created = IssueRepository::new((*state.db).clone())
        .create(&issue)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET `/issues/{id}` - Issue detail.
async fn get_issue(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Issue>> {
    let issue = IssueRepository::new((*state.db).clone())
        .find_by_id(IssueId::from_uuid(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;
    Ok(Json(issue))
}

/// PATCH `/issues/{id}` - Partial update.
async fn update_issue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateIssueRequest>,
) -> ApiResult<Json<Issue>> {
    payload.validate().map_err(|e| validation(&e))?;
    let update = IssueUpdate::from(payload);
    update.validate()?;

    let issue = IssueRepository::new((*state.db).clone())
        .update(IssueId::from_uuid(id), update)
        .await?;
    Ok(Json(issue))
}

/// POST `/issues/{id}/complete` - Mark an issue completed.
async fn complete_issue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Issue>> {
    let issue = IssueRepository::new((*state.db).clone())
        .update(IssueId::from_uuid(id), IssueUpdate::complete())
        .await?;
    info!(issue_id = %issue.id, "Issue completed");
    Ok(Json(issue))
}

/// DELETE `/issues/{id}` - Delete an issue.
async fn delete_issue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    IssueRepository::new((*state.db).clone())
        .delete(IssueId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/issues/parse` - Draft an issue from free text with the language model.
async fn parse_issue(
    State(state): State<AppState>,
    Json(payload): Json<ParseIssueRequest>,
) -> ApiResult<Json<IssueSuggestion>> {
    payload.validate().map_err(|e| validation(&e))?;
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text is required".to_string()).into());
    }

    let subsidiaries = SubsidiaryRepository::new((*state.db).clone()).list().await?;
    let reply = state.gemini.generate(&build_prompt(text, &subsidiaries)).await?;
    let suggestion = parse_response(&reply, &subsidiaries)?;

    if suggestion.entity_id.is_none() {
        warn!(entity = %suggestion.entity_code, "Suggested entity matched no subsidiary");
    }
    Ok(Json(suggestion))
}
