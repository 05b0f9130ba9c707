//! Mapping of domain and storage failures onto HTTP responses.
//!
//! Every handler returns [`ApiResult`]. Failures become
//! `{"error": CODE, "message": text}` with the status of the underlying
//! [`AppError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meridian_core::ai::AiParseError;
use meridian_core::closing::{ClosingError, ResolveError};
use meridian_core::export::ExportError;
use meridian_core::issue::IssueError;
use meridian_db::repositories::{
    FinancialRepoError, IssueRepoError, QuarterRepoError, ScheduleRepoError,
};
use meridian_shared::{AppError, GeminiError};
use sea_orm::DbErr;
use serde_json::json;
use tracing::{error, warn};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An [`AppError`] on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// HTTP status of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "Request failed");
        } else {
            warn!(code = self.0.error_code(), error = %self.0, "Request rejected");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.user_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<ClosingError> for ApiError {
    fn from(err: ClosingError) -> Self {
        let message = err.to_string();
        Self(match err {
            ClosingError::ItemNotFound(_) => AppError::NotFound(message),
            ClosingError::AlreadyConfirmed(_) => AppError::BusinessRule(message),
            ClosingError::InconsistentConfirmation(_) => AppError::Internal(message),
            _ => AppError::Validation(message),
        })
    }
}

impl From<IssueError> for ApiError {
    fn from(err: IssueError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<IssueRepoError> for ApiError {
    fn from(err: IssueRepoError) -> Self {
        match err {
            IssueRepoError::NotFound(_) => Self(AppError::NotFound("Issue not found".to_string())),
            IssueRepoError::InvalidRecord(detail) => Self(AppError::Internal(detail)),
            IssueRepoError::Database(e) => e.into(),
        }
    }
}

impl From<ScheduleRepoError> for ApiError {
    fn from(err: ScheduleRepoError) -> Self {
        match err {
            ScheduleRepoError::NotFound(_) => {
                Self(AppError::NotFound("Schedule item not found".to_string()))
            }
            ScheduleRepoError::Duplicate => Self(AppError::Conflict(err.to_string())),
            ScheduleRepoError::Closing(e) => e.into(),
            ScheduleRepoError::InvalidRecord(detail) => Self(AppError::Internal(detail)),
            ScheduleRepoError::Database(e) => e.into(),
        }
    }
}

impl From<FinancialRepoError> for ApiError {
    fn from(err: FinancialRepoError) -> Self {
        match err {
            FinancialRepoError::InvalidRecord(detail) => Self(AppError::Internal(detail)),
            FinancialRepoError::Database(e) => e.into(),
        }
    }
}

impl From<QuarterRepoError> for ApiError {
    fn from(err: QuarterRepoError) -> Self {
        match err {
            QuarterRepoError::InvalidRecord(detail) => Self(AppError::Internal(detail)),
            QuarterRepoError::Database(e) => e.into(),
        }
    }
}

impl From<ResolveError<QuarterRepoError>> for ApiError {
    fn from(err: ResolveError<QuarterRepoError>) -> Self {
        match err {
            ResolveError::Closing(e) => e.into(),
            ResolveError::Store(e) => e.into(),
            ResolveError::Conflict { .. } => Self(AppError::Conflict(err.to_string())),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        let message = err.to_string();
        Self(match err {
            ExportError::Empty => AppError::Empty(message),
            ExportError::Xlsx(_) => AppError::Internal(message),
        })
    }
}

impl From<AiParseError> for ApiError {
    fn from(err: AiParseError) -> Self {
        warn!(error = %err, "Unusable language model reply");
        Self(AppError::ExternalService("AI 파싱 실패".to_string()))
    }
}

impl From<GeminiError> for ApiError {
    fn from(err: GeminiError) -> Self {
        error!(error = %err, "Language model call failed");
        match err {
            GeminiError::MissingApiKey => Self(AppError::Internal(err.to_string())),
            _ => Self(AppError::ExternalService("AI 파싱 실패".to_string())),
        }
    }
}
