//! Quarterly closing routes: period resolution, the schedule grid, export.
//!
//! Reads never create quarter rows. The first write into a pending quarter
//! promotes it to a persisted row.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{delete, get, patch, post},
};
use chrono::{Datelike, NaiveDate, Utc};
use meridian_core::closing::{
    AchievementSummary, ClosingCategory, Gesture, GridAction, MonthPager, NewScheduleItem,
    PeriodSelection, Quarter, ScheduleItem, YearMonth, decide, durable_for, ensure_durable,
    quarter_of_date, resolve_view,
};
use meridian_core::export::{schedule_export_filename, schedule_sheet};
use meridian_core::subsidiary::Subsidiary;
use meridian_db::{QuarterRepository, ScheduleRepository, SubsidiaryRepository};
use meridian_shared::AppError;
use meridian_shared::types::ScheduleItemId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::download::xlsx_attachment;
use crate::{ApiError, ApiResult, AppState};

const ITEM_CREATED: &str = "일정이 추가되었습니다.";
const ITEM_DELETED: &str = "일정이 삭제되었습니다.";

/// Creates the quarterly closing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quarterly-closing/quarters/resolve", post(resolve_quarter))
        .route("/quarterly-closing/schedule", get(get_schedule))
        .route("/quarterly-closing/schedule/gestures", post(apply_gesture))
        .route("/quarterly-closing/schedule/export", get(export_schedule))
        .route(
            "/quarterly-closing/schedule-items/{id}/confirm",
            patch(confirm_item),
        )
        .route("/quarterly-closing/schedule-items/{id}", delete(delete_item))
}

/// How the period is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    /// A calendar quarter.
    #[default]
    Quarter,
    /// A user date range.
    Custom,
}

/// Period selection as flat query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodQuery {
    /// `quarter` or `custom`.
    #[serde(default)]
    pub mode: PeriodMode,
    /// Quarter mode: calendar year, defaults to the current one.
    pub year: Option<i32>,
    /// Quarter mode: quarter number, defaults to the current one.
    pub quarter: Option<u8>,
    /// Custom mode: first day.
    pub start: Option<NaiveDate>,
    /// Custom mode: last day, defaults to `start`.
    pub end: Option<NaiveDate>,
    /// Month page in `YYYY-MM`, defaults to the first month of the span.
    pub month: Option<String>,
}

impl PeriodQuery {
    /// The selection described by the query; `today` fills a missing quarter.
    ///
    /// # Errors
    ///
    /// Returns a validation error when custom mode has no start date.
    pub fn selection(&self, today: NaiveDate) -> ApiResult<PeriodSelection> {
        match self.mode {
            PeriodMode::Quarter => Ok(PeriodSelection::Quarter {
                year: self.year.unwrap_or_else(|| today.year()),
                quarter: self.quarter.unwrap_or_else(|| quarter_of_date(today)),
            }),
            PeriodMode::Custom => {
                let start = self.start.ok_or_else(|| {
                    AppError::Validation("start is required in custom mode".to_string())
                })?;
                Ok(PeriodSelection::Custom {
                    start,
                    end: self.end,
                })
            }
        }
    }

    /// The requested month page, if any.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed month.
    pub fn month(&self) -> ApiResult<Option<YearMonth>> {
        self.month
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(|m| m.parse::<YearMonth>().map_err(|e| ApiError(AppError::Validation(e))))
            .transpose()
    }
}

/// Request body for resolving a durable quarter.
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveQuarterRequest {
    /// Calendar year.
    #[validate(range(min = 1900, max = 9999))]
    pub year: i32,
    /// Quarter number.
    #[validate(range(min = 1, max = 4))]
    pub quarter: u8,
}

/// Request body for a grid gesture.
#[derive(Debug, Deserialize)]
pub struct GestureRequest {
    /// Active view.
    pub period: PeriodQuery,
    /// What the user did.
    pub gesture: Gesture,
}

/// Request body for confirming an item.
#[derive(Debug, Deserialize)]
pub struct ConfirmItemRequest {
    /// Date the closing task was completed.
    pub confirmed_date: NaiveDate,
}

/// A closing category as shown in the sidebar.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryEntry {
    /// Stable id.
    pub id: ClosingCategory,
    /// Display label.
    pub label: &'static str,
    /// Badge colour.
    pub color: &'static str,
}

/// The month page of the grid.
#[derive(Debug, Clone, Serialize)]
pub struct MonthPage {
    /// Month shown.
    pub current: YearMonth,
    /// `2025년 3월`.
    pub heading: String,
    /// Previous month, when inside the span.
    pub prev: Option<YearMonth>,
    /// Next month, when inside the span.
    pub next: Option<YearMonth>,
    /// False on the first month of the span.
    pub can_go_prev: bool,
    /// False on the last month of the span.
    pub can_go_next: bool,
    /// Grid columns.
    pub days: Vec<NaiveDate>,
}

impl From<&MonthPager> for MonthPage {
    fn from(pager: &MonthPager) -> Self {
        Self {
            current: pager.current(),
            heading: pager.current().heading(),
            prev: pager.prev().map(|p| p.current()),
            next: pager.next().map(|p| p.current()),
            can_go_prev: pager.can_go_prev(),
            can_go_next: pager.can_go_next(),
            days: pager.visible_days(),
        }
    }
}

/// Everything the schedule page renders.
#[derive(Debug, Serialize)]
pub struct ScheduleView {
    /// Active quarter or range.
    pub quarter: Quarter,
    /// True when a custom range was cut to the maximum length.
    pub range_truncated: bool,
    /// True in custom mode, where no items can be added.
    pub read_only: bool,
    /// Month page.
    pub month: MonthPage,
    /// Grid rows, ordered by name.
    pub subsidiaries: Vec<Subsidiary>,
    /// Sidebar categories.
    pub categories: Vec<CategoryEntry>,
    /// Items of the quarter.
    pub items: Vec<ScheduleItem>,
    /// Achievement rates.
    pub achievement: AchievementSummary,
}

/// Result of a grid gesture.
#[derive(Debug, Serialize)]
pub struct GestureResponse {
    /// What happened or what to ask next.
    #[serde(flatten)]
    pub action: GridAction,
    /// Text for the user, if any.
    pub message: Option<&'static str>,
    /// Item created by this gesture.
    pub item: Option<ScheduleItem>,
    /// The quarter after the gesture; persisted once an item was created.
    pub quarter: Quarter,
}

/// The confirmation toast, e.g. `일정이 2025년 03월 15일에 확정되었습니다.`
pub fn confirmed_message(date: NaiveDate) -> String {
    format!("일정이 {}에 확정되었습니다.", date.format("%Y년 %m월 %d일"))
}

fn today(state: &AppState) -> NaiveDate {
    Utc::now().with_timezone(&state.export.tz).date_naive()
}

fn category_entries() -> Vec<CategoryEntry> {
    ClosingCategory::ALL
        .into_iter()
        .map(|category| CategoryEntry {
            id: category,
            label: category.label(),
            color: category.color(),
        })
        .collect()
}

/// Resolves the view and loads subsidiaries and items concurrently.
async fn load_view(
    state: &AppState,
    period: &PeriodQuery,
) -> ApiResult<(Quarter, bool, Vec<Subsidiary>, Vec<ScheduleItem>)> {
    let quarters = QuarterRepository::new((*state.db).clone());
    let resolved = resolve_view(&quarters, period.selection(today(state))?).await?;

    let subsidiaries = SubsidiaryRepository::new((*state.db).clone());
    let schedule = ScheduleRepository::new((*state.db).clone());
    let durable = resolved.quarter.durable_id();
    let (subsidiaries, items) = futures::try_join!(
        async { subsidiaries.list().await.map_err(ApiError::from) },
        async {
            match durable {
                Some(quarter_id) => schedule
                    .list_for_quarter(quarter_id)
                    .await
                    .map_err(ApiError::from),
                None => Ok(Vec::new()),
            }
        },
    )?;

    Ok((resolved.quarter, resolved.range_truncated, subsidiaries, items))
}

/// POST `/quarterly-closing/quarters/resolve` - Find or create the durable quarter.
async fn resolve_quarter(
    State(state): State<AppState>,
    Json(payload): Json<ResolveQuarterRequest>,
) -> ApiResult<Json<Quarter>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let quarters = QuarterRepository::new((*state.db).clone());
    let quarter = ensure_durable(&quarters, payload.year, payload.quarter).await?;
    Ok(Json(quarter))
}

/// GET `/quarterly-closing/schedule` - Grid, items and rates for a period.
async fn get_schedule(
    State(state): State<AppState>,
    Query(period): Query<PeriodQuery>,
) -> ApiResult<Json<ScheduleView>> {
    let month = period.month()?;
    let (quarter, range_truncated, subsidiaries, items) = load_view(&state, &period).await?;
    let pager = MonthPager::at(quarter.start_date, quarter.end_date, month)?;

    Ok(Json(ScheduleView {
        read_only: quarter.is_custom(),
        range_truncated,
        month: MonthPage::from(&pager),
        achievement: AchievementSummary::compute(&items, &subsidiaries),
        categories: category_entries(),
        quarter,
        subsidiaries,
        items,
    }))
}

/// POST `/quarterly-closing/schedule/gestures` - Run a grid gesture.
async fn apply_gesture(
    State(state): State<AppState>,
    Json(payload): Json<GestureRequest>,
) -> ApiResult<Json<GestureResponse>> {
    let (quarter, _, _, items) = load_view(&state, &payload.period).await?;
    let action = decide(&quarter, &items, &payload.gesture)?;

    let GridAction::Create {
        subsidiary_id,
        category,
        planned_date,
    } = action
    else {
        return Ok(Json(GestureResponse {
            message: action.message(),
            action,
            item: None,
            quarter,
        }));
    };

    let quarters = QuarterRepository::new((*state.db).clone());
    let durable = durable_for(&quarters, &quarter).await?;
    let quarter_id = durable
        .durable_id()
        .ok_or_else(|| AppError::Internal(format!("quarter {} has no id", durable.key)))?;

    let item = ScheduleRepository::new((*state.db).clone())
        .create(NewScheduleItem {
            quarter_id,
            subsidiary_id,
            category,
            planned_date,
        })
        .await?;

    Ok(Json(GestureResponse {
        action,
        message: Some(ITEM_CREATED),
        item: Some(item),
        quarter: durable,
    }))
}

/// GET `/quarterly-closing/schedule/export` - Schedule sheet as an XLSX download.
async fn export_schedule(
    State(state): State<AppState>,
    Query(period): Query<PeriodQuery>,
) -> ApiResult<Response> {
    let (quarter, _, subsidiaries, items) = load_view(&state, &period).await?;
    let sheet = schedule_sheet(
        &quarter,
        &items,
        &subsidiaries,
        state.export.entity_name_prefix.as_deref(),
    )?;
    xlsx_attachment(&sheet, &schedule_export_filename(&quarter, today(&state)))
}

/// PATCH `/quarterly-closing/schedule-items/{id}/confirm` - Confirm a planned item.
async fn confirm_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConfirmItemRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = ScheduleItemId::from_uuid(id);
    let item = ScheduleRepository::new((*state.db).clone())
        .confirm(id, payload.confirmed_date)
        .await?;
    Ok(Json(json!({
        "item": item,
        "message": confirmed_message(payload.confirmed_date),
    })))
}

/// DELETE `/quarterly-closing/schedule-items/{id}` - Delete an item.
async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let id = ScheduleItemId::from_uuid(id);
    ScheduleRepository::new((*state.db).clone())
        .delete(id)
        .await?;
    Ok((StatusCode::OK, Json(json!({ "message": ITEM_DELETED }))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quarter_mode_defaults_to_today() {
        let selection = PeriodQuery::default().selection(date(2025, 8, 20)).unwrap();
        assert_eq!(
            selection,
            PeriodSelection::Quarter {
                year: 2025,
                quarter: 3
            }
        );
    }

    #[test]
    fn test_custom_mode_requires_start() {
        let query = PeriodQuery {
            mode: PeriodMode::Custom,
            ..PeriodQuery::default()
        };
        let err = query.selection(date(2025, 1, 1)).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_custom_mode_passes_range_through() {
        let query = PeriodQuery {
            mode: PeriodMode::Custom,
            start: Some(date(2025, 3, 1)),
            end: Some(date(2025, 3, 20)),
            ..PeriodQuery::default()
        };
        assert_eq!(
            query.selection(date(2025, 1, 1)).unwrap(),
            PeriodSelection::Custom {
                start: date(2025, 3, 1),
                end: Some(date(2025, 3, 20)),
            }
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("2025-03"), Some(YearMonth { year: 2025, month: 3 }))]
    fn test_month_parameter(#[case] raw: Option<&str>, #[case] expected: Option<YearMonth>) {
        let query = PeriodQuery {
            month: raw.map(str::to_string),
            ..PeriodQuery::default()
        };
        assert_eq!(query.month().unwrap(), expected);
    }

    #[test]
    fn test_malformed_month_is_rejected() {
        let query = PeriodQuery {
            month: Some("March".to_string()),
            ..PeriodQuery::default()
        };
        assert!(query.month().is_err());
    }

    #[test]
    fn test_query_string_deserializes() {
        let query: PeriodQuery =
            serde_json::from_value(json!({"mode": "custom", "start": "2025-03-01"})).unwrap();
        assert_eq!(query.mode, PeriodMode::Custom);
        assert_eq!(query.start, Some(date(2025, 3, 1)));
        assert_eq!(query.end, None);
    }

    #[test]
    fn test_month_page_on_first_month() {
        let pager = MonthPager::new(date(2025, 1, 1), date(2025, 3, 31));
        let page = MonthPage::from(&pager);

        assert_eq!(page.heading, "2025년 1월");
        assert!(!page.can_go_prev);
        assert!(page.can_go_next);
        assert_eq!(page.prev, None);
        assert_eq!(page.next, Some(YearMonth { year: 2025, month: 2 }));
        assert_eq!(page.days.len(), 31);
    }

    #[test]
    fn test_confirmed_message_format() {
        assert_eq!(
            confirmed_message(date(2025, 3, 15)),
            "일정이 2025년 03월 15일에 확정되었습니다."
        );
    }

    #[test]
    fn test_sidebar_lists_every_category() {
        let entries = category_entries();
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[0].id, ClosingCategory::EmployeeJd);
    }

    #[test]
    fn test_gesture_request_deserializes() {
        let body = json!({
            "period": {"mode": "quarter", "year": 2025, "quarter": 1},
            "gesture": {
                "gesture": "category_drop",
                "subsidiary_id": Uuid::nil(),
                "date": "2025-03-10",
                "category": "sales-detail"
            }
        });
        let request: GestureRequest = serde_json::from_value(body).unwrap();
        assert!(matches!(
            request.gesture,
            Gesture::CategoryDrop {
                category: ClosingCategory::SalesDetail,
                ..
            }
        ));
    }
}
