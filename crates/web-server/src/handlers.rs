use crate::{error::AppError, AppState};
use analytics::DashboardReport;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use core_types::{DashboardTab, DateRange};
use dashboard::TabView;
use dashboard::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD`; either bound may be omitted.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct TabEntry {
    pub slug: &'static str,
    pub title: &'static str,
}

/// # GET /api/date-range
/// The approval-date bounds of the loaded dataset.
pub async fn get_date_range(State(state): State<Arc<AppState>>) -> Result<Json<DateRange>, AppError> {
    let range = state
        .dashboard
        .repository()
        .approval_bounds()
        .ok_or(DashboardError::NoApprovedOrders)?;
    Ok(Json(range))
}

/// # GET /api/tabs
pub async fn get_tabs() -> Json<Vec<TabEntry>> {
    let tabs = DashboardTab::ALL
        .into_iter()
        .map(|tab| TabEntry {
            slug: tab.slug(),
            title: tab.title(),
        })
        .collect();
    Json(tabs)
}

/// # GET /api/tabs/:tab
/// Renders one tab for the requested range.
pub async fn get_tab(
    Path(tab): Path<String>,
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TabView>, AppError> {
    let tab: DashboardTab = tab
        .parse()
        .map_err(|e: core_types::CoreError| AppError::NotFound(e.to_string()))?;
    let range = state.dashboard.resolve_range(query.start, query.end)?;
    Ok(Json(state.dashboard.render(tab, &range)))
}

/// # GET /api/report
/// Every summary view for the requested range, unformatted.
pub async fn get_report(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardReport>, AppError> {
    let range = state.dashboard.resolve_range(query.start, query.end)?;
    Ok(Json(state.dashboard.report(&range)))
}
