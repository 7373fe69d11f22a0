use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use doku_core::{
    aggregate::{period_summary, PeriodSummary},
    allocate::{category_totals, tag_matrix, tag_totals, TagSeries},
    period::Period,
    Category,
};

use crate::app_state::AppState;
use crate::routes::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview/:context", get(overview))
        .route("/charts/:context", get(charts))
}

#[derive(Debug, Deserialize)]
struct PeriodQuery {
    view: String,
    date: String,
}

impl PeriodQuery {
    fn period(&self) -> Result<Period, ApiError> {
        Period::parse(&self.view, &self.date)
            .ok_or_else(|| ApiError::bad_request("could not parse period selection"))
    }

    /// A single day has nothing to bucket, so overviews only accept the
    /// week, month and year views.
    fn overview_period(&self) -> Result<Period, ApiError> {
        let period = self.period()?;
        if matches!(period, Period::Day(_)) {
            return Err(ApiError::bad_request(
                "overview covers week, month and year views only",
            ));
        }
        Ok(period)
    }
}

#[instrument(name = "get_overview", skip(app_state))]
async fn overview(
    State(app_state): State<AppState>,
    Path(context): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<PeriodSummary>, ApiError> {
    let period = query.overview_period()?;
    let document = app_state.store.load(&context).await?;

    Ok(Json(period_summary(&document, period)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartResponse {
    dates: Vec<NaiveDate>,
    /// Stacked bar series, one per tag, in first-seen order.
    series: Vec<TagSeries>,
    tag_totals: BTreeMap<String, f64>,
    category_totals: BTreeMap<Category, f64>,
    styles: BTreeMap<Category, String>,
}

#[instrument(name = "get_charts", skip(app_state))]
async fn charts(
    State(app_state): State<AppState>,
    Path(context): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    let period = query.period()?;
    if !matches!(period, Period::Day(_) | Period::Week { .. }) {
        return Err(ApiError::bad_request(
            "chart datasets cover day and week views only",
        ));
    }

    let document = app_state.store.load(&context).await?;
    let dates = period.dates();
    let records: Vec<_> = dates.iter().map(|&date| document.record(date)).collect();

    let series = tag_matrix(&document, &dates);
    let tag_totals = tag_totals(records.iter().map(|record| record.as_ref()));
    let category_totals = category_totals(
        records.iter().map(|record| record.as_ref()),
        &document.tag_category_map,
    );
    let styles = Category::ALL
        .iter()
        .map(|&category| (category, document.style_for(category).to_string()))
        .collect();

    Ok(Json(ChartResponse {
        dates,
        series,
        tag_totals,
        category_totals,
        styles,
    }))
}
