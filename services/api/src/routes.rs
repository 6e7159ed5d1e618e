use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use vaccine_checker::screening::{AgeBand, ScreeningOutcome, TableColumns, VaccineTable};

#[derive(Debug, Deserialize)]
pub(crate) struct ScreeningRequest {
    /// Raw date of birth; anything unparseable yields the prompt state.
    #[serde(default)]
    pub(crate) birth_date: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AgeBandView {
    pub(crate) band: AgeBand,
    pub(crate) label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) column_header: Option<String>,
}

pub(crate) fn screening_router(table: Arc<VaccineTable>) -> Router {
    Router::new()
        .route("/api/v1/screening", post(screening_endpoint))
        .route("/api/v1/age-bands", get(age_bands_endpoint))
        .with_state(table)
}

pub(crate) fn with_operational_routes(router: Router) -> Router {
    router
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn screening_endpoint(
    State(table): State<Arc<VaccineTable>>,
    Json(payload): Json<ScreeningRequest>,
) -> Json<ScreeningOutcome> {
    let ScreeningRequest { birth_date, today } = payload;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    Json(ScreeningOutcome::evaluate(&birth_date, today, &table))
}

pub(crate) async fn age_bands_endpoint() -> Json<Vec<AgeBandView>> {
    let columns = TableColumns::standard();
    let bands = AgeBand::ordered()
        .into_iter()
        .map(|band| AgeBandView {
            band,
            label: band.label(),
            column_header: columns.header_for(band).map(str::to_string),
        })
        .collect();

    Json(bands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn table() -> Arc<VaccineTable> {
        Arc::new(VaccineTable::bundled().expect("bundled table"))
    }

    fn request(birth_date: &str) -> ScreeningRequest {
        ScreeningRequest {
            birth_date: birth_date.to_string(),
            today: NaiveDate::from_ymd_opt(2024, 6, 15),
        }
    }

    async fn post_json(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/screening")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn screening_endpoint_returns_report() {
        let Json(outcome) = screening_endpoint(State(table()), Json(request("2006-06-15"))).await;

        let report = outcome.report().expect("report ready");
        assert_eq!(report.band, AgeBand::Age18To64Years);
        assert_eq!(report.labs.len(), 3);
        assert_eq!(
            report.counts.required + report.counts.not_required + report.counts.other,
            table().len()
        );
    }

    #[tokio::test]
    async fn screening_endpoint_reports_future_date_as_prompt() {
        let Json(outcome) = screening_endpoint(State(table()), Json(request("2030-01-01"))).await;
        assert!(matches!(outcome, ScreeningOutcome::InvalidDate { .. }));
    }

    #[tokio::test]
    async fn router_returns_ok_for_invalid_birth_date() {
        let (status, body) = post_json(
            screening_router(table()),
            json!({ "birth_date": "31/12/1999", "today": "2024-06-15" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "invalid_date");
    }

    #[tokio::test]
    async fn router_rejects_malformed_reference_date() {
        let (status, _) = post_json(
            screening_router(table()),
            json!({ "birth_date": "1999-12-31", "today": "someday" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn router_serializes_ready_report() {
        let (status, body) = post_json(
            screening_router(table()),
            json!({ "birth_date": "2024-04-10", "today": "2024-06-15" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["band"], "2_to_11_months");
        assert_eq!(body["age_display"], "0y 2m 5d");
        assert_eq!(body["labs_note"], "No lab tests are required for this age.");
    }

    #[tokio::test]
    async fn age_bands_are_listed_in_order() {
        let Json(bands) = age_bands_endpoint().await;
        assert_eq!(bands.len(), 7);
        assert_eq!(bands[0].label, "Birth to 1 month");
        assert_eq!(bands[6].column_header.as_deref(), Some(">= 65 years"));
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
