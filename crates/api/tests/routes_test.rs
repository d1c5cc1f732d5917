//! Route tests driven through the router with in-memory collaborators.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use budgetry_api::{AppState, create_router, extractors::USER_ID_HEADER};
use budgetry_core::taxonomy::{CategoryKey, MainCategory, Taxonomy};
use budgetry_core::variance::VarianceClassifier;
use budgetry_shared::{BudgetId, UserId};
use budgetry_store::{InMemoryBudgetStore, InMemoryTransactionSource, PostedTransaction};

struct TestApp {
    router: Router,
    source: Arc<InMemoryTransactionSource>,
    user: UserId,
}

impl TestApp {
    fn new() -> Self {
        let source = Arc::new(InMemoryTransactionSource::new());
        let state = AppState::new(
            Arc::new(InMemoryBudgetStore::new()),
            source.clone(),
            Arc::new(Taxonomy::standard()),
            VarianceClassifier::default(),
        );
        Self {
            router: create_router(state),
            source,
            user: UserId::new(),
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, self.user.to_string());
        let body = match body {
            Some(v) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_membership_budget(&self, total: &str) -> BudgetId {
        let (status, body) = self
            .send(
                "POST",
                "/api/v1/budgets",
                Some(json!({
                    "sub_category": "membership_subscription",
                    "budget_year": 2025,
                    "total_budget": total,
                    "project_name": "Annual dues",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        BudgetId::from_str(body["id"].as_str().unwrap()).unwrap()
    }
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_requires_user_header() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/budgets")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "budget_year": 2025,
                "total_budget": "10",
                "project_name": "x",
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_infers_main_and_lists_table() {
    let app = TestApp::new();
    app.create_membership_budget("50000").await;

    let (status, body) = app.send("GET", "/api/v1/budgets?year=2025", None).await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["row_type"], "group");
    assert_eq!(decimal(&rows[0]["sub_category_total"]), dec!(50000));
    assert_eq!(rows[1]["row_type"], "leaf");
    assert_eq!(rows[1]["budget"]["main_category"], "income");
    assert_eq!(decimal(&body["summary"]["income_total"]), dec!(50000));
}

#[tokio::test]
async fn test_create_rejects_mismatched_category() {
    let app = TestApp::new();
    let (status, _) = app
        .send(
            "POST",
            "/api/v1/budgets",
            Some(json!({
                "main_category": "expense",
                "sub_category": "membership_subscription",
                "budget_year": 2025,
                "total_budget": "100",
                "project_name": "Dues",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_allocation_updates_remaining() {
    let app = TestApp::new();
    let id = app.create_membership_budget("1000").await;
    let uri = format!("/api/v1/budgets/{id}/allocations");

    let (status, _) = app
        .send(
            "POST",
            &uri,
            Some(json!({
                "purpose_id": "p-1",
                "purpose_name": "Printing",
                "allocated_amount": "400",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(
            "POST",
            &uri,
            Some(json!({
                "purpose_id": "p-2",
                "purpose_name": "Venue",
                "allocated_amount": "700",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "EXCEEDS_REMAINING");

    let (_, allocations) = app.send("GET", &uri, None).await;
    assert_eq!(allocations.as_array().unwrap().len(), 1);

    let (_, table) = app.send("GET", "/api/v1/budgets?year=2025", None).await;
    assert_eq!(decimal(&table["rows"][1]["budget"]["remaining_amount"]), dec!(600));
}

#[tokio::test]
async fn test_unknown_budget_is_not_found() {
    let app = TestApp::new();
    let uri = format!("/api/v1/budgets/{}", BudgetId::new());
    let (status, body) = app.send("DELETE", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "BUDGET_NOT_FOUND");
}

#[tokio::test]
async fn test_workflow_transitions() {
    let app = TestApp::new();
    let id = app.create_membership_budget("1000").await;

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/v1/budgets/{id}/approve"),
            Some(json!({ "comment": "ok" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    let (status, body) = app
        .send("POST", &format!("/api/v1/budgets/{id}/activate"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/v1/budgets/{id}/revoke"),
            Some(json!({ "reason": "too late" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "INVALID_TRANSITION");

    let (status, _) = app
        .send(
            "PATCH",
            &format!("/api/v1/budgets/{id}"),
            Some(json!({ "total_budget": "5" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_approve_requires_comment() {
    let app = TestApp::new();
    let id = app.create_membership_budget("1000").await;

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/v1/budgets/{id}/approve"),
            Some(json!({ "comment": "  " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "APPROVAL_COMMENT_REQUIRED");
}

#[tokio::test]
async fn test_yearly_generation_conflicts_on_second_run() {
    let app = TestApp::new();

    let (status, body) = app
        .send("POST", "/api/v1/budgets/yearly", Some(json!({ "year": 2026 })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_array().unwrap().len(), 8);

    let (status, body) = app
        .send("POST", "/api/v1/budgets/yearly", Some(json!({ "year": 2026 })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "YEAR_ALREADY_BUDGETED");
}

#[tokio::test]
async fn test_reconciliation_rates_variance() {
    let app = TestApp::new();
    let id = app.create_membership_budget("50000").await;
    app.source
        .post(PostedTransaction::income(2025, dec!(45000)).for_budget(id))
        .await;

    let (status, body) = app
        .send("GET", "/api/v1/budgets/reconciliation?year=2025", None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let row = &body["rows"][0];
    assert_eq!(decimal(&row["variance"]), dec!(-5000));
    assert_eq!(decimal(&row["variance_percentage"]), dec!(-10));
    assert_eq!(row["rating"], "good");
    assert_eq!(row["health"], "on-track");
}

#[tokio::test]
async fn test_group_reconciliation_sums_members() {
    let app = TestApp::new();
    let first = app.create_membership_budget("100").await;
    let second = app.create_membership_budget("300").await;
    app.source
        .post(PostedTransaction::income(2025, dec!(150)).for_budget(first))
        .await;
    app.source
        .post(PostedTransaction::income(2025, dec!(250)).for_budget(second))
        .await;

    let (status, body) = app
        .send("GET", "/api/v1/budgets/reconciliation/groups?year=2025", None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(decimal(&rows[0]["budgeted_amount"]), dec!(400));
    assert_eq!(decimal(&rows[0]["actual_income"]), dec!(400));
    assert_eq!(rows[0]["rating"], "excellent");
}

#[tokio::test]
async fn test_category_tagged_income_reconciles() {
    let app = TestApp::new();
    app.create_membership_budget("1000").await;
    app.source
        .post(
            PostedTransaction::income(2025, dec!(900))
                .in_category(CategoryKey::new(MainCategory::Income, "membership_subscription")),
        )
        .await;

    let (status, body) = app
        .send("GET", "/api/v1/budgets/reconciliation/groups?year=2025", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["rows"][0]["actual_income"]), dec!(900));
    assert_eq!(decimal(&body["rows"][0]["variance_percentage"]), dec!(-10));

    let (_, body) = app
        .send("GET", "/api/v1/budgets/reconciliation?year=2025", None)
        .await;
    assert_eq!(decimal(&body["rows"][0]["actual_income"]), dec!(900));
    assert_eq!(body["rows"][0]["rating"], "good");
}

#[tokio::test]
async fn test_reconciliation_reports_unavailable_source() {
    let app = TestApp::new();
    app.create_membership_budget("100").await;
    app.source.set_available(false);

    let (status, body) = app
        .send("GET", "/api/v1/budgets/reconciliation?year=2025", None)
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "ACTUALS_UNAVAILABLE");
}

#[tokio::test]
async fn test_taxonomy_lookups() {
    let app = TestApp::new();

    let (status, body) = app
        .send("GET", "/api/v1/taxonomy/assets/sub-categories", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, body) = app
        .send("GET", "/api/v1/taxonomy/income/sub-categories", None)
        .await;
    assert_eq!(body[0]["key"], "membership_subscription");

    let (status, body) = app
        .send(
            "GET",
            "/api/v1/taxonomy/sub-categories/membership_subscription/item-codes/1",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_code"], "I-MS-001");

    let (status, _) = app
        .send("GET", "/api/v1/taxonomy/sub-categories/nope/item-codes/1", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("income", 5)]
#[case("expense", 5)]
#[case("Expense", 5)]
#[case("assets", 0)]
#[tokio::test]
async fn test_sub_category_options(#[case] main: &str, #[case] expected: usize) {
    let app = TestApp::new();
    let (status, body) = app
        .send("GET", &format!("/api/v1/taxonomy/{main}/sub-categories"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), expected);
}
