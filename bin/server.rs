// Spendwise - JSON API Server
// Exposes the in-memory session over HTTP for a web front-end

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use spendwise::{
    answer, category_totals, check_last, concentration_alerts, grand_total, overall_insight,
    recommendations, Advice, ExpenseRecord, Question, Session,
};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

/// Shared application state: one in-memory session for the whole server.
/// No persistence; restarting the process starts a fresh session.
#[derive(Clone)]
struct AppState {
    session: Arc<Mutex<Session>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    fn err(data: T, error: String) -> Self {
        Self {
            success: false,
            data,
            error: Some(error),
        }
    }
}

#[derive(Deserialize)]
struct AddExpenseRequest {
    description: String,
    amount: f64,
}

#[derive(Serialize)]
struct AddExpenseResponse {
    category: String,
}

/// Expense response (positional index included for delete calls)
#[derive(Serialize)]
struct ExpenseResponse {
    position: usize,
    seq: u64,
    description: String,
    amount: f64,
    category: String,
    added_at: String,
}

impl ExpenseResponse {
    fn from_record(position: usize, record: &ExpenseRecord) -> Self {
        Self {
            position,
            seq: record.seq,
            description: record.description.clone(),
            amount: record.amount,
            category: record.category.to_string(),
            added_at: record.added_at.to_rfc3339(),
        }
    }
}

/// Summary response: chart data plus the advisory panels.
#[derive(Serialize)]
struct SummaryResponse {
    total_spent: f64,
    by_category: Vec<CategoryStat>,
    insights: Vec<Advice>,
    alerts: Vec<String>,
    recommendations: Vec<Advice>,
}

#[derive(Serialize)]
struct CategoryStat {
    category: String,
    total: f64,
}

#[derive(Serialize)]
struct QuestionResponse {
    index: usize,
    prompt: String,
}

#[derive(Deserialize)]
struct AskRequest {
    index: usize,
}

#[derive(Serialize)]
struct AnswerResponse {
    question: String,
    answer: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/expenses - Current expense list in insertion order
async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.lock().unwrap();

    let response: Vec<ExpenseResponse> = session
        .store
        .all()
        .iter()
        .enumerate()
        .map(|(position, record)| ExpenseResponse::from_record(position, record))
        .collect();

    Json(ApiResponse::ok(response))
}

/// POST /api/expenses - Add an expense; returns the assigned category
async fn add_expense(
    State(state): State<AppState>,
    Json(request): Json<AddExpenseRequest>,
) -> impl IntoResponse {
    let mut session = state.session.lock().unwrap();

    match session.store.add(&request.description, request.amount) {
        Ok(category) => (
            StatusCode::OK,
            Json(ApiResponse::ok(AddExpenseResponse {
                category: category.to_string(),
            })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::err(
                AddExpenseResponse {
                    category: String::new(),
                },
                err.to_string(),
            )),
        )
            .into_response(),
    }
}

/// DELETE /api/expenses/:position - Delete by current position
async fn delete_expense(
    State(state): State<AppState>,
    Path(position): Path<usize>,
) -> impl IntoResponse {
    let mut session = state.session.lock().unwrap();

    match session.store.delete(position) {
        Ok(removed) => (
            StatusCode::OK,
            Json(ApiResponse::ok(format!(
                "Deleted \"{}\" (₹{:.2})",
                removed.description, removed.amount
            ))),
        )
            .into_response(),
        Err(err) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err(String::new(), err.to_string())),
        )
            .into_response(),
    }
}

/// GET /api/summary - Totals, insights, alerts and recommendations
async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.lock().unwrap();
    let records = session.store.all();

    let by_category: Vec<CategoryStat> = category_totals(records)
        .into_iter()
        .map(|(category, total)| CategoryStat {
            category: category.to_string(),
            total,
        })
        .collect();

    let mut alerts = Vec::new();
    let outcome = check_last(records);
    alerts.push(outcome.message());
    for alert in concentration_alerts(records) {
        alerts.push(alert.message());
    }

    Json(ApiResponse::ok(SummaryResponse {
        total_spent: grand_total(records),
        by_category,
        insights: overall_insight(records),
        alerts,
        recommendations: recommendations(records),
    }))
}

/// GET /api/questions - The fixed Q&A menu
async fn list_questions() -> impl IntoResponse {
    let response: Vec<QuestionResponse> = Question::all()
        .iter()
        .enumerate()
        .map(|(index, question)| QuestionResponse {
            index,
            prompt: question.prompt().to_string(),
        })
        .collect();

    Json(ApiResponse::ok(response))
}

/// POST /api/ask - Answer one of the pre-saved questions
async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> impl IntoResponse {
    let session = state.session.lock().unwrap();

    match Question::all().get(request.index) {
        Some(question) => (
            StatusCode::OK,
            Json(ApiResponse::ok(AnswerResponse {
                question: question.prompt().to_string(),
                answer: answer(*question, session.store.all()),
            })),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err(
                AnswerResponse {
                    question: String::new(),
                    answer: String::new(),
                },
                format!("No question at index {}", request.index),
            )),
        )
            .into_response(),
    }
}

// ============================================================================
// Server setup
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let state = AppState {
        session: Arc::new(Mutex::new(Session::new())),
    };

    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/expenses", get(list_expenses).post(add_expense))
        .route("/api/expenses/:position", delete(delete_expense))
        .route("/api/summary", get(get_summary))
        .route("/api/questions", get(list_questions))
        .route("/api/ask", post(ask_question))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "127.0.0.1:3000";
    println!("💰 Spendwise API server listening on http://{}", addr);
    println!("   GET  /api/expenses   POST /api/expenses");
    println!("   GET  /api/summary    POST /api/ask");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
