//! HTTP request handlers for the expense service API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Form, Json, Router,
    extract::{
        Path, State,
        rejection::{FormRejection, JsonRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::authenticate;
use crate::error::{ServiceError, ServiceResult};
use crate::export::{balance_sheet_rows, write_balance_sheet_csv};
use crate::models::{
    ExpenseId, ExpenseRequest, NewUser, PersistedExpense, PersistedParticipant, User, UserId,
};
use crate::splitting::split;
use crate::store::ExpenseStore;

use super::extract::CurrentUser;
use super::request::{CreateUserRequest, TokenRequest};
use super::response::{
    ApiError, ApiErrorResponse, CurrentUserInfo, CurrentUserResponse, ExpenseResponse,
    TokenResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(create_user_handler))
        .route("/users/:email", get(get_user_handler))
        .route("/auth/token", post(login_handler))
        .route("/auth/current_user", get(current_user_handler))
        .route("/expenses", post(create_expense_handler))
        .route("/expenses/balance-sheet", get(balance_sheet_handler))
        .route("/expenses/user/:user_id", get(user_expenses_handler))
        .route("/expenses/:expense_id", get(get_expense_handler))
        .with_state(state)
}

/// Handler for POST /expenses.
///
/// Splits the expense according to its policy and stores it with one
/// participant row per allocation.
async fn create_expense_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing expense creation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let store = state.store();
    match create_expense(store, &request) {
        Ok(expense) => {
            info!(
                correlation_id = %correlation_id,
                expense_id = expense.id,
                split_policy = %expense.split_policy,
                participants_count = expense.participants.len(),
                total_amount = %expense.total_amount,
                duration_us = start_time.elapsed().as_micros(),
                "Expense created"
            );
            match expense_response(store, expense) {
                Ok(body) => (StatusCode::OK, Json(body)).into_response(),
                Err(err) => ApiErrorResponse::from(err).into_response(),
            }
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Expense creation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Splits and stores an expense. Nothing is stored if the split fails.
fn create_expense(
    store: &dyn ExpenseStore,
    request: &ExpenseRequest,
) -> ServiceResult<PersistedExpense> {
    let allocations = split(request)?;
    store.create_expense(request, &allocations)
}

fn expense_response(
    store: &dyn ExpenseStore,
    expense: PersistedExpense,
) -> ServiceResult<ExpenseResponse> {
    let creator = store.get_user(expense.creator_id)?;
    Ok(ExpenseResponse { expense, creator })
}

/// Handler for GET /expenses/{id}.
async fn get_expense_handler(
    State(state): State<AppState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Json<ExpenseResponse>, ApiErrorResponse> {
    let store = state.store();
    let expense = store
        .get_expense(expense_id)?
        .ok_or(ServiceError::ExpenseNotFound { id: expense_id })?;
    Ok(Json(expense_response(store, expense)?))
}

/// Handler for GET /expenses/user/{id}.
///
/// Returns every allocation owed by the user, oldest expense first.
async fn user_expenses_handler(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<PersistedParticipant>>, ApiErrorResponse> {
    Ok(Json(state.store().allocations_for_user(user_id)?))
}

/// Handler for GET /expenses/balance-sheet.
///
/// Streams the balance sheet of all expenses as a CSV attachment.
async fn balance_sheet_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();

    let csv = balance_sheet_rows(state.store()).and_then(|rows| {
        info!(
            correlation_id = %correlation_id,
            rows_count = rows.len(),
            "Exporting balance sheet"
        );
        write_balance_sheet_csv(&rows)
    });

    match csv {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=balance_sheet.csv",
                ),
            ],
            body,
        )
            .into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Balance sheet export failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /users.
async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let created = NewUser::try_from(request).and_then(|user| state.store().create_user(user));
    match created {
        Ok(user) => {
            info!(correlation_id = %correlation_id, user_id = user.id, "User registered");
            (StatusCode::OK, Json(user)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "User registration failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /users/{email}. Requires a bearer token.
async fn get_user_handler(
    State(state): State<AppState>,
    CurrentUser(_claims): CurrentUser,
    Path(email): Path<String>,
) -> Result<Json<User>, ApiErrorResponse> {
    let stored = state
        .store()
        .find_user_by_email(&email)?
        .ok_or(ServiceError::UserNotFound { email })?;
    Ok(Json(stored.user))
}

/// Handler for POST /auth/token.
///
/// Exchanges an email and password for a signed bearer token.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Form<TokenRequest>, FormRejection>,
) -> Result<Json<TokenResponse>, ApiErrorResponse> {
    let Form(form) = payload.map_err(form_rejection_response)?;
    let user = authenticate(state.store(), &form.username, &form.password).inspect_err(|err| {
        warn!(username = %form.username, error = %err, "Login failed");
    })?;
    let token = state.tokens().issue(&user)?;
    info!(user_id = user.id, "Issued access token");
    Ok(Json(TokenResponse::bearer(token)))
}

/// Handler for GET /auth/current_user. Requires a bearer token.
async fn current_user_handler(CurrentUser(claims): CurrentUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        user: CurrentUserInfo {
            username: claims.sub,
            id: claims.id,
        },
    })
}

/// Converts a JSON body rejection into a 400 response.
fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("Unknown split policy") {
                ApiError::new("UNKNOWN_SPLIT_POLICY", body_text)
            } else if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}

/// Converts a form body rejection into a 400 response.
fn form_rejection_response(rejection: FormRejection) -> ApiErrorResponse {
    let error = match rejection {
        FormRejection::InvalidFormContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/x-www-form-urlencoded",
        ),
        FormRejection::FailedToDeserializeForm(err) => ApiError::validation_error(err.body_text()),
        FormRejection::FailedToDeserializeFormBody(err) => {
            ApiError::validation_error(err.body_text())
        }
        _ => ApiError::validation_error("Failed to parse form body"),
    };
    warn!(error = %error.message, "Form rejected");
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error)
}
