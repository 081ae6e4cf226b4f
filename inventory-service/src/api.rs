use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use shared::DrinkForm;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::flash::{self, Flash, FlashKey};
use crate::views;
use crate::workflow::{InventoryWorkflow, WorkflowError};

#[derive(Clone)]
pub struct AppState {
    pub workflow: InventoryWorkflow,
    pub flash_key: FlashKey,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/insert", post(insert))
        .route("/edit/:id", get(edit_form).post(edit))
        .route("/delete/:id", get(delete))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Answers with `303 See Other` to the listing, carrying `message` for the next view.
fn redirect_home(key: &FlashKey, message: Flash) -> Response {
    let mut response = Redirect::to("/").into_response();

    let cookie = key
        .seal(&message)
        .map(|value| flash::set_cookie(&value))
        .map_err(|e| e.to_string())
        .and_then(|cookie| HeaderValue::from_str(&cookie).map_err(|e| e.to_string()));
    match cookie {
        Ok(cookie) => {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
        Err(e) => warn!("Dropping flash message: {}", e),
    }
    response
}

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let raw = flash::read_cookie(&headers);
    let pending = raw.and_then(|value| match state.flash_key.open(value) {
        Ok(flash) => Some(flash),
        Err(e) => {
            debug!("Ignoring flash cookie: {}", e);
            None
        }
    });

    let items = state.workflow.list_all().await;
    let mut response = Html(views::index_page(&items, pending.as_ref())).into_response();
    if raw.is_some() {
        response
            .headers_mut()
            .insert(SET_COOKIE, HeaderValue::from_static(flash::CLEAR_COOKIE));
    }
    response
}

pub async fn insert(State(state): State<AppState>, Form(form): Form<DrinkForm>) -> Response {
    let flash = match state.workflow.validate_and_create(&form).await {
        Ok(_) => Flash::success("Drink added successfully!"),
        Err(WorkflowError::Store(e)) => Flash::error(format!("Error inserting data: {}", e)),
        Err(e) => Flash::error(e.to_string()),
    };
    redirect_home(&state.flash_key, flash)
}

pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state.workflow.fetch(id).await {
        Ok(item) => Html(views::edit_page(&item)).into_response(),
        Err(WorkflowError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, Html(views::not_found_page(id))).into_response()
        }
        Err(e) => {
            error!("Failed to load drink {}: {}", id, e);
            redirect_home(&state.flash_key, Flash::error(format!("Error fetching drink: {}", e)))
        }
    }
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<DrinkForm>,
) -> Response {
    let flash = match state.workflow.validate_and_update(id, &form).await {
        Ok(_) => Flash::success("Drink updated successfully!"),
        Err(WorkflowError::Store(e)) => Flash::error(format!("Error updating drink: {}", e)),
        Err(e) => Flash::error(e.to_string()),
    };
    redirect_home(&state.flash_key, flash)
}

/// Always reports success; a failed delete is only logged.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    if let Err(e) = state.workflow.delete(id).await {
        error!("Failed to delete drink {}: {}", id, e);
    }
    redirect_home(&state.flash_key, Flash::success("Drink deleted successfully!"))
}

pub async fn health_check() -> &'static str {
    "OK"
}
