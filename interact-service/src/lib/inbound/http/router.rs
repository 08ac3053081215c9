use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::ask_query::ask_query;
use super::handlers::current_user::current_user;
use super::handlers::delete_conversation::delete_conversation;
use super::handlers::get_history::get_history;
use super::handlers::index::index;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::reset_conversation::reset_conversation;
use super::handlers::signup::signup;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::conversation::ports::ConversationServicePort;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub conversation_service: Arc<dyn ConversationServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    session_service: Arc<dyn SessionServicePort>,
    conversation_service: Arc<dyn ConversationServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        session_service,
        conversation_service,
    };

    // Logout only needs a bearer-shaped header, so it stays outside the gate.
    let public_routes = Router::new()
        .route("/", get(index))
        .route("/user/signup", post(signup))
        .route("/user/login", post(login))
        .route("/user/logout", delete(logout));

    let protected_routes = Router::new()
        .route("/user/current_user", get(current_user))
        .route("/user/update", patch(update_user))
        .route("/query/", post(ask_query))
        .route("/query/reset", post(reset_conversation))
        .route("/query/history", get(get_history))
        .route(
            "/query/conversation/:conversation_id",
            delete(delete_conversation),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
