use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::IdentityResolver;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_todo::create_todo;
use super::handlers::create_user::create_user;
use super::handlers::delete_todo::delete_todo;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::issue_token::issue_token;
use super::handlers::list_todos::list_todos;
use super::handlers::list_users::list_users;
use super::handlers::refresh_token::refresh_token;
use super::handlers::root::root;
use super::handlers::root::root_html;
use super::handlers::update_todo::update_todo;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::todo::service::TodoService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::PostgresTodoRepository;
use crate::outbound::repositories::PostgresUserRepository;

pub type AppUserService = UserService<PostgresUserRepository>;
pub type AppTodoService = TodoService<PostgresTodoRepository>;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<AppUserService>,
    pub todo_service: Arc<AppTodoService>,
    pub authenticator: Arc<Authenticator>,
    pub identity: Arc<IdentityResolver<AppUserService>>,
}

impl AppState {
    /// Wire services over the given repositories. The identity resolver
    /// looks accounts up through the same user service.
    pub fn new(
        user_repository: PostgresUserRepository,
        todo_repository: PostgresTodoRepository,
        authenticator: Authenticator,
    ) -> Self {
        let user_service = Arc::new(UserService::new(Arc::new(user_repository)));
        let todo_service = Arc::new(TodoService::new(Arc::new(todo_repository)));
        let identity = Arc::new(IdentityResolver::new(
            authenticator.verifier(),
            user_service.clone(),
        ));

        Self {
            user_service,
            todo_service,
            authenticator: Arc::new(authenticator),
            identity,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/html", get(root_html))
        .route("/auth/token", post(issue_token))
        .route("/users", post(create_user));

    let protected_routes = Router::new()
        .route("/auth/refresh", post(refresh_token))
        .route("/users", get(list_users))
        .route(
            "/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:todo_id", patch(update_todo).delete(delete_todo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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
