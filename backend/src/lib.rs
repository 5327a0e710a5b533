//! # Allowance Tracker Backend
//!
//! REST backend for a household allowance tracker: family members, a
//! catalog of activities, scored task lists and their history, behind
//! token authentication.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum handlers, mappers, auth middleware)
//!     ↓
//! Domain Layer (services, aggregation, validation)
//!     ↓
//! Storage Layer (storage traits, SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, AuthConfig};
use crate::domain::{
    ActivityService, AuthService, HistoricService, ListService, MemberService, RelationService, UserService,
};
use crate::io::rest::{
    activity_apis, auth_apis, historic_apis, list_apis, member_apis, relation_apis, require_auth, user_apis,
};
use crate::storage::{
    ActivityRepository, ActivityStorage, DbConnection, ListRepository, ListStorage, MemberRepository,
    MemberStorage, UserRepository, UserStorage,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub activity_service: ActivityService,
    pub relation_service: RelationService,
    pub list_service: ListService,
    pub member_service: MemberService,
    pub historic_service: HistoricService,
    pub user_service: UserService,
    pub auth_service: AuthService,
}

impl AppState {
    /// Wire every service on top of one database connection
    pub fn new(db: DbConnection, auth: &AuthConfig) -> Self {
        let activities: Arc<dyn ActivityStorage> = Arc::new(ActivityRepository::new(db.clone()));
        let lists: Arc<dyn ListStorage> = Arc::new(ListRepository::new(db.clone()));
        let members: Arc<dyn MemberStorage> = Arc::new(MemberRepository::new(db.clone()));
        let users: Arc<dyn UserStorage> = Arc::new(UserRepository::new(db));

        let relation_service = RelationService::new(lists.clone(), activities.clone());
        Self {
            activity_service: ActivityService::new(activities, relation_service.clone()),
            list_service: ListService::new(lists.clone(), members.clone()),
            historic_service: HistoricService::new(lists, members.clone()),
            member_service: MemberService::new(members),
            user_service: UserService::new(users.clone()),
            auth_service: AuthService::new(users, &auth.jwt_secret, auth.token_lifetime_hours),
            relation_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database.url);
    let db = DbConnection::new(&config.database.url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db, &config.auth))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let allow_origin = if cors_origin == "*" {
        AllowOrigin::any()
    } else {
        let origin = cors_origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;
        AllowOrigin::exact(origin)
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    // Everything except registration and login needs a bearer token
    let protected = Router::new()
        .nest("/v1/activity", activity_apis::router())
        .nest("/v1/list", list_apis::router())
        .nest("/v1/relation", relation_apis::router())
        .nest("/v1/historic", historic_apis::router())
        .nest("/v1/member", member_apis::router())
        .route("/v1/user", put(user_apis::update_user).delete(user_apis::delete_user))
        .route("/v1/auth", get(auth_apis::current_user))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), require_auth));

    let public = Router::new()
        .route("/v1/user", post(user_apis::register_user))
        .route("/v1/auth", post(auth_apis::login));

    Ok(Router::new()
        .merge(protected)
        .merge(public)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
