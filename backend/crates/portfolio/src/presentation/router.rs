//! Portfolio Router

use axum::{Router, routing::get};

use auth::presentation::middleware::{AuthGateState, require_auth};
use auth::{SessionStore, UserRepository};

use crate::domain::repository::{
    AssetCatalogRepository, PortfolioRepository, TransactionRepository,
};
use crate::presentation::handlers::{self, PortfolioAppState};

/// Routes mounted under `/api`. Everything except the asset catalog
/// requires a session.
pub fn portfolio_router<R, U, S>(
    state: PortfolioAppState<R>,
    gate: AuthGateState<U, S>,
) -> Router
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let protected = Router::new()
        .route(
            "/portfolios",
            get(handlers::list_portfolios::<R>).post(handlers::create_portfolio::<R>),
        )
        .route("/portfolios/{id}", get(handlers::get_portfolio::<R>))
        .route(
            "/portfolios/{id}/assets",
            get(handlers::list_portfolio_assets::<R>).post(handlers::add_portfolio_asset::<R>),
        )
        .route(
            "/transactions",
            get(handlers::list_transactions::<R>).post(handlers::create_transaction::<R>),
        )
        .route_layer(axum::middleware::from_fn(move |req, next| {
            require_auth(gate.clone(), req, next)
        }));

    Router::new()
        .route("/assets", get(handlers::list_assets::<R>))
        .merge(protected)
        .with_state(state)
}
