//! Portfolio Backend Module
//!
//! Portfolios, the crypto asset catalog and transaction history.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! All routes except the public asset catalog sit behind the auth
//! crate's session guard. Lookups of another user's portfolio answer
//! 404, identical to a missing one, so portfolio ids cannot be probed.

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use domain::repository::{
    AssetCatalogRepository, PortfolioRepository, TransactionRepository,
};
pub use error::{PortfolioError, PortfolioResult};
pub use infra::postgres::PgPortfolioRepository;
pub use presentation::handlers::PortfolioAppState;
pub use presentation::router::portfolio_router;

/// Name given to the portfolio every new account starts with
pub const DEFAULT_PORTFOLIO_NAME: &str = "My Portfolio";
