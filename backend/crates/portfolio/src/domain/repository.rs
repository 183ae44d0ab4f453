//! Repository Traits
//!
//! All three traits are implemented by one Postgres type, so the
//! method names stay distinct across traits.

use kernel::id::{AssetId, PortfolioId, UserId};

use crate::domain::entity::{
    CryptoAsset, NewPortfolio, NewPortfolioAsset, NewTransaction, Portfolio, PortfolioAsset,
    Transaction,
};
use crate::error::PortfolioResult;

/// Portfolio repository trait
#[trait_variant::make(PortfolioRepository: Send)]
pub trait LocalPortfolioRepository {
    /// Insert a new portfolio; the database assigns id and created_at
    async fn create_portfolio(&self, portfolio: &NewPortfolio) -> PortfolioResult<Portfolio>;

    /// Find a portfolio by id, regardless of owner. Ownership checks
    /// happen in the handlers.
    async fn find_portfolio(&self, id: PortfolioId) -> PortfolioResult<Option<Portfolio>>;

    /// All portfolios owned by the user, oldest first
    async fn find_portfolios_by_user(&self, user_id: UserId) -> PortfolioResult<Vec<Portfolio>>;

    /// Holdings of a portfolio, joined with the asset catalog
    async fn find_portfolio_assets(
        &self,
        portfolio_id: PortfolioId,
    ) -> PortfolioResult<Vec<PortfolioAsset>>;

    /// Insert a holding, returning it joined with its catalog entry
    async fn add_portfolio_asset(
        &self,
        asset: &NewPortfolioAsset,
    ) -> PortfolioResult<PortfolioAsset>;
}

/// Read-only catalog of tradeable assets
#[trait_variant::make(AssetCatalogRepository: Send)]
pub trait LocalAssetCatalogRepository {
    /// Full catalog, ordered by symbol
    async fn find_all_assets(&self) -> PortfolioResult<Vec<CryptoAsset>>;

    /// Find one catalog entry
    async fn find_asset_by_id(&self, id: AssetId) -> PortfolioResult<Option<CryptoAsset>>;
}

/// Transaction repository trait
#[trait_variant::make(TransactionRepository: Send)]
pub trait LocalTransactionRepository {
    /// Insert a transaction, returning it joined with its catalog entry
    async fn create_transaction(&self, transaction: &NewTransaction)
    -> PortfolioResult<Transaction>;

    /// The user's transactions, newest first, joined with the catalog
    async fn find_transactions_by_user(
        &self,
        user_id: UserId,
    ) -> PortfolioResult<Vec<Transaction>>;
}
