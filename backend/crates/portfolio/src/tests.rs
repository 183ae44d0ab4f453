//! Crate-level tests for the portfolio handlers, running against an
//! in-memory repository double. Handlers are called directly with
//! constructed extractors.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use axum::Json;
use axum::extract::{Extension, Path, State};
use chrono::Utc;
use kernel::id::{AssetId, PortfolioAssetId, PortfolioId, TransactionId, UserId};
use tokio::sync::RwLock;
use uuid::Uuid;

use auth::CurrentUser;
use platform::password::ClearTextPassword;

use crate::domain::entity::{
    CryptoAsset, NewPortfolio, NewPortfolioAsset, NewTransaction, Portfolio, PortfolioAsset,
    Transaction,
};
use crate::domain::repository::{
    AssetCatalogRepository, PortfolioRepository, TransactionRepository,
};
use crate::error::{PortfolioError, PortfolioResult};
use crate::presentation::dto::{
    AddAssetRequest, CreatePortfolioRequest, CreateTransactionRequest,
};
use crate::presentation::handlers::{self, PortfolioAppState};

// ============================================================================
// In-memory double
// ============================================================================

#[derive(Default)]
struct MemoryPortfolioRepository {
    portfolios: RwLock<Vec<Portfolio>>,
    holdings: RwLock<Vec<PortfolioAsset>>,
    transactions: RwLock<Vec<Transaction>>,
    catalog: RwLock<Vec<CryptoAsset>>,
    next_id: AtomicI64,
}

impl MemoryPortfolioRepository {
    fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    fn next(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn seed_asset(&self, symbol: &str, name: &str) -> AssetId {
        let id = AssetId::from_i64(self.next());
        self.catalog.write().await.push(CryptoAsset {
            id,
            symbol: symbol.to_string(),
            name: name.to_string(),
            icon: None,
            created_at: Utc::now(),
        });
        id
    }
}

impl PortfolioRepository for MemoryPortfolioRepository {
    async fn create_portfolio(&self, portfolio: &NewPortfolio) -> PortfolioResult<Portfolio> {
        let created = Portfolio {
            id: PortfolioId::from_i64(self.next()),
            user_id: portfolio.user_id,
            name: portfolio.name.clone(),
            created_at: Utc::now(),
        };
        self.portfolios.write().await.push(created.clone());
        Ok(created)
    }

    async fn find_portfolio(&self, id: PortfolioId) -> PortfolioResult<Option<Portfolio>> {
        Ok(self
            .portfolios
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_portfolios_by_user(&self, user_id: UserId) -> PortfolioResult<Vec<Portfolio>> {
        Ok(self
            .portfolios
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_portfolio_assets(
        &self,
        portfolio_id: PortfolioId,
    ) -> PortfolioResult<Vec<PortfolioAsset>> {
        Ok(self
            .holdings
            .read()
            .await
            .iter()
            .filter(|a| a.portfolio_id == portfolio_id)
            .cloned()
            .collect())
    }

    async fn add_portfolio_asset(
        &self,
        asset: &NewPortfolioAsset,
    ) -> PortfolioResult<PortfolioAsset> {
        let catalog = self.catalog.read().await;
        let entry = catalog
            .iter()
            .find(|a| a.id == asset.asset_id)
            .ok_or(PortfolioError::AssetNotFound)?;

        let created = PortfolioAsset {
            id: PortfolioAssetId::from_i64(self.next()),
            portfolio_id: asset.portfolio_id,
            asset_id: asset.asset_id,
            symbol: entry.symbol.clone(),
            asset_name: entry.name.clone(),
            icon: entry.icon.clone(),
            amount: asset.amount.clone(),
            purchase_price: asset.purchase_price.clone(),
            created_at: Utc::now(),
        };
        drop(catalog);
        self.holdings.write().await.push(created.clone());
        Ok(created)
    }
}

impl AssetCatalogRepository for MemoryPortfolioRepository {
    async fn find_all_assets(&self) -> PortfolioResult<Vec<CryptoAsset>> {
        let mut assets = self.catalog.read().await.clone();
        assets.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(assets)
    }

    async fn find_asset_by_id(&self, id: AssetId) -> PortfolioResult<Option<CryptoAsset>> {
        Ok(self.catalog.read().await.iter().find(|a| a.id == id).cloned())
    }
}

impl TransactionRepository for MemoryPortfolioRepository {
    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> PortfolioResult<Transaction> {
        let catalog = self.catalog.read().await;
        let entry = catalog
            .iter()
            .find(|a| a.id == transaction.asset_id)
            .ok_or(PortfolioError::AssetNotFound)?;

        let created = Transaction {
            id: TransactionId::from_i64(self.next()),
            user_id: transaction.user_id,
            asset_id: transaction.asset_id,
            symbol: entry.symbol.clone(),
            tx_type: transaction.tx_type,
            amount: transaction.amount.clone(),
            price: transaction.price.clone(),
            timestamp: Utc::now(),
            note: transaction.note.clone(),
        };
        drop(catalog);
        self.transactions.write().await.push(created.clone());
        Ok(created)
    }

    async fn find_transactions_by_user(
        &self,
        user_id: UserId,
    ) -> PortfolioResult<Vec<Transaction>> {
        let mut txs: Vec<Transaction> = self
            .transactions
            .read()
            .await
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        txs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(txs)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_user(id: i64) -> CurrentUser {
    CurrentUser(auth::domain::entity::user::User {
        id: UserId::from_i64(id),
        uuid: Uuid::new_v4(),
        username: auth::domain::value_object::username::Username::new(&format!("user{id}"))
            .unwrap(),
        email: auth::domain::value_object::email::Email::new(&format!("user{id}@example.com"))
            .unwrap(),
        password: ClearTextPassword::new("a-strong-password".to_string())
            .unwrap()
            .hash(None)
            .unwrap(),
        is_admin: false,
        theme_preference: auth::domain::value_object::theme::Theme::Dark,
        created_at: Utc::now(),
    })
}

fn app_state() -> PortfolioAppState<MemoryPortfolioRepository> {
    PortfolioAppState {
        repo: Arc::new(MemoryPortfolioRepository::new()),
    }
}

async fn seeded_portfolio(
    state: &PortfolioAppState<MemoryPortfolioRepository>,
    user_id: i64,
) -> Portfolio {
    state
        .repo
        .create_portfolio(&NewPortfolio {
            user_id: UserId::from_i64(user_id),
            name: "My Portfolio".to_string(),
        })
        .await
        .unwrap()
}

// ============================================================================
// Portfolios
// ============================================================================

mod portfolio_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_list_portfolios() {
        let state = app_state();
        let user = test_user(1);

        let (status, Json(created)) = handlers::create_portfolio(
            State(state.clone()),
            Extension(user.clone()),
            Json(CreatePortfolioRequest {
                name: "Long term".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, axum::http::StatusCode::CREATED);
        assert_eq!(created.name, "Long term");

        let Json(list) = handlers::list_portfolios(State(state), Extension(user))
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, created.id);
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let state = app_state();

        let err = handlers::create_portfolio(
            State(state),
            Extension(test_user(1)),
            Json(CreatePortfolioRequest {
                name: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PortfolioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_own_portfolio() {
        let state = app_state();
        let portfolio = seeded_portfolio(&state, 1).await;

        let Json(found) = handlers::get_portfolio(
            State(state),
            Extension(test_user(1)),
            Path(portfolio.id.value()),
        )
        .await
        .unwrap();
        assert_eq!(found.id, portfolio.id.value());
    }

    #[tokio::test]
    async fn test_foreign_portfolio_indistinguishable_from_missing() {
        let state = app_state();
        let portfolio = seeded_portfolio(&state, 1).await;

        let foreign = handlers::get_portfolio(
            State(state.clone()),
            Extension(test_user(2)),
            Path(portfolio.id.value()),
        )
        .await
        .unwrap_err();

        let missing = handlers::get_portfolio(
            State(state),
            Extension(test_user(2)),
            Path(999_999),
        )
        .await
        .unwrap_err();

        assert_eq!(foreign.to_string(), missing.to_string());
        assert_eq!(foreign.status_code(), missing.status_code());
    }
}

// ============================================================================
// Holdings
// ============================================================================

mod holding_tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_list_holdings() {
        let state = app_state();
        let portfolio = seeded_portfolio(&state, 1).await;
        let btc = state.repo.seed_asset("BTC", "Bitcoin").await;

        let (status, Json(created)) = handlers::add_portfolio_asset(
            State(state.clone()),
            Extension(test_user(1)),
            Path(portfolio.id.value()),
            Json(AddAssetRequest {
                asset_id: btc.value(),
                amount: "0.25".to_string(),
                purchase_price: Some("64000".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, axum::http::StatusCode::CREATED);
        assert_eq!(created.symbol, "BTC");
        assert_eq!(created.amount, "0.25");

        let Json(list) = handlers::list_portfolio_assets(
            State(state),
            Extension(test_user(1)),
            Path(portfolio.id.value()),
        )
        .await
        .unwrap();
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_asset_rejected() {
        let state = app_state();
        let portfolio = seeded_portfolio(&state, 1).await;

        let err = handlers::add_portfolio_asset(
            State(state),
            Extension(test_user(1)),
            Path(portfolio.id.value()),
            Json(AddAssetRequest {
                asset_id: 42,
                amount: "1".to_string(),
                purchase_price: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PortfolioError::AssetNotFound));
    }

    #[tokio::test]
    async fn test_bad_amount_rejected() {
        let state = app_state();
        let portfolio = seeded_portfolio(&state, 1).await;
        let btc = state.repo.seed_asset("BTC", "Bitcoin").await;

        let err = handlers::add_portfolio_asset(
            State(state),
            Extension(test_user(1)),
            Path(portfolio.id.value()),
            Json(AddAssetRequest {
                asset_id: btc.value(),
                amount: "-3".to_string(),
                purchase_price: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PortfolioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_cannot_add_to_foreign_portfolio() {
        let state = app_state();
        let portfolio = seeded_portfolio(&state, 1).await;
        let btc = state.repo.seed_asset("BTC", "Bitcoin").await;

        let err = handlers::add_portfolio_asset(
            State(state),
            Extension(test_user(2)),
            Path(portfolio.id.value()),
            Json(AddAssetRequest {
                asset_id: btc.value(),
                amount: "1".to_string(),
                purchase_price: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PortfolioError::PortfolioNotFound));
    }
}

// ============================================================================
// Transactions
// ============================================================================

mod transaction_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_list_transactions() {
        let state = app_state();
        let btc = state.repo.seed_asset("BTC", "Bitcoin").await;

        let (status, Json(created)) = handlers::create_transaction(
            State(state.clone()),
            Extension(test_user(1)),
            Json(CreateTransactionRequest {
                asset_id: btc.value(),
                tx_type: "buy".to_string(),
                amount: "0.5".to_string(),
                price: "64000".to_string(),
                note: Some("dip".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, axum::http::StatusCode::CREATED);
        assert_eq!(created.symbol, "BTC");

        let Json(list) = handlers::list_transactions(State(state), Extension(test_user(1)))
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].note.as_deref(), Some("dip"));
    }

    #[tokio::test]
    async fn test_transactions_are_per_user() {
        let state = app_state();
        let btc = state.repo.seed_asset("BTC", "Bitcoin").await;

        handlers::create_transaction(
            State(state.clone()),
            Extension(test_user(1)),
            Json(CreateTransactionRequest {
                asset_id: btc.value(),
                tx_type: "sell".to_string(),
                amount: "1".to_string(),
                price: "60000".to_string(),
                note: None,
            }),
        )
        .await
        .unwrap();

        let Json(other) = handlers::list_transactions(State(state), Extension(test_user(2)))
            .await
            .unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_type_rejected() {
        let state = app_state();
        let btc = state.repo.seed_asset("BTC", "Bitcoin").await;

        let err = handlers::create_transaction(
            State(state),
            Extension(test_user(1)),
            Json(CreateTransactionRequest {
                asset_id: btc.value(),
                tx_type: "stake".to_string(),
                amount: "1".to_string(),
                price: "100".to_string(),
                note: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PortfolioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_catalog_sorted_by_symbol() {
        let state = app_state();
        state.repo.seed_asset("ETH", "Ethereum").await;
        state.repo.seed_asset("BTC", "Bitcoin").await;

        let Json(assets) = handlers::list_assets(State(state)).await.unwrap();
        let symbols: Vec<_> = assets.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH"]);
    }
}
