//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{AssetId, PortfolioAssetId, PortfolioId, TransactionId, UserId};
use sqlx::PgPool;

use auth::PortfolioProvisioner;

use crate::DEFAULT_PORTFOLIO_NAME;
use crate::domain::entity::{
    CryptoAsset, NewPortfolio, NewPortfolioAsset, NewTransaction, Portfolio, PortfolioAsset,
    Transaction,
};
use crate::domain::repository::{
    AssetCatalogRepository, PortfolioRepository, TransactionRepository,
};
use crate::domain::value_object::{DecimalString, TxType};
use crate::error::{PortfolioError, PortfolioResult};

/// PostgreSQL-backed portfolio repository
#[derive(Clone)]
pub struct PgPortfolioRepository {
    pool: PgPool,
}

impl PgPortfolioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PortfolioRepository for PgPortfolioRepository {
    async fn create_portfolio(&self, portfolio: &NewPortfolio) -> PortfolioResult<Portfolio> {
        let row = sqlx::query_as::<_, PortfolioRow>(
            r#"
            INSERT INTO portfolios (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, created_at
            "#,
        )
        .bind(portfolio.user_id.value())
        .bind(&portfolio.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_portfolio())
    }

    async fn find_portfolio(&self, id: PortfolioId) -> PortfolioResult<Option<Portfolio>> {
        let row = sqlx::query_as::<_, PortfolioRow>(
            "SELECT id, user_id, name, created_at FROM portfolios WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_portfolio()))
    }

    async fn find_portfolios_by_user(&self, user_id: UserId) -> PortfolioResult<Vec<Portfolio>> {
        let rows = sqlx::query_as::<_, PortfolioRow>(
            "SELECT id, user_id, name, created_at FROM portfolios WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_portfolio()).collect())
    }

    async fn find_portfolio_assets(
        &self,
        portfolio_id: PortfolioId,
    ) -> PortfolioResult<Vec<PortfolioAsset>> {
        let rows = sqlx::query_as::<_, PortfolioAssetRow>(
            r#"
            SELECT
                pa.id,
                pa.portfolio_id,
                pa.asset_id,
                ca.symbol,
                ca.name AS asset_name,
                ca.icon,
                pa.amount,
                pa.purchase_price,
                pa.created_at
            FROM portfolio_assets pa
            JOIN crypto_assets ca ON ca.id = pa.asset_id
            WHERE pa.portfolio_id = $1
            ORDER BY pa.id
            "#,
        )
        .bind(portfolio_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_asset()).collect())
    }

    async fn add_portfolio_asset(
        &self,
        asset: &NewPortfolioAsset,
    ) -> PortfolioResult<PortfolioAsset> {
        let row = sqlx::query_as::<_, PortfolioAssetRow>(
            r#"
            WITH inserted AS (
                INSERT INTO portfolio_assets (portfolio_id, asset_id, amount, purchase_price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, portfolio_id, asset_id, amount, purchase_price, created_at
            )
            SELECT
                i.id,
                i.portfolio_id,
                i.asset_id,
                ca.symbol,
                ca.name AS asset_name,
                ca.icon,
                i.amount,
                i.purchase_price,
                i.created_at
            FROM inserted i
            JOIN crypto_assets ca ON ca.id = i.asset_id
            "#,
        )
        .bind(asset.portfolio_id.value())
        .bind(asset.asset_id.value())
        .bind(asset.amount.as_str())
        .bind(asset.purchase_price.as_ref().map(|p| p.as_str()))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_asset())
    }
}

impl AssetCatalogRepository for PgPortfolioRepository {
    async fn find_all_assets(&self) -> PortfolioResult<Vec<CryptoAsset>> {
        let rows = sqlx::query_as::<_, CryptoAssetRow>(
            "SELECT id, symbol, name, icon, created_at FROM crypto_assets ORDER BY symbol",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_asset()).collect())
    }

    async fn find_asset_by_id(&self, id: AssetId) -> PortfolioResult<Option<CryptoAsset>> {
        let row = sqlx::query_as::<_, CryptoAssetRow>(
            "SELECT id, symbol, name, icon, created_at FROM crypto_assets WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_asset()))
    }
}

impl TransactionRepository for PgPortfolioRepository {
    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> PortfolioResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            WITH inserted AS (
                INSERT INTO transactions (user_id, asset_id, type, amount, price, note)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, user_id, asset_id, type, amount, price, timestamp, note
            )
            SELECT
                i.id,
                i.user_id,
                i.asset_id,
                ca.symbol,
                i.type,
                i.amount,
                i.price,
                i.timestamp,
                i.note
            FROM inserted i
            JOIN crypto_assets ca ON ca.id = i.asset_id
            "#,
        )
        .bind(transaction.user_id.value())
        .bind(transaction.asset_id.value())
        .bind(transaction.tx_type.as_str())
        .bind(transaction.amount.as_str())
        .bind(transaction.price.as_str())
        .bind(&transaction.note)
        .fetch_one(&self.pool)
        .await?;

        row.into_transaction()
    }

    async fn find_transactions_by_user(&self, user_id: UserId) -> PortfolioResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT
                t.id,
                t.user_id,
                t.asset_id,
                ca.symbol,
                t.type,
                t.amount,
                t.price,
                t.timestamp,
                t.note
            FROM transactions t
            JOIN crypto_assets ca ON ca.id = t.asset_id
            WHERE t.user_id = $1
            ORDER BY t.timestamp DESC, t.id DESC
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_transaction()).collect()
    }
}

/// Registration hook: every new account gets one starting portfolio.
impl PortfolioProvisioner for PgPortfolioRepository {
    async fn provision_default(&self, owner: UserId) -> AppResult<()> {
        self.create_portfolio(&NewPortfolio {
            user_id: owner,
            name: DEFAULT_PORTFOLIO_NAME.to_string(),
        })
        .await
        .map_err(|e| AppError::internal(format!("Failed to provision portfolio: {}", e)))?;

        tracing::info!(user_id = %owner, "Provisioned default portfolio");

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PortfolioRow {
    id: i64,
    user_id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl PortfolioRow {
    fn into_portfolio(self) -> Portfolio {
        Portfolio {
            id: PortfolioId::from_i64(self.id),
            user_id: UserId::from_i64(self.user_id),
            name: self.name,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CryptoAssetRow {
    id: i64,
    symbol: String,
    name: String,
    icon: Option<String>,
    created_at: DateTime<Utc>,
}

impl CryptoAssetRow {
    fn into_asset(self) -> CryptoAsset {
        CryptoAsset {
            id: AssetId::from_i64(self.id),
            symbol: self.symbol,
            name: self.name,
            icon: self.icon,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PortfolioAssetRow {
    id: i64,
    portfolio_id: i64,
    asset_id: i64,
    symbol: String,
    asset_name: String,
    icon: Option<String>,
    amount: String,
    purchase_price: Option<String>,
    created_at: DateTime<Utc>,
}

impl PortfolioAssetRow {
    fn into_asset(self) -> PortfolioAsset {
        PortfolioAsset {
            id: PortfolioAssetId::from_i64(self.id),
            portfolio_id: PortfolioId::from_i64(self.portfolio_id),
            asset_id: AssetId::from_i64(self.asset_id),
            symbol: self.symbol,
            asset_name: self.asset_name,
            icon: self.icon,
            amount: DecimalString::restore(self.amount),
            purchase_price: self.purchase_price.map(DecimalString::restore),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    user_id: i64,
    asset_id: i64,
    symbol: String,
    #[sqlx(rename = "type")]
    tx_type: String,
    amount: String,
    price: String,
    timestamp: DateTime<Utc>,
    note: Option<String>,
}

impl TransactionRow {
    fn into_transaction(self) -> PortfolioResult<Transaction> {
        let tx_type = TxType::parse(&self.tx_type).map_err(|e| {
            PortfolioError::Validation(format!("Invalid stored transaction type: {}", e))
        })?;

        Ok(Transaction {
            id: TransactionId::from_i64(self.id),
            user_id: UserId::from_i64(self.user_id),
            asset_id: AssetId::from_i64(self.asset_id),
            symbol: self.symbol,
            tx_type,
            amount: DecimalString::restore(self.amount),
            price: DecimalString::restore(self.price),
            timestamp: self.timestamp,
            note: self.note,
        })
    }
}
