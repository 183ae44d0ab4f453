//! Portfolio Entities

use chrono::{DateTime, Utc};
use kernel::id::{AssetId, PortfolioAssetId, PortfolioId, TransactionId, UserId};

use crate::domain::value_object::{DecimalString, TxType};

/// A user's portfolio
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub id: PortfolioId,
    pub user_id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A portfolio about to be inserted
#[derive(Debug, Clone)]
pub struct NewPortfolio {
    pub user_id: UserId,
    pub name: String,
}

/// A catalog entry for a tradeable crypto asset
#[derive(Debug, Clone)]
pub struct CryptoAsset {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A holding inside a portfolio, joined with its catalog entry
#[derive(Debug, Clone)]
pub struct PortfolioAsset {
    pub id: PortfolioAssetId,
    pub portfolio_id: PortfolioId,
    pub asset_id: AssetId,
    pub symbol: String,
    pub asset_name: String,
    pub icon: Option<String>,
    pub amount: DecimalString,
    pub purchase_price: Option<DecimalString>,
    pub created_at: DateTime<Utc>,
}

/// A holding about to be inserted
#[derive(Debug, Clone)]
pub struct NewPortfolioAsset {
    pub portfolio_id: PortfolioId,
    pub asset_id: AssetId,
    pub amount: DecimalString,
    pub purchase_price: Option<DecimalString>,
}

/// A buy/sell/transfer record, joined with its catalog entry
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub asset_id: AssetId,
    pub symbol: String,
    pub tx_type: TxType,
    pub amount: DecimalString,
    pub price: DecimalString,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
}

/// A transaction about to be inserted
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: UserId,
    pub asset_id: AssetId,
    pub tx_type: TxType,
    pub amount: DecimalString,
    pub price: DecimalString,
    pub note: Option<String>,
}
