//! Request/Response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{CryptoAsset, Portfolio, PortfolioAsset, Transaction};
use crate::domain::value_object::TxType;

/// Create portfolio request
#[derive(Debug, Deserialize)]
pub struct CreatePortfolioRequest {
    pub name: String,
}

/// Add holding request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAssetRequest {
    pub asset_id: i64,
    pub amount: String,
    pub purchase_price: Option<String>,
}

/// Create transaction request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub asset_id: i64,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub amount: String,
    pub price: String,
    pub note: Option<String>,
}

/// Portfolio representation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Portfolio> for PortfolioResponse {
    fn from(p: &Portfolio) -> Self {
        Self {
            id: p.id.value(),
            user_id: p.user_id.value(),
            name: p.name.clone(),
            created_at: p.created_at,
        }
    }
}

/// Catalog entry representation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    pub id: i64,
    pub symbol: String,
    pub name: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&CryptoAsset> for AssetResponse {
    fn from(a: &CryptoAsset) -> Self {
        Self {
            id: a.id.value(),
            symbol: a.symbol.clone(),
            name: a.name.clone(),
            icon: a.icon.clone(),
            created_at: a.created_at,
        }
    }
}

/// Holding representation, with its catalog entry inlined
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAssetResponse {
    pub id: i64,
    pub portfolio_id: i64,
    pub asset_id: i64,
    pub symbol: String,
    pub name: String,
    pub icon: Option<String>,
    pub amount: String,
    pub purchase_price: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&PortfolioAsset> for PortfolioAssetResponse {
    fn from(a: &PortfolioAsset) -> Self {
        Self {
            id: a.id.value(),
            portfolio_id: a.portfolio_id.value(),
            asset_id: a.asset_id.value(),
            symbol: a.symbol.clone(),
            name: a.asset_name.clone(),
            icon: a.icon.clone(),
            amount: a.amount.as_str().to_string(),
            purchase_price: a.purchase_price.as_ref().map(|p| p.as_str().to_string()),
            created_at: a.created_at,
        }
    }
}

/// Transaction representation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i64,
    pub asset_id: i64,
    pub symbol: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub amount: String,
    pub price: String,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
}

impl From<&Transaction> for TransactionResponse {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.value(),
            asset_id: t.asset_id.value(),
            symbol: t.symbol.clone(),
            tx_type: t.tx_type,
            amount: t.amount.as_str().to_string(),
            price: t.price.as_str().to_string(),
            timestamp: t.timestamp,
            note: t.note.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::DecimalString;
    use kernel::id::{AssetId, TransactionId, UserId};

    #[test]
    fn test_transaction_response_uses_type_key() {
        let tx = Transaction {
            id: TransactionId::from_i64(1),
            user_id: UserId::from_i64(2),
            asset_id: AssetId::from_i64(3),
            symbol: "BTC".to_string(),
            tx_type: TxType::Buy,
            amount: DecimalString::new("0.5").unwrap(),
            price: DecimalString::new("64000").unwrap(),
            timestamp: Utc::now(),
            note: None,
        };

        let json = serde_json::to_value(TransactionResponse::from(&tx)).unwrap();
        assert_eq!(json["type"], "buy");
        assert_eq!(json["amount"], "0.5");
        assert_eq!(json["assetId"], 3);
    }
}
