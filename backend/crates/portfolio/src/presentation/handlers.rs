//! HTTP Handlers
//!
//! The handlers talk to the repositories directly; the flows here are
//! plain CRUD with ownership checks and carry no use-case layer.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use auth::CurrentUser;
use kernel::id::{AssetId, PortfolioId, UserId};

use crate::domain::entity::{NewPortfolio, NewPortfolioAsset, NewTransaction, Portfolio};
use crate::domain::repository::{
    AssetCatalogRepository, PortfolioRepository, TransactionRepository,
};
use crate::domain::value_object::{DecimalString, TxType};
use crate::error::{PortfolioError, PortfolioResult};
use crate::presentation::dto::{
    AddAssetRequest, AssetResponse, CreatePortfolioRequest, CreateTransactionRequest,
    PortfolioAssetResponse, PortfolioResponse, TransactionResponse,
};

const MAX_PORTFOLIO_NAME_LEN: usize = 100;

/// Shared state for the portfolio handlers
pub struct PortfolioAppState<R>
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository,
{
    pub repo: Arc<R>,
}

impl<R> Clone for PortfolioAppState<R>
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// Load a portfolio and verify ownership. A foreign portfolio answers
/// exactly like a missing one.
async fn owned_portfolio<R>(
    repo: &R,
    id: PortfolioId,
    owner: UserId,
) -> PortfolioResult<Portfolio>
where
    R: PortfolioRepository + Send + Sync,
{
    let portfolio = repo
        .find_portfolio(id)
        .await?
        .ok_or(PortfolioError::PortfolioNotFound)?;

    if portfolio.user_id != owner {
        return Err(PortfolioError::PortfolioNotFound);
    }

    Ok(portfolio)
}

fn validate_name(name: &str) -> PortfolioResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PortfolioError::Validation("Name is required".to_string()));
    }
    if name.len() > MAX_PORTFOLIO_NAME_LEN {
        return Err(PortfolioError::Validation("Name is too long".to_string()));
    }
    Ok(name.to_string())
}

// ============================================================================
// Portfolios
// ============================================================================

/// GET /api/portfolios
pub async fn list_portfolios<R>(
    State(state): State<PortfolioAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> PortfolioResult<Json<Vec<PortfolioResponse>>>
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository + Send + Sync + 'static,
{
    let portfolios = state.repo.find_portfolios_by_user(user.id).await?;
    Ok(Json(portfolios.iter().map(PortfolioResponse::from).collect()))
}

/// POST /api/portfolios
pub async fn create_portfolio<R>(
    State(state): State<PortfolioAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreatePortfolioRequest>,
) -> PortfolioResult<(StatusCode, Json<PortfolioResponse>)>
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository + Send + Sync + 'static,
{
    let name = validate_name(&req.name)?;

    let portfolio = state
        .repo
        .create_portfolio(&NewPortfolio {
            user_id: user.id,
            name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PortfolioResponse::from(&portfolio))))
}

/// GET /api/portfolios/{id}
pub async fn get_portfolio<R>(
    State(state): State<PortfolioAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> PortfolioResult<Json<PortfolioResponse>>
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository + Send + Sync + 'static,
{
    let portfolio =
        owned_portfolio(state.repo.as_ref(), PortfolioId::from_i64(id), user.id).await?;
    Ok(Json(PortfolioResponse::from(&portfolio)))
}

// ============================================================================
// Holdings
// ============================================================================

/// GET /api/portfolios/{id}/assets
pub async fn list_portfolio_assets<R>(
    State(state): State<PortfolioAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> PortfolioResult<Json<Vec<PortfolioAssetResponse>>>
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository + Send + Sync + 'static,
{
    let portfolio =
        owned_portfolio(state.repo.as_ref(), PortfolioId::from_i64(id), user.id).await?;

    let assets = state.repo.find_portfolio_assets(portfolio.id).await?;
    Ok(Json(assets.iter().map(PortfolioAssetResponse::from).collect()))
}

/// POST /api/portfolios/{id}/assets
pub async fn add_portfolio_asset<R>(
    State(state): State<PortfolioAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<AddAssetRequest>,
) -> PortfolioResult<(StatusCode, Json<PortfolioAssetResponse>)>
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository + Send + Sync + 'static,
{
    let portfolio =
        owned_portfolio(state.repo.as_ref(), PortfolioId::from_i64(id), user.id).await?;

    let asset_id = AssetId::from_i64(req.asset_id);
    if state.repo.find_asset_by_id(asset_id).await?.is_none() {
        return Err(PortfolioError::AssetNotFound);
    }

    let amount = DecimalString::new(&req.amount)
        .map_err(|e| PortfolioError::Validation(e.to_string()))?;
    let purchase_price = req
        .purchase_price
        .as_deref()
        .map(DecimalString::new)
        .transpose()
        .map_err(|e| PortfolioError::Validation(e.to_string()))?;

    let created = state
        .repo
        .add_portfolio_asset(&NewPortfolioAsset {
            portfolio_id: portfolio.id,
            asset_id,
            amount,
            purchase_price,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PortfolioAssetResponse::from(&created))))
}

// ============================================================================
// Asset catalog
// ============================================================================

/// GET /api/assets (public)
pub async fn list_assets<R>(
    State(state): State<PortfolioAppState<R>>,
) -> PortfolioResult<Json<Vec<AssetResponse>>>
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository + Send + Sync + 'static,
{
    let assets = state.repo.find_all_assets().await?;
    Ok(Json(assets.iter().map(AssetResponse::from).collect()))
}

// ============================================================================
// Transactions
// ============================================================================

/// GET /api/transactions
pub async fn list_transactions<R>(
    State(state): State<PortfolioAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> PortfolioResult<Json<Vec<TransactionResponse>>>
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository + Send + Sync + 'static,
{
    let transactions = state.repo.find_transactions_by_user(user.id).await?;
    Ok(Json(
        transactions.iter().map(TransactionResponse::from).collect(),
    ))
}

/// POST /api/transactions
pub async fn create_transaction<R>(
    State(state): State<PortfolioAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreateTransactionRequest>,
) -> PortfolioResult<(StatusCode, Json<TransactionResponse>)>
where
    R: PortfolioRepository + AssetCatalogRepository + TransactionRepository + Send + Sync + 'static,
{
    let tx_type = TxType::parse(&req.tx_type)
        .map_err(|e| PortfolioError::Validation(e.to_string()))?;
    let amount = DecimalString::new(&req.amount)
        .map_err(|e| PortfolioError::Validation(e.to_string()))?;
    let price = DecimalString::new(&req.price)
        .map_err(|e| PortfolioError::Validation(e.to_string()))?;

    let asset_id = AssetId::from_i64(req.asset_id);
    if state.repo.find_asset_by_id(asset_id).await?.is_none() {
        return Err(PortfolioError::AssetNotFound);
    }

    let created = state
        .repo
        .create_transaction(&NewTransaction {
            user_id: user.id,
            asset_id,
            tx_type,
            amount,
            price,
            note: req.note,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(&created))))
}
