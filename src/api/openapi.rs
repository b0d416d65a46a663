//! OpenAPI document for the escrow gateway.
//!
//! With the `swagger-ui` feature the document is served at
//! `/api-docs/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::api::dto::{
    AmountRequest, ApproveRequest, ApproveResponse, AssetBalanceResponse, CreatePoolRequest,
    FundResponse, MintRequest, MintResponse, PaginationMeta, PoolListResponse, PoolResponse,
    TransferValidatorRequest, TransferValidatorResponse, WithdrawResponse,
};
use crate::api::handlers::system::{EscrowAssetInfo, HealthResponse};
use crate::domain::{Identity, PoolName};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated API documentation.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Pool Escrow API",
        description = "Named escrow pools funded by anyone and released only to their validator.",
        license(name = "MIT")
    ),
    paths(
        crate::api::handlers::pool::create_pool,
        crate::api::handlers::pool::list_pools,
        crate::api::handlers::pool::get_pool,
        crate::api::handlers::funds::fund_pool,
        crate::api::handlers::funds::withdraw_pool,
        crate::api::handlers::validator::transfer_validator,
        crate::api::handlers::asset::get_balance,
        crate::api::handlers::asset::approve,
        crate::api::handlers::asset::mint,
        crate::api::handlers::system::health_handler,
        crate::api::handlers::system::escrow_asset_handler,
    ),
    components(
        schemas(
            PoolName,
            Identity,
            CreatePoolRequest,
            PoolResponse,
            PoolListResponse,
            PaginationMeta,
            AmountRequest,
            FundResponse,
            WithdrawResponse,
            TransferValidatorRequest,
            TransferValidatorResponse,
            AssetBalanceResponse,
            ApproveRequest,
            ApproveResponse,
            MintRequest,
            MintResponse,
            HealthResponse,
            EscrowAssetInfo,
            ErrorResponse,
            ErrorBody,
        )
    ),
    tags(
        (name = "Pools", description = "Pool registration and queries"),
        (name = "Funds", description = "Deposits and withdrawals"),
        (name = "Validators", description = "Validator role handover"),
        (name = "Asset", description = "Escrowed asset balances and approvals"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;
