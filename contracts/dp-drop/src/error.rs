use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

/// dp_drop 合约错误定义
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Not authorized")]
    NotAuthorized,

    #[error("Sale not started")]
    NotStarted,

    #[error("Sale already started")]
    AlreadyStarted,

    #[error("BaseURI is frozen")]
    UriFrozen,

    #[error("Mint count must be positive")]
    NothingToMint,

    #[error("Amount is over the limit per tx: {count} > {max}")]
    OverLimitPerCall { count: u32, max: u32 },

    #[error("Unexpected funds in denom {denom}")]
    UnexpectedFunds { denom: String },

    #[error("Insufficient funds: sent {sent}, required {required}")]
    InsufficientFunds { sent: String, required: String },

    #[error("Sale limit reached")]
    PoolExhausted,

    #[error("Selected Token Id is for random mint")]
    WrongPool,

    #[error("Selected Token Id is over the limit")]
    OverLimit,

    #[error("Token {token_id} already owned")]
    AlreadyOwned { token_id: u64 },

    #[error("Already shuffled")]
    AlreadyShuffled,

    #[error("Seed commitment not set")]
    SeedNotCommitted,

    #[error("Seed commitment already set")]
    SeedAlreadyCommitted,

    #[error("Seed does not match commitment")]
    SeedMismatch,

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid migration: {reason}")]
    InvalidMigration { reason: String },
}
