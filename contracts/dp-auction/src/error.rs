use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

/// dp_auction 合约错误定义
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Not authorized")]
    NotAuthorized,

    #[error("Auction not started")]
    NotStarted,

    #[error("Auction already started")]
    AlreadyStarted,

    #[error("Auction has ended")]
    AuctionEnded,

    #[error("Auction has not ended")]
    NotEnded,

    #[error("Amount is less than minimum bid: {amount} < {minimum}")]
    BelowMinimumBid { amount: String, minimum: String },

    #[error("Unexpected funds in denom {denom}")]
    UnexpectedFunds { denom: String },

    #[error("Amount is not greater than max bid plus percentage")]
    BidTooLow,

    /// 出价低于当前最高价时，差值计算下溢（保留原有失败模式）
    #[error("Arithmetic fault: {0}")]
    ArithmeticFault(#[from] OverflowError),

    #[error("Minter is not the winner")]
    NotWinner,

    #[error("Token already minted")]
    AlreadyMinted,

    #[error("Already recovered")]
    AlreadyRecovered,

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid migration: {reason}")]
    InvalidMigration { reason: String },
}
