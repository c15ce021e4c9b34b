//! dp_auction
//!
//! A CosmWasm English auction for a single NFT:
//! - Owner-started, fixed-duration bidding window
//! - Effective bid = attached coins + caller's own refundable balance
//! - Overtaken bids are credited to a pull-based withdrawal ledger
//! - The winner mints the single token once the window has closed
//! - Owner recovers the winning bid after close
//!
//! CosmWasm 英式拍卖合约（单个 NFT），功能包括：
//! - 拥有者开启拍卖，拍卖时长固定
//! - 有效出价 = 本次附带金额 + 调用者自己的待退款余额
//! - 被超越的出价记入待提取账本，由出价人主动提取
//! - 拍卖结束后由最高出价者铸造唯一的 NFT
//! - 拍卖结束后拥有者取回中标金额
pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::contract::{execute, instantiate, migrate, query};
pub use crate::error::ContractError;

#[cfg(test)]
mod tests;
