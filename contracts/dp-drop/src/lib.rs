//! dp_drop
//!
//! A CosmWasm two-pool NFT sale:
//! - Random pool: ids `[1, R]` assigned sequentially, remapped once by reveal
//! - Known pool: ids `(R, R+K]` chosen directly by the buyer
//! - Per-call mint quota and per-pool price floors
//! - Admin-only base URI (settable once), sale start, fund recovery
//! - Commit–reveal seed for the one-time shuffle, sha256(seed|salt)
//!
//! CosmWasm 双池 NFT 发售合约，功能包括：
//! - 随机池：按顺序分配 token_id，揭示后统一重映射
//! - 指定池：买家直接选择 token_id
//! - 单次铸造数量上限与各池最低价格
//! - 管理员设置 baseURI（仅一次）、开启发售、取回资金
//! - 提交-揭示式种子，一次性洗牌
pub mod contract;
pub mod error;
pub mod msg;
pub mod shuffle;
pub mod state;

pub use crate::contract::{execute, instantiate, migrate, query};
pub use crate::error::ContractError;
