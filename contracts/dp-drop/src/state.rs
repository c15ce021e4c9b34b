use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Empty};
use cw_storage_plus::{Item, Map};

/// 默认随机池大小
pub const RANDOM_TOKEN_LIMIT: u64 = 900;
/// 默认指定池大小
pub const KNOWN_TOKEN_LIMIT: u64 = 100;
/// 默认单次随机铸造上限
pub const MAX_MINTS_PER_TX: u32 = 10;
/// 随机池大小上限，揭示时整个排列需在单笔交易内写入
pub const MAX_RANDOM_TOKEN_LIMIT: u64 = 10_000;

/// 全局配置（实例化后除 base_uri 外不可变）
#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub random_token_limit: u64,
    pub known_token_limit: u64,
    pub random_mint_price: Coin,
    pub known_mint_price: Coin,
    pub max_mints_per_tx: u32,
}

impl Config {
    pub fn denom(&self) -> &str {
        &self.random_mint_price.denom
    }

    /// 指定池最后一个 token_id
    pub fn last_token_id(&self) -> u64 {
        self.random_token_limit + self.known_token_limit
    }

    pub fn is_random_pool(&self, token_id: u64) -> bool {
        (1..=self.random_token_limit).contains(&token_id)
    }
}

/// 发售状态：一次性标记与两个池的计数
#[cw_serde]
pub struct SaleState {
    pub sale_started: bool,
    pub base_uri_frozen: bool,
    pub shuffled: bool,
    pub next_random_token_id: u64,
    pub random_tokens_minted: u64,
    pub known_tokens_minted: u64,
    /// hex(sha256(seed|salt))
    pub seed_commitment: Option<String>,
}

impl SaleState {
    pub fn new() -> Self {
        SaleState {
            sale_started: false,
            base_uri_frozen: false,
            shuffled: false,
            next_random_token_id: 1,
            random_tokens_minted: 0,
            known_tokens_minted: 0,
            seed_commitment: None,
        }
    }
}

impl Default for SaleState {
    fn default() -> Self {
        Self::new()
    }
}

/// 最小化的 Token 信息：id → 所有者（只写一次）
#[cw_serde]
pub struct TokenInfo {
    pub owner: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const SALE: Item<SaleState> = Item::new("sale");
pub const TOKENS: Map<u64, TokenInfo> = Map::new("tokens");
/// (owner, token_id) 索引，用于按所有者分页
pub const OWNER_TOKENS: Map<(Addr, u64), Empty> = Map::new("owner_tokens");
/// 随机池 token_id → 揭示后的展示 id
pub const REVEALED_IDS: Map<u64, u64> = Map::new("revealed_ids");
