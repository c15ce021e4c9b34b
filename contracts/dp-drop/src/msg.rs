use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Coin;

/// 实例化参数：集合信息与两个池的定价；池大小与单次上限可选，缺省使用 state.rs 中的常量
#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    /// 缺省为部署者
    pub admin: Option<String>,
    pub random_mint_price: Coin,
    pub known_mint_price: Coin,
    pub random_token_limit: Option<u64>,
    pub known_token_limit: Option<u64>,
    pub max_mints_per_tx: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // admin controls
    SetBaseUri { uri: String },
    StartSale {},
    RecoverFunds {},
    /// 提交洗牌种子承诺：hex(sha256(seed|salt))
    CommitSeed { commitment: String },
    Reveal { seed: String, salt: String },
    // payable
    RandomMint { recipient: String, count: u32 },
    KnownMint { recipient: String, token_id: u64 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(SaleStateResponse)]
    SaleState {},
    #[returns(RevealedIdResponse)]
    RevealedId { token_id: u64 },
    // CW721-like
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },
    #[returns(NftInfoResponse)]
    NftInfo { token_id: u64 },
    #[returns(TokenUriResponse)]
    TokenUri { token_id: u64 },
    #[returns(NumTokensResponse)]
    NumTokens {},
    #[returns(TokensResponse)]
    AllTokens { start_after: Option<u64>, limit: Option<u32> },
    #[returns(TokensResponse)]
    Tokens { owner: String, start_after: Option<u64>, limit: Option<u32> },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: String,
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub random_token_limit: u64,
    pub known_token_limit: u64,
    pub random_mint_price: Coin,
    pub known_mint_price: Coin,
    pub max_mints_per_tx: u32,
}

/// 发售状态查询返回：一次性标记、计数与剩余量
#[cw_serde]
pub struct SaleStateResponse {
    pub sale_started: bool,
    pub base_uri_frozen: bool,
    pub shuffled: bool,
    pub seed_committed: bool,
    pub next_random_token_id: u64,
    pub random_tokens_minted: u64,
    pub known_tokens_minted: u64,
    pub random_mints_remaining: u64,
    pub known_mints_remaining: u64,
}

/// 揭示后的展示 id；未揭示时为 None
#[cw_serde]
pub struct RevealedIdResponse {
    pub revealed_id: Option<u64>,
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
}

#[cw_serde]
pub struct NftInfoResponse {
    pub owner: String,
    pub token_uri: Option<String>,
}

#[cw_serde]
pub struct TokenUriResponse {
    pub token_uri: Option<String>,
}

#[cw_serde]
pub struct NumTokensResponse {
    pub count: u64,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<u64>,
}
