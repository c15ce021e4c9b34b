use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Timestamp, Uint128};

/// 实例化参数：集合名称、符号与 tokenURI 固定；拍卖参数可选，缺省使用 state.rs 中的常量
#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub token_uri: String,
    pub minimum_bid: Coin,
    pub min_bid_diff_perc: Option<u64>,
    pub duration: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    StartAuction {},
    /// 附带本币出价
    Bid {},
    Withdraw {},
    Mint {},
    RecoverFunds {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(AuctionStateResponse)]
    AuctionState {},
    #[returns(PendingWithdrawalResponse)]
    PendingWithdrawal { address: String },
    // CW721-like
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },
    #[returns(TokenUriResponse)]
    TokenUri { token_id: u64 },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: String,
    pub name: String,
    pub symbol: String,
    pub token_uri: String,
    pub minimum_bid: Coin,
    pub min_bid_diff_perc: u64,
    pub duration: u64,
}

/// 拍卖状态查询返回；ended 按查询时的区块时间计算
#[cw_serde]
pub struct AuctionStateResponse {
    pub started: bool,
    pub start_time: Option<Timestamp>,
    pub finish_time: Option<Timestamp>,
    pub ended: bool,
    pub max_bid: Uint128,
    pub max_bidder: Option<String>,
    pub minted: bool,
    pub funds_recovered: bool,
}

#[cw_serde]
pub struct PendingWithdrawalResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
}

#[cw_serde]
pub struct TokenUriResponse {
    pub token_uri: Option<String>,
}
