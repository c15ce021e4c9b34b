use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

/// 默认最低出价（最小单位）
pub const MINIMUM_BID: u128 = 100_000;
/// 默认加价幅度百分比：新出价须高出当前最高价该比例
pub const MIN_BID_DIFF_PERC: u64 = 5;
/// 默认拍卖时长（秒）
pub const DURATION: u64 = 86_400;
/// 拍卖的唯一 token_id
pub const AUCTION_TOKEN_ID: u64 = 1;

/// 全局配置（实例化后不可变）：拥有者、集合信息与拍卖参数
#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub name: String,
    pub symbol: String,
    pub token_uri: String,
    /// denom 决定接受的原生币种
    pub minimum_bid: Coin,
    pub min_bid_diff_perc: u64,
    pub duration: u64,
}

impl Config {
    pub fn denom(&self) -> &str {
        &self.minimum_bid.denom
    }
}

/// 拍卖生命周期；“已结束”由当前时间与 finish_time 比较得出
#[cw_serde]
pub enum AuctionStatus {
    Created,
    Started { start_time: Timestamp, finish_time: Timestamp },
}

impl AuctionStatus {
    /// 返回结束时间，未开始时为 None
    pub fn finish_time(&self) -> Option<Timestamp> {
        match self {
            AuctionStatus::Created => None,
            AuctionStatus::Started { finish_time, .. } => Some(*finish_time),
        }
    }
}

/// 拍卖运行状态：生命周期、最高出价及两个一次性终态标记
#[cw_serde]
pub struct AuctionState {
    pub status: AuctionStatus,
    pub max_bid: Uint128,
    pub max_bidder: Option<Addr>,
    pub minted: bool,
    pub funds_recovered: bool,
}

impl AuctionState {
    pub fn new() -> Self {
        AuctionState {
            status: AuctionStatus::Created,
            max_bid: Uint128::zero(),
            max_bidder: None,
            minted: false,
            funds_recovered: false,
        }
    }
}

impl Default for AuctionState {
    fn default() -> Self {
        Self::new()
    }
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const AUCTION: Item<AuctionState> = Item::new("auction");
/// 地址 → 待提取的退款金额
pub const PENDING_WITHDRAWALS: Map<Addr, Uint128> = Map::new("pending_withdrawals");
/// 铸造后的唯一 token 所有者
pub const TOKEN_OWNER: Item<Addr> = Item::new("token_owner");
