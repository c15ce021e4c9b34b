#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, coins, to_json_binary, Addr, BankMsg, Binary, Deps, DepsMut, Env, Event, MessageInfo,
    Response, StdError, StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::msg::{
    AuctionStateResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg,
    OwnerOfResponse, PendingWithdrawalResponse, QueryMsg, TokenUriResponse,
};
use crate::state::{
    AuctionState, AuctionStatus, Config, AUCTION, AUCTION_TOKEN_ID, CONFIG, DURATION,
    MIN_BID_DIFF_PERC, PENDING_WITHDRAWALS, TOKEN_OWNER,
};

/// 合约名称与版本（用于迁移安全校验）
const CONTRACT_NAME: &str = "crates.io:dp_auction";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 初始化合约：调用者成为拥有者，固定集合信息与拍卖参数，初始为 Created
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let min_bid_diff_perc = msg.min_bid_diff_perc.unwrap_or(MIN_BID_DIFF_PERC);
    let duration = msg.duration.unwrap_or(DURATION);

    if msg.minimum_bid.amount.is_zero() {
        return Err(ContractError::InvalidConfig { reason: "minimum bid must be positive".to_string() });
    }
    if min_bid_diff_perc > 100 {
        return Err(ContractError::InvalidConfig { reason: "bid increment percentage above 100".to_string() });
    }
    if duration == 0 {
        return Err(ContractError::InvalidConfig { reason: "duration must be positive".to_string() });
    }

    let config = Config {
        owner: info.sender.clone(),
        name: msg.name,
        symbol: msg.symbol,
        token_uri: msg.token_uri,
        minimum_bid: msg.minimum_bid,
        min_bid_diff_perc,
        duration,
    };
    CONFIG.save(deps.storage, &config)?;
    AUCTION.save(deps.storage, &AuctionState::new())?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "instantiate"),
        attr("owner", info.sender),
        attr("name", config.name),
        attr("symbol", config.symbol),
        attr("minimum_bid", config.minimum_bid.to_string()),
        attr("duration", duration.to_string()),
    ]))
}

/// 执行入口：根据消息分派到具体执行函数
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::StartAuction {} => exec_start_auction(deps, env, info),
        ExecuteMsg::Bid {} => exec_bid(deps, env, info),
        ExecuteMsg::Withdraw {} => exec_withdraw(deps, info),
        ExecuteMsg::Mint {} => exec_mint(deps, env, info),
        ExecuteMsg::RecoverFunds {} => exec_recover_funds(deps, env, info),
    }
}

/// 断言调用者为拥有者，返回配置
fn must_owner(deps: &DepsMut, sender: &Addr) -> Result<Config, ContractError> {
    let cfg: Config = CONFIG.load(deps.storage)?;
    if cfg.owner != *sender {
        return Err(ContractError::NotAuthorized);
    }
    Ok(cfg)
}

/// 取出本次附带的指定币种金额，未附带时为 0；附带其它币种直接拒绝
fn sent_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    if let Some(other) = info.funds.iter().find(|c| c.denom != denom) {
        return Err(ContractError::UnexpectedFunds { denom: other.denom.clone() });
    }
    Ok(info
        .funds
        .iter()
        .find(|c| c.denom == denom)
        .map(|c| c.amount)
        .unwrap_or_default())
}

/// 已开始的拍卖返回结束时间，否则 NotStarted
fn must_started(auction: &AuctionState) -> Result<cosmwasm_std::Timestamp, ContractError> {
    auction.status.finish_time().ok_or(ContractError::NotStarted)
}

/// 仅拥有者：开启拍卖，记录开始与结束时间
fn exec_start_auction(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let cfg = must_owner(&deps, &info.sender)?;
    let mut auction = AUCTION.load(deps.storage)?;
    if !matches!(auction.status, AuctionStatus::Created) {
        return Err(ContractError::AlreadyStarted);
    }

    let start_time = env.block.time;
    let finish_time = start_time.plus_seconds(cfg.duration);
    auction.status = AuctionStatus::Started { start_time, finish_time };
    AUCTION.save(deps.storage, &auction)?;

    Ok(Response::new()
        .add_event(
            Event::new("auction_begins")
                .add_attribute("start_time", start_time.seconds().to_string())
                .add_attribute("finish_time", finish_time.seconds().to_string()),
        )
        .add_attributes(vec![attr("action", "start_auction"), attr("owner", info.sender)]))
}

/// 出价：有效出价 = 附带金额 + 自己的待退款余额；
/// 被超越的最高价记入原出价人的待提取账本
fn exec_bid(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let cfg = CONFIG.load(deps.storage)?;
    let mut auction = AUCTION.load(deps.storage)?;
    let finish_time = must_started(&auction)?;
    if env.block.time >= finish_time {
        return Err(ContractError::AuctionEnded);
    }

    let sent = sent_amount(&info, cfg.denom())?;
    let pending = PENDING_WITHDRAWALS
        .may_load(deps.storage, info.sender.clone())?
        .unwrap_or_default();
    let is_max_bidder = auction.max_bidder.as_ref() == Some(&info.sender);

    let mut effective = sent.checked_add(pending)?;
    // 当前最高出价人加价时，原出价随之并入新出价
    if is_max_bidder {
        effective = effective.checked_add(auction.max_bid)?;
    }

    if effective < cfg.minimum_bid.amount {
        return Err(ContractError::BelowMinimumBid {
            amount: effective.to_string(),
            minimum: cfg.minimum_bid.amount.to_string(),
        });
    }

    // 先做差再比较：effective < max_bid 时这里下溢，返回 ArithmeticFault
    let increment = effective.checked_sub(auction.max_bid)?;
    let margin = auction.max_bid.multiply_ratio(cfg.min_bid_diff_perc, 100u64);
    if increment <= margin {
        return Err(ContractError::BidTooLow);
    }

    if let Some(previous) = auction.max_bidder.take() {
        if previous != info.sender {
            let displaced = auction.max_bid;
            PENDING_WITHDRAWALS.update(deps.storage, previous, |balance| -> Result<_, ContractError> {
                Ok(balance.unwrap_or_default().checked_add(displaced)?)
            })?;
        }
    }
    PENDING_WITHDRAWALS.remove(deps.storage, info.sender.clone());

    auction.max_bid = effective;
    auction.max_bidder = Some(info.sender.clone());
    AUCTION.save(deps.storage, &auction)?;

    Ok(Response::new()
        .add_event(
            Event::new("bid_entered")
                .add_attribute("bidder", info.sender.as_str())
                .add_attribute("amount", effective.to_string()),
        )
        .add_attributes(vec![
            attr("action", "bid"),
            attr("bidder", info.sender),
            attr("sent", sent),
            attr("amount", effective),
        ]))
}

/// 提取待退款余额：先清零账本，再发送转账消息
fn exec_withdraw(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let cfg = CONFIG.load(deps.storage)?;
    let amount = PENDING_WITHDRAWALS
        .may_load(deps.storage, info.sender.clone())?
        .unwrap_or_default();

    if amount.is_zero() {
        return Ok(Response::new().add_attributes(vec![
            attr("action", "withdraw"),
            attr("recipient", info.sender),
            attr("amount", "0"),
        ]));
    }

    PENDING_WITHDRAWALS.remove(deps.storage, info.sender.clone());

    let send = BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: coins(amount.u128(), cfg.denom()),
    };

    Ok(Response::new()
        .add_message(send)
        .add_event(
            Event::new("withdraw")
                .add_attribute("recipient", info.sender.as_str())
                .add_attribute("amount", amount.to_string()),
        )
        .add_attributes(vec![
            attr("action", "withdraw"),
            attr("recipient", info.sender),
            attr("amount", amount),
        ]))
}

/// 拍卖结束后，最高出价者铸造唯一的 NFT（只能一次）
fn exec_mint(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let mut auction = AUCTION.load(deps.storage)?;
    let finish_time = must_started(&auction)?;
    if env.block.time < finish_time {
        return Err(ContractError::NotEnded);
    }
    if auction.max_bidder.as_ref() != Some(&info.sender) {
        return Err(ContractError::NotWinner);
    }
    if auction.minted {
        return Err(ContractError::AlreadyMinted);
    }

    TOKEN_OWNER.save(deps.storage, &info.sender)?;
    auction.minted = true;
    AUCTION.save(deps.storage, &auction)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "mint"),
        attr("owner", info.sender),
        attr("token_id", AUCTION_TOKEN_ID.to_string()),
    ]))
}

/// 仅拥有者：拍卖结束后取回中标金额；被超越的出价仍留在账本中待提取
fn exec_recover_funds(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let cfg = must_owner(&deps, &info.sender)?;
    let mut auction = AUCTION.load(deps.storage)?;
    let finish_time = must_started(&auction)?;
    if env.block.time < finish_time {
        return Err(ContractError::NotEnded);
    }
    if auction.funds_recovered {
        return Err(ContractError::AlreadyRecovered);
    }

    auction.funds_recovered = true;
    AUCTION.save(deps.storage, &auction)?;

    let mut res = Response::new();
    if !auction.max_bid.is_zero() {
        res = res.add_message(BankMsg::Send {
            to_address: cfg.owner.to_string(),
            amount: coins(auction.max_bid.u128(), cfg.denom()),
        });
    }

    Ok(res.add_attributes(vec![
        attr("action", "recover_funds"),
        attr("owner", cfg.owner),
        attr("amount", auction.max_bid),
    ]))
}

/// 查询入口：根据查询消息返回对应的序列化结果
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::AuctionState {} => to_json_binary(&query_auction_state(deps, env)?),
        QueryMsg::PendingWithdrawal { address } => to_json_binary(&query_pending_withdrawal(deps, address)?),
        QueryMsg::OwnerOf { token_id } => to_json_binary(&query_owner_of(deps, token_id)?),
        QueryMsg::TokenUri { token_id } => to_json_binary(&query_token_uri(deps, token_id)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let cfg = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: cfg.owner.to_string(),
        name: cfg.name,
        symbol: cfg.symbol,
        token_uri: cfg.token_uri,
        minimum_bid: cfg.minimum_bid,
        min_bid_diff_perc: cfg.min_bid_diff_perc,
        duration: cfg.duration,
    })
}

fn query_auction_state(deps: Deps, env: Env) -> StdResult<AuctionStateResponse> {
    let auction = AUCTION.load(deps.storage)?;
    let (start_time, finish_time) = match auction.status {
        AuctionStatus::Created => (None, None),
        AuctionStatus::Started { start_time, finish_time } => (Some(start_time), Some(finish_time)),
    };
    Ok(AuctionStateResponse {
        started: finish_time.is_some(),
        start_time,
        finish_time,
        ended: finish_time.map(|t| env.block.time >= t).unwrap_or(false),
        max_bid: auction.max_bid,
        max_bidder: auction.max_bidder.map(|a| a.to_string()),
        minted: auction.minted,
        funds_recovered: auction.funds_recovered,
    })
}

/// 查询指定地址的待提取余额
fn query_pending_withdrawal(deps: Deps, address: String) -> StdResult<PendingWithdrawalResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let amount = PENDING_WITHDRAWALS.may_load(deps.storage, addr)?.unwrap_or_default();
    Ok(PendingWithdrawalResponse { amount })
}

fn query_owner_of(deps: Deps, token_id: u64) -> StdResult<OwnerOfResponse> {
    if token_id != AUCTION_TOKEN_ID {
        return Err(StdError::not_found(format!("token {}", token_id)));
    }
    let owner = TOKEN_OWNER
        .may_load(deps.storage)?
        .ok_or_else(|| StdError::not_found(format!("token {}", token_id)))?;
    Ok(OwnerOfResponse { owner: owner.to_string() })
}

/// 查询 tokenURI：未铸造时返回 None
fn query_token_uri(deps: Deps, token_id: u64) -> StdResult<TokenUriResponse> {
    if token_id != AUCTION_TOKEN_ID {
        return Err(StdError::not_found(format!("token {}", token_id)));
    }
    let minted = AUCTION.load(deps.storage)?.minted;
    let token_uri = if minted { Some(CONFIG.load(deps.storage)?.token_uri) } else { None };
    Ok(TokenUriResponse { token_uri })
}

/// 迁移：仅允许同名合约升级，并更新版本号
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidMigration {
            reason: format!("cannot migrate from {}", stored.contract),
        });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
