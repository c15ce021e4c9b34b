#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_json_binary, Addr, BankMsg, Binary, Deps, DepsMut, Empty, Env, Event, MessageInfo,
    Order, Response, StdError, StdResult, Storage, Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, NftInfoResponse, NumTokensResponse,
    OwnerOfResponse, QueryMsg, RevealedIdResponse, SaleStateResponse, TokenUriResponse,
    TokensResponse,
};
use crate::shuffle::{permutation, seed_commitment};
use crate::state::{
    Config, SaleState, TokenInfo, CONFIG, KNOWN_TOKEN_LIMIT, MAX_MINTS_PER_TX,
    MAX_RANDOM_TOKEN_LIMIT, OWNER_TOKENS, RANDOM_TOKEN_LIMIT, REVEALED_IDS, SALE, TOKENS,
};

/// 合约名称与版本（用于迁移安全校验）
const CONTRACT_NAME: &str = "crates.io:dp_drop";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 分页查询的默认与最大条数
const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 100;

/// 初始化合约：设置管理员、两个池的大小与价格，所有标记为 false、计数为 0
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = match msg.admin {
        Some(a) => deps.api.addr_validate(&a)?,
        None => info.sender.clone(),
    };
    if msg.random_mint_price.denom != msg.known_mint_price.denom {
        return Err(ContractError::InvalidConfig { reason: "mint prices must share one denom".to_string() });
    }
    let max_mints_per_tx = msg.max_mints_per_tx.unwrap_or(MAX_MINTS_PER_TX);
    if max_mints_per_tx == 0 {
        return Err(ContractError::InvalidConfig { reason: "max mints per tx must be positive".to_string() });
    }
    let random_token_limit = msg.random_token_limit.unwrap_or(RANDOM_TOKEN_LIMIT);
    if random_token_limit > MAX_RANDOM_TOKEN_LIMIT {
        return Err(ContractError::InvalidConfig {
            reason: format!("random token limit exceeds {}", MAX_RANDOM_TOKEN_LIMIT),
        });
    }
    let known_token_limit = msg.known_token_limit.unwrap_or(KNOWN_TOKEN_LIMIT);
    random_token_limit.checked_add(known_token_limit).ok_or_else(|| ContractError::InvalidConfig {
        reason: "token limits overflow".to_string(),
    })?;

    let config = Config {
        admin: admin.clone(),
        name: msg.name,
        symbol: msg.symbol,
        base_uri: msg.base_uri,
        random_token_limit,
        known_token_limit,
        random_mint_price: msg.random_mint_price,
        known_mint_price: msg.known_mint_price,
        max_mints_per_tx,
    };
    CONFIG.save(deps.storage, &config)?;
    SALE.save(deps.storage, &SaleState::new())?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "instantiate"),
        attr("deployer", info.sender),
        attr("admin", admin),
        attr("random_token_limit", random_token_limit.to_string()),
        attr("known_token_limit", known_token_limit.to_string()),
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
        ExecuteMsg::SetBaseUri { uri } => exec_set_base_uri(deps, info, uri),
        ExecuteMsg::StartSale {} => exec_start_sale(deps, info),
        ExecuteMsg::RecoverFunds {} => exec_recover_funds(deps, env, info),
        ExecuteMsg::CommitSeed { commitment } => exec_commit_seed(deps, info, commitment),
        ExecuteMsg::Reveal { seed, salt } => exec_reveal(deps, info, seed, salt),
        ExecuteMsg::RandomMint { recipient, count } => exec_random_mint(deps, info, recipient, count),
        ExecuteMsg::KnownMint { recipient, token_id } => exec_known_mint(deps, info, recipient, token_id),
    }
}

/// 断言调用者为管理员，返回配置
fn must_admin(deps: &DepsMut, sender: &Addr) -> Result<Config, ContractError> {
    let cfg: Config = CONFIG.load(deps.storage)?;
    if cfg.admin != *sender {
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

/// 登记 token 所有权：每个 id 只能写入一次
fn issue_token(storage: &mut dyn Storage, token_id: u64, owner: &Addr) -> Result<(), ContractError> {
    if TOKENS.has(storage, token_id) {
        return Err(ContractError::AlreadyOwned { token_id });
    }
    TOKENS.save(storage, token_id, &TokenInfo { owner: owner.clone() })?;
    OWNER_TOKENS.save(storage, (owner.clone(), token_id), &Empty {})?;
    Ok(())
}

/// 仅管理员：设置 baseURI，设置后即冻结
fn exec_set_base_uri(deps: DepsMut, info: MessageInfo, uri: String) -> Result<Response, ContractError> {
    let mut cfg = must_admin(&deps, &info.sender)?;
    let mut sale = SALE.load(deps.storage)?;
    if sale.base_uri_frozen {
        return Err(ContractError::UriFrozen);
    }

    cfg.base_uri = uri.clone();
    sale.base_uri_frozen = true;
    CONFIG.save(deps.storage, &cfg)?;
    SALE.save(deps.storage, &sale)?;

    Ok(Response::new().add_attributes(vec![attr("action", "set_base_uri"), attr("base_uri", uri)]))
}

/// 仅管理员：开启发售
fn exec_start_sale(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    must_admin(&deps, &info.sender)?;
    let mut sale = SALE.load(deps.storage)?;
    if sale.sale_started {
        return Err(ContractError::AlreadyStarted);
    }
    sale.sale_started = true;
    SALE.save(deps.storage, &sale)?;

    Ok(Response::new()
        .add_event(Event::new("sale_begins").add_attribute("admin", info.sender.as_str()))
        .add_attributes(vec![attr("action", "start_sale"), attr("admin", info.sender)]))
}

/// 仅管理员：将合约当前持有的发售币种余额全部转给管理员
fn exec_recover_funds(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let cfg = must_admin(&deps, &info.sender)?;
    let balance = deps.querier.query_balance(&env.contract.address, cfg.denom())?;

    let mut res = Response::new();
    if !balance.amount.is_zero() {
        res = res.add_message(BankMsg::Send {
            to_address: cfg.admin.to_string(),
            amount: vec![balance.clone()],
        });
    }

    Ok(res.add_attributes(vec![
        attr("action", "recover_funds"),
        attr("admin", cfg.admin),
        attr("amount", balance.amount),
    ]))
}

/// 仅管理员：提交洗牌种子承诺（揭示前只能提交一次）
fn exec_commit_seed(deps: DepsMut, info: MessageInfo, commitment: String) -> Result<Response, ContractError> {
    must_admin(&deps, &info.sender)?;
    let mut sale = SALE.load(deps.storage)?;
    if sale.shuffled {
        return Err(ContractError::AlreadyShuffled);
    }
    if sale.seed_commitment.is_some() {
        return Err(ContractError::SeedAlreadyCommitted);
    }

    let commitment = commitment.to_lowercase();
    let decoded = hex::decode(&commitment).map_err(|_| ContractError::InvalidConfig {
        reason: "commitment must be hex".to_string(),
    })?;
    if decoded.len() != 32 {
        return Err(ContractError::InvalidConfig { reason: "commitment must be a sha256 digest".to_string() });
    }

    sale.seed_commitment = Some(commitment.clone());
    SALE.save(deps.storage, &sale)?;

    Ok(Response::new().add_attributes(vec![attr("action", "commit_seed"), attr("commitment", commitment)]))
}

/// 仅管理员：校验 sha256(seed|salt) 与承诺一致后，计算并保存随机池的一次性置换
fn exec_reveal(deps: DepsMut, info: MessageInfo, seed: String, salt: String) -> Result<Response, ContractError> {
    let cfg = must_admin(&deps, &info.sender)?;
    let mut sale = SALE.load(deps.storage)?;
    if sale.shuffled {
        return Err(ContractError::AlreadyShuffled);
    }
    let commitment = sale.seed_commitment.as_deref().ok_or(ContractError::SeedNotCommitted)?;
    if seed_commitment(&seed, &salt) != commitment {
        return Err(ContractError::SeedMismatch);
    }

    let ids = permutation(&seed, &salt, cfg.random_token_limit);
    for (token_id, revealed_id) in (1u64..).zip(ids) {
        REVEALED_IDS.save(deps.storage, token_id, &revealed_id)?;
    }
    sale.shuffled = true;
    SALE.save(deps.storage, &sale)?;

    Ok(Response::new()
        .add_event(
            Event::new("reveal")
                .add_attribute("seed", seed.as_str())
                .add_attribute("salt", salt.as_str()),
        )
        .add_attributes(vec![
            attr("action", "reveal"),
            attr("shuffled_count", cfg.random_token_limit.to_string()),
        ]))
}

/// 随机池铸造：从 next_random_token_id 起顺序分配 count 个 id 给 recipient
fn exec_random_mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    count: u32,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;
    let cfg = CONFIG.load(deps.storage)?;
    let mut sale = SALE.load(deps.storage)?;
    if !sale.sale_started {
        return Err(ContractError::NotStarted);
    }
    if count == 0 {
        return Err(ContractError::NothingToMint);
    }
    if count > cfg.max_mints_per_tx {
        return Err(ContractError::OverLimitPerCall { count, max: cfg.max_mints_per_tx });
    }

    let required = cfg.random_mint_price.amount.checked_mul(Uint128::from(count))?;
    let sent = sent_amount(&info, cfg.denom())?;
    if sent < required {
        return Err(ContractError::InsufficientFunds { sent: sent.to_string(), required: required.to_string() });
    }

    let count = u64::from(count);
    if sale.random_tokens_minted + count > cfg.random_token_limit {
        return Err(ContractError::PoolExhausted);
    }

    let first = sale.next_random_token_id;
    for token_id in first..first + count {
        issue_token(deps.storage, token_id, &recipient)?;
    }
    sale.next_random_token_id += count;
    sale.random_tokens_minted += count;
    SALE.save(deps.storage, &sale)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "random_mint"),
        attr("recipient", recipient),
        attr("count", count.to_string()),
        attr("first_token_id", first.to_string()),
        attr("last_token_id", (first + count - 1).to_string()),
        attr("paid", sent),
    ]))
}

/// 指定池铸造：买家选择 (R, R+K] 范围内尚未分配的 id
fn exec_known_mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    token_id: u64,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;
    let cfg = CONFIG.load(deps.storage)?;
    let mut sale = SALE.load(deps.storage)?;
    if !sale.sale_started {
        return Err(ContractError::NotStarted);
    }
    if token_id <= cfg.random_token_limit {
        return Err(ContractError::WrongPool);
    }
    if token_id > cfg.last_token_id() {
        return Err(ContractError::OverLimit);
    }

    let sent = sent_amount(&info, cfg.denom())?;
    if sent < cfg.known_mint_price.amount {
        return Err(ContractError::InsufficientFunds {
            sent: sent.to_string(),
            required: cfg.known_mint_price.amount.to_string(),
        });
    }

    issue_token(deps.storage, token_id, &recipient)?;
    sale.known_tokens_minted += 1;
    SALE.save(deps.storage, &sale)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "known_mint"),
        attr("recipient", recipient),
        attr("token_id", token_id.to_string()),
        attr("paid", sent),
    ]))
}

/// 查询入口：根据查询消息返回对应的序列化结果
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::SaleState {} => to_json_binary(&query_sale_state(deps)?),
        QueryMsg::RevealedId { token_id } => to_json_binary(&query_revealed_id(deps, token_id)?),
        QueryMsg::OwnerOf { token_id } => to_json_binary(&query_owner_of(deps, token_id)?),
        QueryMsg::NftInfo { token_id } => to_json_binary(&query_nft_info(deps, token_id)?),
        QueryMsg::TokenUri { token_id } => to_json_binary(&query_token_uri(deps, token_id)?),
        QueryMsg::NumTokens {} => to_json_binary(&query_num_tokens(deps)?),
        QueryMsg::AllTokens { start_after, limit } => to_json_binary(&query_all_tokens(deps, start_after, limit)?),
        QueryMsg::Tokens { owner, start_after, limit } => to_json_binary(&query_tokens(deps, owner, start_after, limit)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let cfg = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: cfg.admin.to_string(),
        name: cfg.name,
        symbol: cfg.symbol,
        base_uri: cfg.base_uri,
        random_token_limit: cfg.random_token_limit,
        known_token_limit: cfg.known_token_limit,
        random_mint_price: cfg.random_mint_price,
        known_mint_price: cfg.known_mint_price,
        max_mints_per_tx: cfg.max_mints_per_tx,
    })
}

fn query_sale_state(deps: Deps) -> StdResult<SaleStateResponse> {
    let cfg = CONFIG.load(deps.storage)?;
    let sale = SALE.load(deps.storage)?;
    Ok(SaleStateResponse {
        sale_started: sale.sale_started,
        base_uri_frozen: sale.base_uri_frozen,
        shuffled: sale.shuffled,
        seed_committed: sale.seed_commitment.is_some(),
        next_random_token_id: sale.next_random_token_id,
        random_tokens_minted: sale.random_tokens_minted,
        known_tokens_minted: sale.known_tokens_minted,
        random_mints_remaining: cfg.random_token_limit - sale.random_tokens_minted,
        known_mints_remaining: cfg.known_token_limit - sale.known_tokens_minted,
    })
}

/// 查询随机池 id 揭示后的展示 id（未揭示返回 None）
fn query_revealed_id(deps: Deps, token_id: u64) -> StdResult<RevealedIdResponse> {
    let cfg = CONFIG.load(deps.storage)?;
    if !cfg.is_random_pool(token_id) {
        return Err(StdError::not_found(format!("random pool token {}", token_id)));
    }
    Ok(RevealedIdResponse { revealed_id: REVEALED_IDS.may_load(deps.storage, token_id)? })
}

fn load_token(deps: Deps, token_id: u64) -> StdResult<TokenInfo> {
    TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or_else(|| StdError::not_found(format!("token {}", token_id)))
}

fn query_owner_of(deps: Deps, token_id: u64) -> StdResult<OwnerOfResponse> {
    let token = load_token(deps, token_id)?;
    Ok(OwnerOfResponse { owner: token.owner.to_string() })
}

fn query_nft_info(deps: Deps, token_id: u64) -> StdResult<NftInfoResponse> {
    let token = load_token(deps, token_id)?;
    Ok(NftInfoResponse {
        owner: token.owner.to_string(),
        token_uri: token_uri(deps, token_id)?,
    })
}

/// 指定池：baseURI + id；随机池：揭示前为 None，揭示后为 baseURI + 展示 id
fn token_uri(deps: Deps, token_id: u64) -> StdResult<Option<String>> {
    let cfg = CONFIG.load(deps.storage)?;
    if !cfg.is_random_pool(token_id) {
        return Ok(Some(format!("{}{}", cfg.base_uri, token_id)));
    }
    Ok(REVEALED_IDS
        .may_load(deps.storage, token_id)?
        .map(|revealed| format!("{}{}", cfg.base_uri, revealed)))
}

fn query_token_uri(deps: Deps, token_id: u64) -> StdResult<TokenUriResponse> {
    load_token(deps, token_id)?;
    Ok(TokenUriResponse { token_uri: token_uri(deps, token_id)? })
}

fn query_num_tokens(deps: Deps) -> StdResult<NumTokensResponse> {
    let sale = SALE.load(deps.storage)?;
    Ok(NumTokensResponse { count: sale.random_tokens_minted + sale.known_tokens_minted })
}

/// 查询所有已铸造的 token_id（支持分页）
fn query_all_tokens(deps: Deps, start_after: Option<u64>, limit: Option<u32>) -> StdResult<TokensResponse> {
    let take = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let tokens = TOKENS
        .keys(deps.storage, start_after.map(Bound::exclusive), None, Order::Ascending)
        .take(take)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(TokensResponse { tokens })
}

/// 查询指定用户拥有的 token_id（支持分页）
fn query_tokens(
    deps: Deps,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<TokensResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let take = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let tokens = OWNER_TOKENS
        .prefix(owner)
        .keys(deps.storage, start_after.map(Bound::exclusive), None, Order::Ascending)
        .take(take)
        .collect::<StdResult<Vec<_>>>()?;
    Ok(TokensResponse { tokens })
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
