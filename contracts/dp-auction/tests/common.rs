#![allow(dead_code)]

use cosmwasm_std::{
    coin, coins, from_json,
    testing::{mock_dependencies, mock_env, MockApi, MockQuerier},
    Addr, Env, MemoryStorage, MessageInfo, OwnedDeps, Response, Uint128,
};
use dp_auction::{
    contract::{execute, instantiate, query},
    error::ContractError,
    msg::{AuctionStateResponse, ExecuteMsg, InstantiateMsg, PendingWithdrawalResponse, QueryMsg},
    state::DURATION,
};

pub type TestDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

/// 测试常量
pub const OWNER: &str = "owner";
pub const USER1: &str = "user1";
pub const USER2: &str = "user2";
pub const USER3: &str = "user3";
pub const DENOM: &str = "ujunox";
pub const MIN_BID: u128 = 100_000;
pub const TOKEN_URI: &str = "tokenURI";

/// 生成合法的 bech32 测试地址
pub fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

/// 创建测试环境
pub fn setup_test_env() -> (TestDeps, Env) {
    (mock_dependencies(), mock_env())
}

pub fn default_instantiate_msg() -> InstantiateMsg {
    InstantiateMsg {
        name: "DP".to_string(),
        symbol: "DP".to_string(),
        token_uri: TOKEN_URI.to_string(),
        minimum_bid: coin(MIN_BID, DENOM),
        min_bid_diff_perc: None,
        duration: None,
    }
}

/// 初始化合约（使用默认参数）
pub fn instantiate_contract(deps: &mut TestDeps, env: &Env) -> Result<Response, ContractError> {
    let info = MessageInfo { sender: addr(OWNER), funds: vec![] };
    instantiate(deps.as_mut(), env.clone(), info, default_instantiate_msg())
}

/// 初始化并开启拍卖
pub fn setup_started_auction() -> (TestDeps, Env) {
    let (mut deps, env) = setup_test_env();
    instantiate_contract(&mut deps, &env).unwrap();
    start_auction(&mut deps, &env).unwrap();
    (deps, env)
}

pub fn start_auction(deps: &mut TestDeps, env: &Env) -> Result<Response, ContractError> {
    let info = MessageInfo { sender: addr(OWNER), funds: vec![] };
    execute(deps.as_mut(), env.clone(), info, ExecuteMsg::StartAuction {})
}

/// 以指定地址附带金额出价
pub fn bid(deps: &mut TestDeps, env: &Env, who: &str, amount: u128) -> Result<Response, ContractError> {
    let funds = if amount == 0 { vec![] } else { coins(amount, DENOM) };
    let info = MessageInfo { sender: addr(who), funds };
    execute(deps.as_mut(), env.clone(), info, ExecuteMsg::Bid {})
}

pub fn withdraw(deps: &mut TestDeps, env: &Env, who: &str) -> Result<Response, ContractError> {
    let info = MessageInfo { sender: addr(who), funds: vec![] };
    execute(deps.as_mut(), env.clone(), info, ExecuteMsg::Withdraw {})
}

pub fn mint(deps: &mut TestDeps, env: &Env, who: &str) -> Result<Response, ContractError> {
    let info = MessageInfo { sender: addr(who), funds: vec![] };
    execute(deps.as_mut(), env.clone(), info, ExecuteMsg::Mint {})
}

pub fn recover_funds(deps: &mut TestDeps, env: &Env, who: &str) -> Result<Response, ContractError> {
    let info = MessageInfo { sender: addr(who), funds: vec![] };
    execute(deps.as_mut(), env.clone(), info, ExecuteMsg::RecoverFunds {})
}

/// 返回拍卖结束后的环境（时间前进 DURATION 秒）
pub fn after_close(env: &Env) -> Env {
    let mut ended = env.clone();
    ended.block.time = ended.block.time.plus_seconds(DURATION);
    ended.block.height += DURATION / 5;
    ended
}

pub fn query_auction_state(deps: &TestDeps, env: &Env) -> AuctionStateResponse {
    let res = query(deps.as_ref(), env.clone(), QueryMsg::AuctionState {}).unwrap();
    from_json(res).unwrap()
}

pub fn query_pending(deps: &TestDeps, who: &str) -> Uint128 {
    let msg = QueryMsg::PendingWithdrawal { address: addr(who).to_string() };
    let res = query(deps.as_ref(), mock_env(), msg).unwrap();
    let resp: PendingWithdrawalResponse = from_json(res).unwrap();
    resp.amount
}

/// 从响应中读取指定属性值
pub fn attr_value(res: &Response, key: &str) -> Option<String> {
    res.attributes.iter().find(|a| a.key == key).map(|a| a.value.clone())
}
