#![allow(dead_code)]

use cosmwasm_std::{
    coin, coins, from_json,
    testing::{mock_dependencies, mock_dependencies_with_balance, mock_env, MockApi, MockQuerier},
    Addr, Env, MemoryStorage, MessageInfo, OwnedDeps, Response,
};
use dp_drop::{
    contract::{execute, instantiate, query},
    error::ContractError,
    msg::{ExecuteMsg, InstantiateMsg, QueryMsg, SaleStateResponse, TokensResponse},
    shuffle::seed_commitment,
};

pub type TestDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

/// 测试常量
pub const DEPLOYER: &str = "deployer";
pub const ADMIN: &str = "admin";
pub const USER1: &str = "user1";
pub const USER2: &str = "user2";
pub const DENOM: &str = "ujunox";
pub const BASE_URI: &str = "baseURI/";
pub const RANDOM_PRICE: u128 = 50_000;
pub const KNOWN_PRICE: u128 = 200_000;
pub const RANDOM_LIMIT: u64 = 20;
pub const KNOWN_LIMIT: u64 = 5;
pub const MAX_PER_TX: u32 = 5;
pub const SEED: &str = "block-hash-at-close";
pub const SALT: &str = "salt";

/// 生成合法的 bech32 测试地址
pub fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

pub fn default_instantiate_msg() -> InstantiateMsg {
    InstantiateMsg {
        name: "DPDrop".to_string(),
        symbol: "DPD".to_string(),
        base_uri: BASE_URI.to_string(),
        admin: Some(addr(ADMIN).to_string()),
        random_mint_price: coin(RANDOM_PRICE, DENOM),
        known_mint_price: coin(KNOWN_PRICE, DENOM),
        random_token_limit: Some(RANDOM_LIMIT),
        known_token_limit: Some(KNOWN_LIMIT),
        max_mints_per_tx: Some(MAX_PER_TX),
    }
}

/// 创建测试环境并初始化合约（部署者与管理员不同）
pub fn setup_contract() -> (TestDeps, Env) {
    let mut deps = mock_dependencies();
    let env = mock_env();
    instantiate_contract(&mut deps, &env).unwrap();
    (deps, env)
}

/// 合约地址预置余额的测试环境
pub fn setup_contract_with_balance(amount: u128) -> (TestDeps, Env) {
    let mut deps = mock_dependencies_with_balance(&coins(amount, DENOM));
    let env = mock_env();
    instantiate_contract(&mut deps, &env).unwrap();
    (deps, env)
}

pub fn instantiate_contract(deps: &mut TestDeps, env: &Env) -> Result<Response, ContractError> {
    let info = MessageInfo { sender: addr(DEPLOYER), funds: vec![] };
    instantiate(deps.as_mut(), env.clone(), info, default_instantiate_msg())
}

/// 以指定身份执行消息
pub fn exec_as(deps: &mut TestDeps, env: &Env, who: &str, amount: u128, msg: ExecuteMsg) -> Result<Response, ContractError> {
    let funds = if amount == 0 { vec![] } else { coins(amount, DENOM) };
    let info = MessageInfo { sender: addr(who), funds };
    execute(deps.as_mut(), env.clone(), info, msg)
}

pub fn start_sale(deps: &mut TestDeps, env: &Env) {
    exec_as(deps, env, ADMIN, 0, ExecuteMsg::StartSale {}).unwrap();
}

pub fn random_mint(deps: &mut TestDeps, env: &Env, recipient: &str, count: u32, paid: u128) -> Result<Response, ContractError> {
    let msg = ExecuteMsg::RandomMint { recipient: addr(recipient).to_string(), count };
    exec_as(deps, env, USER1, paid, msg)
}

pub fn known_mint(deps: &mut TestDeps, env: &Env, recipient: &str, token_id: u64, paid: u128) -> Result<Response, ContractError> {
    let msg = ExecuteMsg::KnownMint { recipient: addr(recipient).to_string(), token_id };
    exec_as(deps, env, USER1, paid, msg)
}

/// 提交种子承诺并揭示
pub fn commit_and_reveal(deps: &mut TestDeps, env: &Env) -> Result<Response, ContractError> {
    let commitment = seed_commitment(SEED, SALT);
    exec_as(deps, env, ADMIN, 0, ExecuteMsg::CommitSeed { commitment })?;
    exec_as(deps, env, ADMIN, 0, ExecuteMsg::Reveal { seed: SEED.to_string(), salt: SALT.to_string() })
}

pub fn query_sale_state(deps: &TestDeps) -> SaleStateResponse {
    let res = query(deps.as_ref(), mock_env(), QueryMsg::SaleState {}).unwrap();
    from_json(res).unwrap()
}

pub fn query_json<T: serde::de::DeserializeOwned>(deps: &TestDeps, msg: QueryMsg) -> T {
    let res = query(deps.as_ref(), mock_env(), msg).unwrap();
    from_json(res).unwrap()
}

pub fn query_all_tokens(deps: &TestDeps, start_after: Option<u64>, limit: Option<u32>) -> Vec<u64> {
    let resp: TokensResponse = query_json(deps, QueryMsg::AllTokens { start_after, limit });
    resp.tokens
}

/// 从响应中读取指定属性值
pub fn attr_value(res: &Response, key: &str) -> Option<String> {
    res.attributes.iter().find(|a| a.key == key).map(|a| a.value.clone())
}
