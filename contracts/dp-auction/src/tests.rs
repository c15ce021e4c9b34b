#[cfg(test)]
mod tests {
    // 单元测试：验证实例化、开拍与出价后的存储状态
    use cosmwasm_std::{
        coin, coins,
        testing::{mock_dependencies, mock_env},
        MessageInfo, Uint128,
    };

    use crate::contract::{execute, instantiate, migrate};
    use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg};
    use crate::state::{AuctionStatus, AUCTION, PENDING_WITHDRAWALS};

    #[test]
    fn instantiate_start_and_bid() {
        let mut deps = mock_dependencies();
        let env = mock_env();
        let owner = deps.api.addr_make("owner");
        let bidder = deps.api.addr_make("bidder");

        let info = MessageInfo { sender: owner.clone(), funds: vec![] };
        let msg = InstantiateMsg {
            name: "DP".to_string(),
            symbol: "DP".to_string(),
            token_uri: "tokenURI".to_string(),
            minimum_bid: coin(100, "ujunox"),
            min_bid_diff_perc: None,
            duration: Some(60),
        };
        instantiate(deps.as_mut(), env.clone(), info.clone(), msg).unwrap();
        execute(deps.as_mut(), env.clone(), info, ExecuteMsg::StartAuction {}).unwrap();

        let auction = AUCTION.load(&deps.storage).unwrap();
        assert_eq!(
            auction.status,
            AuctionStatus::Started { start_time: env.block.time, finish_time: env.block.time.plus_seconds(60) }
        );

        let info = MessageInfo { sender: bidder.clone(), funds: coins(250, "ujunox") };
        execute(deps.as_mut(), env, info, ExecuteMsg::Bid {}).unwrap();

        let auction = AUCTION.load(&deps.storage).unwrap();
        assert_eq!(auction.max_bid, Uint128::new(250));
        assert_eq!(auction.max_bidder, Some(bidder.clone()));
        assert!(PENDING_WITHDRAWALS.may_load(&deps.storage, bidder).unwrap().is_none());

        let res = migrate(deps.as_mut(), mock_env(), MigrateMsg {}).unwrap();
        assert_eq!(res.attributes[0].value, "migrate");
    }
}
