//! Definitions of Solidity functions called during deployment

use alloy::sol;

sol! {
    function initialize() external;
}

sol! {
    #[sol(rpc)]
    interface IProxyAdmin {
        function upgradeAndCall(address proxy, address implementation, bytes memory data) external payable;
    }
}
