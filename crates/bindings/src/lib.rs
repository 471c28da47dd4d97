//! # coffee-bindings
//!
//! Interface of the on-chain "Buy Me A Coffee" tip contract.
//!
//! The contract itself is deployed and maintained elsewhere; this crate only describes the calls
//! and events the client depends on.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use alloy_primitives::{Address, address};
use alloy_sol_types::sol;

/// Address of the well-known Buy Me A Coffee deployment.
pub const BUY_ME_A_COFFEE: Address = address!("0x538d713e477C0A18469F0e0Dd13304dDE1979522");

sol! {
    /// A tip as stored by the contract.
    #[derive(Debug, PartialEq, Eq)]
    struct Memo {
        address from;
        uint256 timestamp;
        string name;
        string message;
    }

    /// Tip jar interface.
    interface IBuyMeACoffee {
        /// Emitted for every tip received.
        event NewMemo(address indexed from, uint256 timestamp, string name, string message);

        /// Sends a tip along with a name and a message. The attached value is the tip.
        function buyCoffee(string memory _name, string memory _message) external payable;

        /// Returns every memo received so far, oldest first.
        function getMemos() external view returns (Memo[] memory);

        /// Sends the whole balance to the owner.
        function withdrawTips() external;
    }
}

pub use IBuyMeACoffee::{NewMemo, buyCoffeeCall, getMemosCall};
