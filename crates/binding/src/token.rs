//! Bindings for the generated owner-managed token contract.

use alloy_sol_types::sol;

sol! {
    /// Interface of the token contract emitted by the template generator.
    #[sol(rpc)]
    interface IManagedToken {
        /// Emitted when tokens move, including mints (from zero) and
        /// burns (to zero)
        event Transfer(
            address indexed from,
            address indexed to,
            uint256 value
        );

        /// Emitted when an allowance is set
        event Approval(
            address indexed owner,
            address indexed spender,
            uint256 value
        );

        /// Emitted when transfers are halted
        event Paused(address account);

        /// Emitted when transfers resume
        event Unpaused(address account);

        /// Emitted on ownership transfer and renouncement
        event OwnershipTransferred(
            address indexed previousOwner,
            address indexed newOwner
        );

        /// Emitted when an account is barred from transfers
        event Blacklisted(address indexed account);

        /// Emitted when an account is re-admitted
        event Unblacklisted(address indexed account);

        /// Emitted when new supply is created
        event Mint(address indexed to, uint256 amount);

        /// Emitted when supply is destroyed
        event Burn(address indexed from, uint256 amount);

        /// Get token name
        function name() external view returns (string memory);

        /// Get token symbol
        function symbol() external view returns (string memory);

        /// Get token decimals
        function decimals() external view returns (uint8);

        /// Get total supply
        function totalSupply() external view returns (uint256);

        /// Get current owner (zero address after renouncement)
        function owner() external view returns (address);

        /// Get pause state
        function paused() external view returns (bool);

        /// Get token balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Get allowance granted by tokenOwner to spender
        function allowance(address tokenOwner, address spender) external view returns (uint256);

        /// Check whether an account is blacklisted
        function isBlacklisted(address account) external view returns (bool);

        /// Transfer tokens to recipient
        function transfer(address to, uint256 amount) external returns (bool);

        /// Approve spender to spend tokens
        function approve(address spender, uint256 amount) external returns (bool);

        /// Transfer tokens between accounts (requires allowance)
        function transferFrom(address from, address to, uint256 amount) external returns (bool);

        /// Raise an existing allowance
        function increaseAllowance(address spender, uint256 addedValue) external returns (bool);

        /// Lower an existing allowance
        function decreaseAllowance(address spender, uint256 subtractedValue) external returns (bool);

        /// Halt transfers (owner only)
        function pause() external;

        /// Resume transfers (owner only)
        function unpause() external;

        /// Bar an account from transfers (owner only)
        function blacklist(address account) external;

        /// Re-admit an account (owner only)
        function unblacklist(address account) external;

        /// Create new supply for an account (owner only)
        function mint(address to, uint256 amount) external;

        /// Destroy supply from the caller's balance (owner only)
        function burn(uint256 amount) external;

        /// Hand ownership to another address (owner only)
        function transferOwnership(address newOwner) external;

        /// Renounce ownership permanently (owner only)
        function renounceOwnership() external;
    }
}
