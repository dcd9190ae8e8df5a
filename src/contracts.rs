//! Contract Definitions
//!
//! Solidity interfaces the volume bot talks to, defined with alloy's `sol!`
//! macro. `#[sol(rpc)]` generates instance types that make calls through any
//! alloy Provider.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use alloy::sol;

// ── ERC20 (target token) ─────────────────────────────────────────────

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
    }
}

// ── FlashLoaner (borrow native, swap into token, repay in one tx) ────

sol! {
    #[sol(rpc)]
    interface IFlashLoaner {
        function initiateFlashLoan(uint256 amount, address token, uint256 minAmountOut, uint256 deadline) external payable;
    }
}
