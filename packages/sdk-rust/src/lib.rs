//! HousePool Rust SDK
//!
//! Custodial bankroll pool client for Solana.
//! LPs stake into a shared bankroll; operators settle wagers and publish
//! nonce-ordered balance updates; users withdraw against fresh published
//! balances — all with zero boilerplate, no Anchor dependency required.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use house_pool_sdk::HousePoolClient;
//! use solana_sdk::{pubkey::Pubkey, signature::Keypair};
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HousePoolClient::devnet();
//!     let keypair = Keypair::new(); // use your funded keypair
//!
//!     let usdc = Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v")?;
//!
//!     // 1. Preview the stake: fee, net amount, shares minted
//!     let preview = client.preview_provide(usdc, 1_000_000_000).await?;
//!     println!("fee={} net={} shares={}", preview.fee, preview.net, preview.shares);
//!
//!     // 2. Stake into the bankroll
//!     let result = client.provide_liquidity(&keypair, usdc, 1_000_000_000).await?;
//!     println!("Staked! tx: {}", result.signature);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`HousePoolClient::create_pool`] | Create the pool for an asset mint |
//! | [`HousePoolClient::provide_liquidity`] | Stake into the bankroll, receive shares |
//! | [`HousePoolClient::remove_liquidity`] | Burn shares for pro-rata custody |
//! | [`HousePoolClient::harvest_rewards`] | Claim accrued LP rewards |
//! | [`HousePoolClient::deposit`] | User deposit into custody |
//! | [`HousePoolClient::withdraw`] | Withdraw against a fresh published balance |
//! | [`HousePoolClient::publish_balance`] | Operator: publish one balance update |
//! | [`HousePoolClient::publish_balances`] | Operator: atomic batched publication |
//! | [`HousePoolClient::settle_wager`] | Operator: apply a wager outcome |
//! | [`HousePoolClient::pool_info`] | Pool custody, shares, fees, operators |
//! | [`HousePoolClient::position_info`] | LP shares, redemption value, pending rewards |
//! | [`HousePoolClient::user_account_info`] | Published balance, nonce, freshness |

pub mod client;
pub mod error;
pub mod instructions;
pub mod math;
pub mod state;
pub mod types;

pub use client::{HousePoolClient, PROGRAM_ID};
pub use error::{Error, Result};
pub use types::*;
