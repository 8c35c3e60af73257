//! HousePool Rust SDK — integration example
//!
//! Demonstrates: pool queries, LP staking, operator balance publication,
//! and wager settlement.
//!
//! # Setup
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! house-pool-sdk = { path = "../packages/sdk-rust" }   # or from crates.io once published
//! solana-sdk     = "2.1"
//! tokio          = { version = "1", features = ["full"] }
//! ```
//!
//! # Environment
//!
//! ```bash
//! export SOLANA_RPC_URL="https://api.mainnet-beta.solana.com"
//! export OPERATOR_KEYPAIR_PATH="$HOME/.config/solana/id.json"
//! ```

use std::str::FromStr;

use house_pool_sdk::{BalanceUpdate, HousePoolClient};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};

// ─── Well-known mint addresses (mainnet-beta) ────────────────────────────────

const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn rpc_url() -> String {
    std::env::var("SOLANA_RPC_URL")
        .unwrap_or_else(|_| "https://api.mainnet-beta.solana.com".into())
}

fn load_keypair() -> Keypair {
    let path = std::env::var("OPERATOR_KEYPAIR_PATH")
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/.config/solana/id.json")
        });
    read_keypair_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load keypair from {path}: {e}"))
}

// ─── Example 1: Pool info (read-only) ─────────────────────────────────────────

/// Fetch pool custody, shares, fee configuration and the operator set.
/// No keypair required — pure read operation.
async fn example_pool_info(client: &HousePoolClient) {
    println!("\n── Pool info: USDC ──────────────────────────────────────────");

    let usdc = Pubkey::from_str(USDC_MINT).unwrap();
    let info = client.pool_info(usdc).await.expect("pool_info failed");

    println!("  Pool:          {}", info.address);
    println!("  Total custody: {}", info.total_custody);
    println!("  Total shares:  {}", info.total_shares);
    println!("  Vault balance: {}", info.vault_balance);
    println!("  Platform fee:  {} bps", info.platform_fee_bps);
    println!("  LP fee:        {} bps", info.lp_fee_bps);
    println!("  Platform rake: {} bps", info.platform_rake_bps);
    println!("  Paused:        {}", info.paused);
    println!("  Operators:     {}", info.operators.len());
}

// ─── Example 2: Preview a stake ───────────────────────────────────────────────

/// Compute the fee, net amount and shares of a stake before sending funds.
async fn example_preview_provide(client: &HousePoolClient) {
    println!("\n── Preview stake: 100 USDC ──────────────────────────────────");

    let usdc = Pubkey::from_str(USDC_MINT).unwrap();
    let preview = client
        .preview_provide(usdc, 100_000_000) // 100 USDC in μUSDC
        .await
        .expect("preview failed");

    println!("  Platform fee:  {}", preview.fee);
    println!("  Enters custody:{}", preview.net);
    println!("  Shares minted: {}", preview.shares);
}

// ─── Example 3: Stake into the bankroll ───────────────────────────────────────

/// Stake 100 USDC and receive LP shares. House revenue accrues to the
/// shares automatically via the per-share reward accumulator.
async fn example_provide_liquidity(client: &HousePoolClient, payer: &Keypair) {
    println!("\n── Provide liquidity: 100 USDC ──────────────────────────────");

    let usdc = Pubkey::from_str(USDC_MINT).unwrap();
    let result = client
        .provide_liquidity(payer, usdc, 100_000_000)
        .await
        .expect("provide_liquidity failed");

    println!("  Signature: {}", result.signature);
}

// ─── Example 4: Operator reconciliation loop ──────────────────────────────────

/// Publish a batch of off-chain balances under strictly increasing nonces.
///
/// A production bot reads the current nonce for each user first
/// (`user_account_info`) and publishes `nonce + 1` — the program rejects
/// anything that does not exceed the stored nonce, so a crashed-and-restarted
/// bot can never roll a balance backwards.
async fn example_publish_batch(client: &HousePoolClient, operator: &Keypair) {
    println!("\n── Publish balance batch ─────────────────────────────────────");

    let usdc = Pubkey::from_str(USDC_MINT).unwrap();

    let user_a = Pubkey::from_str("11111111111111111111111111111112").unwrap();
    let user_b = Pubkey::from_str("11111111111111111111111111111113").unwrap();

    let next_nonce = |owner| async move {
        match client.user_account_info(usdc, owner).await {
            Ok(info) => info.nonce + 1,
            Err(_) => 1, // user has not deposited yet
        }
    };

    let updates = vec![
        BalanceUpdate { owner: user_a, balance: 75_000_000, nonce: next_nonce(user_a).await },
        BalanceUpdate { owner: user_b, balance: 1_200_000,  nonce: next_nonce(user_b).await },
    ];

    let result = client
        .publish_balances(operator, usdc, &updates)
        .await
        .expect("publish_balances failed");

    println!("  Published {} balances — tx {}", updates.len(), result.signature);
}

// ─── Example 5: Settle a wager ────────────────────────────────────────────────

/// Settle a lost 1 USDC bet: the bet is debited from the user's balance,
/// the LP fee accrues to shareholders, the rake goes to the treasury, and
/// the rest enters pool custody.
async fn example_settle_loss(client: &HousePoolClient, operator: &Keypair) {
    println!("\n── Settle wager: 1 USDC loss ─────────────────────────────────");

    let usdc = Pubkey::from_str(USDC_MINT).unwrap();
    let user = Pubkey::from_str("11111111111111111111111111111112").unwrap();

    // Preview the split first
    let preview = client
        .preview_settle(usdc, 1_000_000, 0)
        .await
        .expect("preview failed");
    println!("  LP fee:   {}", preview.lp_fee);
    println!("  Rake:     {}", preview.platform_fee);
    println!("  Net:      {}", preview.net);

    let result = client
        .settle_wager(operator, usdc, user, 1_000_000, 0)
        .await
        .expect("settle_wager failed");

    println!("  Signature: {}", result.signature);
}

// ─── Main ─────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let client = HousePoolClient::new(&rpc_url());
    let payer = load_keypair();

    println!("HousePool Rust SDK example");
    println!("Signer pubkey: {}", payer.pubkey());
    println!("Program:       4ZAwemu4ZWouMfny7bJ97T1nEAnKVz4kBLeBipHcPZog");

    // ── Read-only (no funds required) ─────────────────────────────────────
    example_pool_info(&client).await;
    example_preview_provide(&client).await;

    // ── Write operations (requires funded wallet) ─────────────────────────
    // Uncomment to execute on-chain:

    // Stake into the bankroll
    // example_provide_liquidity(&client, &payer).await;

    // Operator-only: publish balances (signer must be in the operator set)
    // example_publish_batch(&client, &payer).await;

    // Operator-only: settle a wager
    // example_settle_loss(&client, &payer).await;
}
