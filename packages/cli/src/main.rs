use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use house_pool_sdk::{BalanceUpdate, HousePoolClient, PROGRAM_ID};
use serde::Deserialize;
use serde_json::json;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};
use std::str::FromStr;

// ─── Token symbol registry (mainnet-beta) ────────────────────────────────────

const KNOWN_TOKENS: &[(&str, &str)] = &[
    ("SOL",  "So11111111111111111111111111111111111111112"),
    ("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
    ("USDT", "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB"),
];

/// Resolve a symbol (SOL, USDC, USDT) or raw base-58 mint address to a Pubkey.
fn resolve_mint(symbol_or_address: &str) -> Result<Pubkey> {
    let upper = symbol_or_address.to_uppercase();
    for (sym, addr) in KNOWN_TOKENS {
        if upper == *sym {
            return Ok(Pubkey::from_str(addr)?);
        }
    }
    Pubkey::from_str(symbol_or_address)
        .map_err(|_| anyhow!(
            "Unknown token '{}'. Use a built-in symbol ({}) or a base-58 mint address.",
            symbol_or_address,
            KNOWN_TOKENS.iter().map(|(s, _)| *s).collect::<Vec<_>>().join(", ")
        ))
}

/// Expand `~/` to `$HOME/` in keypair paths.
fn expand_home(path: &str) -> String {
    if path.starts_with("~/") {
        format!("{}{}", std::env::var("HOME").unwrap_or_default(), &path[1..])
    } else {
        path.to_string()
    }
}

fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded = expand_home(path);
    read_keypair_file(&expanded)
        .map_err(|e| anyhow!(
            "Cannot load keypair from '{}': {}\n  \
             Set HOUSE_KEYPAIR or pass --keypair to specify a different path.",
            expanded, e
        ))
}

// ─── Batch update file format ─────────────────────────────────────────────────

/// One entry of a `publish-batch` JSON file:
/// `[{"owner": "<base58>", "balance": 1000, "nonce": 7}, …]`
#[derive(Deserialize)]
struct BatchEntry {
    owner:   String,
    balance: u64,
    nonce:   u64,
}

fn load_batch(path: &str) -> Result<Vec<BalanceUpdate>> {
    let raw = std::fs::read_to_string(expand_home(path))
        .with_context(|| format!("Cannot read batch file '{path}'"))?;
    let entries: Vec<BatchEntry> = serde_json::from_str(&raw)
        .context("Batch file must be a JSON array of {owner, balance, nonce} objects")?;
    entries
        .into_iter()
        .map(|e| {
            Ok(BalanceUpdate {
                owner:   Pubkey::from_str(&e.owner)
                    .map_err(|_| anyhow!("Invalid owner pubkey '{}'", e.owner))?,
                balance: e.balance,
                nonce:   e.nonce,
            })
        })
        .collect()
}

// ─── Version banner ───────────────────────────────────────────────────────────

/// Print the HousePool banner to stdout.
fn print_banner() {
    let ver = env!("CARGO_PKG_VERSION");
    println!();
    println!("  HousePool  v{ver}  ·  custodial bankroll pool on Solana");
    println!("  {}", "─".repeat(62));
    println!("  Program   {PROGRAM_ID}");
    println!("  Network   Solana mainnet-beta");
    println!("  Fees      platform fee on LP flows  +  lp_fee/rake per settled wager");
    println!("  Docs      https://github.com/house-pool/house-pool");
    println!();
}

// ─── CLI definition ───────────────────────────────────────────────────────────

/// HousePool — custodial bankroll pool on Solana.
///
/// Every command supports --json for machine-readable output.
/// Global options can also be set via environment variables:
///   HOUSE_RPC_URL  — Solana JSON-RPC endpoint
///   HOUSE_KEYPAIR  — path to Ed25519 keypair JSON
#[derive(Parser)]
#[command(
    name        = "house-pool",
    version     = env!("CARGO_PKG_VERSION"),
    long_version = concat!(
        env!("CARGO_PKG_VERSION"), "\n",
        "Program:      4ZAwemu4ZWouMfny7bJ97T1nEAnKVz4kBLeBipHcPZog\n",
        "Network:      Solana mainnet-beta\n",
        "Fee caps:     platform fee ≤ 1000 bps, lp_fee + rake ≤ 1000 bps\n",
        "License:      MIT",
    ),
    about   = "Custodial bankroll pool — LP staking, oracle-gated withdrawals, operator settlement.",
    after_help = "\
ENVIRONMENT:
  HOUSE_RPC_URL    Solana JSON-RPC endpoint  [default: https://api.mainnet-beta.solana.com]
  HOUSE_KEYPAIR    Path to Ed25519 keypair JSON  [default: ~/.config/solana/id.json]

QUICK START:
  house-pool pool-info  --mint USDC
  house-pool provide    --mint USDC --amount 1000000000
  house-pool deposit    --mint USDC --amount 50000000
  house-pool withdraw   --mint USDC --amount 25000000
  house-pool settle     --mint USDC --user <PUBKEY> --bet 1000000 --win 0

PROGRAM:
  4ZAwemu4ZWouMfny7bJ97T1nEAnKVz4kBLeBipHcPZog  (Solana mainnet-beta)"
)]
struct Cli {
    /// Solana JSON-RPC endpoint
    #[arg(
        long,
        global     = true,
        value_name = "URL",
        default_value = "https://api.mainnet-beta.solana.com",
        env = "HOUSE_RPC_URL"
    )]
    rpc_url: String,

    /// Path to the signing Ed25519 keypair JSON file
    #[arg(
        long,
        global     = true,
        value_name = "PATH",
        default_value = "~/.config/solana/id.json",
        env = "HOUSE_KEYPAIR"
    )]
    keypair: String,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the custodial pool for an asset mint (signer becomes admin)
    ///
    /// One pool per mint, PDA-enforced. The vault is owned by a PDA —
    /// no human key controls custody after creation.
    #[command(
        name = "create-pool",
        after_help = "\
EXAMPLES:
  # Create the USDC pool with default fees (2.5% platform, 2% LP, 1% rake)
  house-pool create-pool --mint USDC

  # Custom fee configuration
  house-pool create-pool --mint USDC --platform-fee-bps 100 --lp-fee-bps 150 --rake-bps 50

NOTES:
  platform-fee-bps is capped at 1000 (10%).
  lp-fee-bps + rake-bps is capped at 1000 (10%) combined."
    )]
    CreatePool {
        /// Asset mint — symbol (SOL, USDC, USDT) or base-58 address
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Platform fee on liquidity adds/removes and reward harvests
        #[arg(long, value_name = "BPS", default_value_t = 250)]
        platform_fee_bps: u16,

        /// LP reward share carved from every settled wager amount
        #[arg(long, value_name = "BPS", default_value_t = 200)]
        lp_fee_bps: u16,

        /// Platform rake carved from every settled wager amount
        #[arg(long, value_name = "BPS", default_value_t = 100)]
        rake_bps: u16,
    },

    /// Stake into the bankroll and receive LP shares
    ///
    /// The platform fee comes off the top; the rest enters custody and
    /// mints shares at the current custody/share ratio (1:1 bootstrap).
    /// House revenue accrues to shares via a per-share accumulator.
    #[command(
        after_help = "\
EXAMPLES:
  # Stake 1000 USDC (atomic units)
  house-pool provide --mint USDC --amount 1000000000

  # Machine-readable output
  house-pool provide --mint USDC --amount 1000000000 --json

NOTES:
  Amounts are atomic units: lamports for SOL, μUSDC for USDC, etc.
  Run `house-pool position --mint USDC` to see shares and pending rewards."
    )]
    Provide {
        /// Asset mint of the pool to stake into
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Amount to stake (atomic units)
        #[arg(long, value_name = "AMOUNT")]
        amount: u64,
    },

    /// Burn LP shares and withdraw pro-rata custody
    ///
    /// Pending rewards are harvested automatically first.
    /// Available even while the pool is paused.
    #[command(
        name = "remove-liquidity",
        after_help = "\
EXAMPLES:
  house-pool remove-liquidity --mint USDC --shares 975000000
  house-pool remove-liquidity --mint USDC --shares 975000000 --json

NOTES:
  Run `house-pool position --mint USDC` to see your share balance.
  The platform fee applies to the gross withdrawal amount."
    )]
    RemoveLiquidity {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Number of LP shares to burn
        #[arg(long, value_name = "SHARES")]
        shares: u64,
    },

    /// Claim accrued LP rewards for one pool
    ///
    /// Rewards accrue from the LP cut of every settled wager.
    /// A no-op when nothing is pending.
    #[command(
        after_help = "\
EXAMPLES:
  house-pool harvest --mint USDC
  house-pool harvest --mint USDC --json

NOTES:
  The platform fee is skimmed from the harvested amount.
  Check pending rewards first: house-pool position --mint USDC"
    )]
    Harvest {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,
    },

    /// Deposit tokens into pool custody (credits your off-chain balance 1:1)
    #[command(
        after_help = "\
EXAMPLES:
  house-pool deposit --mint USDC --amount 50000000
  house-pool deposit --mint USDC --amount 50000000 --json

NOTES:
  Your playable balance is tracked off-chain and published by operators.
  Run `house-pool account --mint USDC` to see balance, nonce and freshness."
    )]
    Deposit {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Amount to deposit (atomic units)
        #[arg(long, value_name = "AMOUNT")]
        amount: u64,
    },

    /// Withdraw against your published off-chain balance
    ///
    /// Rejected unless the published balance is fresh (within the 9000-slot
    /// expiry window) and covers the amount. A local preflight runs first so
    /// a doomed transaction is never paid for.
    #[command(
        after_help = "\
EXAMPLES:
  house-pool withdraw --mint USDC --amount 25000000
  house-pool withdraw --mint USDC --amount 25000000 --json

NOTES:
  If the balance is stale, ask an operator to publish a fresh one first.
  Check freshness: house-pool account --mint USDC"
    )]
    Withdraw {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Amount to withdraw (atomic units)
        #[arg(long, value_name = "AMOUNT")]
        amount: u64,
    },

    /// Operator: publish one user's off-chain balance
    ///
    /// The nonce must be strictly greater than the on-chain nonce —
    /// replayed or out-of-order publications are rejected.
    #[command(
        after_help = "\
EXAMPLES:
  house-pool publish --mint USDC --user <PUBKEY> --balance 75000000 --nonce 12

NOTES:
  Signer must be in the pool's operator set (or the admin).
  Read the current nonce first: house-pool account --mint USDC --owner <PUBKEY>"
    )]
    Publish {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// User whose balance is being published
        #[arg(long, value_name = "PUBKEY")]
        user: String,

        /// New off-chain balance (atomic units)
        #[arg(long, value_name = "AMOUNT")]
        balance: u64,

        /// New nonce — must exceed the on-chain nonce
        #[arg(long, value_name = "NONCE")]
        nonce: u64,
    },

    /// Operator: publish a batch of balance updates atomically
    ///
    /// All-or-nothing: one stale nonce aborts the whole batch.
    /// Max 24 updates per transaction.
    #[command(
        name = "publish-batch",
        after_help = "\
EXAMPLES:
  house-pool publish-batch --mint USDC --file updates.json

FILE FORMAT (JSON array):
  [
    {\"owner\": \"<base58>\", \"balance\": 75000000, \"nonce\": 12},
    {\"owner\": \"<base58>\", \"balance\": 1200000,  \"nonce\": 3}
  ]"
    )]
    PublishBatch {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Path to a JSON file of {owner, balance, nonce} entries
        #[arg(long, value_name = "PATH")]
        file: String,
    },

    /// Operator: settle a wager outcome atomically
    ///
    /// --win 0 marks a loss (the bet flows into the bankroll);
    /// --win > 0 marks a win (net winnings credited to the user).
    /// LP fee and platform rake are carved from the settled amount.
    #[command(
        after_help = "\
EXAMPLES:
  # User lost a 1 USDC bet
  house-pool settle --mint USDC --user <PUBKEY> --bet 1000000 --win 0

  # User won 5 USDC on a 1 USDC bet
  house-pool settle --mint USDC --user <PUBKEY> --bet 1000000 --win 5000000

  # Preview the fee split without sending a transaction
  house-pool settle --mint USDC --user <PUBKEY> --bet 1000000 --win 0 --dry-run

NOTES:
  Signer must be in the pool's operator set (or the admin).
  A win exceeding pool custody is rejected atomically on-chain."
    )]
    Settle {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// User whose wager is being settled
        #[arg(long, value_name = "PUBKEY")]
        user: String,

        /// Bet amount (atomic units) — debited from the user's balance
        #[arg(long, value_name = "AMOUNT")]
        bet: u64,

        /// Win amount (atomic units); 0 = loss
        #[arg(long, value_name = "AMOUNT", default_value_t = 0)]
        win: u64,

        /// Print the fee breakdown and exit without sending a transaction
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Admin: pause deposits, withdrawals, staking and settlement
    #[command(
        after_help = "\
EXAMPLES:
  house-pool pause --mint USDC

NOTES:
  remove-liquidity and balance publication keep working while paused.
  Resume with: house-pool unpause --mint USDC"
    )]
    Pause {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,
    },

    /// Admin: lift the operational pause
    Unpause {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,
    },

    /// Admin: add a trusted operator to the pool
    #[command(
        name = "add-operator",
        after_help = "\
EXAMPLES:
  house-pool add-operator --mint USDC --operator <PUBKEY>

NOTES:
  Max 8 operators per pool. Adding an existing operator is a no-op."
    )]
    AddOperator {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Operator public key to add
        #[arg(long, value_name = "PUBKEY")]
        operator: String,
    },

    /// Admin: remove a trusted operator from the pool
    #[command(name = "remove-operator")]
    RemoveOperator {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Operator public key to remove
        #[arg(long, value_name = "PUBKEY")]
        operator: String,
    },

    /// Admin: re-configure pool fees under the hard caps
    #[command(
        name = "update-fees",
        after_help = "\
EXAMPLES:
  house-pool update-fees --mint USDC --platform-fee-bps 100 --lp-fee-bps 150 --rake-bps 50

NOTES:
  Same caps as create-pool: platform ≤ 1000 bps, lp + rake ≤ 1000 bps combined."
    )]
    UpdateFees {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        #[arg(long, value_name = "BPS")]
        platform_fee_bps: u16,

        #[arg(long, value_name = "BPS")]
        lp_fee_bps: u16,

        #[arg(long, value_name = "BPS")]
        rake_bps: u16,
    },

    /// Admin: drain the vault to the treasury and zero pool accounting
    ///
    /// Only valid while paused. IRREVERSIBLE — LP shares and custody
    /// accounting are wiped; recovery happens off-chain from the treasury.
    #[command(
        after_help = "\
EXAMPLES:
  house-pool pause --mint USDC
  house-pool drain --mint USDC --yes

NOTES:
  Refuses to run without --yes. Published balances are left intact
  as an audit trail of what users were owed at shutdown."
    )]
    Drain {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Confirm the irreversible drain
        #[arg(long, default_value_t = false)]
        yes: bool,
    },

    /// Show pool custody, shares, fees, pause state and operators
    ///
    /// Read-only — no keypair required, no transaction sent.
    #[command(
        name = "pool-info",
        after_help = "\
EXAMPLES:
  house-pool pool-info --mint USDC
  house-pool pool-info --mint USDC --json"
    )]
    PoolInfo {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,
    },

    /// Show an LP position: shares, redemption value, pending rewards
    #[command(
        after_help = "\
EXAMPLES:
  house-pool position --mint USDC
  house-pool position --mint USDC --owner <PUBKEY> --json"
    )]
    Position {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Position owner (defaults to the signing keypair)
        #[arg(long, value_name = "PUBKEY")]
        owner: Option<String>,
    },

    /// Show a user's published balance, nonce and freshness
    #[command(
        after_help = "\
EXAMPLES:
  house-pool account --mint USDC
  house-pool account --mint USDC --owner <PUBKEY> --json"
    )]
    Account {
        /// Asset mint of the pool
        #[arg(long, value_name = "TOKEN")]
        mint: String,

        /// Account owner (defaults to the signing keypair)
        #[arg(long, value_name = "PUBKEY")]
        owner: Option<String>,
    },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // When invoked with no arguments, show banner + full help and exit cleanly.
    if std::env::args().len() == 1 {
        print_banner();
        Cli::command().print_long_help().ok();
        println!();
        return Ok(());
    }

    let cli = Cli::parse();
    let client = HousePoolClient::new(&cli.rpc_url);

    match &cli.command {
        Commands::CreatePool { mint, platform_fee_bps, lp_fee_bps, rake_bps } => {
            let mint = resolve_mint(mint)?;
            let admin = load_keypair(&cli.keypair)?;
            let result = client
                .create_pool(&admin, mint, *platform_fee_bps, *lp_fee_bps, *rake_bps)
                .await
                .context("initialize_pool transaction failed")?;
            let (pool, _) =
                house_pool_sdk::instructions::derive_pool(&mint, &client.program_id());
            if cli.json {
                println!("{}", json!({
                    "status":            "ok",
                    "command":           "create-pool",
                    "mint":              mint.to_string(),
                    "pool":              pool.to_string(),
                    "admin":             admin.pubkey().to_string(),
                    "platform_fee_bps":  platform_fee_bps,
                    "lp_fee_bps":        lp_fee_bps,
                    "platform_rake_bps": rake_bps,
                    "tx":                result.signature,
                }));
            } else {
                println!("─── Pool Created ─────────────────────────────────────────────────");
                println!("  Mint             {mint}");
                println!("  Pool PDA         {pool}");
                println!("  Admin            {}", admin.pubkey());
                println!("  Platform fee     {platform_fee_bps} bps");
                println!("  LP fee           {lp_fee_bps} bps");
                println!("  Platform rake    {rake_bps} bps");
                println!("  Transaction      {}", result.signature);
                println!();
                println!("  Next: house-pool add-operator --mint {mint} --operator <PUBKEY>");
            }
        }

        Commands::Provide { mint, amount } => {
            let mint = resolve_mint(mint)?;
            if *amount == 0 {
                return Err(anyhow!("--amount must be > 0 (atomic units)"));
            }
            let provider = load_keypair(&cli.keypair)?;
            let preview = client.preview_provide(mint, *amount).await?;
            let result = client
                .provide_liquidity(&provider, mint, *amount)
                .await
                .context("provide_liquidity transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status":  "ok",
                    "command": "provide",
                    "mint":    mint.to_string(),
                    "amount":  amount,
                    "fee":     preview.fee,
                    "net":     preview.net,
                    "shares":  preview.shares,
                    "tx":      result.signature,
                }));
            } else {
                println!("─── Liquidity Provided ───────────────────────────────────────────");
                println!("  Mint             {mint}");
                println!("  Staked           {:>20}", amount);
                println!("  Platform fee     {:>20}", preview.fee);
                println!("  Entered custody  {:>20}", preview.net);
                println!("  Shares minted    {:>20}", preview.shares);
                println!("  Transaction      {}", result.signature);
            }
        }

        Commands::RemoveLiquidity { mint, shares } => {
            let mint = resolve_mint(mint)?;
            if *shares == 0 {
                return Err(anyhow!("--shares must be > 0"));
            }
            let provider = load_keypair(&cli.keypair)?;
            let result = client
                .remove_liquidity(&provider, mint, *shares)
                .await
                .context("remove_liquidity transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status":  "ok",
                    "command": "remove-liquidity",
                    "mint":    mint.to_string(),
                    "shares":  shares,
                    "tx":      result.signature,
                }));
            } else {
                println!("─── Liquidity Removed ────────────────────────────────────────────");
                println!("  Mint             {mint}");
                println!("  Shares burned    {:>20}", shares);
                println!("  Transaction      {}", result.signature);
            }
        }

        Commands::Harvest { mint } => {
            let mint = resolve_mint(mint)?;
            let provider = load_keypair(&cli.keypair)?;
            let result = client
                .harvest_rewards(&provider, mint)
                .await
                .context("harvest_rewards transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status":  "ok",
                    "command": "harvest",
                    "mint":    mint.to_string(),
                    "tx":      result.signature,
                }));
            } else {
                println!("─── Rewards Harvested ────────────────────────────────────────────");
                println!("  Mint             {mint}");
                println!("  Transaction      {}", result.signature);
            }
        }

        Commands::Deposit { mint, amount } => {
            let mint = resolve_mint(mint)?;
            if *amount == 0 {
                return Err(anyhow!("--amount must be > 0 (atomic units)"));
            }
            let user = load_keypair(&cli.keypair)?;
            let result = client
                .deposit(&user, mint, *amount)
                .await
                .context("deposit transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status":  "ok",
                    "command": "deposit",
                    "mint":    mint.to_string(),
                    "amount":  amount,
                    "tx":      result.signature,
                }));
            } else {
                println!("─── Deposit ──────────────────────────────────────────────────────");
                println!("  Mint             {mint}");
                println!("  Deposited        {:>20}", amount);
                println!("  Transaction      {}", result.signature);
            }
        }

        Commands::Withdraw { mint, amount } => {
            let mint = resolve_mint(mint)?;
            if *amount == 0 {
                return Err(anyhow!("--amount must be > 0 (atomic units)"));
            }
            let user = load_keypair(&cli.keypair)?;
            let result = client
                .withdraw(&user, mint, *amount)
                .await
                .context("withdraw transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status":  "ok",
                    "command": "withdraw",
                    "mint":    mint.to_string(),
                    "amount":  amount,
                    "tx":      result.signature,
                }));
            } else {
                println!("─── Withdrawal ───────────────────────────────────────────────────");
                println!("  Mint             {mint}");
                println!("  Withdrawn        {:>20}", amount);
                println!("  Transaction      {}", result.signature);
            }
        }

        Commands::Publish { mint, user, balance, nonce } => {
            let mint = resolve_mint(mint)?;
            let user = Pubkey::from_str(user).context("--user must be a base-58 pubkey")?;
            let operator = load_keypair(&cli.keypair)?;
            let result = client
                .publish_balance(&operator, mint, user, *balance, *nonce)
                .await
                .context("publish_balance transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status":  "ok",
                    "command": "publish",
                    "mint":    mint.to_string(),
                    "user":    user.to_string(),
                    "balance": balance,
                    "nonce":   nonce,
                    "tx":      result.signature,
                }));
            } else {
                println!("─── Balance Published ────────────────────────────────────────────");
                println!("  User             {user}");
                println!("  Balance          {:>20}", balance);
                println!("  Nonce            {:>20}", nonce);
                println!("  Transaction      {}", result.signature);
            }
        }

        Commands::PublishBatch { mint, file } => {
            let mint = resolve_mint(mint)?;
            let updates = load_batch(file)?;
            if updates.is_empty() {
                return Err(anyhow!("Batch file '{file}' contains no updates"));
            }
            let operator = load_keypair(&cli.keypair)?;
            let result = client
                .publish_balances(&operator, mint, &updates)
                .await
                .context("publish_balances transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status":  "ok",
                    "command": "publish-batch",
                    "mint":    mint.to_string(),
                    "count":   updates.len(),
                    "tx":      result.signature,
                }));
            } else {
                println!("─── Balances Published ───────────────────────────────────────────");
                println!("  Updates          {:>20}", updates.len());
                println!("  Transaction      {}", result.signature);
            }
        }

        Commands::Settle { mint, user, bet, win, dry_run } => {
            let mint = resolve_mint(mint)?;
            let user = Pubkey::from_str(user).context("--user must be a base-58 pubkey")?;
            if *bet == 0 {
                return Err(anyhow!("--bet must be > 0"));
            }
            let preview = client.preview_settle(mint, *bet, *win).await?;
            if *dry_run {
                println!("{}", json!({
                    "status":        "preview",
                    "command":       "settle",
                    "bet":           bet,
                    "win":           win,
                    "lp_fee":        preview.lp_fee,
                    "platform_fee":  preview.platform_fee,
                    "net":           preview.net,
                    "custody_after": preview.custody_after.to_string(),
                }));
                return Ok(());
            }
            let operator = load_keypair(&cli.keypair)?;
            let result = client
                .settle_wager(&operator, mint, user, *bet, *win)
                .await
                .context("settle_wager transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status":       "ok",
                    "command":      "settle",
                    "mint":         mint.to_string(),
                    "user":         user.to_string(),
                    "bet":          bet,
                    "win":          win,
                    "lp_fee":       preview.lp_fee,
                    "platform_fee": preview.platform_fee,
                    "net":          preview.net,
                    "tx":           result.signature,
                }));
            } else {
                let outcome = if *win > 0 { "win" } else { "loss" };
                println!("─── Wager Settled ────────────────────────────────────────────────");
                println!("  User             {user}");
                println!("  Outcome          {outcome}");
                println!("  Bet              {:>20}", bet);
                println!("  Win              {:>20}", win);
                println!("  LP fee           {:>20}", preview.lp_fee);
                println!("  Platform rake    {:>20}", preview.platform_fee);
                println!("  Net              {:>20}", preview.net);
                println!("  Transaction      {}", result.signature);
            }
        }

        Commands::Pause { mint } | Commands::Unpause { mint } => {
            let paused = matches!(&cli.command, Commands::Pause { .. });
            let mint = resolve_mint(mint)?;
            let admin = load_keypair(&cli.keypair)?;
            let result = client
                .set_paused(&admin, mint, paused)
                .await
                .context("set_paused transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status":  "ok",
                    "command": if paused { "pause" } else { "unpause" },
                    "mint":    mint.to_string(),
                    "paused":  paused,
                    "tx":      result.signature,
                }));
            } else {
                println!("Pool {} — tx {}", if paused { "paused" } else { "unpaused" }, result.signature);
            }
        }

        Commands::AddOperator { mint, operator } => {
            let mint = resolve_mint(mint)?;
            let op = Pubkey::from_str(operator).context("--operator must be a base-58 pubkey")?;
            let admin = load_keypair(&cli.keypair)?;
            let result = client
                .add_operator(&admin, mint, op)
                .await
                .context("add_operator transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status": "ok", "command": "add-operator",
                    "mint": mint.to_string(), "operator": op.to_string(),
                    "tx": result.signature,
                }));
            } else {
                println!("Operator {op} added — tx {}", result.signature);
            }
        }

        Commands::RemoveOperator { mint, operator } => {
            let mint = resolve_mint(mint)?;
            let op = Pubkey::from_str(operator).context("--operator must be a base-58 pubkey")?;
            let admin = load_keypair(&cli.keypair)?;
            let result = client
                .remove_operator(&admin, mint, op)
                .await
                .context("remove_operator transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status": "ok", "command": "remove-operator",
                    "mint": mint.to_string(), "operator": op.to_string(),
                    "tx": result.signature,
                }));
            } else {
                println!("Operator {op} removed — tx {}", result.signature);
            }
        }

        Commands::UpdateFees { mint, platform_fee_bps, lp_fee_bps, rake_bps } => {
            let mint = resolve_mint(mint)?;
            let admin = load_keypair(&cli.keypair)?;
            let result = client
                .update_fees(&admin, mint, *platform_fee_bps, *lp_fee_bps, *rake_bps)
                .await
                .context("update_fees transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status": "ok", "command": "update-fees",
                    "mint": mint.to_string(),
                    "platform_fee_bps": platform_fee_bps,
                    "lp_fee_bps": lp_fee_bps,
                    "platform_rake_bps": rake_bps,
                    "tx": result.signature,
                }));
            } else {
                println!(
                    "Fees updated: platform={platform_fee_bps} lp={lp_fee_bps} rake={rake_bps} bps — tx {}",
                    result.signature
                );
            }
        }

        Commands::Drain { mint, yes } => {
            if !*yes {
                return Err(anyhow!(
                    "emergency drain is irreversible — re-run with --yes to confirm.\n  \
                     The pool must already be paused: house-pool pause --mint <TOKEN>"
                ));
            }
            let mint = resolve_mint(mint)?;
            let admin = load_keypair(&cli.keypair)?;
            let result = client
                .emergency_drain(&admin, mint)
                .await
                .context("emergency_drain transaction failed")?;
            if cli.json {
                println!("{}", json!({
                    "status": "ok", "command": "drain",
                    "mint": mint.to_string(), "tx": result.signature,
                }));
            } else {
                println!("─── Emergency Drain ──────────────────────────────────────────────");
                println!("  Vault drained to treasury; pool accounting zeroed.");
                println!("  Transaction      {}", result.signature);
            }
        }

        Commands::PoolInfo { mint } => {
            let mint = resolve_mint(mint)?;
            let info = client.pool_info(mint).await?;
            if cli.json {
                println!("{}", json!({
                    "pool":              info.address.to_string(),
                    "mint":              info.token_mint.to_string(),
                    "total_custody":     info.total_custody,
                    "total_shares":      info.total_shares,
                    "vault_balance":     info.vault_balance,
                    "accumulated_fees":  info.accumulated_fees,
                    "platform_fee_bps":  info.platform_fee_bps,
                    "lp_fee_bps":        info.lp_fee_bps,
                    "platform_rake_bps": info.platform_rake_bps,
                    "paused":            info.paused,
                    "operators":         info.operators.iter().map(|o| o.to_string()).collect::<Vec<_>>(),
                }));
            } else {
                println!("─── Pool Info ────────────────────────────────────────────────────");
                println!("  Pool             {}", info.address);
                println!("  Mint             {}", info.token_mint);
                println!("  Total custody    {:>20}", info.total_custody);
                println!("  Total shares     {:>20}", info.total_shares);
                println!("  Vault balance    {:>20}", info.vault_balance);
                println!("  Undistributed    {:>20}", info.accumulated_fees);
                println!("  Platform fee     {:>8} bps", info.platform_fee_bps);
                println!("  LP fee           {:>8} bps", info.lp_fee_bps);
                println!("  Platform rake    {:>8} bps", info.platform_rake_bps);
                println!("  Paused           {}", info.paused);
                println!("  Operators        {}", info.operators.len());
                for op in &info.operators {
                    println!("                   {op}");
                }
            }
        }

        Commands::Position { mint, owner } => {
            let mint = resolve_mint(mint)?;
            let owner = match owner {
                Some(o) => Pubkey::from_str(o).context("--owner must be a base-58 pubkey")?,
                None => load_keypair(&cli.keypair)?.pubkey(),
            };
            let info = client.position_info(mint, owner).await?;
            if cli.json {
                println!("{}", json!({
                    "position":        info.address.to_string(),
                    "owner":           info.owner.to_string(),
                    "pool":            info.pool.to_string(),
                    "shares":          info.shares,
                    "redeemable":      info.redeemable,
                    "pending_rewards": info.pending_rewards,
                }));
            } else {
                println!("─── LP Position ──────────────────────────────────────────────────");
                println!("  Owner            {}", info.owner);
                println!("  Shares           {:>20}", info.shares);
                println!("  Redeemable       {:>20}", info.redeemable);
                println!("  Pending rewards  {:>20}", info.pending_rewards);
            }
        }

        Commands::Account { mint, owner } => {
            let mint = resolve_mint(mint)?;
            let owner = match owner {
                Some(o) => Pubkey::from_str(o).context("--owner must be a base-58 pubkey")?,
                None => load_keypair(&cli.keypair)?.pubkey(),
            };
            let info = client.user_account_info(mint, owner).await?;
            if cli.json {
                println!("{}", json!({
                    "account":          info.address.to_string(),
                    "owner":            info.owner.to_string(),
                    "pool":             info.pool.to_string(),
                    "balance":          info.balance,
                    "nonce":            info.nonce,
                    "last_update_slot": info.last_update_slot,
                    "age_slots":        info.age_slots,
                    "fresh":            info.fresh,
                }));
            } else {
                println!("─── User Account ─────────────────────────────────────────────────");
                println!("  Owner            {}", info.owner);
                println!("  Balance          {:>20}", info.balance);
                println!("  Nonce            {:>20}", info.nonce);
                println!("  Last update slot {:>20}", info.last_update_slot);
                println!("  Age (slots)      {:>20}", info.age_slots);
                println!("  Fresh            {}", if info.fresh { "yes" } else { "no (withdrawals blocked)" });
            }
        }
    }

    Ok(())
}
