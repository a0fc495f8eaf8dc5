//! Command-line surface and value parsers.

use clap::{Parser, Subcommand};
use collabsplit_types::{Address, Member, Mist, ObjectId};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "collabsplit", about = "Create and manage revenue splits")]
pub struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "COLLABSPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint of the ledger client.
    #[arg(long, env = "COLLABSPLIT_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Package id of the deployed split contract.
    #[arg(long, env = "COLLABSPLIT_PACKAGE_ID")]
    pub package_id: Option<String>,

    /// Gas budget attached to every transaction.
    #[arg(long, env = "COLLABSPLIT_GAS_BUDGET")]
    pub gas_budget: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "COLLABSPLIT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "COLLABSPLIT_LOG_FORMAT")]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a split from ADDR=PERCENT members summing to exactly 100.
    Create {
        #[arg(long, value_parser = parse_address)]
        signer: Address,

        /// Member as ADDR=PERCENT; repeat for each member (at most 10).
        #[arg(long = "member", value_parser = parse_member, required = true)]
        members: Vec<Member>,
    },
    /// Deposit MIST from the signer's gas coin into a split.
    Deposit {
        #[arg(long, value_parser = parse_address)]
        signer: Address,

        #[arg(long, value_parser = parse_object_id)]
        split: ObjectId,

        #[arg(long, value_parser = parse_mist)]
        amount: Mist,
    },
    /// Distribute a split's balance to its members.
    Distribute {
        #[arg(long, value_parser = parse_address)]
        signer: Address,

        #[arg(long, value_parser = parse_object_id)]
        split: ObjectId,
    },
    /// Print a split object as fetched and as parsed.
    Show {
        #[arg(long, value_parser = parse_object_id)]
        split: ObjectId,
    },
}

pub fn parse_address(s: &str) -> Result<Address, String> {
    Address::new(s).map_err(|e| e.to_string())
}

pub fn parse_object_id(s: &str) -> Result<ObjectId, String> {
    ObjectId::new(s).map_err(|e| e.to_string())
}

pub fn parse_mist(s: &str) -> Result<Mist, String> {
    s.trim()
        .parse::<u64>()
        .map(Mist::new)
        .map_err(|e| format!("invalid amount {s:?}: {e}"))
}

/// Parse `ADDR=PERCENT`. The address may be blank here; the form reports it.
pub fn parse_member(s: &str) -> Result<Member, String> {
    let (address, percentage) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected ADDR=PERCENT, got {s:?}"))?;
    let percentage: f64 = percentage
        .trim()
        .parse()
        .map_err(|e| format!("invalid percentage in {s:?}: {e}"))?;
    Ok(Member::new(address.trim(), percentage))
}
