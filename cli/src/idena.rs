//! Command-line access to an Idena node's JSON-RPC interface.
//!
//! ```text
//! idena balance 0x...
//! idena transactions 0x... --count 20
//! idena call dna_epoch
//! idena call bcn_blockAt '[4200000]'
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lib_apis::chains::idena::{
    ActivateInviteArgs, BaseTxArgs, IdenaApi, SendInviteArgs, SendTxArgs, TransactionsArgs,
};
use serde_json::Value;

#[path = "./clicommon.rs"]
#[allow(dead_code)]
mod clicommon;
use clicommon::{finish, parse_args_from, GlobalArgs};

#[derive(Parser, Debug)]
#[command(name = "idena", version, about = "Call an Idena node's JSON-RPC interface")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Node API key (overrides IDENA_API_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// dna_identities
    Identities,
    /// dna_identity
    Identity { address: String },
    /// dna_epoch
    Epoch,
    /// dna_ceremonyIntervals
    CeremonyIntervals,
    /// dna_getBalance
    Balance { address: String },
    /// dna_getCoinbaseAddr
    Coinbase,
    /// dna_version
    Version,
    /// dna_sendTransaction
    Send {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        max_fee: Option<f64>,
        /// Hex payload
        #[arg(long)]
        payload: Option<String>,
    },
    /// dna_sendInvite
    Invite {
        #[arg(long)]
        to: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        amount: f64,
    },
    /// dna_activateInvite
    ActivateInvite {
        invite_key: String,
        #[arg(long)]
        to: Option<String>,
    },
    /// dna_becomeOnline
    Online,
    /// dna_becomeOffline
    Offline,
    /// bcn_lastBlock
    LastBlock,
    /// bcn_blockAt
    BlockAt { height: u64 },
    /// bcn_block
    Block { hash: String },
    /// bcn_transaction
    Transaction { hash: String },
    /// bcn_transactions
    Transactions {
        address: String,
        #[arg(long, default_value_t = 10)]
        count: u32,
        #[arg(long)]
        token: Option<String>,
    },
    /// bcn_pendingTransactions
    Pending {
        address: String,
        #[arg(long, default_value_t = 10)]
        count: u32,
        #[arg(long)]
        token: Option<String>,
    },
    /// bcn_syncing
    Syncing,
    /// bcn_mempool
    Mempool { address: String },
    /// net_peers
    Peers,
    /// net_ipfsAddress
    IpfsAddress,
    /// Any method with a JSON array of params
    Call {
        method: String,
        #[arg(default_value = "[]")]
        params: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = parse_args_from(None, std::env::args_os());
    let _guard = cli.global.init_logging("idena")?;
    let config = cli.global.load_config()?;

    let url = cli.global.url.clone().unwrap_or_else(|| config.idena.node_url());
    let key = cli.key.clone().or(config.idena.api_key.clone());
    let node = match IdenaApi::with_options(&url, key, config.http.client_options()) {
        Ok(node) => node,
        Err(e) => return finish(Err(e)),
    };

    let result = match cli.command {
        Command::Identities => node.identities().await,
        Command::Identity { address } => node.identity(&address).await,
        Command::Epoch => node.epoch().await,
        Command::CeremonyIntervals => node.ceremony_intervals().await,
        Command::Balance { address } => node.get_balance(&address).await,
        Command::Coinbase => node.get_coinbase_addr().await,
        Command::Version => node.node_version().await,
        Command::Send {
            from,
            to,
            amount,
            max_fee,
            payload,
        } => {
            let args = SendTxArgs {
                from,
                to: Some(to),
                amount,
                max_fee,
                payload,
                ..Default::default()
            };
            node.send_transaction(&args).await
        }
        Command::Invite { to, amount } => {
            node.send_invite(&SendInviteArgs {
                to,
                amount,
                ..Default::default()
            })
            .await
        }
        Command::ActivateInvite { invite_key, to } => {
            node.activate_invite(&ActivateInviteArgs {
                key: invite_key,
                to,
                ..Default::default()
            })
            .await
        }
        Command::Online => node.become_online(&BaseTxArgs::default()).await,
        Command::Offline => node.become_offline(&BaseTxArgs::default()).await,
        Command::LastBlock => node.last_block().await,
        Command::BlockAt { height } => node.block_at(height).await,
        Command::Block { hash } => node.block(&hash).await,
        Command::Transaction { hash } => node.transaction(&hash).await,
        Command::Transactions { address, count, token } => {
            node.transactions(&TransactionsArgs { address, count, token }).await
        }
        Command::Pending { address, count, token } => {
            node.pending_transactions(&TransactionsArgs { address, count, token })
                .await
        }
        Command::Syncing => node.syncing().await,
        Command::Mempool { address } => node.mempool(&address).await,
        Command::Peers => node.peers().await,
        Command::IpfsAddress => node.ipfs_address().await,
        Command::Call { method, params } => {
            let params: Vec<Value> =
                serde_json::from_str(&params).context("params must be a JSON array")?;
            node.call(&method, params).await
        }
    };

    finish(result)
}
