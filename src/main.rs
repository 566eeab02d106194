// coinsync CLI - thin I/O wrapper over the console session

use clap::{Parser, Subcommand};
use coinsync::console::Session;
use coinsync::node::{Block, NodeClient, NodeError, PeerAddress};
use coinsync::routes::{RouteTable, DEFAULT_NODE1, DEFAULT_NODE2};

#[derive(Parser, Debug)]
#[command(name = "coinsync", about = "Console for a two-node coin network")]
struct Args {
    /// Base URL of the home node
    #[arg(long, default_value = DEFAULT_NODE1)]
    node1: String,

    /// Base URL of the second node
    #[arg(long, default_value = DEFAULT_NODE2)]
    node2: String,

    /// Address the home node is registered under with its peer, when it
    /// differs from --node1 (e.g. a LAN address)
    #[arg(long)]
    advertise_node1: Option<String>,

    /// Address the second node is registered under with its peer
    #[arg(long)]
    advertise_node2: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mine one block on the home node
    Mine,
    /// Submit a transaction to the home node
    Send {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        recipient: String,
        /// Amount; non-numeric input is sent as-is for the backend to judge
        #[arg(long)]
        amount: String,
    },
    /// Print the home node's chain
    Chain,
    /// Print the home node's registered peers
    Peers,
    /// Register a peer address with the home node
    Register { address: String },
    /// Mutually register both nodes and resolve conflicts on each
    Sync,
}

fn print_chain(chain: &[Block]) {
    for block in chain {
        let when = chrono::DateTime::from_timestamp(block.timestamp as i64, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| block.timestamp.to_string());
        println!(
            "#{} {} proof={} prev={}",
            block.index, when, block.proof, block.previous_hash
        );
        for tx in &block.transactions {
            println!("    {} -> {}: {}", tx.sender, tx.recipient, tx.amount);
        }
    }
}

fn build_session(args: &Args) -> Result<Session, NodeError> {
    // Node URLs stay behind symbolic names; application logic below
    // only ever sees "node1" and "node2".
    let mut table = RouteTable::new();
    table.insert("node1", &args.node1);
    table.insert("node2", &args.node2);

    let mut home = NodeClient::new(table.target("node1").expect("node1 is always routed"))?;
    if let Some(address) = &args.advertise_node1 {
        home = home.with_advertised_address(PeerAddress::new(address));
    }
    let mut peer = NodeClient::new(table.target("node2").expect("node2 is always routed"))?;
    if let Some(address) = &args.advertise_node2 {
        peer = peer.with_advertised_address(PeerAddress::new(address));
    }
    Ok(Session::new(Box::new(home), Box::new(peer)))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut session = match build_session(&args) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Cannot build node clients: {}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Mine => {
            let status = session.mine().await;
            println!("{}", status);
        }
        Command::Send {
            sender,
            recipient,
            amount,
        } => {
            let status = session.send_transaction(&sender, &recipient, &amount).await;
            println!("{}", status);
        }
        Command::Chain => match session.refresh_chain().await {
            Ok(chain) => print_chain(chain),
            Err(e) => eprintln!("Chain fetch failed: {}", e),
        },
        Command::Peers => match session.refresh_registry().await {
            Ok(()) => {
                for peer in session.registry().peers() {
                    println!("{}", peer);
                }
            }
            Err(e) => eprintln!("Registry fetch failed: {}", e),
        },
        Command::Register { address } => {
            match session.register_peer(PeerAddress::new(address)).await {
                Ok(()) => {
                    println!("Registered. Known peers:");
                    for peer in session.registry().peers() {
                        println!("{}", peer);
                    }
                }
                Err(e) => eprintln!("Registration failed: {}", e),
            }
        }
        Command::Sync => {
            let status = session.synchronize().await.to_string();
            println!("{}", status);
            print_chain(session.chain());
        }
    }
}
