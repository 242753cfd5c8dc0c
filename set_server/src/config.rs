use clap::Parser;

/// Authoritative server for multiplayer Set rooms
#[derive(Parser, Debug)]
#[command(name = "set_server", version)]
pub struct Args {
    /// UDP port to listen on
    pub port: u16,

    /// Maximum number of connected clients
    #[arg(long, default_value = "64")]
    pub max_clients: usize,

    /// Protocol id clients must present
    #[arg(long, default_value = "0")]
    pub protocol_id: u64,

    /// Seed for room deals, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}
