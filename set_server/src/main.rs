mod config;
mod game_lobby;

use std::{
    net::{SocketAddr, UdpSocket},
    time::{Duration, Instant, SystemTime},
};

use anyhow::Context;
use clap::Parser;
use config::Args;
use game_lobby::{GameLobby, Outgoing};
use log::{info, warn};
use renet::{
    transport::{NetcodeServerTransport, ServerAuthentication, ServerConfig},
    ClientId, ConnectionConfig, DefaultChannel, RenetServer, ServerEvent as NetEvent,
};
use set_core::events::ClientEvent;
use tokio::time;

fn deliver(server: &mut RenetServer, outgoing: Vec<Outgoing>) {
    for Outgoing { recipients, event } in outgoing {
        match serde_json::to_string(&event) {
            Ok(payload) => {
                for conn in recipients {
                    server.send_message(
                        ClientId::from_raw(conn),
                        DefaultChannel::ReliableOrdered,
                        payload.clone(),
                    );
                }
            }
            Err(err) => warn!("could not encode {event:?}: {err}"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let public_addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    let mut server = RenetServer::new(ConnectionConfig::default());
    let current_time = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)?;
    let server_config = ServerConfig {
        current_time,
        max_clients: args.max_clients,
        protocol_id: args.protocol_id,
        public_addresses: vec![public_addr],
        authentication: ServerAuthentication::Unsecure,
    };
    let socket = UdpSocket::bind(public_addr)
        .with_context(|| format!("could not bind {public_addr}"))?;
    let mut transport = NetcodeServerTransport::new(server_config, socket)?;

    let mut lobby = match args.seed {
        Some(seed) => GameLobby::with_seed(seed),
        None => GameLobby::new(),
    };
    info!("listening on {public_addr}");

    let mut interval = time::interval(Duration::from_millis(50));
    let mut last_updated = Instant::now();
    loop {
        interval.tick().await;
        let now = Instant::now();
        let duration = now - last_updated;
        last_updated = now;

        server.update(duration);
        if let Err(err) = transport.update(duration, &mut server) {
            warn!("transport error: {err}");
        }

        while let Some(event) = server.get_event() {
            match event {
                NetEvent::ClientConnected { client_id } => {
                    info!("client {client_id} connected");
                }
                NetEvent::ClientDisconnected { client_id, reason } => {
                    info!("client {client_id} disconnected: {reason}");
                    let outgoing = lobby.disconnect(client_id.raw());
                    deliver(&mut server, outgoing);
                }
            }
        }

        for client_id in server.clients_id() {
            while let Some(message) =
                server.receive_message(client_id, DefaultChannel::ReliableOrdered)
            {
                match serde_json::from_slice::<ClientEvent>(&message) {
                    Ok(event) => {
                        let outgoing = lobby.handle(client_id.raw(), event);
                        deliver(&mut server, outgoing);
                    }
                    Err(err) => warn!("unreadable message from client {client_id}: {err}"),
                }
            }
        }

        transport.send_packets(&mut server);
    }
}
