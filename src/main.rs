use ballot_sync::{shutdown_signal, Candidate, ElectionService, InMemoryStore, RpcServer, Voter};
use serde::Deserialize;
use slog::Drain;
use std::error::Error;
use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:50051";

/// Initial election data. Without candidates, the default roster is used.
#[derive(Default, Deserialize)]
struct Seed {
    #[serde(default)]
    voters: Vec<Voter>,
    #[serde(default)]
    candidates: Vec<Candidate>,
}

// Usage: ballot_server [listen_addr] [seed.json]
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let logger = create_root_logger_for_stdout();

    let mut args = std::env::args().skip(1);
    let listen_addr: SocketAddr = args.next().as_deref().unwrap_or(DEFAULT_LISTEN_ADDR).parse()?;
    let seed = match args.next() {
        Some(path) => load_seed(&path)?,
        None => Seed::default(),
    };

    let candidates = if seed.candidates.is_empty() {
        Candidate::default_roster()
    } else {
        seed.candidates
    };
    slog::info!(
        logger,
        "Seeding {} voters and {} candidates",
        seed.voters.len(),
        candidates.len()
    );
    let store = InMemoryStore::seeded(seed.voters, candidates)?;

    let service = Arc::new(ElectionService::new(
        logger.new(slog::o!("Component" => "ElectionService")),
        Arc::new(store),
    ));

    let (shutdown_handle, shutdown) = shutdown_signal();
    shutdown_handle.shutdown_on_ctrl_c(logger.clone());

    RpcServer::new(logger.new(slog::o!("Component" => "RpcServer")), service)
        .run(listen_addr, shutdown)
        .await?;

    Ok(())
}

fn load_seed(path: &str) -> Result<Seed, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn create_root_logger_for_stdout() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}
