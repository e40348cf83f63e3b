use ballot_sync::{
    shutdown_signal, BallotError, Candidate, Category, Connectivity, Delivery, ElectionApi, ElectionClient,
    ElectionService, ElectionStore, GrpcElectionApi, InMemoryStore, RpcServer, RpcServerShutdownHandle,
    SubmitBallotError, SubmitBallotInput, SyncClientConfig, SyncOptions, SyncState, Voter, VoterId, VotingStatus,
};
use slog::Drain;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::time::{Duration, Instant};

#[tokio::test]
async fn online_submission_then_resubmission() -> Result<(), Box<dyn Error>> {
    let port = 50161;
    let (store, _server) = start_server(port, vec![voter("V1")]).await;
    let (client, _cache_dir) = create_client(port).await?;
    wait_for(&client, Connectivity::Online).await;

    let receipt = client
        .sync_client
        .submit_ballot(SubmitBallotInput::new(
            "V1",
            "presiden",
            &[("presiden1", 5), ("presiden2", 15)],
        ))
        .await?;
    assert_eq!(
        receipt.delivery,
        Delivery::Synced {
            inserted: 2,
            deleted: 0
        }
    );
    assert_eq!(
        stored(&store, "V1"),
        vec![("presiden1".to_string(), 5), ("presiden2".to_string(), 15)]
    );
    let v1 = store.voter(&VoterId::new("V1"))?.unwrap();
    assert_eq!(v1.status, VotingStatus::Voted);

    client
        .sync_client
        .submit_ballot(SubmitBallotInput::new("V1", "presiden", &[("presiden1", 20)]))
        .await?;
    assert_eq!(stored(&store, "V1"), vec![("presiden1".to_string(), 20)]);

    let statistics = client.sync_client.get_statistics().await?;
    assert_eq!(statistics.voted_voters, 1);
    assert_eq!(statistics.total_weight, 20);

    Ok(())
}

#[tokio::test]
async fn offline_submission_syncs_once_the_server_is_back() -> Result<(), Box<dyn Error>> {
    let port = 50162;
    let (client, _cache_dir) = create_client(port).await?;
    assert_eq!(client.connectivity.current(), Connectivity::Offline);

    let receipt = client
        .sync_client
        .submit_ballot(SubmitBallotInput::new("V2", "parlemen", &[("parlemen1", 8), ("parlemen4", 2)]))
        .await?;
    assert!(matches!(receipt.delivery, Delivery::Queued { .. }));
    let offline_results = client.sync_client.get_results().await?;

    let (store, _server) = start_server(port, vec![voter("V2")]).await;
    wait_for(&client, Connectivity::Online).await;
    wait_until_synced(&client).await;

    assert_eq!(
        stored(&store, "V2"),
        vec![("parlemen1".to_string(), 8), ("parlemen4".to_string(), 2)]
    );
    assert_eq!(client.sync_client.get_results().await?, offline_results);

    // A later replay or probe never submits the entry again.
    client.sync_client.replay_outbox().await?;
    client.sync_client.probe().await;
    assert_eq!(stored(&store, "V2").len(), 2);
    assert_eq!(store.audit_log()?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn reserved_ids_are_forbidden() -> Result<(), Box<dyn Error>> {
    let port = 50163;
    let (store, _server) = start_server(port, vec![voter("user_482")]).await;
    let (client, _cache_dir) = create_client(port).await?;
    wait_for(&client, Connectivity::Online).await;

    let result = client
        .sync_client
        .submit_ballot(SubmitBallotInput::new("user_482", "pm", &[("pm1", 5)]))
        .await;

    assert!(matches!(
        result,
        Err(SubmitBallotError::Rejected(BallotError::Forbidden(_)))
    ));
    assert!(store.ballots()?.is_empty());

    // The server refuses on its own too.
    let api = GrpcElectionApi::new(create_root_logger_for_stdout("raw".into()), &endpoint(port))?;
    let raw = api
        .submit_ballot(SubmitBallotInput::new("user_482", "pm", &[("pm1", 5)]))
        .await;
    assert!(matches!(
        raw,
        Err(ballot_sync::RemoteError::Rejected(BallotError::Forbidden(_)))
    ));

    Ok(())
}

#[tokio::test]
async fn rejections_cross_the_wire() -> Result<(), Box<dyn Error>> {
    let port = 50164;
    let (_store, _server) = start_server(port, vec![voter("V1")]).await;
    let (client, _cache_dir) = create_client(port).await?;
    wait_for(&client, Connectivity::Online).await;

    let unknown_candidate = client
        .sync_client
        .submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm7", 5)]))
        .await;
    assert!(matches!(
        unknown_candidate,
        Err(SubmitBallotError::Rejected(BallotError::NotFound(_)))
    ));

    let over_allotment = client
        .sync_client
        .submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm1", 15), ("pm2", 6)]))
        .await;
    assert!(matches!(
        over_allotment,
        Err(SubmitBallotError::Rejected(BallotError::InvalidInput(_)))
    ));

    let outbox = client.sync_client.outbox()?;
    assert_eq!(outbox.len(), 2);
    assert!(outbox
        .iter()
        .all(|e| matches!(e.state, SyncState::SkippedPermanent { .. })));
    assert!(client.sync_client.is_online());

    Ok(())
}

#[tokio::test]
async fn voter_ballots_cross_the_wire() -> Result<(), Box<dyn Error>> {
    let port = 50165;
    let (_store, _server) = start_server(port, vec![voter("V1"), voter("V2")]).await;
    let (client, _cache_dir) = create_client(port).await?;
    wait_for(&client, Connectivity::Online).await;

    client
        .sync_client
        .submit_ballot(SubmitBallotInput::new("V1", "parlemen", &[("parlemen2", 3)]))
        .await?;
    client
        .sync_client
        .submit_ballot(SubmitBallotInput::new("V1", "presiden", &[("presiden2", 8)]))
        .await?;

    let ballots = client.sync_client.get_voter_ballots(&VoterId::new("V1")).await?;
    let rows: Vec<(Category, String, u32)> = ballots
        .into_iter()
        .map(|b| (b.category, b.candidate_id.into_inner(), b.weight))
        .collect();
    assert_eq!(
        rows,
        vec![
            (Category::Presiden, "presiden2".to_string(), 8),
            (Category::Parlemen, "parlemen2".to_string(), 3),
        ]
    );
    assert!(client.sync_client.get_voter_ballots(&VoterId::new("V2")).await?.is_empty());

    let candidates = client.sync_client.get_candidates().await?;
    assert_eq!(candidates, Candidate::default_roster());

    Ok(())
}

async fn start_server(port: u16, voters: Vec<Voter>) -> (Arc<InMemoryStore>, RpcServerShutdownHandle) {
    let logger = create_root_logger_for_stdout(format!("server-{}", port));
    let store = Arc::new(InMemoryStore::seeded(voters, Candidate::default_roster()).unwrap());
    let service = Arc::new(ElectionService::new(logger.clone(), store.clone()));

    let (handle, signal) = shutdown_signal();
    tokio::spawn(RpcServer::new(logger, service).run(addr(port), signal));
    sleep(Duration::from_millis(100)).await;

    (store, handle)
}

async fn create_client(port: u16) -> Result<(ElectionClient, TempDir), Box<dyn Error>> {
    let cache_dir = tempfile::tempdir()?;
    let config = SyncClientConfig {
        api_endpoint: endpoint(port),
        cache_directory: cache_dir.path().to_string_lossy().into_owned(),
        info_logger: create_root_logger_for_stdout(format!("client-{}", port)),
        options: SyncOptions {
            probe_timeout: Some(Duration::from_secs(1)),
            call_timeout: Some(Duration::from_secs(2)),
            ..SyncOptions::default()
        },
    };

    let client = ballot_sync::try_create_election_client(config).await?;
    Ok((client, cache_dir))
}

async fn wait_for(client: &ElectionClient, expected: Connectivity) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while client.sync_client.probe().await != expected {
        assert!(Instant::now() < deadline, "Timeout waiting for {}", expected);
        sleep(Duration::from_millis(50)).await;
    }
}

async fn wait_until_synced(client: &ElectionClient) {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let outbox = client.sync_client.outbox().unwrap();
        if outbox.iter().all(|e| e.state == SyncState::Synced) {
            return;
        }
        assert!(Instant::now() < deadline, "Timeout waiting for replay: {:?}", outbox);
        sleep(Duration::from_millis(50)).await;
    }
}

fn stored(store: &InMemoryStore, voter_id: &str) -> Vec<(String, u32)> {
    let mut rows: Vec<(String, u32)> = store
        .ballots()
        .unwrap()
        .into_iter()
        .filter(|b| b.voter_id.as_str() == voter_id)
        .map(|b| (b.candidate_id.into_inner(), b.weight))
        .collect();
    rows.sort();
    rows
}

fn voter(id: &str) -> Voter {
    Voter {
        id: VoterId::new(id),
        name: format!("Voter {}", id),
        login: id.to_lowercase(),
        credential: "secret".to_string(),
        allotted_weight: 20,
        status: VotingStatus::NotVoted,
        last_activity: None,
    }
}

fn addr(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

fn endpoint(port: u16) -> String {
    format!("http://127.0.0.1:{}", port)
}

fn create_root_logger_for_stdout(component: String) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).use_file_location().build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!("Node" => component))
}

async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
