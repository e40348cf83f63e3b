use crate::cache::{CacheError, FileKeyValueStore, KeyValueStore, LocalCache};
use crate::client::options::{SyncOptions, SyncOptionsValidated};
use crate::client::remote_gateway::RemoteGateway;
use crate::client::replay_trigger::ReplayTrigger;
use crate::client::sync_client::SyncClient;
use crate::connectivity::{ConnectivityListener, ConnectivityMonitor, ProbeTimerHandle};
use crate::remote::{ElectionApi, GrpcElectionApi, InvalidEndpoint};
use std::convert::TryFrom;
use std::sync::Arc;

pub struct SyncClientConfig {
    /// e.g. "http://127.0.0.1:50051"
    pub api_endpoint: String,
    // A directory where the local cache keeps one file per key.
    pub cache_directory: String,
    pub info_logger: slog::Logger,
    pub options: SyncOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientCreationError {
    #[error("Invalid API endpoint")]
    InvalidEndpoint(InvalidEndpoint),
    #[error("Illegal options for configuring client: {0}")]
    IllegalClientOptions(String),
    #[error("Cache initialization failure")]
    CacheInitialization(CacheError),
}

/// ElectionClient is everything an application needs from this library on the voting side.
pub struct ElectionClient {
    pub sync_client: Arc<SyncClient>,
    /// Observes Online/Offline transitions, e.g. to show a banner.
    pub connectivity: ConnectivityListener,
    _probe_timer: ProbeTimerHandle,
}

pub async fn try_create_election_client(config: SyncClientConfig) -> Result<ElectionClient, ClientCreationError> {
    let root_logger = config.info_logger;

    let options = SyncOptionsValidated::try_from(config.options)
        .map_err(|e| ClientCreationError::IllegalClientOptions(e.to_string()))?;

    let kv_store =
        FileKeyValueStore::open(&config.cache_directory).map_err(ClientCreationError::CacheInitialization)?;

    let api = GrpcElectionApi::new(
        root_logger.new(slog::o!("Component" => "GrpcElectionApi")),
        &config.api_endpoint,
    )
    .map_err(ClientCreationError::InvalidEndpoint)?;

    Ok(create_election_client_with(root_logger, Arc::new(api), Arc::new(kv_store), options).await)
}

/// Wires the client around any transport and key-value store, then runs the startup probe.
pub(crate) async fn create_election_client_with(
    root_logger: slog::Logger,
    api: Arc<dyn ElectionApi>,
    kv_store: Arc<dyn KeyValueStore>,
    options: SyncOptionsValidated,
) -> ElectionClient {
    let monitor = Arc::new(ConnectivityMonitor::new(
        root_logger.new(slog::o!("Component" => "ConnectivityMonitor")),
        api.clone(),
        options.probe_timeout,
    ));
    let gateway = Arc::new(RemoteGateway::new(
        root_logger.new(slog::o!("Component" => "RemoteGateway")),
        api,
        monitor.clone(),
        options.call_timeout,
    ));
    let cache = Arc::new(LocalCache::new(
        root_logger.new(slog::o!("Component" => "LocalCache")),
        kv_store,
        options.outbox_capacity,
    ));
    let sync_client = Arc::new(SyncClient::new(
        root_logger.new(slog::o!("Component" => "SyncClient")),
        gateway,
        cache,
    ));

    ReplayTrigger::spawn(
        root_logger.new(slog::o!("Component" => "ReplayTrigger")),
        monitor.subscribe(),
        &sync_client,
    );
    let probe_timer =
        ProbeTimerHandle::spawn_timer_task(options.probe_min_interval, options.probe_max_interval, &monitor);

    let initial = monitor.probe().await;
    slog::info!(root_logger, "Election client started, initially {}", initial);

    ElectionClient {
        sync_client,
        connectivity: monitor.subscribe(),
        _probe_timer: probe_timer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::{BallotSubmission, Category, SubmitBallotInput, VoterId};
    use crate::cache::{InMemoryKeyValueStore, SyncState};
    use crate::client::Delivery;
    use crate::connectivity::Connectivity;
    use crate::store::ElectionStore;
    use crate::test_utils::{discard_logger, voter, with_sanity_timeout, ToggleableApi};
    use chrono::Utc;
    use tokio::time::Duration;

    fn all_synced(client: &SyncClient) -> bool {
        client
            .outbox()
            .unwrap()
            .iter()
            .all(|e| e.state == SyncState::Synced)
    }

    async fn wait_for_sync(client: &SyncClient) {
        with_sanity_timeout(async {
            while !all_synced(client) {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
    }

    #[tokio::test]
    async fn reconnect_replays_the_outbox() {
        let api = ToggleableApi::new(vec![voter("V2", 20)]);
        api.set_reachable(false);
        let client = create_election_client_with(
            discard_logger(),
            api.clone(),
            Arc::new(InMemoryKeyValueStore::new()),
            SyncOptionsValidated::default(),
        )
        .await;
        assert_eq!(client.connectivity.current(), Connectivity::Offline);

        let receipt = client
            .sync_client
            .submit_ballot(SubmitBallotInput::new("V2", "pm", &[("pm1", 6)]))
            .await
            .unwrap();
        assert!(matches!(receipt.delivery, Delivery::Queued { .. }));

        api.set_reachable(true);
        assert_eq!(client.sync_client.probe().await, Connectivity::Online);

        wait_for_sync(&client.sync_client).await;
        assert_eq!(api.submit_calls(), 1);
    }

    async fn online_client(api: &Arc<ToggleableApi>) -> ElectionClient {
        let client = create_election_client_with(
            discard_logger(),
            api.clone(),
            Arc::new(InMemoryKeyValueStore::new()),
            SyncOptionsValidated::default(),
        )
        .await;
        assert_eq!(client.connectivity.current(), Connectivity::Online);
        client
    }

    #[tokio::test]
    async fn server_fault_on_submit_is_replayed_after_the_next_healthy_check() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = online_client(&api).await;
        api.store().set_fail_commits(true);

        let receipt = client
            .sync_client
            .submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm1", 4)]))
            .await
            .unwrap();
        assert!(matches!(receipt.delivery, Delivery::Queued { .. }));
        assert!(!client.sync_client.is_online());

        api.store().set_fail_commits(false);
        assert_eq!(client.sync_client.probe().await, Connectivity::Online);

        wait_for_sync(&client.sync_client).await;
        assert_eq!(api.store().ballots().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replay_deferred_by_a_server_fault_runs_again() {
        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        api.set_reachable(false);
        let client = create_election_client_with(
            discard_logger(),
            api.clone(),
            Arc::new(InMemoryKeyValueStore::new()),
            SyncOptionsValidated::default(),
        )
        .await;
        client
            .sync_client
            .submit_ballot(SubmitBallotInput::new("V1", "pm", &[("pm2", 3)]))
            .await
            .unwrap();

        api.store().set_fail_commits(true);
        api.set_reachable(true);
        client.sync_client.probe().await;
        with_sanity_timeout(async {
            while api.submit_calls() == 0 || client.sync_client.is_online() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(!all_synced(&client.sync_client));

        api.store().set_fail_commits(false);
        assert_eq!(client.sync_client.probe().await, Connectivity::Online);

        wait_for_sync(&client.sync_client).await;
        assert_eq!(api.submit_calls(), 2);
    }

    #[tokio::test]
    async fn startup_resumes_a_persisted_outbox() {
        let directory = tempfile::tempdir().unwrap();
        {
            let store = Arc::new(FileKeyValueStore::open(directory.path()).unwrap());
            let cache = LocalCache::new(discard_logger(), store, 10);
            let submission = BallotSubmission {
                voter_id: VoterId::new("V1"),
                category: Category::Parlemen,
                pairs: vec![crate::ballot::BallotPair::new("parlemen2", 10)],
            };
            cache
                .append_outbox(submission, SyncState::Pending, None, Utc::now())
                .unwrap();
        }

        let api = ToggleableApi::new(vec![voter("V1", 20)]);
        let client = create_election_client_with(
            discard_logger(),
            api.clone(),
            Arc::new(FileKeyValueStore::open(directory.path()).unwrap()),
            SyncOptionsValidated::default(),
        )
        .await;

        wait_for_sync(&client.sync_client).await;
        assert_eq!(api.submit_calls(), 1);
    }

    #[tokio::test]
    async fn illegal_options_are_refused() {
        let directory = tempfile::tempdir().unwrap();
        let config = SyncClientConfig {
            api_endpoint: "http://127.0.0.1:1".to_string(),
            cache_directory: directory.path().to_string_lossy().into_owned(),
            info_logger: discard_logger(),
            options: SyncOptions {
                outbox_capacity: Some(0),
                ..SyncOptions::default()
            },
        };

        let result = try_create_election_client(config).await;

        assert!(matches!(result, Err(ClientCreationError::IllegalClientOptions(_))));
    }
}
