use crate::ballot::{
    Ballot, Candidate, ElectionStatus, SubmitBallotInput, SubmitBallotOutput, VoterId, VoterProfile,
};
use crate::grpc::grpc_election_client::GrpcElectionClient;
use crate::grpc::{
    proto_get_candidates_result, proto_get_election_status_result, proto_get_results_result,
    proto_get_statistics_result, proto_get_voter_ballots_result, proto_get_voters_result, proto_submit_ballot_result,
    proto_voter_exists_result, ProtoBallotPair, ProtoGetCandidatesReq, ProtoGetElectionStatusReq, ProtoGetResultsReq,
    ProtoGetStatisticsReq, ProtoGetVoterBallotsReq, ProtoGetVotersReq, ProtoSubmitBallotReq, ProtoVoterExistsReq,
};
use crate::remote::{ElectionApi, RemoteError};
use crate::tally::{CandidateTally, ElectionStatistics};
use crate::wire;
use tokio::sync::Mutex;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};

#[derive(Debug, thiserror::Error)]
#[error("invalid api endpoint '{url}': {reason}")]
pub struct InvalidEndpoint {
    pub url: String,
    pub reason: String,
}

/// GrpcElectionApi talks to an election server over gRPC.
///
/// The connection is opened on first use and dropped on any transport failure, so a server
/// that comes back is picked up by the next call.
pub struct GrpcElectionApi {
    logger: slog::Logger,
    url: String,
    endpoint: Endpoint,
    client: Mutex<Option<GrpcElectionClient<Channel>>>,
}

impl GrpcElectionApi {
    pub fn new(logger: slog::Logger, url: &str) -> Result<Self, InvalidEndpoint> {
        let endpoint = Endpoint::from_shared(url.to_string()).map_err(|e| InvalidEndpoint {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(GrpcElectionApi {
            logger,
            url: url.to_string(),
            endpoint,
            client: Mutex::new(None),
        })
    }

    async fn connected_client(&self) -> Result<GrpcElectionClient<Channel>, RemoteError> {
        let mut cached = self.client.lock().await;
        if let Some(client) = cached.as_ref() {
            return Ok(client.clone());
        }

        slog::debug!(self.logger, "Connecting to {} ...", self.url);
        let channel = self
            .endpoint
            .connect()
            .await
            .map_err(|e| RemoteError::Unreachable(e.to_string()))?;
        let client = GrpcElectionClient::new(channel);
        cached.replace(client.clone());

        Ok(client)
    }

    /// Maps a failed call, forgetting the connection when the failure is on the transport.
    async fn call_failed(&self, status: Status) -> RemoteError {
        let error = match status.code() {
            Code::Unavailable | Code::Unknown | Code::Cancelled | Code::DeadlineExceeded => {
                RemoteError::Unreachable(status.message().to_string())
            }
            _ => RemoteError::ServerFault(format!("{:?}: {}", status.code(), status.message())),
        };
        if error.is_transport() {
            self.client.lock().await.take();
        }
        slog::debug!(self.logger, "ClientWire - {:?}", error);

        error
    }

    fn missing_result() -> RemoteError {
        RemoteError::MalformedResponse("response carries neither ok nor err".into())
    }
}

#[async_trait::async_trait]
impl ElectionApi for GrpcElectionApi {
    async fn get_voters(&self) -> Result<Vec<VoterProfile>, RemoteError> {
        let mut client = self.connected_client().await?;
        let reply = match client.get_voters(ProtoGetVotersReq {}).await {
            Ok(response) => response.into_inner(),
            Err(status) => return Err(self.call_failed(status).await),
        };

        match reply.result {
            Some(proto_get_voters_result::Result::Ok(ok)) => {
                Ok(ok.voters.into_iter().map(wire::voter_from_proto).collect())
            }
            Some(proto_get_voters_result::Result::Err(failure)) => Err(wire::error_from_failure(failure)),
            None => Err(Self::missing_result()),
        }
    }

    async fn get_candidates(&self) -> Result<Vec<Candidate>, RemoteError> {
        let mut client = self.connected_client().await?;
        let reply = match client.get_candidates(ProtoGetCandidatesReq {}).await {
            Ok(response) => response.into_inner(),
            Err(status) => return Err(self.call_failed(status).await),
        };

        match reply.result {
            Some(proto_get_candidates_result::Result::Ok(ok)) => {
                ok.candidates.into_iter().map(wire::candidate_from_proto).collect()
            }
            Some(proto_get_candidates_result::Result::Err(failure)) => Err(wire::error_from_failure(failure)),
            None => Err(Self::missing_result()),
        }
    }

    async fn get_election_status(&self) -> Result<ElectionStatus, RemoteError> {
        let mut client = self.connected_client().await?;
        let reply = match client.get_election_status(ProtoGetElectionStatusReq {}).await {
            Ok(response) => response.into_inner(),
            Err(status) => return Err(self.call_failed(status).await),
        };

        match reply.result {
            Some(proto_get_election_status_result::Result::Ok(ok)) => wire::status_from_proto(ok),
            Some(proto_get_election_status_result::Result::Err(failure)) => Err(wire::error_from_failure(failure)),
            None => Err(Self::missing_result()),
        }
    }

    async fn submit_ballot(&self, input: SubmitBallotInput) -> Result<SubmitBallotOutput, RemoteError> {
        let rpc_request = ProtoSubmitBallotReq {
            voter_id: input.voter_id,
            category: input.category,
            pairs: input
                .pairs
                .into_iter()
                .map(|(candidate_id, weight)| ProtoBallotPair { candidate_id, weight })
                .collect(),
        };
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_request);

        let mut client = self.connected_client().await?;
        let reply = match client.submit_ballot(rpc_request).await {
            Ok(response) => response.into_inner(),
            Err(status) => return Err(self.call_failed(status).await),
        };
        slog::debug!(self.logger, "ClientWire - {:?}", reply);

        match reply.result {
            Some(proto_submit_ballot_result::Result::Ok(ok)) => Ok(SubmitBallotOutput {
                inserted: ok.inserted,
                deleted: ok.deleted,
            }),
            Some(proto_submit_ballot_result::Result::Err(failure)) => Err(wire::error_from_failure(failure)),
            None => Err(Self::missing_result()),
        }
    }

    async fn get_results(&self) -> Result<Vec<CandidateTally>, RemoteError> {
        let mut client = self.connected_client().await?;
        let reply = match client.get_results(ProtoGetResultsReq {}).await {
            Ok(response) => response.into_inner(),
            Err(status) => return Err(self.call_failed(status).await),
        };

        match reply.result {
            Some(proto_get_results_result::Result::Ok(ok)) => {
                ok.tallies.into_iter().map(wire::tally_from_proto).collect()
            }
            Some(proto_get_results_result::Result::Err(failure)) => Err(wire::error_from_failure(failure)),
            None => Err(Self::missing_result()),
        }
    }

    async fn get_statistics(&self) -> Result<ElectionStatistics, RemoteError> {
        let mut client = self.connected_client().await?;
        let reply = match client.get_statistics(ProtoGetStatisticsReq {}).await {
            Ok(response) => response.into_inner(),
            Err(status) => return Err(self.call_failed(status).await),
        };

        match reply.result {
            Some(proto_get_statistics_result::Result::Ok(ok)) => wire::statistics_from_proto(ok),
            Some(proto_get_statistics_result::Result::Err(failure)) => Err(wire::error_from_failure(failure)),
            None => Err(Self::missing_result()),
        }
    }

    async fn voter_exists(&self, voter_id: &VoterId) -> Result<bool, RemoteError> {
        let rpc_request = ProtoVoterExistsReq {
            voter_id: voter_id.to_string(),
        };

        let mut client = self.connected_client().await?;
        let reply = match client.voter_exists(rpc_request).await {
            Ok(response) => response.into_inner(),
            Err(status) => return Err(self.call_failed(status).await),
        };

        match reply.result {
            Some(proto_voter_exists_result::Result::Ok(ok)) => Ok(ok.exists),
            Some(proto_voter_exists_result::Result::Err(failure)) => Err(wire::error_from_failure(failure)),
            None => Err(Self::missing_result()),
        }
    }

    async fn get_voter_ballots(&self, voter_id: &VoterId) -> Result<Vec<Ballot>, RemoteError> {
        let rpc_request = ProtoGetVoterBallotsReq {
            voter_id: voter_id.to_string(),
        };

        let mut client = self.connected_client().await?;
        let reply = match client.get_voter_ballots(rpc_request).await {
            Ok(response) => response.into_inner(),
            Err(status) => return Err(self.call_failed(status).await),
        };
        slog::debug!(self.logger, "ClientWire - {:?}", reply);

        match reply.result {
            Some(proto_get_voter_ballots_result::Result::Ok(ok)) => {
                ok.ballots.into_iter().map(wire::ballot_from_proto).collect()
            }
            Some(proto_get_voter_ballots_result::Result::Err(failure)) => Err(wire::error_from_failure(failure)),
            None => Err(Self::missing_result()),
        }
    }
}
