use crate::ballot::{BallotError, SubmitBallotInput, SubmitBallotOutput, VoterId};
use crate::grpc::grpc_election_server::{GrpcElection, GrpcElectionServer};
use crate::grpc::{
    proto_get_candidates_result, proto_get_election_status_result, proto_get_results_result,
    proto_get_statistics_result, proto_get_voter_ballots_result, proto_get_voters_result, proto_submit_ballot_result,
    proto_voter_exists_result, ProtoGetCandidatesReq, ProtoGetCandidatesResult, ProtoGetCandidatesSuccess,
    ProtoGetElectionStatusReq, ProtoGetElectionStatusResult, ProtoGetResultsReq, ProtoGetResultsResult,
    ProtoGetResultsSuccess, ProtoGetStatisticsReq, ProtoGetStatisticsResult, ProtoGetVoterBallotsReq,
    ProtoGetVoterBallotsResult, ProtoGetVoterBallotsSuccess, ProtoGetVotersReq, ProtoGetVotersResult,
    ProtoGetVotersSuccess, ProtoSubmitBallotReq, ProtoSubmitBallotResult, ProtoSubmitBallotSuccess,
    ProtoVoterExistsReq, ProtoVoterExistsResult, ProtoVoterExistsSuccess,
};
use crate::server::{ElectionService, RpcServerShutdownSignal};
use crate::wire;
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// RpcServer is the type that implements the Election gRPC interface.
pub struct RpcServer {
    logger: slog::Logger,
    service: Arc<ElectionService>,
}

impl RpcServer {
    pub fn new(logger: slog::Logger, service: Arc<ElectionService>) -> Self {
        RpcServer { logger, service }
    }

    pub async fn run(
        self,
        socket_addr: SocketAddr,
        shutdown_signal: RpcServerShutdownSignal,
    ) -> Result<(), tonic::transport::Error> {
        let logger = self.logger.clone();
        slog::info!(logger, "Listening on '{:?}'", socket_addr);

        let result = Server::builder()
            .add_service(GrpcElectionServer::new(self))
            .serve_with_shutdown(socket_addr, shutdown_signal)
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
        result
    }

    fn convert_submit_ballot_input(rpc_request: ProtoSubmitBallotReq) -> SubmitBallotInput {
        SubmitBallotInput {
            voter_id: rpc_request.voter_id,
            category: rpc_request.category,
            pairs: rpc_request
                .pairs
                .into_iter()
                .map(|p| (p.candidate_id, p.weight))
                .collect(),
        }
    }

    fn convert_submit_ballot_result(app_result: Result<SubmitBallotOutput, BallotError>) -> ProtoSubmitBallotResult {
        let result = match app_result {
            Ok(ok) => proto_submit_ballot_result::Result::Ok(ProtoSubmitBallotSuccess {
                inserted: ok.inserted,
                deleted: ok.deleted,
            }),
            Err(e) => proto_submit_ballot_result::Result::Err(wire::failure_from_error(&e)),
        };

        ProtoSubmitBallotResult { result: Some(result) }
    }

    fn handle_get_voters(&self) -> ProtoGetVotersResult {
        let result = match self.service.get_voters() {
            Ok(voters) => proto_get_voters_result::Result::Ok(ProtoGetVotersSuccess {
                voters: voters.into_iter().map(wire::voter_to_proto).collect(),
            }),
            Err(e) => proto_get_voters_result::Result::Err(wire::failure_from_error(&e)),
        };

        ProtoGetVotersResult { result: Some(result) }
    }

    fn handle_get_candidates(&self) -> ProtoGetCandidatesResult {
        let result = match self.service.get_candidates() {
            Ok(candidates) => proto_get_candidates_result::Result::Ok(ProtoGetCandidatesSuccess {
                candidates: candidates.into_iter().map(wire::candidate_to_proto).collect(),
            }),
            Err(e) => proto_get_candidates_result::Result::Err(wire::failure_from_error(&e)),
        };

        ProtoGetCandidatesResult { result: Some(result) }
    }

    fn handle_get_election_status(&self) -> ProtoGetElectionStatusResult {
        let result = match self.service.get_election_status() {
            Ok(status) => proto_get_election_status_result::Result::Ok(wire::status_to_proto(status)),
            Err(e) => proto_get_election_status_result::Result::Err(wire::failure_from_error(&e)),
        };

        ProtoGetElectionStatusResult { result: Some(result) }
    }

    fn handle_get_results(&self) -> ProtoGetResultsResult {
        let result = match self.service.get_results() {
            Ok(tallies) => proto_get_results_result::Result::Ok(ProtoGetResultsSuccess {
                tallies: tallies.into_iter().map(wire::tally_to_proto).collect(),
            }),
            Err(e) => proto_get_results_result::Result::Err(wire::failure_from_error(&e)),
        };

        ProtoGetResultsResult { result: Some(result) }
    }

    fn handle_get_statistics(&self) -> ProtoGetStatisticsResult {
        let result = match self.service.get_statistics() {
            Ok(statistics) => proto_get_statistics_result::Result::Ok(wire::statistics_to_proto(statistics)),
            Err(e) => proto_get_statistics_result::Result::Err(wire::failure_from_error(&e)),
        };

        ProtoGetStatisticsResult { result: Some(result) }
    }

    fn handle_voter_exists(&self, rpc_request: ProtoVoterExistsReq) -> Result<ProtoVoterExistsResult, Status> {
        if rpc_request.voter_id.is_empty() {
            return Err(Status::invalid_argument("VoterId is empty"));
        }

        let result = match self.service.voter_exists(&VoterId::new(rpc_request.voter_id)) {
            Ok(exists) => proto_voter_exists_result::Result::Ok(ProtoVoterExistsSuccess { exists }),
            Err(e) => proto_voter_exists_result::Result::Err(wire::failure_from_error(&e)),
        };

        Ok(ProtoVoterExistsResult { result: Some(result) })
    }

    fn handle_get_voter_ballots(&self, rpc_request: ProtoGetVoterBallotsReq) -> ProtoGetVoterBallotsResult {
        let result = match self.service.get_voter_ballots(&VoterId::new(rpc_request.voter_id)) {
            Ok(ballots) => proto_get_voter_ballots_result::Result::Ok(ProtoGetVoterBallotsSuccess {
                ballots: ballots.into_iter().map(wire::ballot_to_proto).collect(),
            }),
            Err(e) => proto_get_voter_ballots_result::Result::Err(wire::failure_from_error(&e)),
        };

        ProtoGetVoterBallotsResult { result: Some(result) }
    }
}

#[async_trait::async_trait]
impl GrpcElection for RpcServer {
    async fn get_voters(
        &self,
        _rpc_request_wrapped: Request<ProtoGetVotersReq>,
    ) -> Result<Response<ProtoGetVotersResult>, Status> {
        let rpc_result = self.handle_get_voters();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        Ok(Response::new(rpc_result))
    }

    async fn get_candidates(
        &self,
        _rpc_request_wrapped: Request<ProtoGetCandidatesReq>,
    ) -> Result<Response<ProtoGetCandidatesResult>, Status> {
        let rpc_result = self.handle_get_candidates();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        Ok(Response::new(rpc_result))
    }

    async fn get_election_status(
        &self,
        _rpc_request_wrapped: Request<ProtoGetElectionStatusReq>,
    ) -> Result<Response<ProtoGetElectionStatusResult>, Status> {
        let rpc_result = self.handle_get_election_status();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        Ok(Response::new(rpc_result))
    }

    async fn submit_ballot(
        &self,
        rpc_request_wrapped: Request<ProtoSubmitBallotReq>,
    ) -> Result<Response<ProtoSubmitBallotResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let app_input = Self::convert_submit_ballot_input(rpc_request);
        let app_result = self.service.submit_ballot(app_input);
        let rpc_result = Self::convert_submit_ballot_result(app_result);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        Ok(Response::new(rpc_result))
    }

    async fn get_results(
        &self,
        _rpc_request_wrapped: Request<ProtoGetResultsReq>,
    ) -> Result<Response<ProtoGetResultsResult>, Status> {
        let rpc_result = self.handle_get_results();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        Ok(Response::new(rpc_result))
    }

    async fn get_statistics(
        &self,
        _rpc_request_wrapped: Request<ProtoGetStatisticsReq>,
    ) -> Result<Response<ProtoGetStatisticsResult>, Status> {
        let rpc_result = self.handle_get_statistics();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        Ok(Response::new(rpc_result))
    }

    async fn voter_exists(
        &self,
        rpc_request_wrapped: Request<ProtoVoterExistsReq>,
    ) -> Result<Response<ProtoVoterExistsResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_voter_exists(rpc_request);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn get_voter_ballots(
        &self,
        rpc_request_wrapped: Request<ProtoGetVoterBallotsReq>,
    ) -> Result<Response<ProtoGetVoterBallotsResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_get_voter_ballots(rpc_request);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        Ok(Response::new(rpc_result))
    }
}
