#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoFailure {
    #[prost(enumeration = "ProtoFailureKind", tag = "1")]
    pub kind: i32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoVoter {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub login: ::prost::alloc::string::String,
    #[prost(uint32, tag = "4")]
    pub allotted_weight: u32,
    #[prost(bool, tag = "5")]
    pub has_voted: bool,
    /// Unix millis. 0 means never active.
    #[prost(int64, tag = "6")]
    pub last_activity_ms: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCandidate {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub category: ::prost::alloc::string::String,
    #[prost(uint32, tag = "4")]
    pub position: u32,
    #[prost(string, tag = "5")]
    pub media: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoBallotPair {
    #[prost(string, tag = "1")]
    pub candidate_id: ::prost::alloc::string::String,
    #[prost(int64, tag = "2")]
    pub weight: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoBallot {
    #[prost(string, tag = "1")]
    pub voter_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub candidate_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub category: ::prost::alloc::string::String,
    #[prost(uint32, tag = "4")]
    pub weight: u32,
    /// Unix millis.
    #[prost(int64, tag = "5")]
    pub cast_at_ms: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCandidateTally {
    #[prost(string, tag = "1")]
    pub candidate_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub candidate_name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub category: ::prost::alloc::string::String,
    #[prost(uint32, tag = "4")]
    pub position: u32,
    #[prost(uint64, tag = "5")]
    pub total_weight: u64,
}
// ------- GetVoters --------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetVotersReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetVotersSuccess {
    #[prost(message, repeated, tag = "1")]
    pub voters: ::prost::alloc::vec::Vec<ProtoVoter>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetVotersResult {
    #[prost(oneof = "proto_get_voters_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_get_voters_result::Result>,
}
/// Nested message and enum types in `ProtoGetVotersResult`.
pub mod proto_get_voters_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoGetVotersSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoFailure),
    }
}
// ------- GetCandidates --------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetCandidatesReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetCandidatesSuccess {
    #[prost(message, repeated, tag = "1")]
    pub candidates: ::prost::alloc::vec::Vec<ProtoCandidate>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetCandidatesResult {
    #[prost(oneof = "proto_get_candidates_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_get_candidates_result::Result>,
}
/// Nested message and enum types in `ProtoGetCandidatesResult`.
pub mod proto_get_candidates_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoGetCandidatesSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoFailure),
    }
}
// ------- GetElectionStatus --------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetElectionStatusReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetElectionStatusSuccess {
    /// One of "stopped", "running", "ended".
    #[prost(string, tag = "1")]
    pub phase: ::prost::alloc::string::String,
    #[prost(int64, tag = "2")]
    pub started_at_ms: i64,
    #[prost(int64, tag = "3")]
    pub ended_at_ms: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetElectionStatusResult {
    #[prost(oneof = "proto_get_election_status_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_get_election_status_result::Result>,
}
/// Nested message and enum types in `ProtoGetElectionStatusResult`.
pub mod proto_get_election_status_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoGetElectionStatusSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoFailure),
    }
}
// ------- SubmitBallot --------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSubmitBallotReq {
    #[prost(string, tag = "1")]
    pub voter_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub category: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub pairs: ::prost::alloc::vec::Vec<ProtoBallotPair>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSubmitBallotSuccess {
    #[prost(uint32, tag = "1")]
    pub inserted: u32,
    #[prost(uint32, tag = "2")]
    pub deleted: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSubmitBallotResult {
    #[prost(oneof = "proto_submit_ballot_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_submit_ballot_result::Result>,
}
/// Nested message and enum types in `ProtoSubmitBallotResult`.
pub mod proto_submit_ballot_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoSubmitBallotSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoFailure),
    }
}
// ------- GetResults --------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetResultsReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetResultsSuccess {
    #[prost(message, repeated, tag = "1")]
    pub tallies: ::prost::alloc::vec::Vec<ProtoCandidateTally>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetResultsResult {
    #[prost(oneof = "proto_get_results_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_get_results_result::Result>,
}
/// Nested message and enum types in `ProtoGetResultsResult`.
pub mod proto_get_results_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoGetResultsSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoFailure),
    }
}
// ------- GetStatistics --------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetStatisticsReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetStatisticsSuccess {
    #[prost(uint32, tag = "1")]
    pub total_voters: u32,
    #[prost(uint32, tag = "2")]
    pub voted_voters: u32,
    #[prost(uint64, tag = "3")]
    pub total_weight: u64,
    #[prost(uint32, tag = "4")]
    pub participation_rate: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetStatisticsResult {
    #[prost(oneof = "proto_get_statistics_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_get_statistics_result::Result>,
}
/// Nested message and enum types in `ProtoGetStatisticsResult`.
pub mod proto_get_statistics_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoGetStatisticsSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoFailure),
    }
}
// ------- VoterExists --------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoVoterExistsReq {
    #[prost(string, tag = "1")]
    pub voter_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoVoterExistsSuccess {
    #[prost(bool, tag = "1")]
    pub exists: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoVoterExistsResult {
    #[prost(oneof = "proto_voter_exists_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_voter_exists_result::Result>,
}
/// Nested message and enum types in `ProtoVoterExistsResult`.
pub mod proto_voter_exists_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoVoterExistsSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoFailure),
    }
}
// ------- GetVoterBallots --------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetVoterBallotsReq {
    #[prost(string, tag = "1")]
    pub voter_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetVoterBallotsSuccess {
    #[prost(message, repeated, tag = "1")]
    pub ballots: ::prost::alloc::vec::Vec<ProtoBallot>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetVoterBallotsResult {
    #[prost(oneof = "proto_get_voter_ballots_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_get_voter_ballots_result::Result>,
}
/// Nested message and enum types in `ProtoGetVoterBallotsResult`.
pub mod proto_get_voter_ballots_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoGetVoterBallotsSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoFailure),
    }
}
// ------- Shared --------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoFailureKind {
    ServerFault = 0,
    InvalidInput = 1,
    NotFound = 2,
    Forbidden = 3,
    CorruptRecord = 4,
    ConstraintViolation = 5,
}
#[doc = r" Generated client implementations."]
pub mod grpc_election_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Every RPC answers with a `result` oneof: `ok` carries the data, `err` carries a typed"]
    #[doc = " failure with a human readable message."]
    pub struct GrpcElectionClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcElectionClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcElectionClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn get_voters(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetVotersReq>,
        ) -> Result<tonic::Response<super::ProtoGetVotersResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/election.GrpcElection/GetVoters");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_candidates(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetCandidatesReq>,
        ) -> Result<tonic::Response<super::ProtoGetCandidatesResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/election.GrpcElection/GetCandidates");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_election_status(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetElectionStatusReq>,
        ) -> Result<tonic::Response<super::ProtoGetElectionStatusResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path =
                http::uri::PathAndQuery::from_static("/election.GrpcElection/GetElectionStatus");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn submit_ballot(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoSubmitBallotReq>,
        ) -> Result<tonic::Response<super::ProtoSubmitBallotResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/election.GrpcElection/SubmitBallot");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_results(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetResultsReq>,
        ) -> Result<tonic::Response<super::ProtoGetResultsResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/election.GrpcElection/GetResults");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_statistics(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetStatisticsReq>,
        ) -> Result<tonic::Response<super::ProtoGetStatisticsResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/election.GrpcElection/GetStatistics");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn voter_exists(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoVoterExistsReq>,
        ) -> Result<tonic::Response<super::ProtoVoterExistsResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/election.GrpcElection/VoterExists");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_voter_ballots(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetVoterBallotsReq>,
        ) -> Result<tonic::Response<super::ProtoGetVoterBallotsResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path =
                http::uri::PathAndQuery::from_static("/election.GrpcElection/GetVoterBallots");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcElectionClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcElectionClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcElectionClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_election_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcElectionServer."]
    #[async_trait]
    pub trait GrpcElection: Send + Sync + 'static {
        async fn get_voters(
            &self,
            request: tonic::Request<super::ProtoGetVotersReq>,
        ) -> Result<tonic::Response<super::ProtoGetVotersResult>, tonic::Status>;
        async fn get_candidates(
            &self,
            request: tonic::Request<super::ProtoGetCandidatesReq>,
        ) -> Result<tonic::Response<super::ProtoGetCandidatesResult>, tonic::Status>;
        async fn get_election_status(
            &self,
            request: tonic::Request<super::ProtoGetElectionStatusReq>,
        ) -> Result<tonic::Response<super::ProtoGetElectionStatusResult>, tonic::Status>;
        async fn submit_ballot(
            &self,
            request: tonic::Request<super::ProtoSubmitBallotReq>,
        ) -> Result<tonic::Response<super::ProtoSubmitBallotResult>, tonic::Status>;
        async fn get_results(
            &self,
            request: tonic::Request<super::ProtoGetResultsReq>,
        ) -> Result<tonic::Response<super::ProtoGetResultsResult>, tonic::Status>;
        async fn get_statistics(
            &self,
            request: tonic::Request<super::ProtoGetStatisticsReq>,
        ) -> Result<tonic::Response<super::ProtoGetStatisticsResult>, tonic::Status>;
        async fn voter_exists(
            &self,
            request: tonic::Request<super::ProtoVoterExistsReq>,
        ) -> Result<tonic::Response<super::ProtoVoterExistsResult>, tonic::Status>;
        async fn get_voter_ballots(
            &self,
            request: tonic::Request<super::ProtoGetVoterBallotsReq>,
        ) -> Result<tonic::Response<super::ProtoGetVoterBallotsResult>, tonic::Status>;
    }
    #[doc = " Every RPC answers with a `result` oneof: `ok` carries the data, `err` carries a typed"]
    #[doc = " failure with a human readable message."]
    #[derive(Debug)]
    pub struct GrpcElectionServer<T: GrpcElection> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcElection> GrpcElectionServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcElectionServer<T>
    where
        T: GrpcElection,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/election.GrpcElection/GetVoters" => {
                    #[allow(non_camel_case_types)]
                    struct GetVotersSvc<T: GrpcElection>(pub Arc<T>);
                    impl<T: GrpcElection> tonic::server::UnaryService<super::ProtoGetVotersReq> for GetVotersSvc<T> {
                        type Response = super::ProtoGetVotersResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetVotersReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_voters(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetVotersSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/election.GrpcElection/GetCandidates" => {
                    #[allow(non_camel_case_types)]
                    struct GetCandidatesSvc<T: GrpcElection>(pub Arc<T>);
                    impl<T: GrpcElection> tonic::server::UnaryService<super::ProtoGetCandidatesReq>
                        for GetCandidatesSvc<T>
                    {
                        type Response = super::ProtoGetCandidatesResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetCandidatesReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_candidates(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetCandidatesSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/election.GrpcElection/GetElectionStatus" => {
                    #[allow(non_camel_case_types)]
                    struct GetElectionStatusSvc<T: GrpcElection>(pub Arc<T>);
                    impl<T: GrpcElection>
                        tonic::server::UnaryService<super::ProtoGetElectionStatusReq>
                        for GetElectionStatusSvc<T>
                    {
                        type Response = super::ProtoGetElectionStatusResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetElectionStatusReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_election_status(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetElectionStatusSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/election.GrpcElection/SubmitBallot" => {
                    #[allow(non_camel_case_types)]
                    struct SubmitBallotSvc<T: GrpcElection>(pub Arc<T>);
                    impl<T: GrpcElection> tonic::server::UnaryService<super::ProtoSubmitBallotReq>
                        for SubmitBallotSvc<T>
                    {
                        type Response = super::ProtoSubmitBallotResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoSubmitBallotReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).submit_ballot(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = SubmitBallotSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/election.GrpcElection/GetResults" => {
                    #[allow(non_camel_case_types)]
                    struct GetResultsSvc<T: GrpcElection>(pub Arc<T>);
                    impl<T: GrpcElection> tonic::server::UnaryService<super::ProtoGetResultsReq> for GetResultsSvc<T> {
                        type Response = super::ProtoGetResultsResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetResultsReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_results(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetResultsSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/election.GrpcElection/GetStatistics" => {
                    #[allow(non_camel_case_types)]
                    struct GetStatisticsSvc<T: GrpcElection>(pub Arc<T>);
                    impl<T: GrpcElection> tonic::server::UnaryService<super::ProtoGetStatisticsReq>
                        for GetStatisticsSvc<T>
                    {
                        type Response = super::ProtoGetStatisticsResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetStatisticsReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_statistics(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetStatisticsSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/election.GrpcElection/VoterExists" => {
                    #[allow(non_camel_case_types)]
                    struct VoterExistsSvc<T: GrpcElection>(pub Arc<T>);
                    impl<T: GrpcElection> tonic::server::UnaryService<super::ProtoVoterExistsReq>
                        for VoterExistsSvc<T>
                    {
                        type Response = super::ProtoVoterExistsResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoVoterExistsReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).voter_exists(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = VoterExistsSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/election.GrpcElection/GetVoterBallots" => {
                    #[allow(non_camel_case_types)]
                    struct GetVoterBallotsSvc<T: GrpcElection>(pub Arc<T>);
                    impl<T: GrpcElection>
                        tonic::server::UnaryService<super::ProtoGetVoterBallotsReq>
                        for GetVoterBallotsSvc<T>
                    {
                        type Response = super::ProtoGetVoterBallotsResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetVoterBallotsReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_voter_ballots(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetVoterBallotsSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcElection> Clone for GrpcElectionServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcElection> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcElection> tonic::transport::NamedService for GrpcElectionServer<T> {
        const NAME: &'static str = "election.GrpcElection";
    }
}
