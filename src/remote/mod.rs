mod api;
mod grpc_api;

pub use api::ElectionApi;
pub use api::RemoteError;
pub use grpc_api::GrpcElectionApi;
pub use grpc_api::InvalidEndpoint;
