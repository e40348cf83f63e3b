mod election_service;
mod server;
mod shutdown;

pub use election_service::ElectionService;
pub use server::RpcServer;
pub use shutdown::shutdown_signal;
pub use shutdown::RpcServerShutdownHandle;
pub use shutdown::RpcServerShutdownSignal;
