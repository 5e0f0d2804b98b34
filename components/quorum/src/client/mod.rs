mod grpc_peer;
pub use grpc_peer::*;

#[cfg(test)]
mod test_grpc_peer;
