use std::sync::Arc;

use tokio::time::Instant;

use crate::proto::consensus::CommitRequest;
use crate::proto::consensus::CommitResponse;
use crate::proto::consensus::PromiseRequest;
use crate::proto::consensus::PromiseResponse;
use crate::RpcError;

/// PeerClient is the capability an instance uses to run the two consensus phases on one of its
/// peers. An implementation must give up no later than `deadline`.
///
/// The daemon reaches its peers with `GrpcPeer`; tests plug in-process peers.
#[tonic::async_trait]
pub trait PeerClient: Send + Sync {
    async fn promise(
        &self,
        req: PromiseRequest,
        deadline: Instant,
    ) -> Result<PromiseResponse, RpcError>;

    async fn commit(
        &self,
        req: CommitRequest,
        deadline: Instant,
    ) -> Result<CommitResponse, RpcError>;
}

/// Peer is a named remote instance in the quorum.
#[derive(Clone)]
pub struct Peer {
    pub name: String,
    pub client: Arc<dyn PeerClient>,
}

impl Peer {
    /// same_client tells if two peers share one client handle.
    /// Only the data pointer is compared, vtable pointers of one type may differ between codegen
    /// units.
    pub fn same_client(&self, client: &Arc<dyn PeerClient>) -> bool {
        Arc::as_ptr(&self.client) as *const () == Arc::as_ptr(client) as *const ()
    }
}

impl std::fmt::Debug for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Peer").field("name", &self.name).finish()
    }
}
