use tokio::sync::Mutex;
use tokio::time::Instant;
use tonic::transport::Channel;
use tonic::Request;

use crate::instance::PeerClient;
use crate::proto::consensus::CommitRequest;
use crate::proto::consensus::CommitResponse;
use crate::proto::consensus::ConsensusClient;
use crate::proto::consensus::PromiseRequest;
use crate::proto::consensus::PromiseResponse;
use crate::RpcError;

/// GrpcPeer reaches a peer's `consensus.Consensus` service.
///
/// The connection is made on first use and reused afterwards, so peers that are not up yet when
/// this instance starts are not an error.
pub struct GrpcPeer {
    uri: String,
    client: Mutex<Option<ConsensusClient<Channel>>>,
}

impl GrpcPeer {
    /// new creates a client for `addr`, either a `host:port` pair or a full uri.
    pub fn new(addr: &str) -> GrpcPeer {
        GrpcPeer {
            uri: peer_uri(addr),
            client: Mutex::new(None),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    async fn client(&self) -> Result<ConsensusClient<Channel>, RpcError> {
        let mut c = self.client.lock().await;
        if let Some(client) = c.as_ref() {
            return Ok(client.clone());
        }

        let client = ConsensusClient::connect(self.uri.clone()).await?;
        *c = Some(client.clone());
        Ok(client)
    }
}

/// peer_uri prefixes an `http://` scheme unless `addr` already has one.
pub fn peer_uri(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("http://{}", addr)
    }
}

/// with_deadline turns `deadline` into a grpc-timeout so the peer stops working on a request
/// nobody waits for any more.
fn with_deadline<T>(msg: T, deadline: Instant) -> Request<T> {
    let mut request = Request::new(msg);
    request.set_timeout(deadline.saturating_duration_since(Instant::now()));
    request
}

#[tonic::async_trait]
impl PeerClient for GrpcPeer {
    async fn promise(
        &self,
        req: PromiseRequest,
        deadline: Instant,
    ) -> Result<PromiseResponse, RpcError> {
        let mut client = self.client().await?;
        let resp = client.promise(with_deadline(req, deadline)).await?;
        Ok(resp.into_inner())
    }

    async fn commit(
        &self,
        req: CommitRequest,
        deadline: Instant,
    ) -> Result<CommitResponse, RpcError> {
        let mut client = self.client().await?;
        let resp = client.commit(with_deadline(req, deadline)).await?;
        Ok(resp.into_inner())
    }
}
