//! In-process quorums for tests: instances reach each other by calling the handlers directly,
//! with latency and failure injectable per instance.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use slog::Logger;
use tokio::time::Instant;

use crate::instance::Instance;
use crate::instance::PeerClient;
use crate::proto::consensus::CommitRequest;
use crate::proto::consensus::CommitResponse;
use crate::proto::consensus::PromiseRequest;
use crate::proto::consensus::PromiseResponse;
use crate::RpcError;

pub fn discard_logger() -> Logger {
    Logger::root(slog::Discard, o!())
}

/// LocalPeer is a `PeerClient` calling an in-process `Instance`.
///
/// Every request is delayed by `latency` before it reaches the instance; a request whose delay
/// runs past the deadline never arrives. When `fail` is set, requests fail at once.
pub struct LocalPeer {
    pub instance: Arc<Instance>,
    latency_ms: AtomicU64,
    fail: AtomicBool,
}

impl LocalPeer {
    pub fn new(instance: Arc<Instance>) -> Arc<LocalPeer> {
        Arc::new(LocalPeer {
            instance,
            latency_ms: AtomicU64::new(0),
            fail: AtomicBool::new(false),
        })
    }

    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    async fn transmit(&self, deadline: Instant) -> Result<(), RpcError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RpcError::Unavailable(self.instance.name().to_string()));
        }

        let latency = Duration::from_millis(self.latency_ms.load(Ordering::SeqCst));
        if latency > Duration::from_millis(0) {
            tokio::time::timeout_at(deadline, tokio::time::sleep(latency)).await?;
        }
        Ok(())
    }
}

#[tonic::async_trait]
impl PeerClient for LocalPeer {
    async fn promise(
        &self,
        req: PromiseRequest,
        deadline: Instant,
    ) -> Result<PromiseResponse, RpcError> {
        self.transmit(deadline).await?;
        Ok(self.instance.handle_promise(&req).await)
    }

    async fn commit(
        &self,
        req: CommitRequest,
        deadline: Instant,
    ) -> Result<CommitResponse, RpcError> {
        self.transmit(deadline).await?;
        Ok(self.instance.handle_commit(&req).await)
    }
}

/// DeadPeer never answers.
pub struct DeadPeer {
    pub name: String,
}

impl DeadPeer {
    pub fn new(name: &str) -> Arc<DeadPeer> {
        Arc::new(DeadPeer {
            name: name.to_string(),
        })
    }
}

#[tonic::async_trait]
impl PeerClient for DeadPeer {
    async fn promise(&self, _: PromiseRequest, _: Instant) -> Result<PromiseResponse, RpcError> {
        Err(RpcError::Unavailable(self.name.clone()))
    }

    async fn commit(&self, _: CommitRequest, _: Instant) -> Result<CommitResponse, RpcError> {
        Err(RpcError::Unavailable(self.name.clone()))
    }
}

/// TestQuorum is a fully meshed in-process quorum.
///
/// Instance `i` (0-based) is named `instance-{i+1}` and uses increment `i+1`.
/// `links[i]` is the single client every other instance uses to reach instance `i`, so latency
/// or failure set on it applies to all requests sent to `i`.
pub struct TestQuorum {
    pub instances: Vec<Arc<Instance>>,
    pub links: Vec<Arc<LocalPeer>>,
}

impl TestQuorum {
    pub async fn new(n: usize, timeout: Duration) -> TestQuorum {
        let logger = discard_logger();

        let mut instances = Vec::with_capacity(n);
        let mut links = Vec::with_capacity(n);
        for i in 0..n {
            let name = format!("instance-{}", i + 1);
            let inst = Arc::new(Instance::new(&name, (i + 1) as u64, timeout, &logger));
            links.push(LocalPeer::new(inst.clone()));
            instances.push(inst);
        }

        for (i, inst) in instances.iter().enumerate() {
            for (j, link) in links.iter().enumerate() {
                if i == j {
                    continue;
                }
                let client: Arc<dyn PeerClient> = link.clone();
                inst.add_peer(link.instance.name(), client).await.unwrap();
            }
        }

        TestQuorum { instances, links }
    }

    /// agreeing counts the instances whose promised round, committed round and holder all equal
    /// the given ones.
    pub async fn agreeing(&self, promised: u64, id: u64, holder: &str) -> usize {
        let mut n = 0;
        for inst in self.instances.iter() {
            let st = inst.status().await;
            if st.promised == promised && st.id == id && st.holder == holder {
                n += 1;
            }
        }
        n
    }
}
