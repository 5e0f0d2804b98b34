use std::sync::Arc;
use std::time::Duration;

use slog::Logger;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

use super::Peer;
use super::PeerClient;
use crate::QuorumError;

/// State is everything about an instance that changes at runtime.
/// It is only ever touched through `Instance::state`.
#[derive(Debug, Default)]
pub struct State {
    /// The highest round this instance promised not to go below.
    pub(crate) promised: u64,

    /// The round of the last committed value.
    pub(crate) id: u64,

    /// The lock holder agreed on in round `id`. Empty means unlocked.
    pub(crate) holder: String,

    pub(crate) peers: Vec<Peer>,
}

impl State {
    /// is_majority returns true if `n` votes are more than half of the quorum, i.e. all peers
    /// plus this instance.
    pub fn is_majority(&self, n: usize) -> bool {
        n > (self.peers.len() + 1) / 2
    }

    pub fn promised(&self) -> u64 {
        self.promised
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }
}

/// Instance is one member of a quorum that manages a single lock.
///
/// `state` is read-locked for status reports only. Proposals, commits and the consensus RPC
/// handlers hold it exclusively for their whole run, including while waiting on peers.
/// `proposing` serializes Acquire and Release on this instance, so there is at most one
/// propose/commit cycle in flight.
pub struct Instance {
    pub(crate) name: String,
    pub(crate) increment: u64,
    pub(crate) timeout: Duration,
    pub(crate) state: RwLock<State>,
    pub(crate) proposing: Mutex<()>,
    pub(crate) logger: Logger,
}

impl Instance {
    /// new creates an instance with nothing promised, nothing committed and no peers.
    ///
    /// `increment` is the step this instance raises its round number by; instances of one quorum
    /// should use distinct increments so that their rounds rarely collide.
    pub fn new(name: &str, increment: u64, timeout: Duration, logger: &Logger) -> Instance {
        let logger = logger.new(o!("instance" => name.to_string()));
        info!(logger, "initialized";
            "increment" => increment,
            "timeout" => ?timeout);

        Instance {
            name: name.to_string(),
            increment,
            timeout,
            state: RwLock::new(State::default()),
            proposing: Mutex::new(()),
            logger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// add_peer registers a peer. It must be called before the instance serves any traffic.
    pub async fn add_peer(
        &self,
        name: &str,
        client: Arc<dyn PeerClient>,
    ) -> Result<(), QuorumError> {
        let mut st = self.state.write().await;

        for p in st.peers.iter() {
            if p.name == name || p.same_client(&client) {
                return Err(QuorumError::DuplicatePeer(name.to_string()));
            }
        }

        st.peers.push(Peer {
            name: name.to_string(),
            client,
        });
        info!(self.logger, "added peer"; "peer" => name);

        Ok(())
    }
}
