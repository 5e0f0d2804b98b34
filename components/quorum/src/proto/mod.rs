//! Protobuf messages and tonic services of the three RPC groups an instance
//! serves.

pub mod consensus {
    include!(concat!(env!("OUT_DIR"), "/consensus.rs"));

    pub use consensus_client::ConsensusClient;
    pub use consensus_server::{Consensus, ConsensusServer};
}

pub mod lock {
    include!(concat!(env!("OUT_DIR"), "/lock.rs"));

    pub use lock_client::LockClient;
    pub use lock_server::{Lock, LockServer};
}

pub mod control {
    include!(concat!(env!("OUT_DIR"), "/control.rs"));

    pub use control_client::ControlClient;
    pub use control_server::{Control, ControlServer};
}

#[cfg(test)]
mod test_proto;
