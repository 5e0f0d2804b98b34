//! A distributed lock managed by a quorum of instances agreeing on a single value with a
//! simplified Paxos.

#[macro_use]
extern crate quick_error;

#[macro_use]
extern crate slog;

mod errors;
pub use errors::*;

pub mod client;
pub mod conf;
pub mod consensus;
pub mod control;
pub mod instance;
pub mod lock;
pub mod proto;
pub mod service;
pub mod testutil;

pub use client::GrpcPeer;
pub use instance::Instance;
pub use instance::Peer;
pub use instance::PeerClient;
pub use instance::State;
pub use service::InstanceService;
