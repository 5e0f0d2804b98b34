//! skinny serves a quorum lock over gRPC: the `skinnyd` daemon and the `skinnyctl` control tool.

#[macro_use]
extern crate quick_error;

#[macro_use]
extern crate slog;

mod errors;
pub use errors::*;

pub mod ctl;
pub mod server;
pub mod setup;

pub use ctl::Ctl;
pub use server::Server;
