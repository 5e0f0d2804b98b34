use std::io;

use quorum::conf::ConfError;
use quorum::QuorumError;

quick_error! {
    /// ServerError is a failure to bring up or shut down a skinny daemon.
    #[derive(Debug)]
    pub enum ServerError {
        Conf(e: ConfError) {
            from(e: ConfError) -> (e)
            display("load config: {}", e)
        }

        Quorum(e: QuorumError) {
            from(e: QuorumError) -> (e)
            display("add peer: {}", e)
        }

        /// The listen address does not resolve to any socket address.
        BadListen(addr: String) {
            display("can not listen on {}", addr)
        }

        IO(e: io::Error) {
            from(e: io::Error) -> (e)
            display("io: {}", e)
        }

        Transport(e: tonic::transport::Error) {
            from(e: tonic::transport::Error) -> (e)
            display("serve: {}", e)
        }

        Join(e: tokio::task::JoinError) {
            from(e: tokio::task::JoinError) -> (e)
            display("server task: {}", e)
        }

        RxClosed {
            display("server already stopped")
        }

        NotStarted {
            display("server not started")
        }
    }
}

quick_error! {
    /// CtlError is a failure of a `skinnyctl` command to reach an instance.
    #[derive(Debug)]
    pub enum CtlError {
        Conf(e: ConfError) {
            from(e: ConfError) -> (e)
            display("load config: {}", e)
        }

        UnknownInstance(name: String) {
            display("unknown instance: {}", name)
        }

        Transport(e: tonic::transport::Error) {
            from(e: tonic::transport::Error) -> (e)
            display("dial: {}", e)
        }

        Status(s: tonic::Status) {
            from(s: tonic::Status) -> (s)
            display("error: {}", s)
        }

        DeadlineExceeded {
            from(tokio::time::error::Elapsed)
            display("deadline exceeded")
        }

        IO(e: io::Error) {
            from(e: io::Error) -> (e)
            display("io: {}", e)
        }
    }
}
