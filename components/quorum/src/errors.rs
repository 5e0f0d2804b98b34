quick_error! {
    /// QuorumError is returned when the membership of an instance can not be changed.
    #[derive(Debug, Eq, PartialEq)]
    pub enum QuorumError {
        /// The peer name or the peer client is already registered.
        DuplicatePeer(name: String) {
            display("duplicate peer: {}", name)
        }
    }
}

quick_error! {
    /// RpcError is a failure to get a reply from a peer.
    /// It never reaches a lock client: the consensus core folds it into a vote.
    #[derive(Debug)]
    pub enum RpcError {
        Transport(e: tonic::transport::Error) {
            from(e: tonic::transport::Error) -> (e)
            display("transport: {}", e)
        }

        Status(s: tonic::Status) {
            from(s: tonic::Status) -> (s)
            display("status: {}", s)
        }

        DeadlineExceeded {
            from(tokio::time::error::Elapsed)
            display("deadline exceeded")
        }

        /// The peer refused to take any request, e.g. it is down.
        Unavailable(peer: String) {
            display("peer {} unavailable", peer)
        }
    }
}
