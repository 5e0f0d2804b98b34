use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::timeout_at;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::instance::Instance;
use crate::instance::State;
use crate::proto::consensus::CommitRequest;
use crate::proto::consensus::PromiseRequest;
use crate::RpcError;

/// PromiseVote is what a peer said to a proposal. A failed request is a nay without a learned
/// value.
#[derive(Debug, Default)]
struct PromiseVote {
    from: String,
    promised: bool,
    id: u64,
    holder: String,
}

#[derive(Debug, Default)]
struct CommitVote {
    from: String,
    committed: bool,
}

/// within bounds an RPC by the round deadline.
async fn within<T, F>(deadline: Instant, fut: F) -> Result<T, RpcError>
where
    F: Future<Output = Result<T, RpcError>>,
{
    timeout_at(deadline, fut).await?
}

impl Instance {
    /// propose asks the quorum to promise a new round and learns the previously committed value
    /// from the replies.
    ///
    /// The caller must hold `state` exclusively; `st` is that guarded state.
    /// Returns true if a majority promised.
    pub(crate) async fn propose(&self, st: &mut State) -> bool {
        st.promised += self.increment;
        let round = st.promised;

        let deadline = Instant::now() + self.timeout;
        let token = CancellationToken::new();
        let _cancel_on_return = token.clone().drop_guard();

        let (tx, mut rx) = mpsc::unbounded_channel::<PromiseVote>();

        for p in st.peers.iter() {
            let peer = p.clone();
            let tx = tx.clone();
            let token = token.clone();
            let logger = self.logger.clone();

            tokio::spawn(async move {
                let req = PromiseRequest { id: round };
                debug!(logger, "propose: sent"; "id" => round, "peer" => &peer.name);

                let rst = tokio::select! {
                    _ = token.cancelled() => {
                        debug!(logger, "propose: canceled"; "id" => round, "peer" => &peer.name);
                        return;
                    }
                    r = within(deadline, peer.client.promise(req, deadline)) => r,
                };

                let vote = match rst {
                    Ok(resp) => PromiseVote {
                        from: peer.name,
                        promised: resp.promised,
                        id: resp.id,
                        holder: resp.holder,
                    },
                    Err(e) => {
                        // Only a cancel by this round itself is not a vote.
                        debug!(logger, "propose: failed";
                            "id" => round, "peer" => &peer.name, "err" => %e);
                        PromiseVote {
                            from: peer.name,
                            ..Default::default()
                        }
                    }
                };

                // The receiver outlives every sender unless the proposal is dropped mid-way.
                let _ = tx.send(vote);
            });
        }
        drop(tx);

        let mut yea = 1;
        let mut nay = 0;
        let mut canceled = false;

        while let Some(v) = rx.recv().await {
            if v.promised {
                yea += 1;
                debug!(self.logger, "propose: got yea"; "id" => round, "peer" => &v.from);
            } else {
                nay += 1;
                debug!(self.logger, "propose: got nay"; "id" => round, "peer" => &v.from);
            }

            if v.id > st.id {
                info!(self.logger, "propose: learned";
                    "id" => round, "peer" => &v.from,
                    "learned_id" => v.id, "holder" => &v.holder);
                st.id = v.id;
                st.holder = v.holder;
            }

            if !canceled && (st.is_majority(yea) || st.is_majority(nay)) {
                token.cancel();
                canceled = true;
            }
        }

        if st.id > st.promised {
            st.promised = st.id;
            info!(self.logger, "jumped to promise"; "id" => st.promised);
        }

        let won = st.is_majority(yea);
        info!(self.logger, "propose: done";
            "id" => round, "yea" => yea, "nay" => nay, "won" => won);
        won
    }

    /// commit asks the quorum to accept `holder` under round `id`.
    ///
    /// The value is applied locally no matter how the peers vote. Returns true if a majority,
    /// this instance included, accepted it.
    ///
    /// The caller must hold `state` exclusively; `st` is that guarded state.
    pub(crate) async fn commit(&self, st: &mut State, id: u64, holder: &str) -> bool {
        info!(self.logger, "committing"; "id" => id, "holder" => holder);

        let deadline = Instant::now() + self.timeout;
        let token = CancellationToken::new();
        let _cancel_on_return = token.clone().drop_guard();

        let (tx, mut rx) = mpsc::unbounded_channel::<CommitVote>();

        for p in st.peers.iter() {
            let peer = p.clone();
            let tx = tx.clone();
            let token = token.clone();
            let logger = self.logger.clone();
            let req = CommitRequest {
                id,
                holder: holder.to_string(),
            };

            tokio::spawn(async move {
                debug!(logger, "commit: sent"; "id" => id, "peer" => &peer.name);

                let rst = tokio::select! {
                    _ = token.cancelled() => return,
                    r = within(deadline, peer.client.commit(req, deadline)) => r,
                };

                let committed = match rst {
                    Ok(resp) => resp.committed,
                    Err(RpcError::DeadlineExceeded) => {
                        debug!(logger, "commit: deadline exceeded"; "id" => id, "peer" => &peer.name);
                        return;
                    }
                    Err(e) => {
                        debug!(logger, "commit: failed";
                            "id" => id, "peer" => &peer.name, "err" => %e);
                        false
                    }
                };

                let _ = tx.send(CommitVote {
                    from: peer.name,
                    committed,
                });
            });
        }
        drop(tx);

        st.id = id;
        st.holder = holder.to_string();

        let mut yea = 1;
        while let Some(v) = rx.recv().await {
            if v.committed {
                yea += 1;
                debug!(self.logger, "commit: got yea"; "id" => id, "peer" => &v.from);
            } else {
                debug!(self.logger, "commit: got nay"; "id" => id, "peer" => &v.from);
            }
        }

        let accepted = st.is_majority(yea);
        info!(self.logger, "commit: done"; "id" => id, "yea" => yea, "accepted" => accepted);
        accepted
    }
}
