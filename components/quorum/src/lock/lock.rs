use std::time::Duration;

use rand::Rng;
use tokio::sync::RwLockWriteGuard;

use crate::instance::Instance;
use crate::instance::State;
use crate::proto::lock::AcquireResponse;
use crate::proto::lock::ReleaseResponse;

/// MAX_RETRIES is how many more rounds are tried after a lost proposal.
pub const MAX_RETRIES: u32 = 3;

/// backoff returns how long to wait before the `retry`-th retry: a step that grows with the
/// retry count plus up to 1ms of jitter, so that competing proposers drift apart.
pub fn backoff(retry: u32) -> Duration {
    let base = Duration::from_millis(2 * retry as u64);
    let jitter = Duration::from_micros(rand::thread_rng().gen_range(0, 1000));
    base + jitter
}

impl Instance {
    /// acquire tries to grant the lock to `holder`.
    ///
    /// If the lock is taken the current holder is committed again, so a lost acquisition still
    /// moves the quorum to the latest round. The response always carries the holder this
    /// instance ended up with.
    pub async fn acquire(&self, holder: &str) -> AcquireResponse {
        let _proposing = self.proposing.lock().await;
        info!(self.logger, "client: acquire lock"; "holder" => holder);

        let st = self
            .run_rounds(|st| {
                if st.holder.is_empty() {
                    holder.to_string()
                } else {
                    st.holder.clone()
                }
            })
            .await;

        AcquireResponse {
            acquired: st.holder == holder,
            holder: st.holder.clone(),
        }
    }

    /// release tries to clear the lock, whoever holds it.
    pub async fn release(&self) -> ReleaseResponse {
        let _proposing = self.proposing.lock().await;
        info!(self.logger, "client: release lock");

        let st = self.run_rounds(|_| String::new()).await;

        ReleaseResponse {
            released: st.holder.is_empty(),
        }
    }

    /// run_rounds proposes until a round is won or the retries are used up, and commits the
    /// value `choose` picks from the state after a won proposal.
    ///
    /// The state lock is given up while backing off, so peers' proposals are answered in the
    /// meantime. It returns the state still locked, so the caller reads what this round left.
    async fn run_rounds<F>(&self, choose: F) -> RwLockWriteGuard<'_, State>
    where
        F: Fn(&State) -> String,
    {
        let mut st = self.state.write().await;

        for retry in 0..=MAX_RETRIES {
            if retry > 0 {
                drop(st);

                let wait = backoff(retry);
                info!(self.logger, "waiting before retry"; "retry" => retry, "wait" => ?wait);
                tokio::time::sleep(wait).await;

                st = self.state.write().await;
                info!(self.logger, "retry"; "retry" => retry);
            }

            if self.propose(&mut st).await {
                let value = choose(&st);
                let round = st.promised;
                self.commit(&mut st, round, &value).await;
                return st;
            }
        }

        info!(self.logger, "gave up"; "retries" => MAX_RETRIES);
        st
    }
}
