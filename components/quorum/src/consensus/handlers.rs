use crate::instance::Instance;
use crate::proto::consensus::CommitRequest;
use crate::proto::consensus::CommitResponse;
use crate::proto::consensus::PromiseRequest;
use crate::proto::consensus::PromiseResponse;

impl Instance {
    /// handle_promise answers a peer's proposal for round `req.id`.
    ///
    /// The reply carries the last committed id and holder, if any, so that the proposer can
    /// learn it.
    pub async fn handle_promise(&self, req: &PromiseRequest) -> PromiseResponse {
        let mut st = self.state.write().await;

        let mut resp = PromiseResponse::default();
        if st.id > 0 {
            resp.id = st.id;
            resp.holder = st.holder.clone();
        }

        if req.id > st.promised {
            st.promised = req.id;
            resp.promised = true;
            info!(self.logger, "promised";
                "id" => req.id, "committed_id" => resp.id, "holder" => &resp.holder);
        } else {
            info!(self.logger, "did not promise";
                "id" => req.id, "promised" => st.promised,
                "committed_id" => resp.id, "holder" => &resp.holder);
        }

        resp
    }

    /// handle_commit accepts a value unless a higher round was promised meanwhile.
    pub async fn handle_commit(&self, req: &CommitRequest) -> CommitResponse {
        let mut st = self.state.write().await;

        if req.id < st.promised {
            info!(self.logger, "did not commit";
                "id" => req.id, "holder" => &req.holder, "promised" => st.promised);
            return CommitResponse { committed: false };
        }

        st.id = req.id;
        st.holder = req.holder.clone();
        info!(self.logger, "committed"; "id" => st.id, "holder" => &st.holder);

        CommitResponse {
            committed: req.id == st.id,
        }
    }
}
