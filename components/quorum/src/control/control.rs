use crate::instance::Instance;
use crate::proto::control::status_response::Peer;
use crate::proto::control::StatusResponse;

impl Instance {
    /// status reports the current state without touching it.
    pub async fn status(&self) -> StatusResponse {
        let st = self.state.read().await;

        StatusResponse {
            name: self.name.clone(),
            increment: self.increment,
            timeout: format!("{:?}", self.timeout),
            promised: st.promised,
            id: st.id,
            holder: st.holder.clone(),
            peers: st
                .peers
                .iter()
                .map(|p| Peer {
                    name: p.name.clone(),
                })
                .collect(),
        }
    }
}
