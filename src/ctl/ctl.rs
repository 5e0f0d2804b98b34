use std::future::Future;

use futures::future::join_all;
use tokio::time::timeout;

use quorum::client::peer_uri;
use quorum::conf::ConfError;
use quorum::conf::Member;
use quorum::conf::QuorumConf;
use quorum::proto::control::ControlClient;
use quorum::proto::control::StatusRequest;
use quorum::proto::control::StatusResponse;
use quorum::proto::lock::AcquireRequest;
use quorum::proto::lock::AcquireResponse;
use quorum::proto::lock::LockClient;
use quorum::proto::lock::ReleaseRequest;
use quorum::proto::lock::ReleaseResponse;

use super::Board;
use crate::CtlError;

/// Ctl talks to the instances of a quorum on behalf of `skinnyctl`.
///
/// Every call, connecting included, is bounded by the quorum timeout.
pub struct Ctl {
    conf: QuorumConf,
}

impl Ctl {
    pub fn new(conf: QuorumConf) -> Ctl {
        Ctl { conf }
    }

    pub fn conf(&self) -> &QuorumConf {
        &self.conf
    }

    /// member returns the instance named `name`, or the first instance of the quorum if no name
    /// is given.
    pub fn member(&self, name: Option<&str>) -> Result<&Member, CtlError> {
        match name {
            Some(n) => self
                .conf
                .get(n)
                .ok_or_else(|| CtlError::UnknownInstance(n.to_string())),
            None => self
                .conf
                .default_instance()
                .ok_or(CtlError::Conf(ConfError::NoInstance)),
        }
    }

    pub async fn acquire(
        &self,
        instance: Option<&str>,
        holder: &str,
    ) -> Result<AcquireResponse, CtlError> {
        let uri = peer_uri(&self.member(instance)?.address);
        let req = AcquireRequest {
            holder: holder.to_string(),
        };

        self.bounded(async move {
            let mut client = LockClient::connect(uri).await?;
            let resp = client.acquire(req).await?;
            Ok::<_, CtlError>(resp.into_inner())
        })
        .await
    }

    pub async fn release(&self, instance: Option<&str>) -> Result<ReleaseResponse, CtlError> {
        let uri = peer_uri(&self.member(instance)?.address);

        self.bounded(async move {
            let mut client = LockClient::connect(uri).await?;
            let resp = client.release(ReleaseRequest {}).await?;
            Ok::<_, CtlError>(resp.into_inner())
        })
        .await
    }

    pub async fn status_of(&self, member: &Member) -> Result<StatusResponse, CtlError> {
        let uri = peer_uri(&member.address);

        self.bounded(async move {
            let mut client = ControlClient::connect(uri).await?;
            let resp = client.status(StatusRequest {}).await?;
            Ok::<_, CtlError>(resp.into_inner())
        })
        .await
    }

    /// poll asks every instance for its status at once and records the answers on `board`.
    pub async fn poll(&self, board: &mut Board) {
        let instances = &self.conf.instances;
        let results = join_all(instances.iter().map(|m| self.status_of(m))).await;

        let now = chrono::Local::now();
        for (m, rst) in instances.iter().zip(results) {
            board.update(&m.name, rst, now);
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, CtlError>
    where
        F: Future<Output = Result<T, CtlError>>,
    {
        timeout(self.conf.timeout, fut).await?
    }
}
