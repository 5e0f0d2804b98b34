use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::instance::Instance;
use crate::proto::consensus::CommitRequest;
use crate::proto::consensus::CommitResponse;
use crate::proto::consensus::Consensus;
use crate::proto::consensus::PromiseRequest;
use crate::proto::consensus::PromiseResponse;
use crate::proto::control::Control;
use crate::proto::control::StatusRequest;
use crate::proto::control::StatusResponse;
use crate::proto::lock::AcquireRequest;
use crate::proto::lock::AcquireResponse;
use crate::proto::lock::Lock;
use crate::proto::lock::ReleaseRequest;
use crate::proto::lock::ReleaseResponse;

/// InstanceService dispatches the consensus, lock and control RPCs into an `Instance`.
/// Domain outcomes are always an `Ok` reply.
#[derive(Clone)]
pub struct InstanceService {
    instance: Arc<Instance>,
}

impl InstanceService {
    pub fn new(instance: Arc<Instance>) -> Self {
        InstanceService { instance }
    }
}

#[tonic::async_trait]
impl Consensus for InstanceService {
    async fn promise(
        &self,
        request: Request<PromiseRequest>,
    ) -> Result<Response<PromiseResponse>, Status> {
        let reply = self.instance.handle_promise(request.get_ref()).await;
        Ok(Response::new(reply))
    }

    async fn commit(
        &self,
        request: Request<CommitRequest>,
    ) -> Result<Response<CommitResponse>, Status> {
        let reply = self.instance.handle_commit(request.get_ref()).await;
        Ok(Response::new(reply))
    }
}

#[tonic::async_trait]
impl Lock for InstanceService {
    async fn acquire(
        &self,
        request: Request<AcquireRequest>,
    ) -> Result<Response<AcquireResponse>, Status> {
        let reply = self.instance.acquire(&request.get_ref().holder).await;
        Ok(Response::new(reply))
    }

    async fn release(
        &self,
        _request: Request<ReleaseRequest>,
    ) -> Result<Response<ReleaseResponse>, Status> {
        let reply = self.instance.release().await;
        Ok(Response::new(reply))
    }
}

#[tonic::async_trait]
impl Control for InstanceService {
    async fn status(
        &self,
        _request: Request<StatusRequest>,
    ) -> Result<Response<StatusResponse>, Status> {
        let reply = self.instance.status().await;
        Ok(Response::new(reply))
    }
}
