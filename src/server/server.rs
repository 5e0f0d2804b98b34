use std::net::SocketAddr;
use std::sync::Arc;

use slog::Logger;
use tokio::sync::oneshot::Sender;
use tokio::task::JoinHandle;

use quorum::conf::InstanceConf;
use quorum::proto::consensus::ConsensusServer;
use quorum::proto::control::ControlServer;
use quorum::proto::lock::LockServer;
use quorum::GrpcPeer;
use quorum::Instance;
use quorum::InstanceService;

use crate::ServerError;

/// Server runs one instance and serves its consensus, lock and control services on a single
/// gRPC listener.
pub struct Server {
    instance: Arc<Instance>,
    listen: SocketAddr,
    logger: Logger,
    stop_tx: Option<Sender<()>>,
    join_handle: Option<JoinHandle<Result<(), tonic::transport::Error>>>,
}

impl Server {
    /// new creates the instance described by `conf` and registers its peers.
    ///
    /// Peers are dialed on first use, so they do not have to be up yet.
    pub async fn new(conf: &InstanceConf, logger: &Logger) -> Result<Server, ServerError> {
        let listen = tokio::net::lookup_host(conf.listen.as_str())
            .await?
            .next()
            .ok_or_else(|| ServerError::BadListen(conf.listen.clone()))?;

        let instance = Arc::new(Instance::new(
            &conf.name,
            conf.increment,
            conf.timeout,
            logger,
        ));

        for p in conf.peers.iter() {
            let peer = GrpcPeer::new(&p.address);
            info!(logger, "peer"; "name" => &p.name, "uri" => peer.uri());
            instance.add_peer(&p.name, Arc::new(peer)).await?;
        }

        Ok(Server {
            instance,
            listen,
            logger: logger.new(o!("listen" => listen.to_string())),
            stop_tx: None,
            join_handle: None,
        })
    }

    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    pub fn listen(&self) -> SocketAddr {
        self.listen
    }

    /// start spawns the gRPC server. It returns at once; see `join`.
    pub fn start(&mut self) {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let svc = InstanceService::new(self.instance.clone());
        let router = tonic::transport::Server::builder()
            .add_service(ConsensusServer::new(svc.clone()))
            .add_service(LockServer::new(svc.clone()))
            .add_service(ControlServer::new(svc));

        let addr = self.listen;
        let logger = self.logger.clone();

        let j = tokio::spawn(async move {
            info!(logger, "serving");
            let rst = router
                .serve_with_shutdown(addr, async {
                    rx.await.ok();
                })
                .await;
            info!(logger, "server stopped"; "result" => ?rst);
            rst
        });

        self.join_handle = Some(j);
        self.stop_tx = Some(tx);
    }

    /// stop asks a started server to shut down gracefully.
    pub fn stop(&mut self) -> Result<(), ServerError> {
        let tx = self.stop_tx.take().ok_or(ServerError::NotStarted)?;
        tx.send(()).or(Err(ServerError::RxClosed))?;
        info!(self.logger, "stop signal sent");
        Ok(())
    }

    /// join waits for the server to exit, after a `stop` or a failure to serve.
    /// It can be canceled and called again.
    pub async fn join(&mut self) -> Result<(), ServerError> {
        let j = self.join_handle.as_mut().ok_or(ServerError::NotStarted)?;
        let rst = j.await;
        self.join_handle = None;
        rst??;
        Ok(())
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
