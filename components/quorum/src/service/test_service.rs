use std::sync::Arc;
use std::time::Duration;

use tonic::Request;

use super::*;
use crate::instance::Instance;
use crate::proto::consensus::{CommitRequest, Consensus, PromiseRequest};
use crate::proto::control::{Control, StatusRequest};
use crate::proto::lock::{AcquireRequest, Lock, ReleaseRequest};
use crate::testutil;

fn new_service() -> InstanceService {
    let logger = testutil::discard_logger();
    InstanceService::new(Arc::new(Instance::new(
        "lonely",
        1,
        Duration::from_millis(100),
        &logger,
    )))
}

#[tokio::test]
async fn test_service_lock_and_status() {
    let svc = new_service();

    let resp = Lock::acquire(
        &svc,
        Request::new(AcquireRequest {
            holder: "beaver".into(),
        }),
    )
    .await
    .unwrap()
    .into_inner();
    assert!(resp.acquired);
    assert_eq!("beaver", resp.holder);

    let st = Control::status(&svc, Request::new(StatusRequest {}))
        .await
        .unwrap()
        .into_inner();
    assert_eq!("lonely", st.name);
    assert_eq!("beaver", st.holder);
    assert_eq!(1, st.id);

    let resp = Lock::release(&svc, Request::new(ReleaseRequest {}))
        .await
        .unwrap()
        .into_inner();
    assert!(resp.released);
}

#[tokio::test]
async fn test_service_consensus() {
    let svc = new_service();

    let resp = Consensus::promise(&svc, Request::new(PromiseRequest { id: 7 }))
        .await
        .unwrap()
        .into_inner();
    assert!(resp.promised);

    let resp = Consensus::commit(
        &svc,
        Request::new(CommitRequest {
            id: 3,
            holder: "alien".into(),
        }),
    )
    .await
    .unwrap()
    .into_inner();
    assert!(!resp.committed, "round 3 is below the promised 7");

    let resp = Consensus::commit(
        &svc,
        Request::new(CommitRequest {
            id: 7,
            holder: "alien".into(),
        }),
    )
    .await
    .unwrap()
    .into_inner();
    assert!(resp.committed);
}
