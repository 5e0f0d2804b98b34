use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use crate::instance::Instance;
use crate::instance::PeerClient;
use crate::proto::control::status_response::Peer;
use crate::proto::control::StatusResponse;
use crate::testutil::{discard_logger, DeadPeer};

#[tokio::test]
async fn test_status() {
    let inst = Instance::new("foo", 3, Duration::from_secs(1), &discard_logger());
    for name in vec!["bar", "baz"] {
        let client: Arc<dyn PeerClient> = DeadPeer::new(name);
        inst.add_peer(name, client).await.unwrap();
    }
    {
        let mut st = inst.state.write().await;
        st.promised = 9;
        st.id = 6;
        st.holder = "beaver".into();
    }

    let want = StatusResponse {
        name: "foo".into(),
        increment: 3,
        timeout: "1s".into(),
        promised: 9,
        id: 6,
        holder: "beaver".into(),
        peers: vec![Peer { name: "bar".into() }, Peer { name: "baz".into() }],
    };
    assert_eq!(want, inst.status().await);
}

#[tokio::test]
async fn test_status_timeout_format() {
    let cases = vec![
        (Duration::from_millis(200), "200ms"),
        (Duration::from_secs(2), "2s"),
        (Duration::from_millis(1500), "1.5s"),
    ];

    for (timeout, want) in cases {
        let inst = Instance::new("foo", 1, timeout, &discard_logger());
        assert_eq!(want, inst.status().await.timeout);
    }
}
