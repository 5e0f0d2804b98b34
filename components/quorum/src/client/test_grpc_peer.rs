use std::time::Duration;

use tokio::time::Instant;

use super::*;
use crate::instance::PeerClient;
use crate::proto::consensus::PromiseRequest;

#[test]
fn test_peer_uri() {
    let cases = vec![
        ("127.0.0.1:9000", "http://127.0.0.1:9000"),
        ("oregon.skinny.example:9000", "http://oregon.skinny.example:9000"),
        ("http://127.0.0.1:9000", "http://127.0.0.1:9000"),
        ("https://tokyo:443", "https://tokyo:443"),
    ];

    for (addr, want) in cases {
        assert_eq!(want, peer_uri(addr), "addr: {}", addr);
    }
}

#[tokio::test]
async fn test_unreachable_peer_fails_before_deadline() {
    // Port 1 is privileged and nothing listens there in a test environment.
    let p = GrpcPeer::new("127.0.0.1:1");
    let deadline = Instant::now() + Duration::from_secs(5);

    let rst = p.promise(PromiseRequest { id: 1 }, deadline).await;
    assert!(rst.is_err());
    assert!(Instant::now() < deadline);
}
