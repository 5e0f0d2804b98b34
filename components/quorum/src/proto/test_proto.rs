use prost::Message;

use super::consensus::PromiseResponse;
use super::control::status_response::Peer;
use super::control::StatusResponse;

#[test]
fn test_empty_promise_response_defaults() {
    let resp = PromiseResponse::decode(&[][..]).unwrap();
    assert_eq!(false, resp.promised);
    assert_eq!(0, resp.id);
    assert_eq!("", resp.holder);
}

#[test]
fn test_status_response_peers_keep_order() {
    let st = StatusResponse {
        name: "london".into(),
        peers: vec![
            Peer {
                name: "oregon".into(),
            },
            Peer {
                name: "tokyo".into(),
            },
        ],
        ..Default::default()
    };

    let mut byts = vec![];
    st.encode(&mut byts).unwrap();
    let got = StatusResponse::decode(byts.as_slice()).unwrap();

    let names: Vec<&str> = got.peers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(vec!["oregon", "tokyo"], names);
}
