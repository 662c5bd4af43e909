//! Boundary structures survive a JSON transport.

#![cfg(feature = "serde")]

use engine::{DiffRequest, FileState, Properties, ReassembleRequest};
use matching::SameChunk;

#[test]
fn properties_cross_json_and_still_match() {
    let target = FileState::with_data(64, (0..1000u32).map(|i| i as u8).collect::<Vec<_>>());
    let json = serde_json::to_string(&target.properties()).expect("serialize");
    let props: Properties = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(props, target.properties());

    let source = FileState::with_data(64, target.data());
    assert!(source.match_against(&props).expect("valid").is_identical());
}

#[test]
fn requests_and_responses_round_trip() {
    let target = FileState::with_data(64, vec![5u8; 300]);
    let request: DiffRequest =
        serde_json::from_str(&serde_json::to_string(&DiffRequest(vec![0, 4])).expect("serialize"))
            .expect("deserialize");
    assert_eq!(request.orders(), [0, 4]);

    let response = target.diff_chunks(&request);
    let reassemble = ReassembleRequest {
        block_length: response.block_length,
        same_chunks: vec![SameChunk::new(0, 1)],
        diff_chunks: response.diff_chunks,
    };
    let json = serde_json::to_string(&reassemble).expect("serialize");
    let back: ReassembleRequest = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, reassemble);
}
