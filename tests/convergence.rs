//! Whole-pipeline convergence through the facade.

mod common;

use blocksync::{
    DiffRequest, FileState, MatchResult, NegotiationState, ReassembleRequest, Session,
    SessionOptions, StrongChecksum, synchronize,
};
use common::{Edit, edit, random_content};
use proptest::prelude::*;

#[test]
fn insertions_deletions_and_overwrites_converge() {
    let base = random_content(1, 64 * 1024);
    for (seed, kind) in [(2, Edit::Insert), (3, Edit::Delete), (4, Edit::Overwrite)] {
        let edited = edit(seed, &base, kind, 12);
        let target = FileState::with_data(512, edited.clone());
        let source = FileState::with_data(512, base.clone());

        let report = synchronize(&source, &target).expect("converges");
        assert!(report.verified, "{kind:?}");
        assert_eq!(source.data(), edited, "{kind:?}");
        assert_eq!(source.properties(), target.properties(), "{kind:?}");
        assert!(report.stats.blocks_matched > report.stats.blocks_transferred);
    }
}

#[test]
fn append_only_target_transfers_only_the_tail() {
    let base = random_content(5, 10 * 256);
    let mut appended = base.clone();
    appended.extend(random_content(6, 300));

    let target = FileState::with_data(256, appended.clone());
    let source = FileState::with_data(256, base);
    let report = synchronize(&source, &target).expect("converges");

    assert_eq!(report.stats.blocks_matched, 10);
    assert_eq!(report.stats.blocks_transferred, 2);
    assert_eq!(report.stats.transferred_bytes, 300);
    assert_eq!(source.data(), appended);
}

#[test]
fn second_session_is_identical() {
    let target = FileState::with_data(256, random_content(7, 5000));
    let source = FileState::with_data(256, random_content(8, 4000));

    let first = synchronize(&source, &target).expect("converges");
    assert!(!first.stats.identical);
    let second = synchronize(&source, &target).expect("converges");
    assert!(second.stats.identical);
    assert_eq!(second.stats.transferred_bytes, 0);
}

#[test]
fn reversed_roles_converge_back() {
    let original = random_content(9, 20_000);
    let edited = edit(10, &original, Edit::Insert, 4);
    let a = FileState::with_data(256, original.clone());
    let b = FileState::with_data(256, edited.clone());

    synchronize(&a, &b).expect("a follows b");
    assert_eq!(a.data(), edited);

    b.set_data(original.clone(), true);
    synchronize(&a, &b).expect("a follows b again");
    assert_eq!(a.data(), original);
}

#[test]
fn block_length_handshake_restarts_once() {
    let target = FileState::with_data(2048, random_content(11, 30_000));
    let source = FileState::with_data(256, random_content(11, 25_000));

    let mut session = Session::new(&source, &target, SessionOptions::default());
    assert!(matches!(session.step(), Ok(NegotiationState::Restart(_))));
    let report = session.run().expect("converges");
    assert_eq!(report.stats.restarts, 1);
    assert_eq!(source.block_length(), 2048);
    assert_eq!(source.data(), target.data());
}

#[test]
fn manual_exchange_matches_session() {
    let base = random_content(12, 8000);
    let edited = edit(13, &base, Edit::Overwrite, 3);
    let target = FileState::with_data(256, edited.clone());
    let source = FileState::with_data(256, base);

    let props = target.properties();
    let MatchResult::Delta {
        same_chunks,
        missing_orders,
    } = source.match_against(&props).expect("valid lengths")
    else {
        panic!("expected a delta");
    };
    let response = target.diff_chunks(&DiffRequest(missing_orders));
    let outcome = source
        .reassemble(ReassembleRequest {
            block_length: response.block_length,
            same_chunks,
            diff_chunks: response.diff_chunks,
        })
        .expect("valid lengths");

    assert!(outcome.is_committed());
    assert_eq!(source.total_strong(), StrongChecksum::compute(&edited));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn any_edit_kind_converges(seed in any::<u64>(), count in 0usize..16, kind in 0u8..3) {
        let base = random_content(seed, 6000);
        let kind = [Edit::Insert, Edit::Delete, Edit::Overwrite][usize::from(kind)];
        let edited = edit(seed.wrapping_add(1), &base, kind, count);
        let target = FileState::with_data(128, edited.clone());
        let source = FileState::with_data(128, base);

        let report = synchronize(&source, &target).expect("converges");
        prop_assert!(report.verified);
        prop_assert_eq!(source.data(), edited);
    }
}
