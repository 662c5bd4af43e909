//! Property checks for checksum table generation.

use checksums::{RollingDigest, StrongChecksum};
use proptest::prelude::*;
use signature::{
    BlockChecksumTable, BlockLength, build_parallel, natural_block, padded_window,
};

proptest! {
    #[test]
    fn table_length_is_ceiling(data in proptest::collection::vec(any::<u8>(), 0..4096), requested in 0usize..600) {
        let block = BlockLength::normalized(requested);
        let table = BlockChecksumTable::build(&data, block);
        prop_assert_eq!(table.len(), data.len().div_ceil(block.get()));
    }

    #[test]
    fn parallel_and_sequential_agree(data in proptest::collection::vec(any::<u8>(), 0..8192), requested in 64usize..300) {
        let block = BlockLength::normalized(requested);
        prop_assert_eq!(
            build_parallel(&data, block),
            BlockChecksumTable::build(&data, block)
        );
    }

    #[test]
    fn entries_hash_padded_windows(data in proptest::collection::vec(any::<u8>(), 1..2048), requested in 64usize..200) {
        let block = BlockLength::normalized(requested);
        let table = BlockChecksumTable::build(&data, block);
        for entry in &table {
            let start = block.offset_of(entry.order());
            let window = padded_window(&data, start, block.get());
            prop_assert_eq!(entry.rolling(), RollingDigest::from_bytes(&window));
            prop_assert!(entry.strong().matches(&StrongChecksum::compute(&window)));
            prop_assert_eq!(
                natural_block(&data, start, block.get()).len(),
                block.natural_len(data.len(), entry.order())
            );
        }
    }
}

#[test]
fn identical_blocks_share_checksums() {
    let mut data = vec![0xabu8; 256];
    data.extend(vec![0xabu8; 256]);
    let table = BlockChecksumTable::build(&data, BlockLength::DEFAULT);
    let first = table.get(0).expect("first");
    let second = table.get(1).expect("second");
    assert_eq!(first.key(), second.key());
    assert_eq!(first.strong(), second.strong());
    assert_ne!(first.order(), second.order());
}
