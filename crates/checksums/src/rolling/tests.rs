use super::*;

use proptest::prelude::*;

fn reference_digest(data: &[u8]) -> RollingDigest {
    let n = data.len() as u64;
    let mut a: u64 = 0;
    let mut b: u64 = 0;

    for (i, &byte) in data.iter().enumerate() {
        a += u64::from(byte);
        b += (n - i as u64) * u64::from(byte);
    }

    RollingDigest::new((a & 0xffff) as u16, (b & 0xffff) as u16, data.len())
}

fn random_data_and_window() -> impl Strategy<Value = (Vec<u8>, usize)> {
    prop::collection::vec(any::<u8>(), 1..=256).prop_flat_map(|data| {
        let len = data.len();
        (Just(data), 1..=len)
    })
}

#[test]
fn digest_matches_weighted_sum_definition() {
    let data = b"block checksum table";
    let mut checksum = RollingChecksum::new();
    checksum.update(data);
    assert_eq!(checksum.digest(), reference_digest(data));
}

#[test]
fn key_concatenates_sum1_above_sum2() {
    let mut checksum = RollingChecksum::new();
    checksum.update(&[1, 2, 3]);
    // a = 6, b = 3*1 + 2*2 + 1*3 = 10
    assert_eq!(checksum.digest().sum1(), 6);
    assert_eq!(checksum.digest().sum2(), 10);
    assert_eq!(checksum.key(), (6 << 16) | 10);
    assert_eq!(checksum.digest().key(), checksum.key());
}

#[test]
fn sums_truncate_to_sixteen_bits() {
    let data = vec![0xffu8; 1024];
    let digest = RollingDigest::from_bytes(&data);
    let a = 0xff_u64 * 1024;
    let b: u64 = (1..=1024u64).map(|w| w * 0xff).sum();
    assert_eq!(u64::from(digest.sum1()), a & 0xffff);
    assert_eq!(u64::from(digest.sum2()), b & 0xffff);
}

#[test]
fn update_from_block_records_first_byte_as_outgoing() {
    let mut checksum = RollingChecksum::new();
    checksum.update_from_block(b"xyz");
    assert_eq!(checksum.pending_outgoing(), Some(b'x'));

    checksum.update(b"w");
    assert_eq!(checksum.pending_outgoing(), Some(b'x'));
    assert_eq!(checksum.len(), 4);
}

#[test]
fn roll_forgets_pending_outgoing() {
    let mut checksum = RollingChecksum::new();
    checksum.update_from_block(b"abcd");
    checksum.roll(b'a', b'e').expect("roll succeeds");
    assert_eq!(checksum.pending_outgoing(), None);
    assert_eq!(
        checksum.advance(b'c', b'f'),
        Err(RollingError::UnknownOutgoing)
    );
}

#[test]
fn advance_matches_recomputed_windows() {
    let data = b"The quick brown fox jumps over the lazy dog";
    let window = 12;

    let mut rolling = RollingChecksum::new();
    rolling.update_from_block(&data[..window]);

    for start in 1..=data.len() - window {
        rolling
            .advance(data[start], data[start + window - 1])
            .expect("advance succeeds");
        assert_eq!(
            rolling.digest(),
            RollingDigest::from_bytes(&data[start..start + window])
        );
    }
}

#[test]
fn advance_with_zero_padding_matches_padded_window() {
    let data = b"short tail";
    let window = 8;

    let mut rolling = RollingChecksum::new();
    rolling.update_from_block(&data[..window]);

    for start in 1..data.len() {
        let incoming = data.get(start + window - 1).copied().unwrap_or(0);
        rolling
            .advance(data[start], incoming)
            .expect("advance succeeds");

        let mut padded = data[start..].to_vec();
        padded.truncate(window);
        padded.resize(window, 0);
        assert_eq!(rolling.digest(), RollingDigest::from_bytes(&padded));
    }
}

#[test]
fn advance_errors_for_empty_window() {
    let mut checksum = RollingChecksum::new();
    assert_eq!(checksum.advance(0, 0), Err(RollingError::EmptyWindow));
}

#[test]
fn roll_errors_for_empty_window() {
    let mut checksum = RollingChecksum::new();
    let err = checksum
        .roll(0, 0)
        .expect_err("rolling on empty window must fail");
    assert_eq!(err, RollingError::EmptyWindow);
}

#[test]
fn roll_errors_for_window_exceeding_u32() {
    let mut checksum = RollingChecksum::new();
    checksum.force_state(1, 1, (u32::MAX as usize) + 1);

    let err = checksum.roll(0, 0).expect_err("oversized window must fail");
    assert!(matches!(err, RollingError::WindowTooLarge { .. }));
}

#[test]
fn empty_digest_is_zero() {
    let digest = RollingDigest::from_bytes(b"");
    assert_eq!(digest, RollingDigest::ZERO);
    assert!(digest.is_empty());
    assert_eq!(digest.key(), 0);
}

#[test]
fn error_messages_are_descriptive() {
    assert!(RollingError::EmptyWindow.to_string().contains("non-empty"));
    assert!(
        RollingError::WindowTooLarge { len: 7 }
            .to_string()
            .contains('7')
    );
    assert!(RollingError::UnknownOutgoing.to_string().contains("outgoing"));
}

proptest! {
    #[test]
    fn chunked_update_matches_single_pass(chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..=64), 1..=8)) {
        let mut incremental = RollingChecksum::new();
        let mut concatenated = Vec::new();

        for chunk in &chunks {
            incremental.update(chunk);
            concatenated.extend_from_slice(chunk);
        }

        prop_assert_eq!(incremental.digest(), reference_digest(&concatenated));
    }

    #[test]
    fn advancing_matches_fresh_windows((data, window) in random_data_and_window()) {
        let mut rolling = RollingChecksum::new();
        rolling.update_from_block(&data[..window]);
        prop_assert_eq!(rolling.digest(), reference_digest(&data[..window]));

        for start in 1..=data.len() - window {
            rolling
                .advance(data[start], data[start + window - 1])
                .expect("advance must succeed");
            prop_assert_eq!(rolling.digest(), reference_digest(&data[start..start + window]));
        }
    }

    #[test]
    fn explicit_roll_matches_fresh_windows((data, window) in random_data_and_window()) {
        let mut rolling = RollingChecksum::new();
        rolling.update(&data[..window]);

        for start in 1..=data.len() - window {
            rolling
                .roll(data[start - 1], data[start + window - 1])
                .expect("roll must succeed");
            prop_assert_eq!(rolling.key(), reference_digest(&data[start..start + window]).key());
        }
    }
}
