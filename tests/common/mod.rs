//! Fixtures shared by the root integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded random content.
pub fn random_content(seed: u64, len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    StdRng::seed_from_u64(seed).fill(&mut data[..]);
    data
}

/// Kinds of edit applied by [`edit`].
#[derive(Clone, Copy, Debug)]
pub enum Edit {
    Insert,
    Delete,
    Overwrite,
}

/// Applies `count` random edits of `kind` to a copy of `base`.
pub fn edit(seed: u64, base: &[u8], kind: Edit, count: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edited = base.to_vec();
    for _ in 0..count {
        let at = rng.gen_range(0..=edited.len());
        let len = rng.gen_range(1..128);
        match kind {
            Edit::Insert => {
                let mut fragment = vec![0u8; len];
                rng.fill(&mut fragment[..]);
                edited.splice(at..at, fragment);
            }
            Edit::Delete => {
                let end = (at + len).min(edited.len());
                edited.drain(at..end);
            }
            Edit::Overwrite => {
                let end = (at + len).min(edited.len());
                for byte in &mut edited[at..end] {
                    *byte = rng.r#gen();
                }
            }
        }
    }
    edited
}
