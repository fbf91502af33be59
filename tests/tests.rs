use itertools::Itertools;
use num_integer::binomial;
use rand::{Rng, RngCore};
use shamir_engine::*;

#[test]
fn test_hello_scenario() {
    let shares = split(b"HELLO", 5, 3).unwrap();
    assert_eq!(shares.len(), 5);
    assert_eq!(shares.iter().unique().count(), 5);

    let picked = [shares[0].clone(), shares[2].clone(), shares[4].clone()];
    assert_eq!(combine(&picked).unwrap(), b"HELLO".to_vec());
}

#[test]
fn test_below_threshold_gives_wrong_secret() {
    // Not an error: the scheme cannot know the threshold, the value is just unrelated.
    let shares = split(b"HELLO", 5, 3).unwrap();
    let picked = [shares[0].clone(), shares[2].clone()];
    let recovered = combine(&picked).unwrap();
    assert_ne!(recovered, b"HELLO".to_vec());
}

#[test]
fn test_every_threshold_subset_reconstructs() {
    let secret = b"subset independence";
    let shares = split(secret, 5, 3).unwrap();

    let subsets: Vec<Vec<String>> = shares.iter().cloned().combinations(3).collect();
    assert_eq!(subsets.len() as u64, binomial(5u64, 3));
    for subset in subsets {
        assert_eq!(combine(&subset).unwrap(), secret.to_vec());
    }
}

#[test]
fn test_over_threshold_and_order() {
    let secret = b"over threshold";
    let shares = split(secret, 7, 4).unwrap();
    for k in 4..=7 {
        assert_eq!(combine(&shares[..k]).unwrap(), secret.to_vec());
    }

    let mut reversed = shares.clone();
    reversed.reverse();
    assert_eq!(combine(&reversed[..4]).unwrap(), secret.to_vec());
}

#[test]
fn test_random_secrets_and_parameters() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let n = rng.gen_range(2..=20u32);
        let t = rng.gen_range(2..=n);
        let len = rng.gen_range(1..=64usize);
        let mut secret = vec![0u8; len];
        rng.fill_bytes(&mut secret);
        secret[0] |= 1; // keep the leading byte significant

        let shares = split(&secret, n, t).unwrap();
        let picked: Vec<String> = shares.iter().rev().take(t as usize).cloned().collect();
        assert_eq!(combine(&picked).unwrap(), secret);
    }
}

#[test]
fn test_maximum_share_count() {
    let secret = b"many shares";
    let shares = split(secret, 255, 2).unwrap();
    assert_eq!(shares.len(), 255);
    let picked = [shares[17].clone(), shares[254].clone()];
    assert_eq!(combine(&picked).unwrap(), secret.to_vec());
}

#[test]
fn test_splits_are_not_deterministic() {
    let a = split(b"HELLO", 5, 3).unwrap();
    let b = split(b"HELLO", 5, 3).unwrap();
    assert_ne!(a, b);
    for (x, y) in a.iter().zip(b.iter()) {
        assert_ne!(x, y);
    }
}

#[test]
fn test_mixing_splits_does_not_reconstruct() {
    let a = split(b"HELLO", 3, 2).unwrap();
    let b = split(b"HELLO", 3, 2).unwrap();
    let mixed = [a[0].clone(), b[1].clone()];
    assert_ne!(combine(&mixed).unwrap(), b"HELLO".to_vec());
}

#[test]
fn test_validation_boundaries() {
    assert_eq!(split(b"s", 1, 1), Err(SplitError::InvalidTotalShares(1)));
    assert!(matches!(
        split(b"s", 3, 5),
        Err(SplitError::ThresholdExceedsShares { .. })
    ));
    assert_eq!(split(b"", 3, 2), Err(SplitError::EmptySecret));

    let empty: Vec<String> = vec![];
    assert_eq!(combine(&empty), Err(CombineError::NoShares));
    assert_eq!(
        combine(&["1:aa", "1:bb"]),
        Err(CombineError::DuplicateShareIndex(1))
    );
}

#[test]
fn test_codec_roundtrip_of_split_output() {
    for share in split_shares(b"codec", 6, 4).unwrap() {
        let text = encode(&share);
        assert_eq!(decode(&text).unwrap(), share);
        let (index, value) = text.split_once(':').unwrap();
        assert_eq!(index, share.x.to_string());
        assert!(value.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }
}

#[test]
fn test_leading_zero_bytes() {
    let secret = b"\x00\x00\x07abc";
    let shares = split(secret, 4, 3).unwrap();

    // the minimal encoding drops the leading zeros
    assert_eq!(combine(&shares[..3]).unwrap(), b"\x07abc".to_vec());
    assert_eq!(combine_with_len(&shares[..3], secret.len()).unwrap(), secret.to_vec());
}

#[test]
fn test_concurrent_splits() {
    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            std::thread::spawn(move || {
                let secret = vec![b'a' + i; 16];
                let shares = split(&secret, 5, 3).unwrap();
                assert_eq!(combine(&shares[1..4]).unwrap(), secret);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
