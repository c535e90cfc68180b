use std::cmp::Ordering;

use rand::prelude::*;
use timsort::{LessThan, Sequential, Zip2};

fn sorted_random(len: usize, range: i32, rng: &mut StdRng) -> Vec<i32> {
    let mut v: Vec<i32> = (0..len).map(|_| rng.gen_range(0..range)).collect();
    v.sort();
    v
}

#[test]
fn merges_all_split_points() {
    let mut rng = StdRng::seed_from_u64(0x3e);
    for len in [0usize, 1, 2, 5, 64, 300] {
        for mid in [0, 1, len / 3, len / 2, len.saturating_sub(1), len] {
            if mid > len {
                continue;
            }
            let mut v = sorted_random(mid, 50, &mut rng);
            v.extend(sorted_random(len - mid, 50, &mut rng));
            let mut expected = v.clone();
            expected.sort();

            timsort::merge(&mut v, mid);
            assert_eq!(v, expected, "len={len} mid={mid}");
        }
    }
}

#[test]
fn merge_by_is_stable() {
    // Equal keys from the left half must stay in front of those from the right half.
    let mut v: Vec<(i32, char)> = [0, 2, 2, 4, 6].iter().map(|k| (*k, 'l')).collect();
    v.extend([1, 2, 2, 6, 7].iter().map(|k| (*k, 'r')));

    timsort::merge_by(&mut v, 5, |a, b| a.0.cmp(&b.0));
    assert_eq!(
        v,
        [
            (0, 'l'),
            (1, 'r'),
            (2, 'l'),
            (2, 'l'),
            (2, 'r'),
            (2, 'r'),
            (4, 'l'),
            (6, 'l'),
            (6, 'r'),
            (7, 'r'),
        ]
    );
}

#[test]
fn merge_seq_on_views() {
    let mut rng = StdRng::seed_from_u64(0x3f);

    // Long left run, short right run: rotated first on the forward path.
    let mut v = sorted_random(1_000, 10_000, &mut rng);
    v.extend(sorted_random(40, 10_000, &mut rng));
    let mut expected = v.clone();
    expected.sort();
    let is_less = LessThan(|a: &i32, b: &i32| a < b);
    timsort::merge_seq(&mut Sequential::new(v.as_mut_slice()), 1_000, is_less);
    assert_eq!(v, expected);

    let mut keys = vec![1, 5, 9, 2, 5, 8];
    let mut tags = vec!['a', 'b', 'c', 'd', 'e', 'f'];
    timsort::merge_seq(
        &mut Zip2::new(&mut keys, &mut tags),
        3,
        LessThan(|a: (&i32, &char), b: (&i32, &char)| a.0.cmp(b.0) == Ordering::Less),
    );
    assert_eq!(keys, [1, 2, 5, 5, 8, 9]);
    assert_eq!(tags, ['a', 'd', 'b', 'e', 'f', 'c']);
}

#[test]
fn try_merge_seq_succeeds() {
    let mut v = vec![4, 5, 6, 1, 2, 3];
    let merged = timsort::try_merge_seq(v.as_mut_slice(), 3, timsort::Ordered);
    assert!(merged.is_ok());
    assert_eq!(v, [1, 2, 3, 4, 5, 6]);
}

#[test]
#[should_panic]
fn merge_point_out_of_range() {
    let mut v = vec![1, 2];
    timsort::merge(&mut v, 3);
}
