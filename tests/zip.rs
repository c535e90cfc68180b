use std::cmp::Ordering;
use std::panic::{self, AssertUnwindSafe};

use rand::prelude::*;
use timsort::{strategy_name, Zip2, Zip3};

fn shuffled_pairs(len: usize, seed: u64) -> (Vec<i32>, Vec<i64>) {
    let mut pairs: Vec<(i32, i64)> = (0..len as i32)
        .map(|i| (2_499 - i, i as i64 - 500))
        .collect();
    pairs.shuffle(&mut StdRng::seed_from_u64(seed));
    pairs.into_iter().unzip()
}

#[test]
fn key_on_first_component() {
    let mut ints = [4, 2, 3, 1];
    let mut chars = ['A', 'C', 'B', 'D'];
    Zip2::new(&mut ints, &mut chars).sort_by_key(|(i, _)| *i);

    assert_eq!(ints, [1, 2, 3, 4]);
    assert_eq!(chars, ['D', 'C', 'B', 'A']);
}

#[test]
fn large_shuffled_tuples() {
    // The components move in opposite directions, sorting by the first reverses the second.
    let (mut first, mut second) = shuffled_pairs(3_000, 40);
    Zip2::new(&mut first, &mut second).sort();

    assert!(first.windows(2).all(|w| w[0] <= w[1]));
    assert!(second.windows(2).all(|w| w[0] >= w[1]));
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(*a as i64 + b, 1_999);
    }
}

#[test]
fn uses_random_access() {
    assert_eq!(strategy_name::<Zip2<u8, u8>>(), "random_access");
    assert_eq!(strategy_name::<Zip3<u8, u8, u8>>(), "random_access");
}

#[test]
fn stable_on_equal_keys() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut keys: Vec<u8> = (0..2_000).map(|_| rng.gen_range(0..8)).collect();
    let mut order: Vec<usize> = (0..keys.len()).collect();
    let mut labels: Vec<String> = order.iter().map(|i| format!("#{i}")).collect();

    let mut zip = Zip3::new(&mut keys, &mut order, &mut labels);
    zip.sort_by_key(|(k, _, _)| *k);

    for i in 1..keys.len() {
        assert!(
            keys[i - 1] < keys[i] || (keys[i - 1] == keys[i] && order[i - 1] < order[i]),
            "unstable at {i}"
        );
    }
    for (i, label) in order.iter().zip(&labels) {
        assert_eq!(*label, format!("#{i}"));
    }
}

#[test]
fn panic_keeps_rows_together() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut keys: Vec<i32> = (0..500).map(|_| rng.gen_range(0..100)).collect();
    let mut rows: Vec<Vec<i32>> = keys.iter().map(|k| vec![*k; 3]).collect();

    let mut comps = 0;
    let res = panic::catch_unwind(AssertUnwindSafe(|| {
        Zip2::new(&mut keys, &mut rows).sort_by(|a, b| {
            comps += 1;
            if comps == 1_000 {
                panic!("comparison {comps}");
            }
            a.0.cmp(b.0)
        });
    }));

    assert!(res.is_err());
    for (k, row) in keys.iter().zip(&rows) {
        assert_eq!(row, &vec![*k; 3]);
    }
}

#[test]
fn sort_by_descending_tuple() {
    let mut a = [1, 1, 2, 2];
    let mut b = ["x", "y", "x", "y"];
    Zip2::new(&mut a, &mut b).sort_by(|l, r| match r.0.cmp(l.0) {
        Ordering::Equal => l.1.cmp(r.1),
        ord => ord,
    });

    assert_eq!(a, [2, 2, 1, 1]);
    assert_eq!(b, ["x", "y", "x", "y"]);
}

#[test]
fn zip3_natural_and_custom_order() {
    let mut a = [2, 1, 2, 1];
    let mut b = ['b', 'b', 'a', 'a'];
    let mut c = [0u8, 1, 2, 3];
    Zip3::new(&mut a, &mut b, &mut c).sort();

    assert_eq!(a, [1, 1, 2, 2]);
    assert_eq!(b, ['a', 'b', 'a', 'b']);
    assert_eq!(c, [3, 1, 2, 0]);

    // Descending on the last component alone.
    Zip3::new(&mut a, &mut b, &mut c).sort_by(|l, r| r.2.cmp(l.2));
    assert_eq!(c, [3, 2, 1, 0]);
    assert_eq!(a, [1, 2, 1, 2]);
    assert_eq!(b, ['a', 'a', 'b', 'b']);
}
