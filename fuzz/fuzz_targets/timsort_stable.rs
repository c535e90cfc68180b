#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Few distinct keys, so there are plenty of ties to keep in order.
    let mut v: Vec<(u8, usize)> = data.iter().map(|b| b % 16).zip(0..).collect();
    timsort::sort_by_key(&mut v, |(key, _)| *key);

    assert!(v.windows(2).all(|w| w[0] <= w[1]));
});
