#![no_main]

use libfuzzer_sys::fuzz_target;
use timsort::{Ordered, Sequential};

fuzz_target!(|data: &[u8]| {
    let mut expected = data.to_vec();
    expected.sort();

    let mut v = data.to_vec();
    timsort::sort_seq(&mut Sequential::new(v.as_mut_slice()), Ordered);

    assert_eq!(v, expected);
});
