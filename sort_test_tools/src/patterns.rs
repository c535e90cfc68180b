//! Input patterns for testing and benchmarking sorts.
//!
//! All random patterns draw from a per-process seed. It is picked at random once, or taken from
//! the `OVERRIDE_SEED` environment variable to reproduce a failure.

use std::env;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;
use rand::distributions::{Distribution, Uniform};
use rand::prelude::*;
use zipf::ZipfDistribution;

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = new_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<Uniform<i32>>,
{
    // :.:.:.::

    let dist: Uniform<i32> = range.into();
    let mut rng = new_rng();
    dist.sample_iter(&mut rng).take(len).collect()
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // https://en.wikipedia.org/wiki/Zipf's_law
    // A few values very often, most of them rarely.

    let dist = match ZipfDistribution::new(len, exponent) {
        Ok(dist) => dist,
        Err(()) => panic!("invalid zipf parameters len: {len} exponent: {exponent}"),
    };
    let mut rng = new_rng();
    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    // sorted  unsorted

    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;
    v[..sorted_len].sort_unstable();
    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    saw(len, saw_count, |_| false)
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    saw(len, saw_count, |_| true)
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    let chunk_count = len / saw_chunk_len(len, saw_count) + 1;
    let directions = random_uniform(chunk_count, 0..=1);
    saw(len, saw_count, |i| directions[i] == 1)
}

pub fn saw_mixed_range(len: usize, range: std::ops::Range<usize>) -> Vec<i32> {
    //     :.
    // :.  :::.    .::.      .:
    // :::.:::::..::::::..:.:::
    // Chunk lengths are random in `range`, directions too.

    let mut v = random(len);
    if len == 0 {
        return v;
    }

    let max_chunks = len / range.start + 1;
    let directions = random_uniform(max_chunks, 0..=1);
    let chunk_lens = random_uniform(max_chunks, (range.start as i32)..(range.end as i32));

    let mut start = 0;
    for (chunk_len, descending) in chunk_lens.iter().zip(directions.iter()) {
        if start >= len {
            break;
        }
        let end = (start + *chunk_len as usize).min(len);
        sort_chunk(&mut v[start..end], *descending == 1);
        start = end;
    }

    v
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut v = random(len);
    let (rising, falling) = v.split_at_mut(len / 2);
    sort_chunk(rising, false);
    sort_chunk(falling, true);
    v
}

pub fn sorted_halves(len: usize) -> Vec<i32> {
    //    .:   .:
    //  .:::  ::::
    // .::::.:::::
    // Two ascending runs of random values, the worst case for a single merge.

    let mut v = random(len);
    let (left, right) = v.split_at_mut(len / 2);
    sort_chunk(left, false);
    sort_chunk(right, false);
    v
}

pub fn interleaved_blocks(len: usize, block_len: usize) -> Vec<i32> {
    //      .:      .:
    //    .:  .:  .:  .:
    //  .:  .:  .:  .:
    // [ first half ][ second half ]
    // Each half ascends but its blocks alternate with the blocks of the other one, so the merge
    // of the halves is won block by block.

    let block_len = block_len.max(1);
    let half = len / 2;
    let block_of = |i: usize| i / block_len;

    let value = |i: usize, odd: usize| ((block_of(i) * 2 + odd) * block_len + i % block_len) as i32;

    let first = (0..half).map(|i| value(i, 0));
    let second = (0..len - half).map(|i| value(i, 1));
    first.chain(second).collect()
}

/// Makes every random pattern draw a fresh seed. By default `patterns::random(4)` yields the
/// same values for the whole process, benchmarks may want to avoid that.
pub fn use_random_seed_each_time() {
    if env::var("OVERRIDE_SEED").is_ok() {
        panic!("Using use_random_seed_each_time conflicts with the external seed override.");
    }

    SEED_EACH_TIME.store(true, Ordering::Relaxed);
}

pub fn random_init_seed() -> u64 {
    *PROCESS_SEED.get_or_init(|| match env::var("OVERRIDE_SEED") {
        Ok(seed) => match u64::from_str(&seed) {
            Ok(seed) => seed,
            Err(err) => panic!("OVERRIDE_SEED={seed} is not a valid seed: {err}"),
        },
        Err(_) => thread_rng().gen(),
    })
}

// --- Private ---

static PROCESS_SEED: OnceCell<u64> = OnceCell::new();
static SEED_EACH_TIME: AtomicBool = AtomicBool::new(false);

fn new_rng() -> StdRng {
    if SEED_EACH_TIME.load(Ordering::Relaxed) {
        StdRng::from_entropy()
    } else {
        StdRng::seed_from_u64(random_init_seed())
    }
}

fn sort_chunk(chunk: &mut [i32], descending: bool) {
    if descending {
        chunk.sort_by_key(|&e| std::cmp::Reverse(e));
    } else {
        chunk.sort();
    }
}

fn saw_chunk_len(len: usize, saw_count: usize) -> usize {
    (len / saw_count.max(1)).max(1)
}

/// Random values cut into `saw_count` chunks, chunk `i` sorted descending if `descending(i)`.
fn saw(len: usize, saw_count: usize, descending: impl Fn(usize) -> bool) -> Vec<i32> {
    let mut v = random(len);
    if len == 0 {
        return v;
    }

    for (i, chunk) in v.chunks_mut(saw_chunk_len(len, saw_count)).enumerate() {
        sort_chunk(chunk, descending(i));
    }
    v
}
