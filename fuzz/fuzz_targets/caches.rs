#![no_main]
use libfuzzer_sys::fuzz_target;
use pabi_hash::chess::zobrist::KeyPair;
use pabi_hash::search::flush::FlushCache;
use pabi_hash::search::recency::RecencyCache;
use pretty_assertions::assert_eq;

// Every three bytes encode an operation: the first one selects between lookup
// and insertion, the other two are the fingerprint halves. Small halves make
// collisions within a group likely.
fuzz_target!(|data: &[u8]| {
    let Some((&size, operations)) = data.split_first() else {
        return;
    };
    let max_size = usize::from(size % 16) + 1;
    let mut recency = RecencyCache::new(max_size).expect("size is positive");
    let mut flush = FlushCache::new(max_size).expect("size is positive");
    for operation in operations.chunks_exact(3) {
        let fingerprint = KeyPair::new(i32::from(operation[1] % 32), i32::from(operation[2] % 4));
        if operation[0] % 2 == 0 {
            recency.add(fingerprint, operation[0]);
            flush.add(fingerprint, operation[0]);
            assert_eq!(recency.get(fingerprint), Some(&operation[0]));
            assert_eq!(flush.get(fingerprint), Some(&operation[0]));
        } else {
            let _ = recency.get(fingerprint);
            let _ = flush.get(fingerprint);
        }
        assert!(recency.size() <= max_size);
        assert!(flush.size() <= max_size);
    }
});
