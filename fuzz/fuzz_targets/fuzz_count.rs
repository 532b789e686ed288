#![no_main]

use libfuzzer_sys::fuzz_target;
use occ::SuffixIndex;
use occ::query::count_occurrences;
use occ::scan::count_linear;

fuzz_target!(|data: (&[u8], &[u8])| {
    // Differential check: the suffix-index range counter and the linear
    // scanner must agree on every (text, pattern) pair
    let (text, pattern) = data;
    if pattern.is_empty() {
        return;
    }

    let index = SuffixIndex::build(text).unwrap();
    let indexed = count_occurrences(&index, pattern).unwrap();
    let linear = count_linear(text, pattern).unwrap();
    assert_eq!(indexed, linear);
});
