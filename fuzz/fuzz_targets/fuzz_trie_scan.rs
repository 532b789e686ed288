#![no_main]

use libfuzzer_sys::fuzz_target;
use occ::scan::{PatternTrie, count_linear, scan_total};

fuzz_target!(|data: (&[u8], &[u8])| {
    // A singleton trie's aggregate total must equal the linear count
    let (text, pattern) = data;
    if pattern.is_empty() {
        return;
    }

    let trie = PatternTrie::from_patterns(&[pattern]).unwrap();
    let total = scan_total(&trie, text);
    let linear = count_linear(text, pattern).unwrap();
    assert_eq!(total, linear);
});
