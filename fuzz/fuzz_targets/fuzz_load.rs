#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Arbitrary text must load or fail cleanly; loaded documents must
        // serialize and load again without panicking
        if let Ok(doc) = gosm::load(content) {
            let _ = gosm::load(&gosm::serialize(&doc));
        }
    }
});
