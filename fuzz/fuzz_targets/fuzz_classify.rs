#![no_main]

use libfuzzer_sys::fuzz_target;

use gosm::transcoder::Classifier;

fuzz_target!(|data: &[u8]| {
    if let Ok(token) = std::str::from_utf8(data) {
        // Classification is total - this should never panic
        let mut classifier = Classifier::new();
        let first = classifier.classify(token);
        assert_eq!(classifier.classify(token).type_name(), first.type_name());
    }
});
