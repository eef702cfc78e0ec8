#![no_main]

use libfuzzer_sys::fuzz_target;
use segtag::{ClassifierConfig, ContentProfile, Detector};

fuzz_target!(|data: Vec<u8>| {
    let configs = vec![
        // Tiny window, forces refills mid-run
        ClassifierConfig::new(64, 16).unwrap(),
        // Small window
        ClassifierConfig::new(1024, 100).unwrap(),
        // No coalescing
        ClassifierConfig::default().with_coalesce(false),
        // Default config
        ClassifierConfig::default(),
    ];

    for config in configs {
        let runs = Detector::new(config).segment_bytes(data.clone()).unwrap();

        // Verify: runs tile the input in order
        let mut expected_offset = 0u64;
        let mut rebuilt = Vec::with_capacity(data.len());
        for run in &runs {
            assert!(!run.is_empty());
            assert_eq!(run.offset, expected_offset);
            assert_eq!(run.header.length() as usize, run.len());
            expected_offset += run.len() as u64;
            rebuilt.extend_from_slice(&run.data);
        }
        assert_eq!(rebuilt, data);

        // Verify: text runs are well-formed UTF-8 free of forbidden bytes
        for run in runs.iter().filter(|r| r.profile() == ContentProfile::Text) {
            assert!(std::str::from_utf8(&run.data).is_ok());
            assert!(!run.data.iter().any(|&b| segtag::is_forbidden(b)));
        }

        // Verify: determinism
        let again = Detector::new(config).segment_bytes(data.clone()).unwrap();
        assert_eq!(runs, again);
    }
});
