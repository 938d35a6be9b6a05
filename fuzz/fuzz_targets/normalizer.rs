#![no_main]

use libfuzzer_sys::fuzz_target;

use geolens::analysis::normalize;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    // Any reply, however broken, yields all six pillars in range.
    let analysis = normalize(&text);
    assert_eq!(analysis.pillar_scores.iter().count(), 6);
    for (_, pillar) in analysis.pillar_scores.iter() {
        assert!(pillar.score <= 100);
    }
    for rec in &analysis.recommendations {
        assert!((1..=10).contains(&rec.impact));
        assert!(!rec.implementation.is_empty());
    }
});
