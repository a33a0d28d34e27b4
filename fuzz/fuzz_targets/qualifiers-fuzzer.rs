#![no_main]

use libfuzzer_sys::fuzz_target;
use res_resolver_config::parse;

fuzz_target!(|data: &[u8]| {
    let Ok(qualifiers) = std::str::from_utf8(data) else {
        return;
    };

    let parsed = parse(qualifiers);
    if parsed.success {
        // canonical form must parse back to the same configuration
        let canonical = parsed.config.qualifier_string();
        let reparsed = parse(&canonical);
        assert!(reparsed.success, "{canonical:?} doesn't parse");
        assert_eq!(reparsed.config, parsed.config, "{qualifiers:?} -> {canonical:?}");
    }
});
