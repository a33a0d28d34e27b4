#![no_main]

use libfuzzer_sys::fuzz_target;
use res_resolver_config::ResTableConfig;

fuzz_target!(|data: &[u8]| {
    let mut input = data;
    if let Ok(config) = ResTableConfig::parse(&mut input) {
        let _ = config.qualifier_string();
        let _ = config.to_bytes();
    }
});
