#![no_main]

use libfuzzer_sys::fuzz_target;
use res_resolver::ResourceLoader;

fuzz_target!(|data: &[u8]| {
    let mut loader = ResourceLoader::new("fuzz");
    let _ = loader.add_values_xml("values", data);
    let _ = loader.finish();
});
