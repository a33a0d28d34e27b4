#![no_main]

use libfuzzer_sys::fuzz_target;
use res_resolver_zip::ZipArchive;

fuzz_target!(|data: &[u8]| {
    let Ok(archive) = ZipArchive::new(data.to_vec()) else {
        return;
    };

    for entry in archive.entries() {
        if let Ok(map) = archive.create_entry_file_map(entry) {
            let _ = archive.entry_data(&map);
        }
    }
});
