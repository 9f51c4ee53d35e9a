#![no_main]

use libfuzzer_sys::fuzz_target;
use stowzip::ArchiveReader;

fuzz_target!(|data: &[u8]| {
    // Skip inputs that cannot hold an end record (22 bytes minimum)
    if data.len() < 22 {
        return;
    }

    // Try to open the archive - should never panic
    let reader = match ArchiveReader::open(data.to_vec()) {
        Ok(r) => r,
        Err(_) => return, // Expected for invalid data
    };

    // Try to read each entry - should never panic
    let paths: Vec<String> = reader
        .list_entries()
        .iter()
        .map(|e| e.path.clone())
        .collect();
    for path in &paths {
        let _ = reader.read_entry(path);
    }

    // Lookups with odd paths - should never panic
    let _ = reader.entry_count();
    let _ = reader.contains("test.txt");
    let _ = reader.contains("");
    let _ = reader.contains("/");
    let _ = reader.contains("../../../etc/passwd");
});
