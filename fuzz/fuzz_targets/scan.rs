#![no_main]

use dashcheck_core::{ListenerSanitizer, declares_id, referenced_ids};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Every reported span must slice back to the quoted id
        for reference in referenced_ids(s) {
            assert_eq!(&s[reference.offset..reference.offset + reference.len], reference.id);
            let _ = declares_id(s, &reference.id);
        }

        // Sanitized output never registers on the targets
        if let Ok(sanitizer) = ListenerSanitizer::new(&["document", "window"], "__noop") {
            let once = sanitizer.sanitize(s);
            assert_eq!(sanitizer.count(&once.text), 0);
        }
    }
});
