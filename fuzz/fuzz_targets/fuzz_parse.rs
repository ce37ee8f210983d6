#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Ok(form) = formguard::parse(&s) {
        let _ = formguard::validate(&form);
    }
    let _ = formguard::Schema::from_yaml(&s);
});
