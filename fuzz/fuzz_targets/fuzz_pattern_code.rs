#![no_main]

use libfuzzer_sys::fuzz_target;
use lockgrid_core::cell::GridSpec;
use lockgrid_widgets::pattern::Pattern;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let size = data[0] % 7 + 1; // 1..=7
    let Ok(grid) = GridSpec::new(size) else {
        return;
    };
    let Ok(code) = std::str::from_utf8(&data[1..]) else {
        return;
    };

    // Any accepted code must re-encode to itself.
    if let Ok(pattern) = Pattern::from_code(code, &grid) {
        assert_eq!(pattern.to_code(&grid).ok().as_deref(), Some(code));
        assert!(pattern.len() <= grid.cell_count());
    }
});
