// Shared helpers for the integration suites.
#![allow(dead_code)]

use reservoir::safe::copy_bounded;
use std::sync::Once;

static INIT: Once = Once::new();

/// Route `log` output through env_logger's test writer. `RUST_LOG` picks
/// the level; repeated calls are harmless.
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .is_test(true)
            .format_timestamp_millis()
            .parse_default_env()
            .try_init();
    });
}

/// Fixed 16-byte key holding a NUL-terminated string, as a C caller would
/// pass it.
pub fn key16(s: &str) -> [u8; 16] {
    let mut buf = [0u8; 16];
    copy_bounded(&mut buf, s.as_bytes());
    buf
}
