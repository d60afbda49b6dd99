#![allow(dead_code, unused_imports)]

pub use mpvstream_test_utils::builders;
pub use mpvstream_test_utils::stub_player::StubDir;
pub use mpvstream_test_utils::{init_tracing, with_timeout};

/// `sh -c <script>` as an argument vector.
pub fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}
