// src/player/tempname.rs

//! Random scratch names under the system temp directory.

use std::path::PathBuf;

use crate::errors::{MpvStreamError, Result};

const RANDOM_BYTES: usize = 16;

/// `<temp_dir>/<prefix><32 hex chars><suffix>`.
///
/// The 128 random bits come from the OS CSPRNG. Nothing is created on disk
/// and no existence check is made, so uniqueness is only probabilistic.
pub fn temp_file_name(prefix: &str, suffix: &str) -> Result<PathBuf> {
    let mut bytes = [0u8; RANDOM_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| MpvStreamError::Entropy(e.to_string()))?;

    let name = format!("{prefix}{}{suffix}", hex_encode(&bytes));
    Ok(std::env::temp_dir().join(name))
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        assert_eq!(hex_encode(&[0x00, 0x0f, 0xa0, 0xff]), "000fa0ff");
    }

    #[test]
    fn name_has_prefix_suffix_and_32_hex_chars() {
        let path = temp_file_name("mpv-ctrl-", ".socket").unwrap();
        assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));

        let name = path.file_name().unwrap().to_str().unwrap();
        let random = name
            .strip_prefix("mpv-ctrl-")
            .and_then(|rest| rest.strip_suffix(".socket"))
            .expect("prefix and suffix preserved");
        assert_eq!(random.len(), 32);
        assert!(random.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
