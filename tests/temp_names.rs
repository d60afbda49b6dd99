// tests/temp_names.rs

use std::collections::HashSet;
use std::error::Error;

use mpvstream::player::temp_file_name;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn ten_thousand_names_are_distinct() -> TestResult {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let name = temp_file_name("mpv-ctrl-", ".socket")?;
        assert!(seen.insert(name), "duplicate scratch name generated");
    }
    assert_eq!(seen.len(), 10_000);
    Ok(())
}

#[test]
fn names_live_in_temp_dir_and_are_not_created() -> TestResult {
    let name = temp_file_name("scratch-", "")?;
    assert!(name.starts_with(std::env::temp_dir()));
    assert!(!name.exists());

    let file_name = name.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(file_name.starts_with("scratch-"));
    assert_eq!(file_name.len(), "scratch-".len() + 32);
    Ok(())
}
