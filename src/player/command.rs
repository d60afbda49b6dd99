// src/player/command.rs

//! Expanding a player command template into an argument vector.
//!
//! Only the template text is split on whitespace. Placeholders are replaced
//! after splitting, so a file or socket path containing spaces stays a single
//! argument. There is no quoting, which means a template token that itself
//! contains whitespace cannot be written.
//!
//! Placeholders are substituted in order, `%f` first and then `%s`; a `%s`
//! inside the file path is therefore replaced by the socket name as well.

use crate::errors::{MpvStreamError, Result};
use crate::player::resolver::BinaryResolver;

/// Default mpv invocation: audio only, start paused, IPC on `%s`.
pub const DEFAULT_COMMAND_TEMPLATE: &str =
    "mpv --no-audio-display --pause %f --input-ipc-server=%s";

/// Placeholder for the absolute path of the media file.
pub const FILE_PLACEHOLDER: &str = "%f";
/// Placeholder for the control socket path.
pub const SOCKET_PLACEHOLDER: &str = "%s";

/// Expand `template` into argv.
///
/// Tokens naming the player binary (`mpv`, `mpv.exe`) are swapped for the
/// resolver's absolute path; the resolver is only consulted when such a
/// token is present.
pub fn build_command(
    template: &str,
    file_path: &str,
    socket_name: &str,
    resolver: &BinaryResolver,
) -> Result<Vec<String>> {
    let args = template
        .split_whitespace()
        .map(|token| -> Result<String> {
            let token = if resolver.matches_binary(token) {
                resolver.resolve()?.to_string_lossy().into_owned()
            } else {
                token.to_string()
            };
            Ok(expand_placeholders(&token, file_path, socket_name))
        })
        .collect::<Result<Vec<_>>>()?;

    if args.is_empty() {
        return Err(MpvStreamError::EmptyCommand);
    }
    Ok(args)
}

fn expand_placeholders(token: &str, file_path: &str, socket_name: &str) -> String {
    token
        .replace(FILE_PLACEHOLDER, file_path)
        .replace(SOCKET_PLACEHOLDER, socket_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unresolvable() -> BinaryResolver {
        BinaryResolver::with_binary("mpvstream-no-such-player-91ab", None)
    }

    #[test]
    fn expands_example_template() {
        let args = build_command(
            "player --pause %f --sock=%s",
            "/music/a.mp3",
            "/tmp/abc",
            &unresolvable(),
        )
        .unwrap();
        assert_eq!(args, vec!["player", "--pause", "/music/a.mp3", "--sock=/tmp/abc"]);
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let args = build_command(
            "p %s%f --a=%f,%f --b=%s",
            "F",
            "S",
            &unresolvable(),
        )
        .unwrap();
        assert_eq!(args, vec!["p", "SF", "--a=F,F", "--b=S"]);
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        let args = build_command("  p \t --x   %f\n", "F", "S", &unresolvable()).unwrap();
        assert_eq!(args, vec!["p", "--x", "F"]);
    }

    #[test]
    fn empty_template_is_rejected() {
        let err = build_command("   ", "F", "S", &unresolvable()).unwrap_err();
        assert!(matches!(err, MpvStreamError::EmptyCommand));
    }

    #[test]
    fn unresolvable_binary_token_fails_synchronously() {
        let resolver = unresolvable();
        let template = format!("{} --pause %f", resolver.binary_name());
        let err = build_command(&template, "F", "S", &resolver).unwrap_err();
        assert!(matches!(err, MpvStreamError::BinaryNotFound { .. }));
    }

    #[test]
    fn socket_placeholder_inside_file_path_is_substituted() {
        // Known limitation of sequential substitution.
        let args = build_command("p %f", "/music/100%s.mp3", "/tmp/sock", &unresolvable()).unwrap();
        assert_eq!(args, vec!["p", "/music/100/tmp/sock.mp3"]);
    }
}
