//! Option description signature parsing.
//!
//! An option description lists one or more spellings of an option, each
//! optionally followed by argument placeholders:
//!
//! ```text
//! -c, --config <file>
//! /opt value
//! daemon
//! ```
//!
//! Options may start with `-`, `--`, `/`, or nothing at all. Pieces are
//! separated by a comma and whitespace, but only where the next piece starts
//! with an option prefix, so commas inside argument text stay put.
//!
//! This differs from the documentation generator, which splits on every
//! comma. A bare-word spelling after a comma is therefore read as argument
//! text of the previous option: `-v, daemon` yields `-v` with args
//! `, daemon`. Signatures that mix prefixed and bare spellings should list
//! the bare spelling first.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::types::{OptionSignature, OptionSignatures, starts_with_option_prefix};

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s+").expect("static regex must compile"));
static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:/|--|-)?[-_a-zA-Z0-9]+)(\s*.*)$").expect("static regex must compile")
});

/// Parses an option description signature into individual options.
///
/// Pieces that do not look like options are reported in
/// [`OptionSignatures::malformed`] and logged; parsing itself never fails.
///
/// # Examples
///
/// ```
/// use optref_core::parse_option_signatures;
///
/// let parsed = parse_option_signatures("-c, --config <file>");
/// assert!(parsed.is_clean());
/// assert_eq!(parsed.names().collect::<Vec<_>>(), vec!["-c", "--config"]);
/// assert_eq!(parsed.options[1].args, "<file>");
///
/// let parsed = parse_option_signatures("+x");
/// assert_eq!(parsed.malformed, vec!["+x".to_string()]);
/// ```
pub fn parse_option_signatures(signature: &str) -> OptionSignatures {
    let mut parsed = OptionSignatures::default();

    for piece in split_signature(signature) {
        match parse_option(piece) {
            Some(option) => parsed.options.push(option),
            None => {
                warn!(
                    piece,
                    "malformed option description, should look like \"opt\", \"-opt args\", \"--opt args\" or \"/opt args\""
                );
                parsed.malformed.push(piece.to_string());
            }
        }
    }

    parsed
}

/// Parses a single option spelling such as `--config <file>`.
///
/// # Examples
///
/// ```
/// use optref_core::{OptionSignature, parse_option};
///
/// assert_eq!(
///     parse_option("/opt value"),
///     Some(OptionSignature::new("/opt", "value"))
/// );
/// assert_eq!(parse_option("<file>"), None);
/// ```
pub fn parse_option(piece: &str) -> Option<OptionSignature> {
    let caps = OPTION_RE.captures(piece.trim())?;
    let name = caps.get(1)?.as_str();
    let args = caps.get(2).map_or("", |m| m.as_str().trim());
    Some(OptionSignature::new(name, args))
}

fn split_signature(signature: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for sep in SEPARATOR_RE.find_iter(signature) {
        if starts_with_option_prefix(&signature[sep.end()..]) {
            pieces.push(&signature[start..sep.start()]);
            start = sep.end();
        }
    }
    pieces.push(&signature[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_long_pair() {
        let parsed = parse_option_signatures("-c, --config <file>");
        assert_eq!(
            parsed.options,
            vec![
                OptionSignature::new("-c", ""),
                OptionSignature::new("--config", "<file>"),
            ]
        );
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_slash_and_bare_options() {
        let parsed = parse_option_signatures("/opt value");
        assert_eq!(parsed.options, vec![OptionSignature::new("/opt", "value")]);

        let parsed = parse_option_signatures("identify");
        assert_eq!(parsed.options, vec![OptionSignature::new("identify", "")]);
    }

    #[test]
    fn test_comma_inside_args_is_kept() {
        let parsed = parse_option_signatures("--getsms folder, start [stop]");
        assert_eq!(
            parsed.options,
            vec![OptionSignature::new("--getsms", "folder, start [stop]")]
        );
    }

    #[test]
    fn test_bare_word_after_comma_stays_in_args() {
        let parsed = parse_option_signatures("-v, daemon");
        assert_eq!(parsed.options, vec![OptionSignature::new("-v", ", daemon")]);

        let parsed = parse_option_signatures("daemon, -d");
        assert_eq!(parsed.names().collect::<Vec<_>>(), vec!["daemon", "-d"]);
    }

    #[test]
    fn test_three_spellings() {
        let parsed = parse_option_signatures("-p, --pid <file>, /pid <file>");
        assert_eq!(
            parsed.names().collect::<Vec<_>>(),
            vec!["-p", "--pid", "/pid"]
        );
        assert_eq!(parsed.options[2].args, "<file>");
    }

    #[test]
    fn test_malformed_pieces_are_collected() {
        let parsed = parse_option_signatures("+x");
        assert!(parsed.options.is_empty());
        assert_eq!(parsed.malformed, vec!["+x".to_string()]);

        let parsed = parse_option_signatures("-v, /");
        assert_eq!(parsed.names().collect::<Vec<_>>(), vec!["-v"]);
        assert_eq!(parsed.malformed, vec!["/".to_string()]);
    }

    #[test]
    fn test_empty_signature() {
        let parsed = parse_option_signatures("   ");
        assert!(parsed.options.is_empty());
        assert!(parsed.is_clean());
    }
}
