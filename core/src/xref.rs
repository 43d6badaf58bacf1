//! Option cross-reference resolution.
//!
//! An option reference is either a bare option (`--verbose`), which belongs
//! to whichever program is currently documented, or a compact
//! `program option` token (`gammu-smsd --pid`) naming another program.
//! [`resolve`] decides which case applies and returns the program/target
//! pair used for link construction.
//!
//! # Examples
//!
//! ```
//! use optref_core::resolve;
//!
//! let bare = resolve(Some("gammu"), false, "--help", "--help");
//! assert_eq!(bare.pair(), (Some("gammu"), "--help"));
//!
//! let other = resolve(Some("gammu"), false, "gammu-smsd --pid", "gammu-smsd --pid");
//! assert_eq!(other.pair(), (Some("gammu-smsd"), "--pid"));
//! ```

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::{ReferenceRequest, ResolvedReference, starts_with_option_prefix};

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex must compile"));

/// Literal program argument that clears the program scope.
pub const NO_PROGRAM: &str = "None";

/// Normalizes a program name the way program declarations register it.
///
/// Surrounding whitespace is dropped and every inner whitespace run becomes
/// a single hyphen, so `"gammu smsd"` and `"gammu-smsd"` name the same
/// program.
///
/// # Examples
///
/// ```
/// use optref_core::normalize_program_name;
///
/// assert_eq!(normalize_program_name("my tool"), "my-tool");
/// assert_eq!(normalize_program_name("  gammu \t smsd "), "gammu-smsd");
/// assert_eq!(normalize_program_name("gammu"), "gammu");
/// ```
pub fn normalize_program_name(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), "-").into_owned()
}

/// Interprets the argument of a program declaration directive.
///
/// Returns the normalized program name, or `None` when the argument is
/// blank or the literal `None`, which resets the scope.
///
/// # Examples
///
/// ```
/// use optref_core::declare_program;
///
/// assert_eq!(declare_program("gammu smsd").as_deref(), Some("gammu-smsd"));
/// assert_eq!(declare_program("None"), None);
/// assert_eq!(declare_program("   "), None);
/// ```
pub fn declare_program(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NO_PROGRAM {
        return None;
    }
    Some(normalize_program_name(trimmed))
}

/// Program context for one document walk.
///
/// The walker owns this value and passes [`current`](ProgramScope::current)
/// into each [`resolve`] call; the parser itself never reads it.
///
/// # Examples
///
/// ```
/// use optref_core::ProgramScope;
///
/// let mut scope = ProgramScope::default();
/// assert_eq!(scope.current(), None);
///
/// scope.declare("gammu smsd");
/// assert_eq!(scope.current(), Some("gammu-smsd"));
///
/// scope.declare("None");
/// assert_eq!(scope.current(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramScope {
    program: Option<String>,
}

impl ProgramScope {
    /// Starts a scope with `program` already declared.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: declare_program(program),
        }
    }

    /// Applies a program declaration directive argument.
    pub fn declare(&mut self, raw: &str) {
        self.program = declare_program(raw);
        debug!(program = ?self.program, "program scope changed");
    }

    /// Returns the program currently in scope.
    pub fn current(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// Drops the program in scope.
    pub fn clear(&mut self) {
        self.program = None;
    }
}

/// Splits `program option` text at its first space that is followed by an
/// option prefix.
///
/// Returns `None` when there is no such space or nothing but whitespace
/// precedes it. The program part is normalized and the option part
/// trimmed.
///
/// # Examples
///
/// ```
/// use optref_core::split_program_target;
///
/// assert_eq!(
///     split_program_target("my tool --flag value"),
///     Some(("my-tool".to_string(), "--flag value".to_string()))
/// );
/// assert_eq!(split_program_target("no option here"), None);
/// ```
pub fn split_program_target(text: &str) -> Option<(String, String)> {
    let (index, _) = text
        .match_indices(' ')
        .find(|(index, _)| starts_with_option_prefix(&text[index + 1..]))?;

    let program = &text[..index];
    if program.trim().is_empty() {
        return None;
    }
    Some((
        normalize_program_name(program),
        text[index + 1..].trim().to_string(),
    ))
}

/// Resolves an option reference into its program and target.
///
/// Without an explicit title the display text is what the author typed, so
/// `title` is inspected: if it contains a space and does not already start
/// with `/` or `-`, it is split into program and option. With an explicit
/// title the `target` is inspected instead, with no leading-character
/// restriction. In every other case the program is inherited from
/// `context_program` and the target is returned as given.
///
/// This never fails; input that cannot be split falls back to the inherited
/// program. The returned target never carries surrounding whitespace.
///
/// # Examples
///
/// ```
/// use optref_core::resolve;
///
/// let r = resolve(None, true, "Some Label", "othertool /opt value");
/// assert_eq!(r.program.as_deref(), Some("othertool"));
/// assert_eq!(r.target, "/opt value");
/// assert_eq!(r.title, "Some Label");
///
/// let r = resolve(Some("gammu"), false, "-x", "-x");
/// assert_eq!(r.pair(), (Some("gammu"), "-x"));
/// ```
pub fn resolve(
    context_program: Option<&str>,
    has_explicit_title: bool,
    title: &str,
    target: &str,
) -> ResolvedReference {
    let candidate = if has_explicit_title {
        target.contains(' ').then_some(target)
    } else {
        (title.contains(' ') && !starts_with_option_prefix(title)).then_some(title)
    };

    let split = candidate.and_then(split_program_target);
    let (program, target) = match split {
        Some((program, target)) => {
            debug!(%program, %target, "reference names its own program");
            (Some(program), target)
        }
        None => (context_program.map(String::from), target.trim().to_string()),
    };

    ResolvedReference {
        program,
        title: title.to_string(),
        target,
    }
}

/// Resolves a [`ReferenceRequest`] against `context_program`.
pub fn resolve_request(
    context_program: Option<&str>,
    request: &ReferenceRequest,
) -> ResolvedReference {
    resolve(
        context_program,
        request.has_explicit_title,
        &request.title,
        &request.target,
    )
}

/// Link-processing hook a documentation generator invokes for each option
/// reference.
pub trait LinkProcessor {
    /// Produces the program/target pair for `request`.
    fn process_link(
        &self,
        context_program: Option<&str>,
        request: &ReferenceRequest,
    ) -> ResolvedReference;
}

/// Lets references name their own program (`other-tool --flag`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramSplitting;

impl LinkProcessor for ProgramSplitting {
    fn process_link(
        &self,
        context_program: Option<&str>,
        request: &ReferenceRequest,
    ) -> ResolvedReference {
        resolve_request(context_program, request)
    }
}

/// Generator default: every reference belongs to the program in scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritProgram;

impl LinkProcessor for InheritProgram {
    fn process_link(
        &self,
        context_program: Option<&str>,
        request: &ReferenceRequest,
    ) -> ResolvedReference {
        ResolvedReference {
            program: context_program.map(String::from),
            title: request.title.clone(),
            target: request.target.clone(),
        }
    }
}
