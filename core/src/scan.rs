//! Option reference extraction from reStructuredText sources.
//!
//! The scanner walks a document top to bottom, tracking `.. program::`
//! directives in a [`ProgramScope`] and resolving every `` :option:`...` ``
//! role against the program declared above it.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::{ReferenceOccurrence, ReferenceRequest};
use crate::xref::{LinkProcessor, ProgramScope, ProgramSplitting};

static PROGRAM_DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\.\.\s+program::\s*(.*?)\s*$").expect("static regex must compile")
});
static OPTION_ROLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":option:`([^`]+)`").expect("static regex must compile"));
static EXPLICIT_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?s)(.+?)\s*<([^<]*?)>$").expect("static regex must compile"));

/// Splits a role body into a [`ReferenceRequest`].
///
/// `Label <target>` carries an explicit title; the target is the last
/// bracketed part, so the label may itself contain angle brackets. Otherwise title and target
/// are the same text, with a leading `!` or `~` role marker removed.
///
/// # Examples
///
/// ```
/// use optref_core::parse_role_body;
///
/// let request = parse_role_body("the PID file <gammu-smsd --pid>");
/// assert!(request.has_explicit_title);
/// assert_eq!(request.title, "the PID file");
/// assert_eq!(request.target, "gammu-smsd --pid");
///
/// let request = parse_role_body("!--help");
/// assert!(!request.has_explicit_title);
/// assert_eq!(request.target, "--help");
/// ```
pub fn parse_role_body(body: &str) -> ReferenceRequest {
    if let Some(caps) = EXPLICIT_TITLE_RE.captures(body) {
        let title = caps.get(1).map_or("", |m| m.as_str());
        let target = caps.get(2).map_or("", |m| m.as_str());
        return ReferenceRequest::labelled(title, target);
    }

    let text = body.strip_prefix(['!', '~']).unwrap_or(body);
    ReferenceRequest::bare(text)
}

/// Scans `text` and resolves each option reference with [`ProgramSplitting`].
///
/// # Examples
///
/// ```
/// use optref_core::scan_document;
///
/// let doc = "\
/// .. program:: gammu
///
/// Use :option:`--config` or :option:`gammu-smsd --daemon`.
/// ";
/// let found = scan_document(doc);
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].resolved.pair(), (Some("gammu"), "--config"));
/// assert_eq!(found[1].resolved.pair(), (Some("gammu-smsd"), "--daemon"));
/// ```
pub fn scan_document(text: &str) -> Vec<ReferenceOccurrence> {
    scan_document_with(text, &ProgramSplitting)
}

/// Scans `text`, resolving references with the given processor.
pub fn scan_document_with<P: LinkProcessor + ?Sized>(
    text: &str,
    processor: &P,
) -> Vec<ReferenceOccurrence> {
    let mut scope = ProgramScope::default();
    let mut found = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if let Some(caps) = PROGRAM_DIRECTIVE_RE.captures(line) {
            scope.declare(caps.get(1).map_or("", |m| m.as_str()));
            continue;
        }

        for caps in OPTION_ROLE_RE.captures_iter(line) {
            let Some(body) = caps.get(1) else {
                continue;
            };
            let request = parse_role_body(body.as_str());
            let resolved = processor.process_link(scope.current(), &request);
            debug!(
                line = index + 1,
                raw = body.as_str(),
                program = ?resolved.program,
                target = %resolved.target,
                "resolved option reference"
            );
            found.push(ReferenceOccurrence {
                line: index + 1,
                raw: body.as_str().to_string(),
                context_program: scope.current().map(String::from),
                request,
                resolved,
            });
        }
    }

    found
}
