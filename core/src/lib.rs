//! Option cross-reference parsing for command-line documentation.
//!
//! Documentation for command-line tools links option mentions to the place
//! where the option is described. A mention is either a bare option that
//! belongs to the program currently documented, or a `program option` token
//! naming another program. This crate turns such mentions into the
//! program/target pair a documentation generator needs to build the link:
//!
//! - [`resolve`] — the reference target rule, a pure function of the
//!   program in scope and the text the author wrote.
//! - [`normalize_program_name`] / [`declare_program`] — the one
//!   normalization shared by references and program declarations.
//! - [`ProgramScope`] — the per-document "current program" value.
//! - [`LinkProcessor`] — the hook a generator calls for each reference,
//!   implemented by [`ProgramSplitting`] and [`InheritProgram`].
//! - [`parse_option_signatures`] — option description signatures such as
//!   `-c, --config <file>`.
//! - [`scan_document`] — finds and resolves `:option:` roles in
//!   reStructuredText.
//!
//! # Example
//!
//! ```
//! use optref_core::*;
//!
//! let mut scope = ProgramScope::default();
//! scope.declare("gammu");
//!
//! // Bare option: belongs to the program in scope.
//! let r = resolve_request(scope.current(), &ReferenceRequest::bare("--config"));
//! assert_eq!(r.pair(), (Some("gammu"), "--config"));
//!
//! // Program named inline.
//! let r = resolve_request(scope.current(), &ReferenceRequest::bare("gammu smsd --pid"));
//! assert_eq!(r.pair(), (Some("gammu-smsd"), "--pid"));
//!
//! // Labelled reference: the target carries the program.
//! let r = resolve_request(
//!     scope.current(),
//!     &ReferenceRequest::labelled("PID file", "gammu-smsd --pid"),
//! );
//! assert_eq!(r.pair(), (Some("gammu-smsd"), "--pid"));
//! assert_eq!(r.title, "PID file");
//! ```

mod scan;
mod signature;
mod types;
mod xref;

pub use scan::{parse_role_body, scan_document, scan_document_with};
pub use signature::{parse_option, parse_option_signatures};
pub use types::*;
pub use xref::{
    InheritProgram, LinkProcessor, NO_PROGRAM, ProgramScope, ProgramSplitting, declare_program,
    normalize_program_name, resolve, resolve_request, split_program_target,
};
