//! Reference and option type definitions.
//!
//! These are the values that flow between a document walk and the
//! documentation generator's link-resolution step. They serialize with
//! [`serde`] so the CLI can emit them as JSON or YAML.

use serde::{Deserialize, Serialize};

/// Characters that introduce a command-line option (`-x`, `--long`, `/opt`).
///
/// `--` needs no entry of its own: anything starting with `--` also starts
/// with `-`.
pub const OPTION_PREFIXES: [char; 2] = ['-', '/'];

/// Returns `true` if `text` starts with an option prefix character.
///
/// # Examples
///
/// ```
/// use optref_core::starts_with_option_prefix;
///
/// assert!(starts_with_option_prefix("--verbose"));
/// assert!(starts_with_option_prefix("/opt"));
/// assert!(!starts_with_option_prefix("gammu --help"));
/// ```
pub fn starts_with_option_prefix(text: &str) -> bool {
    text.starts_with(OPTION_PREFIXES)
}

/// A cross-reference as written by a document author.
///
/// `title` is the display label and `target` the reference token. When the
/// author did not supply a separate label both fields hold the same text.
///
/// # Examples
///
/// ```
/// use optref_core::ReferenceRequest;
///
/// let bare = ReferenceRequest::bare("gammu-smsd --pid");
/// assert!(!bare.has_explicit_title);
/// assert_eq!(bare.title, bare.target);
///
/// let labelled = ReferenceRequest::labelled("PID file", "gammu-smsd --pid");
/// assert!(labelled.has_explicit_title);
/// assert_eq!(labelled.title, "PID file");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRequest {
    /// Whether the author wrote a label distinct from the target.
    #[serde(default)]
    pub has_explicit_title: bool,
    /// Display label shown to the reader.
    pub title: String,
    /// Raw reference token, possibly encoding `program option`.
    pub target: String,
}

impl ReferenceRequest {
    /// Creates a reference without a separate label.
    pub fn bare(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            has_explicit_title: false,
            title: text.clone(),
            target: text,
        }
    }

    /// Creates a reference with an explicit display label.
    pub fn labelled(title: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            has_explicit_title: true,
            title: title.into(),
            target: target.into(),
        }
    }
}

/// Result of resolving a [`ReferenceRequest`].
///
/// `program` is either the inherited program context or a name taken from
/// the reference text itself. `title` is always the request's label,
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReference {
    /// Program the option belongs to, if any is in scope.
    pub program: Option<String>,
    /// Display label, passed through for rendering.
    pub title: String,
    /// Option token used to build the link.
    pub target: String,
}

impl ResolvedReference {
    /// Returns the `(program, target)` pair handed to link resolution.
    pub fn pair(&self) -> (Option<&str>, &str) {
        (self.program.as_deref(), &self.target)
    }
}

/// One option parsed from an option description signature.
///
/// # Examples
///
/// ```
/// use optref_core::OptionSignature;
///
/// let sig = OptionSignature::new("--config", "<file>");
/// assert_eq!(sig.to_string(), "--config <file>");
/// assert!(sig.takes_args());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSignature {
    /// Option name including its prefix (`-c`, `--config`, `/opt`, `name`).
    pub name: String,
    /// Argument placeholder text following the name, possibly empty.
    pub args: String,
}

impl OptionSignature {
    pub fn new(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
        }
    }

    /// Returns `true` when the option is documented with arguments.
    pub fn takes_args(&self) -> bool {
        !self.args.is_empty()
    }
}

impl std::fmt::Display for OptionSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.args.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{} {}", self.name, self.args)
        }
    }
}

/// Options parsed from one signature line, plus the pieces that did not
/// look like options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSignatures {
    /// Successfully parsed options, in signature order.
    pub options: Vec<OptionSignature>,
    /// Signature pieces that did not match the option pattern.
    pub malformed: Vec<String>,
}

impl OptionSignatures {
    /// Returns `true` if every piece parsed.
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }

    /// Iterates over the option names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|opt| opt.name.as_str())
    }
}

/// A single option reference found while scanning a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceOccurrence {
    /// 1-based line number of the role.
    pub line: usize,
    /// Role body as written between the backticks.
    pub raw: String,
    /// Program declared in scope at this point of the document.
    pub context_program: Option<String>,
    /// Reference as split into label and target.
    pub request: ReferenceRequest,
    /// Resolution result.
    pub resolved: ResolvedReference,
}
