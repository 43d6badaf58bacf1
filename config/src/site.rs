//! Documentation-site configuration.
//!
//! Describes the settings a documentation generator consumes for one
//! manual: project metadata, HTML theme choice, LaTeX/Texinfo/EPUB output
//! tables and the manual-page catalog. The values are carried through to
//! the generator as-is; this module only loads, fills in and checks them.
//!
//! # Example YAML
//!
//! ```yaml
//! project: Gammu
//! author: Michal Čihař <michal@cihar.com>
//! copyright: 2009-2015, Michal Čihař <michal@cihar.com>
//! version: "@GAMMU_VERSION@"
//! extensions: [breathe, configext, sphinx.ext.graphviz]
//! html:
//!   preferred_theme: alabaster
//!   fallback_theme: default
//! man_pages:
//!   - source: smsd/smsd
//!     name: gammu-smsd
//!     description: SMS daemon for Gammu
//!     authors: Michal Čihař <michal@cihar.com>
//!     section: 1
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([A-Za-z_][A-Za-z0-9_]*)@").expect("static regex must compile")
});

/// Environment variable set by the Read the Docs build service.
pub const READTHEDOCS_ENV: &str = "READTHEDOCS";

/// Returns `true` when running inside a Read the Docs build.
pub fn on_read_the_docs() -> bool {
    std::env::var(READTHEDOCS_ENV).is_ok_and(|value| value == "True")
}

/// Parses a `NAME=VALUE` substitution variable.
///
/// # Examples
///
/// ```
/// use optref_config::parse_variable;
///
/// let (name, value) = parse_variable("GAMMU_VERSION=1.42.0").unwrap();
/// assert_eq!(name, "GAMMU_VERSION");
/// assert_eq!(value, "1.42.0");
/// assert!(parse_variable("novalue").is_err());
/// ```
pub fn parse_variable(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidVariable(format!("expected NAME=VALUE, got '{raw}'")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidVariable(format!("empty name in '{raw}'")));
    }
    Ok((name.to_string(), value.to_string()))
}

fn default_master_doc() -> String {
    "index".to_string()
}

fn default_source_suffix() -> String {
    ".rst".to_string()
}

fn default_pygments_style() -> String {
    "sphinx".to_string()
}

fn default_graphviz_format() -> String {
    "svg".to_string()
}

/// HTML output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Theme used when it is installed and the build is not on Read the Docs.
    pub preferred_theme: String,
    /// Theme used otherwise.
    pub fallback_theme: String,
    pub theme_path: Vec<String>,
    pub static_path: Vec<String>,
    /// Base name for HTML help builder output.
    pub help_basename: Option<String>,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            preferred_theme: "alabaster".to_string(),
            fallback_theme: "default".to_string(),
            theme_path: vec![".".to_string()],
            static_path: Vec::new(),
            help_basename: None,
        }
    }
}

impl HtmlConfig {
    /// Picks the HTML theme for a build.
    ///
    /// Read the Docs builds and builds without the preferred theme installed
    /// use the fallback theme.
    ///
    /// # Examples
    ///
    /// ```
    /// use optref_config::HtmlConfig;
    ///
    /// let html = HtmlConfig::default();
    /// assert_eq!(html.select_theme(false, true), "alabaster");
    /// assert_eq!(html.select_theme(true, true), "default");
    /// assert_eq!(html.select_theme(false, false), "default");
    /// ```
    pub fn select_theme(&self, on_rtd: bool, preferred_available: bool) -> &str {
        if on_rtd || !preferred_available {
            &self.fallback_theme
        } else {
            &self.preferred_theme
        }
    }
}

/// One LaTeX output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatexDocument {
    /// Source start file.
    pub source: String,
    /// Output `.tex` file name.
    pub target: String,
    pub title: String,
    pub author: String,
    /// Document class (`manual`, `howto`, ...).
    pub document_class: String,
    /// Only include the toctree of the start file.
    #[serde(default)]
    pub toctree_only: bool,
}

/// LaTeX output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatexConfig {
    /// Paper size (`a4`, `letter`).
    pub paper_size: String,
    pub documents: Vec<LatexDocument>,
    pub domain_indices: bool,
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            paper_size: "letter".to_string(),
            documents: Vec::new(),
            domain_indices: true,
        }
    }
}

/// API documentation bridge settings (Doxygen XML projects).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreatheConfig {
    /// Project name to Doxygen XML directory.
    #[serde(default)]
    pub projects: BTreeMap<String, String>,
    #[serde(default)]
    pub default_project: Option<String>,
    /// File extension to documentation domain (`h` -> `c`).
    #[serde(default)]
    pub domain_by_extension: BTreeMap<String, String>,
}

/// One manual page produced by the man-page builder.
///
/// # Examples
///
/// ```
/// use optref_config::ManPage;
///
/// let page = ManPage::new("smsd/smsd", "gammu-smsd", "SMS daemon for Gammu", 1);
/// assert_eq!(page.reference(), "gammu-smsd(1)");
/// assert!(page.documents_program());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManPage {
    /// Source start file.
    pub source: String,
    /// Page name, which is also the program name for command pages.
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub authors: String,
    /// Manual section (1 = user commands, 5 = file formats, ...).
    pub section: u8,
}

impl ManPage {
    pub fn new(
        source: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        section: u8,
    ) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
            description: description.into(),
            authors: String::new(),
            section,
        }
    }

    /// Returns the conventional `name(section)` form.
    pub fn reference(&self) -> String {
        format!("{}({})", self.name, self.section)
    }

    /// Returns `true` for user (1) and administration (8) command pages.
    pub fn documents_program(&self) -> bool {
        matches!(self.section, 1 | 8)
    }
}

/// One Texinfo output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TexinfoDocument {
    pub source: String,
    pub target: String,
    pub title: String,
    pub author: String,
    /// Entry name in the Info directory menu.
    pub dir_entry: String,
    pub description: String,
    pub category: String,
}

/// EPUB metadata. Missing fields fall back to project metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpubConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub exclude_files: Vec<String>,
}

/// Top-level documentation-site configuration.
///
/// # Examples
///
/// ```
/// use optref_config::SiteConfig;
///
/// let config = SiteConfig::from_yaml_str(r#"
/// project: Gammu
/// author: Michal Čihař
/// version: "1.42.0"
/// man_pages:
///   - { source: gammu/index, name: gammu, description: phone tool, section: 1 }
///   - { source: config/index, name: gammurc, description: config file, section: 5 }
/// "#).unwrap();
///
/// assert_eq!(config.release(), "1.42.0");
/// assert_eq!(config.master_doc, "index");
/// assert_eq!(config.declared_programs(), vec!["gammu"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub project: String,
    pub author: String,
    #[serde(default)]
    pub copyright: String,
    /// Short X.Y version.
    pub version: String,
    /// Full version; defaults to [`version`](SiteConfig::version).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    #[serde(default = "default_master_doc")]
    pub master_doc: String,
    #[serde(default = "default_source_suffix")]
    pub source_suffix: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub templates_path: Vec<String>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default = "default_pygments_style")]
    pub pygments_style: String,
    /// Inventory name to documentation base URL.
    #[serde(default)]
    pub intersphinx: BTreeMap<String, String>,
    #[serde(default)]
    pub html: HtmlConfig,
    #[serde(default)]
    pub latex: LatexConfig,
    #[serde(default)]
    pub breathe: BreatheConfig,
    #[serde(default)]
    pub man_pages: Vec<ManPage>,
    #[serde(default)]
    pub texinfo_documents: Vec<TexinfoDocument>,
    #[serde(default)]
    pub epub: EpubConfig,
    #[serde(default = "default_graphviz_format")]
    pub graphviz_output_format: String,
}

impl SiteConfig {
    /// Loads configuration from a YAML file, or JSON when the extension is
    /// `.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ConfigError::IoError) if the file cannot
    /// be read, or a parse error for the detected format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let config = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        debug!(path = %path.display(), "loaded site configuration");
        Ok(config)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Saves the configuration, as JSON when the extension is `.json` and
    /// YAML otherwise.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_yaml::to_writer(writer, self)?;
        }
        Ok(())
    }

    /// Returns the full release string.
    pub fn release(&self) -> &str {
        self.release.as_deref().unwrap_or(&self.version)
    }

    /// Returns the EPUB metadata with blanks filled from project metadata.
    pub fn resolved_epub(&self) -> EpubConfig {
        EpubConfig {
            title: Some(self.epub.title.clone().unwrap_or_else(|| self.project.clone())),
            author: Some(self.epub.author.clone().unwrap_or_else(|| self.author.clone())),
            publisher: Some(
                self.epub
                    .publisher
                    .clone()
                    .unwrap_or_else(|| self.author.clone()),
            ),
            copyright: Some(
                self.epub
                    .copyright
                    .clone()
                    .unwrap_or_else(|| self.copyright.clone()),
            ),
            exclude_files: self.epub.exclude_files.clone(),
        }
    }

    /// Looks up a manual page by name.
    pub fn man_page(&self, name: &str) -> Option<&ManPage> {
        self.man_pages.iter().find(|page| page.name == name)
    }

    /// Returns the manual pages in `section`, in catalog order.
    pub fn man_pages_in_section(&self, section: u8) -> Vec<&ManPage> {
        self.man_pages
            .iter()
            .filter(|page| page.section == section)
            .collect()
    }

    /// Returns the program names documented by command manual pages.
    ///
    /// These are the names option references are expected to resolve to.
    pub fn declared_programs(&self) -> Vec<&str> {
        self.man_pages
            .iter()
            .filter(|page| page.documents_program())
            .map(|page| page.name.as_str())
            .collect()
    }

    /// Returns every `@NAME@` placeholder still present in string values.
    pub fn placeholders(&self) -> Result<BTreeSet<String>> {
        let value = serde_yaml::to_value(self)?;
        let mut found = BTreeSet::new();
        visit_strings(&value, &mut |text| {
            for caps in PLACEHOLDER_RE.captures_iter(text) {
                found.insert(caps[1].to_string());
            }
        });
        Ok(found)
    }

    /// Replaces `@NAME@` placeholders in every string value.
    ///
    /// # Errors
    ///
    /// Returns [`UnresolvedPlaceholder`](crate::ConfigError::UnresolvedPlaceholder)
    /// naming the first placeholder (alphabetically) with no value in `vars`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use optref_config::SiteConfig;
    ///
    /// let template = SiteConfig::from_yaml_str(
    ///     "project: Gammu\nauthor: me\nversion: '@GAMMU_VERSION@'\n",
    /// ).unwrap();
    ///
    /// let vars = BTreeMap::from([("GAMMU_VERSION".to_string(), "1.42.0".to_string())]);
    /// let config = template.substitute(&vars).unwrap();
    /// assert_eq!(config.version, "1.42.0");
    ///
    /// assert!(template.substitute(&BTreeMap::new()).is_err());
    /// ```
    pub fn substitute(&self, vars: &BTreeMap<String, String>) -> Result<Self> {
        let mut value = serde_yaml::to_value(self)?;
        let mut missing = BTreeSet::new();

        visit_strings_mut(&mut value, &mut |text| {
            let replaced = PLACEHOLDER_RE.replace_all(text, |caps: &Captures<'_>| {
                match vars.get(&caps[1]) {
                    Some(replacement) => replacement.clone(),
                    None => {
                        missing.insert(caps[1].to_string());
                        caps[0].to_string()
                    }
                }
            });
            *text = replaced.into_owned();
        });

        if let Some(name) = missing.into_iter().next() {
            return Err(ConfigError::UnresolvedPlaceholder(name));
        }
        Ok(serde_yaml::from_value(value)?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn visit_strings(value: &Value, visit: &mut impl FnMut(&str)) {
    match value {
        Value::String(text) => visit(text),
        Value::Sequence(items) => items.iter().for_each(|item| visit_strings(item, visit)),
        Value::Mapping(map) => map.iter().for_each(|(_, item)| visit_strings(item, visit)),
        Value::Tagged(tagged) => visit_strings(&tagged.value, visit),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

fn visit_strings_mut(value: &mut Value, visit: &mut impl FnMut(&mut String)) {
    match value {
        Value::String(text) => visit(text),
        Value::Sequence(items) => {
            for item in items {
                visit_strings_mut(item, visit);
            }
        }
        Value::Mapping(map) => {
            for (_, item) in map.iter_mut() {
                visit_strings_mut(item, visit);
            }
        }
        Value::Tagged(tagged) => visit_strings_mut(&mut tagged.value, visit),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
