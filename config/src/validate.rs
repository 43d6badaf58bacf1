//! Site configuration validation.
//!
//! Catches catalog mistakes that the documentation generator would only
//! surface as broken links or overwritten output files: duplicate manual
//! pages, impossible sections, and page names that option references can
//! never resolve to.
//!
//! # Examples
//!
//! ```
//! use optref_config::*;
//!
//! let mut config = SiteConfig::from_yaml_str("project: Gammu\nauthor: me\nversion: '1.0'\n").unwrap();
//! config.man_pages.push(ManPage::new("gammu/index", "gammu", "phone tool", 1));
//! assert!(validate_config(&config).is_empty());
//!
//! config.man_pages.push(ManPage::new("utils/jad", "jad maker", "JAD generator", 1));
//! assert_eq!(
//!     validate_config(&config),
//!     vec![ValidationError::UnnormalizedProgramName {
//!         name: "jad maker".into(),
//!         expected: "jad-maker".into(),
//!     }]
//! );
//! ```

use std::collections::HashSet;

use optref_core::normalize_program_name;
use thiserror::Error;
use tracing::debug;

use crate::SiteConfig;

/// Highest manual section number.
pub const MAX_MAN_SECTION: u8 = 9;

/// Site configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Project name is empty or whitespace-only.
    #[error("project name cannot be empty")]
    EmptyProject,
    /// Version string is empty.
    #[error("version cannot be empty")]
    EmptyVersion,
    /// A manual page has no name.
    #[error("man page from '{0}' has an empty name")]
    EmptyManPageName(String),
    /// Two manual pages share a name and section.
    #[error("duplicate man page: {0}")]
    DuplicateManPage(String),
    /// Section number outside 1 through 9.
    #[error("man page {name} has invalid section {section}")]
    InvalidManSection { name: String, section: u8 },
    /// Command page name differs from its normalized program form, so
    /// option references to it cannot match.
    #[error("man page name '{name}' is not a normalized program name (expected '{expected}')")]
    UnnormalizedProgramName { name: String, expected: String },
    /// Two LaTeX documents write the same output file.
    #[error("duplicate LaTeX output file: {0}")]
    DuplicateLatexTarget(String),
    /// Default API project is not among the configured projects.
    #[error("unknown default API project: {0}")]
    UnknownDefaultProject(String),
}

/// Validates a site configuration, returning every problem found.
pub fn validate_config(config: &SiteConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.project.trim().is_empty() {
        errors.push(ValidationError::EmptyProject);
    }
    if config.version.trim().is_empty() {
        errors.push(ValidationError::EmptyVersion);
    }

    validate_man_pages(config, &mut errors);

    let mut targets = HashSet::new();
    for document in &config.latex.documents {
        if !targets.insert(document.target.as_str()) {
            errors.push(ValidationError::DuplicateLatexTarget(document.target.clone()));
        }
    }

    if let Some(default) = &config.breathe.default_project
        && !config.breathe.projects.contains_key(default)
    {
        errors.push(ValidationError::UnknownDefaultProject(default.clone()));
    }

    debug!(errors = errors.len(), "validated site configuration");
    errors
}

fn validate_man_pages(config: &SiteConfig, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();

    for page in &config.man_pages {
        if page.name.trim().is_empty() {
            errors.push(ValidationError::EmptyManPageName(page.source.clone()));
            continue;
        }

        if !(1..=MAX_MAN_SECTION).contains(&page.section) {
            errors.push(ValidationError::InvalidManSection {
                name: page.name.clone(),
                section: page.section,
            });
        }

        if !seen.insert((page.name.as_str(), page.section)) {
            errors.push(ValidationError::DuplicateManPage(page.reference()));
        }

        if page.documents_program() {
            let expected = normalize_program_name(&page.name);
            if expected != page.name {
                errors.push(ValidationError::UnnormalizedProgramName {
                    name: page.name.clone(),
                    expected,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{LatexDocument, ManPage};

    use super::*;

    fn base_config() -> SiteConfig {
        SiteConfig::from_yaml_str("project: Gammu\nauthor: me\nversion: '1.42.0'\n").unwrap()
    }

    #[test]
    fn test_validate_accepts_catalog() {
        let mut config = base_config();
        config.man_pages = vec![
            ManPage::new("gammu/index", "gammu", "phone tool", 1),
            ManPage::new("config/index", "gammurc", "configuration file", 5),
            ManPage::new("smsd/files", "gammu-smsd-files", "files backend", 7),
        ];
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_validate_rejects_duplicate_man_page() {
        let mut config = base_config();
        config.man_pages = vec![
            ManPage::new("gammu/index", "gammu", "phone tool", 1),
            ManPage::new("gammu/other", "gammu", "again", 1),
        ];
        assert_eq!(
            validate_config(&config),
            vec![ValidationError::DuplicateManPage("gammu(1)".to_string())]
        );
    }

    #[test]
    fn test_same_name_in_other_section_is_allowed() {
        let mut config = base_config();
        config.man_pages = vec![
            ManPage::new("smsd/smsd", "gammu-smsd", "daemon", 1),
            ManPage::new("smsd/files", "gammu-smsd", "daemon files", 7),
        ];
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_section() {
        let mut config = base_config();
        config.man_pages = vec![ManPage::new("x", "tool", "x", 0), ManPage::new("y", "other", "y", 12)];
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 2);
        assert!(
            errors
                .iter()
                .all(|e| matches!(e, ValidationError::InvalidManSection { .. }))
        );
    }

    #[test]
    fn test_validate_ignores_spacing_in_non_command_pages() {
        let mut config = base_config();
        config.man_pages = vec![ManPage::new("formats/backup", "backup format", "x", 5)];
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let mut config = base_config();
        config.project = " ".to_string();
        config.version = String::new();
        config.man_pages = vec![ManPage::new("empty", "", "x", 1)];
        config.breathe.default_project = Some("api".to_string());
        let document = LatexDocument {
            source: "contents".to_string(),
            target: "gammu.tex".to_string(),
            title: "Gammu Manual".to_string(),
            author: "me".to_string(),
            document_class: "manual".to_string(),
            toctree_only: true,
        };
        config.latex.documents = vec![document.clone(), document];

        assert_eq!(
            validate_config(&config),
            vec![
                ValidationError::EmptyProject,
                ValidationError::EmptyVersion,
                ValidationError::EmptyManPageName("empty".to_string()),
                ValidationError::DuplicateLatexTarget("gammu.tex".to_string()),
                ValidationError::UnknownDefaultProject("api".to_string()),
            ]
        );
    }
}
