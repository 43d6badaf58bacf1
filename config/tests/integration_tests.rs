use std::collections::BTreeMap;
use std::path::PathBuf;

use optref_config::{ConfigError, SiteConfig, ValidationError, validate_config};
use optref_core::{ProgramScope, ReferenceRequest, resolve_request};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/gammu-site.yml")
}

fn build_vars() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("GAMMU_VERSION".to_string(), "1.42.0".to_string()),
        (
            "CMAKE_CURRENT_SOURCE_DIR".to_string(),
            "/src/gammu/docs/manual".to_string(),
        ),
        ("DOXYGEN_OUTPUT".to_string(), "/build/docs/api".to_string()),
    ])
}

fn load_fixture() -> SiteConfig {
    SiteConfig::load(fixture_path())
        .unwrap()
        .substitute(&build_vars())
        .unwrap()
}

// ---------------------------------------------------------------------------
// Loading and substitution
// ---------------------------------------------------------------------------

#[test]
fn test_fixture_loads_and_validates() {
    let config = load_fixture();
    assert_eq!(config.project, "Gammu");
    assert_eq!(config.release(), "1.42.0");
    assert_eq!(config.man_pages.len(), 20);
    assert_eq!(config.latex.documents.len(), 2);
    assert_eq!(config.texinfo_documents.len(), 1);
    assert!(validate_config(&config).is_empty());
}

#[test]
fn test_fixture_requires_build_variables() {
    let template = SiteConfig::load(fixture_path()).unwrap();
    assert_eq!(template.placeholders().unwrap().len(), 3);

    let err = template.substitute(&BTreeMap::new()).unwrap_err();
    assert!(matches!(err, ConfigError::UnresolvedPlaceholder(ref name) if name == "CMAKE_CURRENT_SOURCE_DIR"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SiteConfig::load(dir.path().join("absent.yml")).unwrap_err();
    assert!(matches!(err, ConfigError::IoError(_)));
}

#[test]
fn test_malformed_yaml_is_yaml_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yml");
    std::fs::write(&path, "project: [unterminated\n").unwrap();
    let err = SiteConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::YamlError(_)));
}

#[test]
fn test_json_copy_matches_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.json");
    let config = load_fixture();
    config.save(&path).unwrap();
    assert_eq!(SiteConfig::load(&path).unwrap(), config);
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[test]
fn test_declared_programs_cover_command_pages() {
    let config = load_fixture();
    assert_eq!(
        config.declared_programs(),
        vec![
            "gammu-smsd-inject",
            "gammu-smsd-monitor",
            "gammu-smsd",
            "gammu",
            "jadmaker",
            "gammu-config",
            "gammu-detect",
        ]
    );
    assert_eq!(config.man_pages_in_section(7).len(), 9);
    assert_eq!(config.man_pages_in_section(5).len(), 4);
}

#[test]
fn test_resolved_references_name_declared_programs() {
    let config = load_fixture();
    let declared = config.declared_programs();
    let scope = ProgramScope::with_program("gammu");

    for text in ["--identify", "gammu smsd --daemon", "gammu-smsd-inject -c"] {
        let resolved = resolve_request(scope.current(), &ReferenceRequest::bare(text));
        let program = resolved.program.unwrap();
        assert!(declared.contains(&program.as_str()), "{text} -> {program}");
    }
}

#[test]
fn test_duplicate_page_in_fixture_is_reported() {
    let mut config = load_fixture();
    let page = config.man_page("gammu").cloned().unwrap();
    config.man_pages.push(page);
    assert_eq!(
        validate_config(&config),
        vec![ValidationError::DuplicateManPage("gammu(1)".to_string())]
    );
}

#[test]
fn test_theme_selection_from_fixture() {
    let config = load_fixture();
    assert_eq!(config.html.select_theme(false, true), "alabaster");
    assert_eq!(config.html.select_theme(true, true), "default");
    assert_eq!(config.html.help_basename.as_deref(), Some("gammudoc"));
}
