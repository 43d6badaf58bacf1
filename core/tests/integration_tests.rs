use optref_core::{
    InheritProgram, LinkProcessor, ProgramScope, ProgramSplitting, ReferenceRequest,
    parse_option_signatures, resolve, resolve_request, scan_document,
};

// ---------------------------------------------------------------------------
// Reference resolution
// ---------------------------------------------------------------------------

#[test]
fn test_bare_options_inherit_program() {
    for target in ["--verbose", "-x", "/opt", "identify", "--pid=FILE"] {
        let resolved = resolve(Some("gammu"), false, target, target);
        assert_eq!(resolved.program.as_deref(), Some("gammu"));
        assert_eq!(resolved.target, target);
    }
}

#[test]
fn test_inline_program_overrides_context() {
    let resolved = resolve(Some("gammu"), false, "mytool --flag value", "mytool --flag value");
    assert_eq!(resolved.program.as_deref(), Some("mytool"));
    assert_eq!(resolved.target, "--flag value");

    let resolved = resolve(Some("gammu"), false, "my tool --flag", "my tool --flag");
    assert_eq!(resolved.program.as_deref(), Some("my-tool"));
    assert_eq!(resolved.target, "--flag");
}

#[test]
fn test_labelled_reference_keeps_title() {
    let resolved = resolve(None, true, "Some Label", "othertool /opt value");
    assert_eq!(resolved.program.as_deref(), Some("othertool"));
    assert_eq!(resolved.target, "/opt value");
    assert_eq!(resolved.title, "Some Label");
}

#[test]
fn test_reresolving_output_is_stable() {
    let scope = ProgramScope::with_program("gammu");
    let requests = [
        ReferenceRequest::bare("gammu-smsd --config file"),
        ReferenceRequest::bare("--help"),
        ReferenceRequest::labelled("label", "jadmaker -d"),
        ReferenceRequest::labelled("label", "tool /opt"),
    ];

    for request in &requests {
        let first = resolve_request(scope.current(), request);
        let again = resolve(first.program.as_deref(), true, &first.title, &first.target);
        assert_eq!(again, first, "request {request:?}");
    }
}

#[test]
fn test_processors_are_interchangeable() {
    let processors: [&dyn LinkProcessor; 2] = [&ProgramSplitting, &InheritProgram];
    let request = ReferenceRequest::bare("gammu-smsd --pid");
    let programs: Vec<_> = processors
        .iter()
        .map(|p| p.process_link(Some("gammu"), &request).program)
        .collect();
    assert_eq!(
        programs,
        vec![Some("gammu-smsd".to_string()), Some("gammu".to_string())]
    );
}

#[test]
fn test_resolved_reference_serializes() {
    let resolved = resolve(None, false, "gammu-smsd --pid", "gammu-smsd --pid");
    let json = serde_json::to_value(&resolved).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "program": "gammu-smsd",
            "title": "gammu-smsd --pid",
            "target": "--pid"
        })
    );
}

// ---------------------------------------------------------------------------
// Signatures and scanning
// ---------------------------------------------------------------------------

#[test]
fn test_signatures_register_under_declared_program() {
    let doc = "\
.. program:: gammu smsd

.. option:: -c, --config <file>

Refer to :option:`gammu smsd --config` from elsewhere.
";
    let parsed = parse_option_signatures("-c, --config <file>");
    let found = scan_document(doc);
    assert_eq!(found.len(), 1);

    let occurrence = &found[0];
    assert_eq!(occurrence.context_program.as_deref(), Some("gammu-smsd"));
    assert_eq!(occurrence.resolved.program, occurrence.context_program);
    assert!(parsed.names().any(|name| name == occurrence.resolved.target));
}
