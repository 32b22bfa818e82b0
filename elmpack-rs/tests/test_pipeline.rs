use elmpack_rs::{
    transform_sources, unwrap, BuildDescriptor, ElmpackError, PipelineOptions, Sources,
};
use rstest::rstest;
use std::fs;
use std::path::Path;

fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {:?}", path))
}

fn allocator_descriptor() -> BuildDescriptor {
    BuildDescriptor::new("Allocator", "1.0.0", "fixture build")
}

#[test]
fn test_transform_allocator_fixture() {
    let metadata = load_fixture("GENERATED-meta.js");
    let bundle = load_fixture("Allocator.js");
    let runtime = load_fixture("allocator-starter.js");

    let result = transform_sources(
        Sources {
            metadata: &metadata,
            bundle: &bundle,
            runtime: &runtime,
        },
        &allocator_descriptor(),
        &PipelineOptions::default(),
    )
    .unwrap();

    assert!(result
        .code
        .starts_with("/***\n *\n *  Allocator v.1.0.0\n *\n *  fixture build\n"));
    let body = &result.code[result.code.find("***/\n").unwrap() + 5..];
    assert!(body.starts_with("(function(){"), "{body}");
    assert!(body.contains("allocator-app"));
    assert!(body.contains("ajs-page-id"));
    assert!(body.contains("window"));
    assert!(body.len() < metadata.len() + bundle.len() + runtime.len());
}

#[test]
fn test_unwrap_allocator_fixture() {
    let bundle = load_fixture("Allocator.js");
    let unwrapped = unwrap(&bundle, "window").unwrap();
    assert!(unwrapped.starts_with("var scope = window;\n'use strict';\n"));
    assert!(unwrapped.trim_end().ends_with("}}});"));
    assert!(!unwrapped.contains("(this)"));
}

#[test]
fn test_transform_drops_unused_helper_applications() {
    // Helpers left unresolved keep their names through mangling, which makes
    // their removal observable.
    let bundle = "(function(scope){var unused = A2(f, 1, 2); var kept = B2(f, 1, 2); F4(g);}(this));";
    let result = transform_sources(
        Sources {
            metadata: "var f = 1",
            bundle,
            runtime: "",
        },
        &allocator_descriptor(),
        &PipelineOptions::default(),
    )
    .unwrap();
    assert!(!result.code.contains("A2("), "{}", result.code);
    assert!(!result.code.contains("F4("), "{}", result.code);
    assert!(result.code.contains("B2("), "{}", result.code);
}

#[test]
fn test_transform_uses_injected_global() {
    let result = transform_sources(
        Sources {
            metadata: "",
            bundle: "(function(scope){scope.Elm = {};}(this));",
            runtime: "",
        },
        &allocator_descriptor().with_copyright(false),
        &PipelineOptions {
            global_object: "globalThis".to_string(),
        },
    )
    .unwrap();
    assert!(result.code.contains("Allocator v1.0.0"));
    assert!(result.code.contains("globalThis"), "{}", result.code);
    assert!(!result.code.contains("window"), "{}", result.code);
}

#[rstest]
#[case::no_braces("Elm compiler crashed")]
#[case::unclosed("(function(scope){ var a = 1;")]
#[case::two_modules("(function(){a();})();(function(){b();})();")]
fn test_transform_rejects_malformed_bundle(#[case] bundle: &str) {
    let err = transform_sources(
        Sources {
            metadata: "",
            bundle,
            runtime: "",
        },
        &allocator_descriptor(),
        &PipelineOptions::default(),
    )
    .unwrap_err();
    assert!(
        matches!(err, ElmpackError::MalformedBundleShape(_)),
        "unexpected error: {err}"
    );
}

#[test]
fn test_transform_reports_syntax_error_in_runtime() {
    let err = transform_sources(
        Sources {
            metadata: "var meta = {}",
            bundle: "(function(scope){scope.Elm = {};}(this));",
            runtime: "Elm.Main.init({ node: ",
        },
        &allocator_descriptor(),
        &PipelineOptions::default(),
    )
    .unwrap_err();
    match err {
        ElmpackError::SyntaxError { message, .. } => assert!(!message.is_empty()),
        other => panic!("expected SyntaxError, got {other}"),
    }
}
