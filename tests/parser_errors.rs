// Unhappy-path parser tests: what must fail hard, and what must be
// recovered from without losing the rest of the module.

use yangdoc::api::{analyze, Family};

fn config() -> Family {
    Family::native_config()
}

#[test]
fn test_error_not_a_module() {
    let source = "container native { leaf x { type string; } }";
    let result = analyze(source, "test.yang", &config());
    assert!(result.is_err(), "Should fail without a module statement");
}

#[test]
fn test_error_empty_input() {
    let result = analyze("", "test.yang", &config());
    assert!(result.is_err(), "Should fail on empty input");
}

#[test]
fn test_error_comment_only_input() {
    let result = analyze("// nothing here\n/* still nothing */", "test.yang", &config());
    assert!(result.is_err(), "Should fail on comment-only input");
}

#[test]
fn test_module_without_name_is_tolerated() {
    let analysis = analyze("module { }", "test.yang", &config()).unwrap();
    assert_eq!(analysis.module.name, "");
    assert!(analysis.paths.is_empty());
}

#[test]
fn test_error_module_without_body() {
    let result = analyze("module broken", "test.yang", &config());
    assert!(result.is_err(), "Should fail with neither `;` nor a block");
}

#[test]
fn test_submodule_root_is_accepted() {
    let source = "submodule example-sub { belongs-to example { prefix ex; } }";
    let result = analyze(source, "example-sub.yang", &config());
    assert!(result.is_ok(), "submodule is a valid root keyword");
}

#[test]
fn test_recovery_stray_semicolon() {
    let source = "module m { container native { ; leaf ok { type string; } } }";
    let analysis = analyze(source, "m.yang", &config()).unwrap();
    assert_eq!(analysis.recoveries.len(), 1);
    assert_eq!(analysis.paths.len(), 1, "sibling statements must survive");
}

#[test]
fn test_recovery_orphan_block() {
    let source = "module m { container native { { leaf lost { type string; } } leaf ok { type string; } } }";
    let analysis = analyze(source, "m.yang", &config()).unwrap();
    assert!(!analysis.recoveries.is_empty());
    let paths: Vec<&str> = analysis.paths.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["m:native/ok"]);
}

#[test]
fn test_recovery_unclosed_block_at_eof() {
    let source = "module m { container native { leaf ok { type string; }";
    let analysis = analyze(source, "m.yang", &config()).unwrap();
    assert!(!analysis.recoveries.is_empty(), "truncation must be noted");
    assert_eq!(analysis.paths.len(), 1, "parsed content must be kept");
}

#[test]
fn test_recovery_positions_are_reported() {
    let source = "module m {\n  container native {\n    ;\n  }\n}\n";
    let analysis = analyze(source, "m.yang", &config()).unwrap();
    assert_eq!(analysis.recoveries[0].line, 3);
}

#[test]
fn test_trailing_content_is_not_fatal() {
    let source = "module m { container native { } } leftover";
    let analysis = analyze(source, "m.yang", &config()).unwrap();
    assert!(!analysis.recoveries.is_empty());
}

#[test]
fn test_error_display_names_the_file() {
    let source = "notamodule x;";
    let err = analyze(source, "weird.yang", &config()).unwrap_err();
    // The diagnostic must render without panicking.
    let rendered = format!("{err:?}");
    assert!(!rendered.is_empty());
}
