//! Behaviour-driven tests for project configuration loading.

use std::cell::RefCell;

use camino::{Utf8Path, Utf8PathBuf};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use schemapack::PackConfig;

const CONFIG_PATH: &str = "/project/schemapack.toml";

#[fixture]
fn config_source() -> RefCell<String> {
    RefCell::new(String::new())
}

#[fixture]
fn load_result() -> RefCell<Option<Result<PackConfig, String>>> {
    RefCell::new(None)
}

fn loaded(load_result: &RefCell<Option<Result<PackConfig, String>>>) -> PackConfig {
    match load_result.borrow().as_ref() {
        Some(Ok(config)) => config.clone(),
        Some(Err(error)) => panic!("expected configuration loading to succeed: {error}"),
        None => panic!("configuration should be loaded"),
    }
}

#[given("no configuration state has been prepared")]
fn reset_state(
    config_source: &RefCell<String>,
    load_result: &RefCell<Option<Result<PackConfig, String>>>,
) {
    config_source.borrow_mut().clear();
    load_result.borrow_mut().take();
}

#[given("an empty configuration file")]
fn empty_file(config_source: &RefCell<String>) {
    config_source.borrow_mut().clear();
}

#[given("the configuration declares module \"{name}\"")]
fn declare_module(config_source: &RefCell<String>, name: String) {
    config_source
        .borrow_mut()
        .push_str(&format!("[[modules]]\nname = \"{name}\"\n"));
}

#[given("the configuration sets the conflict policy to \"{policy}\"")]
fn set_policy(config_source: &RefCell<String>, policy: String) {
    config_source
        .borrow_mut()
        .push_str(&format!("[archive]\nconflict_policy = \"{policy}\"\n"));
}

#[given("the configuration includes unknown fields")]
fn unknown_fields(config_source: &RefCell<String>) {
    config_source
        .borrow_mut()
        .push_str("[archive]\ncompression = \"bzip2\"\n");
}

#[when("the project configuration is loaded")]
fn load_config(
    config_source: &RefCell<String>,
    load_result: &RefCell<Option<Result<PackConfig, String>>>,
) {
    let source = config_source.borrow().clone();
    let outcome = PackConfig::load_with(Utf8Path::new(CONFIG_PATH), |path| {
        assert_eq!(path, Utf8Path::new(CONFIG_PATH));
        Ok(source)
    })
    .map_err(|error| error.to_string());

    load_result.borrow_mut().replace(outcome);
}

#[then("the archive output is \"{expected}\"")]
fn assert_output(load_result: &RefCell<Option<Result<PackConfig, String>>>, expected: String) {
    assert_eq!(loaded(load_result).archive.output, Utf8PathBuf::from(expected));
}

#[then("the conflict policy is \"{expected}\"")]
fn assert_policy(load_result: &RefCell<Option<Result<PackConfig, String>>>, expected: String) {
    assert_eq!(loaded(load_result).archive.conflict_policy.as_str(), expected);
}

#[then("module \"{name}\" reads resources from \"{expected}\"")]
fn assert_resource_dir(
    load_result: &RefCell<Option<Result<PackConfig, String>>>,
    name: String,
    expected: String,
) {
    let config = loaded(load_result);
    let module = config
        .modules
        .iter()
        .find(|module| module.name == name)
        .unwrap_or_else(|| panic!("module {name} should be configured"));

    assert_eq!(module.resource_dirs, vec![Utf8PathBuf::from(expected)]);
}

#[then("a configuration error mentioning \"{snippet}\" is reported")]
fn assert_error_with_snippet(
    load_result: &RefCell<Option<Result<PackConfig, String>>>,
    snippet: String,
) {
    match load_result.borrow().as_ref() {
        Some(Err(error)) => {
            assert!(
                error.contains(snippet.as_str()),
                "expected error '{error}' to mention '{snippet}'",
            );
        }
        Some(Ok(config)) => {
            panic!("expected configuration loading to fail but succeeded with {config:?}")
        }
        None => panic!("configuration should be loaded"),
    }
}

#[scenario("tests/features/config_loading.feature", index = 0)]
fn scenario_defaults(
    config_source: RefCell<String>,
    load_result: RefCell<Option<Result<PackConfig, String>>>,
) {
    let _ = (config_source, load_result);
}

#[scenario("tests/features/config_loading.feature", index = 1)]
fn scenario_module_defaults(
    config_source: RefCell<String>,
    load_result: RefCell<Option<Result<PackConfig, String>>>,
) {
    let _ = (config_source, load_result);
}

#[scenario("tests/features/config_loading.feature", index = 2)]
fn scenario_archive_override(
    config_source: RefCell<String>,
    load_result: RefCell<Option<Result<PackConfig, String>>>,
) {
    let _ = (config_source, load_result);
}

#[scenario("tests/features/config_loading.feature", index = 3)]
fn scenario_unknown_policy(
    config_source: RefCell<String>,
    load_result: RefCell<Option<Result<PackConfig, String>>>,
) {
    let _ = (config_source, load_result);
}

#[scenario("tests/features/config_loading.feature", index = 4)]
fn scenario_unknown_fields(
    config_source: RefCell<String>,
    load_result: RefCell<Option<Result<PackConfig, String>>>,
) {
    let _ = (config_source, load_result);
}

#[scenario("tests/features/config_loading.feature", index = 5)]
fn scenario_duplicate_modules(
    config_source: RefCell<String>,
    load_result: RefCell<Option<Result<PackConfig, String>>>,
) {
    let _ = (config_source, load_result);
}
