//! CLI command behavior against app files on disk

use std::io::Write;
use std::path::Path;

use appmaker_cli::commands::{render::render, resolve::resolve, CompileArgs, OutputFormat};
use appmaker_cli::{Cli, Commands, Error};
use clap::Parser;
use rstest::rstest;
use tempfile::NamedTempFile;

const APP_YAML: &str = r#"
group_name: shop
common_env:
  LOG_LEVEL: info
components:
  - image: registry/org/api:v2
    port: 8080
    common_env: [LOG_LEVEL]
component_template:
  - template_name: web
    image: nginx:1.25
    env:
      X: "1"
component_from_template:
  - template_name: web
    name: frontend
  - template_name: missing
    image: worker:1
"#;

fn app_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("should create temp file");
    file.write_all(content.as_bytes())
        .expect("should write temp file");
    file
}

fn args(path: &Path, output: OutputFormat) -> CompileArgs {
    CompileArgs {
        file: path.to_path_buf(),
        output,
        strict: false,
        default_port: 80,
        default_replicas: 1,
        couple_port_suppression: false,
        health_path_overrides: false,
    }
}

// =============================================================================
// Story: Rendering
// =============================================================================

#[test]
fn render_yaml_emits_list() {
    let file = app_file(".yaml", APP_YAML);
    let out = render(&args(file.path(), OutputFormat::Yaml)).expect("should render");

    let list: serde_yaml::Value = serde_yaml::from_str(&out).expect("output is yaml");
    assert_eq!(list["kind"], "List");
    let items = list["items"].as_sequence().expect("items");
    assert_eq!(items.len(), 6);
    assert_eq!(items[0]["metadata"]["name"], "api");
    assert_eq!(items[2]["metadata"]["name"], "frontend");
    assert_eq!(items[4]["metadata"]["name"], "worker");
}

#[test]
fn render_json_emits_list() {
    let file = app_file(".yaml", APP_YAML);
    let out = render(&args(file.path(), OutputFormat::Json)).expect("should render");

    let list: serde_json::Value = serde_json::from_str(&out).expect("output is json");
    assert_eq!(list["apiVersion"], "v1");
    assert_eq!(
        list["items"][0]["spec"]["template"]["spec"]["containers"][0]["env"][0]["value"],
        "info"
    );
}

#[test]
fn json_input_is_detected_by_extension() {
    let file = app_file(
        ".json",
        r#"{"group_name": "shop", "component_from_image": [{"image": "redis:7"}]}"#,
    );
    let out = render(&args(file.path(), OutputFormat::Json)).expect("should render");
    let list: serde_json::Value = serde_json::from_str(&out).expect("output is json");
    assert_eq!(list["items"][0]["metadata"]["name"], "redis");
    assert_eq!(list["items"][1]["spec"]["ports"][0]["port"], 80);
}

#[rstest]
#[case(8080, 3)]
#[case(9000, 1)]
fn defaults_come_from_flags(#[case] port: u16, #[case] replicas: u32) {
    let file = app_file(".yaml", "group_name: shop\ncomponents:\n  - image: api\n");
    let mut args = args(file.path(), OutputFormat::Json);
    args.default_port = port;
    args.default_replicas = replicas;

    let out = render(&args).expect("should render");
    let list: serde_json::Value = serde_json::from_str(&out).expect("output is json");
    assert_eq!(list["items"][0]["spec"]["replicas"], replicas);
    assert_eq!(list["items"][1]["spec"]["ports"][0]["port"], port);
}

#[test]
fn health_path_overrides_are_opt_in() {
    let file = app_file(
        ".yaml",
        "components:\n  - image: api\n    opts:\n      health_path: /ready\n",
    );
    let readiness_path = |out: &str| {
        let list: serde_json::Value = serde_json::from_str(out).expect("output is json");
        list["items"][0]["spec"]["template"]["spec"]["containers"][0]["readinessProbe"]["httpGet"]
            ["path"]
            .clone()
    };

    let mut args = args(file.path(), OutputFormat::Json);
    let out = render(&args).expect("should render");
    assert_eq!(readiness_path(&out), "/health");

    args.health_path_overrides = true;
    let out = render(&args).expect("should render");
    assert_eq!(readiness_path(&out), "/ready");
}

// =============================================================================
// Story: Errors
// =============================================================================

#[test]
fn strict_render_rejects_unknown_template() {
    let file = app_file(".yaml", APP_YAML);
    let mut args = args(file.path(), OutputFormat::Yaml);
    args.strict = true;

    let err = render(&args).expect_err("strict mode should fail");
    assert!(matches!(err, Error::Compilation(_)));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn missing_file_reports_path() {
    let err = render(&args(Path::new("/nonexistent/app.yaml"), OutputFormat::Yaml))
        .expect_err("missing file should fail");
    assert!(matches!(err, Error::ReadInput { .. }));
    assert!(err.to_string().contains("/nonexistent/app.yaml"));
}

#[test]
fn malformed_yaml_is_a_yaml_error() {
    let file = app_file(".yaml", "components: [unterminated");
    let err = render(&args(file.path(), OutputFormat::Yaml)).expect_err("should fail");
    assert!(matches!(err, Error::Yaml(_)));
}

// =============================================================================
// Story: Resolving
// =============================================================================

#[test]
fn resolve_prints_inherited_fields() {
    let file = app_file(".yaml", APP_YAML);
    let out = resolve(&args(file.path(), OutputFormat::Json)).expect("should resolve");

    let components: serde_json::Value = serde_json::from_str(&out).expect("output is json");
    assert_eq!(components[0]["env"]["LOG_LEVEL"], "info");
    assert_eq!(components[1]["image"], "nginx:1.25");
    assert_eq!(components[1]["env"]["X"], "1");
    assert_eq!(components[1]["based_on"], "web");
}

// =============================================================================
// Story: Argument parsing
// =============================================================================

#[test]
fn parses_render_flags() {
    let cli = Cli::try_parse_from([
        "appmaker",
        "render",
        "app.yaml",
        "-o",
        "json",
        "--strict",
        "--default-port",
        "8080",
        "--couple-port-suppression",
        "--health-path-overrides",
    ])
    .expect("should parse");

    match cli.command {
        Commands::Render(args) => {
            assert_eq!(args.output, OutputFormat::Json);
            assert!(args.strict);
            assert_eq!(args.default_port, 8080);
            assert_eq!(args.default_replicas, 1);
            assert!(args.couple_port_suppression);
            assert!(args.health_path_overrides);
            let options = args.options();
            assert!(options.strict);
            assert_eq!(options.default_port, 8080);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn resolve_defaults_to_yaml() {
    let cli = Cli::try_parse_from(["appmaker", "resolve", "app.yaml"]).expect("should parse");
    match cli.command {
        Commands::Resolve(args) => assert_eq!(args.output, OutputFormat::Yaml),
        other => panic!("unexpected command: {other:?}"),
    }
}
