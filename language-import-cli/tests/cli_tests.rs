use std::path::Path;
use std::process::{Command, Output};
use std::sync::Once;
use tracing::{error, info};

static INIT: Once = Once::new();

/// Initialize logging exactly once for all tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    });
}

fn run(args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_language-import"))
        .args(args)
        .output()
        .expect("failed to run language-import");

    if !output.status.success() {
        error!("Command failed with status: {}", output.status);
        error!("stderr: {}", String::from_utf8_lossy(&output.stderr));
    }
    output
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_parse_json_output() {
    init_logging();

    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "languages.csv",
        "name,endonym,iso_639_3_code\nSpanish,Español,spa\nDutch,,nl\n",
    );

    let output = run(&["parse", &input, "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totalRows"], 2);
    assert_eq!(json["validRows"], 2);
    assert_eq!(json["errors"].as_array().unwrap().len(), 2);
    info!("stdout: {}", String::from_utf8_lossy(&output.stdout));
}

#[test]
fn test_text_summary_marks_each_row() {
    init_logging();

    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "languages.csv",
        "name,endonym\nSpanish,\n,Nederlands\nFrench,Français\n",
    );

    let output = run(&["parse", &input]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rows: 3 processed, 2 valid"));
    assert!(stdout.contains("[WARN ] row 2: Spanish"));
    assert!(stdout.contains("[ERROR] row 3: "));
    assert!(stdout.contains("error name: Name is required"));
    assert!(stdout.contains("[OK   ] row 4: French"));
}

#[test]
fn test_strict_mode_fails_on_row_errors() {
    init_logging();

    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "languages.csv", "name,endonym\n,Español\n");
    let report = dir.path().join("issues.csv");
    let report_arg = report.to_string_lossy().into_owned();

    let relaxed = run(&["parse", &input, "--errors-out", &report_arg]);
    assert!(relaxed.status.success());
    let report_content = std::fs::read_to_string(&report).unwrap();
    assert!(report_content.starts_with("row_number,field,severity,message"));
    assert!(report_content.contains("2,name,error,Name is required"));

    let strict = run(&["parse", &input, "--strict"]);
    assert!(!strict.status.success());
}

#[test]
fn test_parse_rejects_missing_columns() {
    init_logging();

    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "languages.csv", "endonym,iso_639_3_code\nEspañol,spa\n");

    let output = run(&["parse", &input]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Missing required columns: name"));
}

#[test]
fn test_parse_with_config_file() {
    init_logging();

    let dir = tempfile::tempdir().unwrap();
    let config = write(
        dir.path(),
        "config.jsonc",
        "{\n  // spreadsheet export\n  \"delimiter\": \";\",\n  \"maxRows\": 1\n}\n",
    );
    let input = write(
        dir.path(),
        "languages.csv",
        "name;endonym\nSpanish;Español\nDutch;Nederlands\n",
    );

    let output = run(&["parse", &input, "--config", &config, "--format", "json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totalRows"], 1);
    assert_eq!(json["rows"][0]["name"], "Spanish");
}

#[test]
fn test_template_command() {
    init_logging();

    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.csv");
    let template_arg = template.to_string_lossy().into_owned();

    let output = run(&["template", "-t", "status", "-t", "size", "-o", &template_arg]);
    assert!(output.status.success());

    let content = std::fs::read_to_string(&template).unwrap();
    assert_eq!(
        content,
        "name,endonym,iso_639_3_code,language_family,country_of_origin,status,size\n\
         Spanish,Español,spa,Indo-European,Spain,,\n"
    );

    let parsed = run(&["parse", &template_arg, "--strict"]);
    assert!(parsed.status.success());
}

#[test]
fn test_generate_and_validate_config() {
    init_logging();

    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("generated.jsonc");
    let config_arg = config.to_string_lossy().into_owned();

    let generated = run(&["generate-config", "--type", "minimal", "-o", &config_arg]);
    assert!(generated.status.success());
    assert!(config.exists());

    let validated = run(&["validate-config", "--config", &config_arg]);
    assert!(validated.status.success());

    let bad = write(dir.path(), "bad.jsonc", "{ \"delimiter\": \"::\" }");
    let rejected = run(&["validate-config", "--config", &bad]);
    assert!(!rejected.status.success());
}
