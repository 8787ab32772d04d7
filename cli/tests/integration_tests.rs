use std::fs;
use std::path::PathBuf;
use std::process::Output;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("schema_gen_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn write_product_model(dir: &TempDir) -> PathBuf {
    let yaml = r#"human_name: Product
presence_required_fields: [name]
columns:
  - { name: name, type: varchar }
  - { name: price, type: { type: decimal } }
  - { name: sku, type: uuid }
  - { name: stock, type: integer, default: 0 }
"#;
    let path = dir.join("product.yml");
    fs::write(&path, yaml).expect("failed to write model");
    path
}

fn schema_gen(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_schema-gen"))
        .args(args)
        .output()
        .expect("failed to run schema-gen")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_pretty_schema() {
    let dir = TempDir::new("generate_pretty");
    let model = write_product_model(&dir);

    let output = schema_gen(&["generate", "--model", model.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("{\n  \"type\": \"object\""));
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "price": {"type": "number"},
                "sku": {"type": "string"},
                "stock": {"type": "integer"}
            },
            "title": "Product",
            "required": ["name"]
        })
    );
}

#[test]
fn generate_compact_with_only() {
    let dir = TempDir::new("generate_compact");
    let model = write_product_model(&dir);

    let output = schema_gen(&[
        "generate",
        "--model",
        model.to_str().unwrap(),
        "--only",
        "price, name",
        "--compact",
    ]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        r#"{"type":"object","properties":{"name":{"type":"string"},"price":{"type":"number"}},"title":"Product","required":["name"]}"#
    );
}

#[test]
fn generate_with_config_and_output_file() {
    let dir = TempDir::new("generate_config");
    let model = write_product_model(&dir);
    let config = dir.join("adapter.yml");
    fs::write(
        &config,
        "except: [sku]\ndescription: inventory\ninclude_defaults: true\npretty: false\n",
    )
    .unwrap();
    let target = dir.join("out/product.schema.json");

    let output = schema_gen(&[
        "generate",
        "--model",
        model.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--output",
        target.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written["description"], "inventory");
    assert_eq!(written["properties"]["stock"]["default"], 0);
    assert!(written["properties"].get("sku").is_none());
}

#[test]
fn generate_rejects_only_and_except() {
    let dir = TempDir::new("generate_conflict");
    let model = write_product_model(&dir);

    let output = schema_gen(&[
        "generate",
        "--model",
        model.to_str().unwrap(),
        "--only",
        "name",
        "--except",
        "price",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("only and except options both provided"));
}

#[test]
fn generate_command_line_lists_replace_config_selection() {
    let dir = TempDir::new("generate_override");
    let model = write_product_model(&dir);
    let config = dir.join("adapter.yml");
    fs::write(&config, "only: [name]\nallowed_attributes: [price]\npretty: false\n").unwrap();

    let output = schema_gen(&[
        "generate",
        "--model",
        model.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--except",
        "sku",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let schema = stdout_json(&output);
    let names: Vec<&str> = schema["properties"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, vec!["name", "price", "stock"]);
}

#[test]
fn generate_reports_missing_model() {
    let dir = TempDir::new("generate_missing");
    let output = schema_gen(&[
        "generate",
        "--model",
        dir.join("absent.yml").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load model"));
}

// ---------------------------------------------------------------------------
// lint
// ---------------------------------------------------------------------------

#[test]
fn lint_accepts_consistent_schema() {
    let dir = TempDir::new("lint_ok");
    let path = dir.join("ok.json");
    fs::write(
        &path,
        r#"{"type":"object","properties":{"a":{"type":"string"}},"required":["a"]}"#,
    )
    .unwrap();

    let output = schema_gen(&["lint", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("no problems found"));
}

#[test]
fn lint_reports_warnings_and_parse_failures() {
    let dir = TempDir::new("lint_bad");
    let inconsistent = dir.join("inconsistent.json");
    fs::write(
        &inconsistent,
        r#"{"type":"object","properties":{},"required":["ghost"]}"#,
    )
    .unwrap();
    let broken = dir.join("broken.json");
    fs::write(&broken, r#"{"type":"array"}"#).unwrap();

    let output = schema_gen(&[
        "lint",
        inconsistent.to_str().unwrap(),
        broken.to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("required property `ghost` is not declared"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.json"));
    assert!(stderr.contains("2 problem(s) found in 2 file(s)"));
}

#[test]
fn lint_requires_inputs() {
    let output = schema_gen(&["lint"]);
    assert!(!output.status.success());
}
