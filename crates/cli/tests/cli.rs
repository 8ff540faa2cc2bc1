use assert_cmd::Command;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("biblio-cli").unwrap();
    cmd.env("BIBLIO_ENV", "local")
        .env("BIBLIO_CONFIG_DIR", env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn openapi_lists_every_module_path() {
    let output = cli().arg("openapi").assert().success().get_output().clone();
    let spec: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    for path in [
        "/rest/book/api/addBook",
        "/rest/book/api/deleteBook/{bookId}",
        "/rest/loan/api/closeLoan",
        "/rest/category/api/allCategories",
        "/rest/customer/api/searchByEmail",
        "/healthz",
    ] {
        assert!(spec["paths"][path].is_object(), "missing {path}");
    }
}

#[test]
fn settings_prints_effective_configuration() {
    let output = cli()
        .env("BIBLIO_SERVER__PORT", "9191")
        .arg("settings")
        .assert()
        .success()
        .get_output()
        .clone();
    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["server"]["port"], 9191);
    assert_eq!(settings["environment"], "local");
}

#[test]
fn unknown_subcommand_fails() {
    cli().arg("frobnicate").assert().failure();
}
