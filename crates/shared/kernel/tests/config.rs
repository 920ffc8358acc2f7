use sdash_kernel::config::load_config;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TestConfig {
    server: ServerSection,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    host: String,
    port: u16,
}

#[test]
fn loads_config_from_a_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.toml");
    std::fs::write(&path, "[server]\nhost = \"127.0.0.1\"\nport = 5000\n").unwrap();

    let cfg: TestConfig = load_config(Some(&path)).unwrap();

    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.server.port, 5000);
}

#[test]
fn missing_file_is_an_error() {
    let result = load_config::<TestConfig>(Some("does/not/exist"));

    assert!(result.is_err());
}
