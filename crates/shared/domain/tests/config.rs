use sdash_domain::config::{ApiConfig, DashboardConfig, DatabaseConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.address.to_string(), "127.0.0.1");
    assert_eq!(server.port, 5000);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "sdash");
    assert_eq!(db.database, "core");
    assert!(db.credentials.is_none());
    assert!(db.seed_demo);

    let dashboard = DashboardConfig::default();
    assert_eq!(dashboard.cache_capacity, 1_000);
    assert_eq!(dashboard.cache_ttl_seconds, 300);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "0.0.0.0", "port": 8080 },
        "database": {
            "url": "ws://localhost:8000",
            "namespace": "n",
            "database": "d",
            "credentials": { "username": "root", "password": "root" },
            "seed_demo": false
        },
        "dashboard": { "cache_capacity": 10, "cache_ttl_seconds": 1 }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.namespace, "n");
    assert!(!cfg.database.seed_demo);
    assert_eq!(cfg.dashboard.cache_capacity, 10);
}
