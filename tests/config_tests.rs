//! Config Tests

use kvcache::{CacheError, Config};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.listen_addr, "127.0.0.1:8080");
    assert_eq!(config.num_shards, 16);
    assert_eq!(config.max_frame_size, 16 * 1024 * 1024);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder_sets_fields() {
    let config = Config::builder()
        .listen_addr("0.0.0.0:9000")
        .max_connections(8)
        .read_timeout_ms(100)
        .write_timeout_ms(200)
        .max_frame_size(4096)
        .num_shards(4)
        .build();

    assert_eq!(config.listen_addr, "0.0.0.0:9000");
    assert_eq!(config.max_connections, 8);
    assert_eq!(config.read_timeout_ms, 100);
    assert_eq!(config.write_timeout_ms, 200);
    assert_eq!(config.max_frame_size, 4096);
    assert_eq!(config.num_shards, 4);
}

#[test]
fn test_port_overrides_listen_port() {
    let config = Config::builder().listen_addr("10.0.0.1:1234").port(8085).build();
    assert_eq!(config.listen_addr, "10.0.0.1:8085");

    let config = Config::builder().port(8083).build();
    assert_eq!(config.listen_addr, "127.0.0.1:8083");
}

#[test]
fn test_validate_rejects_zero_shards() {
    let config = Config::builder().num_shards(0).build();
    assert!(matches!(config.validate(), Err(CacheError::Config(_))));
}

#[test]
fn test_validate_rejects_zero_connections() {
    let config = Config::builder().max_connections(0).build();
    assert!(matches!(config.validate(), Err(CacheError::Config(_))));
}

#[test]
fn test_validate_rejects_zero_frame_size() {
    let config = Config::builder().max_frame_size(0).build();
    assert!(matches!(config.validate(), Err(CacheError::Config(_))));
}

#[test]
fn test_validate_rejects_bad_address() {
    let config = Config::builder().listen_addr("not-an-address").build();
    assert!(matches!(config.validate(), Err(CacheError::Config(_))));
}

#[test]
fn test_validate_accepts_hostname() {
    let config = Config::builder().listen_addr("localhost:8080").build();
    assert!(config.validate().is_ok());
}
