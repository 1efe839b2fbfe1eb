//! Test that credentials survive serialization while staying out of logs

use aigate_core::config::{GatewayConfig, ProviderSettings, SafeLogging, SecretString};

#[test]
fn test_config_yaml_roundtrip_keeps_secret() {
    let mut config = GatewayConfig::default();
    config.provider = "openai".to_string();
    config.providers.openai = ProviderSettings::default()
        .with_api_key("sk-secret-key-123")
        .with_model("gpt-4o");

    // Serialization is for persistence, so the real value is written
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert!(yaml.contains("sk-secret-key-123"));
    assert!(!yaml.contains("[REDACTED]"));

    let restored: GatewayConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(restored, config);
    assert_eq!(
        restored.providers.openai.credential().unwrap().expose_secret(),
        "sk-secret-key-123"
    );

    // Debug output is still redacted
    let debug_output = format!("{:?}", restored.providers.openai);
    assert!(!debug_output.contains("sk-secret-key-123"));
}

#[test]
fn test_secret_display_is_redacted() {
    let secret = SecretString::new("sk-secret-key-123");
    assert_eq!(format!("{}", secret), "[REDACTED]");
    assert_eq!(format!("{:?}", secret), "[REDACTED]");
}

#[test]
fn test_safe_logging_output() {
    let settings = ProviderSettings::default()
        .with_api_key("sk-abcdefghijklmnop")
        .with_base_url("http://localhost:9000");

    let line = settings.safe_for_logging();
    assert!(!line.contains("sk-abcdefghijklmnop"));
    assert!(line.contains("base_url=http://localhost:9000"));
    assert!(line.contains("model=[default]"));

    let unset = ProviderSettings::default().safe_for_logging();
    assert!(unset.contains("api_key=[UNSET]"));
}
