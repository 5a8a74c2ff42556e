//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use solace_config::SolaceConfig;

#[test]
fn loads_functions_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[functions]
base_url = "https://fn.solace.dev"
service_key = "svc-key"
timeout_secs = 30
"#,
        )?;

        let config: SolaceConfig = Figment::from(Serialized::defaults(SolaceConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.functions.base_url, "https://fn.solace.dev");
        assert_eq!(config.functions.service_key, "svc-key");
        assert_eq!(config.functions.timeout_secs, 30);
        assert!(config.functions.is_configured());
        Ok(())
    });
}

#[test]
fn loads_embeddings_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[embeddings]
cache_dir = "./cache"
batch_size = 25
show_download_progress = false
"#,
        )?;

        let config: SolaceConfig = Figment::from(Serialized::defaults(SolaceConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.embeddings.cache_dir, "./cache");
        assert_eq!(config.embeddings.batch_size, 25);
        assert!(!config.embeddings.show_download_progress);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults_for_missing_fields() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
output_dir = "staging-out"
"#,
        )?;

        let config: SolaceConfig = Figment::from(Serialized::defaults(SolaceConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.output_dir, "staging-out");
        assert_eq!(config.general.default_limit, 20);
        assert_eq!(config.embeddings.batch_size, 100);
        Ok(())
    });
}
