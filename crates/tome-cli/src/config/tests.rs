#[cfg(test)]
mod tests {
    use crate::config::loading::env_key_to_field;
    use crate::config::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn overrides_for(dir: &TempDir) -> ConfigOverrides {
        ConfigOverrides {
            root: Some(dir.path().to_path_buf()),
            ..ConfigOverrides::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = TomeConfig::default();
        assert_eq!(config.content_dir, PathBuf::from("docs"));
        assert_eq!(config.out_dir, PathBuf::from("dist/docs"));
        assert_eq!(config.cache_file, PathBuf::from(".tome/build-cache.json"));
        assert_eq!(config.extensions, vec!["mdx"]);
        assert_eq!(config.debounce_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let config = TomeConfig {
            types_entry: Some(PathBuf::from("packages/ui/src/index.ts")),
            ..TomeConfig::default()
        };
        let json_val = serde_json::to_value(&config).unwrap();
        assert!(json_val.get("contentDir").is_some());
        assert!(json_val.get("typesEntry").is_some());
        assert!(json_val.get("content_dir").is_none());

        // skip_serializing_if
        let json_val = serde_json::to_value(TomeConfig::default()).unwrap();
        assert!(json_val.get("typesEntry").is_none());
        assert!(json_val.get("assetsDir").is_none());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<TomeConfig, _> = serde_json::from_str(r#"{ "contentDirectory": "docs" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = TomeConfig::load(&overrides_for(&dir)).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.content_dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_load_reads_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "contentDir": "content", "debounceMs": 50, "extensions": ["mdx", "md"] }"#,
        )
        .unwrap();

        let config = TomeConfig::load(&overrides_for(&dir)).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.extensions, vec!["mdx", "md"]);
        // Untouched fields keep their defaults
        assert_eq!(config.out_dir, PathBuf::from("dist/docs"));
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "outDir": "public/docs", "debounceMs": 50 }"#,
        )
        .unwrap();

        let overrides = ConfigOverrides {
            out_dir: Some(PathBuf::from("build")),
            ..overrides_for(&dir)
        }
        .with_debounce(Some(120));

        let config = TomeConfig::load(&overrides).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("build"));
        assert_eq!(config.debounce_ms, 120);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            config: Some(dir.path().join("missing.json")),
            ..overrides_for(&dir)
        };

        let err = TomeConfig::load(&overrides).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_malformed_config_reports_invalid_value() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{ "debounceMs": "soon" }"#).unwrap();

        let err = TomeConfig::load(&overrides_for(&dir)).unwrap_err();
        assert!(err.to_string().contains("Invalid value for 'configuration'"));
    }

    #[test]
    fn test_env_key_to_field() {
        assert_eq!(env_key_to_field("out_dir"), "outDir");
        assert_eq!(env_key_to_field("debounce_ms"), "debounceMs");
        assert_eq!(env_key_to_field("root"), "root");
        assert_eq!(env_key_to_field("types_entry"), "typesEntry");
    }

    #[test]
    fn test_validation() {
        assert!(TomeConfig {
            extensions: vec![],
            ..TomeConfig::default()
        }
        .validate()
        .is_err());

        assert!(TomeConfig {
            extensions: vec![".mdx".to_string()],
            ..TomeConfig::default()
        }
        .validate()
        .is_err());

        assert!(TomeConfig {
            debounce_ms: 5,
            ..TomeConfig::default()
        }
        .validate()
        .is_err());

        assert!(TomeConfig {
            debounce_ms: 10_000,
            ..TomeConfig::default()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_resolve_paths() {
        let dir = TempDir::new().unwrap();
        let package = dir.path().join("packages/ui");
        std::fs::create_dir_all(package.join("src")).unwrap();
        std::fs::write(package.join("package.json"), r#"{ "name": "@acme/ui" }"#).unwrap();

        let config = TomeConfig {
            root: dir.path().to_path_buf(),
            types_entry: Some(PathBuf::from("packages/ui/src/index.ts")),
            ..TomeConfig::default()
        };
        let paths = config.resolve().unwrap();

        assert_eq!(paths.content_dir, dir.path().join("docs"));
        assert_eq!(paths.out_dir, dir.path().join("dist/docs"));
        assert_eq!(paths.types_entry, Some(package.join("src/index.ts")));
        assert_eq!(paths.component_package, Some(package));
    }

    #[test]
    fn test_project_paths_helpers() {
        let dir = TempDir::new().unwrap();
        let config = TomeConfig {
            root: dir.path().to_path_buf(),
            ..TomeConfig::default()
        };
        let paths = config.resolve().unwrap();

        let doc = dir.path().join("docs/components/button.mdx");
        assert!(paths.is_document(&doc));
        assert!(!paths.is_document(&dir.path().join("docs/readme.md")));
        assert!(paths.is_ignored(&dir.path().join("node_modules/pkg/a.mdx")));
        assert!(!paths.is_ignored(&doc));
        assert_eq!(paths.cache_key(&doc), "docs/components/button.mdx");
    }

    #[test]
    fn test_paths_validation() {
        let dir = TempDir::new().unwrap();
        let config = TomeConfig {
            root: dir.path().to_path_buf(),
            ..TomeConfig::default()
        };

        // Missing content directory
        assert!(config.resolve().unwrap().validate().is_err());

        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        assert!(config.resolve().unwrap().validate().is_ok());

        let nested_out = TomeConfig {
            out_dir: PathBuf::from("."),
            ..config.clone()
        };
        assert!(nested_out.resolve().unwrap().validate().is_err());
    }

    #[test]
    fn test_json_schema_lists_fields() {
        let schema = TomeConfig::json_schema();
        let properties = schema.get("properties").unwrap();
        assert!(properties.get("contentDir").is_some());
        assert!(properties.get("debounceMs").is_some());
    }
}
