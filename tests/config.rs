// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, built-in defaults, env references and destination merging.

use runlift::config::*;
use runlift::error::Error;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

mod parsing {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.service.as_str(), DEFAULT_SERVICE);
        assert_eq!(config.region.as_str(), DEFAULT_REGION);
        assert_eq!(config.source, PathBuf::from("."));
        assert!(config.allow_unauthenticated);
        assert!(config.env.contains_key(API_KEY_VAR));
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
service: gis-api
region: europe-west1
source: ./app
platform: managed
allow_unauthenticated: false

env:
  LOG_LEVEL: info
  GOOGLE_MAPS_API_KEY:
    env: MAPS_KEY
    default: dev-key
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.service.as_str(), "gis-api");
        assert_eq!(config.region.as_str(), "europe-west1");
        assert_eq!(config.source, PathBuf::from("./app"));
        assert!(!config.allow_unauthenticated);
        assert_eq!(
            config.env.get("LOG_LEVEL"),
            Some(&EnvValue::Literal("info".to_string()))
        );
        assert_eq!(
            config.env.get("GOOGLE_MAPS_API_KEY"),
            Some(&EnvValue::FromEnv {
                var: "MAPS_KEY".to_string(),
                default: Some("dev-key".to_string()),
            })
        );
    }

    #[test]
    fn explicit_env_replaces_default_env() {
        let config = Config::from_yaml("env:\n  ONLY: one\n").unwrap();
        assert_eq!(config.env.len(), 1);
        assert!(!config.env.contains_key(API_KEY_VAR));
    }

    #[test]
    fn invalid_service_returns_error() {
        let err = Config::from_yaml("service: Bad_Name\n").unwrap_err();
        assert!(err.to_string().contains("service name"));
    }

    #[test]
    fn invalid_region_returns_error() {
        let err = Config::from_yaml("region: \"us central\"\n").unwrap_err();
        assert!(err.to_string().contains("region"));
    }

    #[test]
    fn unknown_field_returns_error() {
        let err = Config::from_yaml("servce: typo\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn invalid_env_name_returns_error() {
        let err = Config::from_yaml("env:\n  \"BAD-NAME\": x\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}

mod discovery {
    use super::*;

    #[test]
    fn no_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.service.as_str(), DEFAULT_SERVICE);
    }

    #[test]
    fn finds_primary_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "service: primary\n").unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_ALT), "service: alternate\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.service.as_str(), "primary");
    }

    #[test]
    fn finds_config_in_dot_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".runlift")).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_DIR), "region: asia-east1\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.region.as_str(), "asia-east1");
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }
}

mod env_resolution {
    use super::*;

    #[test]
    fn resolve_env_values() {
        let env_map = BTreeMap::from([
            ("KEY".to_string(), EnvValue::Literal("literal".to_string())),
            (
                "FROM_ENV".to_string(),
                EnvValue::from_env("RUNLIFT_TEST_VAR", None),
            ),
            (
                "WITH_DEFAULT".to_string(),
                EnvValue::from_env("RUNLIFT_MISSING_VAR", Some("default_value")),
            ),
        ]);

        temp_env::with_vars(
            [
                ("RUNLIFT_TEST_VAR", Some("from_environment")),
                ("RUNLIFT_MISSING_VAR", None),
            ],
            || {
                let resolved = resolve_env_map(&env_map).unwrap();

                assert_eq!(resolved["KEY"].expose(), "literal");
                assert_eq!(resolved["FROM_ENV"].expose(), "from_environment");
                assert_eq!(resolved["WITH_DEFAULT"].expose(), "default_value");
            },
        );
    }

    #[test]
    fn missing_required_var_names_it() {
        let env_map = BTreeMap::from([(
            "DB".to_string(),
            EnvValue::from_env("RUNLIFT_REQUIRED_VAR", None),
        )]);

        temp_env::with_var_unset("RUNLIFT_REQUIRED_VAR", || {
            let err = resolve_env_map(&env_map).unwrap_err();
            assert!(err.to_string().contains("RUNLIFT_REQUIRED_VAR"));
        });
    }
}

mod destinations {
    use super::*;

    const YAML: &str = r#"
service: gis-api
region: us-central1
env:
  LOG_LEVEL: info
  GOOGLE_MAPS_API_KEY:
    env: GOOGLE_MAPS_API_KEY

destinations:
  staging:
    service: gis-api-staging
    allow_unauthenticated: false
    env:
      LOG_LEVEL: debug
  europe:
    region: europe-west1
"#;

    #[test]
    fn destination_overrides_service() {
        let config = Config::from_yaml(YAML).unwrap();
        let merged = config.for_destination("staging").unwrap();
        assert_eq!(merged.service.as_str(), "gis-api-staging");
        assert_eq!(merged.region.as_str(), "us-central1");
        assert!(!merged.allow_unauthenticated);
    }

    #[test]
    fn destination_merges_env() {
        let config = Config::from_yaml(YAML).unwrap();
        let merged = config.for_destination("staging").unwrap();
        assert_eq!(
            merged.env.get("LOG_LEVEL"),
            Some(&EnvValue::Literal("debug".to_string()))
        );
        assert!(merged.env.contains_key("GOOGLE_MAPS_API_KEY"));
    }

    #[test]
    fn destination_overrides_region_only() {
        let config = Config::from_yaml(YAML).unwrap();
        let merged = config.for_destination("europe").unwrap();
        assert_eq!(merged.service.as_str(), "gis-api");
        assert_eq!(merged.region.as_str(), "europe-west1");
        assert!(merged.allow_unauthenticated);
    }

    #[test]
    fn unknown_destination_returns_error() {
        let config = Config::from_yaml(YAML).unwrap();
        let err = config.for_destination("production").unwrap_err();
        assert!(matches!(err, Error::UnknownDestination(name) if name == "production"));
    }
}

mod init {
    use super::*;

    #[test]
    fn init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        init_config(dir.path(), Some("my-api"), Some("us-west1"), false).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.service.as_str(), "my-api");
        assert_eq!(config.region.as_str(), "us-west1");
        assert_eq!(
            config.env.get(API_KEY_VAR),
            Some(&EnvValue::from_env(API_KEY_VAR, Some("")))
        );
    }

    #[test]
    fn init_rejects_invalid_service() {
        let dir = tempfile::tempdir().unwrap();
        let err = init_config(dir.path(), Some("-bad"), None, false).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(!dir.path().join(CONFIG_FILENAME).exists());
    }

    #[test]
    fn init_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "service: keep\n").unwrap();

        let err = init_config(dir.path(), None, None, false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }
}
