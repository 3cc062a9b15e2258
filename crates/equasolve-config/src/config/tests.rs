#[cfg(test)]
mod tests {
    use super::super::*;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_defaults_match_initial_form() {
        let form = FormDefaults::default();
        assert_eq!(form.equation, "sin(x)");
        assert_eq!(form.method_id, 1);
        assert_eq!(form.start, -10.0);
        assert_eq!(form.end, 10.0);
        assert_eq!(form.step, 0.1);
        assert_eq!(form.tolerance, 0.0001);
    }

    #[test]
    fn test_default_api_has_no_timeout() {
        let api = ApiConfig::default();
        assert_eq!(api.base_url, "http://localhost:9090");
        assert!(api.timeout().is_none());
        assert_ok!(api.base_url());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            [api]
            base_url = "https://solver.example.org"
            origin = "http://iney.lol:3000"
            timeout_secs = 15

            [form]
            method_id = 3
            start = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(config.api.origin.as_deref(), Some("http://iney.lol:3000"));
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.form.method_id, 3);
        assert_eq!(config.form.start, 2.0);
        assert_eq!(config.form.tolerance, 0.0001);
        assert_eq!(config.web.bind, "127.0.0.1:3001");
        assert_ok!(config.validate());
    }

    #[test]
    fn test_yaml() {
        let config = Config::from_yaml_str("web:\n  bind: 0.0.0.0:8080\n").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (API_URL_ENV, " http://10.0.0.5:9090 "),
            (BIND_ENV, ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api.base_url, "http://10.0.0.5:9090");
        // Empty values are ignored
        assert_eq!(config.web.bind, "127.0.0.1:3001");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = "ftp://localhost".to_string();
        assert_err!(config.validate());

        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert_err!(config.validate());

        let mut config = Config::default();
        config.form.method_id = 6;
        assert_err!(config.validate());

        let mut config = Config::default();
        config.form.step = f64::NAN;
        assert_err!(config.validate());
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load_from(Path::new("/nonexistent/equasolve.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let example = include_str!("../../../../equasolve.example.toml");
        let config = assert_ok!(Config::from_toml_str(example));
        assert_eq!(config, Config::default());
    }
}
