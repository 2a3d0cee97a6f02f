use std::ffi::OsString;
use std::sync::Mutex;

use fxgen_config::{discover_config_path, load_for_dir, FxConfig, FXGEN_CONFIG_ENV_VAR};
use tempfile::tempdir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct EnvVarGuard {
    key: &'static str,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &std::path::Path) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value);
        Self { key, prev }
    }

    fn unset(key: &'static str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn discovers_fxgen_toml_in_start_dir() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(FXGEN_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("fxgen.toml");
    std::fs::write(&config_path, "[accessors]\nfluent = true\n").unwrap();

    let discovered = discover_config_path(dir.path()).expect("fxgen.toml should be discovered");
    assert_eq!(discovered, config_path.canonicalize().unwrap_or(config_path));
}

#[test]
fn discovers_nearest_ancestor_config() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(FXGEN_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("fxgen.toml"), "[accessors]\nprefix = [\"m\"]\n").unwrap();
    let nested = dir.path().join("src/main/java/com/acme");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(
        dir.path().join("src/main/fxgen.toml"),
        "[accessors]\nprefix = [\"f\"]\n",
    )
    .unwrap();

    let (config, path) = load_for_dir(&nested).expect("config should load");
    let path = path.expect("a config path should be reported");
    assert!(path.ends_with("src/main/fxgen.toml"), "{}", path.display());
    assert_eq!(config.accessors.prefix, vec!["f".to_string()]);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(FXGEN_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    let nested = dir.path().join("a/b");
    std::fs::create_dir_all(&nested).unwrap();

    // An `fxgen.toml` above the temp dir would be picked up too; only assert
    // on the default when nothing was found.
    let (config, path) = load_for_dir(&nested).expect("config should load");
    if path.is_none() {
        assert_eq!(config, FxConfig::default());
    }
}

#[test]
fn env_override_wins_over_directory_file() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("fxgen.toml"), "[accessors]\nfluent = false\n").unwrap();
    let override_path = dir.path().join("override.toml");
    std::fs::write(&override_path, "[accessors]\nfluent = true\n").unwrap();
    let _env = EnvVarGuard::set(FXGEN_CONFIG_ENV_VAR, &override_path);

    let (config, path) = load_for_dir(dir.path()).expect("override should load");
    assert!(config.accessors.fluent);
    assert_eq!(
        path.expect("override path should be reported"),
        override_path.canonicalize().unwrap_or(override_path)
    );
}

#[test]
fn relative_env_override_resolves_against_start_dir() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");

    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("conf")).unwrap();
    std::fs::write(
        dir.path().join("conf/custom.toml"),
        "[setter]\nfinal_parameters = true\n",
    )
    .unwrap();
    let _env = EnvVarGuard::set(FXGEN_CONFIG_ENV_VAR, std::path::Path::new("conf/custom.toml"));

    let (config, _path) = load_for_dir(dir.path()).expect("relative override should load");
    assert!(config.setter.final_parameters);
}
