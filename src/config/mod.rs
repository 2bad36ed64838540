use std::{
    collections::HashMap,
    env,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

pub const DEFAULT_JMETER_BIN: &str = "jmeter";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Startup configuration: defaults, then `.jmeterrc`, then `./.env`, then the
/// process environment. Read once; later lookups never touch the environment.
#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
    /// Files that existed and were read, in load order.
    pub loaded_files: Vec<PathBuf>,
}

impl Config {
    pub fn load() -> Self {
        let files = [default_config_path(), PathBuf::from(".env")];
        Self::from_sources(&files, env::vars())
    }

    /// Layer `files` (in order, missing ones skipped) and then `vars` over the
    /// defaults. Files use dotenv syntax.
    pub fn from_sources<I>(files: &[PathBuf], vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = default_map();
        let mut loaded_files = Vec::new();

        for path in files {
            if let Some(entries) = read_key_values(path) {
                loaded_files.push(path.clone());
                for (k, v) in entries {
                    if is_config_key(&k) {
                        map.insert(k, v);
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in vars {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self {
            inner: map,
            config_path: files.first().cloned().unwrap_or_default(),
            loaded_files,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn jmeter_bin(&self) -> String {
        self.get("JMETER_BIN")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_JMETER_BIN.to_string())
    }

    pub fn java_opts(&self) -> Option<String> {
        self.get("JMETER_JAVA_OPTS").filter(|v| !v.trim().is_empty())
    }

    pub fn log_filter(&self) -> String {
        self.get("JMETER_RUNNER_LOG")
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}

/// Process-wide engine launch settings, fixed for the orchestrator's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Engine binary: a bare name looked up on `PATH`, or a path.
    pub binary: String,
    /// Options for a wrapping `java` invocation; empty means run the binary directly.
    pub java_opts: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            binary: DEFAULT_JMETER_BIN.to_string(),
            java_opts: Vec::new(),
        }
    }
}

impl EngineSettings {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            java_opts: Vec::new(),
        }
    }

    pub fn with_java_opts(mut self, opts: &str) -> Self {
        self.java_opts = opts.split_whitespace().map(str::to_string).collect();
        self
    }

    pub fn from_config(cfg: &Config) -> Self {
        let settings = Self::new(cfg.jmeter_bin());
        match cfg.java_opts() {
            Some(opts) => settings.with_java_opts(&opts),
            None => settings,
        }
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &["JMETER_BIN", "JMETER_JAVA_OPTS", "JMETER_RUNNER_LOG"];
    KEYS.contains(&k)
}

/// `None` when the file cannot be opened; malformed lines are skipped.
fn read_key_values(path: &Path) -> Option<Vec<(String, String)>> {
    let iter = dotenvy::from_path_iter(path).ok()?;
    Some(iter.filter_map(Result::ok).collect())
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("jmeter_runner").join(".jmeterrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("JMETER_BIN".into(), DEFAULT_JMETER_BIN.into());
    m.insert("JMETER_RUNNER_LOG".into(), DEFAULT_LOG_FILTER.into());
    m
}
