use rulepack_logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Built-in defaults, also the template printed by `--print-config`
pub const DEFAULT_CONFIG: &str = r#"
[paths]
root = "."
rules_dir = ".rulepack/rules"
modes_dir = ".rulepack/modes"
rules_output = "RULES.md"
modes_output = "modes.json"

[loader]
extension = "md"
sort_modes = false  # keep directory-listing order

[logging]
level = "info"  # trace, debug, info, warn, error
format = "pretty"  # or "json"
"#;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    pub root: PathBuf,
    pub rules_dir: PathBuf,
    pub modes_dir: PathBuf,
    pub rules_output: PathBuf,
    pub modes_output: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoaderConfig {
    pub extension: String,
    pub sort_modes: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub paths: PathsConfig,
    pub loader: LoaderConfig,
    pub logging: LoggingConfig,
}

/// Input and output locations with the project root applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub rules_dir: PathBuf,
    pub modes_dir: PathBuf,
    pub rules_output: PathBuf,
    pub modes_output: PathBuf,
}

impl Config {
    /// Get the user config path: ~/.rulepack/rulepack.toml
    fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".rulepack").join("rulepack.toml"))
    }

    /// Load configuration with layered approach:
    /// 1. Built-in defaults
    /// 2. User config: ~/.rulepack/rulepack.toml (optional)
    /// 3. Local override: ./rulepack.toml (optional)
    /// 4. Environment variables with RULEPACK__ prefix, e.g. RULEPACK__PATHS__ROOT
    /// 5. RULEPACK_ROOT and RULEPACK_LOG (highest priority)
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let mut config_builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ));

        if let Some(user_config) = Self::user_config_path() {
            config_builder =
                config_builder.add_source(config::File::from(user_config).required(false));
        }

        config_builder = config_builder
            .add_source(config::File::with_name("rulepack").required(false))
            .add_source(
                config::Environment::with_prefix("RULEPACK")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(root) = env::var("RULEPACK_ROOT") {
            config_builder = config_builder.set_override("paths.root", root)?;
        }

        if let Ok(level) = env::var("RULEPACK_LOG") {
            config_builder = config_builder.set_override("logging.level", level)?;
        }

        let config: Self = config_builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve `root` against the current directory and everything else against `root`
    pub fn resolve(&self) -> anyhow::Result<ResolvedPaths> {
        let cwd = env::current_dir()?;
        Ok(self.resolve_from(&cwd))
    }

    pub fn resolve_from(&self, cwd: &Path) -> ResolvedPaths {
        // Collecting components drops interior `.` segments
        let root: PathBuf = cwd.join(&self.paths.root).components().collect();
        ResolvedPaths {
            rules_dir: root.join(&self.paths.rules_dir),
            modes_dir: root.join(&self.paths.modes_dir),
            rules_output: root.join(&self.paths.rules_output),
            modes_output: root.join(&self.paths.modes_output),
            root,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                root: PathBuf::from("."),
                rules_dir: PathBuf::from(".rulepack/rules"),
                modes_dir: PathBuf::from(".rulepack/modes"),
                rules_output: PathBuf::from("RULES.md"),
                modes_output: PathBuf::from("modes.json"),
            },
            loader: LoaderConfig {
                extension: "md".to_string(),
                sort_modes: false,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}
