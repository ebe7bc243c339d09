//! Layered configuration for blogmill.
//!
//! Values are resolved from, in increasing order of precedence:
//!
//! 1. built-in defaults,
//! 2. a configuration file (TOML, YAML or JSON, chosen by extension),
//! 3. `BLOGMILL_`-prefixed environment variables, with `__` separating
//!    nested keys (`BLOGMILL_OUTPUT__IMAGE_DIR`),
//! 4. command-line [`Overrides`].
//!
//! ```rust
//! use blogmill_config::Config;
//! let config = Config::default();
//! assert_eq!(config.output.image_prefix, "images");
//! assert!(config.validate().is_ok());
//! ```

pub mod error;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "BLOGMILL_";
/// Separator between nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";
/// File name looked up in the platform configuration directory.
pub const DEFAULT_FILE_NAME: &str = "config.toml";

/// Location of the configuration file used when none is given explicitly.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "blogmill").map(|dirs| dirs.config_dir().join(DEFAULT_FILE_NAME))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The Blogger export document to read.
    pub export: PathBuf,
    pub output: OutputConfig,
    pub rewrite: RewriteConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            export: PathBuf::from("data/blog.xml"),
            output: OutputConfig::default(),
            rewrite: RewriteConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where `summary.json` and `posts/` are written.
    pub data_dir: PathBuf,
    /// Where cached images are stored on disk.
    pub image_dir: PathBuf,
    /// Public path prefix written into rewritten markup.
    pub image_prefix: String,
}
impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("src/data/blog"),
            image_dir: PathBuf::from("src/images"),
            image_prefix: "images".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    pub photo_hosts: Vec<String>,
    pub math_host: String,
    pub math_link_host: String,
    pub on_fetch_error: OnFetchError,
}
impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            photo_hosts: vec!["imgur.com".to_string()],
            math_host: "latex.codecogs.com".to_string(),
            math_link_host: "www.codecogs.com".to_string(),
            on_fetch_error: OnFetchError::default(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnFetchError {
    #[default]
    Abort,
    Skip,
}

/// Values given on the command line. Unset fields leave the lower layers
/// alone.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<PathBuf>,
    pub output: OutputOverrides,
    pub rewrite: RewriteOverrides,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct OutputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct RewriteOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_fetch_error: Option<OnFetchError>,
}

impl Config {
    /// Load the configuration from every layer.
    ///
    /// When `file` is `None`, the file at [`default_path`] is used if it
    /// exists.
    ///
    /// # Errors
    ///
    /// Fails if an explicit `file` is missing or has an unknown extension,
    /// if any layer holds a value of the wrong type, or if the merged result
    /// does not [validate](Self::validate).
    #[tracing::instrument(level = "debug", skip(overrides))]
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let fallback = match file {
            Some(_) => None,
            None => default_path().filter(|path| path.is_file()),
        };
        let file = file.or(fallback.as_deref());
        if let Some(path) = file {
            tracing::debug!(path = %path.display(), "Reading configuration file");
        }
        Self::from_figment(&Self::figment(file)?.merge(Serialized::defaults(overrides)))
    }

    /// Defaults, then `file` (if any), then the environment.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            figment = match path.extension().and_then(OsStr::to_str).map(str::to_ascii_lowercase).as_deref() {
                Some("toml") => figment.merge(Toml::file_exact(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                Some("json") => figment.merge(Json::file_exact(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR)))
    }

    /// Extract and validate a configuration from a prepared [`Figment`].
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract().map_err(|e| ErrorKind::Extract(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce broken output.
    pub fn validate(&self) -> Result<()> {
        if self.output.image_prefix.trim_matches('/').is_empty() {
            exn::bail!(ErrorKind::Invalid {
                key: "output.image_prefix",
                reason: "must contain more than slashes",
            });
        }
        if self.rewrite.math_host.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid {
                key: "rewrite.math_host",
                reason: "must not be empty",
            });
        }
        if self.rewrite.math_link_host.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid {
                key: "rewrite.math_link_host",
                reason: "must not be empty",
            });
        }
        if self.rewrite.photo_hosts.iter().any(|host| host.trim().is_empty()) {
            exn::bail!(ErrorKind::Invalid {
                key: "rewrite.photo_hosts",
                reason: "must not contain empty host names",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    const TOML: &str = r#"
        export = "backup.xml"

        [output]
        image_prefix = "static/img"

        [rewrite]
        photo_hosts = ["imgur.com", "flickr.com"]
        on_fetch_error = "skip"
    "#;
    const YAML: &str = "
export: backup.xml
output:
  image_prefix: static/img
rewrite:
  photo_hosts: [imgur.com, flickr.com]
  on_fetch_error: skip
";
    const JSON: &str = r#"{
        "export": "backup.xml",
        "output": { "image_prefix": "static/img" },
        "rewrite": { "photo_hosts": ["imgur.com", "flickr.com"], "on_fetch_error": "skip" }
    }"#;

    fn expected_from_file() -> Config {
        let mut config = Config::default();
        config.export = PathBuf::from("backup.xml");
        config.output.image_prefix = "static/img".to_string();
        config.rewrite.photo_hosts = vec!["imgur.com".to_string(), "flickr.com".to_string()];
        config.rewrite.on_fetch_error = OnFetchError::Skip;
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.export, PathBuf::from("data/blog.xml"));
        assert_eq!(config.output.data_dir, PathBuf::from("src/data/blog"));
        assert_eq!(config.output.image_dir, PathBuf::from("src/images"));
        assert_eq!(config.rewrite.photo_hosts, ["imgur.com"]);
        assert_eq!(config.rewrite.math_host, "latex.codecogs.com");
        assert_eq!(config.rewrite.math_link_host, "www.codecogs.com");
        assert_eq!(config.rewrite.on_fetch_error, OnFetchError::Abort);
    }

    #[test]
    fn test_no_file_yields_defaults() {
        Jail::expect_with(|_| {
            let config = Config::from_figment(&Config::figment(None).unwrap()).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[rstest]
    #[case("config.toml", TOML)]
    #[case("config.yaml", YAML)]
    #[case("config.yml", YAML)]
    #[case("config.json", JSON)]
    fn test_file_formats(#[case] name: &str, #[case] contents: &str) {
        Jail::expect_with(|jail| {
            jail.create_file(name, contents)?;
            let config = Config::load(Some(Path::new(name)), &Overrides::default()).unwrap();
            assert_eq!(config, expected_from_file());
            Ok(())
        });
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.toml");
        let err = Config::figment(Some(&path)).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(path));
    }

    #[test]
    fn test_unsupported_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.ini");
        std::fs::write(&path, "export = x").unwrap();
        let err = Config::figment(Some(&path)).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedFormat(path));
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", TOML)?;
            jail.set_env("BLOGMILL_OUTPUT__IMAGE_PREFIX", "media");
            jail.set_env("BLOGMILL_REWRITE__ON_FETCH_ERROR", "abort");
            let config = Config::load(Some(Path::new("config.toml")), &Overrides::default()).unwrap();
            assert_eq!(config.output.image_prefix, "media");
            assert_eq!(config.rewrite.on_fetch_error, OnFetchError::Abort);
            assert_eq!(config.export, PathBuf::from("backup.xml"));
            Ok(())
        });
    }

    #[test]
    fn test_overrides_take_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", TOML)?;
            jail.set_env("BLOGMILL_EXPORT", "from-env.xml");
            let overrides = Overrides {
                export: Some(PathBuf::from("from-cli.xml")),
                output: OutputOverrides {
                    image_dir: Some(PathBuf::from("public/images")),
                    ..OutputOverrides::default()
                },
                rewrite: RewriteOverrides {
                    on_fetch_error: Some(OnFetchError::Abort),
                },
            };
            let config = Config::load(Some(Path::new("config.toml")), &overrides).unwrap();
            assert_eq!(config.export, PathBuf::from("from-cli.xml"));
            assert_eq!(config.output.image_dir, PathBuf::from("public/images"));
            assert_eq!(config.output.data_dir, PathBuf::from("src/data/blog"));
            assert_eq!(config.rewrite.on_fetch_error, OnFetchError::Abort);
            Ok(())
        });
    }

    #[rstest]
    #[case("[output]\nimage_prefix = \"/\"", "output.image_prefix")]
    #[case("[rewrite]\nmath_host = \"\"", "rewrite.math_host")]
    #[case("[rewrite]\nmath_link_host = \" \"", "rewrite.math_link_host")]
    #[case("[rewrite]\nphoto_hosts = [\"imgur.com\", \"\"]", "rewrite.photo_hosts")]
    fn test_invalid_values(#[case] contents: &str, #[case] expected_key: &str) {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", contents)?;
            let err = Config::load(Some(Path::new("config.toml")), &Overrides::default()).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Invalid { key, .. } if *key == expected_key));
            Ok(())
        });
    }

    #[test]
    fn test_wrong_type_is_an_extract_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[rewrite]\non_fetch_error = \"sometimes\"")?;
            let err = Config::load(Some(Path::new("config.toml")), &Overrides::default()).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Extract(_)));
            Ok(())
        });
    }
}
