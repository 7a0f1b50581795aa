//! Serving configuration via `marquee.toml`
//!
//! Declares the model generations, the directory their file sources live
//! in, and the generation to activate at boot. Generations are fixed for
//! the lifetime of the process; edit the file and restart to change them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use marquee_core::{MarqueeError, MarqueeResult};

use crate::registry::{GenerationSpec, ModelRegistry};
use crate::source::SourceDescriptor;

/// Config file name looked up in the service's data directory
pub const CONFIG_FILE_NAME: &str = "marquee.toml";

/// Serving configuration
///
/// # Example
///
/// ```toml
/// default_generation = "STANDARD"
/// model_dir = "modeldata"
///
/// [[generations]]
/// name = "STANDARD"
/// display_name = "Standard Version"
/// item_source = { file = "item2vecEmb.csv" }
/// user_source = { file = "userEmb.csv" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Generation activated at boot
    #[serde(default = "default_generation_name")]
    pub default_generation: String,
    /// Directory relative file sources resolve against
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
    /// Declared generations, in listing order
    #[serde(default = "default_generations")]
    pub generations: Vec<GenerationSpec>,
}

fn default_generation_name() -> String {
    "STANDARD".to_string()
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("modeldata")
}

/// The stock generations: two item2vec exports and one NCF export with
/// precomputed pair scores.
fn default_generations() -> Vec<GenerationSpec> {
    vec![
        GenerationSpec::new(
            "STANDARD",
            "Standard Version",
            SourceDescriptor::file("item2vecEmb.csv"),
            SourceDescriptor::file("userEmb.csv"),
        ),
        GenerationSpec::new(
            "LARGE",
            "Large Dataset Version",
            SourceDescriptor::file("item2vecEmb_large.csv"),
            SourceDescriptor::file("userEmb_large.csv"),
        ),
        GenerationSpec::new(
            "NCF",
            "NCF Version",
            SourceDescriptor::file("ncf_itemEmb_large.csv"),
            SourceDescriptor::file("ncf_userEmb_large.csv"),
        )
        .with_scores(SourceDescriptor::file("ncf_predict_scores.csv")),
    ]
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            default_generation: default_generation_name(),
            model_dir: default_model_dir(),
            generations: default_generations(),
        }
    }
}

impl MarqueeConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# marquee serving configuration
#
# Generation activated at boot. Must be declared below.
default_generation = "STANDARD"

# Directory that relative file sources resolve against.
model_dir = "modeldata"

# Declared model generations. Sources are either
#   { file = "<path>" }         one "<id>:<v1> <v2> ..." line per entity
#   { namespace = "<prefix>" }  keys "<prefix><id>" in the attached store
# score_source is optional; lines are "<userId>_<movieId>:<score>".

[[generations]]
name = "STANDARD"
display_name = "Standard Version"
item_source = { file = "item2vecEmb.csv" }
user_source = { file = "userEmb.csv" }

[[generations]]
name = "LARGE"
display_name = "Large Dataset Version"
item_source = { file = "item2vecEmb_large.csv" }
user_source = { file = "userEmb_large.csv" }

[[generations]]
name = "NCF"
display_name = "NCF Version"
item_source = { file = "ncf_itemEmb_large.csv" }
user_source = { file = "ncf_userEmb_large.csv" }
score_source = { file = "ncf_predict_scores.csv" }
"#
    }

    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// `Configuration` if the generation list is invalid or the default
    /// generation is not declared.
    pub fn validate(&self) -> MarqueeResult<()> {
        let registry = ModelRegistry::new(self.generations.clone())?;
        registry.resolve(&self.default_generation).map_err(|_| {
            MarqueeError::configuration(
                CONFIG_FILE_NAME,
                format!(
                    "default_generation '{}' is not declared",
                    self.default_generation
                ),
            )
        })?;
        Ok(())
    }

    /// Build the registry this config declares
    pub fn registry(&self) -> MarqueeResult<ModelRegistry> {
        ModelRegistry::new(self.generations.clone())
    }

    /// Read and parse config from a file path.
    ///
    /// A relative `model_dir` is resolved against the config file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> MarqueeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MarqueeError::configuration(
                path.display().to_string(),
                format!("failed to read config file: {}", e),
            )
        })?;
        let mut config: MarqueeConfig = toml::from_str(&content).map_err(|e| {
            MarqueeError::configuration(
                path.display().to_string(),
                format!("failed to parse config file: {}", e),
            )
        })?;
        if config.model_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.model_dir = parent.join(&config.model_dir);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> MarqueeResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                MarqueeError::configuration(
                    path.display().to_string(),
                    format!("failed to write default config file: {}", e),
                )
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> MarqueeResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            MarqueeError::configuration(CONFIG_FILE_NAME, format!("failed to serialize config: {}", e))
        })?;
        std::fs::write(path, content).map_err(|e| {
            MarqueeError::configuration(
                path.display().to_string(),
                format!("failed to write config file: {}", e),
            )
        })
    }
}
