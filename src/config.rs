use crate::args::Args;
use crate::context::Context;
use crate::error::Error;
use crate::request::PackagingRequest;
use crate::result::Result;
use crate::tpl::Tpl;
use crate::utils;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Plugin folder packaged when nothing else is configured
pub const DEFAULT_FOLDER: &str = "woocommerce-binance-pix";

/// Archive name (without extension) used when nothing else is configured
pub const DEFAULT_OUTPUT: &str = "Plugin-Binance-Pix-FINAL";

/// Configuration file picked up from the current directory
pub const DEFAULT_CONFIG_FILE: &str = "packager.toml";

const TEMPLATE_VARIABLES: &[&str] = &["CWD", "HOME", "DESKTOP", "FOLDER"];

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    #[serde(default)]
    pub package: PackageConfig,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    #[serde(default)]
    pub root: Option<String>,

    #[serde(default)]
    pub folder: Option<String>,

    #[serde(default)]
    pub output: Option<String>,
}

/// A configuration file together with the directory its relative paths
/// are resolved against
#[derive(Debug)]
pub struct Config {
    pub package: PackageConfig,
    pub base_dir: PathBuf,
}

impl Config {
    /// Load the configuration named on the command line, or `packager.toml`
    /// from the current directory when it exists.
    pub fn load(ctx: &Context, explicit: Option<&Path>) -> Result<Option<Self>> {
        let path = match explicit {
            Some(path) => {
                let path = utils::resolve(&ctx.current_dir, path);
                if !path.is_file() {
                    return Err(Error::Config(format!(
                        "configuration file not found: {}",
                        path.display()
                    )));
                }
                path
            }
            None => {
                let path = ctx.current_dir.join(DEFAULT_CONFIG_FILE);
                if !path.is_file() {
                    return Ok(None);
                }
                path
            }
        };

        let content = fs::read_to_string(&path)?;
        let base_dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| ctx.current_dir.clone());

        Self::from_str(&content, base_dir).map(Some)
    }

    pub fn from_str(content: &str, base_dir: PathBuf) -> Result<Self> {
        let parsed: ConfigToml = toml::from_str(content)?;
        Ok(Self {
            package: parsed.package,
            base_dir,
        })
    }
}

/// Build the packaging request. Command-line flags win over the
/// configuration file, which wins over the built-in defaults.
pub fn resolve_request(
    ctx: &Context,
    args: &Args,
    config: Option<&Config>,
    home: Option<PathBuf>,
) -> Result<PackagingRequest> {
    let mut tpl = Tpl::new();
    tpl.register("CWD", ctx.current_dir.to_string_lossy());
    if let Some(home) = &home {
        tpl.register("HOME", home.to_string_lossy());
        tpl.register("DESKTOP", home.join("Desktop").to_string_lossy());
    }

    let package = config.map(|c| c.package.clone()).unwrap_or_default();
    let config_dir = config
        .map(|c| c.base_dir.as_path())
        .unwrap_or(ctx.current_dir.as_path());

    let folder = match (&args.folder, &package.folder) {
        (Some(folder), _) => folder.clone(),
        (None, Some(folder)) => expand(&tpl, folder.as_str())?,
        (None, None) => DEFAULT_FOLDER.to_string(),
    };
    tpl.register("FOLDER", folder.as_str());

    let root_dir = match (&args.root, &package.root) {
        (Some(root), _) => utils::resolve(&ctx.current_dir, root),
        (None, Some(root)) => utils::resolve(config_dir, Path::new(&expand(&tpl, root.as_str())?)),
        (None, None) => ctx.current_dir.clone(),
    };

    let output_path = match (&args.output, &package.output) {
        (Some(output), _) => utils::resolve(&ctx.current_dir, output),
        (None, Some(output)) => utils::resolve(&root_dir, Path::new(&expand(&tpl, output.as_str())?)),
        (None, None) => root_dir.join(DEFAULT_OUTPUT),
    };

    PackagingRequest::new(root_dir, folder, output_path)
}

/// Substitute template variables, refusing any that have no value
fn expand(tpl: &Tpl, value: &str) -> Result<String> {
    let missing = tpl.unresolved(value, TEMPLATE_VARIABLES);
    if !missing.is_empty() {
        return Err(Error::Config(format!(
            "cannot resolve ${} in \"{}\"",
            missing.join(", $"),
            value
        )));
    }
    Ok(tpl.parse(value))
}
