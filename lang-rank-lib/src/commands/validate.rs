use super::Host;
use crate::Result;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::enumeration::LanguageSource;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `lang-rank.toml` in the current directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Loads a configuration file and checks that its language source yields languages
async fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Config, usize)> {
    let config = Config::load(base_dir, config_path)?;
    let languages = config.language_source().top_languages(config.language_limit).await?;
    Ok((config, languages.len()))
}

pub async fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let base_dir = Utf8Path::new(".");
    let config_path = args.config.as_ref();

    match validate_config_inner(base_dir, config_path).await {
        Ok((config, language_count)) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else if base_dir.join(DEFAULT_CONFIG_FILE).exists() {
                let _ = writeln!(host.output(), "Config file: {DEFAULT_CONFIG_FILE}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }
            let _ = writeln!(
                host.output(),
                "{} keyword(s), {language_count} language(s)",
                config.keywords.len()
            );
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
