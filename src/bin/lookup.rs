//! Lookup binary - resolves one translation key from the configured tables
//!
//! Usage:
//!   cargo run -- <namespace> <key> [name=value ...]
//!   cargo run -- --locale fr test_parameters test1 name=John
//!   cargo run -- --detect test_basic test1
//!   cargo run -- --validate
//!
//! Flags:
//! - `--locale <id>`: switch to a supported locale before the lookup
//! - `--detect`: switch to the system locale (ignored if unsupported)
//! - `--strict`: exit with an error instead of printing the fallback
//! - `--validate`: print the cross-locale validation report as JSON
//!
//! Optional environment variables (also read from `.env`):
//! - I18N_LOCALES_DIR (defaults to ./assets/locales/)
//! - I18N_LOCALE (defaults to en)
//! - I18N_SUPPORTED_LOCALES (comma-separated, defaults to en)

use anyhow::{bail, Context, Result};
use i18n_lookup::{LocaleConfig, TableValidator, Translator};
use tracing::{info, warn};

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    locale: Option<String>,
    detect: bool,
    strict: bool,
    validate: bool,
    namespace: Option<String>,
    key: Option<String>,
    params: Vec<(String, String)>,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut cli = CliArgs::default();
        let mut positional: Vec<&str> = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--locale" => {
                    let locale = iter.next().context("--locale requires a value")?;
                    cli.locale = Some(locale.clone());
                }
                "--detect" => cli.detect = true,
                "--strict" => cli.strict = true,
                "--validate" => cli.validate = true,
                flag if flag.starts_with("--") => bail!("Unknown flag: {}", flag),
                value => positional.push(value),
            }
        }

        let mut positional = positional.into_iter();
        cli.namespace = positional.next().map(str::to_string);
        cli.key = positional.next().map(str::to_string);
        for param in positional {
            let (name, value) = param
                .split_once('=')
                .with_context(|| format!("Expected name=value, got '{}'", param))?;
            cli.params.push((name.to_string(), value.to_string()));
        }

        if !cli.validate && cli.key.is_none() {
            bail!("Usage: i18n-lookup [--locale <id>] [--detect] [--strict] <namespace> <key> [name=value ...]");
        }
        Ok(cli)
    }
}

fn main() -> Result<()> {
    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_lookup=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = CliArgs::parse(&args)?;

    let config = LocaleConfig::from_env().context("Invalid locale configuration")?;
    info!(
        "Loading locales {:?} from {}",
        config.supported_locales, config.locales_directory
    );
    let mut translator = Translator::try_new(config).context("Failed to load translations")?;

    if cli.detect {
        if let Err(e) = translator.auto_detect_locale() {
            warn!("Keeping locale '{}': {}", translator.current_locale(), e);
        }
    }
    if let Some(locale) = &cli.locale {
        translator.set_locale(locale)?;
    }

    if cli.validate {
        let report = TableValidator::validate(&translator);
        println!("{}", serde_json::to_string_pretty(&report)?);
        if report.has_errors() {
            bail!("Validation found {} errors", report.errors.len());
        }
        return Ok(());
    }

    let namespace = cli.namespace.as_deref().unwrap_or_default();
    let key = cli.key.as_deref().unwrap_or_default();
    let params = cli.params.iter().map(|(k, v)| (k.as_str(), v.as_str()));

    let text = if cli.strict {
        translator.try_translate(key, namespace, params)?
    } else {
        translator.t(key, namespace, params)
    };
    println!("{}", text);
    Ok(())
}
