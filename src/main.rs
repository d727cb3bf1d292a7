mod catalog;
mod validation;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tolk_adapters::{detectors_from_config, storage_from_config, DetectInputs};
use tolk_core::config::{self, Config};
use tolk_store::{resolve_initial_locale, Session, StoreBuilder, TranslationStore};

use catalog::{app_labels, phrase, AppLabels, Status, SHIPPED_LOCALES};
use validation::{Rule, ValidationMessages};

#[derive(Parser)]
#[command(
    name = "tolk",
    version,
    about = "Tolk — resolve fluent translation chains for the current locale"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the locale the detectors would choose, without persisting it.
    Detect(Signals),
    /// Initialize the store and print localized strings.
    Show(Signals),
    /// Change the current locale and persist it.
    Set {
        /// Locale to switch to.
        locale: String,
    },
}

/// External signals for the detectors.
#[derive(Args)]
struct Signals {
    /// URL whose query string may carry the locale parameter.
    #[arg(long)]
    url: Option<String>,
    /// Raw Accept-Language header.
    #[arg(long, env = "TOLK_ACCEPT_LANGUAGE")]
    accept_language: Option<String>,
    /// Browser language list, most preferred first.
    #[arg(long, value_delimiter = ',')]
    languages: Vec<String>,
}

impl From<Signals> for DetectInputs {
    fn from(s: Signals) -> Self {
        Self {
            url: s.url,
            accept_language: s.accept_language,
            languages: s.languages,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.tolk.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Detect(signals) => {
            let locales = Arc::new(cfg.locale_set()?);
            let storage = storage_from_config(&cfg.storage);
            let detectors =
                detectors_from_config(&cfg, Arc::clone(&locales), storage, &signals.into());
            let locale = resolve_initial_locale(&locales, &detectors)?;
            println!("{locale}");
        }
        Commands::Show(signals) => {
            let messages = ValidationMessages::new();
            let store = build_store(&cfg, signals.into(), &messages)?;
            print_session(store.session(), &messages)?;
        }
        Commands::Set { locale } => {
            let messages = ValidationMessages::new();
            let configured = cfg.locales.supported.contains(&locale);
            if configured && !SHIPPED_LOCALES.contains(&locale.as_str()) {
                tracing::warn!(
                    "no bundled strings for '{locale}', '{}' text will be shown",
                    cfg.locales.base
                );
            }
            let mut store = build_store(&cfg, DetectInputs::default(), &messages)?;
            store.change_locale(&locale)?;
            let confirmation = phrase(store.translator(), "locale_set")?;
            println!("{confirmation} {}", store.locale());
        }
    }

    Ok(())
}

/// Wire config, adapters, labels and the validation pack into a store.
fn build_store(
    cfg: &Config,
    inputs: DetectInputs,
    messages: &ValidationMessages,
) -> anyhow::Result<TranslationStore<AppLabels>> {
    let locales = cfg.locale_set()?;
    let storage = storage_from_config(&cfg.storage);
    let detectors =
        detectors_from_config(cfg, Arc::new(locales.clone()), storage.clone(), &inputs);

    let synced = messages.clone();
    let mut builder = StoreBuilder::from_config(cfg, app_labels)?
        .detectors(detectors)
        .on_locale_change(move |session: &Session<AppLabels>| {
            synced.resync(session.locale());
            Ok(())
        });
    if let Some(storage) = storage {
        builder = builder.storage(storage);
    }
    Ok(builder.build()?)
}

fn print_session(
    session: &Session<AppLabels>,
    messages: &ValidationMessages,
) -> anyhow::Result<()> {
    let tr = session.translator();
    println!("{} {}", phrase(tr, "current_locale")?, session.locale());
    println!("{}!", phrase(tr, "greeting")?);
    println!();
    println!("{}:", phrase(tr, "statuses")?);
    for status in Status::ALL {
        println!(
            "  {} ({}): {}",
            status,
            status.code(),
            session.labels().status.lookup(status.code())
        );
    }
    println!();
    for rule in [Rule::Required, Rule::TooShort, Rule::InvalidEmail] {
        println!("  - {}", messages.get(rule));
    }
    Ok(())
}
