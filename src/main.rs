mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::CliArgs;
use kconsole_filters::config::{ConfigLoader, ConsoleConfig};
use kconsole_filters::i18n::{self, Locale};
use kconsole_filters::registry::value_text;
use kconsole_filters::{Filter, FilterRegistry};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(&args.log_filter)?;

    if args.list {
        for filter in Filter::ALL {
            println!("{:<16} {}", filter.name(), filter.description());
        }
        return Ok(());
    }

    let config = load_config(&args)?;
    i18n::init(config.locale);
    debug!(
        "config source={:?} locale={} route={:?}",
        config.source, config.locale, config.route
    );

    let registry = FilterRegistry::from_config(&config);
    let name = args.filter.as_deref().unwrap_or_default();
    let value = parse_value(args.value.as_deref());
    let result = registry.apply(name, &value, args.fallback.as_deref());
    i18n::reset();

    let output = result.with_context(|| format!("filter `{name}` failed"))?;
    println!("{}", value_text(&output));
    Ok(())
}

fn init_tracing(level_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level_filter)
        .or_else(|_| EnvFilter::try_new("info"))
        .context("failed to initialize tracing filter")?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<ConsoleConfig> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::at(path),
        None => ConfigLoader::discover(),
    };
    let mut config = loader.load()?;

    if let Some(tag) = &args.locale {
        let Some(locale) = Locale::from_tag(tag) else {
            bail!("unsupported locale `{tag}`");
        };
        config.locale = locale;
    }
    if let Some(route) = &args.route {
        config.route = Some(route.clone());
    }
    if let Some(path) = &args.state_file {
        config.state_file = Some(path.clone());
    }
    if args.kubeconfig {
        config.use_kubeconfig = true;
    }
    if config.route.is_none() && !config.use_kubeconfig {
        debug!("no route or kubeconfig source configured, context filters use fallbacks only");
    }

    Ok(config)
}

fn parse_value(raw: Option<&str>) -> Value {
    match raw {
        None => Value::Null,
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_value;
    use serde_json::json;

    #[test]
    fn json_values_are_parsed_and_text_is_kept() {
        assert_eq!(parse_value(Some("1536")), json!(1536));
        assert_eq!(parse_value(Some(r#"{"a":"b"}"#)), json!({"a": "b"}));
        assert_eq!(parse_value(Some("Jan 7 17:12")), json!("Jan 7 17:12"));
        assert_eq!(parse_value(Some("NaN")), json!("NaN"));
        assert_eq!(parse_value(None), json!(null));
    }
}
