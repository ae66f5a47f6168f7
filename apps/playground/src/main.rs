//! ParamFlux Playground
//!
//! Opens an edit session for one search engine, applies edits given on the
//! command line and prints the resulting view, enablement and report as JSON.

use anyhow::{Context, bail};
use clap::Parser;
use paramflux_inspector::{
    EditSession, EditorConfig, EnablementState, ParameterSchema, RawValue, SchemaError, SessionError,
    ValidationReport, ViewState,
};
use paramflux_tools::{SearchEngine, comet, metamorpheus, omssa, sage, xtandem};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "paramflux-playground")]
#[command(about = "Edit and validate search engine parameters from the command line")]
struct Args {
    /// Search engine: comet, metamorpheus, omssa, sage or xtandem
    engine: SearchEngine,

    /// JSON parameter object to start from instead of the engine defaults
    #[arg(long)]
    domain: Option<PathBuf>,

    /// JSON editor configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Edit a field. Values are text, `#N` selects combo position N
    #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_edit)]
    edits: Vec<(String, RawValue)>,

    /// Map the edited view back and print the resulting parameters
    #[arg(long)]
    confirm: bool,
}

#[derive(Serialize)]
struct Output<'a, D> {
    engine: &'a str,
    view: &'a ViewState,
    enablement: &'a EnablementState,
    report: &'a ValidationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmed: Option<D>,
}

fn parse_edit(arg: &str) -> Result<(String, RawValue), String> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got `{arg}`"))?;
    let raw = match value.strip_prefix('#') {
        Some(index) => RawValue::index(
            index
                .parse()
                .map_err(|_| format!("`{index}` is not a combo position"))?,
        ),
        None => RawValue::text(value),
    };
    Ok((id.trim().to_string(), raw))
}

fn load_config(args: &Args) -> anyhow::Result<EditorConfig> {
    let Some(path) = &args.config else {
        return Ok(EditorConfig::default());
    };
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    EditorConfig::from_json(&json).with_context(|| format!("Invalid editor configuration in {}", path.display()))
}

fn run<D>(schema: Result<ParameterSchema<D>, SchemaError>, args: &Args, config: EditorConfig) -> anyhow::Result<()>
where
    D: Default + Clone + Serialize + DeserializeOwned,
{
    let schema = schema.context("Failed to build parameter schema")?;
    let domain = match &args.domain {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&json).with_context(|| format!("Invalid {} parameters", schema.tool()))?
        }
        None => D::default(),
    };

    let mut session = EditSession::open(&schema, domain, config)?;
    for (id, value) in &args.edits {
        session
            .update_value(id, value.clone())
            .with_context(|| format!("Cannot set `{id}`"))?;
    }
    if !session.config().validate_on_edit {
        session.revalidate();
    }

    let confirmed = if args.confirm {
        match session.confirm() {
            Ok(parameters) => Some(parameters),
            Err(SessionError::Invalid(report)) => {
                print(&session, None)?;
                warn!(errors = report.messages().len(), "Confirmation refused");
                bail!("validation failed: {report}");
            }
            Err(err) => return Err(err.into()),
        }
    } else {
        None
    };

    print(&session, confirmed)
}

fn print<D>(session: &EditSession<'_, D>, confirmed: Option<D>) -> anyhow::Result<()>
where
    D: Clone + Serialize,
{
    let output = Output {
        engine: session.schema().tool(),
        view: session.view(),
        enablement: session.enablement(),
        report: session.report(),
        confirmed,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(engine = %args.engine, edits = args.edits.len(), "Starting playground");

    match args.engine {
        SearchEngine::Comet => run(comet::schema(), &args, config),
        SearchEngine::MetaMorpheus => run(metamorpheus::schema(), &args, config),
        SearchEngine::Omssa => run(omssa::schema(), &args, config),
        SearchEngine::Sage => run(sage::schema(), &args, config),
        SearchEngine::XTandem => run(xtandem::schema(), &args, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edit() {
        assert_eq!(
            parse_edit("min_peaks=10"),
            Ok(("min_peaks".to_string(), RawValue::text("10")))
        );
        assert_eq!(
            parse_edit("enzyme_type=#2"),
            Ok(("enzyme_type".to_string(), RawValue::index(2)))
        );
        assert_eq!(parse_edit("skyline_path="), Ok(("skyline_path".to_string(), RawValue::text(""))));
        assert!(parse_edit("min_peaks").is_err());
        assert!(parse_edit("enzyme_type=#x").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["paramflux-playground", "xtandem", "--set", "refine=#1", "--confirm"]).unwrap();
        assert_eq!(args.engine, SearchEngine::XTandem);
        assert_eq!(args.edits.len(), 1);
        assert!(args.confirm);
    }
}
