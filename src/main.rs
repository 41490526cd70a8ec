mod cli_args;

use anyhow::Result;
use log::{debug, error, info, warn};
use std::process::ExitCode;

use cli_args::CommandLineArgs;
use utm_checker::report::Report;
use utm_checker::settings::{OutputFormat, Settings};
use utm_checker::{normalize, TrackingParams, UtmEngine, ValidationOutcome};

const EXIT_INVALID: u8 = 1;
const EXIT_PARSE_ERROR: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli_args = CommandLineArgs::parse_args();

    env_logger::Builder::from_default_env()
        .filter_level(if cli_args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    debug!("UTM Checker v{} starting up...", env!("CARGO_PKG_VERSION"));
    cli_args.log_summary();

    if let Some(value) = &cli_args.normalize {
        println!("{}", normalize(value, cli_args.keep_macro));
        return Ok(ExitCode::SUCCESS);
    }

    let settings = Settings::resolve(cli_args.settings.as_deref())?;
    let rules = settings.load_rules(cli_args.rules.as_deref())?;
    let engine = UtmEngine::new(rules);

    if cli_args.list_channels {
        list_channels(&engine);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(raw_url) = cli_args.url.as_deref() else {
        error!("No URL given. Pass a URL or use --list-channels / --normalize.");
        return Ok(ExitCode::from(EXIT_PARSE_ERROR));
    };

    check_url(&engine, &settings, &cli_args, raw_url)
}

fn list_channels(engine: &UtmEngine) {
    for channel in engine.rules().all_channels() {
        let marker = if channel.no_utm { " (no UTM)" } else { "" };
        println!(
            "{:<16} {:<20} {:?}{}",
            channel.id, channel.label, channel.traffic_type, marker
        );
    }
}

fn check_url(
    engine: &UtmEngine,
    settings: &Settings,
    cli_args: &CommandLineArgs,
    raw_url: &str,
) -> Result<ExitCode> {
    let parsed = match engine.parse(raw_url) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::from(EXIT_PARSE_ERROR));
        }
    };

    if parsed.params.is_empty() {
        info!("No UTM parameters found in {}", parsed.normalized_url);
    }

    let channel_id = resolve_channel(engine, settings, cli_args, &parsed.params);
    let outcome = engine.validate(&parsed.params, &channel_id);

    let fixed_url = cli_args
        .fix
        .then(|| engine.apply_all_fixes(&parsed.normalized_url, &outcome.blocking));
    let clean_url = cli_args
        .clean
        .then(|| engine.build_clean_url(&parsed.normalized_url, &normalized_params(engine, &outcome)));

    let mut report = Report::new(&parsed.normalized_url, &outcome, engine.rules());
    report.fixed_url = fixed_url.as_deref();
    report.clean_url = clean_url.as_deref();

    let format = cli_args
        .format
        .map(OutputFormat::from)
        .unwrap_or(settings.output_format);
    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => print!("{}", report.to_text(settings.show_warnings)),
    }

    if outcome.is_valid {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_INVALID))
    }
}

fn resolve_channel(
    engine: &UtmEngine,
    settings: &Settings,
    cli_args: &CommandLineArgs,
    params: &TrackingParams,
) -> String {
    if let Some(channel) = &cli_args.channel {
        return channel.clone();
    }

    let detected = if settings.auto_detect_channel {
        engine.detect(params)
    } else {
        None
    };

    match detected.or_else(|| settings.default_channel.clone()) {
        Some(channel) => {
            debug!("Using channel '{}'", channel);
            channel
        }
        None => {
            let first = engine
                .rules()
                .all_channels()
                .iter()
                .find(|c| !c.no_utm)
                .map(|c| c.id.clone())
                .unwrap_or_default();
            warn!("Could not detect a channel, validating against '{}'", first);
            first
        }
    }
}

/// Tracking values passed through the normalizer, macro kept where allowed.
fn normalized_params(engine: &UtmEngine, outcome: &ValidationOutcome) -> TrackingParams {
    let channel = engine.rules().channel_by_id(&outcome.channel_id);
    outcome
        .params
        .iter()
        .fold(TrackingParams::default(), |acc, (key, value)| {
            let keep_macro = channel
                .and_then(|c| c.rule(key))
                .map_or(false, |r| r.allow_macro);
            acc.with(key, engine.normalize(value, keep_macro))
        })
}
