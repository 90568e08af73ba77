use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use clap::Parser;
use colored::Colorize;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use intraday_forecast::action_router::{ActionRouterInput, ActionRouterOutput};
use intraday_forecast::aggregators::processor_enums::{AggregateInputArgs, AggregateToResolutionInputArgs};
use intraday_forecast::aggregators::{AggregatorsProcessorInput, AggregatorsProcessorOutput};
use intraday_forecast::api_format::processor_enums::{BuildPayloadInputArgs, WritePayloadInputArgs};
use intraday_forecast::api_format::{ApiFormatProcessorInput, ApiFormatProcessorOutput};
use intraday_forecast::cli_helper::{call_action_router, initialize_app_config, resolve_location};
use intraday_forecast::cli_utils::{
    format_quality, format_record, format_table, print_error, print_header, print_info, print_section,
    print_success,
};
use intraday_forecast::csv_export::processor_enums::ExportCsvInputArgs;
use intraday_forecast::csv_export::{CsvExportProcessorInput, CsvExportProcessorOutput};
use intraday_forecast::forecast::ingest::read_base_series;
use intraday_forecast::forecast::{ForecastSeries, Location, Resolution, ResolutionMap, SeriesSchema};
use intraday_forecast::summary::processor_enums::{ExportSummaryInputArgs, SummarizeInputArgs};
use intraday_forecast::summary::{SummaryProcessorInput, SummaryProcessorOutput, SummaryReport};
use intraday_forecast::trading::processor_enums::{BuildTradingViewInputArgs, ExportTradingViewInputArgs};
use intraday_forecast::trading::{TradingProcessorInput, TradingProcessorOutput};
use intraday_forecast::utils::app_config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "intraday-forecast",
    about = "Intraday solar forecast aggregation",
    long_about = "Aggregates a 15-minute solar production forecast into coarser resolutions and exports CSV, trading, API and summary views"
)]
struct CliArgs {
    /// Base forecast CSV
    #[arg(long, env = "FORECAST_INPUT")]
    input: PathBuf,

    /// Location key (if not provided, interactive selection)
    #[arg(long)]
    location: Option<String>,

    /// Comma separated resolutions, e.g. 15min,1hour (defaults to AGGREGATION_LEVELS)
    #[arg(long, value_delimiter = ',')]
    resolutions: Vec<String>,

    /// Output directory (overrides FORECAST_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also write the hourly trading view
    #[arg(long)]
    trading: bool,

    /// Skip the API payload
    #[arg(long)]
    no_api: bool,

    /// Skip the summary report
    #[arg(long)]
    no_summary: bool,
}

fn main() -> Result<()> {
    let _ = dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string())
                .as_str(),
        )
        .init();

    eprintln!("{}", "╔═══════════════════════════════════════════════════════╗".bright_cyan());
    eprintln!("{}", "║        Intraday Solar Forecast Aggregator             ║".bright_cyan());
    eprintln!("{}", "╚═══════════════════════════════════════════════════════╝".bright_cyan());
    eprintln!();

    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => {
            eprintln!();
            print_success("Operation completed successfully");
            Ok(())
        }
        Err(e) => {
            print_error(&format!("{:#}", e));
            Err(e)
        }
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let mut app_config = initialize_app_config()?;
    if let Some(dir) = &args.output_dir {
        app_config.output_dir = dir.clone();
    }
    print_info(&format!("Output directory: {}", app_config.output_dir.display()));

    let series = read_base_series(&args.input)?;
    print_info(&format!(
        "Loaded {} {} points from {}",
        series.len(),
        series.resolution(),
        args.input.display()
    ));

    let location = resolve_location(args.location.as_deref(), &app_config, &series)?;
    let generated_at = Utc::now();
    let stamp = generated_at.format("%Y%m%d_%H%M%S").to_string();

    let map = aggregate(&app_config, series.clone(), args.resolutions.clone())?;
    print_resolutions(&map);

    let files = export_csv(&app_config, &map, &location, generated_at)?;
    print_section("CSV exports");
    for file in &files {
        println!("  {}", file.display());
    }

    let hourly = match map.get(&Resolution::OneHour) {
        Some(hourly) => hourly.clone(),
        None => aggregate_hourly(&app_config, series)?,
    };

    if args.trading {
        let path = app_config
            .output_dir
            .join(format!("{}_trading_{}.csv", location.key, stamp));
        let path = export_trading(&app_config, hourly.clone(), path)?;
        print_info(&format!("Trading view written to {}", path.display()));
    }

    if !args.no_api {
        let path = app_config
            .output_dir
            .join(format!("{}_api_{}.json", location.key, stamp));
        let path = export_api(&app_config, map.clone(), &location.key, generated_at, path)?;
        print_info(&format!("API payload written to {}", path.display()));
    }

    if !args.no_summary {
        let path = app_config
            .output_dir
            .join(format!("{}_summary_{}.json", location.key, stamp));
        let report = export_summary(&app_config, hourly, location.clone(), generated_at, path)?;
        print_summary(&report);
    }

    Ok(())
}

fn unexpected(output: ActionRouterOutput) -> anyhow::Error {
    anyhow!("Unexpected router output: {:?}", output)
}

fn aggregate(app_config: &AppConfig, series: ForecastSeries, resolutions: Vec<String>) -> Result<ResolutionMap> {
    let input = ActionRouterInput::Aggregators(AggregatorsProcessorInput::Aggregate(AggregateInputArgs {
        series,
        resolutions,
    }));

    match call_action_router(input, app_config.clone())? {
        ActionRouterOutput::Aggregators(AggregatorsProcessorOutput::Aggregate(map)) => Ok(map),
        other => Err(unexpected(other)),
    }
}

fn aggregate_hourly(app_config: &AppConfig, series: ForecastSeries) -> Result<ForecastSeries> {
    let input = ActionRouterInput::Aggregators(AggregatorsProcessorInput::AggregateToResolution(
        AggregateToResolutionInputArgs {
            series,
            resolution: Resolution::OneHour,
        },
    ));

    match call_action_router(input, app_config.clone())? {
        ActionRouterOutput::Aggregators(AggregatorsProcessorOutput::AggregateToResolution(hourly)) => Ok(hourly),
        other => Err(unexpected(other)),
    }
}

fn export_csv(
    app_config: &AppConfig,
    map: &ResolutionMap,
    location: &Location,
    generated_at: DateTime<Utc>,
) -> Result<Vec<PathBuf>> {
    let input = ActionRouterInput::CsvExport(CsvExportProcessorInput::Export(ExportCsvInputArgs {
        map: map.clone(),
        location: location.clone(),
        output_dir: None,
        generated_at,
    }));

    match call_action_router(input, app_config.clone())? {
        ActionRouterOutput::CsvExport(CsvExportProcessorOutput::Export(files)) => Ok(files),
        other => Err(unexpected(other)),
    }
}

fn export_trading(app_config: &AppConfig, hourly_series: ForecastSeries, path: PathBuf) -> Result<PathBuf> {
    let input = ActionRouterInput::Trading(TradingProcessorInput::BuildView(BuildTradingViewInputArgs {
        hourly_series,
        display_timezone: None,
    }));
    let view = match call_action_router(input, app_config.clone())? {
        ActionRouterOutput::Trading(TradingProcessorOutput::BuildView(view)) => view,
        other => return Err(unexpected(other)),
    };

    let input = ActionRouterInput::Trading(TradingProcessorInput::ExportView(ExportTradingViewInputArgs {
        view,
        path,
    }));
    match call_action_router(input, app_config.clone())? {
        ActionRouterOutput::Trading(TradingProcessorOutput::ExportView(path)) => Ok(path),
        other => Err(unexpected(other)),
    }
}

fn export_api(
    app_config: &AppConfig,
    map: ResolutionMap,
    location_key: &str,
    generated_at: DateTime<Utc>,
    path: PathBuf,
) -> Result<PathBuf> {
    let input = ActionRouterInput::ApiFormat(ApiFormatProcessorInput::BuildPayload(BuildPayloadInputArgs {
        map,
        location_key: location_key.to_string(),
        generated_at,
    }));
    let payload = match call_action_router(input, app_config.clone())? {
        ActionRouterOutput::ApiFormat(ApiFormatProcessorOutput::BuildPayload(payload)) => payload,
        other => return Err(unexpected(other)),
    };

    let input = ActionRouterInput::ApiFormat(ApiFormatProcessorInput::WritePayload(WritePayloadInputArgs {
        payload,
        path,
    }));
    match call_action_router(input, app_config.clone())? {
        ActionRouterOutput::ApiFormat(ApiFormatProcessorOutput::WritePayload(path)) => Ok(path),
        other => Err(unexpected(other)),
    }
}

fn export_summary(
    app_config: &AppConfig,
    hourly_series: ForecastSeries,
    location: Location,
    generated_at: DateTime<Utc>,
    path: PathBuf,
) -> Result<SummaryReport> {
    let input = ActionRouterInput::Summary(SummaryProcessorInput::Summarize(SummarizeInputArgs {
        hourly_series,
        location,
        generated_at,
    }));
    let report = match call_action_router(input, app_config.clone())? {
        ActionRouterOutput::Summary(SummaryProcessorOutput::Summarize(report)) => report,
        other => return Err(unexpected(other)),
    };

    let input = ActionRouterInput::Summary(SummaryProcessorInput::ExportJson(ExportSummaryInputArgs {
        report: report.clone(),
        path,
    }));
    match call_action_router(input, app_config.clone())? {
        ActionRouterOutput::Summary(SummaryProcessorOutput::ExportJson(path)) => {
            print_info(&format!("Summary report written to {}", path.display()));
            Ok(report)
        }
        other => Err(unexpected(other)),
    }
}

fn print_resolutions(map: &ResolutionMap) {
    print_header("Aggregated resolutions");

    let rows = map
        .iter()
        .map(|(resolution, series)| {
            vec![
                resolution.to_string(),
                series.len().to_string(),
                series
                    .first()
                    .map(|p| p.timestamp.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string()),
                series
                    .last()
                    .map(|p| p.timestamp.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string()),
                match series.schema() {
                    SeriesSchema::PowerOnly => "no",
                    SeriesSchema::WithHeadlineEnergy => "recomputed",
                    SeriesSchema::WithEnergy => "yes",
                }
                .to_string(),
            ]
        })
        .collect();

    format_table(vec!["Resolution", "Points", "First (UTC)", "Last (UTC)", "Energy"], rows);
}

fn print_summary(report: &SummaryReport) {
    print_section(&format!("Summary for {}", report.location));

    format_record(vec![
        (
            "Period",
            format!(
                "{} .. {} ({:.0} h)",
                report.forecast_period.start.as_deref().unwrap_or("-"),
                report.forecast_period.end.as_deref().unwrap_or("-"),
                report.forecast_period.duration_hours
            ),
        ),
        ("Peak production", format!("{} kW", report.capacity_analysis.peak_production_kw)),
        ("Capacity factor", report.capacity_analysis.capacity_factor.to_string()),
        ("Total energy", format!("{} kWh", report.energy_analysis.total_energy_kwh)),
        ("Peak day", format!("{} kWh", report.energy_analysis.peak_day_kwh)),
        (
            "Relative uncertainty",
            format!("{} %", report.uncertainty_analysis.relative_uncertainty_pct),
        ),
        (
            "Forecast quality",
            format_quality(report.operational_insights.forecast_quality),
        ),
    ]);
}
