use std::{collections::HashMap, env, path::PathBuf, process};

use chrono::{Local, NaiveDate};

use revenue_core::{
    config::{ConfigManager, ReportConfig},
    dashboard::DashboardService,
    init,
    period::{resolve_period, PeriodRequest, ISO_FORMAT},
    report::Visibility,
    storage::JsonRecordFile,
};

const PERIOD_FLAGS: [&str; 5] = ["filter", "year", "month", "start", "end"];
const REPORT_FLAGS: [&str; 4] = ["location", "records", "config", "today"];

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });
    let flags = parse_flags(args)?;

    match command.as_str() {
        "resolve" => {
            let period = resolve_period(&period_request(&flags), today(&flags)?);
            let json = serde_json::json!({
                "filter": period.selector,
                "year": period.year,
                "month": period.month,
                "start": period.interval.start_label(),
                "end": period.interval.end_label(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        "report" => {
            let (config, records_path) = load_config(&flags)?;
            let records_path = flags
                .get("records")
                .map(PathBuf::from)
                .or(records_path)
                .ok_or("no records file given; pass --records or set records_file in the config")?;
            let visibility = match flags.get("location") {
                Some(location) => Visibility::only(location.as_str()),
                None => Visibility::AllLocations,
            };
            let view = DashboardService::load_and_build(
                &config,
                &JsonRecordFile::new(records_path),
                &period_request(&flags),
                &visibility,
                today(&flags)?,
            )?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        "years" => {
            let (config, _) = load_config(&flags)?;
            for year in config.year_options.years() {
                println!("{year}");
            }
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn parse_flags(
    mut args: impl Iterator<Item = String>,
) -> Result<HashMap<String, String>, Box<dyn std::error::Error>> {
    let mut flags = HashMap::new();
    while let Some(arg) = args.next() {
        let name = arg
            .strip_prefix("--")
            .filter(|name| PERIOD_FLAGS.contains(name) || REPORT_FLAGS.contains(name))
            .ok_or_else(|| format!("unexpected argument `{arg}`"))?;
        let value = args
            .next()
            .ok_or_else(|| format!("missing value for --{name}"))?;
        flags.insert(name.to_string(), value);
    }
    Ok(flags)
}

fn period_request(flags: &HashMap<String, String>) -> PeriodRequest {
    PeriodRequest {
        selector: flags.get("filter").cloned(),
        year: flags.get("year").cloned(),
        month: flags.get("month").cloned(),
        start: flags.get("start").cloned(),
        end: flags.get("end").cloned(),
    }
}

fn today(flags: &HashMap<String, String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match flags.get("today") {
        Some(raw) => Ok(NaiveDate::parse_from_str(raw, ISO_FORMAT)?),
        None => Ok(Local::now().date_naive()),
    }
}

fn load_config(
    flags: &HashMap<String, String>,
) -> Result<(ReportConfig, Option<PathBuf>), Box<dyn std::error::Error>> {
    match flags.get("config") {
        Some(path) => {
            let path = PathBuf::from(path);
            let config = ConfigManager::load_from(&path)?;
            let records = config.records_file.as_ref().map(|file| match path.parent() {
                Some(dir) if file.is_relative() => dir.join(file),
                _ => file.clone(),
            });
            Ok((config, records))
        }
        None => {
            let manager = ConfigManager::new()?;
            let config = manager.load()?;
            let records = manager.records_path(&config);
            Ok((config, records))
        }
    }
}

fn print_usage() {
    eprintln!(
        "Usage: revenue_report <command> [--flag value]...\n\
         Commands:\n  \
         resolve [--filter F] [--year Y] [--month M] [--start S] [--end E]\n  \
         report  [period flags] [--location L] [--records FILE] [--config FILE]\n  \
         years   [--config FILE]\n\
         Filters: month, jahres, quartal1..quartal4, custom\n\
         --today YYYY-MM-DD overrides the current date."
    );
}
