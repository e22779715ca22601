use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use ticketleo_converter::utils::{logger, validation::Validate};
use ticketleo_converter::{
    CliConfig, ConvertError, ConverterConfig, EtlEngine, LocalStorage, ReportPipeline, TomlConfig,
};

fn load_config(cli: &CliConfig) -> anyhow::Result<ConverterConfig> {
    let file = match &cli.config {
        Some(path) => {
            let file = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path.display()))?;
            file.validate()
                .with_context(|| format!("invalid config file '{}'", path.display()))?;
            Some(file)
        }
        None => None,
    };

    Ok(cli.resolve(file.as_ref()))
}

fn report_failure(e: &ConvertError) -> ExitCode {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    ExitCode::from(e.exit_code())
}

fn main() -> ExitCode {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            return ExitCode::from(4);
        }
    };

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting ticketleo-converter v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return report_failure(&e);
    }

    if config.monitor {
        tracing::info!("🔍 Phase monitoring enabled");
    }

    let monitor_enabled = config.monitor;
    let pipeline = ReportPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        return match engine
            .prepare()
            .and_then(|report| Ok(serde_json::to_string_pretty(&report)?))
        {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => report_failure(&e),
        };
    }

    match engine.run() {
        Ok(summary) => {
            tracing::info!("✅ Conversion completed successfully!");
            println!("✅ Datei wurde gespeichert: '{}'", summary.output_path.display());
            println!("   Titel: '{}'", summary.title);
            println!("   Buchungen: {}", summary.booking_count);
            println!("   Plätze: {}", summary.total_seats);
            tracing::debug!("{} bytes written", summary.bytes_written);
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e),
    }
}
