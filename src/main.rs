use anyhow::Context;
use clap::Parser;
use probability_calc::utils::error::{ErrorSeverity, ProbabilityError};
use probability_calc::utils::{logger, validation::Validate};
use probability_calc::{
    CalculatorRegistry, CliConfig, JsonLinesCalculationStorer, ProbabilityCalculatorSupervisor,
    TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let file_config = match &config.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
        ),
        None => None,
    };

    let log_level = file_config
        .as_ref()
        .map(|c| c.log_level().to_string())
        .unwrap_or_else(|| probability_calc::config::DEFAULT_LOG_LEVEL.to_string());
    let json_logs = file_config.as_ref().is_some_and(|c| c.json_logs());
    logger::init_logger(config.verbose, &log_level, json_logs);

    tracing::info!("Starting probability-calc");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let validation = match &file_config {
        Some(file_config) => file_config.validate().and_then(|_| config.validate()),
        None => config.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let log_path = config.resolve_log_path(file_config.as_ref());
    let storer = JsonLinesCalculationStorer::new(&log_path);

    match config.command.to_request() {
        Some(request) => {
            let supervisor =
                ProbabilityCalculatorSupervisor::new(CalculatorRegistry::with_defaults(), storer);

            match supervisor.calculate_probability(request).await {
                Ok(probability) => {
                    tracing::info!("Calculation recorded in {}", log_path);
                    println!("{}", probability);
                }
                Err(e) => exit_with(e),
            }
        }
        None => match storer.load_calculations().await {
            Ok(calculations) => {
                tracing::info!("Loaded {} calculations from {}", calculations.len(), log_path);
                for calculation in calculations {
                    println!(
                        "{}\t{}\tA={}\tB={}\t{}",
                        calculation.when.to_rfc3339(),
                        calculation.calculation_type,
                        calculation.input.probability_of_a,
                        calculation.input.probability_of_b,
                        calculation.result
                    );
                }
            }
            Err(e) => exit_with(e),
        },
    }

    Ok(())
}

fn exit_with(e: ProbabilityError) -> ! {
    tracing::error!(
        "Calculation failed: {} (Category: {:?}, Severity: {:?}, Recoverable: {})",
        e,
        e.category(),
        e.severity(),
        e.is_recoverable()
    );
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
