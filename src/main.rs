use clap::Parser;
use itinerary_gen::app;
use itinerary_gen::config::LogFormat;
use itinerary_gen::utils::logger;
use itinerary_gen::{AppConfig, CliConfig, ItineraryError};

fn exit_with(e: &ItineraryError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match AppConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with(&e);
        }
    };

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }
    tracing::debug!("Resolved config: backend={:?}, output={}", config.backend, config.output_path);

    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    match app::run(&cli, &config, &mut out, &mut err).await {
        Ok(outcome) => {
            let code = outcome.code();
            if code > 0 {
                std::process::exit(code);
            }
        }
        Err(e) => exit_with(&e),
    }
}
