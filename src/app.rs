use crate::adapters::build_backend;
use crate::config::{cli::LocalStorage, AppConfig, CliConfig};
use crate::core::planner::ItineraryPlanner;
use crate::core::session::SessionSlot;
use crate::domain::model::{parse_month, GenerationOutcome, TripRequest};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

const ABOUT: &str = "\
ℹ️  Travel Itinerary Generator
   🔹 Uses AI to create customized travel plans.
   🔹 Generates detailed itineraries with activity and food suggestions.
   Plan your perfect trip effortlessly!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Generated,
    GenerationFailed,
    Redisplayed,
    NothingToShow,
}

impl ExitOutcome {
    pub fn code(self) -> i32 {
        match self {
            Self::GenerationFailed => 1,
            Self::Generated | Self::Redisplayed | Self::NothingToShow => 0,
        }
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 成功的行程寫到 `out`，失敗訊息寫到 `err`
pub fn render<O: Write, E: Write>(
    outcome: &GenerationOutcome,
    out: &mut O,
    err: &mut E,
) -> Result<()> {
    match outcome {
        GenerationOutcome::Itinerary(text) => {
            writeln!(out, "✅ Here is your itinerary:\n")?;
            writeln!(out, "{}", text)?;
        }
        GenerationOutcome::Failed { message, .. } => {
            writeln!(err, "{}", message)?;
        }
    }
    Ok(())
}

/// Runs one CLI invocation. Form and config errors are returned before any
/// backend is built; model failures come back as `GenerationFailed`.
pub async fn run<O: Write, E: Write>(
    cli: &CliConfig,
    config: &AppConfig,
    out: &mut O,
    err: &mut E,
) -> Result<ExitOutcome> {
    let storage = LocalStorage::new(config.output_path.clone());

    if cli.show_last {
        let slot = SessionSlot::restore(&storage).await?;
        return match slot.last() {
            Some(outcome) => {
                if let Some(saved_at) = slot.saved_at() {
                    writeln!(out, "🕘 Generated at {}", saved_at.format("%Y-%m-%d %H:%M UTC"))?;
                }
                render(outcome, out, err)?;
                Ok(ExitOutcome::Redisplayed)
            }
            None => {
                writeln!(out, "No itinerary generated yet.")?;
                Ok(ExitOutcome::NothingToShow)
            }
        };
    }

    writeln!(out, "🌍 Travel Itinerary Generator ✈️")?;
    writeln!(out, "AI Planner for Travel Itinerary!\n")?;
    writeln!(out, "{}\n", ABOUT)?;

    // 先檢查表單欄位，地點空白時不呼叫模型
    let month = parse_month(&cli.month)?;
    let request = TripRequest::new(cli.location.clone(), cli.days, month)?;

    config.validate()?;
    let planner = ItineraryPlanner::new(build_backend(config)?);

    writeln!(
        out,
        "📍 {} · 📅 {} day(s) · 🗓️ {}",
        request.location(),
        request.days(),
        request.month().name()
    )?;

    let pb = spinner(format!("Generating itinerary with {}...", planner.model_name()));
    let mut slot = SessionSlot::default();
    let outcome = planner.submit(&request, &mut slot).await.clone();
    pb.finish_and_clear();

    if let Err(e) = slot.persist(&storage).await {
        tracing::warn!("Could not save itinerary for later: {}", e);
    }

    render(&outcome, out, err)?;
    Ok(if outcome.is_success() {
        ExitOutcome::Generated
    } else {
        ExitOutcome::GenerationFailed
    })
}
