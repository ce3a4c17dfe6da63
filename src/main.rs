mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use shambaops::config::Config;
use shambaops::datasources::{GeminiClient, OpenWeatherMapClient};
use shambaops::knowledge::KnowledgeBase;
use shambaops::logic::AdviceOrchestrator;
use shambaops::models::{AdviceRequest, ForecastLocation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Cli::parse();

    // Initialize logging
    let default_filter = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = if Config::exists(args.config.as_ref()) {
        Config::load(args.config.clone()).context("loading configuration")?
    } else {
        tracing::warn!("no config file found, running with defaults and no external services");
        Config::default()
    };

    match args.command {
        Commands::Advise {
            crop,
            lat,
            lon,
            soil_ph,
            growth_state,
            variety,
            no_ai,
        } => {
            let request = AdviceRequest {
                crop,
                lat,
                lon,
                soil_ph,
                growth_state,
                variety,
                use_ai: if no_ai { Some(false) } else { None },
            };
            let orchestrator = build_orchestrator(&config)?;
            let advice = orchestrator.advise(&request).await?;
            println!("{}", serde_json::to_string_pretty(&advice)?);
        }
        Commands::Check => {
            check(&config).await?;
        }
        Commands::Crops => {
            let kb = KnowledgeBase::new();
            for profile in kb.crop_profiles() {
                let best_season = profile
                    .best_season
                    .map(|s| s.as_str())
                    .unwrap_or("any season");
                println!(
                    "{} - water need {}, best planted in {}, {} to harvest, soil pH {:.1}-{:.1}",
                    profile.crop.display_name(),
                    profile.water_need,
                    best_season,
                    profile.growing_period,
                    profile.ph_range.min,
                    profile.ph_range.max,
                );
                for (name, info) in &profile.varieties {
                    println!(
                        "    {} ({} drought resistance): {}",
                        name, info.drought_resistance, info.description
                    );
                }
            }
        }
    }

    Ok(())
}

fn build_orchestrator(
    config: &Config,
) -> anyhow::Result<AdviceOrchestrator<OpenWeatherMapClient, GeminiClient>> {
    let forecast_provider = config
        .openweathermap
        .clone()
        .map(OpenWeatherMapClient::new)
        .transpose()
        .context("building forecast client")?;
    let advice_generator = config
        .gemini
        .clone()
        .map(GeminiClient::new)
        .transpose()
        .context("building advice generator client")?;

    Ok(AdviceOrchestrator::new(
        KnowledgeBase::new(),
        ForecastLocation::from(&config.location),
        forecast_provider,
        advice_generator,
    ))
}

async fn check(config: &Config) -> anyhow::Result<()> {
    match &config.openweathermap {
        Some(owm_config) => {
            let client = OpenWeatherMapClient::new(owm_config.clone())?;
            match client
                .test_connection(config.location.latitude, config.location.longitude)
                .await
            {
                Ok(true) => println!("OpenWeatherMap: OK"),
                Ok(false) => println!("OpenWeatherMap: reachable but request rejected"),
                Err(e) => println!("OpenWeatherMap: FAILED ({})", e),
            }
        }
        None => println!("OpenWeatherMap: not configured (requests will use the neutral forecast)"),
    }

    match &config.gemini {
        Some(gemini_config) => {
            use shambaops::datasources::AdviceGenerator;
            let client = GeminiClient::new(gemini_config.clone())?;
            match client.generate("Reply with the single word OK.").await {
                Ok(_) => println!("Gemini: OK"),
                Err(e) => println!("Gemini: FAILED ({})", e),
            }
        }
        None => println!("Gemini: not configured (requests will use the rule-based advisor)"),
    }

    Ok(())
}
