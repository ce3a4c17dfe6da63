use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shambaops",
    version,
    about = "Farming advice from weather forecasts, seasonal rules and AI guidance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate advice for a crop
    Advise {
        /// Crop to advise on (maize, beans, potatoes, bananas)
        crop: String,

        /// Latitude of the farm (-90..90); requires --lon
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude of the farm (-180..180); requires --lat
        #[arg(long)]
        lon: Option<f64>,

        /// Measured soil pH (4.0-8.5)
        #[arg(long)]
        soil_ph: Option<f64>,

        /// Current growth stage (germination, vegetative, flowering, fruiting)
        #[arg(long)]
        growth_state: Option<String>,

        /// Variety being grown
        #[arg(long)]
        variety: Option<String>,

        /// Skip the AI generator and answer from the rule-based advisor
        #[arg(long)]
        no_ai: bool,
    },
    /// Validate config and test the outbound services
    Check,
    /// List supported crops, varieties and pH ranges
    Crops,
}
