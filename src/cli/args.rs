use clap::Parser;
use std::path::PathBuf;

/// Generate a badge using the shields.io API
#[derive(Parser, Debug)]
#[command(name = "badge-dl", author, version, about, long_about = None)]
pub struct Args {
    /// The left label of the badge
    pub label: String,

    /// The right status of the badge
    pub status: String,

    /// The file path to store the badge image file
    pub path: PathBuf,

    /// Badge color(s): hex, named color, or comma-separated for a gradient [default: blue]
    #[arg(short, long)]
    pub color: Option<String>,

    /// Label color (hex or named color) [default: 555]
    #[arg(short = 'l', long)]
    pub label_color: Option<String>,

    /// Badge style (flat, flat-square, plastic, for-the-badge, social) [default: flat]
    #[arg(short, long)]
    pub style: Option<String>,

    /// Logo name from simple-icons
    #[arg(long)]
    pub logo: Option<String>,

    /// Logo color (hex, rgb, rgba, hsl, hsla, or CSS named colors)
    #[arg(long)]
    pub logo_color: Option<String>,

    /// Cache duration in seconds
    #[arg(long)]
    pub cache_seconds: Option<String>,

    /// URL to link the badge to
    #[arg(long)]
    pub link: Option<String>,

    /// Maximum age of the badge in seconds
    #[arg(long)]
    pub max_age: Option<String>,

    /// JSON configuration file
    #[arg(long, env = "BADGE_DL_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Badge service endpoint (overrides the config file)
    #[arg(long, env = "BADGE_DL_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, env = "BADGE_DL_TIMEOUT", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Report every missing required input instead of the first one
    #[arg(long)]
    pub all_missing: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
