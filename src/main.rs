use clap::{Parser, Subcommand};
use portfolio_ui::notification::{NotificationCenter, Severity};
use portfolio_ui::{config, form, output, render, scenario};
use std::path::PathBuf;
use tracing::Level;

fn version_string() -> &'static str {
    let on_tag = env!("PORTFOLIO_UI_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("PORTFOLIO_UI_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "portfolio-ui")]
#[command(about = "Interactive behavior of a single-page portfolio, driven headlessly")]
#[command(long_about = "\
Interactive behavior of a single-page portfolio, driven headlessly

The page's behaviors (notifications, contact form, scroll reveal, counters,
typewriter, navigation, particles, loader) run as a deterministic state
machine. Events go in with a timestamp, DOM effects come out.

Scenario file:

  {
    \"seed\": 7,                        # particle randomness
    \"until\": 10000,                   # optional; default runs until idle
    \"layout\": { ... },                # sections, nav links, reveal targets
    \"steps\": [
      { \"at\": 100, \"event\": \"scroll\", \"y\": 1200 },
      { \"at\": 900, \"event\": \"submit\" }
    ]
  }

Timings and thresholds come from config.toml in --config-dir.
Run 'portfolio-ui gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Log state transitions to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a scenario and print the resulting effects
    Simulate {
        scenario: PathBuf,
        /// Print the timeline as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a contact form submission; exits 1 when invalid
    Validate { form: PathBuf },
    /// Print a standalone HTML page showing one notification
    Preview {
        #[arg(long, default_value = "info")]
        severity: String,
        #[arg(long, default_value = "This is how notifications look.")]
        message: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Command::Simulate { scenario, json } => {
            let ui_config = config::load_config(&cli.config_dir)?;
            let script = scenario::load(&scenario)?;
            let timeline = scenario::run(&script, ui_config);
            if json {
                println!("{}", serde_json::to_string_pretty(&timeline)?);
            } else {
                output::print_timeline(&timeline);
            }
        }
        Command::Validate { form: path } => {
            let data = scenario::load_form(&path)?;
            let errors = form::validate_form(&data);
            output::print_validation(&errors);
            if !errors.is_empty() {
                std::process::exit(1);
            }
        }
        Command::Preview { severity, message } => {
            let ui_config = config::load_config(&cli.config_dir)?;
            let mut center = NotificationCenter::new(ui_config.notification_timings(), 0);
            center.notify(message, Severity::parse(&severity), 0);
            let notification = center.current().ok_or("notification was not shown")?;
            println!("{}", render::render_preview(notification).into_string());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
