// Draft lottery entry point.
//
// Startup sequence:
// 1. Load config (seeding config/league.toml from defaults on first run)
// 2. Initialize tracing to the configured log file; stdout carries the report
// 3. Load standings and, when the mock draft is enabled, prospects
// 4. Seed the RNG
// 5. Run classification, odds, draw, simulation, and mock draft
// 6. Print the report

use draft_lottery::config::{self, LoggingConfig, OutputFormat};
use draft_lottery::data;
use draft_lottery::report::{self, DraftReport};

use anyhow::Context;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = config::load_config().context("failed to load configuration")?;
    init_tracing(&config.logging)?;
    info!("Draft lottery starting up: league={}", config.league.name);

    let standings = data::load_configured_standings(&config.data_paths)
        .context("failed to load standings")?;

    let prospects = if config.mock_draft.enabled {
        data::load_configured_prospects(&config.data_paths)
            .context("failed to load prospects")?
    } else {
        Vec::new()
    };

    let mut rng = match config.lottery.seed {
        Some(seed) => {
            info!("Seeding lottery RNG with {}", seed);
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };

    let report = DraftReport::build(&config, &standings, &prospects, &mut rng);

    match config.output.format {
        OutputFormat::Text => print!("{}", report::render_text(&report)),
        OutputFormat::Json => {
            let json = report.to_json().context("failed to serialize report")?;
            println!("{json}");
        }
    }

    info!("Draft lottery finished");
    Ok(())
}

/// Send tracing output to the league's log file. `RUST_LOG` takes precedence
/// over the configured filter.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let path = logging.log_path(&std::env::current_dir()?);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let log_file = std::fs::File::create(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .with_context(|| format!("invalid logging.filter '{}'", logging.filter))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
