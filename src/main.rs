use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use ratatui::crossterm::execute;

use medfill::app::App;
use medfill::config::{self, Config, ConfigResult};
use medfill::source::{SuggestionSource, spawn_worker};

/// Medication entry form with incremental search suggestions
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Suggestion endpoint URL (overrides the config file)
    #[arg(long, value_name = "URL", conflicts_with = "catalog")]
    endpoint: Option<String>,

    /// Answer queries from a local JSON catalog instead of the endpoint
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Config file [default: <config dir>/medfill/config.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Quiet period after the last keystroke before a query is sent
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    #[cfg(debug_assertions)]
    init_logging();

    let cli = Cli::parse();

    let ConfigResult { mut config, warning } = config::load_config(cli.config.as_deref());
    apply_overrides(&mut config, &cli);

    // Bad endpoints and catalogs are reported before the terminal is taken over
    let source = SuggestionSource::from_config(&config.suggest, cli.catalog.as_deref())?;
    log::info!("Suggestion source: {}", source.describe());
    let status = warning.unwrap_or_else(|| format!("Suggestions from {}", source.describe()));

    let fetcher = spawn_worker(source, config.suggest.timeout());
    let mut app = App::new(&config, Some(fetcher));
    app.set_status(status);

    let terminal = ratatui::init();
    let result = execute!(std::io::stdout(), EnableMouseCapture, EnableBracketedPaste)
        .map_err(Into::into)
        .and_then(|_| run(terminal, &mut app));
    let _ = execute!(std::io::stdout(), DisableMouseCapture, DisableBracketedPaste);
    ratatui::restore();
    result?;

    if app.submitted {
        println!("{}", form_json(&app)?);
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(endpoint) = &cli.endpoint {
        config.suggest.endpoint = endpoint.clone();
    }
    if let Some(debounce_ms) = cli.debounce_ms {
        config.suggest.debounce_ms = debounce_ms;
    }
}

fn run(mut terminal: DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            let event = event::read()?;
            app.handle_event(event, Instant::now());
        }

        app.tick(Instant::now());

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Submitted form values as a JSON object keyed by field id
fn form_json(app: &App) -> Result<String> {
    let values: serde_json::Map<String, serde_json::Value> = app
        .form
        .values()
        .into_iter()
        .map(|(id, value)| (id.to_string(), serde_json::Value::String(value)))
        .collect();
    Ok(serde_json::to_string_pretty(&values)?)
}

/// Debug builds log to `<cache dir>/medfill/medfill.log`; the terminal belongs to the UI
#[cfg(debug_assertions)]
fn init_logging() {
    use std::fs::{self, OpenOptions};
    use std::io::Write;

    let Some(dir) = dirs::cache_dir().map(|d| d.join("medfill")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("medfill.log"))
    else {
        return;
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("medfill=debug"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}
