mod cli;
mod render;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use skycast_core::{AppError, Config};
use skycast_weather::{
    Dashboard, NoLocation, Phase, Screen, SessionState, SessionStore, WeatherError,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = skycast_core::init() {
        eprintln!("{}", e);
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            let message = match e.downcast_ref::<WeatherError>() {
                Some(weather) => weather.user_message(),
                None => AppError::from(e).user_message(),
            };
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let coordinates = args.coordinates()?;
    let (config, _validation) = Config::load_validated(args.config_dir.as_deref())?;
    tracing::info!("Using config directory {}", config.config_dir.display());

    let dashboard = Dashboard::from_config(&config)?;
    let store = SessionStore::new(&config.config_dir);
    let screen = Mutex::new(Screen::new());

    let saved = store.load();
    let session = match (&args.place, coordinates) {
        (Some(place), _) => dashboard.search(place, &screen, saved.clone()).await,
        (None, Some(coords)) => dashboard.locate(coords, &screen, saved.clone()).await,
        (None, None) => dashboard.startup(&NoLocation, &screen, saved.clone()).await,
    };
    let mut session = persist(&store, &saved, session);
    show(&screen.lock(), args.json)?;

    if !args.interactive {
        return Ok(match screen.lock().phase() {
            Phase::Failed => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"\nSearch city (q to quit): ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.eq_ignore_ascii_case("q") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let next = dashboard.search(query, &screen, session.clone()).await;
        session = persist(&store, &session, next);
        show(&screen.lock(), args.json)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Save the session if the cycle changed it; failing to remember the place
/// is not fatal
fn persist(store: &SessionStore, previous: &SessionState, session: SessionState) -> SessionState {
    if session != *previous {
        if let Err(e) = store.save(&session) {
            tracing::warn!("{} ({})", e.user_message(), e);
        }
    }
    session
}

fn show(screen: &Screen, json: bool) -> Result<()> {
    if json {
        println!("{}", render::render_json(screen)?);
    } else {
        println!("\n{}", render::render(screen));
    }
    Ok(())
}
