use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, Event};
use engine_logging::{engine_debug, engine_info, engine_warn};
use summarizer_core::{update, AppState, Msg};
use summarizer_engine::EngineHandle;

use super::effects::EffectRunner;
use super::logging;
use super::ui::{self, input::Action};
use crate::config::AppConfig;

/// Drives the spinner and the engine poll between terminal events.
const TICK_RATE: Duration = Duration::from_millis(100);

pub fn run_app(config: AppConfig, initial_file: Option<PathBuf>) -> anyhow::Result<()> {
    logging::initialize(config.log_destination, config.level(), &config.log_file);
    engine_info!("Starting summarizer against {}", config.service_url);
    if config.log_destination.writes_to_terminal() {
        engine_warn!(
            "Log destination {:?} writes to stderr and will overwrite the terminal UI",
            config.log_destination
        );
    }

    let runner = EffectRunner::new(start_engine(&config)?, config.download_dir());

    let mut state = AppState::with_preferences(config.model(), config.theme());
    let (mut terminal, _guard) =
        ui::terminal::setup_terminal().context("terminal setup failed")?;

    let mut inbox: VecDeque<Msg> = VecDeque::new();
    inbox.push_back(Msg::Mounted);
    if let Some(path) = initial_file {
        inbox.push_back(Msg::FileChosen(path));
    }

    let mut needs_draw = true;
    let mut last_tick = Instant::now();
    loop {
        inbox.extend(runner.poll());
        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            inbox.extend(runner.run(effects));
        }

        if state.consume_dirty() || needs_draw {
            let view = state.view();
            terminal
                .draw(|frame| ui::render::draw(frame, &view))
                .context("failed to draw frame")?;
            needs_draw = false;
        }

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).context("failed to poll terminal events")? {
            match event::read().context("failed to read terminal event")? {
                Event::Resize(..) => needs_draw = true,
                other => match ui::input::map_event(&state.view(), &other) {
                    Some(Action::Quit) => break,
                    Some(Action::Dispatch(msg)) => inbox.push_back(msg),
                    None => {}
                },
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            inbox.push_back(Msg::Tick);
            last_tick = Instant::now();
        }
    }

    engine_debug!("Event loop finished");
    engine_info!("Summarizer exiting");
    Ok(())
}

/// Builds the engine. This validates the service url and starts the runtime;
/// the service itself is not contacted.
fn start_engine(config: &AppConfig) -> anyhow::Result<EngineHandle> {
    EngineHandle::new(config.service_settings())
        .with_context(|| format!("invalid service configuration for {}", config.service_url))
}
