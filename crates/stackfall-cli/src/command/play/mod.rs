use ratatui_runtime::Runtime;
use stackfall_engine::{GameSession, PieceSeed};

use self::{app::PlayApp, summary::SessionSummary};

mod app;
mod summary;

const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence, as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(super) seed: Option<PieceSeed>,
    /// Tick and frame rate in Hz
    #[clap(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub(super) fps: u32,
    /// Do not show where the falling piece will land
    #[clap(long)]
    pub(super) no_ghost: bool,
    /// Print a JSON summary of the final state to stdout on exit
    #[clap(long)]
    pub(super) summary_json: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            fps: DEFAULT_FPS,
            no_ghost: false,
            summary_json: false,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        fps,
        no_ghost,
        summary_json,
    } = arg;

    let session = seed.map_or_else(GameSession::new, GameSession::with_seed);
    let mut app = PlayApp::new(session, f64::from(*fps), !*no_ghost);

    Runtime::new().run(&mut app)?;

    // the terminal is restored by now, so stdout is safe to use
    if *summary_json {
        let summary = SessionSummary::from_snapshot(app.session().snapshot());
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
