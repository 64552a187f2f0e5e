//! Pong remake entry point
//!
//! Native builds run matches headless from the command line: no window, no
//! input, just the simulation stepped at a fixed frame rate. Useful for
//! watching the AI play itself and for checking tuning files.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow, ensure};
    use clap::Parser;
    use serde::Serialize;

    use pong_remake::sim::{FrameInput, GameEvent, MatchState, Side, advance_frame};
    use pong_remake::{Difficulty, GameMode, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "pong-remake")]
    #[command(about = "Run headless Pong matches and report what happened")]
    struct Cli {
        /// one-player, two-player or demo
        #[arg(long, default_value = "demo")]
        mode: String,
        /// easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: String,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Simulated seconds to run for
        #[arg(long, default_value_t = 300.0)]
        seconds: f32,
        /// Frames per simulated second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// JSON file with tuning overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Print the summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    }

    #[derive(Debug, Default, Serialize)]
    struct MatchSummary {
        mode: &'static str,
        difficulty: &'static str,
        seed: u64,
        frames: u64,
        simulated_secs: f32,
        /// Score of the match in progress when the run stopped
        final_score: [u32; 2],
        /// Points across every match played
        points: [u32; 2],
        wins: [u32; 2],
        paddle_hits: [u32; 2],
        edge_bounces: u32,
        longest_rally: u32,
        top_ball_speed: f32,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        Tuning::from_json(&raw).with_context(|| format!("parsing tuning file {}", path.display()))
    }

    fn run(cli: &Cli) -> Result<MatchSummary> {
        let mode = GameMode::from_str(&cli.mode)
            .ok_or_else(|| anyhow!("unknown mode '{}'. expected one-player, two-player or demo", cli.mode))?;
        let difficulty = Difficulty::from_str(&cli.difficulty).ok_or_else(|| {
            anyhow!(
                "unknown difficulty '{}'. expected easy, medium or hard",
                cli.difficulty
            )
        })?;
        ensure!(cli.fps > 0, "--fps must be positive");
        ensure!(
            cli.seconds.is_finite() && cli.seconds >= 0.0,
            "--seconds must be a non-negative number"
        );
        let tuning = load_tuning(cli.tuning.as_ref())?;

        let mut state = MatchState::with_tuning(mode, difficulty, cli.seed, tuning);
        let dt = 1.0 / cli.fps as f32;
        let total_frames = (cli.seconds * cli.fps as f32).round() as u64;
        let input = FrameInput::default();

        let mut summary = MatchSummary {
            mode: mode.as_str(),
            difficulty: difficulty.as_str(),
            seed: cli.seed,
            ..Default::default()
        };
        let mut rally = 0;

        for _ in 0..total_frames {
            let events = advance_frame(&mut state, dt, &input);
            for event in events.iter() {
                match event {
                    GameEvent::PaddleHit(side) => {
                        summary.paddle_hits[side.index()] += 1;
                        rally += 1;
                        summary.longest_rally = summary.longest_rally.max(rally);
                    }
                    GameEvent::EdgeBounce => summary.edge_bounces += 1,
                    GameEvent::Score(side) => {
                        summary.points[side.index()] += 1;
                        rally = 0;
                    }
                    GameEvent::Win(side) => {
                        summary.wins[side.index()] += 1;
                        log::info!("{:?} won match {}", side, summary.wins[0] + summary.wins[1]);
                    }
                }
            }
            summary.top_ball_speed = summary.top_ball_speed.max(state.ball.speed);
            summary.frames += 1;
        }

        summary.simulated_secs = summary.frames as f32 * dt;
        summary.final_score = [state.score(Side::Left), state.score(Side::Right)];
        Ok(summary)
    }

    fn print_text(summary: &MatchSummary) {
        println!("mode={} difficulty={} seed={}", summary.mode, summary.difficulty, summary.seed);
        println!("frames={} simulated={:.1}s", summary.frames, summary.simulated_secs);
        println!(
            "score={}-{} points={}-{} wins={}-{}",
            summary.final_score[0],
            summary.final_score[1],
            summary.points[0],
            summary.points[1],
            summary.wins[0],
            summary.wins[1]
        );
        println!(
            "paddle_hits={}-{} edge_bounces={} longest_rally={} top_speed={:.0}",
            summary.paddle_hits[0],
            summary.paddle_hits[1],
            summary.edge_bounces,
            summary.longest_rally,
            summary.top_ball_speed
        );
    }

    pub fn main() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();
        log::info!("Pong (headless) starting...");

        let summary = run(&cli)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_text(&summary);
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `advance_frame` themselves; nothing to run here
}
