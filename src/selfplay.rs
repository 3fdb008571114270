//! Batch self-play for corpus building.
//!
//! Plays many independent games with a random move source. Each game owns
//! its own board, move log, and RNG; nothing mutable is shared between
//! workers. Finished records are handed to a single callback on the
//! calling thread, which is where corpus merging happens.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;

use crate::board::{BoardError, Configuration};
use crate::game::{Game, GameError};
use crate::movegen::RandomMoves;
use crate::protocol::{format_moves, GameRecord};

/// Errors raised while running self-play.
#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("invalid starting board: {0}")]
    Board(#[from] BoardError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Triangle side length.
    pub size: usize,
    /// Starting layout. `None` uses the standard layout (apex empty).
    pub initial: Option<Configuration>,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            size: 5,
            initial: None,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    /// Builds the starting position every game is cloned from.
    fn starting_game(&self) -> Result<Game, BoardError> {
        match &self.initial {
            Some(config) => Game::from_configuration(self.size, config),
            None => Game::standard(self.size),
        }
    }

    fn rng_for(&self, game_id: usize) -> SmallRng {
        if self.seed != 0 {
            SmallRng::seed_from_u64(self.seed.wrapping_add(game_id as u64))
        } else {
            SmallRng::from_entropy()
        }
    }
}

/// Plays one game to completion from `start` with random moves.
pub fn play_game(start: &Game, rng: SmallRng) -> Result<GameRecord, GameError> {
    let mut game = start.clone();
    let mut source = RandomMoves::new(rng);
    game.run(&mut source)?;
    Ok(game.record())
}

/// Runs self-play generation, returning every record in completion order.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game))?;
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed record.
///
/// `on_game` always runs on the calling thread, so it may own the corpus
/// recorder without further locking.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    let start = config.starting_game()?;
    if config.threads > 1 {
        run_self_play_parallel(config, &start, on_game)
    } else {
        run_self_play_sequential(config, &start, on_game)
    }
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, start: &Game, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let game_start = Instant::now();
        let record = play_game(start, config.rng_for(i))?;
        if !config.quiet {
            eprintln!(
                "Game {}/{}: {} pegs left after {} moves ({:.1}ms)",
                i + 1,
                config.num_games,
                record.score,
                record.moves.len(),
                game_start.elapsed().as_secs_f64() * 1000.0,
            );
        }
        on_game(record);
    }
    Ok(())
}

/// Plays games concurrently with rayon and funnels records back over a
/// channel to the caller's thread.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, start: &Game, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<Result<GameRecord, GameError>>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let mut first_error = None;
    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let game_start = Instant::now();
                        let result = play_game(start, config.rng_for(i));
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        if let (false, Ok(record)) = (config.quiet, &result) {
                            eprintln!(
                                "Game {}/{}: {} pegs left after {} moves ({:.1}ms)",
                                n,
                                config.num_games,
                                record.score,
                                record.moves.len(),
                                game_start.elapsed().as_secs_f64() * 1000.0,
                            );
                        }
                        let _ = tx.send(result);
                    });
            });
        });

        for result in rx {
            match result {
                Ok(record) => on_game(record),
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
    });

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// One game as a JSON line: corpus key, score, and move notation.
#[derive(Serialize)]
struct RecordLine<'a> {
    key: String,
    score: usize,
    moves: &'a [String],
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        let moves = format_moves(&game.moves);
        let line = RecordLine {
            key: game.key(),
            score: game.score,
            moves: &moves,
        };
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results of a batch of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelfPlaySummary {
    pub games: usize,
    pub best_score: Option<usize>,
    pub mean_score: f64,
    pub mean_moves: f64,
    /// Score -> number of games.
    pub scores: BTreeMap<usize, usize>,
}

/// Summarizes a batch of records.
pub fn summarize(games: &[GameRecord]) -> SelfPlaySummary {
    let mut scores = BTreeMap::new();
    for game in games {
        *scores.entry(game.score).or_insert(0) += 1;
    }
    let n = games.len().max(1) as f64;
    SelfPlaySummary {
        games: games.len(),
        best_score: games.iter().map(|g| g.score).min(),
        mean_score: games.iter().map(|g| g.score).sum::<usize>() as f64 / n,
        mean_moves: games.iter().map(|g| g.moves.len()).sum::<usize>() as f64 / n,
        scores,
    }
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let summary = summarize(games);
    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", summary.games);
    eprintln!("Avg moves/game: {:.1}", summary.mean_moves);
    eprintln!("Avg pegs left: {:.2}", summary.mean_score);
    match summary.best_score {
        Some(best) => eprintln!("Best: {} pegs left", best),
        None => eprintln!("Best: -"),
    }
    eprintln!("Score distribution:");
    for (score, count) in &summary.scores {
        let pct = 100.0 * *count as f64 / summary.games.max(1) as f64;
        eprintln!("  {:>3} pegs: {} ({:.1}%)", score, count, pct);
    }
}
