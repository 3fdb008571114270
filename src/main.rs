//! onepeg -- triangular peg solitaire self-play and corpus tools.
//!
//! Subcommands:
//!   play      Play one game and print its moves to stdout
//!   selfplay  Play many games and merge them into a corpus (or print JSONL)
//!   stats     Summarize a corpus, reporting malformed records
//!   replay    Re-apply one stored game and print each move it made

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use onepeg::game::{replay, Game};
use onepeg::movegen::{FirstMove, MoveSource, RandomMoves};
use onepeg::protocol::{parse_configuration, GameRecord};
use onepeg::selfplay::{self, SelfPlayConfig};
use onepeg::store::{CorpusStore, JsonFileStore, Recorder};

#[derive(Parser, Debug)]
#[command(name = "onepeg", version, about = "Triangular peg solitaire engine")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game and print each move as notation
    Play {
        /// Triangle side length
        #[arg(short = 's', long, default_value_t = 5)]
        size: usize,
        /// Starting layout as a T/F string (default: all filled but position 0)
        #[arg(long, value_name = "CONFIG")]
        initial: Option<String>,
        /// Random seed, 0 for entropy
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Always play the first legal move instead of a random one
        #[arg(long)]
        first: bool,
    },
    /// Play many games and record them
    Selfplay {
        /// Number of games to play
        #[arg(short = 'g', long, default_value_t = 10)]
        games: usize,
        /// Triangle side length
        #[arg(short = 's', long, default_value_t = 5)]
        size: usize,
        /// Starting layout as a T/F string (default: all filled but position 0)
        #[arg(long, value_name = "CONFIG")]
        initial: Option<String>,
        /// Number of parallel threads
        #[arg(short = 't', long, default_value_t = 4)]
        threads: usize,
        /// Random seed, 0 for entropy
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Corpus file to merge into (default: write JSONL to stdout)
        #[arg(short = 'c', long, value_name = "FILE")]
        corpus: Option<PathBuf>,
        /// Suppress progress and summary output
        #[arg(short = 'q', long)]
        quiet: bool,
    },
    /// Summarize a corpus file
    Stats {
        /// Corpus file to read
        #[arg(short = 'c', long, value_name = "FILE")]
        corpus: PathBuf,
        /// Replay every game and check its recorded configurations
        #[arg(long)]
        verify: bool,
    },
    /// Replay one stored game, checking every move against the board
    Replay {
        /// Corpus file to read
        #[arg(short = 'c', long, value_name = "FILE")]
        corpus: PathBuf,
        /// Corpus key, e.g. 5-FTTTTTTTTTTTTTT
        #[arg(short = 'k', long)]
        key: String,
        /// Index of the game under the key
        #[arg(long, default_value_t = 0)]
        game: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Play {
            size,
            initial,
            seed,
            first,
        } => run_play(size, initial.as_deref(), seed, first),
        Command::Selfplay {
            games,
            size,
            initial,
            threads,
            seed,
            corpus,
            quiet,
        } => {
            let initial = initial
                .as_deref()
                .map(parse_configuration)
                .transpose()
                .context("invalid --initial")?;
            let config = SelfPlayConfig {
                num_games: games,
                size,
                initial,
                threads,
                seed,
                quiet,
            };
            run_selfplay(&config, corpus)
        }
        Command::Stats { corpus, verify } => run_stats(corpus, verify),
        Command::Replay { corpus, key, game } => run_replay(corpus, &key, game),
    }
}

fn run_play(size: usize, initial: Option<&str>, seed: u64, first: bool) -> anyhow::Result<()> {
    let mut game = match initial {
        Some(s) => Game::from_configuration(size, &parse_configuration(s)?)?,
        None => Game::standard(size)?,
    };
    let mut source: Box<dyn MoveSource> = if first {
        Box::new(FirstMove)
    } else if seed != 0 {
        Box::new(RandomMoves::new(SmallRng::seed_from_u64(seed)))
    } else {
        Box::new(RandomMoves::new(SmallRng::from_entropy()))
    };

    let score = game.run(source.as_mut())?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "{}", game.record().key())?;
    for notation in game.moves() {
        writeln!(out, "{}", notation)?;
    }
    writeln!(out, "score {}", score)?;
    out.flush()?;
    Ok(())
}

fn run_selfplay(config: &SelfPlayConfig, corpus: Option<PathBuf>) -> anyhow::Result<()> {
    if !config.quiet {
        eprintln!(
            "Self-play: {} games, size {}, {} threads",
            config.num_games, config.size, config.threads
        );
    }

    let start = Instant::now();
    let games = match corpus {
        Some(path) => {
            let mut recorder = Recorder::open(JsonFileStore::new(&path))
                .with_context(|| format!("failed to open corpus {}", path.display()))?;
            let mut games = Vec::with_capacity(config.num_games);
            let mut merge_error = None;
            selfplay::run_self_play_with_callback(config, |game| match recorder.merge(&game) {
                Ok(()) => games.push(game),
                Err(e) => {
                    if merge_error.is_none() {
                        merge_error = Some(e);
                    }
                }
            })?;
            if let Some(e) = merge_error {
                bail!("refusing to save corpus: {}", e);
            }
            let merged = recorder.merged();
            recorder.commit()?;
            if !config.quiet {
                eprintln!("Merged {} games into {}", merged, path.display());
            }
            games
        }
        None => {
            let games = selfplay::run_self_play(config)?;
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)?;
            games
        }
    };

    if !config.quiet {
        let elapsed = start.elapsed();
        eprintln!(
            "Completed {} games in {:.2}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }
    Ok(())
}

fn run_stats(path: PathBuf, verify: bool) -> anyhow::Result<()> {
    let corpus = JsonFileStore::new(&path)
        .load()
        .with_context(|| format!("failed to load corpus {}", path.display()))?;

    let mut malformed = 0usize;
    for (key, result) in corpus.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                malformed += 1;
                eprintln!("skipping malformed game under '{}': {}", key, e);
                continue;
            }
        };
        if verify {
            if let Err(e) = replay(&record) {
                malformed += 1;
                eprintln!("game under '{}' does not replay: {}", key, e);
            }
        }
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "keys {}", corpus.len())?;
    writeln!(out, "games {}", corpus.game_count())?;
    writeln!(out, "malformed {}", malformed)?;
    for summary in corpus.summary() {
        let best = summary
            .best_score
            .map_or_else(|| "-".to_string(), |b| b.to_string());
        let histogram: Vec<String> = summary
            .histogram
            .iter()
            .map(|(score, count)| format!("{}:{}", score, count))
            .collect();
        writeln!(
            out,
            "{} games={} best={} scores={}",
            summary.key,
            summary.games,
            best,
            histogram.join(",")
        )?;
    }
    out.flush()?;

    if verify && malformed > 0 {
        bail!("{} malformed games", malformed);
    }
    Ok(())
}

fn run_replay(path: PathBuf, key: &str, index: usize) -> anyhow::Result<()> {
    let corpus = JsonFileStore::new(&path)
        .load()
        .with_context(|| format!("failed to load corpus {}", path.display()))?;
    let Some(entry) = corpus.get(key) else {
        bail!("no games under '{}'", key);
    };
    let Some(stored) = entry.games.get(index) else {
        bail!("'{}' has {} games, no game {}", key, entry.games.len(), index);
    };

    let record = GameRecord::from_stored(key, stored)?;
    let game = replay(&record).with_context(|| format!("game {} under '{}'", index, key))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "{}", key)?;
    for notation in game.moves() {
        writeln!(out, "{}", notation)?;
    }
    writeln!(out, "score {}", game.score())?;
    if !game.is_over() {
        writeln!(out, "unfinished {} moves left", game.legal_moves().len())?;
    }
    out.flush()?;
    Ok(())
}
