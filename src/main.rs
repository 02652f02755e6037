use std::fs;

use anyhow::Context;
use clap::{App, Arg, ArgMatches};
use tracing::{info, warn};

use gridlife::{offset, parse_pattern, pos, CreateError, Game, Sim};

const DEFAULT_WIDTH: i32 = 40;
const DEFAULT_HEIGHT: i32 = 20;
const DEFAULT_GENERATIONS: u64 = 100;

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("gridlife=info"))?;
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(filter),
    )?;
    Ok(())
}

fn parse_arg<T>(matches: &ArgMatches, name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match matches.value_of(name) {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid value for --{name}: {value:?}")),
        None => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let matches = App::new("gridlife")
        .about("runs a game of life pattern on a bounded grid")
        .arg(
            Arg::with_name("pattern")
                .required(true)
                .help("text file where '#' marks a live cell"),
        )
        .arg(Arg::with_name("width").long("width").takes_value(true).help("grid width in cells"))
        .arg(Arg::with_name("height").long("height").takes_value(true).help("grid height in cells"))
        .arg(
            Arg::with_name("generations")
                .long("generations")
                .short("n")
                .takes_value(true)
                .help("how many generations to run"),
        )
        .arg(
            Arg::with_name("offset-x")
                .long("offset-x")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("shift the pattern right by this many cells"),
        )
        .arg(
            Arg::with_name("offset-y")
                .long("offset-y")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("shift the pattern down by this many cells"),
        )
        .get_matches();

    let width = parse_arg(&matches, "width", DEFAULT_WIDTH)?;
    let height = parse_arg(&matches, "height", DEFAULT_HEIGHT)?;
    let generations = parse_arg(&matches, "generations", DEFAULT_GENERATIONS)?;
    let shift = pos!(
        parse_arg(&matches, "offset-x", 0)?,
        parse_arg(&matches, "offset-y", 0)?
    );

    // "pattern" is required, clap has already rejected a missing one.
    let path = matches.value_of("pattern").unwrap_or_default();
    let content = fs::read_to_string(path).with_context(|| format!("could not read {path}"))?;
    let actives = offset(parse_pattern(&content), shift);

    let game = match Game::new(width, height, actives) {
        Ok(game) => game,
        Err(CreateError::Seed { game, source }) => {
            warn!(%source, "the pattern does not fit, running what was placed");
            *game
        }
        Err(err) => return Err(err).context("could not create the game"),
    };

    let simulation = Sim::spawn(game);
    let handle = simulation.handle();

    let report = handle.step(generations)?;
    if report.repeated {
        info!(generation = report.generation, "stopped early, the pattern repeats");
    }

    let snapshot = handle.snapshot()?;
    let (width, height) = snapshot.grid.dimensions();
    info!(
        "size: {width}x{height}, cells alive: {}, generations: {}",
        snapshot.grid.live_count(),
        snapshot.generation
    );

    handle.shutdown()?;
    simulation.join();
    Ok(())
}
