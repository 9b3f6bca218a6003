use anyhow::Context;
use clap::Parser;
use shipdle::render::{render_compact, render_table, TableOptions};
use shipdle::{
    history::CANONICAL_FILE, CanonicalHistory, Catalog, Completer, DailyHistory, Day, Game, Guess,
    Player, Reconciler, Rejection,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Guess today's ship from its attributes.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory holding ships.json, canonical.json and the event tables.
    #[clap(long, env = "SHIPDLE_DATA", default_value = "data")]
    data_dir: PathBuf,

    /// Where the days you have played are recorded.
    #[clap(long, env = "SHIPDLE_HISTORY", default_value = "history.json")]
    history: PathBuf,

    /// The first day that has an answer.
    #[clap(long, default_value_t = shipdle::daily::EPOCH_DAY.0)]
    epoch_day: i64,

    /// Hours added to UTC to find when a new day starts.
    #[clap(long, default_value_t = shipdle::daily::UTC_OFFSET_HOURS, allow_hyphen_values = true)]
    utc_offset_hours: i64,

    /// Play the game for this day instead of today.
    #[clap(long)]
    day: Option<i64>,

    /// Don't color the table.
    #[clap(long)]
    plain: bool,

    /// Print one line per guess instead of the full table.
    #[clap(long)]
    compact: bool,

    /// Log more.
    #[clap(short, long)]
    verbose: bool,

    /// Only log errors.
    #[clap(short, long)]
    quiet: bool,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("shipdle error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet, args.verbose)?;

    let catalog = Catalog::load(&args.data_dir).context("failed to load the ship catalog")?;
    let canonical = CanonicalHistory::load(&args.data_dir.join(CANONICAL_FILE), &catalog)
        .context("failed to load the canonical history")?;
    let mut history = DailyHistory::load(&args.history).context("failed to load your history")?;

    let now = chrono::Utc::now().timestamp();
    let today = args
        .day
        .map(Day)
        .unwrap_or_else(|| Day::from_timestamp(now, args.utc_offset_hours));

    let reconciler = Reconciler::new(&catalog, &canonical, Day(args.epoch_day));
    let discrepancies = reconciler.reconcile(&mut history, today);
    if !discrepancies.is_empty() {
        println!(
            "{} discrepancies found between your history and the true history, updating history to reflect true history!",
            discrepancies.len()
        );
    }
    let assignment = reconciler.assign_through(&mut history, today);
    history
        .save(&args.history)
        .context("failed to save your history")?;

    if assignment.existing {
        println!("You already played today.");
        let left = Day::until_next(now, args.utc_offset_hours).as_secs();
        println!(
            "Next game available in {:02}h{:02}m{:02}s",
            left / 3600,
            left / 60 % 60,
            left % 60
        );
    }

    let solution = catalog
        .find_by_name(&assignment.ship)
        .with_context(|| format!("today's ship '{}' is not in the catalog", assignment.ship))?;

    let player = Terminal::new(&catalog, &args);
    match Game::new(&catalog).play(solution, player) {
        Some(guesses) => {
            println!("YOU WIN!");
            println!("It took you {} guesses.", guesses);
            history
                .save(&args.history)
                .context("failed to save your history")?;
        }
        None => println!("Ending Game."),
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SHIPDLE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Reads guesses from stdin and prints the table after each one.
struct Terminal {
    lines: io::Lines<io::StdinLock<'static>>,
    completer: Completer,
    options: TableOptions,
    compact: bool,
    shown: usize,
}

/// How many names to offer when a guess isn't recognised.
const SUGGESTIONS: usize = 8;

impl Terminal {
    fn new(catalog: &Catalog, args: &Args) -> Self {
        Self {
            lines: io::stdin().lock().lines(),
            completer: Completer::new(catalog.names()),
            options: TableOptions { color: !args.plain },
            compact: args.compact,
            shown: 0,
        }
    }

    fn show(&mut self, history: &[Guess<'_>]) {
        if history.len() == self.shown {
            return;
        }
        for guess in &history[self.shown..] {
            self.completer.remove(&guess.ship.name);
        }
        if self.compact {
            for guess in &history[self.shown..] {
                println!("{}: {}", guess.ship.name, render_compact(guess));
            }
        } else {
            println!("{}", render_table(history, self.options));
        }
        self.shown = history.len();
    }

    fn suggest(&self, input: &str) {
        let options = self.completer.complete(input);
        if options.is_empty() {
            return;
        }
        let more = options.len().saturating_sub(SUGGESTIONS);
        let shown = options
            .into_iter()
            .take(SUGGESTIONS)
            .collect::<Vec<_>>()
            .join(", ");
        if more > 0 {
            println!("Did you mean: {} (and {} more)", shown, more);
        } else {
            println!("Did you mean: {}", shown);
        }
    }
}

impl Player for Terminal {
    fn guess(&mut self, history: &[Guess<'_>]) -> String {
        self.show(history);
        loop {
            print!("Guess: ");
            let _ = io::stdout().flush();
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                // Out of input, or stdin is broken: there's nobody left to guess.
                Some(Err(_)) | None => return shipdle::session::ABORT.to_string(),
            };
            // A trailing '?' asks for suggestions instead of guessing.
            if let Some(partial) = line.trim_end().strip_suffix('?') {
                self.suggest(partial);
                continue;
            }
            return line;
        }
    }

    fn rejected(&mut self, input: &str, why: Rejection) {
        match why {
            Rejection::NotFound => {
                println!("Ship not found: {}", input.trim());
                self.suggest(input);
            }
            Rejection::AlreadyGuessed => println!("You already guessed {}.", input.trim()),
        }
    }

    fn finish(&mut self, history: &[Guess<'_>]) {
        self.show(history);
    }
}
