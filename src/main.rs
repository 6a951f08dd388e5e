mod event;
mod render;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_i18n::t;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use event::{AppEvent, EventHandler};
use wordform::app::App;
use wordform::config::{Config, WrongAnswerPolicy};
use wordform::engine::navigation::total_cases;
use wordform::exercise::{ExerciseDefinition, SettingsOverrides};
use wordform::session::{HintType, Status};
use wordform::store::catalog::{Catalog, load_from_path};

rust_i18n::i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(name = "wordform", version, about = "Greek word-form conjugation drills")]
struct Cli {
    #[arg(short, long, global = true, help = "Interface and hint language (en, el, ru)")]
    locale: Option<String>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "More log output on stderr (-v, -vv, -vvv)")]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List built-in and user exercises
    List,
    /// Drill an exercise, given by id or path to a JSON file
    Run(RunArgs),
    /// Check exercise files without running them
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print a starter exercise as JSON
    Template,
}

#[derive(Args)]
struct RunArgs {
    exercise: String,

    #[arg(long, help = "Accept answers with missing or misplaced tone marks")]
    ignore_tones: bool,

    #[arg(long, help = "Allow skipping cases")]
    allow_skip: bool,

    #[arg(long, help = "Shuffle cases within each block")]
    shuffle: bool,

    #[arg(long, help = "Wait for Enter after a correct answer")]
    no_auto_advance: bool,

    #[arg(long, help = "Auto-advance delay in milliseconds")]
    delay_ms: Option<u64>,

    #[arg(long, value_enum, help = "What a wrong answer requires before moving on")]
    policy: Option<PolicyArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Correction,
    Continue,
}

impl From<PolicyArg> for WrongAnswerPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Correction => WrongAnswerPolicy::Correction,
            PolicyArg::Continue => WrongAnswerPolicy::Continue,
        }
    }
}

impl RunArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            auto_advance: self.no_auto_advance.then_some(false),
            auto_advance_delay_ms: self.delay_ms,
            allow_skip: self.allow_skip.then_some(true),
            shuffle_cases: self.shuffle.then_some(true),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("WORDFORM_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "could not load config, using defaults");
        Config::default()
    });
    if let Some(locale) = cli.locale {
        config.locale = locale;
        config.normalize_locale();
    }
    rust_i18n::set_locale(&config.locale);

    let catalog = Catalog::new(Some(PathBuf::from(&config.exercise_dir)));

    match cli.command {
        Command::List => list(&catalog),
        Command::Run(args) => {
            config.settings = config.settings.merged_with(&args.overrides());
            if args.ignore_tones {
                config.ignore_tones = true;
            }
            if let Some(policy) = args.policy {
                config.wrong_answer_policy = policy.into();
            }
            let exercise = catalog.resolve(&args.exercise)?;
            let mut app = App::new(exercise, config);
            run_session(&mut app)
        }
        Command::Validate { paths } => validate(&paths),
        Command::Template => {
            println!(
                "{}",
                serde_json::to_string_pretty(&ExerciseDefinition::template())?
            );
            Ok(())
        }
    }
}

fn list(catalog: &Catalog) -> Result<()> {
    let exercises = catalog.all()?;
    if exercises.is_empty() {
        println!("{}", t!("list.empty"));
    }
    for exercise in exercises {
        println!(
            "{:<24} {:<13} {} ({})",
            exercise.id,
            exercise.difficulty.as_str(),
            exercise.title,
            t!("list.cases", count = total_cases(&exercise))
        );
    }
    Ok(())
}

fn validate(paths: &[PathBuf]) -> Result<()> {
    let mut failed = 0;
    for path in paths {
        let shown = path.display().to_string();
        match load_from_path(path) {
            Ok(exercise) => println!(
                "{}",
                t!("validate.ok", path = &shown, cases = total_cases(&exercise))
            ),
            Err(err) => {
                failed += 1;
                println!(
                    "{}",
                    t!("validate.failed", path = &shown, error = err.to_string())
                );
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} exercise file(s) failed validation", paths.len());
    }
    Ok(())
}

fn run_session(app: &mut App) -> Result<()> {
    let events = EventHandler::new(Duration::from_millis(100));
    println!("{}", app.state().exercise.title);
    render::help();
    render::case_header(app)?;

    loop {
        match events.next() {
            AppEvent::Tick => {
                if app.tick(Instant::now()) {
                    render::case_header(app)?;
                }
            }
            AppEvent::Line(line) => {
                if !handle_line(app, line.trim())? {
                    break;
                }
            }
            AppEvent::Eof => break,
        }
        if app.state().status == Status::Completed {
            break;
        }
    }

    render::summary(&app.summary());
    Ok(())
}

/// Returns false when the user asked to quit.
fn handle_line(app: &mut App, line: &str) -> Result<bool> {
    let now = Instant::now();
    let before = (
        app.state().current_block_index,
        app.state().current_case_index,
    );

    if let Some(command) = line.strip_prefix(':') {
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("quit" | "q"), _) => return Ok(false),
            (Some("hint" | "h"), kind) => {
                match HintType::from_key(kind.unwrap_or("additional")) {
                    Some(hint_type) => {
                        app.toggle_hint(hint_type);
                        render::hint(app, hint_type)?;
                    }
                    None => render::notice(app, &t!("session.unknown_command", command = line))?,
                }
                return Ok(true);
            }
            (Some("skip" | "s"), _) => {
                if !app.skip() {
                    render::notice(app, &t!("session.skip_disabled"))?;
                    return Ok(true);
                }
            }
            (Some("auto" | "a"), _) => {
                app.toggle_auto_advance(now);
                let message = if app.state().auto_advance_enabled {
                    t!("session.auto_on")
                } else {
                    t!("session.auto_off")
                };
                render::notice(app, &message)?;
                return Ok(true);
            }
            (Some("restart" | "r"), _) => {
                app.restart();
                println!("{}", t!("session.restarted"));
                render::case_header(app)?;
                return Ok(true);
            }
            _ => {
                render::notice(app, &t!("session.unknown_command", command = line))?;
                return Ok(true);
            }
        }
    } else if line.is_empty() && app.state().status == Status::WaitingInput {
        render::case_header(app)?;
        return Ok(true);
    } else if line.is_empty() && app.state().status == Status::WrongAnswer {
        if !app.proceed() {
            render::feedback(app, now)?;
            return Ok(true);
        }
    } else {
        app.submit(line, now);
    }

    let after = (
        app.state().current_block_index,
        app.state().current_case_index,
    );
    match app.state().status {
        Status::Completed => {}
        Status::WaitingInput if after != before => render::case_header(app)?,
        _ => render::feedback(app, now)?,
    }
    Ok(true)
}
