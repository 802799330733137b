use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use chrono::Duration;
use quiz_core::Clock;
use quiz_core::locale::{Catalog, LocaleKey};
use quiz_core::model::HelpKind;
use services::sessions::{
    AdvanceOutcome, DEFAULT_REVEAL_DELAY_MS, QuestionView, QuizSession, RevealDriver,
    SelectOutcome, SessionSettings, render_report,
};
use services::load_question_set;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const ANSWER_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { flag: &'static str, raw: String },
    MissingQuizFile,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { flag, raw } => {
                write!(f, "invalid {flag} value: {raw}")
            }
            ArgsError::MissingQuizFile => write!(f, "--quiz <file> is required"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_count(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<u32, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.parse()
        .map_err(|_| ArgsError::InvalidCount { flag, raw })
}

struct Args {
    quiz_path: String,
    locale_path: Option<String>,
    half: u32,
    hint: u32,
    double: u32,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut quiz_path = std::env::var("QUIZ_FILE").ok();
        let mut locale_path = std::env::var("QUIZ_LOCALE").ok();
        let mut half = 1;
        let mut hint = 1;
        let mut double = 1;
        let mut seed = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--quiz" => quiz_path = Some(require_value(args, "--quiz")?),
                "--locale" => locale_path = Some(require_value(args, "--locale")?),
                "--half" => half = parse_count(args, "--half")?,
                "--hint" => hint = parse_count(args, "--hint")?,
                "--double" => double = parse_count(args, "--double")?,
                "--seed" => {
                    let raw = require_value(args, "--seed")?;
                    let parsed = raw
                        .parse()
                        .map_err(|_| ArgsError::InvalidCount { flag: "--seed", raw })?;
                    seed = Some(parsed);
                }
                other => return Err(ArgsError::UnknownArg(other.to_owned())),
            }
        }

        Ok(Self {
            quiz_path: quiz_path.ok_or(ArgsError::MissingQuizFile)?,
            locale_path,
            half,
            hint,
            double,
            seed,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- --quiz <file.json> [--locale <file.ini>]");
    eprintln!("                      [--half <n>] [--hint <n>] [--double <n>] [--seed <n>]");
    eprintln!();
    eprintln!("Defaults: one use of each help aid.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_FILE, QUIZ_LOCALE");
}

fn print_question(view: &QuestionView, catalog: &Catalog) {
    println!();
    println!(
        "Question {}/{}: {}",
        view.index + 1,
        view.progress.total,
        view.text
    );
    if let Some(image) = &view.image {
        println!("  [image: {image}]");
    }
    for (position, answer) in view.answers.iter().enumerate() {
        if answer.hidden {
            continue;
        }
        let marker = if answer.selected { "*" } else { " " };
        println!("  {}{}) {}", marker, ANSWER_LETTERS[position], answer.text);
    }
    if let Some(hint) = &view.hint {
        println!("  {}: {hint}", catalog.get(LocaleKey::HintCaption));
    }
    println!(
        "  [1] {} x{}  [2] {} x{}  [3] {} x{}{}",
        catalog.get(LocaleKey::HelpHalf),
        view.counters.get(HelpKind::Half),
        catalog.get(LocaleKey::HelpHint),
        view.counters.get(HelpKind::Hint),
        catalog.get(LocaleKey::HelpDouble),
        view.counters.get(HelpKind::Double),
        if view.double_active { "  (double chance active)" } else { "" },
    );
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    print!("> ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(&args.quiz_path)?;
    let questions = load_question_set(&raw)?;

    let catalog = match &args.locale_path {
        Some(path) => Catalog::from_ini(&fs::read_to_string(path)?),
        None => Catalog::default(),
    };

    let settings = SessionSettings::new(
        args.half,
        args.hint,
        args.double,
        Duration::milliseconds(DEFAULT_REVEAL_DELAY_MS),
    )?;
    let driver = RevealDriver::new(Clock::default_clock());
    let mut session = QuizSession::new(questions, settings, driver.clock().now());
    if let Some(seed) = args.seed {
        session = session.with_rng_seed(seed);
    }
    debug!(questions = session.total_questions(), "session started");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    while let Some(view) = QuestionView::from_session(&session) {
        print_question(&view, &catalog);

        let Some(line) = read_line(&mut input)? else {
            println!("(input closed, leaving the quiz)");
            return Ok(());
        };

        let help = match line.as_str() {
            "1" => Some(HelpKind::Half),
            "2" => Some(HelpKind::Hint),
            "3" => Some(HelpKind::Double),
            _ => None,
        };
        if let Some(kind) = help {
            if let Err(reason) = session.use_help(kind) {
                println!("({reason})");
            }
            continue;
        }
        if line == "q" {
            return Ok(());
        }

        let Some(position) = line
            .chars()
            .next()
            .and_then(|letter| ANSWER_LETTERS.iter().position(|c| *c == letter))
        else {
            println!("(pick a-d, 1-3 for a help aid, or q to quit)");
            continue;
        };
        let Some(choice) = view.answers.get(position) else {
            continue;
        };

        match driver.select_answer(&mut session, choice.id)? {
            SelectOutcome::Ignored | SelectOutcome::Pending { .. } => continue,
            SelectOutcome::Locked { .. } => {}
        }

        println!("...");
        let record = driver.run_reveal(&mut session).await?;
        let verdict = if record.is_correct {
            catalog.get(LocaleKey::AnswerCorrect)
        } else {
            catalog.get(LocaleKey::AnswerIncorrect)
        };
        println!("{verdict}!");
        if let Some(question) = session.current_question() {
            if !record.is_correct {
                println!("The correct answer was: {}", question.correct_answer());
            }
            if let Some(trivia) = question.trivia() {
                println!("{}: {trivia}", catalog.get(LocaleKey::TriviaCaption));
            }
        }

        if driver.advance(&mut session)? == AdvanceOutcome::Finished {
            break;
        }
    }

    if let Some(summary) = session.summary() {
        println!();
        print!("{}", render_report(&summary, &catalog));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let args = match Args::parse(&mut args) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
