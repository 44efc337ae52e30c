use chrono::{DateTime, Duration, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Instant;
use trainlog_core::*;

#[derive(Parser)]
#[command(name = "trainlog")]
#[command(about = "Workout set logger for a single training session", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the pause (ms) after typing before suggestions appear
    #[arg(long)]
    quiet_ms: Option<u64>,

    /// Write the default configuration file and exit
    #[arg(long)]
    init_config: bool,
}

/// One line typed into the session shell
#[derive(Parser)]
#[command(name = "session", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Type the exercise name (no argument clears it).
    ///
    /// Suggestions show once typing pauses, but the shell only notices at
    /// the next input line or `wait`.
    Exercise {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Set the weight in kg; '+' or '-' steps it
    Weight {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Set the reps; '+' or '-' steps them
    Reps {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Set the start time: now, HH:MM[:SS], RFC 3339, or +<secs>s
    Start { when: String },

    /// Set the end time: now, HH:MM[:SS], RFC 3339, or +<secs>s after start
    End { when: String },

    /// Show exercise suggestions for the current text
    Suggest,

    /// Pick an exercise name
    Select {
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },

    /// Show the draft
    Draft,

    /// Save the draft as a set and start a new one
    Save,

    /// Discard the draft
    Reset,

    /// List the recorded sets, newest first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete sets by position (as shown by 'list')
    Delete {
        #[arg(required = true)]
        positions: Vec<usize>,
    },

    /// Delete every set
    Clear,

    /// Manage favorite exercises
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },

    /// Show recently used exercises
    Recents,

    /// Pause for a number of milliseconds
    Wait { ms: u64 },

    /// Leave the session (all sets are discarded)
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
enum FavAction {
    /// Add a favorite
    Add {
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },

    /// Remove the favorite at a position
    Rm { index: usize },

    /// List favorites
    List,
}

enum Flow {
    Continue,
    Quit,
}

fn main() -> Result<()> {
    trainlog_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    if cli.init_config {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(Config::default_config_path);
        Config::default().save_to(&config_path)?;
        println!("✓ Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) if path.exists() => Config::load_from(path)?,
        Some(path) => {
            tracing::info!("No config file at {:?}, using defaults", path);
            Config::default()
        }
        None => Config::load()?,
    };
    if let Some(ms) = cli.quiet_ms {
        config.suggestions.quiet_period_ms = ms;
    }

    let mut session = TrainingSession::new(&config, Utc::now());

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if interactive {
        writeln!(out, "trainlog: type 'help' for commands, 'quit' to leave")?;
    }

    run_shell(&mut session, stdin.lock(), &mut out, interactive)
}

fn run_shell<R: BufRead, W: Write>(
    session: &mut TrainingSession,
    input: R,
    out: &mut W,
    interactive: bool,
) -> Result<()> {
    let mut lines = input.lines();

    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        if session.tick(Instant::now()) {
            print_suggestions(session, out)?;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() || words[0].starts_with('#') {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // help output and usage errors alike
                write!(out, "{}", e.render())?;
                continue;
            }
        };

        match dispatch(session, parsed.command, out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::warn!("Command failed: {}", e);
                writeln!(out, "error: {}", e)?;
            }
        }
    }

    if !session.store().is_empty() {
        tracing::info!(
            "Session ended with {} set(s) discarded",
            session.store().len()
        );
    }
    Ok(())
}

fn dispatch<W: Write>(
    session: &mut TrainingSession,
    command: ShellCommand,
    out: &mut W,
) -> Result<Flow> {
    match command {
        ShellCommand::Exercise { text } => {
            session.type_exercise(&text.join(" "), Instant::now());
        }

        ShellCommand::Weight { value } => {
            let form = session.form_mut();
            match value.as_str() {
                "+" => form.increment_weight(),
                "-" => form.decrement_weight(),
                text => form.enter_weight_text(text),
            }
            let form = session.form();
            writeln!(
                out,
                "weight: {} kg{}",
                form.weight(),
                bound_marker(form.weight_input(), form.weight())
            )?;
        }

        ShellCommand::Reps { value } => {
            let form = session.form_mut();
            match value.as_str() {
                "+" => form.increment_reps(),
                "-" => form.decrement_reps(),
                text => form.enter_reps_text(text),
            }
            let form = session.form();
            writeln!(
                out,
                "reps: {}{}",
                form.reps(),
                bound_marker(form.reps_input(), form.reps())
            )?;
        }

        ShellCommand::Start { when } => {
            let base = session.form().start_time();
            let start = parse_time(&when, base, Utc::now())?;
            session.form_mut().set_start_time(start);
        }

        ShellCommand::End { when } => {
            let base = session.form().start_time();
            let end = parse_time(&when, base, Utc::now())?;
            session.form_mut().set_end_time(end);
            if session.form().end_time() != end {
                writeln!(out, "end time moved up to the start time")?;
            }
        }

        ShellCommand::Suggest => {
            session.form_mut().show_suggestions();
            print_suggestions(session, out)?;
        }

        ShellCommand::Select { name } => {
            session.select_exercise(&name.join(" "));
            writeln!(out, "exercise: {}", session.form().exercise())?;
        }

        ShellCommand::Draft => print_draft(session.form(), out)?,

        ShellCommand::Save => match session.save_and_reset(Utc::now()) {
            Some(set) => writeln!(out, "✓ Set saved: {}", describe_set(set))?,
            None => writeln!(
                out,
                "Draft incomplete: an exercise and at least one rep are required"
            )?,
        },

        ShellCommand::Reset => {
            session.reset_draft(Utc::now());
            writeln!(out, "draft cleared")?;
        }

        ShellCommand::List { json } => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(session.store().sets())?)?;
            } else {
                print_sets(session.store(), out)?;
            }
        }

        ShellCommand::Delete { positions } => {
            let removed = session.delete_sets(positions)?;
            writeln!(out, "✓ Deleted {} set(s)", removed.len())?;
        }

        ShellCommand::Clear => {
            session.clear_sets();
            writeln!(out, "✓ Session cleared")?;
        }

        ShellCommand::Fav { action } => match action {
            FavAction::Add { name } => {
                let name = name.join(" ");
                if session.add_favorite(&name) {
                    writeln!(out, "✓ Added favorite: {}", name)?;
                } else {
                    writeln!(out, "Already a favorite: {}", name)?;
                }
            }
            FavAction::Rm { index } => {
                let removed = session.remove_favorite(index)?;
                writeln!(out, "✓ Removed favorite: {}", removed)?;
            }
            FavAction::List => {
                print_numbered(session.catalog().favorites(), "No favorites", out)?;
            }
        },

        ShellCommand::Recents => {
            print_numbered(session.catalog().recents(), "No recent exercises", out)?;
        }

        ShellCommand::Wait { ms } => {
            std::thread::sleep(std::time::Duration::from_millis(ms));
            if session.tick(Instant::now()) {
                print_suggestions(session, out)?;
            }
        }

        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

/// Interpret a time argument.
///
/// `+<secs>` (optionally suffixed `s`) is relative to `base`; a bare
/// `HH:MM[:SS]` is taken as today (UTC).
fn parse_time(input: &str, base: DateTime<Utc>, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if input.eq_ignore_ascii_case("now") {
        return Ok(now);
    }

    if let Some(offset) = input.strip_prefix('+') {
        let secs: i64 = offset
            .trim_end_matches('s')
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid offset: {}", input)))?;
        return Duration::try_seconds(secs)
            .and_then(|offset| base.checked_add_signed(offset))
            .ok_or_else(|| Error::Parse(format!("Offset out of range: {}", input)));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let time = NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|_| Error::Parse(format!("Invalid time: {}", input)))?;

    Ok(now.date_naive().and_time(time).and_utc())
}

/// Suffix shown when a stepped value sits on its limit
fn bound_marker(input: &NumericInput, value: f64) -> &'static str {
    if input.is_at_max(value) {
        " (max)"
    } else if input.is_at_min(value) {
        " (min)"
    } else {
        ""
    }
}

fn describe_set(set: &TrainingSet) -> String {
    format!(
        "{}  {} kg x {}  {}  ({}-{})",
        set.exercise,
        set.weight,
        set.reps,
        set.formatted_duration(),
        set.start_time.format("%H:%M:%S"),
        set.end_time.format("%H:%M:%S"),
    )
}

fn print_sets<W: Write>(store: &SessionStore, out: &mut W) -> Result<()> {
    if store.is_empty() {
        writeln!(out, "No sets yet")?;
        return Ok(());
    }

    for (i, set) in store.sets().iter().enumerate() {
        writeln!(out, "{:>3}. {}", i, describe_set(set))?;
    }
    writeln!(
        out,
        "{} set(s), {} reps, {} kg total volume",
        store.len(),
        store.total_reps(),
        store.total_volume()
    )?;
    Ok(())
}

fn print_draft<W: Write>(form: &EntryForm, out: &mut W) -> Result<()> {
    writeln!(out, "exercise: {}", form.exercise())?;
    writeln!(out, "weight:   {} kg", form.weight())?;
    writeln!(out, "reps:     {}", form.reps())?;
    writeln!(
        out,
        "time:     {} - {} ({})",
        form.start_time().format("%H:%M:%S"),
        form.end_time().format("%H:%M:%S"),
        format_duration(form.duration())
    )?;
    writeln!(out, "can save: {}", if form.can_save() { "yes" } else { "no" })?;
    Ok(())
}

fn print_suggestions<W: Write>(session: &TrainingSession, out: &mut W) -> Result<()> {
    let suggestions = session.filtered_suggestions();
    if suggestions.is_empty() {
        writeln!(out, "No matching exercises")?;
    } else {
        writeln!(out, "suggestions: {}", suggestions.join(", "))?;
    }
    Ok(())
}

fn print_numbered<W: Write>(names: &[String], empty: &str, out: &mut W) -> Result<()> {
    if names.is_empty() {
        writeln!(out, "{}", empty)?;
    }
    for (i, name) in names.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i, name)?;
    }
    Ok(())
}
