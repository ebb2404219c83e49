//! # Keypad CLI Application
//!
//! Line-oriented terminal driver for the keypad_core engine. Each line is a
//! whitespace-separated sequence of keypad tokens (`12 + 3 =`, `C`, `<-`).
//!
//! Extra commands: `history`, `state`, `help`, `quit`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keypad_core::validation::check_token;
use keypad_core::{CalcError, CalcResult, EngineSettings, InputEvent, InputStateMachine};

#[derive(Parser, Debug)]
#[command(name = "keypad", about = "Four-function keypad calculator")]
struct Args {
    /// Engine settings file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the engine state as JSON after each line.
    #[arg(long)]
    json: bool,

    /// Evaluate one token sequence and exit instead of reading stdin.
    #[arg(long, value_name = "TOKENS")]
    eval: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => match EngineSettings::load(path) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "using settings file");
                settings
            }
            Err(e) => {
                tracing::error!(path = %path.display(), code = e.error_code(), "failed to load settings");
                print_error(&e);
                return ExitCode::FAILURE;
            }
        },
        None => EngineSettings::default(),
    };
    let mut calc = match InputStateMachine::with_settings(settings) {
        Ok(calc) => calc,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(tokens) = &args.eval {
        return match run_line(&mut calc, tokens) {
            Ok(()) => {
                print_state(&calc, args.json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                print_error(&e);
                ExitCode::FAILURE
            }
        };
    }

    println!("Keypad - four-function calculator");
    println!("Type tokens separated by spaces, or 'help'.");
    println!();

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => print_help(),
            "history" => print_history(&calc),
            "state" => print_json(&calc),
            tokens => match run_line(&mut calc, tokens) {
                Ok(()) => print_state(&calc, args.json),
                Err(e) => print_error(&e),
            },
        }
    }

    ExitCode::SUCCESS
}

/// A line with an unparseable or invalid number token is rejected before
/// any input is applied.
fn run_line(calc: &mut InputStateMachine, line: &str) -> CalcResult<()> {
    let events = InputEvent::parse_sequence(line).and_then(|events| {
        let max_len = calc.settings().max_input_length;
        for event in &events {
            if let InputEvent::Number(token) = event {
                check_token(token, max_len)?;
            }
        }
        Ok(events)
    });
    let events = match events {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(line, code = e.error_code(), "rejected input line");
            return Err(e);
        }
    };

    for event in events {
        if let Some(outcome) = calc.apply(event)? {
            if let Some(message) = outcome.error_message() {
                println!("  ! {}", message);
            }
        }
    }
    Ok(())
}

fn print_state(calc: &InputStateMachine, json: bool) {
    println!("  {}", calc.equation_trace());
    println!("  = {}", calc.display());
    if json {
        print_json(calc);
    }
}

fn print_json(calc: &InputStateMachine) {
    if let Ok(json) = serde_json::to_string_pretty(&calc.snapshot()) {
        println!("{}", json);
    }
}

fn print_history(calc: &InputStateMachine) {
    if calc.history().is_empty() {
        println!("  (no history)");
        return;
    }
    for entry in calc.history().entries() {
        println!("  {}  {}", entry.timestamp.format("%H:%M:%S"), entry.equation);
    }
}

fn print_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string(e) {
        eprintln!("{}", json);
    }
}

fn print_help() {
    println!("  digits     0-9, or whole numbers like 3.14");
    println!("  .          decimal point");
    println!("  + - * /    operators");
    println!("  =          finalize");
    println!("  C / CE     clear all / clear entry");
    println!("  <-         backspace");
    println!("  history    list finalized calculations");
    println!("  state      print engine state as JSON");
    println!("  quit       exit");
}
