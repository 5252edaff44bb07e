use carebot::config_test::validate_config;
use carebot::response::{RandomSource, SeededRandom, ThreadRandom};
use carebot::{Config, ConversationTurn, Engine};
use clap::{Arg, Command};
use log::LevelFilter;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::process;

const MAX_MESSAGE_LENGTH: usize = 1000;
const CONTEXT_TURNS: usize = 10;

fn main() {
    let matches = Command::new("carebot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Supportive chat engine: message analysis, crisis detection and response selection")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Catalog configuration file (built-in catalogs when omitted)"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the built-in catalogs to a configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("message")
                .short('m')
                .long("message")
                .value_name("TEXT")
                .help("Answer one message and print the chat turn as JSON")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("analyze")
                .long("analyze")
                .value_name("TEXT")
                .help("Print the analysis of one message as JSON")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Read messages from stdin, one per line")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed for reproducible response selection")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Print engine statistics as JSON before exiting")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("health-check")
                .long("health-check")
                .help("Run the engine self-check and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches.get_one::<String>("config").map(String::as_str);
    let config = match Config::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("🔍 Testing configuration...");
        println!();
        let results = validate_config(&config);
        results.print_summary();
        if !results.valid {
            process::exit(1);
        }
        return;
    }

    let engine = match Engine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error building engine: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("health-check") {
        let status = engine.health_check();
        print_json(&status);
        if !status.healthy {
            process::exit(1);
        }
        return;
    }

    let seed = matches.get_one::<u64>("seed").copied().or(config.random_seed);
    let mut rng: Box<dyn RandomSource> = match seed {
        Some(seed) => {
            log::info!("Using seeded response selection (seed {seed})");
            Box::new(SeededRandom::new(seed))
        }
        None => Box::new(ThreadRandom),
    };

    if let Some(text) = matches.get_one::<String>("analyze") {
        let text = validated_or_exit(text);
        print_json(engine.analyze(text).value());
    } else if let Some(text) = matches.get_one::<String>("message") {
        let text = validated_or_exit(text);
        print_json(&engine.respond(text, &[], rng.as_mut()));
    } else if matches.get_flag("interactive") {
        if let Err(e) = run_interactive(&engine, rng.as_mut()) {
            eprintln!("Error reading input: {e}");
            process::exit(1);
        }
    } else if !matches.get_flag("stats") {
        eprintln!("Nothing to do. Use --message, --analyze or --interactive (see --help)");
        process::exit(2);
    }

    if matches.get_flag("stats") {
        print_json(&engine.statistics().snapshot());
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Edit the lexicon, crisis patterns and templates to suit your deployment.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}

/// Input rules applied before a message reaches the engine.
fn validate_message(text: &str) -> Result<&str, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("message is empty".to_string());
    }
    let length = trimmed.chars().count();
    if length > MAX_MESSAGE_LENGTH {
        return Err(format!(
            "message is {length} characters, the limit is {MAX_MESSAGE_LENGTH}"
        ));
    }
    Ok(trimmed)
}

fn validated_or_exit(text: &str) -> &str {
    match validate_message(text) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Invalid message: {e}");
            process::exit(2);
        }
    }
}

fn run_interactive(engine: &Engine, rng: &mut dyn RandomSource) -> io::Result<()> {
    let stdin = io::stdin();
    let mut history: Vec<ConversationTurn> = Vec::new();

    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match validate_message(&line) {
            Ok(text) => {
                let start = history.len().saturating_sub(CONTEXT_TURNS);
                let turn = engine.respond(text, &history[start..], rng);
                println!("{}", turn.response.content);
                if turn.response.is_crisis_response {
                    log::warn!("Crisis response sent");
                }
                for reason in &turn.degraded {
                    log::warn!("Degraded turn: {reason}");
                }
                history.push(ConversationTurn::user(text));
                history.push(ConversationTurn::bot(&turn.response.content));
            }
            Err(e) => eprintln!("Invalid message: {e}"),
        }
        print!("> ");
        io::stdout().flush()?;
    }
    println!();
    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            process::exit(1);
        }
    }
}
