// Student portal core - command-line entry point
// Runs the chat analyzer or the grade calculator over one input and prints JSON.

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use std::io::{BufRead, Read, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use portal_core::brain::{compose_system_prompt, BrainAnalyzer, CourseCatalog};
use portal_core::config::AppConfig;
use portal_core::grading::{AcademicRecord, GradeReport};
use portal_core::rate_limiter::RateLimiter;
use portal_core::telemetry;

const USAGE: &str = "usage:
  portal-core chat <message...>      analyze a chat message and print the prompt context
  portal-core chat -                 analyze one message per stdin line, rate limited
  portal-core grades <record.json|-> compute SGPA/CGPA/percentage for a record
  portal-core new-record             print an empty session-start record";

/// Client id the stdin session is throttled under.
const SESSION_CLIENT_ID: &str = "cli";

fn load_brain(config: &AppConfig) -> Result<BrainAnalyzer> {
    let catalog = CourseCatalog::load(config.catalog_path.as_deref())
        .context("Failed to load course catalog")?;
    Ok(BrainAnalyzer::new(Arc::new(catalog)))
}

fn chat_reply(config: &AppConfig, brain: &BrainAnalyzer, message: &str) -> Value {
    let packet = brain.analyze(message);
    info!(summary = %packet.summary(), "Chat message analyzed");

    let system_prompt = compose_system_prompt(&config.system_prompt, &packet);
    json!({
        "packet": packet,
        "systemPrompt": system_prompt,
    })
}

fn run_chat(config: &AppConfig, message: &str) -> Result<()> {
    let brain = load_brain(config)?;
    let output = chat_reply(config, &brain, message);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// One JSON line per non-empty input line. Lines over the configured rate get an
/// error line instead of a reply; the session keeps going.
fn run_chat_session<R: BufRead, W: Write>(
    config: &AppConfig,
    brain: &BrainAnalyzer,
    input: R,
    mut output: W,
) -> Result<()> {
    let mut limiter = RateLimiter::new(config.chat_rate_limit, config.chat_rate_window());

    for line in input.lines() {
        let line = line.context("Failed to read chat message")?;
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        let reply = match limiter.check(SESSION_CLIENT_ID).into_result() {
            Ok(_) => chat_reply(config, brain, message),
            Err(e) => {
                warn!(client = SESSION_CLIENT_ID, "Chat message rejected: {}", e);
                json!({ "message": message, "error": e.to_string() })
            }
        };
        writeln!(output, "{}", serde_json::to_string(&reply)?)?;
    }
    Ok(())
}

fn read_record(source: &str) -> Result<AcademicRecord> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read record from stdin")?;
        buf
    } else {
        std::fs::read_to_string(Path::new(source))
            .with_context(|| format!("Failed to read record file {}", source))?
    };

    let record: AcademicRecord = serde_json::from_str(&raw).context("Invalid record JSON")?;
    record.check_limits()?;
    Ok(record)
}

fn run_grades(config: &AppConfig, source: &str) -> Result<()> {
    let record = read_record(source)?;
    let report = GradeReport::build(&record, config.grade_settings());
    info!(summary = %report.summary(), "Grade report computed");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init("portal-core", config.log_format, &config.log_level)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.split_first() {
        Some((cmd, [dash])) if cmd == "chat" && dash == "-" => {
            let brain = load_brain(&config)?;
            let stdin = std::io::stdin();
            run_chat_session(&config, &brain, stdin.lock(), std::io::stdout().lock())
        }
        Some((cmd, rest)) if cmd == "chat" && !rest.is_empty() => run_chat(&config, &rest.join(" ")),
        Some((cmd, [source])) if cmd == "grades" => run_grades(&config, source),
        Some((cmd, [])) if cmd == "new-record" => {
            println!("{}", serde_json::to_string_pretty(&AcademicRecord::new())?);
            Ok(())
        }
        _ => bail!("{}", USAGE),
    }
}

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
