use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;

use claimlens::client::{
    ApiClient, CheckResponse, JobPoller, PollOutcome, SubmitOutcome, Submission,
};
use claimlens::config::Config;
use claimlens::prefs::{JsonFileStore, Preferences};
use claimlens::render;
use claimlens::report;

const USAGE: &str = "\
usage:
  claimlens file <PATH> [--export <OUT.html>]
  claimlens url <INSTAGRAM_URL> [--export <OUT.html>]
  claimlens text <TEXT> [--export <OUT.html>]
  claimlens prefs show
  claimlens prefs set-lang <CODE> | clear-lang
  claimlens prefs web-search on|off
  claimlens prefs set-key <KEY> | clear-key
";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let store = JsonFileStore::new(config.prefs_path());

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print!("{USAGE}");
        bail!("missing command");
    };

    match command.as_str() {
        "file" | "url" | "text" => {
            let Some(value) = args.get(1) else {
                print!("{USAGE}");
                bail!("missing argument for '{command}'");
            };
            let submission = match command.as_str() {
                "file" => Submission::MediaFile {
                    path: PathBuf::from(value),
                },
                "url" => Submission::InstagramUrl(value.clone()),
                _ => Submission::Text(value.clone()),
            };
            let export = export_path(&args[2..])?;
            run_submission(submission, &config, &store, export).await
        }
        "prefs" => run_prefs(&args[1..], &store),
        _ => {
            print!("{USAGE}");
            bail!("unknown command '{command}'");
        }
    }
}

fn export_path(rest: &[String]) -> Result<Option<PathBuf>> {
    match rest {
        [] => Ok(None),
        [flag, path] if flag == "--export" => Ok(Some(PathBuf::from(path))),
        _ => bail!("unexpected arguments: {}", rest.join(" ")),
    }
}

async fn run_submission(
    submission: Submission,
    config: &Config,
    store: &JsonFileStore,
    export: Option<PathBuf>,
) -> Result<()> {
    let prefs = Preferences::load(store)?;
    let client = ApiClient::new(config)?;

    let response = match client.submit(&submission, &prefs).await? {
        SubmitOutcome::Complete(response) => *response,
        SubmitOutcome::Accepted(ack) => {
            println!("Processing... (job {})", ack.job_id);
            let mut poller = JobPoller::new(
                client.clone(),
                Duration::from_secs(config.poll_interval_secs()),
            );
            match poller.start(ack.job_id).wait().await {
                PollOutcome::Completed(response) => *response,
                PollOutcome::Failed(detail) => bail!("processing failed: {detail}"),
                PollOutcome::Cancelled => bail!("processing was cancelled"),
            }
        }
    };

    print_response(&response, export)
}

fn print_response(response: &CheckResponse, export: Option<PathBuf>) -> Result<()> {
    let Some(fact_report) = report::extract(response.fact_check_markup()) else {
        println!("No fact check data available");
        return Ok(());
    };

    println!("{}", render::clipboard_text(&fact_report));
    if !fact_report.findings.is_empty() {
        println!("\n{}", render::assessment_lines(&fact_report));
    }

    if !response.web_search_results.is_empty() {
        println!("\nWeb searches run: {}", response.web_search_results.len());
    }
    if let Some(transcription) = &response.transcription {
        println!("\nTranscription:\n{transcription}");
    }

    if let Some(path) = export {
        let html = render::printable_html(&fact_report, &response.web_search_results, Utc::now());
        std::fs::write(&path, html)
            .with_context(|| format!("writing export to {}", path.display()))?;
        println!("\nExported printable report to {}", path.display());
    }

    Ok(())
}

fn run_prefs(rest: &[String], store: &JsonFileStore) -> Result<()> {
    let mut prefs = Preferences::load(store)?;

    match rest {
        [cmd] if cmd == "show" => {
            println!(
                "response language: {}",
                prefs.response_language.as_deref().unwrap_or("(auto)")
            );
            println!("web search: {}", if prefs.web_search { "on" } else { "off" });
            println!(
                "api key: {}",
                if prefs.api_key.is_some() { "set" } else { "(none)" }
            );
            return Ok(());
        }
        [cmd, code] if cmd == "set-lang" => prefs.response_language = Some(code.clone()),
        [cmd] if cmd == "clear-lang" => prefs.response_language = None,
        [cmd, value] if cmd == "web-search" => prefs.web_search = value == "on",
        [cmd, key] if cmd == "set-key" => prefs.set_api_key(Some(key.clone()))?,
        [cmd] if cmd == "clear-key" => prefs.api_key = None,
        _ => {
            print!("{USAGE}");
            bail!("unknown prefs command");
        }
    }

    prefs.save(store)?;
    println!("saved");
    Ok(())
}
