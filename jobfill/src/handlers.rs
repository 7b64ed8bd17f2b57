use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use jobfill_core::{
    FillReport, FillSession, PlatformId, ReportFormat, ResumeData, detect_platform, rules_for,
};
use jobfill_driver::{PageDriver, StaticBackend, WebDriverBackend};

/// Read and parse a resume JSON file, expanding a leading tilde.
pub fn load_resume_data(path: &str) -> Result<ResumeData, String> {
    let expanded = shellexpand::tilde(path);
    let path = Path::new(expanded.as_ref());
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read resume {}: {}", path.display(), e))?;
    ResumeData::from_json(&raw)
        .map_err(|e| format!("Failed to parse resume {}: {}", path.display(), e))
}

fn progress_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message);
    spinner
}

async fn build_driver(sub_matches: &ArgMatches, url: &Url) -> Result<Box<dyn PageDriver>, String> {
    let backend = sub_matches
        .get_one::<String>("backend")
        .map(String::as_str)
        .unwrap_or("webdriver");
    match backend {
        "static" => {
            let html_path = sub_matches
                .get_one::<PathBuf>("html")
                .ok_or("--html is required with the static backend")?;
            let html = fs::read_to_string(html_path)
                .map_err(|e| format!("Failed to read {}: {}", html_path.display(), e))?;
            Ok(Box::new(StaticBackend::new().with_page(url.as_str(), html)))
        }
        _ => {
            let endpoint = sub_matches
                .get_one::<String>("webdriver-url")
                .map(String::as_str)
                .unwrap_or("http://localhost:9515");
            let headless = sub_matches.get_flag("headless");
            let backend = WebDriverBackend::connect(endpoint, headless)
                .await
                .map_err(|e| format!("Failed to start a browser session at {}: {}", endpoint, e))?;
            Ok(Box::new(backend))
        }
    }
}

pub async fn handle_fill(sub_matches: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let url = sub_matches
        .get_one::<Url>("url")
        .expect("url is a required argument");
    let resume_path = sub_matches
        .get_one::<String>("resume")
        .expect("resume is a required argument");
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&10);
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|s| ReportFormat::from_str(s))
        .unwrap_or(ReportFormat::Text);

    let resume = match load_resume_data(resume_path) {
        Ok(resume) => resume,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let driver = match build_driver(sub_matches, url).await {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let spinner = progress_spinner(format!("Navigating to {}", url));
    let mut session = FillSession::new(driver);

    if let Err(e) = session.navigate(url.as_str(), Duration::from_secs(timeout)).await {
        spinner.finish_and_clear();
        eprintln!("{} Failed to load {}: {}", "✗".red().bold(), url, e);
        let _ = session.close().await;
        std::process::exit(1);
    }

    spinner.set_message("Detecting platform");
    let platform = match session.detect_platform().await {
        Ok(platform) => platform,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", "✗".red().bold(), e);
            let _ = session.close().await;
            std::process::exit(1);
        }
    };

    spinner.set_message(format!("Discovering {} fields", platform));
    if let Err(e) = session.discover_fields().await {
        spinner.finish_and_clear();
        eprintln!("{} {}", "✗".red().bold(), e);
        let _ = session.close().await;
        std::process::exit(1);
    }

    spinner.set_message(format!("Filling {} fields", session.fields().len()));
    let outcome = match session.fill(&resume).await {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", "✗".red().bold(), e);
            let _ = session.close().await;
            std::process::exit(1);
        }
    };

    if let Some(capture_path) = sub_matches.get_one::<PathBuf>("screenshot") {
        if let Err(e) = session.screenshot(capture_path).await {
            eprintln!(
                "{} Could not capture {}: {}",
                "✗".red().bold(),
                capture_path.display(),
                e
            );
        }
    }

    if let Err(e) = session.close().await {
        tracing::warn!("session close failed: {}", e);
    }
    spinner.finish_and_clear();

    let report = FillReport::new(url.as_str(), platform, session.fields(), &outcome);
    match format {
        ReportFormat::Text => {
            println!("\n{} Fill pass complete!\n", "✓".green().bold());
            println!("{}", report.render_text());
        }
        ReportFormat::Json => match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{} Could not render the report: {}", "✗".red().bold(), e);
                std::process::exit(1);
            }
        },
    }
}

pub fn handle_detect(sub_matches: &ArgMatches) {
    let url = sub_matches
        .get_one::<Url>("url")
        .expect("url is a required argument");
    let platform = detect_platform(url.as_str());
    println!(
        "{} {}",
        "Platform:".blue(),
        platform.to_string().bright_white().bold()
    );
}

fn print_rule_set(platform: PlatformId) {
    println!("{}", platform.as_str().bright_white().bold());
    for rule in rules_for(platform) {
        println!(
            "  {} {}",
            rule.logical_name.cyan(),
            rule.selectors.join(", ").bright_black()
        );
    }
    println!();
}

pub fn handle_rules(sub_matches: &ArgMatches) {
    match sub_matches.get_one::<String>("platform") {
        Some(name) => match PlatformId::from_str(name) {
            Some(platform) => print_rule_set(platform),
            None => {
                eprintln!("{} Unknown platform: {}", "✗".red().bold(), name);
                std::process::exit(1);
            }
        },
        None => {
            for platform in [
                PlatformId::Linkedin,
                PlatformId::Greenhouse,
                PlatformId::Workday,
                PlatformId::Lever,
                PlatformId::Generic,
            ] {
                print_rule_set(platform);
            }
        }
    }
}
