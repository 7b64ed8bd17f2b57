use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;
use url::Url;

use crate::CLAP_STYLING;

pub fn command_argument_builder() -> Command {
    Command::new("jobfill")
        .styles(CLAP_STYLING)
        .about("Fills job-application forms from structured resume data")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress the banner")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("fill")
                .about("Navigate to an application page and fill its form")
                .arg(
                    Arg::new("url")
                        .short('u')
                        .long("url")
                        .help("URL of the application page")
                        .value_parser(value_parser!(Url))
                        .required(true),
                )
                .arg(
                    Arg::new("resume")
                        .short('r')
                        .long("resume")
                        .help("Path to the resume JSON file")
                        .required(true),
                )
                .arg(
                    Arg::new("backend")
                        .short('b')
                        .long("backend")
                        .help("Page backend to drive")
                        .value_parser(["webdriver", "static"])
                        .default_value("webdriver"),
                )
                .arg(
                    Arg::new("webdriver-url")
                        .long("webdriver-url")
                        .help("WebDriver endpoint (chromedriver or compatible)")
                        .default_value("http://localhost:9515"),
                )
                .arg(
                    Arg::new("headless")
                        .long("headless")
                        .help("Run the browser without a window")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help("Local HTML file served as the page (static backend only)")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .help("Seconds to wait for the page to finish loading")
                        .value_parser(value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    Arg::new("screenshot")
                        .short('s')
                        .long("screenshot")
                        .help("Write a capture of the page after filling")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Report output format")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("detect")
                .about("Report which platform a URL belongs to")
                .arg(
                    Arg::new("url")
                        .short('u')
                        .long("url")
                        .help("URL of the application page")
                        .value_parser(value_parser!(Url))
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("rules")
                .about("List the selector catalog for a platform")
                .arg(
                    Arg::new("platform")
                        .short('p')
                        .long("platform")
                        .help("Platform name (defaults to listing every catalog)"),
                ),
        )
}
