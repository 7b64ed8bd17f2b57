use commands::command_argument_builder;
use jobfill::handlers;
use jobfill_core::print_banner;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    let quiet = chosen_command.get_flag("quiet");
    if !quiet {
        print_banner();
    }

    match chosen_command.subcommand() {
        Some(("fill", sub_matches)) => handlers::handle_fill(sub_matches).await,
        Some(("detect", sub_matches)) => handlers::handle_detect(sub_matches),
        Some(("rules", sub_matches)) => handlers::handle_rules(sub_matches),
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
