use clap::Parser;

mod cli;
mod commands;
mod config;
mod domain;
mod logging;
mod services;

use cli::{Cli, Commands};
use commands::{handle_admin_commands, handle_runtime_commands};
use config::{load_settings, Settings};
use domain::models::{JsonOut, RenderReport, VerdictRecord};
use logging::init_logging;
use services::hashlist::{hash_folder, write_hash_list};
use services::output::{print_one, print_out, print_summary};
use services::pipeline::run_batch;
use services::renderer::ReportRenderer;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format)?;

    if handle_admin_commands(&cli)? {
        return Ok(());
    }

    let settings = load_settings(cli.config.as_deref())?;
    handle_runtime_commands(&cli, &settings)?;

    Ok(())
}
