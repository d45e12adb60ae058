use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = services::storage::load_config()?;
    commands::runtime::handle_command(&cli, &config)
}
