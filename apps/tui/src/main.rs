mod api;
mod app;
mod cli;
mod config;
mod domain;
mod event;
mod terminal;
mod ui;

use api::ApiClient;
use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = config::init_app_config();
    let api = ApiClient::new(config.base_url.clone(), config.request_timeout)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, api, tx);

    // Without a terminal there is nothing to draw; print one snapshot.
    if args.headless || !is_terminal() {
        return event::run_headless(&app, args.json).await;
    }

    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app, &mut rx).await;

    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
