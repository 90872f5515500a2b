use clap::{Arg, ArgAction, Command};
use weave_core::log;

mod cmd {
    pub mod build;
    pub mod watch;
}
mod config;

use config::WeaveConfig;

fn cli() -> Command {
    Command::new("weave")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Expand HTML partials into a static site")
        .arg(
            Arg::new("watch")
                .short('w')
                .long("watch")
                .help("Rebuild whenever a source page changes")
                .action(ArgAction::SetTrue),
        )
}

async fn run() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = WeaveConfig::load(&matches)?;

    if config.watch.enabled {
        cmd::watch::execute(&config).await
    } else {
        cmd::build::execute(&config)
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        log!("error"; "{e:#}");
        std::process::exit(1);
    }
}
