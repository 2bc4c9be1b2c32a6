use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

mod check;
mod curve;
mod io;
mod pose;

const APP_NAME: &str = env!("CARGO_BIN_NAME");

#[derive(clap::Parser)]
#[clap(name = APP_NAME, version, author, about)]
pub(crate) struct Entry {
    #[clap(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Compute the leverage curves and write them back to the datasheets
    Curve(curve::CurveArgs),
    /// Validate the datasheets without simulating the travel
    Check {
        /// Datasheet paths (in JSON format)
        files: Vec<PathBuf>,
    },
    /// Draw the linkage poses through the travel
    Pose(pose::PoseArgs),
}

impl Entry {
    pub(crate) fn main() {
        let entry = <Self as clap::Parser>::parse_from(wild::args());
        init_logger();
        register_panic_hook();
        let ok = match entry.cmd {
            Cmd::Curve(args) => curve::curve(args),
            Cmd::Check { files } => check::check(files),
            Cmd::Pose(args) => pose::pose(args),
        };
        if !ok {
            std::process::exit(1);
        }
    }
}

fn init_logger() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "leverage=warn,leverage_cli=info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn register_panic_hook() {
    // Print panic messages without stack trace
    std::panic::set_hook(Box::new(|info| {
        match info.payload().downcast_ref::<&str>() {
            Some(s) => eprintln!("{s}"),
            None => eprintln!("{info}"),
        }
        std::process::exit(1);
    }));
}
