use anyhow::Result;
use clap::Parser;

use version_query::{config, predict, query, ui};

#[derive(clap::Parser)]
#[command(
    name = "version-query",
    about = "Query and predict semantic versions from git tag history"
)]
struct Args {
    #[arg(default_value = ".", help = "Path inside the repository to query")]
    path: String,

    #[arg(
        short,
        long,
        help = "Predict the upcoming version instead of reporting the latest tagged one"
    )]
    predict: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Suppress tag parse warnings")]
    quiet: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("version-query {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let result = if args.predict {
        predict(&args.path, &config)
    } else {
        query(&args.path)
    };

    match result {
        Ok((version, warnings)) => {
            if !args.quiet {
                ui::display_warnings(&warnings);
            }
            println!("{}", version);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
