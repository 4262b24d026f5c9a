mod brands;
mod keys;
mod normalize;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bmon-cli")]
#[command(about = "Brand-mention monitoring command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize raw mentions from a JSON file (or stdin) into canonical form
    Normalize {
        /// Brand the mentions are attributed to
        #[arg(long)]
        brand: String,
        /// JSON file holding one raw mention or an array; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Epoch milliseconds used for unparseable timestamps instead of the wall clock
        #[arg(long)]
        now_ms: Option<i64>,
    },
    /// Print every storage key for a brand
    Keys {
        #[arg(long)]
        brand: String,
        /// Bucket date (YYYY-MM-DD); requires --hour
        #[arg(long, requires = "hour")]
        date: Option<String>,
        /// Bucket hour (0-23); requires --date
        #[arg(long, requires = "date")]
        hour: Option<String>,
    },
    /// Validate the brand seed file and list its brands
    Brands {
        #[arg(long, env = "BMON_BRANDS_PATH", default_value = "./config/brands.yaml")]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Normalize {
            brand,
            input,
            now_ms,
        }) => normalize::run(&brand, input.as_deref(), now_ms, &mut out)?,
        Some(Commands::Keys { brand, date, hour }) => {
            keys::run(&brand, date.as_deref(), hour.as_deref(), &mut out)?;
        }
        Some(Commands::Brands { path }) => brands::run(&path, &mut out)?,
        None => println!("bmon-cli: pass --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
