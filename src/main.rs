use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use numbers_game::{client, host, transport};

#[derive(Parser, Debug)]
#[command(version, about = "A peer-hosted numbers estimation game", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Host a new game and print its room code
    Host {
        /// JSON file to load the questions from (built-in pool by default)
        #[arg(short, long)]
        questions: Option<PathBuf>,

        /// Base of the port range room codes map into
        #[arg(long, default_value_t = transport::DEFAULT_BASE_PORT)]
        base_port: u16,
    },

    /// Join a game with a room code
    Join {
        /// The 4-letter room code
        code: String,

        /// Address of the hosting machine
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Base of the port range room codes map into
        #[arg(long, default_value_t = transport::DEFAULT_BASE_PORT)]
        base_port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr so output does not fight the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Host {
            questions,
            base_port,
        } => host::run(host::HostConfig {
            questions,
            base_port,
        })
        .await,
        Command::Join {
            code,
            address,
            base_port,
        } => {
            client::run(client::JoinConfig {
                code,
                address,
                base_port,
            })
            .await
        }
    }
}
