use clap::{Parser, Subcommand};

use server::ServerOpts;

#[derive(Debug, Parser)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the account service with the specified configuration.
    Server {
        /// The port number on which the server will listen for incoming connections.
        /// Example: `8080`
        #[arg(long, env = "PORT")]
        port: u16,

        /// The database connection URL used by the server.
        /// Example: `sqlite:///tmp/data/accounts.db` (or) `./accounts.db`
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Args::parse().cmd {
        Command::Server { port, database_url } => {
            server::serve(ServerOpts { database_url, port }).await?;
        }
    }

    Ok(())
}
