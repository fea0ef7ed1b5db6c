//! Binary for the library bot. `run` starts Telegram polling; `ask` answers one question.

use anyhow::Result;
use clap::Parser;
use library_bot::{ask_once, load_answer_config, load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Ask { question } => {
            let config = load_answer_config()?;
            let answer = ask_once(config, &question).await?;
            println!("{}", answer);
            Ok(())
        }
    }
}
