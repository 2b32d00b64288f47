//! Command line front end for poker league scoring.
//!
//! Scores single games and reads league snapshots to print standings and
//! season qualifications. Output is JSON on stdout; logs go to stderr.

mod commands;
mod logging;

use anyhow::Error;
use log::info;
use pico_args::Arguments;
use poker_league::LeagueConfig;

use commands::Command;

const HELP: &str = "\
Score poker league games and report standings

USAGE:
  league_cli score <GAME_JSON>
  league_cli standings <SNAPSHOT_JSON> (--season ID | --series ID)
  league_cli qualify <SNAPSHOT_JSON> --season ID

COMMANDS:
  score        Print the points awarded for a finished game
  standings    Print the standings of a season or series
  qualify      Refresh and print a season's qualifications

FLAGS:
  -h, --help   Print help information

ENVIRONMENT:
  LEAGUE_STRICT_RESULTS        Reject malformed games  [default: true]
  LEAGUE_QUALIFICATION_SPOTS   Spots for seasons without their own  [default: 10]
  LEAGUE_MAX_FIELD_SIZE        Largest accepted field  [default: 1000]
  RUST_LOG                     Log filter  [default: info]
  (A .env file in the working directory is loaded first)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    logging::init();

    let command = match Command::parse(pargs) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    let config = LeagueConfig::from_env()?;
    info!("Running {:?}", command);

    let output = command.run(&config).await?;
    println!("{output}");
    Ok(())
}
