use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};

use parkrrr::core::lot::ParkingLot;
use parkrrr::errors::startup_error::StartupError;
use parkrrr::server::dispatcher::Dispatcher;
use parkrrr::server::render::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "parkrrr", version, about = "Parking lot driven by one command per line")]
struct Cli {
    /// path to the input file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// read commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// print status and colour queries as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }

    // Interactive wins when both sources are given.
    fn open_input(&self) -> Result<Box<dyn BufRead>, StartupError> {
        if self.interactive {
            return Ok(Box::new(io::stdin().lock()));
        }
        let path = self.file.as_ref().ok_or(StartupError::NoArguments)?;
        match File::open(path) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StartupError::FileNotFound(path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    debug!("cli = {cli:?}");

    let input = match cli.open_input() {
        Ok(input) => input,
        Err(e) => {
            debug!("startup failed: {e:?}");
            println!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut dispatcher = Dispatcher::new(ParkingLot::new(), cli.format());
    let result = dispatcher.run(input, &mut io::stdout().lock());
    let lot = dispatcher.lot();
    match lot.capacity() {
        Some(capacity) => {
            info!("session finished, {} of {capacity} slots occupied", lot.occupied())
        }
        None => info!("session finished, no parking lot was created"),
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("command loop aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
