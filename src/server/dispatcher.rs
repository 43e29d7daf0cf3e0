use std::io::{self, BufRead, Write};

use log::{debug, info, warn};

use crate::core::lot::{Occupant, ParkingInteractions, Projection};
use crate::errors::command_error::CommandError;
use crate::server::command::Command;
use crate::server::render::{render_matches, render_status, OutputFormat};

pub const INVALID_COMMAND: &str = "Invalid Command. Try again";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Silent,
    Exit,
}

/// Reads commands line by line and applies them to a lot it owns.
pub struct Dispatcher<P: ParkingInteractions> {
    lot: P,
    format: OutputFormat,
}

impl<P: ParkingInteractions> Dispatcher<P> {
    pub fn new(lot: P, format: OutputFormat) -> Self {
        Self { lot, format }
    }

    pub fn lot(&self) -> &P {
        &self.lot
    }

    /// Runs until end of input or `exit`. Only I/O failures end the loop early; a line that is
    /// not valid UTF-8 is reported as an invalid command.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let reply = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_line(line, out)?,
                Err(e) => {
                    debug!("rejected non UTF-8 line: {e}");
                    writeln!(out, "{INVALID_COMMAND}")?;
                    Reply::Message(INVALID_COMMAND.to_string())
                }
            };
            if reply == Reply::Exit {
                info!("exit requested, stopping command loop");
                break;
            }
        }
        out.flush()
    }

    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Reply> {
        let reply = match Command::parse(line) {
            Ok(command) => self.execute(command)?,
            Err(CommandError::Empty) => Reply::Silent,
            Err(e) => {
                debug!("rejected {line:?}: {e}");
                Reply::Message(INVALID_COMMAND.to_string())
            }
        };
        if let Reply::Message(msg) = &reply {
            writeln!(out, "{msg}")?;
        }
        Ok(reply)
    }

    pub fn execute(&mut self, command: Command) -> io::Result<Reply> {
        let msg = match command {
            Command::CreateParkingLot(slots) => self.handle_create(slots),
            Command::Park { plate, color } => self.handle_park(Occupant::new(plate, color)),
            Command::Leave(slot) => self.handle_leave(slot),
            Command::Status => render_status(&self.lot.status(), self.format)?,
            Command::PlatesForColor(color) => self.handle_color(&color, Projection::Plates)?,
            Command::SlotsForColor(color) => self.handle_color(&color, Projection::Slots)?,
            Command::SlotForPlate(plate) => self.handle_plate(&plate),
            Command::Exit => return Ok(Reply::Exit),
        };
        Ok(Reply::Message(msg))
    }

    fn handle_create(&mut self, slots: usize) -> String {
        match self.lot.create_parking_lot(slots) {
            Ok(()) => format!("Created a parking lot with {slots} spaces"),
            Err(e) => {
                warn!("create failed: {e}");
                e.to_string()
            }
        }
    }

    fn handle_park(&mut self, occupant: Occupant) -> String {
        match self.lot.park(occupant) {
            Ok(slot) => format!("Allotted slot number: {slot}"),
            Err(e) => {
                debug!("park failed: {e}");
                e.to_string()
            }
        }
    }

    fn handle_leave(&mut self, slot: usize) -> String {
        match self.lot.leave(slot) {
            Ok(()) => format!("Slot number {slot} freed."),
            Err(e) => {
                warn!("leave failed: {e}");
                e.to_string()
            }
        }
    }

    fn handle_color(&self, color: &str, projection: Projection) -> io::Result<String> {
        let matches = self.lot.find_by_color(color, projection);
        if matches.is_empty() && self.format == OutputFormat::Table {
            return Ok(format!("No car with color: {color} found in parking spaces."));
        }
        Ok(render_matches(&matches, self.format)?)
    }

    fn handle_plate(&self, plate: &str) -> String {
        match self.lot.slot_for_plate(plate) {
            Ok(slot) => slot.to_string(),
            Err(e) => e.to_string(),
        }
    }
}
