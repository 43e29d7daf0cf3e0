use std::str::FromStr;

use crate::errors::command_error::CommandError;

/// One line of input, parsed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateParkingLot(usize),
    Park { plate: String, color: String },
    Leave(usize),
    Status,
    PlatesForColor(String),
    SlotsForColor(String),
    SlotForPlate(String),
    Exit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = tokens.collect();

        let command = match verb {
            "create_parking_lot" => {
                let [slots] = arity::<1>(verb, &args)?;
                Command::CreateParkingLot(number(verb, slots)?)
            }
            "park" => {
                let [plate, color] = arity::<2>(verb, &args)?;
                Command::Park {
                    plate: plate.to_string(),
                    color: color.to_string(),
                }
            }
            "leave" => {
                let [slot] = arity::<1>(verb, &args)?;
                Command::Leave(number(verb, slot)?)
            }
            "status" => {
                arity::<0>(verb, &args)?;
                Command::Status
            }
            "registration_numbers_for_cars_with_colour" => {
                let [color] = arity::<1>(verb, &args)?;
                Command::PlatesForColor(color.to_string())
            }
            "slot_numbers_for_cars_with_colour" => {
                let [color] = arity::<1>(verb, &args)?;
                Command::SlotsForColor(color.to_string())
            }
            "slot_number_for_registration_number" => {
                let [plate] = arity::<1>(verb, &args)?;
                Command::SlotForPlate(plate.to_string())
            }
            "exit" => {
                arity::<0>(verb, &args)?;
                Command::Exit
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

fn arity<'a, const N: usize>(verb: &str, args: &[&'a str]) -> Result<[&'a str; N], CommandError> {
    <[&str; N]>::try_from(args).map_err(|_| CommandError::WrongArity {
        verb: verb.to_string(),
        expected: N,
        got: args.len(),
    })
}

fn number(verb: &str, value: &str) -> Result<usize, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        verb: verb.to_string(),
        value: value.to_string(),
    })
}
