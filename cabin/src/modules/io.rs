/// ----- I/O MODULE -----
/// This module is the operator console. It reads menu choices, floors and
/// directions from a text stream, rejects malformed input, and forwards
/// valid calls to the cabin.

use std::io::{self, BufRead, Write};

use shared_resources::direction::Direction;

use crate::utilities::cabin::Cabin;
use crate::utilities::error::RequestError;

enum Prompt<T> {
    Value(T),
    Invalid,
    Closed,
}

pub fn read_top_floor<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<u8>> {
    loop {
        write!(output, "Enter the top floor of the building: ")?;
        output.flush()?;
        let line = match read_line(input)? {
            Some(line) => line,
            None => return Ok(None),
        };
        match line.parse::<i64>() {
            Ok(number) if number < 1 => writeln!(output, "Invalid input. The top floor must be at least 1.")?,
            Ok(number) => match u8::try_from(number) {
                Ok(top_floor) => return Ok(Some(top_floor)),
                Err(_) => writeln!(output, "Invalid input. The top floor can be at most {}.", u8::MAX)?,
            },
            Err(_) => writeln!(output, "Invalid input. Please enter a valid integer.")?,
        }
    }
}

/// Runs the menu until the operator exits or the input closes, then stops
/// the cabin.
pub fn main<R: BufRead, W: Write>(cabin: &Cabin, mut input: R, mut output: W) -> io::Result<()> {
    let top_floor = cabin.top_floor();

    loop {
        writeln!(output, "\nChoose an action:")?;
        writeln!(output, "1. Add an outside request")?;
        writeln!(output, "2. Add an inside button request")?;
        writeln!(output, "3. Exit")?;
        write!(output, "> ")?;
        output.flush()?;

        let choice = match read_line(&mut input)? {
            Some(choice) => choice,
            None => break,
        };

        match choice.as_str() {
            "1" => {
                let floor = match prompt_floor(&mut input, &mut output, "Enter the floor number: ", top_floor)? {
                    Prompt::Value(floor) => floor,
                    Prompt::Invalid => continue,
                    Prompt::Closed => break,
                };
                write!(output, "Enter direction (up/down): ")?;
                output.flush()?;
                let token = match read_line(&mut input)? {
                    Some(token) => token,
                    None => break,
                };
                match token.parse::<Direction>() {
                    Ok(direction) => report(&mut output, cabin.add_outside_request(floor, direction))?,
                    Err(_) => writeln!(output, "Invalid direction. Please enter 'up' or 'down'.")?,
                }
            },
            "2" => {
                match prompt_floor(&mut input, &mut output, "Enter the inside floor button: ", top_floor)? {
                    Prompt::Value(floor) => report(&mut output, cabin.add_inside_request(floor))?,
                    Prompt::Invalid => continue,
                    Prompt::Closed => break,
                }
            },
            "3" => {
                writeln!(output, "Stopping the elevator...")?;
                break
            },
            _ => writeln!(output, "Invalid choice. Please try again.")?,
        }
    }

    cabin.stop();
    Ok(())
}

fn prompt_floor<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    top_floor: u8,
) -> io::Result<Prompt<u8>> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let line = match read_line(input)? {
        Some(line) => line,
        None => return Ok(Prompt::Closed),
    };
    // numbers past u8 are still floors, just out of range
    match line.parse::<i64>().map(u8::try_from) {
        Ok(Ok(floor)) if floor >= 1 && floor <= top_floor => Ok(Prompt::Value(floor)),
        Ok(_) => {
            writeln!(output, "Invalid floor. Please select a floor between 1 and {}.", top_floor)?;
            Ok(Prompt::Invalid)
        },
        Err(_) => {
            writeln!(output, "Invalid input. Please enter a valid number.")?;
            Ok(Prompt::Invalid)
        },
    }
}

fn report<W: Write>(output: &mut W, result: Result<(), RequestError>) -> io::Result<()> {
    if let Err(e) = result {
        writeln!(output, "{}", e)?;
    }
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None)
    }
    Ok(Some(line.trim().to_string()))
}
