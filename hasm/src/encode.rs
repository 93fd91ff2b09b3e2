use std::fmt;

use crate::error::{AsmError, Cause, EncodingError, SyntaxError};
use crate::table::{Computation, Dest, Jump};
use crate::CleanLine;

#[cfg(test)]
mod test;

/// One 16-bit instruction word. Displays as 16 binary digits, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MachineWord(pub u16);

impl fmt::Display for MachineWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Address(i16),
    Compute {
        comp: Computation,
        dest: Option<Dest>,
        jump: Option<Jump>,
    },
}

impl Instruction {
    /// Parses a symbol-free line. `@` starts an address instruction, every
    /// other line is a compute instruction.
    pub fn parse(text: &str) -> Result<Self, Cause> {
        match text.strip_prefix('@') {
            Some(value) => value
                .parse::<i16>()
                .map(Instruction::Address)
                .map_err(|_| Cause::from(EncodingError::InvalidAddress(value.to_owned()))),
            None => parse_compute(text),
        }
    }

    pub fn encode(self) -> MachineWord {
        match self {
            Instruction::Address(value) => MachineWord(value as u16),
            Instruction::Compute { comp, dest, jump } => {
                let comp = comp.code() as u16;
                let dest = dest.map_or(0, Dest::code) as u16;
                let jump = jump.map_or(0, Jump::code) as u16;
                MachineWord(0b111 << 13 | comp << 6 | dest << 3 | jump)
            }
        }
    }
}

/// Splits `text` on `sep`, allowing the separator at most once. An empty
/// side is dropped, so `D;` and `=D` both leave `D` as the only part.
fn split_once_only(
    text: &str,
    sep: char,
    err: SyntaxError,
) -> Result<(&str, Option<&str>), Cause> {
    match text.split_once(sep) {
        Some((_, rest)) if rest.contains(sep) => Err(err.into()),
        Some((left, "")) => Ok((left, None)),
        Some(("", right)) => Ok((right, None)),
        Some((left, right)) => Ok((left, Some(right))),
        None => Ok((text, None)),
    }
}

fn parse_compute(text: &str) -> Result<Instruction, Cause> {
    let (rest, jump) = split_once_only(text, ';', SyntaxError::UnexpectedSemicolon)?;
    let (dest, comp) = match split_once_only(rest, '=', SyntaxError::UnexpectedEquals)? {
        (dest, Some(comp)) => (Some(dest), comp),
        (comp, None) => (None, comp),
    };
    let comp = comp
        .parse::<Computation>()
        .map_err(|_| EncodingError::InvalidComputation(comp.to_owned()))?;
    let dest = dest
        .map(|d| {
            d.parse::<Dest>()
                .map_err(|_| EncodingError::InvalidDestination(d.to_owned()))
        })
        .transpose()?;
    let jump = jump
        .map(|j| {
            j.parse::<Jump>()
                .map_err(|_| EncodingError::InvalidJump(j.to_owned()))
        })
        .transpose()?;
    Ok(Instruction::Compute { comp, dest, jump })
}

/// Encodes one symbol-free line.
pub fn encode_line(text: &str) -> Result<MachineWord, Cause> {
    Instruction::parse(text).map(Instruction::encode)
}

/// Encodes every line in order, stopping at the first failure.
pub fn encode_all(lines: &[CleanLine]) -> Result<Vec<MachineWord>, AsmError> {
    lines
        .iter()
        .map(|line| {
            let word = encode_line(&line.text).map_err(|e| AsmError::at(e, line.info()))?;
            tracing::trace!(line = line.line, text = %line.text, %word, "encoded");
            Ok(word)
        })
        .collect()
}
