pub mod clean;
pub mod encode;
pub mod error;
pub mod symbol;
pub mod table;

#[cfg(test)]
mod test;

pub use self::encode::MachineWord;
pub use self::error::{AsmError, Cause, EncodingError, LabelError, LineInfo, SyntaxError};

pub type Address = u16;

/// A single instruction or label definition, stripped of whitespace and
/// comments, tagged with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanLine {
    /// 1-based line number in the source file
    pub line: u32,
    pub text: String,
}

impl CleanLine {
    pub fn new(line: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }

    pub fn info(&self) -> LineInfo {
        LineInfo {
            line: self.line,
            text: self.text.clone(),
        }
    }
}

/// Resolves every symbol in `lines` and encodes the result, one word per
/// retained instruction.
pub fn assemble(lines: &[CleanLine]) -> Result<Vec<MachineWord>, AsmError> {
    let resolved = symbol::resolve(lines)?;
    let words = encode::encode_all(&resolved)?;
    tracing::info!(lines = lines.len(), words = words.len(), "assembled");
    Ok(words)
}

/// Normalizes raw source text, assembles it and renders the machine words,
/// each terminated by a newline.
pub fn assemble_source(src: &str) -> Result<String, AsmError> {
    let lines = clean::clean(src);
    let words = assemble(&lines)?;
    let mut out = String::with_capacity(words.len() * 17);
    for word in &words {
        out.push_str(&word.to_string());
        out.push('\n');
    }
    Ok(out)
}
