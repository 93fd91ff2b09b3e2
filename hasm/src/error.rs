use std::fmt;

/// Where an error happened: the source line number and its cleaned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    pub line: u32,
    pub text: String,
}

/// An assembly failure. The per-line passes produce a bare [`Cause`], the
/// pipeline attaches the offending line before handing it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmError {
    pub line: Option<LineInfo>,
    pub cause: Cause,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cause {
    Label(LabelError),
    Syntax(SyntaxError),
    Encoding(EncodingError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    Empty,
    DigitLeading(String),
    Reserved(String),
    Duplicate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    UnexpectedSemicolon,
    UnexpectedEquals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    InvalidComputation(String),
    InvalidDestination(String),
    InvalidJump(String),
    InvalidAddress(String),
    /// no data address is left for a new variable
    OutOfDataMemory(String),
    /// a label would point past the last loadable instruction address
    OutOfInstructionMemory(String),
}

impl AsmError {
    pub fn new(cause: impl Into<Cause>) -> Self {
        Self {
            line: None,
            cause: cause.into(),
        }
    }

    pub fn at(cause: impl Into<Cause>, line: LineInfo) -> Self {
        Self {
            line: Some(line),
            cause: cause.into(),
        }
    }

    pub fn line_number(&self) -> Option<u32> {
        self.line.as_ref().map(|l| l.line)
    }

    /// Position and cause on one line, e.g. ``line 3: `D=Q`: encoding error: ...``.
    pub fn report(&self) -> String {
        match self.line {
            Some(_) => format!("{self}: {}", self.cause),
            None => self.to_string(),
        }
    }
}

impl From<LabelError> for Cause {
    fn from(e: LabelError) -> Self {
        Cause::Label(e)
    }
}

impl From<SyntaxError> for Cause {
    fn from(e: SyntaxError) -> Self {
        Cause::Syntax(e)
    }
}

impl From<EncodingError> for Cause {
    fn from(e: EncodingError) -> Self {
        Cause::Encoding(e)
    }
}

/// With a line attached only the position is displayed and the cause is
/// reachable through [`std::error::Error::source`].
impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.line {
            Some(LineInfo { line, text }) => write!(f, "line {line}: `{text}`"),
            None => write!(f, "{}", self.cause),
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Label(e) => write!(f, "label error: {e}"),
            Cause::Syntax(e) => write!(f, "syntax error: {e}"),
            Cause::Encoding(e) => write!(f, "encoding error: {e}"),
        }
    }
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::Empty => write!(f, "empty symbol name"),
            LabelError::DigitLeading(name) => {
                write!(f, "symbol '{name}' must not start with a digit")
            }
            LabelError::Reserved(name) => {
                write!(f, "symbol '{name}' conflicts with a built-in symbol")
            }
            LabelError::Duplicate(name) => write!(f, "label '{name}' is already defined"),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::UnexpectedSemicolon => write!(f, "unexpected semicolon"),
            SyntaxError::UnexpectedEquals => write!(f, "unexpected equals"),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidComputation(s) => write!(f, "invalid computation '{s}'"),
            EncodingError::InvalidDestination(s) => write!(f, "invalid destination '{s}'"),
            EncodingError::InvalidJump(s) => write!(f, "invalid jump '{s}'"),
            EncodingError::InvalidAddress(s) => write!(f, "invalid address '{s}'"),
            EncodingError::OutOfDataMemory(s) => {
                write!(f, "no data address left for variable '{s}'")
            }
            EncodingError::OutOfInstructionMemory(s) => {
                write!(f, "label '{s}' is past the last instruction address")
            }
        }
    }
}

impl std::error::Error for AsmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.line
            .as_ref()
            .map(|_| &self.cause as &(dyn std::error::Error + 'static))
    }
}
impl std::error::Error for Cause {}
