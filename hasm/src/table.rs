//! Fixed mnemonic tables of the Hack instruction set.

use std::fmt;
use std::str::FromStr;

use crate::Address;


/// Names reserved before any source is read.
pub const BUILT_INS: [(&str, Address); 23] = [
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", 16384),
    ("KBD", 24576),
];

pub fn built_in(name: &str) -> Option<Address> {
    BUILT_INS
        .iter()
        .find_map(|&(n, address)| (n == name).then_some(address))
}

/// Second operand of an ALU operation: the address register or the memory
/// cell it points at. Selected by the `a` bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    A,
    M,
}

impl Source {
    pub const fn bit(self) -> u8 {
        match self {
            Source::A => 0,
            Source::M => 1,
        }
    }
    fn name(self) -> char {
        match self {
            Source::A => 'A',
            Source::M => 'M',
        }
    }
}

/// The 18 ALU operations. `X` stands for whichever [`Source`] is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    Zero,
    One,
    NegOne,
    D,
    X,
    NotD,
    NotX,
    NegD,
    NegX,
    DPlusOne,
    XPlusOne,
    DMinusOne,
    XMinusOne,
    DPlusX,
    DMinusX,
    XMinusD,
    DAndX,
    DOrX,
}

impl AluOp {
    pub const ALL: [AluOp; 18] = [
        AluOp::Zero,
        AluOp::One,
        AluOp::NegOne,
        AluOp::D,
        AluOp::X,
        AluOp::NotD,
        AluOp::NotX,
        AluOp::NegD,
        AluOp::NegX,
        AluOp::DPlusOne,
        AluOp::XPlusOne,
        AluOp::DMinusOne,
        AluOp::XMinusOne,
        AluOp::DPlusX,
        AluOp::DMinusX,
        AluOp::XMinusD,
        AluOp::DAndX,
        AluOp::DOrX,
    ];

    /// `zx nx zy ny f no`
    pub const fn bits(self) -> u8 {
        use AluOp::*;
        match self {
            Zero => 0b101010,
            One => 0b111111,
            NegOne => 0b111010,
            D => 0b001100,
            X => 0b110000,
            NotD => 0b001101,
            NotX => 0b110001,
            NegD => 0b001111,
            NegX => 0b110011,
            DPlusOne => 0b011111,
            XPlusOne => 0b110111,
            DMinusOne => 0b001110,
            XMinusOne => 0b110010,
            DPlusX => 0b000010,
            DMinusX => 0b010011,
            XMinusD => 0b000111,
            DAndX => 0b000000,
            DOrX => 0b010101,
        }
    }

    /// Whether the operation reads the second operand, and therefore has
    /// both an `A` and an `M` form.
    pub const fn reads_source(self) -> bool {
        use AluOp::*;
        !matches!(
            self,
            Zero | One | NegOne | D | NotD | NegD | DPlusOne | DMinusOne
        )
    }

    /// Mnemonic with `X` left as a placeholder.
    const fn template(self) -> &'static str {
        use AluOp::*;
        match self {
            Zero => "0",
            One => "1",
            NegOne => "-1",
            D => "D",
            X => "X",
            NotD => "!D",
            NotX => "!X",
            NegD => "-D",
            NegX => "-X",
            DPlusOne => "D+1",
            XPlusOne => "X+1",
            DMinusOne => "D-1",
            XMinusOne => "X-1",
            DPlusX => "D+X",
            DMinusX => "D-X",
            XMinusD => "X-D",
            DAndX => "D&X",
            DOrX => "D|X",
        }
    }
}

/// The `comp` field of a compute instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Computation {
    pub op: AluOp,
    pub source: Source,
}

impl Computation {
    /// `a c1 c2 c3 c4 c5 c6`
    pub const fn code(self) -> u8 {
        self.source.bit() << 6 | self.op.bits()
    }

    /// Every accepted computation, `A` forms before `M` forms.
    pub fn all() -> impl Iterator<Item = Computation> {
        let a = AluOp::ALL.into_iter().map(|op| Computation {
            op,
            source: Source::A,
        });
        let m = AluOp::ALL
            .into_iter()
            .filter(|op| op.reads_source())
            .map(|op| Computation {
                op,
                source: Source::M,
            });
        a.chain(m)
    }
}

impl fmt::Display for Computation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.op.template().chars() {
            let ch = if ch == 'X' { self.source.name() } else { ch };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl FromStr for Computation {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use AluOp::*;
        // `M` can only stand where the second operand does
        let (source, op) = if s.contains('M') {
            (Source::M, s.replace('M', "A"))
        } else {
            (Source::A, s.to_owned())
        };
        let op = match op.as_str() {
            "0" => Zero,
            "1" => One,
            "-1" => NegOne,
            "D" => D,
            "A" => X,
            "!D" => NotD,
            "!A" => NotX,
            "-D" => NegD,
            "-A" => NegX,
            "D+1" => DPlusOne,
            "A+1" => XPlusOne,
            "D-1" => DMinusOne,
            "A-1" => XMinusOne,
            "D+A" => DPlusX,
            "D-A" => DMinusX,
            "A-D" => XMinusD,
            "D&A" => DAndX,
            "D|A" => DOrX,
            _ => return Err(()),
        };
        Ok(Computation { op, source })
    }
}

/// The `dest` field. Bits are `A M D`, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dest {
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

impl Dest {
    pub const ALL: [Dest; 7] = [
        Dest::M,
        Dest::D,
        Dest::MD,
        Dest::A,
        Dest::AM,
        Dest::AD,
        Dest::AMD,
    ];

    pub const fn code(self) -> u8 {
        match self {
            Dest::M => 0b001,
            Dest::D => 0b010,
            Dest::MD => 0b011,
            Dest::A => 0b100,
            Dest::AM => 0b101,
            Dest::AD => 0b110,
            Dest::AMD => 0b111,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Dest::M => "M",
            Dest::D => "D",
            Dest::MD => "MD",
            Dest::A => "A",
            Dest::AM => "AM",
            Dest::AD => "AD",
            Dest::AMD => "AMD",
        }
    }
}

impl FromStr for Dest {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dest::ALL
            .into_iter()
            .find(|d| d.mnemonic() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jump {
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

impl Jump {
    pub const ALL: [Jump; 7] = [
        Jump::JGT,
        Jump::JEQ,
        Jump::JGE,
        Jump::JLT,
        Jump::JNE,
        Jump::JLE,
        Jump::JMP,
    ];

    /// `j1 j2 j3` = less, equal, greater
    pub const fn code(self) -> u8 {
        match self {
            Jump::JGT => 0b001,
            Jump::JEQ => 0b010,
            Jump::JGE => 0b011,
            Jump::JLT => 0b100,
            Jump::JNE => 0b101,
            Jump::JLE => 0b110,
            Jump::JMP => 0b111,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Jump::JGT => "JGT",
            Jump::JEQ => "JEQ",
            Jump::JGE => "JGE",
            Jump::JLT => "JLT",
            Jump::JNE => "JNE",
            Jump::JLE => "JLE",
            Jump::JMP => "JMP",
        }
    }
}

impl FromStr for Jump {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Jump::ALL
            .into_iter()
            .find(|j| j.mnemonic() == s)
            .ok_or(())
    }
}
