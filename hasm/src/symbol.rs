use ahash::AHashMap;
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

use crate::error::{AsmError, Cause, EncodingError, LabelError};
use crate::table::{built_in, BUILT_INS};
use crate::{Address, CleanLine};


/// Data address handed to the first variable.
pub const FIRST_VARIABLE: Address = 16;
/// Highest address an address instruction can load.
pub const MAX_ADDRESS: Address = i16::MAX as Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SymbolKind {
    BuiltIn,
    Label,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub address: Address,
    pub kind: SymbolKind,
}

/// Every name known to one assembly run. Built-ins are present from the
/// start; labels and variables only get in through [`SymbolTable::define_label`]
/// and [`SymbolTable::variable`], which never override an existing binding.
#[derive(Debug)]
pub struct SymbolTable {
    si: StringInterner<DefaultBackend>,
    bindings: AHashMap<DefaultSymbol, Binding>,
    next_variable: Address,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            si: StringInterner::default(),
            bindings: AHashMap::with_capacity(BUILT_INS.len()),
            next_variable: FIRST_VARIABLE,
        };
        for (name, address) in BUILT_INS {
            let sym = table.si.get_or_intern_static(name);
            table.bindings.insert(
                sym,
                Binding {
                    address,
                    kind: SymbolKind::BuiltIn,
                },
            );
        }
        table
    }

    pub fn get(&self, name: &str) -> Option<Binding> {
        let sym = self.si.get(name)?;
        self.bindings.get(&sym).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Binds a label to an instruction address.
    pub fn define_label(&mut self, name: &str, address: Address) -> Result<(), LabelError> {
        check_name(name)?;
        self.bind(
            name,
            Binding {
                address,
                kind: SymbolKind::Label,
            },
        )
    }

    /// Looks `name` up, allocating the next free data address if it is new.
    pub fn variable(&mut self, name: &str) -> Result<Address, Cause> {
        if let Some(binding) = self.get(name) {
            return Ok(binding.address);
        }
        check_name(name)?;
        let address = self.next_variable;
        if address > MAX_ADDRESS {
            return Err(EncodingError::OutOfDataMemory(name.to_owned()).into());
        }
        self.bind(
            name,
            Binding {
                address,
                kind: SymbolKind::Variable,
            },
        )?;
        self.next_variable += 1;
        tracing::debug!(variable = name, address, "allocated variable");
        Ok(address)
    }

    fn bind(&mut self, name: &str, binding: Binding) -> Result<(), LabelError> {
        if built_in(name).is_some() {
            return Err(LabelError::Reserved(name.to_owned()));
        }
        let sym = self.si.get_or_intern(name);
        if self.bindings.contains_key(&sym) {
            return Err(LabelError::Duplicate(name.to_owned()));
        }
        self.bindings.insert(sym, binding);
        Ok(())
    }

    /// All bindings, ordered by kind, then address, then name.
    pub fn entries(&self) -> Vec<(&str, Binding)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .filter_map(|(sym, binding)| Some((self.si.resolve(*sym)?, *binding)))
            .collect();
        entries.sort_by(|(n1, b1), (n2, b2)| {
            (b1.kind, b1.address, n1).cmp(&(b2.kind, b2.address, n2))
        });
        entries
    }
}

fn check_name(name: &str) -> Result<(), LabelError> {
    match name.chars().next() {
        None => Err(LabelError::Empty),
        Some(c) if c.is_ascii_digit() => Err(LabelError::DigitLeading(name.to_owned())),
        Some(_) => Ok(()),
    }
}

/// A signed decimal literal; anything else after `@` is a symbol.
pub fn is_numeric(operand: &str) -> bool {
    let digits = operand
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(operand);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn label_name(text: &str) -> Option<&str> {
    text.strip_prefix('(')?.strip_suffix(')')
}

/// Replaces every label and variable with its address and drops label
/// definitions.
pub fn resolve(lines: &[CleanLine]) -> Result<Vec<CleanLine>, AsmError> {
    resolve_symbols(lines).map(|(lines, _)| lines)
}

/// Like [`resolve`], also handing back the finished symbol table.
pub fn resolve_symbols(lines: &[CleanLine]) -> Result<(Vec<CleanLine>, SymbolTable), AsmError> {
    let mut table = SymbolTable::new();
    let stripped = extract_labels(&mut table, lines)?;
    let resolved = allocate_variables(&mut table, stripped)?;
    tracing::info!(
        symbols = table.len(),
        instructions = resolved.len(),
        "symbols resolved"
    );
    Ok((resolved, table))
}

fn extract_labels<'a>(
    table: &mut SymbolTable,
    lines: &'a [CleanLine],
) -> Result<Vec<&'a CleanLine>, AsmError> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        match label_name(&line.text) {
            Some(name) => {
                let address = Address::try_from(out.len())
                    .ok()
                    .filter(|&a| a <= MAX_ADDRESS)
                    .ok_or_else(|| {
                        AsmError::at(
                            EncodingError::OutOfInstructionMemory(name.to_owned()),
                            line.info(),
                        )
                    })?;
                table
                    .define_label(name, address)
                    .map_err(|e| AsmError::at(e, line.info()))?;
                tracing::debug!(label = name, address, "bound label");
            }
            None => out.push(line),
        }
    }
    Ok(out)
}

fn allocate_variables(
    table: &mut SymbolTable,
    lines: Vec<&CleanLine>,
) -> Result<Vec<CleanLine>, AsmError> {
    lines
        .into_iter()
        .map(|line| match line.text.strip_prefix('@') {
            Some(operand) if !is_numeric(operand) => {
                let address = table
                    .variable(operand)
                    .map_err(|e| AsmError::at(e, line.info()))?;
                Ok(CleanLine::new(line.line, format!("@{address}")))
            }
            _ => Ok(line.clone()),
        })
        .collect()
}
