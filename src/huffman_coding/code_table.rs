//! The code table: one (symbol, code) record per leaf of a tree.
//!
//! This is the only thing the encoding side hands to the decoding side. On disk a record is two
//! lines, the decimal symbol and then its code as '0' and '1' characters. A code may be empty
//! (a tree that is a lone sentinel leaf). There is no header and no record count; a reader keeps
//! going until the input runs out.
//!
//! ```text
//! 65
//! 0
//! 66
//! 10
//! 256
//! 11
//! ```

use log::{debug, warn};
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use std::str::FromStr;

use super::tree::{HuffmanTree, Node};
use super::{Symbol, EOF_SYMBOL};
use crate::error::{HuffError, Result};

/// One record of a code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub symbol: Symbol,
    /// '0' / '1' characters, first bit first.
    pub code: String,
}

/// An ordered list of (symbol, code) records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    entries: Vec<CodeEntry>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Order is kept but carries no meaning for decoding. Symbols above the
    /// sentinel are refused.
    pub fn push(&mut self, symbol: Symbol, code: impl Into<String>) -> Result<()> {
        if symbol > EOF_SYMBOL {
            return Err(HuffError::InvalidSymbol(symbol));
        }
        self.append(symbol, code.into());
        Ok(())
    }

    /// Append a record whose symbol is already known to be in range.
    pub(super) fn append(&mut self, symbol: Symbol, code: String) {
        self.entries.push(CodeEntry { symbol, code });
    }

    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The code of a symbol. If a symbol appears twice, the later record wins, as it does when
    /// the table is rebuilt into a trie.
    pub fn code_of(&self, symbol: Symbol) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.symbol == symbol)
            .map(|entry| entry.code.as_str())
    }

    /// Write the table in its two-lines-per-record text form.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write!(writer, "{}", self)
    }

    /// Read a table in text form until the input is exhausted.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = CodeTable::new();
        let mut lines = reader.lines().enumerate();

        while let Some((idx, line)) = lines.next() {
            let line = line?;
            let text = line.trim();

            // Blank lines are only allowed after the last record.
            if text.is_empty() {
                let mut rest_blank = true;
                for (_, rest) in lines.by_ref() {
                    if !rest?.trim().is_empty() {
                        rest_blank = false;
                        break;
                    }
                }
                if rest_blank {
                    break;
                }
                return Err(HuffError::BadSymbol {
                    line: idx + 1,
                    text: String::new(),
                });
            }

            let symbol = parse_symbol(text, idx + 1)?;
            let code = match lines.next() {
                Some((_, code)) => code?,
                None => {
                    return Err(HuffError::MissingCode {
                        line: idx + 1,
                        symbol,
                    })
                }
            };
            let code = code.trim_end_matches('\r');
            if !code.chars().all(|c| c == '0' || c == '1') {
                return Err(HuffError::BadCode {
                    line: idx + 2,
                    code: code.to_string(),
                });
            }
            table.append(symbol, code.to_string());
        }

        if table.code_of(EOF_SYMBOL).is_none() {
            warn!("Code table has no end-of-stream symbol");
        }
        debug!("Read a code table of {} records", table.len());
        Ok(table)
    }
}

/// Parse a symbol line, keeping the line number for the error.
fn parse_symbol(text: &str, line: usize) -> Result<Symbol> {
    let value: u64 = text.parse().map_err(|_| HuffError::BadSymbol {
        line,
        text: text.to_string(),
    })?;
    if value > EOF_SYMBOL as u64 {
        return Err(HuffError::SymbolOutOfRange {
            line,
            symbol: value,
        });
    }
    Ok(value as Symbol)
}

impl Display for CodeTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry.symbol)?;
            writeln!(f, "{}", entry.code)?;
        }
        Ok(())
    }
}

impl FromStr for CodeTable {
    type Err = HuffError;

    fn from_str(s: &str) -> Result<Self> {
        CodeTable::read_from(s.as_bytes())
    }
}

impl<'a> IntoIterator for &'a CodeTable {
    type Item = &'a CodeEntry;
    type IntoIter = std::slice::Iter<'a, CodeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl HuffmanTree {
    /// Walk the tree depth first, left before right, and record the path to every leaf.
    /// '0' is a step left, '1' a step right.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let mut path = String::with_capacity(32);
        collect_codes(self.root(), &mut path, &mut table);
        debug!("Serialized {} codes", table.len());
        table
    }
}

/// Recursively extend the path, pushing a record at each leaf.
fn collect_codes(node: &Node, path: &mut String, table: &mut CodeTable) {
    match node {
        Node::Kids(left, right) => {
            path.push('0');
            collect_codes(left, path, table);
            path.pop();
            path.push('1');
            collect_codes(right, path, table);
            path.pop();
        }
        Node::Leaf(sym) => table.append(*sym, path.clone()),
    }
}
