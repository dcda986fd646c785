//! Scene script model and parser.
//!
//! A script is a whitespace-separated stream of commands (`//` comments allowed). Parsing yields
//! the ordered [`Command`] list plus a [`SymbolTable`] holding every `constants` definition.

pub(crate) mod command;
pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod symbols;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::MdlResult;
use crate::script::command::Command;
use crate::script::symbols::SymbolTable;

/// A parsed scene script.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Commands in source order.
    pub commands: Vec<Command>,
    /// Materials defined by `constants`.
    pub symbols: SymbolTable,
}

impl Script {
    /// Parse script source text.
    pub fn parse(src: &str) -> MdlResult<Self> {
        parser::parse_script(src)
    }

    /// Read and parse a script file.
    pub fn from_path(path: impl AsRef<Path>) -> MdlResult<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read script '{}'", path.display()))?;
        Self::parse(&src)
    }
}
