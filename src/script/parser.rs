use std::path::PathBuf;

use crate::foundation::core::DVec3;
use crate::foundation::error::{MdlError, MdlResult};
use crate::foundation::math::Axis;
use crate::script::command::Command;
use crate::script::lexer::{Keyword, Span, Token, TokenKind, lex};
use crate::script::symbols::{Material, Reflectance, SymbolTable};
use crate::script::Script;

pub(crate) fn parse_script(src: &str) -> MdlResult<Script> {
    let tokens = lex(src)?;
    let mut p = Parser {
        tokens,
        pos: 0,
        commands: Vec::new(),
        symbols: SymbolTable::new(),
    };
    p.parse_all()?;
    Ok(Script {
        commands: p.commands,
        symbols: p.symbols,
    })
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    commands: Vec<Command>,
    symbols: SymbolTable,
}

impl Parser {
    fn peek(&self) -> &Token {
        // `lex` always terminates the stream with `Eof`, and `bump` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Token {
        let t = self.peek().clone();
        if t.kind != TokenKind::Eof {
            self.pos += 1;
        }
        t
    }

    fn error(&self, span: Span, msg: impl std::fmt::Display) -> MdlError {
        MdlError::parse(format!("{msg} at {span}"))
    }

    fn number(&mut self, what: &str) -> MdlResult<f64> {
        let t = self.bump();
        match t.kind {
            TokenKind::Number(v) => Ok(v),
            other => Err(self.error(
                t.span,
                format!("expected {what} (number), found {}", other.describe()),
            )),
        }
    }

    fn integer(&mut self, what: &str) -> MdlResult<i64> {
        let span = self.peek().span;
        let v = self.number(what)?;
        if v.fract() != 0.0 || !v.is_finite() || v.abs() > i64::MAX as f64 {
            return Err(self.error(span, format!("expected {what} to be an integer, found {v}")));
        }
        Ok(v as i64)
    }

    fn vec3(&mut self, what: &str) -> MdlResult<DVec3> {
        let x = self.number(what)?;
        let y = self.number(what)?;
        let z = self.number(what)?;
        Ok(DVec3::new(x, y, z))
    }

    fn word(&mut self, what: &str) -> MdlResult<String> {
        let t = self.bump();
        match t.kind {
            TokenKind::Word(w) => Ok(w),
            other => Err(self.error(
                t.span,
                format!("expected {what}, found {}", other.describe()),
            )),
        }
    }

    /// Consume a trailing name if the next token is a plain word (never a keyword).
    fn optional_word(&mut self) -> Option<String> {
        match &self.peek().kind {
            TokenKind::Word(w) => {
                let w = w.clone();
                self.bump();
                Some(w)
            }
            _ => None,
        }
    }

    fn skip_coord_system(&mut self, op: &str) {
        if let Some(cs) = self.optional_word() {
            tracing::debug!(op, coord_system = %cs, "ignoring coordinate system reference");
        }
    }

    fn parse_all(&mut self) -> MdlResult<()> {
        loop {
            let t = self.bump();
            match t.kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Keyword(k) => self.parse_command(k)?,
                other => {
                    return Err(self.error(
                        t.span,
                        format!("expected a command, found {}", other.describe()),
                    ));
                }
            }
        }
    }

    fn parse_command(&mut self, keyword: Keyword) -> MdlResult<()> {
        let cmd = match keyword {
            Keyword::Frames => Command::Frames {
                count: self.integer("frame count")?,
            },
            Keyword::Basename => Command::Basename {
                name: self.word("base name")?,
            },
            Keyword::Vary => Command::Vary {
                knob: self.word("knob name")?,
                start_frame: self.integer("start frame")?,
                end_frame: self.integer("end frame")?,
                start_value: self.number("start value")?,
                end_value: self.number("end value")?,
            },
            Keyword::Box => {
                let constants = self.optional_word();
                let corner = self.vec3("box corner")?;
                let size = self.vec3("box size")?;
                self.skip_coord_system("box");
                Command::Box {
                    constants,
                    corner,
                    size,
                }
            }
            Keyword::Sphere => {
                let constants = self.optional_word();
                let center = self.vec3("sphere center")?;
                let radius = self.number("sphere radius")?;
                self.skip_coord_system("sphere");
                Command::Sphere {
                    constants,
                    center,
                    radius,
                }
            }
            Keyword::Torus => {
                let constants = self.optional_word();
                let center = self.vec3("torus center")?;
                let tube_radius = self.number("torus tube radius")?;
                let major_radius = self.number("torus major radius")?;
                self.skip_coord_system("torus");
                Command::Torus {
                    constants,
                    center,
                    tube_radius,
                    major_radius,
                }
            }
            Keyword::Line => {
                if let Some(constants) = self.optional_word() {
                    tracing::debug!(%constants, "lines are unlit; ignoring constants");
                }
                let from = self.vec3("line start")?;
                let to = self.vec3("line end")?;
                Command::Line { from, to }
            }
            Keyword::Move => Command::Move {
                offset: self.vec3("translation")?,
                knob: self.optional_word(),
            },
            Keyword::Scale => Command::Scale {
                factors: self.vec3("scale factor")?,
                knob: self.optional_word(),
            },
            Keyword::Rotate => {
                let axis = match &self.peek().kind {
                    TokenKind::Word(tag) => {
                        let span = self.peek().span;
                        let axis = Axis::from_tag(tag).ok_or_else(|| {
                            self.error(span, format!("rotation axis must be x, y or z, found '{tag}'"))
                        })?;
                        self.bump();
                        axis
                    }
                    _ => Axis::default(),
                };
                Command::Rotate {
                    axis,
                    degrees: self.number("rotation angle")?,
                    knob: self.optional_word(),
                }
            }
            Keyword::Push => Command::Push,
            Keyword::Pop => Command::Pop,
            Keyword::Display => Command::Display,
            Keyword::Save => Command::Save {
                path: PathBuf::from(self.word("output path")?),
            },
            Keyword::Constants => {
                self.parse_constants()?;
                return Ok(());
            }
        };
        self.commands.push(cmd);
        Ok(())
    }

    fn parse_constants(&mut self) -> MdlResult<()> {
        let name = self.word("constants name")?;
        let channel = |p: &mut Self| -> MdlResult<Reflectance> {
            Ok(Reflectance {
                ambient: p.number("ambient reflection")?,
                diffuse: p.number("diffuse reflection")?,
                specular: p.number("specular reflection")?,
            })
        };
        let red = channel(self)?;
        let green = channel(self)?;
        let blue = channel(self)?;

        // Optional initial intensities (r g b) are accepted for compatibility and unused.
        let mut extra = 0;
        while extra < 3 && matches!(self.peek().kind, TokenKind::Number(_)) {
            self.bump();
            extra += 1;
        }
        if extra > 0 {
            tracing::debug!(%name, extra, "ignoring initial intensities in constants");
        }

        self.symbols.define_material(name, Material { red, green, blue });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/parser.rs"]
mod tests;
