use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Fixed operand-stack budget emitted for every method.
pub const MAX_STACK: u32 = 15;
/// Fixed local-slot budget emitted for every method.
pub const MAX_LOCALS: u32 = 15;
/// File extension of an emitted stack-machine assembly unit.
pub const UNIT_EXTENSION: &str = "sasm";

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("i/o failure while emitting: {0}")]
    Io(#[from] io::Error),
    #[error("{op} is not valid in the {state} state")]
    BadState { op: &'static str, state: EmitState },
}

/// Where the emitter currently sits in the class/method structure. The
/// closed-unit state needs no variant: `finish` consumes the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitState {
    InClass,
    InMethod,
}

impl fmt::Display for EmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitState::InClass => write!(f, "class body"),
            EmitState::InMethod => write!(f, "method body"),
        }
    }
}

/// Sequential writer for one compiled class unit. Every operation checks
/// the structural state, so a call sequence that would break class/method
/// nesting fails instead of producing malformed output.
pub struct CodeEmitter<W: Write> {
    out: W,
    depth: usize,
    state: EmitState,
}

impl CodeEmitter<BufWriter<File>> {
    /// Open `<stem>.sasm` on disk and emit the class header, using the
    /// stem as the class name.
    pub fn create(stem: &str) -> Result<Self, EmitError> {
        let path = PathBuf::from(format!("{}.{}", stem, UNIT_EXTENSION));
        let file = BufWriter::new(File::create(path)?);
        CodeEmitter::new(file, stem)
    }
}

impl<W: Write> CodeEmitter<W> {
    /// Emit the class header and enter the class body at depth 1.
    pub fn new(mut out: W, class_name: &str) -> Result<Self, EmitError> {
        writeln!(out, "class {}", class_name)?;
        writeln!(out, "{{")?;
        Ok(CodeEmitter {
            out,
            depth: 1,
            state: EmitState::InClass,
        })
    }

    /// Current nesting depth: the number of open class/method blocks.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn state(&self) -> EmitState {
        self.state
    }

    fn expect(&self, op: &'static str, wanted: EmitState) -> Result<(), EmitError> {
        if self.state == wanted {
            Ok(())
        } else {
            Err(EmitError::BadState {
                op,
                state: self.state,
            })
        }
    }

    // four spaces per nesting level, before every line
    fn line(&mut self, text: &str) -> io::Result<()> {
        for _ in 0..self.depth {
            self.out.write_all(b"    ")?;
        }
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// `field static <type> <name> [= <value>]` at the current depth.
    pub fn emit_field(&mut self, name: &str, ty: &str, value: Option<&str>) -> Result<(), EmitError> {
        self.expect("emit_field", EmitState::InClass)?;
        match value {
            Some(v) => self.line(&format!("field static {} {} = {}", ty, name, v))?,
            None => self.line(&format!("field static {} {}", ty, name))?,
        }
        Ok(())
    }

    /// Method header, the fixed resource budgets, and the opening brace.
    /// `main` always gets the platform entry signature regardless of the
    /// supplied return type and parameters.
    pub fn emit_method_start(
        &mut self,
        name: &str,
        return_type: &str,
        params: &str,
    ) -> Result<(), EmitError> {
        self.expect("emit_method_start", EmitState::InClass)?;
        if name == "main" {
            self.line("method public static void main(java.lang.String[])")?;
        } else {
            self.line(&format!(
                "method public static {} {}({})",
                return_type, name, params
            ))?;
        }
        self.line(&format!("max_stack {}", MAX_STACK))?;
        self.line(&format!("max_locals {}", MAX_LOCALS))?;
        self.line("{")?;
        self.depth += 1;
        self.state = EmitState::InMethod;
        Ok(())
    }

    /// One body instruction at the current depth.
    pub fn emit_instruction(&mut self, instruction: &str) -> Result<(), EmitError> {
        self.expect("emit_instruction", EmitState::InMethod)?;
        self.line(instruction)?;
        Ok(())
    }

    pub fn emit_return(&mut self) -> Result<(), EmitError> {
        self.expect("emit_return", EmitState::InMethod)?;
        self.line("return")?;
        Ok(())
    }

    /// Close the method body; the depth decrement saturates at zero.
    pub fn emit_method_end(&mut self) -> Result<(), EmitError> {
        self.expect("emit_method_end", EmitState::InMethod)?;
        self.depth = self.depth.saturating_sub(1);
        self.line("}")?;
        self.state = EmitState::InClass;
        Ok(())
    }

    /// Emit the class footer, flush, and hand back the output unit.
    pub fn finish(mut self) -> Result<W, EmitError> {
        self.expect("finish", EmitState::InClass)?;
        self.depth = self.depth.saturating_sub(1);
        self.line("}")?;
        self.out.flush()?;
        Ok(self.out)
    }
}
