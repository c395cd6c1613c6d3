/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Sable Sovereign Compiler.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 *
 * 1. OPEN SOURCE: You may use this file under the terms of the GNU Affero
 * General Public License v3.0. If you link to this code, your ENTIRE
 * application must be open-sourced under AGPLv3.
 *
 * 2. COMMERCIAL: For proprietary use, you must obtain a Commercial License
 * from Sovereign Systems.
 *
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 * NO IMPLIED LICENSE to rights of Mohamad Al-Zawahreh or Sovereign Systems.
 */

use crate::array::{ArrayError, Dims, Segment};
use crate::types::{Ty, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::slice;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("array declaration '{0}' carries no dimension list")]
    MissingDims(String),
    #[error(transparent)]
    Array(#[from] ArrayError),
}

/// Declaration-time initializer: a single scalar value, or an ordered
/// sequence consumed row-major by array leaf slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InitData {
    Scalar(Value),
    Sequence(Vec<Value>),
}

/// A declaration request handed over by the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub type_tag: String,
    pub is_const: bool,
    pub is_array: bool,
    pub dims: Option<Dims>,
    pub init: Option<InitData>,
}

impl Declaration {
    pub fn scalar(name: &str, type_tag: &str) -> Declaration {
        Declaration {
            name: name.to_string(),
            type_tag: type_tag.to_string(),
            is_const: false,
            is_array: false,
            dims: None,
            init: None,
        }
    }

    pub fn array(name: &str, type_tag: &str, dims: Dims) -> Declaration {
        Declaration {
            name: name.to_string(),
            type_tag: type_tag.to_string(),
            is_const: false,
            is_array: true,
            dims: Some(dims),
            init: None,
        }
    }

    pub fn constant(mut self) -> Declaration {
        self.is_const = true;
        self
    }

    pub fn with_init(mut self, init: InitData) -> Declaration {
        self.init = Some(init);
        self
    }
}

/// What a symbol owns: a scalar slot, or an array payload with its shape.
/// The scalar slot is absent when the declared tag is unknown.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    Scalar(Option<Value>),
    Array { dims: Dims, data: Segment },
}

/// One declared identifier. Name, type, and array-ness are fixed at
/// declaration; only the stored value may change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    name: String,
    type_tag: String,
    ty: Option<Ty>,
    is_const: bool,
    storage: Storage,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn ty(&self) -> Option<Ty> {
        self.ty
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn is_array(&self) -> bool {
        matches!(self.storage, Storage::Array { .. })
    }

    /// Current scalar value, if this is a scalar symbol with one.
    pub fn value(&self) -> Option<&Value> {
        match &self.storage {
            Storage::Scalar(value) => value.as_ref(),
            Storage::Array { .. } => None,
        }
    }

    /// Overwrite the scalar slot in place. No-op on array symbols.
    pub fn assign(&mut self, value: Value) {
        if let Storage::Scalar(slot) = &mut self.storage {
            *slot = Some(value);
        }
    }

    pub fn dims(&self) -> Option<&Dims> {
        match &self.storage {
            Storage::Array { dims, .. } => Some(dims),
            Storage::Scalar(_) => None,
        }
    }

    pub fn array(&self) -> Option<&Segment> {
        match &self.storage {
            Storage::Array { data, .. } => Some(data),
            Storage::Scalar(_) => None,
        }
    }

    pub fn array_mut(&mut self) -> Option<&mut Segment> {
        match &mut self.storage {
            Storage::Array { data, .. } => Some(data),
            Storage::Scalar(_) => None,
        }
    }
}

#[derive(Debug, Default)]
struct Scope {
    // declaration order; a shadowed same-name entry stays here, owned but
    // unreachable by name, until the frame pops
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl Scope {
    fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).and_then(|&i| self.symbols.get(i))
    }
}

/// Lexically scoped symbol store: an explicit stack of frames pushed on
/// scope entry and popped on exit. Resolution walks innermost-first, and
/// within a frame the newest declaration wins, which together realize
/// shadowing.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// A table holding only the root/global frame.
    pub fn new() -> SymbolTable {
        SymbolTable {
            scopes: vec![Scope::default()],
        }
    }

    /// Number of live frames, root included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
        log::debug!("enter scope (depth {})", self.scopes.len());
    }

    /// Pop the innermost frame, dropping every symbol it owns together
    /// with their payloads. A no-op at the root frame.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            log::debug!("exit scope (depth {})", self.scopes.len());
        }
    }

    /// Declare into the current frame only. No duplicate-name check: a
    /// same-scope redeclaration becomes the first match on lookup and the
    /// shadowed entry survives until the frame pops.
    pub fn insert(&mut self, decl: Declaration) -> Result<(), SymbolError> {
        let ty = Ty::from_tag(&decl.type_tag);
        let storage = if decl.is_array {
            let dims = decl
                .dims
                .ok_or_else(|| SymbolError::MissingDims(decl.name.clone()))?;
            let mut data = Segment::allocate(&decl.type_tag, &dims)?;
            match &decl.init {
                Some(InitData::Sequence(values)) => data.initialize(values),
                Some(InitData::Scalar(value)) => data.initialize(slice::from_ref(value)),
                None => {}
            }
            Storage::Array { dims, data }
        } else {
            // a dimension list supplied with a scalar declaration is
            // discarded here
            let value = match decl.init {
                Some(InitData::Scalar(value)) => Some(value),
                Some(InitData::Sequence(values)) => values.into_iter().next(),
                None => ty.map(Value::default_for),
            };
            Storage::Scalar(value)
        };

        let scope = self
            .scopes
            .last_mut()
            .expect("the root frame is never popped");
        let slot = scope.symbols.len();
        scope.index.insert(decl.name.clone(), slot);
        scope.symbols.push(Symbol {
            name: decl.name,
            type_tag: decl.type_tag,
            ty,
            is_const: decl.is_const,
            storage,
        });
        Ok(())
    }

    /// Nearest declaration of `name`, walking outward from the innermost
    /// frame.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// As `lookup`, restricted to the current frame. Callers use this to
    /// detect same-scope redeclaration when they care to.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.scopes.last().and_then(|scope| scope.get(name))
    }

    /// Mutable resolution for the front-end's assignment handling.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(&slot) = scope.index.get(name) {
                return scope.symbols.get_mut(slot);
            }
        }
        None
    }

    /// Diagnostic listing of every entry owned by the current frame, in
    /// declaration order, shadowed entries included.
    pub fn dump_scope(&self) -> String {
        let mut out = String::from("Symbol Table:\n");
        if let Some(scope) = self.scopes.last() {
            for symbol in &scope.symbols {
                let marker = if symbol.is_const { " (const)" } else { "" };
                let _ = writeln!(
                    out,
                    " Name: {}, Type: {}{}",
                    symbol.name, symbol.type_tag, marker
                );
            }
        }
        out
    }

    /// Structured form of `dump_scope` for external tooling.
    pub fn dump_scope_json(&self) -> serde_json::Value {
        let symbols: Vec<serde_json::Value> = self
            .scopes
            .last()
            .map(|scope| {
                scope
                    .symbols
                    .iter()
                    .map(|symbol| {
                        json!({
                            "name": symbol.name,
                            "type": symbol.type_tag,
                            "const": symbol.is_const,
                            "array": symbol.is_array(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        json!({ "depth": self.depth(), "symbols": symbols })
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
