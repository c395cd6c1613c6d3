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

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// One formal parameter of a declared function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_tag: String,
}

/// A declared function signature. Type tags stay strings here: the
/// registry stores them for the type-checker and never dispatches on
/// them, and return tags such as `void` fall outside the scalar types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Parameter>,
}

/// Flat, unscoped store of function signatures for call-site resolution.
/// Parameter order is preserved for positional argument checking.
#[derive(Debug, Default)]
pub struct FunctionTable {
    entries: HashMap<String, Vec<Function>>,
}

impl FunctionTable {
    pub fn new() -> FunctionTable {
        FunctionTable::default()
    }

    /// No duplicate-name check: a re-declared name shadows the previous
    /// entry, which stays owned by the table until teardown.
    pub fn insert(&mut self, function: Function) {
        self.entries
            .entry(function.name.clone())
            .or_default()
            .push(function);
    }

    /// Newest declaration for `name`, or `None`.
    pub fn lookup(&self, name: &str) -> Option<&Function> {
        self.entries.get(name).and_then(|decls| decls.last())
    }

    /// Number of distinct declared names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

lazy_static! {
    /// Process-global registry, torn down once at program end.
    static ref GLOBAL_FUNCTIONS: Mutex<FunctionTable> = Mutex::new(FunctionTable::new());
}

pub fn global() -> &'static Mutex<FunctionTable> {
    &GLOBAL_FUNCTIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(name: &str, return_type: &str, params: &[(&str, &str)]) -> Function {
        Function {
            name: name.to_string(),
            return_type: return_type.to_string(),
            params: params
                .iter()
                .map(|(n, t)| Parameter {
                    name: n.to_string(),
                    type_tag: t.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_round_trip_preserves_signature() {
        let mut table = FunctionTable::new();
        table.insert(signature("area", "int", &[("w", "int"), ("h", "int")]));

        let found = table.lookup("area").unwrap();
        assert_eq!(found.return_type, "int");
        assert_eq!(found.params.len(), 2);
        assert_eq!(found.params[0].name, "w");
        assert_eq!(found.params[1].name, "h");
    }

    #[test]
    fn test_absent_name_is_not_found() {
        let table = FunctionTable::new();
        assert!(table.lookup("missing").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_redeclaration_shadows_newest_first() {
        let mut table = FunctionTable::new();
        table.insert(signature("f", "int", &[]));
        table.insert(signature("f", "real", &[("x", "real")]));

        let found = table.lookup("f").unwrap();
        assert_eq!(found.return_type, "real");
        assert_eq!(found.params.len(), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_global_registry_is_shared() {
        {
            let mut registry = global().lock().unwrap();
            registry.insert(signature("entry", "void", &[]));
        }
        let registry = global().lock().unwrap();
        assert_eq!(registry.lookup("entry").unwrap().return_type, "void");
    }
}
