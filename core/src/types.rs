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

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar element types of the Sable language.
///
/// The front-end hands over type tags as strings; they are parsed exactly
/// once (`Ty::from_tag`) and every later dispatch is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ty {
    Bool,
    Int,
    Real,
    Text,
}

impl Ty {
    /// Parse a front-end type tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Ty> {
        match tag {
            "bool" => Some(Ty::Bool),
            "int" => Some(Ty::Int),
            "real" | "float" | "double" => Some(Ty::Real),
            "text" | "string" | "char" => Some(Ty::Text),
            _ => None,
        }
    }

    /// Fixed storage size of one leaf element of this type, in bytes.
    pub fn element_size(&self) -> usize {
        match self {
            Ty::Bool => std::mem::size_of::<bool>(),
            Ty::Int => std::mem::size_of::<i64>(),
            Ty::Real => std::mem::size_of::<f64>(),
            Ty::Text => std::mem::size_of::<String>(),
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Bool => write!(f, "bool"),
            Ty::Int => write!(f, "int"),
            Ty::Real => write!(f, "real"),
            Ty::Text => write!(f, "text"),
        }
    }
}

/// A scalar value carrying its own type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn ty(&self) -> Ty {
        match self {
            Value::Bool(_) => Ty::Bool,
            Value::Int(_) => Ty::Int,
            Value::Real(_) => Ty::Real,
            Value::Text(_) => Ty::Text,
        }
    }

    /// Declaration-time default: false, 0, 0.0, or the empty string.
    pub fn default_for(ty: Ty) -> Value {
        match ty {
            Ty::Bool => Value::Bool(false),
            Ty::Int => Value::Int(0),
            Ty::Real => Value::Real(0.0),
            Ty::Text => Value::Text(String::new()),
        }
    }

    /// Convert to `ty` where a conversion exists: identity for matching
    /// types, widening/truncation between int and real, `None` otherwise.
    pub fn convert_to(&self, ty: Ty) -> Option<Value> {
        match (self, ty) {
            (Value::Int(i), Ty::Real) => Some(Value::Real(*i as f64)),
            (Value::Real(r), Ty::Int) => Some(Value::Int(*r as i64)),
            (v, t) if v.ty() == t => Some(v.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing() {
        assert_eq!(Ty::from_tag("bool"), Some(Ty::Bool));
        assert_eq!(Ty::from_tag("int"), Some(Ty::Int));
        assert_eq!(Ty::from_tag("real"), Some(Ty::Real));
        assert_eq!(Ty::from_tag("text"), Some(Ty::Text));
        // aliases the front-end may surface
        assert_eq!(Ty::from_tag("float"), Some(Ty::Real));
        assert_eq!(Ty::from_tag("double"), Some(Ty::Real));
        assert_eq!(Ty::from_tag("string"), Some(Ty::Text));
        assert_eq!(Ty::from_tag("char"), Some(Ty::Text));
        assert_eq!(Ty::from_tag("quaternion"), None);
        assert_eq!(Ty::from_tag(""), None);
    }

    #[test]
    fn test_display_round_trips_through_from_tag() {
        for ty in [Ty::Bool, Ty::Int, Ty::Real, Ty::Text] {
            assert_eq!(Ty::from_tag(&ty.to_string()), Some(ty));
        }
    }

    #[test]
    fn test_declaration_defaults() {
        assert_eq!(Value::default_for(Ty::Bool), Value::Bool(false));
        assert_eq!(Value::default_for(Ty::Int), Value::Int(0));
        assert_eq!(Value::default_for(Ty::Real), Value::Real(0.0));
        assert_eq!(Value::default_for(Ty::Text), Value::Text(String::new()));
    }

    #[test]
    fn test_numeric_conversion() {
        assert_eq!(Value::Int(3).convert_to(Ty::Real), Some(Value::Real(3.0)));
        assert_eq!(Value::Real(2.9).convert_to(Ty::Int), Some(Value::Int(2)));
        assert_eq!(Value::Int(7).convert_to(Ty::Int), Some(Value::Int(7)));
        assert_eq!(Value::Text("x".into()).convert_to(Ty::Int), None);
        assert_eq!(Value::Bool(true).convert_to(Ty::Real), None);
    }
}
