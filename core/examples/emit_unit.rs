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

use sable_core::array::Dims;
use sable_core::codegen::CodeEmitter;
use sable_core::functions::{self, Function, Parameter};
use sable_core::symbols::{Declaration, InitData, SymbolTable};
use sable_core::types::Value;

// Drives the semantic core the way the front-end would: declare, resolve,
// then emit one class unit to stdout.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut symbols = SymbolTable::new();
    symbols.insert(
        Declaration::scalar("greeting", "text")
            .with_init(InitData::Scalar(Value::Text("hello".into()))),
    )?;

    let mut dims = Dims::new(2)?;
    dims.append(3)?;
    symbols.insert(
        Declaration::array("grid", "int", dims).with_init(InitData::Sequence(vec![
            Value::Int(1),
            Value::Int(2),
            Value::Int(3),
            Value::Int(4),
        ])),
    )?;
    print!("{}", symbols.dump_scope());

    functions::global().lock().unwrap().insert(Function {
        name: "area".into(),
        return_type: "int".into(),
        params: vec![
            Parameter {
                name: "w".into(),
                type_tag: "int".into(),
            },
            Parameter {
                name: "h".into(),
                type_tag: "int".into(),
            },
        ],
    });

    let mut emitter = CodeEmitter::new(Vec::new(), "Example")?;
    emitter.emit_field("greeting", "java.lang.String", None)?;
    emitter.emit_method_start("main", "void", "")?;
    emitter.emit_return()?;
    emitter.emit_method_end()?;
    let unit = emitter.finish()?;
    print!("{}", String::from_utf8(unit)?);
    Ok(())
}
