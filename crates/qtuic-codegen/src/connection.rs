//! Signal/slot wiring.
//!
//! A connection whose slot takes exactly the signal's arguments is a direct
//! `Connect<Signal>(receiver.<Slot>)`. A slot taking a leading subset of
//! them gets an adapter closure that drops the trailing arguments.

use qtuic_parser::ast::{Connection, Document};

use crate::names::to_camel_case;
use crate::{CompilationContext, Diagnostic};

/// A parsed `name(type, type)` signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    /// Normalized Qt parameter types (`const QString &` reads `QString`).
    pub params: Vec<String>,
}

pub fn parse_signature(signature: &str) -> Signature {
    let Some((name, rest)) = signature.split_once('(') else {
        return Signature {
            name: signature.trim().to_string(),
            params: Vec::new(),
        };
    };
    let args = rest.split(')').next().unwrap_or_default();
    let params = args
        .split(',')
        .map(normalize_type)
        .filter(|p| !p.is_empty())
        .collect();

    Signature {
        name: name.trim().to_string(),
        params,
    }
}

/// Strip `const`, references and spacing so equivalent spellings compare
/// equal.
fn normalize_type(param: &str) -> String {
    let param = param.trim();
    let param = param.strip_prefix("const ").unwrap_or(param);
    param
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '&')
        .collect()
}

/// Go type of a Qt signal parameter, plus the subpackage it needs.
pub fn go_type(qt_type: &str) -> (String, Option<&'static str>) {
    let scalar = match qt_type {
        "int" | "qint32" => Some("int"),
        "uint" | "quint32" => Some("uint"),
        "qint64" | "qlonglong" => Some("int64"),
        "quint64" | "qulonglong" => Some("uint64"),
        "bool" => Some("bool"),
        "double" | "qreal" => Some("float64"),
        "float" => Some("float32"),
        "QString" => Some("string"),
        "QStringList" => Some("[]string"),
        _ => None,
    };
    if let Some(scalar) = scalar {
        return (scalar.to_string(), None);
    }

    let class = qt_type.trim_end_matches('*');
    let package = match class {
        "QModelIndex" | "QPoint" | "QPointF" | "QSize" | "QRect" | "QUrl" | "QDate"
        | "QTime" | "QDateTime" | "QVariant" | "QObject" => Some("core"),
        "QColor" | "QFont" | "QIcon" | "QKeySequence" | "QPixmap" => Some("gui"),
        c if c.starts_with('Q') => Some("widgets"),
        _ => None,
    };
    match package {
        Some(package) => (format!("*{package}.{class}"), Some(package)),
        None => (qt_type.to_string(), None),
    }
}

/// Slot parameters declared as Go arguments, plus the subpackages they need.
pub fn declare_params(params: &[String]) -> (Vec<String>, Vec<&'static str>) {
    let mut declared = Vec::with_capacity(params.len());
    let mut imports = Vec::new();
    for (index, param) in params.iter().enumerate() {
        let (ty, package) = go_type(param);
        imports.extend(package);
        declared.push(format!("arg{index} {ty}"));
    }
    (declared, imports)
}

/// The slot must take a leading run of the signal's argument types.
fn compatible(signal: &Signature, slot: &Signature) -> bool {
    slot.params.len() <= signal.params.len()
        && slot.params.iter().zip(&signal.params).all(|(a, b)| a == b)
}

pub fn emit_connections(ctx: &mut CompilationContext, connections: &[Connection]) {
    for connection in connections {
        emit_connection(ctx, connection);
    }
}

fn emit_connection(ctx: &mut CompilationContext, connection: &Connection) {
    let signal = parse_signature(&connection.signal);
    let slot = parse_signature(&connection.slot);

    if !compatible(&signal, &slot) {
        ctx.diagnose(Diagnostic::ConnectionMismatch {
            sender: connection.sender.clone(),
            signal: connection.signal.clone(),
            receiver: connection.receiver.clone(),
            slot: connection.slot.clone(),
        });
        return;
    }

    let sender = ctx.object_expr(&connection.sender);
    let connect = format!("Connect{}", to_camel_case(&signal.name));
    let slot_name = to_camel_case(&slot.name);
    let receiver = if connection.receiver == ctx.root_name {
        ctx.root_slot(&slot_name, &slot.params);
        SLOTS_PARAM.to_string()
    } else {
        ctx.object_expr(&connection.receiver)
    };

    if slot.params.len() == signal.params.len() {
        ctx.streams
            .connections
            .push(format!("{sender}.{connect}({receiver}.{slot_name})"));
        return;
    }

    let (declared, imports) = declare_params(&signal.params);
    for package in imports {
        ctx.request_import(package);
    }
    let forwarded: Vec<String> = (0..slot.params.len()).map(|i| format!("arg{i}")).collect();

    ctx.streams.connections.push(format!(
        "{sender}.{connect}(func({}) {{\n\t{receiver}.{slot_name}({})\n}})",
        declared.join(", "),
        forwarded.join(", ")
    ));
}

/// `SetupUI` parameter that receives slots connected on the root widget.
pub const SLOTS_PARAM: &str = "slots";

/// Connections on the root widget that survive the argument check.
pub fn root_connections(doc: &Document) -> impl Iterator<Item = &Connection> {
    doc.connections.iter().filter(|c| {
        c.receiver == doc.widget.name
            && compatible(&parse_signature(&c.signal), &parse_signature(&c.slot))
    })
}

/// True when some connection targets the root widget, which then has to be
/// subclassed to implement the slot.
pub fn needs_subclass(doc: &Document) -> bool {
    root_connections(doc).next().is_some()
}
