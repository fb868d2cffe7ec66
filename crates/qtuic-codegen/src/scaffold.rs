//! Companion `main.go` that runs a generated form.
//!
//! When a connection targets the root widget, the root class is embedded in
//! a `Window` type so the slot can be overridden there. Otherwise the window
//! just holds the root widget by pointer.

use std::collections::BTreeSet;

use qtuic_parser::ast::Document;

use crate::connection::{declare_params, needs_subclass, parse_signature, root_connections};
use crate::names::to_camel_case;

/// Generate the scaffold for a compiled document.
///
/// `go_package` is the import path of the package holding the generated
/// code; without it the scaffold refers to `UI<ClassName>` unqualified.
pub fn generate(doc: &Document, class_name: &str, go_package: Option<&str>) -> String {
    let root_class = doc.widget.class.as_str();
    let window_type = match root_class {
        "QMainWindow" => "Window",
        class => class.strip_prefix('Q').unwrap_or(class),
    };

    let package = go_package.filter(|p| !p.is_empty());
    let qualifier = package
        .and_then(|p| p.rsplit('/').next())
        .map(|base| format!("{base}."))
        .unwrap_or_default();
    let ui_type = format!("{qualifier}UI{class_name}");

    let subclass = needs_subclass(doc);
    let (slots, mut imports) = if subclass {
        slot_overrides(doc)
    } else {
        (Vec::new(), BTreeSet::new())
    };
    imports.insert("core");
    imports.insert("widgets");

    let mut out = String::new();
    out.push_str("package main\n\nimport (\n\t\"os\"\n\n");
    for import in &imports {
        out.push_str(&format!("\t\"github.com/therecipe/qt/{import}\"\n"));
    }
    if let Some(package) = package {
        out.push_str(&format!("\n\t\"{package}\"\n"));
    }
    out.push_str(")\n\n");

    if subclass {
        out.push_str("//go:generate qtmoc\n");
        out.push_str(&format!(
            "type Window struct {{\n\twidgets.{root_class}\n\t{ui_type}\n}}\n\n"
        ));
        out.push_str("func NewWidget(parent widgets.QWidget_ITF) *Window {\n");
        out.push_str(&format!(
            "\twindow := NewWindow(parent, core.Qt__{window_type})\n"
        ));
        out.push_str(&format!("\twindow.SetupUI(&window.{root_class}, window)\n"));
        out.push_str("\treturn window\n}\n\n");
        for slot in &slots {
            out.push_str(slot);
            out.push_str("\n\n");
        }
        out.push_str(MAIN_SUBCLASSED);
    } else {
        out.push_str(&format!(
            "type Window struct {{\n\t{ui_type}\n\tWidget *widgets.{root_class}\n}}\n\n"
        ));
        out.push_str("func NewWidget(parent widgets.QWidget_ITF) *Window {\n");
        out.push_str(&format!(
            "\twindow := &Window{{\n\t\tWidget: widgets.New{root_class}(parent, core.Qt__{window_type}),\n\t}}\n"
        ));
        out.push_str("\twindow.SetupUI(window.Widget)\n");
        out.push_str("\treturn window\n}\n\n");
        out.push_str(MAIN_WRAPPED);
    }

    out
}

const MAIN_SUBCLASSED: &str = "func main() {
\tapp := widgets.NewQApplication(len(os.Args), os.Args)
\tw := NewWidget(nil)
\tw.Show()

\tos.Exit(app.Exec())
}
";

const MAIN_WRAPPED: &str = "func main() {
\tapp := widgets.NewQApplication(len(os.Args), os.Args)
\tw := NewWidget(nil)
\tw.Widget.Show()

\tos.Exit(app.Exec())
}
";

/// One forwarding override per distinct slot connected on the root.
fn slot_overrides(doc: &Document) -> (Vec<String>, BTreeSet<&'static str>) {
    let root_class = &doc.widget.class;
    let mut seen = BTreeSet::new();
    let mut imports = BTreeSet::new();
    let mut slots = Vec::new();

    for connection in root_connections(doc) {
        let slot = parse_signature(&connection.slot);
        let method = to_camel_case(&slot.name);
        if !seen.insert(method.clone()) {
            continue;
        }

        let (declared, packages) = declare_params(&slot.params);
        imports.extend(packages);
        let forwarded: Vec<String> = (0..slot.params.len()).map(|i| format!("arg{i}")).collect();

        slots.push(format!(
            "func (this *Window) {method}({}) {{\n\tthis.{root_class}.{method}({})\n}}",
            declared.join(", "),
            forwarded.join(", ")
        ));
    }

    (slots, imports)
}
