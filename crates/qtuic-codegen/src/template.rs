//! Final Go file layout.

use crate::connection::SLOTS_PARAM;
use crate::CompilationContext;

const BANNER: &str = "// WARNING! All changes made in this file will be lost!";
const QT_MODULE: &str = "github.com/therecipe/qt";

/// Weave the statement streams into one Go source file.
pub fn assemble(ctx: &CompilationContext, package: &str, class_name: &str) -> String {
    let streams = &ctx.streams;
    let root = &ctx.root_var;
    let root_type = format!("*widgets.{}", ctx.root_class);
    let receiver = format!("func (this *UI{class_name})");

    let mut out = String::new();
    out.push_str(BANNER);
    out.push('\n');
    out.push_str(&format!("package {package}\n\n"));

    out.push_str("import (\n");
    for import in &ctx.imports {
        out.push_str(&format!("\t\"{QT_MODULE}/{import}\"\n"));
    }
    out.push_str(")\n\n");

    let mut setup_params = format!("{root} {root_type}");
    if !ctx.root_slots.is_empty() {
        out.push_str(&format!("type UI{class_name}Slots interface {{\n"));
        for (_, method) in &ctx.root_slots {
            out.push_str(&format!("\t{method}\n"));
        }
        out.push_str("}\n\n");
        setup_params.push_str(&format!(", {SLOTS_PARAM} UI{class_name}Slots"));
    }

    out.push_str(&format!("type UI{class_name} struct {{\n"));
    push_block(&mut out, &streams.declarations);
    out.push_str("}\n\n");

    out.push_str(&format!("{receiver} SetupUI({setup_params}) {{\n"));
    push_block(&mut out, &streams.setup);
    push_block(&mut out, &streams.add_actions);
    push_block(&mut out, &streams.buddies);
    out.push('\n');
    out.push_str(&format!("\tthis.RetranslateUi({root})\n"));
    push_block(&mut out, &streams.current_index);
    push_block(&mut out, &streams.tab_order);
    push_block(&mut out, &streams.connections);
    out.push_str("}\n\n");

    out.push_str(&format!("{receiver} RetranslateUi({root} {root_type}) {{\n"));
    if ctx.uses_translate {
        out.push_str("\t_translate := core.QCoreApplication_Translate\n");
    }
    push_block(&mut out, &streams.translate);
    out.push_str("}\n");

    out
}

/// One statement per line, every line of a statement indented one level.
fn push_block(out: &mut String, statements: &[String]) {
    for statement in statements {
        for line in statement.lines() {
            if !line.is_empty() {
                out.push('\t');
            }
            out.push_str(line);
            out.push('\n');
        }
    }
}
