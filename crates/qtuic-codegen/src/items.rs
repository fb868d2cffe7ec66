//! Items of combo boxes, list, table and tree widgets.
//!
//! Items are built in `SetupUI` through a shared scratch variable and their
//! texts are set again in `RetranslateUi`, where each item has to be found
//! through its widget (`Item(3)`, `TopLevelItem(0).Child(1)`, ...).

use qtuic_parser::ast::{HeaderSection, Property, PropertyValue, Widget, WidgetItem};

use crate::names::setter_name;
use crate::property::{emit_icon, emit_property, Target};
use crate::temps::HelperTemp;
use crate::{CompilationContext, Diagnostic};

pub fn emit_combo_box(ctx: &mut CompilationContext, expr: &str, widget: &Widget) {
    for (index, item) in widget.items.iter().enumerate() {
        let icon = item.properties.iter().find_map(|p| match &p.value {
            PropertyValue::Icon(icon) if p.name == "icon" => Some(icon),
            _ => None,
        });

        ctx.request_import("core");
        match icon {
            Some(icon) => {
                emit_icon(ctx, icon);
                ctx.setup(format!("{expr}.AddItem2(icon, \"\", core.NewQVariant())"));
            }
            None => ctx.setup(format!("{expr}.AddItem(\"\", core.NewQVariant())")),
        }

        let index_arg = format!("{index}, ");
        for prop in &item.properties {
            match prop.name.as_str() {
                "text" => {
                    let text = Property::new("itemText", prop.value.clone());
                    emit_property(ctx, Target::same(expr), &text, &index_arg);
                }
                "icon" => {}
                _ => ctx.diagnose(Diagnostic::UnknownItemProperty {
                    container: widget.class.clone(),
                    property: prop.name.clone(),
                }),
            }
        }
    }
}

pub fn emit_list_widget(ctx: &mut CompilationContext, expr: &str, widget: &Widget) {
    if widget.items.is_empty() {
        return;
    }

    let item_var = ctx.ensure_temp(HelperTemp::ListItem);
    ctx.begin_unsorted(expr);
    for (index, item) in widget.items.iter().enumerate() {
        ctx.setup(format!("{item_var} = widgets.NewQListWidgetItem(nil, 0)"));
        ctx.setup(format!("{expr}.AddItem2({item_var})"));

        let lookup = format!("{expr}.Item({index})");
        let target = Target {
            setup: item_var,
            retranslate: &lookup,
        };
        for prop in &item.properties {
            emit_property(ctx, target, prop, "");
        }
    }
    ctx.end_unsorted(expr);
}

pub fn emit_table_widget(ctx: &mut CompilationContext, expr: &str, widget: &Widget) {
    if !widget.columns.is_empty() {
        ctx.setup(format!("{expr}.SetColumnCount({})", widget.columns.len()));
    }
    if !widget.rows.is_empty() {
        ctx.setup(format!("{expr}.SetRowCount({})", widget.rows.len()));
    }

    emit_table_headers(ctx, expr, "Vertical", &widget.rows);
    emit_table_headers(ctx, expr, "Horizontal", &widget.columns);

    if widget.items.is_empty() {
        return;
    }

    let item_var = ctx.ensure_temp(HelperTemp::TableItem);
    ctx.begin_unsorted(expr);
    for item in &widget.items {
        let (row, column) = (item.row, item.column);
        ctx.setup(format!("{item_var} = widgets.NewQTableWidgetItem(0)"));
        ctx.setup(format!("{expr}.SetItem({row}, {column}, {item_var})"));

        let lookup = format!("{expr}.Item({row}, {column})");
        let target = Target {
            setup: item_var,
            retranslate: &lookup,
        };
        for prop in &item.properties {
            emit_property(ctx, target, prop, "");
        }
    }
    ctx.end_unsorted(expr);
}

/// `orientation` is `Vertical` for rows and `Horizontal` for columns.
fn emit_table_headers(
    ctx: &mut CompilationContext,
    expr: &str,
    orientation: &str,
    sections: &[HeaderSection],
) {
    if sections.is_empty() {
        return;
    }

    let item_var = ctx.ensure_temp(HelperTemp::TableItem);
    for (index, section) in sections.iter().enumerate() {
        ctx.setup(format!("{item_var} = widgets.NewQTableWidgetItem(0)"));
        ctx.setup(format!(
            "{expr}.Set{orientation}HeaderItem({index}, {item_var})"
        ));

        let lookup = format!("{expr}.{orientation}HeaderItem({index})");
        let target = Target {
            setup: item_var,
            retranslate: &lookup,
        };
        for prop in &section.properties {
            emit_property(ctx, target, prop, "");
        }
    }
}

/// Header attributes of table and tree widgets (`horizontalHeaderVisible`,
/// `headerStretchLastSection`, ...) become setters on the header view.
pub fn emit_header_attribute(
    ctx: &mut CompilationContext,
    expr: &str,
    widget: &Widget,
    attr: &Property,
) {
    let name = attr.name.as_str();
    let header = match widget.class.as_str() {
        "QTreeWidget" => name.strip_prefix("header").map(|rest| ("Header", rest)),
        "QTableWidget" => name
            .strip_prefix("horizontalHeader")
            .map(|rest| ("HorizontalHeader", rest))
            .or_else(|| {
                name.strip_prefix("verticalHeader")
                    .map(|rest| ("VerticalHeader", rest))
            }),
        _ => None,
    };

    let value = match &attr.value {
        PropertyValue::Number(n) => Some(n.to_string()),
        PropertyValue::Bool(b) => Some(b.to_string()),
        _ => None,
    };

    match (header, value) {
        (Some((header, property)), Some(value)) if !property.is_empty() => {
            let setter = match property {
                "ShowSortIndicator" => "SetSortIndicatorShown".to_string(),
                _ => setter_name(property),
            };
            ctx.setup(format!("{expr}.{header}().{setter}({value})"));
        }
        _ => ctx.diagnose(Diagnostic::UnsupportedAttribute {
            attribute: attr.name.clone(),
            class: widget.class.clone(),
        }),
    }
}

// =========================================================================
// Tree widgets
// =========================================================================

pub fn emit_tree_widget(ctx: &mut CompilationContext, expr: &str, widget: &Widget) {
    if widget.columns.is_empty() && widget.items.is_empty() {
        return;
    }

    ctx.begin_unsorted(expr);

    let header = format!("{expr}.HeaderItem()");
    for (column, section) in widget.columns.iter().enumerate() {
        let column_arg = format!("{column}, ");
        for prop in &section.properties {
            emit_property(ctx, Target::same(&header), prop, &column_arg);
        }
    }

    for (index, item) in widget.items.iter().enumerate() {
        let lookup = format!("{expr}.TopLevelItem({index})");
        emit_tree_item(ctx, &lookup, &format!("widgets.NewQTreeWidgetItem3({expr}, 0)"), item);
    }

    ctx.end_unsorted(expr);
}

/// Stand-in for the item variable while its setters are generated.
const PENDING_ITEM: &str = "treeItem?";

/// Build one item from `constructor`, then its children.
///
/// An item is bound to a `treeItemN` variable only when something reads it:
/// a child constructor or a setter that ends up in `SetupUI`. Everything
/// else (translatable texts, properties dropped with a diagnostic) leaves
/// the item anonymous. A variable is held for as long as its subtree is
/// being emitted.
fn emit_tree_item(ctx: &mut CompilationContext, lookup: &str, constructor: &str, item: &WidgetItem) {
    let mark = ctx.streams.setup.len();
    let target = Target {
        setup: PENDING_ITEM,
        retranslate: lookup,
    };
    emit_tree_item_props(ctx, target, item);
    let body = ctx.streams.setup.split_off(mark);

    let pending = format!("{PENDING_ITEM}.");
    if item.items.is_empty() && !body.iter().any(|s| s.starts_with(&pending)) {
        ctx.setup(constructor);
        ctx.streams.setup.extend(body);
        return;
    }

    let var = ctx.acquire_tree_item();
    ctx.setup(format!("{var} = {constructor}"));
    for statement in body {
        match statement.strip_prefix(PENDING_ITEM) {
            Some(rest) if rest.starts_with('.') => ctx.setup(format!("{var}{rest}")),
            _ => ctx.setup(statement),
        }
    }

    for (index, child) in item.items.iter().enumerate() {
        let child_lookup = format!("{lookup}.Child({index})");
        let child_constructor = format!("widgets.NewQTreeWidgetItem6({var}, 0)");
        emit_tree_item(ctx, &child_lookup, &child_constructor, child);
    }

    ctx.release_tree_item(&var);
}

/// Each `text` property opens the next column; other properties apply to
/// the column opened last.
fn emit_tree_item_props(ctx: &mut CompilationContext, target: Target<'_>, item: &WidgetItem) {
    let mut column: i32 = -1;
    for prop in &item.properties {
        if prop.name == "text" {
            column += 1;
            if matches!(&prop.value, PropertyValue::String(text) if text.value.is_empty()) {
                continue;
            }
        }
        let column_arg = format!("{}, ", column.max(0));
        emit_property(ctx, target, prop, &column_arg);
    }
}
