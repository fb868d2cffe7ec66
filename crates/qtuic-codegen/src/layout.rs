//! Layouts, layout items and spacers.

use qtuic_parser::ast::{parse_stretch_list, Layout, LayoutChild, LayoutItem, PropertyValue, Spacer};

use crate::names::{quote, variable_name};
use crate::property::{emit_property, Target};
use crate::widget::emit_widget;
use crate::{CompilationContext, Diagnostic};

const MARGIN_PROPERTIES: [&str; 6] = [
    "margin",
    "leftMargin",
    "topMargin",
    "rightMargin",
    "bottomMargin",
    "spacing",
];

/// Emit a layout and everything it holds.
///
/// `owner` is the widget the layout's widgets are parented to. A top-level
/// layout is installed on `owner` by its constructor; a nested one is
/// created without a parent and attached by the enclosing layout.
pub fn emit_layout(ctx: &mut CompilationContext, owner: &str, layout: &Layout, nested: bool) {
    let var = variable_name(&layout.name);
    let class = layout.class.as_str();
    let expr = format!("this.{var}");

    ctx.request_import("widgets");
    ctx.declare(format!("{var} *widgets.{class}"));
    let ctor = match (layout.is_box(), nested) {
        (true, false) => format!("widgets.New{class}2({owner})"),
        (true, true) => format!("widgets.New{class}()"),
        (false, false) => format!("widgets.New{class}({owner})"),
        (false, true) => format!("widgets.New{class}(nil)"),
    };
    ctx.setup(format!("{expr} = {ctor}"));
    ctx.setup(format!("{expr}.SetObjectName({})", quote(&layout.name)));

    emit_margins(ctx, &expr, layout);
    for prop in &layout.properties {
        if MARGIN_PROPERTIES.contains(&prop.name.as_str()) || prop.name == "objectName" {
            continue;
        }
        emit_property(ctx, Target::same(&expr), prop, "");
    }

    for item in &layout.items {
        emit_layout_item(ctx, owner, &expr, layout, item);
    }

    let lists = [
        ("Stretch", &layout.stretch),
        ("ColumnStretch", &layout.column_stretch),
        ("RowStretch", &layout.row_stretch),
        ("RowMinimumHeight", &layout.row_minimum_height),
        ("ColumnMinimumWidth", &layout.column_minimum_width),
    ];
    for (setter, list) in lists {
        for (index, value) in parse_stretch_list(list).into_iter().enumerate() {
            if value > 0 {
                ctx.setup(format!("{expr}.Set{setter}({index}, {value})"));
            }
        }
    }
}

/// Contents margins and spacing.
///
/// Each side falls back to the legacy `margin` property and then to the
/// document's `<layoutdefault>`. Nothing is emitted for values that are
/// not set anywhere, so Qt's style defaults stay in effect.
fn emit_margins(ctx: &mut CompilationContext, expr: &str, layout: &Layout) {
    let number = |name: &str| match layout.properties.iter().find(|p| p.name == name) {
        Some(prop) => match prop.value {
            PropertyValue::Number(n) => Some(n),
            _ => None,
        },
        None => None,
    };

    let default = ctx.layout_default;
    let margin = number("margin").or(default.margin);
    let side = |name: &str| number(name).or(margin);
    let sides = [
        side("leftMargin"),
        side("topMargin"),
        side("rightMargin"),
        side("bottomMargin"),
    ];

    if sides.iter().any(Option::is_some) {
        let [left, top, right, bottom] = sides.map(|s| s.unwrap_or(0));
        ctx.setup(format!(
            "{expr}.SetContentsMargins({left}, {top}, {right}, {bottom})"
        ));
    }

    if let Some(spacing) = number("spacing").or(default.spacing) {
        ctx.setup(format!("{expr}.SetSpacing({spacing})"));
    }
}

fn emit_layout_item(
    ctx: &mut CompilationContext,
    owner: &str,
    layout_expr: &str,
    layout: &Layout,
    item: &LayoutItem,
) {
    let (kind, name) = match &item.child {
        LayoutChild::Layout(child) => {
            emit_layout(ctx, owner, child, true);
            ("Layout", variable_name(&child.name))
        }
        LayoutChild::Spacer(spacer) => {
            emit_spacer(ctx, spacer);
            ("Item", variable_name(&spacer.name))
        }
        LayoutChild::Widget(widget) => {
            emit_widget(ctx, owner, widget);
            ("Widget", variable_name(&widget.name))
        }
    };

    let rowspan = item.rowspan.unwrap_or(1);
    let colspan = item.colspan.unwrap_or(1);

    match layout.class.as_str() {
        "QVBoxLayout" | "QHBoxLayout" => match kind {
            "Widget" => {
                let alignment = alignment(ctx, item);
                ctx.setup(format!(
                    "{layout_expr}.AddWidget(this.{name}, 0, {alignment})"
                ));
            }
            "Layout" => ctx.setup(format!("{layout_expr}.AddLayout(this.{name}, 0)")),
            _ => ctx.setup(format!("{layout_expr}.AddItem(this.{name})")),
        },
        "QFormLayout" => {
            ctx.request_import("widgets");
            let role = if colspan >= 2 {
                "SpanningRole"
            } else if item.column == 0 {
                "LabelRole"
            } else {
                "FieldRole"
            };
            ctx.setup(format!(
                "{layout_expr}.Set{kind}({}, widgets.QFormLayout__{role}, this.{name})",
                item.row
            ));
        }
        "QGridLayout" => match kind {
            "Widget" => {
                let alignment = alignment(ctx, item);
                ctx.setup(format!(
                    "{layout_expr}.AddWidget3(this.{name}, {}, {}, {rowspan}, {colspan}, {alignment})",
                    item.row, item.column
                ));
            }
            "Layout" => {
                let alignment = alignment(ctx, item);
                ctx.setup(format!(
                    "{layout_expr}.AddLayout2(this.{name}, {}, {}, {rowspan}, {colspan}, {alignment})",
                    item.row, item.column
                ));
            }
            _ => {
                ctx.diagnose(Diagnostic::UnsupportedLayoutItem {
                    layout_class: layout.class.clone(),
                    child: name.clone(),
                    kind: "spacer",
                });
                ctx.setup(format!("{layout_expr}.QLayout.AddItem(this.{name})"));
            }
        },
        _ => match kind {
            "Widget" => ctx.setup(format!("{layout_expr}.AddWidget(this.{name})")),
            _ => {
                ctx.diagnose(Diagnostic::UnsupportedLayoutItem {
                    layout_class: layout.class.clone(),
                    child: name.clone(),
                    kind: if kind == "Layout" { "layout" } else { "spacer" },
                });
                ctx.setup(format!("{layout_expr}.AddItem(this.{name})"));
            }
        },
    }
}

fn alignment(ctx: &mut CompilationContext, item: &LayoutItem) -> String {
    item.alignment
        .as_deref()
        .and_then(|a| ctx.resolve_set(a))
        .unwrap_or_else(|| "0".to_string())
}

/// Spacer item with size policies inferred from its orientation.
pub fn emit_spacer(ctx: &mut CompilationContext, spacer: &Spacer) {
    let var = variable_name(&spacer.name);
    let mut vertical = false;
    let mut size_type = "Expanding".to_string();
    let (mut width, mut height) = (0, 0);

    for prop in &spacer.properties {
        match (prop.name.as_str(), &prop.value) {
            ("orientation", PropertyValue::Enum(o)) => vertical = o.trim() == "Qt::Vertical",
            ("sizeType", PropertyValue::Enum(t)) => {
                size_type = t.trim().trim_start_matches("QSizePolicy::").to_string();
            }
            ("sizeHint", PropertyValue::Size(size)) => {
                width = size.width;
                height = size.height;
            }
            _ => {}
        }
    }

    let (h_policy, v_policy) = if vertical {
        ("Minimum".to_string(), size_type)
    } else {
        (size_type, "Minimum".to_string())
    };

    ctx.request_import("widgets");
    ctx.declare(format!("{var} *widgets.QSpacerItem"));
    ctx.setup(format!(
        "this.{var} = widgets.NewQSpacerItem({width}, {height}, widgets.QSizePolicy__{h_policy}, widgets.QSizePolicy__{v_policy})"
    ));
}
