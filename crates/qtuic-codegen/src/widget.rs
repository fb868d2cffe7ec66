//! Widgets, actions and the rules for attaching children to containers.

use std::borrow::Cow;

use qtuic_parser::ast::{Action, ActionRef, Property, PropertyValue, Widget};

use crate::items;
use crate::layout::emit_layout;
use crate::names::{quote, variable_name};
use crate::property::{emit_property, Target};
use crate::{CompilationContext, Diagnostic};

/// Attributes consumed by the parent container rather than the widget.
const PAGE_ATTRIBUTES: [&str; 8] = [
    "title",
    "label",
    "icon",
    "toolTip",
    "whatsThis",
    "toolBarArea",
    "toolBarBreak",
    "dockWidgetArea",
];

/// Emit the root widget. It is the `SetupUI` parameter, so it has no field
/// and no constructor.
pub fn emit_root(ctx: &mut CompilationContext, widget: &Widget) {
    let expr = ctx.root_var.clone();
    emit_body(ctx, &expr, widget, true);
}

/// Declare, construct and populate a non-root widget.
pub fn emit_widget(ctx: &mut CompilationContext, parent: &str, widget: &Widget) {
    let widget = normalize_line(widget);
    let var = variable_name(&widget.name);
    let class = widget.class.as_str();
    let expr = format!("this.{var}");

    ctx.request_import("widgets");
    ctx.declare(format!("{var} *widgets.{class}"));
    let ctor = match class {
        "QWidget" | "QFrame" | "QLabel" => {
            ctx.request_import("core");
            format!("widgets.New{class}({parent}, core.Qt__Widget)")
        }
        "QToolBar" => format!("widgets.New{class}2({parent})"),
        _ => format!("widgets.New{class}({parent})"),
    };
    ctx.setup(format!("{expr} = {ctor}"));

    emit_body(ctx, &expr, &widget, false);
}

fn emit_body(ctx: &mut CompilationContext, expr: &str, widget: &Widget, is_root: bool) {
    ctx.setup(format!("{expr}.SetObjectName({})", quote(&widget.name)));

    for prop in &widget.properties {
        match (prop.name.as_str(), &prop.value) {
            ("objectName", _) => {}
            // Only valid once pages and items exist.
            ("currentIndex", PropertyValue::Number(index)) => ctx
                .streams
                .current_index
                .push(format!("{expr}.SetCurrentIndex({index})")),
            _ => emit_property(ctx, Target::same(expr), prop, ""),
        }
    }

    match widget.class.as_str() {
        "QComboBox" => items::emit_combo_box(ctx, expr, widget),
        "QListWidget" => items::emit_list_widget(ctx, expr, widget),
        "QTableWidget" => items::emit_table_widget(ctx, expr, widget),
        "QTreeWidget" => items::emit_tree_widget(ctx, expr, widget),
        _ => {}
    }

    for attr in &widget.attributes {
        match attr.name.as_str() {
            "buttonGroup" => match &attr.value {
                PropertyValue::String(group) => emit_button_group(ctx, expr, &group.value),
                PropertyValue::CString(group) => emit_button_group(ctx, expr, group),
                _ => unsupported_attribute(ctx, attr, widget),
            },
            name if PAGE_ATTRIBUTES.contains(&name) => {}
            _ => match widget.class.as_str() {
                "QTableWidget" | "QTreeWidget" => {
                    items::emit_header_attribute(ctx, expr, widget, attr)
                }
                _ => unsupported_attribute(ctx, attr, widget),
            },
        }
    }

    if let Some(layout) = &widget.layout {
        emit_layout(ctx, expr, layout, false);
    }

    for child in &widget.widgets {
        emit_widget(ctx, expr, child);
        if is_root {
            attach_to_main_window(ctx, expr, child);
        } else {
            attach_child(ctx, expr, widget, child);
        }
    }

    for action in &widget.actions {
        emit_action(ctx, expr, action);
    }

    for group in &widget.action_groups {
        ctx.diagnose(Diagnostic::UnsupportedActionGroup {
            name: group.name.clone(),
        });
    }

    for action_ref in &widget.action_refs {
        emit_action_ref(ctx, expr, widget, action_ref);
    }

    for name in &widget.z_orders {
        let target = ctx.object_expr(name);
        ctx.setup(format!("{target}.Raise()"));
    }
}

fn unsupported_attribute(ctx: &mut CompilationContext, attr: &Property, widget: &Widget) {
    ctx.diagnose(Diagnostic::UnsupportedAttribute {
        attribute: attr.name.clone(),
        class: widget.class.clone(),
    });
}

/// `Line` is Designer's name for a sunken `QFrame` with an `HLine`/`VLine`
/// shape.
fn normalize_line(widget: &Widget) -> Cow<'_, Widget> {
    if widget.class != "Line" {
        return Cow::Borrowed(widget);
    }

    let shape = |orientation: &str| {
        let shape = if orientation == "Qt::Vertical" {
            "QFrame::VLine"
        } else {
            "QFrame::HLine"
        };
        [
            Property::new("frameShadow", PropertyValue::Enum("QFrame::Sunken".into())),
            Property::new("frameShape", PropertyValue::Enum(shape.into())),
        ]
    };

    let mut properties = Vec::with_capacity(widget.properties.len() + 1);
    let mut oriented = false;
    for prop in &widget.properties {
        match (prop.name.as_str(), &prop.value) {
            ("orientation", PropertyValue::Enum(o)) => {
                properties.extend(shape(o.trim()));
                oriented = true;
            }
            _ => properties.push(prop.clone()),
        }
    }
    if !oriented {
        properties.extend(shape("Qt::Horizontal"));
    }

    Cow::Owned(Widget {
        class: "QFrame".to_string(),
        properties,
        ..widget.clone()
    })
}

// =========================================================================
// Attaching children
// =========================================================================

/// Main-window slots for direct children of a `QMainWindow` root.
fn attach_to_main_window(ctx: &mut CompilationContext, root: &str, child: &Widget) {
    if ctx.root_class != "QMainWindow" {
        return;
    }
    let child_expr = format!("this.{}", variable_name(&child.name));

    match child.class.as_str() {
        "QMenuBar" => ctx.setup(format!("{root}.SetMenuBar({child_expr})")),
        "QStatusBar" => ctx.setup(format!("{root}.SetStatusBar({child_expr})")),
        "QToolBar" => {
            let area = child.attribute("toolBarArea").and_then(|a| match &a.value {
                PropertyValue::Enum(area) => Some(area.trim().trim_start_matches("Qt::").to_string()),
                _ => None,
            });
            let Some(area) = area else {
                ctx.setup(format!("{root}.AddToolBar2({child_expr})"));
                return;
            };
            let line_break = matches!(
                child.attribute("toolBarBreak").map(|a| &a.value),
                Some(PropertyValue::Bool(true))
            );

            ctx.request_import("core");
            if line_break {
                ctx.setup(format!("{root}.AddToolBarBreak(core.Qt__{area})"));
            }
            ctx.setup(format!("{root}.AddToolBar(core.Qt__{area}, {child_expr})"));
        }
        "QDockWidget" => {
            let area = match child.attribute("dockWidgetArea").map(|a| &a.value) {
                Some(PropertyValue::Number(n)) => *n,
                _ => 1,
            };
            ctx.request_import("core");
            ctx.setup(format!(
                "{root}.AddDockWidget(core.Qt__DockWidgetArea({area}), {child_expr})"
            ));
        }
        "QWidget" => ctx.setup(format!("{root}.SetCentralWidget({child_expr})")),
        _ => {}
    }
}

/// Container-specific call that adds `child` to `parent`.
///
/// Plain containers need nothing: the child was constructed with the
/// parent as its Qt parent.
fn attach_child(ctx: &mut CompilationContext, parent_expr: &str, parent: &Widget, child: &Widget) {
    let child_expr = format!("this.{}", variable_name(&child.name));

    match parent.class.as_str() {
        "QTabWidget" => {
            ctx.setup(format!("{parent_expr}.AddTab({child_expr}, \"\")"));
            let setters = [
                ("title", "tabText"),
                ("icon", "tabIcon"),
                ("toolTip", "tabToolTip"),
                ("whatsThis", "tabWhatsThis"),
            ];
            emit_page_attributes(ctx, parent_expr, &child_expr, child, &setters);
        }
        "QToolBox" => {
            ctx.setup(format!("{parent_expr}.AddItem({child_expr}, \"\")"));
            let setters = [
                ("label", "itemText"),
                ("icon", "itemIcon"),
                ("toolTip", "itemToolTip"),
            ];
            emit_page_attributes(ctx, parent_expr, &child_expr, child, &setters);
        }
        "QStackedWidget" => ctx.setup(format!("{parent_expr}.AddWidget({child_expr})")),
        "QScrollArea" | "QDockWidget" => {
            ctx.setup(format!("{parent_expr}.SetWidget({child_expr})"))
        }
        "QWidget" | "QFrame" | "QGroupBox" | "QSplitter" | "QMenuBar" | "QMenu" | "QDialog"
        | "QMainWindow" => {}
        _ => ctx.diagnose(Diagnostic::UnattachedChild {
            child: child.name.clone(),
            parent: parent.name.clone(),
            parent_class: parent.class.clone(),
        }),
    }
}

/// Page title, icon and tips, addressed by the page's index.
fn emit_page_attributes(
    ctx: &mut CompilationContext,
    parent_expr: &str,
    child_expr: &str,
    child: &Widget,
    setters: &[(&str, &str)],
) {
    let index = format!("{parent_expr}.IndexOf({child_expr}), ");
    for attr in &child.attributes {
        if let Some((_, property)) = setters.iter().find(|(name, _)| *name == attr.name) {
            let prop = Property::new(*property, attr.value.clone());
            emit_property(ctx, Target::same(parent_expr), &prop, &index);
        }
    }
}

// =========================================================================
// Actions and button groups
// =========================================================================

fn emit_action(ctx: &mut CompilationContext, owner: &str, action: &Action) {
    let var = variable_name(&action.name);
    let expr = format!("this.{var}");

    ctx.request_import("widgets");
    ctx.declare(format!("{var} *widgets.QAction"));
    ctx.setup(format!("{expr} = widgets.NewQAction({owner})"));
    ctx.setup(format!("{expr}.SetObjectName({})", quote(&action.name)));

    for prop in &action.properties {
        match (prop.name.as_str(), &prop.value) {
            ("objectName", _) => {}
            ("shortcut", PropertyValue::String(keys)) => {
                ctx.request_import("gui");
                if keys.notr {
                    ctx.setup(format!(
                        "{expr}.SetShortcut(gui.QKeySequence_FromString({}, gui.QKeySequence__NativeText))",
                        quote(&keys.value)
                    ));
                } else {
                    let call = ctx.translate_call(keys);
                    ctx.translate(format!(
                        "{expr}.SetShortcut(gui.QKeySequence_FromString({call}, gui.QKeySequence__NativeText))"
                    ));
                }
            }
            _ => emit_property(ctx, Target::same(&expr), prop, ""),
        }
    }
}

fn emit_action_ref(
    ctx: &mut CompilationContext,
    expr: &str,
    widget: &Widget,
    action_ref: &ActionRef,
) {
    if action_ref.is_separator() {
        ctx.streams.add_actions.push(format!("{expr}.AddSeparator()"));
        return;
    }

    match widget.class.as_str() {
        "QMenu" | "QToolBar" | "QMenuBar" => {
            let mut target = format!("this.{}", variable_name(&action_ref.name));
            if ctx.menus.contains(&action_ref.name) {
                target.push_str(".MenuAction()");
            }
            ctx.streams
                .add_actions
                .push(format!("{expr}.QWidget.AddAction({target})"));
        }
        _ => ctx.diagnose(Diagnostic::UnsupportedActionRef {
            action: action_ref.name.clone(),
            widget: widget.name.clone(),
            class: widget.class.clone(),
        }),
    }
}

/// Declare a `QButtonGroup` on first use, then add the button to it.
fn emit_button_group(ctx: &mut CompilationContext, button_expr: &str, group_name: &str) {
    let var = variable_name(group_name);
    let expr = format!("this.{var}");

    if ctx.button_groups.insert(var.clone()) {
        ctx.request_import("widgets");
        ctx.declare(format!("{var} *widgets.QButtonGroup"));
        ctx.setup(format!("{expr} = widgets.NewQButtonGroup({})", ctx.root_var));
        ctx.setup(format!("{expr}.SetObjectName({})", quote(group_name)));

        let properties = ctx
            .group_properties
            .iter()
            .find(|(name, _)| name == group_name)
            .map(|(_, props)| props.clone())
            .unwrap_or_default();
        for prop in properties.iter().filter(|p| p.name != "objectName") {
            emit_property(ctx, Target::same(&expr), prop, "");
        }
    }

    ctx.setup(format!("{expr}.AddButton({button_expr}, -1)"));
}

/// `SetTabOrder` for each consecutive pair of tab stops.
pub fn emit_tab_order(ctx: &mut CompilationContext, tab_stops: &[String]) {
    for pair in tab_stops.windows(2) {
        let first = ctx.object_expr(&pair[0]);
        let second = ctx.object_expr(&pair[1]);
        let root = &ctx.root_var;
        let line = format!("{root}.SetTabOrder({first}, {second})");
        ctx.streams.tab_order.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qtuic_parser::ast::{ActionGroup, TrString};

    fn ctx(root_class: &str, root_name: &str) -> CompilationContext {
        let mut ctx = CompilationContext::new();
        ctx.root_name = root_name.into();
        ctx.root_var = variable_name(root_name);
        ctx.root_class = root_class.into();
        ctx
    }

    fn widget(class: &str, name: &str) -> Widget {
        Widget {
            class: class.into(),
            name: name.into(),
            ..Widget::default()
        }
    }

    fn text(name: &str, value: &str) -> Property {
        Property::new(name, PropertyValue::String(TrString::translatable(value)))
    }

    #[test]
    fn test_constructors() {
        let mut ctx = ctx("QDialog", "Dialog");
        emit_widget(&mut ctx, "Dialog", &widget("QLabel", "label"));
        emit_widget(&mut ctx, "Dialog", &widget("QToolBar", "toolBar"));
        emit_widget(&mut ctx, "Dialog", &widget("QLineEdit", "lineEdit"));

        let ctors: Vec<&String> = ctx.streams.setup.iter().filter(|l| l.contains(" = ")).collect();
        assert_eq!(
            ctors,
            vec![
                "this.Label = widgets.NewQLabel(Dialog, core.Qt__Widget)",
                "this.ToolBar = widgets.NewQToolBar2(Dialog)",
                "this.LineEdit = widgets.NewQLineEdit(Dialog)",
            ]
        );
        assert!(ctx.imports.contains("core"));
    }

    #[test]
    fn test_root_body_order() {
        let mut ctx = ctx("QDialog", "Dialog");
        let mut root = widget("QDialog", "Dialog");
        root.properties.push(text("windowTitle", "Settings"));
        root.properties.push(Property::new(
            "objectName",
            PropertyValue::CString("Dialog".into()),
        ));
        root.z_orders.push("label".into());
        root.widgets.push(widget("QLabel", "label"));
        emit_root(&mut ctx, &root);

        assert_eq!(
            ctx.streams.setup,
            vec![
                r#"Dialog.SetObjectName("Dialog")"#,
                "this.Label = widgets.NewQLabel(Dialog, core.Qt__Widget)",
                r#"this.Label.SetObjectName("label")"#,
                "this.Label.Raise()",
            ]
        );
        assert_eq!(
            ctx.streams.translate,
            vec![r#"Dialog.SetWindowTitle(_translate("Dialog", "Settings", "", -1))"#]
        );
        assert!(ctx.streams.declarations.iter().all(|d| !d.starts_with("Dialog ")));
    }

    #[test]
    fn test_current_index_is_deferred() {
        let mut ctx = ctx("QDialog", "Dialog");
        let mut tabs = widget("QTabWidget", "tabs");
        tabs.properties
            .push(Property::new("currentIndex", PropertyValue::Number(1)));
        emit_widget(&mut ctx, "Dialog", &tabs);

        assert!(!ctx.streams.setup.iter().any(|l| l.contains("SetCurrentIndex")));
        assert_eq!(ctx.streams.current_index, vec!["this.Tabs.SetCurrentIndex(1)"]);
    }

    #[test]
    fn test_line_becomes_frame() {
        let mut ctx = ctx("QDialog", "Dialog");
        let mut line = widget("Line", "line");
        line.properties.push(Property::new(
            "orientation",
            PropertyValue::Enum("Qt::Vertical".into()),
        ));
        emit_widget(&mut ctx, "Dialog", &line);

        assert_eq!(ctx.streams.declarations, vec!["Line *widgets.QFrame"]);
        assert_eq!(
            ctx.streams.setup,
            vec![
                "this.Line = widgets.NewQFrame(Dialog, core.Qt__Widget)",
                r#"this.Line.SetObjectName("line")"#,
                "this.Line.SetFrameShadow(widgets.QFrame__Sunken)",
                "this.Line.SetFrameShape(widgets.QFrame__VLine)",
            ]
        );
    }

    #[test]
    fn test_tab_pages() {
        let mut ctx = ctx("QDialog", "Dialog");
        let mut tabs = widget("QTabWidget", "tabWidget");
        let mut page = widget("QWidget", "generalTab");
        page.attributes.push(text("title", "General"));
        tabs.widgets.push(page);
        emit_widget(&mut ctx, "Dialog", &tabs);

        assert_eq!(
            ctx.streams.setup.last().unwrap(),
            r#"this.TabWidget.AddTab(this.GeneralTab, "")"#
        );
        assert_eq!(
            ctx.streams.translate,
            vec![r#"this.TabWidget.SetTabText(this.TabWidget.IndexOf(this.GeneralTab), _translate("Dialog", "General", "", -1))"#]
        );
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_tool_box_pages() {
        let mut ctx = ctx("QDialog", "Dialog");
        let mut toolbox = widget("QToolBox", "toolBox");
        let mut page = widget("QWidget", "page");
        page.attributes.push(text("label", "First"));
        toolbox.widgets.push(page);
        emit_widget(&mut ctx, "Dialog", &toolbox);

        assert_eq!(
            ctx.streams.setup.last().unwrap(),
            r#"this.ToolBox.AddItem(this.Page, "")"#
        );
        assert_eq!(
            ctx.streams.translate,
            vec![r#"this.ToolBox.SetItemText(this.ToolBox.IndexOf(this.Page), _translate("Dialog", "First", "", -1))"#]
        );
    }

    #[test]
    fn test_container_attach_calls() {
        let mut ctx = ctx("QDialog", "Dialog");
        let mut stack = widget("QStackedWidget", "stack");
        stack.widgets.push(widget("QWidget", "page1"));
        let mut scroll = widget("QScrollArea", "scroll");
        scroll.widgets.push(widget("QWidget", "contents"));
        emit_widget(&mut ctx, "Dialog", &stack);
        emit_widget(&mut ctx, "Dialog", &scroll);

        assert!(ctx.streams.setup.contains(&"this.Stack.AddWidget(this.Page1)".to_string()));
        assert!(ctx.streams.setup.contains(&"this.Scroll.SetWidget(this.Contents)".to_string()));
    }

    #[test]
    fn test_unknown_container_is_reported() {
        let mut ctx = ctx("QDialog", "Dialog");
        let mut custom = widget("QMdiArea", "mdi");
        custom.widgets.push(widget("QWidget", "sub"));
        emit_widget(&mut ctx, "Dialog", &custom);

        assert_eq!(
            ctx.diagnostics,
            vec![Diagnostic::UnattachedChild {
                child: "sub".into(),
                parent: "mdi".into(),
                parent_class: "QMdiArea".into(),
            }]
        );
    }

    #[test]
    fn test_main_window_attach() {
        let mut ctx = ctx("QMainWindow", "MainWindow");
        let mut root = widget("QMainWindow", "MainWindow");
        root.widgets.push(widget("QWidget", "centralwidget"));
        root.widgets.push(widget("QMenuBar", "menubar"));
        root.widgets.push(widget("QStatusBar", "statusbar"));
        let mut tool_bar = widget("QToolBar", "toolBar");
        tool_bar.attributes.push(Property::new(
            "toolBarArea",
            PropertyValue::Enum("TopToolBarArea".into()),
        ));
        tool_bar
            .attributes
            .push(Property::new("toolBarBreak", PropertyValue::Bool(false)));
        root.widgets.push(tool_bar);
        emit_root(&mut ctx, &root);

        let attach: Vec<&String> = ctx
            .streams
            .setup
            .iter()
            .filter(|l| l.starts_with("MainWindow.") && !l.contains("SetObjectName"))
            .collect();
        assert_eq!(
            attach,
            vec![
                "MainWindow.SetCentralWidget(this.Centralwidget)",
                "MainWindow.SetMenuBar(this.Menubar)",
                "MainWindow.SetStatusBar(this.Statusbar)",
                "MainWindow.AddToolBar(core.Qt__TopToolBarArea, this.ToolBar)",
            ]
        );
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_actions_and_refs() {
        let mut ctx = ctx("QMainWindow", "MainWindow");
        ctx.menus.insert("menuFile".into());

        let mut root = widget("QMainWindow", "MainWindow");
        let mut menubar = widget("QMenuBar", "menubar");
        let mut menu = widget("QMenu", "menuFile");
        menu.action_refs.push(ActionRef {
            name: "actionOpen".into(),
        });
        menu.action_refs.push(ActionRef {
            name: "separator".into(),
        });
        menubar.widgets.push(menu);
        menubar.action_refs.push(ActionRef {
            name: "menuFile".into(),
        });
        root.widgets.push(menubar);
        root.actions.push(Action {
            name: "actionOpen".into(),
            properties: vec![
                text("text", "Open"),
                text("shortcut", "Ctrl+O"),
            ],
            ..Action::default()
        });
        emit_root(&mut ctx, &root);

        assert_eq!(
            ctx.streams.add_actions,
            vec![
                "this.MenuFile.QWidget.AddAction(this.ActionOpen)",
                "this.MenuFile.AddSeparator()",
                "this.Menubar.QWidget.AddAction(this.MenuFile.MenuAction())",
            ]
        );
        assert!(ctx
            .streams
            .setup
            .contains(&"this.ActionOpen = widgets.NewQAction(MainWindow)".to_string()));
        assert_eq!(
            ctx.streams.translate,
            vec![
                r#"this.ActionOpen.SetText(_translate("MainWindow", "Open", "", -1))"#,
                r#"this.ActionOpen.SetShortcut(gui.QKeySequence_FromString(_translate("MainWindow", "Ctrl+O", "", -1), gui.QKeySequence__NativeText))"#,
            ]
        );
    }

    #[test]
    fn test_action_ref_on_plain_widget_is_reported() {
        let mut ctx = ctx("QDialog", "Dialog");
        let mut frame = widget("QFrame", "frame");
        frame.action_refs.push(ActionRef {
            name: "actionOpen".into(),
        });
        emit_widget(&mut ctx, "Dialog", &frame);
        assert!(ctx.streams.add_actions.is_empty());
        assert!(matches!(
            ctx.diagnostics.as_slice(),
            [Diagnostic::UnsupportedActionRef { .. }]
        ));
    }

    #[test]
    fn test_action_groups_are_not_emitted() {
        let mut ctx = ctx("QMainWindow", "MainWindow");
        let mut root = widget("QMainWindow", "MainWindow");
        root.action_groups.push(ActionGroup {
            name: "alignGroup".into(),
            ..ActionGroup::default()
        });
        emit_root(&mut ctx, &root);
        assert_eq!(ctx.streams.setup.len(), 1);
        assert_eq!(
            ctx.diagnostics,
            vec![Diagnostic::UnsupportedActionGroup {
                name: "alignGroup".into()
            }]
        );
    }

    #[test]
    fn test_button_group_declared_once() {
        let mut ctx = ctx("QDialog", "Dialog");
        ctx.group_properties.push((
            "choices".into(),
            vec![Property::new("exclusive", PropertyValue::Bool(false))],
        ));
        for name in ["first", "second"] {
            let mut radio = widget("QRadioButton", name);
            radio.attributes.push(Property::new(
                "buttonGroup",
                PropertyValue::String(TrString {
                    value: "choices".into(),
                    notr: true,
                    comment: None,
                }),
            ));
            emit_widget(&mut ctx, "Dialog", &radio);
        }

        let group_lines: Vec<&String> = ctx
            .streams
            .setup
            .iter()
            .filter(|l| l.starts_with("this.Choices"))
            .collect();
        assert_eq!(
            group_lines,
            vec![
                "this.Choices = widgets.NewQButtonGroup(Dialog)",
                r#"this.Choices.SetObjectName("choices")"#,
                "this.Choices.SetExclusive(false)",
                "this.Choices.AddButton(this.First, -1)",
                "this.Choices.AddButton(this.Second, -1)",
            ]
        );
        assert_eq!(
            ctx.streams
                .declarations
                .iter()
                .filter(|d| d.starts_with("Choices "))
                .count(),
            1
        );
    }

    #[test]
    fn test_tab_order() {
        let mut ctx = ctx("QDialog", "Dialog");
        emit_tab_order(
            &mut ctx,
            &["nameEdit".to_string(), "ageSpin".to_string(), "okButton".to_string()],
        );
        assert_eq!(
            ctx.streams.tab_order,
            vec![
                "Dialog.SetTabOrder(this.NameEdit, this.AgeSpin)",
                "Dialog.SetTabOrder(this.AgeSpin, this.OkButton)",
            ]
        );
    }
}
