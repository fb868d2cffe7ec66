//! qtuic Code Generator
//!
//! Translates a parsed `.ui` [`Document`] into Go source for the
//! `github.com/therecipe/qt` bindings. One depth-first walk over the widget
//! tree fills several statement streams (field declarations, `SetupUI`
//! construction, `RetranslateUi` translation, and a few deferred ones);
//! the template module then weaves them into the final file.
//!
//! ```text
//! Document → compile() → CompilerOutput { code, class_name, needs_subclass, diagnostics }
//! ```
//!
//! Unsupported fragments (an unknown enum namespace, a gradient brush,
//! a signal/slot pair whose arguments do not line up, ...) are logged,
//! collected as [`Diagnostic`]s and left out of the output; everything
//! else is still generated.

pub mod connection;
pub mod items;
pub mod layout;
pub mod names;
pub mod property;
pub mod scaffold;
pub mod template;
pub mod temps;
pub mod widget;

use std::collections::BTreeSet;

use qtuic_parser::ast::{Document, LayoutDefault, Property, TrString, Widget};

use crate::temps::{HelperTemp, HelperTemps, TreeItemPool};

/// Per-document settings handed in by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Go package clause of the generated file.
    pub package_name: String,
    /// Input file name without extension; qualifies default root names.
    pub source_stem: String,
}

impl CompileOptions {
    pub fn new(package_name: impl Into<String>, source_stem: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            source_stem: source_stem.into(),
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::new("uigen", "form")
    }
}

/// The compiled output for one `.ui` document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerOutput {
    pub code: String,
    /// Generated type name without the `UI` prefix.
    pub class_name: String,
    /// Some connection targets the root widget itself, so a scaffold has to
    /// subclass the root class to provide the slot.
    pub needs_subclass: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Code generation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Codegen error: {message}")]
pub struct CodegenError {
    pub message: String,
}

/// A fragment that was left out of the generated code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("unknown enum namespace in {value:?}")]
    UnknownEnumNamespace { value: String },

    #[error("{kind} property '{property}' is not supported")]
    UnsupportedProperty { property: String, kind: &'static str },

    #[error("attribute '{attribute}' is not supported on {class}")]
    UnsupportedAttribute { attribute: String, class: String },

    #[error("brush in '{property}' is not supported: {reason}")]
    UnsupportedBrush { property: String, reason: String },

    #[error("{sender}.{signal} and {receiver}.{slot} arguments do not match")]
    ConnectionMismatch {
        sender: String,
        signal: String,
        receiver: String,
        slot: String,
    },

    #[error("action group '{name}' is not emitted")]
    UnsupportedActionGroup { name: String },

    #[error("cannot add action '{action}' to {class} '{widget}'")]
    UnsupportedActionRef {
        action: String,
        widget: String,
        class: String,
    },

    #[error("{layout_class} cannot place {kind} '{child}' directly")]
    UnsupportedLayoutItem {
        layout_class: String,
        child: String,
        kind: &'static str,
    },

    #[error("unknown {container} item property '{property}'")]
    UnknownItemProperty { container: String, property: String },

    #[error("no way to attach '{child}' to {parent_class} '{parent}'")]
    UnattachedChild {
        child: String,
        parent: String,
        parent_class: String,
    },
}

impl Diagnostic {
    fn is_error(&self) -> bool {
        matches!(
            self,
            Diagnostic::UnknownEnumNamespace { .. }
                | Diagnostic::UnsupportedProperty { .. }
                | Diagnostic::ConnectionMismatch { .. }
        )
    }
}

/// Ordered statement lists filled during the walk.
#[derive(Debug, Default)]
pub struct Streams {
    /// Fields of the generated struct.
    pub declarations: Vec<String>,
    pub setup: Vec<String>,
    pub translate: Vec<String>,
    pub add_actions: Vec<String>,
    pub buddies: Vec<String>,
    pub current_index: Vec<String>,
    pub tab_order: Vec<String>,
    pub connections: Vec<String>,
}

/// Mutable state of one document's translation.
///
/// Never reused: every document gets a fresh context so import sets,
/// helper declarations and the tree-item pool cannot leak between files.
#[derive(Debug, Default)]
pub struct CompilationContext {
    /// Root widget name as written in the document.
    pub root_name: String,
    /// `SetupUI`/`RetranslateUi` parameter, also the translation context.
    pub root_var: String,
    pub root_class: String,
    /// Document-wide margin and spacing fallbacks.
    pub layout_default: LayoutDefault,
    pub imports: BTreeSet<&'static str>,
    pub temps: HelperTemps,
    pub tree_items: TreeItemPool,
    /// Resolved names of button groups already declared.
    pub button_groups: BTreeSet<String>,
    /// `<buttongroups>` section, keyed by raw group name.
    pub group_properties: Vec<(String, Vec<Property>)>,
    /// Raw names of every `QMenu` in the document.
    pub menus: BTreeSet<String>,
    /// Methods the root widget's wrapper has to provide, as `(name, line)`.
    pub root_slots: Vec<(String, String)>,
    pub streams: Streams,
    pub diagnostics: Vec<Diagnostic>,
    pub uses_translate: bool,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_document(doc: &Document) -> Self {
        let mut menus = BTreeSet::new();
        collect_menus(&doc.widget, &mut menus);

        Self {
            root_name: doc.widget.name.clone(),
            root_var: names::variable_name(&doc.widget.name),
            root_class: doc.widget.class.clone(),
            layout_default: doc.layout_default.unwrap_or_default(),
            group_properties: doc
                .button_groups
                .iter()
                .map(|g| (g.name.clone(), g.properties.clone()))
                .collect(),
            menus,
            ..Self::default()
        }
    }

    // =========================================================================
    // Streams
    // =========================================================================

    pub fn declare(&mut self, field: impl Into<String>) {
        self.streams.declarations.push(field.into());
    }

    pub fn setup(&mut self, line: impl Into<String>) {
        self.streams.setup.push(line.into());
    }

    pub fn translate(&mut self, line: impl Into<String>) {
        self.streams.translate.push(line.into());
    }

    // =========================================================================
    // Names and imports
    // =========================================================================

    pub fn request_import(&mut self, package: &'static str) {
        self.imports.insert(package);
    }

    /// Expression for a named object: the root parameter or a field.
    pub fn object_expr(&self, raw_name: &str) -> String {
        if raw_name == self.root_name {
            self.root_var.clone()
        } else {
            format!("this.{}", names::variable_name(raw_name))
        }
    }

    /// Resolve `Namespace::Member` to `pkg.Namespace__Member`.
    ///
    /// Unknown namespaces are reported and yield `None`.
    pub fn resolve_enum(&mut self, value: &str) -> Option<String> {
        let value = value.trim();
        let package = value
            .split_once("::")
            .and_then(|(namespace, _)| names::enum_package(namespace));

        match package {
            Some(package) => {
                self.request_import(package);
                Some(format!("{package}.{}", value.replace("::", "__")))
            }
            None => {
                self.diagnose(Diagnostic::UnknownEnumNamespace {
                    value: value.to_string(),
                });
                None
            }
        }
    }

    /// Resolve a `|`-joined flag set; unresolvable members are left out.
    pub fn resolve_set(&mut self, value: &str) -> Option<String> {
        let members: Vec<String> = value
            .split('|')
            .filter(|m| !m.trim().is_empty())
            .filter_map(|m| self.resolve_enum(m))
            .collect();

        if members.is_empty() {
            None
        } else {
            Some(members.join(" | "))
        }
    }

    /// `_translate(...)` call for a user-visible string.
    pub fn translate_call(&mut self, text: &TrString) -> String {
        self.uses_translate = true;
        self.request_import("core");
        format!(
            "_translate({}, {}, {}, -1)",
            names::quote(&self.root_var),
            names::quote(&text.value),
            names::quote(text.comment.as_deref().unwrap_or_default())
        )
    }

    // =========================================================================
    // Scratch variables
    // =========================================================================

    /// Declare a helper local on first use and return its name.
    pub fn ensure_temp(&mut self, temp: HelperTemp) -> &'static str {
        self.request_import(temp.package());
        if self.temps.declare(temp) {
            self.setup(temp.declaration());
        }
        temp.var_name()
    }

    /// Save the sort flag and turn sorting off for the items that follow.
    pub fn begin_unsorted(&mut self, widget_expr: &str) {
        if self.temps.declare_sorting_enabled() {
            self.translate("var sortingEnabled bool");
        }
        self.translate(format!("sortingEnabled = {widget_expr}.IsSortingEnabled()"));
        self.translate(format!("{widget_expr}.SetSortingEnabled(false)"));
    }

    pub fn end_unsorted(&mut self, widget_expr: &str) {
        self.translate(format!("{widget_expr}.SetSortingEnabled(sortingEnabled)"));
    }

    pub fn acquire_tree_item(&mut self) -> String {
        let (name, fresh) = self.tree_items.acquire();
        if fresh {
            self.request_import("widgets");
            self.setup(format!("var {name} *widgets.QTreeWidgetItem"));
        }
        name
    }

    pub fn release_tree_item(&mut self, name: &str) {
        self.tree_items.release(name);
    }

    /// Record a slot connected on the root for the generated interface.
    pub fn root_slot(&mut self, method: &str, params: &[String]) {
        if self.root_slots.iter().any(|(name, _)| name == method) {
            return;
        }
        let (declared, imports) = connection::declare_params(params);
        for package in imports {
            self.request_import(package);
        }
        self.root_slots
            .push((method.to_string(), format!("{method}({})", declared.join(", "))));
    }

    pub fn diagnose(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            log::error!("{diagnostic}");
        } else {
            log::warn!("{diagnostic}");
        }
        self.diagnostics.push(diagnostic);
    }
}

fn collect_menus(widget: &Widget, menus: &mut BTreeSet<String>) {
    if widget.class == "QMenu" {
        menus.insert(widget.name.clone());
    }
    for child in &widget.widgets {
        collect_menus(child, menus);
    }
}

/// Compile a `.ui` document into a Go source file.
pub fn compile(doc: &Document, options: &CompileOptions) -> Result<CompilerOutput, CodegenError> {
    if doc.widget.name.trim().is_empty() {
        return Err(CodegenError {
            message: "root widget has no name".to_string(),
        });
    }
    if doc.widget.class.trim().is_empty() {
        return Err(CodegenError {
            message: format!("root widget '{}' has no class", doc.widget.name),
        });
    }

    let mut ctx = CompilationContext::for_document(doc);
    ctx.request_import("widgets");

    widget::emit_root(&mut ctx, &doc.widget);
    widget::emit_tab_order(&mut ctx, &doc.tab_stops);
    connection::emit_connections(&mut ctx, &doc.connections);

    let class_name = names::class_name(&options.source_stem, &doc.widget.name);
    let code = template::assemble(&ctx, &options.package_name, &class_name);

    log::debug!(
        "compiled UI{class_name}: {} fields, {} setup statements, {} diagnostics",
        ctx.streams.declarations.len(),
        ctx.streams.setup.len(),
        ctx.diagnostics.len()
    );

    Ok(CompilerOutput {
        code,
        class_name,
        needs_subclass: connection::needs_subclass(doc),
        diagnostics: ctx.diagnostics,
    })
}
