//! Identifier and literal helpers.
//!
//! Designer object names are snake-ish (`push_button`, `label_2`); the
//! generated Go fields are exported camel case with every underscore
//! removed. Class names keep doubled, leading and trailing underscores.

/// Upper-case the letter after each underscore and drop that underscore.
///
/// A leading underscore run is kept, a trailing underscore is kept, and
/// in a run of underscores only the last one is dropped.
///
/// ```
/// use qtuic_codegen::names::to_camel_case;
///
/// assert_eq!(to_camel_case("push_button"), "PushButton");
/// assert_eq!(to_camel_case("a__b"), "A_B");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(&'_') = chars.peek() {
        out.push('_');
        chars.next();
    }

    let Some(first) = chars.next() else {
        return out;
    };
    out.extend(first.to_uppercase());

    let mut prev = None::<char>;
    for c in chars {
        match prev {
            Some('_') if c != '_' => {
                out.extend(c.to_uppercase());
                prev = None;
                continue;
            }
            Some(p) => out.push(p),
            None => {}
        }
        prev = Some(c);
    }
    if let Some(p) = prev {
        out.push(p);
    }

    out
}

/// Field name for a widget, layout, spacer, action or button group.
pub fn variable_name(raw: &str) -> String {
    to_camel_case(raw).replace('_', "")
}

/// `Set` plus the property name with its first letter upper-cased.
pub fn setter_name(property: &str) -> String {
    format!("Set{}", capitalize(property))
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the generated `UI...` type, without the prefix.
///
/// Designer's default root names are qualified with the file stem so two
/// forms in one package do not collide.
pub fn class_name(source_stem: &str, root_name: &str) -> String {
    match root_name {
        "Form" | "Dialog" | "MainWindow" => {
            format!("{}{}", to_camel_case(source_stem), root_name).replace('_', "")
        }
        _ => to_camel_case(root_name),
    }
}

/// Subpackage declaring the enums of a `Namespace::Member` reference.
pub fn enum_package(namespace: &str) -> Option<&'static str> {
    let package = match namespace {
        "Qt" | "QLocale" => "core",
        "QPalette" | "QFont" | "QIcon" | "QKeySequence" | "QImage" | "QPainter" => "gui",
        "QDialogButtonBox" | "QFrame" | "QLineEdit" | "QLayout" | "QFormLayout"
        | "QAbstractItemView" | "QProgressBar" | "QTabWidget" | "QAbstractSpinBox"
        | "QComboBox" | "QSizePolicy" | "QToolButton" | "QSlider" | "QTextEdit"
        | "QPlainTextEdit" | "QAbstractScrollArea" | "QHeaderView" | "QListView"
        | "QDateTimeEdit" | "QTabBar" | "QMdiArea" | "QCalendarWidget" | "QLCDNumber"
        | "QTextBrowser" | "QDockWidget" | "QMainWindow" | "QToolBox" | "QRubberBand"
        | "QGraphicsView" | "QTreeView" | "QListWidget" | "QFileDialog" => "widgets",
        _ => return None,
    };
    Some(package)
}

/// Go interpreted string literal, escaped the way `strconv.Quote` does.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0b' => out.push_str("\\v"),
            '\x0c' => out.push_str("\\f"),
            c if c.is_control() => {
                let code = c as u32;
                if code < 0x80 {
                    out.push_str(&format!("\\x{code:02x}"));
                } else if code <= 0xFFFF {
                    out.push_str(&format!("\\u{code:04x}"));
                } else {
                    out.push_str(&format!("\\U{code:08x}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decimal form of a float literal; always carries a fractional part.
///
/// Printed at the value's own precision, so an `f32` keeps its shortest
/// spelling instead of the digits of its widened `f64`.
pub fn format_float<F>(value: F) -> String
where
    F: Copy + Into<f64> + std::fmt::Display,
{
    let mut s = value.to_string();
    if value.into().is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("push_button"), "PushButton");
        assert_eq!(to_camel_case("_hidden"), "_Hidden");
        assert_eq!(to_camel_case("trailing_"), "Trailing_");
        assert_eq!(to_camel_case("a__b"), "A_B");
        assert_eq!(to_camel_case("okButton"), "OkButton");
        assert_eq!(to_camel_case("label_2"), "Label2");
    }

    #[test]
    fn test_camel_case_short_inputs() {
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_camel_case("a"), "A");
        assert_eq!(to_camel_case("__"), "__");
        assert_eq!(to_camel_case("_"), "_");
    }

    #[test]
    fn test_variable_name_drops_underscores() {
        assert_eq!(variable_name("push_button"), "PushButton");
        assert_eq!(variable_name("_hidden"), "Hidden");
        assert_eq!(variable_name("a__b"), "AB");
        assert_eq!(variable_name("verticalLayout_2"), "VerticalLayout2");
    }

    #[test]
    fn test_distinct_names_stay_distinct() {
        let names = ["push_button", "pushButton_2", "label", "label_2", "okButton"];
        let mut resolved: Vec<String> = names.iter().map(|n| variable_name(n)).collect();
        resolved.sort();
        resolved.dedup();
        assert_eq!(resolved.len(), names.len());
    }

    #[test]
    fn test_setter_name() {
        assert_eq!(setter_name("windowTitle"), "SetWindowTitle");
        assert_eq!(setter_name("geometry"), "SetGeometry");
    }

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("login_dialog", "Dialog"), "LoginDialogDialog");
        assert_eq!(class_name("main", "MainWindow"), "MainMainWindow");
        assert_eq!(class_name("anything", "SettingsPage"), "SettingsPage");
        assert_eq!(class_name("anything", "settings_page"), "SettingsPage");
    }

    #[test]
    fn test_enum_package() {
        assert_eq!(enum_package("Qt"), Some("core"));
        assert_eq!(enum_package("QFrame"), Some("widgets"));
        assert_eq!(enum_package("QPalette"), Some("gui"));
        assert_eq!(enum_package("QFoo"), None);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("OK"), "\"OK\"");
        assert_eq!(quote("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("\u{1}"), "\"\\x01\"");
        assert_eq!(quote("Größe"), "\"Größe\"");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.25), "0.25");
        assert_eq!(format_float(-3.5), "-3.5");
        assert_eq!(format_float(1e-7), "0.0000001");
        assert_eq!(format_float(0.1f32), "0.1");
        assert_eq!(format_float(2.0f32), "2.0");
    }
}
