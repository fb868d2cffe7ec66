//! Document model for Qt Designer `.ui` files.
//!
//! Structural nodes (widgets, layouts, items, actions) plus one closed
//! enum, [`PropertyValue`], covering every value kind a `<property>` or
//! `<attribute>` element may hold.

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A complete `.ui` document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Contents of the top-level `<class>` element.
    pub class: String,
    pub widget: Widget,
    pub layout_default: Option<LayoutDefault>,
    pub tab_stops: Vec<String>,
    pub button_groups: Vec<ButtonGroup>,
    pub connections: Vec<Connection>,
}

/// Document-wide fallback for layout margins and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutDefault {
    pub spacing: Option<i32>,
    pub margin: Option<i32>,
}

/// A `<buttongroup>` declared at document level.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonGroup {
    pub name: String,
    pub properties: Vec<Property>,
}

/// A signal/slot connection from the `<connections>` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub sender: String,
    pub signal: String,
    pub receiver: String,
    pub slot: String,
}

// ---------------------------------------------------------------------------
// Structural nodes
// ---------------------------------------------------------------------------

/// A `<widget>` element.
///
/// A widget holds either a layout or direct child widgets, never both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Widget {
    pub class: String,
    pub name: String,
    pub properties: Vec<Property>,
    pub attributes: Vec<Property>,
    /// Table widget vertical header sections.
    pub rows: Vec<HeaderSection>,
    /// Table widget horizontal header sections, tree widget header columns.
    pub columns: Vec<HeaderSection>,
    /// Combo box, list, table and tree items.
    pub items: Vec<WidgetItem>,
    pub layout: Option<Box<Layout>>,
    pub widgets: Vec<Widget>,
    pub actions: Vec<Action>,
    pub action_groups: Vec<ActionGroup>,
    pub action_refs: Vec<ActionRef>,
    pub z_orders: Vec<String>,
}

impl Widget {
    pub fn attribute(&self, name: &str) -> Option<&Property> {
        self.attributes.iter().find(|p| p.name == name)
    }
}

/// A `<layout>` element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub class: String,
    pub name: String,
    pub properties: Vec<Property>,
    pub attributes: Vec<Property>,
    pub items: Vec<LayoutItem>,
    /// Comma-separated stretch factors, kept as written.
    pub stretch: String,
    pub row_stretch: String,
    pub column_stretch: String,
    pub row_minimum_height: String,
    pub column_minimum_width: String,
}

impl Layout {
    pub fn is_box(&self) -> bool {
        matches!(self.class.as_str(), "QVBoxLayout" | "QHBoxLayout")
    }
}

/// Parse a comma-separated stretch list.
///
/// Unparsable entries read as 0 so that positions stay aligned with the
/// indices they describe.
pub fn parse_stretch_list(list: &str) -> Vec<i32> {
    if list.trim().is_empty() {
        return Vec::new();
    }
    list.split(',')
        .map(|part| part.trim().parse().unwrap_or(0))
        .collect()
}

/// An `<item>` inside a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem {
    pub row: i32,
    pub column: i32,
    pub rowspan: Option<i32>,
    pub colspan: Option<i32>,
    pub alignment: Option<String>,
    pub child: LayoutChild,
}

/// The single child a layout item wraps.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutChild {
    Layout(Box<Layout>),
    Spacer(Spacer),
    Widget(Box<Widget>),
}

/// A `<spacer>` element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spacer {
    pub name: String,
    pub properties: Vec<Property>,
}

/// A combo/list/table/tree item.
///
/// `row` and `column` are only meaningful for table cells; nested `items`
/// only for tree widgets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidgetItem {
    pub properties: Vec<Property>,
    pub items: Vec<WidgetItem>,
    pub row: i32,
    pub column: i32,
}

/// A `<row>` or `<column>` header section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderSection {
    pub properties: Vec<Property>,
}

/// An `<action>` element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Action {
    pub name: String,
    pub properties: Vec<Property>,
    pub attributes: Vec<Property>,
}

/// An `<actiongroup>` element. Groups nest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionGroup {
    pub name: String,
    pub actions: Vec<Action>,
    pub action_groups: Vec<ActionGroup>,
    pub properties: Vec<Property>,
    pub attributes: Vec<Property>,
}

/// An `<addaction>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRef {
    pub name: String,
}

impl ActionRef {
    pub const SEPARATOR: &'static str = "separator";

    pub fn is_separator(&self) -> bool {
        self.name == Self::SEPARATOR
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// A `<property>` or `<attribute>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    /// False when the element carries `stdset="0"`.
    pub std_set: bool,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            std_set: true,
            value,
        }
    }
}

/// Every value kind the `.ui` dialect supports. Exactly one is populated
/// per property, chosen by the tag of the property's single child.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Number(i32),
    Float(f32),
    Double(f64),
    LongLong(i64),
    ULongLong(u64),
    Color(Color),
    /// Legacy numeric cursor.
    Cursor(i32),
    CursorShape(String),
    /// `Namespace::Member`
    Enum(String),
    /// Pipe-joined `Namespace::Member` tokens.
    Set(String),
    Font(Font),
    Locale(Locale),
    Palette(Palette),
    Point(Point),
    PointF(PointF),
    Rect(Rect),
    RectF(RectF),
    Size(Size),
    SizeF(SizeF),
    SizePolicy(SizePolicy),
    String(TrString),
    StringList(Vec<String>),
    Date(Date),
    Time(Time),
    DateTime(DateTime),
    Brush(Brush),
    /// Raw narrow string (`<cstring>`).
    CString(String),
    Char(u32),
    Url(String),
    Pixmap(String),
    Icon(IconSet),
}

impl PropertyValue {
    /// The `.ui` tag this value was read from.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Number(_) => "number",
            PropertyValue::Float(_) => "float",
            PropertyValue::Double(_) => "double",
            PropertyValue::LongLong(_) => "longlong",
            PropertyValue::ULongLong(_) => "ulonglong",
            PropertyValue::Color(_) => "color",
            PropertyValue::Cursor(_) => "cursor",
            PropertyValue::CursorShape(_) => "cursorShape",
            PropertyValue::Enum(_) => "enum",
            PropertyValue::Set(_) => "set",
            PropertyValue::Font(_) => "font",
            PropertyValue::Locale(_) => "locale",
            PropertyValue::Palette(_) => "palette",
            PropertyValue::Point(_) => "point",
            PropertyValue::PointF(_) => "pointf",
            PropertyValue::Rect(_) => "rect",
            PropertyValue::RectF(_) => "rectf",
            PropertyValue::Size(_) => "size",
            PropertyValue::SizeF(_) => "sizef",
            PropertyValue::SizePolicy(_) => "sizepolicy",
            PropertyValue::String(_) => "string",
            PropertyValue::StringList(_) => "stringlist",
            PropertyValue::Date(_) => "date",
            PropertyValue::Time(_) => "time",
            PropertyValue::DateTime(_) => "datetime",
            PropertyValue::Brush(_) => "brush",
            PropertyValue::CString(_) => "cstring",
            PropertyValue::Char(_) => "char",
            PropertyValue::Url(_) => "url",
            PropertyValue::Pixmap(_) => "pixmap",
            PropertyValue::Icon(_) => "iconset",
        }
    }
}

/// A `<string>` value, translatable unless `notr="true"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrString {
    pub value: String,
    pub notr: bool,
    /// Disambiguation passed to the translator.
    pub comment: Option<String>,
}

impl TrString {
    pub fn translatable(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            notr: false,
            comment: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
    pub alpha: i32,
}

/// Font descriptor. Zero/false fields mean "not set".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Font {
    pub family: Option<String>,
    pub point_size: i32,
    pub weight: i32,
    pub italic: bool,
    pub bold: bool,
    pub underline: bool,
    pub strikeout: bool,
    pub antialiasing: Option<bool>,
    pub style_strategy: Option<String>,
    pub kerning: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub language: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Palette {
    pub active: Option<ColorGroup>,
    pub inactive: Option<ColorGroup>,
    pub disabled: Option<ColorGroup>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorGroup {
    pub entries: Vec<ColorGroupEntry>,
}

/// Palette groups hold role/brush pairs; bare colors are a legacy form.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorGroupEntry {
    Color(Color),
    Role(ColorRole),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorRole {
    pub role: String,
    pub brush: Brush,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub style: String,
    pub fill: BrushFill,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrushFill {
    Color(Color),
    Gradient(Gradient),
    Texture(String),
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub kind: String,
    pub spread: String,
    pub coordinate_mode: String,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizePolicy {
    pub h_size_type: String,
    pub v_size_type: String,
    pub hor_stretch: i32,
    pub ver_stretch: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
}

/// An `<iconset>`: either a theme name or up to eight mode/state pixmaps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IconSet {
    pub theme: Option<String>,
    pub normal_off: Option<String>,
    pub normal_on: Option<String>,
    pub disabled_off: Option<String>,
    pub disabled_on: Option<String>,
    pub active_off: Option<String>,
    pub active_on: Option<String>,
    pub selected_off: Option<String>,
    pub selected_on: Option<String>,
}

impl IconSet {
    /// Populated pixmaps as `(mode, state, path)`, in a fixed order.
    pub fn pixmaps(&self) -> Vec<(&'static str, &'static str, &str)> {
        [
            ("Normal", "Off", &self.normal_off),
            ("Normal", "On", &self.normal_on),
            ("Disabled", "Off", &self.disabled_off),
            ("Disabled", "On", &self.disabled_on),
            ("Active", "Off", &self.active_off),
            ("Active", "On", &self.active_on),
            ("Selected", "Off", &self.selected_off),
            ("Selected", "On", &self.selected_on),
        ]
        .into_iter()
        .filter_map(|(mode, state, path)| path.as_deref().map(|p| (mode, state, p)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_list() {
        assert_eq!(parse_stretch_list("1, 0,2"), vec![1, 0, 2]);
        assert_eq!(parse_stretch_list("x,3"), vec![0, 3]);
        assert!(parse_stretch_list("").is_empty());
    }

    #[test]
    fn test_icon_pixmap_order() {
        let icon = IconSet {
            selected_on: Some("c.png".into()),
            normal_off: Some("a.png".into()),
            active_off: Some("b.png".into()),
            ..IconSet::default()
        };
        assert_eq!(
            icon.pixmaps(),
            vec![
                ("Normal", "Off", "a.png"),
                ("Active", "Off", "b.png"),
                ("Selected", "On", "c.png"),
            ]
        );
    }

    #[test]
    fn test_separator_ref() {
        assert!(ActionRef { name: "separator".into() }.is_separator());
        assert!(!ActionRef { name: "actionOpen".into() }.is_separator());
    }
}
