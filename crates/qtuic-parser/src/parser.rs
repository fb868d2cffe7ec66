//! Tree builder for `.ui` documents.
//!
//! Walks the element tree produced by `qtuic-dom` depth-first and builds
//! the typed [`Document`]. Dispatch is by tag name: the kind of a property
//! or attribute value is decided by the tag of its single child element.
//!
//! Structural invariant violations are returned as [`ParseError`]; the
//! documents are expected to come from Designer, so there is no recovery.

use crate::ast::{
    Action, ActionGroup, ActionRef, Brush, BrushFill, ButtonGroup, Color, ColorGroup,
    ColorGroupEntry, ColorRole, Connection, Date, DateTime, Document, Font, Gradient,
    GradientStop, HeaderSection, IconSet, Layout, LayoutChild, LayoutDefault, LayoutItem, Locale,
    Palette, Point, PointF, Property, PropertyValue, Rect, RectF, Size, SizeF, SizePolicy, Spacer,
    Time, TrString, Widget, WidgetItem,
};
use crate::ParseError;
use qtuic_dom::Node;

/// `.ui` document parser.
pub struct Parser;

impl Parser {
    /// Parse `.ui` source text into a document.
    pub fn parse(source: &str) -> Result<Document, ParseError> {
        let root = Node::parse(source)?;
        Parser::parse_root(&root)
    }

    /// Build a document from an already-read `<ui>` element.
    pub fn parse_root(root: &Node) -> Result<Document, ParseError> {
        if root.tag != "ui" {
            return Err(error(format!("expected <ui> root element, found <{}>", root.tag)));
        }

        let widget_node = root
            .child("widget")
            .ok_or_else(|| error("document has no <widget> element"))?;
        let widget = parse_widget(widget_node)?;

        let class = root
            .child_value("class")
            .or_else(|| root.attr("class"))
            .unwrap_or_default()
            .trim()
            .to_string();

        let layout_default = root.child("layoutdefault").map(|n| LayoutDefault {
            spacing: n.attr_int("spacing"),
            margin: n.attr_int("margin"),
        });

        let tab_stops: Vec<String> = root
            .child("tabstops")
            .map(|n| {
                n.children_named("tabstop")
                    .map(|t| t.value().trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let mut button_groups = Vec::new();
        if let Some(groups) = root.child("buttongroups") {
            for group in groups.children_named("buttongroup") {
                button_groups.push(parse_button_group(group)?);
            }
        }

        let connections = root
            .child("connections")
            .map(|n| n.children_named("connection").map(parse_connection).collect())
            .unwrap_or_default();

        log::debug!(
            "parsed document {class}: {} tab stops, {} button groups",
            tab_stops.len(),
            button_groups.len()
        );

        Ok(Document {
            class,
            widget,
            layout_default,
            tab_stops,
            button_groups,
            connections,
        })
    }
}

fn error(message: impl Into<String>) -> ParseError {
    ParseError {
        message: message.into(),
    }
}

fn name_of(n: &Node) -> String {
    n.attr("name").unwrap_or_default().to_string()
}

// =========================================================================
// Structural nodes
// =========================================================================

fn parse_widget(n: &Node) -> Result<Widget, ParseError> {
    let mut widget = Widget {
        class: n.attr("class").unwrap_or_default().to_string(),
        name: name_of(n),
        ..Widget::default()
    };

    for ch in &n.children {
        match ch.tag.as_str() {
            "property" => widget.properties.push(parse_property(ch)?),
            "attribute" => widget.attributes.push(parse_property(ch)?),
            "widget" => widget.widgets.push(parse_widget(ch)?),
            "layout" => widget.layout = Some(Box::new(parse_layout(ch)?)),
            "item" => widget.items.push(parse_widget_item(ch)?),
            "row" => widget.rows.push(parse_header_section(ch)?),
            "column" => widget.columns.push(parse_header_section(ch)?),
            "action" => widget.actions.push(parse_action(ch)?),
            "actiongroup" => widget.action_groups.push(parse_action_group(ch)?),
            "addaction" => widget.action_refs.push(ActionRef { name: name_of(ch) }),
            "zorder" => widget.z_orders.push(ch.value().trim().to_string()),
            // Designer bookkeeping with no runtime effect
            "class" | "script" | "widgetdata" => {}
            other => {
                return Err(error(format!(
                    "unexpected <{other}> inside widget '{}'",
                    widget.name
                )))
            }
        }
    }

    if widget.layout.is_some() && !widget.widgets.is_empty() {
        return Err(error(format!(
            "widget '{}' has both a layout and {} child widget(s)",
            widget.name,
            widget.widgets.len()
        )));
    }

    Ok(widget)
}

fn parse_layout(n: &Node) -> Result<Layout, ParseError> {
    let attr = |key: &str| n.attr(key).unwrap_or_default().to_string();
    let mut layout = Layout {
        class: attr("class"),
        name: attr("name"),
        stretch: attr("stretch"),
        row_stretch: attr("rowstretch"),
        column_stretch: attr("columnstretch"),
        row_minimum_height: attr("rowminimumheight"),
        column_minimum_width: attr("columnminimumwidth"),
        ..Layout::default()
    };

    for ch in &n.children {
        match ch.tag.as_str() {
            "property" => layout.properties.push(parse_property(ch)?),
            "attribute" => layout.attributes.push(parse_property(ch)?),
            "item" => layout.items.push(parse_layout_item(ch)?),
            other => {
                return Err(error(format!(
                    "unexpected <{other}> inside layout '{}'",
                    layout.name
                )))
            }
        }
    }

    Ok(layout)
}

fn parse_layout_item(n: &Node) -> Result<LayoutItem, ParseError> {
    let [child] = n.children.as_slice() else {
        return Err(error(format!(
            "layout item must have exactly one child, found {}",
            n.children.len()
        )));
    };

    let child = match child.tag.as_str() {
        "layout" => LayoutChild::Layout(Box::new(parse_layout(child)?)),
        "spacer" => LayoutChild::Spacer(parse_spacer(child)?),
        "widget" => LayoutChild::Widget(Box::new(parse_widget(child)?)),
        other => return Err(error(format!("bad layout item child <{other}>"))),
    };

    Ok(LayoutItem {
        row: n.attr_int("row").unwrap_or(0),
        column: n.attr_int("column").unwrap_or(0),
        rowspan: n.attr_int("rowspan"),
        colspan: n.attr_int("colspan"),
        alignment: n.attr("alignment").map(str::to_string),
        child,
    })
}

fn parse_spacer(n: &Node) -> Result<Spacer, ParseError> {
    let name = name_of(n);
    let mut properties = Vec::new();

    for ch in &n.children {
        if ch.tag != "property" {
            return Err(error(format!("unexpected <{}> inside spacer '{name}'", ch.tag)));
        }
        properties.push(parse_property(ch)?);
    }

    Ok(Spacer { name, properties })
}

fn parse_widget_item(n: &Node) -> Result<WidgetItem, ParseError> {
    let mut item = WidgetItem {
        row: n.attr_int("row").unwrap_or(0),
        column: n.attr_int("column").unwrap_or(0),
        ..WidgetItem::default()
    };

    for ch in &n.children {
        match ch.tag.as_str() {
            "property" => item.properties.push(parse_property(ch)?),
            "item" => item.items.push(parse_widget_item(ch)?),
            other => return Err(error(format!("unexpected <{other}> inside item"))),
        }
    }

    Ok(item)
}

fn parse_header_section(n: &Node) -> Result<HeaderSection, ParseError> {
    let mut properties = Vec::new();
    for ch in n.children_named("property") {
        properties.push(parse_property(ch)?);
    }
    Ok(HeaderSection { properties })
}

fn parse_action(n: &Node) -> Result<Action, ParseError> {
    let mut action = Action {
        name: name_of(n),
        ..Action::default()
    };

    for ch in &n.children {
        match ch.tag.as_str() {
            "property" => action.properties.push(parse_property(ch)?),
            "attribute" => action.attributes.push(parse_property(ch)?),
            other => {
                return Err(error(format!(
                    "unexpected <{other}> inside action '{}'",
                    action.name
                )))
            }
        }
    }

    Ok(action)
}

fn parse_action_group(n: &Node) -> Result<ActionGroup, ParseError> {
    let mut group = ActionGroup {
        name: name_of(n),
        ..ActionGroup::default()
    };

    for ch in &n.children {
        match ch.tag.as_str() {
            "action" => group.actions.push(parse_action(ch)?),
            "actiongroup" => group.action_groups.push(parse_action_group(ch)?),
            "property" => group.properties.push(parse_property(ch)?),
            "attribute" => group.attributes.push(parse_property(ch)?),
            other => {
                return Err(error(format!(
                    "unexpected <{other}> inside action group '{}'",
                    group.name
                )))
            }
        }
    }

    Ok(group)
}

fn parse_button_group(n: &Node) -> Result<ButtonGroup, ParseError> {
    let mut properties = Vec::new();
    for ch in n.children_named("property") {
        properties.push(parse_property(ch)?);
    }
    Ok(ButtonGroup {
        name: name_of(n),
        properties,
    })
}

fn parse_connection(n: &Node) -> Connection {
    let field = |tag: &str| n.child_value(tag).unwrap_or_default().trim().to_string();
    Connection {
        sender: field("sender"),
        signal: field("signal"),
        receiver: field("receiver"),
        slot: field("slot"),
    }
}

// =========================================================================
// Properties
// =========================================================================

/// Parse a `<property>` or `<attribute>` element.
fn parse_property(n: &Node) -> Result<Property, ParseError> {
    let name = name_of(n);

    let [child] = n.children.as_slice() else {
        return Err(error(format!(
            "property '{name}' must have exactly one value element, found {}",
            n.children.len()
        )));
    };

    Ok(Property {
        std_set: n.attr_int("stdset").map_or(true, |v| v != 0),
        value: parse_value(child, &name)?,
        name,
    })
}

fn parse_value(n: &Node, owner: &str) -> Result<PropertyValue, ParseError> {
    let value = match n.tag.as_str() {
        "bool" => PropertyValue::Bool(n.bool_value()),
        "number" => PropertyValue::Number(n.int_value()),
        "float" => PropertyValue::Float(n.f32_value()),
        "double" => PropertyValue::Double(n.f64_value()),
        "longlong" => PropertyValue::LongLong(n.i64_value()),
        "ulonglong" => PropertyValue::ULongLong(n.u64_value()),
        "color" => PropertyValue::Color(parse_color(n)),
        "cursor" => PropertyValue::Cursor(n.int_value()),
        "cursorShape" => PropertyValue::CursorShape(n.value().trim().to_string()),
        "enum" => PropertyValue::Enum(n.value().trim().to_string()),
        "set" => PropertyValue::Set(n.value().trim().to_string()),
        "font" => PropertyValue::Font(parse_font(n)),
        "locale" => PropertyValue::Locale(Locale {
            language: n.attr("language").unwrap_or_default().to_string(),
            country: n.attr("country").unwrap_or_default().to_string(),
        }),
        "palette" => PropertyValue::Palette(parse_palette(n)?),
        "point" => PropertyValue::Point(Point {
            x: n.child_int("x"),
            y: n.child_int("y"),
        }),
        "pointf" => PropertyValue::PointF(PointF {
            x: n.child_f64("x"),
            y: n.child_f64("y"),
        }),
        "rect" => PropertyValue::Rect(Rect {
            x: n.child_int("x"),
            y: n.child_int("y"),
            width: n.child_int("width"),
            height: n.child_int("height"),
        }),
        "rectf" => PropertyValue::RectF(RectF {
            x: n.child_f64("x"),
            y: n.child_f64("y"),
            width: n.child_f64("width"),
            height: n.child_f64("height"),
        }),
        "size" => PropertyValue::Size(Size {
            width: n.child_int("width"),
            height: n.child_int("height"),
        }),
        "sizef" => PropertyValue::SizeF(SizeF {
            width: n.child_f64("width"),
            height: n.child_f64("height"),
        }),
        "sizepolicy" => PropertyValue::SizePolicy(parse_size_policy(n)),
        "string" => PropertyValue::String(parse_string(n)),
        "stringlist" => PropertyValue::StringList(
            n.children_named("string")
                .map(|s| s.value().to_string())
                .collect(),
        ),
        "date" => PropertyValue::Date(parse_date(n)),
        "time" => PropertyValue::Time(parse_time(n)),
        "datetime" => PropertyValue::DateTime(DateTime {
            date: parse_date(n),
            time: parse_time(n),
        }),
        "brush" => PropertyValue::Brush(parse_brush(n)?),
        "cstring" => PropertyValue::CString(n.value().trim().to_string()),
        "char" => PropertyValue::Char(n.child_int("unicode").max(0) as u32),
        "url" => PropertyValue::Url(n.child_value("string").unwrap_or_default().to_string()),
        "pixmap" => PropertyValue::Pixmap(n.value().trim().to_string()),
        "iconset" => PropertyValue::Icon(parse_iconset(n)),
        other => {
            return Err(error(format!(
                "unsupported value element <{other}> in property '{owner}'"
            )))
        }
    };
    Ok(value)
}

fn parse_string(n: &Node) -> TrString {
    TrString {
        value: n.value().to_string(),
        notr: n.attr_bool("notr").unwrap_or(false),
        comment: n
            .attr("comment")
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    }
}

fn parse_color(n: &Node) -> Color {
    Color {
        red: n.child_int("red"),
        green: n.child_int("green"),
        blue: n.child_int("blue"),
        alpha: n.attr_int("alpha").unwrap_or(255),
    }
}

/// Font sub-fields are read by name; absent ones keep their zero value.
fn parse_font(n: &Node) -> Font {
    Font {
        family: n.child_value("family").map(|f| f.trim().to_string()),
        point_size: n.child_int("pointsize"),
        weight: n.child_int("weight"),
        italic: n.child_bool("italic"),
        bold: n.child_bool("bold"),
        underline: n.child_bool("underline"),
        strikeout: n.child_bool("strikeout"),
        antialiasing: n.child("antialiasing").map(Node::bool_value),
        style_strategy: n
            .child_value("stylestrategy")
            .map(|s| s.trim().to_string()),
        kerning: n.child_bool("kerning"),
    }
}

fn parse_size_policy(n: &Node) -> SizePolicy {
    // Designer writes the size types as attributes; very old files used elements.
    let size_type = |key: &str| {
        n.attr(key)
            .or_else(|| n.child_value(key))
            .unwrap_or("Preferred")
            .trim()
            .to_string()
    };
    SizePolicy {
        h_size_type: size_type("hsizetype"),
        v_size_type: size_type("vsizetype"),
        hor_stretch: n.child_int("horstretch"),
        ver_stretch: n.child_int("verstretch"),
    }
}

fn parse_date(n: &Node) -> Date {
    Date {
        year: n.child_int("year"),
        month: n.child_int("month"),
        day: n.child_int("day"),
    }
}

fn parse_time(n: &Node) -> Time {
    Time {
        hour: n.child_int("hour"),
        minute: n.child_int("minute"),
        second: n.child_int("second"),
    }
}

fn parse_palette(n: &Node) -> Result<Palette, ParseError> {
    let group = |tag: &str| n.child(tag).map(parse_color_group).transpose();
    Ok(Palette {
        active: group("active")?,
        inactive: group("inactive")?,
        disabled: group("disabled")?,
    })
}

fn parse_color_group(n: &Node) -> Result<ColorGroup, ParseError> {
    let mut entries = Vec::new();
    for ch in &n.children {
        match ch.tag.as_str() {
            "color" => entries.push(ColorGroupEntry::Color(parse_color(ch))),
            "colorrole" => {
                let brush = ch
                    .child("brush")
                    .ok_or_else(|| error("palette color role without a brush"))?;
                entries.push(ColorGroupEntry::Role(ColorRole {
                    role: ch.attr("role").unwrap_or_default().to_string(),
                    brush: parse_brush(brush)?,
                }));
            }
            other => return Err(error(format!("unexpected <{other}> inside palette group"))),
        }
    }
    Ok(ColorGroup { entries })
}

fn parse_brush(n: &Node) -> Result<Brush, ParseError> {
    let fill = match n.children.first() {
        None => BrushFill::None,
        Some(ch) => match ch.tag.as_str() {
            "color" => BrushFill::Color(parse_color(ch)),
            "gradient" => BrushFill::Gradient(parse_gradient(ch)),
            "texture" => BrushFill::Texture(
                ch.child_value("pixmap")
                    .unwrap_or(ch.value())
                    .trim()
                    .to_string(),
            ),
            other => return Err(error(format!("unexpected <{other}> inside brush"))),
        },
    };

    Ok(Brush {
        style: n.attr("brushstyle").unwrap_or("SolidPattern").to_string(),
        fill,
    })
}

fn parse_gradient(n: &Node) -> Gradient {
    let attr = |key: &str| n.attr(key).unwrap_or_default().to_string();
    Gradient {
        kind: attr("type"),
        spread: attr("spread"),
        coordinate_mode: attr("coordinatemode"),
        stops: n
            .children_named("gradientstop")
            .map(|stop| GradientStop {
                position: stop.attr_f64("position").unwrap_or(0.0),
                color: stop.child("color").map(parse_color).unwrap_or(Color {
                    red: 0,
                    green: 0,
                    blue: 0,
                    alpha: 255,
                }),
            })
            .collect(),
    }
}

fn parse_iconset(n: &Node) -> IconSet {
    let state = |tag: &str| n.child_value(tag).map(|v| v.trim().to_string());
    let mut icon = IconSet {
        theme: n
            .attr("theme")
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        normal_off: state("normaloff"),
        normal_on: state("normalon"),
        disabled_off: state("disabledoff"),
        disabled_on: state("disabledon"),
        active_off: state("activeoff"),
        active_on: state("activeon"),
        selected_off: state("selectedoff"),
        selected_on: state("selectedon"),
    };

    // Pre-4.4 files store a single path as the element text.
    let legacy = n.value().trim();
    if n.children.is_empty() && !legacy.is_empty() {
        icon.normal_off = Some(legacy.to_string());
    }

    icon
}
