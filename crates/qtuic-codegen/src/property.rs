//! Type-directed emission of property setters.
//!
//! Every value kind maps to one setter call, optionally preceded by
//! statements that fill a helper temporary (`font`, `palette`, `brush`,
//! `sizePolicy`, `icon`). Translatable strings go to `RetranslateUi`.

use qtuic_parser::ast::{
    Brush, BrushFill, ColorGroup, ColorGroupEntry, Font, IconSet, Property, PropertyValue,
    SizePolicy, TrString,
};

use crate::names::{format_float, quote, setter_name, variable_name};
use crate::temps::HelperTemp;
use crate::{CompilationContext, Diagnostic};

/// Where a property's statements are applied.
///
/// Most objects are addressed the same way in both methods. Tree items are
/// built through a reused `treeItemN` variable in `SetupUI` but have to be
/// looked up again (`TopLevelItem(0).Child(1)`) in `RetranslateUi`.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub setup: &'a str,
    pub retranslate: &'a str,
}

impl<'a> Target<'a> {
    pub fn same(expr: &'a str) -> Self {
        Self {
            setup: expr,
            retranslate: expr,
        }
    }
}

/// Emit one property.
///
/// `arg_prefix` is inserted before the value argument, e.g. `"0, "` for
/// item setters that take a column first.
pub fn emit_property(
    ctx: &mut CompilationContext,
    target: Target<'_>,
    prop: &Property,
    arg_prefix: &str,
) {
    // `stdset="0"` marks a dynamic property, which has no setter.
    if !prop.std_set {
        ctx.diagnose(Diagnostic::UnsupportedProperty {
            property: prop.name.clone(),
            kind: "dynamic",
        });
        return;
    }

    let setter = setter_name(&prop.name);
    let obj = target.setup;

    let value = match &prop.value {
        PropertyValue::Bool(v) => v.to_string(),
        PropertyValue::Number(v) => v.to_string(),
        PropertyValue::LongLong(v) => v.to_string(),
        PropertyValue::ULongLong(v) => v.to_string(),
        PropertyValue::Float(v) => format_float(*v),
        PropertyValue::Double(v) => format_float(*v),
        PropertyValue::Color(c) => {
            ctx.request_import("gui");
            format!(
                "gui.NewQColor3({}, {}, {}, {})",
                c.red, c.green, c.blue, c.alpha
            )
        }
        PropertyValue::CursorShape(shape) => {
            ctx.request_import("core");
            ctx.request_import("gui");
            let shape = shape.trim_start_matches("Qt::");
            format!("gui.NewQCursor2(core.Qt__{shape})")
        }
        PropertyValue::Enum(e) => match ctx.resolve_enum(e) {
            Some(v) => v,
            None => return,
        },
        PropertyValue::Set(s) => match ctx.resolve_set(s) {
            Some(v) => v,
            None => return,
        },
        PropertyValue::Font(font) => {
            emit_font(ctx, font);
            "font".to_string()
        }
        PropertyValue::Locale(locale) => {
            ctx.request_import("core");
            format!(
                "core.NewQLocale3(core.QLocale__{}, core.QLocale__{})",
                locale.language, locale.country
            )
        }
        PropertyValue::Palette(palette) => {
            let palette_var = ctx.ensure_temp(HelperTemp::Palette);
            ctx.setup(format!("{palette_var} = gui.NewQPalette()"));
            let groups = [
                ("Active", &palette.active),
                ("Inactive", &palette.inactive),
                ("Disabled", &palette.disabled),
            ];
            for (group_name, group) in groups {
                if let Some(group) = group {
                    emit_color_group(ctx, &prop.name, group_name, group);
                }
            }
            palette_var.to_string()
        }
        PropertyValue::Point(p) => {
            ctx.request_import("core");
            format!("core.NewQPoint2({}, {})", p.x, p.y)
        }
        PropertyValue::PointF(p) => {
            ctx.request_import("core");
            format!(
                "core.NewQPointF3({}, {})",
                format_float(p.x),
                format_float(p.y)
            )
        }
        PropertyValue::Rect(r) => {
            ctx.request_import("core");
            format!(
                "core.NewQRect4({}, {}, {}, {})",
                r.x, r.y, r.width, r.height
            )
        }
        PropertyValue::RectF(r) => {
            ctx.request_import("core");
            format!(
                "core.NewQRectF4({}, {}, {}, {})",
                format_float(r.x),
                format_float(r.y),
                format_float(r.width),
                format_float(r.height)
            )
        }
        PropertyValue::Size(s) => {
            ctx.request_import("core");
            format!("core.NewQSize2({}, {})", s.width, s.height)
        }
        PropertyValue::SizeF(s) => {
            ctx.request_import("core");
            format!(
                "core.NewQSizeF3({}, {})",
                format_float(s.width),
                format_float(s.height)
            )
        }
        PropertyValue::SizePolicy(policy) => {
            emit_size_policy(ctx, obj, policy);
            "sizePolicy".to_string()
        }
        PropertyValue::String(text) => {
            emit_string(ctx, target, &setter, arg_prefix, text);
            return;
        }
        PropertyValue::Date(d) => {
            ctx.request_import("core");
            format!("core.NewQDate3({}, {}, {})", d.year, d.month, d.day)
        }
        PropertyValue::Time(t) => {
            ctx.request_import("core");
            format!("core.NewQTime3({}, {}, {}, 0)", t.hour, t.minute, t.second)
        }
        PropertyValue::DateTime(dt) => {
            ctx.request_import("core");
            format!(
                "core.NewQDateTime3(core.NewQDate3({}, {}, {}), core.NewQTime3({}, {}, {}, 0), core.Qt__LocalTime)",
                dt.date.year, dt.date.month, dt.date.day, dt.time.hour, dt.time.minute, dt.time.second
            )
        }
        PropertyValue::Brush(brush) => match emit_brush(ctx, &prop.name, brush) {
            Some(v) => v,
            None => return,
        },
        PropertyValue::CString(name) if prop.name == "buddy" => {
            // The buddy may be declared after the label.
            ctx.streams.buddies.push(format!(
                "{obj}.{setter}({arg_prefix}this.{})",
                variable_name(name)
            ));
            return;
        }
        PropertyValue::Pixmap(path) => {
            ctx.request_import("gui");
            ctx.request_import("core");
            format!(
                "gui.NewQPixmap5({}, \"\", core.Qt__AutoColor)",
                quote(path)
            )
        }
        PropertyValue::Icon(icon) => {
            emit_icon(ctx, icon);
            "icon".to_string()
        }
        PropertyValue::CString(_)
        | PropertyValue::StringList(_)
        | PropertyValue::Cursor(_)
        | PropertyValue::Char(_)
        | PropertyValue::Url(_) => {
            ctx.diagnose(Diagnostic::UnsupportedProperty {
                property: prop.name.clone(),
                kind: prop.value.kind_name(),
            });
            return;
        }
    };

    ctx.setup(format!("{obj}.{setter}({arg_prefix}{value})"));
}

fn emit_string(
    ctx: &mut CompilationContext,
    target: Target<'_>,
    setter: &str,
    arg_prefix: &str,
    text: &TrString,
) {
    if text.notr {
        ctx.setup(format!(
            "{}.{setter}({arg_prefix}{})",
            target.setup,
            quote(&text.value)
        ));
    } else {
        let call = ctx.translate_call(text);
        ctx.translate(format!("{}.{setter}({arg_prefix}{call})", target.retranslate));
    }
}

/// Fill the `font` temp. Fields left at their zero value are skipped.
fn emit_font(ctx: &mut CompilationContext, font: &Font) {
    ctx.ensure_temp(HelperTemp::Font);
    ctx.setup("font = gui.NewQFont()");

    if let Some(family) = &font.family {
        ctx.setup(format!("font.SetFamily({})", quote(family)));
    }
    if font.point_size != 0 {
        ctx.setup(format!("font.SetPointSize({})", font.point_size));
    }
    if font.weight != 0 {
        ctx.setup(format!("font.SetWeight({})", font.weight));
    }
    let flags = [
        ("SetItalic", font.italic),
        ("SetBold", font.bold),
        ("SetUnderline", font.underline),
        ("SetStrikeOut", font.strikeout),
        ("SetKerning", font.kerning),
    ];
    for (setter, on) in flags {
        if on {
            ctx.setup(format!("font.{setter}(true)"));
        }
    }
    if let Some(antialias) = font.antialiasing {
        let strategy = if antialias { "PreferAntialias" } else { "NoAntialias" };
        ctx.setup(format!("font.SetStyleStrategy(gui.QFont__{strategy})"));
    }
    if let Some(strategy) = &font.style_strategy {
        let strategy = strategy.trim_start_matches("QFont::");
        ctx.setup(format!("font.SetStyleStrategy(gui.QFont__{strategy})"));
    }
}

fn emit_size_policy(ctx: &mut CompilationContext, obj: &str, policy: &SizePolicy) {
    ctx.ensure_temp(HelperTemp::SizePolicy);
    let size_type = |t: &str| t.trim_start_matches("QSizePolicy::").to_string();
    ctx.setup(format!(
        "sizePolicy = widgets.NewQSizePolicy2(widgets.QSizePolicy__{}, widgets.QSizePolicy__{}, widgets.QSizePolicy__DefaultType)",
        size_type(&policy.h_size_type),
        size_type(&policy.v_size_type)
    ));
    ctx.setup(format!(
        "sizePolicy.SetHorizontalStretch({})",
        policy.hor_stretch
    ));
    ctx.setup(format!("sizePolicy.SetVerticalStretch({})", policy.ver_stretch));
    ctx.setup(format!(
        "sizePolicy.SetHeightForWidth({obj}.SizePolicy().HasHeightForWidth())"
    ));
}

/// Fill the `brush` temp from a solid color brush.
///
/// Gradient and texture fills are reported and yield `None`.
fn emit_brush(ctx: &mut CompilationContext, property: &str, brush: &Brush) -> Option<String> {
    let color = match &brush.fill {
        BrushFill::Color(color) => color,
        BrushFill::Gradient(gradient) => {
            ctx.diagnose(Diagnostic::UnsupportedBrush {
                property: property.to_string(),
                reason: format!("{} gradient fill", gradient.kind),
            });
            return None;
        }
        BrushFill::Texture(_) => {
            ctx.diagnose(Diagnostic::UnsupportedBrush {
                property: property.to_string(),
                reason: "texture fill".to_string(),
            });
            return None;
        }
        BrushFill::None => {
            ctx.diagnose(Diagnostic::UnsupportedBrush {
                property: property.to_string(),
                reason: "brush without a fill".to_string(),
            });
            return None;
        }
    };

    let brush_var = ctx.ensure_temp(HelperTemp::Brush);
    ctx.request_import("core");
    ctx.setup(format!(
        "{brush_var} = gui.NewQBrush3(gui.NewQColor3({}, {}, {}, {}), core.Qt__{})",
        color.red, color.green, color.blue, color.alpha, brush.style
    ));
    Some(brush_var.to_string())
}

fn emit_color_group(
    ctx: &mut CompilationContext,
    property: &str,
    group_name: &str,
    group: &ColorGroup,
) {
    for entry in &group.entries {
        let role = match entry {
            ColorGroupEntry::Role(role) => role,
            ColorGroupEntry::Color(_) => {
                ctx.diagnose(Diagnostic::UnsupportedBrush {
                    property: property.to_string(),
                    reason: format!("{group_name} palette entry without a color role"),
                });
                continue;
            }
        };
        if let Some(brush) = emit_brush(ctx, property, &role.brush) {
            ctx.setup(format!(
                "palette.SetBrush2(gui.QPalette__{group_name}, gui.QPalette__{}, {brush})",
                role.role
            ));
        }
    }
}

/// Fill the `icon` temp: a theme icon, or one pixmap per mode/state.
pub fn emit_icon(ctx: &mut CompilationContext, icon: &IconSet) {
    ctx.ensure_temp(HelperTemp::Icon);

    if let Some(theme) = &icon.theme {
        ctx.setup(format!("icon = gui.QIcon_FromTheme({})", quote(theme)));
        return;
    }

    ctx.setup("icon = gui.NewQIcon()");
    let pixmaps = icon.pixmaps();
    if !pixmaps.is_empty() {
        ctx.request_import("core");
    }
    for (mode, state, path) in pixmaps {
        ctx.setup(format!(
            "icon.AddPixmap(gui.NewQPixmap5({}, \"\", core.Qt__AutoColor), gui.QIcon__{mode}, gui.QIcon__{state})",
            quote(path)
        ));
    }
}
