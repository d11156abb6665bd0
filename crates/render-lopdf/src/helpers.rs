use ballotpress_types::{Color, Rect};
use ballotpress_render_core::Paint;
use lopdf::content::Operation;
use lopdf::{Dictionary, Object, dictionary};

/// Base fonts every PDF reader provides without embedding.
pub const STANDARD_FONTS: [&str; 14] = [
    "Courier",
    "Courier-Bold",
    "Courier-BoldOblique",
    "Courier-Oblique",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-BoldOblique",
    "Helvetica-Oblique",
    "Symbol",
    "Times-Bold",
    "Times-BoldItalic",
    "Times-Italic",
    "Times-Roman",
    "ZapfDingbats",
];

// Control point offset for a quarter circle drawn as one cubic Bezier.
const KAPPA: f32 = 0.552_284_8;

/// Encodes text for a WinAnsiEncoding font; characters outside Latin-1 become '?'.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c as u32 <= 255 { c as u8 } else { b'?' })
        .collect()
}

pub(crate) fn color_operation(operator: &str, color: Color) -> Operation {
    let [r, g, b] = color.unit_rgb();
    Operation::new(operator, vec![r.into(), g.into(), b.into()])
}

pub(crate) fn dash_operation(pattern: &[f32]) -> Operation {
    let array: Vec<Object> = pattern.iter().map(|v| Object::Real(*v)).collect();
    Operation::new("d", vec![array.into(), 0.into()])
}

pub(crate) fn paint_operator(paint: Paint) -> &'static str {
    match paint {
        Paint::Stroke => "S",
        Paint::Fill => "f",
        Paint::FillStroke => "B",
    }
}

/// Path construction for a rectangle with circular corners, not yet painted.
pub(crate) fn rounded_rect_path(rect: Rect, radius: f32) -> Vec<Operation> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let (l, b, rt, t) = (rect.left(), rect.bottom(), rect.right(), rect.top());
    let k = r * KAPPA;
    let point = |x: f32, y: f32| -> Vec<Object> { vec![x.into(), y.into()] };
    let curve = |pts: [f32; 6]| -> Operation {
        Operation::new("c", pts.iter().map(|v| Object::Real(*v)).collect())
    };
    vec![
        Operation::new("m", point(l + r, b)),
        Operation::new("l", point(rt - r, b)),
        curve([rt - r + k, b, rt, b + r - k, rt, b + r]),
        Operation::new("l", point(rt, t - r)),
        curve([rt, t - r + k, rt - r + k, t, rt - r, t]),
        Operation::new("l", point(l + r, t)),
        curve([l + r - k, t, l, t - r + k, l, t - r]),
        Operation::new("l", point(l, b + r)),
        curve([l, b + r - k, l + r - k, b, l + r, b]),
        Operation::new("h", vec![]),
    ]
}

/// Type1 font dictionary entries keyed by resource name.
pub(crate) fn font_resources<'a>(fonts: impl Iterator<Item = (&'a String, &'a String)>) -> Dictionary {
    let mut font_dict = Dictionary::new();
    for (base_font, resource_name) in fonts {
        let single_font_dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
            "Encoding" => "WinAnsiEncoding",
        };
        font_dict.set(resource_name.as_bytes(), Object::Dictionary(single_font_dict));
    }
    font_dict
}
