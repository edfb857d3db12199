//! Vector draw operations as SVG markup for `usvg`.
//!
//! Text runs name the face the [`FontBook`] resolved, so the family `usvg`
//! looks up is always one that exists in the shared database.

use std::fmt::Write;

use festive_core::{DrawOp, FontStyle, FontWeight, Rgba, TextAlign, TextBaseline};

use crate::font::FontBook;

/// Build an SVG document of the given size from vector ops.
///
/// Image ops are skipped; the caller composites them directly.
#[must_use]
pub fn document<'a>(
    width: u32,
    height: u32,
    ops: impl IntoIterator<Item = &'a DrawOp>,
    fonts: &FontBook,
) -> String {
    let mut svg = String::with_capacity(2048);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    );
    for op in ops {
        write_op(&mut svg, op, fonts);
    }
    svg.push_str("</svg>");
    svg
}

fn write_op(svg: &mut String, op: &DrawOp, fonts: &FontBook) {
    match op {
        DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" {}/>",
                paint("fill", *color),
            );
        }

        DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
            color,
            line_width,
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"none\" {} stroke-width=\"{line_width}\"/>",
                paint("stroke", *color),
            );
        }

        DrawOp::FillCircle {
            cx,
            cy,
            radius,
            color,
        } => {
            let _ = write!(
                svg,
                "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{radius}\" {}/>",
                paint("fill", *color),
            );
        }

        DrawOp::Text {
            content,
            x,
            y,
            font,
            color,
            align,
            baseline,
        } => {
            let Some(face) = fonts.resolve(font) else {
                tracing::trace!("Skipping text with no face: {content:?}");
                return;
            };
            let anchor = match align {
                TextAlign::Start => "start",
                TextAlign::Center => "middle",
                TextAlign::End => "end",
            };
            let dominant = match baseline {
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Middle => "central",
            };
            let weight = match font.weight {
                FontWeight::Normal => "normal",
                FontWeight::Bold => "bold",
            };
            let style = match font.style {
                FontStyle::Normal => "normal",
                FontStyle::Italic => "italic",
            };
            let _ = write!(
                svg,
                "<text x=\"{x}\" y=\"{y}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{weight}\" font-style=\"{style}\" text-anchor=\"{anchor}\" dominant-baseline=\"{dominant}\" xml:space=\"preserve\" {}>{}</text>",
                escape_xml(&face.family),
                font.size_px,
                paint("fill", *color),
                escape_xml(content),
            );
        }

        DrawOp::Image { .. } => {}
    }
}

/// `fill="rgb(..)"` plus an opacity attribute when translucent.
fn paint(attr: &str, color: Rgba) -> String {
    let Rgba { r, g, b, a } = color;
    if a == 255 {
        format!("{attr}=\"rgb({r},{g},{b})\"")
    } else {
        let opacity = f32::from(a) / 255.0;
        format!("{attr}=\"rgb({r},{g},{b})\" {attr}-opacity=\"{opacity}\"")
    }
}

/// Escape special XML characters.
pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use festive_core::{card, CardComposer, FixedAdvance, Filter};

    #[test]
    fn card_ops_become_shapes() {
        let list = CardComposer::new().display_list(&FixedAdvance::default());
        let svg = document(list.width, list.height, &list.ops, &FontBook::empty());

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"600\" height=\"800\""));
        assert!(svg.contains("fill=\"rgb(212,36,38)\""));
        assert!(svg.contains("stroke=\"rgb(255,255,255)\" stroke-width=\"10\""));
        assert_eq!(svg.matches("<circle").count(), 4);
        // No faces, so no text.
        assert!(!svg.contains("<text"));
        assert_eq!(card::CARD_WIDTH, list.width);
    }

    #[test]
    fn image_ops_are_left_to_the_compositor() {
        let op = DrawOp::Image {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            filter: Filter::Sepia,
        };
        let svg = document(10, 10, [&op], &FontBook::empty());
        assert_eq!(svg.matches('<').count(), 2);
    }

    #[test]
    fn translucent_paint_carries_opacity() {
        let color = Rgba { r: 0, g: 0, b: 0, a: 51 };
        assert_eq!(paint("fill", color), "fill=\"rgb(0,0,0)\" fill-opacity=\"0.2\"");
    }

    #[test]
    fn test_xml_escaping() {
        assert_eq!(
            escape_xml("<b>\"Tom & Jerry's\"</b>"),
            "&lt;b&gt;&quot;Tom &amp; Jerry&apos;s&quot;&lt;/b&gt;"
        );
    }
}
