//! QR code rendering to inline SVG

use qrcode::types::QrError;
use qrcode::{Color, QrCode};
use std::fmt::{self, Write};

/// Visual parameters of the rendered code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrStyle {
    /// Pixel width of the SVG element
    pub width: u32,
    /// Pixel height of the SVG element
    pub height: u32,
    /// Light border around the code, in modules
    pub padding: u32,
    /// Merge dark modules into a single path instead of one rect each
    pub join: bool,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            padding: 1,
            join: true,
        }
    }
}

impl QrStyle {
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QrRenderError {
    DataTooLong,
    Encode(String),
}

impl fmt::Display for QrRenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QrRenderError::DataTooLong => write!(f, "Content too long for a QR code"),
            QrRenderError::Encode(e) => write!(f, "QR encoding failed: {}", e),
        }
    }
}

impl std::error::Error for QrRenderError {}

impl From<QrError> for QrRenderError {
    fn from(e: QrError) -> Self {
        match e {
            QrError::DataTooLong => QrRenderError::DataTooLong,
            other => QrRenderError::Encode(other.to_string()),
        }
    }
}

/// Encode `content` and render it as a standalone `<svg>` element
pub fn render_svg(content: &str, style: &QrStyle) -> Result<String, QrRenderError> {
    let code = QrCode::new(content.as_bytes())?;
    let modules = code.width();
    let colors = code.to_colors();
    let pad = style.padding as usize;
    let extent = modules + 2 * pad;

    let mut svg = String::new();
    // Writing into a String cannot fail
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{}" height="{}" viewBox="0 0 {} {}" shape-rendering="crispEdges">"#,
        style.width, style.height, extent, extent
    );
    let _ = write!(
        svg,
        r##"<rect x="0" y="0" width="{}" height="{}" fill="#ffffff"/>"##,
        extent, extent
    );

    if style.join {
        let mut d = String::new();
        for y in 0..modules {
            let row = &colors[y * modules..(y + 1) * modules];
            let mut x = 0;
            while x < modules {
                if row[x] != Color::Dark {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < modules && row[x] == Color::Dark {
                    x += 1;
                }
                let run = x - start;
                let _ = write!(d, "M{},{}h{}v1h-{}z", start + pad, y + pad, run, run);
            }
        }
        let _ = write!(svg, r##"<path d="{}" fill="#000000"/>"##, d);
    } else {
        for (i, color) in colors.iter().enumerate() {
            if *color == Color::Dark {
                let _ = write!(
                    svg,
                    r##"<rect x="{}" y="{}" width="1" height="1" fill="#000000"/>"##,
                    i % modules + pad,
                    i / modules + pad
                );
            }
        }
    }

    svg.push_str("</svg>");
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "dclogin:user%40example.org?p=secret&v=1&ic=3";

    #[test]
    fn test_svg_dimensions() {
        let svg = render_svg(URL, &QrStyle::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"width="300""#));
        assert!(svg.contains(r#"height="300""#));
    }

    #[test]
    fn test_padding_in_viewbox() {
        let code = QrCode::new(URL.as_bytes()).unwrap();
        let modules = code.width();

        let svg = render_svg(URL, &QrStyle::default()).unwrap();
        let expected = format!("viewBox=\"0 0 {} {}\"", modules + 2, modules + 2);
        assert!(svg.contains(&expected));

        let style = QrStyle { padding: 4, ..QrStyle::default() };
        let svg = render_svg(URL, &style).unwrap();
        let expected = format!("viewBox=\"0 0 {} {}\"", modules + 8, modules + 8);
        assert!(svg.contains(&expected));
    }

    #[test]
    fn test_joined_uses_single_path() {
        let svg = render_svg(URL, &QrStyle::default()).unwrap();
        assert_eq!(svg.matches("<path").count(), 1);
        // Only the background rect
        assert_eq!(svg.matches("<rect").count(), 1);
    }

    #[test]
    fn test_unjoined_uses_rects() {
        let style = QrStyle { join: false, ..QrStyle::default() };
        let svg = render_svg(URL, &style).unwrap();
        assert_eq!(svg.matches("<path").count(), 0);

        let code = QrCode::new(URL.as_bytes()).unwrap();
        let dark = code.to_colors().iter().filter(|c| **c == Color::Dark).count();
        assert_eq!(svg.matches("<rect").count(), dark + 1);
    }

    #[test]
    fn test_first_module_offset_by_padding() {
        // Top-left finder pattern is always dark
        let svg = render_svg(URL, &QrStyle::default()).unwrap();
        assert!(svg.contains("M1,1h7v1h-7z"));
    }

    #[test]
    fn test_data_too_long() {
        let content = "x".repeat(8000);
        assert_eq!(
            render_svg(&content, &QrStyle::default()),
            Err(QrRenderError::DataTooLong)
        );
    }

    #[test]
    fn test_square() {
        let style = QrStyle::square(128);
        assert_eq!(style.width, 128);
        assert_eq!(style.height, 128);
        assert_eq!(style.padding, 1);
        assert!(style.join);
    }
}
