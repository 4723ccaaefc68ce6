//! SVG serialization of a [`Drawing`].

use std::fmt;
use std::path::Path;

use tracing::debug;

use super::{Drawing, Primitive, Stroke};
use crate::error::{LanemapError, Result};

/// Renders the drawing as a standalone SVG document.
#[must_use]
pub fn render(drawing: &Drawing) -> String {
    Svg(drawing).to_string()
}

/// Renders the drawing and writes it to `path`.
///
/// # Errors
///
/// Returns `LanemapError::Io` if the file cannot be written.
pub fn write(path: impl AsRef<Path>, drawing: &Drawing) -> Result<()> {
    let path = path.as_ref();
    let text = render(drawing);
    std::fs::write(path, &text).map_err(|source| LanemapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "wrote svg");
    Ok(())
}

struct Svg<'a>(&'a Drawing);

impl fmt::Display for Svg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        writeln!(
            f,
            r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
            d.width, d.height
        )?;
        for primitive in d.primitives() {
            write!(f, "  ")?;
            write_primitive(f, primitive)?;
            writeln!(f)?;
        }
        writeln!(f, "</svg>")
    }
}

fn write_primitive(f: &mut fmt::Formatter<'_>, primitive: &Primitive) -> fmt::Result {
    match primitive {
        Primitive::Path {
            points,
            closed,
            stroke,
        } => {
            write!(f, r#"<path d=""#)?;
            for (i, p) in points.iter().enumerate() {
                let cmd = if i == 0 { "M" } else { " L" };
                write!(f, "{cmd}{} {}", p.x, p.y)?;
            }
            if *closed && !points.is_empty() {
                write!(f, " Z")?;
            }
            write!(f, r#"" fill="none" "#)?;
            write_stroke(f, stroke)?;
            write!(f, " />")
        }
        Primitive::Line { from, to, stroke } => {
            write!(
                f,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" "#,
                from.x, from.y, to.x, to.y
            )?;
            write_stroke(f, stroke)?;
            write!(f, " />")
        }
        Primitive::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            write!(
                f,
                r#"<circle cx="{}" cy="{}" r="{radius}" fill="{}" "#,
                center.x,
                center.y,
                escape(fill.as_deref().unwrap_or("none"))
            )?;
            match stroke {
                Some(stroke) => write_stroke(f, stroke)?,
                None => write!(f, r#"stroke="none""#)?,
            }
            write!(f, " />")
        }
        Primitive::Label {
            position,
            text,
            size,
            fill,
        } => write!(
            f,
            r#"<text x="{}" y="{}" font-size="{size}" fill="{}" text-anchor="middle">{}</text>"#,
            position.x,
            position.y,
            escape(fill),
            escape(text)
        ),
    }
}

fn write_stroke(f: &mut fmt::Formatter<'_>, stroke: &Stroke) -> fmt::Result {
    write!(
        f,
        r#"stroke="{}" stroke-width="{}""#,
        escape(&stroke.color),
        stroke.width
    )
}

/// Escapes XML special characters in attribute values and text.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
