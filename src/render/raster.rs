//! CPU rasterizer for PNG export.
//!
//! Paints a `Scene` into a tiny-skia `Pixmap` at `scene.scale` device pixels
//! per logical unit. Labels are shaped and rasterized with cosmic-text and
//! composited through the same pixmap; `image` does the PNG encoding.

use std::io::Cursor;

use cosmic_text::{Attrs as TextAttrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};
use glam::Vec2;
use image::{ImageFormat, RgbaImage};
use log::{debug, trace};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform};

use super::scene::{Scene, Shape, TextAnchor};
use crate::entities::Rgba;
use crate::error::{TimelineError, TimelineResult};

/// Line height as a multiple of font size.
const LINE_HEIGHT: f32 = 1.2;

/// Largest image side an export may produce, in device pixels.
pub const MAX_EXPORT_SIDE: u32 = 32_767;
/// Largest total pixel count an export may produce (1 GiB of RGBA).
pub const MAX_EXPORT_PIXELS: u64 = 1 << 28;

/// Owns the font database; expensive to build, so keep one around.
pub struct Rasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Device pixel size of `scene`, refused when it is over the export limits.
pub fn image_size(scene: &Scene) -> TimelineResult<(u32, u32)> {
    let w = (scene.size.x * scene.scale).ceil().max(1.0);
    let h = (scene.size.y * scene.scale).ceil().max(1.0);
    if !w.is_finite() || !h.is_finite() {
        return Err(TimelineError::Export("image size is not finite".to_string()));
    }
    let too_big = w > MAX_EXPORT_SIDE as f32 || h > MAX_EXPORT_SIDE as f32 || (w as u64) * (h as u64) > MAX_EXPORT_PIXELS;
    if too_big {
        return Err(TimelineError::Export(format!(
            "image of {}x{} px is over the limit ({} px per side, {} px total); lower the zoom or pixel ratio",
            w, h, MAX_EXPORT_SIDE, MAX_EXPORT_PIXELS
        )));
    }
    Ok((w as u32, h as u32))
}

fn paint_of(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    pub fn render(&mut self, scene: &Scene) -> TimelineResult<RgbaImage> {
        let (width, height) = image_size(scene)?;
        let s = scene.scale;
        debug!("Rasterizing {}x{} ({} shapes, scale {:.2})", width, height, scene.shapes.len(), s);

        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| TimelineError::Export(format!("failed to allocate {}x{} surface", width, height)))?;
        let bg = scene.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        let transform = Transform::from_scale(s, s);

        for shape in &scene.shapes {
            match shape {
                Shape::Line {
                    from,
                    to,
                    width,
                    color,
                    dash,
                } => {
                    let mut pb = PathBuilder::new();
                    pb.move_to(from.x, from.y);
                    pb.line_to(to.x, to.y);
                    let Some(path) = pb.finish() else {
                        continue;
                    };
                    let stroke = Stroke {
                        width: *width,
                        dash: dash.and_then(|(on, off)| StrokeDash::new(vec![on, off], 0.0)),
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &paint_of(*color), &stroke, transform, None);
                }
                Shape::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                    stroke_width,
                } => {
                    let Some(path) = PathBuilder::from_circle(center.x, center.y, *radius) else {
                        continue;
                    };
                    pixmap.fill_path(&path, &paint_of(*fill), FillRule::Winding, transform, None);
                    let ring = Stroke {
                        width: *stroke_width,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &paint_of(*stroke), &ring, transform, None);
                }
                Shape::Text {
                    pos,
                    text,
                    size,
                    color,
                    anchor,
                } => self.draw_text(&mut pixmap, *pos * s, text, size * s, *color, *anchor),
            }
        }

        let data: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| TimelineError::Export("pixel buffer does not match image size".to_string()))
    }

    /// Draw `text` with its baseline at `pos` (device pixels).
    fn draw_text(&mut self, pixmap: &mut Pixmap, pos: Vec2, text: &str, size: f32, color: Rgba, anchor: TextAnchor) {
        if text.is_empty() || size <= 0.0 {
            return;
        }
        let metrics = Metrics::new(size, size * LINE_HEIGHT);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        let attrs = TextAttrs::new().family(Family::SansSerif).weight(Weight::BOLD);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let (line_w, baseline) = buffer
            .layout_runs()
            .next()
            .map(|run| (run.line_w, run.line_y))
            .unwrap_or((0.0, size));
        let dx = match anchor {
            TextAnchor::Left => 0.0,
            TextAnchor::Center => line_w / 2.0,
        };
        let origin_x = (pos.x - dx).round() as i32;
        let origin_y = (pos.y - baseline).round() as i32;
        trace!("Text `{}` at ({}, {}) w={:.1}", text, origin_x, origin_y, line_w);

        let text_color = Color::rgba(color.r, color.g, color.b, color.a);
        buffer.draw(&mut self.font_system, &mut self.swash_cache, text_color, |x, y, w, h, c| {
            let Some(rect) = Rect::from_xywh((origin_x + x) as f32, (origin_y + y) as f32, w as f32, h as f32) else {
                return;
            };
            let mut paint = Paint::default();
            paint.set_color_rgba8(c.r(), c.g(), c.b(), c.a());
            paint.anti_alias = false;
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        });
    }
}

pub fn encode_png(img: &RgbaImage) -> TimelineResult<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(size: Vec2) -> Scene {
        Scene {
            size,
            background: Rgba::WHITE,
            shapes: Vec::new(),
            scale: 1.0,
        }
    }

    #[test]
    fn image_matches_scene_scale() {
        let mut scene = blank(Vec2::new(100.0, 50.0));
        scene.scale = 2.0;
        let img = Rasterizer::new().render(&scene).unwrap();
        assert_eq!(img.dimensions(), (200, 100));
        assert_eq!(img.get_pixel(10, 10).0, [255, 255, 255, 255]);
    }

    #[test]
    fn circle_fill_and_stroke() {
        let mut scene = blank(Vec2::new(60.0, 60.0));
        scene.shapes.push(Shape::Circle {
            center: Vec2::new(30.0, 30.0),
            radius: 18.0,
            fill: Rgba::rgb(255, 0, 0),
            stroke: Rgba::rgb(0, 0, 255),
            stroke_width: 2.0,
        });
        let img = Rasterizer::new().render(&scene).unwrap();
        assert_eq!(img.get_pixel(30, 30).0, [255, 0, 0, 255]);
        // pixel (47, 29) lies inside the ring band (radius 17..19)
        let ring = img.get_pixel(47, 29).0;
        assert!(ring[2] > 200 && ring[0] < 60, "ring pixel {:?}", ring);
        assert_eq!(img.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn dashed_line_leaves_gaps() {
        let mut scene = blank(Vec2::new(20.0, 40.0));
        scene.shapes.push(Shape::Line {
            from: Vec2::new(10.0, 0.0),
            to: Vec2::new(10.0, 40.0),
            width: 2.0,
            color: Rgba::BLACK,
            dash: Some((5.0, 8.0)),
        });
        let img = Rasterizer::new().render(&scene).unwrap();
        assert!(img.get_pixel(10, 2).0[0] < 60);
        assert_eq!(img.get_pixel(10, 9).0, [255, 255, 255, 255]);
        assert!(img.get_pixel(10, 15).0[0] < 60);
    }

    #[test]
    fn oversized_scene_is_refused() {
        let wide = blank(Vec2::new(MAX_EXPORT_SIDE as f32 + 1.0, 10.0));
        let err = Rasterizer::new().render(&wide).unwrap_err();
        assert!(matches!(err, TimelineError::Export(_)));

        let square = blank(Vec2::new(20_000.0, 20_000.0));
        assert!(image_size(&square).is_err());

        let mut scaled = blank(Vec2::new(10_000.0, 100.0));
        scaled.scale = 4.0;
        assert!(image_size(&scaled).is_err());
        scaled.scale = 3.0;
        assert_eq!(image_size(&scaled).unwrap(), (30_000, 300));
    }

    #[test]
    fn png_has_signature() {
        let img = Rasterizer::new().render(&blank(Vec2::new(4.0, 4.0))).unwrap();
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
