//! Software rasterizer for the scene display list.
//!
//! Draws straight into the `pixels` RGBA framebuffer: filled rectangles
//! with rounded corners, and text through the fixed 8x8 bitmap font
//! scaled to the run's size.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use tastepuzzle_ui_graphics::{Color, DrawCommand, Rect, Scene, TextRun};

const GLYPH_CELL: f32 = 8.0;

pub fn rasterize(scene: &Scene, frame: &mut [u8], width: u32, height: u32, background: Color) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&[background.r, background.g, background.b, background.a]);
    }

    for command in scene.commands() {
        match command {
            DrawCommand::Rect {
                rect,
                color,
                corner_radius,
            } => fill_rect(frame, width, height, rect, *color, *corner_radius),
            DrawCommand::Text(run) => draw_text(frame, width, height, run),
        }
    }
}

fn put(frame: &mut [u8], width: u32, height: u32, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return;
    }
    let offset = (y as usize * width as usize + x as usize) * 4;
    let pixel = &mut frame[offset..offset + 4];
    if color.a == 0xff {
        pixel.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        return;
    }
    // Source-over blend for translucent fills.
    let a = color.a as u32;
    for (channel, src) in [color.r, color.g, color.b].into_iter().enumerate() {
        let dst = pixel[channel] as u32;
        pixel[channel] = ((src as u32 * a + dst * (255 - a)) / 255) as u8;
    }
}

fn fill_rect(frame: &mut [u8], width: u32, height: u32, rect: &Rect, color: Color, radius: f32) {
    let x0 = rect.x.floor() as i32;
    let y0 = rect.y.floor() as i32;
    let x1 = rect.right().ceil() as i32;
    let y1 = rect.bottom().ceil() as i32;
    let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);

    for y in y0..y1 {
        for x in x0..x1 {
            if radius > 0.0 {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                // Distance check only applies inside the corner squares.
                let cx = px.clamp(rect.x + radius, rect.right() - radius);
                let cy = py.clamp(rect.y + radius, rect.bottom() - radius);
                let dx = px - cx;
                let dy = py - cy;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
            }
            put(frame, width, height, x, y, color);
        }
    }
}

fn draw_text(frame: &mut [u8], width: u32, height: u32, run: &TextRun) {
    let cell = run.size.round().max(1.0) as i32;
    let mut pen_x = run.origin.x.round() as i32;
    let pen_y = run.origin.y.round() as i32;

    for ch in run.text.chars() {
        // Glyphs outside the basic set render as blank space.
        if let Some(glyph) = BASIC_FONTS.get(ch) {
            for ty in 0..cell {
                let row = glyph[(ty * 8 / cell) as usize];
                if row == 0 {
                    continue;
                }
                for tx in 0..cell {
                    let bit = tx * 8 / cell;
                    if row & (1 << bit) != 0 {
                        put(frame, width, height, pen_x + tx, pen_y + ty, run.color);
                    }
                }
            }
        }
        pen_x += cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tastepuzzle_ui_graphics::Point;

    fn buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0; (width * height * 4) as usize]
    }

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * width + x) * 4) as usize;
        frame[offset..offset + 4].try_into().unwrap()
    }

    #[test]
    fn test_background_fill() {
        let mut frame = buffer(4, 4);
        rasterize(&Scene::new(), &mut frame, 4, 4, Color::rgb(1, 2, 3));
        assert_eq!(pixel(&frame, 4, 0, 0), [1, 2, 3, 255]);
        assert_eq!(pixel(&frame, 4, 3, 3), [1, 2, 3, 255]);
    }

    #[test]
    fn test_sharp_rect_covers_exact_area() {
        let mut frame = buffer(8, 8);
        let mut scene = Scene::new();
        scene.push_rect(Rect::new(2.0, 2.0, 4.0, 4.0), Color::WHITE, 0.0);
        rasterize(&scene, &mut frame, 8, 8, Color::BLACK);

        assert_eq!(pixel(&frame, 8, 3, 3), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 8, 1, 1), [0, 0, 0, 255]);
        assert_eq!(pixel(&frame, 8, 6, 6), [0, 0, 0, 255]);
    }

    #[test]
    fn test_rounded_corners_stay_background() {
        let mut frame = buffer(20, 20);
        let mut scene = Scene::new();
        scene.push_rect(Rect::new(0.0, 0.0, 20.0, 20.0), Color::WHITE, 8.0);
        rasterize(&scene, &mut frame, 20, 20, Color::BLACK);

        // Corner pixel is outside the radius, center of the edge is not.
        assert_eq!(pixel(&frame, 20, 0, 0), [0, 0, 0, 255]);
        assert_eq!(pixel(&frame, 20, 10, 0), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 20, 10, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn test_text_marks_pixels() {
        let mut frame = buffer(16, 16);
        let mut scene = Scene::new();
        scene.push_text(Point::ZERO, "M", 8.0, Color::WHITE);
        rasterize(&scene, &mut frame, 16, 16, Color::BLACK);

        let lit = frame
            .chunks_exact(4)
            .filter(|p| p[0] == 255)
            .count();
        assert!(lit > 0, "glyph should light some pixels");
    }

    #[test]
    fn test_clipping_does_not_panic() {
        let mut frame = buffer(4, 4);
        let mut scene = Scene::new();
        scene.push_rect(Rect::new(-10.0, -10.0, 100.0, 100.0), Color::WHITE, 0.0);
        scene.push_text(Point::new(-5.0, 2.0), "clip", 8.0, Color::BLACK);
        rasterize(&scene, &mut frame, 4, 4, Color::BLACK);
        assert_eq!(pixel(&frame, 4, 0, 0), [255, 255, 255, 255]);
    }
}
