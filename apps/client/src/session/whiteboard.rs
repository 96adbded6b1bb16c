//! Freehand whiteboard: strokes captured from pointer events, rasterised on
//! demand with round caps on a white canvas.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::{Rgba, RgbaImage};
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 3;
pub const MIN_WIDTH: u32 = 1;
pub const MAX_WIDTH: u32 = 20;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a #rrggbb color")]
pub struct ColorParseError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ColorParseError(s.to_string()))?;

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Color and width are fixed when the stroke begins.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: u32,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone)]
pub struct Whiteboard {
    color: Color,
    width: u32,
    strokes: Vec<Stroke>,
    drawing: bool,
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: DEFAULT_WIDTH,
            strokes: Vec::new(),
            drawing: false,
        }
    }
}

impl Whiteboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Clamped to 1..=20.
    pub fn set_width(&mut self, width: u32) {
        self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.strokes.push(Stroke {
            color: self.color,
            width: self.width,
            points: vec![Point { x, y }],
        });
        self.drawing = true;
    }

    /// Ignored unless a stroke is in progress.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.drawing {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.points.push(Point { x, y });
        }
    }

    pub fn pointer_up(&mut self) {
        self.drawing = false;
    }

    pub fn pointer_leave(&mut self) {
        self.drawing = false;
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = false;
    }

    pub fn render(&self, width: u32, height: u32) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
        for stroke in &self.strokes {
            draw_stroke(&mut canvas, stroke);
        }
        canvas
    }

    pub fn save_png(&self, path: &Path, width: u32, height: u32) -> image::ImageResult<()> {
        self.render(width, height).save(path)
    }
}

fn draw_stroke(canvas: &mut RgbaImage, stroke: &Stroke) {
    let radius = stroke.width as f32 / 2.0;
    let color = stroke.color.to_rgba();

    match stroke.points.as_slice() {
        [] => {}
        [only] => fill_capsule(canvas, *only, *only, radius, color),
        points => {
            for pair in points.windows(2) {
                fill_capsule(canvas, pair[0], pair[1], radius, color);
            }
        }
    }
}

/// Fills every pixel whose centre lies within `radius` of segment `a`-`b`:
/// a line with round caps at both ends.
fn fill_capsule(canvas: &mut RgbaImage, a: Point, b: Point, radius: f32, color: Rgba<u8>) {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return;
    }

    let min_x = (a.x.min(b.x) - radius).floor().max(0.0) as u32;
    let min_y = (a.y.min(b.y) - radius).floor().max(0.0) as u32;
    let max_x = ((a.x.max(b.x) + radius).ceil().max(0.0) as u32).min(w - 1);
    let max_y = ((a.y.max(b.y) + radius).ceil().max(0.0) as u32).min(h - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Point {
                x: x as f32 + 0.5,
                y: y as f32 + 0.5,
            };
            if distance_to_segment(p, a, b) <= radius {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_display() {
        let red: Color = "#ff0000".parse().unwrap();
        assert_eq!(red, Color { r: 255, g: 0, b: 0 });
        assert_eq!(red.to_string(), "#ff0000");
        assert!("ff0000".parse::<Color>().is_err());
        assert!("#ff00".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_width_is_clamped() {
        let mut board = Whiteboard::new();
        assert_eq!(board.width(), DEFAULT_WIDTH);
        board.set_width(0);
        assert_eq!(board.width(), 1);
        board.set_width(50);
        assert_eq!(board.width(), 20);
    }

    #[test]
    fn test_moves_outside_a_stroke_are_ignored() {
        let mut board = Whiteboard::new();
        board.pointer_move(5.0, 5.0);
        assert!(board.strokes().is_empty());

        board.pointer_down(1.0, 1.0);
        board.pointer_move(2.0, 2.0);
        board.pointer_leave();
        board.pointer_move(3.0, 3.0);
        assert_eq!(board.strokes().len(), 1);
        assert_eq!(board.strokes()[0].points.len(), 2);
    }

    #[test]
    fn test_stroke_keeps_color_chosen_at_pointer_down() {
        let mut board = Whiteboard::new();
        board.pointer_down(0.0, 0.0);
        board.set_color("#00ff00".parse().unwrap());
        board.pointer_move(10.0, 0.0);
        board.pointer_up();
        assert_eq!(board.strokes()[0].color, Color::BLACK);
    }

    #[test]
    fn test_two_colored_strokes_are_distinct() {
        let red: Color = "#ff0000".parse().unwrap();
        let blue: Color = "#0000ff".parse().unwrap();

        let mut board = Whiteboard::new();
        board.set_width(5);
        board.set_color(red);
        board.pointer_down(5.0, 10.0);
        board.pointer_move(35.0, 10.0);
        board.pointer_up();
        board.set_color(blue);
        board.pointer_down(5.0, 30.0);
        board.pointer_move(35.0, 30.0);
        board.pointer_up();

        let image = board.render(40, 40);
        assert_eq!(*image.get_pixel(20, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(20, 30), Rgba([0, 0, 255, 255]));
        assert_eq!(*image.get_pixel(20, 20), BACKGROUND);
    }

    #[test]
    fn test_single_point_draws_round_dot() {
        let mut board = Whiteboard::new();
        board.set_width(6);
        board.pointer_down(10.0, 10.0);
        board.pointer_up();

        let image = board.render(20, 20);
        assert_eq!(*image.get_pixel(10, 10), Rgba([0, 0, 0, 255]));
        // Corner of the bounding box lies outside the radius.
        assert_eq!(*image.get_pixel(7, 7), BACKGROUND);
    }

    #[test]
    fn test_clear_equals_initial_canvas() {
        let blank = Whiteboard::new().render(32, 32);

        let mut board = Whiteboard::new();
        board.pointer_down(2.0, 2.0);
        board.pointer_move(30.0, 30.0);
        board.pointer_up();
        assert_ne!(board.render(32, 32), blank);

        board.clear();
        assert_eq!(board.render(32, 32), blank);
    }
}
