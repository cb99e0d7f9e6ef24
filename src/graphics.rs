use crate::math::{apply_lighting, calculate_light_intensity, edge_function, normalize, Vec3};
use crate::vertex::Vertex;
use crossterm::{cursor, queue, style};
use std::io::{self, Write};

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Builds a color from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Rgb {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Linear blend between `a` (t = 0) and `b` (t = 1)
    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }

    pub fn saturating_add(self, other: Rgb) -> Rgb {
        Rgb(
            self.0.saturating_add(other.0),
            self.1.saturating_add(other.1),
            self.2.saturating_add(other.2),
        )
    }

    fn to_terminal(self) -> style::Color {
        style::Color::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

/// A point light used to shade triangles
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vec3,
    pub color: Rgb,
    pub gain: f64,
}

/// Color and depth buffer. Each terminal cell shows two stacked pixels.
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    depth: Vec<f64>,
}

impl PixelBuffer {
    /// Creates a buffer covering `columns` x `rows` terminal cells
    pub fn for_cells(columns: u16, rows: u16) -> Self {
        let width = columns as usize;
        let height = rows as usize * 2;
        PixelBuffer {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            depth: vec![f64::INFINITY; width * height],
        }
    }

    pub fn resize_cells(&mut self, columns: u16, rows: u16) {
        *self = PixelBuffer::for_cells(columns, rows);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fills every pixel with `color` and resets the depth buffer
    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
        self.depth.fill(f64::INFINITY);
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Writes a pixel if it lies inside the buffer and passes the depth test
    fn plot(&mut self, x: isize, y: isize, depth: f64, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let offset = y as usize * self.width + x as usize;
        if depth < self.depth[offset] {
            self.depth[offset] = depth;
            self.pixels[offset] = color;
        }
    }

    /// Writes the buffer to the terminal using upper-half-block glyphs
    pub fn flush(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.height / 2;
        let mut current: Option<(Rgb, Rgb)> = None;

        for row in 0..rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for column in 0..self.width {
                let top = self.get(column, row * 2);
                let bottom = self.get(column, row * 2 + 1);
                if current != Some((top, bottom)) {
                    queue!(
                        out,
                        style::SetForegroundColor(top.to_terminal()),
                        style::SetBackgroundColor(bottom.to_terminal())
                    )?;
                    current = Some((top, bottom));
                }
                queue!(out, style::Print('\u{2580}'))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

/// Draws a triangle lit per pixel by every light in `lights`. Either winding is accepted.
pub fn draw_triangle(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    buffer: &mut PixelBuffer,
    lights: &[Light],
    base_color: Rgb,
) {
    if buffer.width == 0 || buffer.height == 0 {
        return;
    }

    // Compute bounding box of the triangle
    let min_x = v0.screen_position[0]
        .min(v1.screen_position[0])
        .min(v2.screen_position[0])
        .floor()
        .max(0.0) as usize;
    let max_x = v0.screen_position[0]
        .max(v1.screen_position[0])
        .max(v2.screen_position[0])
        .ceil()
        .min(buffer.width as f64 - 1.0);
    let min_y = v0.screen_position[1]
        .min(v1.screen_position[1])
        .min(v2.screen_position[1])
        .floor()
        .max(0.0) as usize;
    let max_y = v0.screen_position[1]
        .max(v1.screen_position[1])
        .max(v2.screen_position[1])
        .ceil()
        .min(buffer.height as f64 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let (max_x, max_y) = (max_x as usize, max_y as usize);

    let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
    if area == 0.0 {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = [x as f64 + 0.5, y as f64 + 0.5];

            // Normalized barycentric coordinates; all positive means inside
            let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
            let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
            let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
            let offset = y * buffer.width + x;
            if depth >= buffer.depth[offset] {
                continue;
            }

            let position = [
                v0.position[0] * w0 + v1.position[0] * w1 + v2.position[0] * w2,
                v0.position[1] * w0 + v1.position[1] * w1 + v2.position[1] * w2,
                v0.position[2] * w0 + v1.position[2] * w1 + v2.position[2] * w2,
            ];
            let normal = normalize(&[
                v0.normal[0] * w0 + v1.normal[0] * w1 + v2.normal[0] * w2,
                v0.normal[1] * w0 + v1.normal[1] * w1 + v2.normal[1] * w2,
                v0.normal[2] * w0 + v1.normal[2] * w1 + v2.normal[2] * w2,
            ]);

            buffer.depth[offset] = depth;
            buffer.pixels[offset] = lights.iter().fold(Rgb::BLACK, |color, light| {
                let intensity =
                    calculate_light_intensity(&normal, &position, &light.position) * light.gain;
                color.saturating_add(apply_lighting(base_color, intensity, light.color))
            });
        }
    }
}

/// Draws a depth-tested line between two screen points using Bresenham's algorithm
pub fn draw_line(from: [f64; 2], to: [f64; 2], depth: f64, buffer: &mut PixelBuffer, color: Rgb) {
    let (mut x0, mut y0, x1, y1) = (
        from[0].round() as isize,
        from[1].round() as isize,
        to[0].round() as isize,
        to[1].round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        buffer.plot(x0, y0, depth, color);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
