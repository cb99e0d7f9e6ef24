use crate::camera::{ndc_to_pixels, PerspectiveCamera};
use crate::graphics::{draw_line, draw_triangle, Light, PixelBuffer};
use crate::math::{
    add, calculate_normal, dot, euler_xyz, multiply_matrices, multiply_matrix_vector, scale, sub,
    Vec3,
};
use crate::mesh::{feather_outline, Mesh, Segment};
use crate::pool::SpawnSource;
use crate::state::{ModelVariant, SceneState, Surface, MODEL_POSITION, MODEL_SCALE};
use crate::vertex::Vertex;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use crossterm::{cursor, queue, style};
use std::io::{self, Write};
use std::time::Instant;

/// Whether the main loop keeps running after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Feather segments reaching this far outside the screen are skipped
const NDC_LIMIT: f64 = 4.0;

/// Terminal front end of the scene: input mapping, painting and the debug overlay
pub struct SceneWidget {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
    /// Show the debug overlay
    debug: bool,
    /// Scene time is frozen and pointer input ignored
    paused: bool,
    cube: Mesh,
    octahedron: Mesh,
    environment: Mesh,
    feather: Vec<Segment>,
}

impl SceneWidget {
    pub fn new(debug: bool) -> Self {
        SceneWidget {
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
            debug,
            paused: false,
            cube: Mesh::cube(),
            octahedron: Mesh::octahedron(),
            environment: Mesh::environment(),
            feather: feather_outline(),
        }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Handle a terminal event
    pub fn event(&mut self, event: &Event, scene: &mut SceneState) -> Flow {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Flow::Quit
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
                KeyCode::Char('d') | KeyCode::Char('D') => self.debug = !self.debug,
                KeyCode::Char('p') | KeyCode::Char('P') => self.paused = !self.paused,
                _ => {}
            },
            Event::Mouse(mouse) if !self.paused => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    scene.handle_pointer_move(mouse.column, mouse.row)
                }
                MouseEventKind::Down(_) => scene.handle_click(),
                _ => {}
            },
            Event::Resize(columns, rows) => scene.set_surface(Surface::new(*columns, *rows)),
            _ => {}
        }
        Flow::Continue
    }

    /// Paint the scene into `buffer`, resizing it to the surface first
    pub fn paint(&mut self, scene: &SceneState, buffer: &mut PixelBuffer) {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        let Some(surface) = scene.surface() else {
            return;
        };
        if buffer.width() != surface.columns as usize
            || buffer.height() != surface.rows as usize * 2
        {
            buffer.resize_cells(surface.columns, surface.rows);
        }

        buffer.clear(scene.background_color());
        let camera = scene.view_camera();
        let lights = scene.lights();
        self.paint_environment(&camera, &lights, buffer);
        if !scene.pool().is_empty() {
            self.paint_feathers(scene, &camera, buffer);
        }
        self.paint_model(scene, &camera, &lights, buffer);
    }

    /// Write the painted frame and the overlay. Nothing is drawn without a surface.
    pub fn present(
        &self,
        scene: &SceneState,
        buffer: &PixelBuffer,
        out: &mut impl Write,
    ) -> io::Result<()> {
        if scene.surface().is_none() {
            return Ok(());
        }
        buffer.flush(out)?;
        self.overlay(scene, out)
    }

    fn paint_environment(
        &self,
        camera: &PerspectiveCamera,
        lights: &[Light],
        buffer: &mut PixelBuffer,
    ) {
        shade_mesh(&self.environment, &self.environment.vertices, camera, lights, buffer);
    }

    fn paint_feathers(
        &self,
        scene: &SceneState,
        camera: &PerspectiveCamera,
        buffer: &mut PixelBuffer,
    ) {
        let (width, height) = (buffer.width(), buffer.height());
        for feather in scene.pool().iter() {
            let orientation =
                multiply_matrices(&euler_xyz(&feather.rotation), &euler_xyz(&feather.sway));
            let to_world = |local: &Vec3| {
                add(
                    &feather.position,
                    &multiply_matrix_vector(&orientation, &scale(local, feather.scale)),
                )
            };

            for segment in &self.feather {
                let from = camera.project(&to_world(&segment.from));
                let to = camera.project(&to_world(&segment.to));
                let (Some(from), Some(to)) = (from, to) else {
                    continue;
                };
                if from.ndc.iter().chain(to.ndc.iter()).any(|c| c.abs() > NDC_LIMIT) {
                    continue;
                }
                draw_line(
                    ndc_to_pixels(from.ndc, width, height),
                    ndc_to_pixels(to.ndc, width, height),
                    (from.depth + to.depth) / 2.0,
                    buffer,
                    segment.color,
                );
            }
        }
    }

    /// Mesh shown for a model variant
    fn mesh_for(&self, variant: ModelVariant) -> &Mesh {
        match variant {
            ModelVariant::A => &self.cube,
            ModelVariant::B => &self.octahedron,
        }
    }

    fn paint_model(
        &self,
        scene: &SceneState,
        camera: &PerspectiveCamera,
        lights: &[Light],
        buffer: &mut PixelBuffer,
    ) {
        let mesh = self.mesh_for(scene.toggles().model);
        let rotation = euler_xyz(&scene.model_rotation());
        let world: Vec<Vec3> = mesh
            .vertices
            .iter()
            .map(|v| {
                add(
                    &MODEL_POSITION,
                    &multiply_matrix_vector(&rotation, &scale(v, MODEL_SCALE)),
                )
            })
            .collect();
        shade_mesh(mesh, &world, camera, lights, buffer);
    }

    /// Draw the debug overlay and the pause banner over the flushed frame
    fn overlay(&self, scene: &SceneState, out: &mut impl Write) -> io::Result<()> {
        if self.debug {
            let toggles = scene.toggles();
            let lines = [
                format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                format!(
                    "Feathers: {} ({} from timer)",
                    scene.pool().len(),
                    scene.pool().count_from(SpawnSource::Timer)
                ),
                format!(
                    "Model: {}  Spin: {:.1} rad/s{}",
                    self.mesh_for(toggles.model).name,
                    scene.spin_speed(),
                    if scene.streak().fast_mode() { " (fast)" } else { "" }
                ),
                format!(
                    "Light: {:?} at {:.0}",
                    toggles.light_color,
                    toggles.light_intensity.magnitude()
                ),
                format!("Streak: {}", scene.streak().count()),
                format!("FPS: {:.2}", self.fps),
            ];
            queue!(
                out,
                style::SetForegroundColor(style::Color::White),
                style::SetBackgroundColor(style::Color::Black)
            )?;
            for (row, line) in lines.iter().enumerate() {
                queue!(out, cursor::MoveTo(1, row as u16 + 1), style::Print(line))?;
            }
            queue!(out, style::ResetColor)?;
        }

        // Display 'Paused' if the scene is paused
        if self.paused {
            if let Some(surface) = scene.surface() {
                let text = "Paused";
                let column = surface.columns.saturating_sub(text.len() as u16) / 2;
                queue!(
                    out,
                    cursor::MoveTo(column, surface.rows / 2),
                    style::SetAttribute(style::Attribute::Bold),
                    style::SetForegroundColor(style::Color::White),
                    style::Print(text),
                    style::SetAttribute(style::Attribute::Reset),
                    style::ResetColor
                )?;
            }
        }
        out.flush()
    }
}

/// Rasterizes `mesh` with its vertices already placed at `world`.
/// Every face is shaded on the side facing the camera.
fn shade_mesh(
    mesh: &Mesh,
    world: &[Vec3],
    camera: &PerspectiveCamera,
    lights: &[Light],
    buffer: &mut PixelBuffer,
) {
    let (width, height) = (buffer.width(), buffer.height());

    for (triangle, &color) in mesh.triangles.iter().zip(mesh.colors.iter()) {
        let corners = triangle.map(|i| world[i]);
        let mut normal = calculate_normal(&corners[0], &corners[1], &corners[2]);
        if dot(&normal, &sub(&camera.position(), &corners[0])) < 0.0 {
            normal = scale(&normal, -1.0);
        }

        let vertices: Option<Vec<Vertex>> = corners
            .iter()
            .map(|position| {
                camera.project(position).map(|projected| Vertex {
                    position: *position,
                    screen_position: ndc_to_pixels(projected.ndc, width, height),
                    depth: projected.depth,
                    normal,
                })
            })
            .collect();
        if let Some(v) = vertices {
            draw_triangle(&v[0], &v[1], &v[2], buffer, lights, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::RecordingSink;
    use crate::graphics::Rgb;
    use crate::random::testing::FixedRandom;
    use crate::state::SceneConfig;
    use crossterm::event::{KeyEvent, MouseButton, MouseEvent};
    use std::time::Duration;

    fn scene() -> SceneState {
        let mut scene = SceneState::new(
            &SceneConfig::default(),
            Box::new(FixedRandom(0.5)),
            Box::new(RecordingSink::default()),
        );
        scene.set_surface(Surface::new(60, 20));
        scene
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 30,
            row: 10,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_toggle_and_quit() {
        let mut scene = scene();
        let mut widget = SceneWidget::new(false);
        assert_eq!(widget.event(&key('p'), &mut scene), Flow::Continue);
        assert!(widget.paused());
        assert_eq!(widget.event(&key('d'), &mut scene), Flow::Continue);
        assert!(widget.debug);
        assert_eq!(widget.event(&key('q'), &mut scene), Flow::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(widget.event(&ctrl_c, &mut scene), Flow::Quit);
    }

    #[test]
    fn mouse_moves_spawn_and_clicks_toggle() {
        let mut scene = scene();
        let mut widget = SceneWidget::new(false);
        widget.event(&mouse(MouseEventKind::Moved), &mut scene);
        widget.event(&mouse(MouseEventKind::Drag(MouseButton::Left)), &mut scene);
        assert_eq!(scene.pool().len(), 2);

        widget.event(&mouse(MouseEventKind::Down(MouseButton::Left)), &mut scene);
        assert_eq!(scene.toggles().model, ModelVariant::B);
    }

    #[test]
    fn paused_widget_ignores_the_mouse() {
        let mut scene = scene();
        let mut widget = SceneWidget::new(false);
        widget.event(&key('p'), &mut scene);
        widget.event(&mouse(MouseEventKind::Moved), &mut scene);
        widget.event(&mouse(MouseEventKind::Down(MouseButton::Left)), &mut scene);
        assert!(scene.pool().is_empty());
        assert_eq!(scene.toggles().model, ModelVariant::A);
    }

    #[test]
    fn resize_updates_the_surface() {
        let mut scene = scene();
        let mut widget = SceneWidget::new(false);
        widget.event(&Event::Resize(100, 30), &mut scene);
        assert_eq!(scene.surface(), Surface::new(100, 30));
    }

    #[test]
    fn paint_draws_background_and_model() {
        let mut scene = scene();
        let mut widget = SceneWidget::new(false);
        let mut buffer = PixelBuffer::for_cells(1, 1);
        for variant in [ModelVariant::A, ModelVariant::B] {
            widget.paint(&scene, &mut buffer);
            assert_eq!(buffer.width(), 60);
            assert_eq!(buffer.height(), 40);
            assert_eq!(scene.toggles().model, variant);
            assert_eq!(buffer.get(0, 0), scene.background_color());
            assert_ne!(buffer.get(30, 20), scene.background_color());
            scene.handle_click();
        }
    }

    #[test]
    fn paint_draws_feathers() {
        let mut scene = scene();
        let widget = SceneWidget::new(false);
        scene.handle_pointer_move(15, 15);
        scene.advance(Duration::from_millis(16));

        let mut buffer = PixelBuffer::for_cells(60, 20);
        let background = scene.background_color();
        buffer.clear(background);
        widget.paint_feathers(&scene, &scene.view_camera(), &mut buffer);
        let touched = (0..buffer.height())
            .any(|y| (0..buffer.width()).any(|x| buffer.get(x, y) != background));
        assert!(touched);
    }

    fn floor_pixel(scene: &SceneState, buffer: &PixelBuffer) -> Rgb {
        let projected = scene.view_camera().project(&[2.0, -7.5, 2.0]).unwrap();
        let [x, y] = ndc_to_pixels(projected.ndc, buffer.width(), buffer.height());
        buffer.get(x as usize, y as usize)
    }

    #[test]
    fn click_recolors_the_lit_floor() {
        let mut scene = scene();
        let widget = SceneWidget::new(false);
        let mut buffer = PixelBuffer::for_cells(60, 20);
        let camera = scene.view_camera();

        buffer.clear(scene.background_color());
        widget.paint_environment(&camera, &scene.lights(), &mut buffer);
        let before = floor_pixel(&scene, &buffer);
        assert_ne!(before, scene.background_color());

        scene.handle_click();
        buffer.clear(scene.background_color());
        widget.paint_environment(&camera, &scene.lights(), &mut buffer);
        let after = floor_pixel(&scene, &buffer);
        assert_ne!(after, scene.background_color());
        assert_ne!(before, after);
    }

    #[test]
    fn present_skips_frames_without_a_surface() {
        let mut scene = scene();
        let mut widget = SceneWidget::new(false);
        let mut buffer = PixelBuffer::for_cells(60, 20);
        widget.paint(&scene, &mut buffer);

        let mut out = Vec::new();
        widget.present(&scene, &buffer, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains('\u{2580}'));

        widget.event(&Event::Resize(0, 20), &mut scene);
        widget.paint(&scene, &mut buffer);
        let mut out = Vec::new();
        widget.present(&scene, &buffer, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn overlay_prints_debug_lines_and_banner() {
        let mut scene = scene();
        let mut widget = SceneWidget::new(true);
        widget.event(&key('p'), &mut scene);
        let mut out = Vec::new();
        widget.overlay(&scene, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Feathers: 0 (0 from timer)"));
        assert!(text.contains("Model: cube"));
        assert!(text.contains("Paused"));
    }
}
