//! Scene composition root.
//!
//! `SceneState` owns every piece of mutable scene state and is handed by
//! reference to the frame update and to the input handlers.

use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::camera::PerspectiveCamera;
use crate::graphics::{Light, Rgb};
use crate::math::Vec3;
use crate::pool::{FeatherPool, DEFAULT_SHOOTING_CHANCE};
use crate::random::RandomSource;
use crate::streak::ClickStreak;
use crate::timer::Interval;
use log::{debug, info};
use std::time::Duration;

pub const MODEL_POSITION: Vec3 = [0.0, 18.0, -0.2];
pub const MODEL_SCALE: f64 = 2.0;
/// Fixed tilt about x and base angle about y of the primary model
const MODEL_TILT: f64 = 4.5;
const MODEL_BASE_YAW: f64 = 6.0;
pub const SLOW_SPIN: f64 = 0.4;
pub const FAST_SPIN: f64 = 4.5;

const BACKGROUND_FROM: Rgb = Rgb::from_hex(0xFF9900);
const BACKGROUND_TO: Rgb = Rgb::from_hex(0xFF5500);
const BACKGROUND_SPEED: f64 = 0.25;

const SPOTLIGHT_RADIUS: f64 = 8.0;
const SPOTLIGHT_SPEED: f64 = 0.2;
const WHITE: Rgb = Rgb(255, 255, 255);
/// Lights that never move or change: two point lights, the key light and the overhead spot
const FIXED_LIGHTS: [Light; 4] = [
    Light {
        position: [10.0, 10.0, 10.0],
        color: WHITE,
        gain: 0.25,
    },
    Light {
        position: [-10.0, 10.0, -10.0],
        color: WHITE,
        gain: 0.12,
    },
    Light {
        position: [0.0, 30.0, 20.0],
        color: WHITE,
        gain: 0.3,
    },
    Light {
        position: [0.0, 25.0, 10.0],
        color: WHITE,
        gain: 0.3,
    },
];

pub const FIELD_OF_VIEW: f64 = 50.0;
const NEAR: f64 = 0.1;
const FAR: f64 = 1000.0;
const VIEW_POSITION: Vec3 = [0.0, 20.0, 0.0];
/// Fixed viewpoint used to place pointer feathers, independent of the view camera
const PROJECTION_POSITION: Vec3 = [0.0, 1.0, 0.0];
const FLOOR_HEIGHT: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVariant {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightColor {
    White,
    Highlight,
}

impl LightColor {
    pub fn rgb(self) -> Rgb {
        match self {
            LightColor::White => Rgb::from_hex(0xFFFFFF),
            LightColor::Highlight => Rgb::from_hex(0xFF69B4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightIntensity {
    Low,
    High,
}

impl LightIntensity {
    pub fn magnitude(self) -> f64 {
        match self {
            LightIntensity::Low => 120.0,
            LightIntensity::High => 1200.0,
        }
    }

    /// Shading gain relative to the high setting
    pub fn gain(self) -> f64 {
        self.magnitude() / LightIntensity::High.magnitude()
    }
}

/// Visual state flipped as a unit on every click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneToggles {
    pub model: ModelVariant,
    pub light_color: LightColor,
    pub light_intensity: LightIntensity,
}

impl Default for SceneToggles {
    fn default() -> Self {
        SceneToggles {
            model: ModelVariant::A,
            light_color: LightColor::White,
            light_intensity: LightIntensity::Low,
        }
    }
}

impl SceneToggles {
    pub fn toggle(&mut self) {
        self.model = match self.model {
            ModelVariant::A => ModelVariant::B,
            ModelVariant::B => ModelVariant::A,
        };
        self.light_color = match self.light_color {
            LightColor::White => LightColor::Highlight,
            LightColor::Highlight => LightColor::White,
        };
        self.light_intensity = match self.light_intensity {
            LightIntensity::Low => LightIntensity::High,
            LightIntensity::High => LightIntensity::Low,
        };
    }
}

/// On-screen extent of the render surface in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub columns: u16,
    pub rows: u16,
}

impl Surface {
    /// `None` for a zero-sized terminal
    pub fn new(columns: u16, rows: u16) -> Option<Self> {
        (columns > 0 && rows > 0).then_some(Surface { columns, rows })
    }

    /// Width over height in pixels; each cell is two pixels tall
    pub fn aspect(&self) -> f64 {
        self.columns as f64 / (self.rows as f64 * 2.0)
    }

    /// Normalized device coordinates of the center of a cell
    pub fn ndc(&self, column: u16, row: u16) -> [f64; 2] {
        let x = (column as f64 + 0.5) / self.columns as f64 * 2.0 - 1.0;
        let y = -((row as f64 + 0.5) / self.rows as f64) * 2.0 + 1.0;
        [x, y]
    }
}

#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub spawn_interval: Duration,
    pub shooting_chance: f64,
    pub wiggle_x: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            spawn_interval: Duration::from_secs(5),
            shooting_chance: DEFAULT_SHOOTING_CHANCE,
            wiggle_x: false,
        }
    }
}

/// Background color at `seconds` into the scene
pub fn background_color_at(seconds: f64) -> Rgb {
    let t = ((seconds * BACKGROUND_SPEED).sin() + 1.0) / 2.0;
    Rgb::lerp(BACKGROUND_FROM, BACKGROUND_TO, t)
}

pub struct SceneState {
    toggles: SceneToggles,
    streak: ClickStreak,
    pool: FeatherPool,
    spawn_timer: Interval,
    surface: Option<Surface>,
    rng: Box<dyn RandomSource>,
    analytics: Box<dyn AnalyticsSink>,
    clock: Duration,
}

impl SceneState {
    /// Builds the scene and reports the page view
    pub fn new(
        config: &SceneConfig,
        rng: Box<dyn RandomSource>,
        mut analytics: Box<dyn AnalyticsSink>,
    ) -> Self {
        analytics.send(AnalyticsEvent::PageView { page: "/".to_string() });
        SceneState {
            toggles: SceneToggles::default(),
            streak: ClickStreak::new(),
            pool: FeatherPool::new(config.shooting_chance).with_x_wiggle(config.wiggle_x),
            spawn_timer: Interval::new(config.spawn_interval, Duration::ZERO),
            surface: None,
            rng,
            analytics,
            clock: Duration::ZERO,
        }
    }

    pub fn set_surface(&mut self, surface: Option<Surface>) {
        self.surface = surface;
    }

    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    /// Time since the scene started, excluding paused frames
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn toggles(&self) -> SceneToggles {
        self.toggles
    }

    pub fn streak(&self) -> &ClickStreak {
        &self.streak
    }

    pub fn pool(&self) -> &FeatherPool {
        &self.pool
    }

    /// Spawns a feather under the pointer. Ignored until the surface is known.
    pub fn handle_pointer_move(&mut self, column: u16, row: u16) {
        let Some(surface) = self.surface else {
            return;
        };
        let camera = PerspectiveCamera::looking_at(
            PROJECTION_POSITION,
            [0.0; 3],
            FIELD_OF_VIEW,
            surface.aspect(),
            NEAR,
            FAR,
        );
        let point = camera.unproject_to_plane(surface.ndc(column, row), FLOOR_HEIGHT);
        self.pool.spawn_at_pointer(point, self.clock, self.rng.as_mut());
    }

    /// Flips the model and light, reports the click and feeds the streak detector
    pub fn handle_click(&mut self) {
        if self.surface.is_none() {
            return;
        }
        self.analytics.send(AnalyticsEvent::Event {
            action: "click".to_string(),
        });
        self.toggles.toggle();
        debug!("toggled to {:?}", self.toggles);
        if self.streak.register(self.clock) {
            info!("click streak reached, spinning fast");
        }
    }

    /// Advances the scene by one frame of length `delta`
    pub fn advance(&mut self, delta: Duration) {
        self.clock += delta;
        for tick in self.spawn_timer.poll(self.clock) {
            self.pool.spawn_from_timer(tick, self.rng.as_mut());
        }
        self.pool.update(self.clock, delta.as_secs_f64(), self.rng.as_mut());
    }

    /// Stops the spawn timer and drops every feather
    pub fn teardown(&mut self) {
        self.spawn_timer.cancel();
        self.pool.clear();
        debug!("scene torn down at {:?}", self.clock);
    }

    /// Spin rate of the primary model in radians per second
    pub fn spin_speed(&self) -> f64 {
        if self.streak.fast_mode() {
            FAST_SPIN
        } else {
            SLOW_SPIN
        }
    }

    /// Euler XYZ rotation of the primary model
    pub fn model_rotation(&self) -> Vec3 {
        let t = self.clock.as_secs_f64();
        [MODEL_TILT, MODEL_BASE_YAW + t * self.spin_speed(), 0.0]
    }

    pub fn background_color(&self) -> Rgb {
        background_color_at(self.clock.as_secs_f64())
    }

    /// Orbiting spotlight, colored and scaled by the current toggles
    pub fn spotlight(&self) -> Light {
        let t = self.clock.as_secs_f64();
        Light {
            position: [
                (t * SPOTLIGHT_SPEED).sin() * SPOTLIGHT_RADIUS,
                (t * SPOTLIGHT_SPEED * 0.7).sin() * 3.0 + 5.0,
                (t * SPOTLIGHT_SPEED).cos() * SPOTLIGHT_RADIUS,
            ],
            color: self.toggles.light_color.rgb(),
            gain: self.toggles.light_intensity.gain(),
        }
    }

    /// Every light shading the model and the box this frame
    pub fn lights(&self) -> [Light; 5] {
        let [a, b, c, d] = FIXED_LIGHTS;
        [a, b, c, d, self.spotlight()]
    }

    /// Camera the scene is viewed through
    pub fn view_camera(&self) -> PerspectiveCamera {
        let aspect = self.surface.map_or(1.0, |s| s.aspect());
        PerspectiveCamera::looking_at(VIEW_POSITION, [0.0; 3], FIELD_OF_VIEW, aspect, NEAR, FAR)
    }
}
