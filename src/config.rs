use crate::error::SceneError;
use crate::pool::DEFAULT_SHOOTING_CHANCE;
use crate::state::SceneConfig;
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_TITLE: &str = "dhyey 😝 rocks 🤘🏽";

/// A spinning model and a stream of peacock feathers, drawn in the terminal.
///
/// Move the mouse to drop feathers, click to swap the model and light.
/// Keys: q quit, p pause, d debug overlay.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Seed for the random source; omit for a fresh seed every run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Milliseconds between timer-spawned feathers
    #[arg(long, default_value_t = 5000, value_parser = clap::value_parser!(u64).range(1..))]
    pub spawn_interval_ms: u64,

    /// Probability that a pointer feather shoots sideways
    #[arg(long, default_value_t = DEFAULT_SHOOTING_CHANCE, value_parser = parse_probability)]
    pub shooting_chance: f64,

    /// Also wiggle timer feathers about the x axis
    #[arg(long)]
    pub wiggle_x: bool,

    /// Start with the debug overlay visible
    #[arg(long)]
    pub debug: bool,

    /// Window title text
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Keep the window title still
    #[arg(long)]
    pub no_marquee: bool,

    /// Measurement id attached to analytics records
    #[arg(long)]
    pub analytics_id: Option<String>,
}

impl Config {
    pub fn scene(&self) -> SceneConfig {
        SceneConfig {
            spawn_interval: Duration::from_millis(self.spawn_interval_ms),
            shooting_chance: self.shooting_chance,
            wiggle_x: self.wiggle_x,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}

fn parse_probability(value: &str) -> Result<f64, SceneError> {
    let p: f64 = value
        .parse()
        .map_err(|e| SceneError::Config(format!("{:?} is not a number: {}", value, e)))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(SceneError::Config(format!("{} is outside [0, 1]", p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::parse_from(["feather3d"]);
        assert_eq!(config.fps, 30);
        assert_eq!(config.title, DEFAULT_TITLE);
        let scene = config.scene();
        assert_eq!(scene.spawn_interval, Duration::from_secs(5));
        assert_eq!(scene.shooting_chance, 0.05);
        assert!(!scene.wiggle_x);
    }

    #[test]
    fn overrides() {
        let config = Config::parse_from([
            "feather3d",
            "--seed",
            "9",
            "--fps",
            "60",
            "--spawn-interval-ms",
            "250",
            "--shooting-chance",
            "1",
            "--no-marquee",
        ]);
        assert_eq!(config.seed, Some(9));
        assert!(config.no_marquee);
        assert_eq!(config.scene().spawn_interval, Duration::from_millis(250));
        assert_eq!(config.scene().shooting_chance, 1.0);
        assert!((config.frame_duration().as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::try_parse_from(["feather3d", "--shooting-chance", "1.5"]).is_err());
        assert!(Config::try_parse_from(["feather3d", "--shooting-chance", "often"]).is_err());
        assert!(Config::try_parse_from(["feather3d", "--fps", "0"]).is_err());
        assert!(Config::try_parse_from(["feather3d", "--spawn-interval-ms", "0"]).is_err());
    }
}
