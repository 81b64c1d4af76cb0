use crate::foundation::{
    core::Rgba8,
    error::{FxError, FxResult},
};

/// Tunables of the particle field. Every field has a default, so a partial JSON
/// object deserializes into a complete config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub count: usize,
    /// Upper bound of each velocity component's magnitude, per frame.
    pub max_speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    /// Pairs closer than this are linked.
    pub link_distance: f64,
    pub link_max_opacity: f64,
    pub link_width: f64,
    pub link_color: Rgba8,
    pub attract_radius: f64,
    /// Fraction of the particle-to-pointer vector applied per frame.
    pub attract_strength: f64,
    pub particle_color: Rgba8,
    pub particle_opacity: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 60,
            max_speed: 0.2,
            radius_min: 0.5,
            radius_max: 2.0,
            link_distance: 150.0,
            link_max_opacity: 0.15,
            link_width: 1.0,
            link_color: Rgba8::rgb(100, 255, 218),
            attract_radius: 120.0,
            attract_strength: 0.01,
            particle_color: Rgba8::rgb(100, 255, 218),
            particle_opacity: 0.5,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> FxResult<()> {
        let positive = [
            ("link_distance", self.link_distance),
            ("link_width", self.link_width),
            ("attract_radius", self.attract_radius),
            ("radius_min", self.radius_min),
            ("radius_max", self.radius_max),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(FxError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }

        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(FxError::validation(format!(
                "max_speed must be finite and >= 0, got {}",
                self.max_speed
            )));
        }
        if self.radius_min > self.radius_max {
            return Err(FxError::validation(format!(
                "radius_min ({}) must be <= radius_max ({})",
                self.radius_min, self.radius_max
            )));
        }

        let unit = [
            ("link_max_opacity", self.link_max_opacity),
            ("particle_opacity", self.particle_opacity),
            ("attract_strength", self.attract_strength),
        ];
        for (name, v) in unit {
            if !(0.0..=1.0).contains(&v) {
                return Err(FxError::validation(format!(
                    "{name} must be in [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Opacity of a link between two particles `distance` apart, `None` when
    /// they are too far apart to be linked.
    pub fn link_opacity(&self, distance: f64) -> Option<f64> {
        if distance < self.link_distance {
            Some(self.link_max_opacity * (1.0 - distance / self.link_distance))
        } else {
            None
        }
    }
}
