use crate::vec3::{Float, Point3, Vec3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("image width must be positive, got {0}")]
    ImageWidth(u32),
    #[error("aspect ratio must be positive, got {0}")]
    AspectRatio(Float),
    #[error("samples per pixel must be positive, got {0}")]
    SamplesPerPixel(u32),
    #[error("vertical fov must be in (0, 180) degrees, got {0}")]
    VerticalFov(Float),
    #[error("aperture must be non-negative, got {0}")]
    Aperture(Float),
    #[error("focus distance must be positive, got {0}")]
    FocusDistance(Float),
}

/// Everything tunable about a render. The defaults reproduce the classic
/// cover image: 1200x800 at 500 samples with a 50-bounce budget.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub aspect_ratio: Float,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    /// Bounce budget per camera sample; 0 renders a black image
    pub max_depth: u32,
    pub lookfrom: Point3,
    pub lookat: Point3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vertical_fov: Float,
    pub aperture: Float,
    pub focus_distance: Float,
    /// `Some` makes the render deterministic; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            aspect_ratio: 3.0 / 2.0,
            image_width: 1200,
            samples_per_pixel: 500,
            max_depth: 50,
            lookfrom: Point3::new(13.0, 2.0, 3.0),
            lookat: Point3::zero(),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vertical_fov: 20.0,
            aperture: 0.1,
            focus_distance: 10.0,
            seed: None,
        }
    }
}

impl RenderConfig {
    pub fn image_height(&self) -> u32 {
        (self.image_width as Float / self.aspect_ratio) as u32
    }

    /// Rejects configurations the render loop cannot make sense of.
    /// Call this once up front; nothing below revalidates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_width == 0 {
            return Err(ConfigError::ImageWidth(self.image_width));
        }
        if !(self.aspect_ratio > 0.0) {
            return Err(ConfigError::AspectRatio(self.aspect_ratio));
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::SamplesPerPixel(self.samples_per_pixel));
        }
        if !(self.vertical_fov > 0.0 && self.vertical_fov < 180.0) {
            return Err(ConfigError::VerticalFov(self.vertical_fov));
        }
        if !(self.aperture >= 0.0) {
            return Err(ConfigError::Aperture(self.aperture));
        }
        if !(self.focus_distance > 0.0) {
            return Err(ConfigError::FocusDistance(self.focus_distance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.image_width, 1200);
        assert_eq!(config.image_height(), 800);
        assert_eq!(config.samples_per_pixel, 500);
        assert_eq!(config.max_depth, 50);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = RenderConfig {
            image_width: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ImageWidth(0)));
    }

    #[test]
    fn test_zero_samples_rejected() {
        let config = RenderConfig {
            samples_per_pixel: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SamplesPerPixel(0)));
    }

    #[test]
    fn test_nan_aspect_rejected() {
        let config = RenderConfig {
            aspect_ratio: Float::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AspectRatio(_))
        ));
    }

    #[test]
    fn test_bad_fov_rejected() {
        for fov in [0.0, -10.0, 180.0, 360.0] {
            let config = RenderConfig {
                vertical_fov: fov,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::VerticalFov(_))));
        }
    }

    #[test]
    fn test_negative_aperture_rejected() {
        let config = RenderConfig {
            aperture: -0.1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Aperture(-0.1)));
    }
}
