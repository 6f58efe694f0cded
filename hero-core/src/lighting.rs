/// Fixed hero lighting
use nalgebra::Vector3;

/// A light source in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light reaching every face
    Ambient { intensity: f32 },
    /// Parallel light shining from `position` toward the origin
    Directional { position: [f32; 3], intensity: f32 },
}

impl Light {
    /// Contribution of this light to a face with the given unit normal
    pub fn contribution(&self, normal: &Vector3<f32>) -> f32 {
        match *self {
            Light::Ambient { intensity } => intensity,
            Light::Directional { position, intensity } => {
                let [x, y, z] = position;
                Vector3::new(x, y, z)
                    .try_normalize(f32::EPSILON)
                    .map_or(0.0, |to_light| normal.dot(&to_light).max(0.0) * intensity)
            }
        }
    }
}

/// Ambient fill, key light from the upper front right, dim rim light from behind
pub const HERO_LIGHTS: [Light; 3] = [
    Light::Ambient { intensity: 0.25 },
    Light::Directional {
        position: [5.0, 5.0, 5.0],
        intensity: 0.85,
    },
    Light::Directional {
        position: [-5.0, 2.0, -5.0],
        intensity: 0.3,
    },
];

/// Total brightness of a face, clamped to `[0, 1]`
pub fn brightness(lights: &[Light], normal: &Vector3<f32>) -> f32 {
    lights
        .iter()
        .map(|light| light.contribution(normal))
        .sum::<f32>()
        .clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_only_on_faces_turned_away() {
        let away = -Vector3::new(5.0, 5.0, 5.0).normalize();
        let lights = &HERO_LIGHTS[..2];
        assert!((brightness(lights, &away) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_key_light_facing_face_is_brightest() {
        let facing = Vector3::new(1.0, 1.0, 1.0).normalize();
        let side = Vector3::new(0.0, 0.0, -1.0);
        assert!(brightness(&HERO_LIGHTS, &facing) > brightness(&HERO_LIGHTS, &side));
        assert!(brightness(&HERO_LIGHTS, &facing) <= 1.0);
    }

    #[test]
    fn test_zero_position_contributes_nothing() {
        let light = Light::Directional {
            position: [0.0; 3],
            intensity: 1.0,
        };
        assert_eq!(light.contribution(&Vector3::y()), 0.0);
    }
}
