use glam::DVec3;

use crate::foundation::core::Rgb8;
use crate::foundation::math::clamp_channel;
use crate::script::symbols::Material;

/// Light at infinity shining along `direction` (pointing from the surface towards the light).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Light {
    /// Direction towards the light; need not be normalized.
    pub direction: DVec3,
    /// Light colour.
    pub color: Rgb8,
}

/// Fixed view and lighting configuration shared by every solid in a run.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLighting {
    /// Direction towards the viewer.
    pub view: DVec3,
    /// Ambient light colour.
    pub ambient: Rgb8,
    /// Lights in the scene.
    pub lights: Vec<Light>,
    /// Phong exponent for specular highlights.
    pub specular_exponent: i32,
}

/// Flat-shade a surface with outward `normal` using ambient, diffuse and specular terms.
pub fn shade(normal: DVec3, scene: &SceneLighting, material: &Material) -> Rgb8 {
    let n = normal.normalize_or_zero();
    let v = scene.view.normalize_or_zero();
    let coeffs = material.channels();
    let ambient = scene.ambient.to_f64s();

    let mut out = [0.0f64; 3];
    for (c, k) in coeffs.iter().enumerate() {
        out[c] = ambient[c] * k.ambient;
    }

    for light in &scene.lights {
        let l = light.direction.normalize_or_zero();
        let color = light.color.to_f64s();
        let n_dot_l = n.dot(l);
        if n_dot_l <= 0.0 {
            continue;
        }
        let reflect = 2.0 * n_dot_l * n - l;
        let spec = reflect.dot(v).max(0.0).powi(scene.specular_exponent);
        for (c, k) in coeffs.iter().enumerate() {
            out[c] += color[c] * (k.diffuse * n_dot_l + k.specular * spec);
        }
    }

    Rgb8::new(
        clamp_channel(out[0]),
        clamp_channel(out[1]),
        clamp_channel(out[2]),
    )
}
