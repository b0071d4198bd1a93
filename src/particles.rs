//! Ambient background particles
//!
//! Purely cosmetic. Every particle gets independent random size, position,
//! color, opacity and timing. All of them share one keyframe rule whose end
//! offset is drawn once per page load.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::PARTICLE_COLORS;

/// Name of the shared keyframe animation
pub const ANIMATION_NAME: &str = "particle-float";

/// One decorative particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Diameter (px), 1..4
    pub size: f64,
    /// Horizontal position (% of container), 0..100
    pub x: f64,
    /// Vertical position (% of container), 0..100
    pub y: f64,
    pub color: &'static str,
    /// 0.1..0.5
    pub opacity: f64,
    /// Animation duration (s), 15..35
    pub duration: f64,
    /// Animation delay (s), 0..10
    pub delay: f64,
}

impl Particle {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            size: rng.random_range(1.0..4.0),
            x: rng.random_range(0.0..100.0),
            y: rng.random_range(0.0..100.0),
            color: if rng.random_bool(0.5) {
                PARTICLE_COLORS[0]
            } else {
                PARTICLE_COLORS[1]
            },
            opacity: rng.random_range(0.1..0.5),
            duration: rng.random_range(15.0..35.0),
            delay: rng.random_range(0.0..10.0),
        }
    }

    /// Inline style for the particle's `<div>`
    pub fn css(&self) -> String {
        format!(
            "position:absolute;left:{x}%;top:{y}%;width:{size}px;height:{size}px;\
             background:{color};border-radius:50%;opacity:{opacity};\
             animation:{ANIMATION_NAME} {duration}s {delay}s ease-in-out infinite alternate;",
            x = self.x,
            y = self.y,
            size = self.size,
            color = self.color,
            opacity = self.opacity,
            duration = self.duration,
            delay = self.delay,
        )
    }
}

/// Shared keyframe rule. The end translation is random but common to all particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframes {
    /// End x offset (px), -30..30
    pub dx: f64,
    /// End y offset (px), -40..40
    pub dy: f64,
}

impl Keyframes {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            dx: rng.random_range(-30.0..30.0),
            dy: rng.random_range(-40.0..40.0),
        }
    }

    /// Stylesheet text for the `<style>` element
    pub fn css(&self) -> String {
        format!(
            "@keyframes {ANIMATION_NAME} {{\n  \
             0%   {{ transform: translate(0,0) scale(1); opacity: 0.1; }}\n  \
             50%  {{ opacity: 0.5; }}\n  \
             100% {{ transform: translate({dx}px,{dy}px) scale(1.5); opacity: 0.1; }}\n}}\n",
            dx = self.dx,
            dy = self.dy,
        )
    }
}

/// Everything needed to populate the particle container
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub keyframes: Keyframes,
}

impl ParticleField {
    /// Generate `count` particles and the shared keyframes from a seed
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..count).map(|_| Particle::random(&mut rng)).collect();
        let keyframes = Keyframes::random(&mut rng);
        Self {
            particles,
            keyframes,
        }
    }
}

/// Container the particles are appended to
pub const CONTAINER_ID: &str = "particles-container";

/// Fill the particle container and inject the keyframe rule (WASM only)
///
/// Not guarded against re-entry: a second call adds another full set.
/// Returns the number of particles added (0 if the container is missing).
#[cfg(target_arch = "wasm32")]
pub fn spawn(page: &crate::page::Page, seed: u64) -> crate::page::PageResult<usize> {
    use crate::consts::PARTICLE_COUNT;
    use crate::page::js_err;

    let Some(container) = page.element(CONTAINER_ID) else {
        return Ok(0);
    };
    let field = ParticleField::generate(seed, PARTICLE_COUNT);
    let document = page.document();

    for particle in &field.particles {
        let node = document
            .create_element("div")
            .map_err(js_err("createElement"))?;
        node.set_attribute("style", &particle.css())
            .map_err(js_err("setAttribute"))?;
        container
            .append_child(&node)
            .map_err(js_err("appendChild"))?;
    }

    let style = document
        .create_element("style")
        .map_err(js_err("createElement"))?;
    style.set_text_content(Some(&field.keyframes.css()));
    if let Some(head) = document.head() {
        head.append_child(&style).map_err(js_err("appendChild"))?;
    }

    Ok(field.particles.len())
}
