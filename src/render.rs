//! Rendering seam: materials handed to the renderer and the per-frame output.
//!
//! The engine never rasterizes. It builds one [`Material`] per plane at bind
//! time (passed to [`Renderer::upload`]) and a [`FrameOutput`] every frame
//! (passed to [`Renderer::render`]). Everything here is plain data so it can be
//! serialized across the WASM boundary.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Point, Vec3};
use crate::consts::DEFAULT_HOVER_POSITION;

/// Per-plane shader inputs written by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Uniforms {
    /// Seconds since the engine started.
    pub time: f64,
    /// Eased interaction intensity in [0, 1].
    pub hover_state: f64,
    /// UV of the most recent pointer hit on this plane.
    pub hover_position: Point,
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            hover_state: 0.0,
            hover_position: Point::new(DEFAULT_HOVER_POSITION.0, DEFAULT_HOVER_POSITION.1),
        }
    }
}

/// Image bound to a plane's material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Texture {
    pub source: String,
    pub natural_width: f64,
    pub natural_height: f64,
}

/// Shared configuration every plane's material is stamped from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialTemplate {
    /// Name of the shader program the renderer should use.
    pub shader: String,
    pub transparent: bool,
    pub uniforms: Uniforms,
}

impl Default for MaterialTemplate {
    fn default() -> Self {
        Self { shader: "plane".to_owned(), transparent: true, uniforms: Uniforms::default() }
    }
}

impl MaterialTemplate {
    /// Stamp out an independent material bound to `texture`.
    ///
    /// The returned material owns its uniforms; mutating one plane's
    /// material never affects another's or the template's.
    #[must_use]
    pub fn instantiate(&self, texture: Texture) -> Material {
        Material {
            shader: self.shader.clone(),
            transparent: self.transparent,
            texture,
            uniforms: self.uniforms,
        }
    }
}

/// A plane's material instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub shader: String,
    pub transparent: bool,
    pub texture: Texture,
    pub uniforms: Uniforms,
}

/// Transform and uniforms for one plane in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaneOutput {
    /// Position in the bound-plane collection.
    pub index: usize,
    pub position: Vec3,
    /// Mesh size in world units (unit geometry scaled).
    pub scale: Point,
    pub uniforms: Uniforms,
}

/// Screen-space distortion applied after the scene render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PostPass {
    pub strength: f64,
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutput {
    pub elapsed: f64,
    pub planes: Vec<PlaneOutput>,
    /// `None` renders the scene directly; `Some` composes the post pass after it.
    pub post: Option<PostPass>,
}

/// The rendering library the engine drives.
pub trait Renderer {
    type Error: std::fmt::Display;

    /// Register a plane's material once, at bind time (texture upload).
    ///
    /// # Errors
    ///
    /// Implementations report upload failures; the engine logs and carries on.
    fn upload(&mut self, index: usize, material: &Material) -> Result<(), Self::Error>;

    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Implementations report draw failures; the engine logs and carries on.
    fn render(&mut self, frame: &FrameOutput) -> Result<(), Self::Error>;
}
