use crate::camera::{CameraRig, Point};
use crate::config::EngineConfig;
use crate::distortion::ScrollDistortionPass;
use crate::dom::ImageElement;
use crate::error::EngineError;
use crate::hover::HoverInteractor;
use crate::plane::{TrackedElement, bind_all};
use crate::render::{FrameOutput, MaterialTemplate, Renderer};
use crate::viewport::ViewportState;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Core engine state: everything that runs without a browser.
///
/// Owns the viewport, camera, bound planes, hover interactor, and distortion
/// pass. Host events are fanned out through the `on_*` methods; the host calls
/// [`tick`](Self::tick) once per display refresh.
pub struct EngineCore<E> {
    pub config: EngineConfig,
    pub viewport: ViewportState,
    pub camera: CameraRig,
    pub planes: Vec<TrackedElement<E>>,
    pub hover: HoverInteractor,
    pub distortion: ScrollDistortionPass,
    /// Elapsed seconds at the most recent frame; timestamps pointer events.
    clock: f64,
}

impl<E: ImageElement> EngineCore<E> {
    /// Build the engine and bind every element.
    ///
    /// Must only be called once the host's images have finished loading.
    /// `scroll_y` is the page's scroll offset at that moment; element boxes
    /// are measured against it. Elements that fail to bind are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation or the viewport size is
    /// not positive.
    pub fn new<I>(
        config: EngineConfig,
        width: f64,
        height: f64,
        scroll_y: f64,
        template: &MaterialTemplate,
        elements: I,
    ) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = E>,
    {
        config.validate()?;
        let viewport = ViewportState::with_scroll(width, height, scroll_y)?;
        let camera = CameraRig::new(config.focal_distance, config.near, config.far, &viewport);
        let (planes, _skipped) = bind_all(elements, template, config.layout_mode, &viewport);
        Ok(Self {
            config,
            viewport,
            camera,
            planes,
            hover: HoverInteractor::new(config.hit_mode, config.hover_duration_secs, config.hover_easing),
            distortion: ScrollDistortionPass::new(config.distortion_factor, config.distortion_enabled),
            clock: 0.0,
        })
    }

    /// Hand every plane's material to the renderer for texture upload.
    ///
    /// Returns how many uploads succeeded; failures are logged.
    pub fn upload_materials<R: Renderer>(&self, renderer: &mut R) -> usize {
        let mut uploaded = 0;
        for plane in &self.planes {
            match renderer.upload(plane.index(), plane.material()) {
                Ok(()) => uploaded += 1,
                Err(e) => tracing::warn!(index = plane.index(), error = %e, "material upload failed"),
            }
        }
        uploaded
    }

    // --- Host events ---

    /// Viewport resized: resample size and re-tune the camera.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidViewport`] and keeps the previous size and
    /// camera if the new size is not positive.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        self.viewport.on_resize(width, height)?;
        self.camera.configure_for_pixel_mapping(&self.viewport);
        tracing::debug!(width, height, fov = self.camera.params().vertical_fov_degrees, "viewport resized");
        Ok(())
    }

    /// Page scrolled to `scroll_y`.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.viewport.on_scroll(scroll_y);
    }

    /// Pointer moved to `pointer` (viewport coordinates).
    pub fn on_pointer_move(&mut self, pointer: Point) {
        self.hover
            .on_pointer_move(pointer, &mut self.planes, &self.camera, &self.viewport, self.clock);
    }

    /// Pointer entered plane `index`'s element.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexOutOfRange`] for an unknown index.
    pub fn on_pointer_enter(&mut self, index: usize, pointer: Point) -> Result<(), EngineError> {
        self.hover.on_pointer_enter(index, pointer, &mut self.planes, self.clock)
    }

    /// Pointer left plane `index`'s element.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexOutOfRange`] for an unknown index.
    pub fn on_pointer_leave(&mut self, index: usize) -> Result<(), EngineError> {
        self.hover.on_pointer_leave(index, &mut self.planes, self.clock)
    }

    /// Pointer left the page.
    pub fn on_pointer_exit(&mut self) {
        self.hover.release_all(&mut self.planes, self.clock);
    }

    // --- Frame ---

    /// Run one frame's updates and return what should be drawn.
    ///
    /// Order: clock, plane transforms and time uniforms, hover easing, scroll
    /// bookkeeping and distortion.
    pub fn frame(&mut self, elapsed: f64) -> FrameOutput {
        self.clock = elapsed;

        for plane in &mut self.planes {
            plane.refresh(&self.viewport);
            plane.update_time(elapsed);
        }

        self.hover.advance(&mut self.planes, elapsed);

        self.distortion.update(&self.viewport);
        self.viewport.commit_scroll();

        FrameOutput {
            elapsed,
            planes: self.planes.iter().map(TrackedElement::output).collect(),
            post: self.distortion.pass(),
        }
    }

    /// Run one frame and issue the render. Render failures are logged and the
    /// loop carries on.
    pub fn tick<R: Renderer>(&mut self, elapsed: f64, renderer: &mut R) -> FrameOutput {
        let output = self.frame(elapsed);
        if let Err(e) = renderer.render(&output) {
            tracing::warn!(error = %e, "render failed");
        }
        output
    }

    // --- Queries ---

    /// Elapsed seconds at the most recent frame.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    #[must_use]
    pub fn plane(&self, index: usize) -> Option<&TrackedElement<E>> {
        self.planes.get(index)
    }
}
