//! DOM-synchronized plane layout and interaction engine.
//!
//! Keeps one textured 3D plane pinned to each tracked `<img>` on a page while
//! it scrolls, resizes, and is hovered. The camera is tuned so that one world
//! unit equals one CSS pixel at the image plane, which makes the layout a pure
//! coordinate transform of each element's bounding box. The crate does not
//! rasterize; it hands mesh transforms and shader uniforms to a
//! [`render::Renderer`] once per frame.
//!
//! The core is plain Rust and testable natively. The `web` feature adds the
//! `wasm-bindgen` host that binds real DOM elements and drives the loop from
//! `requestAnimationFrame`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Frame loop and event fan-out ([`engine::EngineCore`]) |
//! | [`viewport`] | Viewport size, scroll offset, bounding boxes |
//! | [`camera`] | Pixel-mapped perspective camera, projection, picking rays |
//! | [`plane`] | Per-element plane bindings and mesh transforms |
//! | [`hover`] | Pointer picking and eased hover state |
//! | [`distortion`] | Scroll-velocity post-process strength |
//! | [`easing`] | Ease-out curves and tweens |
//! | [`render`] | Renderer trait, materials, per-frame output |
//! | [`dom`] | Host image-element trait |
//! | [`config`] | JSON engine configuration |
//! | [`error`] | Error taxonomy |
//! | [`consts`] | Shared numeric defaults |

pub mod camera;
pub mod config;
pub mod consts;
pub mod distortion;
pub mod dom;
pub mod easing;
pub mod engine;
pub mod error;
pub mod hover;
pub mod plane;
pub mod render;
pub mod viewport;
#[cfg(feature = "web")]
pub mod web;
