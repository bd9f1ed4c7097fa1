//! Interactive physics demonstrations rendered to an HTML canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! simulation engines (projectile, charged particle, double slit), the frame
//! loop that advances them, the world/screen coordinate transforms shared by
//! hit-testing, dragging and painting, and the annotation overlay produced by
//! the scripted tutor. The host page only wires DOM events and controls to
//! [`host::Simulation`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`sim`] | The [`sim::Engine`] contract and the three engine variants |
//! | [`vector`] | 2D vector value type used for kinematic state |
//! | [`params`] | Named engine parameters and control bounds |
//! | [`snapshot`] | Read-only engine projection handed to the renderer |
//! | [`clock`] | Clamped per-frame wall-clock delta |
//! | [`mapper`] | Per-simulation world/screen projections |
//! | [`hit`] | Hit-testing bodies in screen space |
//! | [`input`] | Pointer gesture state machine |
//! | [`surface`] | Testable [`surface::SurfaceCore`] driving one engine |
//! | [`annotation`] | Tutor annotations and their screen-space glyphs |
//! | [`plot`] | Rolling samples and axis scaling for the live graph |
//! | [`tutor`] | Tutor collaborator seam and the scripted tutor |
//! | [`render`] | Canvas2D painter |
//! | [`host`] | wasm-bindgen entry points and the frame scheduler |
//! | [`config`] | Surface configuration |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants |

pub mod annotation;
pub mod clock;
pub mod config;
pub mod consts;
pub mod error;
pub mod hit;
pub mod host;
pub mod input;
pub mod mapper;
pub mod params;
pub mod plot;
pub mod render;
pub mod sim;
pub mod snapshot;
pub mod surface;
pub mod tutor;
pub mod vector;
