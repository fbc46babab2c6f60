pub mod chart;
pub mod json;
pub mod renderer;
pub mod text;

pub use renderer::{RenderError, RenderOutput, Renderer, Selection};
