//! Built-in shader pipeline
//!
//! Generates and caches the built-in Kage fragment programs:
//! - options: the `Filter` / `Address` / color-matrix option space
//! - shader_gen: text assembly for one option tuple, plus the fixed programs
//! - cache: lazily-filled, lock-guarded source table and enumeration
//! - shader_manager: compiled module cache used to precompile every source

pub mod cache;
pub mod options;
pub mod shader_gen;
pub mod shader_manager;

pub use cache::{BuiltinShaderCache, append_shader_sources, shader_source};
pub use options::{Address, Filter, ShaderOptions};
pub use shader_gen::{
    CLEAR_SHADER_SOURCE, SCREEN_SHADER_SOURCE, ShaderGenerator, ShaderSource,
    UNIFORM_COLOR_M_BODY, UNIFORM_COLOR_M_TRANSLATION,
};
pub use shader_manager::{ShaderCompiler, ShaderModuleCache};
