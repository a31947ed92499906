#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Built-in fragment shaders for a 2D rendering pipeline.
//!
//! ```rust,ignore
//! use builtin_shaders::{Address, Filter, shader_source};
//!
//! let source = shader_source(Filter::Linear, Address::Repeat, true);
//! assert!(source.contains("ColorMBody"));
//! ```

pub mod errors;
pub mod pipeline;

pub use errors::{Result, ShaderError};
pub use pipeline::{
    Address, BuiltinShaderCache, CLEAR_SHADER_SOURCE, Filter, SCREEN_SHADER_SOURCE,
    ShaderCompiler, ShaderGenerator, ShaderModuleCache, ShaderOptions, ShaderSource,
    UNIFORM_COLOR_M_BODY, UNIFORM_COLOR_M_TRANSLATION, append_shader_sources, shader_source,
};
