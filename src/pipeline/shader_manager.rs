//! Compiled Shader Module Cache
//!
//! Deduplicates compiled modules by hashing the **final** source text with
//! xxh3-128, and warms the cache with every built-in program ahead of time.
//!
//! The shading-language compiler itself lives outside this crate and plugs in
//! through [`ShaderCompiler`].
//!
//! | Method | Use case |
//! |--------|----------|
//! | [`ShaderModuleCache::get_or_compile`]     | One source, compiled on demand |
//! | [`ShaderModuleCache::precompile_builtin`] | Every built-in variant plus the fixed programs |

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use xxhash_rust::xxh3::xxh3_128;

use super::cache::BuiltinShaderCache;
use super::options::ShaderOptions;
use crate::errors::Result;

/// Label of the screen blit program in compiled module names.
pub const SCREEN_SHADER_LABEL: &str = "builtin screen";

/// Label of the clear program in compiled module names.
pub const CLEAR_SHADER_LABEL: &str = "builtin clear";

/// Backend that turns shader text into a compiled module.
pub trait ShaderCompiler {
    type Module;

    /// Compiles `source`. Failures are reported as
    /// [`ShaderError::Compile`](crate::errors::ShaderError::Compile).
    fn compile(&mut self, label: &str, source: &str) -> Result<Self::Module>;
}

// ─── ShaderModuleCache ────────────────────────────────────────────────────────

/// Compiled module cache keyed by the xxh3-128 of the source text.
pub struct ShaderModuleCache<M> {
    /// xxh3-128 of final source → compiled module.
    module_cache: FxHashMap<u128, M>,
}

impl<M> Default for ShaderModuleCache<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ShaderModuleCache<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            module_cache: FxHashMap::default(),
        }
    }

    /// Compile `source` (or return the cached module).
    ///
    /// Returns `(module_ref, source_hash)`.
    pub fn get_or_compile<C>(
        &mut self,
        compiler: &mut C,
        label: &str,
        source: &str,
    ) -> Result<(&M, u128)>
    where
        C: ShaderCompiler<Module = M>,
    {
        let hash = xxh3_128(source.as_bytes());

        let module = match self.module_cache.entry(hash) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(compiler.compile(label, source).inspect_err(|e| {
                log::warn!("Built-in shader rejected: {e}");
            })?),
        };

        Ok((&*module, hash))
    }

    /// Compiles every source produced by
    /// [`BuiltinShaderCache::append_shader_sources`].
    ///
    /// Returns the number of newly compiled modules; sources already present
    /// (by hash) are skipped.
    pub fn precompile_builtin<C>(
        &mut self,
        compiler: &mut C,
        shaders: &BuiltinShaderCache,
    ) -> Result<usize>
    where
        C: ShaderCompiler<Module = M>,
    {
        let before = self.module_cache.len();
        let sources = shaders.append_shader_sources(Vec::new());

        for (i, source) in sources.iter().enumerate() {
            let label = match ShaderOptions::from_index(i) {
                Some(options) => options.label(),
                None if i == ShaderOptions::COUNT => SCREEN_SHADER_LABEL.to_string(),
                None => CLEAR_SHADER_LABEL.to_string(),
            };
            self.get_or_compile(compiler, &label, source)?;
        }

        let compiled = self.module_cache.len() - before;
        log::info!(
            "Precompiled {compiled} built-in shader modules ({} cached)",
            self.module_cache.len()
        );
        Ok(compiled)
    }

    #[must_use]
    pub fn get(&self, hash: u128) -> Option<&M> {
        self.module_cache.get(&hash)
    }

    #[must_use]
    pub fn contains(&self, hash: u128) -> bool {
        self.module_cache.contains_key(&hash)
    }

    /// Returns the number of cached shader modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.module_cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ShaderError;
    use crate::pipeline::shader_gen::ShaderSource;

    /// Records every label it is asked to compile.
    #[derive(Default)]
    struct RecordingCompiler {
        labels: Vec<String>,
        reject: Option<&'static str>,
    }

    impl ShaderCompiler for RecordingCompiler {
        type Module = usize;

        fn compile(&mut self, label: &str, source: &str) -> Result<usize> {
            if self.reject.is_some_and(|needle| source.contains(needle)) {
                return Err(ShaderError::Compile {
                    label: label.to_string(),
                    reason: "rejected".to_string(),
                });
            }
            self.labels.push(label.to_string());
            Ok(source.len())
        }
    }

    #[test]
    fn test_get_or_compile_dedup() {
        let mut compiler = RecordingCompiler::default();
        let mut modules = ShaderModuleCache::new();

        let (&len, hash) = modules.get_or_compile(&mut compiler, "a", "src").unwrap();
        assert_eq!(len, 3);
        let (_, again) = modules.get_or_compile(&mut compiler, "b", "src").unwrap();

        assert_eq!(hash, again);
        assert_eq!(hash, ShaderSource::from("src").content_hash());
        assert!(modules.contains(hash));
        assert!(!modules.contains(ShaderSource::from("other").content_hash()));
        assert_eq!(compiler.labels, ["a"]);
        assert_eq!(modules.module_count(), 1);
    }

    #[test]
    fn test_precompile_builtin() {
        let shaders = BuiltinShaderCache::new();
        let mut compiler = RecordingCompiler::default();
        let mut modules = ShaderModuleCache::new();

        let compiled = modules.precompile_builtin(&mut compiler, &shaders).unwrap();
        assert_eq!(compiled, ShaderOptions::COUNT + 2);
        assert_eq!(compiler.labels[0], "builtin nearest/unsafe");
        assert_eq!(compiler.labels[1], "builtin nearest/unsafe/color_m");
        assert_eq!(compiler.labels[12], SCREEN_SHADER_LABEL);
        assert_eq!(compiler.labels[13], CLEAR_SHADER_LABEL);

        let again = modules.precompile_builtin(&mut compiler, &shaders).unwrap();
        assert_eq!(again, 0);
        assert_eq!(compiler.labels.len(), ShaderOptions::COUNT + 2);
    }

    #[test]
    fn test_precompile_error() {
        let shaders = BuiltinShaderCache::new();
        let mut compiler = RecordingCompiler {
            reject: Some("vec4(0)"),
            ..Default::default()
        };
        let mut modules = ShaderModuleCache::new();

        let err = modules.precompile_builtin(&mut compiler, &shaders).unwrap_err();
        assert_eq!(
            err,
            ShaderError::Compile {
                label: CLEAR_SHADER_LABEL.to_string(),
                reason: "rejected".to_string(),
            }
        );
        assert_eq!(modules.module_count(), ShaderOptions::COUNT + 1);
    }
}
