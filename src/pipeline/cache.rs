//! Built-in Shader Source Cache
//!
//! Memoizes [`ShaderGenerator::generate_shader`] for every [`ShaderOptions`]
//! value. The table is indexed by the full option tuple
//! (`[Filter][Address][use_color_m]`) and guarded by a single mutex that
//! spans the check, the generation and the store.
//!
//! # Lock Granularity
//!
//! Generation is cheap and happens at most [`ShaderOptions::COUNT`] times per
//! cache, so one coarse lock is enough. Slots only ever go from empty to
//! populated; every caller observes the same shared [`ShaderSource`] for a
//! given tuple.
//!
//! # Instances
//!
//! Renderers normally own a [`BuiltinShaderCache`] and hand out references.
//! [`BuiltinShaderCache::global`] provides the process-wide instance used by
//! the free functions [`shader_source`] and [`append_shader_sources`].

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::options::{Address, Filter, ShaderOptions};
use super::shader_gen::{
    CLEAR_SHADER_SOURCE, SCREEN_SHADER_SOURCE, ShaderGenerator, ShaderSource,
};

type ShaderTable = [[[Option<ShaderSource>; 2]; Address::COUNT]; Filter::COUNT];

static BUILTIN_SHADERS: OnceLock<BuiltinShaderCache> = OnceLock::new();

/// Lazily-filled table of generated built-in shader sources.
pub struct BuiltinShaderCache {
    shaders: Mutex<ShaderTable>,
    /// Number of generator invocations. Only written under `shaders`.
    generated: AtomicUsize,
    screen: ShaderSource,
    clear: ShaderSource,
}

impl Default for BuiltinShaderCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinShaderCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shaders: Mutex::new(ShaderTable::default()),
            generated: AtomicUsize::new(0),
            screen: ShaderSource::from(SCREEN_SHADER_SOURCE),
            clear: ShaderSource::from(CLEAR_SHADER_SOURCE),
        }
    }

    /// The process-wide cache, created on first use.
    #[must_use]
    pub fn global() -> &'static BuiltinShaderCache {
        BUILTIN_SHADERS.get_or_init(BuiltinShaderCache::new)
    }

    /// Returns the built-in shader source for the given parameters,
    /// generating it on first request.
    #[must_use]
    pub fn shader_source(
        &self,
        filter: Filter,
        address: Address,
        use_color_m: bool,
    ) -> ShaderSource {
        self.get(ShaderOptions::new(filter, address, use_color_m))
    }

    /// Same as [`BuiltinShaderCache::shader_source`], keyed by [`ShaderOptions`].
    #[must_use]
    pub fn get(&self, options: ShaderOptions) -> ShaderSource {
        let mut shaders = self.shaders.lock();
        let slot = &mut shaders[options.filter.index()][options.address.index()]
            [usize::from(options.use_color_m)];

        if let Some(source) = slot.as_ref() {
            return source.clone();
        }

        let source = ShaderGenerator::generate_shader(options);
        self.generated.fetch_add(1, Ordering::Relaxed);

        log::debug!(
            "Generated built-in shader {} ({} bytes)",
            options.label(),
            source.len()
        );
        log::trace!("{}:\n{}", options.label(), source);

        *slot = Some(source.clone());
        source
    }

    /// Returns `true` if the variant has already been generated.
    #[must_use]
    pub fn is_cached(&self, options: ShaderOptions) -> bool {
        let shaders = self.shaders.lock();
        shaders[options.filter.index()][options.address.index()][usize::from(options.use_color_m)]
            .is_some()
    }

    /// Number of populated slots.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.shaders
            .lock()
            .iter()
            .flatten()
            .flatten()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// Number of times the generator has run for this cache.
    #[must_use]
    pub fn generation_count(&self) -> usize {
        self.generated.load(Ordering::Relaxed)
    }

    /// The screen blit program.
    #[must_use]
    pub fn screen_shader_source(&self) -> ShaderSource {
        self.screen.clone()
    }

    /// The clear program.
    #[must_use]
    pub fn clear_shader_source(&self) -> ShaderSource {
        self.clear.clone()
    }

    /// Appends every built-in source to `sources` and returns it.
    ///
    /// Order: filters ascending, addresses ascending, each as the
    /// `use_color_m = false` / `true` pair, followed by the screen and clear
    /// programs. Callers that register sources by position rely on it.
    pub fn append_shader_sources(&self, mut sources: Vec<ShaderSource>) -> Vec<ShaderSource> {
        sources.reserve(ShaderOptions::COUNT + 2);
        for filter in Filter::ALL {
            for address in Address::ALL {
                sources.push(self.shader_source(filter, address, false));
                sources.push(self.shader_source(filter, address, true));
            }
        }
        sources.push(self.screen_shader_source());
        sources.push(self.clear_shader_source());
        sources
    }
}

/// Looks up a built-in shader source in the process-wide cache.
#[must_use]
pub fn shader_source(filter: Filter, address: Address, use_color_m: bool) -> ShaderSource {
    BuiltinShaderCache::global().shader_source(filter, address, use_color_m)
}

/// Appends every built-in source from the process-wide cache.
pub fn append_shader_sources(sources: Vec<ShaderSource>) -> Vec<ShaderSource> {
    BuiltinShaderCache::global().append_shader_sources(sources)
}
