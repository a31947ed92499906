//! Built-in Shader Code Generator
//!
//! Assembles the Kage source of the built-in fragment programs from fixed
//! fragments. Each option axis selects fragments through an explicit `match`;
//! nothing is interpolated into the text, so the output for a given
//! [`ShaderOptions`] is fully determined by the branches below.
//!
//! The two programs outside the option space, [`SCREEN_SHADER_SOURCE`] and
//! [`CLEAR_SHADER_SOURCE`], are plain constants.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use xxhash_rust::xxh3::xxh3_128;

use super::options::{Address, Filter, ShaderOptions};

/// Uniform holding the 4x4 color matrix body.
///
/// Bound by name by the runtime, so it must be emitted verbatim.
pub const UNIFORM_COLOR_M_BODY: &str = "ColorMBody";

/// Uniform holding the color matrix translation.
pub const UNIFORM_COLOR_M_TRANSLATION: &str = "ColorMTranslation";

// ─── ShaderSource ─────────────────────────────────────────────────────────────

/// Immutable shader program text.
///
/// Clones share one allocation; [`ShaderSource::ptr_eq`] tells whether two
/// handles came from the same cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderSource(Arc<str>);

impl ShaderSource {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns `true` if both handles point at the same allocation.
    #[inline]
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// xxh3-128 of the text, the key used by compiled module caches.
    #[must_use]
    pub fn content_hash(&self) -> u128 {
        xxh3_128(self.0.as_bytes())
    }
}

impl Deref for ShaderSource {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ShaderSource {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for ShaderSource {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<String> for ShaderSource {
    fn from(source: String) -> Self {
        Self(source.into())
    }
}

impl From<&str> for ShaderSource {
    fn from(source: &str) -> Self {
        Self(source.into())
    }
}

impl fmt::Display for ShaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Fragments ────────────────────────────────────────────────────────────────

const PREAMBLE: &str = r"
//kage:unit pixels

package main
";

const COLOR_M_UNIFORMS: &str = r"
var ColorMBody mat4
var ColorMTranslation vec4
";

const ADDRESS_REPEAT_HELPER: &str = r"
func adjustTexelForAddressRepeat(p vec2) vec2 {
	origin := imageSrc0Origin()
	size := imageSrc0Size()
	return mod(p - origin, size) + origin
}
";

const FRAGMENT_ENTRY: &str = r"
func Fragment(dstPos vec4, srcPos vec2, color vec4) vec4 {
";

const NEAREST_UNSAFE: &str = r"
	clr := imageSrc0UnsafeAt(srcPos)
";

const NEAREST_CLAMP_TO_ZERO: &str = r"
	clr := imageSrc0At(srcPos)
";

const NEAREST_REPEAT: &str = r"
	clr := imageSrc0At(adjustTexelForAddressRepeat(srcPos))
";

const LINEAR_CORNERS: &str = r"
	p0 := srcPos - 1/2.0
	p1 := srcPos + 1/2.0
";

const LINEAR_UNSAFE: &str = r"
	c0 := imageSrc0UnsafeAt(p0)
	c1 := imageSrc0UnsafeAt(vec2(p1.x, p0.y))
	c2 := imageSrc0UnsafeAt(vec2(p0.x, p1.y))
	c3 := imageSrc0UnsafeAt(p1)
";

const LINEAR_CLAMP_TO_ZERO: &str = r"
	c0 := imageSrc0At(p0)
	c1 := imageSrc0At(vec2(p1.x, p0.y))
	c2 := imageSrc0At(vec2(p0.x, p1.y))
	c3 := imageSrc0At(p1)
";

const LINEAR_REPEAT: &str = r"
	p0 = adjustTexelForAddressRepeat(p0)
	p1 = adjustTexelForAddressRepeat(p1)

	c0 := imageSrc0At(p0)
	c1 := imageSrc0At(vec2(p1.x, p0.y))
	c2 := imageSrc0At(vec2(p0.x, p1.y))
	c3 := imageSrc0At(p1)
";

const LINEAR_BLEND: &str = r"
	rate := fract(p1)
	clr := mix(mix(c0, c1, rate.x), mix(c2, c3, rate.x), rate.y)
";

const COLOR_M_APPLY: &str = r"
	// Un-premultiply alpha.
	// When the alpha is 0, 1-sign(alpha) is 1.0, which means division does nothing.
	clr.rgb /= clr.a + (1-sign(clr.a))
	// Apply the clr matrix.
	clr = (ColorMBody * clr) + ColorMTranslation
	// Premultiply alpha
	clr.rgb *= clr.a
	// Apply the color scale.
	clr *= color
	// Clamp the output.
	clr.rgb = min(clr.rgb, clr.a)
";

const COLOR_SCALE_APPLY: &str = r"
	// Apply the color scale.
	clr *= color
";

const FRAGMENT_RETURN: &str = r"
	return clr
}
";

/// Down/up-sampling blit from an offscreen target to the screen.
///
/// Blends the four texels of a square region of size `1/scale`. Texels are
/// always inside the source rect, so sampling is unchecked.
pub const SCREEN_SHADER_SOURCE: &str = r"//kage:unit pixels

package main

func Fragment(dstPos vec4, srcPos vec2) vec4 {
	// Blend source colors in a square region, which size is 1/scale.
	scale := imageDstSize()/imageSrc0Size()
	pos := srcPos
	p0 := pos - 1/2.0/scale
	p1 := pos + 1/2.0/scale

	// Texels must be in the source rect, so it is not necessary to check.
	c0 := imageSrc0UnsafeAt(p0)
	c1 := imageSrc0UnsafeAt(vec2(p1.x, p0.y))
	c2 := imageSrc0UnsafeAt(vec2(p0.x, p1.y))
	c3 := imageSrc0UnsafeAt(p1)

	// p is the p1 value in one pixel assuming that the pixel's upper-left is (0, 0) and the lower-right is (1, 1).
	rate := clamp(fract(p1)*scale, 0, 1)
	return mix(mix(c0, c1, rate.x), mix(c2, c3, rate.x), rate.y)
}
";

/// Clears the target to transparent black.
pub const CLEAR_SHADER_SOURCE: &str = r"//kage:unit pixels

package main

func Fragment() vec4 {
	return vec4(0)
}
";

// ─── Generator ────────────────────────────────────────────────────────────────

pub struct ShaderGenerator;

impl ShaderGenerator {
    /// Builds the Kage source for `options`.
    ///
    /// Pure: equal options always produce byte-identical text.
    #[must_use]
    pub fn generate_shader(options: ShaderOptions) -> ShaderSource {
        let mut sb = String::with_capacity(1024);

        sb.push_str(PREAMBLE);
        if options.use_color_m {
            sb.push_str(COLOR_M_UNIFORMS);
        }
        if options.address == Address::Repeat {
            sb.push_str(ADDRESS_REPEAT_HELPER);
        }

        sb.push_str(FRAGMENT_ENTRY);
        match options.filter {
            Filter::Nearest => sb.push_str(match options.address {
                Address::Unsafe => NEAREST_UNSAFE,
                Address::ClampToZero => NEAREST_CLAMP_TO_ZERO,
                Address::Repeat => NEAREST_REPEAT,
            }),
            Filter::Linear => {
                sb.push_str(LINEAR_CORNERS);
                sb.push_str(match options.address {
                    Address::Unsafe => LINEAR_UNSAFE,
                    Address::ClampToZero => LINEAR_CLAMP_TO_ZERO,
                    Address::Repeat => LINEAR_REPEAT,
                });
                sb.push_str(LINEAR_BLEND);
            }
        }

        if options.use_color_m {
            sb.push_str(COLOR_M_APPLY);
        } else {
            sb.push_str(COLOR_SCALE_APPLY);
        }
        sb.push_str(FRAGMENT_RETURN);

        ShaderSource::from(sb)
    }
}
