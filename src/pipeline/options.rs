//! Built-in Shader Options
//!
//! The three orthogonal axes that select a built-in fragment program:
//! [`Filter`], [`Address`] and whether a color matrix is applied.
//!
//! Every axis has a fixed ordinal order. That order defines the cache table
//! layout and the order in which
//! [`BuiltinShaderCache::append_shader_sources`] emits variants, so callers
//! that register sources by position depend on it.
//!
//! Options can be loaded from settings files through `serde`, using
//! `snake_case` names:
//!
//! ```rust,ignore
//! let options: ShaderOptions = serde_json::from_str(
//!     r#"{ "filter": "linear", "address": "repeat", "use_color_m": true }"#,
//! )?;
//! ```
//!
//! [`BuiltinShaderCache::append_shader_sources`]: super::cache::BuiltinShaderCache::append_shader_sources

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShaderError};

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Texel sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Point sampling: one texel at the source position.
    #[default]
    Nearest = 0,
    /// Bilinear interpolation across the four neighboring texels.
    Linear = 1,
}

impl Filter {
    /// Number of filter variants.
    pub const COUNT: usize = 2;

    /// All variants in ordinal order.
    pub const ALL: [Filter; Self::COUNT] = [Filter::Nearest, Filter::Linear];

    /// Ordinal used for table indexing.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Filter::Nearest => "nearest",
            Filter::Linear => "linear",
        }
    }
}

impl TryFrom<u32> for Filter {
    type Error = ShaderError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Filter::Nearest),
            1 => Ok(Filter::Linear),
            _ => Err(ShaderError::InvalidFilter(value)),
        }
    }
}

impl FromStr for Filter {
    type Err = ShaderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ShaderError::UnknownFilterName(s.to_string()))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Behavior when sampling outside the source rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Address {
    /// No bounds adjustment. The caller guarantees every access is in bounds.
    #[default]
    Unsafe = 0,
    /// Texels outside the source rectangle read as transparent black.
    ClampToZero = 1,
    /// Coordinates wrap modulo the source rectangle.
    Repeat = 2,
}

impl Address {
    /// Number of address variants.
    pub const COUNT: usize = 3;

    /// All variants in ordinal order.
    pub const ALL: [Address; Self::COUNT] =
        [Address::Unsafe, Address::ClampToZero, Address::Repeat];

    /// Ordinal used for table indexing.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Address::Unsafe => "unsafe",
            Address::ClampToZero => "clamp_to_zero",
            Address::Repeat => "repeat",
        }
    }
}

impl TryFrom<u32> for Address {
    type Error = ShaderError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Address::Unsafe),
            1 => Ok(Address::ClampToZero),
            2 => Ok(Address::Repeat),
            _ => Err(ShaderError::InvalidAddress(value)),
        }
    }
}

impl FromStr for Address {
    type Err = ShaderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ShaderError::UnknownAddressName(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ShaderOptions
// ---------------------------------------------------------------------------

/// Full key of a built-in shader variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShaderOptions {
    pub filter: Filter,
    pub address: Address,
    #[serde(default)]
    pub use_color_m: bool,
}

impl ShaderOptions {
    /// Number of distinct variants (`Filter::COUNT * Address::COUNT * 2`).
    pub const COUNT: usize = Filter::COUNT * Address::COUNT * 2;

    #[inline]
    #[must_use]
    pub const fn new(filter: Filter, address: Address, use_color_m: bool) -> Self {
        Self {
            filter,
            address,
            use_color_m,
        }
    }

    /// Position in enumeration order: filter, then address, then color matrix.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        (self.filter.index() * Address::COUNT + self.address.index()) * 2
            + usize::from(self.use_color_m)
    }

    /// Inverse of [`ShaderOptions::index`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= Self::COUNT {
            return None;
        }
        let use_color_m = index % 2 == 1;
        let rest = index / 2;
        Some(Self::new(
            Filter::ALL[rest / Address::COUNT],
            Address::ALL[rest % Address::COUNT],
            use_color_m,
        ))
    }

    /// Iterates every variant in enumeration order.
    pub fn all() -> impl Iterator<Item = ShaderOptions> {
        Filter::ALL.into_iter().flat_map(|filter| {
            Address::ALL.into_iter().flat_map(move |address| {
                [false, true]
                    .into_iter()
                    .map(move |use_color_m| ShaderOptions::new(filter, address, use_color_m))
            })
        })
    }

    /// Stable label, used to name compiled modules.
    #[must_use]
    pub fn label(self) -> String {
        format!(
            "builtin {}/{}{}",
            self.filter,
            self.address,
            if self.use_color_m { "/color_m" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, options) in ShaderOptions::all().enumerate() {
            assert_eq!(options.index(), i);
            assert_eq!(ShaderOptions::from_index(i), Some(options));
        }
        assert_eq!(ShaderOptions::from_index(ShaderOptions::COUNT), None);
    }

    #[test]
    fn test_all_order() {
        let all: Vec<_> = ShaderOptions::all().collect();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0], ShaderOptions::new(Filter::Nearest, Address::Unsafe, false));
        assert_eq!(all[1], ShaderOptions::new(Filter::Nearest, Address::Unsafe, true));
        assert_eq!(all[2], ShaderOptions::new(Filter::Nearest, Address::ClampToZero, false));
        assert_eq!(all[11], ShaderOptions::new(Filter::Linear, Address::Repeat, true));
    }

    #[test]
    fn test_raw_ordinals() {
        assert_eq!(Filter::try_from(1u32), Ok(Filter::Linear));
        assert_eq!(Filter::try_from(2u32), Err(ShaderError::InvalidFilter(2)));
        assert_eq!(Address::try_from(2u32), Ok(Address::Repeat));
        assert_eq!(Address::try_from(3u32), Err(ShaderError::InvalidAddress(3)));
    }

    #[test]
    fn test_names() {
        assert_eq!("linear".parse::<Filter>(), Ok(Filter::Linear));
        assert_eq!("clamp_to_zero".parse::<Address>(), Ok(Address::ClampToZero));
        assert!(matches!(
            "Clamp_To_Zero".parse::<Address>(),
            Err(ShaderError::UnknownAddressName(_))
        ));
        assert!("Linear".parse::<Filter>().is_err());
        assert!(matches!(
            "bicubic".parse::<Filter>(),
            Err(ShaderError::UnknownFilterName(name)) if name == "bicubic"
        ));
        assert_eq!(Address::Repeat.to_string(), "repeat");
    }

    #[test]
    fn test_label() {
        let options = ShaderOptions::new(Filter::Linear, Address::ClampToZero, true);
        assert_eq!(options.label(), "builtin linear/clamp_to_zero/color_m");
        assert_eq!(ShaderOptions::default().label(), "builtin nearest/unsafe");
    }
}
