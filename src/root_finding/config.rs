//! Shared solver configuration.
//!
//! [`SolverCfg`] : tolerances and iteration cap used by every method
//! ├ `abs_fx`   : function-value tolerance
//! ├ `abs_x`    : absolute step/width tolerance
//! ├ `rel_x`    : relative step/width tolerance
//! └ `max_iter` : iteration cap (optional)
//!
//! Methods with extra knobs (newton's `max_step`, the regula falsi variant)
//! wrap a [`SolverCfg`] and forward its setters via `impl_common_cfg!`.
//!
//! [`MethodSettings`] pairs a registry identifier with a [`SolverCfg`] and is
//! read from TOML:
//!
//! ```toml
//! method = "brentmethod"
//!
//! [tolerances]
//! abs_fx   = 1e-10
//! max_iter = 80
//! ```

use std::path::Path;
use serde::Deserialize;
use super::errors::{ConfigError, RootFindingError, ToleranceError};


pub const DEFAULT_ABS_FX : f64 = 1e-12;
pub const DEFAULT_ABS_X  : f64 = 0.0;
pub const DEFAULT_REL_X  : f64 = 4.0 * f64::EPSILON;


#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverCfg {
    abs_fx: f64,
    abs_x:  f64,
    rel_x:  f64,
    max_iter: Option<usize>,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self {
            abs_fx   : DEFAULT_ABS_FX,
            abs_x    : DEFAULT_ABS_X,
            rel_x    : DEFAULT_REL_X,
            max_iter : None
        }
    }
}

impl SolverCfg {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn abs_fx(&self)   -> f64 { self.abs_fx }
    #[inline] pub fn abs_x(&self)    -> f64 { self.abs_x }
    #[inline] pub fn rel_x(&self)    -> f64 { self.rel_x }
    #[inline] pub fn max_iter(&self) -> Option<usize> { self.max_iter }

    pub fn set_abs_fx(mut self, v: f64) -> Result<Self, ToleranceError> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ToleranceError::InvalidAbsFx { got: v });
        }
        self.abs_fx = v;
        Ok(self)
    }

    /// `abs_x = 0` is only accepted while `rel_x > 0`.
    pub fn set_abs_x(mut self, v: f64) -> Result<Self, ToleranceError> {
        if !v.is_finite() || v < 0.0 {
            return Err(ToleranceError::InvalidAbsX { got: v });
        }
        if v == 0.0 && self.rel_x <= 0.0 {
            return Err(ToleranceError::InvalidAbsRelX { abs_x: v, rel_x: self.rel_x });
        }
        self.abs_x = v;
        Ok(self)
    }

    /// `rel_x = 0` is only accepted while `abs_x > 0`.
    pub fn set_rel_x(mut self, v: f64) -> Result<Self, ToleranceError> {
        if !v.is_finite() || v < 0.0 {
            return Err(ToleranceError::InvalidRelX { got: v });
        }
        if v == 0.0 && self.abs_x <= 0.0 {
            return Err(ToleranceError::InvalidAbsRelX { abs_x: self.abs_x, rel_x: v });
        }
        self.rel_x = v;
        Ok(self)
    }

    pub fn set_max_iter(mut self, v: usize) -> Result<Self, RootFindingError> {
        if v == 0 {
            return Err(RootFindingError::InvalidMaxIter { got: v });
        }
        self.max_iter = Some(v);
        Ok(self)
    }

    /// Re-checks every field. Needed after deserializing, which bypasses the
    /// setters.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !self.abs_fx.is_finite() || self.abs_fx <= 0.0 {
            return Err(ToleranceError::InvalidAbsFx { got: self.abs_fx }.into());
        }
        if !self.abs_x.is_finite() || self.abs_x < 0.0 {
            return Err(ToleranceError::InvalidAbsX { got: self.abs_x }.into());
        }
        if !self.rel_x.is_finite() || self.rel_x < 0.0 {
            return Err(ToleranceError::InvalidRelX { got: self.rel_x }.into());
        }
        if self.abs_x == 0.0 && self.rel_x == 0.0 {
            return Err(ToleranceError::InvalidAbsRelX { abs_x: 0.0, rel_x: 0.0 }.into());
        }
        if self.max_iter == Some(0) {
            return Err(RootFindingError::InvalidMaxIter { got: 0 }.into());
        }

        Ok(self)
    }
}


/// Forwards the [`SolverCfg`] setters to a method config holding it in a
/// `common` field.
macro_rules! impl_common_cfg {
    ($cfg:ty) => {
        impl $cfg {
            pub fn common(&self) -> &$crate::root_finding::config::SolverCfg {
                &self.common
            }
            pub fn set_abs_fx(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::ToleranceError> {
                self.common = self.common.set_abs_fx(v)?;
                Ok(self)
            }
            pub fn set_abs_x(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::ToleranceError> {
                self.common = self.common.set_abs_x(v)?;
                Ok(self)
            }
            pub fn set_rel_x(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::ToleranceError> {
                self.common = self.common.set_rel_x(v)?;
                Ok(self)
            }
            pub fn set_max_iter(
                mut self, v: usize
            ) -> Result<Self, $crate::root_finding::errors::RootFindingError> {
                self.common = self.common.set_max_iter(v)?;
                Ok(self)
            }
        }
    };
}
pub(crate) use impl_common_cfg;


/// Method choice plus tolerances, as read from a settings file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodSettings {
    /// Registry identifier, e.g. `"bisectionmethod"`.
    pub method: String,
    #[serde(default)]
    pub tolerances: SolverCfg,
}

impl MethodSettings {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut settings: MethodSettings = toml::from_str(s)?;
        settings.tolerances = settings.tolerances.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading method settings");
        Self::from_toml_str(&content)
    }
}
