//! Kernel configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SMATH_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use smath_linalg::{scalar, Euler, RotationOrder, SingularPolicy};
use std::path::Path;

/// Settings consumers of the kernel apply when calling into it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Singular-matrix handling
    #[serde(default)]
    pub inversion: InversionConfig,
    /// Euler angle defaults
    #[serde(default)]
    pub euler: EulerConfig,
    /// Approximate comparison tolerance
    #[serde(default)]
    pub tolerance: ToleranceConfig,
}

impl KernelConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SMATH_INVERSION__POLICY=strict -> inversion.policy = "strict"
        figment = figment.merge(Env::prefixed("SMATH_").split("__"));

        let config: Self = figment.extract()?;
        log::debug!("Loaded kernel config from {}: {:?}", config_dir.display(), config);
        Ok(config)
    }

    /// Policy for `inverse_with` and `normal_matrix_with`
    pub fn singular_policy(&self) -> SingularPolicy {
        self.inversion.policy
    }

    /// Order used for Euler angles that don't name one
    pub fn default_order(&self) -> RotationOrder {
        self.euler.default_order
    }

    /// Euler angles in the configured default order
    pub fn euler(&self, x: f32, y: f32, z: f32) -> Euler {
        Euler::new(x, y, z, self.default_order())
    }

    /// Compare two scalars with the configured tolerance
    pub fn approx_eq(&self, a: f32, b: f32) -> bool {
        scalar::approx_eq(a, b, self.tolerance.epsilon)
    }
}

/// Singular-matrix handling
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InversionConfig {
    /// `permissive` substitutes identity with a warning, `strict` returns an error
    pub policy: SingularPolicy,
}

/// Euler angle defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerConfig {
    /// One of XYZ, YZX, ZXY, XZY, YXZ, ZYX
    pub default_order: RotationOrder,
}

/// Approximate comparison tolerance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceConfig {
    pub epsilon: f32,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            epsilon: scalar::EPSILON,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    source: figment::Error,
}

impl From<figment::Error> for ConfigError {
    fn from(source: figment::Error) -> Self {
        ConfigError { source }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.source)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
