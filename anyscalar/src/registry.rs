use std::sync::OnceLock;

use crate::{
    arithmetic::ArithmeticRegistry,
    compare::ComparisonRegistry,
    config::{Configuration, ConfigurationCategory, Flag, WarningLevel},
    convert::ConversionRegistry,
    error::ScalarError,
};

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// All dispatch tables used by containers.  Tables are filled in once when
/// the registry is created and never change afterwards, so a registry can be
/// shared between any number of threads.
#[derive(Debug, Clone)]
pub struct Registry {
    config: Configuration,
    conversions: ConversionRegistry,
    comparisons: ComparisonRegistry,
    arithmetic: ArithmeticRegistry,
}

impl Registry {
    /// Create a registry with the default configuration
    pub fn new() -> Self {
        Self::with_config(Configuration::new())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn with_config(config: Configuration) -> Self {
        let conversions = ConversionRegistry::new(&config);
        let comparisons = ComparisonRegistry::new();
        let arithmetic = ArithmeticRegistry::new();

        tracing::debug!(
            conversions = conversions.len(),
            comparisons = comparisons.len(),
            arithmetic = arithmetic.len(),
            "registry populated"
        );

        Self {
            config,
            conversions,
            comparisons,
            arithmetic,
        }
    }

    /// Get the registry used by container operators, creating it with the
    /// default configuration on first use
    pub fn global() -> &'static Registry {
        GLOBAL_REGISTRY.get_or_init(Registry::new)
    }

    /// Create the global registry with a specific configuration.  Must be
    /// called before anything uses the global registry.
    pub fn install(config: Configuration) -> Result<&'static Registry, ScalarError> {
        if GLOBAL_REGISTRY.get().is_some() {
            return Err(ScalarError::AlreadyInitialized);
        }

        GLOBAL_REGISTRY
            .set(Registry::with_config(config))
            .map_err(|_| ScalarError::AlreadyInitialized)?;

        Ok(Self::global())
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn conversions(&self) -> &ConversionRegistry {
        &self.conversions
    }

    pub fn comparisons(&self) -> &ComparisonRegistry {
        &self.comparisons
    }

    pub fn arithmetic(&self) -> &ArithmeticRegistry {
        &self.arithmetic
    }

    /// Report an operator that fell back to its permissive result
    pub(crate) fn report_fallback(&self, err: &ScalarError) {
        match self.config.warning_level(W_SILENT_FALLBACK) {
            Some(WarningLevel::Deny) => panic!("{}", err),
            Some(WarningLevel::Warn) => tracing::warn!(%err, "operator fell back"),
            Some(WarningLevel::Allow) | None => tracing::trace!(%err, "operator fell back"),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

pub static W_SILENT_FALLBACK: Flag =
    Flag::new(ConfigurationCategory::Warning, "silent_fallback")
        .warning(WarningLevel::Warn)
        .help("Report comparisons and arithmetic between kinds without a registered entry");

mod test;
