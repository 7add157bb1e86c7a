use std::{collections::HashMap, fmt, str::FromStr};

use thiserror::Error;

use crate::{convert::F_TEXT_CONVERSIONS, registry::W_SILENT_FALLBACK};

/// Every flag understood by a registry
pub(crate) static FLAGS: &[&Flag] = &[&F_TEXT_CONVERSIONS, &W_SILENT_FALLBACK];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown configuration option `{name}`")]
    UnknownFlag { name: String },

    #[error("Invalid value {value:?} for option `{name}`, expected {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Registry configuration options
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Configuration {
    options: HashMap<Flag, FlagKind>,
}

impl Configuration {
    /// Create the default configuration settings
    pub fn new() -> Self {
        Self {
            options: HashMap::new(),
        }
    }

    /// Get a boolean configuration option
    pub fn bool(&self, value: Flag) -> Option<bool> {
        self.options
            .get(&value)
            .and_then(|kind| match kind {
                FlagKind::Boolean(val) => Some(*val),
                _ => None,
            })
            .or_else(|| match value.default {
                StaticFlagKind::Boolean(default) => Some(default),
                _ => None,
            })
    }

    /// Gets a warning level flag value
    pub fn warning_level(&self, value: Flag) -> Option<WarningLevel> {
        self.options
            .get(&value)
            .and_then(|kind| match kind {
                FlagKind::WarningLevel(val) => Some(*val),
                _ => None,
            })
            .or_else(|| match value.default {
                StaticFlagKind::WarningLevel(default) => Some(default),
                _ => None,
            })
    }

    /// Sets a flag's boolean value.  True and false are mapped to warn and
    /// allow respectively for warning level options.
    pub fn set_bool(&mut self, flag: Flag, value: bool) {
        let warn = if value {
            WarningLevel::Warn
        } else {
            WarningLevel::Allow
        };

        self.generic_setter(flag, value, warn);
    }

    /// Sets a flag's warning level value.  If it takes a boolean, allow and
    /// warn map to true and deny to false.
    pub fn set_warning_level(&mut self, flag: Flag, value: WarningLevel) {
        let bool = match value {
            WarningLevel::Allow => true,
            WarningLevel::Warn => true,
            WarningLevel::Deny => false,
        };
        self.generic_setter(flag, bool, value)
    }

    /// Set a flag from its textual form, as read from an environment
    /// variable or a command line.  Boolean flags take `true` or `false`,
    /// warning levels take `allow`, `warn` or `deny`.
    pub fn set_from_str(&mut self, flag: Flag, value: &str) -> Result<(), ConfigError> {
        let invalid = |expected| ConfigError::InvalidValue {
            name: flag.name,
            value: value.to_string(),
            expected,
        };

        match flag.default {
            StaticFlagKind::Boolean(_) => {
                let value = value.trim().parse().map_err(|_| invalid("`true` or `false`"))?;
                self.set_bool(flag, value);
            }
            StaticFlagKind::WarningLevel(_) => {
                let value = value
                    .parse()
                    .map_err(|_| invalid("`allow`, `warn` or `deny`"))?;
                self.set_warning_level(flag, value);
            }
        }

        Ok(())
    }

    /// Look up a flag by `category:name` and set it from its textual form
    pub fn set_option(&mut self, option: &str, value: &str) -> Result<(), ConfigError> {
        let flag = option
            .split_once(':')
            .and_then(|(category, name)| {
                let category = category.parse().ok()?;
                self.lookup(category, name)
            })
            .ok_or_else(|| ConfigError::UnknownFlag {
                name: option.to_string(),
            })?;

        self.set_from_str(flag, value)
    }

    /// Stores the value matching the flag's type
    fn generic_setter(&mut self, flag: Flag, bool: bool, warning: WarningLevel) {
        let value = match flag.default {
            StaticFlagKind::Boolean(_) => FlagKind::Boolean(bool),
            StaticFlagKind::WarningLevel(_) => FlagKind::WarningLevel(warning),
        };

        self.options.insert(flag, value);
    }

    /// Get all of the known flags, followed by any other flags that have had
    /// a value set.  Returns in an unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        FLAGS
            .iter()
            .copied()
            .filter(move |flag| !self.options.contains_key(*flag))
            .chain(self.options.keys())
    }

    /// Attempts to lookup a flag based on its name and category, useful
    /// to convert a string option into something that can be passed to a
    /// setter or getter.
    pub fn lookup(&self, category: ConfigurationCategory, name: &str) -> Option<Flag> {
        self.iter()
            .find(|flag| flag.category == category && flag.name == name)
            .copied()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

/// The type of a configuration option, options with different categories
/// can have the same name, so this is needed to differentiate between them
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum ConfigurationCategory {
    Warning,
    Registry,
}

impl FromStr for ConfigurationCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(ConfigurationCategory::Warning),
            "registry" => Ok(ConfigurationCategory::Registry),
            _ => Err(()),
        }
    }
}

/// An optional configuration option that can be passed to a registry
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Flag {
    category: ConfigurationCategory,
    name: &'static str,
    default: StaticFlagKind,
    help: &'static str,
}

impl Flag {
    /// Create a new configuration option
    pub const fn new(category: ConfigurationCategory, name: &'static str) -> Self {
        Self {
            category,
            name,
            default: StaticFlagKind::Boolean(false),
            help: "",
        }
    }

    /// Set an option to take a boolean value that has a default value
    pub const fn bool(self, value: bool) -> Self {
        Self {
            default: StaticFlagKind::Boolean(value),
            ..self
        }
    }

    /// Set an option to take a warning level
    pub const fn warning(self, value: WarningLevel) -> Self {
        Self {
            default: StaticFlagKind::WarningLevel(value),
            ..self
        }
    }

    /// Set the help text for a configuration option
    pub const fn help(self, help: &'static str) -> Self {
        Self { help, ..self }
    }

    pub fn category(&self) -> ConfigurationCategory {
        self.category
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn help_text(&self) -> &'static str {
        self.help
    }
}

/// The type of data that can be received in an option
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
enum StaticFlagKind {
    Boolean(bool),
    WarningLevel(WarningLevel),
}

/// The data stored inside a flag value
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
enum FlagKind {
    Boolean(bool),
    WarningLevel(WarningLevel),
}

/// How a reportable event is surfaced
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum WarningLevel {
    Allow,
    Warn,
    Deny,
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WarningLevel::Allow => write!(f, "allow"),
            WarningLevel::Warn => write!(f, "warn"),
            WarningLevel::Deny => write!(f, "deny"),
        }
    }
}

impl FromStr for WarningLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(WarningLevel::Allow),
            "warn" => Ok(WarningLevel::Warn),
            "deny" => Ok(WarningLevel::Deny),
            _ => Err(()),
        }
    }
}

mod test;
