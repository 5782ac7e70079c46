//! Configuration utility types.

mod error;
mod handle;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use handle::{cfg, clear_clean_flag, init_config, reload_config};

/// Dotted path of a config field (e.g. `site.nav.activation_line`),
/// used to anchor diagnostics to the line the user has to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
