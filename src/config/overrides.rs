use serde::Serialize;

/// Command-line values layered over file and environment config.
///
/// Unset fields are skipped during serialization so they never mask a value
/// from a lower layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_symlinks: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl SettingsOverrides {
    /// Empty lists mean "not given" on the command line
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = (!extensions.is_empty()).then_some(extensions);
        self
    }

    /// Flags only override when switched on
    pub fn with_flags(mut self, dry_run: bool, follow_symlinks: bool) -> Self {
        self.dry_run = dry_run.then_some(true);
        self.follow_symlinks = follow_symlinks.then_some(true);
        self
    }
}
