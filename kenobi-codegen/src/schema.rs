//! Per plugin type feature catalogs.

use indexmap::IndexMap;
use pluginkenobi_core::PluginComponent;
use pluginkenobi_recipe::OptionSpec;

use crate::helpers::HelperKind;

/// Name of the implicit feature every plugin has.
pub const CORE_FEATURE: &str = "core";

/// Feature toggle requesting every feature of the plugin type.
pub const ALL_FEATURES: &str = "all";

/// A template and the path it is written to.
///
/// Paths may contain `{component}`, `{plugin}` and `{lang}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileBinding {
    pub template: &'static str,
    pub path: &'static str,
}

impl FileBinding {
    pub const fn new(template: &'static str, path: &'static str) -> Self {
        Self { template, path }
    }

    /// Output path for a component.
    pub fn resolve(&self, component: &PluginComponent) -> String {
        self.path
            .replace("{component}", &component.frankenstyle())
            .replace("{plugin}", component.name())
            .replace("{lang}", &component.lang_file_stem())
    }
}

/// Options and files of a feature validated by the composer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpec {
    pub required: &'static [OptionSpec],
    pub optional: &'static [OptionSpec],
    pub files: &'static [FileBinding],
}

/// How a feature is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureBinding {
    /// Validated by the composer, files rendered with the composed recipe.
    Inline(FeatureSpec),
    /// Handed to a helper generator that owns its files.
    Delegated(HelperKind),
}

impl FeatureBinding {
    pub fn required(&self) -> &'static [OptionSpec] {
        match self {
            FeatureBinding::Inline(spec) => spec.required,
            FeatureBinding::Delegated(kind) => kind.required_options(),
        }
    }

    pub fn optional(&self) -> &'static [OptionSpec] {
        match self {
            FeatureBinding::Inline(spec) => spec.optional,
            FeatureBinding::Delegated(kind) => kind.optional_options(),
        }
    }
}

/// Version and language files every plugin gets.
pub const CORE: FeatureSpec = FeatureSpec {
    required: &[
        OptionSpec::named("component"),
        OptionSpec::named("name"),
        OptionSpec::named("version"),
        OptionSpec::named("requires"),
    ],
    optional: &[
        OptionSpec::named("release"),
        OptionSpec::named("maturity"),
        OptionSpec::named("dependencies"),
    ],
    files: &[
        FileBinding::new("version", "version.php"),
        FileBinding::new("lang", "lang/en/{lang}.php"),
    ],
};

/// Admin settings rendered with the composed recipe.
pub const INLINE_SETTINGS: FeatureSpec = FeatureSpec {
    required: &[],
    optional: &[],
    files: &[FileBinding::new("settings", "settings.php")],
};

/// Features a plugin type supports, in declaration order.
#[derive(Debug, Clone)]
pub struct PluginSchema {
    plugin_type: &'static str,
    default_location: &'static str,
    features: IndexMap<&'static str, FeatureBinding>,
}

impl PluginSchema {
    /// Create a schema with only the core feature.
    pub fn new(plugin_type: &'static str, default_location: &'static str) -> Self {
        let mut features = IndexMap::new();
        features.insert(CORE_FEATURE, FeatureBinding::Inline(CORE));
        Self {
            plugin_type,
            default_location,
            features,
        }
    }

    /// Add a feature.
    pub fn with_feature(mut self, name: &'static str, binding: FeatureBinding) -> Self {
        self.features.insert(name, binding);
        self
    }

    /// Add a feature handled by a helper generator.
    pub fn with_helper(self, kind: HelperKind) -> Self {
        self.with_feature(kind.feature(), FeatureBinding::Delegated(kind))
    }

    /// Local plugins (`local/`).
    pub fn local() -> Self {
        Self::new("local", "local")
            .with_helper(HelperKind::Settings)
            .with_helper(HelperKind::Capabilities)
            .with_helper(HelperKind::Observers)
            .with_helper(HelperKind::Events)
            .with_helper(HelperKind::Uninstall)
            .with_helper(HelperKind::Install)
            .with_helper(HelperKind::Upgrade)
    }

    /// Activity modules (`mod/`).
    pub fn module() -> Self {
        Self::new("mod", "mod")
            .with_helper(HelperKind::Settings)
            .with_helper(HelperKind::Capabilities)
            .with_helper(HelperKind::Observers)
            .with_helper(HelperKind::Events)
            .with_helper(HelperKind::Lib)
            .with_helper(HelperKind::Uninstall)
            .with_helper(HelperKind::Install)
            .with_helper(HelperKind::Upgrade)
    }

    /// Admin tools (`admin/tool/`).
    pub fn tool() -> Self {
        Self::new("tool", "admin/tool")
            .with_feature("settings", FeatureBinding::Inline(INLINE_SETTINGS))
            .with_helper(HelperKind::Capabilities)
            .with_helper(HelperKind::Observers)
            .with_helper(HelperKind::Events)
            .with_helper(HelperKind::Uninstall)
    }

    pub fn plugin_type(&self) -> &'static str {
        self.plugin_type
    }

    /// Directory under the Moodle root where plugins of this type live.
    pub fn default_location(&self) -> &'static str {
        self.default_location
    }

    pub fn feature(&self, name: &str) -> Option<&FeatureBinding> {
        self.features.get(name)
    }

    /// All features, core first.
    pub fn features(&self) -> impl Iterator<Item = (&'static str, &FeatureBinding)> {
        self.features.iter().map(|(name, binding)| (*name, binding))
    }

    /// Names of the features a recipe can request (everything but core).
    pub fn optional_features(&self) -> Vec<&'static str> {
        self.features
            .keys()
            .copied()
            .filter(|name| *name != CORE_FEATURE)
            .collect()
    }
}
