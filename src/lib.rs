pub mod cli;
pub mod error;
pub mod notices;
pub mod pages;
pub mod privacy;
pub mod products;
pub mod reports;
pub mod rules;
pub mod settings;
pub mod store;
pub mod users;
pub mod utils;

pub use cli::{evaluate_rule_file, load_product_manifests, RuleFile};
pub use error::{RegAdminError, Result};
pub use notices::{
    activation_older_than, updated_older_than, NoticeGate, NoticeRules, ACTIVATED_OPTION,
    UPDATED_OPTION,
};
pub use pages::{provision_page, NewPage, PageRecord, PageSpec, PageStatus, PageStore};
pub use privacy::{
    erase_user_data, export_user_data, field_label_index, ErasureOutcome, ExportField,
    ExportGroup, ExportResult,
};
pub use products::{InstalledProducts, ProductError, ProductKind, ProductManifest, ProductVersions};
pub use reports::{user_report, UserReport};
pub use rules::{
    check_numeric, compare, loose_eq, truthy, BoolOperator, CheckCondition, CheckHandler,
    CheckRegistry, ComparisonOperator, ConditionEvaluator, ConditionSpec, ConstraintError,
    PluginConstraints, ProductConditionSpec, Version, VersionConstraint, VersionOperator,
};
pub use settings::{
    format_setting_data, get_option, update_form_settings, FormSettingsStore, SettingEntry,
};
pub use store::OptionsStore;
pub use users::{MetaEntry, UserAccount, UserDirectory, UserMetaStore, FORM_ID_KEY, META_PREFIX};
pub use utils::{logging, validation};

#[cfg(feature = "memory-store")]
pub use pages::MemoryPages;
#[cfg(feature = "memory-store")]
pub use settings::MemoryFormSettings;
#[cfg(feature = "memory-store")]
pub use store::MemoryOptions;
#[cfg(feature = "memory-store")]
pub use users::MemoryUsers;
