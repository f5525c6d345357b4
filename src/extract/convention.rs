//! Method-name conventions of the generated sources.
//!
//! The code generator encodes intent in method names: `ExecuteBeforeSave` is
//! a before-save hook, `GetTotal` is the formula of attribute `total`, and so
//! on. Each [`Dialect`] is one such naming scheme.

use std::sync::LazyLock;

use regex::Regex;

use super::types::BehaviourType;

/// `On<attr>PropertyChange`
static PROPERTY_CHANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^On(\w+?)PropertyChange$").expect("Invalid regex")
});

/// `Before<collection>EntityInitialize`
static COLLECTION_INITIALIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Before(\w+)EntityInitialize$").expect("Invalid regex")
});

/// `Get<attr>`
static FORMULA_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Get(\w+)$").expect("Invalid regex"));

/// Attribute reported for collection initialisers. The collection name in
/// the method identifier is not used.
pub const COLLECTION_ATTRIBUTE: &str = "collection";

const ASYNC_SUFFIX: &str = "Async";

/// Naming scheme of a generated source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Data-access methods (`CreateAsync`, `ReadListAsync`, ...).
    DataAccess,
    /// Entity instance hooks (`ExecuteInitialize`, `On<attr>PropertyChange`, ...).
    EntityInstance,
    /// A single application-level behaviour per file.
    Application,
}

impl Dialect {
    /// Unknown method names are an error rather than skipped.
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::DataAccess)
    }

    /// Expressions are trimmed of surrounding whitespace.
    pub fn trims_expression(&self) -> bool {
        !matches!(self, Self::EntityInstance)
    }

    /// Method names carry an `Async` suffix that is not part of the behaviour name.
    pub fn strips_async_suffix(&self) -> bool {
        !matches!(self, Self::EntityInstance)
    }

    /// The behaviour name implied by a method identifier.
    pub fn method_name<'a>(&self, identifier: &'a str) -> &'a str {
        if self.strips_async_suffix() {
            identifier.strip_suffix(ASYNC_SUFFIX).unwrap_or(identifier)
        } else {
            identifier
        }
    }

    /// Map a method identifier to its behaviour type and target attribute.
    ///
    /// Returns `None` when the name follows none of this dialect's patterns.
    /// Application behaviours are not classified by name, so that dialect
    /// always yields `None`.
    pub fn classify(&self, identifier: &str) -> Option<(BehaviourType, Option<String>)> {
        match self {
            Self::DataAccess => classify_data_access(self.method_name(identifier)),
            Self::EntityInstance => classify_entity_instance(identifier),
            Self::Application => None,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataAccess => write!(f, "data-access"),
            Self::EntityInstance => write!(f, "entity"),
            Self::Application => write!(f, "application"),
        }
    }
}

fn classify_data_access(name: &str) -> Option<(BehaviourType, Option<String>)> {
    let behaviour_type = match name {
        "Create" => BehaviourType::Create,
        "Update" => BehaviourType::Update,
        "Delete" => BehaviourType::Delete,
        "Read" => BehaviourType::Read,
        "ReadList" => BehaviourType::ReadList,
        _ => return None,
    };
    Some((behaviour_type, None))
}

fn classify_entity_instance(name: &str) -> Option<(BehaviourType, Option<String>)> {
    let fixed = match name {
        "ExecuteInitialize" => Some(BehaviourType::Initialize),
        "ExecuteBeforeUpdate" => Some(BehaviourType::BeforeChange),
        "ExecuteAfterUpdate" => Some(BehaviourType::AfterChange),
        "ExecuteBeforeSave" => Some(BehaviourType::BeforeSave),
        "ExecuteAfterSave" => Some(BehaviourType::AfterSave),
        _ => None,
    };
    if let Some(behaviour_type) = fixed {
        return Some((behaviour_type, None));
    }

    if let Some(caps) = PROPERTY_CHANGE_PATTERN.captures(name) {
        return Some((BehaviourType::Action, Some(caps[1].to_string())));
    }

    if COLLECTION_INITIALIZE_PATTERN.is_match(name) {
        return Some((
            BehaviourType::BeforeCollectionEntityInitialize,
            Some(COLLECTION_ATTRIBUTE.to_string()),
        ));
    }

    if let Some(caps) = FORMULA_PATTERN.captures(name) {
        return Some((BehaviourType::Formula, Some(lower_first(&caps[1]))));
    }

    None
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
