// Definitions: classes, interfaces and enums
//
// Identity is the full name `context/name`. Relationship targets are stored as
// full names so the model stays a plain tree of owned values; the resolution pass
// rewrites them from the raw references captured at extraction time.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::component::{Argument, ClassComponent, FunctionFlags};
use super::visibility::Visibility;
use crate::error::{PdgError, Result};

/// Separates the dotted namespace from the simple name in a full name
pub const FULL_NAME_SEPARATOR: char = '/';

/// Join a namespace and a simple name into a full name
pub fn form_full_name(context: &str, name: &str) -> String {
    format!("{}{}{}", context, FULL_NAME_SEPARATOR, name)
}

/// Simple name part of a full name (`a.b/Foo` -> `Foo`)
pub fn simple_name(full_name: &str) -> &str {
    full_name
        .rsplit_once(FULL_NAME_SEPARATOR)
        .map(|(_, name)| name)
        .unwrap_or(full_name)
}

/// Namespace part of a full name (`a.b/Foo` -> `a.b`)
pub fn namespace_of(full_name: &str) -> &str {
    full_name
        .rsplit_once(FULL_NAME_SEPARATOR)
        .map(|(context, _)| context)
        .unwrap_or("")
}

/// Split a dotted namespace into path segments; the root namespace has none
pub fn namespace_segments(context: &str) -> Vec<&str> {
    if context.is_empty() {
        Vec::new()
    } else {
        context.split('.').collect()
    }
}

/// The keyword that introduced a definition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKeyword {
    Class,
    Interface,
    Enum,
}

impl DefinitionKeyword {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "class" => Some(DefinitionKeyword::Class),
            "interface" => Some(DefinitionKeyword::Interface),
            "enum" => Some(DefinitionKeyword::Enum),
            _ => None,
        }
    }
}

impl std::fmt::Display for DefinitionKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionKeyword::Class => write!(f, "class"),
            DefinitionKeyword::Interface => write!(f, "interface"),
            DefinitionKeyword::Enum => write!(f, "enum"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassBody {
    pub is_abstract: bool,
    /// Full name of the single parent class, once resolved
    pub inheritance: Option<String>,
    pub instance_variables: Vec<ClassComponent>,
}

/// An enum is a restricted class: never abstract, never inherits
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumBody {
    pub instance_variables: Vec<ClassComponent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DefinitionKind {
    Class(ClassBody),
    Interface,
    Enum(EnumBody),
}

impl DefinitionKind {
    pub fn keyword(&self) -> DefinitionKeyword {
        match self {
            DefinitionKind::Class(_) => DefinitionKeyword::Class,
            DefinitionKind::Interface => DefinitionKeyword::Interface,
            DefinitionKind::Enum(_) => DefinitionKeyword::Enum,
        }
    }
}

impl From<DefinitionKeyword> for DefinitionKind {
    fn from(keyword: DefinitionKeyword) -> Self {
        match keyword {
            DefinitionKeyword::Class => DefinitionKind::Class(ClassBody::default()),
            DefinitionKeyword::Interface => DefinitionKind::Interface,
            DefinitionKeyword::Enum => DefinitionKind::Enum(EnumBody::default()),
        }
    }
}

/// An association candidate as written in source, before resolution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "via", content = "target", rename_all = "snake_case")]
pub enum RawAssociation {
    /// `import a.b.Foo;` recorded as the full name `a.b/Foo`
    Import(String),
    /// `import a.b.*;` recorded as the namespace `a.b`
    WildcardImport(String),
    /// Full name of a same-namespace definition mentioned in the body
    Neighbor(String),
}

/// Names captured by the extractor, bound to definitions by the resolution pass
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawReferences {
    /// Simple name following the single-inheritance keyword
    pub inheritance: Option<String>,
    /// Simple names of realized contracts, in source order
    pub realizations: Vec<String>,
    pub associations: Vec<RawAssociation>,
}

/// A class, interface or enum recovered from source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    name: String,
    /// Dot-separated namespace path, empty for the root namespace
    context: String,
    /// Functions and constructors in declaration order
    functions: Vec<ClassComponent>,
    /// Full names of associated definitions, first-seen order
    associations: Vec<String>,
    /// Full names of realized contracts
    realizations: Vec<String>,
    #[serde(flatten)]
    kind: DefinitionKind,
    #[serde(default)]
    unresolved: RawReferences,
}

impl Definition {
    pub fn new(keyword: DefinitionKeyword, name: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context: context.into(),
            functions: Vec::new(),
            associations: Vec::new(),
            realizations: Vec::new(),
            kind: keyword.into(),
            unresolved: RawReferences::default(),
        }
    }

    pub fn class(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::new(DefinitionKeyword::Class, name, context)
    }

    pub fn interface(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::new(DefinitionKeyword::Interface, name, context)
    }

    pub fn enumeration(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::new(DefinitionKeyword::Enum, name, context)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn full_name(&self) -> String {
        form_full_name(&self.context, &self.name)
    }

    pub fn context_segments(&self) -> Vec<&str> {
        namespace_segments(&self.context)
    }

    pub fn kind(&self) -> &DefinitionKind {
        &self.kind
    }

    pub fn keyword(&self) -> DefinitionKeyword {
        self.kind.keyword()
    }

    // -- Members ---------------------------------------------

    pub fn functions(&self) -> &[ClassComponent] {
        &self.functions
    }

    pub fn add_function(
        &mut self,
        visibility: Visibility,
        name: impl Into<String>,
        return_type: impl Into<String>,
        arguments: Vec<Argument>,
        flags: FunctionFlags,
    ) {
        self.functions.push(ClassComponent::function(
            visibility,
            name,
            return_type,
            arguments,
            flags,
        ));
    }

    /// Enum constructors always take the most restrictive visibility
    pub fn add_constructor(
        &mut self,
        visibility: Visibility,
        name: impl Into<String>,
        arguments: Vec<Argument>,
    ) {
        let visibility = match self.kind {
            DefinitionKind::Enum(_) => Visibility::MINIMAL,
            _ => visibility,
        };
        self.functions
            .push(ClassComponent::constructor(visibility, name, arguments));
    }

    pub fn instance_variables(&self) -> &[ClassComponent] {
        match &self.kind {
            DefinitionKind::Class(body) => &body.instance_variables,
            DefinitionKind::Enum(body) => &body.instance_variables,
            DefinitionKind::Interface => &[],
        }
    }

    pub fn add_instance_variable(
        &mut self,
        visibility: Visibility,
        name: impl Into<String>,
        type_name: impl Into<String>,
        is_static: bool,
        is_final: bool,
    ) -> Result<()> {
        let variable =
            ClassComponent::instance_variable(visibility, name, type_name, is_static, is_final);
        match &mut self.kind {
            DefinitionKind::Class(body) => body.instance_variables.push(variable),
            DefinitionKind::Enum(body) => body.instance_variables.push(variable),
            DefinitionKind::Interface => {
                return Err(PdgError::Unsupported {
                    operation: "add_instance_variable",
                    kind: "interface",
                })
            }
        }
        Ok(())
    }

    pub fn is_abstract(&self) -> bool {
        matches!(&self.kind, DefinitionKind::Class(body) if body.is_abstract)
    }

    /// Only classes carry an abstract flag
    pub fn set_abstract(&mut self, is_abstract: bool) -> Result<()> {
        match &mut self.kind {
            DefinitionKind::Class(body) => {
                body.is_abstract = is_abstract;
                Ok(())
            }
            DefinitionKind::Enum(_) => Err(PdgError::Unsupported {
                operation: "set_abstract",
                kind: "enum",
            }),
            DefinitionKind::Interface => Err(PdgError::Unsupported {
                operation: "set_abstract",
                kind: "interface",
            }),
        }
    }

    // -- Relationships ---------------------------------------

    pub fn inheritance(&self) -> Option<&str> {
        match &self.kind {
            DefinitionKind::Class(body) => body.inheritance.as_deref(),
            _ => None,
        }
    }

    pub fn set_inheritance(&mut self, parent: Option<String>) -> Result<()> {
        match &mut self.kind {
            DefinitionKind::Class(body) => {
                body.inheritance = parent;
                Ok(())
            }
            other => Err(PdgError::Unsupported {
                operation: "set_inheritance",
                kind: match other.keyword() {
                    DefinitionKeyword::Enum => "enum",
                    _ => "interface",
                },
            }),
        }
    }

    pub fn realizations(&self) -> &[String] {
        &self.realizations
    }

    pub fn add_realization(&mut self, full_name: impl Into<String>) {
        let full_name = full_name.into();
        if !self.realizations.contains(&full_name) {
            self.realizations.push(full_name);
        }
    }

    pub fn associations(&self) -> &[String] {
        &self.associations
    }

    pub fn has_associate(&self, full_name: &str) -> bool {
        self.associations.iter().any(|a| a == full_name)
    }

    /// Record an association unless it points at this definition, repeats an
    /// existing association, or duplicates the inheritance or a realization edge.
    /// Returns whether the association was added.
    pub fn add_association(&mut self, full_name: impl Into<String>) -> bool {
        let full_name = full_name.into();
        if full_name == self.full_name()
            || self.has_associate(&full_name)
            || self.inheritance() == Some(full_name.as_str())
            || self.realizations.contains(&full_name)
        {
            return false;
        }
        self.associations.push(full_name);
        true
    }

    /// Drop every bound relationship so a resolution pass can start from scratch
    pub fn clear_bindings(&mut self) {
        self.associations.clear();
        self.realizations.clear();
        if let DefinitionKind::Class(body) = &mut self.kind {
            body.inheritance = None;
        }
    }

    pub fn unresolved(&self) -> &RawReferences {
        &self.unresolved
    }

    pub fn set_unresolved(&mut self, raw: RawReferences) {
        self.unresolved = raw;
    }
}

impl PartialEq for Definition {
    fn eq(&self, other: &Self) -> bool {
        self.context == other.context && self.name == other.name
    }
}

impl Eq for Definition {}

impl Hash for Definition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_name().hash(state);
    }
}

impl PartialOrd for Definition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Definition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full_name().cmp(&other.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_and_segments() {
        let def = Definition::class("Foo", "a.b");
        assert_eq!(def.full_name(), "a.b/Foo");
        assert_eq!(def.context_segments(), vec!["a", "b"]);
        assert_eq!(simple_name("a.b/Foo"), "Foo");
        assert_eq!(namespace_of("a.b/Foo"), "a.b");

        let root = Definition::interface("Bar", "");
        assert_eq!(root.full_name(), "/Bar");
        assert!(root.context_segments().is_empty());
    }

    #[test]
    fn test_identity_is_full_name() {
        let a = Definition::class("Foo", "pkg");
        let b = Definition::interface("Foo", "pkg");
        let c = Definition::class("Foo", "other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(c < a, "ordering is lexicographic by full name");
    }

    #[test]
    fn test_enum_cannot_be_abstract() {
        let mut def = Definition::enumeration("Color", "pkg");
        match def.set_abstract(true) {
            Err(PdgError::Unsupported { operation, kind }) => {
                assert_eq!(operation, "set_abstract");
                assert_eq!(kind, "enum");
            }
            other => panic!("expected Unsupported, got {:?}", other),
        }
        assert!(!def.is_abstract());

        let mut class = Definition::class("Shape", "pkg");
        class.set_abstract(true).unwrap();
        assert!(class.is_abstract());
    }

    #[test]
    fn test_enum_constructor_forced_to_minimal_visibility() {
        let mut def = Definition::enumeration("Color", "pkg");
        def.add_constructor(Visibility::Public, "Color", vec![Argument::new("rgb", "int")]);
        def.add_constructor(Visibility::Protected, "Color", Vec::new());
        assert!(def
            .functions()
            .iter()
            .all(|f| f.visibility == Visibility::MINIMAL));

        let mut class = Definition::class("Point", "pkg");
        class.add_constructor(Visibility::Public, "Point", Vec::new());
        assert_eq!(class.functions()[0].visibility, Visibility::Public);
    }

    #[test]
    fn test_association_policy() {
        let mut def = Definition::class("Car", "garage");
        def.set_inheritance(Some("garage/Vehicle".to_string())).unwrap();
        def.add_realization("garage/Drivable");

        assert!(!def.add_association("garage/Car"), "never associates with itself");
        assert!(!def.add_association("garage/Vehicle"), "already the parent");
        assert!(!def.add_association("garage/Drivable"), "already realized");
        assert!(def.add_association("garage/Engine"));
        assert!(!def.add_association("garage/Engine"), "duplicates suppressed");
        assert_eq!(def.associations(), &["garage/Engine".to_string()]);
    }

    #[test]
    fn test_interface_has_no_fields_or_parent() {
        let mut def = Definition::interface("Shape", "geo");
        assert!(def
            .add_instance_variable(Visibility::Public, "SIDES", "int", true, true)
            .is_err());
        assert!(def.set_inheritance(Some("geo/Base".into())).is_err());
        assert!(def.instance_variables().is_empty());
        assert_eq!(def.inheritance(), None);
    }

    #[test]
    fn test_clear_bindings_keeps_members() {
        let mut def = Definition::class("Car", "garage");
        def.add_function(Visibility::Public, "drive", "void", Vec::new(), FunctionFlags::default());
        def.set_inheritance(Some("garage/Vehicle".into())).unwrap();
        def.add_association("garage/Engine");
        def.clear_bindings();
        assert_eq!(def.inheritance(), None);
        assert!(def.associations().is_empty());
        assert_eq!(def.functions().len(), 1);
    }
}
