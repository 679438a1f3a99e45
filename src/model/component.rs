// Class members: instance variables, functions and constructors
//
// Shared fields live on ClassComponent; what differs per member kind lives in
// the ComponentKind payload.

use serde::{Deserialize, Serialize};

use super::visibility::Visibility;

/// A single formal parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Modifier flags of a function
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FunctionFlags {
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_final: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentKind {
    InstanceVariable {
        is_static: bool,
        is_final: bool,
    },
    Function {
        arguments: Vec<Argument>,
        flags: FunctionFlags,
    },
    /// A function without a return type
    Constructor { arguments: Vec<Argument> },
}

/// A member recovered from a definition body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClassComponent {
    pub name: String,
    /// Free-form type text: the declared type of a variable, the return type of a
    /// function, always empty for constructors
    #[serde(rename = "type")]
    pub type_name: String,
    pub visibility: Visibility,
    #[serde(flatten)]
    pub kind: ComponentKind,
}

impl ClassComponent {
    pub fn instance_variable(
        visibility: Visibility,
        name: impl Into<String>,
        type_name: impl Into<String>,
        is_static: bool,
        is_final: bool,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            visibility,
            kind: ComponentKind::InstanceVariable {
                is_static,
                is_final,
            },
        }
    }

    pub fn function(
        visibility: Visibility,
        name: impl Into<String>,
        return_type: impl Into<String>,
        arguments: Vec<Argument>,
        flags: FunctionFlags,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: return_type.into(),
            visibility,
            kind: ComponentKind::Function { arguments, flags },
        }
    }

    pub fn constructor(
        visibility: Visibility,
        name: impl Into<String>,
        arguments: Vec<Argument>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: String::new(),
            visibility,
            kind: ComponentKind::Constructor { arguments },
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, ComponentKind::Constructor { .. })
    }

    pub fn is_instance_variable(&self) -> bool {
        matches!(self.kind, ComponentKind::InstanceVariable { .. })
    }

    /// Arguments of a function or constructor; empty for variables
    pub fn arguments(&self) -> &[Argument] {
        match &self.kind {
            ComponentKind::Function { arguments, .. } | ComponentKind::Constructor { arguments } => {
                arguments
            }
            ComponentKind::InstanceVariable { .. } => &[],
        }
    }

    /// Return type of a function; constructors and variables have none
    pub fn return_type(&self) -> Option<&str> {
        match self.kind {
            ComponentKind::Function { .. } => Some(&self.type_name),
            _ => None,
        }
    }

    pub fn is_static(&self) -> bool {
        match self.kind {
            ComponentKind::InstanceVariable { is_static, .. } => is_static,
            ComponentKind::Function { flags, .. } => flags.is_static,
            ComponentKind::Constructor { .. } => false,
        }
    }

    pub fn is_final(&self) -> bool {
        match self.kind {
            ComponentKind::InstanceVariable { is_final, .. } => is_final,
            ComponentKind::Function { flags, .. } => flags.is_final,
            ComponentKind::Constructor { .. } => false,
        }
    }

    pub fn is_abstract(&self) -> bool {
        match self.kind {
            ComponentKind::Function { flags, .. } => flags.is_abstract,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_has_no_return_type() {
        let ctor = ClassComponent::constructor(
            Visibility::Public,
            "Point",
            vec![Argument::new("x", "int"), Argument::new("y", "int")],
        );
        assert!(ctor.is_constructor());
        assert_eq!(ctor.type_name, "");
        assert_eq!(ctor.return_type(), None);
        assert_eq!(ctor.arguments().len(), 2);
        assert!(!ctor.is_static());
    }

    #[test]
    fn test_function_flags_are_exposed() {
        let func = ClassComponent::function(
            Visibility::Protected,
            "area",
            "double",
            Vec::new(),
            FunctionFlags {
                is_abstract: true,
                ..Default::default()
            },
        );
        assert_eq!(func.return_type(), Some("double"));
        assert!(func.is_abstract());
        assert!(!func.is_final());
        assert!(func.arguments().is_empty());
    }

    #[test]
    fn test_instance_variable_serializes_with_kind_tag() {
        let var = ClassComponent::instance_variable(Visibility::Private, "count", "int", true, false);
        let json = serde_json::to_value(&var).unwrap();
        assert_eq!(json["kind"], "instance_variable");
        assert_eq!(json["type"], "int");
        assert_eq!(json["is_static"], true);
        assert_eq!(json["visibility"], "private");
    }
}
