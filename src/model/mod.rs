//! Entity model recovered from source: definitions, their members and visibility
//!
//! Pure data plus the invariants that guard it. Parsing lives in `extractors`,
//! name binding in `explore::resolve`.

pub mod component;
pub mod definition;
pub mod visibility;

pub use component::{Argument, ClassComponent, ComponentKind, FunctionFlags};
pub use definition::{
    form_full_name, namespace_of, namespace_segments, simple_name, ClassBody, Definition,
    DefinitionKeyword, DefinitionKind, EnumBody, RawAssociation, RawReferences,
    FULL_NAME_SEPARATOR,
};
pub use visibility::Visibility;
