//! Naming conventions applied at the conversion boundary.
//!
//! These names must match existing fixtures exactly: only the first
//! character changes case.

/// `StringProperty` -> `stringProperty`.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `stringProperty` -> `StringProperty`.
pub fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn backing_field_name(property: &str) -> String {
    format!("{}BackingField", lower_first(property))
}

pub fn getter_name(property: &str) -> String {
    format!("get{}", upper_first(property))
}

pub fn setter_name(property: &str) -> String {
    format!("set{}", upper_first(property))
}

/// Parameter name of synthesized setters.
pub const SETTER_PARAM: &str = "value";

/// Default name of the count parameter added by array desugaring.
pub const COUNT_PARAM: &str = "count";
