use crate::attribute::Attribute;

/// Ambient context attributes (time of day, client IP, ...) for a
/// [`crate::request::Request`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Environment {
    attributes: Vec<Attribute>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }
}
