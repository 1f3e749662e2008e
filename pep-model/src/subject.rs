use crate::attribute::Attribute;

/// A requesting identity: a set of attributes (certificate subject,
/// VOMS FQANs, ...), optionally scoped to an XACML subject category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Subject {
    category: Option<String>,
    attributes: Vec<Attribute>,
}

impl Subject {
    pub fn new() -> Self {
        Subject::default()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category;
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }
}
