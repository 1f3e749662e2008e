use crate::attribute::Attribute;

/// The operation being requested on a [`crate::resource::Resource`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Action {
    attributes: Vec<Attribute>,
}

impl Action {
    pub fn new() -> Self {
        Action::default()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }
}
