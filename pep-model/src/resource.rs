use crate::attribute::Attribute;

/// The grid/distributed-computing resource an action targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resource {
    content: Option<String>,
    attributes: Vec<Attribute>,
}

impl Resource {
    pub fn new() -> Self {
        Resource::default()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn set_content(&mut self, content: Option<String>) {
        self.content = content;
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }
}
