/// An obligation's instruction to assign a named value, e.g. mapping a
/// decision to a POSIX uid/gid pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeAssignment {
    id: String,
    values: Vec<String>,
}

impl AttributeAssignment {
    pub fn new(id: impl Into<String>) -> Self {
        AttributeAssignment {
            id: id.into(),
            values: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn add_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }
}
