/// One XACML attribute: an identifier, an optional datatype, an
/// optional issuer, and zero or more values.
///
/// Mirrors `pep_attribute_t` from the original client: values are kept
/// in insertion order and duplicates are allowed (the PDP, not this
/// library, decides what duplicate values mean).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attribute {
    id: String,
    datatype: Option<String>,
    issuer: Option<String>,
    values: Vec<String>,
}

impl Attribute {
    pub fn new(id: impl Into<String>) -> Self {
        Attribute {
            id: id.into(),
            datatype: None,
            issuer: None,
            values: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    pub fn set_datatype(&mut self, datatype: Option<String>) {
        self.datatype = datatype;
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    pub fn set_issuer(&mut self, issuer: Option<String>) {
        self.issuer = issuer;
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Appends a value. An attribute with no values is valid; it is up
    /// to the caller (and ultimately the PDP) whether that is useful.
    pub fn add_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }
}
