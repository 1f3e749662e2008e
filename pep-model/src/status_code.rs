/// A URI status code with an optional nested subcode.
///
/// Nesting has no enforced depth limit but must terminate; see the
/// round-trip test at depth 16 in `pep-protocol`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCode {
    code: String,
    subcode: Option<Box<StatusCode>>,
}

impl StatusCode {
    pub fn new(code: impl Into<String>) -> Self {
        StatusCode {
            code: code.into(),
            subcode: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn subcode(&self) -> Option<&StatusCode> {
        self.subcode.as_deref()
    }

    pub fn set_subcode(&mut self, subcode: Option<StatusCode>) {
        self.subcode = subcode.map(Box::new);
    }
}
