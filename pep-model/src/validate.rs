//! Structural validation of a [`crate::request::Request`] before it is
//! submitted, per spec §3's invariant that `Attribute.id` is present and
//! non-empty and `datatype`/`issuer` are either absent or non-empty.

use thiserror::Error;

use crate::attribute::Attribute;
use crate::request::Request;

/// A [`Request`] violated one of the object model's structural
/// invariants and must not be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("attribute id must be non-empty")]
    EmptyAttributeId,
    #[error("attribute datatype must be non-empty when present")]
    EmptyDatatype,
    #[error("attribute issuer must be non-empty when present")]
    EmptyIssuer,
}

fn validate_attribute(attribute: &Attribute) -> Result<(), ValidationError> {
    if attribute.id().is_empty() {
        return Err(ValidationError::EmptyAttributeId);
    }
    if attribute.datatype() == Some("") {
        return Err(ValidationError::EmptyDatatype);
    }
    if attribute.issuer() == Some("") {
        return Err(ValidationError::EmptyIssuer);
    }
    Ok(())
}

impl Request {
    /// Checks every attribute reachable from this request against spec
    /// §3's structural invariants. Called by `pep-client::dispatch`
    /// before a request is marshalled and submitted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for subject in self.subjects() {
            for attribute in subject.attributes() {
                validate_attribute(attribute)?;
            }
        }
        for resource in self.resources() {
            for attribute in resource.attributes() {
                validate_attribute(attribute)?;
            }
        }
        if let Some(action) = self.action() {
            for attribute in action.attributes() {
                validate_attribute(attribute)?;
            }
        }
        if let Some(environment) = self.environment() {
            for attribute in environment.attributes() {
                validate_attribute(attribute)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, Resource, Subject};

    fn valid_request() -> Request {
        let mut attribute = Attribute::new("urn:oasis:names:tc:xacml:1.0:subject:subject-id");
        attribute.add_value("CN=Alice");
        let mut subject = Subject::new();
        subject.add_attribute(attribute);
        let mut request = Request::new();
        request.add_subject(subject);
        request
    }

    #[test]
    fn accepts_a_well_formed_request() {
        assert_eq!(valid_request().validate(), Ok(()));
    }

    #[test]
    fn accepts_a_request_with_no_subjects_resources_action_or_environment() {
        assert_eq!(Request::new().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_attribute_id() {
        let mut subject = Subject::new();
        subject.add_attribute(Attribute::new(""));
        let mut request = Request::new();
        request.add_subject(subject);
        assert_eq!(request.validate(), Err(ValidationError::EmptyAttributeId));
    }

    #[test]
    fn rejects_empty_datatype_on_a_resource_attribute() {
        let mut attribute = Attribute::new("resource-id");
        attribute.set_datatype(Some(String::new()));
        let mut resource = Resource::new();
        resource.add_attribute(attribute);
        let mut request = Request::new();
        request.add_resource(resource);
        assert_eq!(request.validate(), Err(ValidationError::EmptyDatatype));
    }

    #[test]
    fn accepts_absent_datatype_and_issuer() {
        let attribute = Attribute::new("resource-id");
        let mut resource = Resource::new();
        resource.add_attribute(attribute);
        let mut request = Request::new();
        request.add_resource(resource);
        assert_eq!(request.validate(), Ok(()));
    }
}
