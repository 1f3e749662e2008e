use pep_model::{
    Action, Attribute, AttributeAssignment, Decision, Environment, FulfillOn, Obligation,
    PolicyResult, Request, Resource, Response, Status, StatusCode, Subject,
};
use tagfmt::{Pairs, Value};

use crate::error::ProtocolError;
use crate::tags::{self, keys};

/// Reconstructs a model entity from its TagFmt representation.
///
/// One `from_value` per entity, grounded directly on the
/// `pep_*_unmarshal` function pairs in the original client: verify the
/// map's type header matches the expected class tag exactly, then pull
/// each field by key name, tolerating and warning on unrecognized
/// extra keys rather than failing decode.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, ProtocolError>;
}

fn expect_map<'a>(value: &'a Value, class_tag: &str) -> Result<&'a Pairs, ProtocolError> {
    match value {
        Value::Map { type_tag, entries } => match type_tag {
            Some(t) if t == class_tag => Ok(entries),
            Some(other) => Err(ProtocolError::WrongClassTag {
                expected: class_tag.to_string(),
                found: other.clone(),
            }),
            None => Err(ProtocolError::WrongClassTag {
                expected: class_tag.to_string(),
                found: "<untyped map>".to_string(),
            }),
        },
        _ => Err(ProtocolError::NotAMap {
            expected: class_tag.to_string(),
        }),
    }
}

fn find<'a>(entries: &'a Pairs, key: &str) -> Option<&'a Value> {
    entries.iter().find_map(|(k, v)| match k {
        Value::String(s) if s == key => Some(v),
        _ => None,
    })
}

/// Logs a warning for every entry whose key is not in `known`, mirroring
/// the original unmarshaller's behavior of tolerating forward-compatible
/// extra fields.
fn warn_unknown_keys(class_tag: &str, entries: &Pairs, known: &[&str]) {
    for (k, _) in entries {
        if let Value::String(key) = k {
            if !known.contains(&key.as_str()) {
                log::warn!("{class_tag}: ignoring unrecognized key '{key}'");
            }
        }
    }
}

fn require_string(class_tag: &str, entries: &Pairs, key: &str) -> Result<String, ProtocolError> {
    match find(entries, key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ProtocolError::WrongType {
            class_tag: class_tag.to_string(),
            key: key.to_string(),
        }),
        None => Err(ProtocolError::MissingKey {
            class_tag: class_tag.to_string(),
            key: key.to_string(),
        }),
    }
}

fn require_integer(class_tag: &str, entries: &Pairs, key: &str) -> Result<i32, ProtocolError> {
    match find(entries, key) {
        Some(Value::Integer(v)) => Ok(*v),
        Some(_) => Err(ProtocolError::WrongType {
            class_tag: class_tag.to_string(),
            key: key.to_string(),
        }),
        None => Err(ProtocolError::MissingKey {
            class_tag: class_tag.to_string(),
            key: key.to_string(),
        }),
    }
}

fn optional_string(
    class_tag: &str,
    entries: &Pairs,
    key: &str,
) -> Result<Option<String>, ProtocolError> {
    match find(entries, key) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(ProtocolError::WrongType {
            class_tag: class_tag.to_string(),
            key: key.to_string(),
        }),
    }
}

fn required_string_list(
    class_tag: &str,
    entries: &Pairs,
    key: &str,
) -> Result<Vec<String>, ProtocolError> {
    match find(entries, key) {
        Some(Value::List { items, .. }) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                _ => Err(ProtocolError::WrongType {
                    class_tag: class_tag.to_string(),
                    key: key.to_string(),
                }),
            })
            .collect(),
        Some(_) => Err(ProtocolError::WrongType {
            class_tag: class_tag.to_string(),
            key: key.to_string(),
        }),
        None => Err(ProtocolError::MissingKey {
            class_tag: class_tag.to_string(),
            key: key.to_string(),
        }),
    }
}

fn required_entity_list<T: FromValue>(
    class_tag: &str,
    entries: &Pairs,
    key: &str,
) -> Result<Vec<T>, ProtocolError> {
    match find(entries, key) {
        Some(Value::List { items, .. }) => items.iter().map(T::from_value).collect(),
        Some(_) => Err(ProtocolError::WrongType {
            class_tag: class_tag.to_string(),
            key: key.to_string(),
        }),
        None => Err(ProtocolError::MissingKey {
            class_tag: class_tag.to_string(),
            key: key.to_string(),
        }),
    }
}

fn optional_entity<T: FromValue>(entries: &Pairs, key: &str) -> Result<Option<T>, ProtocolError> {
    match find(entries, key) {
        Some(Value::Null) | None => Ok(None),
        Some(v) => Ok(Some(T::from_value(v)?)),
    }
}

impl FromValue for Attribute {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::ATTRIBUTE)?;
        warn_unknown_keys(
            tags::ATTRIBUTE,
            entries,
            &[keys::ID, keys::DATA_TYPE, keys::ISSUER, keys::VALUES],
        );
        let mut attribute = Attribute::new(require_string(tags::ATTRIBUTE, entries, keys::ID)?);
        attribute.set_datatype(optional_string(tags::ATTRIBUTE, entries, keys::DATA_TYPE)?);
        attribute.set_issuer(optional_string(tags::ATTRIBUTE, entries, keys::ISSUER)?);
        for v in required_string_list(tags::ATTRIBUTE, entries, keys::VALUES)? {
            attribute.add_value(v);
        }
        Ok(attribute)
    }
}

impl FromValue for Subject {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::SUBJECT)?;
        warn_unknown_keys(tags::SUBJECT, entries, &[keys::CATEGORY, keys::ATTRIBUTES]);
        let mut subject = Subject::new();
        subject.set_category(optional_string(tags::SUBJECT, entries, keys::CATEGORY)?);
        for a in required_entity_list::<Attribute>(tags::SUBJECT, entries, keys::ATTRIBUTES)? {
            subject.add_attribute(a);
        }
        Ok(subject)
    }
}

impl FromValue for Resource {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::RESOURCE)?;
        warn_unknown_keys(tags::RESOURCE, entries, &[keys::CONTENT, keys::ATTRIBUTES]);
        let mut resource = Resource::new();
        resource.set_content(optional_string(tags::RESOURCE, entries, keys::CONTENT)?);
        for a in required_entity_list::<Attribute>(tags::RESOURCE, entries, keys::ATTRIBUTES)? {
            resource.add_attribute(a);
        }
        Ok(resource)
    }
}

impl FromValue for Action {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::ACTION)?;
        warn_unknown_keys(tags::ACTION, entries, &[keys::ATTRIBUTES]);
        let mut action = Action::new();
        for a in required_entity_list::<Attribute>(tags::ACTION, entries, keys::ATTRIBUTES)? {
            action.add_attribute(a);
        }
        Ok(action)
    }
}

impl FromValue for Environment {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::ENVIRONMENT)?;
        warn_unknown_keys(tags::ENVIRONMENT, entries, &[keys::ATTRIBUTES]);
        let mut environment = Environment::new();
        for a in required_entity_list::<Attribute>(tags::ENVIRONMENT, entries, keys::ATTRIBUTES)? {
            environment.add_attribute(a);
        }
        Ok(environment)
    }
}

impl FromValue for Request {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::REQUEST)?;
        warn_unknown_keys(
            tags::REQUEST,
            entries,
            &[keys::SUBJECTS, keys::RESOURCES, keys::ACTION, keys::ENVIRONMENT],
        );
        let mut request = Request::new();
        for s in required_entity_list::<Subject>(tags::REQUEST, entries, keys::SUBJECTS)? {
            request.add_subject(s);
        }
        for r in required_entity_list::<Resource>(tags::REQUEST, entries, keys::RESOURCES)? {
            request.add_resource(r);
        }
        request.set_action(optional_entity::<Action>(entries, keys::ACTION)?);
        request.set_environment(optional_entity::<Environment>(entries, keys::ENVIRONMENT)?);
        Ok(request)
    }
}

impl FromValue for StatusCode {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::STATUS_CODE)?;
        warn_unknown_keys(tags::STATUS_CODE, entries, &[keys::CODE, keys::SUBCODE]);
        let mut code = StatusCode::new(require_string(tags::STATUS_CODE, entries, keys::CODE)?);
        code.set_subcode(optional_entity::<StatusCode>(entries, keys::SUBCODE)?);
        Ok(code)
    }
}

impl FromValue for Status {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::STATUS)?;
        warn_unknown_keys(tags::STATUS, entries, &[keys::MESSAGE, keys::CODE]);
        let mut status = Status::new(require_string(tags::STATUS, entries, keys::MESSAGE)?);
        status.set_code(optional_entity::<StatusCode>(entries, keys::CODE)?);
        Ok(status)
    }
}

impl FromValue for AttributeAssignment {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::ATTRIBUTE_ASSIGNMENT)?;
        warn_unknown_keys(tags::ATTRIBUTE_ASSIGNMENT, entries, &[keys::ID, keys::VALUES]);
        let mut assignment =
            AttributeAssignment::new(require_string(tags::ATTRIBUTE_ASSIGNMENT, entries, keys::ID)?);
        for v in required_string_list(tags::ATTRIBUTE_ASSIGNMENT, entries, keys::VALUES)? {
            assignment.add_value(v);
        }
        Ok(assignment)
    }
}

impl FromValue for Obligation {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::OBLIGATION)?;
        warn_unknown_keys(
            tags::OBLIGATION,
            entries,
            &[keys::ID, keys::FULFILL_ON, keys::ATTRIBUTE_ASSIGNMENTS],
        );
        let id = require_string(tags::OBLIGATION, entries, keys::ID)?;
        let fulfill_on_raw = require_integer(tags::OBLIGATION, entries, keys::FULFILL_ON)?;
        let fulfill_on = FulfillOn::try_from(fulfill_on_raw)
            .map_err(|_| ProtocolError::InvalidDecision(fulfill_on_raw))?;
        let mut obligation = Obligation::new(id, fulfill_on);
        for a in required_entity_list::<AttributeAssignment>(
            tags::OBLIGATION,
            entries,
            keys::ATTRIBUTE_ASSIGNMENTS,
        )? {
            obligation.add_attribute_assignment(a);
        }
        Ok(obligation)
    }
}

impl FromValue for PolicyResult {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::RESULT)?;
        warn_unknown_keys(
            tags::RESULT,
            entries,
            &[keys::DECISION, keys::RESOURCE_ID, keys::STATUS, keys::OBLIGATIONS],
        );
        let decision_raw = require_integer(tags::RESULT, entries, keys::DECISION)?;
        let decision =
            Decision::try_from(decision_raw).map_err(|_| ProtocolError::InvalidDecision(decision_raw))?;
        let resource_id = require_string(tags::RESULT, entries, keys::RESOURCE_ID)?;
        let mut result = PolicyResult::new(decision, resource_id);
        result.set_status(optional_entity::<Status>(entries, keys::STATUS)?);
        for o in required_entity_list::<Obligation>(tags::RESULT, entries, keys::OBLIGATIONS)? {
            result.add_obligation(o);
        }
        Ok(result)
    }
}

impl FromValue for Response {
    fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let entries = expect_map(value, tags::RESPONSE)?;
        warn_unknown_keys(tags::RESPONSE, entries, &[keys::REQUEST, keys::RESULTS]);
        let mut response = Response::new();
        response.set_request(optional_entity::<Request>(entries, keys::REQUEST)?);
        for r in required_entity_list::<PolicyResult>(tags::RESPONSE, entries, keys::RESULTS)? {
            response.add_result(r);
        }
        Ok(response)
    }
}
