use pep_model::{
    Action, Attribute, AttributeAssignment, Environment, Obligation, PolicyResult, Request,
    Resource, Response, Status, StatusCode, Subject,
};
use tagfmt::Value;

use crate::tags::{self, keys};

/// Translates a model entity into its TagFmt representation.
///
/// One `to_value` per entity, grounded directly on the `pep_*_marshal`
/// function pairs in the original client: build a typed map under the
/// entity's class tag, then add one (key, value) pair per field in the
/// order listed in the marshaller table. Optional scalars that are
/// unset marshal to [`Value::Null`], never an absent key.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

fn opt_string(s: Option<&str>) -> Value {
    match s {
        Some(s) => Value::string(s),
        None => Value::Null,
    }
}

fn string_list(values: &[String]) -> Value {
    Value::list(values.iter().map(|v| Value::string(v.as_str())).collect())
}

fn entity_list<T: ToValue>(items: &[T]) -> Value {
    Value::list(items.iter().map(ToValue::to_value).collect())
}

fn opt_entity<T: ToValue>(item: Option<&T>) -> Value {
    match item {
        Some(item) => item.to_value(),
        None => Value::Null,
    }
}

impl ToValue for Attribute {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::ATTRIBUTE,
            vec![
                (Value::string(keys::ID), Value::string(self.id())),
                (Value::string(keys::DATA_TYPE), opt_string(self.datatype())),
                (Value::string(keys::ISSUER), opt_string(self.issuer())),
                (Value::string(keys::VALUES), string_list(self.values())),
            ],
        )
    }
}

impl ToValue for Subject {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::SUBJECT,
            vec![
                (Value::string(keys::CATEGORY), opt_string(self.category())),
                (Value::string(keys::ATTRIBUTES), entity_list(self.attributes())),
            ],
        )
    }
}

impl ToValue for Resource {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::RESOURCE,
            vec![
                (Value::string(keys::CONTENT), opt_string(self.content())),
                (Value::string(keys::ATTRIBUTES), entity_list(self.attributes())),
            ],
        )
    }
}

impl ToValue for Action {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::ACTION,
            vec![(Value::string(keys::ATTRIBUTES), entity_list(self.attributes()))],
        )
    }
}

impl ToValue for Environment {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::ENVIRONMENT,
            vec![(Value::string(keys::ATTRIBUTES), entity_list(self.attributes()))],
        )
    }
}

impl ToValue for Request {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::REQUEST,
            vec![
                (Value::string(keys::SUBJECTS), entity_list(self.subjects())),
                (Value::string(keys::RESOURCES), entity_list(self.resources())),
                (Value::string(keys::ACTION), opt_entity(self.action())),
                (Value::string(keys::ENVIRONMENT), opt_entity(self.environment())),
            ],
        )
    }
}

impl ToValue for StatusCode {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::STATUS_CODE,
            vec![
                (Value::string(keys::CODE), Value::string(self.code())),
                (Value::string(keys::SUBCODE), opt_entity(self.subcode())),
            ],
        )
    }
}

impl ToValue for Status {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::STATUS,
            vec![
                (Value::string(keys::MESSAGE), Value::string(self.message())),
                (Value::string(keys::CODE), opt_entity(self.code())),
            ],
        )
    }
}

impl ToValue for AttributeAssignment {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::ATTRIBUTE_ASSIGNMENT,
            vec![
                (Value::string(keys::ID), Value::string(self.id())),
                (Value::string(keys::VALUES), string_list(self.values())),
            ],
        )
    }
}

impl ToValue for Obligation {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::OBLIGATION,
            vec![
                (Value::string(keys::ID), Value::string(self.id())),
                (
                    Value::string(keys::FULFILL_ON),
                    Value::integer(self.fulfill_on().into()),
                ),
                (
                    Value::string(keys::ATTRIBUTE_ASSIGNMENTS),
                    entity_list(self.attribute_assignments()),
                ),
            ],
        )
    }
}

impl ToValue for PolicyResult {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::RESULT,
            vec![
                (Value::string(keys::DECISION), Value::integer(self.decision().into())),
                (Value::string(keys::RESOURCE_ID), Value::string(self.resource_id())),
                (Value::string(keys::STATUS), opt_entity(self.status())),
                (
                    Value::string(keys::OBLIGATIONS),
                    entity_list(self.obligations()),
                ),
            ],
        )
    }
}

impl ToValue for Response {
    fn to_value(&self) -> Value {
        Value::typed_map(
            tags::RESPONSE,
            vec![
                (Value::string(keys::REQUEST), opt_entity(self.request())),
                (Value::string(keys::RESULTS), entity_list(self.results())),
            ],
        )
    }
}
