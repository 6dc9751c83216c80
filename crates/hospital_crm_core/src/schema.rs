//! Static field schemas for the record collections.
//!
//! Declared by hand next to the model types; `schema_tests` below keep them
//! aligned with what the payload types actually accept.

use crate::model::appointment::{DEFAULT_APPOINTMENT_STATUS, DEFAULT_APPOINTMENT_TYPE};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    Object,
    DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Null,
    Bool(bool),
    Text(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    /// `None` marks a required field.
    pub default: Option<FieldDefault>,
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub title: &'static str,
    pub fields: &'static [FieldSchema],
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSchema {
    FieldSchema {
        name,
        kind,
        default: None,
        description: None,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSchema {
    FieldSchema {
        name,
        kind,
        default: Some(FieldDefault::Null),
        description: None,
    }
}

const fn described(field: FieldSchema, description: &'static str) -> FieldSchema {
    FieldSchema {
        description: Some(description),
        ..field
    }
}

pub const PATIENT_SCHEMA: EntitySchema = EntitySchema {
    title: "Patient",
    fields: &[
        described(optional("mrn", FieldKind::String), "Medical Record Number"),
        required("first_name", FieldKind::String),
        required("last_name", FieldKind::String),
        described(
            optional("dob", FieldKind::String),
            "Date of birth (YYYY-MM-DD)",
        ),
        optional("phone", FieldKind::String),
        optional("email", FieldKind::String),
        described(
            optional("address", FieldKind::Object),
            "Address object {line1, line2, city, state, zip}",
        ),
        optional("preferred_language", FieldKind::String),
        FieldSchema {
            name: "consent_sms",
            kind: FieldKind::Boolean,
            default: Some(FieldDefault::Bool(false)),
            description: None,
        },
        FieldSchema {
            name: "consent_email",
            kind: FieldKind::Boolean,
            default: Some(FieldDefault::Bool(false)),
            description: None,
        },
    ],
};

pub const PROVIDER_SCHEMA: EntitySchema = EntitySchema {
    title: "Provider",
    fields: &[
        required("name", FieldKind::String),
        optional("specialty", FieldKind::String),
        optional("location", FieldKind::String),
        described(optional("npi", FieldKind::String), "National Provider Identifier"),
    ],
};

pub const APPOINTMENT_SCHEMA: EntitySchema = EntitySchema {
    title: "Appointment",
    fields: &[
        required("patient_id", FieldKind::String),
        required("provider_id", FieldKind::String),
        required("start_time", FieldKind::DateTime),
        required("end_time", FieldKind::DateTime),
        FieldSchema {
            name: "type",
            kind: FieldKind::String,
            default: Some(FieldDefault::Text(DEFAULT_APPOINTMENT_TYPE)),
            description: None,
        },
        FieldSchema {
            name: "status",
            kind: FieldKind::String,
            default: Some(FieldDefault::Text(DEFAULT_APPOINTMENT_STATUS)),
            description: Some("scheduled|checked_in|completed|cancelled"),
        },
        optional("reason", FieldKind::String),
    ],
};

impl EntitySchema {
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|field| field.default.is_none())
            .map(|field| field.name)
    }

    /// JSON-Schema shaped rendering.
    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields {
            properties.insert(field.name.to_string(), field.to_json());
        }
        json!({
            "title": self.title,
            "type": "object",
            "properties": properties,
            "required": self.required_fields().collect::<Vec<_>>(),
        })
    }
}

impl FieldSchema {
    fn to_json(&self) -> Value {
        let mut value = Map::new();
        let base = match self.kind {
            FieldKind::String => json!({ "type": "string" }),
            FieldKind::Boolean => json!({ "type": "boolean" }),
            FieldKind::Object => json!({ "type": "object" }),
            FieldKind::DateTime => json!({ "type": "string", "format": "date-time" }),
        };
        match self.default {
            Some(FieldDefault::Null) => {
                value.insert("anyOf".into(), json!([base, { "type": "null" }]));
                value.insert("default".into(), Value::Null);
            }
            Some(FieldDefault::Bool(flag)) => {
                merge(&mut value, base);
                value.insert("default".into(), Value::Bool(flag));
            }
            Some(FieldDefault::Text(text)) => {
                merge(&mut value, base);
                value.insert("default".into(), Value::String(text.to_string()));
            }
            None => merge(&mut value, base),
        }
        if let Some(description) = self.description {
            value.insert("description".into(), Value::String(description.to_string()));
        }
        Value::Object(value)
    }
}

fn merge(target: &mut Map<String, Value>, source: Value) {
    if let Value::Object(entries) = source {
        target.extend(entries);
    }
}

/// Schemas for every collection keyed the way `GET /schema` exposes them.
pub fn all_schemas() -> Value {
    json!({
        "patient": PATIENT_SCHEMA.to_json(),
        "provider": PROVIDER_SCHEMA.to_json(),
        "appointment": APPOINTMENT_SCHEMA.to_json(),
    })
}
