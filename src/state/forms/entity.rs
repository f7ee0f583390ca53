//! Admin entities edited through one generic create/edit form
//!
//! Each entity names its collection path and schema; [`EntityEditor`] opens
//! the schema's form either for a new entity (POST to the collection) or for
//! an existing one (PUT to `collection/{id}`, seeded from the entity).

use super::form_state::FormState;
use super::record::SubmissionRecord;
use crate::schema::{Endpoint, FieldDescriptor as F, FormRule, FormSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// An entity managed from the admin forms
pub trait AdminEntity: DeserializeOwned {
    /// Schema slug shown in the catalog
    const SLUG: &'static str;
    /// Collection path relative to the API base URL
    const COLLECTION: &'static str;
    /// Human-readable name, used in form titles
    const NOUN: &'static str;

    fn schema() -> FormSchema;
    fn id(&self) -> &str;
    fn label(&self) -> &str;
    fn to_record(&self) -> SubmissionRecord;
}

/// Create/edit form for one admin entity type
#[derive(Debug, Clone)]
pub struct EntityEditor<E> {
    form: FormState,
    _entity: PhantomData<fn() -> E>,
}

impl<E: AdminEntity> EntityEditor<E> {
    pub fn create() -> Self {
        let mut schema = E::schema();
        schema.title = format!("New {}", E::NOUN);
        Self {
            form: FormState::new(schema),
            _entity: PhantomData,
        }
    }

    pub fn edit(entity: &E) -> Self {
        let mut schema = E::schema();
        schema.title = format!("Edit {}", E::NOUN);
        let path = format!("{}/{}", E::COLLECTION.trim_end_matches('/'), entity.id());
        let mut form = FormState::new(schema).with_endpoint(Endpoint::put(path));
        form.record = entity.to_record();
        Self {
            form,
            _entity: PhantomData,
        }
    }

    pub fn into_form(self) -> FormState {
        self.form
    }
}

/// One existing entity, opened for editing
#[derive(Debug, Clone)]
pub struct EntityRow {
    pub label: String,
    pub form: FormState,
}

/// Parse a collection listing into edit forms, one per entity
pub fn edit_rows<E: AdminEntity>(listing: Value) -> Result<Vec<EntityRow>, serde_json::Error> {
    let entities: Vec<E> = serde_json::from_value(listing)?;
    Ok(entities
        .iter()
        .map(|entity| EntityRow {
            label: entity.label().to_string(),
            form: EntityEditor::edit(entity).into_form(),
        })
        .collect())
}

/// Type-erased access to one admin entity type, looked up by slug
#[derive(Debug, Clone, Copy)]
pub struct AdminCollection {
    pub path: &'static str,
    pub noun: &'static str,
    create: fn() -> FormState,
    parse: fn(Value) -> Result<Vec<EntityRow>, serde_json::Error>,
}

impl AdminCollection {
    fn of<E: AdminEntity>() -> Self {
        Self {
            path: E::COLLECTION,
            noun: E::NOUN,
            create: || EntityEditor::<E>::create().into_form(),
            parse: edit_rows::<E>,
        }
    }

    /// Look up the admin entity behind a schema slug
    pub fn for_slug(slug: &str) -> Option<Self> {
        match slug {
            s if s == Location::SLUG => Some(Self::of::<Location>()),
            s if s == Zone::SLUG => Some(Self::of::<Zone>()),
            s if s == AccessLevel::SLUG => Some(Self::of::<AccessLevel>()),
            _ => None,
        }
    }

    /// Blank form for a new entity
    pub fn create_form(&self) -> FormState {
        (self.create)()
    }

    pub fn parse(&self, listing: Value) -> Result<Vec<EntityRow>, serde_json::Error> {
        (self.parse)(listing)
    }
}

fn admin_schema(slug: &str, noun: &str, collection: &str, fields: Vec<F>) -> FormSchema {
    FormSchema::new(slug, noun, Endpoint::post(collection))
        .description(&format!("Create or update a tournament {}", noun.to_lowercase()))
        .fields(fields)
        .session_required()
}

pub const LOCATION_TYPES: [&str; 5] = ["hole", "facility", "checkpoint", "entrance", "hospitality"];

/// A physical place on the course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "location_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub capacity: u32,
}

impl AdminEntity for Location {
    const SLUG: &'static str = "location";
    const COLLECTION: &'static str = "/accreditation/locations";
    const NOUN: &'static str = "Location";

    fn schema() -> FormSchema {
        admin_schema(
            Self::SLUG,
            Self::NOUN,
            Self::COLLECTION,
            vec![
                F::text("name", "Location Name")
                    .required()
                    .placeholder("e.g., Hole 18 Green"),
                F::select("type", "Type", &LOCATION_TYPES)
                    .required()
                    .initial("hole"),
                F::textarea("description", "Description"),
                F::number("capacity", "Capacity").initial("0"),
            ],
        )
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn to_record(&self) -> SubmissionRecord {
        [
            ("name", self.name.clone()),
            ("type", self.location_type.clone()),
            ("description", self.description.clone()),
            ("capacity", self.capacity.to_string()),
        ]
        .into_iter()
        .collect()
    }
}

pub const ZONE_TYPES: [&str; 6] = ["general", "vip", "media", "player", "staff", "restricted"];

/// A group of locations sharing an access policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(rename = "zone_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_zone_color")]
    pub color: String,
}

fn default_zone_color() -> String {
    "#3B82F6".to_string()
}

impl AdminEntity for Zone {
    const SLUG: &'static str = "zone";
    const COLLECTION: &'static str = "/accreditation/zones";
    const NOUN: &'static str = "Zone";

    fn schema() -> FormSchema {
        admin_schema(
            Self::SLUG,
            Self::NOUN,
            Self::COLLECTION,
            vec![
                F::text("name", "Zone Name")
                    .required()
                    .placeholder("e.g., VIP Hospitality Area"),
                F::select("type", "Type", &ZONE_TYPES)
                    .required()
                    .initial("general"),
                F::textarea("description", "Description"),
                F::text("color", "Color").initial("#3B82F6"),
            ],
        )
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn to_record(&self) -> SubmissionRecord {
        [
            ("name", self.name.clone()),
            ("type", self.zone_type.clone()),
            ("description", self.description.clone()),
            ("color", self.color.clone()),
        ]
        .into_iter()
        .collect()
    }
}

/// Accreditation tier granting access to zones. Tier 1 is the highest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessLevel {
    #[serde(rename = "access_level_id")]
    pub id: String,
    pub name: String,
    pub tier: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_access_color")]
    pub color: String,
}

fn default_access_color() -> String {
    "#10B981".to_string()
}

impl AdminEntity for AccessLevel {
    const SLUG: &'static str = "access-level";
    const COLLECTION: &'static str = "/accreditation/access-levels";
    const NOUN: &'static str = "Access Level";

    fn schema() -> FormSchema {
        admin_schema(
            Self::SLUG,
            Self::NOUN,
            Self::COLLECTION,
            vec![
                F::text("name", "Access Level Name")
                    .required()
                    .placeholder("e.g., All Access"),
                F::number("tier", "Tier (1 = highest)").required().initial("1"),
                F::textarea("description", "Description"),
                F::text("color", "Color").initial("#10B981"),
            ],
        )
        .rule(FormRule::InRange {
            field: "tier".to_string(),
            min: 1.0,
            max: 10.0,
            message: "Tier must be between 1 and 10".to_string(),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn to_record(&self) -> SubmissionRecord {
        [
            ("name", self.name.clone()),
            ("tier", self.tier.to_string()),
            ("description", self.description.clone()),
            ("color", self.color.clone()),
        ]
        .into_iter()
        .collect()
    }
}
