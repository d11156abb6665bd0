use std::collections::HashMap;

use ballotpress_types::ObjectId;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DocumentError;

/// The `@type` tag of a raw record, if it has one.
pub fn type_tag(value: &Value) -> Option<&str> {
    value.get("@type").and_then(Value::as_str)
}

fn object_id(value: &Value) -> Option<&str> {
    value.get("@id").and_then(Value::as_str)
}

/// Deserializes a raw record into its typed view.
pub fn parse_record<T: DeserializeOwned>(value: &Value) -> Result<T, DocumentError> {
    T::deserialize(value).map_err(|e| {
        let context = match (type_tag(value), object_id(value)) {
            (Some(tag), Some(id)) => format!("{} '{}'", tag, id),
            (Some(tag), None) => tag.to_string(),
            (None, Some(id)) => format!("object '{}'", id),
            (None, None) => "record".to_string(),
        };
        let message = e.to_string();
        match message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            Some(field) => DocumentError::missing(context, field),
            None => DocumentError::Malformed { context, message },
        }
    })
}

/// Every typed, identified object of one election report, keyed by `@id`.
///
/// Built in a single walk. An object counts when it carries both `@type` and `@id`;
/// nested objects are indexed as well as their parents.
#[derive(Debug, Clone, Default)]
pub struct ElectionIndex {
    objects: HashMap<ObjectId, Value>,
}

impl ElectionIndex {
    pub fn build(report: &Value) -> Result<Self, DocumentError> {
        let mut index = Self::default();
        index.collect(report)?;
        debug!("Indexed {} identified objects", index.objects.len());
        Ok(index)
    }

    fn collect(&mut self, value: &Value) -> Result<(), DocumentError> {
        match value {
            Value::Object(map) => {
                if let (Some(_), Some(id)) = (type_tag(value), object_id(value)) {
                    match self.objects.get(id) {
                        Some(existing) if existing == value => {
                            debug!("Repeated identical object '{}'", id);
                        }
                        Some(_) => return Err(DocumentError::DuplicateId(id.to_string())),
                        None => {
                            self.objects.insert(ObjectId::from(id), value.clone());
                        }
                    }
                }
                for child in map.values() {
                    self.collect(child)?;
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.collect(item)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    pub fn resolve_raw(&self, id: &str) -> Result<&Value, DocumentError> {
        self.objects
            .get(id)
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))
    }

    /// Resolves `id`, checks its tag against `expected` and parses the typed view.
    pub fn resolve_as<T: DeserializeOwned>(
        &self,
        id: &str,
        expected: &str,
    ) -> Result<T, DocumentError> {
        let raw = self.resolve_raw(id)?;
        let actual = type_tag(raw).unwrap_or_default();
        if actual != expected {
            return Err(DocumentError::WrongType {
                id: id.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        parse_record(raw)
    }

    /// Like [`resolve_as`](Self::resolve_as) but accepts any of several tags.
    pub fn resolve_any<T: DeserializeOwned>(
        &self,
        id: &str,
        accepted: &[&str],
    ) -> Result<T, DocumentError> {
        let raw = self.resolve_raw(id)?;
        let actual = type_tag(raw).unwrap_or_default();
        if !accepted.contains(&actual) {
            return Err(DocumentError::WrongType {
                id: id.to_string(),
                expected: accepted.join(" | "),
                actual: actual.to_string(),
            });
        }
        parse_record(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Party, Person};
    use crate::tags;
    use serde_json::json;

    fn report() -> Value {
        json!({
            "@type": "ElectionReport",
            "Party": [
                {"@id": "party1", "@type": "ElectionResults.Party", "Name": "Anklebiter Assembly"}
            ],
            "Person": [
                {"@id": "per1", "@type": "ElectionResults.Person", "FullName": "Alice", "PartyId": "party1"}
            ],
            "Election": [{
                "@type": "ElectionResults.Election",
                "Contest": [{
                    "@id": "c1", "@type": "ElectionResults.CandidateContest",
                    "ContestSelection": [
                        {"@id": "cs1", "@type": "ElectionResults.CandidateSelection"}
                    ]
                }]
            }]
        })
    }

    #[test]
    fn indexes_nested_objects() {
        let index = ElectionIndex::build(&report()).unwrap();
        assert_eq!(index.len(), 4);
        assert!(index.contains("c1"));
        assert!(index.contains("cs1"));
        // untyped or unidentified objects are skipped
        assert!(!index.contains("ElectionReport"));
    }

    #[test]
    fn resolve_raw_not_found() {
        let index = ElectionIndex::build(&report()).unwrap();
        assert_eq!(
            index.resolve_raw("nope"),
            Err(DocumentError::NotFound("nope".to_string()))
        );
    }

    #[test]
    fn conflicting_duplicate_id_is_fatal() {
        let doc = json!([
            {"@id": "x", "@type": "ElectionResults.Party", "Name": "A"},
            {"@id": "x", "@type": "ElectionResults.Party", "Name": "B"}
        ]);
        assert_eq!(
            ElectionIndex::build(&doc).unwrap_err(),
            DocumentError::DuplicateId("x".to_string())
        );
    }

    #[test]
    fn identical_duplicate_is_tolerated() {
        let party = json!({"@id": "x", "@type": "ElectionResults.Party", "Name": "A"});
        let doc = json!([party.clone(), party]);
        let index = ElectionIndex::build(&doc).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn resolve_typed_record() {
        let index = ElectionIndex::build(&report()).unwrap();
        let person: Person = index.resolve_as("per1", tags::PERSON).unwrap();
        assert_eq!(person.full_name.as_deref(), Some("Alice"));
        let party: Party = index
            .resolve_as(person.party_id.unwrap().as_str(), tags::PARTY)
            .unwrap();
        assert_eq!(party.name.as_deref(), Some("Anklebiter Assembly"));
    }

    #[test]
    fn resolve_with_wrong_type() {
        let index = ElectionIndex::build(&report()).unwrap();
        let result: Result<Party, _> = index.resolve_as("per1", tags::PARTY);
        assert!(matches!(result, Err(DocumentError::WrongType { ref id, .. }) if id == "per1"));
    }

    #[test]
    fn missing_required_field_names_the_field() {
        let raw = json!({"@id": "bm1", "@type": "ElectionResults.BallotMeasureSelection"});
        let result: Result<crate::records::BallotMeasureSelection, _> = parse_record(&raw);
        match result {
            Err(DocumentError::MissingField { context, field }) => {
                assert_eq!(field, "Selection");
                assert!(context.contains("bm1"));
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }
}
