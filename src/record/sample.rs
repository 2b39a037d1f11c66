use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::reserved::ReservedProperty;
use crate::types::{convert_property, PropertyValue};

/// One sample column: FORMAT keys bound to their values, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleRecord {
    properties: IndexMap<String, String>,
}

fn check_value(key: &str, value: &str) -> Result<()> {
    if value.contains(&['\n', '\r'][..]) {
        Err(Error::InvalidValue {
            key: key.to_owned(),
        })
    } else {
        Ok(())
    }
}

impl SampleRecord {
    /// `keys` and `values` must have the same length, and keys must be unique.
    pub fn new(keys: Vec<String>, values: Vec<String>) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(Error::ArityMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let mut properties = IndexMap::with_capacity(keys.len());
        for (key, value) in keys.into_iter().zip(values) {
            check_value(&key, &value)?;
            if properties.contains_key(&key) {
                return Err(Error::DuplicateKey(key));
            }
            properties.insert(key, value);
        }
        Ok(Self { properties })
    }

    /// Build from an ordered mapping; its insertion order becomes the key order.
    pub fn from_map(properties: IndexMap<String, String>) -> Result<Self> {
        for (key, value) in &properties {
            check_value(key, value)?;
        }
        Ok(Self { properties })
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Keys in declaration order.
    pub fn property_keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.properties.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Converted value of a reserved FORMAT key.
    pub fn reserved<P: ReservedProperty>(&self, key: &P) -> Result<Option<PropertyValue>> {
        convert_property(key, self.property(key.id()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reserved::ReservedFormatProperty;
    use crate::types::TypedValue;
    use itertools::Itertools;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|&v| v.to_owned()).collect()
    }

    #[test]
    fn test_property() {
        let sample = SampleRecord::new(strings(&["key1", "key2"]), strings(&["value1", "value2"]))
            .unwrap();
        assert_eq!(sample.property_keys().count(), 2);
        assert_eq!(sample.property("key1"), Some("value1"));
        assert_eq!(sample.property("key3"), None);
        assert_eq!(sample.values().collect_vec(), vec!["value1", "value2"]);
    }

    #[test]
    fn test_order() {
        let mut map = IndexMap::new();
        map.insert("1".to_owned(), "A".to_owned());
        map.insert("2".to_owned(), "B".to_owned());
        let sample = SampleRecord::from_map(map).unwrap();
        assert_eq!(sample.property_keys().collect_vec(), vec!["1", "2"]);

        let mut reversed = IndexMap::new();
        reversed.insert("2".to_owned(), "B".to_owned());
        reversed.insert("1".to_owned(), "A".to_owned());
        let sample = SampleRecord::from_map(reversed).unwrap();
        assert_eq!(sample.property_keys().collect_vec(), vec!["2", "1"]);

        let sample = SampleRecord::new(strings(&["2", "1"]), strings(&["B", "A"])).unwrap();
        assert_eq!(sample.property_keys().collect_vec(), vec!["2", "1"]);
    }

    #[test]
    fn test_arity_mismatch() {
        assert_eq!(
            SampleRecord::new(strings(&["key1", "key2"]), strings(&["value1"])),
            Err(Error::ArityMismatch { keys: 2, values: 1 })
        );
    }

    #[test]
    fn test_newline() {
        assert_eq!(
            SampleRecord::new(strings(&["key1"]), strings(&["value\n1"])),
            Err(Error::InvalidValue {
                key: "key1".to_owned()
            })
        );
        let mut map = IndexMap::new();
        map.insert("key1".to_owned(), "value\r".to_owned());
        assert!(matches!(
            SampleRecord::from_map(map),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_duplicate_key() {
        assert_eq!(
            SampleRecord::new(strings(&["GT", "GT"]), strings(&["0/1", "1/1"])),
            Err(Error::DuplicateKey("GT".to_owned()))
        );
    }

    #[test]
    fn test_reserved() {
        let sample = SampleRecord::new(
            strings(&["GT", "GQ", "PL", "DP"]),
            strings(&["0/1", "48", "0,.,100", "."]),
        )
        .unwrap();
        assert_eq!(
            sample.reserved(&ReservedFormatProperty::Genotype).unwrap(),
            Some(PropertyValue::Scalar(TypedValue::Text("0/1".to_owned())))
        );
        assert_eq!(
            sample
                .reserved(&ReservedFormatProperty::GenotypeQuality)
                .unwrap(),
            Some(PropertyValue::Scalar(TypedValue::Integer(48)))
        );
        assert_eq!(
            sample
                .reserved(&ReservedFormatProperty::PhredScaledGenotypeLikelihoods)
                .unwrap(),
            Some(PropertyValue::List(vec![
                Some(TypedValue::Integer(0)),
                None,
                Some(TypedValue::Integer(100))
            ]))
        );
        assert_eq!(
            sample.reserved(&ReservedFormatProperty::Depth).unwrap(),
            None
        );
        assert_eq!(
            sample.reserved(&ReservedFormatProperty::PhaseSet).unwrap(),
            None
        );
    }
}
