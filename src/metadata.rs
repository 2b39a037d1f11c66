//! Header metadata records (`##KEY=<k=v,...>` and free-form `##...` lines).

use std::fmt;

use getset::Getters;
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;

use crate::error::{Error, Result};
use crate::parser::{self, HEADER_MARKER};
use crate::types::{Number, PropertyType};

pub const ID: &str = "ID";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Property {
    /// Key as written, for serialization.
    key: String,
    value: String,
    /// Value as written, quotes and escapes included.
    written: String,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.written)
    }
}

/// Common behaviour of header metadata records.
pub trait Metadata {
    /// Case-insensitive lookup.
    fn property(&self, name: &str) -> Option<&str>;

    /// Reconstruct the header line, e.g. `##INFO=<ID=DP,...>`.
    fn as_vcf_string(&self, record_type: &str) -> String;
}

/// Key/value pairs of a `KEY=<...>` header block. Keys are compared lower-cased.
///
/// A record built from no segments has no property map at all, which is distinct from
/// an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    properties: Option<IndexMap<String, Property>>,
}

impl MetadataRecord {
    /// Build from `KEY=VALUE` segments. Quoted values are stored unquoted.
    pub fn new<'a, I>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut record = Self::default();
        for segment in segments {
            let (key, value) = parser::split_property(segment)?;
            let unquoted = parser::unquote(value).unwrap_or_else(|| value.to_owned());
            record.insert(key, unquoted, value.to_owned());
        }
        Ok(record)
    }

    /// Build from a block body, with or without its surrounding `<` `>`.
    pub fn from_body(body: &str) -> Result<Self> {
        let inner = body
            .strip_prefix('<')
            .and_then(|b| b.strip_suffix('>'))
            .unwrap_or(body);
        Self::new(parser::split_metadata_body(inner)?)
    }

    fn insert(&mut self, key: &str, value: String, written: String) {
        self.properties.get_or_insert_with(IndexMap::new).insert(
            key.to_lowercase(),
            Property {
                key: key.to_owned(),
                value,
                written,
            },
        );
    }

    pub fn has_properties(&self) -> bool {
        self.properties.is_some()
    }

    /// Properties with their keys as written, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .flat_map(|p| p.values())
            .map(|p| (p.key.as_str(), p.value.as_str()))
    }

    fn body(&self) -> String {
        self.properties
            .iter()
            .flat_map(|p| p.values())
            .join(",")
    }
}

impl Metadata for MetadataRecord {
    fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .as_ref()?
            .get(&name.to_lowercase())
            .map(|p| p.value.as_str())
    }

    fn as_vcf_string(&self, record_type: &str) -> String {
        format!("{}{}=<{}>", HEADER_MARKER, record_type, self.body())
    }
}

/// A metadata record with a mandatory `ID` property.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct IdentifiedMetadata {
    #[getset(get = "pub")]
    id: String,
    #[getset(get = "pub")]
    record: MetadataRecord,
}

impl IdentifiedMetadata {
    pub fn new(record: MetadataRecord) -> Result<Self> {
        let id = record
            .property(ID)
            .ok_or(Error::MissingProperty(ID))?
            .to_owned();
        Ok(Self { id, record })
    }

    pub fn from_body(body: &str) -> Result<Self> {
        Self::new(MetadataRecord::from_body(body)?)
    }
}

impl Metadata for IdentifiedMetadata {
    fn property(&self, name: &str) -> Option<&str> {
        self.record.property(name)
    }

    fn as_vcf_string(&self, record_type: &str) -> String {
        self.record.as_vcf_string(record_type)
    }
}

/// A header line without key/value structure. Its text (without `##`) stands in as the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMetadata {
    inner: IdentifiedMetadata,
}

impl RawMetadata {
    pub fn new(text: &str) -> Self {
        let mut record = MetadataRecord::default();
        record.insert(ID, text.to_owned(), text.to_owned());
        Self {
            inner: IdentifiedMetadata {
                id: text.to_owned(),
                record,
            },
        }
    }

    pub fn id(&self) -> &str {
        self.inner.id()
    }
}

impl fmt::Display for RawMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", HEADER_MARKER, self.id())
    }
}

impl Metadata for RawMetadata {
    fn property(&self, name: &str) -> Option<&str> {
        self.inner.property(name)
    }

    /// The record type is ignored; the original line is returned.
    fn as_vcf_string(&self, _record_type: &str) -> String {
        self.to_string()
    }
}

/// A parsed header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMetadata {
    Generic {
        record_type: String,
        record: MetadataRecord,
    },
    Identified {
        record_type: String,
        record: IdentifiedMetadata,
    },
    Raw(RawMetadata),
}

impl HeaderMetadata {
    /// Parse a `##` header line. `KEY=<...>` blocks are split into properties, with an `ID`
    /// if one is given; any other line is kept verbatim.
    pub fn from_header_line(line: &str) -> Result<Self> {
        let (record_type, body) = parser::parse_header_line(line)?;
        let block = match body {
            Some(body) if body.starts_with('<') && body.ends_with('>') => body,
            Some(body) => {
                if body.starts_with('<') {
                    debug!("unterminated metadata block kept as raw text: {}", record_type);
                }
                return Ok(HeaderMetadata::Raw(RawMetadata::new(&format!(
                    "{}={}",
                    record_type, body
                ))))
            }
            None => {
                debug!("header line without key/value structure: {}", record_type);
                return Ok(HeaderMetadata::Raw(RawMetadata::new(record_type)));
            }
        };
        let record = MetadataRecord::from_body(block)?;
        let record_type = record_type.to_owned();
        if record.property(ID).is_some() {
            Ok(HeaderMetadata::Identified {
                record_type,
                record: IdentifiedMetadata::new(record)?,
            })
        } else {
            Ok(HeaderMetadata::Generic {
                record_type,
                record,
            })
        }
    }

    /// `None` for raw lines.
    pub fn record_type(&self) -> Option<&str> {
        match self {
            HeaderMetadata::Generic { record_type, .. }
            | HeaderMetadata::Identified { record_type, .. } => Some(record_type),
            HeaderMetadata::Raw(_) => None,
        }
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        match self {
            HeaderMetadata::Generic { record, .. } => record.property(name),
            HeaderMetadata::Identified { record, .. } => record.property(name),
            HeaderMetadata::Raw(raw) => raw.property(name),
        }
    }

    pub fn as_vcf_string(&self) -> String {
        match self {
            HeaderMetadata::Generic {
                record_type,
                record,
            } => record.as_vcf_string(record_type),
            HeaderMetadata::Identified {
                record_type,
                record,
            } => record.as_vcf_string(record_type),
            HeaderMetadata::Raw(raw) => raw.to_string(),
        }
    }
}

/// Typed view of an `INFO` or `FORMAT` definition.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct FieldMetadata {
    id: String,
    number: Number,
    kind: PropertyType,
    description: String,
}

impl FieldMetadata {
    pub fn new(metadata: &IdentifiedMetadata) -> Result<Self> {
        let number = metadata
            .property("Number")
            .ok_or(Error::MissingProperty("Number"))?;
        let kind = metadata
            .property("Type")
            .ok_or(Error::MissingProperty("Type"))?;
        let description = metadata
            .property("Description")
            .ok_or(Error::MissingProperty("Description"))?;
        Ok(Self {
            id: metadata.id().clone(),
            number: parser::number(number)?,
            kind: PropertyType::from_type_name(kind)?,
            description: description.to_owned(),
        })
    }
}
