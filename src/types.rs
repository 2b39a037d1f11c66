use std::str::FromStr;

use bigdecimal::BigDecimal;
use strum::{AsRefStr, Display, EnumString};

use crate::error::{Error, Result};
use crate::reserved::ReservedProperty;

/// The VCF "missing value" sentinel.
pub const MISSING_VALUE: &str = ".";

/// Scalar type of a property value, named as in the `Type=` field of a header definition.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumString, AsRefStr, Display)]
pub enum PropertyType {
    #[strum(serialize = "String")]
    Text,
    Character,
    Integer,
    #[strum(serialize = "Float")]
    Decimal,
    Flag,
}

impl PropertyType {
    /// Resolve a `Type=` value. Unknown names fail with [`Error::UnsupportedType`].
    pub fn from_type_name(name: &str) -> Result<Self> {
        PropertyType::from_str(name).map_err(|_| Error::UnsupportedType(name.to_owned()))
    }
}

/// Declared number of values of an INFO/FORMAT definition (`Number=`).
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Number {
    Count(usize),
    /// `A`: one value per alternate allele
    AlternateAlleles,
    /// `R`: one value per allele, including the reference
    Alleles,
    /// `G`: one value per genotype
    Genotypes,
    /// `.`
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Text(String),
    Character(char),
    Integer(i64),
    Decimal(BigDecimal),
    /// Always `true`; a flag carries no payload beyond being present.
    Flag(bool),
}

impl TypedValue {
    pub fn kind(&self) -> PropertyType {
        match self {
            TypedValue::Text(_) => PropertyType::Text,
            TypedValue::Character(_) => PropertyType::Character,
            TypedValue::Integer(_) => PropertyType::Integer,
            TypedValue::Decimal(_) => PropertyType::Decimal,
            TypedValue::Flag(_) => PropertyType::Flag,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn character(&self) -> Option<char> {
        match self {
            TypedValue::Character(c) => Some(*c),
            _ => None,
        }
    }

    pub fn integer(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn decimal(&self) -> Option<&BigDecimal> {
        match self {
            TypedValue::Decimal(v) => Some(v),
            _ => None,
        }
    }

    pub fn flag(&self) -> Option<bool> {
        match self {
            TypedValue::Flag(v) => Some(*v),
            _ => None,
        }
    }
}

/// Result of converting a reserved property: a single value, or a list whose
/// missing elements are kept as `None` so that positions line up with alleles.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(TypedValue),
    List(Vec<Option<TypedValue>>),
}

impl PropertyValue {
    pub fn is_list(&self) -> bool {
        matches!(self, PropertyValue::List(_))
    }

    pub fn as_scalar(&self) -> Option<&TypedValue> {
        match self {
            PropertyValue::Scalar(v) => Some(v),
            PropertyValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Option<TypedValue>]> {
        match self {
            PropertyValue::List(v) => Some(v.as_slice()),
            PropertyValue::Scalar(_) => None,
        }
    }
}

/// Convert the raw text of a reserved property into its typed form.
///
/// Returns `Ok(None)` when the value is absent or the missing value sentinel.
/// If the key is list-valued, `value` is split on commas and every element is
/// converted on its own; otherwise commas are part of the scalar.
pub fn convert_property<P>(key: &P, value: Option<&str>) -> Result<Option<PropertyValue>>
where
    P: ReservedProperty + ?Sized,
{
    let value = match value {
        Some(v) if v != MISSING_VALUE => v,
        _ => return Ok(None),
    };
    if !key.is_list() {
        return Ok(convert_element(key, value)?.map(PropertyValue::Scalar));
    }
    let list = value
        .split(',')
        .map(|part| convert_element(key, part))
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(PropertyValue::List(list)))
}

/// Like [`convert_property`], but the caller expects a single value.
pub fn convert_scalar<P>(key: &P, value: Option<&str>) -> Result<Option<TypedValue>>
where
    P: ReservedProperty + ?Sized,
{
    if key.is_list() {
        return Err(Error::TypeMismatch {
            key: key.id().to_owned(),
            expected: "scalar",
        });
    }
    Ok(convert_property(key, value)?.and_then(|v| match v {
        PropertyValue::Scalar(scalar) => Some(scalar),
        PropertyValue::List(_) => None,
    }))
}

/// Like [`convert_property`], but the caller expects a list.
pub fn convert_list<P>(key: &P, value: Option<&str>) -> Result<Option<Vec<Option<TypedValue>>>>
where
    P: ReservedProperty + ?Sized,
{
    if !key.is_list() {
        return Err(Error::TypeMismatch {
            key: key.id().to_owned(),
            expected: "list",
        });
    }
    Ok(convert_property(key, value)?.and_then(|v| match v {
        PropertyValue::List(list) => Some(list),
        PropertyValue::Scalar(_) => None,
    }))
}

fn convert_element<P>(key: &P, value: &str) -> Result<Option<TypedValue>>
where
    P: ReservedProperty + ?Sized,
{
    if value == MISSING_VALUE {
        return Ok(None);
    }
    let converted = match key.kind() {
        PropertyType::Text => TypedValue::Text(value.to_owned()),
        PropertyType::Flag => TypedValue::Flag(true),
        PropertyType::Character => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => TypedValue::Character(c),
                _ => return Err(Error::conversion(key.id(), "single character", value)),
            }
        }
        PropertyType::Decimal => BigDecimal::from_str(value)
            .map(TypedValue::Decimal)
            .map_err(|_| Error::conversion(key.id(), "decimal", value))?,
        PropertyType::Integer => value
            .parse::<i64>()
            .map(TypedValue::Integer)
            .map_err(|_| Error::conversion(key.id(), "integer", value))?,
    };
    Ok(Some(converted))
}
