use getset::{CopyGetters, Getters};
use itertools::Itertools;
use log::debug;
use multimap::MultiMap;

use crate::error::{Error, Result};
use crate::reserved::ReservedProperty;
use crate::types::{
    convert_list, convert_property, convert_scalar, PropertyValue, TypedValue, MISSING_VALUE,
};

pub const PASS_FILTER: &str = "PASS";

/// The fixed columns of a VCF data line.
///
/// ```text
/// 0 - CHROM
/// 1 - POS
/// 2 - ID
/// 3 - REF
/// 4 - ALT
/// 5 - QUAL
/// 6 - FILTER
/// 7 - INFO
/// 8 - FORMAT
/// ```
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct PositionRecord {
    /// Reference sequence name, or an angle-bracketed contig ID (`<ID>`).
    #[getset(get = "pub")]
    chromosome: String,
    /// 1-based
    #[getset(get_copy = "pub")]
    position: u64,
    #[getset(get = "pub")]
    ids: Vec<String>,
    #[getset(get = "pub")]
    ref_bases: Vec<String>,
    /// Bases, `*`, or angle-bracketed symbolic alleles.
    #[getset(get = "pub")]
    alt_bases: Vec<String>,
    /// REF followed by ALT, indexed the way genotype fields refer to alleles.
    #[getset(get = "pub")]
    alleles: Vec<String>,
    /// `.` or a number, kept as text.
    #[getset(get = "pub")]
    quality: String,
    #[getset(get = "pub")]
    filter: String,
    info: MultiMap<String, String>,
    /// FORMAT keys shared by all samples on this line.
    #[getset(get = "pub")]
    format: Vec<String>,
}

fn is_valid_quality(qual: &str) -> bool {
    qual == MISSING_VALUE
        || (!qual.is_empty() && qual.chars().all(|c| c.is_ascii_digit() || c == '.'))
}

impl PositionRecord {
    /// Fails with [`Error::InvalidQuality`] if `qual` is neither `.` nor made of digits and dots.
    /// Chromosome and allele content is not checked.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chromosome: String,
        position: u64,
        ids: Vec<String>,
        ref_bases: Vec<String>,
        alt_bases: Vec<String>,
        quality: String,
        filter: String,
        info: MultiMap<String, String>,
        format: Vec<String>,
    ) -> Result<Self> {
        if ref_bases.is_empty() {
            return Err(Error::MissingProperty("REF"));
        }
        if !is_valid_quality(&quality) {
            return Err(Error::InvalidQuality(quality));
        }
        let alleles = ref_bases.iter().chain(alt_bases.iter()).cloned().collect();
        Ok(Self {
            chromosome,
            position,
            ids,
            ref_bases,
            alt_bases,
            alleles,
            quality,
            filter,
            info,
            format,
        })
    }

    /// Allele at `index` in REF followed by ALT; 0 is the first reference allele.
    pub fn allele(&self, index: usize) -> Result<&str> {
        self.alleles
            .get(index)
            .map(String::as_str)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.alleles.len(),
            })
    }

    /// QUAL as a number, `None` if missing.
    ///
    /// Text such as `1.2.3` passes the construction check but is not a number, and fails
    /// here with [`Error::InvalidQuality`].
    pub fn quality_value(&self) -> Result<Option<f64>> {
        if self.quality == MISSING_VALUE {
            return Ok(None);
        }
        self.quality
            .parse()
            .map(Some)
            .map_err(|_| Error::InvalidQuality(self.quality.clone()))
    }

    pub fn is_passed_all_filters(&self) -> bool {
        self.filter.eq_ignore_ascii_case(PASS_FILTER)
    }

    /// Failed filters, split on `;`. Empty if the record passed or FILTER is missing.
    pub fn filters(&self) -> Vec<&str> {
        if self.is_passed_all_filters() || self.filter == MISSING_VALUE {
            return Vec::new();
        }
        self.filter.split(';').filter(|f| !f.is_empty()).collect()
    }

    pub fn has_info(&self, id: &str) -> bool {
        self.info.contains_key(id)
    }

    /// Raw values of an INFO key, `None` if the key is not on this record.
    pub fn info(&self, id: &str) -> Option<&[String]> {
        self.info.get_vec(id).map(Vec::as_slice)
    }

    pub fn info_keys(&self) -> impl Iterator<Item = &str> {
        self.info.keys().map(String::as_str)
    }

    fn joined_info(&self, id: &str) -> Option<String> {
        let values = self.info.get_vec(id)?;
        if values.is_empty() {
            None
        } else {
            Some(values.iter().join(","))
        }
    }

    /// Converted value of a reserved INFO key; re-parsed on every call.
    pub fn reserved_info<P: ReservedProperty>(&self, key: &P) -> Result<Option<PropertyValue>> {
        let joined = self.joined_info(key.id());
        if joined.is_none() {
            debug!("INFO {} not present at {}:{}", key.id(), self.chromosome, self.position);
        }
        convert_property(key, joined.as_deref())
    }

    pub fn reserved_info_scalar<P: ReservedProperty>(&self, key: &P) -> Result<Option<TypedValue>> {
        convert_scalar(key, self.joined_info(key.id()).as_deref())
    }

    pub fn reserved_info_list<P: ReservedProperty>(
        &self,
        key: &P,
    ) -> Result<Option<Vec<Option<TypedValue>>>> {
        convert_list(key, self.joined_info(key.id()).as_deref())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reserved::ReservedInfoProperty;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|&v| v.to_owned()).collect()
    }

    fn record(qual: &str, filter: &str) -> Result<PositionRecord> {
        let mut info = MultiMap::new();
        info.insert("DP".to_owned(), "14".to_owned());
        info.insert("AF".to_owned(), "0.5".to_owned());
        info.insert("AF".to_owned(), ".".to_owned());
        info.insert("DB".to_owned(), String::new());
        info.insert("custom".to_owned(), "x".to_owned());
        PositionRecord::new(
            "chr1".to_owned(),
            817185,
            strings(&["rs1", "rs2"]),
            strings(&["G"]),
            strings(&["A", "<DEL>"]),
            qual.to_owned(),
            filter.to_owned(),
            info,
            strings(&["GT", "DP"]),
        )
    }

    #[test]
    fn test_alleles() {
        let record = record("50", "PASS").unwrap();
        assert_eq!(record.alleles().len(), record.ref_bases().len() + record.alt_bases().len());
        assert_eq!(record.allele(0).unwrap(), "G");
        assert_eq!(record.allele(1).unwrap(), "A");
        assert_eq!(record.allele(2).unwrap(), "<DEL>");
        assert_eq!(
            record.allele(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_quality() {
        assert_eq!(record("50", "PASS").unwrap().quality_value(), Ok(Some(50.0)));
        assert_eq!(record("29.5", "PASS").unwrap().quality(), "29.5");
        assert_eq!(record(".", "PASS").unwrap().quality_value(), Ok(None));
        for odd in &["1.2.3", ".."] {
            let record = record(odd, "PASS").unwrap();
            assert_eq!(record.quality(), odd);
            assert_eq!(
                record.quality_value(),
                Err(Error::InvalidQuality(odd.to_string()))
            );
        }
        for bad in &["", "-1", "1e5", "high"] {
            assert!(matches!(record(bad, "PASS"), Err(Error::InvalidQuality(_))));
        }
    }

    #[test]
    fn test_empty_ref() {
        let result = PositionRecord::new(
            "1".to_owned(),
            1,
            vec![],
            vec![],
            vec![],
            ".".to_owned(),
            ".".to_owned(),
            MultiMap::new(),
            vec![],
        );
        assert!(matches!(result, Err(Error::MissingProperty("REF"))));
    }

    #[test]
    fn test_filters() {
        for pass in &["PASS", "pass", "Pass"] {
            let record = record("50", pass).unwrap();
            assert!(record.is_passed_all_filters());
            assert!(record.filters().is_empty());
        }
        let record = record("50", "q10;s50").unwrap();
        assert!(!record.is_passed_all_filters());
        assert_eq!(record.filters(), vec!["q10", "s50"]);
    }

    #[test]
    fn test_raw_info() {
        let record = record("50", "PASS").unwrap();
        assert_eq!(record.info("DP").unwrap(), &["14".to_owned()][..]);
        assert_eq!(record.info("custom").unwrap(), &["x".to_owned()][..]);
        assert!(record.info("NS").is_none());
        assert!(record.has_info("DB"));
        assert!(!record.has_info("db"));
    }

    #[test]
    fn test_reserved_info() {
        let record = record("50", "PASS").unwrap();
        assert_eq!(
            record.reserved_info(&ReservedInfoProperty::Depth).unwrap(),
            Some(PropertyValue::Scalar(TypedValue::Integer(14)))
        );
        assert_eq!(
            record
                .reserved_info_list(&ReservedInfoProperty::AlleleFrequency)
                .unwrap(),
            Some(vec![
                Some(TypedValue::Decimal(BigDecimal::from_str("0.5").unwrap())),
                None
            ])
        );
        assert_eq!(
            record
                .reserved_info_scalar(&ReservedInfoProperty::Dbsnp)
                .unwrap(),
            Some(TypedValue::Flag(true))
        );
        assert_eq!(
            record
                .reserved_info(&ReservedInfoProperty::NumberOfSamples)
                .unwrap(),
            None
        );
        assert!(matches!(
            record.reserved_info_list(&ReservedInfoProperty::Depth),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_reserved_info_conversion_error_keeps_raw() {
        let mut info = MultiMap::new();
        info.insert("DP".to_owned(), "deep".to_owned());
        let record = PositionRecord::new(
            "1".to_owned(),
            1,
            vec![],
            strings(&["A"]),
            vec![],
            ".".to_owned(),
            "PASS".to_owned(),
            info,
            vec![],
        )
        .unwrap();
        assert!(matches!(
            record.reserved_info(&ReservedInfoProperty::Depth),
            Err(Error::TypeConversion { .. })
        ));
        assert_eq!(record.info("DP").unwrap(), &["deep".to_owned()][..]);
    }
}
