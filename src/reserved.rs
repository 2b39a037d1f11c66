//! Reserved INFO and FORMAT keys (VCF 4.2) with their scalar type and arity.

use std::str::FromStr;

use strum::{AsRefStr, EnumIter, EnumString};

use crate::types::PropertyType;

/// A well-known key whose value type is fixed regardless of the header.
pub trait ReservedProperty {
    fn id(&self) -> &str;

    fn kind(&self) -> PropertyType;

    /// Whether the value is a comma separated list.
    fn is_list(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumString, AsRefStr, EnumIter)]
pub enum ReservedInfoProperty {
    #[strum(serialize = "AA")]
    AncestralAllele,
    #[strum(serialize = "AC")]
    AlleleCount,
    #[strum(serialize = "AF")]
    AlleleFrequency,
    #[strum(serialize = "AN")]
    NumberOfAlleles,
    #[strum(serialize = "BQ")]
    BaseQuality,
    #[strum(serialize = "CIGAR")]
    Cigar,
    #[strum(serialize = "DB")]
    Dbsnp,
    #[strum(serialize = "DP")]
    Depth,
    #[strum(serialize = "END")]
    End,
    #[strum(serialize = "H2")]
    Hapmap2,
    #[strum(serialize = "H3")]
    Hapmap3,
    #[strum(serialize = "MQ")]
    MappingQuality,
    #[strum(serialize = "MQ0")]
    MappingQualityZeroCount,
    #[strum(serialize = "NS")]
    NumberOfSamples,
    #[strum(serialize = "SB")]
    StrandBias,
    #[strum(serialize = "SOMATIC")]
    Somatic,
    #[strum(serialize = "VALIDATED")]
    Validated,
    #[strum(serialize = "1000G")]
    ThousandGenomes,
}

impl ReservedInfoProperty {
    /// `None` for keys that are not reserved.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::from_str(id).ok()
    }
}

impl ReservedProperty for ReservedInfoProperty {
    fn id(&self) -> &str {
        self.as_ref()
    }

    fn kind(&self) -> PropertyType {
        use ReservedInfoProperty::*;
        match self {
            AncestralAllele | Cigar => PropertyType::Text,
            AlleleCount | NumberOfAlleles | Depth | End | MappingQualityZeroCount
            | NumberOfSamples | StrandBias => PropertyType::Integer,
            AlleleFrequency | BaseQuality | MappingQuality => PropertyType::Decimal,
            Dbsnp | Hapmap2 | Hapmap3 | Somatic | Validated | ThousandGenomes => {
                PropertyType::Flag
            }
        }
    }

    fn is_list(&self) -> bool {
        use ReservedInfoProperty::*;
        matches!(self, AlleleCount | AlleleFrequency | Cigar | StrandBias)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumString, AsRefStr, EnumIter)]
pub enum ReservedFormatProperty {
    #[strum(serialize = "AD")]
    AlleleDepths,
    #[strum(serialize = "DP")]
    Depth,
    #[strum(serialize = "EC")]
    ExpectedAlternateAlleleCounts,
    #[strum(serialize = "FT")]
    Filter,
    #[strum(serialize = "GL")]
    GenotypeLikelihoods,
    #[strum(serialize = "GLE")]
    GenotypeLikelihoodsOfHeterogeneousPloidy,
    #[strum(serialize = "GP")]
    GenotypePosteriorProbabilities,
    #[strum(serialize = "GQ")]
    GenotypeQuality,
    #[strum(serialize = "GT")]
    Genotype,
    #[strum(serialize = "HQ")]
    HaplotypeQualities,
    #[strum(serialize = "MQ")]
    MappingQuality,
    #[strum(serialize = "PL")]
    PhredScaledGenotypeLikelihoods,
    #[strum(serialize = "PQ")]
    PhasingQuality,
    #[strum(serialize = "PS")]
    PhaseSet,
}

impl ReservedFormatProperty {
    /// `None` for keys that are not reserved.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::from_str(id).ok()
    }
}

impl ReservedProperty for ReservedFormatProperty {
    fn id(&self) -> &str {
        self.as_ref()
    }

    fn kind(&self) -> PropertyType {
        use ReservedFormatProperty::*;
        match self {
            Filter | GenotypeLikelihoodsOfHeterogeneousPloidy | Genotype => PropertyType::Text,
            AlleleDepths
            | Depth
            | ExpectedAlternateAlleleCounts
            | GenotypeQuality
            | HaplotypeQualities
            | MappingQuality
            | PhredScaledGenotypeLikelihoods
            | PhasingQuality
            | PhaseSet => PropertyType::Integer,
            GenotypeLikelihoods | GenotypePosteriorProbabilities => PropertyType::Decimal,
        }
    }

    fn is_list(&self) -> bool {
        use ReservedFormatProperty::*;
        matches!(
            self,
            AlleleDepths
                | ExpectedAlternateAlleleCounts
                | GenotypeLikelihoods
                | GenotypePosteriorProbabilities
                | HaplotypeQualities
                | PhredScaledGenotypeLikelihoods
        )
    }
}
