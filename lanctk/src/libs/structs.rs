use serde::{Deserialize, Serialize};

use crate::utils::format_cm;

/// True alleles are unknown for ancestry dosages, so every variant carries the same pair
pub const PLACEHOLDER_REF: &str = "T";
pub const PLACEHOLDER_ALT: &str = "A";

pub const MISSING_SEX: &str = "NA";

pub const PVAR_HEADER: [&str; 5] = ["#CHROM", "POS", "ID", "REF", "ALT"];
pub const PSAM_HEADER: [&str; 2] = ["#IID", "SEX"];

pub fn variant_id(chrom: &str, pos: u64) -> String {
    format!("{chrom}:{pos}")
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct VariantRecord {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub reference: String,
    pub alt: String,
}

impl VariantRecord {
    pub fn new(chrom: &str, pos: u64) -> Self {
        Self {
            chrom: chrom.to_string(),
            pos,
            id: variant_id(chrom, pos),
            reference: PLACEHOLDER_REF.to_string(),
            alt: PLACEHOLDER_ALT.to_string(),
        }
    }

    pub fn to_record(&self) -> [String; 5] {
        [
            self.chrom.clone(),
            self.pos.to_string(),
            self.id.clone(),
            self.reference.clone(),
            self.alt.clone(),
        ]
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct SampleRecord {
    pub id: String,
    pub sex: String,
}

impl SampleRecord {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            sex: MISSING_SEX.to_string(),
        }
    }

    pub fn to_record(&self) -> [&str; 2] {
        [&self.id, &self.sex]
    }
}

/// A target marker placed on the genetic map
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InterpolatedMarker {
    pub chrom: String,
    pub pos: u64,
    pub cm: f64,
}

impl InterpolatedMarker {
    pub fn to_record(&self) -> [String; 3] {
        [self.chrom.clone(), self.pos.to_string(), format_cm(self.cm)]
    }
}

/// A row of a PLINK 1 .bim file
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BimRecord {
    pub chrom: String,
    pub id: String,
    pub cm: f64,
    pub pos: u64,
    pub allele1: String,
    pub allele2: String,
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;

    #[test]
    fn test_variant_record() {
        let variant = VariantRecord::new("1", 1000);
        assert_eq!(variant.id, "1:1000");
        assert_eq!(variant.to_record(), ["1", "1000", "1:1000", "T", "A"].map(String::from));
    }

    #[test]
    fn test_sample_record() {
        let sample = SampleRecord::new("NA19700");
        assert_eq!(sample.to_record(), ["NA19700", "NA"]);
    }

    #[test]
    fn test_interpolated_marker_record() {
        let marker = InterpolatedMarker { chrom: "22".to_string(), pos: 16050075, cm: 0.25 };
        assert_eq!(marker.to_record(), ["22", "16050075", "0.250000"].map(String::from));
    }
}
