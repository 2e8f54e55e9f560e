//! Static code → label lookups for the NPDB allegation and outcome fields.

/// Abbreviation used for codes that are blank or absent from a lookup table.
pub const UNKNOWN_ABBR: &str = "UNK";
/// Description used for codes that are blank or absent from a lookup table.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// One entry of a code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeLabel {
    pub code: i64,
    pub abbr: &'static str,
    pub description: &'static str,
}

/// A read-only code table. Entries are sorted by code.
#[derive(Debug)]
pub struct CodeTable {
    /// Human name of the coded field, used in log output.
    pub name: &'static str,
    entries: &'static [CodeLabel],
}

impl CodeTable {
    pub fn lookup(&self, code: i64) -> Option<&'static CodeLabel> {
        self.entries
            .binary_search_by_key(&code, |e| e.code)
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn entries(&self) -> &'static [CodeLabel] {
        self.entries
    }
}

const fn label(code: i64, abbr: &'static str, description: &'static str) -> CodeLabel {
    CodeLabel {
        code,
        abbr,
        description,
    }
}

/// `ALGNNATR`: allegation group of the malpractice claim.
///
/// Medication (30) and Monitoring (70) share the abbreviation `MR` in the
/// public-use documentation; they stay separate because grouping is on the
/// (abbreviation, description) pair.
pub static ALLEGATION_TYPES: CodeTable = CodeTable {
    name: "allegation type",
    entries: &[
        label(1, "DR", "Diagnosis Related"),
        label(10, "AR", "Anesthesia Related"),
        label(20, "SR", "Surgery Related"),
        label(30, "MR", "Medication Related"),
        label(40, "IVB", "IV & Blood Products Related"),
        label(50, "OR", "Obstetrics Related"),
        label(60, "TR", "Treatment Related"),
        label(70, "MR", "Monitoring Related"),
        label(80, "EPR", "Equipment/Product Related"),
        label(90, "OM", "Other Miscellaneous"),
        label(100, "BHR", "Behavioral Health Related"),
    ],
};

/// `OUTCOME`: severity of the patient's injury.
pub static OUTCOME_SEVERITIES: CodeTable = CodeTable {
    name: "outcome severity",
    entries: &[
        label(1, "EM", "Emotional"),
        label(2, "INS", "Insignificant"),
        label(3, "MIT", "Minor Temporary"),
        label(4, "MAT", "Major Temporary"),
        label(5, "MIP", "Minor Permanent"),
        label(6, "SP", "Significant Permanent"),
        label(7, "MAP", "Major Permanent"),
        label(8, "QBL", "Quadriplegic/Brain Damage/Lifelong Care"),
        label(9, "DE", "Death"),
        label(10, "CBD", "Cannot Be Determined"),
    ],
};
