use shapeguard_types::{Diagnostic, ReportData, Verdict};

/// Counters gathered while checking one package.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackageStats {
    pub types_checked: u32,
    pub fields_checked: u32,
    pub fields_skipped_unresolved: u32,
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    /// Diagnostics in package, check, type, field order.
    pub diagnostics: Vec<Diagnostic>,
    pub data: ReportData,
}

impl DomainReport {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}
