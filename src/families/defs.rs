/// Carbapenemase-associated gene family prefixes matched against `Best_hit`.
pub const CARBAPENEMASE_FAMILIES: &[&str] = &[
    "OXA", "VIM", "NDM", "CTX", "SHV", "KPC", "ACT", "ADC", "CMH", "VEB", "PAL",
];
