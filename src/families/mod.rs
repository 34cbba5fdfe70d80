pub mod defs;

/// Families contained in at least one label, in definition order, each once.
pub fn matched_families<'a, S, L>(families: &'a [S], labels: &[L]) -> Vec<&'a str>
where
    S: AsRef<str>,
    L: AsRef<str>,
{
    families
        .iter()
        .map(|f| f.as_ref())
        .filter(|family| any_label_contains(labels, family))
        .collect()
}

/// Case-sensitive substring test against every label.
pub fn any_label_contains<L: AsRef<str>>(labels: &[L], needle: &str) -> bool {
    labels.iter().any(|label| label.as_ref().contains(needle))
}

#[cfg(test)]
#[path = "../../tests/src_inline/families/tests.rs"]
mod tests;
