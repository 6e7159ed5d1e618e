pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_collapses_whitespace() {
        assert_eq!(
            normalize_header("\u{feff}Vaccines  by   Applicant "),
            "vaccines by applicant"
        );
        assert_eq!(normalize_header("Birth—  I month"), "birth— i month");
    }
}
