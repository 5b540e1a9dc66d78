// RF zone extraction from per-device CLI settings.

/// Zone used when the settings payload does not carry one.
pub const DEFAULT_RF_ZONE: &str = "default";

/// Line of the `ap_settings_cli` output that carries the zone.
const RF_ZONE_LINE: usize = 11;

/// The RF zone is the second whitespace-separated word of settings line 11.
pub fn rf_zone(lines: &[String]) -> String {
    lines
        .get(RF_ZONE_LINE)
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or(DEFAULT_RF_ZONE)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(zone_line: &str) -> Vec<String> {
        let mut lines: Vec<String> = (0..RF_ZONE_LINE).map(|i| format!("line {i}")).collect();
        lines.push(zone_line.to_owned());
        lines
    }

    #[test]
    fn reads_second_word_of_zone_line() {
        assert_eq!(rf_zone(&lines("  zonename warehouse")), "warehouse");
    }

    #[test]
    fn short_payload_uses_default() {
        let short: Vec<String> = vec!["hostname ap-1".into()];
        assert_eq!(rf_zone(&short), DEFAULT_RF_ZONE);
    }

    #[test]
    fn single_word_line_uses_default() {
        assert_eq!(rf_zone(&lines("zonename")), DEFAULT_RF_ZONE);
    }
}
