//! Value lists for the custom-time picker selects.

use crate::platform::SelectOption;

/// Selectable hours of day, 0 through 23.
pub fn hour_options() -> Vec<SelectOption> {
    (0..24).map(numeric_option).collect()
}

/// Selectable minutes, 0 through 59.
pub fn minute_options() -> Vec<SelectOption> {
    (0..60).map(numeric_option).collect()
}

fn numeric_option(n: u8) -> SelectOption {
    let text = n.to_string();
    SelectOption {
        label: text.clone(),
        value: text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_options_cover_the_day() {
        let hours = hour_options();
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0].value, "0");
        assert_eq!(hours[23].value, "23");
    }

    #[test]
    fn test_minute_options_cover_the_hour() {
        let minutes = minute_options();
        assert_eq!(minutes.len(), 60);
        assert_eq!(minutes[0].value, "0");
        assert_eq!(minutes[59].value, "59");
    }

    #[test]
    fn test_labels_match_values() {
        for option in hour_options().iter().chain(minute_options().iter()) {
            assert_eq!(option.label, option.value);
        }
    }
}
