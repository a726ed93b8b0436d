//! Widget sets attached to outbound prompts.

use crate::features::scheduling::{hour_options, minute_options, DelayChoice};
use crate::locale::{Lang, Phrase};
use crate::platform::Widget;

/// Widget id of the "specify time" button.
pub const SPECIFY_TIME_ID: &str = "specify_time";

/// Widget id of the hour select.
pub const HOUR_SELECT_ID: &str = "pick_hour";

/// Widget id of the minute select.
pub const MINUTE_SELECT_ID: &str = "pick_minute";

/// The five fixed-delay buttons plus "specify time".
pub fn delay_buttons(lang: Lang) -> Vec<Widget> {
    let mut buttons: Vec<Widget> = DelayChoice::ALL
        .into_iter()
        .map(|choice| Widget::Button {
            id: choice.action_id().to_string(),
            label: choice.phrase().text(lang).to_string(),
        })
        .collect();
    buttons.push(Widget::Button {
        id: SPECIFY_TIME_ID.to_string(),
        label: Phrase::SpecifyTime.text(lang).to_string(),
    });
    buttons
}

/// The hour and minute selects of the custom-time picker.
pub fn time_pickers(lang: Lang) -> Vec<Widget> {
    vec![
        Widget::Select {
            id: HOUR_SELECT_ID.to_string(),
            label: Phrase::Hours.text(lang).to_string(),
            options: hour_options(),
        },
        Widget::Select {
            id: MINUTE_SELECT_ID.to_string(),
            label: Phrase::Minutes.text(lang).to_string(),
            options: minute_options(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_offers_six_options() {
        let widgets = delay_buttons(Lang::En);
        assert_eq!(widgets.len(), 6);
        assert_eq!(widgets[5].id(), SPECIFY_TIME_ID);
        assert!(widgets.iter().all(|w| matches!(w, Widget::Button { .. })));
    }

    #[test]
    fn test_buttons_are_localized() {
        let en = delay_buttons(Lang::En);
        let ru = delay_buttons(Lang::Ru);
        for (a, b) in en.iter().zip(ru.iter()) {
            assert_eq!(a.id(), b.id());
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_picker_has_hour_and_minute_selects() {
        let widgets = time_pickers(Lang::En);
        assert_eq!(widgets.len(), 2);
        match &widgets[0] {
            Widget::Select { id, options, .. } => {
                assert_eq!(id, HOUR_SELECT_ID);
                assert_eq!(options.len(), 24);
            }
            other => panic!("expected hour select, got {other:?}"),
        }
        match &widgets[1] {
            Widget::Select { id, options, .. } => {
                assert_eq!(id, MINUTE_SELECT_ID);
                assert_eq!(options.len(), 60);
            }
            other => panic!("expected minute select, got {other:?}"),
        }
    }
}
