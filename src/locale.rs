//! # Locale Table
//!
//! Static phrase catalogue for every user-visible string, in English and
//! Russian, plus resolution of a user's preferred language from the
//! platform-reported language tags.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

/// Languages the bot can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    En,
    Ru,
}

impl Lang {
    pub const SUPPORTED: [Lang; 2] = [Lang::En, Lang::Ru];

    /// Two-letter language code used for storage.
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ru => "ru",
        }
    }

    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "ru" => Some(Lang::Ru),
            _ => None,
        }
    }

    /// Resolve a language from the platform's preferred-language tags.
    ///
    /// Tags are normalized (`ru-RU`, `ru_RU`, `RU` all mean `ru`) and the
    /// first supported one wins. Falls back to English.
    pub fn resolve(tags: &[String]) -> Lang {
        tags.iter()
            .filter_map(|tag| {
                let primary = tag
                    .to_lowercase()
                    .trim()
                    .replace('-', "_")
                    .split('_')
                    .next()
                    .map(str::to_string)?;
                Lang::from_code(&primary)
            })
            .next()
            .unwrap_or_default()
    }
}

/// Every message the bot can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    /// Reply to `/start`.
    Welcome,
    /// Prompt attached to the delay buttons.
    WhenToRemind,
    /// Terminal confirmation once a reminder is stored.
    Scheduled,
    /// Prefix of the delivered reminder (the original message is quoted).
    Remind,
    /// Prompt attached to the hour/minute picker.
    ChooseTime,
    /// Custom time-of-day already passed today.
    TryAgain,
    /// Prompt expired or was already consumed.
    NoLongerActual,
    HalfHour,
    OneHour,
    TwoHours,
    Tomorrow,
    OneWeek,
    SpecifyTime,
    Hours,
    Minutes,
}

impl Phrase {
    pub fn text(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Phrase::Welcome, Lang::En) => {
                "Hello! I'm a reminder bot. I can remind you of any message after some time!"
            }
            (Phrase::Welcome, Lang::Ru) => {
                "Привет! Я бот-напоминалка. Я могу напомнить о Вашем сообщении через некоторое время!"
            }
            (Phrase::WhenToRemind, Lang::En) => "Ok! When do you need me to remind you of this?",
            (Phrase::WhenToRemind, Lang::Ru) => "Когда мне нужно напомнить об этом?",
            (Phrase::Scheduled, Lang::En) => "Your reminder has been scheduled",
            (Phrase::Scheduled, Lang::Ru) => "Я запланировал Ваше напоминание",
            (Phrase::Remind, Lang::En) => "Hey! You asked to remind:",
            (Phrase::Remind, Lang::Ru) => "Вы просили напомнить:",
            (Phrase::ChooseTime, Lang::En) => "Choose time:",
            (Phrase::ChooseTime, Lang::Ru) => "Выберете время",
            (Phrase::TryAgain, Lang::En) => "Selected time has passed, try again",
            (Phrase::TryAgain, Lang::Ru) => "Назначенное время прошло, попробуйте ещё раз",
            (Phrase::NoLongerActual, Lang::En) => "The message is no longer actual",
            (Phrase::NoLongerActual, Lang::Ru) => "Сообщение протухло",
            (Phrase::HalfHour, Lang::En) => "In 30 minutes",
            (Phrase::HalfHour, Lang::Ru) => "Через 30 минут",
            (Phrase::OneHour, Lang::En) => "In an hour",
            (Phrase::OneHour, Lang::Ru) => "Через час",
            (Phrase::TwoHours, Lang::En) => "In 2 hours",
            (Phrase::TwoHours, Lang::Ru) => "Через 2 часа",
            (Phrase::Tomorrow, Lang::En) => "Tomorrow",
            (Phrase::Tomorrow, Lang::Ru) => "Завтра",
            (Phrase::OneWeek, Lang::En) => "A week later",
            (Phrase::OneWeek, Lang::Ru) => "Через неделю",
            (Phrase::SpecifyTime, Lang::En) => "Specify time",
            (Phrase::SpecifyTime, Lang::Ru) => "Назначить время",
            (Phrase::Hours, Lang::En) => "Hours",
            (Phrase::Hours, Lang::Ru) => "Часы",
            (Phrase::Minutes, Lang::En) => "Minutes",
            (Phrase::Minutes, Lang::Ru) => "Минуты",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_exact_match() {
        assert_eq!(Lang::resolve(&["ru".to_string()]), Lang::Ru);
        assert_eq!(Lang::resolve(&["en".to_string()]), Lang::En);
    }

    #[test]
    fn test_resolve_normalizes_regional_tags() {
        assert_eq!(Lang::resolve(&["ru-RU".to_string()]), Lang::Ru);
        assert_eq!(Lang::resolve(&["ru_RU".to_string()]), Lang::Ru);
        assert_eq!(Lang::resolve(&["EN-us".to_string()]), Lang::En);
    }

    #[test]
    fn test_resolve_first_supported_wins() {
        let tags = vec!["de-DE".to_string(), "ru-RU".to_string(), "en".to_string()];
        assert_eq!(Lang::resolve(&tags), Lang::Ru);
    }

    #[test]
    fn test_resolve_defaults_to_english() {
        assert_eq!(Lang::resolve(&[]), Lang::En);
        assert_eq!(Lang::resolve(&["fr".to_string(), "de".to_string()]), Lang::En);
    }

    #[test]
    fn test_codes_round_trip() {
        for lang in Lang::SUPPORTED {
            assert_eq!(Lang::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Lang::from_code("xx"), None);
    }

    #[test]
    fn test_every_phrase_has_both_translations() {
        let phrases = [
            Phrase::Welcome,
            Phrase::WhenToRemind,
            Phrase::Scheduled,
            Phrase::Remind,
            Phrase::ChooseTime,
            Phrase::TryAgain,
            Phrase::NoLongerActual,
            Phrase::HalfHour,
            Phrase::OneHour,
            Phrase::TwoHours,
            Phrase::Tomorrow,
            Phrase::OneWeek,
            Phrase::SpecifyTime,
            Phrase::Hours,
            Phrase::Minutes,
        ];
        for phrase in phrases {
            assert!(!phrase.text(Lang::En).is_empty());
            assert!(!phrase.text(Lang::Ru).is_empty());
            assert_ne!(phrase.text(Lang::En), phrase.text(Lang::Ru));
        }
    }
}
