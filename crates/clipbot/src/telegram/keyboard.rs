use clipcore::ChoiceOption;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Inline keyboard with one button per row.
pub fn choices_keyboard(options: &[ChoiceOption]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        options
            .iter()
            .map(|option| vec![InlineKeyboardButton::callback(option.label.clone(), option.data.clone())]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipcore::conversation::choice::quality_options;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_one_button_per_row() {
        let keyboard = choices_keyboard(&quality_options());

        assert_eq!(keyboard.inline_keyboard.len(), 3);
        assert!(keyboard.inline_keyboard.iter().all(|row| row.len() == 1));

        let first = &keyboard.inline_keyboard[0][0];
        assert_eq!(first.text, "Low Quality");
        assert!(matches!(
            &first.kind,
            InlineKeyboardButtonKind::CallbackData(data) if data == "quality:low"
        ));
    }

    #[test]
    fn test_empty_options() {
        assert!(choices_keyboard(&[]).inline_keyboard.is_empty());
    }
}
