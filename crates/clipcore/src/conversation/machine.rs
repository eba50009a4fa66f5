//! The guided dialogue as a pure transition function.
//!
//! `step` never touches the network or the filesystem. It returns the next
//! state plus the effects the driver has to perform, in order.

use crate::conversation::choice::{format_options, mode_options, quality_options, Choice, ChoiceOption};
use crate::conversation::link::MediaLink;
use crate::conversation::messages;
use crate::conversation::state::{CompletedSession, DialogueEvent, DialogueState};
use crate::download::format::{Mode, Selection};

/// Something the driver must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a plain message
    Reply(String),
    /// Send a message with one button per option
    Prompt { text: String, options: Vec<ChoiceOption> },
    /// Replace the message whose button was pressed
    Acknowledge(String),
    /// Run the download pipeline and deliver the result
    Download(CompletedSession),
}

/// Next state and the effects leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: DialogueState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(next: DialogueState) -> Self {
        Self {
            next,
            effects: Vec::new(),
        }
    }

    fn reply(mut self, text: impl Into<String>) -> Self {
        self.effects.push(Effect::Reply(text.into()));
        self
    }

    fn prompt(mut self, text: &str, options: Vec<ChoiceOption>) -> Self {
        self.effects.push(Effect::Prompt {
            text: text.to_string(),
            options,
        });
        self
    }

    fn acknowledge(mut self, text: impl Into<String>) -> Self {
        self.effects.push(Effect::Acknowledge(text.into()));
        self
    }

    fn download(mut self, session: CompletedSession) -> Self {
        self.effects.push(Effect::Download(session));
        self
    }

    /// The download this transition triggers, if any
    pub fn completed_session(&self) -> Option<&CompletedSession> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Download(session) => Some(session),
            _ => None,
        })
    }
}

/// Advances the dialogue by one event.
pub fn step(state: DialogueState, event: DialogueEvent) -> Transition {
    match (state, event) {
        (_, DialogueEvent::Start) => Transition::to(DialogueState::AwaitingLink).reply(messages::WELCOME),

        (_, DialogueEvent::Cancel) => Transition::to(DialogueState::Idle).reply(messages::CANCELLED),

        (DialogueState::AwaitingLink, DialogueEvent::Text(text)) => match MediaLink::parse(&text) {
            Ok(link) => {
                tracing::debug!("Link accepted: {}", link);
                Transition::to(DialogueState::AwaitingModeChoice { link }).prompt(messages::CHOOSE_MODE, mode_options())
            }
            Err(e) => {
                tracing::debug!("{}", e);
                Transition::to(DialogueState::AwaitingLink).reply(messages::INVALID_LINK)
            }
        },

        (DialogueState::AwaitingLink, DialogueEvent::Button(_)) => {
            Transition::to(DialogueState::AwaitingLink).reply(messages::SEND_LINK_FIRST)
        }

        (
            state @ (DialogueState::AwaitingModeChoice { .. } | DialogueState::AwaitingQualityOrFormat { .. }),
            DialogueEvent::Text(_),
        ) => Transition::to(state).reply(messages::USE_BUTTONS),

        (DialogueState::AwaitingModeChoice { link }, DialogueEvent::Button(data)) => match Choice::parse(&data) {
            Ok(Choice::Mode(Mode::Video)) => Transition::to(DialogueState::AwaitingQualityOrFormat {
                link,
                mode: Mode::Video,
            })
            .acknowledge(messages::SELECT_QUALITY)
            .prompt(messages::CHOOSE_QUALITY, quality_options()),
            Ok(Choice::Mode(Mode::Audio)) => Transition::to(DialogueState::AwaitingQualityOrFormat {
                link,
                mode: Mode::Audio,
            })
            .acknowledge(messages::SELECT_FORMAT)
            .prompt(messages::CHOOSE_FORMAT, format_options()),
            _ => invalid_choice(&data),
        },

        (DialogueState::AwaitingQualityOrFormat { link, mode }, DialogueEvent::Button(data)) => {
            match (mode, Choice::parse(&data)) {
                (Mode::Video, Ok(Choice::Quality(quality))) => Transition::to(DialogueState::Idle)
                    .acknowledge(messages::quality_selected(quality))
                    .download(CompletedSession {
                        link,
                        selection: Selection::Video(quality),
                    }),
                (Mode::Audio, Ok(Choice::Format(format))) => Transition::to(DialogueState::Idle)
                    .acknowledge(messages::format_selected(format))
                    .download(CompletedSession {
                        link,
                        selection: Selection::Audio(format),
                    }),
                _ => invalid_choice(&data),
            }
        }

        (DialogueState::Idle, DialogueEvent::Text(_) | DialogueEvent::Button(_)) => {
            Transition::to(DialogueState::Idle).reply(messages::NOT_STARTED)
        }
    }
}

fn invalid_choice(data: &str) -> Transition {
    tracing::debug!("Invalid choice {:?}, ending dialogue", data);
    Transition::to(DialogueState::Idle).acknowledge(messages::INVALID_CHOICE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::format::{AudioFormat, VideoQuality};
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> DialogueEvent {
        DialogueEvent::Text(s.to_string())
    }

    fn button(s: &str) -> DialogueEvent {
        DialogueEvent::Button(s.to_string())
    }

    fn link(s: &str) -> MediaLink {
        MediaLink::parse(s).unwrap()
    }

    /// Feeds events starting from `Idle`, returning the last transition.
    fn run(events: Vec<DialogueEvent>) -> Transition {
        let mut state = DialogueState::Idle;
        let mut last = None;
        for event in events {
            let transition = step(state, event);
            state = transition.next.clone();
            last = Some(transition);
        }
        last.unwrap()
    }

    fn all_states() -> Vec<DialogueState> {
        vec![
            DialogueState::Idle,
            DialogueState::AwaitingLink,
            DialogueState::AwaitingModeChoice {
                link: link("https://example.com/v1"),
            },
            DialogueState::AwaitingQualityOrFormat {
                link: link("https://example.com/v1"),
                mode: Mode::Video,
            },
            DialogueState::AwaitingQualityOrFormat {
                link: link("https://example.com/a1"),
                mode: Mode::Audio,
            },
        ]
    }

    #[test]
    fn test_start_resets_from_any_state() {
        for state in all_states() {
            let transition = step(state, DialogueEvent::Start);
            assert_eq!(transition.next, DialogueState::AwaitingLink);
            assert_eq!(transition.next.link(), None);
            assert_eq!(transition.effects, vec![Effect::Reply(messages::WELCOME.to_string())]);
        }
    }

    #[test]
    fn test_cancel_from_any_state_never_downloads() {
        for state in all_states() {
            let transition = step(state, DialogueEvent::Cancel);
            assert_eq!(transition.next, DialogueState::Idle);
            assert_eq!(transition.effects, vec![Effect::Reply(messages::CANCELLED.to_string())]);
            assert!(transition.completed_session().is_none());
        }
    }

    #[test]
    fn test_valid_link_prompts_for_mode() {
        let transition = run(vec![DialogueEvent::Start, text("https://example.com/v1")]);
        assert_eq!(
            transition.next,
            DialogueState::AwaitingModeChoice {
                link: link("https://example.com/v1")
            }
        );
        assert_eq!(
            transition.effects,
            vec![Effect::Prompt {
                text: messages::CHOOSE_MODE.to_string(),
                options: mode_options(),
            }]
        );
    }

    #[test]
    fn test_invalid_link_reprompts_once() {
        let transition = run(vec![DialogueEvent::Start, text("not a link")]);
        assert_eq!(transition.next, DialogueState::AwaitingLink);
        assert_eq!(transition.effects, vec![Effect::Reply(messages::INVALID_LINK.to_string())]);

        // still accepts a link afterwards
        let transition = run(vec![DialogueEvent::Start, text("nope"), text("still nope"), text("https://example.com/v1")]);
        assert!(matches!(transition.next, DialogueState::AwaitingModeChoice { .. }));
    }

    #[test]
    fn test_video_high_completes_session() {
        let transition = run(vec![
            DialogueEvent::Start,
            text("https://example.com/v1"),
            button("mode:video"),
            button("quality:high"),
        ]);
        assert_eq!(transition.next, DialogueState::Idle);
        assert_eq!(
            transition.effects,
            vec![
                Effect::Acknowledge("You selected high quality video. Downloading now...".to_string()),
                Effect::Download(CompletedSession {
                    link: link("https://example.com/v1"),
                    selection: Selection::Video(VideoQuality::High),
                }),
            ]
        );
    }

    #[test]
    fn test_audio_m4a_completes_session() {
        let transition = run(vec![
            DialogueEvent::Start,
            text("https://example.com/a1"),
            button("mode:audio"),
            button("format:m4a"),
        ]);
        assert_eq!(transition.next, DialogueState::Idle);
        let session = transition.completed_session().unwrap();
        assert_eq!(session.selection, Selection::Audio(AudioFormat::M4a));
        assert_eq!(session.selection.format_spec(), "bestaudio/best");
        assert_eq!(
            transition.effects[0],
            Effect::Acknowledge("You selected m4a audio format. Downloading now...".to_string())
        );
    }

    #[test]
    fn test_mode_choice_prompts() {
        let video = run(vec![DialogueEvent::Start, text("https://example.com/v1"), button("mode:video")]);
        assert_eq!(
            video.effects,
            vec![
                Effect::Acknowledge(messages::SELECT_QUALITY.to_string()),
                Effect::Prompt {
                    text: messages::CHOOSE_QUALITY.to_string(),
                    options: quality_options(),
                },
            ]
        );

        let audio = run(vec![DialogueEvent::Start, text("https://example.com/a1"), button("mode:audio")]);
        assert_eq!(
            audio.next,
            DialogueState::AwaitingQualityOrFormat {
                link: link("https://example.com/a1"),
                mode: Mode::Audio,
            }
        );
        assert_eq!(
            audio.effects[1],
            Effect::Prompt {
                text: messages::CHOOSE_FORMAT.to_string(),
                options: format_options(),
            }
        );
    }

    #[test]
    fn test_invalid_mode_choice_ends_dialogue() {
        for data in ["mode:gif", "quality:high", "garbage"] {
            let transition = run(vec![DialogueEvent::Start, text("https://example.com/v1"), button(data)]);
            assert_eq!(transition.next, DialogueState::Idle);
            assert_eq!(transition.effects, vec![Effect::Acknowledge(messages::INVALID_CHOICE.to_string())]);
        }
    }

    #[test]
    fn test_mismatched_selection_ends_dialogue() {
        let transition = run(vec![
            DialogueEvent::Start,
            text("https://example.com/v1"),
            button("mode:video"),
            button("format:mp3"),
        ]);
        assert_eq!(transition.next, DialogueState::Idle);
        assert!(transition.completed_session().is_none());

        let transition = run(vec![
            DialogueEvent::Start,
            text("https://example.com/a1"),
            button("mode:audio"),
            button("mode:video"),
        ]);
        assert_eq!(transition.next, DialogueState::Idle);
        assert_eq!(transition.effects, vec![Effect::Acknowledge(messages::INVALID_CHOICE.to_string())]);
    }

    #[test]
    fn test_text_while_waiting_for_buttons_keeps_state() {
        let state = DialogueState::AwaitingQualityOrFormat {
            link: link("https://example.com/v1"),
            mode: Mode::Video,
        };
        let transition = step(state.clone(), text("high please"));
        assert_eq!(transition.next, state);
        assert_eq!(transition.effects, vec![Effect::Reply(messages::USE_BUTTONS.to_string())]);
    }

    #[test]
    fn test_button_while_waiting_for_link() {
        let transition = step(DialogueState::AwaitingLink, button("mode:video"));
        assert_eq!(transition.next, DialogueState::AwaitingLink);
        assert_eq!(transition.effects, vec![Effect::Reply(messages::SEND_LINK_FIRST.to_string())]);
    }

    #[test]
    fn test_idle_input_hints_start() {
        for event in [text("https://example.com/v1"), button("quality:high")] {
            let transition = step(DialogueState::Idle, event);
            assert_eq!(transition.next, DialogueState::Idle);
            assert_eq!(transition.effects, vec![Effect::Reply(messages::NOT_STARTED.to_string())]);
        }
    }

    #[test]
    fn test_every_selection_maps_to_format_policy() {
        let cases = [
            ("mode:video", "quality:low", "worstvideo+bestaudio/worst"),
            ("mode:video", "quality:medium", "best[height<=480]"),
            ("mode:video", "quality:high", "bestvideo+bestaudio/best"),
            ("mode:audio", "format:mp3", "bestaudio/best"),
            ("mode:audio", "format:m4a", "bestaudio/best"),
            ("mode:audio", "format:aac", "bestaudio/best"),
        ];
        for (mode, pick, spec) in cases {
            let transition = run(vec![DialogueEvent::Start, text("https://example.com/x"), button(mode), button(pick)]);
            let session = transition.completed_session().unwrap();
            assert_eq!(session.selection.format_spec(), spec, "{} {}", mode, pick);
        }
    }
}
