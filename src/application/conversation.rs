use crate::domain::models::NewScheduledMessage;

pub const ADMIN_COMMAND: &str = "/admin";
pub const CHAT_INFO_COMMAND: &str = "/chatid";

pub const ADD_MESSAGE_LABEL: &str = "Add message";
pub const ADD_CHAT_LABEL: &str = "Add chat";
pub const LIST_MESSAGES_LABEL: &str = "List messages";
pub const DELETE_ALL_LABEL: &str = "Delete all messages";

pub const TITLE_PROMPT: &str = "Enter the message title:";
pub const BODY_PROMPT: &str = "Enter the message text:";
pub const TIME_PROMPT: &str = "Enter the send time (HH:MM):";
pub const DATE_PROMPT: &str = "Enter the send date (YYYY-MM-DD):";
pub const CHAT_PROMPT: &str = "Send any message from the target chat or enter its id:";

/// Where one operator's dialogue currently stands. Collected fields ride
/// along in the variant, so the draft disappears with the state on commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AdminState {
    #[default]
    Idle,
    AwaitingTitle,
    AwaitingBody {
        title: String,
    },
    AwaitingTime {
        title: String,
        body: String,
    },
    AwaitingDate {
        title: String,
        body: String,
        time: String,
    },
    AwaitingChatId,
}

/// What the front-end should do after a step; committing and replying
/// happen outside so the transition itself stays free of I/O.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Prompt(&'static str),
    ShowAdminMenu,
    ShowChatInfo,
    ListMessages,
    ClearMessages,
    CommitMessage(NewScheduledMessage),
    RegisterChat { raw: String },
    Ignore,
}

/// One step of the dialogue.
///
/// Commands are recognized only from `Idle`. While a flow is active every
/// inbound text is consumed verbatim as the next field, including
/// command-looking text and time/date values that will never parse. An
/// unparsable schedule is committed anyway; it simply never comes due.
pub fn step(state: AdminState, text: &str) -> (AdminState, Action) {
    match state {
        AdminState::Idle => match text {
            ADMIN_COMMAND => (AdminState::Idle, Action::ShowAdminMenu),
            CHAT_INFO_COMMAND => (AdminState::Idle, Action::ShowChatInfo),
            ADD_MESSAGE_LABEL => (AdminState::AwaitingTitle, Action::Prompt(TITLE_PROMPT)),
            ADD_CHAT_LABEL => (AdminState::AwaitingChatId, Action::Prompt(CHAT_PROMPT)),
            LIST_MESSAGES_LABEL => (AdminState::Idle, Action::ListMessages),
            DELETE_ALL_LABEL => (AdminState::Idle, Action::ClearMessages),
            _ => (AdminState::Idle, Action::Ignore),
        },
        AdminState::AwaitingTitle => (
            AdminState::AwaitingBody {
                title: text.to_string(),
            },
            Action::Prompt(BODY_PROMPT),
        ),
        AdminState::AwaitingBody { title } => (
            AdminState::AwaitingTime {
                title,
                body: text.to_string(),
            },
            Action::Prompt(TIME_PROMPT),
        ),
        AdminState::AwaitingTime { title, body } => (
            AdminState::AwaitingDate {
                title,
                body,
                time: text.to_string(),
            },
            Action::Prompt(DATE_PROMPT),
        ),
        AdminState::AwaitingDate { title, body, time } => (
            AdminState::Idle,
            Action::CommitMessage(NewScheduledMessage {
                title,
                text: body,
                time,
                date: text.to_string(),
            }),
        ),
        AdminState::AwaitingChatId => (
            AdminState::Idle,
            Action::RegisterChat {
                raw: text.to_string(),
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(mut state: AdminState, inputs: &[&str]) -> (AdminState, Vec<Action>) {
        let mut actions = Vec::new();
        for input in inputs {
            let (next, action) = step(state, input);
            state = next;
            actions.push(action);
        }
        (state, actions)
    }

    #[test]
    fn test_composition_flow_commits_exactly_the_inputs() {
        let (state, actions) = walk(
            AdminState::Idle,
            &[
                ADD_MESSAGE_LABEL,
                "Sale",
                "50% off today",
                "09:00",
                "2025-03-01",
            ],
        );

        assert_eq!(state, AdminState::Idle);
        assert_eq!(
            actions.last().unwrap(),
            &Action::CommitMessage(NewScheduledMessage {
                title: "Sale".to_string(),
                text: "50% off today".to_string(),
                time: "09:00".to_string(),
                date: "2025-03-01".to_string(),
            })
        );
    }

    #[test]
    fn test_each_step_prompts_for_the_next_field() {
        let (_, actions) = walk(AdminState::Idle, &[ADD_MESSAGE_LABEL, "t", "b", "12:00"]);
        assert_eq!(
            actions,
            vec![
                Action::Prompt(TITLE_PROMPT),
                Action::Prompt(BODY_PROMPT),
                Action::Prompt(TIME_PROMPT),
                Action::Prompt(DATE_PROMPT),
            ]
        );
    }

    #[test]
    fn test_unvalidated_time_and_date_are_accepted() {
        let (state, actions) = walk(
            AdminState::Idle,
            &[ADD_MESSAGE_LABEL, "t", "b", "soonish", "whenever"],
        );
        assert_eq!(state, AdminState::Idle);
        assert!(matches!(
            actions.last().unwrap(),
            Action::CommitMessage(draft) if draft.time == "soonish" && draft.date == "whenever"
        ));
    }

    #[test]
    fn test_active_flow_consumes_command_looking_text() {
        let (state, action) = step(AdminState::AwaitingTitle, ADD_CHAT_LABEL);
        assert_eq!(
            state,
            AdminState::AwaitingBody {
                title: ADD_CHAT_LABEL.to_string()
            }
        );
        assert_eq!(action, Action::Prompt(BODY_PROMPT));
    }

    #[test]
    fn test_chat_flow_hands_raw_input_over() {
        let (state, actions) = walk(AdminState::Idle, &[ADD_CHAT_LABEL, "-100200300"]);
        assert_eq!(state, AdminState::Idle);
        assert_eq!(
            actions,
            vec![
                Action::Prompt(CHAT_PROMPT),
                Action::RegisterChat {
                    raw: "-100200300".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_idle_commands_do_not_change_state() {
        for (input, expected) in [
            (ADMIN_COMMAND, Action::ShowAdminMenu),
            (CHAT_INFO_COMMAND, Action::ShowChatInfo),
            (LIST_MESSAGES_LABEL, Action::ListMessages),
            (DELETE_ALL_LABEL, Action::ClearMessages),
            ("anything else", Action::Ignore),
        ] {
            let (state, action) = step(AdminState::Idle, input);
            assert_eq!(state, AdminState::Idle);
            assert_eq!(action, expected);
        }
    }
}
