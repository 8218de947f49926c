//! Pure state transitions: (MachineState, Context, Event) → Step.
//!
//! This is the core logic of the widget. Fully testable without a terminal.
//! Each state defines which events it accepts. Unhandled events leave the
//! state and context unchanged and only emit an [`Effect::Ignored`]
//! diagnostic.
//!
//! Side effects (log lines, the validation notice) are never executed here.
//! They are returned as [`Effect`] descriptors, in the order they would run:
//! exit actions of the source state, transition actions, entry actions of
//! the target state.

use serde::Serialize;

use crate::types::{Context, Event, MachineState, Snapshot};

// ============================================================================
// EFFECTS
// ============================================================================

/// Side effect requested by a pure transition.
///
/// Pure code never executes these — it only describes them.
/// The effects boundary ([`crate::effects`]) interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// A state was exited because of `event`.
    LogExit { state: MachineState, event: Event },
    /// The user picked "Good".
    LogGood,
    /// A state was entered.
    LogEntry { state: MachineState },
    /// The literal text of a submission, valid or not.
    LogResponse { value: String },
    /// The submission was empty. Fires once per invalid attempt.
    NotifyInvalid,
    /// `event` means nothing in `state`. Diagnostic only.
    Ignored { state: MachineState, event: Event },
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: MachineState,
    pub context: Context,
    pub effects: Vec<Effect>,
}

/// Pure state transition function.
///
/// Given the current state, its context and an event, produces the next
/// state, the next context and the effects to execute.
pub fn transition(state: MachineState, context: &Context, event: &Event) -> Step {
    match state {
        MachineState::Question => from_question(context, event),
        MachineState::Form => from_form(context, event),
        MachineState::Thanks => from_thanks(context, event),
        MachineState::Closed => ignored(state, context, event),
    }
}

/// Question: Good → Thanks, Bad → Form, Close → Closed. Every exit is logged.
fn from_question(context: &Context, event: &Event) -> Step {
    let target = match event {
        Event::Good => MachineState::Thanks,
        Event::Bad => MachineState::Form,
        Event::Close => MachineState::Closed,
        Event::Submit { .. } => return ignored(MachineState::Question, context, event),
    };

    let mut effects = vec![Effect::LogExit {
        state: MachineState::Question,
        event: event.clone(),
    }];
    if *event == Event::Good {
        effects.push(Effect::LogGood);
    }
    effects.extend(entry_effects(target));

    Step {
        state: target,
        context: context.clone(),
        effects,
    }
}

/// Form: a non-empty Submit captures the response, an empty one re-targets
/// Form and raises the notice. No entry/exit hooks run on the self-transition.
fn from_form(context: &Context, event: &Event) -> Step {
    match event {
        Event::Submit { value } => {
            let mut effects = vec![Effect::LogResponse {
                value: value.clone(),
            }];

            if form_valid(value) {
                effects.extend(entry_effects(MachineState::Thanks));
                Step {
                    state: MachineState::Thanks,
                    context: Context {
                        response: value.clone(),
                    },
                    effects,
                }
            } else {
                effects.push(Effect::NotifyInvalid);
                Step {
                    state: MachineState::Form,
                    context: context.clone(),
                    effects,
                }
            }
        }
        Event::Close => Step {
            state: MachineState::Closed,
            context: context.clone(),
            effects: Vec::new(),
        },
        Event::Good | Event::Bad => ignored(MachineState::Form, context, event),
    }
}

/// Thanks: only Close is meaningful.
fn from_thanks(context: &Context, event: &Event) -> Step {
    match event {
        Event::Close => Step {
            state: MachineState::Closed,
            context: context.clone(),
            effects: Vec::new(),
        },
        _ => ignored(MachineState::Thanks, context, event),
    }
}

/// Guard for the Form → Thanks transition.
fn form_valid(value: &str) -> bool {
    !value.is_empty()
}

/// Actions that run on entering `state`.
fn entry_effects(state: MachineState) -> Vec<Effect> {
    match state {
        MachineState::Thanks => vec![Effect::LogEntry { state }],
        _ => Vec::new(),
    }
}

/// No-op: state and context untouched.
fn ignored(state: MachineState, context: &Context, event: &Event) -> Step {
    Step {
        state,
        context: context.clone(),
        effects: vec![Effect::Ignored {
            state,
            event: event.clone(),
        }],
    }
}

// ============================================================================
// MACHINE
// ============================================================================

/// A running feedback machine.
///
/// Owns the current state and context. `send` processes one event to
/// completion and hands back the effects for the caller to execute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackMachine {
    state: MachineState,
    context: Context,
}

impl FeedbackMachine {
    /// Start in `Question` with an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> MachineState {
        self.state
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn is_closed(&self) -> bool {
        self.state == MachineState::Closed
    }

    /// Apply one event. Returns the effects it produced.
    pub fn send(&mut self, event: Event) -> Vec<Effect> {
        let step = transition(self.state, &self.context, &event);
        self.state = step.state;
        self.context = step.context;
        step.effects
    }

    /// Apply events in order, concatenating their effects.
    pub fn send_all<I>(&mut self, events: I) -> Vec<Effect>
    where
        I: IntoIterator<Item = Event>,
    {
        events.into_iter().flat_map(|event| self.send(event)).collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            context: self.context.clone(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_in(state: MachineState) -> FeedbackMachine {
        let mut machine = FeedbackMachine::new();
        match state {
            MachineState::Question => {}
            MachineState::Form => {
                machine.send(Event::Bad);
            }
            MachineState::Thanks => {
                machine.send(Event::Good);
            }
            MachineState::Closed => {
                machine.send(Event::Close);
            }
        }
        assert_eq!(machine.current_state(), state);
        machine
    }

    fn notices(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| **e == Effect::NotifyInvalid)
            .count()
    }

    // -- Construction --

    #[test]
    fn starts_in_question_with_empty_response() {
        let machine = FeedbackMachine::new();
        assert_eq!(machine.current_state(), MachineState::Question);
        assert_eq!(machine.context().response, "");
        assert!(!machine.is_closed());
    }

    // -- Question --

    #[test]
    fn question_good_goes_to_thanks_with_response_unchanged() {
        let mut machine = FeedbackMachine::new();
        machine.send(Event::Good);
        assert_eq!(machine.current_state(), MachineState::Thanks);
        assert_eq!(machine.context().response, "");
    }

    #[test]
    fn question_good_logs_exit_then_choice_then_entry() {
        let step = transition(MachineState::Question, &Context::default(), &Event::Good);
        assert_eq!(
            step.effects,
            vec![
                Effect::LogExit {
                    state: MachineState::Question,
                    event: Event::Good,
                },
                Effect::LogGood,
                Effect::LogEntry {
                    state: MachineState::Thanks,
                },
            ]
        );
    }

    #[test]
    fn question_bad_goes_to_form_and_logs_exit() {
        let step = transition(MachineState::Question, &Context::default(), &Event::Bad);
        assert_eq!(step.state, MachineState::Form);
        assert_eq!(
            step.effects,
            vec![Effect::LogExit {
                state: MachineState::Question,
                event: Event::Bad,
            }]
        );
    }

    #[test]
    fn question_close_goes_to_closed_and_logs_exit() {
        let step = transition(MachineState::Question, &Context::default(), &Event::Close);
        assert_eq!(step.state, MachineState::Closed);
        assert_eq!(
            step.effects,
            vec![Effect::LogExit {
                state: MachineState::Question,
                event: Event::Close,
            }]
        );
    }

    #[test]
    fn question_ignores_submit() {
        let step = transition(
            MachineState::Question,
            &Context::default(),
            &Event::submit("early"),
        );
        assert_eq!(step.state, MachineState::Question);
        assert_eq!(step.context.response, "");
        assert!(matches!(step.effects.as_slice(), [Effect::Ignored { .. }]));
    }

    // -- Form --

    #[test]
    fn form_empty_submit_stays_and_notifies_once() {
        let mut machine = machine_in(MachineState::Form);
        let effects = machine.send(Event::submit(""));
        assert_eq!(machine.current_state(), MachineState::Form);
        assert_eq!(machine.context().response, "");
        assert_eq!(notices(&effects), 1);
    }

    #[test]
    fn form_empty_submit_runs_no_entry_or_exit_hooks() {
        let step = transition(MachineState::Form, &Context::default(), &Event::submit(""));
        assert_eq!(
            step.effects,
            vec![
                Effect::LogResponse {
                    value: String::new(),
                },
                Effect::NotifyInvalid,
            ]
        );
    }

    #[test]
    fn form_repeated_empty_submits_notify_each_time() {
        let mut machine = machine_in(MachineState::Form);
        for _ in 0..3 {
            let effects = machine.send(Event::submit(""));
            assert_eq!(notices(&effects), 1);
        }
        assert_eq!(machine.current_state(), MachineState::Form);
    }

    #[test]
    fn form_valid_submit_captures_response() {
        let mut machine = machine_in(MachineState::Form);
        let effects = machine.send(Event::submit("great service"));
        assert_eq!(machine.current_state(), MachineState::Thanks);
        assert_eq!(machine.context().response, "great service");
        assert_eq!(
            effects,
            vec![
                Effect::LogResponse {
                    value: "great service".into(),
                },
                Effect::LogEntry {
                    state: MachineState::Thanks,
                },
            ]
        );
    }

    #[test]
    fn form_whitespace_counts_as_content() {
        let mut machine = machine_in(MachineState::Form);
        machine.send(Event::submit(" "));
        assert_eq!(machine.current_state(), MachineState::Thanks);
        assert_eq!(machine.context().response, " ");
    }

    #[test]
    fn form_ignores_good_and_bad() {
        for event in [Event::Good, Event::Bad] {
            let step = transition(MachineState::Form, &Context::default(), &event);
            assert_eq!(step.state, MachineState::Form);
            assert_eq!(
                step.effects,
                vec![Effect::Ignored {
                    state: MachineState::Form,
                    event,
                }]
            );
        }
    }

    // -- Thanks --

    #[test]
    fn thanks_ignores_everything_but_close() {
        for event in [Event::Good, Event::Bad, Event::submit("again")] {
            let mut machine = machine_in(MachineState::Thanks);
            machine.send(event);
            assert_eq!(machine.current_state(), MachineState::Thanks);
            assert_eq!(machine.context().response, "");
        }
    }

    // -- Close / Closed --

    #[test]
    fn close_from_any_state_closes() {
        for state in MachineState::ALL {
            let mut machine = machine_in(state);
            machine.send(Event::Close);
            assert_eq!(machine.current_state(), MachineState::Closed);
            assert!(machine.is_closed());
        }
    }

    #[test]
    fn closed_absorbs_every_event() {
        let mut machine = machine_in(MachineState::Closed);
        for event in [Event::Good, Event::Bad, Event::submit("late"), Event::Close] {
            let effects = machine.send(event);
            assert_eq!(machine.current_state(), MachineState::Closed);
            assert_eq!(machine.context().response, "");
            assert_eq!(notices(&effects), 0);
        }
    }

    #[test]
    fn closed_keeps_captured_response() {
        let mut machine = FeedbackMachine::new();
        machine.send_all([Event::Bad, Event::submit("slow"), Event::Close]);
        assert!(machine.is_closed());
        assert_eq!(machine.context().response, "slow");
    }

    // -- Scenario --

    #[test]
    fn bad_then_invalid_then_valid_then_close() {
        let mut machine = FeedbackMachine::new();

        machine.send(Event::Bad);
        assert_eq!(machine.current_state(), MachineState::Form);

        let effects = machine.send(Event::submit(""));
        assert_eq!(machine.current_state(), MachineState::Form);
        assert_eq!(notices(&effects), 1);

        machine.send(Event::submit("ok"));
        assert_eq!(machine.current_state(), MachineState::Thanks);
        assert_eq!(machine.context().response, "ok");

        machine.send(Event::Close);
        assert_eq!(machine.current_state(), MachineState::Closed);
    }

    #[test]
    fn send_all_concatenates_effects_in_order() {
        let mut machine = FeedbackMachine::new();
        let effects = machine.send_all([Event::Bad, Event::submit("")]);
        assert_eq!(
            effects,
            vec![
                Effect::LogExit {
                    state: MachineState::Question,
                    event: Event::Bad,
                },
                Effect::LogResponse {
                    value: String::new(),
                },
                Effect::NotifyInvalid,
            ]
        );
    }

    #[test]
    fn snapshot_reflects_state_and_context() {
        let mut machine = FeedbackMachine::new();
        machine.send_all([Event::Bad, Event::submit("ok")]);
        let snapshot = machine.snapshot();
        assert_eq!(snapshot.state, MachineState::Thanks);
        assert_eq!(snapshot.context.response, "ok");
    }

    // -- Properties --

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn any_event() -> impl Strategy<Value = Event> {
            prop_oneof![
                Just(Event::Good),
                Just(Event::Bad),
                Just(Event::Close),
                Just(Event::submit("")),
                "[a-z ]{1,12}".prop_map(|value: String| Event::Submit { value }),
            ]
        }

        proptest! {
            #[test]
            fn response_only_comes_from_non_empty_submissions(
                events in prop::collection::vec(any_event(), 0..32)
            ) {
                let mut machine = FeedbackMachine::new();
                let mut submitted: Vec<String> = Vec::new();

                for event in events {
                    if let Event::Submit { value } = &event {
                        submitted.push(value.clone());
                    }
                    let before = machine.current_state();
                    let effects = machine.send(event.clone());

                    prop_assert!(MachineState::ALL.contains(&machine.current_state()));

                    let expected_notices = usize::from(
                        before == MachineState::Form && event == Event::submit(""),
                    );
                    prop_assert_eq!(notices(&effects), expected_notices);
                }

                let response = &machine.context().response;
                prop_assert!(
                    response.is_empty()
                        || submitted.iter().any(|s| !s.is_empty() && s == response)
                );
            }

            #[test]
            fn closed_is_absorbing(events in prop::collection::vec(any_event(), 0..16)) {
                let mut machine = FeedbackMachine::new();
                machine.send(Event::Close);
                let before = machine.snapshot();
                machine.send_all(events);
                prop_assert_eq!(machine.snapshot(), before);
            }
        }
    }
}
