//! The jamo composition state machine.
//!
//! `HangulAutomaton` consumes one classified jamo codepoint per keystroke
//! and incrementally builds precomposed syllable blocks, holding exactly one
//! in-progress unit (`composing`) and one finished unit (`flushed`) at a
//! time. Each operation returns an [`Actions`] bitmask telling the host text
//! surface what to do: redraw the composing region, commit the flushed unit,
//! pass the raw input through, or treat the automaton as desynchronized.
//!
//! Every transition is computed into a [`Step`] first and committed
//! atomically, so a structural error (a lookup that must succeed in a given
//! state returning nothing) leaves state and buffers exactly as they were.
//! The jamo arithmetic itself lives in [`crate::jamo`]; this module only
//! sequences it.

use crate::config::Config;
use crate::jamo::{self, JamoClass};
use bitflags::bitflags;
use tracing::trace;

bitflags! {
    /// Caller actions requested by an automaton operation.
    ///
    /// The empty set means "nothing to do". `ERROR` signals a structural
    /// invariant violation; the caller should reinitialize the automaton.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Actions: u8 {
        /// Redraw the composing region from the current composing buffer.
        const UPDATE_COMPOSITION = 0b0000_0001;
        /// Commit the flushed buffer to the finished text.
        const UPDATE_COMPLETE = 0b0000_0010;
        /// The composition update starts a new unit rather than replacing
        /// the previous glyph.
        const APPEND = 0b0000_0100;
        /// Pass the original input through to the text field unmodified.
        const USE_INPUT_AS_RESULT = 0b0000_1000;
        /// Structural invariant violated; state and buffers are unchanged.
        const ERROR = 0b0001_0000;
    }
}

bitflags! {
    /// Modifier bits of the keystroke that produced the input codepoint.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const FN    = 0b1000;
    }
}

/// Structural shape of the composing buffer.
///
/// The buffer always holds exactly the shape its state declares: a bare
/// jamo, a lead+vowel syllable, a full syllable, or one of the combined
/// (diphthong / cluster) variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// No buffer.
    #[default]
    Empty,
    /// Bare leading consonant, e.g. ㄱ.
    Lead,
    /// Leading consonant + vowel, e.g. 가.
    LeadVowel,
    /// Full syllable with a simple trailing consonant, e.g. 각.
    LeadVowelTrail,
    /// Bare vowel, e.g. ㅏ.
    Vowel,
    /// Bare combined vowel, e.g. ㅘ.
    CombinedVowel,
    /// Bare trailing consonant cluster, e.g. ㄳ.
    CombinedTrail,
    /// Syllable with a cluster trailing, e.g. 갃.
    LeadVowelCombinedTrail,
    /// Syllable with a combined vowel, e.g. 과.
    LeadCombinedVowel,
    /// Combined vowel + simple trailing, e.g. 곽.
    LeadCombinedVowelTrail,
    /// Combined vowel + cluster trailing, e.g. 곿.
    LeadCombinedVowelCombinedTrail,
}

/// One atomic automaton transition, computed before anything is mutated.
struct Step {
    state: State,
    composing: Option<char>,
    flushed: Option<char>,
    actions: Actions,
}

impl Step {
    /// Replace the composing buffer in place, no flush.
    fn recompose(state: State, ch: char) -> Self {
        Step {
            state,
            composing: Some(ch),
            flushed: None,
            actions: Actions::UPDATE_COMPOSITION,
        }
    }

    /// Flush the current unit and restart composition with the input.
    fn flush_restart(flushed: char, input: char, state: State) -> Self {
        Step {
            state,
            composing: Some(input),
            flushed: Some(flushed),
            actions: Actions::UPDATE_COMPLETE | Actions::UPDATE_COMPOSITION,
        }
    }

    /// Flush part of the current unit and carry the rest into a new
    /// lead+vowel syllable (the trailing-consonant split).
    fn split(flushed: char, composing: char) -> Self {
        Step {
            state: State::LeadVowel,
            composing: Some(composing),
            flushed: Some(flushed),
            actions: Actions::UPDATE_COMPLETE | Actions::UPDATE_COMPOSITION,
        }
    }
}

/// Compose a lead+vowel syllable from two compatibility jamo.
fn lead_vowel_syllable(lead: char, vowel: char) -> Option<char> {
    jamo::compose_syllable(jamo::leading_index(lead)?, jamo::vowel_index(vowel)?, 0)
}

/// The Hangul composition automaton.
///
/// One instance per active input context; single-threaded, synchronous, one
/// call per physical keystroke. When Korean mode is off the automaton is
/// inert and forwards all input unchanged.
#[derive(Debug, Clone)]
pub struct HangulAutomaton {
    state: State,
    composing: Option<char>,
    flushed: Option<char>,
    korean_mode: bool,
}

impl HangulAutomaton {
    /// Create an automaton in the start state, Korean mode off.
    pub fn new() -> Self {
        Self {
            state: State::Empty,
            composing: None,
            flushed: None,
            korean_mode: false,
        }
    }

    /// Create an automaton with the configured initial mode.
    pub fn with_config(config: &Config) -> Self {
        let mut automaton = Self::new();
        automaton.korean_mode = config.korean_mode_default;
        automaton
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The unit currently under construction, if any.
    pub fn composing(&self) -> Option<char> {
        self.composing
    }

    /// The unit completed by the most recent call, if any. Owned by the
    /// caller for the duration of that call's result processing; the next
    /// call overwrites it.
    pub fn flushed(&self) -> Option<char> {
        self.flushed
    }

    /// Whether Korean mode is active.
    pub fn is_korean_mode(&self) -> bool {
        self.korean_mode
    }

    /// Flip Korean mode. Buffers and state are left alone; callers that
    /// switch mid-composition must flush separately.
    pub fn toggle_mode(&mut self) {
        self.korean_mode = !self.korean_mode;
        trace!(korean_mode = self.korean_mode, "toggle_mode");
    }

    /// External end of input (focus loss, context teardown). Clears both
    /// buffers and resets to the start state when Korean mode is active.
    /// The caller commits any text it was displaying on its own.
    pub fn finish_without_input(&mut self) -> Actions {
        trace!(state = ?self.state, "finish_without_input");
        if self.korean_mode {
            self.composing = None;
            self.flushed = None;
            self.state = State::Empty;
        }
        Actions::empty()
    }

    /// Process one keystroke already resolved to a codepoint.
    ///
    /// `input` is either a consonant- or vowel-shaped compatibility jamo
    /// (resolved by the caller's keymap) or any other codepoint, which
    /// carries no jamo mapping and flushes the pending unit instead.
    pub fn process_input(&mut self, input: char, modifiers: KeyModifiers) -> Actions {
        trace!(?input, ?modifiers, state = ?self.state, "process_input");
        self.flushed = None;

        let consonant = match jamo::classify(input) {
            JamoClass::Consonant => true,
            JamoClass::Vowel => false,
            JamoClass::Syllable | JamoClass::Other => {
                return self.flush_for_passthrough(modifiers)
            }
        };

        if !self.korean_mode {
            return Actions::USE_INPUT_AS_RESULT;
        }

        match self.transition(input, consonant) {
            Some(step) => {
                trace!(from = ?self.state, to = ?step.state, actions = ?step.actions, "transition");
                self.state = step.state;
                self.composing = step.composing;
                self.flushed = step.flushed;
                step.actions
            }
            None => Actions::ERROR,
        }
    }

    /// Rewind the most recent forward step.
    ///
    /// Peels the last structural atom off the composing buffer: drop a
    /// trailing consonant, decompose a cluster or diphthong to its first
    /// constituent, or clear a bare jamo. Never touches the flushed buffer
    /// and keeps no history beyond the current unit. From `Empty`, or with
    /// a buffer inconsistent with the state, signals `ERROR` and changes
    /// nothing.
    pub fn backspace(&mut self) -> Actions {
        trace!(state = ?self.state, composing = ?self.composing, "backspace");
        match self.rewind() {
            Some(step) => {
                self.state = step.state;
                self.composing = step.composing;
                step.actions
            }
            None => Actions::ERROR,
        }
    }

    /// Non-jamo input: flush the pending unit and hand the keystroke back.
    fn flush_for_passthrough(&mut self, modifiers: KeyModifiers) -> Actions {
        if !self.korean_mode {
            return Actions::USE_INPUT_AS_RESULT;
        }
        let mut actions = Actions::empty();
        if self.composing.is_some() {
            self.flushed = self.composing.take();
            self.state = State::Empty;
            actions |= Actions::UPDATE_COMPOSITION | Actions::UPDATE_COMPLETE;
        }
        if !modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CTRL | KeyModifiers::FN) {
            actions |= Actions::USE_INPUT_AS_RESULT;
        }
        actions
    }

    /// The transition table: a total function over (state, input class).
    ///
    /// Returns `None` only when the composing buffer does not have the
    /// shape its state declares, which is a programming defect upstream,
    /// never a normal input sequence.
    fn transition(&self, input: char, consonant: bool) -> Option<Step> {
        use State::*;
        let cur = self.composing;
        Some(match (self.state, consonant) {
            (Empty, true) => Step {
                state: Lead,
                composing: Some(input),
                flushed: None,
                actions: Actions::UPDATE_COMPOSITION | Actions::APPEND,
            },
            (Empty, false) => Step {
                state: Vowel,
                composing: Some(input),
                flushed: None,
                actions: Actions::UPDATE_COMPOSITION | Actions::APPEND,
            },

            (Lead, true) => match jamo::combine_trailing(cur?, input) {
                Some(cluster) => Step::recompose(CombinedTrail, cluster),
                None => Step::flush_restart(cur?, input, Lead),
            },
            (Lead, false) => {
                Step::recompose(LeadVowel, lead_vowel_syllable(cur?, input)?)
            }

            (LeadVowel, true) => match jamo::trailing_index(input) {
                Some(trail) => {
                    let (lead, vowel, _) = jamo::decompose_syllable(cur?)?;
                    Step::recompose(LeadVowelTrail, jamo::compose_syllable(lead, vowel, trail)?)
                }
                None => Step::flush_restart(cur?, input, Lead),
            },
            (LeadVowel, false) => {
                let (lead, vowel, _) = jamo::decompose_syllable(cur?)?;
                let fused = jamo::vowel(vowel).and_then(|v| jamo::combine_vowels(v, input));
                match fused {
                    Some(fused) => Step::recompose(
                        LeadCombinedVowel,
                        jamo::compose_syllable(lead, jamo::vowel_index(fused)?, 0)?,
                    ),
                    None => Step::flush_restart(cur?, input, Vowel),
                }
            }

            (LeadVowelTrail, true) => {
                let (lead, vowel, trail) = jamo::decompose_syllable(cur?)?;
                let cluster =
                    jamo::trailing(trail).and_then(|t| jamo::combine_trailing(t, input));
                match cluster {
                    Some(cluster) => Step::recompose(
                        LeadVowelCombinedTrail,
                        jamo::compose_syllable(lead, vowel, jamo::trailing_index(cluster)?)?,
                    ),
                    None => Step::flush_restart(cur?, input, Lead),
                }
            }
            // The trailing consonant leaves to lead a new syllable with the
            // input vowel; what remains of the old syllable is flushed.
            (LeadVowelTrail, false) | (LeadCombinedVowelTrail, false) => {
                let (lead, vowel, trail) = jamo::decompose_syllable(cur?)?;
                let carried = jamo::trailing(trail)?;
                Step::split(
                    jamo::compose_syllable(lead, vowel, 0)?,
                    lead_vowel_syllable(carried, input)?,
                )
            }

            (Vowel, true) => Step::flush_restart(cur?, input, Lead),
            (Vowel, false) => match jamo::combine_vowels(cur?, input) {
                Some(fused) => Step::recompose(CombinedVowel, fused),
                None => Step::flush_restart(cur?, input, Vowel),
            },

            (CombinedVowel, true) => Step::flush_restart(cur?, input, Lead),
            // Combined vowels do not combine further.
            (CombinedVowel, false) => Step::flush_restart(cur?, input, Vowel),

            (CombinedTrail, true) => Step::flush_restart(cur?, input, Lead),
            // Split the bare cluster: first constituent is done, the second
            // leads a new syllable with the input vowel.
            (CombinedTrail, false) => {
                let (first, second) = jamo::decompose_trailing(cur?)?;
                Step::split(first, lead_vowel_syllable(second, input)?)
            }

            (LeadVowelCombinedTrail, true) => Step::flush_restart(cur?, input, Lead),
            // Split the trailing cluster: its first constituent stays with
            // the flushed syllable, the second leads the new one.
            (LeadVowelCombinedTrail, false) | (LeadCombinedVowelCombinedTrail, false) => {
                let (lead, vowel, trail) = jamo::decompose_syllable(cur?)?;
                let (first, second) = jamo::decompose_trailing(jamo::trailing(trail)?)?;
                Step::split(
                    jamo::compose_syllable(lead, vowel, jamo::trailing_index(first)?)?,
                    lead_vowel_syllable(second, input)?,
                )
            }

            (LeadCombinedVowel, true) => match jamo::trailing_index(input) {
                Some(trail) => {
                    let (lead, vowel, _) = jamo::decompose_syllable(cur?)?;
                    Step::recompose(
                        LeadCombinedVowelTrail,
                        jamo::compose_syllable(lead, vowel, trail)?,
                    )
                }
                None => Step::flush_restart(cur?, input, Lead),
            },
            (LeadCombinedVowel, false) => Step::flush_restart(cur?, input, Vowel),

            (LeadCombinedVowelTrail, true) => {
                let (lead, vowel, trail) = jamo::decompose_syllable(cur?)?;
                let cluster =
                    jamo::trailing(trail).and_then(|t| jamo::combine_trailing(t, input));
                match cluster {
                    Some(cluster) => Step::recompose(
                        LeadCombinedVowelCombinedTrail,
                        jamo::compose_syllable(lead, vowel, jamo::trailing_index(cluster)?)?,
                    ),
                    None => Step::flush_restart(cur?, input, Lead),
                }
            }

            (LeadCombinedVowelCombinedTrail, true) => {
                Step::flush_restart(cur?, input, Lead)
            }
        })
    }

    /// The inverse table for [`Self::backspace`], one arm per state.
    fn rewind(&self) -> Option<Step> {
        use State::*;
        let cur = self.composing;
        Some(match self.state {
            Empty => return None,
            // A bare jamo rewinds to nothing; the host applies the deletion
            // to its own text.
            Lead | Vowel if cur.is_none() => return None,
            Lead | Vowel => Step {
                state: Empty,
                composing: None,
                flushed: None,
                actions: Actions::USE_INPUT_AS_RESULT,
            },
            CombinedVowel => {
                let (first, _) = jamo::decompose_vowel(cur?)?;
                Step::recompose(Vowel, first)
            }
            CombinedTrail => {
                let (first, _) = jamo::decompose_trailing(cur?)?;
                Step::recompose(Lead, first)
            }
            LeadVowel => {
                let (lead, _, _) = jamo::decompose_syllable(cur?)?;
                Step::recompose(Lead, jamo::leading(lead)?)
            }
            LeadVowelTrail => {
                let (lead, vowel, _) = jamo::decompose_syllable(cur?)?;
                Step::recompose(LeadVowel, jamo::compose_syllable(lead, vowel, 0)?)
            }
            LeadVowelCombinedTrail => {
                let (lead, vowel, trail) = jamo::decompose_syllable(cur?)?;
                let (first, _) = jamo::decompose_trailing(jamo::trailing(trail)?)?;
                Step::recompose(
                    LeadVowelTrail,
                    jamo::compose_syllable(lead, vowel, jamo::trailing_index(first)?)?,
                )
            }
            LeadCombinedVowel => {
                let (lead, vowel, _) = jamo::decompose_syllable(cur?)?;
                let (first, _) = jamo::decompose_vowel(jamo::vowel(vowel)?)?;
                Step::recompose(
                    LeadVowel,
                    jamo::compose_syllable(lead, jamo::vowel_index(first)?, 0)?,
                )
            }
            LeadCombinedVowelTrail => {
                let (lead, vowel, _) = jamo::decompose_syllable(cur?)?;
                Step::recompose(LeadCombinedVowel, jamo::compose_syllable(lead, vowel, 0)?)
            }
            LeadCombinedVowelCombinedTrail => {
                let (lead, vowel, trail) = jamo::decompose_syllable(cur?)?;
                let (first, _) = jamo::decompose_trailing(jamo::trailing(trail)?)?;
                Step::recompose(
                    LeadCombinedVowelTrail,
                    jamo::compose_syllable(lead, vowel, jamo::trailing_index(first)?)?,
                )
            }
        })
    }
}

impl Default for HangulAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn korean() -> HangulAutomaton {
        let mut a = HangulAutomaton::new();
        a.toggle_mode();
        a
    }

    fn type_all(a: &mut HangulAutomaton, jamos: &str) {
        for ch in jamos.chars() {
            let actions = a.process_input(ch, KeyModifiers::empty());
            assert!(!actions.contains(Actions::ERROR), "error on {ch:?}");
        }
    }

    #[test]
    fn starts_empty_and_latin() {
        let a = HangulAutomaton::new();
        assert_eq!(a.state(), State::Empty);
        assert_eq!(a.composing(), None);
        assert_eq!(a.flushed(), None);
        assert!(!a.is_korean_mode());
    }

    #[test]
    fn first_jamo_appends() {
        let mut a = korean();
        let actions = a.process_input('ㄱ', KeyModifiers::empty());
        assert_eq!(actions, Actions::UPDATE_COMPOSITION | Actions::APPEND);
        assert_eq!(a.state(), State::Lead);
        assert_eq!(a.composing(), Some('ㄱ'));

        let actions = a.process_input('ㅏ', KeyModifiers::empty());
        assert_eq!(actions, Actions::UPDATE_COMPOSITION);
        assert_eq!(a.state(), State::LeadVowel);
        assert_eq!(a.composing(), Some('가'));
    }

    #[test]
    fn trailing_attaches() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅏㅅ");
        assert_eq!(a.state(), State::LeadVowelTrail);
        assert_eq!(a.composing(), Some('갓'));
        assert_eq!(a.flushed(), None);
    }

    #[test]
    fn trailing_splits_on_vowel() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅏㅅ");
        let actions = a.process_input('ㅏ', KeyModifiers::empty());
        assert_eq!(
            actions,
            Actions::UPDATE_COMPLETE | Actions::UPDATE_COMPOSITION
        );
        assert_eq!(a.flushed(), Some('가'));
        assert_eq!(a.composing(), Some('사'));
        assert_eq!(a.state(), State::LeadVowel);
    }

    #[test]
    fn diphthong_fuses() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅗㅏ");
        assert_eq!(a.state(), State::LeadCombinedVowel);
        assert_eq!(a.composing(), Some('과'));
    }

    #[test]
    fn cluster_fuses_and_splits() {
        let mut a = korean();
        type_all(&mut a, "ㄷㅏㄹㄱ");
        assert_eq!(a.state(), State::LeadVowelCombinedTrail);
        assert_eq!(a.composing(), Some('닭'));

        let actions = a.process_input('ㅣ', KeyModifiers::empty());
        assert_eq!(
            actions,
            Actions::UPDATE_COMPLETE | Actions::UPDATE_COMPOSITION
        );
        assert_eq!(a.flushed(), Some('달'));
        assert_eq!(a.composing(), Some('기'));
        assert_eq!(a.state(), State::LeadVowel);
    }

    #[test]
    fn bare_cluster_from_two_consonants() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅅ");
        assert_eq!(a.state(), State::CombinedTrail);
        assert_eq!(a.composing(), Some('ㄳ'));

        // Vowel splits: ㄱ is done, ㅅ leads the new syllable.
        a.process_input('ㅏ', KeyModifiers::empty());
        assert_eq!(a.flushed(), Some('ㄱ'));
        assert_eq!(a.composing(), Some('사'));
        assert_eq!(a.state(), State::LeadVowel);
    }

    #[test]
    fn uncombinable_consonants_flush() {
        let mut a = korean();
        type_all(&mut a, "ㄱㄷ");
        assert_eq!(a.state(), State::Lead);
        assert_eq!(a.flushed(), Some('ㄱ'));
        assert_eq!(a.composing(), Some('ㄷ'));
    }

    #[test]
    fn combined_vowel_then_trailing_then_cluster() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅗㅏㄹ");
        assert_eq!(a.state(), State::LeadCombinedVowelTrail);
        assert_eq!(a.composing(), Some('괄'));

        type_all(&mut a, "ㄱ");
        assert_eq!(a.state(), State::LeadCombinedVowelCombinedTrail);
        assert_eq!(a.composing(), Some('괅')); // U+AD05

        // Vowel splits the cluster
        a.process_input('ㅏ', KeyModifiers::empty());
        assert_eq!(a.flushed(), Some('괄'));
        assert_eq!(a.composing(), Some('가'));
        assert_eq!(a.state(), State::LeadVowel);
    }

    #[test]
    fn double_consonant_cannot_trail() {
        // ㄸ has a leading slot but no trailing slot
        let mut a = korean();
        type_all(&mut a, "ㄱㅏㄸ");
        assert_eq!(a.state(), State::Lead);
        assert_eq!(a.flushed(), Some('가'));
        assert_eq!(a.composing(), Some('ㄸ'));
    }

    #[test]
    fn vowel_restart_on_failed_fusion() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅏㅏ");
        assert_eq!(a.state(), State::Vowel);
        assert_eq!(a.flushed(), Some('가'));
        assert_eq!(a.composing(), Some('ㅏ'));
    }

    #[test]
    fn bare_vowels_fuse_once() {
        let mut a = korean();
        type_all(&mut a, "ㅗㅏ");
        assert_eq!(a.state(), State::CombinedVowel);
        assert_eq!(a.composing(), Some('ㅘ'));

        // No further fusion from a combined vowel
        a.process_input('ㅣ', KeyModifiers::empty());
        assert_eq!(a.state(), State::Vowel);
        assert_eq!(a.flushed(), Some('ㅘ'));
        assert_eq!(a.composing(), Some('ㅣ'));
    }

    #[test]
    fn latin_mode_passes_through() {
        let mut a = HangulAutomaton::new();
        let actions = a.process_input('ㄱ', KeyModifiers::empty());
        assert_eq!(actions, Actions::USE_INPUT_AS_RESULT);
        assert_eq!(a.state(), State::Empty);
        assert_eq!(a.composing(), None);
    }

    #[test]
    fn non_jamo_flushes_mid_composition() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅏ");
        let actions = a.process_input('7', KeyModifiers::empty());
        assert_eq!(
            actions,
            Actions::UPDATE_COMPOSITION | Actions::UPDATE_COMPLETE | Actions::USE_INPUT_AS_RESULT
        );
        assert_eq!(a.state(), State::Empty);
        assert_eq!(a.composing(), None);
        assert_eq!(a.flushed(), Some('가'));
    }

    #[test]
    fn non_jamo_with_ctrl_suppresses_passthrough() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅏ");
        let actions = a.process_input('c', KeyModifiers::CTRL);
        assert_eq!(
            actions,
            Actions::UPDATE_COMPOSITION | Actions::UPDATE_COMPLETE
        );
        // Shift alone does not suppress it
        let actions = a.process_input('7', KeyModifiers::SHIFT);
        assert_eq!(actions, Actions::USE_INPUT_AS_RESULT);
    }

    #[test]
    fn non_jamo_with_empty_buffer() {
        let mut a = korean();
        let actions = a.process_input('7', KeyModifiers::empty());
        assert_eq!(actions, Actions::USE_INPUT_AS_RESULT);
        assert_eq!(a.flushed(), None);
    }

    #[test]
    fn flushed_is_cleared_on_next_call() {
        let mut a = korean();
        type_all(&mut a, "ㄱㄷ");
        assert_eq!(a.flushed(), Some('ㄱ'));
        type_all(&mut a, "ㅏ");
        assert_eq!(a.flushed(), None);
        assert_eq!(a.composing(), Some('다'));
    }

    #[test]
    fn backspace_from_empty_is_error() {
        let mut a = korean();
        assert_eq!(a.backspace(), Actions::ERROR);
        assert_eq!(a.state(), State::Empty);
    }

    #[test]
    fn backspace_rewinds_each_shape() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅗㅏㄹㄱ"); // 괅
        assert_eq!(a.state(), State::LeadCombinedVowelCombinedTrail);

        assert_eq!(a.backspace(), Actions::UPDATE_COMPOSITION);
        assert_eq!((a.state(), a.composing()), (State::LeadCombinedVowelTrail, Some('괄')));

        assert_eq!(a.backspace(), Actions::UPDATE_COMPOSITION);
        assert_eq!((a.state(), a.composing()), (State::LeadCombinedVowel, Some('과')));

        assert_eq!(a.backspace(), Actions::UPDATE_COMPOSITION);
        assert_eq!((a.state(), a.composing()), (State::LeadVowel, Some('고')));

        assert_eq!(a.backspace(), Actions::UPDATE_COMPOSITION);
        assert_eq!((a.state(), a.composing()), (State::Lead, Some('ㄱ')));

        assert_eq!(a.backspace(), Actions::USE_INPUT_AS_RESULT);
        assert_eq!((a.state(), a.composing()), (State::Empty, None));

        assert_eq!(a.backspace(), Actions::ERROR);
    }

    #[test]
    fn backspace_rewinds_bare_combinations() {
        let mut a = korean();
        type_all(&mut a, "ㅗㅏ");
        assert_eq!(a.backspace(), Actions::UPDATE_COMPOSITION);
        assert_eq!((a.state(), a.composing()), (State::Vowel, Some('ㅗ')));

        let mut a = korean();
        type_all(&mut a, "ㄱㅅ");
        assert_eq!(a.backspace(), Actions::UPDATE_COMPOSITION);
        assert_eq!((a.state(), a.composing()), (State::Lead, Some('ㄱ')));
    }

    #[test]
    fn backspace_leaves_flushed_alone() {
        let mut a = korean();
        type_all(&mut a, "ㄱㄷ"); // flushes ㄱ
        assert_eq!(a.flushed(), Some('ㄱ'));
        a.backspace();
        assert_eq!(a.flushed(), Some('ㄱ'));
    }

    #[test]
    fn finish_without_input_resets_in_korean_mode() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅏ");
        assert_eq!(a.finish_without_input(), Actions::empty());
        assert_eq!(a.state(), State::Empty);
        assert_eq!(a.composing(), None);
        assert_eq!(a.flushed(), None);
    }

    #[test]
    fn finish_without_input_is_noop_in_latin_mode() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅏ");
        a.toggle_mode();
        assert_eq!(a.finish_without_input(), Actions::empty());
        assert_eq!(a.composing(), Some('가'));
        assert_eq!(a.state(), State::LeadVowel);
    }

    #[test]
    fn toggle_mode_preserves_buffers() {
        let mut a = korean();
        type_all(&mut a, "ㄱㅏ");
        a.toggle_mode();
        assert!(!a.is_korean_mode());
        assert_eq!(a.composing(), Some('가'));
        a.toggle_mode();
        assert!(a.is_korean_mode());
        assert_eq!(a.state(), State::LeadVowel);
    }

    #[test]
    fn with_config_sets_initial_mode() {
        let config = Config {
            korean_mode_default: true,
        };
        let a = HangulAutomaton::with_config(&config);
        assert!(a.is_korean_mode());
    }
}
