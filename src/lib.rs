//! libhangeul
//!
//! Hangul jamo composition automaton for IME integration. Feeds on one
//! classified jamo codepoint per keystroke (resolved by the caller's
//! keymap) and incrementally composes precomposed syllable blocks,
//! including vowel diphthongs (ㅗ+ㅏ→ㅘ) and trailing consonant clusters
//! (ㄹ+ㄱ→ㄺ), with an exact single-step inverse for backspace.
//!
//! Public API:
//! - `HangulAutomaton` - the composition state machine, one per input context
//! - `Actions` / `KeyModifiers` - the per-keystroke action and modifier bitmasks
//! - `State` - the structural shape of the composing buffer
//! - `jamo` - catalogs, syllable arithmetic and combination tables
//! - `Config` - initial-mode configuration with TOML load/save
//!
//! The crate owns no text surface and interprets no raw key codes: the
//! caller maps keystrokes to compatibility jamo and applies the returned
//! action bitmask to its own composing/committed text regions. See
//! `demos/interactive.rs` for a complete caller.

pub mod automaton;
pub use automaton::{Actions, HangulAutomaton, KeyModifiers, State};

pub mod config;
pub use config::Config;

pub mod jamo;
pub use jamo::JamoClass;
