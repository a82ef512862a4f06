//! Interactive composition demo.
//!
//! Implements the two collaborator contracts the library leaves to its
//! caller: a Dubeolsik (two-set) keymap from Latin keystrokes to
//! compatibility jamo, and a minimal line-based text surface that
//! interprets the action bitmask.
//!
//! Type Latin letters to compose Hangul (e.g. `rk` → 가, `ekfr` → 닭);
//! `<` rewinds one jamo, `:ko` toggles Korean mode, `:q` quits.

use libhangeul::{Actions, Config, HangulAutomaton, KeyModifiers};
use std::io::{self, BufRead, Write};

/// Dubeolsik layout for a-z, unshifted.
const NORMAL_KEYMAP: [char; 26] = [
    'ㅁ', 'ㅠ', 'ㅊ', 'ㅇ', 'ㄷ', 'ㄹ', 'ㅎ', 'ㅗ', 'ㅑ', 'ㅓ', 'ㅏ', 'ㅣ', 'ㅡ', 'ㅜ', 'ㅐ',
    'ㅔ', 'ㅂ', 'ㄱ', 'ㄴ', 'ㅅ', 'ㅕ', 'ㅍ', 'ㅈ', 'ㅌ', 'ㅛ', 'ㅋ',
];

/// Shifted variants; most keys shift to the same jamo.
const SHIFTED_KEYMAP: [char; 26] = [
    'ㅁ', 'ㅠ', 'ㅊ', 'ㅇ', 'ㄸ', 'ㄹ', 'ㅎ', 'ㅗ', 'ㅑ', 'ㅓ', 'ㅏ', 'ㅣ', 'ㅡ', 'ㅜ', 'ㅒ',
    'ㅖ', 'ㅃ', 'ㄲ', 'ㄴ', 'ㅆ', 'ㅕ', 'ㅍ', 'ㅉ', 'ㅌ', 'ㅛ', 'ㅋ',
];

/// Resolve one keystroke to (codepoint, modifiers) as the automaton's input
/// contract expects. Non-letter keys carry no jamo mapping.
fn resolve_key(ch: char) -> (char, KeyModifiers) {
    if ch.is_ascii_lowercase() {
        let index = (ch as u8 - b'a') as usize;
        (NORMAL_KEYMAP[index], KeyModifiers::empty())
    } else if ch.is_ascii_uppercase() {
        let index = (ch as u8 - b'A') as usize;
        (SHIFTED_KEYMAP[index], KeyModifiers::SHIFT)
    } else {
        (ch, KeyModifiers::empty())
    }
}

/// The host text surface: committed text plus the composing region.
struct Surface {
    committed: String,
}

impl Surface {
    fn apply(&mut self, automaton: &HangulAutomaton, raw: char, actions: Actions) {
        if actions.contains(Actions::ERROR) {
            eprintln!("! automaton desynchronized, resetting");
            return;
        }
        if actions.contains(Actions::UPDATE_COMPLETE) {
            if let Some(done) = automaton.flushed() {
                self.committed.push(done);
            }
        }
        if actions.contains(Actions::USE_INPUT_AS_RESULT) {
            self.committed.push(raw);
        }
    }

    fn render(&self, automaton: &HangulAutomaton) {
        let composing: String = automaton.composing().into_iter().collect();
        println!(
            "  [{}] text: {}{}  (state: {:?})",
            if automaton.is_korean_mode() { "한" } else { "EN" },
            self.committed,
            composing,
            automaton.state(),
        );
    }
}

fn main() -> io::Result<()> {
    let mut automaton = HangulAutomaton::with_config(&Config {
        korean_mode_default: true,
    });
    let mut surface = Surface {
        committed: String::new(),
    };

    println!("libhangeul interactive demo");
    println!("type Latin keys (Dubeolsik), '<' = backspace, ':ko' = toggle mode, ':q' = quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches('\n');

        match line {
            ":q" => break,
            ":ko" => {
                automaton.toggle_mode();
                surface.render(&automaton);
                continue;
            }
            _ => {}
        }

        for key in line.chars() {
            if key == '<' {
                let actions = automaton.backspace();
                if actions.contains(Actions::ERROR) {
                    // Nothing composing; delete committed text instead.
                    surface.committed.pop();
                } else if actions.contains(Actions::USE_INPUT_AS_RESULT) {
                    // Composition emptied; the host owns the deletion, and
                    // there is nothing committed to remove for this unit.
                }
                continue;
            }
            let (mapped, modifiers) = resolve_key(key);
            let actions = automaton.process_input(mapped, modifiers);
            surface.apply(&automaton, key, actions);
        }
        surface.render(&automaton);
    }

    // Commit whatever was still composing on the way out.
    if let Some(rest) = automaton.composing() {
        surface.committed.push(rest);
    }
    automaton.finish_without_input();
    println!("final: {}", surface.committed);
    Ok(())
}
