use super::sequencer::SequenceAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPTED_KEY_TOKENS: &str = "enter,f,right,n,left,b,esc,ctrl-c";

pub fn sequence_action_from_key(key: KeyEvent) -> Option<SequenceAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(SequenceAction::Cancel);
    }
    match key.code {
        KeyCode::Right | KeyCode::Char('n') => Some(SequenceAction::Next),
        KeyCode::Left | KeyCode::Char('b') => Some(SequenceAction::Back),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') | KeyCode::Char('f') => {
            Some(SequenceAction::Finish)
        }
        KeyCode::Esc => Some(SequenceAction::Cancel),
        _ => None,
    }
}

/// Parses a comma-separated key script such as `right,right,enter`.
pub fn parse_scripted_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        let normalized = token.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            continue;
        }
        let key = match normalized.as_str() {
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "right" => KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            "left" => KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            "f" => KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE),
            "n" => KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE),
            "b" => KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE),
            other => {
                return Err(format!(
                    "invalid key token `{other}`; valid tokens: {SCRIPTED_KEY_TOKENS}"
                ));
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

pub fn parse_scripted_actions(raw: &str) -> Result<Vec<SequenceAction>, String> {
    Ok(parse_scripted_keys(raw)?
        .into_iter()
        .filter_map(sequence_action_from_key)
        .collect())
}
