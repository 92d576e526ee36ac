//! Input state management

use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Left mouse button index
pub const MOUSE_LEFT: u32 = 0;
/// Right mouse button index
pub const MOUSE_RIGHT: u32 = 1;

/// Tracks keyboard and mouse input state per frame
///
/// Edges (`just_pressed` / `just_released`) are valid for the frame in which
/// the event was processed and are cleared by `end_frame`.
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released this frame
    keys_just_released: HashSet<KeyCode>,

    /// Mouse buttons currently held
    mouse_buttons_down: HashSet<u32>,
    /// Mouse buttons pressed this frame
    mouse_buttons_just_pressed: HashSet<u32>,
    /// Mouse buttons released this frame
    mouse_buttons_just_released: HashSet<u32>,

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,

    /// Mouse button action map: action name -> list of mouse button indices
    mouse_button_map: HashMap<String, Vec<u32>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            keys_just_released: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_buttons_just_pressed: HashSet::new(),
            mouse_buttons_just_released: HashSet::new(),
            action_map: Self::default_action_map(),
            mouse_button_map: Self::default_mouse_button_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert("interact".into(), vec![KeyCode::KeyE]);
        map
    }

    fn default_mouse_button_map() -> HashMap<String, Vec<u32>> {
        let mut map = HashMap::new();
        map.insert("fire".into(), vec![MOUSE_LEFT]);
        map
    }

    /// Bind an action to one or more keys
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Bind an action to one or more mouse buttons
    pub fn bind_mouse_action(&mut self, action: impl Into<String>, buttons: Vec<u32>) {
        self.mouse_button_map.insert(action.into(), buttons);
    }

    /// Does any key or mouse button trigger this action?
    pub fn has_action(&self, action: &str) -> bool {
        let keys = self.action_map.get(action).is_some_and(|k| !k.is_empty());
        let buttons = self
            .mouse_button_map
            .get(action)
            .is_some_and(|b| !b.is_empty());
        keys || buttons
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        if self.keys_down.remove(&key) {
            self.keys_just_released.insert(key);
        }
    }

    /// Process mouse button press
    pub fn process_mouse_button_down(&mut self, button: u32) {
        if !self.mouse_buttons_down.contains(&button) {
            self.mouse_buttons_just_pressed.insert(button);
        }
        self.mouse_buttons_down.insert(button);
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: u32) {
        if self.mouse_buttons_down.remove(&button) {
            self.mouse_buttons_just_released.insert(button);
        }
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_buttons_just_pressed.clear();
        self.mouse_buttons_just_released.clear();
    }

    // --- Query methods ---

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Was a key pressed this frame?
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Was a key released this frame?
    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.keys_just_released.contains(&key)
    }

    /// Is a mouse button currently held?
    pub fn is_mouse_button_down(&self, button: u32) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Is an action currently held? (any bound key or mouse button is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.any_bound(action, &self.keys_down, &self.mouse_buttons_down)
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.any_bound(
            action,
            &self.keys_just_pressed,
            &self.mouse_buttons_just_pressed,
        )
    }

    /// Was an action just released this frame?
    pub fn is_action_just_released(&self, action: &str) -> bool {
        self.any_bound(
            action,
            &self.keys_just_released,
            &self.mouse_buttons_just_released,
        )
    }

    /// Get all actions that were just pressed this frame, sorted by name
    pub fn actions_just_pressed(&self) -> Vec<String> {
        let mut result: Vec<String> = self
            .action_names()
            .into_iter()
            .filter(|action| self.is_action_just_pressed(action))
            .collect();
        result.sort();
        result
    }

    /// Get all registered action names (keyboard + mouse button maps)
    pub fn action_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.action_map.keys().cloned().collect();
        for name in self.mouse_button_map.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    fn any_bound(&self, action: &str, keys: &HashSet<KeyCode>, buttons: &HashSet<u32>) -> bool {
        let key_match = self
            .action_map
            .get(action)
            .map(|bound| bound.iter().any(|k| keys.contains(k)))
            .unwrap_or(false);
        let mouse_match = self
            .mouse_button_map
            .get(action)
            .map(|bound| bound.iter().any(|b| buttons.contains(b)))
            .unwrap_or(false);
        key_match || mouse_match
    }
}

/// Parse a key name as written in scene scripts ("E", "KeyE", "Space", "Digit1", ...)
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let key = match name {
        "A" | "KeyA" => KeyCode::KeyA,
        "B" | "KeyB" => KeyCode::KeyB,
        "C" | "KeyC" => KeyCode::KeyC,
        "D" | "KeyD" => KeyCode::KeyD,
        "E" | "KeyE" => KeyCode::KeyE,
        "F" | "KeyF" => KeyCode::KeyF,
        "G" | "KeyG" => KeyCode::KeyG,
        "H" | "KeyH" => KeyCode::KeyH,
        "I" | "KeyI" => KeyCode::KeyI,
        "J" | "KeyJ" => KeyCode::KeyJ,
        "K" | "KeyK" => KeyCode::KeyK,
        "L" | "KeyL" => KeyCode::KeyL,
        "M" | "KeyM" => KeyCode::KeyM,
        "N" | "KeyN" => KeyCode::KeyN,
        "O" | "KeyO" => KeyCode::KeyO,
        "P" | "KeyP" => KeyCode::KeyP,
        "Q" | "KeyQ" => KeyCode::KeyQ,
        "R" | "KeyR" => KeyCode::KeyR,
        "S" | "KeyS" => KeyCode::KeyS,
        "T" | "KeyT" => KeyCode::KeyT,
        "U" | "KeyU" => KeyCode::KeyU,
        "V" | "KeyV" => KeyCode::KeyV,
        "W" | "KeyW" => KeyCode::KeyW,
        "X" | "KeyX" => KeyCode::KeyX,
        "Y" | "KeyY" => KeyCode::KeyY,
        "Z" | "KeyZ" => KeyCode::KeyZ,
        "0" | "Digit0" => KeyCode::Digit0,
        "1" | "Digit1" => KeyCode::Digit1,
        "2" | "Digit2" => KeyCode::Digit2,
        "3" | "Digit3" => KeyCode::Digit3,
        "4" | "Digit4" => KeyCode::Digit4,
        "5" | "Digit5" => KeyCode::Digit5,
        "6" | "Digit6" => KeyCode::Digit6,
        "7" | "Digit7" => KeyCode::Digit7,
        "8" | "Digit8" => KeyCode::Digit8,
        "9" | "Digit9" => KeyCode::Digit9,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "AltLeft" => KeyCode::AltLeft,
        "AltRight" => KeyCode::AltRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_transitions() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::KeyW);
        assert!(input.is_key_down(KeyCode::KeyW));
        assert!(input.is_key_just_pressed(KeyCode::KeyW));

        // End frame clears just_pressed
        input.end_frame();
        assert!(input.is_key_down(KeyCode::KeyW));
        assert!(!input.is_key_just_pressed(KeyCode::KeyW));

        input.process_key_up(KeyCode::KeyW);
        assert!(!input.is_key_down(KeyCode::KeyW));
        assert!(input.is_key_just_released(KeyCode::KeyW));

        input.end_frame();
        assert!(!input.is_key_just_released(KeyCode::KeyW));
    }

    #[test]
    fn test_release_without_press_is_not_an_edge() {
        let mut input = InputState::new();
        input.process_key_up(KeyCode::KeyE);
        assert!(!input.is_action_just_released("interact"));
    }

    #[test]
    fn test_interact_release_edge() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::KeyE);
        assert!(input.is_action_just_pressed("interact"));
        assert!(!input.is_action_just_released("interact"));
        input.end_frame();

        input.process_key_up(KeyCode::KeyE);
        assert!(input.is_action_just_released("interact"));
        assert!(!input.is_action_pressed("interact"));
    }

    #[test]
    fn test_fire_is_left_mouse() {
        let mut input = InputState::new();

        input.process_mouse_button_down(MOUSE_LEFT);
        assert!(input.is_action_just_pressed("fire"));
        assert!(input.is_mouse_button_down(MOUSE_LEFT));
        input.end_frame();
        assert!(!input.is_action_just_pressed("fire"));
        assert!(input.is_action_pressed("fire"));

        input.process_mouse_button_up(MOUSE_LEFT);
        assert!(input.is_action_just_released("fire"));
        assert!(!input.is_mouse_button_down(MOUSE_LEFT));
    }

    #[test]
    fn test_custom_binding() {
        let mut input = InputState::new();
        input.bind_action("use", vec![KeyCode::KeyF, KeyCode::ControlLeft]);
        input.bind_mouse_action("use", vec![MOUSE_RIGHT]);

        input.process_key_down(KeyCode::KeyF);
        assert!(input.is_action_pressed("use"));

        input.process_key_up(KeyCode::KeyF);
        input.process_key_down(KeyCode::ControlLeft);
        assert!(input.is_action_pressed("use"));

        input.process_key_up(KeyCode::ControlLeft);
        input.process_mouse_button_down(MOUSE_RIGHT);
        assert!(input.is_action_pressed("use"));
    }

    #[test]
    fn test_has_action() {
        let mut input = InputState::new();
        assert!(input.has_action("interact"));
        assert!(input.has_action("fire"));
        assert!(!input.has_action("use"));
        assert!(!input.has_action("jump"));

        input.bind_action("use", vec![KeyCode::KeyF]);
        assert!(input.has_action("use"));
        input.bind_action("use", Vec::new());
        assert!(!input.has_action("use"));
    }

    #[test]
    fn test_actions_just_pressed() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyE);
        input.process_mouse_button_down(MOUSE_LEFT);

        assert_eq!(input.actions_just_pressed(), vec!["fire", "interact"]);
    }

    #[test]
    fn test_parse_key_code() {
        assert_eq!(parse_key_code("E"), Some(KeyCode::KeyE));
        assert_eq!(parse_key_code("KeyE"), Some(KeyCode::KeyE));
        assert_eq!(parse_key_code("Space"), Some(KeyCode::Space));
        assert_eq!(parse_key_code("Digit1"), Some(KeyCode::Digit1));
        assert_eq!(parse_key_code("Hyper"), None);
    }
}
