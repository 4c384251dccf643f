//! Keyboard shortcuts.
//!
//! Hotkeys are written as `+`-joined modifier names followed by one key,
//! e.g. `mod+b` or `shift+enter`. `mod` is Meta on macOS and Ctrl elsewhere.
//! Matching is exact: a modifier that is not named must not be held.

use std::fmt;

use inkpad_core::{Error, MarkType, Result};

/// Host platform, used to resolve the `mod` modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }
}

/// A key press as delivered by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// A parsed hotkey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    key: String,
    ctrl: bool,
    meta: bool,
    alt: bool,
    shift: bool,
}

impl Hotkey {
    /// Parse for the current platform.
    pub fn parse(spec: &str) -> Result<Self> {
        Self::parse_for(spec, Platform::current())
    }

    pub fn parse_for(spec: &str, platform: Platform) -> Result<Self> {
        let mut hotkey = Hotkey {
            key: String::new(),
            ctrl: false,
            meta: false,
            alt: false,
            shift: false,
        };

        let parts: Vec<&str> = spec.split('+').map(str::trim).collect();
        let (key, modifiers) = match parts.split_last() {
            Some((key, modifiers)) if !key.is_empty() => (*key, modifiers),
            _ => return Err(Error::InvalidInput(format!("hotkey has no key: {:?}", spec))),
        };

        for modifier in modifiers {
            match modifier.to_ascii_lowercase().as_str() {
                "mod" => match platform {
                    Platform::Mac => hotkey.meta = true,
                    Platform::Other => hotkey.ctrl = true,
                },
                "ctrl" | "control" => hotkey.ctrl = true,
                "meta" | "cmd" | "command" => hotkey.meta = true,
                "alt" | "option" => hotkey.alt = true,
                "shift" => hotkey.shift = true,
                other => {
                    return Err(Error::InvalidInput(format!(
                        "unknown modifier {:?} in hotkey {:?}",
                        other, spec
                    )))
                }
            }
        }

        hotkey.key = normalize_key(key);
        Ok(hotkey)
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == normalize_key(&event.key)
            && self.ctrl == event.ctrl
            && self.meta == event.meta
            && self.alt == event.alt
            && self.shift == event.shift
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (held, name) in [
            (self.ctrl, "ctrl"),
            (self.meta, "meta"),
            (self.alt, "alt"),
            (self.shift, "shift"),
        ] {
            if held {
                write!(f, "{}+", name)?;
            }
        }
        write!(f, "{}", self.key)
    }
}

fn normalize_key(key: &str) -> String {
    let lower = key.to_lowercase();
    match lower.as_str() {
        "return" => "enter".to_string(),
        "esc" => "escape".to_string(),
        "space" | "spacebar" => " ".to_string(),
        _ => lower,
    }
}

/// What a bound key does in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    ToggleMark(MarkType),
    /// New block; subject to the node limit.
    Enter,
    /// List indentation; subject to the list depth cap.
    Tab,
}

/// Ordered hotkey bindings. The first match wins.
#[derive(Debug, Clone)]
pub struct HotkeyMap {
    bindings: Vec<(Hotkey, HotkeyAction)>,
}

impl HotkeyMap {
    /// Default bindings for `platform`.
    pub fn for_platform(platform: Platform) -> Result<Self> {
        let specs = [
            ("mod+b", HotkeyAction::ToggleMark(MarkType::Bold)),
            ("mod+i", HotkeyAction::ToggleMark(MarkType::Italic)),
            ("mod+u", HotkeyAction::ToggleMark(MarkType::Underlined)),
            ("mod+`", HotkeyAction::ToggleMark(MarkType::Code)),
            ("enter", HotkeyAction::Enter),
            ("tab", HotkeyAction::Tab),
        ];
        let mut bindings = Vec::with_capacity(specs.len());
        for (spec, action) in specs {
            bindings.push((Hotkey::parse_for(spec, platform)?, action));
        }
        Ok(Self { bindings })
    }

    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, hotkey: Hotkey, action: HotkeyAction) -> Self {
        self.bindings.push((hotkey, action));
        self
    }

    pub fn resolve(&self, event: &KeyEvent) -> Option<HotkeyAction> {
        self.bindings
            .iter()
            .find(|(hotkey, _)| hotkey.matches(event))
            .map(|(_, action)| *action)
    }
}

impl Default for HotkeyMap {
    fn default() -> Self {
        Self::for_platform(Platform::current()).unwrap_or_else(|_| Self::empty())
    }
}
