//! Topics and Response Styles
//!
//! The assistant is scoped to one of four programming contexts at a time.
//! [`Topic::ALL`] fixes their order; the guard relies on it for tie-breaks
//! and the UI lists topics in the same order.

use std::fmt;
use std::str::FromStr;

/// A supported programming context
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Python
    #[default]
    Python,
    /// C++
    Cpp,
    /// Arduino sketches
    Arduino,
    /// Raspberry Pi projects
    RaspberryPi,
}

impl Topic {
    /// Every topic, in enumeration order
    pub const ALL: [Topic; 4] = [
        Topic::Python,
        Topic::Cpp,
        Topic::Arduino,
        Topic::RaspberryPi,
    ];

    /// Name shown in the UI and matched by the guard
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Cpp => "C++",
            Self::Arduino => "Arduino",
            Self::RaspberryPi => "Raspberry Pi",
        }
    }

    /// Position in [`Topic::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Python => 0,
            Self::Cpp => 1,
            Self::Arduino => 2,
            Self::RaspberryPi => 3,
        }
    }

    /// Next topic, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous topic, wrapping around
    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// All topics except `self`, in enumeration order
    pub fn others(self) -> impl Iterator<Item = Topic> {
        Self::ALL.into_iter().filter(move |t| *t != self)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.display_name().eq_ignore_ascii_case(wanted))
            .or(match wanted.to_ascii_lowercase().as_str() {
                "cpp" => Some(Self::Cpp),
                "raspberrypi" | "raspberry-pi" | "rpi" => Some(Self::RaspberryPi),
                _ => None,
            })
            .ok_or_else(|| format!("unknown topic '{wanted}'"))
    }
}

/// Sampling temperature preset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResponseStyle {
    /// Low temperature, focused answers
    Precise,
    /// Middle ground
    #[default]
    Balanced,
    /// High temperature, more varied answers
    Exploratory,
}

impl ResponseStyle {
    /// Every style, in UI order
    pub const ALL: [ResponseStyle; 3] = [
        ResponseStyle::Precise,
        ResponseStyle::Balanced,
        ResponseStyle::Exploratory,
    ];

    /// Temperature sent with the completion request
    #[must_use]
    pub fn temperature(self) -> f32 {
        match self {
            Self::Precise => 0.2,
            Self::Balanced => 0.5,
            Self::Exploratory => 0.8,
        }
    }

    /// Short name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Precise => "Precise",
            Self::Balanced => "Balanced",
            Self::Exploratory => "Exploratory",
        }
    }

    /// Label shown in the style selector, e.g. `Balanced (0.5)`
    #[must_use]
    pub fn label(self) -> String {
        format!("{} ({:.1})", self.name(), self.temperature())
    }

    /// Next style, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Precise => Self::Balanced,
            Self::Balanced => Self::Exploratory,
            Self::Exploratory => Self::Precise,
        }
    }
}

impl fmt::Display for ResponseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for ResponseStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown response style '{wanted}'"))
    }
}
