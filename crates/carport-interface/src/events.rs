//! Button events and notifications.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    AccelCruise,
    DecelCruise,
    Cancel,
    AltButton,
    Unknown,
}

/// A press or release edge of a cruise button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonEvent {
    pub kind: ButtonKind,
    pub pressed: bool,
}

impl ButtonEvent {
    pub const fn press(kind: ButtonKind) -> Self {
        Self {
            kind,
            pressed: true,
        }
    }

    pub const fn release(kind: ButtonKind) -> Self {
        Self {
            kind,
            pressed: false,
        }
    }
}

/// Button events of one cycle. The bus exposes a single button code at a
/// time, so a cycle holds at most one edge.
pub type ButtonEvents = heapless::Vec<ButtonEvent, 1>;

/// Safety and control conditions raised for the generic event pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Notification {
    BelowEngageSpeed,
    ParkBrake,
    ResumeRequired,
    ControllerFaulted,
    BelowSteerSpeed,
    ButtonEnable,
    ButtonCancel,
}

impl Notification {
    pub const ALL: [Notification; 7] = [
        Notification::BelowEngageSpeed,
        Notification::ParkBrake,
        Notification::ResumeRequired,
        Notification::ControllerFaulted,
        Notification::BelowSteerSpeed,
        Notification::ButtonEnable,
        Notification::ButtonCancel,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BelowEngageSpeed => "below_engage_speed",
            Self::ParkBrake => "park_brake",
            Self::ResumeRequired => "resume_required",
            Self::ControllerFaulted => "controller_faulted",
            Self::BelowSteerSpeed => "below_steer_speed",
            Self::ButtonEnable => "button_enable",
            Self::ButtonCancel => "button_cancel",
        };
        f.write_str(name)
    }
}

/// Notifications of one cycle, with set semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Notification>", into = "Vec<Notification>")]
pub struct NotificationSet(u8);

impl NotificationSet {
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, notification: Notification) {
        self.0 |= notification.bit();
    }

    pub fn contains(self, notification: Notification) -> bool {
        self.0 & notification.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Notification> {
        Notification::ALL
            .into_iter()
            .filter(move |n| self.contains(*n))
    }
}

impl FromIterator<Notification> for NotificationSet {
    fn from_iter<I: IntoIterator<Item = Notification>>(iter: I) -> Self {
        let mut set = Self::new();
        for notification in iter {
            set.insert(notification);
        }
        set
    }
}

impl From<Vec<Notification>> for NotificationSet {
    fn from(list: Vec<Notification>) -> Self {
        list.into_iter().collect()
    }
}

impl From<NotificationSet> for Vec<Notification> {
    fn from(set: NotificationSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for NotificationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, notification) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{notification}")?;
        }
        f.write_str("}")
    }
}
