//! Machine boilerplate profiles.
//!
//! Each supported controller family contributes a fixed header and footer
//! block plus its tool-on/tool-off commands. The set is closed: profiles are
//! selected by name once per run, and an unknown name falls back to
//! [`MachineKind::Grbl`].

use crate::error::{ProfileError, ProfileResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The supported machine families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineKind {
    /// CNC machines running the Grbl controller
    #[default]
    Grbl,
    /// 3D printers running Marlin, used with a pen in place of the extruder
    Marlin,
    /// Machines driven by LinuxCNC
    LinuxCnc,
    /// Pen plotters
    Plotter,
    /// Laser engravers
    Laser,
}

impl MachineKind {
    /// Every machine profile, in listing order.
    pub const ALL: [MachineKind; 5] = [
        MachineKind::Grbl,
        MachineKind::Marlin,
        MachineKind::LinuxCnc,
        MachineKind::Plotter,
        MachineKind::Laser,
    ];

    /// The lowercase name used on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Grbl => "grbl",
            Self::Marlin => "marlin",
            Self::LinuxCnc => "linuxcnc",
            Self::Plotter => "plotter",
            Self::Laser => "laser",
        }
    }

    /// The immutable profile data for this machine.
    pub fn profile(&self) -> &'static MachineProfile {
        match self {
            Self::Grbl => &GRBL,
            Self::Marlin => &MARLIN,
            Self::LinuxCnc => &LINUXCNC,
            Self::Plotter => &PLOTTER,
            Self::Laser => &LASER,
        }
    }

    /// Resolve a machine name, falling back to the default machine.
    ///
    /// Unknown names never fail; they log a warning and select Grbl.
    pub fn resolve(name: &str) -> MachineKind {
        match name.parse() {
            Ok(kind) => kind,
            Err(err) => {
                let fallback = MachineKind::default();
                tracing::warn!("{}. Using {} instead.", err, fallback.profile().name);
                fallback
            }
        }
    }
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for MachineKind {
    type Err = ProfileError;

    fn from_str(s: &str) -> ProfileResult<Self> {
        let wanted = s.trim().to_lowercase();
        MachineKind::ALL
            .into_iter()
            .find(|kind| kind.key() == wanted)
            .ok_or_else(|| ProfileError::UnknownMachine(s.to_string()))
    }
}

/// Fixed G-code boilerplate for one machine family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineProfile {
    /// Human readable machine name
    pub name: &'static str,
    /// One-line description shown by `--list-machines`
    pub description: &'static str,
    /// Lines emitted before the first contour
    pub header: &'static [&'static str],
    /// Lines emitted after the last contour
    pub footer: &'static [&'static str],
    /// Command that engages the tool (spindle, pen, laser)
    pub tool_on: &'static str,
    /// Command that disengages the tool
    pub tool_off: &'static str,
    /// Operator reminders printed after a successful conversion
    pub notes: &'static [&'static str],
}

impl MachineProfile {
    /// The program-end command word of the footer (`M30`, `M2`, ...).
    pub fn program_end(&self) -> Option<&'static str> {
        self.footer
            .last()
            .and_then(|line| line.split_whitespace().next())
    }
}

static GRBL: MachineProfile = MachineProfile {
    name: "Grbl CNC",
    description: "CNC machines with a Grbl controller",
    header: &[
        "; Configuration for Grbl CNC",
        "G21 ; Units in millimeters",
        "G90 ; Absolute positioning",
        "G17 ; XY plane",
        "$H ; Home all axes (optional)",
        "G0 Z5.0 ; Safe height",
        "M3 S1000 ; Spindle on",
        "G4 P2 ; Pause 2 seconds",
    ],
    footer: &[
        "G0 Z5.0 ; Raise to safe height",
        "G0 X0 Y0 ; Return to origin",
        "M5 ; Spindle off",
        "M30 ; End of program",
    ],
    tool_on: "M3 S1000",
    tool_off: "M5",
    notes: &[],
};

static MARLIN: MachineProfile = MachineProfile {
    name: "Marlin 3D Printer",
    description: "3D printers with Marlin firmware (drawing mode)",
    header: &[
        "; Configuration for Marlin 3D printer (drawing mode)",
        "G21 ; Units in millimeters",
        "G90 ; Absolute positioning",
        "M82 ; Absolute extruder mode",
        "G28 ; Home all axes",
        "M104 S0 ; Hotend off",
        "M140 S0 ; Bed off",
        "M107 ; Fan off",
        "G0 Z5.0 F3000 ; Safe height",
        "; Note: replace the extruder with a pen or marker",
    ],
    footer: &[
        "G0 Z10.0 ; Raise pen",
        "G28 X Y ; Home X and Y",
        "M84 ; Motors off",
        "M30 ; End of program",
    ],
    tool_on: "M3 S1000",
    tool_off: "M5",
    notes: &["Make sure the extruder has been replaced with a pen or marker"],
};

static LINUXCNC: MachineProfile = MachineProfile {
    name: "LinuxCNC",
    description: "CNC machines driven by LinuxCNC",
    header: &[
        "; Configuration for LinuxCNC",
        "G21 ; Units in millimeters",
        "G90 ; Absolute positioning",
        "G17 ; XY plane",
        "G64 P0.01 ; Path blending tolerance",
        "G0 Z5.0 ; Safe height",
        "M3 S1000 ; Spindle on",
        "G4 P2 ; Pause 2 seconds",
    ],
    footer: &[
        "G0 Z5.0 ; Raise to safe height",
        "G0 X0 Y0 ; Return to origin",
        "M5 ; Spindle off",
        "M2 ; End of program",
    ],
    tool_on: "M3 S1000",
    tool_off: "M5",
    notes: &[],
};

static PLOTTER: MachineProfile = MachineProfile {
    name: "Pen Plotter",
    description: "Pen plotters",
    header: &[
        "; Configuration for pen plotter",
        "G21 ; Units in millimeters",
        "G90 ; Absolute positioning",
        "G28 ; Home",
        "G0 Z1.0 ; Raise pen",
        "; M3 = pen down, M5 = pen up",
    ],
    footer: &[
        "M5 ; Raise pen",
        "G0 X0 Y0 ; Return to origin",
        "M30 ; End of program",
    ],
    tool_on: "M3 S100",
    tool_off: "M5",
    notes: &[],
};

static LASER: MachineProfile = MachineProfile {
    name: "Laser Engraver",
    description: "Laser engravers (grayscale mode)",
    header: &[
        "; Configuration for laser engraver",
        "; WARNING: wear eye protection",
        "G21 ; Units in millimeters",
        "G90 ; Absolute positioning",
        "G28 ; Home",
        "G0 Z0 ; Working height",
        "M5 ; Laser off",
        "; Laser power is controlled with S (0-1000)",
    ],
    footer: &[
        "M5 ; Laser off",
        "G0 X0 Y0 ; Return to origin",
        "M30 ; End of program",
    ],
    tool_on: "M3 S1000",
    tool_off: "M5",
    notes: &["WARNING: wear eye protection when running a laser"],
};
