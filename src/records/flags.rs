//! Performance badges and the image file names that mark them.
//!
//! The portal shows badges only as icons, so detection is a substring match of each icon's
//! `src` against [`FLAG_MARKERS`]. When the upstream renames an icon, edit the table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "fullCombo")]
    FullCombo,
    #[serde(rename = "fullCombo+")]
    FullComboPlus,
    #[serde(rename = "allPerfect")]
    AllPerfect,
    #[serde(rename = "allPerfect+")]
    AllPerfectPlus,
    #[serde(rename = "syncPlay")]
    SyncPlay,
    #[serde(rename = "fullSync")]
    FullSync,
    #[serde(rename = "fullSync+")]
    FullSyncPlus,
    #[serde(rename = "fullSyncDX")]
    FullSyncDx,
    #[serde(rename = "fullSyncDX+")]
    FullSyncDxPlus,
}

/// `Flag -> icon file name` table.
///
/// No marker is a substring of another, so an icon maps to at most one flag.
pub const FLAG_MARKERS: &[(Flag, &str)] = &[
    (Flag::FullCombo, "fc.png"),
    (Flag::FullComboPlus, "fcp.png"),
    (Flag::AllPerfect, "ap.png"),
    (Flag::AllPerfectPlus, "app.png"),
    (Flag::SyncPlay, "sync.png"),
    (Flag::FullSync, "fs.png"),
    (Flag::FullSyncPlus, "fsp.png"),
    (Flag::FullSyncDx, "fsd.png"),
    (Flag::FullSyncDxPlus, "fsdp.png"),
];

impl Flag {
    /// Wire name, e.g. `fullSyncDX+`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullCombo => "fullCombo",
            Self::FullComboPlus => "fullCombo+",
            Self::AllPerfect => "allPerfect",
            Self::AllPerfectPlus => "allPerfect+",
            Self::SyncPlay => "syncPlay",
            Self::FullSync => "fullSync",
            Self::FullSyncPlus => "fullSync+",
            Self::FullSyncDx => "fullSyncDX",
            Self::FullSyncDxPlus => "fullSyncDX+",
        }
    }

    /// Icon file name fragment for this flag.
    #[must_use]
    pub fn marker(self) -> &'static str {
        FLAG_MARKERS
            .iter()
            .find(|(flag, _)| *flag == self)
            .map_or("", |(_, marker)| *marker)
    }

    /// The flag an icon `src` stands for, if any.
    #[must_use]
    pub fn from_icon_src(src: &str) -> Option<Self> {
        FLAG_MARKERS
            .iter()
            .find(|(_, marker)| src.contains(marker))
            .map(|(flag, _)| *flag)
    }
}
