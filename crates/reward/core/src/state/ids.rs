use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident($inner:ty), $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Hero (visiting actor) instance on the adventure map.
    HeroId(u32),
    "hero"
);
id_type!(
    /// Player color owning heroes and resources.
    PlayerId(u8),
    "player"
);
id_type!(
    /// Team grouping of players.
    TeamId(u8),
    "team"
);
id_type!(
    /// Map object instance.
    ObjectId(u32),
    "object"
);
id_type!(
    /// Map object kind. Bonuses granted by an object are tagged with its kind,
    /// not its instance.
    ObjectTypeId(u16),
    "object-type"
);
id_type!(CreatureId(u16), "creature");
id_type!(SpellId(u16), "spell");
id_type!(ArtifactId(u16), "artifact");
id_type!(SecondarySkillId(u16), "skill");
id_type!(
    /// Army slot index, `0..GameConfig::ARMY_SIZE`.
    SlotId(u8),
    "slot"
);

impl PlayerId {
    /// Unowned objects and heroes.
    pub const NEUTRAL: Self = Self(255);

    #[inline]
    pub const fn is_valid_player(self) -> bool {
        self.0 < 8
    }
}

impl SlotId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
