//! NPC selection — the four closed choice lists that drive the prompt.
//!
//! DESIGN
//! ======
//! Every field is a fieldless enum, so a `Selection` can only ever hold a
//! value from its list. Form input arrives as loose strings; `apply_form`
//! parses each one by label and leaves the field untouched when the value
//! is not in the list.

use serde::{Deserialize, Serialize};

// =============================================================================
// CHOICE TRAIT
// =============================================================================

/// A closed list of user-facing options.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// Human-readable label, also used as the wire value.
    fn label(self) -> &'static str;

    /// Parse an option from its exact label.
    fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == raw)
    }

    /// All labels in display order.
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            #[default]
            $first:ident => $first_label:literal,
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            #[default]
            #[serde(rename = $first_label)]
            $first,
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[Self::$first, $(Self::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    Self::$first => $first_label,
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice_enum! {
    /// Setting the NPC belongs to.
    Genre {
        #[default]
        HighFantasy => "High Fantasy",
        Cyberpunk => "Cyberpunk",
        CosmicHorror => "Cosmic Horror",
        SpaceOpera => "Space Opera",
        ModernNoir => "Modern Noir",
    }
}

choice_enum! {
    /// Role the NPC plays in the world.
    Archetype {
        #[default]
        Shopkeeper => "Shopkeeper",
        CityGuard => "City Guard",
        QuestGiver => "Quest Giver",
        DrunkPatron => "Drunk Patron",
        CorruptOfficial => "Corrupt Official",
        Cultist => "Cultist",
    }
}

choice_enum! {
    /// Gender identity hint for naming and voice.
    Gender {
        #[default]
        Any => "Any/Random",
        Male => "Male",
        Female => "Female",
        NonBinary => "Non-Binary",
    }
}

choice_enum! {
    /// Disposition toward the player. Ordered from warmest to most afraid.
    Mood {
        #[default]
        Friendly => "Friendly",
        Neutral => "Neutral",
        Suspicious => "Suspicious",
        Hostile => "Hostile",
        Terrified => "Terrified",
    }
}

impl Mood {
    /// Position on the slider scale (0 = Friendly).
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or_default()
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Accepts either a slider position (`"2"`) or a label (`"Suspicious"`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.parse::<usize>() {
            Ok(index) => Self::from_index(index),
            Err(_) => Self::from_label(raw),
        }
    }
}

// =============================================================================
// SELECTION
// =============================================================================

/// The four-field choice tuple that drives prompt content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub genre: Genre,
    pub archetype: Archetype,
    pub gender: Gender,
    pub mood: Mood,
}

/// Raw selection fields as submitted by the page form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionForm {
    pub genre: Option<String>,
    pub archetype: Option<String>,
    pub gender: Option<String>,
    pub mood: Option<String>,
}

impl Selection {
    /// Apply submitted form values. Missing or unknown values keep the
    /// current choice. Returns the names of rejected fields.
    pub fn apply_form(&mut self, form: &SelectionForm) -> Vec<&'static str> {
        let mut rejected = Vec::new();

        if let Some(raw) = form.genre.as_deref() {
            match Genre::from_label(raw) {
                Some(genre) => self.genre = genre,
                None => rejected.push("genre"),
            }
        }
        if let Some(raw) = form.archetype.as_deref() {
            match Archetype::from_label(raw) {
                Some(archetype) => self.archetype = archetype,
                None => rejected.push("archetype"),
            }
        }
        if let Some(raw) = form.gender.as_deref() {
            match Gender::from_label(raw) {
                Some(gender) => self.gender = gender,
                None => rejected.push("gender"),
            }
        }
        if let Some(raw) = form.mood.as_deref() {
            match Mood::parse(raw) {
                Some(mood) => self.mood = mood,
                None => rejected.push("mood"),
            }
        }

        rejected
    }
}

/// Option lists for every control, in display order.
#[derive(Debug, Serialize)]
pub struct SelectionOptions {
    pub genres: Vec<&'static str>,
    pub archetypes: Vec<&'static str>,
    pub genders: Vec<&'static str>,
    pub moods: Vec<&'static str>,
}

impl SelectionOptions {
    #[must_use]
    pub fn all() -> Self {
        Self {
            genres: Genre::labels(),
            archetypes: Archetype::labels(),
            genders: Gender::labels(),
            moods: Mood::labels(),
        }
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
