//! Prompt builder — renders a `Selection` into the NPC character-card prompt.

use crate::selection::Selection;

/// Build the instruction sent to the model for one NPC.
///
/// Pure: the same selection always yields the same string.
#[must_use]
pub fn build(selection: &Selection) -> String {
    format!(
        "You are a Game Design Assistant.\n\
         Generate a character card for a generic NPC.\n\
         \n\
         Context:\n\
         - Genre: {genre}\n\
         - Role: {archetype}\n\
         - Gender: {gender}\n\
         - Mood: {mood}\n\
         \n\
         Output Requirements:\n\
         1. Name: A generic name fitting the genre and gender.\n\
         2. Bio: A 1-sentence background.\n\
         3. Barks: Exactly 3 short lines of dialogue (under 10 words each) they shout if clicked.\n\
         4. Quest_Hook: 1 sentence hinting at a task.\n\
         \n\
         Format the output as clean labeled plain text. Do not use code blocks.\n",
        genre = selection.genre,
        archetype = selection.archetype,
        gender = selection.gender,
        mood = selection.mood,
    )
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
