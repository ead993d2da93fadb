use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientId, ExerciseId, ExerciseListId, ExerciseListName, ExerciseName, MediaUrl, Notes,
    SetCount,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseList {
    pub id: ExerciseListId,
    pub client_id: ClientId,
    pub name: ExerciseListName,
    pub description: String,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One prescribed exercise. Reps, weight and rest time are free text
/// ("8-12", "80kg", "90s").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: ExerciseName,
    pub description: String,
    pub sets: SetCount,
    pub reps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    pub rest_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<MediaUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<MediaUrl>,
    pub instructions: Notes,
}

impl Exercise {
    /// Creates an exercise with a fresh id and empty optional fields.
    #[must_use]
    pub fn new(name: ExerciseName, sets: SetCount, reps: impl Into<String>) -> Self {
        Self {
            id: ExerciseId::generate(),
            name,
            description: String::new(),
            sets,
            reps: reps.into().trim().to_string(),
            weight: None,
            rest_time: String::new(),
            image_url: None,
            video_url: None,
            instructions: Notes::default(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    /// Sets the load; blank input clears it.
    #[must_use]
    pub fn weight(mut self, weight: impl Into<String>) -> Self {
        let weight = weight.into().trim().to_string();
        self.weight = (!weight.is_empty()).then_some(weight);
        self
    }

    #[must_use]
    pub fn rest_time(mut self, rest_time: impl Into<String>) -> Self {
        self.rest_time = rest_time.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn image_url(mut self, url: MediaUrl) -> Self {
        self.image_url = Some(url);
        self
    }

    #[must_use]
    pub fn video_url(mut self, url: MediaUrl) -> Self {
        self.video_url = Some(url);
        self
    }

    #[must_use]
    pub fn instructions(mut self, notes: impl Into<Notes>) -> Self {
        self.instructions = notes.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewExerciseList {
    pub client_id: ClientId,
    pub name: ExerciseListName,
    pub description: String,
    pub exercises: Vec<Exercise>,
}

impl NewExerciseList {
    #[must_use]
    pub fn new(client_id: ClientId, name: ExerciseListName, exercises: Vec<Exercise>) -> Self {
        Self {
            client_id,
            name,
            description: String::new(),
            exercises,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    pub(crate) fn into_exercise_list(self, now: DateTime<Utc>) -> ExerciseList {
        ExerciseList {
            id: ExerciseListId::generate(),
            client_id: self.client_id,
            name: self.name,
            description: self.description,
            exercises: self.exercises,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of an exercise list. `exercises`, when set, replaces the
/// whole ordered sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateExerciseList {
    pub name: Option<ExerciseListName>,
    pub description: Option<String>,
    pub exercises: Option<Vec<Exercise>>,
}

impl UpdateExerciseList {
    #[must_use]
    pub fn name(mut self, name: ExerciseListName) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into().trim().to_string());
        self
    }

    #[must_use]
    pub fn exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = Some(exercises);
        self
    }

    pub fn apply_to(self, list: &mut ExerciseList, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            list.name = name;
        }
        if let Some(description) = self.description {
            list.description = description;
        }
        if let Some(exercises) = self.exercises {
            list.exercises = exercises;
        }
        list.updated_at = now;
    }
}
