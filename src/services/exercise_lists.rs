//! Creating and editing a client's exercise list from form input.

use crate::domain::exercise_list::{
    Exercise, ExerciseList, NewExerciseList, UpdateExerciseList,
};
use crate::domain::types::{
    ClientId, ExerciseId, ExerciseListId, ExerciseListName, ExerciseName, MediaUrl, SetCount,
};
use crate::repository::{ClientReader, ExerciseListWriter};
use crate::services::{ServiceError, ServiceResult};

/// One exercise row as typed into the editor. Rows with a blank name are
/// treated as unused and dropped.
#[derive(Clone, Debug, Default)]
pub struct ExerciseDraft {
    /// Present when editing an exercise that already exists.
    pub id: Option<ExerciseId>,
    pub name: String,
    pub description: String,
    pub sets: u32,
    pub reps: String,
    pub weight: String,
    pub rest_time: String,
    pub image_url: String,
    pub video_url: String,
    pub instructions: String,
}

impl ExerciseDraft {
    fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }

    fn into_exercise(self) -> ServiceResult<Exercise> {
        let mut exercise = Exercise::new(
            ExerciseName::new(self.name)?,
            SetCount::new(self.sets)?,
            self.reps,
        )
        .description(self.description)
        .weight(self.weight)
        .rest_time(self.rest_time)
        .instructions(self.instructions);

        if let Some(url) = optional_url(&self.image_url)? {
            exercise = exercise.image_url(url);
        }
        if let Some(url) = optional_url(&self.video_url)? {
            exercise = exercise.video_url(url);
        }
        if let Some(id) = self.id {
            exercise.id = id;
        }
        Ok(exercise)
    }
}

fn optional_url(raw: &str) -> ServiceResult<Option<MediaUrl>> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(MediaUrl::new(raw)?))
    }
}

#[derive(Clone, Debug)]
pub struct ExerciseListDraft {
    pub client_id: ClientId,
    pub name: String,
    pub description: String,
    pub exercises: Vec<ExerciseDraft>,
}

/// Creates the list, or replaces the contents of `existing` when given.
pub fn save_exercise_list<R>(
    repo: &mut R,
    existing: Option<&ExerciseListId>,
    draft: ExerciseListDraft,
) -> ServiceResult<ExerciseList>
where
    R: ClientReader + ExerciseListWriter + ?Sized,
{
    let name = ExerciseListName::new(draft.name)?;

    let exercises = draft
        .exercises
        .into_iter()
        .filter(|exercise| !exercise.is_blank())
        .map(ExerciseDraft::into_exercise)
        .collect::<ServiceResult<Vec<_>>>()?;

    if exercises.is_empty() {
        return Err(ServiceError::Form(
            "Add at least one exercise to the list".to_string(),
        ));
    }

    let Some(list_id) = existing else {
        if repo.get_client_by_id(&draft.client_id).is_none() {
            return Err(ServiceError::NotFound);
        }
        let new_list =
            NewExerciseList::new(draft.client_id, name, exercises).description(draft.description);
        return repo.add_exercise_list(new_list).map_err(|e| {
            log::error!("Failed to create exercise list: {e}");
            ServiceError::from(e)
        });
    };

    let current = repo
        .get_exercise_list_by_id(list_id)
        .ok_or(ServiceError::NotFound)?;
    if current.client_id != draft.client_id {
        return Err(ServiceError::Form(
            "The exercise list belongs to another client".to_string(),
        ));
    }

    let updates = UpdateExerciseList::default()
        .name(name)
        .description(draft.description)
        .exercises(exercises);

    repo.update_exercise_list(list_id, updates)
        .map_err(|e| {
            log::error!("Failed to update exercise list {list_id}: {e}");
            ServiceError::from(e)
        })?
        .ok_or(ServiceError::NotFound)
}
