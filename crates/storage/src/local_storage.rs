use std::{collections::VecDeque, sync::Mutex};

use chrono::NaiveDate;
use fitlog_app::{Settings, SettingsRepository, log};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use fitlog_domain as domain;

use crate::{Key, KeyValueStore, StoreError};

/// Repositories persisted as one JSON list per kind of entry in a [`KeyValueStore`].
pub struct LocalStorage<S> {
    store: S,
    lock: Mutex<()>,
}

impl<S: KeyValueStore> LocalStorage<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned + Default>(&self, key: Key) -> Result<T, domain::StorageError> {
        match self.store.get(key.as_ref()) {
            Ok(value) => Ok(value),
            Err(StoreError::KeyNotFound(_)) => Ok(T::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn write<T: Serialize>(&self, key: Key, value: &T) -> Result<(), domain::StorageError> {
        Ok(self.store.set(key.as_ref(), value)?)
    }

    /// Read, change and write back the value of `key` while holding the write lock.
    ///
    /// Nothing is written if `f` fails.
    fn modify<T, R, E>(&self, key: Key, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned + Default,
        E: From<domain::StorageError>,
    {
        let _guard = self.lock.lock().map_err(|_| {
            domain::StorageError::Unavailable("storage lock poisoned".to_string())
        })?;
        let mut value = self.read::<T>(key)?;
        let result = f(&mut value)?;
        self.write(key, &value)?;
        Ok(result)
    }
}

impl<S: KeyValueStore> domain::WeightRepository for LocalStorage<S> {
    async fn read_weight_entries(&self) -> Result<Vec<domain::WeightEntry>, domain::ReadError> {
        let mut entries = self
            .read::<Vec<WeightEntry>>(Key::WeightEntries)?
            .into_iter()
            .map(domain::WeightEntry::from)
            .collect::<Vec<_>>();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    async fn create_weight_entry(
        &self,
        entry: domain::WeightEntry,
    ) -> Result<domain::WeightEntry, domain::CreateError> {
        self.modify(Key::WeightEntries, |entries: &mut Vec<WeightEntry>| {
            if entries.iter().any(|e| e.date == entry.date) {
                return Err(domain::CreateError::Conflict);
            }
            entries.push(WeightEntry::from(&entry));
            Ok(entry)
        })
    }

    async fn replace_weight_entry(
        &self,
        entry: domain::WeightEntry,
    ) -> Result<domain::WeightEntry, domain::UpdateError> {
        self.modify(Key::WeightEntries, |entries: &mut Vec<WeightEntry>| {
            let stored = entries
                .iter_mut()
                .find(|e| e.date == entry.date)
                .ok_or(domain::UpdateError::Conflict)?;
            *stored = WeightEntry::from(&entry);
            Ok(entry)
        })
    }

    async fn delete_weight_entry(&self, date: NaiveDate) -> Result<NaiveDate, domain::DeleteError> {
        self.modify(Key::WeightEntries, |entries: &mut Vec<WeightEntry>| {
            entries.retain(|e| e.date != date);
            Ok(date)
        })
    }
}

impl<S: KeyValueStore> domain::WorkoutRepository for LocalStorage<S> {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self
            .read::<Vec<Workout>>(Key::Workouts)?
            .into_iter()
            .map(domain::Workout::from)
            .collect())
    }

    async fn create_workout(
        &self,
        date: NaiveDate,
        activity: domain::WorkoutActivity,
        duration_minutes: u32,
        calories_burned: i32,
    ) -> Result<domain::Workout, domain::CreateError> {
        let workout = domain::Workout {
            id: Uuid::new_v4().into(),
            date,
            activity,
            duration_minutes,
            calories_burned,
        };
        self.modify(Key::Workouts, |workouts: &mut Vec<Workout>| {
            workouts.push(Workout::from(&workout));
            Ok(workout)
        })
    }

    async fn replace_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        self.modify(Key::Workouts, |workouts: &mut Vec<Workout>| {
            let stored = workouts
                .iter_mut()
                .find(|w| w.id == *workout.id)
                .ok_or(domain::UpdateError::Conflict)?;
            *stored = Workout::from(&workout);
            Ok(workout)
        })
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.modify(Key::Workouts, |workouts: &mut Vec<Workout>| {
            workouts.retain(|w| w.id != *id);
            Ok(id)
        })
    }
}

impl<S: KeyValueStore> domain::MealRepository for LocalStorage<S> {
    async fn read_meals(&self) -> Result<Vec<domain::Meal>, domain::ReadError> {
        self.read::<Vec<Meal>>(Key::Meals)?
            .into_iter()
            .map(|m| {
                domain::Meal::try_from(m).map_err(|err| domain::ReadError::Other(Box::new(err)))
            })
            .collect()
    }

    async fn create_meal(
        &self,
        date: NaiveDate,
        name: domain::MealName,
        nutrition: domain::Nutrition,
    ) -> Result<domain::Meal, domain::CreateError> {
        let meal = domain::Meal {
            id: Uuid::new_v4().into(),
            date,
            name,
            nutrition,
        };
        self.modify(Key::Meals, |meals: &mut Vec<Meal>| {
            meals.push(Meal::from(&meal));
            Ok(meal)
        })
    }

    async fn replace_meal(&self, meal: domain::Meal) -> Result<domain::Meal, domain::UpdateError> {
        self.modify(Key::Meals, |meals: &mut Vec<Meal>| {
            let stored = meals
                .iter_mut()
                .find(|m| m.id == *meal.id)
                .ok_or(domain::UpdateError::Conflict)?;
            *stored = Meal::from(&meal);
            Ok(meal)
        })
    }

    async fn delete_meal(&self, id: domain::MealID) -> Result<domain::MealID, domain::DeleteError> {
        self.modify(Key::Meals, |meals: &mut Vec<Meal>| {
            meals.retain(|m| m.id != *id);
            Ok(id)
        })
    }
}

impl<S: KeyValueStore> SettingsRepository for LocalStorage<S> {
    async fn read_settings(&self) -> Result<Settings, domain::ReadError> {
        Ok(self.read(Key::Settings)?)
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), domain::UpdateError> {
        Ok(self.write(Key::Settings, &settings)?)
    }
}

impl<S: KeyValueStore> log::Repository for LocalStorage<S> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.read(Key::Log)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        self.modify(Key::Log, |entries: &mut VecDeque<log::Entry>| {
            log::push_entry(entries, entry);
            Ok::<(), domain::StorageError>(())
        })
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub weight: f32,
}

impl From<&domain::WeightEntry> for WeightEntry {
    fn from(value: &domain::WeightEntry) -> Self {
        Self {
            date: value.date,
            weight: value.weight,
        }
    }
}

impl From<WeightEntry> for domain::WeightEntry {
    fn from(value: WeightEntry) -> Self {
        Self {
            date: value.date,
            weight: value.weight,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub date: NaiveDate,
    pub activity: String,
    pub duration_minutes: u32,
    pub calories_burned: i32,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            activity: value.activity.to_string(),
            duration_minutes: value.duration_minutes,
            calories_burned: value.calories_burned,
        }
    }
}

impl From<Workout> for domain::Workout {
    fn from(value: Workout) -> Self {
        Self {
            id: value.id.into(),
            date: value.date,
            activity: domain::WorkoutActivity::from(value.activity.as_str()),
            duration_minutes: value.duration_minutes,
            calories_burned: value.calories_burned,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    pub calories: u32,
    pub protein_g: f32,
    pub carbs_g: f32,
    pub fat_g: f32,
}

impl From<&domain::Meal> for Meal {
    fn from(value: &domain::Meal) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            name: value.name.to_string(),
            calories: value.nutrition.calories,
            protein_g: value.nutrition.protein_g,
            carbs_g: value.nutrition.carbs_g,
            fat_g: value.nutrition.fat_g,
        }
    }
}

impl TryFrom<Meal> for domain::Meal {
    type Error = domain::MealNameError;

    fn try_from(value: Meal) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            date: value.date,
            name: domain::MealName::new(&value.name)?,
            nutrition: domain::Nutrition {
                calories: value.calories,
                protein_g: value.protein_g,
                carbs_g: value.carbs_g,
                fat_g: value.fat_g,
            },
        })
    }
}
