//! Built-in exercise seed set shipped with the app.

use super::model::{EquipmentCategory as Cat, ExerciseCatalogEntry, MuscleGroup as Mg};

type Seed = (&'static str, &'static str, Mg, Cat, &'static str);

const BUILTIN: &[Seed] = &[
    // Chest
    ("ex_1", "Bench Press", Mg::Chest, Cat::Barbell, "Classic chest exercise with barbell"),
    ("ex_2", "Incline Bench Press", Mg::Chest, Cat::Barbell, "Upper chest focused press"),
    ("ex_3", "Dumbbell Chest Press", Mg::Chest, Cat::Dumbbell, "Dumbbell variation of bench press"),
    ("ex_4", "Incline Dumbbell Press", Mg::Chest, Cat::Dumbbell, "Incline dumbbell chest press"),
    ("ex_5", "Cable Chest Fly", Mg::Chest, Cat::Cable, "Cable crossover fly for chest"),
    ("ex_6", "Dumbbell Fly", Mg::Chest, Cat::Dumbbell, "Flat dumbbell fly for chest isolation"),
    ("ex_7", "Push-Ups", Mg::Chest, Cat::Bodyweight, "Bodyweight chest exercise"),
    ("ex_8", "Chest Dips", Mg::Chest, Cat::Bodyweight, "Dips targeting chest muscles"),
    ("ex_9", "Machine Chest Press", Mg::Chest, Cat::Machine, "Machine based chest press"),
    ("ex_10", "Pec Deck", Mg::Chest, Cat::Machine, "Machine fly for chest isolation"),
    // Back
    ("ex_11", "Deadlift", Mg::Back, Cat::Barbell, "Full body compound lift"),
    ("ex_12", "Barbell Row", Mg::Back, Cat::Barbell, "Bent over barbell row"),
    ("ex_13", "Pull-Ups", Mg::Back, Cat::Bodyweight, "Bodyweight pull-up exercise"),
    ("ex_14", "Lat Pulldown", Mg::Back, Cat::Cable, "Cable lat pulldown"),
    ("ex_15", "Seated Cable Row", Mg::Back, Cat::Cable, "Seated cable row for back"),
    ("ex_16", "Dumbbell Row", Mg::Back, Cat::Dumbbell, "One arm dumbbell row"),
    ("ex_17", "T-Bar Row", Mg::Back, Cat::Barbell, "T-bar row for mid back"),
    ("ex_18", "Face Pulls", Mg::Back, Cat::Cable, "Cable face pulls for rear delts/upper back"),
    ("ex_19", "Chin-Ups", Mg::Back, Cat::Bodyweight, "Underhand grip pull-ups"),
    // Shoulders
    ("ex_20", "Overhead Press", Mg::Shoulders, Cat::Barbell, "Standing barbell overhead press"),
    ("ex_21", "Dumbbell Shoulder Press", Mg::Shoulders, Cat::Dumbbell, "Seated dumbbell shoulder press"),
    ("ex_22", "Lateral Raises", Mg::Shoulders, Cat::Dumbbell, "Dumbbell lateral raises"),
    ("ex_23", "Front Raises", Mg::Shoulders, Cat::Dumbbell, "Dumbbell front raises"),
    ("ex_24", "Rear Delt Fly", Mg::Shoulders, Cat::Dumbbell, "Rear deltoid fly"),
    ("ex_25", "Arnold Press", Mg::Shoulders, Cat::Dumbbell, "Rotating dumbbell press"),
    ("ex_26", "Cable Lateral Raise", Mg::Shoulders, Cat::Cable, "Cable lateral raises"),
    // Biceps
    ("ex_27", "Barbell Curl", Mg::Biceps, Cat::Barbell, "Standing barbell bicep curl"),
    ("ex_28", "Dumbbell Curl", Mg::Biceps, Cat::Dumbbell, "Standing dumbbell bicep curl"),
    ("ex_29", "Hammer Curl", Mg::Biceps, Cat::Dumbbell, "Neutral grip dumbbell curl"),
    ("ex_30", "Preacher Curl", Mg::Biceps, Cat::Barbell, "Preacher bench bicep curl"),
    ("ex_31", "Cable Curl", Mg::Biceps, Cat::Cable, "Cable bicep curl"),
    ("ex_32", "Incline Dumbbell Curl", Mg::Biceps, Cat::Dumbbell, "Incline bench dumbbell curl"),
    // Triceps
    ("ex_33", "Tricep Pushdown", Mg::Triceps, Cat::Cable, "Cable tricep pushdown"),
    ("ex_34", "Overhead Tricep Extension", Mg::Triceps, Cat::Dumbbell, "Overhead dumbbell tricep extension"),
    ("ex_35", "Skull Crushers", Mg::Triceps, Cat::Barbell, "Lying tricep extension"),
    ("ex_36", "Close Grip Bench Press", Mg::Triceps, Cat::Barbell, "Close grip barbell bench press"),
    ("ex_37", "Tricep Dips", Mg::Triceps, Cat::Bodyweight, "Bodyweight tricep dips"),
    ("ex_38", "Cable Overhead Extension", Mg::Triceps, Cat::Cable, "Cable overhead tricep extension"),
    // Legs
    ("ex_39", "Squat", Mg::Legs, Cat::Barbell, "Barbell back squat"),
    ("ex_40", "Front Squat", Mg::Legs, Cat::Barbell, "Barbell front squat"),
    ("ex_41", "Leg Press", Mg::Legs, Cat::Machine, "Machine leg press"),
    ("ex_42", "Romanian Deadlift", Mg::Legs, Cat::Barbell, "Romanian deadlift for hamstrings"),
    ("ex_43", "Leg Extension", Mg::Legs, Cat::Machine, "Machine leg extension"),
    ("ex_44", "Leg Curl", Mg::Legs, Cat::Machine, "Machine leg curl"),
    ("ex_45", "Lunges", Mg::Legs, Cat::Dumbbell, "Walking or stationary lunges"),
    ("ex_46", "Bulgarian Split Squat", Mg::Legs, Cat::Dumbbell, "Bulgarian split squat"),
    ("ex_47", "Calf Raises", Mg::Legs, Cat::Machine, "Machine calf raises"),
    ("ex_48", "Hack Squat", Mg::Legs, Cat::Machine, "Machine hack squat"),
    // Glutes
    ("ex_49", "Hip Thrust", Mg::Glutes, Cat::Barbell, "Barbell hip thrust"),
    ("ex_50", "Glute Bridge", Mg::Glutes, Cat::Bodyweight, "Bodyweight glute bridge"),
    ("ex_51", "Cable Kickback", Mg::Glutes, Cat::Cable, "Cable glute kickback"),
    ("ex_52", "Sumo Deadlift", Mg::Glutes, Cat::Barbell, "Sumo stance deadlift"),
    // Abs
    ("ex_53", "Crunches", Mg::Abs, Cat::Bodyweight, "Basic crunches"),
    ("ex_54", "Plank", Mg::Abs, Cat::Bodyweight, "Plank hold for core stability"),
    ("ex_55", "Hanging Leg Raise", Mg::Abs, Cat::Bodyweight, "Hanging leg raises for lower abs"),
    ("ex_56", "Cable Crunch", Mg::Abs, Cat::Cable, "Cable crunch for abs"),
    ("ex_57", "Russian Twist", Mg::Abs, Cat::Bodyweight, "Russian twist for obliques"),
    ("ex_58", "Ab Wheel Rollout", Mg::Abs, Cat::Other, "Ab wheel rollout"),
    // Cardio
    ("ex_59", "Treadmill Running", Mg::Cardio, Cat::Cardio, "Running on treadmill"),
    ("ex_60", "Cycling", Mg::Cardio, Cat::Cardio, "Stationary bike cycling"),
    ("ex_61", "Rowing Machine", Mg::Cardio, Cat::Cardio, "Rowing machine cardio"),
    ("ex_62", "Stair Climber", Mg::Cardio, Cat::Cardio, "Stair climber machine"),
    ("ex_63", "Jump Rope", Mg::Cardio, Cat::Cardio, "Jump rope cardio"),
    ("ex_64", "Elliptical", Mg::Cardio, Cat::Cardio, "Elliptical trainer"),
];

/// The immutable built-in seed set. Custom entries are layered on top by the
/// store; ids are stable so logged sessions keep resolving after app updates.
pub fn builtin_catalog() -> Vec<ExerciseCatalogEntry> {
    BUILTIN
        .iter()
        .map(|(id, name, muscle_group, category, description)| ExerciseCatalogEntry {
            id: (*id).to_string(),
            name: (*name).to_string(),
            muscle_group: *muscle_group,
            category: *category,
            is_custom: false,
            description: Some((*description).to_string()),
            instructions: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_unique_ids_and_no_custom_entries() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 64);
        let mut ids: Vec<_> = catalog.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
        assert!(catalog.iter().all(|e| !e.is_custom));
    }
}
