use crate::models::{Dataset, ExperienceLevel, Student, StudentPreferences, TimeSlot, Tutor, Weekday};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn slot(day: Weekday, start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(day, start, end)
}

/// Demo tutors and students installed into an empty store on first start
pub fn sample_dataset() -> Dataset {
    Dataset::new(sample_tutors(), sample_students())
}

pub fn sample_tutors() -> Vec<Tutor> {
    vec![
        Tutor {
            id: "1".to_string(),
            full_name: "Ahmed Benali".to_string(),
            subjects: strings(&["Mathématiques", "Physique"]),
            levels: strings(&["Lycée", "Terminale"]),
            availability: vec![
                slot(Weekday::Lundi, "18:00", "20:00"),
                slot(Weekday::Mercredi, "16:00", "20:00"),
                slot(Weekday::Samedi, "10:00", "19:00"),
            ],
            experience: Some(5.0),
            rating: Some(4.8),
            bio: Some(
                "Professeur expérimenté en mathématiques et physique, spécialisé dans la préparation au baccalauréat."
                    .to_string(),
            ),
        },
        Tutor {
            id: "2".to_string(),
            full_name: "Sarah Martin".to_string(),
            subjects: strings(&["Physique", "Chimie"]),
            levels: strings(&["Collège", "Lycée"]),
            availability: vec![
                slot(Weekday::Mercredi, "14:00", "16:00"),
                slot(Weekday::Samedi, "10:00", "22:00"),
            ],
            experience: Some(3.0),
            rating: Some(4.5),
            bio: None,
        },
        Tutor {
            id: "3".to_string(),
            full_name: "Karim Alami".to_string(),
            subjects: strings(&["Français"]),
            levels: strings(&["Terminale"]),
            availability: vec![slot(Weekday::Lundi, "18:00", "20:00")],
            experience: Some(2.0),
            rating: Some(4.2),
            bio: None,
        },
        Tutor {
            id: "4".to_string(),
            full_name: "Marie Dubois".to_string(),
            subjects: strings(&["Mathématiques", "Chimie", "Biologie"]),
            levels: strings(&["Collège", "Lycée", "Seconde", "Première"]),
            availability: vec![
                slot(Weekday::Mardi, "16:00", "18:00"),
                slot(Weekday::Jeudi, "14:00", "16:00"),
                slot(Weekday::Vendredi, "17:00", "19:00"),
                slot(Weekday::Samedi, "09:00", "12:00"),
            ],
            experience: Some(4.0),
            rating: Some(4.7),
            bio: Some(
                "Professeure passionnée par les sciences, spécialisée dans l'accompagnement des élèves en difficulté."
                    .to_string(),
            ),
        },
        Tutor {
            id: "5".to_string(),
            full_name: "Thomas Leroy".to_string(),
            subjects: strings(&["Anglais", "Histoire", "Géographie"]),
            levels: strings(&["Collège", "Lycée", "Seconde", "Première", "Terminale"]),
            availability: vec![
                slot(Weekday::Lundi, "17:00", "19:00"),
                slot(Weekday::Mercredi, "15:00", "17:00"),
                slot(Weekday::Jeudi, "18:00", "20:00"),
                slot(Weekday::Dimanche, "10:00", "16:00"),
            ],
            experience: Some(6.0),
            rating: Some(4.9),
            bio: Some(
                "Enseignant polyvalent avec une expérience internationale, excellent pédagogue pour tous les niveaux."
                    .to_string(),
            ),
        },
    ]
}

pub fn sample_students() -> Vec<Student> {
    vec![
        Student {
            id: "1".to_string(),
            full_name: "Ali Benali".to_string(),
            requested_subjects: strings(&["Mathématiques"]),
            level: "Lycée".to_string(),
            availability: vec![slot(Weekday::Lundi, "18:00", "20:00")],
            preferences: None,
        },
        Student {
            id: "2".to_string(),
            full_name: "Yasmine Kaddouri".to_string(),
            requested_subjects: strings(&["Physique"]),
            level: "Collège".to_string(),
            availability: vec![slot(Weekday::Mercredi, "14:00", "16:00")],
            preferences: None,
        },
        Student {
            id: "3".to_string(),
            full_name: "Lucas Moreau".to_string(),
            requested_subjects: strings(&["Mathématiques", "Chimie"]),
            level: "Première".to_string(),
            availability: vec![
                slot(Weekday::Mardi, "16:00", "18:00"),
                slot(Weekday::Jeudi, "14:00", "16:00"),
                slot(Weekday::Samedi, "10:00", "12:00"),
            ],
            preferences: Some(StudentPreferences {
                experience: Some(ExperienceLevel::Intermediate),
                max_price_per_hour: Some(30.0),
                preferred_time_slots: None,
            }),
        },
        Student {
            id: "4".to_string(),
            full_name: "Emma Rousseau".to_string(),
            requested_subjects: strings(&["Anglais", "Histoire"]),
            level: "Terminale".to_string(),
            availability: vec![
                slot(Weekday::Lundi, "17:00", "19:00"),
                slot(Weekday::Mercredi, "15:00", "17:00"),
                slot(Weekday::Dimanche, "14:00", "16:00"),
            ],
            preferences: Some(StudentPreferences {
                experience: Some(ExperienceLevel::Advanced),
                max_price_per_hour: Some(35.0),
                preferred_time_slots: None,
            }),
        },
    ]
}
