use rusqlite::{params, Connection, OptionalExtension, Row};

use super::types::Mentor;
use super::{RecordError, RecordResult};

struct MentorSeed {
    name: &'static str,
    personality: &'static str,
    description: &'static str,
    image: &'static str,
    specialization: &'static str,
}

/// The four personas inserted into an empty database. Names must match the
/// persona templates in `generator::personas`.
const DEFAULT_MENTORS: &[MentorSeed] = &[
    MentorSeed {
        name: "Anna",
        personality: "Warm and supportive mentor focused on personal growth",
        description: "Specialist in personal development and life balance. Anna helps you find inner calm and harmony.",
        image: "anna.jpg",
        specialization: "Personal growth and well-being",
    },
    MentorSeed {
        name: "Marek",
        personality: "Concrete, matter-of-fact coach focused on professional goals",
        description: "Expert in productivity and career goals. Marek helps you succeed at work.",
        image: "marek.jpg",
        specialization: "Career and productivity",
    },
    MentorSeed {
        name: "Kasia",
        personality: "Energetic motivator who helps break through barriers",
        description: "A life coach full of energy. Kasia gets you moving and past your own limits.",
        image: "kasia.jpg",
        specialization: "Motivation and breaking barriers",
    },
    MentorSeed {
        name: "David",
        personality: "Uncompromising motivator in the style of Goggins",
        description: "Hardcore motivator who accepts no excuses. David pushes you beyond your own limits.",
        image: "david.jpg",
        specialization: "Mental toughness and self-discipline",
    },
];

const MENTOR_COLUMNS: &str = "id, name, personality, description, image, specialization";

fn mentor_from_row(row: &Row<'_>) -> rusqlite::Result<Mentor> {
    Ok(Mentor {
        id: row.get(0)?,
        name: row.get(1)?,
        personality: row.get(2)?,
        description: row.get(3)?,
        image: row.get(4)?,
        specialization: row.get(5)?,
    })
}

/// Insert the default personas if the table is empty. Returns how many rows
/// were inserted (0 on every run after the first).
pub fn seed_default_mentors(conn: &mut Connection) -> RecordResult<usize> {
    let tx = conn.transaction()?;

    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM mentors", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(0);
    }

    for seed in DEFAULT_MENTORS {
        tx.execute(
            "INSERT INTO mentors (name, personality, description, image, specialization) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                seed.name,
                seed.personality,
                seed.description,
                seed.image,
                seed.specialization
            ],
        )?;
    }

    tx.commit()?;
    Ok(DEFAULT_MENTORS.len())
}

pub fn list_mentors(conn: &Connection) -> RecordResult<Vec<Mentor>> {
    let mut stmt = conn.prepare(&format!("SELECT {MENTOR_COLUMNS} FROM mentors ORDER BY id"))?;
    let mentors = stmt
        .query_map([], mentor_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(mentors)
}

pub fn find_mentor(conn: &Connection, id: i64) -> RecordResult<Option<Mentor>> {
    let mentor = conn
        .query_row(
            &format!("SELECT {MENTOR_COLUMNS} FROM mentors WHERE id = ?1"),
            params![id],
            mentor_from_row,
        )
        .optional()?;
    Ok(mentor)
}

pub fn get_mentor(conn: &Connection, id: i64) -> RecordResult<Mentor> {
    find_mentor(conn, id)?.ok_or(RecordError::NotFound { kind: "mentor", id })
}

pub(crate) fn mentor_exists(conn: &Connection, id: i64) -> RecordResult<bool> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM mentors WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}
