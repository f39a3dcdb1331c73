use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection};
use serde::Serialize;
use std::collections::BTreeMap;

use super::{sql_date, RecordResult};

/// Record counts across the whole store.
#[derive(Debug, Serialize)]
pub struct HubStats {
    pub mentors: u64,
    /// Message count per mentor name, in mentor id order.
    pub messages_by_mentor: Vec<(String, u64)>,
    pub tasks_by_status: BTreeMap<String, u64>,
    pub notes_by_category: BTreeMap<String, u64>,
    pub events_total: u64,
    pub events_upcoming: u64,
}

pub fn hub_stats(conn: &Connection) -> RecordResult<HubStats> {
    hub_stats_at(conn, Local::now().naive_local())
}

/// Event dates are local wall-clock times, so "upcoming" is measured against
/// local `reference` time.
pub fn hub_stats_at(conn: &Connection, reference: NaiveDateTime) -> RecordResult<HubStats> {
    let mentors: i64 = conn.query_row("SELECT COUNT(*) FROM mentors", [], |row| row.get(0))?;

    let messages_by_mentor = {
        let mut stmt = conn.prepare(
            "SELECT m.name, COUNT(c.id) FROM mentors m \
             LEFT JOIN chat_messages c ON c.mentor_id = m.id \
             GROUP BY m.id ORDER BY m.id",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64)))?
            .collect::<Result<Vec<_>, _>>()?;
        rows
    };

    let tasks_by_status = grouped_counts(conn, "SELECT status, COUNT(*) FROM tasks GROUP BY status")?;
    let notes_by_category =
        grouped_counts(conn, "SELECT category, COUNT(*) FROM notes GROUP BY category")?;

    let events_total: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
    let events_upcoming: i64 = conn.query_row(
        "SELECT COUNT(*) FROM events WHERE start_date >= ?1",
        params![sql_date(&reference)],
        |row| row.get(0),
    )?;

    Ok(HubStats {
        mentors: mentors as u64,
        messages_by_mentor,
        tasks_by_status,
        notes_by_category,
        events_total: events_total as u64,
        events_upcoming: events_upcoming as u64,
    })
}

fn grouped_counts(conn: &Connection, sql: &str) -> RecordResult<BTreeMap<String, u64>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
    })?;

    let mut map = BTreeMap::new();
    for row in rows {
        let (key, count) = row?;
        map.insert(key, count);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::types::{NewEvent, NewNote, NewTask};
    use crate::records::{chat, events, notes, tasks};

    #[test]
    fn counts_every_record_kind() {
        let mut conn = crate::db::open_in_memory().unwrap();
        chat::append_message(&mut conn, 2, "hi", "hello").unwrap();
        let t = tasks::create_task(
            &mut conn,
            &NewTask { title: "a".into(), ..Default::default() },
        )
        .unwrap();
        tasks::create_task(&mut conn, &NewTask { title: "b".into(), ..Default::default() })
            .unwrap();
        tasks::complete_task(&mut conn, t).unwrap();
        notes::create_note(&mut conn, &NewNote { title: "n".into(), ..Default::default() })
            .unwrap();
        events::create_event(
            &mut conn,
            &NewEvent {
                title: "old".into(),
                start_date: "2001-01-01".into(),
                ..Default::default()
            },
        )
        .unwrap();
        events::create_event(
            &mut conn,
            &NewEvent {
                title: "future".into(),
                start_date: "2999-01-01".into(),
                ..Default::default()
            },
        )
        .unwrap();

        let stats = hub_stats(&conn).unwrap();
        assert_eq!(stats.mentors, 4);
        assert_eq!(stats.messages_by_mentor[1], ("Marek".to_string(), 1));
        assert_eq!(stats.messages_by_mentor[0].1, 0);
        assert_eq!(stats.tasks_by_status.get("completed"), Some(&1));
        assert_eq!(stats.tasks_by_status.get("pending"), Some(&1));
        assert_eq!(stats.notes_by_category.get("general"), Some(&1));
        assert_eq!(stats.events_total, 2);
        assert_eq!(stats.events_upcoming, 1);
    }

    #[test]
    fn upcoming_events_compare_against_local_wall_clock() {
        let mut conn = crate::db::open_in_memory().unwrap();
        events::create_event(
            &mut conn,
            &NewEvent {
                title: "lunch".into(),
                start_date: "2025-06-01T12:00".into(),
                ..Default::default()
            },
        )
        .unwrap();

        let at = |raw: &str| crate::records::parse_user_date("reference", raw).unwrap();
        assert_eq!(hub_stats_at(&conn, at("2025-06-01T11:30")).unwrap().events_upcoming, 1);
        assert_eq!(hub_stats_at(&conn, at("2025-06-01T12:00")).unwrap().events_upcoming, 1);
        assert_eq!(hub_stats_at(&conn, at("2025-06-01T12:30")).unwrap().events_upcoming, 0);
    }
}
